use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::debug;

use crate::KeyValue;

pub const PART_FILE: &str = "part-00000";
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Delete `output_dir` recursively if present, then create it empty.
///
/// Not safe for concurrent runs sharing the same directory.
pub fn create_output_directory(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("remove output dir {}", output_dir.display()))?;
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))
}

/// Write `word\tcount` lines to `part-00000` in the given order.
pub fn save_output(output_dir: &Path, report: &[KeyValue]) -> Result<()> {
    let path = output_dir.join(PART_FILE);
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for kv in report {
        writeln!(writer, "{}\t{}", kv.key, kv.value)?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    debug!("wrote {} entries to {}", report.len(), path.display());
    Ok(())
}

pub fn create_marker(output_dir: &Path) -> Result<()> {
    let path = output_dir.join(SUCCESS_MARKER);
    File::create(&path).with_context(|| format!("create {}", path.display()))?;
    Ok(())
}

/// Drop a `_SUCCESS` left by an earlier run.
pub(crate) fn remove_marker(output_dir: &Path) -> Result<()> {
    let path = output_dir.join(SUCCESS_MARKER);
    if path.exists() {
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
    }
    Ok(())
}
