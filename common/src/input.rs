use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::Record;

const TEXT_EXT: &str = "txt";

/// Regular, non-hidden `*.txt` files directly inside `dir`, sorted by path.
fn text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == TEXT_EXT) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Fill `input_dir` with `copies` copies of every `*.txt` file in `raw_dir`,
/// named `<stem>_<i>.txt` for `i` in `1..=copies`.
///
/// Old `*.txt` files in `input_dir` are removed first. A missing `raw_dir`
/// produces no copies. Returns the number of files written.
pub fn replicate(raw_dir: &Path, input_dir: &Path, copies: usize) -> Result<usize> {
    fs::create_dir_all(input_dir)
        .with_context(|| format!("create input dir {}", input_dir.display()))?;

    for stale in text_files(input_dir)? {
        fs::remove_file(&stale).with_context(|| format!("remove {}", stale.display()))?;
    }

    let raw_files = if raw_dir.is_dir() {
        text_files(raw_dir)?
    } else {
        debug!("raw dir {} missing, nothing to replicate", raw_dir.display());
        vec![]
    };
    if raw_files.is_empty() {
        warn!("no raw files in {}", raw_dir.display());
    }

    let mut written = 0;
    for i in 1..=copies {
        for raw in &raw_files {
            let mut name = raw.file_stem().unwrap_or_default().to_os_string();
            name.push(format!("_{i}.{TEXT_EXT}"));
            let target = input_dir.join(name);
            fs::copy(raw, &target)
                .with_context(|| format!("copy {} to {}", raw.display(), target.display()))?;
            written += 1;
        }
    }

    info!(
        "replicated {} raw files x{} into {}",
        raw_files.len(),
        copies,
        input_dir.display()
    );
    Ok(written)
}

/// Call `visit(file_name, line)` for every non-blank, trimmed line of every
/// `*.txt` file in `input_dir`, one line at a time. Returns the number of
/// lines visited.
pub fn visit_lines(input_dir: &Path, mut visit: impl FnMut(&str, &str)) -> Result<usize> {
    let files = text_files(input_dir)?;
    if files.is_empty() {
        warn!("no input files in {}", input_dir.display());
    }

    let mut visited = 0;
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("read {}", path.display()))?;
            let line = line.trim();
            if !line.is_empty() {
                visit(&name, line);
                visited += 1;
            }
        }
    }
    Ok(visited)
}

/// Read every `*.txt` file in `input_dir`, yielding one record per non-blank
/// line with the line trimmed. Line order within a file is kept.
pub fn load_input(input_dir: &Path) -> Result<Vec<Record>> {
    let mut records = vec![];
    visit_lines(input_dir, |file, line| records.push(Record::new(file, line)))?;
    debug!("loaded {} lines from {}", records.len(), input_dir.display());
    Ok(records)
}
