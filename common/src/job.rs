use anyhow::Result;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    input::{load_input, replicate, visit_lines},
    output::{create_marker, create_output_directory, remove_marker, save_output},
    stages::{line_preprocessing, mapper, reducer, shuffle_and_sort, WordCounter},
    KeyValue,
};

/// How the report is computed. Both produce the same `part-00000`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Preprocess, map, sort and reduce, each stage fully materialized.
    #[default]
    Staged,
    /// Fold each line into a word -> count map as it is read.
    Streaming,
}

/// Paths and knobs for one replicate-then-count run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub raw_dir: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub copies: usize,
    pub strategy: Strategy,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("files/raw"),
            input_dir: PathBuf::from("files/input"),
            output_dir: PathBuf::from("files/output"),
            copies: 1000,
            strategy: Strategy::Staged,
        }
    }
}

impl JobConfig {
    /// Copy the raw corpus `copies` times into `input_dir`.
    pub fn replicate(&self) -> Result<usize> {
        replicate(&self.raw_dir, &self.input_dir, self.copies)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSummary {
    pub lines: usize,
    pub distinct_words: usize,
    pub total_words: u64,
}

fn staged(input_dir: &Path) -> Result<(usize, Vec<KeyValue>)> {
    let lines = load_input(input_dir)?;
    let n_lines = lines.len();
    let words = line_preprocessing(lines);
    let intermediate = mapper(words);
    let sorted = shuffle_and_sort(intermediate);
    Ok((n_lines, reducer(sorted)))
}

fn streaming(input_dir: &Path) -> Result<(usize, Vec<KeyValue>)> {
    let mut counter = WordCounter::default();
    let lines = visit_lines(input_dir, |_, line| counter.add_line(line))?;
    Ok((lines, counter.into_report()))
}

/// Count words in every `*.txt` file of `config.input_dir` and write the report
/// and `_SUCCESS` marker into a freshly recreated `config.output_dir`.
///
/// `_SUCCESS` is only present once the whole job has succeeded; a stale marker
/// from an earlier run is removed before anything else happens.
pub fn run_job(config: &JobConfig) -> Result<JobSummary> {
    let JobConfig {
        input_dir,
        output_dir,
        strategy,
        ..
    } = config;
    info!(
        "running {:?} job: {} -> {}",
        strategy,
        input_dir.display(),
        output_dir.display()
    );
    remove_marker(output_dir)?;

    let (lines, report) = match strategy {
        Strategy::Staged => staged(input_dir)?,
        Strategy::Streaming => streaming(input_dir)?,
    };

    create_output_directory(output_dir)?;
    save_output(output_dir, &report)?;
    create_marker(output_dir)?;

    let summary = JobSummary {
        lines,
        distinct_words: report.len(),
        total_words: report.iter().map(|kv| kv.value).sum(),
    };
    info!("job done: {:?}", summary);
    Ok(summary)
}
