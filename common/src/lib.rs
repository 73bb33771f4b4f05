use time::macros::format_description;
use tracing::Level;
use tracing_subscriber::fmt::time::LocalTime;

pub mod input;
pub mod job;
pub mod output;
pub mod stages;

pub use input::{load_input, replicate, visit_lines};
pub use job::{run_job, JobConfig, JobSummary, Strategy};
pub use output::{create_marker, create_output_directory, save_output, PART_FILE, SUCCESS_MARKER};
pub use stages::{count_words, line_preprocessing, mapper, reducer, shuffle_and_sort, WordCounter};

/// A `(source file, text)` pair. `text` is a trimmed line after loading and a
/// single token after preprocessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub file: String,
    pub text: String,
}

impl Record {
    pub fn new(file: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            text: text.into(),
        }
    }
}

/// Intermediate `(word, count)` pair, also used for report entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyValue {
    pub key: String,
    pub value: u64,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

pub fn init_logger(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_timer(timer)
        .with_target(false)
        .init();
}
