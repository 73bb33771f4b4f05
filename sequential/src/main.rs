use clap::Parser;
use common::{init_logger, run_job, JobConfig, Strategy};
use std::{path::PathBuf, time::Instant};
use tracing::info;

#[derive(Parser, Debug)]
struct Cli {
    /// Template corpus copied into the input dir
    #[arg(long, default_value = "files/raw")]
    raw_dir: PathBuf,
    #[arg(long, default_value = "files/input")]
    input_dir: PathBuf,
    #[arg(long, default_value = "files/output")]
    output_dir: PathBuf,
    /// Number of copies of each raw file
    #[arg(short = 'n', long, default_value_t = 1000)]
    copies: usize,
    #[arg(long, value_enum, default_value_t = Strategy::Staged)]
    strategy: Strategy,
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for JobConfig {
    fn from(cli: Cli) -> Self {
        Self {
            raw_dir: cli.raw_dir,
            input_dir: cli.input_dir,
            output_dir: cli.output_dir,
            copies: cli.copies,
            strategy: cli.strategy,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = JobConfig::from(cli);

    let copies = config.replicate()?;
    info!("{} input files ready", copies);

    let start = Instant::now();
    let summary = run_job(&config)?;
    let elapsed = start.elapsed().as_secs_f64();

    info!(
        "{} distinct words, {} total",
        summary.distinct_words, summary.total_words
    );
    info!("pipeline took {elapsed:.2}s");
    println!("elapsed: {elapsed:.2}s");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_defaults() {
        Cli::command().debug_assert();
        let cli = Cli::parse_from(["sequential"]);
        assert_eq!(JobConfig::from(cli), JobConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "sequential",
            "-n",
            "3",
            "--strategy",
            "streaming",
            "--input-dir",
            "in",
        ]);
        let config = JobConfig::from(cli);
        assert_eq!(config.copies, 3);
        assert_eq!(config.strategy, Strategy::Streaming);
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("files/output"));
    }
}
