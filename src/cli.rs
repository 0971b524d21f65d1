//! Command-line arguments.

use crate::config::{DEFAULT_LINES_PER_FILE, SplitConfig};
use clap::Parser;
use std::path::PathBuf;

/// Split a CSV file into parts that each repeat the header row.
#[derive(Parser, Debug)]
#[command(
    name = "csvsplit",
    version,
    about = "Split a large CSV file into parts of at most N data rows, each starting with the header",
    after_help = "Part i is written to <dir of OUTPUT_FILE>/<i>_<name of OUTPUT_FILE>. Set RUST_LOG to tune logging."
)]
pub struct Cli {
    /// CSV file to split
    #[arg(long = "input-file", default_value = "data/example.csv")]
    pub input_file: PathBuf,

    /// Template for part names; defaults to the input file
    #[arg(long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Maximum data rows per part
    #[arg(long, default_value_t = DEFAULT_LINES_PER_FILE, allow_negative_numbers = true)]
    pub lines: i64,

    /// Save run metrics as JSON to this path
    #[arg(long = "metrics-json")]
    pub metrics_json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The run configuration described by these arguments.
    #[must_use]
    pub fn to_config(&self) -> SplitConfig {
        let config = SplitConfig::new(&self.input_file).with_lines_per_file(self.lines);
        match &self.output_file {
            Some(output) => config.with_output_path(output),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::parse_from(["csvsplit"]);
        let config = cli.to_config();
        assert_eq!(config.input_path, PathBuf::from("data/example.csv"));
        assert_eq!(config.output_path, config.input_path);
        assert_eq!(config.lines_per_file, 100_000);
    }

    #[test]
    fn negative_lines_reach_validation() {
        let cli = Cli::parse_from(["csvsplit", "--input-file", "in.csv", "--lines", "-3"]);
        assert_eq!(cli.to_config().lines_per_file, -3);
    }

    #[test]
    fn output_file_overrides_template() {
        let cli = Cli::parse_from([
            "csvsplit",
            "--input-file",
            "in.csv",
            "--output-file",
            "out/parts.csv",
        ]);
        assert_eq!(cli.to_config().output_path, PathBuf::from("out/parts.csv"));
    }
}
