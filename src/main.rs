use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use csvsplit::cli::Cli;
use csvsplit::split_file;

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli.to_config();
    let summary = match split_file(&config) {
        Ok(summary) => summary,
        Err(e) => {
            error!("split failed ({:?}): {e}", e.kind());
            return Err(e).with_context(|| format!("cannot split {}", config.input_path.display()));
        }
    };

    if let Some(path) = &cli.metrics_json {
        summary
            .metrics
            .save_to_file(path)
            .context("Failed to save metrics")?;
    }
    Ok(())
}
