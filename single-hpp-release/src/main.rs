use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use single_hpp_release::cli::Args;
use single_hpp_release::config::Config;
use single_hpp_release::pipeline::{Outcome, ReleasePipeline};
use single_hpp_release::runner::SystemRunner;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if args.verbose {
        tracing::info!("Running single-hpp-release with verbose output");
    }

    let mut config = Config::discover(&args.config).context("Failed to load configuration")?;
    config.merge_with_args(&args);

    let base = std::env::current_dir()?;
    let pipeline = ReleasePipeline::new(config.resolve(&base), SystemRunner);
    let report = pipeline.run()?;

    match report.outcome {
        Outcome::Stopped(reason) => println!("{reason}"),
        Outcome::Published => println!(
            "Released {} - finish the release page and post in the browser",
            pipeline.config().version
        ),
    }

    Ok(())
}
