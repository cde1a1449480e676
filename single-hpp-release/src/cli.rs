use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "single-hpp-release",
    version,
    about = "Build the single-header release and update the starter project",
    long_about = None
)]
pub struct Args {
    /// Version to release (e.g., v.8.0.0)
    /// If not specified, uses release.version from the config file
    #[clap(short, long)]
    pub tag: Option<String>,

    /// Version of the previous release (e.g., v.7.0.0)
    #[clap(long)]
    pub last_tag: Option<String>,

    /// Build and verify only: don't commit, push or publish
    #[clap(long)]
    pub no_push: bool,

    /// Skip the starter project checks that run before anything is built
    #[clap(long)]
    pub skip_preflight: bool,

    /// Configuration file path
    #[clap(long, default_value = ".config/single-hpp-release.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}
