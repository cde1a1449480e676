use anyhow::{Context, Result};
use std::fmt;

use crate::config::ReleaseConfig;
use crate::runner::{CommandRunner, CommandSpec};

/// Why a successful run stopped before publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    VersionUnset,
    PushDisabled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::VersionUnset => write!(
                f,
                "Everything worked - version number not set, so didn't commit or push"
            ),
            StopReason::PushDisabled => write!(f, "Everything worked - didn't commit or push"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Stop(StopReason),
}

/// Decide whether a verified build may be published
pub fn publish_verdict(config: &ReleaseConfig) -> Verdict {
    if !config.version_is_set() {
        Verdict::Stop(StopReason::VersionUnset)
    } else if !config.push_to_production {
        Verdict::Stop(StopReason::PushDisabled)
    } else {
        Verdict::Proceed
    }
}

/// Build the starter project, then decide whether to publish.
pub fn verify_build<R: CommandRunner>(config: &ReleaseConfig, runner: &R) -> Result<Verdict> {
    let build_dir = config.starter_build_dir();
    tracing::info!("Checking starter project builds in {}", build_dir.display());

    let spec = CommandSpec::from_argv(&config.tools.build, &build_dir)?;
    runner
        .run(&spec)
        .context("Starter project failed to build")?;

    Ok(publish_verdict(config))
}
