use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::ReleaseConfig;
use crate::files::replace_text_in_file;
use crate::runner::{CommandRunner, CommandSpec};

/// What changed in the starter project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterUpdate {
    pub new_header: PathBuf,
    /// Whether the previous release's header existed and was deleted
    pub removed_previous: bool,
}

/// Reset the starter project and point it at the freshly built header.
pub fn update_starter_project<R: CommandRunner>(
    config: &ReleaseConfig,
    runner: &R,
) -> Result<StarterUpdate> {
    let starter_dir = &config.starter_project_dir;
    tracing::info!("Updating starter project: {}", starter_dir.display());

    // Make sure the starter project is clean
    runner
        .run(&CommandSpec::new("git", starter_dir).args(["clean", "-fx"]))
        .context("Failed to clean starter project")?;
    runner
        .run(&CommandSpec::new("git", starter_dir).args(["reset", "--hard"]))
        .context("Failed to reset starter project")?;

    let source = config.release_header_path();
    let new_header = config.starter_new_header_path();
    fs::create_dir_all(config.starter_library_dir())?;
    fs::copy(&source, &new_header).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            new_header.display()
        )
    })?;

    let removed_previous = remove_previous_header(config)?;

    replace_text_in_file(
        &config.redirect_header_path(),
        &config.last_version,
        &config.version,
    )
    .context("Failed to update redirect header")?;

    replace_text_in_file(
        &config.ide_project_path(),
        &config.old_header_name(),
        &config.new_header_name(),
    )
    .context("Failed to update IDE project file")?;

    Ok(StarterUpdate {
        new_header,
        removed_previous,
    })
}

/// Delete the last release's header; a no-op when re-releasing the same
/// version since that file is the one just copied in.
fn remove_previous_header(config: &ReleaseConfig) -> Result<bool> {
    if config.old_header_name() == config.new_header_name() {
        return Ok(false);
    }

    let old_header = config.starter_old_header_path();
    if !old_header.exists() {
        tracing::debug!("No previous header at {}", old_header.display());
        return Ok(false);
    }

    fs::remove_file(&old_header)
        .with_context(|| format!("Failed to remove {}", old_header.display()))?;
    tracing::info!("Removed previous header: {}", old_header.display());
    Ok(true)
}
