use anyhow::{Context, Result};
use url::Url;

use crate::config::ReleaseConfig;
use crate::files::replace_text_in_file;
use crate::runner::{CommandRunner, CommandSpec};

/// Commit and push the starter project, refresh the docs and open the
/// announcement drafts.
pub fn publish<R: CommandRunner>(config: &ReleaseConfig, runner: &R) -> Result<()> {
    commit_and_push_starter_project(config, runner)?;
    update_readme_and_docs(config, runner)?;
    announce(config, runner)?;
    Ok(())
}

pub fn commit_and_push_starter_project<R: CommandRunner>(
    config: &ReleaseConfig,
    runner: &R,
) -> Result<()> {
    let starter_dir = &config.starter_project_dir;
    let message = format!("Update to {} {}", config.project.name, config.version);
    tracing::info!("Committing starter project: {}", message);

    runner
        .run(&CommandSpec::new("git", starter_dir).args(["add", "."]))
        .context("Failed to stage starter project changes")?;

    // An earlier run may have committed and then failed to push
    let status = runner
        .run(&CommandSpec::new("git", starter_dir).args(["status", "--porcelain"]))
        .context("Failed to read starter project status")?;
    if status.stdout.trim().is_empty() {
        tracing::info!("Starter project has nothing to commit; pushing existing commits");
    } else {
        runner
            .run(&CommandSpec::new("git", starter_dir).args(["commit", "-m"]).arg(message))
            .context("Failed to commit starter project")?;
    }
    runner
        .run(
            &CommandSpec::new("git", starter_dir)
                .arg("push")
                .arg(config.starter.remote.as_str())
                .arg(config.starter.branch.as_str()),
        )
        .context("Failed to push starter project")?;

    Ok(())
}

pub fn update_readme_and_docs<R: CommandRunner>(config: &ReleaseConfig, runner: &R) -> Result<()> {
    replace_text_in_file(
        &config.readme_template_path(),
        &config.last_version,
        &config.version,
    )
    .context("Failed to update README template")?;

    let spec = CommandSpec::from_argv(&config.tools.render_docs, &config.project_dir)?;
    runner
        .run(&spec)
        .context("Failed to regenerate documentation")?;

    Ok(())
}

/// Pre-filled social media post announcing the release
pub fn social_post_url(config: &ReleaseConfig) -> Result<Url> {
    let version = &config.version;
    let hashtag = config
        .project
        .repository
        .rsplit('/')
        .next()
        .unwrap_or(&config.project.repository);

    let text = format!(
        "#{hashtag} {version} released, now with ___!\r\n\
         https://github.com/{repo}/releases/tag/{version} \r\n\
         or try the starter project: https://github.com/{starter}\r\n\
         Thanks {thanks} !",
        repo = config.project.repository,
        starter = config.project.starter_repository,
        thanks = config.project.thanks,
    );

    Ok(Url::parse_with_params(
        "https://twitter.com/intent/tweet",
        &[("text", text)],
    )?)
}

/// Draft of the GitHub release page for the new tag
pub fn release_page_url(config: &ReleaseConfig) -> Result<Url> {
    let base = format!(
        "https://github.com/{}/releases/new",
        config.project.repository
    );
    let title = format!("Single Hpp File - {}", config.version);

    Ok(Url::parse_with_params(
        &base,
        &[("tag", config.version.as_str()), ("title", title.as_str())],
    )?)
}

/// Open the announcement drafts, then the release folder. The release page
/// is opened after the post so its tab ends up on top.
pub fn announce<R: CommandRunner>(config: &ReleaseConfig, runner: &R) -> Result<()> {
    let targets = [
        social_post_url(config)?.to_string(),
        release_page_url(config)?.to_string(),
        config.release_dir.to_string_lossy().into_owned(),
    ];

    let opener = config.tools.opener.clone().unwrap_or_else(default_opener);

    for target in targets {
        let spec = CommandSpec::from_argv(&opener, &config.project_dir)?.arg(target);
        if let Err(e) = runner.run(&spec) {
            tracing::warn!("Failed to open {}: {}", spec, e);
        }
    }

    Ok(())
}

fn default_opener() -> Vec<String> {
    let program = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    };
    vec![program.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::Path;

    fn config() -> ReleaseConfig {
        let mut config = Config::default();
        config.release.version = "v.8.0.0".to_string();
        config.resolve(Path::new("/work/build"))
    }

    #[test]
    fn test_social_post_url() {
        let url = social_post_url(&config()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://twitter.com/intent/tweet?text=%23ApprovalTests.cpp+v.8.0.0+released%2C+now+with+___%21%0D%0Ahttps%3A%2F%2Fgithub.com%2Fapprovals%2FApprovalTests.cpp%2Freleases%2Ftag%2Fv.8.0.0+%0D%0Aor+try+the+starter+project%3A+https%3A%2F%2Fgithub.com%2Fapprovals%2FApprovalTests.cpp.StarterProject%0D%0AThanks+%40LlewellynFalco+%40ClareMacraeUK+%21"
        );
    }

    #[test]
    fn test_release_page_url() {
        let url = release_page_url(&config()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/approvals/ApprovalTests.cpp/releases/new?tag=v.8.0.0&title=Single+Hpp+File+-+v.8.0.0"
        );
    }

    #[test]
    fn test_default_opener_is_single_program() {
        assert_eq!(default_opener().len(), 1);
    }
}
