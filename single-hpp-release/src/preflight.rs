use git2::Repository;

use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};

/// Checks that run before anything is built or touched.
pub fn preflight(config: &ReleaseConfig) -> Result<()> {
    if !config.source_dir.is_dir() {
        return Err(ReleaseError::Preflight(format!(
            "source directory {} does not exist",
            config.source_dir.display()
        )));
    }

    let repo = Repository::open(&config.starter_project_dir).map_err(|e| {
        ReleaseError::Preflight(format!(
            "starter project {} is not a git repository: {}",
            config.starter_project_dir.display(),
            e.message()
        ))
    })?;

    let branch = current_branch(&repo)?;
    if branch != config.starter.branch {
        return Err(ReleaseError::Preflight(format!(
            "starter project is on branch '{}', expected '{}'",
            branch, config.starter.branch
        )));
    }

    if config.version_is_set() && config.push_to_production && config.version == config.last_version
    {
        return Err(ReleaseError::Preflight(format!(
            "version {} was already released; bump the version first",
            config.version
        )));
    }

    tracing::info!("Preflight checks passed");
    Ok(())
}

/// Branch HEAD points at, including a branch with no commits yet
fn current_branch(repo: &Repository) -> Result<String> {
    let head = repo.find_reference("HEAD")?;
    let target = head
        .symbolic_target()
        .ok_or_else(|| ReleaseError::Preflight("starter project HEAD is detached".to_string()))?;
    Ok(target.trim_start_matches("refs/heads/").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use git2::RepositoryInitOptions;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn layout(root: &Path, version: &str) -> ReleaseConfig {
        fs::create_dir_all(root.join("src")).unwrap();
        let mut config = Config::default();
        config.release.version = version.to_string();
        config.paths.source_dir = "src".into();
        config.paths.starter_project_dir = "starter".into();
        config.resolve(root)
    }

    fn init_repo(path: &Path, branch: &str) {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(branch);
        Repository::init_opts(path, &opts).unwrap();
    }

    #[test]
    fn test_passes_on_expected_branch() {
        let dir = tempdir().unwrap();
        let config = layout(dir.path(), "v.8.0.0");
        init_repo(&config.starter_project_dir, "master");

        preflight(&config).unwrap();
    }

    #[test]
    fn test_rejects_missing_repository() {
        let dir = tempdir().unwrap();
        let config = layout(dir.path(), "v.8.0.0");
        fs::create_dir_all(&config.starter_project_dir).unwrap();

        let err = preflight(&config).unwrap_err();
        assert!(err.to_string().contains("not a git repository"));
    }

    #[test]
    fn test_rejects_wrong_branch() {
        let dir = tempdir().unwrap();
        let config = layout(dir.path(), "v.8.0.0");
        init_repo(&config.starter_project_dir, "feature");

        let err = preflight(&config).unwrap_err();
        assert!(err.to_string().contains("'feature'"));
    }

    #[test]
    fn test_rejects_re_release_of_last_version() {
        let dir = tempdir().unwrap();
        let config = layout(dir.path(), "v.7.0.0");
        init_repo(&config.starter_project_dir, "master");

        let err = preflight(&config).unwrap_err();
        assert!(err.to_string().contains("already released"));
    }

    #[test]
    fn test_rejects_missing_source_dir() {
        let dir = tempdir().unwrap();
        let mut config = layout(dir.path(), "v.8.0.0");
        config.source_dir = dir.path().join("nowhere");

        assert!(matches!(
            preflight(&config).unwrap_err(),
            ReleaseError::Preflight(_)
        ));
    }
}
