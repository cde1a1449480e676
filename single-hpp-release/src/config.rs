use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::error::ReleaseError;

/// Version value meaning "no version chosen yet". Nothing is committed,
/// pushed or published while the release version equals it.
pub const UNSET_VERSION: &str = "v.X.X.X";

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseSection,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub starter: StarterConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseSection {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_last_version")]
    pub last_version: String,

    #[serde(default = "default_true")]
    pub push_to_production: bool,

    #[serde(default = "default_true")]
    pub checksum: bool,

    #[serde(default = "default_true")]
    pub preflight: bool,
}

impl Default for ReleaseSection {
    fn default() -> Self {
        Self {
            version: default_version(),
            last_version: default_last_version(),
            push_to_production: true,
            checksum: true,
            preflight: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Human readable name used in the banner and commit message
    pub name: String,
    /// File stem of the versioned header (`{stem}.{version}.hpp`)
    pub header_stem: String,
    pub url: String,
    /// GitHub `owner/repo` of the library
    pub repository: String,
    /// GitHub `owner/repo` of the starter project
    pub starter_repository: String,
    /// Handles thanked in the announcement post
    pub thanks: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Approval Tests".to_string(),
            header_stem: "ApprovalTests".to_string(),
            url: "https://github.com/approvals/ApprovalTests.cpp".to_string(),
            repository: "approvals/ApprovalTests.cpp".to_string(),
            starter_repository: "approvals/ApprovalTests.cpp.StarterProject".to_string(),
            thanks: "@LlewellynFalco @ClareMacraeUK".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub project_dir: PathBuf,
    pub source_dir: PathBuf,
    pub release_dir: PathBuf,
    pub starter_project_dir: PathBuf,
    /// Relative to `project_dir`
    pub readme_template: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from(".."),
            source_dir: PathBuf::from("../ApprovalTests"),
            release_dir: PathBuf::from("releases"),
            starter_project_dir: PathBuf::from("../../ApprovalTests.Cpp.StarterProject"),
            readme_template: PathBuf::from("mdsource/README.source.md"),
        }
    }
}

/// Layout of the starter project, relative to its root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StarterConfig {
    pub library_dir: PathBuf,
    pub redirect_header: PathBuf,
    pub ide_project: PathBuf,
    pub build_dir: PathBuf,
    pub remote: String,
    pub branch: String,
}

impl Default for StarterConfig {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from("lib"),
            redirect_header: PathBuf::from("lib/ApprovalTests.hpp"),
            ide_project: PathBuf::from("visual-studio-2017/StarterProject.vcxproj"),
            build_dir: PathBuf::from("cmake-build-debug"),
            remote: "origin".to_string(),
            branch: "master".to_string(),
        }
    }
}

/// External programs, each as `[program, args...]`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsConfig {
    /// Run in the source directory; the output path is appended
    pub concatenate: Vec<String>,
    pub build: Vec<String>,
    pub render_docs: Vec<String>,
    /// Opens URLs and folders; platform default when unset
    pub opener: Option<Vec<String>>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            concatenate: vec![
                "java".to_string(),
                "-jar".to_string(),
                "../build/SingleHpp.v.0.0.2.jar".to_string(),
            ],
            build: vec!["cmake".to_string(), "--build".to_string(), ".".to_string()],
            render_docs: vec!["./run_markdown_templates.sh".to_string()],
            opener: None,
        }
    }
}

fn default_version() -> String {
    UNSET_VERSION.to_string()
}

fn default_last_version() -> String {
    "v.7.0.0".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(ReleaseError::from)?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("single-hpp-release.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/single-hpp-release.toml"))
    }

    /// Load the project file if it exists, else the user-wide one, else defaults
    pub fn discover(project_path: &Path) -> Result<Self> {
        if project_path.exists() {
            tracing::debug!("Loading configuration from {}", project_path.display());
            return Self::load(project_path);
        }
        let user_path = Self::default_path();
        tracing::debug!("Loading configuration from {}", user_path.display());
        Self::load(&user_path)
    }

    /// Command line arguments take precedence over file values
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(tag) = &args.tag {
            self.release.version = tag.clone();
        }

        if let Some(last_tag) = &args.last_tag {
            self.release.last_version = last_tag.clone();
        }

        if args.no_push {
            self.release.push_to_production = false;
        }

        if args.skip_preflight {
            self.release.preflight = false;
        }
    }

    /// Resolve every relative path against `base` and freeze the result
    pub fn resolve(self, base: &Path) -> ReleaseConfig {
        let absolute = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };

        ReleaseConfig {
            version: self.release.version,
            last_version: self.release.last_version,
            push_to_production: self.release.push_to_production,
            checksum: self.release.checksum,
            preflight: self.release.preflight,
            project_dir: absolute(&self.paths.project_dir),
            source_dir: absolute(&self.paths.source_dir),
            release_dir: absolute(&self.paths.release_dir),
            starter_project_dir: absolute(&self.paths.starter_project_dir),
            readme_template: self.paths.readme_template,
            project: self.project,
            starter: self.starter,
            tools: self.tools,
        }
    }
}

/// Everything one release run needs, with directories made absolute.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub version: String,
    pub last_version: String,
    pub push_to_production: bool,
    pub checksum: bool,
    pub preflight: bool,
    pub project_dir: PathBuf,
    pub source_dir: PathBuf,
    pub release_dir: PathBuf,
    pub starter_project_dir: PathBuf,
    pub readme_template: PathBuf,
    pub project: ProjectConfig,
    pub starter: StarterConfig,
    pub tools: ToolsConfig,
}

impl ReleaseConfig {
    pub fn version_is_set(&self) -> bool {
        self.version != UNSET_VERSION
    }

    pub fn header_name(&self, version: &str) -> String {
        format!("{}.{}.hpp", self.project.header_stem, version)
    }

    pub fn new_header_name(&self) -> String {
        self.header_name(&self.version)
    }

    pub fn old_header_name(&self) -> String {
        self.header_name(&self.last_version)
    }

    pub fn release_header_path(&self) -> PathBuf {
        self.release_dir.join(self.new_header_name())
    }

    pub fn release_temp_path(&self) -> PathBuf {
        self.release_dir.join(format!("{}.tmp", self.new_header_name()))
    }

    pub fn starter_library_dir(&self) -> PathBuf {
        self.starter_project_dir.join(&self.starter.library_dir)
    }

    pub fn starter_new_header_path(&self) -> PathBuf {
        self.starter_library_dir().join(self.new_header_name())
    }

    pub fn starter_old_header_path(&self) -> PathBuf {
        self.starter_library_dir().join(self.old_header_name())
    }

    pub fn redirect_header_path(&self) -> PathBuf {
        self.starter_project_dir.join(&self.starter.redirect_header)
    }

    pub fn ide_project_path(&self) -> PathBuf {
        self.starter_project_dir.join(&self.starter.ide_project)
    }

    pub fn starter_build_dir(&self) -> PathBuf {
        self.starter_project_dir.join(&self.starter.build_dir)
    }

    pub fn readme_template_path(&self) -> PathBuf {
        self.project_dir.join(&self.readme_template)
    }
}
