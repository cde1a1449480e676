use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::ReleaseConfig;
use crate::error::ReleaseError;
use crate::runner::{CommandRunner, CommandSpec};

/// Files written by [`assemble_header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledHeader {
    pub header: PathBuf,
    pub temp: PathBuf,
    pub checksum: Option<PathBuf>,
}

/// Comment block placed at the top of the released header
pub fn banner(project_name: &str, version: &str, url: &str) -> String {
    format!("\n// {project_name} version {version}\n// More information at: {url}\n\n")
}

/// Run the concatenation tool and write the versioned header into the
/// release directory.
pub fn assemble_header<R: CommandRunner>(
    config: &ReleaseConfig,
    runner: &R,
) -> Result<AssembledHeader> {
    let header = config.release_header_path();
    let temp = config.release_temp_path();
    tracing::info!("Creating single header file: {}", header.display());

    fs::create_dir_all(&config.release_dir).with_context(|| {
        format!(
            "Failed to create release directory {}",
            config.release_dir.display()
        )
    })?;

    // A temp file left by an earlier run must not pass for fresh output
    match fs::remove_file(&temp) {
        Ok(()) => tracing::debug!("Removed stale {}", temp.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to remove {}", temp.display()));
        }
    }

    let spec = CommandSpec::from_argv(&config.tools.concatenate, &config.source_dir)?
        .arg(temp.to_string_lossy());
    runner
        .run(&spec)
        .context("Failed to concatenate the library sources")?;

    let raw = fs::read(&temp).map_err(|_| ReleaseError::HeaderNotProduced { path: temp.clone() })?;

    let mut content = banner(&config.project.name, &config.version, &config.project.url)
        .into_bytes();
    content.extend_from_slice(&raw);
    fs::write(&header, &content)
        .with_context(|| format!("Failed to write {}", header.display()))?;

    let checksum = if config.checksum {
        Some(write_checksum(&header)?)
    } else {
        None
    };

    Ok(AssembledHeader {
        header,
        temp,
        checksum,
    })
}

/// Write `<file>.sha256` next to `path` in `sha256sum` format
fn write_checksum(path: &Path) -> Result<PathBuf> {
    use sha2::{Digest, Sha256};

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ReleaseError::Config(format!("Invalid file path: {}", path.display())))?;

    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    let hash_hex = hex::encode(hasher.finalize());

    let checksum_path = path.with_file_name(format!("{file_name}.sha256"));
    let mut checksum_file = File::create(&checksum_path)?;
    writeln!(checksum_file, "{}  {}", hash_hex, file_name)?;

    tracing::info!("Generated checksum: {}", checksum_path.display());
    Ok(checksum_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_banner_format() {
        assert_eq!(
            banner("Approval Tests", "v.8.0.0", "https://example.com/x"),
            "\n// Approval Tests version v.8.0.0\n// More information at: https://example.com/x\n\n"
        );
    }

    #[test]
    fn test_write_checksum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ApprovalTests.v.8.0.0.hpp");
        fs::write(&path, b"abc").unwrap();

        let checksum_path = write_checksum(&path).unwrap();

        assert_eq!(
            checksum_path,
            dir.path().join("ApprovalTests.v.8.0.0.hpp.sha256")
        );
        // sha256("abc")
        assert_eq!(
            fs::read_to_string(&checksum_path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad  ApprovalTests.v.8.0.0.hpp\n"
        );
    }
}
