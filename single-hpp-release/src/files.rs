use std::fs;
use std::path::Path;

use crate::error::Result;

/// Replace every occurrence of `old_text` with `new_text` in the file at
/// `path`, returning how many occurrences were replaced.
///
/// The file is rewritten even when nothing matched, so its on-disk
/// content is always the result of the replacement.
pub fn replace_text_in_file(path: &Path, old_text: &str, new_text: &str) -> Result<usize> {
    let text = fs::read_to_string(path)?;
    let count = text.matches(old_text).count();
    fs::write(path, text.replace(old_text, new_text))?;

    if count == 0 {
        tracing::warn!(
            "'{}' not found in {}; nothing replaced",
            old_text,
            path.display()
        );
    } else {
        tracing::info!(
            "Replaced {} occurrence(s) of '{}' with '{}' in {}",
            count,
            old_text,
            new_text,
            path.display()
        );
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_replaces_old_with_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ApprovalTests.hpp");
        fs::write(&path, "#include \"ApprovalTests.v.7.0.0.hpp\"\n").unwrap();

        let count = replace_text_in_file(&path, "v.7.0.0", "v.8.0.0").unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#include \"ApprovalTests.v.8.0.0.hpp\"\n"
        );
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.source.md");
        fs::write(&path, "v.7.0.0 and again v.7.0.0").unwrap();

        assert_eq!(replace_text_in_file(&path, "v.7.0.0", "v.8.0.0").unwrap(), 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "v.8.0.0 and again v.8.0.0"
        );
    }

    #[test]
    fn test_no_match_leaves_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("project.vcxproj");
        fs::write(&path, "<ClInclude Include=\"other.hpp\" />").unwrap();

        assert_eq!(replace_text_in_file(&path, "v.7.0.0", "v.8.0.0").unwrap(), 0);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<ClInclude Include=\"other.hpp\" />"
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(replace_text_in_file(&dir.path().join("absent"), "a", "b").is_err());
    }
}
