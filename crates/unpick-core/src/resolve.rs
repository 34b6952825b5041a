//! Destination path resolution.
//!
//! An entry's output directory is its internal path minus the last segment,
//! joined onto the destination root. Root-level entries land in the root
//! itself. Every internal path goes through [`SafePath::validate`] first, so
//! a resolved directory can never sit outside the destination root.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;
use crate::types::SafePath;

/// Output directory of an entry and whether it was already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// Absolute output directory.
    pub directory: PathBuf,
    /// `true` if the directory existed at resolution time.
    pub exists: bool,
}

/// Computes the directory an entry is copied into.
///
/// Pure function: nothing is read from or written to the filesystem.
///
/// # Errors
///
/// Returns `ExtractionError::PathTraversal` if `internal_path` contains a
/// `..` segment, a leading root, a drive prefix, or a null byte.
///
/// # Examples
///
/// ```
/// use unpick_core::resolve_output_directory;
/// use std::path::Path;
///
/// let dir = resolve_output_directory("docs/readme.txt", Path::new("/out"))?;
/// assert_eq!(dir, Path::new("/out/docs"));
///
/// let dir = resolve_output_directory("readme.txt", Path::new("/out"))?;
/// assert_eq!(dir, Path::new("/out"));
///
/// assert!(resolve_output_directory("../readme.txt", Path::new("/out")).is_err());
/// # Ok::<(), unpick_core::ExtractionError>(())
/// ```
pub fn resolve_output_directory(internal_path: &str, destination_root: &Path) -> Result<PathBuf> {
    let safe = SafePath::validate(internal_path)?;
    let directory = safe.directory();
    if directory.as_os_str().is_empty() {
        Ok(destination_root.to_path_buf())
    } else {
        Ok(destination_root.join(directory))
    }
}

/// Resolves the output directory and checks whether it already exists.
///
/// # Errors
///
/// Same as [`resolve_output_directory`].
pub fn resolve_output(internal_path: &str, destination_root: &Path) -> Result<ResolvedOutput> {
    let directory = resolve_output_directory(internal_path, destination_root)?;
    let exists = directory.is_dir();
    Ok(ResolvedOutput { directory, exists })
}

/// Checks that a (possibly renamed) output name is a single plain file name.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidOutputName` for empty names, `.`, `..`,
/// names with a path separator, and names with a null byte.
pub fn validate_output_name(name: &str) -> Result<&str> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(ExtractionError::InvalidOutputName {
            name: name.to_string(),
        });
    }
    Ok(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_nested() {
        let dir = resolve_output_directory("a/b/c/file.txt", Path::new("/out")).unwrap();
        assert_eq!(dir, Path::new("/out/a/b/c"));
    }

    #[test]
    fn test_resolve_root_level() {
        let dir = resolve_output_directory("file.txt", Path::new("/out")).unwrap();
        assert_eq!(dir, Path::new("/out"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        for path in ["../x", "a/../../x", "a/.."] {
            assert!(matches!(
                resolve_output_directory(path, Path::new("/out")),
                Err(ExtractionError::PathTraversal { .. })
            ));
        }
    }

    #[test]
    fn test_resolve_rejects_absolute() {
        assert!(resolve_output_directory("/etc/passwd", Path::new("/out")).is_err());
    }

    #[test]
    fn test_resolve_output_reports_existence() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();

        let present = resolve_output("docs/readme.txt", temp.path()).unwrap();
        assert!(present.exists);
        assert_eq!(present.directory, temp.path().join("docs"));

        let absent = resolve_output("img/logo.png", temp.path()).unwrap();
        assert!(!absent.exists);
        assert!(!temp.path().join("img").exists(), "resolution must not create");
    }

    #[test]
    fn test_validate_output_name() {
        assert_eq!(validate_output_name("README.txt").unwrap(), "README.txt");
        assert!(validate_output_name(".hidden").is_ok());
        for bad in ["", ".", "..", "a/b", "a\\b", "nul\0"] {
            assert!(
                matches!(
                    validate_output_name(bad),
                    Err(ExtractionError::InvalidOutputName { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}
