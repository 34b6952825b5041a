//! Validated destination root.

use crate::ExtractionError;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// Root directory that selected entries are copied below.
///
/// Always an existing directory, held in canonical absolute form so that
/// prefix checks against the staging directory compare like with like.
/// Writability is not checked: an unwritable root surfaces as a staging
/// failure carrying the filesystem's own error.
///
/// # Examples
///
/// ```no_run
/// use unpick_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp/out")?;
/// assert!(dest.staging_dir(".temp").ends_with(".temp"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Checks that `path` is an existing directory and canonicalizes it.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` with kind `NotFound` for a missing path,
    /// `InvalidInput` for a path that is not a directory, or the kind of the
    /// failed metadata or canonicalize call.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(|e| {
            let message = if e.kind() == io::ErrorKind::NotFound {
                format!("destination directory does not exist: {}", path.display())
            } else {
                format!("cannot inspect destination {}: {e}", path.display())
            };
            ExtractionError::Io(io::Error::new(e.kind(), message))
        })?;

        if !metadata.is_dir() {
            return Err(ExtractionError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("destination is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize()?;
        Ok(Self(canonical))
    }

    /// Returns the root as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Staging directory named `name` directly below the root.
    #[must_use]
    pub fn staging_dir(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl AsRef<Path> for DestDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
