//! Validated relative path for archive entries.

use crate::ExtractionError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// A relative path derived from an archive's internal path that cannot leave
/// the directory it is joined onto.
///
/// `SafePath` represents a path that has been validated to not contain:
/// - Parent directory segments (`..`)
/// - Null bytes
/// - A leading root or a drive prefix
///
/// Empty segments and `.` segments are dropped during normalization, so
/// `docs//./readme.txt` becomes `docs/readme.txt`.
///
/// # Security Properties
///
/// - Can ONLY be constructed through validation
/// - NO `From<PathBuf>` implementation
/// - Joined onto any directory, the result stays inside that directory
///
/// # Examples
///
/// ```
/// use unpick_core::types::SafePath;
///
/// let safe = SafePath::validate("docs/readme.txt")?;
/// assert_eq!(safe.as_path(), std::path::Path::new("docs/readme.txt"));
///
/// assert!(SafePath::validate("../etc/passwd").is_err());
/// # Ok::<(), unpick_core::ExtractionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates and constructs a `SafePath` from an internal archive path.
    ///
    /// Both `/` and `\` are treated as separators, since archives written on
    /// Windows sometimes store backslashes.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::PathTraversal` if the path contains `..`, a
    /// null byte, a leading root, a drive prefix, or no normal segment at all.
    pub fn validate(internal_path: &str) -> Result<Self> {
        let reject = || ExtractionError::PathTraversal {
            path: PathBuf::from(internal_path),
        };

        if internal_path.contains('\0') || internal_path.starts_with(['/', '\\']) {
            return Err(reject());
        }

        let mut normalized = PathBuf::new();
        for (position, segment) in internal_path.split(['/', '\\']).enumerate() {
            match segment {
                "" | "." => {}
                ".." => return Err(reject()),
                // C: or C:foo would turn into a drive-relative path on Windows
                s if position == 0 && has_drive_prefix(s) => return Err(reject()),
                s => normalized.push(s),
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(reject());
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns the directory part, empty for root-level entries.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.0.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn has_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
