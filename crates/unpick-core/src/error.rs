//! Error types for archive inspection and selective extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Represents a specific staging quota that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaResource {
    /// Too many entries in the archive.
    FileCount {
        /// Current entry count.
        current: usize,
        /// Maximum allowed entry count.
        max: usize,
    },
    /// Staged bytes would exceed the limit.
    TotalSize {
        /// Current total size in bytes.
        current: u64,
        /// Maximum allowed total size in bytes.
        max: u64,
    },
    /// Integer overflow detected in size tracking.
    IntegerOverflow,
}

impl std::fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileCount { current, max } => {
                write!(f, "quota exceeded: file count ({current} > {max})")
            }
            Self::TotalSize { current, max } => {
                write!(f, "quota exceeded: total size ({current} > {max})")
            }
            Self::IntegerOverflow => {
                write!(f, "quota exceeded: integer overflow in size tracking")
            }
        }
    }
}

/// Errors that can occur while opening, staging, or copying archive entries.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is missing, unreadable, or corrupt.
    #[error("cannot open archive {path}: {reason}")]
    ArchiveOpen {
        /// Path of the archive.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Archive format is not recognized from its extension.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// Path of the archive.
        path: PathBuf,
    },

    /// Bulk extraction into the staging directory failed.
    #[error("staging into {path} failed: {source}")]
    Staging {
        /// Staging directory.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: Box<ExtractionError>,
    },

    /// A single selected entry could not be copied to its destination.
    #[error("failed to copy {internal_path}: {source}")]
    EntryCopy {
        /// Internal archive path of the entry.
        internal_path: String,
        /// Underlying cause.
        #[source]
        source: Box<ExtractionError>,
    },

    /// The staging directory could not be removed.
    #[error("failed to remove staging directory {path}: {source}")]
    Cleanup {
        /// Staging directory.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// Entry path would escape the destination root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending internal path.
        path: PathBuf,
    },

    /// Output name is not a single plain file name.
    #[error("invalid output name: {name:?}")]
    InvalidOutputName {
        /// The rejected name.
        name: String,
    },

    /// Output path would land on or inside the staging directory.
    #[error("output path collides with staging directory: {path}")]
    StagingCollision {
        /// The resolved output path.
        path: PathBuf,
    },

    /// Staging quota exceeded.
    #[error("{resource}")]
    QuotaExceeded {
        /// Description of the exceeded resource.
        resource: QuotaResource,
    },

    /// Session settings are incomplete or inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
}

impl ExtractionError {
    /// Wraps an error as a staging failure for `path`.
    pub fn staging(path: impl Into<PathBuf>, source: impl Into<Self>) -> Self {
        Self::Staging {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }

    /// Wraps an error as a copy failure of one entry.
    pub fn entry_copy(internal_path: impl Into<String>, source: impl Into<Self>) -> Self {
        Self::EntryCopy {
            internal_path: internal_path.into(),
            source: Box::new(source.into()),
        }
    }

    /// Returns `true` if this error aborts a whole process run.
    ///
    /// # Examples
    ///
    /// ```
    /// use unpick_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::ArchiveOpen {
    ///     path: PathBuf::from("a.zip"),
    ///     reason: "not found".into(),
    /// };
    /// assert!(err.is_fatal());
    ///
    /// let err = ExtractionError::InvalidOutputName { name: "../x".into() };
    /// assert!(!err.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ArchiveOpen { .. } | Self::UnsupportedFormat { .. } | Self::Staging { .. }
        )
    }

    /// Returns `true` if this error concerns one entry only.
    ///
    /// Entry errors never abort sibling copies.
    #[must_use]
    pub const fn is_entry_error(&self) -> bool {
        matches!(
            self,
            Self::EntryCopy { .. }
                | Self::PathTraversal { .. }
                | Self::InvalidOutputName { .. }
                | Self::StagingCollision { .. }
        )
    }

    /// Returns the I/O error kind at the root of this error, if any.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io(e) | Self::Cleanup { source: e, .. } => Some(e.kind()),
            Self::Staging { source, .. } | Self::EntryCopy { source, .. } => source.io_kind(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractionError::UnsupportedFormat {
            path: PathBuf::from("a.rar"),
        };
        assert_eq!(err.to_string(), "unsupported archive format: a.rar");
    }

    #[test]
    fn test_path_traversal_error() {
        let err = ExtractionError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
        assert!(err.is_entry_error());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExtractionError = io_err.into();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn test_staging_wraps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ExtractionError::staging("/out/.temp", io_err);
        assert!(err.is_fatal());
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::PermissionDenied));
        assert!(err.to_string().contains("/out/.temp"));
    }

    #[test]
    fn test_entry_copy_wraps_source() {
        let err = ExtractionError::entry_copy(
            "docs/readme.txt",
            ExtractionError::InvalidOutputName { name: "a/b".into() },
        );
        assert!(err.is_entry_error());
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("docs/readme.txt"));
        assert_eq!(err.io_kind(), None);
    }

    #[test]
    fn test_cleanup_is_neither_fatal_nor_entry() {
        let err = ExtractionError::Cleanup {
            path: PathBuf::from("/out/.temp"),
            source: std::io::Error::other("busy"),
        };
        assert!(!err.is_fatal());
        assert!(!err.is_entry_error());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = ExtractionError::staging(
            "/out/.temp",
            std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
        );
        let source = err.source().expect("staging error has a source");
        assert!(source.to_string().contains("disk full"));
    }

    #[test]
    fn test_quota_exceeded_error() {
        let err = ExtractionError::QuotaExceeded {
            resource: QuotaResource::FileCount {
                current: 11,
                max: 10,
            },
        };
        let display = err.to_string();
        assert!(display.contains("quota exceeded"));
        assert!(display.contains("file count"));
        assert!(display.contains("11"));
    }
}
