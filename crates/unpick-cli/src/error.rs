//! Error conversion utilities for CLI.
//!
//! Converts unpick-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use unpick_core::ExtractionError;

const QUOTA_HINT: &str = "HINT: Use --max-files or --max-total-size to raise the limits.";

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::ArchiveOpen { reason, .. } => {
            anyhow!(
                "Cannot open archive '{}': {reason}\n\
                 HINT: Supported formats: zip, tar, tar.gz (.tgz)",
                archive.display()
            )
        }
        ExtractionError::UnsupportedFormat { .. } => {
            anyhow!(
                "Archive format not supported: {}\n\
                 HINT: Supported formats: zip, tar, tar.gz (.tgz)",
                archive.display()
            )
        }
        ExtractionError::Staging { path, source } => match *source {
            // archive changed or vanished after it was listed
            open @ ExtractionError::ArchiveOpen { .. } => convert_extraction_error(open, archive),
            ExtractionError::QuotaExceeded { resource } => {
                anyhow!(
                    "Extraction limit exceeded for '{}': {resource}\n{QUOTA_HINT}",
                    archive.display()
                )
            }
            source => {
                anyhow!(
                    "Failed to unpack '{}' into '{}': {source}\n\
                     HINT: Check that the destination is writable and has enough free space.",
                    archive.display(),
                    path.display()
                )
            }
        },
        ExtractionError::QuotaExceeded { resource } => {
            anyhow!(
                "Extraction limit exceeded for '{}': {resource}\n{QUOTA_HINT}",
                archive.display()
            )
        }
        ExtractionError::InvalidConfig { reason } => {
            anyhow!(
                "Invalid settings: {reason}\n\
                 HINT: --staging-dir must be a plain directory name such as '.temp'."
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;
    use unpick_core::QuotaResource;

    #[test]
    fn test_convert_archive_open_error() {
        let err = ExtractionError::ArchiveOpen {
            path: PathBuf::from("missing.zip"),
            reason: "file not found".into(),
        };
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("missing.zip")));
        assert!(msg.contains("Cannot open archive"));
        assert!(msg.contains("file not found"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_staging_quota_error() {
        let err = ExtractionError::staging(
            "/out/.temp",
            ExtractionError::QuotaExceeded {
                resource: QuotaResource::FileCount { current: 3, max: 2 },
            },
        );
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("big.zip")));
        assert!(msg.contains("limit exceeded"));
        assert!(msg.contains("--max-files"));
    }

    #[test]
    fn test_convert_staging_archive_open_error() {
        let err = ExtractionError::staging(
            "/out/.temp",
            ExtractionError::ArchiveOpen {
                path: PathBuf::from("gone.zip"),
                reason: "file not found".into(),
            },
        );
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("gone.zip")));
        assert!(msg.contains("Cannot open archive"));
        assert!(msg.contains("file not found"));
        assert!(!msg.contains("Failed to unpack"));
    }

    #[test]
    fn test_convert_staging_io_error() {
        let err = ExtractionError::staging(
            "/out/.temp",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("a.tar")));
        assert!(msg.contains("Failed to unpack"));
        assert!(msg.contains("/out/.temp"));
        assert!(msg.contains("writable"));
    }

    #[test]
    fn test_convert_invalid_config_error() {
        let err = ExtractionError::InvalidConfig {
            reason: "bad name".into(),
        };
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("a.zip")));
        assert!(msg.contains("--staging-dir"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ExtractionError::Io(io_err);
        let converted = convert_extraction_error(err, Path::new("archive.tar.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }
}
