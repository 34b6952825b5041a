//! Archive format detection.

use std::path::Path;

use crate::ExtractionError;
use crate::Result;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// ZIP archive.
    Zip,
}

impl ArchiveType {
    /// Short format name for display.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

/// Detects the archive type from a file path.
///
/// Matching is case-insensitive. A bare `.gz` is only accepted as `.tar.gz`.
///
/// # Errors
///
/// Returns `ExtractionError::UnsupportedFormat` if the format cannot be
/// determined.
pub fn detect_format(path: &Path) -> Result<ArchiveType> {
    let unsupported = || ExtractionError::UnsupportedFormat {
        path: path.to_path_buf(),
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(unsupported)?;

    match extension.to_ascii_lowercase().as_str() {
        "tar" => Ok(ArchiveType::Tar),
        "tgz" => Ok(ArchiveType::TarGz),
        "gz" => {
            let is_tar = path
                .file_stem()
                .is_some_and(|stem| stem.to_string_lossy().to_ascii_lowercase().ends_with(".tar"));
            if is_tar {
                Ok(ArchiveType::TarGz)
            } else {
                Err(unsupported())
            }
        }
        "zip" => Ok(ArchiveType::Zip),
        _ => Err(unsupported()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_tar() {
        let path = PathBuf::from("archive.tar");
        assert_eq!(detect_format(&path).unwrap(), ArchiveType::Tar);
    }

    #[test]
    fn test_detect_tar_gz() {
        assert_eq!(
            detect_format(Path::new("archive.tar.gz")).unwrap(),
            ArchiveType::TarGz
        );
        assert_eq!(
            detect_format(Path::new("archive.tgz")).unwrap(),
            ArchiveType::TarGz
        );
    }

    #[test]
    fn test_detect_zip_case_insensitive() {
        assert_eq!(detect_format(Path::new("a.zip")).unwrap(), ArchiveType::Zip);
        assert_eq!(detect_format(Path::new("A.ZIP")).unwrap(), ArchiveType::Zip);
        assert_eq!(
            detect_format(Path::new("Backup.TAR.GZ")).unwrap(),
            ArchiveType::TarGz
        );
    }

    #[test]
    fn test_detect_plain_gz_unsupported() {
        assert!(matches!(
            detect_format(Path::new("notes.txt.gz")),
            Err(ExtractionError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_detect_unsupported() {
        for name in ["archive.rar", "archive.7z", "archive"] {
            assert!(
                matches!(
                    detect_format(Path::new(name)),
                    Err(ExtractionError::UnsupportedFormat { .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ArchiveType::Zip.name(), "zip");
        assert_eq!(ArchiveType::TarGz.name(), "tar.gz");
    }
}
