//! Archive entry metadata.

/// One record inside an archive, as enumerated by the archive reader.
///
/// Entries are immutable once read. The internal path is kept exactly as the
/// archive stores it (slash-delimited); it is only validated when it is
/// turned into a filesystem path.
///
/// # Examples
///
/// ```
/// use unpick_core::ArchiveEntry;
///
/// let entry = ArchiveEntry::file("docs/readme.txt", 12);
/// assert_eq!(entry.base_name(), "readme.txt");
/// assert!(!entry.is_directory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveEntry {
    internal_path: String,
    is_directory: bool,
    size: u64,
}

impl ArchiveEntry {
    /// Creates a regular file entry.
    #[must_use]
    pub fn file(internal_path: impl Into<String>, size: u64) -> Self {
        Self {
            internal_path: internal_path.into(),
            is_directory: false,
            size,
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(internal_path: impl Into<String>) -> Self {
        Self {
            internal_path: internal_path.into(),
            is_directory: true,
            size: 0,
        }
    }

    /// Returns the path as stored in the archive.
    #[inline]
    #[must_use]
    pub fn internal_path(&self) -> &str {
        &self.internal_path
    }

    /// Returns `true` if the archive flags this entry as a directory.
    #[inline]
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Uncompressed size recorded by the archive.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last non-empty segment of the internal path.
    ///
    /// Directory entries usually carry a trailing slash (`docs/`); it is
    /// ignored here so the result is `docs`.
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.internal_path
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or("")
    }
}
