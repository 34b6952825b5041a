//! Opened archives.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::ArchiveEntry;
use crate::ExtractionError;
use crate::Result;
use crate::SelectionModel;
use crate::formats::ArchiveFormat;
use crate::formats::Stager;
use crate::formats::open_format;

/// An archive opened for listing and staging.
///
/// Opening reads metadata only. Entry bytes are read when the archive is
/// staged by a process run.
pub struct Archive {
    path: PathBuf,
    format: Box<dyn ArchiveFormat>,
}

impl Archive {
    /// Opens the archive at `path` and lists its entries.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::ArchiveOpen` if the path does not exist, is
    /// not a file, has an unsupported extension, or is not a valid archive of
    /// its detected format.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use unpick_core::Archive;
    ///
    /// let archive = Archive::open("bundle.zip")?;
    /// for entry in archive.entries() {
    ///     println!("{}", entry.internal_path());
    /// }
    /// # Ok::<(), unpick_core::ExtractionError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |reason: String| ExtractionError::ArchiveOpen {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_file() {
            let reason = if path.exists() {
                "not a regular file"
            } else {
                "file not found"
            };
            return Err(open_error(reason.to_string()));
        }

        let path = path
            .canonicalize()
            .map_err(|e| open_error(e.to_string()))?;
        let format = open_format(&path).map_err(|e| open_error(e.to_string()))?;
        debug!(
            path = %path.display(),
            format = format.format_name(),
            entries = format.entries().len(),
            "opened archive"
        );

        Ok(Self { path, format })
    }

    /// Returns the absolute path to the archive file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the detected format name.
    #[must_use]
    pub fn format_name(&self) -> &'static str {
        self.format.format_name()
    }

    /// Entries in archive enumeration order, directories included.
    #[must_use]
    pub fn entries(&self) -> &[ArchiveEntry] {
        self.format.entries()
    }

    /// Consumes the archive and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.format.entries().to_vec()
    }

    /// Builds a fresh selection over the file entries.
    #[must_use]
    pub fn list_files(&self) -> SelectionModel {
        SelectionModel::from_entries(self.entries())
    }

    pub(crate) fn stage(&mut self, stager: &mut Stager<'_>) -> Result<()> {
        self.format.stage(stager)
    }
}

impl fmt::Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive")
            .field("path", &self.path)
            .field("format", &self.format.format_name())
            .field("entries", &self.format.entries().len())
            .finish()
    }
}
