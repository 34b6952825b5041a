//! ZIP archive format handler.

use std::io::Read;
use std::io::Seek;

use tracing::debug;

use crate::ArchiveEntry;
use crate::ExtractionError;
use crate::Result;

use super::common::Stager;
use super::traits::ArchiveFormat;

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

/// ZIP archive handler.
///
/// The central directory is read once on construction; staging decompresses
/// each entry by index.
pub struct ZipArchive<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    entries: Vec<ArchiveEntry>,
}

impl<R: Read + Seek> ZipArchive<R> {
    /// Reads the central directory of `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a readable ZIP archive.
    pub fn new(source: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(source)?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let file = archive.by_index_raw(index)?;
            if is_symlink(file.unix_mode()) {
                debug!(path = file.name(), "not listing symlink entry");
                continue;
            }
            let entry = if file.is_dir() {
                ArchiveEntry::directory(file.name())
            } else {
                ArchiveEntry::file(file.name(), file.size())
            };
            entries.push(entry);
        }

        Ok(Self { archive, entries })
    }
}

impl<R: Read + Seek> ArchiveFormat for ZipArchive<R> {
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    fn stage(&mut self, stager: &mut Stager<'_>) -> Result<()> {
        for index in 0..self.archive.len() {
            stager.count_entry()?;

            let mut file = self.archive.by_index(index)?;
            let name = file.name().to_string();

            if file.is_dir() {
                stager.stage_directory(&name)?;
            } else if is_symlink(file.unix_mode()) {
                stager.skip_special(&name, "symlink");
            } else {
                let size = file.size();
                stager.stage_file(&name, size, &mut file)?;
            }
        }
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "zip"
    }
}

fn is_symlink(mode: Option<u32>) -> bool {
    mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK)
}

impl From<zip::result::ZipError> for ExtractionError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Io(e),
            other => Self::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                other.to_string(),
            )),
        }
    }
}
