//! Tar archive format handler.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::ArchiveEntry;
use crate::Result;

use super::common::Stager;
use super::traits::ArchiveFormat;

/// Compression wrapped around a tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TarCompression {
    /// Plain tar.
    None,
    /// Gzip-compressed tar.
    Gzip,
}

/// Tar archive handler.
///
/// Tar has no central directory, so the file is read twice: once on
/// construction to list entries and once more when staging.
#[derive(Debug)]
pub struct TarArchive {
    path: PathBuf,
    compression: TarCompression,
    entries: Vec<ArchiveEntry>,
}

enum TarEntryKind {
    File,
    Directory,
    Special(&'static str),
}

impl TarArchive {
    /// Opens the tar archive at `path` and lists its entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid tar
    /// stream.
    pub fn open(path: &Path, compression: TarCompression) -> Result<Self> {
        let mut archive = tar::Archive::new(open_stream(path, compression)?);
        let mut entries = Vec::new();

        for entry in archive.entries()? {
            let entry = entry?;
            let internal_path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            match classify(entry.header().entry_type()) {
                TarEntryKind::File => entries.push(ArchiveEntry::file(internal_path, entry.size())),
                TarEntryKind::Directory => entries.push(ArchiveEntry::directory(internal_path)),
                TarEntryKind::Special(kind) => {
                    debug!(path = %internal_path, kind, "not listing special entry");
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            compression,
            entries,
        })
    }
}

impl ArchiveFormat for TarArchive {
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    fn stage(&mut self, stager: &mut Stager<'_>) -> Result<()> {
        let mut archive = tar::Archive::new(open_stream(&self.path, self.compression)?);

        for entry in archive.entries()? {
            let mut entry = entry?;
            stager.count_entry()?;

            let internal_path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            match classify(entry.header().entry_type()) {
                TarEntryKind::File => {
                    let size = entry.size();
                    stager.stage_file(&internal_path, size, &mut entry)?;
                }
                TarEntryKind::Directory => stager.stage_directory(&internal_path)?,
                TarEntryKind::Special(kind) => stager.skip_special(&internal_path, kind),
            }
        }
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        match self.compression {
            TarCompression::None => "tar",
            TarCompression::Gzip => "tar.gz",
        }
    }
}

fn open_stream(path: &Path, compression: TarCompression) -> Result<Box<dyn Read>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(match compression {
        TarCompression::None => Box::new(reader),
        TarCompression::Gzip => Box::new(GzDecoder::new(reader)),
    })
}

fn classify(entry_type: tar::EntryType) -> TarEntryKind {
    match entry_type {
        tar::EntryType::Regular | tar::EntryType::Continuous => TarEntryKind::File,
        tar::EntryType::Directory => TarEntryKind::Directory,
        tar::EntryType::Symlink => TarEntryKind::Special("symlink"),
        tar::EntryType::Link => TarEntryKind::Special("hardlink"),
        tar::EntryType::Char | tar::EntryType::Block => TarEntryKind::Special("device"),
        tar::EntryType::Fifo => TarEntryKind::Special("fifo"),
        _ => TarEntryKind::Special("other"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ExtractConfig;
    use crate::ExtractionError;
    use crate::copy::CopyBuffer;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::create_test_tar_gz;
    use crate::test_utils::write_archive;
    use tempfile::TempDir;

    #[test]
    fn test_tar_lists_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("dir/")
            .add_file("dir/file.txt", b"content")
            .add_symlink("link", "dir/file.txt")
            .build();
        let path = write_archive(temp.path(), "a.tar", &data);

        let archive = TarArchive::open(&path, TarCompression::None).unwrap();
        let entries = archive.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_directory());
        assert_eq!(entries[1].internal_path(), "dir/file.txt");
        assert_eq!(entries[1].size(), 7);
        assert_eq!(archive.format_name(), "tar");
    }

    #[test]
    fn test_tar_gz_stage() {
        let temp = TempDir::new().unwrap();
        let data = create_test_tar_gz(&[("a/b.txt", b"bee"), ("c.txt", b"sea")]);
        let path = write_archive(temp.path(), "a.tar.gz", &data);
        let stage = temp.path().join("stage");
        std::fs::create_dir(&stage).unwrap();

        let mut archive = TarArchive::open(&path, TarCompression::Gzip).unwrap();
        let config = ExtractConfig::default();
        let mut buffer = CopyBuffer::new();
        let mut stager = Stager::new(&stage, &config, &mut buffer);
        archive.stage(&mut stager).unwrap();
        let report = stager.finish();

        assert_eq!(report.files_staged, 2);
        assert_eq!(std::fs::read(stage.join("a/b.txt")).unwrap(), b"bee");
        assert_eq!(std::fs::read(stage.join("c.txt")).unwrap(), b"sea");
        assert_eq!(archive.format_name(), "tar.gz");
    }

    #[test]
    fn test_tar_symlink_skipped_when_staging() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("target.txt", b"x")
            .add_symlink("link", "/etc/passwd")
            .build();
        let path = write_archive(temp.path(), "a.tar", &data);
        let stage = temp.path().join("stage");
        std::fs::create_dir(&stage).unwrap();

        let mut archive = TarArchive::open(&path, TarCompression::None).unwrap();
        let config = ExtractConfig::default();
        let mut buffer = CopyBuffer::new();
        let mut stager = Stager::new(&stage, &config, &mut buffer);
        archive.stage(&mut stager).unwrap();
        let report = stager.finish();

        assert_eq!(report.entries_skipped, 1);
        assert!(!stage.join("link").exists());
    }

    #[test]
    fn test_dot_rooted_tar_stages_without_warnings() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("./")
            .add_directory("./docs/")
            .add_file("./docs/readme.txt", b"hello")
            .build();
        let path = write_archive(temp.path(), "a.tar", &data);
        let stage = temp.path().join("stage");
        std::fs::create_dir(&stage).unwrap();

        let mut archive = TarArchive::open(&path, TarCompression::None).unwrap();
        assert_eq!(archive.entries()[0].internal_path(), "./");
        let config = ExtractConfig::default();
        let mut buffer = CopyBuffer::new();
        let mut stager = Stager::new(&stage, &config, &mut buffer);
        archive.stage(&mut stager).unwrap();
        let report = stager.finish();

        assert_eq!(report.files_staged, 1);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.entries_skipped, 0);
        assert!(report.warnings.is_empty());
        assert_eq!(std::fs::read(stage.join("docs/readme.txt")).unwrap(), b"hello");
    }

    #[test]
    fn test_tar_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = TarArchive::open(&temp.path().join("missing.tar"), TarCompression::None);
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn test_gzip_garbage_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_archive(temp.path(), "bad.tar.gz", b"definitely not gzip");
        assert!(TarArchive::open(&path, TarCompression::Gzip).is_err());
    }
}
