//! Helpers for building archives in tests.
//!
//! A fixture records entries first and renders them as zip or tar on
//! `build`, so one test can describe the same tree for either format. All
//! archives are built in memory; [`write_archive`] puts one on disk when a
//! test needs a real path to open.
//!
//! # Panics
//!
//! All functions in this module panic on I/O errors. They are meant for tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;
use std::path::PathBuf;

enum FixtureEntry {
    File { path: String, data: Vec<u8> },
    Directory { path: String },
    Symlink { path: String, target: String },
}

/// Marker for fixtures rendered as zip.
#[derive(Debug)]
pub enum ZipFixture {}

/// Marker for fixtures rendered as uncompressed tar.
#[derive(Debug)]
pub enum TarFixture {}

/// Records archive entries in order, then renders them in format `F`.
///
/// Entry names are kept verbatim, so fixtures can hold hostile names such
/// as `../escape.txt` or root entries such as `./`.
///
/// # Examples
///
/// ```
/// use unpick_core::test_utils::TarTestBuilder;
/// use unpick_core::test_utils::ZipTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_symlink("link", "dir/file.txt")
///     .build();
/// let zip_data = ZipTestBuilder::new().add_file("../escape.txt", b"x").build();
/// assert!(!tar_data.is_empty() && zip_data.starts_with(b"PK"));
/// ```
pub struct FixtureBuilder<F> {
    entries: Vec<FixtureEntry>,
    format: PhantomData<F>,
}

/// Fixture builder producing zip bytes.
pub type ZipTestBuilder = FixtureBuilder<ZipFixture>;

/// Fixture builder producing tar bytes.
pub type TarTestBuilder = FixtureBuilder<TarFixture>;

impl<F> FixtureBuilder<F> {
    /// Creates an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            format: PhantomData,
        }
    }

    /// Adds a regular file.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        self.entries.push(FixtureEntry::File {
            path: path.to_string(),
            data: data.to_vec(),
        });
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        self.entries.push(FixtureEntry::Directory {
            path: path.to_string(),
        });
        self
    }

    /// Adds a symbolic link pointing at `target`.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        self.entries.push(FixtureEntry::Symlink {
            path: path.to_string(),
            target: target.to_string(),
        });
        self
    }
}

impl<F> Default for FixtureBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBuilder<ZipFixture> {
    /// Renders the entries as a zip archive with stored (uncompressed) files.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        use zip::write::SimpleFileOptions;

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        for entry in self.entries {
            match entry {
                FixtureEntry::File { path, data } => {
                    zip.start_file(path, stored.unix_permissions(0o644)).unwrap();
                    zip.write_all(&data).unwrap();
                }
                FixtureEntry::Directory { path } => {
                    zip.add_directory(path, stored.unix_permissions(0o755))
                        .unwrap();
                }
                FixtureEntry::Symlink { path, target } => {
                    zip.add_symlink(path, target, stored).unwrap();
                }
            }
        }

        zip.finish().unwrap().into_inner()
    }
}

impl FixtureBuilder<TarFixture> {
    /// Renders the entries as an uncompressed GNU tar archive.
    ///
    /// Names up to 100 bytes are written as given, so `./`-rooted trees
    /// come out the way `tar -C dir .` writes them.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut tar = tar::Builder::new(Vec::new());

        for entry in self.entries {
            let mut header = tar::Header::new_gnu();
            match entry {
                FixtureEntry::File { path, data } => {
                    header.set_size(data.len() as u64);
                    header.set_mode(0o644);
                    append_verbatim(&mut tar, header, &path, data.as_slice());
                }
                FixtureEntry::Directory { path } => {
                    header.set_entry_type(tar::EntryType::Directory);
                    header.set_size(0);
                    header.set_mode(0o755);
                    append_verbatim(&mut tar, header, &path, std::io::empty());
                }
                FixtureEntry::Symlink { path, target } => {
                    header.set_entry_type(tar::EntryType::Symlink);
                    header.set_size(0);
                    header.set_mode(0o777);
                    header.set_link_name(target).unwrap();
                    append_verbatim(&mut tar, header, &path, std::io::empty());
                }
            }
        }

        tar.into_inner().unwrap()
    }
}

fn append_verbatim<R: Read>(
    tar: &mut tar::Builder<Vec<u8>>,
    mut header: tar::Header,
    path: &str,
    data: R,
) {
    let name = &mut header.as_old_mut().name;
    if path.len() <= name.len() {
        name[..path.len()].copy_from_slice(path.as_bytes());
        header.set_cksum();
        tar.append(&header, data).unwrap();
    } else {
        // long names need the GNU extension the builder writes
        tar.append_data(&mut header, path, data).unwrap();
    }
}

/// Creates an in-memory ZIP archive holding the given files, stored uncompressed.
///
/// # Examples
///
/// ```
/// use unpick_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("docs/readme.txt", b"hello"), ("logo.png", b"png")]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
    files
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Creates an in-memory TAR archive holding the given files.
#[must_use]
pub fn create_test_tar(files: &[(&str, &[u8])]) -> Vec<u8> {
    files
        .iter()
        .fold(TarTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Creates an in-memory gzip-compressed TAR archive holding the given files.
#[must_use]
pub fn create_test_tar_gz(files: &[(&str, &[u8])]) -> Vec<u8> {
    gzip(&create_test_tar(files))
}

/// Gzip-compresses `data`, turning a tar fixture into a `.tar.gz`.
#[must_use]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Writes archive bytes to `dir/name` and returns the full path.
pub fn write_archive(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
