//! High-level public API for listing and selective extraction.

use std::path::Path;

use crate::Archive;
use crate::ArchiveEntry;
use crate::ExtractConfig;
use crate::ProcessObserver;
use crate::ProcessReport;
use crate::Result;
use crate::SelectionModel;
use crate::extraction::ExtractionSession;
use crate::types::DestDir;

/// Opens an archive and returns its entries in enumeration order.
///
/// Only metadata is read.
///
/// # Errors
///
/// Returns `ExtractionError::ArchiveOpen` if the path does not exist, is not
/// a file, has an unsupported extension, or is not a valid archive.
///
/// # Examples
///
/// ```no_run
/// use unpick_core::open_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// for entry in open_archive("bundle.zip")? {
///     println!("{} ({} bytes)", entry.internal_path(), entry.size());
/// }
/// # Ok(())
/// # }
/// ```
pub fn open_archive<P: AsRef<Path>>(path: P) -> Result<Vec<ArchiveEntry>> {
    Archive::open(path).map(Archive::into_entries)
}

/// Validates a directory as destination root.
///
/// The directory must exist; it is returned in canonical form. Writability is
/// not checked up front.
///
/// # Errors
///
/// Returns an I/O error if the path does not exist or is not a directory.
pub fn choose_destination<P: AsRef<Path>>(path: P) -> Result<DestDir> {
    DestDir::new(path.as_ref())
}

/// Builds a selection over the file entries, dropping directories.
///
/// Every file starts unselected, unprocessed, and named after its base name.
#[must_use]
pub fn list_files(entries: &[ArchiveEntry]) -> SelectionModel {
    SelectionModel::from_entries(entries)
}

/// Stages `archive_path` under `destination_root` and copies every selected
/// entry.
///
/// This is a shortcut for building an [`ExtractionSession`] and calling
/// [`ExtractionSession::process`].
///
/// # Errors
///
/// Returns an error if the destination or configuration is invalid, or if
/// the run aborts before any copy. Per-entry failures are not errors; they
/// are reported to `observer` and collected in the returned report.
///
/// # Examples
///
/// ```no_run
/// use unpick_core::{ExtractConfig, NoopObserver, list_files, open_archive, process};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut selection = list_files(&open_archive("a.zip")?);
/// if let Some(index) = selection.find_by_path("docs/readme.txt") {
///     selection.set_will_copy(index, true);
///     selection.set_output_name(index, "README.txt");
/// }
///
/// let report = process(
///     &mut selection,
///     "a.zip",
///     "/out",
///     &ExtractConfig::default(),
///     &mut NoopObserver,
/// )?;
/// println!("Copied {} files", report.files_copied);
/// # Ok(())
/// # }
/// ```
pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
    selection: &mut SelectionModel,
    archive_path: P,
    destination_root: Q,
    config: &ExtractConfig,
    observer: &mut dyn ProcessObserver,
) -> Result<ProcessReport> {
    let session = ExtractionSession::new(
        archive_path.as_ref(),
        choose_destination(destination_root)?,
        config.clone(),
    )?;
    session.process(selection, observer)
}
