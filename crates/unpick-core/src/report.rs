//! Process reporting and observer callbacks.

use std::io::ErrorKind;
use std::time::Duration;

use crate::ExtractionError;
use crate::selection::SelectableFile;
use crate::selection::SelectionModel;

/// Statistics of the bulk extraction into the staging directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    /// Number of files written to the staging directory.
    pub files_staged: usize,

    /// Number of directory entries recreated.
    pub directories_created: usize,

    /// Total bytes written to the staging directory.
    pub bytes_staged: u64,

    /// Number of entries left out (unsafe paths, links, special files).
    pub entries_skipped: usize,

    /// Warnings generated while staging.
    pub warnings: Vec<String>,
}

impl StagingReport {
    /// Creates a new empty staging report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry that was not staged.
    pub fn skip(&mut self, message: String) {
        self.entries_skipped += 1;
        self.warnings.push(message);
    }
}

/// One selected entry that could not be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// Index of the entry in the selection.
    pub index: usize,
    /// Internal archive path of the entry.
    pub internal_path: String,
    /// Rendered error message.
    pub message: String,
    /// I/O error kind at the root of the failure, if it was an I/O error.
    pub kind: Option<ErrorKind>,
}

impl EntryFailure {
    /// Builds a failure record from an entry error.
    #[must_use]
    pub fn new(index: usize, file: &SelectableFile, error: &ExtractionError) -> Self {
        Self {
            index,
            internal_path: file.internal_path().to_string(),
            message: error.to_string(),
            kind: error.io_kind(),
        }
    }
}

/// Report of one process run.
#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
    /// Number of selected entries copied successfully.
    pub files_copied: usize,

    /// Output directories that did not exist before the run.
    pub directories_created: usize,

    /// Total bytes written to the destination (excluding staging).
    pub bytes_written: u64,

    /// Duration of the whole run, staging and cleanup included.
    pub duration: Duration,

    /// Staging statistics.
    pub staging: StagingReport,

    /// Entries that failed to copy, in selection order.
    pub failures: Vec<EntryFailure>,

    /// Warnings generated during the run.
    pub warnings: Vec<String>,
}

impl ProcessReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of selected entries that failed.
    #[must_use]
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` if every selected entry was copied.
    #[must_use]
    pub fn all_copied(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Callback trait for events of a process run.
///
/// Events arrive in a fixed order: `on_staged` once, then one
/// `on_entry_copied` or `on_entry_failed` per selected entry in selection
/// order, then `on_cleanup_failed` if the staging directory could not be
/// removed, then `on_finished` exactly once. A run that fails to stage
/// returns an error instead and never calls `on_finished`.
///
/// The trait requires `Send` so an observer can move into a worker thread.
///
/// # Examples
///
/// ```
/// use unpick_core::{ExtractionError, ProcessObserver, ProcessReport, SelectableFile,
///     SelectionModel, StagingReport};
///
/// struct Printer;
///
/// impl ProcessObserver for Printer {
///     fn on_staged(&mut self, report: &StagingReport) {
///         println!("staged {} files", report.files_staged);
///     }
///
///     fn on_entry_copied(&mut self, _index: usize, file: &SelectableFile, _bytes: u64) {
///         println!("copied {}", file.internal_path());
///     }
///
///     fn on_entry_failed(&mut self, _index: usize, _file: &SelectableFile, error: &ExtractionError) {
///         eprintln!("{error}");
///     }
///
///     fn on_cleanup_failed(&mut self, error: &ExtractionError) {
///         eprintln!("{error}");
///     }
///
///     fn on_finished(&mut self, selection: &SelectionModel, _report: &ProcessReport) {
///         println!("{} processed", selection.processed_count());
///     }
/// }
/// ```
pub trait ProcessObserver: Send {
    /// Called once the whole archive sits in the staging directory.
    fn on_staged(&mut self, report: &StagingReport);

    /// Called after a selected entry was copied and marked processed.
    fn on_entry_copied(&mut self, index: usize, file: &SelectableFile, bytes: u64);

    /// Called when a selected entry could not be copied.
    fn on_entry_failed(&mut self, index: usize, file: &SelectableFile, error: &ExtractionError);

    /// Called when the staging directory could not be removed.
    fn on_cleanup_failed(&mut self, error: &ExtractionError);

    /// Called last, with the updated selection.
    fn on_finished(&mut self, selection: &SelectionModel, report: &ProcessReport);
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ProcessObserver for NoopObserver {
    fn on_staged(&mut self, _report: &StagingReport) {}

    fn on_entry_copied(&mut self, _index: usize, _file: &SelectableFile, _bytes: u64) {}

    fn on_entry_failed(&mut self, _index: usize, _file: &SelectableFile, _error: &ExtractionError) {
    }

    fn on_cleanup_failed(&mut self, _error: &ExtractionError) {}

    fn on_finished(&mut self, _selection: &SelectionModel, _report: &ProcessReport) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArchiveEntry;

    #[test]
    fn test_new_report() {
        let report = ProcessReport::new();
        assert_eq!(report.files_copied, 0);
        assert_eq!(report.files_failed(), 0);
        assert!(report.all_copied());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_add_warning() {
        let mut report = ProcessReport::new();
        report.add_warning("cleanup failed".to_string());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_staging_skip() {
        let mut staging = StagingReport::new();
        staging.skip("skipped ../x".to_string());
        assert_eq!(staging.entries_skipped, 1);
        assert_eq!(staging.warnings.len(), 1);
    }

    #[test]
    fn test_entry_failure_keeps_io_kind() {
        let file = SelectableFile::new(ArchiveEntry::file("a/b.txt", 1));
        let error = ExtractionError::entry_copy(
            "a/b.txt",
            std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let failure = EntryFailure::new(3, &file, &error);
        assert_eq!(failure.index, 3);
        assert_eq!(failure.internal_path, "a/b.txt");
        assert_eq!(failure.kind, Some(ErrorKind::PermissionDenied));
        assert!(failure.message.contains("a/b.txt"));
    }
}
