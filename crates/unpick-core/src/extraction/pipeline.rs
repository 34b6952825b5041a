//! The stage, copy, clean up, complete sequence.

use std::fs::create_dir_all;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::ExtractionError;
use crate::ProcessObserver;
use crate::ProcessReport;
use crate::Result;
use crate::SelectableFile;
use crate::SelectionModel;
use crate::archive::Archive;
use crate::copy::CopyBuffer;
use crate::copy::copy_file_with_buffer;
use crate::report::EntryFailure;
use crate::resolve::resolve_output;
use crate::resolve::validate_output_name;
use crate::types::SafePath;

use super::session::ExtractionSession;
use super::staging::remove_staging;
use super::staging::stage_archive;

/// Result of one successful entry copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CopyOutcome {
    bytes: u64,
    created_directory: bool,
}

/// Runs one process invocation over `selection`.
///
/// 1. The archive is opened and staged whole into the session's staging
///    directory.
/// 2. Every entry with `will_copy` set is copied, in stored order, from the
///    staging directory to `<destination>/<subdirs>/<output_name>`. A failed
///    entry is reported and the loop moves on; successful entries are marked
///    processed.
/// 3. The staging directory is removed. A removal failure is reported to the
///    observer and kept as a warning.
/// 4. `on_finished` is called, exactly once and last.
///
/// Already processed entries are copied again if they are still selected.
///
/// # Errors
///
/// Returns `Staging` if the run aborts before any copy, wrapping the cause:
/// an archive that can no longer be opened, a quota, or an I/O failure. In
/// that case no entry is touched and `on_finished` is not called.
pub fn run_pipeline(
    selection: &mut SelectionModel,
    session: &ExtractionSession,
    observer: &mut dyn ProcessObserver,
) -> Result<ProcessReport> {
    let start = Instant::now();
    info!(
        archive = %session.archive_path().display(),
        destination = %session.destination().as_path().display(),
        selected = selection.selected_count(),
        "process started"
    );

    let staging = session.staging_path();
    let mut archive = Archive::open(session.archive_path())
        .map_err(|e| ExtractionError::staging(&staging, e))?;
    let mut buffer = CopyBuffer::new();

    let staged = stage_archive(&mut archive, &staging, session.config(), &mut buffer)?;
    observer.on_staged(&staged);

    let mut report = ProcessReport::new();
    report.staging = staged;

    for index in 0..selection.len() {
        if !selection[index].will_copy() {
            continue;
        }

        match copy_entry(&selection[index], session, &mut buffer) {
            Ok(outcome) => {
                selection.mark_processed(index);
                report.files_copied += 1;
                report.bytes_written += outcome.bytes;
                if outcome.created_directory {
                    report.directories_created += 1;
                }
                observer.on_entry_copied(index, &selection[index], outcome.bytes);
            }
            Err(error) => {
                warn!("{error}");
                report
                    .failures
                    .push(EntryFailure::new(index, &selection[index], &error));
                observer.on_entry_failed(index, &selection[index], &error);
            }
        }
    }

    if let Err(error) = remove_staging(&staging) {
        warn!("{error}");
        report.add_warning(error.to_string());
        observer.on_cleanup_failed(&error);
    }

    report.duration = start.elapsed();
    info!(
        copied = report.files_copied,
        failed = report.files_failed(),
        bytes = report.bytes_written,
        "process finished"
    );
    observer.on_finished(selection, &report);
    Ok(report)
}

/// Copies one selected entry out of the staging directory.
///
/// Every failure is wrapped as `EntryCopy` for this entry.
fn copy_entry(
    file: &SelectableFile,
    session: &ExtractionSession,
    buffer: &mut CopyBuffer,
) -> Result<CopyOutcome> {
    try_copy_entry(file, session, buffer)
        .map_err(|e| ExtractionError::entry_copy(file.internal_path(), e))
}

fn try_copy_entry(
    file: &SelectableFile,
    session: &ExtractionSession,
    buffer: &mut CopyBuffer,
) -> Result<CopyOutcome> {
    let internal_path = file.internal_path();
    let output_name = validate_output_name(file.output_name())?;
    let resolved = resolve_output(internal_path, session.destination().as_path())?;

    let staging = session.staging_path();
    let target = resolved.directory.join(output_name);
    if target.starts_with(&staging) {
        return Err(ExtractionError::StagingCollision { path: target });
    }

    create_dir_all(&resolved.directory)?;
    // no-op unless something removed the staging root mid-run
    create_dir_all(&staging)?;

    let source = staging.join(SafePath::validate(internal_path)?.as_path());
    debug!("copying {} to {}", source.display(), target.display());

    let bytes = copy_file_with_buffer(&source, &target, buffer)?;
    Ok(CopyOutcome {
        bytes,
        created_directory: !resolved.exists,
    })
}
