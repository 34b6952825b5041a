//! Staging directory lifecycle.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use tracing::warn;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::Result;
use crate::StagingReport;
use crate::archive::Archive;
use crate::copy::CopyBuffer;
use crate::formats::Stager;

/// Extracts the whole archive into `staging`.
///
/// A stale staging directory left by an earlier crash is removed first. On
/// any failure the partially written staging directory is removed again
/// before the error is returned.
///
/// # Errors
///
/// Returns `ExtractionError::Staging` wrapping the cause.
pub fn stage_archive(
    archive: &mut Archive,
    staging: &Path,
    config: &ExtractConfig,
    buffer: &mut CopyBuffer,
) -> Result<StagingReport> {
    remove_staging(staging).map_err(|e| ExtractionError::staging(staging, e))?;

    let result = fs::create_dir_all(staging)
        .map_err(ExtractionError::from)
        .and_then(|()| {
            let mut stager = Stager::new(staging, config, buffer);
            archive.stage(&mut stager)?;
            Ok(stager.finish())
        });

    match result {
        Ok(report) => {
            debug!(
                path = %staging.display(),
                files = report.files_staged,
                bytes = report.bytes_staged,
                "archive staged"
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(cleanup) = remove_staging(staging) {
                warn!("{cleanup}");
            }
            Err(ExtractionError::staging(staging, e))
        }
    }
}

/// Removes the staging directory and everything below it.
///
/// A staging directory that does not exist counts as removed.
///
/// # Errors
///
/// Returns `ExtractionError::Cleanup` if the directory cannot be removed.
pub fn remove_staging(staging: &Path) -> Result<()> {
    match fs::remove_dir_all(staging) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ExtractionError::Cleanup {
            path: staging.to_path_buf(),
            source,
        }),
    }
}
