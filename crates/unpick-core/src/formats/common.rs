//! Staging writer shared between archive formats.
//!
//! Format handlers only know how to walk their own entries; everything that
//! touches the staging directory goes through [`Stager`], so ZIP and tar get
//! the same path validation, quota accounting and logging.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::QuotaResource;
use crate::Result;
use crate::StagingReport;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::types::SafePath;

/// Writes archive entries below a staging root while enforcing quotas.
///
/// Entries whose internal path fails [`SafePath::validate`] are skipped with a
/// warning instead of failing the whole run. Quota violations and I/O errors
/// are returned to the caller.
pub struct Stager<'a> {
    root: &'a Path,
    config: &'a ExtractConfig,
    buffer: &'a mut CopyBuffer,
    report: StagingReport,
    entries_seen: usize,
}

impl<'a> Stager<'a> {
    /// Creates a stager writing below `root`.
    pub fn new(root: &'a Path, config: &'a ExtractConfig, buffer: &'a mut CopyBuffer) -> Self {
        Self {
            root,
            config,
            buffer,
            report: StagingReport::new(),
            entries_seen: 0,
        }
    }

    /// Counts one archive entry against `max_file_count`.
    ///
    /// Handlers call this once per entry, including entries that end up
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` once the count goes past the limit.
    pub fn count_entry(&mut self) -> Result<()> {
        self.entries_seen += 1;
        if self.entries_seen > self.config.max_file_count {
            return Err(ExtractionError::QuotaExceeded {
                resource: QuotaResource::FileCount {
                    current: self.entries_seen,
                    max: self.config.max_file_count,
                },
            });
        }
        Ok(())
    }

    /// Writes one file entry.
    ///
    /// `declared_size` is the size recorded by the archive. It is checked
    /// before anything is written; the bytes actually read are checked again
    /// afterwards, so an archive that under-reports its sizes still hits the
    /// limit.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` if the total staged size would pass
    /// `max_total_size`, or an I/O error if writing fails.
    pub fn stage_file<R: Read>(
        &mut self,
        internal_path: &str,
        declared_size: u64,
        reader: &mut R,
    ) -> Result<()> {
        let Some(target) = self.target(internal_path) else {
            return Ok(());
        };

        let max = self.config.max_total_size;
        let remaining = max.saturating_sub(self.report.bytes_staged);
        if declared_size > remaining {
            return Err(self.total_size_exceeded(declared_size));
        }

        if let Some(parent) = target.parent() {
            create_dir_all(parent)?;
        }

        let file = File::create(&target)?;
        let mut writer = BufWriter::with_capacity(self.buffer.size(), file);
        let mut limited = reader.take(remaining.saturating_add(1));
        let written = copy_with_buffer(&mut limited, &mut writer, self.buffer)?;
        writer.flush()?;

        if written > remaining {
            return Err(self.total_size_exceeded(written));
        }

        self.report.files_staged += 1;
        self.report.bytes_staged += written;
        debug!(path = internal_path, bytes = written, "staged file");
        Ok(())
    }

    /// Recreates one directory entry.
    ///
    /// A directory entry naming the archive root itself, such as the `./`
    /// written by `tar -C dir .`, is the staging root and needs no work.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn stage_directory(&mut self, internal_path: &str) -> Result<()> {
        if is_root_entry(internal_path) {
            debug!(path = internal_path, "root directory entry");
            return Ok(());
        }

        let Some(target) = self.target(internal_path) else {
            return Ok(());
        };

        create_dir_all(&target)?;
        self.report.directories_created += 1;
        debug!(path = internal_path, "staged directory");
        Ok(())
    }

    /// Leaves out an entry that is neither a file nor a directory.
    pub fn skip_special(&mut self, internal_path: &str, kind: &str) {
        self.report.entries_skipped += 1;
        debug!(path = internal_path, kind, "skipped special entry");
    }

    /// Returns the accumulated staging statistics.
    #[must_use]
    pub fn finish(self) -> StagingReport {
        self.report
    }

    fn target(&mut self, internal_path: &str) -> Option<PathBuf> {
        match SafePath::validate(internal_path) {
            Ok(safe) => Some(self.root.join(safe.as_path())),
            Err(e) => {
                warn!(path = internal_path, "skipped unsafe entry: {e}");
                self.report.skip(format!("skipped {internal_path:?}: {e}"));
                None
            }
        }
    }

    fn total_size_exceeded(&self, incoming: u64) -> ExtractionError {
        ExtractionError::QuotaExceeded {
            resource: QuotaResource::TotalSize {
                current: self.report.bytes_staged.saturating_add(incoming),
                max: self.config.max_total_size,
            },
        }
    }
}

/// True for relative paths made only of `.` and empty segments.
fn is_root_entry(internal_path: &str) -> bool {
    !internal_path.starts_with(['/', '\\'])
        && internal_path
            .split(['/', '\\'])
            .all(|segment| segment.is_empty() || segment == ".")
}
