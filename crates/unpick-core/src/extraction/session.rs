//! Extraction sessions and their builder.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ProcessObserver;
use crate::ProcessReport;
use crate::Result;
use crate::SelectionModel;
use crate::resolve::validate_output_name;
use crate::types::DestDir;

/// One archive paired with one destination root.
///
/// The session only holds paths and settings; the archive is opened and the
/// staging directory created when [`process`](Self::process) runs.
#[derive(Debug, Clone)]
pub struct ExtractionSession {
    archive_path: PathBuf,
    destination: DestDir,
    config: ExtractConfig,
}

impl ExtractionSession {
    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidConfig` if the staging directory name
    /// is not a single plain path segment.
    pub fn new(
        archive_path: impl Into<PathBuf>,
        destination: DestDir,
        config: ExtractConfig,
    ) -> Result<Self> {
        validate_output_name(&config.staging_dir_name).map_err(|_| {
            ExtractionError::InvalidConfig {
                reason: format!(
                    "staging directory name must be a single path segment: {:?}",
                    config.staging_dir_name
                ),
            }
        })?;

        Ok(Self {
            archive_path: archive_path.into(),
            destination,
            config,
        })
    }

    /// Path to the source archive.
    #[must_use]
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Canonical destination root.
    #[must_use]
    pub fn destination(&self) -> &DestDir {
        &self.destination
    }

    /// Settings used for this session.
    #[must_use]
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Directory the archive is staged into: `<destination>/<staging_dir_name>`.
    #[must_use]
    pub fn staging_path(&self) -> PathBuf {
        self.destination.staging_dir(&self.config.staging_dir_name)
    }

    /// Stages the archive and copies every selected entry.
    ///
    /// See [`run_pipeline`](crate::extraction::pipeline::run_pipeline).
    ///
    /// # Errors
    ///
    /// Returns an error only when the run aborts before any copy.
    pub fn process(
        &self,
        selection: &mut SelectionModel,
        observer: &mut dyn ProcessObserver,
    ) -> Result<ProcessReport> {
        super::pipeline::run_pipeline(selection, self, observer)
    }
}

/// Builder for [`ExtractionSession`].
///
/// # Examples
///
/// ```no_run
/// use unpick_core::{ExtractConfig, NoopObserver, SessionBuilder, list_files, open_archive};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut selection = list_files(&open_archive("bundle.zip")?);
/// selection.select_all(true);
///
/// let session = SessionBuilder::new()
///     .archive("bundle.zip")
///     .destination("/tmp/output")
///     .config(ExtractConfig::default().with_max_file_count(1_000))
///     .build()?;
/// let report = session.process(&mut selection, &mut NoopObserver)?;
/// println!("Copied {} files", report.files_copied);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SessionBuilder {
    archive_path: Option<PathBuf>,
    destination: Option<PathBuf>,
    config: Option<ExtractConfig>,
}

impl SessionBuilder {
    /// Creates a new `SessionBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive file path.
    #[must_use]
    pub fn archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.archive_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the destination root.
    #[must_use]
    pub fn destination<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.destination = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: ExtractConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validates the settings and builds the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive path or destination is not set, if the
    /// destination is not an existing directory, or if the configuration is
    /// invalid.
    pub fn build(self) -> Result<ExtractionSession> {
        let archive_path = self
            .archive_path
            .ok_or_else(|| ExtractionError::InvalidConfig {
                reason: "archive path not set".to_string(),
            })?;

        let destination = self
            .destination
            .ok_or_else(|| ExtractionError::InvalidConfig {
                reason: "destination not set".to_string(),
            })?;

        ExtractionSession::new(
            archive_path,
            DestDir::new(destination)?,
            self.config.unwrap_or_default(),
        )
    }
}
