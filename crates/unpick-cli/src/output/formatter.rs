//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use unpick_core::Archive;
use unpick_core::ProcessReport;
use unpick_core::SelectableFile;
use unpick_core::SelectionModel;
use unpick_core::resolve_output_directory;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the entries of an archive with their file numbers
    fn format_listing(&self, archive: &Archive, all: bool, human_readable: bool) -> Result<()>;

    /// Format the outcome of an extract run
    fn format_process_result(&self, selection: &SelectionModel, report: &ProcessReport)
    -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Where a selected file lands, relative to the destination root.
///
/// Falls back to the bare output name for paths that do not resolve.
pub fn relative_target(file: &SelectableFile) -> PathBuf {
    resolve_output_directory(file.internal_path(), Path::new(""))
        .unwrap_or_default()
        .join(file.output_name())
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Result with data that still counts as failed.
    pub fn partial(operation: impl Into<String>, data: T, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: Some(data),
            error: Some(error.into()),
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
