//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::relative_target;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use unpick_core::Archive;
use unpick_core::ProcessReport;
use unpick_core::SelectionModel;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct FileOutput {
    number: usize,
    path: String,
    size: u64,
}

#[derive(Serialize)]
struct EntryOutput {
    path: String,
    size: u64,
    directory: bool,
}

#[derive(Serialize)]
struct ListOutput {
    archive: String,
    format: &'static str,
    files: Vec<FileOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<EntryOutput>>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Copied,
    Failed,
}

#[derive(Serialize)]
struct CopyOutput {
    number: usize,
    path: String,
    target: String,
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ProcessOutput {
    files_copied: usize,
    files_failed: usize,
    directories_created: usize,
    bytes_written: u64,
    files_staged: usize,
    entries_skipped: usize,
    duration_ms: u128,
    results: Vec<CopyOutput>,
    warnings: Vec<String>,
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, archive: &Archive, all: bool, _human_readable: bool) -> Result<()> {
        let files = archive
            .entries()
            .iter()
            .filter(|entry| !entry.is_directory())
            .enumerate()
            .map(|(index, entry)| FileOutput {
                number: index + 1,
                path: entry.internal_path().to_string(),
                size: entry.size(),
            })
            .collect();

        let entries = all.then(|| {
            archive
                .entries()
                .iter()
                .map(|entry| EntryOutput {
                    path: entry.internal_path().to_string(),
                    size: entry.size(),
                    directory: entry.is_directory(),
                })
                .collect()
        });

        let data = ListOutput {
            archive: archive.path().display().to_string(),
            format: archive.format_name(),
            files,
            entries,
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_process_result(
        &self,
        selection: &SelectionModel,
        report: &ProcessReport,
    ) -> Result<()> {
        let results = selection
            .iter()
            .enumerate()
            .filter(|(_, file)| file.will_copy())
            .map(|(index, file)| {
                let failure = report.failures.iter().find(|f| f.index == index);
                CopyOutput {
                    number: index + 1,
                    path: file.internal_path().to_string(),
                    target: relative_target(file).display().to_string(),
                    outcome: if failure.is_some() {
                        Outcome::Failed
                    } else {
                        Outcome::Copied
                    },
                    error: failure.map(|f| f.message.clone()),
                }
            })
            .collect();

        let data = ProcessOutput {
            files_copied: report.files_copied,
            files_failed: report.files_failed(),
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            files_staged: report.staging.files_staged,
            entries_skipped: report.staging.entries_skipped,
            duration_ms: report.duration.as_millis(),
            results,
            warnings: report
                .staging
                .warnings
                .iter()
                .chain(&report.warnings)
                .cloned()
                .collect(),
        };

        if report.all_copied() {
            Self::output(&JsonOutput::success("extract", data))
        } else {
            let message = format!("{} selected file(s) could not be copied", report.files_failed());
            Self::output(&JsonOutput::partial("extract", data, message))
        }
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
