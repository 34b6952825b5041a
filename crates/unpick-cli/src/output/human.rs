//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::relative_target;
use anyhow::Result;
use console::Term;
use console::style;
use unpick_core::Archive;
use unpick_core::ProcessReport;
use unpick_core::SelectionModel;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn write_line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    fn write_header(&self, ok: bool, message: &str) {
        if !self.use_colors {
            self.write_line(message);
        } else if ok {
            self.write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            self.write_line(&format!("{} {message}", style("✗").red().bold()));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, archive: &Archive, all: bool, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let size_str = |size: u64| {
            if human_readable {
                Self::format_size(size)
            } else {
                size.to_string()
            }
        };

        let mut number = 0_usize;
        let mut total_size = 0_u64;
        for entry in archive.entries() {
            if entry.is_directory() {
                if all {
                    self.write_line(&format!("d {:>4} {:>10}  {}", "", "", entry.internal_path()));
                }
                continue;
            }

            number += 1;
            total_size = total_size.saturating_add(entry.size());
            let prefix = if all { "- " } else { "" };
            self.write_line(&format!(
                "{prefix}{number:>4} {:>10}  {}",
                size_str(entry.size()),
                entry.internal_path()
            ));
        }

        self.write_line("");
        self.write_line(&format!(
            "Total: {number} files, {} ({})",
            Self::format_size(total_size),
            archive.format_name()
        ));

        Ok(())
    }

    fn format_process_result(
        &self,
        selection: &SelectionModel,
        report: &ProcessReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if report.all_copied() {
            self.write_header(true, "Extraction complete");
        } else {
            self.write_header(
                false,
                &format!(
                    "Extraction finished with {} failed file(s)",
                    report.files_failed()
                ),
            );
        }

        for (index, file) in selection.iter().enumerate() {
            if !file.will_copy() {
                continue;
            }
            if let Some(failure) = report.failures.iter().find(|f| f.index == index) {
                self.write_line(&format!("  failed  {}: {}", file.internal_path(), failure.message));
            } else if file.is_processed() {
                self.write_line(&format!(
                    "  copied  {} -> {}",
                    file.internal_path(),
                    relative_target(file).display()
                ));
            }
        }

        self.write_line(&format!("  Files copied: {}", report.files_copied));
        if !report.all_copied() {
            self.write_line(&format!("  Files failed: {}", report.files_failed()));
        }
        self.write_line(&format!("  Directories: {}", report.directories_created));
        self.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            self.write_line(&format!(
                "  Staged: {} files, {}",
                report.staging.files_staged,
                Self::format_size(report.staging.bytes_staged)
            ));
            if report.staging.entries_skipped > 0 {
                self.write_line(&format!(
                    "  Skipped entries: {}",
                    report.staging.entries_skipped
                ));
            }
            self.write_line(&format!("  Duration: {:?}", report.duration));
        }

        if report.has_warnings() || !report.staging.warnings.is_empty() {
            self.write_line("");
            if self.use_colors {
                self.write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.write_line("Warnings:");
            }
            for warning in report.staging.warnings.iter().chain(&report.warnings) {
                self.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
