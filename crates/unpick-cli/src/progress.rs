//! Progress bar for extract runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use unpick_core::ExtractionError;
use unpick_core::ProcessObserver;
use unpick_core::ProcessReport;
use unpick_core::SelectableFile;
use unpick_core::SelectionModel;
use unpick_core::StagingReport;

/// CLI progress bar wrapper implementing `ProcessObserver`.
///
/// Shows "Unpacking" while the archive is staged, then one tick per selected
/// file. Failures and cleanup problems are printed above the bar. The bar is
/// cleared on drop.
pub struct CliProgress {
    bar: ProgressBar,
    message: String,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a progress bar over `total` selected files.
    #[must_use]
    pub fn new(total: usize, message: &str) -> Self {
        let bar = ProgressBar::new(total as u64);

        // Template: "Copying 15.2 MB [████████░░░░] 42/100 files (12s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files ({elapsed_short})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("elapsed_short", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_duration(state.elapsed())).unwrap_or(());
                })
                .progress_chars("█▓░"),
        );
        bar.set_message("Unpacking");

        Self {
            bar,
            message: message.to_string(),
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    fn refresh_message(&self) {
        self.bar.set_message(format!(
            "{} {}",
            self.message,
            humanize_bytes(self.bytes_written)
        ));
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProcessObserver for CliProgress {
    fn on_staged(&mut self, _report: &StagingReport) {
        self.refresh_message();
    }

    fn on_entry_copied(&mut self, _index: usize, _file: &SelectableFile, bytes: u64) {
        self.bytes_written = self.bytes_written.saturating_add(bytes);
        self.refresh_message();
        self.bar.inc(1);
    }

    fn on_entry_failed(&mut self, _index: usize, file: &SelectableFile, error: &ExtractionError) {
        self.bar
            .println(format!("failed: {}: {error}", file.internal_path()));
        self.bar.inc(1);
    }

    fn on_cleanup_failed(&mut self, error: &ExtractionError) {
        self.bar.println(format!("warning: {error}"));
    }

    fn on_finished(&mut self, _selection: &SelectionModel, _report: &ProcessReport) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Converts duration to human-readable format.
fn humanize_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
