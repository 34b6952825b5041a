//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use std::process::ExitCode;
use tracing::debug;
use unpick_core::ExtractConfig;
use unpick_core::ExtractionSession;
use unpick_core::NoopObserver;
use unpick_core::SelectionModel;
use unpick_core::choose_destination;
use unpick_core::list_files;
use unpick_core::open_archive;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<ExitCode> {
    let entries = add_archive_context(open_archive(&args.archive), &args.archive)?;
    let mut selection = list_files(&entries);
    apply_selection(&mut selection, args)?;
    debug!(
        files = selection.len(),
        selected = selection.selected_count(),
        "selection built"
    );

    if selection.selected_count() == 0 {
        bail!(
            "No files selected from '{}'\n\
             HINT: Use --select, --path, --rename or --all. Run `unpick list` to see file numbers.",
            args.archive.display()
        );
    }

    let mut config = ExtractConfig::default().with_staging_dir_name(args.staging_dir.clone());
    if let Some(max_total_size) = args.max_total_size {
        config = config.with_max_total_size(max_total_size);
    }
    if let Some(max_files) = args.max_files {
        config = config.with_max_file_count(max_files);
    }

    let destination = choose_destination(&args.destination).with_context(|| {
        format!(
            "Destination '{}' is not an existing directory",
            args.destination.display()
        )
    })?;
    let session = add_archive_context(
        ExtractionSession::new(&args.archive, destination, config),
        &args.archive,
    )?;

    // Progress bar only on a terminal, and never in quiet or JSON mode
    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new(selection.selected_count(), "Copying");
        session.process(&mut selection, &mut progress)
    } else {
        session.process(&mut selection, &mut NoopObserver)
    };
    let report = add_archive_context(report, &args.archive)?;

    formatter.format_process_result(&selection, &report)?;

    if report.all_copied() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Marks the files named on the command line for copying.
///
/// File numbers are 1-based, as printed by `unpick list`.
fn apply_selection(selection: &mut SelectionModel, args: &ExtractArgs) -> Result<()> {
    if args.all {
        selection.select_all(true);
    }

    for &number in &args.select {
        let index = to_index(selection, number)?;
        selection.set_will_copy(index, true);
    }

    for path in &args.paths {
        let index = selection.find_by_path(path).ok_or_else(|| {
            anyhow!(
                "No file '{path}' in archive\n\
                 HINT: Run `unpick list` to see the stored paths."
            )
        })?;
        selection.set_will_copy(index, true);
    }

    for (number, name) in &args.renames {
        let index = to_index(selection, *number)?;
        selection.set_will_copy(index, true);
        selection.set_output_name(index, name.clone());
    }

    Ok(())
}

fn to_index(selection: &SelectionModel, number: usize) -> Result<usize> {
    if number == 0 || number > selection.len() {
        bail!(
            "File number {number} is out of range (archive has {} files)\n\
             HINT: Run `unpick list` to see file numbers.",
            selection.len()
        );
    }
    Ok(number - 1)
}
