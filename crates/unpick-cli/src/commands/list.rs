//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use std::process::ExitCode;
use unpick_core::Archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let archive = add_archive_context(Archive::open(&args.archive), &args.archive)?;
    formatter.format_listing(&archive, args.all, args.human_readable)?;
    Ok(ExitCode::SUCCESS)
}
