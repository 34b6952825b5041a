//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use unpick_core::config::DEFAULT_STAGING_DIR;

#[derive(Parser)]
#[command(name = "unpick")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the files of an archive with their selection numbers
    List(ListArgs),
    /// Copy selected files out of an archive
    Extract(ExtractArgs),
    /// Print a shell completion script
    Completion(CompletionArgs),
}

impl Commands {
    /// Name of the subcommand, as used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Extract(_) => "extract",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show every entry, directories included
    #[arg(short, long)]
    pub all: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination directory (must exist)
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Select file number INDEX, as shown by `unpick list` (repeatable)
    #[arg(short, long = "select", value_name = "INDEX", value_parser = parse_index)]
    pub select: Vec<usize>,

    /// Select the file stored at PATH inside the archive (repeatable)
    #[arg(short, long = "path", value_name = "PATH")]
    pub paths: Vec<String>,

    /// Copy file number INDEX under NAME; implies --select INDEX (repeatable)
    #[arg(short, long = "rename", value_name = "INDEX=NAME", value_parser = parse_rename)]
    pub renames: Vec<(usize, String)>,

    /// Select every file
    #[arg(short, long)]
    pub all: bool,

    /// Name of the staging directory created inside DEST
    #[arg(long, value_name = "NAME", default_value = DEFAULT_STAGING_DIR)]
    pub staging_dir: String,

    /// Maximum total size staged from the archive (suffixes K, M, G, T)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_total_size: Option<u64>,

    /// Maximum number of archive entries
    #[arg(long)]
    pub max_files: Option<usize>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse a 1-based file number.
fn parse_index(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("file numbers start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid file number: {s}")),
    }
}

/// Parse `INDEX=NAME`.
fn parse_rename(s: &str) -> Result<(usize, String), String> {
    let (index, name) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=NAME, got: {s}"))?;
    if name.is_empty() {
        return Err(format!("empty name in: {s}"));
    }
    Ok((parse_index(index)?, name.to_string()))
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
