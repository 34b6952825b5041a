//! unpick CLI - pick files out of archives into a directory tree.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if (cli.verbose || std::env::var("RUST_LOG").is_ok())
        && let Err(err) = init_tracing(cli.verbose)
    {
        eprintln!("failed to initialize logging: {err}");
    }

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json;

    let result = match &cli.command {
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose {
        "unpick=debug"
    } else {
        "unpick=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
