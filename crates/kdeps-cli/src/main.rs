//! kustomize-deps CLI
//!
//! Writes a make depfile listing every local input of a kustomization, so a
//! build step that runs `kustomize build` is redone whenever one changes.

mod cli;
mod commands;
mod error;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use kdeps_fs::OsFileSystem;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use commands::GenerateArgs;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Parse arguments, reporting usage errors through the `error:` path.
fn parse_cli() -> Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            e.exit()
        }
        Err(e) => Err(CliError::user(cli::one_line_message(&e))),
    }
}

fn run() -> Result<()> {
    let cli = parse_cli()?;

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    let args = GenerateArgs {
        input: cli.input,
        output: cli.output,
        target: cli.target,
        base: cli.base,
    };
    let written = commands::run_generate(&OsFileSystem::current_dir(), &args)?;
    tracing::debug!(output = %args.output.display(), written, "Done");
    Ok(())
}
