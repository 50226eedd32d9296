//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Write a make depfile listing every input of a kustomization
#[derive(Parser, Debug)]
#[command(name = "kustomize-deps")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Kustomization directory to resolve
    #[arg(short, long)]
    pub input: PathBuf,

    /// Depfile to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Make target the dependencies belong to
    #[arg(short, long)]
    pub target: String,

    /// Directory dependency paths are written relative to
    #[arg(short, long, default_value = ".")]
    pub base: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Collapse a rendered clap error into a single line without the usage
/// block or the `error:` prefix.
pub fn one_line_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("Usage:"))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    match message.strip_prefix("error: ") {
        Some(stripped) => stripped.to_string(),
        None => message,
    }
}
