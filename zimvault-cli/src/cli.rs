//! Command-line arguments for the `zimvault` binary.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use zimvault_core::ConvertOptions;

#[derive(Parser, Debug)]
#[command(
    name = "zimvault",
    version,
    about = "Convert a Zim Markdown export into an Obsidian vault",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    // Used when no subcommand is given.
    #[command(flatten)]
    pub convert: ConvertArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rename notes after their titles, fix headings and rewrite links (default)
    Convert(ConvertArgs),

    /// Rename `.markdown` files to `.md` and fix links pointing at them
    NormalizeExtensions {
        /// Export root (defaults to the current directory)
        root: Option<PathBuf>,

        /// Extension to replace
        #[arg(long, default_value = "markdown")]
        from: String,
    },

    /// Turn `&emsp;` / `&nbsp;` placeholders back into tabs and spaces
    RestoreIndent {
        /// Export root (defaults to the current directory)
        root: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Export root (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Options file (JSON); defaults to `<ROOT>/.zimvault.json` if present
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the conversion report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The command to run; a bare invocation means `convert`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Convert(self.convert))
    }
}

/// Returns `root` or the current directory.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("reading the current directory"),
    }
}

/// Loads the options for a conversion of `root`.
pub fn load_options(root: &Path, config: Option<&Path>) -> Result<ConvertOptions> {
    match config {
        Some(path) => ConvertOptions::from_file(path)
            .with_context(|| format!("loading options from {}", path.display())),
        None => Ok(ConvertOptions::load_from_root(root)),
    }
}
