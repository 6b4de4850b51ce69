//! `zimvault` converts a Zim Markdown export into an Obsidian vault.
//!
//! Run without arguments inside the export root:
//!
//!   zimvault
//!
//! Progress is logged at `info` level; set `RUST_LOG` to change it.

mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{load_options, resolve_root, Cli, Command};
use zimvault_core::{normalize_extensions, restore_indentation, Converter};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().into_command() {
        Command::Convert(args) => {
            let root = resolve_root(args.root)?;
            let options = load_options(&root, args.config.as_deref())?;
            let report = Converter::new(&root, options).run().map_err(|e| {
                log::debug!("Conversion failed: {e:?}");
                anyhow!(e.user_message())
            })?;
            if !report.collisions.is_empty() {
                log::warn!(
                    "{} name collisions, see the messages above",
                    report.collisions.len()
                );
            }
            if args.json {
                #[allow(clippy::print_stdout)]
                {
                    println!("{}", report.to_json()?);
                }
            }
        }
        Command::NormalizeExtensions { root, from } => {
            let root = resolve_root(root)?;
            let count = normalize_extensions(&root, &from, "md")
                .with_context(|| format!("renaming .{from} files in {}", root.display()))?;
            log::info!("Converted {count} .{from} files");
        }
        Command::RestoreIndent { root } => {
            let root = resolve_root(root)?;
            let count = restore_indentation(&root, "md")
                .with_context(|| format!("restoring indentation in {}", root.display()))?;
            log::info!("Restored indentation in {count} files");
        }
    }
    Ok(())
}
