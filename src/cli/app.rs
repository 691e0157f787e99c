//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{batch, config_cmd, tui};
use crate::domain::{derive_sku, Condition, Location};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "booklist")]
#[command(author, version, about = "Record book inventory and export it to a spreadsheet")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "BOOKLIST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive entry form (default)
    Form {
        /// Directory that receives exports
        #[arg(long, short)]
        output_dir: Option<PathBuf>,
    },

    /// Record entries from a file (or stdin) and export them
    Batch {
        /// Input file with `isbn,condition,location,quantity` lines
        input: Option<PathBuf>,

        /// Condition used for lines that leave it empty
        #[arg(long)]
        lock_condition: Option<Condition>,

        /// Location used for lines that leave it empty
        #[arg(long)]
        lock_location: Option<String>,

        /// Directory that receives the export
        #[arg(long, short)]
        output_dir: Option<PathBuf>,

        /// Validate only, do not write a spreadsheet
        #[arg(long)]
        no_export: bool,
    },

    /// Check whether a shelf location code is valid
    CheckLocation {
        /// Location code, e.g. A050
        location: String,
    },

    /// Print the SKU for an ISBN and condition
    Sku {
        isbn: String,

        /// New or Used
        condition: Condition,
    },

    /// Show or create the config file
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.settings.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("Book Lister starting");
    output.verbose_ctx(
        "config",
        &format!(
            "Using config {}",
            config
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<defaults>".to_string())
        ),
    );

    match cli.command.unwrap_or(Commands::Form { output_dir: None }) {
        Commands::Form { output_dir } => {
            let dir = match output_dir {
                Some(dir) => dir,
                None => config.export_dir()?,
            };
            output.verbose_ctx("form", &format!("Exports go to {}", dir.display()));
            tui::run(&output, config.ledger_config(), dir)?
        }

        Commands::Batch {
            input,
            lock_condition,
            lock_location,
            output_dir,
            no_export,
        } => {
            let options = batch::BatchOptions {
                input,
                lock_condition,
                lock_location,
                export_dir: if no_export {
                    None
                } else {
                    Some(match output_dir {
                        Some(dir) => dir,
                        None => config.export_dir()?,
                    })
                },
            };
            batch::run(&output, config.ledger_config(), options)?
        }

        Commands::CheckLocation { location } => check_location(&output, &location)?,

        Commands::Sku { isbn, condition } => {
            let sku = derive_sku(isbn.trim(), condition);
            if output.is_json() {
                output.data(&serde_json::json!({
                    "isbn": isbn.trim(),
                    "condition": condition,
                    "sku": sku,
                }));
            } else {
                println!("{}", sku);
            }
        }

        Commands::Config(cmd) => config_cmd::run(cmd, &output, config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Reports whether `raw` is a valid location, failing the command if not
fn check_location(output: &Output, raw: &str) -> Result<()> {
    match raw.trim().parse::<Location>() {
        Ok(location) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "valid": true,
                    "location": location,
                }));
            } else {
                output.success(&format!("{} is a valid location", location));
            }
            Ok(())
        }
        Err(e) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "valid": false,
                    "error": e.to_string(),
                }));
            }
            Err(e.into())
        }
    }
}
