//! Config CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::storage::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a config file with the current settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, output: &Output, config: Config) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(output, &config),
        ConfigCommands::Init { force } => init(output, &config, force),
    }
}

fn show(output: &Output, config: &Config) -> Result<()> {
    let export_dir = config.export_dir()?;
    let path = config.path.as_ref().map(|p| p.display().to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path,
            "exists": config.path.as_ref().is_some_and(|p| p.exists()),
            "export_dir": export_dir.display().to_string(),
            "throwaway_isbns": config.settings.throwaway_isbns,
            "default_format": config.settings.default_format,
        }));
        return Ok(());
    }

    println!("Config file:     {}", path.as_deref().unwrap_or("<none>"));
    println!("Export dir:      {}", export_dir.display());
    println!("Default format:  {:?}", config.settings.default_format);
    println!("Throwaway ISBNs:");
    for isbn in &config.settings.throwaway_isbns {
        println!("  {}", isbn);
    }

    Ok(())
}

fn init(output: &Output, config: &Config, force: bool) -> Result<()> {
    if let Some(path) = &config.path {
        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
    }

    let path = config.save()?;
    output.success(&format!("Wrote config to {}", path.display()));
    Ok(())
}
