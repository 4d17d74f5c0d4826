//! Config command - inspect effective configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::config::{find_project_config, xdg_config_path, AppConfig};

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print effective classifier settings as TOML
    Show,
    /// Print config file locations
    Path,
}

/// Run the config command.
pub fn run(args: &ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(config),
        ConfigCommand::Path => print_paths(),
    }
}

fn show(config: &AppConfig) -> Result<()> {
    let rendered =
        toml::to_string(&config.effective()).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn print_paths() -> Result<()> {
    match xdg_config_path() {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("warning: no user config directory on this platform"),
    }
    if let Some(path) = find_project_config() {
        println!("{}", path.display());
    }
    Ok(())
}
