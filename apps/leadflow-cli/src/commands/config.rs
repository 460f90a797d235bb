//! Configuration management commands

use crate::config::CliConfig;
use crate::{output, ConfigCommands};
use anyhow::{bail, Result};
use colored::Colorize;

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(),
        ConfigCommands::Get { key } => get(&key),
        ConfigCommands::Set { key, value } => set(&key, value),
    }
}

fn show() -> Result<()> {
    let config = CliConfig::load()?;

    for key in ["api_url", "api_key", "output_format"] {
        match config.get(key) {
            Some(value) => output::key_value(key, &value),
            None => println!("{}: {}", key.bold(), "(unset)".dimmed()),
        }
    }

    Ok(())
}

fn get(key: &str) -> Result<()> {
    let config = CliConfig::load()?;

    match config.get(key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!("Unknown or unset configuration key: {key}"),
    }
}

fn set(key: &str, value: String) -> Result<()> {
    let mut config = CliConfig::load()?;
    config.set(key, value)?;
    config.save()?;

    output::success(&format!("Set {key}"));

    Ok(())
}
