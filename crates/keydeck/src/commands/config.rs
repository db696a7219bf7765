use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let defaults = config.defaults();

    println!("{} {}", "Config file:".dimmed(), path.display());
    println!();
    print_value("defaults.theme", defaults.theme, "light");
    print_value(
        "defaults.marker",
        defaults.marker,
        crate::deck::DEFAULT_MARKER,
    );
    print_value("defaults.start_filtered", defaults.start_filtered, "false");
    print_value(
        "defaults.narrow_width",
        defaults.narrow_width,
        &crate::toc::DEFAULT_NARROW_WIDTH.to_string(),
    );
    Ok(())
}

fn print_value<T: ToString>(key: &str, value: Option<T>, fallback: &str) {
    match value {
        Some(v) => println!("  {key} = {}", v.to_string().bold()),
        None => println!("  {key} = {} {}", fallback, "(default)".dimmed()),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Saved".green());
    println!("{} {}", "Config file:".dimmed(), path.display());
    tracing::debug!(key, "config updated");
    Ok(())
}
