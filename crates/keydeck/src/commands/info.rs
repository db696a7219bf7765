use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::PredicateArgs;
use crate::config::Config;

pub fn run(file: &Path, predicate: &PredicateArgs) -> Result<()> {
    let config = Config::load_or_default();
    let deck = super::load_deck(file, predicate, &config)?;

    if let Some(title) = &deck.title {
        println!("{}", title.bold());
    }
    println!("{} {}", "Total slides:".dimmed(), deck.len());
    println!("{} {}", "Essential:   ".dimmed(), deck.essential_count());
    Ok(())
}
