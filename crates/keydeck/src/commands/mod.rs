pub mod completion;
pub mod config;
pub mod info;
pub mod toc;

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::PredicateArgs;
use crate::config::Config;
use crate::deck::{Deck, EssentialPredicate, Manifest};

/// Load a deck file and classify its slides with the resolved predicate.
pub fn load_deck(file: &Path, predicate: &PredicateArgs, config: &Config) -> Result<Deck> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let manifest = Manifest::load(file)?;
    let defaults = config.defaults();
    let essential = EssentialPredicate::resolve(
        predicate.pattern.as_deref(),
        predicate.marker.as_deref(),
        manifest.marker.as_deref(),
        defaults.marker.as_deref(),
    )?;
    tracing::debug!(file = %file.display(), essential = %essential.describe(), "loading deck");
    Ok(manifest.into_deck(essential))
}

pub fn print_version() {
    println!(
        "{} {}",
        "keydeck".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
}
