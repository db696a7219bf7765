use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::PredicateArgs;
use crate::config::Config;
use crate::deck::Deck;

pub fn run(file: &Path, predicate: &PredicateArgs) -> Result<()> {
    let config = Config::load_or_default();
    let deck = super::load_deck(file, predicate, &config)?;

    if let Some(title) = &deck.title {
        println!("{}\n", title.bold());
    }
    for line in render(&deck) {
        println!("{line}");
    }
    Ok(())
}

/// One line per slide, numbered across the full deck, essential entries emphasized.
fn render(deck: &Deck) -> Vec<String> {
    let width = deck.len().to_string().len();
    deck.slides()
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let number = format!("{:>width$}.", i + 1);
            if slide.essential {
                format!("{} {}", number.yellow(), slide.title.bold())
            } else {
                format!("{} {}", number.dimmed(), slide.title)
            }
        })
        .collect()
}
