use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{Deck, DeckConfig, EssentialPredicate, Panel};

/// On-disk description of a deck.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub title: Option<String>,

    /// Essential marker glyph for this deck. Overridden by command line flags.
    #[serde(default)]
    pub marker: Option<String>,

    #[serde(default)]
    pub titles: HashMap<String, String>,

    #[serde(default)]
    pub slides: Vec<PanelEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelEntry {
    pub id: String,
    #[serde(default)]
    pub body: String,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid deck {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            anyhow::bail!("Deck has no slides");
        }
        let mut seen = HashSet::new();
        for (i, entry) in self.slides.iter().enumerate() {
            if entry.id.trim().is_empty() {
                anyhow::bail!("Slide {} has an empty id", i + 1);
            }
            if !seen.insert(entry.id.as_str()) {
                anyhow::bail!("Duplicate slide id: {}", entry.id);
            }
        }
        Ok(())
    }

    /// Build the deck, classifying titles with `essential`.
    pub fn into_deck(self, essential: EssentialPredicate) -> Deck {
        let panels = self
            .slides
            .into_iter()
            .map(|entry| Panel::new(entry.id, entry.body))
            .collect();
        let config = DeckConfig {
            titles: self.titles,
            essential,
        };
        Deck::build(panels, &config).with_title(self.title)
    }
}
