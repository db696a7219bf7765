pub mod manifest;

use std::collections::HashMap;

use regex::Regex;

pub use manifest::Manifest;

/// Marker glyph that flags a slide title as essential when nothing else is configured.
pub const DEFAULT_MARKER: &str = "\u{1F511}";

/// One panel of the deck. Immutable once the deck is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideRecord {
    pub id: String,
    pub title: String,
    pub essential: bool,
    /// Pre-rendered panel content, drawn as-is.
    pub body: String,
}

/// Decides whether a slide title belongs to the essential subset.
#[derive(Debug, Clone)]
pub enum EssentialPredicate {
    Marker(String),
    Pattern(Regex),
}

impl Default for EssentialPredicate {
    fn default() -> Self {
        Self::Marker(DEFAULT_MARKER.to_string())
    }
}

impl EssentialPredicate {
    pub fn pattern(pattern: &str) -> anyhow::Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| anyhow::anyhow!("Invalid essential pattern '{pattern}': {e}"))?;
        Ok(Self::Pattern(regex))
    }

    pub fn matches(&self, title: &str) -> bool {
        match self {
            Self::Marker(marker) => !marker.is_empty() && title.contains(marker.as_str()),
            Self::Pattern(regex) => regex.is_match(title),
        }
    }

    /// Pick the predicate from, in order: an explicit pattern, an explicit
    /// marker, the deck's own marker, the configured marker, the default glyph.
    pub fn resolve(
        pattern: Option<&str>,
        marker: Option<&str>,
        deck_marker: Option<&str>,
        config_marker: Option<&str>,
    ) -> anyhow::Result<Self> {
        if let Some(pattern) = pattern {
            return Self::pattern(pattern);
        }
        let marker = marker
            .or(deck_marker)
            .or(config_marker)
            .unwrap_or(DEFAULT_MARKER);
        Ok(Self::Marker(marker.to_string()))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Marker(marker) => format!("marker '{marker}'"),
            Self::Pattern(regex) => format!("pattern /{}/", regex.as_str()),
        }
    }
}

/// Everything a deck needs besides the panel list.
#[derive(Debug, Clone, Default)]
pub struct DeckConfig {
    pub titles: HashMap<String, String>,
    pub essential: EssentialPredicate,
}

/// A panel as handed over by whatever produced the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: String,
    pub body: String,
}

impl Panel {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// The ordered, static list of slides.
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: Option<String>,
    slides: Vec<SlideRecord>,
}

impl Deck {
    /// Build slide records from panels, resolving titles through the config's
    /// title map (missing entries fall back to the raw id) and applying the
    /// essential predicate to the resolved title.
    pub fn build(panels: Vec<Panel>, config: &DeckConfig) -> Self {
        Self::build_with(panels, &config.titles, |title| {
            config.essential.matches(title)
        })
    }

    pub fn build_with(
        panels: Vec<Panel>,
        titles: &HashMap<String, String>,
        is_essential: impl Fn(&str) -> bool,
    ) -> Self {
        let slides = panels
            .into_iter()
            .map(|panel| {
                let title = titles
                    .get(&panel.id)
                    .cloned()
                    .unwrap_or_else(|| panel.id.clone());
                let essential = is_essential(&title);
                SlideRecord {
                    id: panel.id,
                    title,
                    essential,
                    body: panel.body,
                }
            })
            .collect();
        Self {
            title: None,
            slides,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    /// Indices of the essential slides, strictly increasing.
    pub fn essential_indices(&self) -> Vec<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.essential)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn essential_count(&self) -> usize {
        self.slides.iter().filter(|s| s.essential).count()
    }
}

/// A deck of `n` slides where the given indices are essential.
#[cfg(test)]
pub(crate) fn deck_with(n: usize, essential: &[usize]) -> Deck {
    let panels = (0..n).map(|i| Panel::new(format!("s{i}"), "")).collect();
    let titles: HashMap<String, String> = (0..n)
        .map(|i| {
            let title = if essential.contains(&i) {
                format!("* slide {i}")
            } else {
                format!("slide {i}")
            };
            (format!("s{i}"), title)
        })
        .collect();
    Deck::build_with(panels, &titles, |t| t.starts_with('*'))
}
