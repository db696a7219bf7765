use std::fmt;

use crate::navigator::Navigator;

/// Where a slide sits relative to the current one. Drives the directional
/// slide-in/slide-out offset, never visibility filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prev,
    Active,
    Next,
}

impl Placement {
    pub fn of(index: usize, current: usize) -> Self {
        use std::cmp::Ordering;
        match index.cmp(&current) {
            Ordering::Less => Self::Prev,
            Ordering::Equal => Self::Active,
            Ordering::Greater => Self::Next,
        }
    }

    /// Horizontal offset in viewport widths.
    pub fn offset(self) -> f32 {
        match self {
            Self::Prev => -1.0,
            Self::Active => 0.0,
            Self::Next => 1.0,
        }
    }
}

/// 1-based position within the active sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub position: usize,
    pub total: usize,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.position, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub index: usize,
    /// 1-based full-deck number.
    pub number: usize,
    pub title: String,
    pub essential: bool,
    pub active: bool,
}

/// Everything the display surfaces need, derived from the navigator.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckView {
    pub current_index: usize,
    pub placements: Vec<Placement>,
    pub counter: Counter,
    /// Always one entry per slide, in deck order.
    pub toc: Vec<TocEntry>,
    /// Essential TOC entries are emphasized while this is set.
    pub filter_marked: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Receives a fresh view after every state change.
pub trait ViewSync {
    fn sync(&mut self, view: &DeckView);
}

pub fn project(nav: &Navigator) -> DeckView {
    let current = nav.current_index();
    let slides = nav.deck().slides();

    let placements = (0..slides.len())
        .map(|i| Placement::of(i, current))
        .collect();

    let counter = match (nav.filter_active(), nav.filtered_position()) {
        (true, Some(position)) => Counter {
            position: position + 1,
            total: nav.filtered_indices().len(),
        },
        _ => Counter {
            position: current + 1,
            total: slides.len(),
        },
    };

    let toc = slides
        .iter()
        .enumerate()
        .map(|(i, slide)| TocEntry {
            index: i,
            number: i + 1,
            title: slide.title.clone(),
            essential: slide.essential,
            active: i == current,
        })
        .collect();

    DeckView {
        current_index: current,
        placements,
        counter,
        toc,
        filter_marked: nav.filter_active(),
        prev_enabled: nav.has_prev(),
        next_enabled: nav.has_next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::deck_with;

    #[test]
    fn test_placements() {
        let mut nav = Navigator::new(deck_with(4, &[]));
        nav.go_to(2);
        let view = project(&nav);
        assert_eq!(
            view.placements,
            vec![
                Placement::Prev,
                Placement::Prev,
                Placement::Active,
                Placement::Next
            ]
        );
    }

    #[test]
    fn test_counter_unfiltered_and_filtered() {
        let mut nav = Navigator::new(deck_with(10, &[2, 5, 9]));
        assert_eq!(project(&nav).counter.to_string(), "1/10");

        nav.toggle_filter();
        assert_eq!(project(&nav).counter.to_string(), "1/3");
        nav.next();
        assert_eq!(project(&nav).counter.to_string(), "2/3");

        nav.toggle_filter();
        assert_eq!(project(&nav).counter.to_string(), "6/10");
    }

    #[test]
    fn test_toc_always_full_with_one_active() {
        let mut nav = Navigator::new(deck_with(8, &[1, 6]));
        for toggle in [false, true] {
            if toggle {
                nav.toggle_filter();
            }
            let view = project(&nav);
            assert_eq!(view.toc.len(), 8);
            let active: Vec<_> = view.toc.iter().filter(|e| e.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].index, nav.current_index());
            assert_eq!(view.filter_marked, toggle);
        }
    }

    #[test]
    fn test_toc_entries_carry_titles() {
        let nav = Navigator::new(deck_with(3, &[1]));
        let view = project(&nav);
        assert_eq!(view.toc[1].number, 2);
        assert_eq!(view.toc[1].title, "* slide 1");
        assert!(view.toc[1].essential);
        assert!(!view.toc[2].essential);
        assert_eq!(view.toc.iter().position(|e| e.active), Some(0));
    }

    #[test]
    fn test_buttons_at_boundaries() {
        let mut nav = Navigator::new(deck_with(5, &[1, 3]));
        let view = project(&nav);
        assert!(!view.prev_enabled);
        assert!(view.next_enabled);

        nav.go_to(4);
        let view = project(&nav);
        assert!(view.prev_enabled);
        assert!(!view.next_enabled);

        // Slide 3 is the last essential slide.
        nav.toggle_filter();
        let view = project(&nav);
        assert_eq!(nav.current_index(), 3);
        assert!(view.prev_enabled);
        assert!(!view.next_enabled);
    }

    #[test]
    fn test_single_slide_buttons_disabled() {
        let nav = Navigator::new(deck_with(1, &[]));
        let view = project(&nav);
        assert!(!view.prev_enabled);
        assert!(!view.next_enabled);
        assert_eq!(view.counter.to_string(), "1/1");
    }

    #[test]
    fn test_placement_offsets() {
        assert_eq!(Placement::of(0, 3).offset(), -1.0);
        assert_eq!(Placement::of(3, 3).offset(), 0.0);
        assert_eq!(Placement::of(5, 3).offset(), 1.0);
    }
}
