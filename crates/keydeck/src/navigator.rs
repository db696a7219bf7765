use crate::deck::Deck;

/// Mutable navigation state. `filtered_indices` is derived once from the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub current_index: usize,
    pub filter_active: bool,
    pub filtered_indices: Vec<usize>,
}

/// Owns the deck and the navigation state. All mutation goes through here.
#[derive(Debug, Clone)]
pub struct Navigator {
    deck: Deck,
    state: NavigationState,
}

impl Navigator {
    /// # Panics
    /// Panics if the deck is empty. Deck sources reject empty decks before
    /// they get here.
    pub fn new(deck: Deck) -> Self {
        assert!(!deck.is_empty(), "navigator requires at least one slide");
        let filtered_indices = deck.essential_indices();
        Self {
            deck,
            state: NavigationState {
                current_index: 0,
                filter_active: false,
                filtered_indices,
            },
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn filter_active(&self) -> bool {
        self.state.filter_active
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.state.filtered_indices
    }

    /// Position of the current slide within the filtered sequence, if it is a member.
    pub fn filtered_position(&self) -> Option<usize> {
        self.state
            .filtered_indices
            .binary_search(&self.state.current_index)
            .ok()
    }

    /// Jump to `index` unconditionally. The index must be a valid slide index.
    pub fn go_to(&mut self, index: usize) {
        debug_assert!(index < self.len(), "slide index {index} out of range");
        tracing::trace!(from = self.state.current_index, to = index, "go_to");
        self.state.current_index = index;
    }

    /// Advance one step along the active sequence. No-op at the end.
    pub fn next(&mut self) {
        let current = self.state.current_index;
        let target = if self.state.filter_active {
            self.state
                .filtered_indices
                .iter()
                .copied()
                .find(|&i| i > current)
        } else if current + 1 < self.len() {
            Some(current + 1)
        } else {
            None
        };
        if let Some(target) = target {
            self.go_to(target);
        }
    }

    /// Step back along the active sequence. No-op at the start.
    pub fn prev(&mut self) {
        let current = self.state.current_index;
        let target = if self.state.filter_active {
            self.state
                .filtered_indices
                .iter()
                .rev()
                .copied()
                .find(|&i| i < current)
        } else {
            current.checked_sub(1)
        };
        if let Some(target) = target {
            self.go_to(target);
        }
    }

    /// Jump to the first slide of the active sequence.
    pub fn first(&mut self) {
        let target = if self.state.filter_active {
            self.state.filtered_indices.first().copied()
        } else {
            Some(0)
        };
        if let Some(target) = target {
            self.go_to(target);
        }
    }

    /// Jump to the last slide of the active sequence.
    pub fn last(&mut self) {
        let target = if self.state.filter_active {
            self.state.filtered_indices.last().copied()
        } else {
            Some(self.len() - 1)
        };
        if let Some(target) = target {
            self.go_to(target);
        }
    }

    /// Flip filtered mode. Turning it on moves a non-essential current slide
    /// to the nearest essential one; turning it off keeps the position.
    /// Does nothing when the deck has no essential slides.
    pub fn toggle_filter(&mut self) {
        if self.state.filtered_indices.is_empty() {
            tracing::debug!("filter toggle ignored: deck has no essential slides");
            return;
        }
        self.state.filter_active = !self.state.filter_active;
        tracing::debug!(active = self.state.filter_active, "filter toggled");
        self.settle();
    }

    /// Restore the filtered-mode invariant after a jump onto a slide outside
    /// the filtered sequence.
    pub fn settle(&mut self) {
        if !self.state.filter_active || self.filtered_position().is_some() {
            return;
        }
        if let Some(nearest) = self.nearest_filtered_index(self.state.current_index) {
            self.go_to(nearest);
        }
    }

    pub fn nearest_filtered_index(&self, index: usize) -> Option<usize> {
        nearest_filtered_index(&self.state.filtered_indices, index)
    }

    /// `true` when `prev` would move.
    pub fn has_prev(&self) -> bool {
        if self.state.filter_active {
            self.filtered_position().is_some_and(|p| p > 0)
        } else {
            self.state.current_index > 0
        }
    }

    /// `true` when `next` would move.
    pub fn has_next(&self) -> bool {
        if self.state.filter_active {
            self.filtered_position()
                .is_some_and(|p| p + 1 < self.state.filtered_indices.len())
        } else {
            self.state.current_index + 1 < self.len()
        }
    }
}

/// The candidate closest to `index`. On equal distance the earlier candidate wins.
pub fn nearest_filtered_index(filtered: &[usize], index: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for &candidate in filtered {
        let distance = candidate.abs_diff(index);
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::deck_with;

    const ESSENTIAL_34: [usize; 12] = [0, 3, 5, 8, 10, 13, 15, 18, 21, 25, 29, 33];

    #[test]
    fn test_filtered_indices_computed_once() {
        let nav = Navigator::new(deck_with(10, &[7, 2, 4]));
        assert_eq!(nav.filtered_indices(), &[2, 4, 7]);
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.filter_active());
    }

    #[test]
    #[should_panic]
    fn test_empty_deck_panics() {
        Navigator::new(deck_with(0, &[]));
    }

    #[test]
    fn test_next_prev_unfiltered() {
        let mut nav = Navigator::new(deck_with(3, &[]));
        nav.next();
        assert_eq!(nav.current_index(), 1);
        nav.next();
        nav.next();
        assert_eq!(nav.current_index(), 2);
        nav.prev();
        nav.prev();
        nav.prev();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_next_prev_filtered() {
        let mut nav = Navigator::new(deck_with(10, &[1, 4, 8]));
        nav.go_to(1);
        nav.toggle_filter();
        nav.next();
        assert_eq!(nav.current_index(), 4);
        nav.next();
        assert_eq!(nav.current_index(), 8);
        nav.next();
        assert_eq!(nav.current_index(), 8);
        nav.prev();
        nav.prev();
        nav.prev();
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_round_trip_from_interior() {
        let mut nav = Navigator::new(deck_with(34, &ESSENTIAL_34));
        for start in 1..33 {
            nav.go_to(start);
            nav.next();
            nav.prev();
            assert_eq!(nav.current_index(), start);
        }

        nav.toggle_filter();
        for &start in &ESSENTIAL_34[1..11] {
            nav.go_to(start);
            nav.next();
            nav.prev();
            assert_eq!(nav.current_index(), start);
        }
    }

    #[test]
    fn test_single_slide_deck() {
        let mut nav = Navigator::new(deck_with(1, &[0]));
        nav.next();
        nav.prev();
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.has_next());
        assert!(!nav.has_prev());
        nav.toggle_filter();
        assert!(nav.filter_active());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let mut nav = Navigator::new(deck_with(5, &[1, 3]));
        let ops: [fn(&mut Navigator); 5] = [
            Navigator::next,
            Navigator::prev,
            Navigator::toggle_filter,
            Navigator::first,
            Navigator::last,
        ];
        for round in 0..50 {
            ops[(round * 7 + round / 3) % ops.len()](&mut nav);
            assert!(nav.current_index() < nav.len());
            if nav.filter_active() {
                assert!(nav.filtered_position().is_some());
            }
        }
    }

    #[test]
    fn test_toggle_keeps_essential_position() {
        let mut nav = Navigator::new(deck_with(10, &[2, 5]));
        nav.go_to(5);
        nav.toggle_filter();
        assert_eq!(nav.current_index(), 5);
        nav.toggle_filter();
        assert_eq!(nav.current_index(), 5);
        assert!(!nav.filter_active());
    }

    #[test]
    fn test_toggle_relocates_and_stays() {
        let mut nav = Navigator::new(deck_with(10, &[2, 8]));
        nav.go_to(6);
        nav.toggle_filter();
        assert_eq!(nav.current_index(), 8);
        nav.toggle_filter();
        assert_eq!(nav.current_index(), 8);
    }

    #[test]
    fn test_toggle_without_essential_slides_is_noop() {
        let mut nav = Navigator::new(deck_with(4, &[]));
        nav.go_to(2);
        nav.toggle_filter();
        assert!(!nav.filter_active());
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_nearest_tie_prefers_lower() {
        assert_eq!(nearest_filtered_index(&[2, 8], 5), Some(2));
        assert_eq!(nearest_filtered_index(&[2, 8], 6), Some(8));
        assert_eq!(nearest_filtered_index(&[2, 8], 0), Some(2));
        assert_eq!(nearest_filtered_index(&[2, 8], 8), Some(8));
        assert_eq!(nearest_filtered_index(&[], 3), None);
    }

    #[test]
    fn test_settle_after_jump_in_filtered_mode() {
        let mut nav = Navigator::new(deck_with(10, &[2, 8]));
        nav.toggle_filter();
        assert_eq!(nav.current_index(), 2);
        nav.go_to(4);
        assert_eq!(nav.current_index(), 4);
        nav.settle();
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_first_and_last() {
        let mut nav = Navigator::new(deck_with(10, &[2, 8]));
        nav.last();
        assert_eq!(nav.current_index(), 9);
        nav.toggle_filter();
        assert_eq!(nav.current_index(), 8);
        nav.first();
        assert_eq!(nav.current_index(), 2);
        nav.toggle_filter();
        nav.first();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_boundary_flags() {
        let mut nav = Navigator::new(deck_with(10, &[2, 8]));
        assert!(!nav.has_prev());
        assert!(nav.has_next());
        nav.toggle_filter();
        assert!(!nav.has_prev());
        assert!(nav.has_next());
        nav.next();
        assert!(nav.has_prev());
        assert!(!nav.has_next());
    }

    #[test]
    fn test_scenario_34_slides() {
        let mut nav = Navigator::new(deck_with(34, &ESSENTIAL_34));
        assert_eq!(nav.filtered_indices().len(), 12);

        nav.toggle_filter();
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.filtered_position(), Some(0));

        nav.next();
        nav.next();
        nav.next();
        assert_eq!(nav.filtered_position(), Some(3));
        assert_eq!(nav.current_index(), 8);

        nav.toggle_filter();
        assert_eq!(nav.current_index(), 8);
    }
}
