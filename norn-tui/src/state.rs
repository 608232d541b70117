//! UI state for the swarm monitor.

use std::collections::HashMap;

/// Unique identifier for a swarm.
pub type SwarmId = String;

/// Unique identifier for an agent session within a swarm.
pub type SessionId = String;

/// Expand/collapse state for a single swarm card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwarmCardState {
    expanded: bool,
}

impl SwarmCardState {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// Card states keyed by swarm id.
///
/// Entries are never dropped on refresh, so a card stays open for as long as
/// its swarm keeps the same id.
#[derive(Debug, Clone, Default)]
pub struct CardStates {
    cards: HashMap<SwarmId, SwarmCardState>,
}

impl CardStates {
    /// Returns the state for `swarm_id`, creating a collapsed one on first use.
    pub fn entry(&mut self, swarm_id: &str) -> &mut SwarmCardState {
        self.cards.entry(swarm_id.to_string()).or_default()
    }

    /// Returns whether the card is expanded. Unknown ids are collapsed.
    pub fn is_expanded(&self, swarm_id: &str) -> bool {
        self.cards
            .get(swarm_id)
            .is_some_and(SwarmCardState::is_expanded)
    }

    /// Toggles the card and returns the new expanded value.
    pub fn toggle(&mut self, swarm_id: &str) -> bool {
        let card = self.entry(swarm_id);
        card.toggle();
        card.is_expanded()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Core application state owned by the view, separate from the swarm list.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub cards: CardStates,
    /// Index of the card under the cursor.
    pub selected: usize,
}

impl AppState {
    /// Moves selection to the next card, wrapping at the end.
    pub fn select_next(&mut self, card_count: usize) {
        if card_count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % card_count;
    }

    /// Moves selection to the previous card, wrapping at the start.
    pub fn select_prev(&mut self, card_count: usize) {
        if card_count == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            card_count - 1
        } else {
            self.selected - 1
        };
    }

    /// Keeps the selection inside a list that may have shrunk.
    pub fn clamp_selection(&mut self, card_count: usize) {
        if self.selected >= card_count {
            self.selected = card_count.saturating_sub(1);
        }
    }
}
