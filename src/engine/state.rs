// src/engine/state.rs

use std::collections::HashMap;

use tracing::debug;

use crate::tasks::Category;

/// Watch-mode state of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryState {
    /// No task in flight.
    Idle,
    /// A task invocation is in flight.
    Running,
    /// A task is in flight and at least one further change arrived; exactly
    /// one follow-up pass runs when the current one finishes.
    Pending,
}

/// Per-category coalescing of change events.
///
/// Change events arriving while a category's task is already running are
/// collapsed into a single queued pass, so a burst of saves produces at
/// most one rebuild beyond the one in flight.
#[derive(Debug)]
pub struct CategoryStates {
    states: HashMap<Category, CategoryState>,
}

impl CategoryStates {
    pub fn new() -> Self {
        let states = Category::ALL
            .into_iter()
            .map(|category| (category, CategoryState::Idle))
            .collect();
        Self { states }
    }

    pub fn get(&self, category: Category) -> CategoryState {
        self.states
            .get(&category)
            .copied()
            .unwrap_or(CategoryState::Idle)
    }

    /// Record a change event. Returns true when the caller should dispatch
    /// the category's task now.
    pub fn on_change(&mut self, category: Category) -> bool {
        match self.get(category) {
            CategoryState::Idle => {
                self.states.insert(category, CategoryState::Running);
                true
            }
            CategoryState::Running => {
                debug!(%category, "change while running; queueing one follow-up pass");
                self.states.insert(category, CategoryState::Pending);
                false
            }
            CategoryState::Pending => {
                debug!(%category, "change while pending; coalesced");
                false
            }
        }
    }

    /// Record task completion. Returns true when a queued pass should be
    /// dispatched immediately.
    pub fn on_finished(&mut self, category: Category) -> bool {
        match self.get(category) {
            CategoryState::Pending => {
                self.states.insert(category, CategoryState::Running);
                true
            }
            _ => {
                self.states.insert(category, CategoryState::Idle);
                false
            }
        }
    }

    /// True when no category has a task in flight.
    pub fn is_idle(&self) -> bool {
        self.states
            .values()
            .all(|state| matches!(state, CategoryState::Idle))
    }
}

impl Default for CategoryStates {
    fn default() -> Self {
        Self::new()
    }
}
