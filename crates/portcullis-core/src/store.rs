//! State container.
//!
//! The store is an ordinary value owned by whoever drives the UI. Views
//! never see it directly: they get props from `props::map_state_to_props`
//! and push actions through the `Dispatch` trait.

use std::collections::VecDeque;

use crate::action::Action;
use crate::reducers;
use crate::state::RootState;

/// Anything that accepts actions.
pub trait Dispatch {
    fn dispatch(&mut self, action: Action);
}

/// Recording dispatcher, handy wherever the actions themselves are the
/// thing under test.
impl Dispatch for Vec<Action> {
    fn dispatch(&mut self, action: Action) {
        self.push(action);
    }
}

#[derive(Debug, Default)]
pub struct Store {
    state: RootState,
    history: VecDeque<&'static str>,
}

impl Store {
    /// Max dispatched kinds kept in `history`.
    pub const HISTORY_LIMIT: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    /// Kinds of the most recent actions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.history.iter().copied()
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, action: Action) {
        tracing::debug!(kind = action.kind(), "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reducers::reduce(state, &action);

        if self.history.len() == Self::HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(action.kind());
    }
}
