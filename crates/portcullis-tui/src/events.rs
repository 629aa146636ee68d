//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! the render tick, and the lifecycle of async auth tasks.

use crossterm::event::Event;
use portcullis_core::session::AuthOutcome;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Animation / render cadence.
    Tick,

    /// Raw terminal input.
    Terminal(Event),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Wraps the event a task produced; dropped unless the task is still
    /// the active one for its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// A backend call resolved.
    AuthResolved(AuthOutcome),

    /// A backend call stopped because its token was cancelled.
    AuthCancelled,
}
