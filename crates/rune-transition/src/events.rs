//! Controller inputs and the status notifications it emits.
//!
//! Inputs are queued and handled one at a time. Notifications accumulate in
//! an [`EventQueue`] until the host drains them:
//!
//! ```ignore
//! host.set_present(true)?;
//! for event in host.controller_mut().drain_events() {
//!     if let StatusEvent::StatusChanged { from, to } = event {
//!         println!("{from} -> {to}");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::status::TransitionStatus;
use super::timer::TimerHandle;

/// Work items the controller processes on the host's turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ControllerInput {
    /// New configuration arrived; re-evaluate presence.
    PresenceChanged,
    /// The host committed the last render.
    Committed,
    /// The host clock moved forward.
    Elapsed(f32),
    TimerFired(TimerHandle),
    /// The host reported the animation finished.
    EndSignaled,
    Teardown,
}

/// Notification emitted by a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEvent {
    /// Status moved from one state to another.
    StatusChanged {
        from: TransitionStatus,
        to: TransitionStatus,
    },
    /// An in-flight phase was abandoned by an opposing presence flip.
    PhaseAborted { status: TransitionStatus },
    /// The element left the `Unmounted` state.
    Mounted,
    /// The element reached `Unmounted`.
    Unmounted,
}

impl StatusEvent {
    /// `(from, to)` of a `StatusChanged` event.
    pub fn status_change(&self) -> Option<(TransitionStatus, TransitionStatus)> {
        match self {
            Self::StatusChanged { from, to } => Some((*from, *to)),
            _ => None,
        }
    }
}

/// FIFO of pending status notifications.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<StatusEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: StatusEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<StatusEvent> {
        self.events.pop_front()
    }

    pub fn peek(&self) -> Option<&StatusEvent> {
        self.events.front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = StatusEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
