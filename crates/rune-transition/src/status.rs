//! Lifecycle status of a governed element.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current lifecycle status of a transitioning element.
///
/// Exactly one status holds at any time. `Unmounted` only appears when
/// mount-on-demand is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStatus {
    /// Removed from the render tree entirely.
    Unmounted,
    /// Present in the tree in its hidden resting state.
    Exited,
    /// Enter phase in flight.
    Entering,
    /// Shown, resting state.
    Entered,
    /// Exit phase in flight.
    Exiting,
}

/// Which way an element is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards `Entered`.
    In,
    /// Towards `Exited`.
    Out,
}

impl Direction {
    /// The active phase for this direction.
    pub fn phase(self) -> TransitionStatus {
        match self {
            Self::In => TransitionStatus::Entering,
            Self::Out => TransitionStatus::Exiting,
        }
    }

    /// The settled state a completed phase lands in.
    pub fn settled(self) -> TransitionStatus {
        match self {
            Self::In => TransitionStatus::Entered,
            Self::Out => TransitionStatus::Exited,
        }
    }
}

impl TransitionStatus {
    /// Status of a freshly created element.
    ///
    /// An element that starts present without `appear` is entered outright; with
    /// `appear` it starts exited and the enter runs after the first commit.
    pub fn initial(present: bool, appear: bool, mount_on_demand: bool) -> Self {
        match (present, appear) {
            (true, false) => Self::Entered,
            (true, true) => Self::Exited,
            (false, _) if mount_on_demand => Self::Unmounted,
            (false, _) => Self::Exited,
        }
    }

    /// `Entering` or `Exiting`.
    pub fn is_phase(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }

    /// `Entered` or `Exited`.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Entered | Self::Exited)
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Entering | Self::Entered => Direction::In,
            Self::Unmounted | Self::Exited | Self::Exiting => Direction::Out,
        }
    }

    /// Direction of the in-flight phase, if any.
    pub fn phase_direction(self) -> Option<Direction> {
        match self {
            Self::Entering => Some(Direction::In),
            Self::Exiting => Some(Direction::Out),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unmounted => "unmounted",
            Self::Exited => "exited",
            Self::Entering => "entering",
            Self::Entered => "entered",
            Self::Exiting => "exiting",
        }
    }
}

impl fmt::Display for TransitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status() {
        assert_eq!(TransitionStatus::initial(false, false, false), TransitionStatus::Exited);
        assert_eq!(TransitionStatus::initial(true, false, false), TransitionStatus::Entered);
        assert_eq!(TransitionStatus::initial(true, true, false), TransitionStatus::Exited);
        assert_eq!(TransitionStatus::initial(false, true, false), TransitionStatus::Exited);
    }

    #[test]
    fn test_initial_status_mount_on_demand() {
        assert_eq!(TransitionStatus::initial(false, false, true), TransitionStatus::Unmounted);
        assert_eq!(TransitionStatus::initial(true, false, true), TransitionStatus::Entered);
        assert_eq!(TransitionStatus::initial(true, true, true), TransitionStatus::Exited);
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(TransitionStatus::Entering.direction(), Direction::In);
        assert_eq!(TransitionStatus::Entered.direction(), Direction::In);
        assert_eq!(TransitionStatus::Exiting.direction(), Direction::Out);
        assert_eq!(TransitionStatus::Unmounted.direction(), Direction::Out);

        assert_eq!(Direction::In.phase(), TransitionStatus::Entering);
        assert_eq!(Direction::Out.settled(), TransitionStatus::Exited);
        assert_eq!(TransitionStatus::Entered.phase_direction(), None);
    }

    #[test]
    fn test_phase_predicates() {
        assert!(TransitionStatus::Exiting.is_phase());
        assert!(!TransitionStatus::Exited.is_phase());
        assert!(TransitionStatus::Entered.is_settled());
        assert!(!TransitionStatus::Unmounted.is_settled());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&TransitionStatus::Entering).unwrap();
        assert_eq!(json, "\"entering\"");
        assert_eq!(TransitionStatus::Unmounted.to_string(), "unmounted");
    }
}
