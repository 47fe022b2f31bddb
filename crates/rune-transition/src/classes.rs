//! Class-name resolution per transition status.
//!
//! Each status maps to an optional phase class which is space-joined with
//! the caller's base class:
//!
//! | status                 | phase class |
//! |------------------------|-------------|
//! | `Entering`             | `entering`  |
//! | `Entered`              | `entered`   |
//! | `Exiting`              | `exiting`   |
//! | `Exited` / `Unmounted` | `exited`    |

use serde::{Deserialize, Serialize};

use super::status::TransitionStatus;

/// Per-phase class name overrides. Absent entries contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionClassNames {
    pub entering: Option<String>,
    pub entered: Option<String>,
    pub exiting: Option<String>,
    pub exited: Option<String>,
}

impl TransitionClassNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive all four classes from a common prefix, e.g. `fade` gives
    /// `fade-entering`, `fade-entered`, `fade-exiting` and `fade-exited`.
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Self::default();
        }
        Self {
            entering: Some(format!("{prefix}-entering")),
            entered: Some(format!("{prefix}-entered")),
            exiting: Some(format!("{prefix}-exiting")),
            exited: Some(format!("{prefix}-exited")),
        }
    }

    pub fn with_entering(mut self, class: impl Into<String>) -> Self {
        self.entering = Some(class.into());
        self
    }

    pub fn with_entered(mut self, class: impl Into<String>) -> Self {
        self.entered = Some(class.into());
        self
    }

    pub fn with_exiting(mut self, class: impl Into<String>) -> Self {
        self.exiting = Some(class.into());
        self
    }

    pub fn with_exited(mut self, class: impl Into<String>) -> Self {
        self.exited = Some(class.into());
        self
    }

    /// Phase class for a status, if one is configured.
    pub fn for_status(&self, status: TransitionStatus) -> Option<&str> {
        let class = match status {
            TransitionStatus::Entering => &self.entering,
            TransitionStatus::Entered => &self.entered,
            TransitionStatus::Exiting => &self.exiting,
            TransitionStatus::Exited | TransitionStatus::Unmounted => &self.exited,
        };
        class.as_deref()
    }

    /// Full class attribute for `status`: base first, then the phase class.
    pub fn resolve(&self, base: &str, status: TransitionStatus) -> String {
        [Some(base), self.for_status(status)]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
