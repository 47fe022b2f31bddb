//! Presence configuration supplied by the host on every render.

use rune_config::TransitionDefaults;
use serde::{Deserialize, Serialize};

use super::classes::TransitionClassNames;
use super::status::Direction;

/// Phase lengths in milliseconds.
///
/// `None` means the phase has no time budget and only settles when the host
/// signals the end of the animation (see
/// [`TransitionController::signal_end`](crate::TransitionController::signal_end)).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTimeouts {
    /// Appear-on-mount enter; falls back to `enter`.
    pub appear: Option<f32>,
    pub enter: Option<f32>,
    pub exit: Option<f32>,
}

impl TransitionTimeouts {
    /// Same budget for every phase.
    pub fn uniform(ms: f32) -> Self {
        Self {
            appear: None,
            enter: Some(ms),
            exit: Some(ms),
        }
    }

    pub fn split(enter_ms: f32, exit_ms: f32) -> Self {
        Self {
            appear: None,
            enter: Some(enter_ms),
            exit: Some(exit_ms),
        }
    }

    /// Externally signaled phases only.
    pub fn signaled() -> Self {
        Self::default()
    }

    pub fn with_appear(mut self, ms: f32) -> Self {
        self.appear = Some(ms);
        self
    }

    /// Budget for a phase heading in `direction`.
    pub fn for_phase(&self, direction: Direction, appearing: bool) -> Option<f32> {
        match direction {
            Direction::In if appearing => self.appear.or(self.enter),
            Direction::In => self.enter,
            Direction::Out => self.exit,
        }
    }
}

/// Everything the host tells a controller about its element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Presence intent: should the element be shown.
    pub present: bool,
    /// Treat the first render of a present element as an enter transition.
    pub appear: bool,
    /// Run the entering phase on later presence flips. When false the element
    /// jumps straight to `Entered`.
    pub enter: bool,
    /// Run the exiting phase. When false the element jumps straight to `Exited`.
    pub exit: bool,
    /// Drop the element from the render tree once fully exited.
    pub mount_on_demand: bool,
    pub timeouts: TransitionTimeouts,
    /// Caller's own classes, always applied.
    pub base_class: String,
    pub class_names: TransitionClassNames,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            present: false,
            appear: false,
            enter: true,
            exit: true,
            mount_on_demand: false,
            timeouts: TransitionTimeouts::default(),
            base_class: String::new(),
            class_names: TransitionClassNames::default(),
        }
    }
}

impl TransitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_present(mut self, present: bool) -> Self {
        self.present = present;
        self
    }

    pub fn with_appear(mut self, appear: bool) -> Self {
        self.appear = appear;
        self
    }

    pub fn with_enter(mut self, enter: bool) -> Self {
        self.enter = enter;
        self
    }

    pub fn with_exit(mut self, exit: bool) -> Self {
        self.exit = exit;
        self
    }

    pub fn with_mount_on_demand(mut self, mount_on_demand: bool) -> Self {
        self.mount_on_demand = mount_on_demand;
        self
    }

    /// Same timeout for enter and exit.
    pub fn with_timeout(mut self, ms: f32) -> Self {
        self.timeouts = TransitionTimeouts::uniform(ms);
        self
    }

    pub fn with_timeouts(mut self, timeouts: TransitionTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_base_class(mut self, base_class: impl Into<String>) -> Self {
        self.base_class = base_class.into();
        self
    }

    pub fn with_class_names(mut self, class_names: TransitionClassNames) -> Self {
        self.class_names = class_names;
        self
    }
}

impl From<&TransitionDefaults> for TransitionConfig {
    fn from(defaults: &TransitionDefaults) -> Self {
        let mut timeouts =
            TransitionTimeouts::split(defaults.enter_timeout_ms, defaults.exit_timeout_ms);
        timeouts.appear = defaults.appear_timeout_ms;

        let class_names = defaults
            .class_prefix
            .as_deref()
            .map(TransitionClassNames::with_prefix)
            .unwrap_or_default();

        Self {
            appear: defaults.appear,
            mount_on_demand: defaults.mount_on_demand,
            timeouts,
            class_names,
            ..Self::default()
        }
    }
}
