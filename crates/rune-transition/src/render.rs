//! Mount gate and the render description handed to the host.

use serde::{Deserialize, Serialize};

use super::config::TransitionConfig;
use super::status::TransitionStatus;

/// Whether the element exists in the render tree.
pub fn is_mounted(status: TransitionStatus, mount_on_demand: bool) -> bool {
    !(mount_on_demand && status == TransitionStatus::Unmounted)
}

/// What the host should apply to the governed element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub status: TransitionStatus,
    /// False when the element must be removed from the tree.
    pub mounted: bool,
    /// Full class attribute: base class plus the class for `status`.
    pub class_name: String,
}

impl RenderOutput {
    pub fn new(status: TransitionStatus, config: &TransitionConfig) -> Self {
        Self {
            status,
            mounted: is_mounted(status, config.mount_on_demand),
            class_name: config.class_names.resolve(&config.base_class, status),
        }
    }
}
