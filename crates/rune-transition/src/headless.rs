//! Headless host loop.
//!
//! Plays the reconciler's part without a renderer: it applies each
//! [`RenderOutput`] to a [`HeadlessElement`] and reports the commit back to
//! the controller until nothing is left to do. Tests and the demo binary use
//! it to run complete presence cycles.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::warn;

use super::config::TransitionConfig;
use super::controller::TransitionController;
use super::error::{Result, TransitionError};
use super::hooks::TransitionHooks;
use super::render::RenderOutput;
use super::status::TransitionStatus;

/// Upper bound on render/commit turns per flush.
pub const DEFAULT_MAX_TURNS: usize = 32;

/// Attributes a headless host commits for one element.
#[derive(Debug, Default)]
pub struct HeadlessElement {
    class_name: RefCell<String>,
    mounted: Cell<bool>,
    commits: Cell<usize>,
}

impl HeadlessElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class attribute as last committed. Empty while unmounted.
    pub fn class_name(&self) -> String {
        self.class_name.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Number of renders committed so far.
    pub fn commit_count(&self) -> usize {
        self.commits.get()
    }

    /// Commit a render description.
    pub fn apply(&self, output: &RenderOutput) {
        self.mounted.set(output.mounted);
        let mut class_name = self.class_name.borrow_mut();
        class_name.clear();
        if output.mounted {
            class_name.push_str(&output.class_name);
        }
        self.commits.set(self.commits.get() + 1);
    }
}

/// Owns a controller and its element, and runs the render/commit loop.
#[derive(Debug)]
pub struct HeadlessHost {
    controller: TransitionController<Rc<HeadlessElement>>,
    element: Rc<HeadlessElement>,
    max_turns: usize,
}

impl HeadlessHost {
    /// Create the controller and commit its first render.
    pub fn mount(
        config: TransitionConfig,
        hooks: TransitionHooks<Rc<HeadlessElement>>,
    ) -> Result<Self> {
        let element = Rc::new(HeadlessElement::new());
        let controller = TransitionController::new(config, Rc::clone(&element), hooks);
        let mut host = Self {
            controller,
            element,
            max_turns: DEFAULT_MAX_TURNS,
        };
        host.flush()?;
        Ok(host)
    }

    pub fn set_max_turns(&mut self, max_turns: usize) {
        self.max_turns = max_turns.max(1);
    }

    pub fn element(&self) -> &Rc<HeadlessElement> {
        &self.element
    }

    pub fn controller(&self) -> &TransitionController<Rc<HeadlessElement>> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransitionController<Rc<HeadlessElement>> {
        &mut self.controller
    }

    pub fn status(&self) -> TransitionStatus {
        self.controller.status()
    }

    /// Re-render with a new configuration.
    pub fn set_config(&mut self, config: TransitionConfig) -> Result<()> {
        self.controller.update(config)?;
        self.flush()?;
        Ok(())
    }

    /// Re-render with only the presence intent changed.
    pub fn set_present(&mut self, present: bool) -> Result<()> {
        let config = self.controller.config().clone().with_present(present);
        self.set_config(config)
    }

    /// Let `delta_ms` pass on the host clock.
    pub fn tick(&mut self, delta_ms: f32) -> Result<()> {
        if self.controller.advance(delta_ms)? {
            self.flush()?;
        }
        Ok(())
    }

    /// Report that the element's animation finished.
    pub fn signal_end(&mut self) -> Result<()> {
        if self.controller.signal_end()? {
            self.flush()?;
        }
        Ok(())
    }

    /// Render and commit until the controller has nothing left for this turn.
    ///
    /// Returns the number of commits made.
    pub fn flush(&mut self) -> Result<usize> {
        let mut turns = 0;
        loop {
            self.element.apply(&self.controller.render());
            turns += 1;
            if !self.controller.commit()? {
                return Ok(turns);
            }
            if turns >= self.max_turns {
                warn!(turns, status = %self.controller.status(), "render loop did not settle");
                return Err(TransitionError::Unsettled { turns });
            }
        }
    }

    /// Tear the element down. No hook runs afterwards.
    pub fn unmount(&mut self) {
        self.controller.teardown();
        self.element.apply(&RenderOutput {
            status: self.controller.status(),
            mounted: false,
            class_name: String::new(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::TransitionClassNames;

    #[test]
    fn test_element_apply() {
        let element = HeadlessElement::new();
        element.apply(&RenderOutput {
            status: TransitionStatus::Entered,
            mounted: true,
            class_name: "a b".to_string(),
        });
        assert!(element.is_mounted());
        assert_eq!(element.class_name(), "a b");

        element.apply(&RenderOutput {
            status: TransitionStatus::Unmounted,
            mounted: false,
            class_name: "a".to_string(),
        });
        assert!(!element.is_mounted());
        assert_eq!(element.class_name(), "");
        assert_eq!(element.commit_count(), 2);
    }

    #[test]
    fn test_mount_commits_initial_render() {
        let host = HeadlessHost::mount(
            TransitionConfig::new()
                .with_present(true)
                .with_base_class("toast")
                .with_class_names(TransitionClassNames::with_prefix("fade")),
            TransitionHooks::new(),
        )
        .unwrap();

        assert_eq!(host.status(), TransitionStatus::Entered);
        assert_eq!(host.element().class_name(), "toast fade-entered");
        assert_eq!(host.element().commit_count(), 1);
    }

    #[test]
    fn test_tick_without_work_does_not_commit() {
        let mut host =
            HeadlessHost::mount(TransitionConfig::new(), TransitionHooks::new()).unwrap();
        let commits = host.element().commit_count();
        host.tick(100.0).unwrap();
        assert_eq!(host.element().commit_count(), commits);
    }

    #[test]
    fn test_unmount_stops_controller() {
        let mut host = HeadlessHost::mount(
            TransitionConfig::new().with_present(true).with_timeout(10.0),
            TransitionHooks::new(),
        )
        .unwrap();
        host.set_present(false).unwrap();
        host.unmount();

        assert!(!host.element().is_mounted());
        assert!(matches!(host.tick(10.0), Err(TransitionError::TornDown)));
    }

    #[test]
    fn test_turn_limit() {
        let mut host = HeadlessHost::mount(
            TransitionConfig::new().with_timeout(0.0),
            TransitionHooks::new(),
        )
        .unwrap();
        host.set_max_turns(2);

        let err = host.set_present(true).unwrap_err();
        assert!(matches!(err, TransitionError::Unsettled { turns: 2 }));
    }
}
