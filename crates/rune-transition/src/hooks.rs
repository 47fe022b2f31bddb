//! Lifecycle hook dispatch.
//!
//! Hooks receive the governed element untouched plus a [`HookContext`]. They
//! may fail; the failure is wrapped in [`TransitionError::Hook`] and handed
//! back to whoever drove the controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use super::error::{Result, TransitionError};
use super::status::Direction;

/// The six lifecycle points a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Enter requested; runs before the status flips to `Entering`.
    Enter,
    /// `Entering` has been committed.
    Entering,
    /// `Entered` has been committed.
    Entered,
    /// Exit requested; runs before the status flips to `Exiting`.
    Exit,
    /// `Exiting` has been committed.
    Exiting,
    /// `Exited` has been committed.
    Exited,
}

impl HookKind {
    pub const ALL: [HookKind; 6] = [
        Self::Enter,
        Self::Entering,
        Self::Entered,
        Self::Exit,
        Self::Exiting,
        Self::Exited,
    ];

    /// Hook that opens a phase.
    pub fn start(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::Enter,
            Direction::Out => Self::Exit,
        }
    }

    /// Hook that runs once a phase is visible.
    pub fn active(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::Entering,
            Direction::Out => Self::Exiting,
        }
    }

    /// Hook that runs once a phase has settled.
    pub fn settle(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::Entered,
            Direction::Out => Self::Exited,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Enter | Self::Entering | Self::Entered => Direction::In,
            Self::Exit | Self::Exiting | Self::Exited => Direction::Out,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "on_enter",
            Self::Entering => "on_entering",
            Self::Entered => "on_entered",
            Self::Exit => "on_exit",
            Self::Exiting => "on_exiting",
            Self::Exited => "on_exited",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra information passed to every hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookContext {
    /// Which hook is running.
    pub kind: HookKind,
    /// True while the enter sequence is the appear-on-mount one.
    pub appearing: bool,
}

/// A lifecycle hook.
pub type Hook<E> = Box<dyn FnMut(&E, HookContext) -> anyhow::Result<()>>;

/// Optional hooks for each lifecycle point.
pub struct TransitionHooks<E> {
    on_enter: Option<Hook<E>>,
    on_entering: Option<Hook<E>>,
    on_entered: Option<Hook<E>>,
    on_exit: Option<Hook<E>>,
    on_exiting: Option<Hook<E>>,
    on_exited: Option<Hook<E>>,
}

impl<E> Default for TransitionHooks<E> {
    fn default() -> Self {
        Self {
            on_enter: None,
            on_entering: None,
            on_entered: None,
            on_exit: None,
            on_exiting: None,
            on_exited: None,
        }
    }
}

impl<E> fmt::Debug for TransitionHooks<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installed: Vec<&str> = HookKind::ALL
            .into_iter()
            .filter(|kind| self.is_set(*kind))
            .map(HookKind::as_str)
            .collect();
        f.debug_struct("TransitionHooks")
            .field("installed", &installed)
            .finish()
    }
}

impl<E> TransitionHooks<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(
        self,
        hook: impl FnMut(&E, HookContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.with(HookKind::Enter, Box::new(hook))
    }

    pub fn on_entering(
        self,
        hook: impl FnMut(&E, HookContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.with(HookKind::Entering, Box::new(hook))
    }

    pub fn on_entered(
        self,
        hook: impl FnMut(&E, HookContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.with(HookKind::Entered, Box::new(hook))
    }

    pub fn on_exit(
        self,
        hook: impl FnMut(&E, HookContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.with(HookKind::Exit, Box::new(hook))
    }

    pub fn on_exiting(
        self,
        hook: impl FnMut(&E, HookContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.with(HookKind::Exiting, Box::new(hook))
    }

    pub fn on_exited(
        self,
        hook: impl FnMut(&E, HookContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.with(HookKind::Exited, Box::new(hook))
    }

    /// Install (or replace) the hook for `kind`.
    pub fn with(mut self, kind: HookKind, hook: Hook<E>) -> Self {
        *self.slot_mut(kind) = Some(hook);
        self
    }

    pub fn is_set(&self, kind: HookKind) -> bool {
        match kind {
            HookKind::Enter => self.on_enter.is_some(),
            HookKind::Entering => self.on_entering.is_some(),
            HookKind::Entered => self.on_entered.is_some(),
            HookKind::Exit => self.on_exit.is_some(),
            HookKind::Exiting => self.on_exiting.is_some(),
            HookKind::Exited => self.on_exited.is_some(),
        }
    }

    fn slot_mut(&mut self, kind: HookKind) -> &mut Option<Hook<E>> {
        match kind {
            HookKind::Enter => &mut self.on_enter,
            HookKind::Entering => &mut self.on_entering,
            HookKind::Entered => &mut self.on_entered,
            HookKind::Exit => &mut self.on_exit,
            HookKind::Exiting => &mut self.on_exiting,
            HookKind::Exited => &mut self.on_exited,
        }
    }

    /// Invoke the hook for `ctx.kind` if one is installed.
    ///
    /// Returns whether a hook ran.
    pub fn dispatch(&mut self, element: &E, ctx: HookContext) -> Result<bool> {
        let Some(hook) = self.slot_mut(ctx.kind).as_mut() else {
            return Ok(false);
        };
        trace!(hook = %ctx.kind, appearing = ctx.appearing, "dispatching lifecycle hook");
        hook(element, ctx).map_err(|err| TransitionError::Hook {
            kind: ctx.kind,
            source: err.into(),
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx(kind: HookKind) -> HookContext {
        HookContext {
            kind,
            appearing: false,
        }
    }

    #[test]
    fn test_dispatch_invokes_matching_hook() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&calls);
        let mut hooks = TransitionHooks::<String>::new().on_entering(move |el, ctx| {
            log.borrow_mut().push((el.clone(), ctx.kind));
            Ok(())
        });

        let element = "panel".to_string();
        assert!(hooks.dispatch(&element, ctx(HookKind::Entering)).unwrap());
        assert!(!hooks.dispatch(&element, ctx(HookKind::Entered)).unwrap());

        assert_eq!(*calls.borrow(), vec![("panel".to_string(), HookKind::Entering)]);
    }

    #[test]
    fn test_hook_error_is_wrapped() {
        let mut hooks =
            TransitionHooks::<()>::new().on_exit(|_, _| Err(anyhow::anyhow!("style query failed")));

        let err = hooks.dispatch(&(), ctx(HookKind::Exit)).unwrap_err();
        match err {
            TransitionError::Hook { kind, source } => {
                assert_eq!(kind, HookKind::Exit);
                assert!(source.to_string().contains("style query failed"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_is_set_and_debug() {
        let hooks = TransitionHooks::<()>::new()
            .on_enter(|_, _| Ok(()))
            .on_exited(|_, _| Ok(()));

        assert!(hooks.is_set(HookKind::Enter));
        assert!(!hooks.is_set(HookKind::Entering));

        let debug = format!("{hooks:?}");
        assert!(debug.contains("on_enter"));
        assert!(debug.contains("on_exited"));
        assert!(!debug.contains("on_exiting"));
    }

    #[test]
    fn test_kind_per_direction() {
        assert_eq!(HookKind::start(Direction::In), HookKind::Enter);
        assert_eq!(HookKind::active(Direction::Out), HookKind::Exiting);
        assert_eq!(HookKind::settle(Direction::Out), HookKind::Exited);
        assert_eq!(HookKind::Entered.direction(), Direction::In);
    }
}
