//! The presence transition state machine.
//!
//! `TransitionController` governs one element. The host drives it with four
//! kinds of input, each handled to completion before the next one:
//!
//! - [`update`](TransitionController::update): new configuration (render phase)
//! - [`commit`](TransitionController::commit): the last render is on screen
//! - [`advance`](TransitionController::advance): host clock moved forward
//! - [`signal_end`](TransitionController::signal_end): animation reported done
//!
//! # Turn ordering
//!
//! A presence flip never starts a phase inside `update`. It is recorded as the
//! pending transition and started on the following `commit`, so `on_enter` /
//! `on_exit` see every attribute that changed alongside the flip. Every status
//! change made during a turn is followed by more work that waits for the
//! commit of that status:
//!
//! ```text
//! update(present)  ─▶ pending = In
//! commit           ─▶ on_enter, status = Entering
//! commit           ─▶ arm phase timer, on_entering
//! advance(timeout) ─▶ status = Entered
//! commit           ─▶ on_entered
//! ```
//!
//! A zero timeout settles on the next turn instead of arming a timer. An
//! opposing flip cancels the timer at once and sets the rest of the running
//! sequence aside. The commit that starts the new sequence discards it, so an
//! aborted phase never reaches its settle hook. A flip withdrawn before that
//! commit resumes the set-aside sequence with the timer budget it had left.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace, warn};

use super::config::TransitionConfig;
use super::error::{Result, TransitionError};
use super::events::{ControllerInput, EventQueue, StatusEvent};
use super::hooks::{HookContext, HookKind, TransitionHooks};
use super::render::RenderOutput;
use super::status::{Direction, TransitionStatus};
use super::timer::{TimerHandle, TimerQueue};

/// A presence flip waiting for the next commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub direction: Direction,
    /// The appear-on-mount enter.
    pub appearing: bool,
}

/// Follow-up work of the running sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Phase status is committed: run the active hook and arm the phase.
    PhaseActive(Direction),
    /// Phase budget is spent: move to the settled status.
    Settle(Direction),
    /// Settled status is committed: run the settle hook.
    Settled(Direction),
}

/// Remainder of a sequence interrupted by a flip that is not committed yet.
#[derive(Debug)]
struct SuspendedSequence {
    timer_remaining_ms: Option<f64>,
    awaiting_end: bool,
    after_commit: VecDeque<Step>,
    next_turn: VecDeque<Step>,
}

/// Drives one element through its presence lifecycle.
pub struct TransitionController<E> {
    config: TransitionConfig,
    status: TransitionStatus,
    next_status: Option<PendingTransition>,
    /// Whether the running enter sequence is the appear one.
    appearing: bool,
    hooks: TransitionHooks<E>,
    element: E,
    timers: TimerQueue,
    active_timer: Option<TimerHandle>,
    /// The phase is armed and will settle on its timer or an end signal.
    awaiting_end: bool,
    /// Runs on the next commit.
    after_commit: VecDeque<Step>,
    /// Runs on the next turn of any kind.
    next_turn: VecDeque<Step>,
    suspended: Option<SuspendedSequence>,
    inputs: VecDeque<ControllerInput>,
    events: EventQueue,
    torn_down: bool,
}

impl<E> TransitionController<E> {
    /// Create a controller for `element`.
    ///
    /// The initial status follows `(present, appear)`. An appearing element
    /// starts `Exited` with an enter pending for the first commit.
    pub fn new(config: TransitionConfig, element: E, hooks: TransitionHooks<E>) -> Self {
        let status =
            TransitionStatus::initial(config.present, config.appear, config.mount_on_demand);
        let next_status = (config.present && config.appear).then_some(PendingTransition {
            direction: Direction::In,
            appearing: true,
        });
        debug!(%status, appear = config.appear, "transition controller created");

        Self {
            config,
            status,
            next_status,
            appearing: false,
            hooks,
            element,
            timers: TimerQueue::new(),
            active_timer: None,
            awaiting_end: false,
            after_commit: VecDeque::new(),
            next_turn: VecDeque::new(),
            suspended: None,
            inputs: VecDeque::new(),
            events: EventQueue::new(),
            torn_down: false,
        }
    }

    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    /// Phase the next commit will start, if a flip is pending.
    pub fn next_status(&self) -> Option<TransitionStatus> {
        self.next_status.map(|pending| pending.direction.phase())
    }

    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.next_status
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Replace the lifecycle hooks. Takes effect from the next dispatch.
    pub fn set_hooks(&mut self, hooks: TransitionHooks<E>) {
        self.hooks = hooks;
    }

    pub fn has_active_timer(&self) -> bool {
        self.active_timer.is_some()
    }

    /// True while an armed phase waits for its timer or an end signal.
    pub fn is_awaiting_end(&self) -> bool {
        self.awaiting_end
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Host clock reading in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.timers.now_ms()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = StatusEvent> + '_ {
        self.events.drain()
    }

    /// Describe what the host should render right now.
    pub fn render(&self) -> RenderOutput {
        RenderOutput::new(self.status, &self.config)
    }

    /// Accept a new configuration and return the render to commit.
    pub fn update(&mut self, config: TransitionConfig) -> Result<RenderOutput> {
        self.ensure_live()?;
        self.config = config;
        self.run(ControllerInput::PresenceChanged)?;
        Ok(self.render())
    }

    /// Report that the last render has been committed.
    ///
    /// Returns `true` when the host must render and commit again.
    pub fn commit(&mut self) -> Result<bool> {
        self.ensure_live()?;
        self.run(ControllerInput::Committed)
    }

    /// Move the host clock forward by `delta_ms`, firing due phase timers.
    ///
    /// Returns `true` when the host must render and commit again.
    pub fn advance(&mut self, delta_ms: f32) -> Result<bool> {
        self.ensure_live()?;
        self.run(ControllerInput::Elapsed(delta_ms))
    }

    /// Settle the armed phase now, ahead of (or instead of) its timer.
    ///
    /// Ignored when no phase is armed.
    pub fn signal_end(&mut self) -> Result<bool> {
        self.ensure_live()?;
        self.run(ControllerInput::EndSignaled)
    }

    /// Cancel pending timers and work. No hook runs after this.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.inputs.clear();
        self.inputs.push_back(ControllerInput::Teardown);
        while let Some(input) = self.inputs.pop_front() {
            if let Err(err) = self.handle(input) {
                warn!(error = %err, "input dropped during teardown");
            }
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.torn_down {
            return Err(TransitionError::TornDown);
        }
        Ok(())
    }

    fn run(&mut self, input: ControllerInput) -> Result<bool> {
        self.inputs.push_back(input);
        let mut changed = false;
        while let Some(input) = self.inputs.pop_front() {
            match self.handle(input) {
                Ok(c) => changed |= c,
                Err(err) => {
                    self.inputs.clear();
                    return Err(err);
                }
            }
        }
        Ok(changed || !self.next_turn.is_empty())
    }

    fn handle(&mut self, input: ControllerInput) -> Result<bool> {
        match input {
            ControllerInput::PresenceChanged => Ok(self.on_presence_changed()),
            ControllerInput::Committed => self.on_committed(),
            ControllerInput::Elapsed(delta_ms) => self.on_elapsed(delta_ms),
            ControllerInput::TimerFired(handle) => self.on_timer_fired(handle),
            ControllerInput::EndSignaled => self.on_end_signaled(),
            ControllerInput::Teardown => {
                self.on_teardown();
                Ok(false)
            }
        }
    }

    fn on_presence_changed(&mut self) -> bool {
        let present = self.config.present;
        let mut changed = false;

        if present && self.status == TransitionStatus::Unmounted {
            self.set_status(TransitionStatus::Exited);
            changed = true;
        }

        let wanted = match (present, self.status.direction()) {
            (true, Direction::Out) => Some(Direction::In),
            (false, Direction::In) => Some(Direction::Out),
            _ => None,
        };

        match wanted {
            Some(direction)
                if self.next_status.map(|pending| pending.direction) == Some(direction) => {}
            Some(direction) => self.request(direction),
            None => {
                if let Some(pending) = self.next_status.take() {
                    debug!(direction = ?pending.direction, "pending transition withdrawn");
                    self.resume();
                }
            }
        }

        changed
    }

    /// Stop the running sequence and queue a new one for the next commit.
    fn request(&mut self, direction: Direction) {
        let mut timer_remaining_ms = None;
        if let Some(handle) = self.active_timer.take() {
            timer_remaining_ms = self.timers.remaining_ms(handle);
            self.timers.cancel(handle);
        }
        self.suspended = Some(SuspendedSequence {
            timer_remaining_ms,
            awaiting_end: std::mem::take(&mut self.awaiting_end),
            after_commit: std::mem::take(&mut self.after_commit),
            next_turn: std::mem::take(&mut self.next_turn),
        });

        debug!(?direction, status = %self.status, "transition requested");
        self.next_status = Some(PendingTransition {
            direction,
            appearing: false,
        });
    }

    /// Pick the interrupted sequence back up after its flip was withdrawn.
    fn resume(&mut self) {
        let Some(suspended) = self.suspended.take() else {
            return;
        };
        self.awaiting_end = suspended.awaiting_end;
        self.after_commit = suspended.after_commit;
        self.next_turn = suspended.next_turn;
        if let Some(ms) = suspended.timer_remaining_ms {
            self.active_timer = Some(self.timers.schedule(ms));
        }
        debug!(
            status = %self.status,
            remaining_ms = ?suspended.timer_remaining_ms,
            "sequence resumed"
        );
    }

    fn on_committed(&mut self) -> Result<bool> {
        let carried = std::mem::take(&mut self.next_turn);
        let committed = std::mem::take(&mut self.after_commit);
        let mut changed = false;

        for step in committed {
            changed |= self.run_step(step)?;
        }
        if let Some(pending) = self.next_status.take() {
            changed |= self.begin(pending)?;
        }
        for step in carried {
            changed |= self.run_step(step)?;
        }

        Ok(changed)
    }

    fn on_elapsed(&mut self, delta_ms: f32) -> Result<bool> {
        let carried = std::mem::take(&mut self.next_turn);
        let mut changed = false;
        for step in carried {
            changed |= self.run_step(step)?;
        }

        for handle in self.timers.advance(f64::from(delta_ms)) {
            self.inputs.push_back(ControllerInput::TimerFired(handle));
        }
        Ok(changed)
    }

    fn on_timer_fired(&mut self, handle: TimerHandle) -> Result<bool> {
        if self.active_timer != Some(handle) {
            warn!(timer = handle.0, "stale phase timer ignored");
            return Ok(false);
        }
        self.active_timer = None;

        match self.status.phase_direction() {
            Some(direction) => self.run_step(Step::Settle(direction)),
            None => {
                warn!(status = %self.status, "phase timer fired outside a phase");
                Ok(false)
            }
        }
    }

    fn on_end_signaled(&mut self) -> Result<bool> {
        let direction = match self.status.phase_direction() {
            Some(direction) if self.awaiting_end => direction,
            _ => {
                trace!(status = %self.status, "end signal ignored, no armed phase");
                return Ok(false);
            }
        };

        if let Some(handle) = self.active_timer.take() {
            self.timers.cancel(handle);
        }
        self.run_step(Step::Settle(direction))
    }

    fn on_teardown(&mut self) {
        self.timers.clear();
        self.active_timer = None;
        self.awaiting_end = false;
        self.next_status = None;
        self.after_commit.clear();
        self.next_turn.clear();
        self.suspended = None;
        self.hooks = TransitionHooks::default();
        self.torn_down = true;
        debug!(status = %self.status, "transition controller torn down");
    }

    /// Start the pending phase. The start hook runs while the previous status
    /// is still on screen. If it fails, the interrupted sequence carries on.
    fn begin(&mut self, pending: PendingTransition) -> Result<bool> {
        let direction = pending.direction;
        let previous_appearing = std::mem::replace(&mut self.appearing, pending.appearing);

        let enabled = match direction {
            Direction::In => self.config.enter || pending.appearing,
            Direction::Out => self.config.exit,
        };
        if enabled {
            if let Err(err) = self.dispatch(HookKind::start(direction)) {
                self.appearing = previous_appearing;
                self.resume();
                return Err(err);
            }
        }

        if self.suspended.take().is_some() && self.status.is_phase() {
            debug!(status = %self.status, "in-flight phase aborted");
            self.events.push(StatusEvent::PhaseAborted {
                status: self.status,
            });
        }

        if !enabled {
            debug!(?direction, "phase disabled, settling immediately");
            self.set_status(direction.settled());
            self.after_commit.push_back(Step::Settled(direction));
            return Ok(true);
        }

        self.set_status(direction.phase());
        self.after_commit.push_back(Step::PhaseActive(direction));
        Ok(true)
    }

    fn run_step(&mut self, step: Step) -> Result<bool> {
        match step {
            Step::PhaseActive(direction) => {
                // armed first so a failing hook cannot strand the phase
                self.arm(direction);
                self.dispatch(HookKind::active(direction))?;
                Ok(false)
            }
            Step::Settle(direction) => {
                if self.status != direction.phase() {
                    trace!(status = %self.status, "stale settle ignored");
                    return Ok(false);
                }
                self.awaiting_end = false;
                self.set_status(direction.settled());
                self.after_commit.push_back(Step::Settled(direction));
                Ok(true)
            }
            Step::Settled(direction) => {
                self.dispatch(HookKind::settle(direction))?;
                if direction == Direction::Out && self.config.mount_on_demand {
                    self.set_status(TransitionStatus::Unmounted);
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    fn arm(&mut self, direction: Direction) {
        self.awaiting_end = true;
        match self.config.timeouts.for_phase(direction, self.appearing) {
            Some(ms) if ms > 0.0 => {
                self.active_timer = Some(self.timers.schedule(f64::from(ms)));
            }
            Some(_) => {
                trace!(?direction, "zero timeout, settling next turn");
                self.next_turn.push_back(Step::Settle(direction));
            }
            None => trace!(?direction, "no timeout, awaiting end signal"),
        }
    }

    fn dispatch(&mut self, kind: HookKind) -> Result<()> {
        let ctx = HookContext {
            kind,
            appearing: self.appearing && kind.direction() == Direction::In,
        };
        self.hooks.dispatch(&self.element, ctx)?;
        Ok(())
    }

    fn set_status(&mut self, status: TransitionStatus) {
        let from = self.status;
        if from == status {
            return;
        }
        self.status = status;
        debug!(%from, to = %status, "transition status changed");
        self.events
            .push(StatusEvent::StatusChanged { from, to: status });

        if from == TransitionStatus::Unmounted {
            self.events.push(StatusEvent::Mounted);
        } else if status == TransitionStatus::Unmounted {
            self.events.push(StatusEvent::Unmounted);
        }
    }
}

impl<E> Drop for TransitionController<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<E> fmt::Debug for TransitionController<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionController")
            .field("status", &self.status)
            .field("next_status", &self.next_status)
            .field("active_timer", &self.active_timer)
            .field("awaiting_end", &self.awaiting_end)
            .field("suspended", &self.suspended.is_some())
            .field("hooks", &self.hooks)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
