//! Presence transitions for the rune UI runtime.
//!
//! A caller declares whether an element should be present; the
//! [`TransitionController`] derives the sequence of visual states needed to
//! animate it in and out:
//!
//! ```text
//! Unmounted ─▶ Exited ─▶ Entering ─▶ Entered ─▶ Exiting ─▶ Exited ─▶ Unmounted
//!                 ▲  (present = true)                (present = false)    │
//!                 └──────────────────── mount on demand ─────────────────┘
//! ```
//!
//! # Architecture
//!
//! ```text
//! TransitionController
//!   ├── TimerQueue        (one-shot phase timers on a host-driven clock)
//!   ├── TransitionClassNames (status → class attribute)
//!   ├── TransitionHooks   (onEnter … onExited dispatch)
//!   ├── EventQueue        (status notifications for the host)
//!   └── render::is_mounted (mount gate)
//! ```
//!
//! The controller never touches the element itself. The host applies the
//! [`RenderOutput`] it returns, then reports the commit back so phase work
//! only ever observes settled attributes. [`headless::HeadlessHost`] is a
//! complete host loop used by tests and the demo binary.

pub mod classes;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod headless;
pub mod hooks;
pub mod render;
pub mod status;
pub mod timer;

pub use classes::TransitionClassNames;
pub use config::{TransitionConfig, TransitionTimeouts};
pub use controller::{PendingTransition, TransitionController};
pub use error::{Result, TransitionError};
pub use events::{EventQueue, StatusEvent};
pub use headless::{HeadlessElement, HeadlessHost};
pub use hooks::{Hook, HookContext, HookKind, TransitionHooks};
pub use render::{RenderOutput, is_mounted};
pub use status::{Direction, TransitionStatus};
pub use timer::{TimerHandle, TimerQueue};
