//! Incinerator panel presenter.
//!
//! Everything between the contract facades and the screen:
//! - [`CountdownReconciler`]: smooth local countdown anchored to chain readings
//! - [`ActionState`] / [`ActionSlot`]: the five burn-button states under
//!   wallet and network gating
//! - [`Panel`]: composed view state plus the incinerate and switch-network flows
//! - [`BurnLog`] / [`BurnLogFeed`]: the recent-burns list and its live feed
//! - [`ScopedInterval`]: periodic tasks cancelled on drop
//! - [`Dashboard`]: wires all refresh timers around shared view state
//!
//! The whole crate assumes a single-threaded executor: shared state is
//! `Rc<RefCell<_>>` and tasks are spawned with `spawn_local`.

pub mod action;
pub mod burn_log;
pub mod config;
pub mod countdown;
pub mod dashboard;
pub mod error;
pub mod notify;
pub mod panel;
pub mod snapshot;
pub mod timer;
pub mod view;

pub use action::{ActionSlot, ActionState, WalletStatus};
pub use burn_log::{BurnLog, BurnLogFeed, BURN_LOG_LIMIT};
pub use config::PanelConfig;
pub use countdown::{CountdownReconciler, RESYNC_TOLERANCE_MS};
pub use dashboard::Dashboard;
pub use error::PanelError;
pub use notify::{BurnFailure, Notification, NotificationLevel};
pub use panel::Panel;
pub use snapshot::ContractSnapshot;
pub use timer::ScopedInterval;
pub use view::{BurnLogView, PanelView};
