//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the runtime (input, worker, timers) and the
//! domain types. It never performs I/O.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Overlay and theme mode types
//! - [`orchestrator`]: Generation request lifecycle
//! - [`ranking`]: Incremental search ranking
//! - [`router`]: Navigation signal resolution
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod orchestrator;
pub mod ranking;
pub mod router;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Overlay, ThemeMode};
pub use orchestrator::{GenerationTicket, RequestOrchestrator, RequestState, SubmitRejection};
pub use router::ViewRouter;
pub use state::{AppState, Notification, NotificationKind};
