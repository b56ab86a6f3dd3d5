//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) only mutates [`AppState`](crate::app::AppState).
//! Everything that touches the outside world (network, disk, clipboard,
//! timers) is returned as an [`Action`] and executed by the runtime in order.
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::app::Action;
//! use catalog_browser::domain::Category;
//! use catalog_browser::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::fetch_catalog(Category::Plugins, 1)),
//! ];
//! ```

use crate::app::modes::ThemeMode;
use crate::domain::Identity;
use crate::worker::WorkerMessage;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a network job to the background worker.
    PostToWorker(WorkerMessage),

    /// Arms the auto-dismiss timer of notification `id`, replacing any
    /// pending one.
    ScheduleDismiss {
        id: u64,
        after: Duration,
    },

    /// Copies text to the clipboard. The runtime reports the outcome back as
    /// `Event::ClipboardResult`.
    CopyToClipboard(String),

    /// Persists both identity names.
    SaveIdentity(Identity),

    /// Wipes the stored identity.
    ClearIdentity,

    /// Persists the theme choice.
    SaveTheme(ThemeMode),

    /// Ends the event loop.
    Quit,
}
