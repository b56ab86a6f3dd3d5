//! Persistence for user preferences.
//!
//! The catalog itself is never persisted; only the saved identity and the
//! chosen theme survive between sessions.
//!
//! # Modules
//!
//! - `backend`: the [`PreferenceStore`] seam the runtime persists through
//! - `json`: JSON file implementation with atomic writes
//! - `models`: the on-disk record

pub mod backend;
pub mod json;
pub mod models;

pub use backend::PreferenceStore;
pub use json::JsonStorage;
pub use models::PreferencesFile;
