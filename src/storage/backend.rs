//! Preference storage abstraction.
//!
//! Each method maps to one thing the controller persists. Absent values are
//! `Ok(None)`, never errors.

use crate::app::ThemeMode;
use crate::domain::{Identity, Result};

/// Abstraction over the preference backend.
///
/// # Examples
///
/// ```no_run
/// use catalog_browser::storage::{JsonStorage, PreferenceStore};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/preferences.json"))?;
/// let identity = storage.identity()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait PreferenceStore: Send {
    /// The saved identity, if both names were stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn identity(&self) -> Result<Option<Identity>>;

    /// Persists `identity`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_identity(&mut self, identity: &Identity) -> Result<()>;

    /// Removes the saved identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear_identity(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn theme(&self) -> Result<Option<ThemeMode>>;

    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_theme(&mut self, mode: ThemeMode) -> Result<()>;
}
