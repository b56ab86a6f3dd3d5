//! JSON file-based preference storage.
//!
//! The whole record is kept in memory and rewritten on every change with an
//! atomic write (write-to-temp + rename), so a crash never leaves a
//! truncated file behind.

use crate::app::ThemeMode;
use crate::domain::error::{CatalogError, Result};
use crate::domain::Identity;
use crate::storage::backend::PreferenceStore;
use crate::storage::models::PreferencesFile;
use std::path::{Path, PathBuf};

/// File name used inside the data directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Extension given to an unparsable preference file when it is moved aside.
const CORRUPT_EXTENSION: &str = "json.corrupt";

/// JSON file preference backend.
///
/// `Send` but not `Sync`; owned by the runtime task.
pub struct JsonStorage {
    file_path: PathBuf,
    data: PreferencesFile,
}

impl JsonStorage {
    /// Opens the preference file, starting empty if it does not exist yet.
    /// Parent directories are created.
    ///
    /// A file that cannot be parsed is renamed to `preferences.json.corrupt`
    /// and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but cannot be read or moved aside.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            match Self::load_from_file(&file_path) {
                Ok(data) => data,
                Err(CatalogError::Storage(reason)) => {
                    let aside = file_path.with_extension(CORRUPT_EXTENSION);
                    tracing::warn!(path = ?file_path, moved_to = ?aside, %reason, "unreadable preference file, starting empty");
                    std::fs::rename(&file_path, &aside)?;
                    PreferencesFile::default()
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("no preference file yet, starting empty");
            PreferencesFile::default()
        };

        Ok(Self { file_path, data })
    }

    /// Opens `preferences.json` inside `dir`.
    ///
    /// # Errors
    ///
    /// See [`JsonStorage::new`].
    pub fn in_dir(dir: &Path) -> Result<Self> {
        Self::new(dir.join(PREFERENCES_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<PreferencesFile> {
        let contents = std::fs::read_to_string(path)?;
        let data: PreferencesFile = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            has_identity = data.identity().is_some(),
            theme = ?data.theme,
            "loaded preferences"
        );
        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving preferences");

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| CatalogError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

impl PreferenceStore for JsonStorage {
    fn identity(&self) -> Result<Option<Identity>> {
        Ok(self.data.identity())
    }

    fn save_identity(&mut self, identity: &Identity) -> Result<()> {
        let _span = tracing::debug_span!("json_save_identity").entered();
        if !identity.is_complete() {
            return Err(CatalogError::Validation(
                "licensee and assignee names are both required".to_string(),
            ));
        }
        if self.data.identity().as_ref() == Some(identity) {
            tracing::trace!("identity unchanged, skipping write");
            return Ok(());
        }
        self.data.set_identity(Some(identity));
        self.save_to_file()
    }

    fn clear_identity(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_identity").entered();
        if self.data.licensee_name.is_none() && self.data.assignee_name.is_none() {
            tracing::trace!("no identity stored, skipping write");
            return Ok(());
        }
        self.data.set_identity(None);
        self.save_to_file()
    }

    fn theme(&self) -> Result<Option<ThemeMode>> {
        Ok(self.data.theme)
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<()> {
        let _span = tracing::debug_span!("json_save_theme", theme = %mode).entered();
        if self.data.theme == Some(mode) {
            tracing::trace!("theme unchanged, skipping write");
            return Ok(());
        }
        self.data.theme = Some(mode);
        self.save_to_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::in_dir(&dir.path().join("nested")).unwrap();
        assert_eq!(storage.identity().unwrap(), None);
        assert_eq!(storage.theme().unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn incomplete_identity_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::in_dir(dir.path()).unwrap();
        let err = storage.save_identity(&Identity::new("Acme", "  ")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(!storage.path().exists());
    }

    #[test]
    fn corrupt_file_is_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        std::fs::write(&path, "{not json").unwrap();

        let storage = JsonStorage::in_dir(dir.path()).unwrap();
        assert_eq!(storage.identity().unwrap(), None);
        assert!(!path.exists());
        assert_eq!(
            std::fs::read_to_string(path.with_extension(CORRUPT_EXTENSION)).unwrap(),
            "{not json"
        );
    }

    #[test]
    fn unchanged_identity_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::in_dir(dir.path()).unwrap();
        let identity = Identity::new("Acme", "Jane");
        storage.save_identity(&identity).unwrap();

        std::fs::remove_file(storage.path()).unwrap();
        storage.save_identity(&identity).unwrap();
        assert!(!storage.path().exists());

        storage.save_identity(&Identity::new("Acme", "Joe")).unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn no_temp_file_left_after_save() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::in_dir(dir.path()).unwrap();
        storage.save_theme(ThemeMode::Light).unwrap();
        assert!(storage.path().exists());
        assert!(!storage.path().with_extension("tmp").exists());
    }
}
