//! On-disk preference record.

use crate::app::ThemeMode;
use crate::domain::Identity;
use serde::{Deserialize, Serialize};

/// Current version of [`PreferencesFile`].
pub const PREFERENCES_VERSION: u32 = 1;

/// Top-level JSON document of the preference file.
///
/// ```json
/// {
///   "version": 1,
///   "licensee_name": "Acme Corp",
///   "assignee_name": "Jane Doe",
///   "theme": "light"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesFile {
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensee_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
}

impl Default for PreferencesFile {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            licensee_name: None,
            assignee_name: None,
            theme: None,
        }
    }
}

impl PreferencesFile {
    /// Stored identity. A half-written record counts as absent.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match (&self.licensee_name, &self.assignee_name) {
            (Some(licensee), Some(assignee)) => {
                let identity = Identity::new(licensee.as_str(), assignee.as_str());
                identity.is_complete().then_some(identity)
            }
            _ => None,
        }
    }

    pub fn set_identity(&mut self, identity: Option<&Identity>) {
        self.licensee_name = identity.map(|i| i.licensee_name.clone());
        self.assignee_name = identity.map(|i| i.assignee_name.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_identity_is_absent() {
        let record = PreferencesFile {
            licensee_name: Some("Acme".to_string()),
            ..PreferencesFile::default()
        };
        assert_eq!(record.identity(), None);
    }

    #[test]
    fn old_file_without_theme_parses() {
        let record: PreferencesFile =
            serde_json::from_str(r#"{"version":1,"licensee_name":"Acme","assignee_name":"Jane"}"#).unwrap();
        assert_eq!(record.identity(), Some(Identity::new("Acme", "Jane")));
        assert_eq!(record.theme, None);
    }
}
