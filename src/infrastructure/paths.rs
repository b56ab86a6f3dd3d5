//! Platform directory resolution.
//!
//! Configuration lives in the platform config directory, preferences and the
//! log file in the platform data directory. Both fall back to relative paths
//! when the platform directory cannot be determined.

use std::path::PathBuf;

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "catalog-browser";

/// Returns `<config dir>/catalog-browser`, e.g. `~/.config/catalog-browser`.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default location of `config.toml`.
#[must_use]
pub fn default_config_file() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Returns `<data dir>/catalog-browser`, e.g. `~/.local/share/catalog-browser`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Expands a leading `~` to the home directory.
///
/// ```
/// use catalog_browser::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        (None, Some(home)) if path == "~" => home,
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_dirs_end_with_app_name() {
        assert!(get_config_dir().ends_with(APP_DIR_NAME));
        assert!(get_data_dir().ends_with(APP_DIR_NAME));
        assert!(default_config_file().ends_with("catalog-browser/config.toml"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/themes/x.toml"), home.join("themes/x.toml"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("themes/x.toml"), PathBuf::from("themes/x.toml"));
    }
}
