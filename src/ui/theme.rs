//! Theme management and ANSI escape sequence generation.
//!
//! Two palettes are built in, one per [`ThemeMode`]. A custom palette can be
//! loaded from a TOML file; it replaces the built-in palette of the mode it
//! declares, so toggling still switches between a dark and a light scheme.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//! mode = "dark"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! accent = "#89b4fa"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! ```

use crate::app::modes::ThemeMode;
use crate::domain::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

/// Color definitions as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active tab and overlay titles.
    pub accent: String,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub success_fg: String,
    pub error_fg: String,
}

impl Theme {
    /// Dark built-in palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            mode: ThemeMode::Dark,
            colors: ThemeColors {
                header_fg: "#cdd6f4".to_string(),
                header_bg: None,
                accent: "#89b4fa".to_string(),
                selection_fg: "#1e1e2e".to_string(),
                selection_bg: "#f5c2e7".to_string(),
                text_normal: "#cdd6f4".to_string(),
                text_dim: "#6c7086".to_string(),
                border: "#45475a".to_string(),
                search_bar_border: "#f5c2e7".to_string(),
                match_highlight_fg: "#1e1e2e".to_string(),
                match_highlight_bg: "#f9e2af".to_string(),
                empty_state_fg: "#89b4fa".to_string(),
                success_fg: "#a6e3a1".to_string(),
                error_fg: "#f38ba8".to_string(),
            },
        }
    }

    /// Light built-in palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            mode: ThemeMode::Light,
            colors: ThemeColors {
                header_fg: "#4c4f69".to_string(),
                header_bg: None,
                accent: "#1e66f5".to_string(),
                selection_fg: "#eff1f5".to_string(),
                selection_bg: "#8839ef".to_string(),
                text_normal: "#4c4f69".to_string(),
                text_dim: "#9ca0b0".to_string(),
                border: "#bcc0cc".to_string(),
                search_bar_border: "#8839ef".to_string(),
                match_highlight_fg: "#eff1f5".to_string(),
                match_highlight_bg: "#df8e1d".to_string(),
                empty_state_fg: "#1e66f5".to_string(),
                success_fg: "#40a02b".to_string(),
                error_fg: "#d20f39".to_string(),
            },
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| CatalogError::Config(format!("failed to parse theme {}: {e}", path.display())))
    }

    /// Strips `#`, validates length and parses hex digits. Falls back to
    /// white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// One palette per mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    dark: Theme,
    light: Theme,
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            dark: Theme::dark(),
            light: Theme::light(),
        }
    }
}

impl ThemeSet {
    /// Built-in palettes, with `custom` replacing the one of its mode.
    #[must_use]
    pub fn with_custom(custom: Option<Theme>) -> Self {
        let mut set = Self::default();
        if let Some(theme) = custom {
            tracing::debug!(name = %theme.name, mode = %theme.mode, "using custom theme");
            match theme.mode {
                ThemeMode::Dark => set.dark = theme,
                ThemeMode::Light => set.light = theme,
            }
        }
        set
    }

    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }
}
