//! Overlay and theme mode types.
//!
//! The browser shows one page at a time (see [`Page`](crate::domain::Page))
//! with at most one modal overlay on top of it:
//!
//! - **Identity**: licensee/assignee form, opened at startup when the stored
//!   identity is incomplete
//! - **Parameters**: generation parameters for the selected item
//! - **Result**: payload of a successful generation
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::app::modes::{Overlay, ThemeMode};
//!
//! let overlay = Overlay::Parameters;
//! assert!(overlay.is_open());
//! assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modal overlay currently drawn above the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,

    /// Identity form. Submitting it persists both names.
    Identity,

    /// Parameter form for the selected item, including the loading state
    /// while a request is in flight.
    Parameters,

    /// Generated payload, with copy-to-clipboard.
    Result,
}

impl Overlay {
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Colour scheme choice, persisted with the preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
