//! Icon reference lookup.
//!
//! Products reference icons by class (`icon-datagrip`); plugins carry a full
//! URL. The table maps class names (without the `icon-` prefix) to URLs taken
//! from the `[icons]` configuration section. Unknown names and missing
//! references resolve to the configured placeholder.
//!
//! Relative targets such as `/images/plugin.svg` are joined onto the catalog
//! service base URL.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

const ICON_CLASS_PREFIX: &str = "icon-";

/// `[icons]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Used for unknown or missing icon references.
    pub placeholder: String,
    /// Icon name (without `icon-`) to URL or service-relative path.
    pub mapping: HashMap<String, String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            placeholder: "/images/plugin.svg".to_string(),
            mapping: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IconTable {
    config: IconConfig,
    base: Option<Url>,
}

impl Default for IconTable {
    fn default() -> Self {
        Self::new(IconConfig::default(), None)
    }
}

impl IconTable {
    #[must_use]
    pub const fn new(config: IconConfig, base: Option<Url>) -> Self {
        Self { config, base }
    }

    /// Resolves an item's icon reference to a displayable URL.
    #[must_use]
    pub fn resolve(&self, icon_ref: Option<&str>) -> String {
        let reference = icon_ref.map(str::trim).unwrap_or_default();

        if is_absolute(reference) {
            return reference.to_string();
        }

        let target = reference
            .strip_prefix(ICON_CLASS_PREFIX)
            .and_then(|name| self.config.mapping.get(name))
            .unwrap_or(&self.config.placeholder);

        self.absolutize(target)
    }

    fn absolutize(&self, target: &str) -> String {
        if is_absolute(target) {
            return target.to_string();
        }
        self.base
            .as_ref()
            .and_then(|base| base.join(target).ok())
            .map_or_else(|| target.to_string(), String::from)
    }
}

fn is_absolute(reference: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| reference.starts_with(scheme))
}
