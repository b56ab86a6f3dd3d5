//! Catalog item, category and page models.
//!
//! Items arrive from the catalog service as flat JSON records. Products carry a
//! `productCode` and an `iconClass`; plugins carry a numeric `id`, a
//! `productCode` and an `icon` URL. Both shapes decode into [`Item`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single entry of a category's catalog.
///
/// Immutable once fetched. Items are shared between the catalog store and
/// the controller as `Arc<[Item]>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Catalog identifier. Plugins send it as a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    /// Code sent to the generation service.
    #[serde(default, rename = "productCode")]
    pub code: Option<String>,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Icon reference: either an `icon-<name>` class or a URL.
    #[serde(default, rename = "iconRef", alias = "iconClass", alias = "icon")]
    pub icon_ref: Option<String>,
}

impl Item {
    /// Creates an item with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            code: None,
            name: name.into(),
            description: None,
            icon_ref: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = Some(icon_ref.into());
        self
    }

    /// Key that identifies the item within its category: code, then id, then name.
    #[must_use]
    pub fn key(&self) -> &str {
        self.code
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(&self.name)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
        Repr::Text(text) => text,
        Repr::Number(number) => number.to_string(),
    }))
}

/// Closed set of categories that carry a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Products,
    Plugins,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::Products, Self::Plugins];

    /// Path of the catalog endpoint, relative to the service base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "/api/products",
            Self::Plugins => "/api/plugins",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Plugins => "plugins",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation targets. Only catalog pages map to a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Products,
    Plugins,
}

impl Page {
    pub const ALL: [Self; 3] = [Self::Home, Self::Products, Self::Plugins];

    /// Catalog shown on this page, if any.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Home => None,
            Self::Products => Some(Category::Products),
            Self::Plugins => Some(Category::Plugins),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Products => "products",
            Self::Plugins => "plugins",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Products => "Products",
            Self::Plugins => "Plugins",
        }
    }
}

impl From<Category> for Page {
    fn from(category: Category) -> Self {
        match category {
            Category::Products => Self::Products,
            Category::Plugins => Self::Plugins,
        }
    }
}
