//! Catalog source seam.

use crate::domain::{Category, Item, Result};
use async_trait::async_trait;

/// Delivers the full item list of a category.
///
/// Implemented over HTTP by [`HttpBackend`](crate::infrastructure::HttpBackend);
/// tests plug in in-memory sources.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<Vec<Item>>;
}
