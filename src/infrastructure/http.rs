//! HTTP adapters for the catalog and generation services.
//!
//! Both services live under one base URL:
//!
//! - `GET {base}/api/products`, `GET {base}/api/plugins`: JSON array of items
//! - `GET {base}{generate_path}?productCode=..&licenseeName=..&assigneeName=..&expiryDate=..`:
//!   opaque text payload, returned exactly as received
//!
//! Non-success statuses are failures. No timeouts or retries are imposed
//! here.

use crate::catalog::CatalogSource;
use crate::domain::{CatalogError, Category, GenerationRequest, Item, Result};
use async_trait::async_trait;
use url::Url;

/// Longest service error body echoed into an error message.
const MAX_ERROR_BODY: usize = 200;

/// Turns a generation request into a payload.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    generate_path: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, generate_path: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("catalog-browser/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url,
            generate_path: generate_path.into(),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any path prefix the base has.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl CatalogSource for HttpBackend {
    async fn fetch(&self, category: Category) -> Result<Vec<Item>> {
        let url = self.endpoint(category.path());
        tracing::debug!(%category, url = %url, "fetching catalog");

        let items: Vec<Item> = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(%category, count = items.len(), "catalog received");
        Ok(items)
    }
}

#[async_trait]
impl GenerationService for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = self.endpoint(&self.generate_path);
        tracing::debug!(url = %url, item_code = ?request.item_code, "requesting generation");

        let response = self
            .client
            .get(&url)
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
            return Err(CatalogError::Generation(if detail.is_empty() {
                format!("service returned {status}")
            } else {
                format!("service returned {status}: {detail}")
            }));
        }

        if body.trim().is_empty() {
            return Err(CatalogError::Generation("service returned an empty payload".to_string()));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = Url::parse("http://localhost:10768/catalog/").unwrap();
        let backend = HttpBackend::new(base, "/api/generate").unwrap();
        assert_eq!(
            backend.endpoint(Category::Plugins.path()),
            "http://localhost:10768/catalog/api/plugins"
        );
    }

    #[test]
    fn endpoint_on_bare_host() {
        let base = Url::parse("http://localhost:10768").unwrap();
        let backend = HttpBackend::new(base, "api/generate").unwrap();
        assert_eq!(backend.endpoint("api/generate"), "http://localhost:10768/api/generate");
    }
}
