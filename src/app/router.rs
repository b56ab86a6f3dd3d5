//! Navigation signal resolution.
//!
//! The router turns an external navigation signal (a location fragment such
//! as `#plugins`) into a [`Page`]. Unknown or malformed signals silently fall
//! back to [`Page::Home`].

use crate::domain::{Category, Page};

/// Tracks the last resolved page and reports changes.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    current: Page,
}

impl ViewRouter {
    #[must_use]
    pub const fn new(initial: Page) -> Self {
        Self { current: initial }
    }

    /// Resolves a navigation signal to a page. Never fails.
    #[must_use]
    pub fn resolve(signal: &str) -> Page {
        let fragment = signal
            .trim()
            .trim_start_matches('#')
            .trim_start_matches('/')
            .trim()
            .to_ascii_lowercase();

        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == fragment)
            .unwrap_or_default()
    }

    /// Applies a signal, returning the new page only if it differs from the
    /// previous resolution.
    pub fn navigate(&mut self, signal: &str) -> Option<Page> {
        let page = Self::resolve(signal);
        if page == self.current {
            tracing::trace!(page = page.as_str(), "navigation resolved to current page");
            return None;
        }
        tracing::debug!(from = self.current.as_str(), to = page.as_str(), "page changed");
        self.current = page;
        Some(page)
    }

    #[must_use]
    pub const fn current(&self) -> Page {
        self.current
    }

    #[must_use]
    pub const fn active_category(&self) -> Option<Category> {
        self.current.category()
    }
}
