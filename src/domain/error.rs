//! Error types for the catalog browser.
//!
//! This module defines the centralized error type [`CatalogError`], the
//! cloneable [`FetchError`] shared between joined catalog loads, and a
//! [`Result`] alias used throughout the crate. All errors are implemented
//! with the `thiserror` crate.

use crate::domain::Category;
use thiserror::Error;

/// The main error type for catalog browser operations.
///
/// None of these conditions is fatal: the controller turns each of them into
/// a transient notification or a silent refusal and the user may retry.
///
/// # Examples
///
/// ```
/// use catalog_browser::domain::CatalogError;
///
/// fn read_preferences() -> Result<(), CatalogError> {
///     Err(CatalogError::Storage("Failed to read file".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Preference storage failed to read, parse or write its file.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure talking to the catalog or generation service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A catalog could not be loaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The generation service rejected or failed the request.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Neither the system clipboard nor the terminal fallback accepted the text.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// User-supplied input failed validation (dates, counts, names).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The background worker could not deliver a response.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Failure to load one category's catalog.
///
/// Cloneable so every caller joined on the same pending fetch receives the
/// same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {category} catalog: {message}")]
pub struct FetchError {
    /// Category whose fetch failed.
    pub category: Category,
    /// Human-readable cause.
    pub message: String,
}

impl FetchError {
    #[must_use]
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for catalog browser operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
