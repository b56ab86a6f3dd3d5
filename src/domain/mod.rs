//! Domain layer for the catalog browser.
//!
//! Core types independent of transport, storage and rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Catalog items, categories and navigation pages
//! - [`generation`]: Identity, generation parameters and the outgoing request

pub mod error;
pub mod generation;
pub mod item;

pub use error::{CatalogError, FetchError, Result};
pub use generation::{GenerationParameters, GenerationRequest, Identity, LicenseType};
pub use item::{Category, Item, Page};
