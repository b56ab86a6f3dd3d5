//! Catalog loading.
//!
//! - [`source`]: the [`CatalogSource`] seam the store fetches through
//! - [`store`]: session cache with joined concurrent loads

pub mod source;
pub mod store;

pub use source::CatalogSource;
pub use store::CatalogStore;
