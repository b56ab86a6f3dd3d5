//! Background worker for network operations.
//!
//! - `messages`: request/response protocol with correlation tokens
//! - `handler`: [`CatalogWorker`], which runs each message on a tokio task

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{WorkerMessage, WorkerResponse};
