//! Request/response protocol between the controller and the background worker.
//!
//! The controller never performs I/O. It emits [`WorkerMessage`]s through
//! `Action::PostToWorker`; the worker answers each one with exactly one
//! [`WorkerResponse`], fed back into the event loop as
//! `Event::WorkerResponse`.
//!
//! Responses echo the correlation data of their request (navigation token for
//! catalog loads, ticket for generations) so the controller can drop results
//! that belong to a view or attempt it has moved away from.

use crate::app::orchestrator::GenerationTicket;
use crate::domain::{Category, GenerationRequest, Item};
use std::sync::Arc;

/// Generates convenience constructors for `WorkerMessage` variants.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant { $($field,)* }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_catalog(FetchCatalog { category: Category, token: u64 }),
    generate(Generate { ticket: GenerationTicket, request: GenerationRequest }),
}

/// Messages sent from the controller to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Make sure `category` is loaded, fetching it if no load is cached or
    /// pending.
    FetchCatalog {
        category: Category,
        /// Navigation token current when the fetch was requested.
        token: u64,
    },

    /// Send a generation request.
    Generate {
        ticket: GenerationTicket,
        request: GenerationRequest,
    },
}

/// Responses sent from the worker back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    CatalogLoaded {
        category: Category,
        token: u64,
        items: Arc<[Item]>,
    },

    CatalogFailed {
        category: Category,
        token: u64,
        message: String,
    },

    Generated {
        ticket: GenerationTicket,
        payload: String,
    },

    GenerationFailed {
        ticket: GenerationTicket,
        reason: String,
    },
}
