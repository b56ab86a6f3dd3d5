//! Background worker executing catalog loads and generation requests.
//!
//! Every [`WorkerMessage`] is processed on its own tokio task so a slow
//! generation never holds up a catalog load. Each message produces exactly
//! one [`WorkerResponse`], sent back over the channel handed to
//! [`CatalogWorker::new`].

use crate::catalog::CatalogStore;
use crate::infrastructure::GenerationService;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::Instrument;

#[derive(Clone)]
pub struct CatalogWorker {
    store: Arc<CatalogStore>,
    generator: Arc<dyn GenerationService>,
    responses: UnboundedSender<WorkerResponse>,
}

impl CatalogWorker {
    #[must_use]
    pub fn new(
        store: Arc<CatalogStore>,
        generator: Arc<dyn GenerationService>,
        responses: UnboundedSender<WorkerResponse>,
    ) -> Self {
        Self {
            store,
            generator,
            responses,
        }
    }

    /// Processes `message` in the background. Must be called from within a
    /// tokio runtime.
    pub fn dispatch(&self, message: WorkerMessage) {
        let worker = self.clone();
        let span = tracing::debug_span!("worker_handle_message", message_type = message_type(&message));
        tokio::spawn(
            async move {
                let response = worker.handle_message(message).await;
                if worker.responses.send(response).is_err() {
                    tracing::debug!("controller gone, dropping worker response");
                }
            }
            .instrument(span),
        );
    }

    /// Processes one message and returns its response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::FetchCatalog { category, token } => {
                match self.store.ensure_loaded(category).await {
                    Ok(items) => {
                        tracing::debug!(%category, token, count = items.len(), "catalog load complete");
                        WorkerResponse::CatalogLoaded {
                            category,
                            token,
                            items,
                        }
                    }
                    Err(e) => {
                        tracing::debug!(%category, token, error = %e, "catalog load failed");
                        WorkerResponse::CatalogFailed {
                            category,
                            token,
                            message: e.message,
                        }
                    }
                }
            }

            WorkerMessage::Generate { ticket, request } => {
                match self.generator.generate(&request).await {
                    Ok(payload) => {
                        tracing::debug!(%ticket, len = payload.len(), "generation succeeded");
                        WorkerResponse::Generated { ticket, payload }
                    }
                    Err(e) => {
                        tracing::debug!(%ticket, error = %e, "generation failed");
                        WorkerResponse::GenerationFailed {
                            ticket,
                            reason: e.to_string(),
                        }
                    }
                }
            }
        }
    }
}

const fn message_type(message: &WorkerMessage) -> &'static str {
    match message {
        WorkerMessage::FetchCatalog { .. } => "fetch_catalog",
        WorkerMessage::Generate { .. } => "generate",
    }
}
