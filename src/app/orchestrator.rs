//! Generation request lifecycle.
//!
//! The orchestrator owns the item selection, the generation parameters and the
//! single request slot:
//!
//! ```text
//! Idle ──submit──▶ InFlight{ticket} ──resolve──▶ Success(payload)
//!  ▲                     │                              │
//!  │                     └──reject──▶ Failed(reason) ───┤
//!  └────────────── acknowledge / reset ◀────────────────┘
//! ```
//!
//! Tickets increase monotonically. A result whose ticket does not match the
//! current `InFlight` state belongs to an abandoned attempt and is dropped.

use crate::domain::{CatalogError, GenerationParameters, GenerationRequest, Identity, Item, LicenseType, Result};
use chrono::Local;
use std::fmt;

/// Identifies one generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationTicket(pub u64);

impl fmt::Display for GenerationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the single generation request stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing outstanding; a submission may start.
    #[default]
    Idle,
    /// Waiting for the service. Further submissions are refused.
    InFlight {
        /// Only a result carrying this ticket is accepted.
        ticket: GenerationTicket,
    },
    /// Opaque payload returned by the service.
    Success(String),
    /// Reason of the last failure; selection and parameters are kept.
    Failed(String),
}

impl RequestState {
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }
}

/// Why a submission was refused. The state is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// No item has been picked.
    NoSelection,
    /// Licensee or assignee name is blank.
    IncompleteIdentity,
    /// An earlier attempt has not finished.
    AlreadyInFlight,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoSelection => "no item selected",
            Self::IncompleteIdentity => "licensee and assignee names are required",
            Self::AlreadyInFlight => "a request is already in flight",
        })
    }
}

/// Outcome of delivering a result to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The ticket matched and the state moved on.
    Applied,
    /// The ticket belongs to an abandoned attempt; nothing changed.
    Stale,
}

/// Owns the selection, the parameters and the request slot.
#[derive(Debug, Clone, Default)]
pub struct RequestOrchestrator {
    /// Item the next request is for.
    selection: Option<Item>,

    /// Expiry, license type and seat count; reset on every pick.
    parameters: GenerationParameters,

    state: RequestState,

    /// Ticket of the most recent attempt. Zero before the first submit.
    last_ticket: u64,
}

impl RequestOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &RequestState {
        &self.state
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&Item> {
        self.selection.as_ref()
    }

    #[must_use]
    pub const fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// Picks an item and resets the parameters to their defaults.
    ///
    /// A finished attempt is acknowledged. Callers must not select while a
    /// request is in flight.
    pub fn select(&mut self, item: Item) {
        tracing::debug!(item = %item.key(), "item selected");
        self.acknowledge();
        self.selection = Some(item);
        self.parameters = GenerationParameters::default();
    }

    /// Starts a generation attempt.
    ///
    /// Allowed from `Idle` and from `Failed` (retry). Returns the ticket of the
    /// new attempt and the request to send.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitRejection`] without touching any state when nothing
    /// is selected, either identity name is blank, or a request is in flight.
    pub fn submit(&mut self, identity: &Identity) -> std::result::Result<(GenerationTicket, GenerationRequest), SubmitRejection> {
        if self.state.is_in_flight() {
            return Err(SubmitRejection::AlreadyInFlight);
        }
        let Some(item) = self.selection.as_ref() else {
            return Err(SubmitRejection::NoSelection);
        };
        if !identity.is_complete() {
            return Err(SubmitRejection::IncompleteIdentity);
        }

        let request = GenerationRequest::new(item, identity, &self.parameters);
        self.last_ticket += 1;
        let ticket = GenerationTicket(self.last_ticket);
        self.state = RequestState::InFlight { ticket };

        tracing::debug!(%ticket, item = %item.key(), expiry = %request.expiry_date, "generation submitted");

        Ok((ticket, request))
    }

    /// Completes the attempt `ticket` with `payload`.
    ///
    /// On success the selection and parameters are cleared.
    pub fn resolve(&mut self, ticket: GenerationTicket, payload: String) -> Delivery {
        if self.state != (RequestState::InFlight { ticket }) {
            tracing::debug!(%ticket, "stale generation result ignored");
            return Delivery::Stale;
        }
        tracing::debug!(%ticket, payload_len = payload.len(), "generation succeeded");
        self.state = RequestState::Success(payload);
        self.selection = None;
        self.parameters = GenerationParameters::default();
        Delivery::Applied
    }

    /// Fails the attempt `ticket`. Selection and parameters are kept so the
    /// user can retry.
    pub fn reject(&mut self, ticket: GenerationTicket, reason: String) -> Delivery {
        if self.state != (RequestState::InFlight { ticket }) {
            tracing::debug!(%ticket, "stale generation failure ignored");
            return Delivery::Stale;
        }
        tracing::warn!(%ticket, reason = %reason, "generation failed");
        self.state = RequestState::Failed(reason);
        Delivery::Applied
    }

    /// Returns to `Idle` and drops selection and parameters.
    ///
    /// An in-flight call keeps running; its result will carry an outdated
    /// ticket.
    pub fn reset(&mut self) {
        if self.state.is_in_flight() {
            tracing::debug!("abandoning in-flight generation");
        }
        self.state = RequestState::Idle;
        self.selection = None;
        self.parameters = GenerationParameters::default();
    }

    /// `Success`/`Failed` back to `Idle`; selection untouched.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, RequestState::Success(_) | RequestState::Failed(_)) {
            self.state = RequestState::Idle;
        }
    }

    /// Parameter edits below need a selection and no request in flight.
    /// A refused or invalid edit leaves the parameters unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the edit is not allowed or
    /// the value is out of range.
    pub fn set_expiry_in_days(&mut self, days: i64) -> Result<()> {
        self.ensure_editable()?;
        self.parameters.set_expiry_after(Local::now().date_naive(), days)
    }

    pub fn set_expiry_date(&mut self, input: &str) -> Result<()> {
        self.ensure_editable()?;
        self.parameters.set_expiry_date(input)
    }

    pub fn set_license_type(&mut self, license_type: LicenseType) -> Result<()> {
        self.ensure_editable()?;
        self.parameters.license_type = license_type;
        Ok(())
    }

    pub fn set_user_count(&mut self, count: u32) -> Result<()> {
        self.ensure_editable()?;
        self.parameters.set_user_count(count)
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.selection.is_none() {
            return Err(CatalogError::Validation("no item selected".to_string()));
        }
        if self.state.is_in_flight() {
            return Err(CatalogError::Validation("parameters are locked while generating".to_string()));
        }
        Ok(())
    }
}
