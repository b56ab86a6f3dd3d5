//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. It returns
//! whether the screen needs redrawing together with the side effects to run.
//!
//! # Event Types
//!
//! - **Navigation**: `Navigate`, `ReloadCatalog`
//! - **Search**: `QueryChanged`, `ClearQuery`
//! - **Selection & parameters**: `SelectItem`, `SetExpiryInDays`,
//!   `SetExpiryDate`, `SetLicenseType`, `SetUserCount`
//! - **Generation**: `Submit`, `DismissOverlay`, `CopyResult`,
//!   `ClipboardResult`
//! - **Preferences**: `EditIdentity`, `SaveIdentity`, `ClearIdentity`,
//!   `ToggleTheme`
//! - **System**: `WorkerResponse`, `NotificationExpired`, `Quit`
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::app::{handle_event, Action, AppState, Event};
//! use catalog_browser::app::modes::ThemeMode;
//! use catalog_browser::domain::{Category, Identity};
//! use catalog_browser::worker::WorkerMessage;
//!
//! let mut state = AppState::new(Identity::new("Acme", "Dev"), ThemeMode::Dark);
//! let (redraw, actions) = handle_event(&mut state, &Event::Navigate("#plugins".into()))?;
//! assert!(redraw);
//! assert_eq!(actions, vec![Action::PostToWorker(WorkerMessage::fetch_catalog(Category::Plugins, 1))]);
//! # Ok::<(), catalog_browser::domain::CatalogError>(())
//! ```

use super::modes::Overlay;
use super::orchestrator::{Delivery, RequestState};
use super::state::NotificationKind;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Identity, LicenseType};
use crate::worker::{WorkerMessage, WorkerResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// External navigation signal, e.g. `#plugins`.
    Navigate(String),

    /// Re-requests the active catalog after a failed load.
    ReloadCatalog,

    /// Replaces the search text.
    QueryChanged(String),

    /// Empties the search text; the full catalog is shown in fetch order.
    ClearQuery,

    /// Picks the item at this 0-based index of the ranked list.
    SelectItem(usize),

    /// Quick-pick: expiry this many days from today. Must be positive.
    SetExpiryInDays(i64),

    /// Direct expiry edit as typed; parsed as `YYYY-MM-DD`.
    SetExpiryDate(String),

    SetLicenseType(LicenseType),

    /// Seat count; zero is refused.
    SetUserCount(u32),

    /// Starts generation for the selected item.
    Submit,

    /// Closes the open overlay.
    DismissOverlay,

    /// Copies the generated payload.
    CopyResult,

    /// Outcome of a clipboard write, reported by the runtime.
    ClipboardResult(std::result::Result<(), String>),

    /// Opens the identity form.
    EditIdentity,

    /// Stores both names and closes the identity form. Blank names are
    /// refused with an error notification.
    SaveIdentity {
        /// Name the generated artifact is issued to.
        licensee_name: String,
        /// Name of the person it is assigned to.
        assignee_name: String,
    },

    /// Forgets the stored names and reopens the identity form.
    ClearIdentity,

    /// Flips between the dark and light palettes and persists the choice.
    ToggleTheme,

    /// A worker task finished.
    WorkerResponse(WorkerResponse),

    /// The dismiss timer of notification `id` fired.
    NotificationExpired(u64),

    /// Stops the event loop.
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the runtime whether to redraw.
///
/// # Errors
///
/// User-facing failures (bad input, failed fetches) become notifications and
/// never surface here. The `Result` is kept for the runtime's sake.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Navigate(signal) => {
            let Some(page) = state.router.navigate(signal) else {
                return Ok((false, vec![]));
            };
            Ok((true, state.enter_page(page)))
        }
        Event::ReloadCatalog => {
            let Some(category) = state.active_category() else {
                return Ok((false, vec![]));
            };
            if state.catalogs.contains_key(&category) || state.pending.contains(&category) {
                tracing::debug!(%category, "catalog loaded or pending, reload skipped");
                return Ok((false, vec![]));
            }
            state.pending.insert(category);
            state.failed.remove(&category);
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::fetch_catalog(category, state.nav_token))],
            ))
        }
        Event::QueryChanged(query) => {
            if state.active_category().is_none() {
                return Ok((false, vec![]));
            }
            tracing::trace!(query = %query, "search query updated");
            state.set_query(query);
            Ok((true, vec![]))
        }
        Event::ClearQuery => {
            if state.query.is_empty() {
                return Ok((false, vec![]));
            }
            state.set_query("");
            Ok((true, vec![]))
        }
        Event::SelectItem(index) => {
            if state.orchestrator.state().is_in_flight() {
                tracing::debug!("selection locked while generating");
                return Ok((false, vec![]));
            }
            let Some(item) = state.ranked.get(*index).cloned() else {
                let action = state.notify(NotificationKind::Error, format!("No item at position {}", index + 1));
                return Ok((true, vec![action]));
            };
            state.orchestrator.select(item);
            state.overlay = Overlay::Parameters;
            Ok((true, vec![]))
        }
        Event::SetExpiryInDays(days) => Ok(edit_parameters(state, |o| o.set_expiry_in_days(*days))),
        Event::SetExpiryDate(date) => Ok(edit_parameters(state, |o| o.set_expiry_date(date))),
        Event::SetLicenseType(license_type) => {
            Ok(edit_parameters(state, |o| o.set_license_type(*license_type)))
        }
        Event::SetUserCount(count) => Ok(edit_parameters(state, |o| o.set_user_count(*count))),
        Event::Submit => match state.orchestrator.submit(&state.identity) {
            Ok((ticket, request)) => {
                tracing::debug!(%ticket, "posting generation request");
                Ok((true, vec![Action::PostToWorker(WorkerMessage::generate(ticket, request))]))
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "submission refused");
                Ok((false, vec![]))
            }
        },
        Event::DismissOverlay => {
            match state.overlay {
                Overlay::None => return Ok((false, vec![])),
                Overlay::Identity => {}
                Overlay::Parameters => state.orchestrator.reset(),
                Overlay::Result => {
                    state.orchestrator.acknowledge();
                }
            }
            state.overlay = Overlay::None;
            Ok((true, vec![]))
        }
        Event::CopyResult => match state.orchestrator.state() {
            RequestState::Success(payload) => Ok((false, vec![Action::CopyToClipboard(payload.clone())])),
            _ => Ok((false, vec![])),
        },
        Event::ClipboardResult(outcome) => {
            let action = match outcome {
                Ok(()) => state.notify(NotificationKind::Success, "Copied to clipboard"),
                Err(reason) => state.notify(NotificationKind::Error, format!("Copy failed: {reason}")),
            };
            Ok((true, vec![action]))
        }
        Event::EditIdentity => {
            state.overlay = Overlay::Identity;
            Ok((true, vec![]))
        }
        Event::SaveIdentity {
            licensee_name,
            assignee_name,
        } => {
            let identity = Identity::new(licensee_name.trim(), assignee_name.trim());
            if !identity.is_complete() {
                let action = state.notify(NotificationKind::Error, "Licensee and assignee names are required");
                return Ok((true, vec![action]));
            }
            tracing::debug!("identity updated");
            state.identity = identity.clone();
            if state.overlay == Overlay::Identity {
                state.overlay = Overlay::None;
            }
            let notice = state.notify(NotificationKind::Success, "Identity saved");
            Ok((true, vec![Action::SaveIdentity(identity), notice]))
        }
        Event::ClearIdentity => {
            state.identity = Identity::default();
            state.overlay = Overlay::Identity;
            let notice = state.notify(NotificationKind::Success, "Identity cleared");
            Ok((true, vec![Action::ClearIdentity, notice]))
        }
        Event::ToggleTheme => {
            state.theme_mode = state.theme_mode.toggled();
            tracing::debug!(mode = %state.theme_mode, "theme toggled");
            Ok((true, vec![Action::SaveTheme(state.theme_mode)]))
        }
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
        Event::NotificationExpired(id) => Ok((state.expire_notification(*id), vec![])),
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::CatalogLoaded { category, token, items } => {
            tracing::debug!(%category, token, count = items.len(), "catalog loaded");
            let applied = state.record_catalog(*category, *token, items.clone());
            (applied, vec![])
        }
        WorkerResponse::CatalogFailed { category, token, message } => {
            state.pending.remove(category);
            if !state.is_current(*category, *token) {
                tracing::debug!(%category, token, "stale catalog failure ignored");
                return (false, vec![]);
            }
            tracing::warn!(%category, error = %message, "catalog load failed");
            state.failed.insert(*category);
            let action = state.notify(NotificationKind::Error, format!("Failed to load {category} catalog"));
            (true, vec![action])
        }
        WorkerResponse::Generated { ticket, payload } => {
            match state.orchestrator.resolve(*ticket, payload.clone()) {
                Delivery::Applied => {
                    state.overlay = Overlay::Result;
                    (true, vec![])
                }
                Delivery::Stale => (false, vec![]),
            }
        }
        WorkerResponse::GenerationFailed { ticket, reason } => {
            match state.orchestrator.reject(*ticket, reason.clone()) {
                Delivery::Applied => {
                    let action = state.notify(NotificationKind::Error, format!("Generation failed: {reason}"));
                    (true, vec![action])
                }
                Delivery::Stale => (false, vec![]),
            }
        }
    }
}

/// Runs a parameter edit, turning validation errors into a notification.
fn edit_parameters<F>(state: &mut AppState, edit: F) -> (bool, Vec<Action>)
where
    F: FnOnce(&mut super::orchestrator::RequestOrchestrator) -> Result<()>,
{
    match edit(&mut state.orchestrator) {
        Ok(()) => (true, vec![]),
        Err(e) => {
            tracing::debug!(error = %e, "parameter edit rejected");
            let action = state.notify(NotificationKind::Error, e.to_string());
            (true, vec![action])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::ThemeMode;
    use crate::app::orchestrator::GenerationTicket;
    use crate::domain::{Category, Item, Page};
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(Identity::new("Acme", "Dev"), ThemeMode::Dark)
    }

    fn items(names: &[&str]) -> Arc<[Item]> {
        names.iter().map(|n| Item::named(*n).with_code(n.to_uppercase())).collect()
    }

    fn run(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn loaded(category: Category, token: u64, names: &[&str]) -> Event {
        Event::WorkerResponse(WorkerResponse::CatalogLoaded {
            category,
            token,
            items: items(names),
        })
    }

    fn products_loaded() -> AppState {
        let mut state = state();
        run(&mut state, Event::Navigate("#products".into()));
        run(&mut state, loaded(Category::Products, 1, &["IntelliJ IDEA", "DataGrip", "Idea Helper"]));
        state
    }

    fn generation_in_flight() -> (AppState, GenerationTicket) {
        let mut state = products_loaded();
        run(&mut state, Event::SelectItem(1));
        let (_, actions) = run(&mut state, Event::Submit);
        let [Action::PostToWorker(WorkerMessage::Generate { ticket, request })] = actions.as_slice() else {
            panic!("expected one generate message, got {actions:?}");
        };
        assert_eq!(request.item_code.as_deref(), Some("DATAGRIP"));
        (state, *ticket)
    }

    #[test]
    fn navigation_to_same_page_is_a_no_op() {
        let mut state = products_loaded();
        state.set_query("idea");
        assert_eq!(run(&mut state, Event::Navigate("products".into())), (false, vec![]));
        assert_eq!(state.query, "idea");
    }

    #[test]
    fn page_change_clears_query_and_selection() {
        let mut state = products_loaded();
        run(&mut state, Event::QueryChanged("grip".into()));
        run(&mut state, Event::SelectItem(0));
        assert_eq!(state.overlay, Overlay::Parameters);

        run(&mut state, Event::Navigate("#plugins".into()));
        assert!(state.query.is_empty());
        assert!(state.ranked.is_empty());
        assert!(state.orchestrator.selection().is_none());
        assert_eq!(state.overlay, Overlay::None);
    }

    #[test]
    fn late_load_for_abandoned_page_does_not_leak() {
        let mut state = state();
        run(&mut state, Event::Navigate("#products".into()));
        run(&mut state, Event::Navigate("#plugins".into()));

        let (redraw, _) = run(&mut state, loaded(Category::Products, 1, &["DataGrip"]));
        assert!(!redraw);
        assert!(state.ranked.is_empty());
        assert!(state.catalogs.contains_key(&Category::Products));

        run(&mut state, loaded(Category::Plugins, 2, &["Lint Helper"]));
        assert_eq!(state.ranked.len(), 1);
        assert_eq!(state.ranked[0].name, "Lint Helper");
    }

    #[test]
    fn returning_to_a_pending_page_refetches_with_new_token() {
        let mut state = state();
        run(&mut state, Event::Navigate("#products".into()));
        run(&mut state, Event::Navigate("#plugins".into()));
        let (_, actions) = run(&mut state, Event::Navigate("#products".into()));
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::fetch_catalog(Category::Products, 3))]
        );

        run(&mut state, loaded(Category::Products, 1, &["DataGrip"]));
        assert!(state.ranked.is_empty());
        run(&mut state, loaded(Category::Products, 3, &["DataGrip"]));
        assert_eq!(state.ranked.len(), 1);
    }

    #[test]
    fn failed_load_notifies_only_when_current() {
        let mut state = state();
        run(&mut state, Event::Navigate("#plugins".into()));
        let failure = |token| {
            Event::WorkerResponse(WorkerResponse::CatalogFailed {
                category: Category::Plugins,
                token,
                message: "503".into(),
            })
        };

        let (redraw, actions) = run(&mut state, failure(0));
        assert!(!redraw && actions.is_empty());

        let (_, actions) = run(&mut state, failure(1));
        assert!(matches!(actions.as_slice(), [Action::ScheduleDismiss { .. }]));
        assert_eq!(
            state.notification.as_ref().map(|n| n.message.as_str()),
            Some("Failed to load plugins catalog")
        );

        let (_, actions) = run(&mut state, Event::ReloadCatalog);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::fetch_catalog(Category::Plugins, 1))]
        );
    }

    #[test]
    fn submit_is_suppressed_while_in_flight() {
        let (mut state, _) = generation_in_flight();
        assert_eq!(run(&mut state, Event::Submit), (false, vec![]));
    }

    #[test]
    fn submit_without_identity_is_refused_silently() {
        let mut state = products_loaded();
        state.identity = Identity::default();
        run(&mut state, Event::SelectItem(0));
        assert_eq!(run(&mut state, Event::Submit), (false, vec![]));
        assert_eq!(state.orchestrator.state(), &RequestState::Idle);
    }

    #[test]
    fn success_opens_result_and_copy_targets_payload() {
        let (mut state, ticket) = generation_in_flight();
        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Generated {
                ticket,
                payload: "ABC-123".into(),
            }),
        );
        assert_eq!(state.overlay, Overlay::Result);
        assert!(state.orchestrator.selection().is_none());
        assert_eq!(
            run(&mut state, Event::CopyResult),
            (false, vec![Action::CopyToClipboard("ABC-123".into())])
        );

        run(&mut state, Event::ClipboardResult(Ok(())));
        assert_eq!(
            state.notification.as_ref().map(|n| n.message.as_str()),
            Some("Copied to clipboard")
        );
    }

    #[test]
    fn failure_keeps_parameters_open_for_retry() {
        let (mut state, ticket) = generation_in_flight();
        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::GenerationFailed {
                ticket,
                reason: "HTTP 500".into(),
            }),
        );
        assert_eq!(state.overlay, Overlay::Parameters);
        assert!(state.orchestrator.selection().is_some());
        assert_eq!(state.notification.as_ref().map(|n| n.kind), Some(NotificationKind::Error));

        let (_, actions) = run(&mut state, Event::Submit);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn result_after_dismissal_is_discarded() {
        let (mut state, ticket) = generation_in_flight();
        run(&mut state, Event::DismissOverlay);
        let (redraw, _) = run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Generated {
                ticket,
                payload: "late".into(),
            }),
        );
        assert!(!redraw);
        assert_eq!(state.overlay, Overlay::None);
        assert_eq!(state.orchestrator.state(), &RequestState::Idle);
    }

    #[test]
    fn bad_parameter_edit_notifies_and_keeps_state() {
        let mut state = products_loaded();
        run(&mut state, Event::SelectItem(0));
        let before = state.orchestrator.parameters().clone();
        run(&mut state, Event::SetExpiryDate("31/12/2027".into()));
        run(&mut state, Event::SetUserCount(0));
        assert_eq!(state.orchestrator.parameters(), &before);
        assert_eq!(state.notification.as_ref().map(|n| n.kind), Some(NotificationKind::Error));
    }

    #[test]
    fn saving_identity_persists_trimmed_names() {
        let mut state = AppState::new(Identity::default(), ThemeMode::Dark);
        assert_eq!(state.overlay, Overlay::Identity);
        let (_, actions) = run(
            &mut state,
            Event::SaveIdentity {
                licensee_name: " Acme ".into(),
                assignee_name: "Dev".into(),
            },
        );
        assert_eq!(actions[0], Action::SaveIdentity(Identity::new("Acme", "Dev")));
        assert_eq!(state.overlay, Overlay::None);
    }

    #[test]
    fn toggling_theme_persists_choice() {
        let mut state = state();
        let (_, actions) = run(&mut state, Event::ToggleTheme);
        assert_eq!(actions, vec![Action::SaveTheme(ThemeMode::Light)]);
        assert_eq!(state.page(), Page::Home);
    }
}
