//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the browser. It is mutated
//! only by [`handle_event`](crate::app::handle_event) through the named
//! transition methods below, and never performs I/O.
//!
//! # State Components
//!
//! - **Router**: active page, derived from navigation signals
//! - **Catalog snapshot**: items the worker has delivered, per category
//! - **Query / Ranked**: search text and the ranked subset of the active
//!   catalog, recomputed by [`AppState::refresh_ranked`]
//! - **Navigation token**: bumped on every page change so late catalog
//!   responses for an abandoned view can be recognised
//! - **Orchestrator**: selection, parameters and the generation request
//! - **Overlay / Notification / Theme**: presentation state
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::app::AppState;
//! use catalog_browser::app::modes::{Overlay, ThemeMode};
//! use catalog_browser::domain::Identity;
//!
//! let state = AppState::new(Identity::default(), ThemeMode::Dark);
//! assert_eq!(state.overlay, Overlay::Identity);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::actions::Action;
use super::modes::{Overlay, ThemeMode};
use super::orchestrator::{RequestOrchestrator, RequestState};
use super::ranking;
use super::router::ViewRouter;
use crate::domain::{Category, Identity, Item, Page};
use crate::infrastructure::icons::IconTable;
use crate::ui::theme::{Theme, ThemeSet};
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, NotificationView, OverlayView, SearchBarInfo, TabInfo,
    UIViewModel,
};
use crate::worker::WorkerMessage;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

const NAME_COLUMN_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message. At most one is visible; a newer one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

/// Everything the browser shows or remembers during a session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Active page, changed only through navigation signals.
    pub router: ViewRouter,

    /// Raw search text as typed. Normalisation happens in the ranking engine.
    pub query: String,

    /// Catalogs delivered by the worker, including loads that arrived after
    /// their page was left.
    pub catalogs: HashMap<Category, Arc<[Item]>>,

    /// Categories with a fetch requested and no response yet.
    pub pending: HashSet<Category>,

    /// Categories whose last current fetch failed.
    pub failed: HashSet<Category>,

    /// Ranked subset of the active catalog.
    pub ranked: Vec<Item>,

    /// Incremented on every page change.
    pub nav_token: u64,

    /// Selection, parameters and the generation request slot.
    pub orchestrator: RequestOrchestrator,

    /// Panel drawn over the item list.
    pub overlay: Overlay,

    /// Licensee and assignee, mirrored from the preference store.
    pub identity: Identity,

    /// Visible notification, if any.
    pub notification: Option<Notification>,

    /// Id handed to the next notification. Ids are never reused, so an
    /// expiry for a superseded notification can be told apart.
    next_notification_id: u64,

    /// How long a notification stays before its dismiss timer fires.
    pub notification_ttl: Duration,

    /// Active palette, persisted by the preference store.
    pub theme_mode: ThemeMode,

    /// Dark and light palettes, one of them possibly from a theme file.
    pub themes: ThemeSet,

    /// Icon reference lookup used when building item rows.
    pub icons: IconTable,
}

impl AppState {
    /// Creates the state for a fresh session on the home page.
    ///
    /// The identity form is opened when `identity` is incomplete.
    #[must_use]
    pub fn new(identity: Identity, theme_mode: ThemeMode) -> Self {
        let overlay = if identity.is_complete() {
            Overlay::None
        } else {
            Overlay::Identity
        };

        Self {
            router: ViewRouter::default(),
            query: String::new(),
            catalogs: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            ranked: vec![],
            nav_token: 0,
            orchestrator: RequestOrchestrator::new(),
            overlay,
            identity,
            notification: None,
            next_notification_id: 0,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            theme_mode,
            themes: ThemeSet::default(),
            icons: IconTable::default(),
        }
    }

    #[must_use]
    pub fn with_themes(mut self, themes: ThemeSet) -> Self {
        self.themes = themes;
        self
    }

    #[must_use]
    pub fn with_icons(mut self, icons: IconTable) -> Self {
        self.icons = icons;
        self
    }

    #[must_use]
    pub const fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.router.current()
    }

    #[must_use]
    pub const fn active_category(&self) -> Option<Category> {
        self.router.active_category()
    }

    /// Palette for the active theme mode.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.themes.get(self.theme_mode)
    }

    /// A catalog response tagged `(category, token)` still belongs to the
    /// view on screen.
    #[must_use]
    pub fn is_current(&self, category: Category, token: u64) -> bool {
        token == self.nav_token && self.active_category() == Some(category)
    }

    /// Recomputes the ranked list from the snapshot and the query.
    ///
    /// Pages without a catalog, and catalogs not delivered yet, rank to an
    /// empty list.
    pub fn refresh_ranked(&mut self) {
        let _span = tracing::debug_span!("refresh_ranked",
            page = self.page().as_str(),
            query_len = self.query.len()
        )
        .entered();

        self.ranked = self
            .active_category()
            .and_then(|category| self.catalogs.get(&category))
            .map_or_else(Vec::new, |items| ranking::rank(items, &self.query));

        tracing::debug!(ranked_count = self.ranked.len(), "ranked result refreshed");
    }

    /// Stores the raw search text and re-ranks the active catalog.
    pub fn set_query(&mut self, query: &str) {
        query.clone_into(&mut self.query);
        self.refresh_ranked();
    }

    /// Applies a page change: clears query and selection, closes the item
    /// overlays and bumps the navigation token. Returns the fetch to issue
    /// when the new page's catalog is not in the snapshot.
    pub fn enter_page(&mut self, page: Page) -> Vec<Action> {
        self.query.clear();
        self.orchestrator.reset();
        if matches!(self.overlay, Overlay::Parameters | Overlay::Result) {
            self.overlay = Overlay::None;
        }
        self.nav_token += 1;

        tracing::debug!(page = page.as_str(), token = self.nav_token, "entered page");

        let mut actions = vec![];
        if let Some(category) = page.category() {
            if !self.catalogs.contains_key(&category) {
                self.pending.insert(category);
                self.failed.remove(&category);
                actions.push(Action::PostToWorker(WorkerMessage::fetch_catalog(
                    category,
                    self.nav_token,
                )));
            }
        }
        self.refresh_ranked();
        actions
    }

    /// Records a delivered catalog. Returns whether it was applied to the
    /// ranked list.
    pub fn record_catalog(&mut self, category: Category, token: u64, items: Arc<[Item]>) -> bool {
        self.pending.remove(&category);
        self.failed.remove(&category);
        self.catalogs.entry(category).or_insert(items);

        if self.is_current(category, token) {
            self.refresh_ranked();
            true
        } else {
            tracing::debug!(%category, token, current = self.nav_token, "stale catalog load kept out of ranked list");
            false
        }
    }

    /// Shows a notification and returns the action arming its dismissal.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Action {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        let message = message.into();
        tracing::debug!(id, ?kind, message = %message, "notification shown");
        self.notification = Some(Notification { id, message, kind });
        Action::ScheduleDismiss {
            id,
            after: self.notification_ttl,
        }
    }

    /// Clears the notification if `id` is still the visible one.
    pub fn expire_notification(&mut self, id: u64) -> bool {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            true
        } else {
            false
        }
    }

    /// Index of the current selection within the ranked list.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.orchestrator.selection()?;
        self.ranked.iter().position(|item| item.key() == selected.key())
    }

    /// Builds the renderable view model for a `rows` x `cols` terminal.
    ///
    /// The visible window is centred on the selection when there is one and
    /// starts at the top of the ranked list otherwise.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let search_bar = self.compute_search_bar();
        let available_rows = self.calculate_available_rows(rows, search_bar.is_some());

        let selected = self.selected_index();
        let mut visible_start = selected.map_or(0, |index| index.saturating_sub(available_rows / 2));
        let visible_end = (visible_start + available_rows).min(self.ranked.len());
        if visible_end - visible_start < available_rows && self.ranked.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = self.ranked[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let absolute = visible_start + offset;
                self.compute_display_item(item, absolute, selected == Some(absolute), cols)
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar,
            display_items,
            empty_state: self.compute_empty_state(),
            overlay: self.compute_overlay(),
            notification: self.notification.as_ref().map(|n| NotificationView {
                message: n.message.clone(),
                kind: n.kind,
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(&self, item: &Item, absolute: usize, is_selected: bool, cols: usize) -> DisplayItem {
        let name = truncate(&item.name, NAME_COLUMN_WIDTH);
        let highlight_ranges = ranking::match_ranges(&name, &self.query)
            .into_iter()
            .filter(|&(_, end)| end <= name.chars().count())
            .collect();
        let description_width = cols.saturating_sub(NAME_COLUMN_WIDTH + 16);

        DisplayItem {
            position: absolute + 1,
            name,
            code: item.code.clone(),
            description: item
                .description
                .as_deref()
                .map(|d| truncate(d, description_width)),
            icon_url: self.icons.resolve(item.icon_ref.as_deref()),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let page = self.page();
        let title = if page.category().is_some() {
            format!(" {} ({}) ", page.title(), self.ranked.len())
        } else {
            " Catalog Browser ".to_string()
        };
        let tabs = Page::ALL
            .into_iter()
            .map(|p| TabInfo {
                label: p.title().to_string(),
                is_active: p == page,
            })
            .collect();
        HeaderInfo { title, tabs }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.active_category().map(|_| SearchBarInfo {
            query: self.query.clone(),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        let Some(category) = self.active_category() else {
            return Some(EmptyState {
                message: "Browse a catalog".to_string(),
                subtitle: "go products  or  go plugins".to_string(),
            });
        };

        if !self.ranked.is_empty() {
            return None;
        }

        let (message, subtitle) = match self.catalogs.get(&category) {
            Some(items) if items.is_empty() => (format!("No {category} available"), String::new()),
            Some(_) => (
                format!("No matches for \"{}\"", self.query.trim()),
                "Try a shorter query".to_string(),
            ),
            None if self.failed.contains(&category) => (
                format!("Failed to load {category} catalog"),
                "reload: try again".to_string(),
            ),
            None => (format!("Loading {category}..."), String::new()),
        };
        Some(EmptyState { message, subtitle })
    }

    fn compute_overlay(&self) -> Option<OverlayView> {
        match self.overlay {
            Overlay::None => None,
            Overlay::Identity => Some(OverlayView::Identity {
                licensee_name: self.identity.licensee_name.clone(),
                assignee_name: self.identity.assignee_name.clone(),
            }),
            Overlay::Parameters => {
                let item = self.orchestrator.selection()?;
                let parameters = self.orchestrator.parameters();
                let error = match self.orchestrator.state() {
                    RequestState::Failed(reason) => Some(reason.clone()),
                    _ => None,
                };
                Some(OverlayView::Parameters {
                    item_name: item.name.clone(),
                    item_code: item.code.clone(),
                    expiry_date: parameters.expiry_string(),
                    license_type: parameters.license_type.to_string(),
                    user_count: parameters.user_count.get(),
                    loading: self.orchestrator.state().is_in_flight(),
                    error,
                })
            }
            Overlay::Result => match self.orchestrator.state() {
                RequestState::Success(payload) => Some(OverlayView::Result {
                    payload: payload.clone(),
                }),
                _ => None,
            },
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.overlay, self.active_category()) {
            (Overlay::Identity, _) => "identity <licensee> | <assignee>: save  close  quit",
            (Overlay::Parameters, _) => {
                "days N  expiry YYYY-MM-DD  type perpetual|subscription  users N  generate  close"
            }
            (Overlay::Result, _) => "copy  close  quit",
            (Overlay::None, Some(_)) => "/text: search  pick N: select  go <page>  theme  identity  quit",
            (Overlay::None, None) => "go products  go plugins  theme  identity  quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for the table after header (2), search bar (3), notification
    /// (1) and footer (2).
    const fn calculate_available_rows(&self, total_rows: usize, has_search_bar: bool) -> usize {
        let chrome = if has_search_bar { 8 } else { 5 };
        let rows = total_rows.saturating_sub(chrome);
        if rows == 0 {
            1
        } else {
            rows
        }
    }
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> Arc<[Item]> {
        names.iter().map(|n| Item::named(*n).with_code(n.to_uppercase())).collect()
    }

    fn on_products(names: &[&str]) -> AppState {
        let mut state = AppState::new(Identity::new("Acme", "Dev"), ThemeMode::Dark);
        state.catalogs.insert(Category::Products, catalog(names));
        state.router.navigate("#products");
        state.enter_page(Page::Products);
        state
    }

    #[test]
    fn complete_identity_skips_identity_form() {
        let state = AppState::new(Identity::new("Acme", "Dev"), ThemeMode::Light);
        assert_eq!(state.overlay, Overlay::None);
        assert_eq!(state.theme().mode, ThemeMode::Light);
    }

    #[test]
    fn entering_a_page_without_snapshot_requests_fetch() {
        let mut state = AppState::new(Identity::default(), ThemeMode::Dark);
        state.router.navigate("#plugins");
        let actions = state.enter_page(Page::Plugins);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::fetch_catalog(Category::Plugins, 1))]
        );
        assert!(state.pending.contains(&Category::Plugins));
        assert_eq!(
            state.compute_viewmodel(24, 80).empty_state.map(|e| e.message),
            Some("Loading plugins...".to_string())
        );
    }

    #[test]
    fn query_drives_ranking_over_snapshot() {
        let mut state = on_products(&["IntelliJ IDEA", "DataGrip", "Idea Helper"]);
        assert_eq!(state.ranked.len(), 3);
        state.set_query("idea");
        let names: Vec<&str> = state.ranked.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Idea Helper", "IntelliJ IDEA"]);
    }

    #[test]
    fn stale_catalog_is_stored_but_not_ranked() {
        let mut state = on_products(&["DataGrip"]);
        let applied = state.record_catalog(Category::Plugins, 0, catalog(&["Lint"]));
        assert!(!applied);
        assert!(state.catalogs.contains_key(&Category::Plugins));
        assert_eq!(state.ranked.len(), 1);
    }

    #[test]
    fn expiry_of_superseded_notification_is_ignored() {
        let mut state = AppState::new(Identity::default(), ThemeMode::Dark);
        let Action::ScheduleDismiss { id: first, .. } = state.notify(NotificationKind::Success, "one") else {
            panic!("expected dismiss action");
        };
        state.notify(NotificationKind::Error, "two");
        assert!(!state.expire_notification(first));
        assert_eq!(state.notification.as_ref().map(|n| n.message.as_str()), Some("two"));
    }

    #[test]
    fn viewmodel_window_follows_selection() {
        let names: Vec<String> = (0..50).map(|i| format!("Item {i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = on_products(&refs);
        state.orchestrator.select(state.ranked[40].clone());

        let vm = state.compute_viewmodel(18, 80);
        assert_eq!(vm.display_items.len(), 10);
        let selected: Vec<usize> = vm
            .display_items
            .iter()
            .filter(|d| d.is_selected)
            .map(|d| d.position)
            .collect();
        assert_eq!(selected, vec![41]);
        assert_eq!(vm.header.title, " Products (50) ");
    }

    #[test]
    fn highlight_ranges_cover_query() {
        let mut state = on_products(&["DataGrip"]);
        state.set_query("grip");
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(4, 8)]);
    }
}
