//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! truncated names, resolved icon URLs, highlight ranges and the content of
//! the open overlay.
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::ui::viewmodel::{DisplayItem, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Products (1) ".to_string(), tabs: vec![] },
//!     search_bar: None,
//!     display_items: vec![DisplayItem {
//!         position: 1,
//!         name: "DataGrip".to_string(),
//!         code: Some("DB".to_string()),
//!         description: None,
//!         icon_url: "/images/datagrip.svg".to_string(),
//!         is_selected: false,
//!         highlight_ranges: vec![(0, 4)],
//!     }],
//!     empty_state: None,
//!     overlay: None,
//!     notification: None,
//!     footer: FooterInfo { keybindings: "quit".to_string() },
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

use crate::app::NotificationKind;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present on catalog pages.
    pub search_bar: Option<SearchBarInfo>,

    /// Visible window of the ranked result.
    pub display_items: Vec<DisplayItem>,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    pub overlay: Option<OverlayView>,

    pub notification: Option<NotificationView>,

    pub footer: FooterInfo,
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// 1-based position in the ranked result, used by `pick N`.
    pub position: usize,

    pub name: String,

    pub code: Option<String>,

    pub description: Option<String>,

    pub icon_url: String,

    /// The row is the current selection.
    pub is_selected: bool,

    /// Character ranges of `name` matching the query, `(start, end)` with
    /// exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub tabs: Vec<TabInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub message: String,
    pub kind: NotificationKind,
}

/// Content of the open modal overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayView {
    Identity {
        licensee_name: String,
        assignee_name: String,
    },
    Parameters {
        item_name: String,
        item_code: Option<String>,
        expiry_date: String,
        license_type: String,
        user_count: u32,
        /// A request is in flight; submission is disabled.
        loading: bool,
        /// Reason of the last failed attempt, kept until retry.
        error: Option<String>,
    },
    Result {
        payload: String,
    },
}
