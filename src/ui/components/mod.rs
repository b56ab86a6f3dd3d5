//! Screen components.
//!
//! - [`header`]: title and page tabs
//! - [`search`]: query box
//! - [`table`]: ranked items
//! - [`empty`]: message shown instead of the table
//! - [`overlay`]: modal box for identity, parameters and result
//! - [`footer`]: notification line and key hints
//!
//! Layout, top to bottom:
//!
//! ```text
//! [Title]
//! [Tabs]
//! [Search box, 3 lines]      catalog pages only
//! [Table | Empty | Overlay]
//! [Notification]
//! [Rule]
//! [Key hints]
//! ```

mod empty;
mod footer;
mod header;
mod overlay;
mod search;
mod table;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use std::io::{self, Write};

use empty::render_empty_state;
use footer::{render_footer, render_notification};
use header::render_header;
use overlay::render_overlay;
use search::render_search_bar;
use table::render_table_rows;

/// Rows taken by the notification line, rule and key hints.
const BOTTOM_ROWS: usize = 3;

/// Draws every component of `vm` for a `rows` x `cols` screen.
pub fn render_screen(
    out: &mut impl Write,
    vm: &UIViewModel,
    theme: &Theme,
    rows: usize,
    cols: usize,
) -> io::Result<()> {
    let mut row = render_header(out, 1, &vm.header, theme, cols)?;
    if let Some(search) = &vm.search_bar {
        row = render_search_bar(out, row, search, theme, cols)?;
    }

    let bottom = rows.saturating_sub(BOTTOM_ROWS - 1).max(row + 1);
    let body_rows = bottom.saturating_sub(row);

    if let Some(overlay) = &vm.overlay {
        render_overlay(out, row, overlay, theme, cols, body_rows)?;
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(out, row, empty, theme, cols)?;
    } else {
        render_table_rows(out, row, &vm.display_items, theme, cols)?;
    }

    render_notification(out, bottom, vm.notification.as_ref(), theme, cols)?;
    render_footer(out, bottom + 1, &vm.footer, theme, cols)
}
