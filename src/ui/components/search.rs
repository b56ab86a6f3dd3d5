//! Search input box.

use crate::ui::helpers::{char_len, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;
use std::io::{self, Write};

const SEARCH_BOX_MARGIN: usize = 2;

/// Three-line bordered box showing the current query. Returns the next
/// free row.
pub fn render_search_bar(
    out: &mut impl Write,
    row: usize,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(out, row, 1)?;
    write!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset())?;

    let text = if search.query.is_empty() {
        " Search: (type /text)".to_string()
    } else {
        format!(" Search: {}", search.query)
    };
    let text = fit(&text, inner_width);
    let color = if search.query.is_empty() {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    };

    position_cursor(out, row + 1, 1)?;
    write!(
        out,
        "{margin}{border}│{}{text}{}{border}│{}",
        Theme::fg(color),
        " ".repeat(inner_width.saturating_sub(char_len(&text))),
        Theme::reset()
    )?;

    position_cursor(out, row + 2, 1)?;
    write!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset())?;

    Ok(row + 3)
}
