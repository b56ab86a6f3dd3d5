//! Title line and page tabs.

use crate::ui::helpers::{char_len, position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::io::{self, Write};

/// Renders the centred title on `row` and the tab strip below it.
///
/// Returns the next free row.
pub fn render_header(
    out: &mut impl Write,
    row: usize,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    if let Some(bg) = &theme.colors.header_bg {
        write!(out, "{}", Theme::bg(bg))?;
    }
    write_centered(out, &header.title, cols)?;
    write!(out, "{}", Theme::reset())?;

    position_cursor(out, row + 1, 1)?;
    let mut used = 0;
    for tab in &header.tabs {
        let label = format!(" {} ", tab.label);
        if tab.is_active {
            write!(out, "{}{}[{label}]", Theme::bold(), Theme::fg(&theme.colors.accent))?;
        } else {
            write!(out, "{} {label} ", Theme::fg(&theme.colors.text_dim))?;
        }
        write!(out, "{}", Theme::reset())?;
        used += char_len(&label) + 2;
    }
    write!(
        out,
        "{}{}{}",
        Theme::fg(&theme.colors.border),
        "─".repeat(cols.saturating_sub(used)),
        Theme::reset()
    )?;

    Ok(row + 2)
}
