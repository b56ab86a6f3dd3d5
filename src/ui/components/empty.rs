//! Empty-state message, shown in place of the table.

use crate::ui::helpers::{position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;
use std::io::{self, Write};

/// Blank lines left above the message.
const TOP_MARGIN: usize = 2;

pub fn render_empty_state(
    out: &mut impl Write,
    row: usize,
    empty: &EmptyState,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let row = row + TOP_MARGIN;

    position_cursor(out, row, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.empty_state_fg))?;
    write_centered(out, &empty.message, cols)?;
    write!(out, "{}", Theme::reset())?;

    if empty.subtitle.is_empty() {
        return Ok(row + 1);
    }

    position_cursor(out, row + 1, 1)?;
    write!(out, "{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))?;
    write_centered(out, &empty.subtitle, cols)?;
    write!(out, "{}", Theme::reset())?;
    Ok(row + 2)
}
