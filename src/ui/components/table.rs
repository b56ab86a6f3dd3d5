//! Result table.
//!
//! One line per item:
//!
//! ```text
//!   3  DataGrip                          DB        Database IDE
//! ```
//!
//! Position, name (with match highlighting), code and description. The
//! selected row is drawn with the selection colours across the full width.

use crate::ui::helpers::{char_len, fit, position_cursor, write_highlighted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;
use std::io::{self, Write};

const POSITION_WIDTH: usize = 4;
const NAME_WIDTH: usize = 34;
const CODE_WIDTH: usize = 10;

pub fn render_table_rows(
    out: &mut impl Write,
    row: usize,
    items: &[DisplayItem],
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let mut current = row;
    for item in items {
        current = render_table_row(out, current, item, theme, cols)?;
    }
    Ok(current)
}

fn render_table_row(
    out: &mut impl Write,
    row: usize,
    item: &DisplayItem,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;

    if item.is_selected {
        write!(
            out,
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )?;
    } else {
        write!(out, "{}", Theme::fg(&theme.colors.text_normal))?;
    }

    write!(out, "{:>width$}  ", item.position, width = POSITION_WIDTH - 1)?;
    let mut used = POSITION_WIDTH + 1;

    write_highlighted(out, &item.name, &item.highlight_ranges, theme, item.is_selected)?;
    let name_len = char_len(&item.name);
    write!(out, "{}", " ".repeat(NAME_WIDTH.saturating_sub(name_len)))?;
    used += name_len.max(NAME_WIDTH);

    let code = fit(item.code.as_deref().unwrap_or(""), CODE_WIDTH);
    write!(out, "{code:<width$}", width = CODE_WIDTH)?;
    used += CODE_WIDTH;

    if let Some(description) = &item.description {
        let description = fit(description, cols.saturating_sub(used + 1));
        if !item.is_selected {
            write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
        }
        write!(out, " {description}")?;
        used += char_len(&description) + 1;
    }

    write!(out, "{}{}", " ".repeat(cols.saturating_sub(used)), Theme::reset())?;
    Ok(row + 1)
}
