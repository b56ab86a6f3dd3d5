//! Shared rendering utilities.
//!
//! Everything here writes to an `io::Write` so the same code drives stdout
//! and in-memory buffers in tests. Widths are counted in characters, not
//! bytes.

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut impl Write, row: usize, col: usize) -> io::Result<()> {
    write!(out, "\u{1b}[{row};{col}H")
}

/// Clears the screen and homes the cursor.
pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\u{1b}[2J\u{1b}[H")
}

#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Writes `text` centred in `cols` columns, padding both sides.
pub fn write_centered(out: &mut impl Write, text: &str, cols: usize) -> io::Result<()> {
    let text = fit(text, cols);
    let len = char_len(&text);
    let left = cols.saturating_sub(len) / 2;
    let right = cols.saturating_sub(left + len);
    write!(out, "{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Writes `text`, colouring the character ranges that matched the query.
///
/// Ranges are `(start, end)` character indices with exclusive end. On the
/// selected row the match colours are skipped so the selection background
/// stays intact.
pub fn write_highlighted(
    out: &mut impl Write,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) -> io::Result<()> {
    if ranges.is_empty() || is_selected {
        return write!(out, "{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut cursor = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(cursor);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let plain: String = chars[cursor..start].iter().collect();
        let matched: String = chars[start..end].iter().collect();
        write!(
            out,
            "{plain}{}{}{matched}{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset(),
            Theme::fg(&theme.colors.text_normal),
        )?;
        cursor = end;
    }

    let rest: String = chars[cursor..].iter().collect();
    write!(out, "{rest}")
}

/// Horizontal rule across `cols` columns.
pub fn write_rule(out: &mut impl Write, row: usize, color: &str, cols: usize) -> io::Result<()> {
    position_cursor(out, row, 1)?;
    write!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn highlight_wraps_matched_range() {
        let theme = Theme::dark();
        let text = rendered(|out| write_highlighted(out, "DataGrip", &[(4, 8)], &theme, false));
        let expected = format!(
            "Data{}{}Grip{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset(),
            Theme::fg(&theme.colors.text_normal)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn selected_row_is_written_plain() {
        let theme = Theme::dark();
        let text = rendered(|out| write_highlighted(out, "DataGrip", &[(0, 4)], &theme, true));
        assert_eq!(text, "DataGrip");
    }

    #[test]
    fn out_of_bounds_ranges_are_clamped() {
        let theme = Theme::dark();
        let text = rendered(|out| write_highlighted(out, "ab", &[(1, 9), (5, 7)], &theme, false));
        let expected = format!(
            "a{}{}b{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset(),
            Theme::fg(&theme.colors.text_normal)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn centered_text_pads_both_sides() {
        assert_eq!(rendered(|out| write_centered(out, "ab", 6)), "  ab  ");
        assert_eq!(rendered(|out| write_centered(out, "abcdef", 4)), "abcd");
    }

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("héllo", 2), "hé");
        assert_eq!(char_len("héllo"), 5);
    }
}
