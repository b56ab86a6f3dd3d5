//! Bottom block: notification line, rule and key hints.

use crate::app::NotificationKind;
use crate::ui::helpers::{fit, position_cursor, write_centered, write_rule};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, NotificationView};
use std::io::{self, Write};

/// Renders the transient notification, if any, on `row`.
pub fn render_notification(
    out: &mut impl Write,
    row: usize,
    notification: Option<&NotificationView>,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    position_cursor(out, row, 1)?;
    let Some(notification) = notification else {
        return write!(out, "{}", " ".repeat(cols));
    };

    let (marker, color) = match notification.kind {
        NotificationKind::Success => ("✓", &theme.colors.success_fg),
        NotificationKind::Error => ("✗", &theme.colors.error_fg),
    };
    let text = fit(&format!(" {marker} {}", notification.message), cols);
    write!(out, "{}{}{text}{}", Theme::bold(), Theme::fg(color), Theme::reset())
}

/// Renders the rule on `row` and the key hints on `row + 1`.
pub fn render_footer(
    out: &mut impl Write,
    row: usize,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    write_rule(out, row, &theme.colors.border, cols)?;
    position_cursor(out, row + 1, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    write_centered(out, &footer.keybindings, cols)?;
    write!(out, "{}", Theme::reset())
}
