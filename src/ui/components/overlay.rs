//! Modal overlay box drawn over the table area.

use crate::ui::helpers::{char_len, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OverlayView;
use std::io::{self, Write};

const MAX_BOX_WIDTH: usize = 72;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone {
    Normal,
    Dim,
    Accent,
    Error,
}

struct Line {
    text: String,
    tone: Tone,
}

impl Line {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Draws `overlay` as a bordered box starting at `row`, using at most
/// `max_rows` rows. Returns the next free row.
pub fn render_overlay(
    out: &mut impl Write,
    row: usize,
    overlay: &OverlayView,
    theme: &Theme,
    cols: usize,
    max_rows: usize,
) -> io::Result<usize> {
    let width = cols.saturating_sub(4).min(MAX_BOX_WIDTH);
    let inner = width.saturating_sub(4);
    let (title, mut lines) = overlay_lines(overlay, inner);
    lines.truncate(max_rows.saturating_sub(2));

    let left = cols.saturating_sub(width) / 2 + 1;
    let border = Theme::fg(&theme.colors.border);

    let title = fit(&format!(" {title} "), width.saturating_sub(4));
    position_cursor(out, row, left)?;
    write!(
        out,
        "{border}┌─{}{}{title}{}{border}{}┐{}",
        Theme::bold(),
        Theme::fg(&theme.colors.accent),
        Theme::reset(),
        "─".repeat(width.saturating_sub(char_len(&title) + 3)),
        Theme::reset()
    )?;

    let mut current = row + 1;
    for line in &lines {
        let color = match line.tone {
            Tone::Normal => &theme.colors.text_normal,
            Tone::Dim => &theme.colors.text_dim,
            Tone::Accent => &theme.colors.accent,
            Tone::Error => &theme.colors.error_fg,
        };
        let text = fit(&line.text, inner);
        position_cursor(out, current, left)?;
        write!(
            out,
            "{border}│ {}{text}{}{border} │{}",
            Theme::fg(color),
            " ".repeat(inner.saturating_sub(char_len(&text))),
            Theme::reset()
        )?;
        current += 1;
    }

    position_cursor(out, current, left)?;
    write!(out, "{border}└{}┘{}", "─".repeat(width.saturating_sub(2)), Theme::reset())?;
    Ok(current + 1)
}

fn overlay_lines(overlay: &OverlayView, inner: usize) -> (String, Vec<Line>) {
    match overlay {
        OverlayView::Identity {
            licensee_name,
            assignee_name,
        } => {
            let shown = |name: &str| if name.is_empty() { "(not set)".to_string() } else { name.to_string() };
            (
                "Identity".to_string(),
                vec![
                    Line::new(Tone::Normal, format!("Licensee: {}", shown(licensee_name))),
                    Line::new(Tone::Normal, format!("Assignee: {}", shown(assignee_name))),
                    Line::new(Tone::Dim, ""),
                    Line::new(Tone::Dim, "identity <licensee> | <assignee>"),
                ],
            )
        }
        OverlayView::Parameters {
            item_name,
            item_code,
            expiry_date,
            license_type,
            user_count,
            loading,
            error,
        } => {
            let mut lines = vec![
                Line::new(Tone::Normal, format!("Code:         {}", item_code.as_deref().unwrap_or("-"))),
                Line::new(Tone::Normal, format!("Expiry date:  {expiry_date}")),
                Line::new(Tone::Normal, format!("License type: {license_type}")),
                Line::new(Tone::Normal, format!("Users:        {user_count}")),
                Line::new(Tone::Dim, ""),
            ];
            if *loading {
                lines.push(Line::new(Tone::Accent, "Generating..."));
            } else if let Some(reason) = error {
                lines.push(Line::new(Tone::Error, format!("Failed: {reason}")));
                lines.push(Line::new(Tone::Dim, "generate: retry"));
            } else {
                lines.push(Line::new(Tone::Dim, "generate: submit"));
            }
            (item_name.clone(), lines)
        }
        OverlayView::Result { payload } => {
            let mut lines = wrap(payload, inner)
                .into_iter()
                .map(|chunk| Line::new(Tone::Normal, chunk))
                .collect::<Vec<_>>();
            lines.push(Line::new(Tone::Dim, ""));
            lines.push(Line::new(Tone::Dim, "copy: copy to clipboard"));
            ("Result".to_string(), lines)
        }
    }
}

/// Splits `text` into chunks of `width` characters; payloads are opaque so
/// there is no word boundary to respect.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_into_fixed_chunks() {
        assert_eq!(wrap("abcdefg", 3), vec!["abc", "def", "g"]);
        assert!(wrap("abc", 0).is_empty());
    }

    #[test]
    fn failed_parameters_show_reason_and_retry_hint() {
        let overlay = OverlayView::Parameters {
            item_name: "DataGrip".to_string(),
            item_code: Some("DB".to_string()),
            expiry_date: "2030-01-01".to_string(),
            license_type: "Perpetual".to_string(),
            user_count: 1,
            loading: false,
            error: Some("service returned 500".to_string()),
        };
        let (title, lines) = overlay_lines(&overlay, 60);
        assert_eq!(title, "DataGrip");
        assert!(lines.iter().any(|l| l.tone == Tone::Error && l.text.contains("500")));
        assert!(lines.iter().any(|l| l.text == "generate: retry"));
    }

    #[test]
    fn box_respects_row_budget() {
        let overlay = OverlayView::Result {
            payload: "x".repeat(1000),
        };
        let mut out = Vec::new();
        let next = render_overlay(&mut out, 5, &overlay, &Theme::dark(), 80, 6).unwrap();
        assert_eq!(next, 11);
    }
}
