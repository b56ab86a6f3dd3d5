//! Top-level rendering entry point.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```

use crate::ui::components;
use crate::ui::helpers::clear_screen;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use std::io::{self, Write};

/// Clears the screen and draws `vm` with `theme`, then flushes `out`.
///
/// # Errors
///
/// Propagates write errors from `out`.
///
/// # Example
///
/// ```rust
/// use catalog_browser::app::{AppState, ThemeMode};
/// use catalog_browser::domain::Identity;
/// use catalog_browser::ui::render;
///
/// let state = AppState::new(Identity::new("Acme", "Dev"), ThemeMode::Dark);
/// let vm = state.compute_viewmodel(24, 80);
/// let mut out = Vec::new();
/// render(&vm, state.theme(), 24, 80, &mut out)?;
/// assert!(!out.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize, out: &mut impl Write) -> io::Result<()> {
    clear_screen(out)?;
    components::render_screen(out, vm, theme, rows, cols)?;
    out.flush()
}
