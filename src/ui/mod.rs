//! Terminal rendering and line input.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! stdin line → input::parse_command → Event
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready snapshot of the state
//! - [`renderer`]: entry point drawing a view model
//! - [`components`]: header, search box, table, overlay and footer
//! - [`helpers`]: cursor, highlighting and padding utilities
//! - [`theme`]: palettes and ANSI colour sequences
//! - [`input`]: command parser for typed lines

pub mod components;
pub mod helpers;
pub mod input;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use input::parse_command;
pub use renderer::render;
pub use theme::{Theme, ThemeSet};
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, NotificationView, OverlayView, SearchBarInfo, TabInfo,
    UIViewModel,
};
