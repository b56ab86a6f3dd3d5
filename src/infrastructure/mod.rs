//! Infrastructure layer: adapters to the outside world.
//!
//! - [`paths`]: platform config and data directories
//! - [`http`]: catalog and generation services over HTTP
//! - [`clipboard`]: system clipboard with a terminal fallback
//! - [`icons`]: icon reference lookup

pub mod clipboard;
pub mod http;
pub mod icons;
pub mod paths;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use http::{GenerationService, HttpBackend};
pub use icons::{IconConfig, IconTable};
pub use paths::{default_config_file, expand_tilde, get_config_dir, get_data_dir};
