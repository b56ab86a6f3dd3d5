//! File-based logging.
//!
//! Events from the `tracing` macros are formatted as plain text and written
//! to `catalog-browser.log` in the data directory, rotated at 10 MB with 3
//! backups.
//!
//! Level resolution:
//! 1. `RUST_LOG` environment variable
//! 2. `trace_level` from the configuration file or `--trace-level`
//! 3. `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
