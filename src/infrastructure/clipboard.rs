//! Clipboard sink.
//!
//! The system clipboard is tried first. When it is unavailable (headless
//! session, SSH, missing display server) the text is sent to the terminal as
//! an OSC 52 escape sequence, which most terminal emulators forward to the
//! local clipboard.

use crate::domain::{CatalogError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;

/// Encoded payloads above this size are refused by many terminals.
const OSC52_MAX_PAYLOAD: usize = 100_000;

pub trait ClipboardSink {
    /// # Errors
    ///
    /// Returns [`CatalogError::Clipboard`] when no clipboard accepted the text.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard with OSC 52 fallback on stdout.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_owned())) {
            Ok(()) => {
                tracing::debug!(len = text.len(), "copied to system clipboard");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "system clipboard unavailable, falling back to OSC 52");
                let mut stdout = std::io::stdout().lock();
                write_osc52(text, &mut stdout)
            }
        }
    }
}

/// OSC 52 "set clipboard" sequence for `text`.
///
/// # Errors
///
/// Returns [`CatalogError::Clipboard`] if the encoded payload is too large.
pub fn osc52_sequence(text: &str) -> Result<String> {
    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > OSC52_MAX_PAYLOAD {
        return Err(CatalogError::Clipboard(format!(
            "OSC 52 payload too large ({} > {OSC52_MAX_PAYLOAD})",
            encoded.len()
        )));
    }
    Ok(format!("\x1b]52;c;{encoded}\x07"))
}

/// Writes the OSC 52 sequence for `text` to `writer`.
///
/// # Errors
///
/// Returns [`CatalogError::Clipboard`] if the payload is too large or the
/// write fails.
pub fn write_osc52(text: &str, writer: &mut impl Write) -> Result<()> {
    let sequence = osc52_sequence(text)?;
    writer
        .write_all(sequence.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| CatalogError::Clipboard(e.to_string()))
}
