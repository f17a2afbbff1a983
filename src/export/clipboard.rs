//! Clipboard transport
//!
//! Engine exports are delivered through the `ClipboardSink` trait so the
//! engine never talks to the OS directly. `ArboardSink` is the system
//! clipboard implementation, backed by the arboard crate.

// enum_variant_names: Error variants follow standard naming convention
#![allow(clippy::enum_variant_names)]

use super::fragment::extract_fragment;
use crate::engine::CompositeImage;
use arboard::Clipboard;
use log::debug;
use std::borrow::Cow;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
    /// The HTML payload has no readable fragment offsets
    MalformedPayload,
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
            ClipboardError::MalformedPayload => {
                write!(f, "Clipboard write error: HTML payload has no fragment")
            }
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sink Abstraction
// ─────────────────────────────────────────────────────────────────────────────

/// MIME kind of a text clipboard payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Self-describing HTML clipboard payload (descriptor header + markup)
    Html,
    /// Plain text
    Text,
}

/// Destination for exported content.
pub trait ClipboardSink {
    /// Replace the clipboard with a text payload of the given kind.
    fn set_content(&mut self, kind: ContentKind, data: &str) -> Result<(), ClipboardError>;

    /// Replace the clipboard with an image.
    fn set_image(&mut self, image: &CompositeImage) -> Result<(), ClipboardError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// System Clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// System clipboard sink.
///
/// The arboard handle is opened on first use and kept for the lifetime of the
/// sink, since some platforms drop clipboard contents with their owner.
#[derive(Default)]
pub struct ArboardSink {
    clipboard: Option<Clipboard>,
}

impl ArboardSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn clipboard(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.clipboard.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| ClipboardError::AccessError("clipboard unavailable".to_string()))
    }
}

impl ClipboardSink for ArboardSink {
    fn set_content(&mut self, kind: ContentKind, data: &str) -> Result<(), ClipboardError> {
        let clipboard = self.clipboard()?;
        match kind {
            ContentKind::Text => clipboard.set_text(data)?,
            ContentKind::Html => {
                // arboard writes its own descriptor header, so hand it the
                // fragment the payload's offsets point at
                let fragment = extract_fragment(data).ok_or(ClipboardError::MalformedPayload)?;
                debug!(
                    "Setting HTML clipboard: {} byte payload, {} byte fragment",
                    data.len(),
                    fragment.len()
                );
                clipboard.set_html(fragment, None::<&str>)?;
            }
        }
        Ok(())
    }

    fn set_image(&mut self, image: &CompositeImage) -> Result<(), ClipboardError> {
        let data = arboard::ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Borrowed(image.pixels().as_raw()),
        };
        self.clipboard()?.set_image(data)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory Sink
// ─────────────────────────────────────────────────────────────────────────────

/// Sink that records the last payload of each kind.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub html: Option<String>,
    pub text: Option<String>,
    pub image: Option<CompositeImage>,
    pub writes: usize,
}

#[cfg(test)]
impl ClipboardSink for MemorySink {
    fn set_content(&mut self, kind: ContentKind, data: &str) -> Result<(), ClipboardError> {
        match kind {
            ContentKind::Html => self.html = Some(data.to_string()),
            ContentKind::Text => self.text = Some(data.to_string()),
        }
        self.writes += 1;
        Ok(())
    }

    fn set_image(&mut self, image: &CompositeImage) -> Result<(), ClipboardError> {
        self.image = Some(image.clone());
        self.writes += 1;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::AccessError("test".to_string());
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_clipboard_error_write() {
        let err = ClipboardError::WriteError("write failed".to_string());
        assert!(err.to_string().contains("write failed"));
    }

    #[test]
    fn test_malformed_payload_display() {
        let err = ClipboardError::MalformedPayload;
        assert!(err.to_string().contains("no fragment"));
    }

    #[test]
    fn test_memory_sink_records_by_kind() {
        let mut sink = MemorySink::default();
        sink.set_content(ContentKind::Text, "a\tb").unwrap();
        sink.set_content(ContentKind::Html, "<b>").unwrap();
        assert_eq!(sink.text.as_deref(), Some("a\tb"));
        assert_eq!(sink.html.as_deref(), Some("<b>"));
        assert_eq!(sink.writes, 2);
    }

    // Note: Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
