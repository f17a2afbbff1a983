//! Clipboard Export Module for tilestrip
//!
//! This module turns the current selection into clipboard content.
//!
//! # Export Modes
//!
//! - **Copy all**: spreadsheet HTML fragment with the strip floated over the first cell
//! - **Copy labels**: tab-separated alias text
//! - **Copy image**: the strip as a native clipboard image
//!
//! # Architecture
//!
//! - `fragment.rs` - HTML clipboard payload with self-describing offsets
//! - `facade.rs` - the three copy operations
//! - `clipboard.rs` - `ClipboardSink` abstraction and the arboard-backed sink

pub mod clipboard;
pub mod facade;
pub mod fragment;

pub use clipboard::{ArboardSink, ClipboardError, ClipboardSink};
pub use facade::{export_all, export_image_only, export_labels_only, CellColors};

#[cfg(test)]
pub use clipboard::MemorySink;
