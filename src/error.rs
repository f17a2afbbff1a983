//! Centralized error handling for tilestrip
//!
//! One error type covers catalog loading, parameter validation, strip
//! rendering, PNG encoding, clipboard transport and configuration.

use crate::export::ClipboardError;
use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // I/O and Catalog Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// The record file or one of the icons could not be loaded
    CatalogLoad { path: PathBuf, message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Engine Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// A render parameter was non-numeric or outside `[10, 300]`
    InvalidParameter { name: &'static str, value: String },

    /// The strip buffer could not be allocated with the requested dimensions
    Allocation { width: u64, height: u64 },

    /// PNG encoding of the strip failed
    ImageEncode(String),

    /// The operation needs at least one selected item
    EmptySelection,

    /// The clipboard sink refused the payload
    Clipboard(ClipboardError),

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,
}

impl Error {
    /// Whether the error is a rejected user input the UI should answer with
    /// an error cue rather than a dialog.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ClipboardError> for Error {
    fn from(err: ClipboardError) -> Self {
        Error::Clipboard(err)
    }
}

impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        Error::ImageEncode(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::CatalogLoad { path, message } => {
                write!(f, "Failed to load catalog from '{}': {}", path.display(), message)
            }

            Error::InvalidParameter { name, value } => {
                write!(f, "Invalid {}: '{}' (expected 10 to 300)", name, value)
            }
            Error::Allocation { width, height } => {
                write!(f, "Cannot allocate a {}x{} strip image", width, height)
            }
            Error::ImageEncode(msg) => write!(f, "PNG encoding failed: {}", msg),
            Error::EmptySelection => write!(f, "Nothing is selected"),
            Error::Clipboard(err) => write!(f, "{}", err),

            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Clipboard(err) => Some(err),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::CatalogLoad { .. }
            | Error::InvalidParameter { .. }
            | Error::Allocation { .. }
            | Error::ImageEncode(_)
            | Error::EmptySelection
            | Error::ConfigDirNotFound => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
