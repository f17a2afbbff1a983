//! User settings and preferences for tilestrip
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence. The selection itself is
//! never persisted.

use crate::engine::{RenderParameters, DEFAULT_RESOLUTION, DEFAULT_TILE_SIZE};
use crate::export::CellColors;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 750.0,
            height: 600.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Application settings.
///
/// Serialized to JSON and persisted to the user's config directory.
/// All fields have defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Strip Rendering
    // ─────────────────────────────────────────────────────────────────────────
    /// Tile edge length in pixels
    pub tile_size: u32,

    /// Resolution written into the strip, in DPI
    pub resolution: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Spreadsheet Cells
    // ─────────────────────────────────────────────────────────────────────────
    /// Cell background color, hex digits without `#`
    pub background_color: String,

    /// Cell border color, hex digits without `#`
    pub border_color: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog Location
    // ─────────────────────────────────────────────────────────────────────────
    /// Record file (`id,name,sortKey,group,alias` per line)
    pub catalog_file: PathBuf,

    /// Directory holding `{id}31.<ext>` icons
    pub icon_dir: PathBuf,

    /// Icon file extension
    pub icon_extension: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Appearance & Window State
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Window size and position
    pub window_size: WindowSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            resolution: DEFAULT_RESOLUTION,

            background_color: String::from("ffe1b2"),
            border_color: String::from("000000"),

            catalog_file: PathBuf::from("CharacterInfo.csv"),
            icon_dir: PathBuf::from("CharacterIcons"),
            icon_extension: String::from(Self::DEFAULT_ICON_EXTENSION),

            theme: Theme::default(),
            window_size: WindowSize::default(),
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Icon extension used when none is configured.
    pub const DEFAULT_ICON_EXTENSION: &'static str = "jpg";

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values. Render values follow the
    /// same range the engine accepts from the UI.
    pub fn sanitize(&mut self) {
        let params = self.render_parameters();
        self.tile_size = params.tile_size;
        self.resolution = params.dpi;

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        let extension = self.icon_extension.trim().trim_start_matches('.');
        self.icon_extension = if extension.is_empty() {
            Self::DEFAULT_ICON_EXTENSION.to_string()
        } else {
            extension.to_string()
        };
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Render parameters for a new engine.
    pub fn render_parameters(&self) -> RenderParameters {
        RenderParameters::clamped(self.tile_size, self.resolution)
    }

    /// Colors for the spreadsheet cells.
    pub fn cell_colors(&self) -> CellColors {
        CellColors {
            background: self.background_color.clone(),
            border: self.border_color.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
