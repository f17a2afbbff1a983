//! Selection and strip engine for tilestrip
//!
//! The `Engine` owns the catalog, the current selection, the render
//! parameters and the rendered strip. Its methods are the only way to change
//! any of them, and every successful change re-renders the strip from
//! scratch.
//!
//! # Architecture
//!
//! - `selection.rs` - bounded, rank-ordered `SelectionSet`
//! - `params.rs` - `RenderParameters` and text-input validation
//! - `render.rs` - `CompositeRenderer` and `CompositeImage`

mod params;
mod render;
mod selection;

pub use params::{RenderParameters, DEFAULT_RESOLUTION, DEFAULT_TILE_SIZE};
pub use render::CompositeImage;
pub use selection::MAX_SELECTION;

use crate::catalog::{Catalog, ItemId};
use crate::error::Result;
use crate::export::{self, CellColors, ClipboardSink};
use log::{debug, error, info};
use render::CompositeRenderer;
use selection::SelectionSet;

/// Single-window engine state.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    selection: SelectionSet,
    params: RenderParameters,
    renderer: CompositeRenderer,
    composite: CompositeImage,
    generation: u64,
}

impl Engine {
    /// Create an engine with an empty selection and render the empty strip.
    pub fn new(catalog: Catalog, params: RenderParameters) -> Result<Self> {
        let mut renderer = CompositeRenderer::new();
        let composite = renderer.render(&catalog, &[], params)?;
        info!(
            "Engine ready: {} items, {}px tiles at {} dpi",
            catalog.len(),
            params.tile_size,
            params.dpi
        );
        Ok(Self {
            catalog,
            selection: SelectionSet::new(),
            params,
            renderer,
            composite,
            generation: 0,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn params(&self) -> RenderParameters {
        self.params
    }

    /// Selected ids, highest sort key first.
    pub fn selection(&self) -> &[ItemId] {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(id)
    }

    /// The current strip.
    pub fn composite(&self) -> &CompositeImage {
        &self.composite
    }

    /// Incremented on every re-render, so observers can tell when the strip changed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Select (`desired == true`) or deselect `id`.
    ///
    /// Returns `false` without changing anything when selecting would exceed
    /// [`MAX_SELECTION`] or `id` is unknown.
    pub fn try_toggle(&mut self, id: ItemId, desired: bool) -> bool {
        if !self.selection.try_toggle(&self.catalog, id, desired) {
            debug!("Rejected selecting {} ({} selected)", id, self.selection.len());
            return false;
        }
        self.rerender();
        true
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.rerender();
    }

    /// Apply a tile size typed by the user.
    ///
    /// Invalid text leaves the current size in place. The strip canvas is
    /// reallocated for the new size.
    pub fn set_tile_size(&mut self, text: &str) -> Result<u32> {
        let tile_size = params::parse_tile_size(text)?;
        self.apply(RenderParameters {
            tile_size,
            ..self.params
        })?;
        Ok(tile_size)
    }

    /// Apply a resolution typed by the user. Only the strip's metadata changes.
    pub fn set_resolution(&mut self, text: &str) -> Result<f32> {
        let dpi = params::parse_resolution(text)?;
        self.apply(RenderParameters {
            dpi,
            ..self.params
        })?;
        Ok(dpi)
    }

    fn apply(&mut self, params: RenderParameters) -> Result<()> {
        let composite = self
            .renderer
            .render(&self.catalog, self.selection.ids(), params)?;
        self.params = params;
        self.publish(composite);
        Ok(())
    }

    fn rerender(&mut self) {
        match self
            .renderer
            .render(&self.catalog, self.selection.ids(), self.params)
        {
            Ok(composite) => self.publish(composite),
            Err(e) => error!("Failed to render strip: {}", e),
        }
    }

    fn publish(&mut self, composite: CompositeImage) {
        self.composite = composite;
        self.generation += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Alias texts of the selection, in selection order.
    pub fn aliases(&self) -> Vec<&str> {
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.catalog.record(id))
            .map(|record| record.alias_text.as_str())
            .collect()
    }

    /// Copy the strip plus alias cells as a spreadsheet fragment.
    pub fn export_all(&self, colors: &CellColors, sink: &mut dyn ClipboardSink) -> Result<()> {
        export::export_all(&self.composite, &self.aliases(), colors, sink)
    }

    /// Copy the aliases as tab-separated text.
    pub fn export_labels_only(&self, sink: &mut dyn ClipboardSink) -> Result<()> {
        export::export_labels_only(&self.aliases(), sink)
    }

    /// Copy the strip as an image.
    pub fn export_image_only(&self, sink: &mut dyn ClipboardSink) -> Result<()> {
        export::export_image_only(&self.composite, sink)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
