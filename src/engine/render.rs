//! Strip compositing and PNG encoding.

use super::params::RenderParameters;
use super::selection::MAX_SELECTION;
use crate::catalog::{Catalog, ItemId};
use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;
use std::borrow::Cow;

const METERS_PER_INCH: f32 = 0.0254;

// ─────────────────────────────────────────────────────────────────────────────
// Composite Image
// ─────────────────────────────────────────────────────────────────────────────

/// The rendered strip: one `tile × tile` square per selected item, left to
/// right, tagged with a resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeImage {
    pixels: RgbaImage,
    dpi: f32,
}

impl CompositeImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Horizontal and vertical resolution in dots per inch.
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// True when nothing is selected (zero-width strip).
    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0
    }

    /// Encode as an RGBA PNG carrying the resolution in its `pHYs` chunk.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        if self.is_empty() {
            return Err(Error::EmptySelection);
        }

        let pixels_per_meter = (self.dpi / METERS_PER_INCH).round() as u32;
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: pixels_per_meter,
                yppu: pixels_per_meter,
                unit: png::Unit::Meter,
            }));
            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.pixels.as_raw())?;
            writer.finish()?;
        }
        Ok(bytes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Draws selections into a reusable canvas.
///
/// The canvas is sized for a full selection at the current tile size and is
/// only reallocated when the tile size changes; a resolution change reuses it.
#[derive(Debug, Default)]
pub struct CompositeRenderer {
    canvas: Option<RgbaImage>,
    tile_size: u32,
    allocations: u64,
}

impl CompositeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `ids` in order into a fresh composite.
    ///
    /// Fails only when a canvas for `params.tile_size` cannot be allocated;
    /// the previous canvas is released in that case too.
    pub fn render(
        &mut self,
        catalog: &Catalog,
        ids: &[ItemId],
        params: RenderParameters,
    ) -> Result<CompositeImage> {
        let tile = params.tile_size;
        let canvas = self.canvas_for(tile)?;

        for pixel in canvas.pixels_mut() {
            pixel.0 = [0, 0, 0, 0];
        }

        for (index, &id) in ids.iter().take(MAX_SELECTION).enumerate() {
            let Some(icon) = catalog.icon(id) else {
                continue;
            };
            let scaled = scale_to_tile(icon, tile);
            imageops::replace(canvas, &*scaled, i64::from(tile) * index as i64, 0);
        }

        let count = ids.len().min(MAX_SELECTION) as u32;
        let pixels = imageops::crop_imm(&*canvas, 0, 0, tile * count, tile).to_image();
        debug!(
            "Rendered strip: {} tiles of {}px at {} dpi",
            count, tile, params.dpi
        );

        Ok(CompositeImage {
            pixels,
            dpi: params.dpi,
        })
    }

    fn canvas_for(&mut self, tile: u32) -> Result<&mut RgbaImage> {
        if self.canvas.is_none() || self.tile_size != tile {
            // release before acquiring so only one canvas is ever alive
            self.canvas = None;
            self.canvas = Some(allocate_canvas(tile)?);
            self.tile_size = tile;
            self.allocations += 1;
            debug!(
                "Allocated strip canvas for {}px tiles (allocation #{})",
                tile, self.allocations
            );
        }
        self.canvas.as_mut().ok_or(Error::Allocation {
            width: u64::from(tile) * MAX_SELECTION as u64,
            height: u64::from(tile),
        })
    }

    #[cfg(test)]
    fn allocations(&self) -> u64 {
        self.allocations
    }
}

fn allocate_canvas(tile: u32) -> Result<RgbaImage> {
    let width = u64::from(tile) * MAX_SELECTION as u64;
    let height = u64::from(tile);
    let failed = || Error::Allocation { width, height };

    if tile == 0 {
        return Err(failed());
    }
    let width_px = u32::try_from(width).map_err(|_| failed())?;
    let len = width
        .checked_mul(height)
        .and_then(|area| area.checked_mul(4))
        .and_then(|bytes| usize::try_from(bytes).ok())
        .ok_or_else(failed)?;

    let mut buffer: Vec<u8> = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| failed())?;
    buffer.resize(len, 0);
    RgbaImage::from_raw(width_px, tile, buffer).ok_or_else(failed)
}

fn scale_to_tile(icon: &RgbaImage, tile: u32) -> Cow<'_, RgbaImage> {
    if icon.dimensions() == (tile, tile) {
        Cow::Borrowed(icon)
    } else {
        Cow::Owned(imageops::resize(icon, tile, tile, FilterType::CatmullRom))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
