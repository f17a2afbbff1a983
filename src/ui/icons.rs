//! Image conversion helpers for the UI
//!
//! Window icon loading, and conversion of catalog icons and the composed
//! strip into egui images.

use eframe::egui;
use image::{GenericImageView, RgbaImage};
use std::sync::Arc;

/// Window icon embedded at compile time.
#[cfg(feature = "bundle-icon")]
const EMBEDDED_ICON: &[u8] = include_bytes!("../../assets/icons/icon_256.png");

/// Load icon data from PNG bytes.
///
/// Returns `None` if the PNG couldn't be decoded.
pub fn load_icon_from_png(png_data: &[u8]) -> Option<egui::IconData> {
    let image = image::load_from_memory(png_data).ok()?;
    let (width, height) = image.dimensions();

    Some(egui::IconData {
        rgba: image.to_rgba8().into_raw(),
        width,
        height,
    })
}

/// Get the window icon.
///
/// Tries the embedded icon (with the `bundle-icon` feature), then
/// `assets/icons/` relative to the working directory.
pub fn get_app_icon() -> Option<Arc<egui::IconData>> {
    #[cfg(feature = "bundle-icon")]
    if let Some(icon) = load_icon_from_png(EMBEDDED_ICON) {
        log::info!("Loaded embedded application icon");
        return Some(Arc::new(icon));
    }

    let icon_paths = ["assets/icons/icon_256.png", "assets/icons/icon_64.png"];

    for path in &icon_paths {
        let path = std::path::Path::new(path);
        if let Some(icon) = std::fs::read(path)
            .ok()
            .and_then(|data| load_icon_from_png(&data))
        {
            log::info!("Loaded application icon from: {}", path.display());
            return Some(Arc::new(icon));
        }
    }

    log::debug!("No application icon found, using default");
    None
}

/// Copy an RGBA image into an egui image.
pub fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}
