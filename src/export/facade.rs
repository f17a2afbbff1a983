//! Copy operations offered to the UI.

use super::clipboard::{ClipboardSink, ContentKind};
use super::fragment::build_html_fragment;
use crate::engine::CompositeImage;
use crate::error::{Error, Result};
use log::{debug, info};

/// Cell colors for the spreadsheet fragment, hex digits without `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellColors {
    pub background: String,
    pub border: String,
}

/// Copy the strip and its labels as a spreadsheet fragment.
///
/// An empty strip produces an empty row and no image data.
pub fn export_all<S: AsRef<str>>(
    image: &CompositeImage,
    labels: &[S],
    colors: &CellColors,
    sink: &mut dyn ClipboardSink,
) -> Result<()> {
    let png = if image.is_empty() {
        Vec::new()
    } else {
        image.encode_png()?
    };
    let fragment = build_html_fragment(&colors.background, &colors.border, &png, labels);
    debug!(
        "HTML fragment: {} byte header, {} byte body, EndHTML {}",
        fragment.header().len(),
        fragment.body().len(),
        fragment.offsets().end_html
    );
    sink.set_content(ContentKind::Html, &fragment.payload())?;
    info!(
        "Copied {} cells with a {}x{} strip ({} PNG bytes)",
        labels.len(),
        image.width(),
        image.height(),
        png.len()
    );
    Ok(())
}

/// Copy the labels as tab-separated plain text.
pub fn export_labels_only<S: AsRef<str>>(labels: &[S], sink: &mut dyn ClipboardSink) -> Result<()> {
    let text = labels
        .iter()
        .map(|label| label.as_ref())
        .collect::<Vec<_>>()
        .join("\t");
    sink.set_content(ContentKind::Text, &text)?;
    info!("Copied {} labels as text", labels.len());
    Ok(())
}

/// Copy the strip itself as an image.
pub fn export_image_only(image: &CompositeImage, sink: &mut dyn ClipboardSink) -> Result<()> {
    if image.is_empty() {
        return Err(Error::EmptySelection);
    }
    sink.set_image(image)?;
    info!("Copied {}x{} strip image", image.width(), image.height());
    Ok(())
}
