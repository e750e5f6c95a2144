//! Pipeline orchestrators: grayscale conversion fans into the two
//! detection paths, which share no mutable state afterwards.

use image::{Rgb, RgbImage};

use crate::composite::fill_rects;
use crate::error::Result;
use crate::glyph::Rect;
use crate::gray::luma;
use crate::hough::{find_circles, Circle, CircleParams};
use crate::ocr::GlyphLocator;

/// Circle detection result for a single image.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Detection {
    /// Detected circles, sorted by accumulator vote descending.
    pub circles: Vec<Circle>,
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
}

impl Detection {
    /// Construct an empty result for an image with the provided dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            circles: Vec::new(),
            image_size: [width, height],
        }
    }
}

/// Detect circular features in a color buffer.
///
/// The input is borrowed immutably and never modified; the caller keeps the
/// original buffer for re-encoding alongside the circle list.
pub fn detect_circles(img: &RgbImage, params: &CircleParams) -> Result<Detection> {
    let (w, h) = img.dimensions();
    let gray = luma(img);
    let circles = find_circles(&gray, params)?;
    tracing::debug!(n_circles = circles.len(), "circle detection done");
    Ok(Detection {
        circles,
        image_size: [w, h],
    })
}

/// Redact glyph regions reported by the OCR collaborator.
///
/// Takes ownership of the buffer and returns it with every glyph box
/// filled by `color`. A collaborator error propagates before any pixel is
/// touched, so the caller never observes a partially redacted buffer.
pub fn redact_text(
    mut img: RgbImage,
    locator: &dyn GlyphLocator,
    color: Rgb<u8>,
) -> Result<RgbImage> {
    let height = img.height();
    let gray = luma(&img);
    let boxes = locator.locate_glyphs(&gray)?;
    let rects: Vec<Rect> = boxes.into_iter().map(|b| b.to_raster(height)).collect();
    tracing::debug!(n_rects = rects.len(), "glyph translation done");
    fill_rects(&mut img, &rects, color);
    Ok(img)
}
