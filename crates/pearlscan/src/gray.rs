//! Luma-weighted grayscale conversion.

use image::{GrayImage, Luma, RgbImage};

/// BT.601 luma weights, matching the classic color-to-gray conversion the
/// rest of the pipeline was tuned against.
const WR: f32 = 0.299;
const WG: f32 = 0.587;
const WB: f32 = 0.114;

/// Convert a color buffer to a single-channel intensity buffer.
///
/// Dimensions are preserved; the input is untouched. Deterministic, no
/// failure modes.
pub fn luma(img: &RgbImage) -> GrayImage {
    let (w, h) = img.dimensions();
    let mut out = GrayImage::new(w, h);
    for (x, y, px) in img.enumerate_pixels() {
        let [r, g, b] = px.0;
        let v = WR * r as f32 + WG * g as f32 + WB * b as f32;
        out.put_pixel(x, y, Luma([v.round().clamp(0.0, 255.0) as u8]));
    }
    out
}
