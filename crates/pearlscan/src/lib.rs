//! pearlscan — circular-feature detection and glyph-region redaction.
//!
//! The pipeline stages are:
//!
//! 1. **Gray** – luma-weighted grayscale conversion shared by both pipelines.
//! 2. **Hough** – gradient-voting circle detection: Scharr edges, center
//!    accumulator at `dp` resolution, distance-based non-maximum suppression,
//!    radius recovery from an edge-distance histogram.
//! 3. **Glyph** – translation of OCR glyph boxes from bottom-left-origin
//!    coordinates into raster (top-left-origin) rectangles.
//! 4. **Composite** – opaque filled-rectangle redaction with bounds clipping.
//!
//! # Public API
//! The surface is intentionally small:
//! - [`detect_circles`] and [`redact_text`] as primary entry points
//! - [`CircleParams`] for detector tuning
//! - the [`GlyphLocator`] collaborator trait and its [`GlyphBox`] output
//!
//! The OCR engine itself and image byte decode/encode are external
//! collaborators; this crate operates on decoded pixel buffers only.

mod composite;
mod error;
mod glyph;
mod gray;
mod hough;
mod ocr;
mod pipeline;
#[cfg(test)]
pub(crate) mod test_utils;

pub use composite::fill_rects;
pub use error::{Error, Result};
pub use glyph::{GlyphBox, Rect};
pub use gray::luma;
pub use hough::{find_circles, Circle, CircleParams};
pub use ocr::GlyphLocator;
pub use pipeline::{detect_circles, redact_text, Detection};
