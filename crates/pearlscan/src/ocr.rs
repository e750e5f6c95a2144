//! OCR collaborator seam.

use image::GrayImage;

use crate::error::Result;
use crate::glyph::GlyphBox;

/// External glyph-detection contract.
///
/// Implementations receive the shared grayscale preprocessing output and
/// return zero or more glyph boxes in bottom-left-origin coordinates, with
/// no ordering guarantee. Errors surface as
/// [`Error::Collaborator`](crate::Error::Collaborator) and are propagated,
/// never retried.
pub trait GlyphLocator {
    fn locate_glyphs(&self, gray: &GrayImage) -> Result<Vec<GlyphBox>>;
}
