//! Glyph bounding boxes and the bottom-left → top-left coordinate flip.
//!
//! OCR engines report glyph boxes with y measured upward from the image's
//! bottom edge; raster buffers measure y downward from the top. The flip
//! lives here as an explicit, tested step so the convention can be swapped
//! if the OCR collaborator changes.

/// A character-level bounding box as reported by the OCR collaborator,
/// in bottom-left-origin coordinates.
///
/// The collaborator contract does not guarantee `right >= left` or
/// `top >= bottom`; [`GlyphBox::to_raster`] tolerates inverted extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlyphBox {
    /// Left edge (pixels from the left).
    pub left: i32,
    /// Bottom edge (pixels up from the bottom).
    pub bottom: i32,
    /// Right edge (pixels from the left).
    pub right: i32,
    /// Top edge (pixels up from the bottom).
    pub top: i32,
}

/// An axis-aligned rectangle in top-left-origin pixel space, bounds
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl GlyphBox {
    /// Translate into raster coordinates for an image of the given height.
    ///
    /// Inverted extents are normalized by swapping, with a diagnostic, so a
    /// malformed box degrades to a well-formed rectangle instead of failing
    /// the whole call.
    pub fn to_raster(self, height: u32) -> Rect {
        let h = height as i32;
        let mut rect = Rect {
            x0: self.left,
            y0: h - self.top,
            x1: self.right,
            y1: h - self.bottom,
        };
        if rect.x1 < rect.x0 || rect.y1 < rect.y0 {
            tracing::warn!(?self, "glyph box with inverted extent, normalizing");
            if rect.x1 < rect.x0 {
                std::mem::swap(&mut rect.x0, &mut rect.x1);
            }
            if rect.y1 < rect.y0 {
                std::mem::swap(&mut rect.y0, &mut rect.y1);
            }
        }
        rect
    }
}

impl Rect {
    /// Inverse of [`GlyphBox::to_raster`] for a well-formed rectangle.
    pub fn to_glyph(self, height: u32) -> GlyphBox {
        let h = height as i32;
        GlyphBox {
            left: self.x0,
            bottom: h - self.y1,
            right: self.x1,
            top: h - self.y0,
        }
    }
}
