//! Shared test utilities for image-based unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Render a synthetic filled disc on a uniform background.
///
/// Pixels at distance `d <= radius` from `center` get `disc_pix`,
/// everything else `bg_pix`.
pub(crate) fn draw_disc_gray(
    w: u32,
    h: u32,
    center: [f32; 2],
    radius: f32,
    disc_pix: u8,
    bg_pix: u8,
) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - center[0];
            let dy = y as f32 - center[1];
            let d = (dx * dx + dy * dy).sqrt();
            let pix = if d <= radius { disc_pix } else { bg_pix };
            img.put_pixel(x, y, Luma([pix]));
        }
    }
    img
}

/// Color variant of [`draw_disc_gray`] with neutral-gray intensities.
pub(crate) fn draw_disc_rgb(
    w: u32,
    h: u32,
    center: [f32; 2],
    radius: f32,
    disc_pix: u8,
    bg_pix: u8,
) -> RgbImage {
    let mut img = RgbImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - center[0];
            let dy = y as f32 - center[1];
            let d = (dx * dx + dy * dy).sqrt();
            let pix = if d <= radius { disc_pix } else { bg_pix };
            img.put_pixel(x, y, Rgb([pix, pix, pix]));
        }
    }
    img
}
