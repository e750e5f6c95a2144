//! Opaque filled-rectangle compositing.

use image::{Rgb, RgbImage};

use crate::glyph::Rect;

/// Fill every pixel of each rectangle with `color`, bounds inclusive.
///
/// Rectangles are applied in sequence; later rectangles win on overlap.
/// Coordinates outside the buffer are clipped silently, so a box hanging
/// off the edge changes only its in-bounds pixels and a fully out-of-bounds
/// box changes nothing.
pub fn fill_rects(img: &mut RgbImage, rects: &[Rect], color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    for rect in rects {
        let x0 = rect.x0.max(0) as u32;
        let y0 = rect.y0.max(0) as u32;
        let x1 = rect.x1.min(w as i32 - 1);
        let y1 = rect.y1.min(h as i32 - 1);
        if x1 < rect.x0.max(0) || y1 < rect.y0.max(0) {
            continue;
        }
        for y in y0..=y1 as u32 {
            for x in x0..=x1 as u32 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Rgb<u8> = Rgb([255, 0, 0]);
    const BG: Rgb<u8> = Rgb([10, 10, 10]);

    fn canvas(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, BG)
    }

    #[test]
    fn fills_inclusive_bounds() {
        let mut img = canvas(20, 20);
        fill_rects(
            &mut img,
            &[Rect {
                x0: 5,
                y0: 5,
                x1: 10,
                y1: 8,
            }],
            FILL,
        );
        for y in 0..20 {
            for x in 0..20 {
                let inside = (5..=10).contains(&x) && (5..=8).contains(&y);
                let expected = if inside { FILL } else { BG };
                assert_eq!(*img.get_pixel(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn out_of_bounds_rect_is_clipped() {
        let mut img = canvas(10, 10);
        fill_rects(
            &mut img,
            &[Rect {
                x0: 7,
                y0: -3,
                x1: 15,
                y1: 2,
            }],
            FILL,
        );
        for y in 0..10 {
            for x in 0..10 {
                let inside = (7..=9).contains(&x) && (0..=2).contains(&y);
                let expected = if inside { FILL } else { BG };
                assert_eq!(*img.get_pixel(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn fully_out_of_bounds_rect_changes_nothing() {
        let mut img = canvas(10, 10);
        let before = img.clone();
        fill_rects(
            &mut img,
            &[Rect {
                x0: 50,
                y0: 50,
                x1: 60,
                y1: 60,
            }],
            FILL,
        );
        assert_eq!(img.as_raw(), before.as_raw());
    }

    #[test]
    fn later_rect_wins_on_overlap() {
        let mut img = canvas(10, 10);
        let blue = Rgb([0, 0, 255]);
        fill_rects(
            &mut img,
            &[
                Rect {
                    x0: 0,
                    y0: 0,
                    x1: 5,
                    y1: 5,
                },
                Rect {
                    x0: 3,
                    y0: 3,
                    x1: 8,
                    y1: 8,
                },
            ],
            FILL,
        );
        fill_rects(
            &mut img,
            &[Rect {
                x0: 4,
                y0: 4,
                x1: 6,
                y1: 6,
            }],
            blue,
        );
        assert_eq!(*img.get_pixel(5, 5), blue);
        assert_eq!(*img.get_pixel(2, 2), FILL);
    }

    #[test]
    fn filling_twice_is_idempotent() {
        let rects = [Rect {
            x0: 1,
            y0: 1,
            x1: 8,
            y1: 4,
        }];
        let mut once = canvas(12, 12);
        fill_rects(&mut once, &rects, FILL);
        let mut twice = once.clone();
        fill_rects(&mut twice, &rects, FILL);
        assert_eq!(once.as_raw(), twice.as_raw());
    }
}
