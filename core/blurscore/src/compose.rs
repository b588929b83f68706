use image::{Rgba, RgbaImage};

use crate::region::Rect;

/// Default outline color: opaque red.
pub const OUTLINE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Copy the pixels of `rect` into a new, independently owned buffer.
///
/// The output is `rect.width() × rect.height()`. Coordinates of `rect` that
/// fall outside `source` are left transparent black and never read. An empty
/// rectangle yields a 0×0 buffer.
pub fn crop_region(source: &RgbaImage, rect: Rect) -> RgbaImage {
    let out_w = rect.width().max(0) as u32;
    let out_h = rect.height().max(0) as u32;
    let mut cropped = RgbaImage::new(out_w, out_h);

    let Some(inside) = rect.clamp_to(source.width(), source.height()) else {
        return cropped;
    };

    for y in inside.min_y..inside.max_y {
        for x in inside.min_x..inside.max_x {
            let pixel = *source.get_pixel(x as u32, y as u32);
            cropped.put_pixel((x - rect.min_x) as u32, (y - rect.min_y) as u32, pixel);
        }
    }

    cropped
}

/// Outline `rect` on a copy of `source`.
///
/// Each edge is `thickness` pixels wide, growing toward the inside of the
/// rectangle. A thickness of 0 is treated as 1. Pixels outside the canvas are
/// skipped, so the rectangle may extend past the image edges.
pub fn draw_rect(source: &RgbaImage, rect: Rect, thickness: u32, color: Rgba<u8>) -> RgbaImage {
    draw_rects(source, std::slice::from_ref(&rect), thickness, color)
}

/// Outline every rectangle in `rects` on a single copy of `source`.
pub fn draw_rects(
    source: &RgbaImage,
    rects: &[Rect],
    thickness: u32,
    color: Rgba<u8>,
) -> RgbaImage {
    let mut canvas = source.clone();
    for rect in rects {
        paint_outline(&mut canvas, *rect, thickness.max(1), color);
    }
    canvas
}

fn paint_outline(canvas: &mut RgbaImage, rect: Rect, thickness: u32, color: Rgba<u8>) {
    if rect.is_empty() {
        return;
    }
    let thickness = thickness.min(i32::MAX as u32) as i32;

    for inset in 0..thickness {
        let top = rect.min_y + inset;
        let bottom = rect.max_y - 1 - inset;
        let left = rect.min_x + inset;
        let right = rect.max_x - 1 - inset;
        if top > bottom || left > right {
            break;
        }

        for x in rect.min_x..rect.max_x {
            put_clipped(canvas, x, top, color);
            put_clipped(canvas, x, bottom, color);
        }
        for y in rect.min_y..rect.max_y {
            put_clipped(canvas, left, y, color);
            put_clipped(canvas, right, y, color);
        }
    }
}

#[inline]
fn put_clipped(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn numbered(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn crop_copies_region() {
        let src = numbered(20, 20);
        let out = crop_region(&src, Rect::new(5, 8, 10, 12));
        assert_eq!(out.dimensions(), (5, 4));
        assert_eq!(out.get_pixel(0, 0), &Rgba([5, 8, 7, 255]));
        assert_eq!(out.get_pixel(4, 3), &Rgba([9, 11, 7, 255]));
    }

    #[test]
    fn crop_leaves_out_of_bounds_transparent() {
        let src = numbered(10, 10);
        let out = crop_region(&src, Rect::new(-2, -2, 4, 4));
        assert_eq!(out.dimensions(), (6, 6));
        assert_eq!(out.get_pixel(0, 0), &BLANK);
        assert_eq!(out.get_pixel(1, 5), &BLANK);
        assert_eq!(out.get_pixel(2, 2), &Rgba([0, 0, 7, 255]));
        assert_eq!(out.get_pixel(5, 5), &Rgba([3, 3, 7, 255]));
    }

    #[test]
    fn crop_does_not_alias_source() {
        let src = numbered(10, 10);
        let mut out = crop_region(&src, Rect::new(0, 0, 5, 5));
        out.put_pixel(0, 0, OUTLINE_COLOR);
        assert_eq!(src.get_pixel(0, 0), &Rgba([0, 0, 7, 255]));
    }

    #[test]
    fn crop_empty_rect_is_empty_image() {
        let out = crop_region(&numbered(10, 10), Rect::new(5, 5, 5, 9));
        assert_eq!(out.dimensions(), (0, 4));
    }

    #[test]
    fn draw_single_pixel_outline() {
        let src = RgbaImage::new(10, 10);
        let out = draw_rect(&src, Rect::new(2, 2, 8, 8), 1, OUTLINE_COLOR);
        assert_eq!(out.get_pixel(2, 2), &OUTLINE_COLOR);
        assert_eq!(out.get_pixel(7, 7), &OUTLINE_COLOR);
        assert_eq!(out.get_pixel(5, 2), &OUTLINE_COLOR);
        assert_eq!(out.get_pixel(2, 5), &OUTLINE_COLOR);
        assert_eq!(out.get_pixel(8, 8), &BLANK);
        assert_eq!(out.get_pixel(3, 3), &BLANK);
        assert_eq!(out.get_pixel(1, 1), &BLANK);
    }

    #[test]
    fn draw_thickness_grows_inward() {
        let src = RgbaImage::new(20, 20);
        let out = draw_rect(&src, Rect::new(2, 2, 18, 18), 3, OUTLINE_COLOR);
        for inset in 0..3 {
            assert_eq!(out.get_pixel(10, 2 + inset), &OUTLINE_COLOR);
            assert_eq!(out.get_pixel(10, 17 - inset), &OUTLINE_COLOR);
            assert_eq!(out.get_pixel(2 + inset, 10), &OUTLINE_COLOR);
            assert_eq!(out.get_pixel(17 - inset, 10), &OUTLINE_COLOR);
        }
        assert_eq!(out.get_pixel(10, 5), &BLANK);
        assert_eq!(out.get_pixel(10, 1), &BLANK);
    }

    #[test]
    fn draw_does_not_touch_source() {
        let src = RgbaImage::new(10, 10);
        let _ = draw_rect(&src, Rect::new(0, 0, 10, 10), 2, OUTLINE_COLOR);
        assert!(src.pixels().all(|p| *p == BLANK));
    }

    #[test]
    fn draw_past_edges_is_clipped() {
        let src = RgbaImage::new(10, 10);
        let out = draw_rect(&src, Rect::new(-5, -5, 5, 5), 1, OUTLINE_COLOR);
        assert_eq!(out.dimensions(), (10, 10));
        // Only the right and bottom edges are visible.
        assert_eq!(out.get_pixel(4, 0), &OUTLINE_COLOR);
        assert_eq!(out.get_pixel(0, 4), &OUTLINE_COLOR);
        assert_eq!(out.get_pixel(0, 0), &BLANK);
    }

    #[test]
    fn draw_rects_outlines_each() {
        let src = RgbaImage::new(30, 30);
        let rects = [Rect::new(0, 0, 10, 10), Rect::new(15, 15, 25, 25)];
        let out = draw_rects(&src, &rects, 1, OUTLINE_COLOR);
        assert_eq!(out.get_pixel(0, 0), &OUTLINE_COLOR);
        assert_eq!(out.get_pixel(24, 24), &OUTLINE_COLOR);
    }

    proptest! {
        #[test]
        fn draw_never_grows_canvas_or_paints_outside_rect(
            width in 1u32..40,
            height in 1u32..40,
            min_x in -60i32..60,
            min_y in -60i32..60,
            w in 0i32..80,
            h in 0i32..80,
            thickness in 0u32..6,
        ) {
            let src = RgbaImage::new(width, height);
            let rect = Rect::new(min_x, min_y, min_x + w, min_y + h);
            let out = draw_rect(&src, rect, thickness, OUTLINE_COLOR);
            prop_assert_eq!(out.dimensions(), (width, height));
            for (x, y, pixel) in out.enumerate_pixels() {
                if *pixel == OUTLINE_COLOR {
                    prop_assert!(rect.contains(x as i32, y as i32));
                }
            }
        }
    }
}
