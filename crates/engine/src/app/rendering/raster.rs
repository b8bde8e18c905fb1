//! Software rasterization into a row-major RGBA8 frame. Everything clips
//! against the frame, so callers can pass off-screen coordinates.

use crate::app::assets::Image;

use super::Rgba;

pub(super) fn clear(frame: &mut [u8], color: Rgba) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

pub(super) fn write_pixel_rgba_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    color: Rgba,
) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let offset = (y as usize * width as usize + x as usize) * 4;
    let Some(pixel) = frame.get_mut(offset..offset + 4) else {
        return;
    };
    pixel.copy_from_slice(&color);
}

pub(super) fn draw_rect_outline(
    frame: &mut [u8],
    width: u32,
    height: u32,
    (left, top): (i32, i32),
    (right, bottom): (i32, i32),
    color: Rgba,
) {
    if left > right || top > bottom {
        return;
    }
    // Clamp loop ranges so huge rectangles do not walk off-screen pixels.
    let x_start = left.max(-1);
    let x_end = right.min(width as i32);
    let y_start = top.max(-1);
    let y_end = bottom.min(height as i32);

    for x in x_start..=x_end {
        write_pixel_rgba_clipped(frame, width, height, x, top, color);
        write_pixel_rgba_clipped(frame, width, height, x, bottom, color);
    }
    for y in y_start..=y_end {
        write_pixel_rgba_clipped(frame, width, height, left, y, color);
        write_pixel_rgba_clipped(frame, width, height, right, y, color);
    }
}

/// Copies `image` with its top-left corner at `top_left`. Fully transparent
/// source pixels are skipped; everything else overwrites the frame.
pub(super) fn blit_image(
    frame: &mut [u8],
    width: u32,
    height: u32,
    image: &Image,
    (left, top): (i32, i32),
) {
    let right = left.saturating_add(image.width() as i32);
    let bottom = top.saturating_add(image.height() as i32);
    let draw_left = left.max(0);
    let draw_top = top.max(0);
    let draw_right = right.min(width as i32);
    let draw_bottom = bottom.min(height as i32);
    if draw_left >= draw_right || draw_top >= draw_bottom {
        return;
    }

    let source = image.rgba();
    let source_width = image.width() as usize;
    let frame_width = width as usize;
    for out_y in draw_top..draw_bottom {
        let src_row = (out_y - top) as usize * source_width * 4;
        let dst_row = out_y as usize * frame_width * 4;
        for out_x in draw_left..draw_right {
            let src = src_row + (out_x - left) as usize * 4;
            let alpha = source[src + 3];
            if alpha == 0 {
                continue;
            }
            let dst = dst_row + out_x as usize * 4;
            frame[dst..dst + 4].copy_from_slice(&source[src..src + 4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba = [0, 0, 0, 255];
    const WHITE: Rgba = [255, 255, 255, 255];

    fn frame(width: u32, height: u32) -> Vec<u8> {
        let mut frame = vec![0; width as usize * height as usize * 4];
        clear(&mut frame, WHITE);
        frame
    }

    fn pixel_at(frame: &[u8], width: u32, x: u32, y: u32) -> Rgba {
        let offset = (y as usize * width as usize + x as usize) * 4;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&frame[offset..offset + 4]);
        pixel
    }

    #[test]
    fn out_of_frame_writes_are_ignored() {
        let mut empty: Vec<u8> = Vec::new();
        write_pixel_rgba_clipped(&mut empty, 0, 0, 0, 0, BLACK);

        let mut tiny = frame(1, 1);
        write_pixel_rgba_clipped(&mut tiny, 1, 1, -1, 0, BLACK);
        write_pixel_rgba_clipped(&mut tiny, 1, 1, 1, 0, BLACK);
        write_pixel_rgba_clipped(&mut tiny, 1, 1, 0, 99, BLACK);
        assert_eq!(pixel_at(&tiny, 1, 0, 0), WHITE);
    }

    #[test]
    fn outline_leaves_the_interior_untouched() {
        let mut canvas = frame(5, 5);

        draw_rect_outline(&mut canvas, 5, 5, (0, 0), (4, 4), BLACK);

        assert_eq!(pixel_at(&canvas, 5, 0, 0), BLACK);
        assert_eq!(pixel_at(&canvas, 5, 4, 2), BLACK);
        assert_eq!(pixel_at(&canvas, 5, 2, 4), BLACK);
        assert_eq!(pixel_at(&canvas, 5, 2, 2), WHITE);
    }

    #[test]
    fn outline_partially_off_screen_draws_visible_edges() {
        let mut canvas = frame(4, 4);

        draw_rect_outline(&mut canvas, 4, 4, (-10, 1), (2, 100), BLACK);

        assert_eq!(pixel_at(&canvas, 4, 2, 3), BLACK);
        assert_eq!(pixel_at(&canvas, 4, 0, 1), BLACK);
        assert_eq!(pixel_at(&canvas, 4, 0, 2), WHITE);
    }

    #[test]
    fn blit_skips_transparent_pixels_and_clips() {
        let mut canvas = frame(3, 3);
        let mut rgba = [255, 0, 0, 255].repeat(4);
        rgba[12..16].copy_from_slice(&[0, 255, 0, 0]);
        let image = Image::from_rgba(2, 2, rgba).expect("image");

        blit_image(&mut canvas, 3, 3, &image, (1, -1));

        // only the bottom image row lands in the frame, on row 0
        assert_eq!(pixel_at(&canvas, 3, 1, 0), [255, 0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 3, 2, 0), WHITE);
        assert_eq!(pixel_at(&canvas, 3, 1, 1), WHITE);
    }

    #[test]
    fn blit_copies_translucent_pixels_verbatim() {
        let mut canvas = frame(1, 1);
        let image = Image::filled(1, 1, [9, 8, 7, 6]);

        blit_image(&mut canvas, 1, 1, &image, (0, 0));

        assert_eq!(pixel_at(&canvas, 1, 0, 0), [9, 8, 7, 6]);
    }
}
