use ndarray::s;

use crate::overlay::domain::cursor_sprite::CursorSprite;
use crate::shared::frame::Frame;

/// Blends the cursor sprite into frames at the pointer position.
///
/// Per pixel and channel: `out = (1 - a) * background + a * cursor`, with
/// `a` in `[0, 1]`. The blend is accumulated in f32 and rounded back to
/// the frame's 0-255 range before the in-place write. The destination
/// region is clipped to the frame bounds first, so any position is safe —
/// a sprite hanging off an edge blends only its visible part, and a fully
/// off-screen sprite leaves the frame untouched.
pub struct CursorCompositor {
    sprite: CursorSprite,
}

impl CursorCompositor {
    pub fn new(sprite: CursorSprite) -> Self {
        Self { sprite }
    }

    pub fn sprite(&self) -> &CursorSprite {
        &self.sprite
    }

    /// Composites the sprite with its top-left corner at `(x, y)` in frame
    /// coordinates, modifying the frame in place.
    pub fn composite(&self, frame: &mut Frame, x: i32, y: i32) {
        let fw = frame.width() as i32;
        let fh = frame.height() as i32;
        let n = self.sprite.size() as i32;

        // Destination box, clipped to the frame.
        let x1 = x.max(0);
        let y1 = y.max(0);
        let x2 = (x + n).min(fw);
        let y2 = (y + n).min(fh);
        if x1 >= x2 || y1 >= y2 {
            return;
        }

        // Matching source box inside the sprite.
        let sx1 = (x1 - x) as usize;
        let sy1 = (y1 - y) as usize;
        let sx2 = sx1 + (x2 - x1) as usize;
        let sy2 = sy1 + (y2 - y1) as usize;

        let rgb = self.sprite.rgb().slice(s![sy1..sy2, sx1..sx2, ..]);
        let alpha = self.sprite.alpha().slice(s![sy1..sy2, sx1..sx2]);

        let mut view = frame.as_ndarray_mut();
        let mut dst = view.slice_mut(s![
            y1 as usize..y2 as usize,
            x1 as usize..x2 as usize,
            ..
        ]);

        for ((row, col, ch), px) in dst.indexed_iter_mut() {
            let a = alpha[[row, col]];
            let blended = (1.0 - a) * f32::from(*px) + a * f32::from(rgb[[row, col, ch]]);
            *px = blended.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn gray_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(
            vec![value; (width * height * 3) as usize],
            width,
            height,
            0,
        )
    }

    /// Square sprite with a single color and a uniform alpha byte.
    fn solid_sprite(size: u32, rgb: [u8; 3], alpha: u8) -> CursorSprite {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for _ in 0..size * size {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], alpha]);
        }
        CursorSprite::from_rgba(&data, size)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let arr = frame.as_ndarray();
        [arr[[y, x, 0]], arr[[y, x, 1]], arr[[y, x, 2]]]
    }

    #[test]
    fn test_zero_alpha_leaves_background_unchanged() {
        let mut frame = gray_frame(20, 20, 128);
        let original = frame.data().to_vec();
        let compositor = CursorCompositor::new(solid_sprite(4, [255, 0, 0], 0));

        compositor.composite(&mut frame, 5, 5);
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_full_alpha_replaces_background_with_cursor() {
        let mut frame = gray_frame(20, 20, 128);
        let compositor = CursorCompositor::new(solid_sprite(4, [10, 200, 30], 255));

        compositor.composite(&mut frame, 5, 5);
        for y in 5..9 {
            for x in 5..9 {
                assert_eq!(pixel(&frame, x, y), [10, 200, 30]);
            }
        }
    }

    #[test]
    fn test_partial_alpha_interpolates_between_background_and_cursor() {
        let bg = 100u8;
        let cur = 200u8;
        let mut frame = gray_frame(20, 20, bg);
        let compositor = CursorCompositor::new(solid_sprite(2, [cur; 3], 128));

        compositor.composite(&mut frame, 0, 0);

        let a = 128.0 / 255.0;
        let expected = ((1.0 - a) * f32::from(bg) + a * f32::from(cur)).round() as i32;
        for ch in pixel(&frame, 0, 0) {
            let got = i32::from(ch);
            assert!(
                (got - expected).abs() <= 1,
                "blended value {got} should be within 1 of {expected}"
            );
            assert!(got > i32::from(bg) && got < i32::from(cur));
        }
    }

    #[rstest]
    #[case::quarter(64)]
    #[case::half(128)]
    #[case::three_quarters(191)]
    fn test_blend_matches_formula(#[case] alpha: u8) {
        let bg = 40u8;
        let cur = 220u8;
        let mut frame = gray_frame(8, 8, bg);
        let compositor = CursorCompositor::new(solid_sprite(8, [cur; 3], alpha));

        compositor.composite(&mut frame, 0, 0);

        let a = f32::from(alpha) / 255.0;
        let expected = ((1.0 - a) * f32::from(bg) + a * f32::from(cur)).round() as i32;
        let got = i32::from(pixel(&frame, 3, 3)[0]);
        assert!((got - expected).abs() <= 1);
    }

    #[test]
    fn test_pixels_outside_cursor_region_unchanged() {
        let mut frame = gray_frame(20, 20, 128);
        let compositor = CursorCompositor::new(solid_sprite(4, [255, 255, 255], 255));

        compositor.composite(&mut frame, 8, 8);

        assert_eq!(pixel(&frame, 7, 8), [128, 128, 128]);
        assert_eq!(pixel(&frame, 8, 7), [128, 128, 128]);
        assert_eq!(pixel(&frame, 12, 8), [128, 128, 128]);
        assert_eq!(pixel(&frame, 8, 12), [128, 128, 128]);
        assert_eq!(pixel(&frame, 0, 0), [128, 128, 128]);
    }

    #[test]
    fn test_clips_at_right_and_bottom_edges() {
        let mut frame = gray_frame(10, 10, 0);
        let compositor = CursorCompositor::new(solid_sprite(4, [255, 255, 255], 255));

        // Only the top-left 2x2 of the sprite fits.
        compositor.composite(&mut frame, 8, 8);

        assert_eq!(pixel(&frame, 8, 8), [255, 255, 255]);
        assert_eq!(pixel(&frame, 9, 9), [255, 255, 255]);
        assert_eq!(pixel(&frame, 7, 8), [0, 0, 0]);
        assert_eq!(pixel(&frame, 8, 7), [0, 0, 0]);
    }

    #[test]
    fn test_clips_at_top_and_left_edges() {
        let mut frame = gray_frame(10, 10, 0);
        // Distinct corner colors so we can check which sprite part landed.
        let mut data = vec![0u8; 4 * 4 * 4];
        // Bottom-right sprite pixel (row 3, col 3): white, opaque.
        let idx = (3 * 4 + 3) * 4;
        data[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        let compositor = CursorCompositor::new(CursorSprite::from_rgba(&data, 4));

        // Sprite hangs off the top-left corner; only its bottom-right
        // quadrant is visible, with sprite pixel (3,3) landing at (1,1).
        compositor.composite(&mut frame, -2, -2);

        assert_eq!(pixel(&frame, 1, 1), [255, 255, 255]);
        assert_eq!(pixel(&frame, 2, 2), [0, 0, 0]);
    }

    #[rstest]
    #[case::past_right(10, 0)]
    #[case::past_bottom(0, 10)]
    #[case::far_negative(-4, -4)]
    #[case::far_away(1000, 1000)]
    fn test_fully_off_screen_is_a_no_op(#[case] x: i32, #[case] y: i32) {
        let mut frame = gray_frame(10, 10, 77);
        let original = frame.data().to_vec();
        let compositor = CursorCompositor::new(solid_sprite(4, [255, 0, 0], 255));

        compositor.composite(&mut frame, x, y);
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_sprite_larger_than_frame_is_clipped_to_frame() {
        let mut frame = gray_frame(4, 4, 0);
        let compositor = CursorCompositor::new(solid_sprite(16, [9, 9, 9], 255));

        compositor.composite(&mut frame, -4, -4);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(pixel(&frame, x, y), [9, 9, 9]);
            }
        }
    }
}
