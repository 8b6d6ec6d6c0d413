use ndarray::{Array2, Array3};

/// An RGB cursor image paired with its normalized alpha mask.
///
/// Both arrays are derived once from a single RGBA buffer, so their
/// dimensions are equal by construction. The sprite is immutable after
/// load and shared read-only across all recording iterations.
#[derive(Clone, Debug)]
pub struct CursorSprite {
    rgb: Array3<u8>,
    alpha: Array2<f32>,
}

impl CursorSprite {
    /// Splits interleaved RGBA bytes into color channels and an alpha mask
    /// scaled to `[0.0, 1.0]`. `data` must hold `size * size * 4` bytes.
    pub fn from_rgba(data: &[u8], size: u32) -> Self {
        let n = size as usize;
        debug_assert_eq!(
            data.len(),
            n * n * 4,
            "data length must equal size * size * 4"
        );
        let mut rgb = Array3::zeros((n, n, 3));
        let mut alpha = Array2::zeros((n, n));
        for (i, px) in data.chunks_exact(4).enumerate() {
            let (row, col) = (i / n, i % n);
            rgb[[row, col, 0]] = px[0];
            rgb[[row, col, 1]] = px[1];
            rgb[[row, col, 2]] = px[2];
            alpha[[row, col]] = f32::from(px[3]) / 255.0;
        }
        Self { rgb, alpha }
    }

    /// Side length in pixels; the sprite is always square.
    pub fn size(&self) -> u32 {
        self.rgb.shape()[0] as u32
    }

    pub fn rgb(&self) -> &Array3<u8> {
        &self.rgb
    }

    pub fn alpha(&self) -> &Array2<f32> {
        &self.alpha
    }
}
