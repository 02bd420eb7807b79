use image::Rgba;

use crate::imageops_kernel::kernel::{Kernel, PixelEvaluator, Weights};
use crate::imageops_kernel::sampling::neighbors;
use crate::utils::{grayscale_intensity, truncate_to_u8};
use crate::Raster;

/// 4-neighbor discrete Laplacian.
pub const LAPLACIAN_WEIGHTS: [[f64; 3]; 3] = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

/// Weighted sum of neighbor intensities, written out as an opaque gray pixel.
///
/// The sum is not clamped: negative responses wrap around when narrowed to
/// 8 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleResponse;

impl PixelEvaluator for GrayscaleResponse {
    fn evaluate(&self, x: u32, y: u32, weights: &Weights, source: &Raster) -> Rgba<u8> {
        let sum: f64 = neighbors(source, x, y, weights)
            .map(|(weight, pixel)| f64::from(grayscale_intensity(pixel)) * weight)
            .sum();
        let value = truncate_to_u8(sum);
        Rgba([value, value, value, u8::MAX])
    }
}

/// Create a 3x3 Laplacian edge-detection kernel.
///
/// The input is treated as grayscale; the output is always fully opaque.
pub fn laplacian() -> Kernel {
    Kernel::new(Weights::from_array(LAPLACIAN_WEIGHTS), GrayscaleResponse)
}
