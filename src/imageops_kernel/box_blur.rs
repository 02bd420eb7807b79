use image::Rgba;

use crate::error::KernelError;
use crate::imageops_kernel::kernel::{Kernel, PixelEvaluator, Weights};
use crate::imageops_kernel::sampling::neighbors;
use crate::utils::truncate_to_u8;
use crate::Raster;

/// Unweighted mean of the in-bounds neighborhood.
///
/// Neighbors outside the raster count toward neither the sum nor the sample
/// count, so edge pixels average fewer samples than interior ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborhoodMean;

impl PixelEvaluator for NeighborhoodMean {
    fn evaluate(&self, x: u32, y: u32, weights: &Weights, source: &Raster) -> Rgba<u8> {
        let mut sums = [0.0f64; 4];
        let mut pixels = 0usize;

        for (weight, pixel) in neighbors(source, x, y, weights) {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += f64::from(channel) * weight;
            }
            pixels += 1;
        }

        // the center pixel is always in bounds, so pixels >= 1
        let count = pixels as f64;
        Rgba(sums.map(|sum| truncate_to_u8(sum / count)))
    }
}

/// Create a box blur (uniform mean) kernel.
///
/// # Arguments
///
/// * `size` - Side length of the kernel in pixels
///
/// # Returns
///
/// A kernel over a `size x size` matrix of ones
///
/// # Errors
///
/// * `KernelError::EmptyWeights` if `size` is 0
///
/// # Note
///
/// The radius is `size / 2` rounded down, so an even `size` gives an
/// asymmetric window reaching one pixel further on the negative side.
pub fn box_blur(size: u32) -> Result<Kernel, KernelError> {
    let size = size as usize;
    let weights = Weights::filled(size, size, 1.0)?;
    Ok(Kernel::new(weights, NeighborhoodMean))
}
