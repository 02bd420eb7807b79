use std::f64::consts::PI;

use image::Rgba;

use crate::error::KernelError;
use crate::imageops_kernel::kernel::{Kernel, PixelEvaluator, Weights};
use crate::imageops_kernel::sampling::neighbors;
use crate::utils::truncate_to_u8;
use crate::Raster;

/// Per-channel weighted sum over the in-bounds neighborhood.
///
/// Weight mass that falls outside the raster is dropped, not redistributed,
/// so with normalized weights edge pixels come out slightly darker and more
/// transparent than interior ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSum;

impl PixelEvaluator for WeightedSum {
    fn evaluate(&self, x: u32, y: u32, weights: &Weights, source: &Raster) -> Rgba<u8> {
        let mut sums = [0.0f64; 4];
        for (weight, pixel) in neighbors(source, x, y, weights) {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += f64::from(channel) * weight;
            }
        }
        Rgba(sums.map(truncate_to_u8))
    }
}

impl Kernel {
    /// Build a plain weighted-sum kernel from arbitrary weights.
    ///
    /// Out-of-bounds neighbors are skipped and each channel is truncated to
    /// 8 bits without clamping.
    pub fn weighted(weights: Weights) -> Self {
        Self::new(weights, WeightedSum)
    }
}

/// Compute the normalized `size x size` Gaussian weight matrix.
///
/// # Errors
///
/// * `KernelError::EvenGaussianSize` if `size` is even
/// * `KernelError::DegenerateGaussian` if the weights sum to zero
pub fn gaussian_weights(size: u32, sigma: f64) -> Result<Weights, KernelError> {
    if size % 2 == 0 {
        return Err(KernelError::EvenGaussianSize(size));
    }

    let half = (size / 2) as f64;
    let sigma_sq = sigma * sigma;
    let coefficient = 1.0 / (2.0 * PI * sigma_sq);

    let side = size as usize;
    let weights = Weights::from_fn(side, side, |row, col| {
        let dy = row as f64 - half;
        let dx = col as f64 - half;
        coefficient * (-(dx * dx + dy * dy) / (2.0 * sigma_sq)).exp()
    })?;

    // normalize the kernel
    let sum = weights.sum();
    if sum == 0.0 || !sum.is_finite() {
        return Err(KernelError::DegenerateGaussian { size, sigma });
    }
    let values = weights.as_slice().iter().map(|w| w / sum).collect();
    Weights::new(side, side, values)
}

/// Create a Gaussian blur kernel.
///
/// # Arguments
///
/// * `size` - The side length of the kernel. Must be odd.
/// * `sigma` - The standard deviation of the Gaussian.
///
/// # Returns
///
/// A kernel whose weights sum to 1.0, evaluated with [`WeightedSum`].
pub fn gaussian_blur(size: u32, sigma: f64) -> Result<Kernel, KernelError> {
    let weights = gaussian_weights(size, sigma)?;
    log::debug!("built {size}x{size} gaussian kernel with sigma {sigma}");
    Ok(Kernel::weighted(weights))
}
