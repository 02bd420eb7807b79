//! Internal utility functions for imageops-kernel.
//!
//! This module contains the channel arithmetic shared by the built-in kernels.

use image::Rgba;

/// Narrows an accumulated channel value to 8 bits.
///
/// The value is truncated toward zero and then wrapped modulo 256, so it is
/// *not* clamped: `-4.0` becomes `252` and `256.0` becomes `0`. Values that
/// already lie in `[0, 256)` are simply truncated.
///
/// # Arguments
///
/// * `value` - The accumulated channel value
///
/// # Returns
///
/// The low 8 bits of the truncated value
#[inline]
pub fn truncate_to_u8(value: f64) -> u8 {
    (value as i64) as u8
}

/// Computes the grayscale intensity of a pixel as the mean of its color channels.
///
/// The mean is taken on 16-bit widened channels (`c * 257`) and narrowed back
/// with a right shift, which keeps the result identical to averaging in the
/// 16-bit color domain. Alpha is ignored.
///
/// # Arguments
///
/// * `pixel` - The pixel to convert
///
/// # Returns
///
/// The 8-bit intensity
#[inline]
pub fn grayscale_intensity(pixel: &Rgba<u8>) -> u8 {
    let Rgba([red, green, blue, _]) = *pixel;
    let sum = (u32::from(red) + u32::from(green) + u32::from(blue)) * 257;
    ((sum / 3) >> 8) as u8
}
