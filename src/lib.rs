//! Kernel-based 2-D convolution filters for RGBA raster images.
//!
//! A [`Kernel`] pairs a weight matrix with a [`PixelEvaluator`]; the
//! [`ApplyKernel`] trait runs it over every pixel of a raster and returns a
//! new raster of the same size.
//!
//! ```no_run
//! use imageops_kernel::{box_blur, load_image, save_image, ApplyKernel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = load_image("input.png")?;
//! let blurred = image.apply_kernel(&box_blur(3)?)?;
//! save_image(&blurred, "output.png")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod imageops_kernel;
mod utils;

#[cfg(test)]
mod test_utils;

use image::Rgba;

pub use error::{IoError, KernelError, ScaleError};
pub use imageops_kernel::apply_kernel::ApplyKernel;
pub use imageops_kernel::box_blur::{box_blur, NeighborhoodMean};
pub use imageops_kernel::gaussian_blur::{gaussian_blur, gaussian_weights, WeightedSum};
pub use imageops_kernel::io::{
    extension_of, load_image, save_image, to_raster, FormatRegistry, JpegRasterEncoder,
    PngRasterEncoder, RasterEncoder, JPEG, JPEG_QUALITY, JPG, PNG,
};
pub use imageops_kernel::kernel::{Kernel, PixelEvaluator, Weights};
pub use imageops_kernel::laplacian::{laplacian, GrayscaleResponse, LAPLACIAN_WEIGHTS};
pub use imageops_kernel::sampling::{neighbors, sample_count};
pub use imageops_kernel::scale::{down_scale, up_scale, NearestResize};
pub use imageproc::definitions::Image;

/// 8-bit RGBA raster, the input and output type of every kernel pass.
pub type Raster = Image<Rgba<u8>>;
