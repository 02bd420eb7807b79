use image::DynamicImage;

use crate::error::KernelError;
use crate::imageops_kernel::io::to_raster;
use crate::imageops_kernel::kernel::Kernel;
use crate::Raster;

/// Trait providing kernel application over every pixel of an image.
///
/// The input is never modified. Each output pixel is computed from the
/// untouched input and written exactly once into a freshly allocated raster
/// of the same size.
pub trait ApplyKernel {
    /// Output type of the pass
    type Output;

    /// Error type that can occur during the pass
    type Error;

    /// Apply `kernel` to every pixel.
    ///
    /// # Errors
    ///
    /// * The image has zero width or height
    fn apply_kernel(&self, kernel: &Kernel) -> Result<Self::Output, Self::Error>;
}

impl ApplyKernel for Raster {
    type Output = Self;
    type Error = KernelError;

    fn apply_kernel(&self, kernel: &Kernel) -> Result<Self::Output, Self::Error> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Err(KernelError::EmptyImage { width, height });
        }

        log::debug!(
            "applying {}x{} kernel to {width}x{height} image",
            kernel.weights().rows(),
            kernel.weights().cols()
        );

        Ok(convolve(self, kernel))
    }
}

impl ApplyKernel for DynamicImage {
    type Output = Raster;
    type Error = KernelError;

    fn apply_kernel(&self, kernel: &Kernel) -> Result<Self::Output, Self::Error> {
        to_raster(self).apply_kernel(kernel)
    }
}

#[cfg(not(feature = "rayon"))]
fn convolve(source: &Raster, kernel: &Kernel) -> Raster {
    let (width, height) = source.dimensions();
    Raster::from_fn(width, height, |x, y| kernel.evaluate(x, y, source))
}

#[cfg(feature = "rayon")]
fn convolve(source: &Raster, kernel: &Kernel) -> Raster {
    use rayon::prelude::*;

    let (width, height) = source.dimensions();
    let mut output = Raster::new(width, height);
    output
        .par_enumerate_pixels_mut()
        .for_each(|(x, y, pixel)| *pixel = kernel.evaluate(x, y, source));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imageops_kernel::kernel::Weights;
    use crate::test_utils::{create_gradient_raster, create_test_rgba_image};
    use image::Rgba;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn apply_kernel_preserves_dimensions() {
        let image = create_gradient_raster(7, 3);
        let kernel = Kernel::weighted(Weights::filled(3, 3, 0.1).unwrap());
        let result = image.apply_kernel(&kernel).unwrap();
        assert_eq!(result.dimensions(), (7, 3));
    }

    #[test]
    fn apply_kernel_on_empty_image_returns_error() {
        let image = Raster::new(0, 4);
        let kernel = Kernel::weighted(Weights::filled(1, 1, 1.0).unwrap());
        assert_eq!(
            image.apply_kernel(&kernel).unwrap_err(),
            KernelError::EmptyImage {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn apply_kernel_evaluates_every_pixel_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let kernel = Kernel::from_fn(Weights::filled(1, 1, 1.0).unwrap(), move |x, y, _, _| {
            counter.fetch_add(1, Ordering::Relaxed);
            Rgba([x as u8, y as u8, 0, 255])
        });

        let image = create_gradient_raster(5, 4);
        let result = image.apply_kernel(&kernel).unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 20);
        for (x, y, pixel) in result.enumerate_pixels() {
            assert_eq!(*pixel, Rgba([x as u8, y as u8, 0, 255]));
        }
    }

    #[test]
    fn apply_kernel_reads_original_input_not_partial_output() {
        // copies the left neighbor; a pass that fed back its own output
        // would smear column 0 across the whole row
        let kernel = Kernel::from_fn(Weights::filled(1, 1, 1.0).unwrap(), |x, y, _, source| {
            *source.get_pixel(x.saturating_sub(1), y)
        });

        let image = create_gradient_raster(4, 1);
        let result = image.apply_kernel(&kernel).unwrap();

        assert_eq!(result.get_pixel(0, 0), image.get_pixel(0, 0));
        assert_eq!(result.get_pixel(2, 0), image.get_pixel(1, 0));
        assert_eq!(result.get_pixel(3, 0), image.get_pixel(2, 0));
    }

    #[test]
    fn apply_kernel_leaves_input_untouched() {
        let image = create_test_rgba_image();
        let before = image.clone();
        let kernel = Kernel::from_fn(Weights::filled(1, 1, 1.0).unwrap(), |_, _, _, _| {
            Rgba([1, 2, 3, 4])
        });

        let result = image.apply_kernel(&kernel).unwrap();

        assert_eq!(image, before);
        assert!(result.pixels().all(|p| *p == Rgba([1, 2, 3, 4])));
    }

    #[test]
    fn apply_kernel_on_dynamic_image_converts_to_rgba() {
        let image = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            2,
            2,
            image::Rgb([10, 20, 30]),
        ));
        let kernel = Kernel::weighted(Weights::filled(1, 1, 1.0).unwrap());

        let result = image.apply_kernel(&kernel).unwrap();

        assert!(result.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn kernel_is_reusable_across_passes() {
        let kernel = crate::box_blur(3).unwrap();
        let first = create_gradient_raster(6, 6).apply_kernel(&kernel).unwrap();
        let second = create_gradient_raster(6, 6).apply_kernel(&kernel).unwrap();
        assert_eq!(first, second);
    }
}
