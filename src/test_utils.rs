//! Test utilities for imageops-kernel
//!
//! This module provides common fixtures for testing kernel passes.
//! It is only compiled when running tests.

use image::{Pixel, Rgba};

use crate::Raster;

/// Creates a test RGBA image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values including alpha:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> Raster {
    let mut image = Raster::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates a raster filled with a single color.
pub fn create_uniform_raster(width: u32, height: u32, color: Rgba<u8>) -> Raster {
    Raster::from_pixel(width, height, color)
}

/// Creates a raster where every pixel differs from its neighbors.
///
/// Red grows with x, green with y, blue with both; alpha alternates
/// between 255 and 200 in a checkerboard.
pub fn create_gradient_raster(width: u32, height: u32) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        let alpha = if (x + y) % 2 == 0 { 255 } else { 200 };
        Rgba([
            (x * 17 % 256) as u8,
            (y * 29 % 256) as u8,
            ((x * 7 + y * 11) % 256) as u8,
            alpha,
        ])
    })
}

/// Compares two pixel values with a tolerance for floating-point precision errors.
///
/// # Returns
/// `true` if all channel values differ by at most `tolerance`
pub fn pixels_approx_equal(expected: &Rgba<u8>, actual: &Rgba<u8>, tolerance: u8) -> bool {
    expected
        .channels()
        .iter()
        .zip(actual.channels())
        .all(|(e, a)| e.abs_diff(*a) <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgba_image_with_valid_input_creates_image() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 0]));
    }

    #[test]
    fn create_gradient_raster_has_distinct_neighbors() {
        let image = create_gradient_raster(5, 5);
        assert_ne!(image.get_pixel(1, 1), image.get_pixel(2, 1));
        assert_ne!(image.get_pixel(1, 1), image.get_pixel(1, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([17, 0, 7, 200]));
    }

    #[test]
    fn pixels_approx_equal_with_tolerant_comparison_returns_true() {
        let pixel1 = Rgba([100, 150, 200, 255]);
        let pixel2 = Rgba([101, 149, 200, 255]);
        let pixel3 = Rgba([105, 145, 205, 255]);

        assert!(pixels_approx_equal(&pixel1, &pixel2, 1));
        assert!(!pixels_approx_equal(&pixel1, &pixel3, 1));
    }
}
