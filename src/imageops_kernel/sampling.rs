//! Neighborhood sampling shared by the built-in kernels.
//!
//! Window cells that fall outside the raster are skipped. They are neither
//! clamped nor wrapped and do not count toward any average, so edge and
//! corner pixels are computed from fewer samples than interior pixels.

use image::Rgba;
use itertools::iproduct;

use crate::imageops_kernel::kernel::Weights;
use crate::Raster;

/// Iterates the in-bounds neighbors of `(x, y)` under the window of `weights`.
///
/// Yields `(weight, pixel)` pairs, row by row, where `weight` is the matrix
/// cell the neighbor maps to (`row = dy + half_rows`, `col = dx + half_cols`).
pub fn neighbors<'a>(
    source: &'a Raster,
    x: u32,
    y: u32,
    weights: &'a Weights,
) -> impl Iterator<Item = (f64, &'a Rgba<u8>)> + 'a {
    let (width, height) = source.dimensions();
    let origin_x = i64::from(x) - weights.half_cols() as i64;
    let origin_y = i64::from(y) - weights.half_rows() as i64;

    iproduct!(0..weights.rows(), 0..weights.cols()).filter_map(move |(row, col)| {
        let nx = origin_x + col as i64;
        let ny = origin_y + row as i64;
        if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
            return None;
        }
        Some((weights.get(row, col), source.get_pixel(nx as u32, ny as u32)))
    })
}

/// Number of in-bounds neighbors of `(x, y)` under the window of `weights`.
pub fn sample_count(source: &Raster, x: u32, y: u32, weights: &Weights) -> usize {
    neighbors(source, x, y, weights).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_gradient_raster;

    #[test]
    fn interior_pixel_sees_full_window() {
        let source = create_gradient_raster(5, 5);
        let weights = Weights::filled(3, 3, 1.0).unwrap();
        assert_eq!(sample_count(&source, 2, 2, &weights), 9);
    }

    #[test]
    fn edge_and_corner_pixels_skip_out_of_bounds_cells() {
        let source = create_gradient_raster(5, 5);
        let weights = Weights::filled(3, 3, 1.0).unwrap();
        assert_eq!(sample_count(&source, 0, 0, &weights), 4);
        assert_eq!(sample_count(&source, 2, 0, &weights), 6);
        assert_eq!(sample_count(&source, 4, 4, &weights), 4);
    }

    #[test]
    fn even_window_reaches_further_on_negative_side() {
        let source = create_gradient_raster(6, 6);
        let weights = Weights::filled(4, 4, 1.0).unwrap();

        // offsets -2..=1 on both axes
        assert_eq!(sample_count(&source, 0, 0, &weights), 4);
        assert_eq!(sample_count(&source, 5, 5, &weights), 9);
        assert_eq!(sample_count(&source, 2, 2, &weights), 16);
    }

    #[test]
    fn weights_map_rows_to_y_and_columns_to_x() {
        let source = create_gradient_raster(3, 3);
        // only the cell right of center is weighted
        let weights = Weights::from_rows(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]])
            .unwrap();

        let weighted: Vec<_> = neighbors(&source, 1, 1, &weights)
            .filter(|(weight, _)| *weight != 0.0)
            .map(|(_, pixel)| *pixel)
            .collect();

        assert_eq!(weighted, vec![*source.get_pixel(2, 1)]);
    }

    #[test]
    fn single_pixel_raster_only_samples_itself() {
        let source = create_gradient_raster(1, 1);
        let weights = Weights::filled(5, 5, 1.0).unwrap();
        let samples: Vec<_> = neighbors(&source, 0, 0, &weights).collect();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].1, source.get_pixel(0, 0));
    }
}
