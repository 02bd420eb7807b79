use std::path::PathBuf;

use thiserror::Error;

/// Error type for kernel construction and kernel application
///
/// Construction errors are returned instead of producing a kernel, so a
/// caller never ends up holding a half-built filter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// The weight matrix has zero rows or zero columns
    #[error("Kernel weights must be at least 1x1, got {rows}x{cols}")]
    EmptyWeights { rows: usize, cols: usize },

    /// The number of weight values does not match the matrix shape
    ///
    /// This error is returned by `Weights::new` when `values.len()`
    /// differs from `rows * cols`.
    #[error("Expected {expected} weight values for the matrix shape, got {actual}")]
    WeightsLengthMismatch { expected: usize, actual: usize },

    /// A row passed to `Weights::from_rows` differs in length from the first row
    #[error("Weight row {row} has {actual} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A Gaussian kernel was requested with an even size
    ///
    /// Gaussian kernels need a center cell, so the size must be odd.
    #[error("Gaussian kernel size must be odd, got {0}")]
    EvenGaussianSize(u32),

    /// The Gaussian weights summed to zero and cannot be normalized
    ///
    /// This happens for degenerate sigma values, e.g. a sigma so large
    /// that the leading coefficient underflows to zero.
    #[error("Gaussian kernel weights cannot be normalized (size {size}, sigma {sigma})")]
    DegenerateGaussian { size: u32, sigma: f64 },

    /// The raster passed to the engine has no pixels
    #[error("Cannot apply a kernel to an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Error type for loading and saving rasters
#[derive(Debug, Error)]
pub enum IoError {
    /// The file to load does not exist
    #[error("File does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// The save path contains no `.`, so no format can be chosen
    #[error("Path has no file extension: {0}")]
    MissingExtension(PathBuf),

    /// No encoder is registered for the path's extension
    #[error("Can't save {extension} images: {path}")]
    UnsupportedExtension { extension: String, path: PathBuf },

    /// Creating or writing the file failed
    #[error("Failed to manipulate the file. {0}")]
    File(#[from] std::io::Error),

    /// Decoding or encoding the image failed
    #[error("Failed to decode or encode the image. {0}")]
    Image(#[from] image::ImageError),
}

/// Error type for nearest-neighbor resampling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    /// The requested output size has a zero dimension
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidTargetDimensions { width: u32, height: u32 },

    /// The source raster has no pixels
    #[error("Cannot resample an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}
