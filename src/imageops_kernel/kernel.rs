use std::fmt;
use std::sync::Arc;

use image::Rgba;

use crate::error::KernelError;
use crate::Raster;

/// Row-major matrix of real-valued kernel weights.
///
/// A neighbor at offset `(dx, dy)` from the pixel under evaluation maps to
/// `(row, col) = (dy + half_rows, dx + half_cols)`, where `half_rows` and
/// `half_cols` are `rows / 2` and `cols / 2`. For even sizes the window
/// therefore reaches one cell further on the negative side.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Weights {
    /// Create a weight matrix from row-major values.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, KernelError> {
        if rows == 0 || cols == 0 {
            return Err(KernelError::EmptyWeights { rows, cols });
        }
        let expected = rows * cols;
        if values.len() != expected {
            return Err(KernelError::WeightsLengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    /// Create a weight matrix from nested rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, KernelError> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some((row, ragged)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != cols)
        {
            return Err(KernelError::RaggedRows {
                row,
                expected: cols,
                actual: ragged.as_ref().len(),
            });
        }
        let values: Vec<f64> = rows.iter().flat_map(|row| row.as_ref().iter().copied()).collect();
        Self::new(rows.len(), cols, values)
    }

    /// Create a matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, KernelError> {
        Self::new(rows, cols, vec![value; rows * cols])
    }

    /// Create a matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self, KernelError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                values.push(f(row, col));
            }
        }
        Self::new(rows, cols, values)
    }

    /// Create a matrix from a fixed-size array literal.
    ///
    /// `R` and `C` must be non-zero.
    pub(crate) fn from_array<const R: usize, const C: usize>(rows: [[f64; C]; R]) -> Self {
        debug_assert!(R > 0 && C > 0);
        Self {
            rows: R,
            cols: C,
            values: rows.concat(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Offset of the center row, `rows / 2`.
    pub fn half_rows(&self) -> usize {
        self.rows / 2
    }

    /// Offset of the center column, `cols / 2`.
    pub fn half_cols(&self) -> usize {
        self.cols / 2
    }

    /// Weight at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "weight index out of bounds");
        self.values[row * self.cols + col]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Row-major view of the weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Computes one output pixel of a kernel pass.
///
/// Implementations receive the coordinate under evaluation, the kernel's
/// weights and the *original* source raster, which is never the partially
/// written output. Evaluators must be pure so a pass is reproducible in any
/// pixel order.
///
/// Any `Fn(u32, u32, &Weights, &Raster) -> Rgba<u8>` closure is an evaluator.
pub trait PixelEvaluator: Send + Sync {
    fn evaluate(&self, x: u32, y: u32, weights: &Weights, source: &Raster) -> Rgba<u8>;
}

impl<F> PixelEvaluator for F
where
    F: Fn(u32, u32, &Weights, &Raster) -> Rgba<u8> + Send + Sync,
{
    #[inline]
    fn evaluate(&self, x: u32, y: u32, weights: &Weights, source: &Raster) -> Rgba<u8> {
        self(x, y, weights, source)
    }
}

/// A convolution kernel: a weight matrix paired with the rule that turns a
/// neighborhood into one output pixel.
///
/// Kernels are immutable and cheap to clone, so one kernel can be reused for
/// any number of passes.
#[derive(Clone)]
pub struct Kernel {
    weights: Weights,
    evaluator: Arc<dyn PixelEvaluator>,
}

impl Kernel {
    /// Pair `weights` with an evaluator.
    pub fn new<E>(weights: Weights, evaluator: E) -> Self
    where
        E: PixelEvaluator + 'static,
    {
        Self {
            weights,
            evaluator: Arc::new(evaluator),
        }
    }

    /// Build a kernel from a closure rule.
    pub fn from_fn<F>(weights: Weights, rule: F) -> Self
    where
        F: Fn(u32, u32, &Weights, &Raster) -> Rgba<u8> + Send + Sync + 'static,
    {
        Self::new(weights, rule)
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Evaluate the kernel at `(x, y)` of `source`.
    #[inline]
    pub fn evaluate(&self, x: u32, y: u32, source: &Raster) -> Rgba<u8> {
        self.evaluator.evaluate(x, y, &self.weights, source)
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}
