use crate::error::ScaleError;
use crate::Raster;

/// Nearest-neighbor resampling plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestResize {
    /// New width
    pub new_width: u32,
    /// New height
    pub new_height: u32,
    /// Sample both axes with the smaller of the two scale factors
    pub keep_aspect_ratio: bool,
}

impl NearestResize {
    /// Create a new nearest-neighbor resizer.
    pub const fn new(
        new_width: u32,
        new_height: u32,
        keep_aspect_ratio: bool,
    ) -> Result<Self, ScaleError> {
        if new_width == 0 || new_height == 0 {
            return Err(ScaleError::InvalidTargetDimensions {
                width: new_width,
                height: new_height,
            });
        }
        Ok(Self {
            new_width,
            new_height,
            keep_aspect_ratio,
        })
    }

    /// Uniform scale factor, the smaller of the two per-axis factors.
    pub fn scale_for(&self, width: u32, height: u32) -> f64 {
        let scale_x = f64::from(self.new_width) / f64::from(width);
        let scale_y = f64::from(self.new_height) / f64::from(height);
        scale_x.min(scale_y)
    }

    /// Resample `source`.
    pub fn resize(&self, source: &Raster) -> Result<Raster, ScaleError> {
        let (width, height) = source.dimensions();
        if width == 0 || height == 0 {
            return Err(ScaleError::EmptyImage { width, height });
        }

        let (out_width, out_height, factor_x, factor_y) = if self.keep_aspect_ratio {
            let scale = self.scale_for(width, height);
            let out_width = ((f64::from(width) * scale) as u32).max(1);
            let out_height = ((f64::from(height) * scale) as u32).max(1);
            (out_width, out_height, scale, scale)
        } else {
            (
                self.new_width,
                self.new_height,
                f64::from(self.new_width) / f64::from(width),
                f64::from(self.new_height) / f64::from(height),
            )
        };

        log::debug!("resizing {width}x{height} image to {out_width}x{out_height}");

        Ok(Raster::from_fn(out_width, out_height, |x, y| {
            let source_x = nearest_index(x, factor_x, width);
            let source_y = nearest_index(y, factor_y, height);
            *source.get_pixel(source_x, source_y)
        }))
    }
}

/// `floor(destination / factor)`, kept inside `[0, len)`.
#[inline]
fn nearest_index(destination: u32, factor: f64, len: u32) -> u32 {
    let index = (f64::from(destination) / factor).floor() as u32;
    index.min(len - 1)
}

/// Shrink `source` toward `new_width x new_height`.
///
/// With `keep_aspect_ratio`, returns an unchanged copy when the uniform
/// factor is above 1. Without it, each axis is clamped to the source size
/// independently, so no axis is ever enlarged.
pub fn down_scale(
    source: &Raster,
    new_width: u32,
    new_height: u32,
    keep_aspect_ratio: bool,
) -> Result<Raster, ScaleError> {
    let resize = NearestResize::new(new_width, new_height, keep_aspect_ratio)?;
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(ScaleError::EmptyImage { width, height });
    }
    if keep_aspect_ratio {
        if resize.scale_for(width, height) > 1.0 {
            return Ok(source.clone());
        }
        return resize.resize(source);
    }
    NearestResize::new(new_width.min(width), new_height.min(height), false)?.resize(source)
}

/// Enlarge `source` toward `new_width x new_height`.
///
/// With `keep_aspect_ratio`, returns an unchanged copy when the uniform
/// factor is below 1. Without it, each axis is clamped to the source size
/// independently, so no axis is ever shrunk.
pub fn up_scale(
    source: &Raster,
    new_width: u32,
    new_height: u32,
    keep_aspect_ratio: bool,
) -> Result<Raster, ScaleError> {
    let resize = NearestResize::new(new_width, new_height, keep_aspect_ratio)?;
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(ScaleError::EmptyImage { width, height });
    }
    if keep_aspect_ratio {
        if resize.scale_for(width, height) < 1.0 {
            return Ok(source.clone());
        }
        return resize.resize(source);
    }
    NearestResize::new(new_width.max(width), new_height.max(height), false)?.resize(source)
}
