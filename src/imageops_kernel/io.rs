//! Loading and saving rasters.
//!
//! - `load_image`: decode a PNG/JPEG file into an RGBA8 raster, sniffing the format.
//! - `to_raster`: convert any decoded image into an RGBA8 raster.
//! - `save_image`: encode a raster, choosing the format from the path's extension.
//! - `FormatRegistry`: the extension to encoder table behind `save_image`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader};

use crate::error::IoError;
use crate::Raster;

pub const PNG: &str = ".png";
pub const JPG: &str = ".jpg";
pub const JPEG: &str = ".jpeg";

/// Quality used for JPEG output.
pub const JPEG_QUALITY: u8 = 75;

/// Encodes a raster into one file format.
pub trait RasterEncoder: Send + Sync {
    fn encode(&self, raster: &Raster, writer: &mut dyn Write) -> Result<(), ImageError>;
}

/// Lossless PNG output, alpha preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngRasterEncoder;

impl RasterEncoder for PngRasterEncoder {
    fn encode(&self, raster: &Raster, writer: &mut dyn Write) -> Result<(), ImageError> {
        PngEncoder::new(writer).write_image(
            raster.as_raw(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
    }
}

/// Baseline JPEG output. JPEG has no alpha channel, so alpha is dropped.
#[derive(Debug, Clone, Copy)]
pub struct JpegRasterEncoder {
    pub quality: u8,
}

impl Default for JpegRasterEncoder {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
        }
    }
}

impl RasterEncoder for JpegRasterEncoder {
    fn encode(&self, raster: &Raster, writer: &mut dyn Write) -> Result<(), ImageError> {
        let rgb = DynamicImage::ImageRgba8(raster.clone()).into_rgb8();
        JpegEncoder::new_with_quality(writer, self.quality).write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
    }
}

/// Mapping from file extension (including the leading `.`) to encoder.
///
/// Extensions are matched exactly, so `.PNG` is not `.png`.
pub struct FormatRegistry {
    encoders: HashMap<String, Box<dyn RasterEncoder>>,
}

impl Default for FormatRegistry {
    /// `.png`, `.jpg` and `.jpeg`.
    fn default() -> Self {
        Self::empty()
            .with(PNG, PngRasterEncoder)
            .with(JPG, JpegRasterEncoder::default())
            .with(JPEG, JpegRasterEncoder::default())
    }
}

impl FormatRegistry {
    /// A registry with no formats.
    pub fn empty() -> Self {
        Self {
            encoders: HashMap::new(),
        }
    }

    /// Register `encoder` for `extension`, replacing any previous entry.
    pub fn register<E>(&mut self, extension: impl Into<String>, encoder: E)
    where
        E: RasterEncoder + 'static,
    {
        self.encoders.insert(extension.into(), Box::new(encoder));
    }

    /// Builder form of [`FormatRegistry::register`].
    pub fn with<E>(mut self, extension: impl Into<String>, encoder: E) -> Self
    where
        E: RasterEncoder + 'static,
    {
        self.register(extension, encoder);
        self
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.encoders.contains_key(extension)
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.encoders.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Encode `raster` into the file at `path`, creating or truncating it.
    ///
    /// The extension is validated before the file is touched, so an
    /// unsupported path leaves the filesystem unchanged.
    pub fn save(&self, raster: &Raster, path: impl AsRef<Path>) -> Result<(), IoError> {
        let path = path.as_ref();
        let extension = extension_of(path)?;
        let encoder = self
            .encoders
            .get(&extension)
            .ok_or_else(|| IoError::UnsupportedExtension {
                extension,
                path: path.to_path_buf(),
            })?;

        let mut writer = BufWriter::new(File::create(path)?);
        encoder.encode(raster, &mut writer)?;
        writer.flush()?;

        log::info!(
            "saved {}x{} image to {}",
            raster.width(),
            raster.height(),
            path.display()
        );
        Ok(())
    }
}

/// Everything from the last `.` in `path`, the dot included.
///
/// The whole path is searched, not only the file name, so a dot in a
/// directory name can be picked up when the file name has none.
pub fn extension_of(path: &Path) -> Result<String, IoError> {
    let text = path.to_string_lossy();
    text.rfind('.')
        .map(|index| text[index..].to_string())
        .ok_or_else(|| IoError::MissingExtension(path.to_path_buf()))
}

/// Load an image from disk and convert it to an RGBA8 raster.
///
/// The format is detected from the file's content, so the extension does
/// not need to match.
pub fn load_image(path: impl AsRef<Path>) -> Result<Raster, IoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileDoesNotExist(path.to_path_buf()));
    }

    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    log::debug!(
        "loaded {}x{} image from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(to_raster(&image))
}

/// Convert any decoded image to an RGBA8 raster with origin at (0, 0).
pub fn to_raster(image: &DynamicImage) -> Raster {
    image.to_rgba8()
}

/// Save `raster` using the default `.png` / `.jpg` / `.jpeg` registry.
pub fn save_image(raster: &Raster, path: impl AsRef<Path>) -> Result<(), IoError> {
    FormatRegistry::default().save(raster, path)
}
