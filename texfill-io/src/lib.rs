//! Image file I/O for texfill
//!
//! Loads pictures of any format the `image` crate can recognise into
//! [`Rgba8Image`]s and writes fill results back out, PNG by default.

pub mod error;

pub use error::*;

use image::{ColorType, ImageEncoder, ImageFormat};
use std::path::Path;
use texfill_core::{Result, Rgba8Image};

/// Load an image from disk, guessing the format from its contents, and convert it to RGBA8
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Rgba8Image> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImageIoError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let decoded = image::io::Reader::open(path)
        .map_err(ImageIoError::from)?
        .with_guessed_format()
        .map_err(ImageIoError::from)?
        .decode()
        .map_err(|e| ImageIoError::DecodeError {
            message: format!("{}: {}", path.display(), e),
        })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Loaded {} ({}x{})", path.display(), width, height);
    Rgba8Image::from_raw(width, height, rgba.into_raw())
}

/// Decode an in-memory encoded image into RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<Rgba8Image> {
    let decoded = image::load_from_memory(bytes).map_err(|e| ImageIoError::DecodeError {
        message: e.to_string(),
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Rgba8Image::from_raw(width, height, rgba.into_raw())
}

/// Pick an output format from the file extension; no extension means PNG
pub fn format_for_path(path: &Path) -> Result<ImageFormat> {
    match path.extension().and_then(|s| s.to_str()) {
        None => Ok(ImageFormat::Png),
        Some(ext) => ImageFormat::from_extension(ext).ok_or_else(|| {
            ImageIoError::InvalidFormat {
                format: ext.to_string(),
            }
            .into()
        }),
    }
}

/// Save an RGBA8 image, choosing the encoder from the file extension
pub fn save_image<P: AsRef<Path>>(path: P, image: &Rgba8Image) -> Result<()> {
    let path = path.as_ref();
    let format = format_for_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    image::save_buffer_with_format(
        path,
        image.as_bytes(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
        format,
    )
    .map_err(|e| ImageIoError::EncodeError {
        message: format!("{}: {}", path.display(), e),
    })?;

    log::debug!("Saved {} ({}x{}, {:?})", path.display(), image.width(), image.height(), format);
    Ok(())
}

/// Encode an RGBA8 image as PNG bytes
pub fn encode_png(image: &Rgba8Image) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(image.as_bytes(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(|e| ImageIoError::EncodeError {
            message: e.to_string(),
        })?;
    Ok(bytes)
}
