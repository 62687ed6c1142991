//! Image file decoding and the canonical PNG encoding.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::IconError;

/// Plain image files decoded directly.
pub const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Multi-image icon containers.
pub const CONTAINER_EXTENSIONS: &[&str] = &["ico"];

/// Encode an image as PNG.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, IconError> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Decode an image file, detecting the format from its content, and
/// re-encode it as PNG.
pub fn decode_raster(path: &Path) -> Result<Vec<u8>, IconError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    encode_png(&image)
}

/// Decode the primary (largest) image of an `.ico` file as PNG.
pub fn decode_ico(path: &Path) -> Result<Vec<u8>, IconError> {
    let reader = BufReader::new(File::open(path)?);
    let image = image::load(reader, ImageFormat::Ico)?;
    encode_png(&image)
}
