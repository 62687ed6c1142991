//! The operations behind each icon resolution stage.

use std::path::Path;

use crate::error::IconError;

use super::decode;

/// Icon sources. Every method returns PNG bytes.
pub trait IconBackend: Send + Sync {
    /// Decode a plain image file.
    fn decode_raster(&self, path: &Path) -> Result<Vec<u8>, IconError>;

    /// Decode the primary image of an icon container file.
    fn decode_container(&self, path: &Path) -> Result<Vec<u8>, IconError>;

    /// Extract the icon resource at `index` from an executable, library or
    /// icon file.
    fn extract_resource(&self, path: &Path, index: i32) -> Result<Vec<u8>, IconError>;

    /// The icon the OS shell shows for the file.
    fn shell_icon(&self, path: &Path) -> Result<Vec<u8>, IconError>;
}

/// Decodes files with `image` and asks the OS for icon resources where the
/// platform has them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBackend;

impl IconBackend for SystemBackend {
    fn decode_raster(&self, path: &Path) -> Result<Vec<u8>, IconError> {
        decode::decode_raster(path)
    }

    fn decode_container(&self, path: &Path) -> Result<Vec<u8>, IconError> {
        decode::decode_ico(path)
    }

    #[cfg(windows)]
    fn extract_resource(&self, path: &Path, index: i32) -> Result<Vec<u8>, IconError> {
        let image = super::win32::extract_icon(path, index)?;
        decode::encode_png(&image::DynamicImage::ImageRgba8(image))
    }

    #[cfg(not(windows))]
    fn extract_resource(&self, _path: &Path, _index: i32) -> Result<Vec<u8>, IconError> {
        Err(IconError::Unsupported)
    }

    #[cfg(windows)]
    fn shell_icon(&self, path: &Path) -> Result<Vec<u8>, IconError> {
        let image = super::win32::shell_icon(path)?;
        decode::encode_png(&image::DynamicImage::ImageRgba8(image))
    }

    #[cfg(not(windows))]
    fn shell_icon(&self, _path: &Path) -> Result<Vec<u8>, IconError> {
        Err(IconError::Unsupported)
    }
}
