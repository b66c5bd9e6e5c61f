//! Masked image output

use image::RgbImage;
use std::path::Path;

use crate::pipeline::{MaskError, Result};

/// Output writer
pub struct OutputWriter;

impl OutputWriter {
    /// Write the image, creating parent directories as needed.
    ///
    /// The encoder is chosen from the file extension. Existing files are
    /// overwritten.
    pub fn write(image: &RgbImage, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        image.save(path).map_err(|e| MaskError::ImageEncode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), "Masked image saved");
        Ok(())
    }
}
