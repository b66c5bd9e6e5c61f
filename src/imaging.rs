//! Image codec and geometry primitives
//!
//! Decoding with explicit validation, canvas-preserving quarter-turn rotation
//! with border replication, mirroring, and black rectangle fills.

use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::fmt;
use std::path::Path;

use crate::pipeline::{MaskError, Result};

/// Fill color for redactions
const MASK_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Quarter-turn rotation.
///
/// [`rotate_about_center`] turns counterclockwise, [`rotate_exact`] clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Probe order used by orientation search
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Angle in degrees
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Decode an image file into an RGB buffer.
///
/// Missing files, undecodable data and zero-sized images are all rejected
/// here so that no detection call ever sees an invalid buffer.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(MaskError::ImageNotFound(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|e| MaskError::ImageDecode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgb = img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(MaskError::EmptyImage(path.to_path_buf()));
    }

    Ok(rgb)
}

/// Rotate about the integer center `(w/2, h/2)` keeping the canvas size.
///
/// Pixels that would sample outside the source replicate the nearest border
/// pixel, so non-square images lose their corners instead of gaining black bars.
pub fn rotate_about_center(image: &RgbImage, rotation: Rotation) -> RgbImage {
    let (width, height) = image.dimensions();
    if rotation == Rotation::Deg0 || width == 0 || height == 0 {
        return image.clone();
    }

    let cx = (width / 2) as i64;
    let cy = (height / 2) as i64;
    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;

    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let (x, y) = (x as i64, y as i64);
        // Inverse mapping from destination to source
        let (sx, sy) = match rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (cx + cy - y, x - cx + cy),
            Rotation::Deg180 => (2 * cx - x, 2 * cy - y),
            Rotation::Deg270 => (y - cy + cx, cx + cy - x),
        };
        let sx = sx.clamp(0, max_x) as u32;
        let sy = sy.clamp(0, max_y) as u32;
        *pixel = *image.get_pixel(sx, sy);
    }

    out
}

/// True clockwise quarter-turn; 90° and 270° swap width and height
pub fn rotate_exact(image: &RgbImage, rotation: Rotation) -> RgbImage {
    match rotation {
        Rotation::Deg0 => image.clone(),
        Rotation::Deg90 => imageops::rotate90(image),
        Rotation::Deg180 => imageops::rotate180(image),
        Rotation::Deg270 => imageops::rotate270(image),
    }
}

/// Mirror left-to-right
pub fn mirror_horizontal(image: &RgbImage) -> RgbImage {
    imageops::flip_horizontal(image)
}

/// Mirror top-to-bottom
pub fn mirror_vertical(image: &RgbImage) -> RgbImage {
    imageops::flip_vertical(image)
}

/// Black-fill the rectangle with inclusive corners, clipped to the canvas
pub fn fill_black(image: &mut RgbImage, x1: i32, y1: i32, x2: i32, y2: i32) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let (left, right) = (x1.min(x2), x1.max(x2));
    let (top, bottom) = (y1.min(y2), y1.max(y2));
    let max_x = i32::try_from(width - 1).unwrap_or(i32::MAX);
    let max_y = i32::try_from(height - 1).unwrap_or(i32::MAX);
    if right < 0 || bottom < 0 || left > max_x || top > max_y {
        return;
    }

    let (left, right) = (left.max(0), right.min(max_x));
    let (top, bottom) = (top.max(0), bottom.min(max_y));
    let rect = Rect::at(left, top).of_size((right - left) as u32 + 1, (bottom - top) as u32 + 1);
    draw_filled_rect_mut(image, rect, MASK_COLOR);
}
