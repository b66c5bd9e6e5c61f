//! Orientation Resolution
//!
//! Photographed cards arrive rotated or mirrored. The resolver probes up to
//! eight canvas orientations and picks the first one in which the detector
//! can read a full Aadhaar number.
//!
//! # Algorithm
//!
//! 1. Rotate the original by 0°, 90°, 180°, 270° (canvas preserved)
//! 2. Stop at the first rotation where a confident result matches the pattern
//! 3. Otherwise mirror the original and repeat; flip the winner back
//! 4. Otherwise fall back to the untouched original

use image::RgbImage;
use std::fmt;

use crate::detection::{Result, TextDetector};
use crate::imaging::{mirror_horizontal, rotate_about_center, Rotation};
use crate::pattern::{find_full_number, normalize_whitespace};

/// Default confidence floor for orientation probes
pub const DEFAULT_ORIENTATION_MIN_CONFIDENCE: f32 = 0.3;

/// Outcome of orientation search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationOutcome {
    /// A rotation (possibly of the mirrored image) exposed the number
    Found {
        rotation: Rotation,
        mirrored: bool,
        probes: usize,
    },
    /// No orientation matched; the original image is used
    NotFound { probes: usize },
}

impl OrientationOutcome {
    /// Whether an orientation was found
    pub fn is_found(&self) -> bool {
        matches!(self, OrientationOutcome::Found { .. })
    }

    /// Number of detector calls made during the search
    pub fn probes(&self) -> usize {
        match self {
            OrientationOutcome::Found { probes, .. } | OrientationOutcome::NotFound { probes } => {
                *probes
            }
        }
    }
}

impl fmt::Display for OrientationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrientationOutcome::Found {
                rotation,
                mirrored: false,
                ..
            } => write!(f, "{} rotation", rotation),
            OrientationOutcome::Found {
                rotation,
                mirrored: true,
                ..
            } => write!(f, "{} rotation of mirrored image", rotation),
            OrientationOutcome::NotFound { .. } => write!(f, "not found"),
        }
    }
}

/// Orientation resolver
pub struct OrientationResolver;

impl OrientationResolver {
    /// Find the orientation in which a full number is legible.
    ///
    /// Always yields an image; only detector failures are errors.
    pub fn resolve<D: TextDetector + ?Sized>(
        detector: &mut D,
        image: &RgbImage,
        min_confidence: f32,
    ) -> Result<(RgbImage, OrientationOutcome)> {
        let mut probes = 0;

        if let Some((rotated, rotation)) =
            Self::search_rotations(detector, image, min_confidence, &mut probes)?
        {
            tracing::info!(angle = rotation.degrees(), "Found Aadhaar number orientation");
            let outcome = OrientationOutcome::Found {
                rotation,
                mirrored: false,
                probes,
            };
            return Ok((rotated, outcome));
        }

        tracing::warn!("No Aadhaar number in normal orientation, trying mirrored image");

        let mirrored = mirror_horizontal(image);
        if let Some((rotated, rotation)) =
            Self::search_rotations(detector, &mirrored, min_confidence, &mut probes)?
        {
            tracing::info!(
                angle = rotation.degrees(),
                "Found Aadhaar number in mirrored image, flipping back"
            );
            let outcome = OrientationOutcome::Found {
                rotation,
                mirrored: true,
                probes,
            };
            return Ok((mirror_horizontal(&rotated), outcome));
        }

        tracing::warn!("Aadhaar number not detected even after mirroring, using original image");
        Ok((image.clone(), OrientationOutcome::NotFound { probes }))
    }

    /// Probe the four rotations in order, returning the first match
    fn search_rotations<D: TextDetector + ?Sized>(
        detector: &mut D,
        image: &RgbImage,
        min_confidence: f32,
        probes: &mut usize,
    ) -> Result<Option<(RgbImage, Rotation)>> {
        for rotation in Rotation::ALL {
            let rotated = rotate_about_center(image, rotation);
            *probes += 1;
            let detections = detector.detect(&rotated)?;

            let matched = detections
                .iter()
                .filter(|d| d.confidence >= min_confidence)
                .any(|d| find_full_number(&normalize_whitespace(&d.text)).is_some());

            if matched {
                return Ok(Some((rotated, rotation)));
            }
        }

        Ok(None)
    }
}
