//! Detection module core types
//!
//! Contains the raw engine output, the normalized text region, and the
//! detector trait that every text-detection backend implements.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Text detection error types
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Detector program not found: {0}")]
    ProgramNotFound(String),

    #[error("Failed to start detector {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Detector exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Invalid detector output: {0}")]
    InvalidOutput(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DetectionError>;

// ============================================================
// Core Data Structures
// ============================================================

/// A single raw result from the detection engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Recognized text
    pub text: String,
    /// Quadrilateral corners, usually top-left, top-right, bottom-right, bottom-left
    pub polygon: [(f32, f32); 4],
    /// Recognition confidence (0.0-1.0)
    pub confidence: f32,
}

impl Detection {
    /// Create a detection from an axis-aligned box
    pub fn from_box(
        text: impl Into<String>,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        confidence: f32,
    ) -> Self {
        Self {
            text: text.into(),
            polygon: [(x1, y1), (x2, y1), (x2, y2), (x1, y2)],
            confidence,
        }
    }
}

/// Axis-aligned text region with integer pixel corners
#[derive(Debug, Clone, PartialEq)]
pub struct TextRegion {
    /// Recognized text as reported by the engine
    pub text: String,
    /// Top-left corner (x, y)
    pub top_left: (i32, i32),
    /// Bottom-right corner (x, y)
    pub bottom_right: (i32, i32),
    /// Recognition confidence
    pub confidence: f32,
}

impl TextRegion {
    /// Create a new text region
    pub fn new(
        text: impl Into<String>,
        top_left: (i32, i32),
        bottom_right: (i32, i32),
        confidence: f32,
    ) -> Self {
        Self {
            text: text.into(),
            top_left,
            bottom_right,
            confidence,
        }
    }

    /// Normalize a detection polygon into an axis-aligned region.
    ///
    /// Coordinates are truncated toward zero, matching how the engine's
    /// floating-point corners map onto pixel indices.
    pub fn from_detection(detection: &Detection) -> Self {
        let xs = detection.polygon.iter().map(|p| p.0);
        let ys = detection.polygon.iter().map(|p| p.1);
        let min_x = xs.clone().fold(f32::INFINITY, f32::min);
        let max_x = xs.fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.clone().fold(f32::INFINITY, f32::min);
        let max_y = ys.fold(f32::NEG_INFINITY, f32::max);

        Self {
            text: detection.text.clone(),
            top_left: (min_x as i32, min_y as i32),
            bottom_right: (max_x as i32, max_y as i32),
            confidence: detection.confidence,
        }
    }

    /// Left edge
    pub fn left(&self) -> i32 {
        self.top_left.0
    }

    /// Top edge
    pub fn top(&self) -> i32 {
        self.top_left.1
    }

    /// Right edge
    pub fn right(&self) -> i32 {
        self.bottom_right.0
    }

    /// Bottom edge
    pub fn bottom(&self) -> i32 {
        self.bottom_right.1
    }

    /// Box width in pixels, widened so extreme corners cannot overflow
    pub fn width(&self) -> i64 {
        i64::from(self.right()) - i64::from(self.left())
    }
}

// ============================================================
// Detector Trait
// ============================================================

/// Text detection engine
///
/// Implementations are constructed by the caller and passed into each
/// pipeline invocation. Results are unordered and may differ between calls
/// on the same image.
pub trait TextDetector {
    /// Detect and recognize text in an image
    fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>>;
}
