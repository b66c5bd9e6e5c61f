//! Text Region Extraction
//!
//! Runs one detection pass on the resolved image and turns the surviving
//! results into axis-aligned regions.

use image::RgbImage;

use super::types::{Result, TextDetector, TextRegion};

/// Default confidence floor for extraction.
///
/// Lower than the orientation floor so faint address text still survives.
pub const DEFAULT_EXTRACT_MIN_CONFIDENCE: f32 = 0.20;

/// Text region extractor
pub struct TextRegionExtractor;

impl TextRegionExtractor {
    /// Detect text and keep results with `confidence >= min_confidence`.
    ///
    /// Output keeps the engine's order.
    pub fn extract<D: TextDetector + ?Sized>(
        detector: &mut D,
        image: &RgbImage,
        min_confidence: f32,
    ) -> Result<Vec<TextRegion>> {
        let detections = detector.detect(image)?;

        let regions: Vec<TextRegion> = detections
            .iter()
            .inspect(|d| {
                tracing::debug!(text = %d.text, confidence = d.confidence, "Detected text");
            })
            .filter(|d| d.confidence >= min_confidence)
            .map(TextRegion::from_detection)
            .collect();

        tracing::info!(
            detected = detections.len(),
            kept = regions.len(),
            "Extracted text regions"
        );

        Ok(regions)
    }
}
