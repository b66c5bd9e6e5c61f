//! Pipeline error and report types

use std::path::PathBuf;
use thiserror::Error;

use crate::detection::DetectionError;
use crate::masking::{MaskReason, MaskRect};
use crate::orientation::OrientationOutcome;

// ============================================================
// Error Types
// ============================================================

/// Masking pipeline error types
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Failed to decode image {path}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },

    #[error("Image has no pixels: {0}")]
    EmptyImage(PathBuf),

    #[error("Detection failed: {0}")]
    Detection(#[from] DetectionError),

    #[error("Failed to encode image {path}: {reason}")]
    ImageEncode { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MaskError {
    /// Whether the error comes from reading the input image
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MaskError::ImageNotFound(_) | MaskError::ImageDecode { .. } | MaskError::EmptyImage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MaskError>;

// ============================================================
// Report
// ============================================================

/// What one masking request did
#[derive(Debug, Clone, PartialEq)]
pub struct MaskReport {
    /// Orientation search result
    pub orientation: OrientationOutcome,
    /// Regions kept by the extractor
    pub region_count: usize,
    /// Line blocks formed from the regions
    pub block_count: usize,
    /// Full numbers found
    pub full_numbers: Vec<String>,
    /// Accepted chunk windows
    pub chunk_windows: usize,
    /// Masked address blocks
    pub address_blocks: usize,
    /// Rectangles painted, after merging
    pub rects: Vec<MaskRect>,
    /// Output file, when written
    pub output_path: Option<PathBuf>,
}

impl MaskReport {
    /// Number of painted rectangles
    pub fn redaction_count(&self) -> usize {
        self.rects.len()
    }

    /// Whether nothing was masked.
    ///
    /// An unmasked image is still written; callers that need a guarantee
    /// should check this (or [`Self::meets_minimum`]) before trusting output.
    pub fn is_unredacted(&self) -> bool {
        self.rects.is_empty()
    }

    /// Whether at least `minimum` rectangles were painted
    pub fn meets_minimum(&self, minimum: usize) -> bool {
        self.redaction_count() >= minimum
    }

    /// Number of painted rectangles with a given reason
    pub fn count(&self, reason: MaskReason) -> usize {
        self.rects.iter().filter(|r| r.reason == reason).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(rects: Vec<MaskRect>) -> MaskReport {
        MaskReport {
            orientation: OrientationOutcome::NotFound { probes: 8 },
            region_count: 0,
            block_count: 0,
            full_numbers: Vec::new(),
            chunk_windows: 0,
            address_blocks: 0,
            rects,
            output_path: None,
        }
    }

    #[test]
    fn test_report_counts() {
        let r = report(vec![
            MaskRect::new(0, 0, 10, 10, MaskReason::FullNumber),
            MaskRect::new(0, 20, 10, 30, MaskReason::AddressBlock),
        ]);
        assert_eq!(r.redaction_count(), 2);
        assert!(!r.is_unredacted());
        assert!(r.meets_minimum(2));
        assert!(!r.meets_minimum(3));
        assert_eq!(r.count(MaskReason::AddressBlock), 1);
    }

    #[test]
    fn test_empty_report() {
        let r = report(Vec::new());
        assert!(r.is_unredacted());
        assert!(r.meets_minimum(0));
    }

    #[test]
    fn test_input_errors() {
        assert!(MaskError::ImageNotFound(PathBuf::from("/x")).is_input_error());
        assert!(MaskError::EmptyImage(PathBuf::from("/x")).is_input_error());
        let err: MaskError = DetectionError::InvalidOutput("x".to_string()).into();
        assert!(!err.is_input_error());
        let _io: MaskError = std::io::Error::other("test").into();
    }
}
