//! Text Detection module
//!
//! The detection engine is an external collaborator. This module defines the
//! seam ([`TextDetector`]), the raw and normalized result types, an adapter
//! for OCR programs that speak JSON on stdout, and the region extractor used
//! by the masking pipeline.

// Submodules
mod command;
mod extract;
mod types;

// Re-export public API
pub use command::{CommandTextDetector, DEFAULT_DETECTOR_PROGRAM, DEFAULT_LANGUAGES};
pub use extract::{TextRegionExtractor, DEFAULT_EXTRACT_MIN_CONFIDENCE};
pub use types::{Detection, DetectionError, Result, TextDetector, TextRegion};
