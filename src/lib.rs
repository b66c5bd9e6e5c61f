//! aadhaar-mask - Redaction of Aadhaar numbers and addresses in card photos
//!
//! Given a photographed Aadhaar card, the pipeline finds the orientation in
//! which a text detector can read the 12-digit number, then blacks out the
//! first eight digits (whether read as one string or as separate 4-digit
//! chunks) and every line block that carries an address or guardian keyword.
//!
//! # Modules
//!
//! - [`detection`]: the text detector seam and the external-program adapter
//! - [`orientation`]: 8-probe rotation and mirror search
//! - [`grouping`]: line blocks from text regions
//! - [`masking`]: Aadhaar and address mask planning
//! - [`pipeline`]: end-to-end masking of one image
//! - [`augment`]: rotation/mirror dataset augmentation
//!
//! # Example
//!
//! ```rust,no_run
//! use aadhaar_mask::{CommandTextDetector, MaskingPipeline};
//! use std::path::Path;
//!
//! let mut detector = CommandTextDetector::with_defaults()?;
//! let report = MaskingPipeline::default().process(
//!     &mut detector,
//!     Path::new("card.jpg"),
//!     Path::new("masked/card.jpg"),
//! )?;
//! if report.is_unredacted() {
//!     eprintln!("nothing was masked");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod augment;
pub mod cli;
pub mod config;
pub mod detection;
pub mod grouping;
pub mod imaging;
pub mod masking;
pub mod orientation;
pub mod output;
pub mod pattern;
pub mod pipeline;
pub mod progress;

// Augmentation
pub use augment::{
    augment_directory, augment_image, rename_sequential, AugmentError, AugmentOptions,
    AugmentSummary,
};

// CLI
pub use cli::{AugmentArgs, Cli, Commands, MaskArgs};

// Config
pub use config::{CliOverrides, Config, ConfigError, DetectorConfig, MaskingConfig};

// Detection
pub use detection::{
    CommandTextDetector, Detection, DetectionError, TextDetector, TextRegion, TextRegionExtractor,
};

// Grouping
pub use grouping::{Block, BlockGrouper};

// Imaging
pub use imaging::Rotation;

// Masking
pub use masking::{
    AadhaarMaskOptions, AadhaarMasker, AddressBlockMasker, AddressKeywords, ChunkOrder, MaskPlan,
    MaskReason, MaskRect,
};

// Orientation
pub use orientation::{OrientationOutcome, OrientationResolver};

// Output
pub use output::OutputWriter;

// Pipeline
pub use pipeline::{MaskError, MaskReport, MaskingPipeline, RegionPlan};

// Progress
pub use progress::{NoProgress, OutputMode, ProcessingStage, ProgressCallback, ProgressTracker};

/// Process exit codes
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Input file or directory not found
    pub const INPUT_NOT_FOUND: i32 = 2;
    /// Fewer redactions than `--min-redactions`
    pub const INSUFFICIENT_REDACTIONS: i32 = 3;
}
