//! Masking Pipeline
//!
//! Wires one masking request end to end:
//!
//! 1. Decode and validate the input (before any detector call)
//! 2. Resolve orientation (up to 8 detector calls)
//! 3. Extract text regions (1 detector call)
//! 4. Plan Aadhaar masks on the unsorted regions
//! 5. Group regions into line blocks and plan address masks
//! 6. Paint the merged plan and write the output
//!
//! # Example
//!
//! ```rust,no_run
//! use aadhaar_mask::{CommandTextDetector, MaskingConfig, MaskingPipeline};
//! use std::path::Path;
//!
//! let mut detector = CommandTextDetector::with_defaults().unwrap();
//! let pipeline = MaskingPipeline::new(MaskingConfig::default());
//! let report = pipeline
//!     .process(&mut detector, Path::new("card.jpg"), Path::new("out/card.jpg"))
//!     .unwrap();
//! println!("{} rectangles masked", report.redaction_count());
//! ```

mod types;

pub use types::{MaskError, MaskReport, Result};

use image::RgbImage;
use std::path::Path;

use crate::config::MaskingConfig;
use crate::detection::{TextDetector, TextRegion, TextRegionExtractor};
use crate::grouping::BlockGrouper;
use crate::imaging::load_image;
use crate::masking::{AadhaarMasker, AddressBlockMasker, AddressKeywords, MaskPlan};
use crate::orientation::OrientationResolver;
use crate::output::OutputWriter;
use crate::progress::{NoProgress, ProcessingStage, ProgressCallback};

/// Planned masks for a region list, before painting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPlan {
    /// Merged rectangles from every pass
    pub plan: MaskPlan,
    /// Line blocks formed
    pub block_count: usize,
    /// Full numbers found
    pub full_numbers: Vec<String>,
    /// Accepted chunk windows
    pub chunk_windows: usize,
    /// Masked address blocks
    pub address_blocks: usize,
}

/// Masking pipeline
#[derive(Debug, Clone)]
pub struct MaskingPipeline {
    config: MaskingConfig,
    keywords: AddressKeywords,
}

impl Default for MaskingPipeline {
    fn default() -> Self {
        Self::new(MaskingConfig::default())
    }
}

impl MaskingPipeline {
    /// Create a pipeline with the given thresholds
    pub fn new(config: MaskingConfig) -> Self {
        let keywords = config.keywords();
        Self { config, keywords }
    }

    /// Active configuration
    pub fn config(&self) -> &MaskingConfig {
        &self.config
    }

    /// Mask `input` and write the result to `output`
    pub fn process<D: TextDetector + ?Sized>(
        &self,
        detector: &mut D,
        input: &Path,
        output: &Path,
    ) -> Result<MaskReport> {
        self.process_with_progress(detector, input, output, &mut NoProgress)
    }

    /// [`Self::process`], reporting each stage to `progress`
    pub fn process_with_progress<D: TextDetector + ?Sized>(
        &self,
        detector: &mut D,
        input: &Path,
        output: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<MaskReport> {
        progress.on_stage(ProcessingStage::Loading);
        let image = load_image(input)?;
        tracing::info!(
            path = %input.display(),
            width = image.width(),
            height = image.height(),
            "Loaded image"
        );

        let (masked, mut report) = self.run(detector, &image, progress)?;

        progress.on_stage(ProcessingStage::Writing);
        OutputWriter::write(&masked, output)?;
        report.output_path = Some(output.to_path_buf());

        progress.on_stage(ProcessingStage::Completed);
        Ok(report)
    }

    /// Mask an already-decoded image, returning the masked copy
    pub fn process_image<D: TextDetector + ?Sized>(
        &self,
        detector: &mut D,
        image: &RgbImage,
    ) -> Result<(RgbImage, MaskReport)> {
        self.run(detector, image, &mut NoProgress)
    }

    fn run<D: TextDetector + ?Sized>(
        &self,
        detector: &mut D,
        image: &RgbImage,
        progress: &mut dyn ProgressCallback,
    ) -> Result<(RgbImage, MaskReport)> {
        progress.on_stage(ProcessingStage::Orienting);
        let (mut oriented, orientation) = OrientationResolver::resolve(
            detector,
            image,
            self.config.orientation_min_confidence,
        )?;

        progress.on_stage(ProcessingStage::Extracting);
        let regions =
            TextRegionExtractor::extract(detector, &oriented, self.config.extract_min_confidence)?;

        progress.on_stage(ProcessingStage::Planning);
        let planned = self.plan_regions(&regions);
        planned.plan.apply(&mut oriented);

        if planned.plan.is_empty() {
            tracing::warn!("No Aadhaar number or address found, image left unmasked");
        }

        let report = MaskReport {
            orientation,
            region_count: regions.len(),
            block_count: planned.block_count,
            full_numbers: planned.full_numbers,
            chunk_windows: planned.chunk_windows,
            address_blocks: planned.address_blocks,
            rects: planned.plan.rects().to_vec(),
            output_path: None,
        };

        Ok((oriented, report))
    }

    /// Plan every mask for a region list without touching pixels
    pub fn plan_regions(&self, regions: &[TextRegion]) -> RegionPlan {
        let aadhaar = AadhaarMasker::plan(regions, &self.config.aadhaar);

        let blocks = BlockGrouper::group(regions, self.config.line_tolerance_px);
        let address = AddressBlockMasker::plan(&blocks, &self.keywords);

        let mut plan = aadhaar.plan;
        plan.extend(address.plan);

        RegionPlan {
            plan,
            block_count: blocks.len(),
            full_numbers: aadhaar.full_numbers,
            chunk_windows: aadhaar.chunk_windows.len(),
            address_blocks: address.masked_blocks.len(),
        }
    }
}
