//! Aadhaar number masking
//!
//! Two passes over the extracted regions:
//!
//! 1. Regions that contain a full 12-digit number get their left 8/12 masked.
//! 2. Lone 4-digit regions are ordered into lines and windowed in threes; a
//!    window that reads left to right on one line within a bounded span has
//!    its first two chunks masked.

use crate::detection::TextRegion;
use crate::pattern::{find_full_number, is_chunk, normalize_whitespace};

use super::plan::{MaskPlan, MaskRect, MaskReason};
use super::types::{AadhaarMaskOptions, ChunkOrder, MASKED_DIGITS, TOTAL_DIGITS};

/// A 4-digit region that may be a fragment of a number
#[derive(Debug, Clone, PartialEq)]
pub struct AadhaarChunk<'a> {
    /// Position in the region list
    pub index: usize,
    /// Normalized 4-digit text
    pub digits: String,
    /// Source region
    pub region: &'a TextRegion,
}

/// Result of the Aadhaar passes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AadhaarMaskResult {
    /// Planned rectangles
    pub plan: MaskPlan,
    /// Full numbers found, as matched
    pub full_numbers: Vec<String>,
    /// Accepted chunk windows, as the three chunk texts
    pub chunk_windows: Vec<[String; 3]>,
}

/// Aadhaar number masker
pub struct AadhaarMasker;

impl AadhaarMasker {
    /// Plan masks for full numbers and fragmented chunks
    pub fn plan(regions: &[TextRegion], options: &AadhaarMaskOptions) -> AadhaarMaskResult {
        let mut result = AadhaarMaskResult::default();
        let mut chunks: Vec<AadhaarChunk<'_>> = Vec::new();

        // Pass 1: full numbers, collecting chunk candidates on the way
        for (index, region) in regions.iter().enumerate() {
            let cleaned = normalize_whitespace(&region.text);
            if let Some(number) = find_full_number(&cleaned) {
                let rect = Self::full_number_rect(region);
                tracing::info!(number, raw = %region.text, "Found full Aadhaar number");
                tracing::info!(from_x = rect.x1, to_x = rect.x2, "Masked first 8 digits");
                result.full_numbers.push(number.to_string());
                result.plan.add(rect);
            } else if is_chunk(&cleaned) {
                chunks.push(AadhaarChunk {
                    index,
                    digits: cleaned,
                    region,
                });
            }
        }

        // Pass 2: rolling windows of three chunks
        Self::order_chunks(&mut chunks, options);
        let mut consumed = vec![false; chunks.len()];

        for i in 0..chunks.len().saturating_sub(2) {
            if consumed[i..i + 3].iter().any(|&c| c) {
                continue;
            }

            let (c1, c2, c3) = (&chunks[i], &chunks[i + 1], &chunks[i + 2]);
            if !Self::is_window(c1, c2, c3, options) {
                continue;
            }

            let rect = MaskRect::new(
                c1.region.left(),
                c1.region.top(),
                c2.region.right(),
                c2.region.bottom(),
                MaskReason::ChunkWindow,
            );
            tracing::info!(
                first = %c1.digits,
                second = %c2.digits,
                "Masked Aadhaar chunks (first 8 digits)"
            );
            result.plan.add(rect);
            result
                .chunk_windows
                .push([c1.digits.clone(), c2.digits.clone(), c3.digits.clone()]);
            consumed[i..i + 3].iter_mut().for_each(|c| *c = true);
        }

        result
    }

    /// Left 8/12 of the region's width, full height
    pub fn full_number_rect(region: &TextRegion) -> MaskRect {
        let masked_width = region.width() * i64::from(MASKED_DIGITS) / i64::from(TOTAL_DIGITS);
        let right = i64::from(region.left()) + masked_width;
        MaskRect::new(
            region.left(),
            region.top(),
            i32::try_from(right).unwrap_or(i32::MAX),
            region.bottom(),
            MaskReason::FullNumber,
        )
    }

    /// Spatial order groups chunks into lines by top edge, then reads each
    /// line left to right. Collection order is left untouched.
    fn order_chunks(chunks: &mut Vec<AadhaarChunk<'_>>, options: &AadhaarMaskOptions) {
        if options.chunk_order == ChunkOrder::Collection {
            return;
        }

        chunks.sort_by_key(|c| (c.region.top(), c.region.left()));

        let tol = i64::from(options.chunk_line_tolerance_px);
        let mut lines: Vec<Vec<AadhaarChunk<'_>>> = Vec::new();
        for chunk in chunks.drain(..) {
            match lines.last_mut() {
                Some(line)
                    if i64::from(chunk.region.top()) - i64::from(line[0].region.top()) < tol =>
                {
                    line.push(chunk)
                }
                _ => lines.push(vec![chunk]),
            }
        }

        for mut line in lines {
            line.sort_by_key(|c| c.region.left());
            chunks.extend(line);
        }
    }

    fn is_window(
        c1: &AadhaarChunk<'_>,
        c2: &AadhaarChunk<'_>,
        c3: &AadhaarChunk<'_>,
        options: &AadhaarMaskOptions,
    ) -> bool {
        let tol = i64::from(options.chunk_line_tolerance_px);
        let y1 = i64::from(c1.region.top());
        let y2 = i64::from(c2.region.top());
        let y3 = i64::from(c3.region.top());
        let same_line = (y1 - y2).abs() < tol && (y2 - y3).abs() < tol && (y1 - y3).abs() < tol;

        // Chunks must read left to right
        let (x1, x2, x3) = (c1.region.left(), c2.region.left(), c3.region.left());
        let in_order = x1 <= x2 && x2 <= x3;
        let span = i64::from(c3.region.right()) - i64::from(x1);

        same_line && in_order && span < i64::from(options.chunk_max_span_px)
    }
}
