//! Mask rectangle accumulation
//!
//! Maskers only describe what to black out. Rectangles from every pass are
//! collected here and painted onto the image in a single step.

use image::RgbImage;
use std::fmt;

use crate::detection::TextRegion;
use crate::imaging::fill_black;

/// Why a rectangle is masked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskReason {
    /// First 8 digits of a full 12-digit number
    FullNumber,
    /// First two chunks of a fragmented number
    ChunkWindow,
    /// Region on an address or guardian line
    AddressBlock,
}

impl MaskReason {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            MaskReason::FullNumber => "full-number",
            MaskReason::ChunkWindow => "chunk-window",
            MaskReason::AddressBlock => "address-block",
        }
    }
}

/// Rectangle to black out, with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub reason: MaskReason,
}

impl MaskRect {
    /// Create a rectangle, normalizing corner order
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, reason: MaskReason) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
            reason,
        }
    }

    /// Rectangle covering a whole region
    pub fn from_region(region: &TextRegion, reason: MaskReason) -> Self {
        Self::new(
            region.left(),
            region.top(),
            region.right(),
            region.bottom(),
            reason,
        )
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &MaskRect) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    /// Covered pixel count (inclusive corners)
    pub fn area(&self) -> u64 {
        let w = (i64::from(self.x2) - i64::from(self.x1) + 1) as u64;
        let h = (i64::from(self.y2) - i64::from(self.y1) + 1) as u64;
        w.saturating_mul(h)
    }
}

impl fmt::Display for MaskRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {}) [{}]",
            self.x1,
            self.y1,
            self.x2,
            self.y2,
            self.reason.name()
        )
    }
}

/// Set of rectangles accumulated across all masking passes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskPlan {
    rects: Vec<MaskRect>,
}

impl MaskPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rectangle.
    ///
    /// Returns `false` when an existing rectangle already covers it. Existing
    /// rectangles covered by the new one are dropped.
    pub fn add(&mut self, rect: MaskRect) -> bool {
        if self.rects.iter().any(|r| r.contains(&rect)) {
            return false;
        }
        self.rects.retain(|r| !rect.contains(r));
        self.rects.push(rect);
        true
    }

    /// Add every rectangle from another plan
    pub fn extend(&mut self, other: MaskPlan) {
        for rect in other.rects {
            self.add(rect);
        }
    }

    /// Planned rectangles, in insertion order
    pub fn rects(&self) -> &[MaskRect] {
        &self.rects
    }

    /// Number of planned rectangles
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether nothing is planned
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of rectangles with a given reason
    pub fn count(&self, reason: MaskReason) -> usize {
        self.rects.iter().filter(|r| r.reason == reason).count()
    }

    /// Paint every rectangle black
    pub fn apply(&self, image: &mut RgbImage) {
        for rect in &self.rects {
            fill_black(image, rect.x1, rect.y1, rect.x2, rect.y2);
        }
    }
}
