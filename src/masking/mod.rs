//! Masking module
//!
//! Decides what to black out. Every masker returns rectangles as data; the
//! pipeline merges them into one [`MaskPlan`] and paints the image once.
//!
//! # Features
//!
//! - Full 12-digit numbers: left 8/12 of the box, last group left visible
//! - Fragmented numbers: three 4-digit chunks on one line, first two masked
//! - Address and guardian lines: every region of a matching line block
//!
//! # Example
//!
//! ```rust
//! use aadhaar_mask::{AadhaarMaskOptions, AadhaarMasker, TextRegion};
//!
//! let regions = vec![TextRegion::new("1234 5678 9012", (0, 0), (300, 40), 0.9)];
//! let result = AadhaarMasker::plan(&regions, &AadhaarMaskOptions::default());
//! let rect = result.plan.rects()[0];
//! assert_eq!((rect.x1, rect.x2), (0, 200));
//! ```

// Submodules
mod aadhaar;
mod address;
mod plan;
mod types;

// Re-export public API
pub use aadhaar::{AadhaarChunk, AadhaarMaskResult, AadhaarMasker};
pub use address::{
    AddressBlockMasker, AddressKeywords, AddressMaskResult, ENGLISH_KEYWORDS, HINDI_KEYWORDS,
    MARATHI_KEYWORDS,
};
pub use plan::{MaskPlan, MaskReason, MaskRect};
pub use types::{
    AadhaarMaskOptions, ChunkOrder, DEFAULT_CHUNK_LINE_TOLERANCE_PX, DEFAULT_CHUNK_MAX_SPAN_PX,
    MASKED_DIGITS, TOTAL_DIGITS,
};
