//! Masking module options

use serde::{Deserialize, Serialize};

// ============================================================
// Constants
// ============================================================

/// Digits in a full Aadhaar number
pub const TOTAL_DIGITS: i32 = 12;

/// Leading digits hidden on a full-number match; the last group stays visible
pub const MASKED_DIGITS: i32 = 8;

/// Default vertical tolerance between chunks on one line (pixels)
pub const DEFAULT_CHUNK_LINE_TOLERANCE_PX: i32 = 20;

/// Default maximum span of a 3-chunk window (pixels)
pub const DEFAULT_CHUNK_MAX_SPAN_PX: i32 = 300;

// ============================================================
// Options
// ============================================================

/// Order in which 4-digit chunk candidates are windowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkOrder {
    /// Lines top to bottom, each read left to right
    #[default]
    Spatial,
    /// Order reported by the detection engine
    Collection,
}

impl std::str::FromStr for ChunkOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spatial" => Ok(ChunkOrder::Spatial),
            "collection" => Ok(ChunkOrder::Collection),
            other => Err(format!("unknown chunk order '{}'", other)),
        }
    }
}

/// Aadhaar number masking options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AadhaarMaskOptions {
    /// Maximum vertical delta between chunks of one window (exclusive)
    pub chunk_line_tolerance_px: i32,
    /// Maximum span from first chunk's left to third chunk's right (exclusive)
    pub chunk_max_span_px: i32,
    /// Candidate ordering before windowing
    pub chunk_order: ChunkOrder,
}

impl Default for AadhaarMaskOptions {
    fn default() -> Self {
        Self {
            chunk_line_tolerance_px: DEFAULT_CHUNK_LINE_TOLERANCE_PX,
            chunk_max_span_px: DEFAULT_CHUNK_MAX_SPAN_PX,
            chunk_order: ChunkOrder::default(),
        }
    }
}
