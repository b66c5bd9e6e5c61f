//! Line Block Grouping
//!
//! Clusters text regions into visual lines by walking them top-to-bottom and
//! cutting wherever the vertical jump between neighbors reaches the tolerance.

use crate::detection::TextRegion;

/// Default vertical tolerance between neighbors on one line (pixels)
pub const DEFAULT_LINE_TOLERANCE_PX: i32 = 30;

/// One visual line of text regions, ordered top-to-bottom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    /// Regions in this line
    pub regions: Vec<TextRegion>,
}

impl Block {
    /// Number of regions in the block
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the block has no regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Texts of all regions, in block order
    pub fn texts(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.text.as_str()).collect()
    }

    fn last_top(&self) -> Option<i32> {
        self.regions.last().map(TextRegion::top)
    }
}

/// Block grouper
pub struct BlockGrouper;

impl BlockGrouper {
    /// Partition regions into line blocks.
    ///
    /// Regions are stably sorted by top-left y. A region joins the current
    /// block when its y is within `tolerance` (exclusive) of the block's most
    /// recently added region; chains of small steps can therefore span more
    /// than `tolerance` overall.
    pub fn group(regions: &[TextRegion], tolerance: i32) -> Vec<Block> {
        let mut sorted: Vec<TextRegion> = regions.to_vec();
        sorted.sort_by_key(TextRegion::top);

        let mut blocks: Vec<Block> = Vec::new();
        let mut current = Block::default();

        for region in sorted {
            let jump = current
                .last_top()
                .map(|prev_y| (i64::from(region.top()) - i64::from(prev_y)).abs());
            match jump {
                Some(jump) if jump >= i64::from(tolerance) => {
                    blocks.push(std::mem::take(&mut current));
                }
                _ => {}
            }
            current.regions.push(region);
        }

        if !current.is_empty() {
            blocks.push(current);
        }

        blocks
    }
}
