//! Region records produced by a mask source

use super::bbox::BoundingBox;
use super::mask::BinaryMask;

/// One candidate region: its mask, bounding box and pixel area
///
/// Records are immutable once produced and are owned by the pipeline run
/// that generated them.
#[derive(Debug, Clone)]
pub struct RegionRecord {
    mask: BinaryMask,
    bbox: BoundingBox,
    area: u64,
}

impl RegionRecord {
    /// Create a record from mask-source output as-is
    ///
    /// The bounding box and area are taken on trust; the extractor checks
    /// the box against the image when the region is cut out.
    pub fn new(mask: BinaryMask, bbox: BoundingBox, area: u64) -> Self {
        RegionRecord { mask, bbox, area }
    }

    /// Create a record whose bounding box and area are derived from the mask
    ///
    /// Returns `None` when the mask has no set pixel.
    pub fn from_mask(mask: BinaryMask) -> Option<Self> {
        let bbox = mask.bounding_box()?;
        let area = mask.area();
        Some(RegionRecord { mask, bbox, area })
    }

    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn area(&self) -> u64 {
        self.area
    }
}
