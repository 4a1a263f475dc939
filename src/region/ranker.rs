//! Region ranking
//!
//! Ranking fixes the order in which regions are painted into the label
//! image and the order (and names) of the archive entries.

use log::debug;

use crate::pipeline::errors::{SegmentError, SegmentResult};
use super::record::RegionRecord;

/// Region records sorted by descending area
///
/// The position of a record in the sequence is its rank: rank 0 is the
/// largest region.
#[derive(Debug, Clone)]
pub struct RankedSequence {
    regions: Vec<RegionRecord>,
}

impl RankedSequence {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Get the region at `rank`
    pub fn get(&self, rank: usize) -> Option<&RegionRecord> {
        self.regions.get(rank)
    }

    /// Iterate over `(rank, region)` pairs in rank order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RegionRecord)> {
        self.regions.iter().enumerate()
    }
}

/// Order a region collection by descending area
///
/// The sort is stable: regions of equal area keep the relative order in
/// which the mask source reported them.
///
/// # Errors
/// `SegmentError::EmptyInput` if the collection is empty.
pub fn rank_regions(collection: Vec<RegionRecord>) -> SegmentResult<RankedSequence> {
    if collection.is_empty() {
        return Err(SegmentError::EmptyInput);
    }

    let mut regions = collection;
    regions.sort_by(|a, b| b.area().cmp(&a.area()));

    debug!("Ranked {} regions, largest area {}, smallest area {}",
           regions.len(),
           regions.first().map(|r| r.area()).unwrap_or(0),
           regions.last().map(|r| r.area()).unwrap_or(0));

    Ok(RankedSequence { regions })
}
