//! Region records and ranking
//!
//! This module defines what a mask source hands to the pipeline (binary
//! masks with their bounding boxes and areas) and the ranking that orders
//! them for painting and packaging.

mod bbox;
mod mask;
mod record;
mod ranker;

pub use bbox::BoundingBox;
pub use mask::BinaryMask;
pub use record::RegionRecord;
pub use ranker::{rank_regions, RankedSequence};
