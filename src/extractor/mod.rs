//! Region extraction
//!
//! Crops the source image to each region and mattes it against the
//! region's mask.

mod cutout;

pub use cutout::{extract_cutout, validate_bbox};
