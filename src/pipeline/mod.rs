//! Segmentation pipeline
//!
//! Error types, configuration and the end-to-end run that turns mask
//! source output into a label image and a cutout archive.

pub mod errors;
pub mod config;
mod runner;

pub use errors::{SegmentError, SegmentResult};
pub use config::{BBoxPolicy, PipelineConfig};
pub use runner::{segment_regions, PipelineReport, SegmentPipeline, SegmentationOutput};
