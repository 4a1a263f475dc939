pub mod region;
pub mod compositor;
pub mod extractor;
pub mod archive;
pub mod source;
pub mod pipeline;
pub mod utils;
pub mod commands;
pub mod cli;

#[cfg(test)]
mod tests;

pub use pipeline::{segment_regions, PipelineConfig, PipelineReport, SegmentError, SegmentPipeline, SegmentResult};
pub use region::{rank_regions, BinaryMask, BoundingBox, RankedSequence, RegionRecord};
pub use compositor::{compose_labels, LabelImage};
pub use extractor::extract_cutout;
pub use archive::{ArchiveCompression, ArchivePackager, PackagedArchive};
pub use source::{MaskDirectorySource, MaskSource, StaticMaskSource};
