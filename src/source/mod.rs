//! Mask sources
//!
//! The segmentation model is an external collaborator; the pipeline only
//! sees it through the `MaskSource` trait.

mod mask_source;
mod directory;

pub use mask_source::{MaskSource, StaticMaskSource};
pub use directory::{MaskDirectorySource, DEFAULT_MASK_THRESHOLD};
