//! Pipeline configuration
//!
//! Settings can be loaded from a TOML file; missing keys keep their
//! defaults and unknown keys are ignored.

use std::fs;
use std::path::Path;

use log::info;

use crate::archive::{ArchiveCompression, DEFAULT_ENTRY_PREFIX};
use crate::source::DEFAULT_MASK_THRESHOLD;
use super::errors::{SegmentError, SegmentResult};

/// What to do with a region whose bounding box does not fit the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BBoxPolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Log a warning and leave the region out of the archive
    Skip,
}

impl BBoxPolicy {
    pub fn from_name(name: &str) -> SegmentResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "abort" => Ok(BBoxPolicy::Abort),
            "skip" => Ok(BBoxPolicy::Skip),
            _ => Err(SegmentError::InvalidConfig(format!("Unknown bbox policy: {}", name))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BBoxPolicy::Abort => "abort",
            BBoxPolicy::Skip => "skip",
        }
    }
}

/// Settings for one segmentation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Prefix of archive entry names
    pub entry_prefix: String,
    /// Compression applied to archive entries
    pub compression: ArchiveCompression,
    /// Handling of out-of-range bounding boxes
    pub bbox_policy: BBoxPolicy,
    /// Also write the label image next to the archive
    pub save_label_image: bool,
    /// Luma threshold for masks read from image files
    pub mask_threshold: u8,
    /// Show a progress bar while extracting regions
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            entry_prefix: DEFAULT_ENTRY_PREFIX.to_string(),
            compression: ArchiveCompression::default(),
            bbox_policy: BBoxPolicy::default(),
            save_label_image: false,
            mask_threshold: DEFAULT_MASK_THRESHOLD,
            show_progress: false,
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> SegmentResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(SegmentError::InvalidConfig(format!("Failed to parse TOML: {}", e))),
        };

        let mut config = PipelineConfig::default();

        if let Some(value) = toml_value.get("entry_prefix") {
            let prefix = value.as_str()
                .ok_or_else(|| SegmentError::InvalidConfig("entry_prefix must be a string".to_string()))?;
            config.entry_prefix = validate_prefix(prefix)?;
        }

        if let Some(value) = toml_value.get("compression") {
            let name = value.as_str()
                .ok_or_else(|| SegmentError::InvalidConfig("compression must be a string".to_string()))?;
            config.compression = ArchiveCompression::from_name(name)?;
        }

        if let Some(value) = toml_value.get("bbox_policy") {
            let name = value.as_str()
                .ok_or_else(|| SegmentError::InvalidConfig("bbox_policy must be a string".to_string()))?;
            config.bbox_policy = BBoxPolicy::from_name(name)?;
        }

        if let Some(value) = toml_value.get("save_label_image") {
            config.save_label_image = value.as_bool()
                .ok_or_else(|| SegmentError::InvalidConfig("save_label_image must be a boolean".to_string()))?;
        }

        if let Some(value) = toml_value.get("mask_threshold") {
            let threshold = value.as_integer()
                .ok_or_else(|| SegmentError::InvalidConfig("mask_threshold must be an integer".to_string()))?;
            config.mask_threshold = u8::try_from(threshold)
                .map_err(|_| SegmentError::InvalidConfig(format!("mask_threshold out of range: {}", threshold)))?;
        }

        if let Some(value) = toml_value.get("show_progress") {
            config.show_progress = value.as_bool()
                .ok_or_else(|| SegmentError::InvalidConfig("show_progress must be a boolean".to_string()))?;
        }

        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> SegmentResult<Self> {
        info!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Reject prefixes that would put entries outside the archive root
pub fn validate_prefix(prefix: &str) -> SegmentResult<String> {
    if prefix.contains('/') || prefix.contains('\\') || prefix.contains("..") {
        return Err(SegmentError::InvalidConfig(format!("Invalid entry prefix: {}", prefix)));
    }
    Ok(prefix.to_string())
}
