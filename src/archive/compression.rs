//! Compression methods for archive entries

use zip::CompressionMethod;

use crate::pipeline::errors::{SegmentError, SegmentResult};

/// Compression applied to every entry of an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveCompression {
    /// No compression
    Stored,
    /// Deflate, the zip default
    #[default]
    Deflated,
    /// Zstandard
    Zstd,
}

impl ArchiveCompression {
    /// Get a compression method by name
    pub fn from_name(name: &str) -> SegmentResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "stored" | "none" | "uncompressed" => Ok(ArchiveCompression::Stored),
            "deflate" | "deflated" | "zip" => Ok(ArchiveCompression::Deflated),
            "zstd" => Ok(ArchiveCompression::Zstd),
            _ => Err(SegmentError::InvalidConfig(format!("Unknown compression type: {}", name))),
        }
    }

    /// Get the canonical name of this compression method
    pub fn name(&self) -> &'static str {
        match self {
            ArchiveCompression::Stored => "stored",
            ArchiveCompression::Deflated => "deflate",
            ArchiveCompression::Zstd => "zstd",
        }
    }

    pub(crate) fn method(&self) -> CompressionMethod {
        match self {
            ArchiveCompression::Stored => CompressionMethod::Stored,
            ArchiveCompression::Deflated => CompressionMethod::Deflated,
            ArchiveCompression::Zstd => CompressionMethod::Zstd,
        }
    }
}
