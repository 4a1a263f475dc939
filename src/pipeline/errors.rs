//! Custom error types for the segmentation pipeline

use std::fmt;
use std::io;

use crate::region::BoundingBox;

/// Errors raised while turning region masks into an archive
#[derive(Debug)]
pub enum SegmentError {
    /// I/O error (unreadable source, unwritable destination)
    Io(io::Error),
    /// Image decoding or encoding failure
    Image(image::ImageError),
    /// Zip writer failure
    Archive(zip::result::ZipError),
    /// The mask source produced no regions
    EmptyInput,
    /// A region's bounding box does not fit inside the source image
    InvalidBBox {
        rank: usize,
        bbox: BoundingBox,
        image_width: u32,
        image_height: u32,
    },
    /// A mask's grid does not match the source image's dimensions
    MaskDimensionMismatch {
        index: usize,
        mask_width: u32,
        mask_height: u32,
        image_width: u32,
        image_height: u32,
    },
    /// An archive entry was added after a higher-ranked one
    EntryOutOfOrder { rank: usize, previous: usize },
    /// Bad configuration value
    InvalidConfig(String),
    /// Generic error with message
    Generic(String),
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::Io(e) => write!(f, "I/O error: {}", e),
            SegmentError::Image(e) => write!(f, "Image error: {}", e),
            SegmentError::Archive(e) => write!(f, "Archive error: {}", e),
            SegmentError::EmptyInput => write!(f, "Mask source returned no regions"),
            SegmentError::InvalidBBox { rank, bbox, image_width, image_height } => write!(
                f,
                "Region {} has bounding box (left={}, top={}, width={}, height={}) outside the {}x{} image",
                rank, bbox.left, bbox.top, bbox.width, bbox.height, image_width, image_height
            ),
            SegmentError::MaskDimensionMismatch { index, mask_width, mask_height, image_width, image_height } => write!(
                f,
                "Mask #{} is {}x{} but the image is {}x{}",
                index, mask_width, mask_height, image_width, image_height
            ),
            SegmentError::EntryOutOfOrder { rank, previous } => write!(
                f,
                "Archive entry for rank {} added after rank {}",
                rank, previous
            ),
            SegmentError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SegmentError::Generic(msg) => write!(f, "Segmentation error: {}", msg),
        }
    }
}

impl std::error::Error for SegmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SegmentError::Io(e) => Some(e),
            SegmentError::Image(e) => Some(e),
            SegmentError::Archive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SegmentError {
    fn from(error: io::Error) -> Self {
        SegmentError::Io(error)
    }
}

impl From<image::ImageError> for SegmentError {
    fn from(error: image::ImageError) -> Self {
        match error {
            image::ImageError::IoError(e) => SegmentError::Io(e),
            other => SegmentError::Image(other),
        }
    }
}

impl From<zip::result::ZipError> for SegmentError {
    fn from(error: zip::result::ZipError) -> Self {
        SegmentError::Archive(error)
    }
}

impl From<tempfile::PersistError> for SegmentError {
    fn from(error: tempfile::PersistError) -> Self {
        SegmentError::Io(error.error)
    }
}

impl From<String> for SegmentError {
    fn from(msg: String) -> Self {
        SegmentError::Generic(msg)
    }
}

/// Result type for pipeline operations
pub type SegmentResult<T> = Result<T, SegmentError>;
