//! Flattened label image
//!
//! Regions are painted in rank order (largest area first) into a single
//! 8-bit buffer. Later writes overwrite earlier ones, so at any overlap the
//! smaller region ends up visible.

use std::io::Cursor;
use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use log::{debug, info};

use crate::pipeline::errors::{SegmentError, SegmentResult};
use crate::region::{BinaryMask, RankedSequence};
use crate::utils::write_utils;

/// Value for pixels no region covers
pub const BACKGROUND_LABEL: u8 = 0;

/// Number of distinct non-zero labels before they repeat
pub const LABEL_CYCLE: usize = 255;

/// Label painted for the region at `rank`: `(rank mod 255) + 1`
pub fn label_for_rank(rank: usize) -> u8 {
    (rank % LABEL_CYCLE) as u8 + 1
}

/// Single-channel segmentation map
#[derive(Debug, Clone)]
pub struct LabelImage {
    buffer: GrayImage,
}

impl LabelImage {
    /// Create a label image with every pixel set to the background label
    pub fn new(width: u32, height: u32) -> Self {
        LabelImage {
            buffer: GrayImage::from_pixel(width, height, Luma([BACKGROUND_LABEL])),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Label at (x, y), or `None` outside the image
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.buffer.get_pixel_checked(x, y).map(|p| p[0])
    }

    /// Paint every set pixel of `mask` with the label of `rank`
    pub fn paint(&mut self, mask: &BinaryMask, rank: usize) -> SegmentResult<()> {
        if mask.width() != self.width() || mask.height() != self.height() {
            return Err(SegmentError::MaskDimensionMismatch {
                index: rank,
                mask_width: mask.width(),
                mask_height: mask.height(),
                image_width: self.width(),
                image_height: self.height(),
            });
        }

        let label = Luma([label_for_rank(rank)]);
        for (x, y) in mask.set_pixels() {
            self.buffer.put_pixel(x, y, label);
        }
        Ok(())
    }

    pub fn as_gray_image(&self) -> &GrayImage {
        &self.buffer
    }

    /// Encode the label image as an 8-bit grayscale PNG
    pub fn encode_png(&self) -> SegmentResult<Vec<u8>> {
        let mut png = Vec::new();
        self.buffer.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Save the label image as a PNG, atomically
    pub fn save(&self, path: &Path) -> SegmentResult<()> {
        info!("Saving label image to {}", path.display());
        write_utils::write_atomic(path, &self.encode_png()?)
    }
}

/// Paint the ranked regions into one label image of `width` x `height`
///
/// Paint order is ascending rank, last-painted-wins.
pub fn compose_labels(ranked: &RankedSequence, width: u32, height: u32) -> SegmentResult<LabelImage> {
    let mut labels = LabelImage::new(width, height);

    for (rank, region) in ranked.iter() {
        labels.paint(region.mask(), rank)?;
    }

    debug!("Composed label image {}x{} from {} regions", width, height, ranked.len());
    if ranked.len() > LABEL_CYCLE {
        debug!("{} regions exceed {} labels, labels wrap around", ranked.len(), LABEL_CYCLE);
    }

    Ok(labels)
}
