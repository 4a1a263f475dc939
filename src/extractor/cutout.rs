//! Region cutouts
//!
//! A cutout is the part of the source image under a region's bounding box,
//! with every pixel outside the region's mask made transparent.

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use log::debug;

use crate::pipeline::errors::{SegmentError, SegmentResult};
use crate::region::{BoundingBox, RegionRecord};

/// Fully transparent pixel used outside the mask
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Check a region's bounding box against the source image
///
/// # Errors
/// `SegmentError::InvalidBBox` if the box is empty or leaves the image.
pub fn validate_bbox(bbox: &BoundingBox, rank: usize, image_width: u32, image_height: u32) -> SegmentResult<()> {
    if bbox.fits_within(image_width, image_height) {
        Ok(())
    } else {
        Err(SegmentError::InvalidBBox {
            rank,
            bbox: *bbox,
            image_width,
            image_height,
        })
    }
}

/// Cut one region out of the source image
///
/// The result has the size of the region's bounding box. Inside the mask
/// each pixel is copied from the source, keeping the source alpha; outside
/// it is transparent. A mask that is empty within the box gives a fully
/// transparent cutout.
///
/// # Arguments
/// * `region` - The region to extract
/// * `rank` - Rank of the region, used for error reporting
/// * `source` - The full source image
///
/// # Returns
/// The RGBA cutout or an error if the bounding box does not fit the image
pub fn extract_cutout(region: &RegionRecord, rank: usize, source: &DynamicImage) -> SegmentResult<RgbaImage> {
    let bbox = region.bbox();
    let (image_width, image_height) = source.dimensions();
    validate_bbox(&bbox, rank, image_width, image_height)?;

    let cropped = source
        .crop_imm(bbox.left, bbox.top, bbox.width, bbox.height)
        .to_rgba8();
    let alpha = region.mask().crop_to_alpha(&bbox);

    let mut cutout = RgbaImage::from_pixel(bbox.width, bbox.height, TRANSPARENT);
    for (x, y, pixel) in cropped.enumerate_pixels() {
        if alpha.get_pixel(x, y)[0] == 255 {
            cutout.put_pixel(x, y, *pixel);
        }
    }

    debug!("Extracted region {}: {}x{} at ({}, {})",
           rank, bbox.width, bbox.height, bbox.left, bbox.top);

    Ok(cutout)
}
