use image::DynamicImage;

use crate::pipeline::errors::SegmentResult;
use crate::region::RegionRecord;

/// Trait for anything that can propose region masks for an image
///
/// Implementations wrap a segmentation model (or precomputed output of
/// one). They are constructed once by the caller and handed to the
/// pipeline, so a model is loaded once and reused across images.
pub trait MaskSource {
    /// Produce the unordered region collection for an image
    ///
    /// # Arguments
    /// * `image` - The decoded source image
    ///
    /// # Returns
    /// Region records whose masks have the image's dimensions
    fn generate(&self, image: &DynamicImage) -> SegmentResult<Vec<RegionRecord>>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

impl<S: MaskSource + ?Sized> MaskSource for Box<S> {
    fn generate(&self, image: &DynamicImage) -> SegmentResult<Vec<RegionRecord>> {
        (**self).generate(image)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Mask source returning a fixed, precomputed collection
#[derive(Debug, Clone, Default)]
pub struct StaticMaskSource {
    regions: Vec<RegionRecord>,
}

impl StaticMaskSource {
    pub fn new(regions: Vec<RegionRecord>) -> Self {
        StaticMaskSource { regions }
    }
}

impl MaskSource for StaticMaskSource {
    fn generate(&self, _image: &DynamicImage) -> SegmentResult<Vec<RegionRecord>> {
        Ok(self.regions.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
