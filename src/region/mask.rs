//! Binary region masks
//!
//! A mask is a row-major boolean grid with the same dimensions as the
//! image it was computed from.

use image::GrayImage;

use super::bbox::BoundingBox;

/// Pixel-accurate boolean mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl BinaryMask {
    /// Build a mask by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        BinaryMask { width, height, data }
    }

    /// Binarize a grayscale image: a pixel is set when its luma is at least `threshold`
    pub fn from_luma(image: &GrayImage, threshold: u8) -> Self {
        let data = image.pixels().map(|p| p[0] >= threshold).collect();
        BinaryMask {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the mask value at (x, y); out-of-range coordinates read as false
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Number of set pixels
    pub fn area(&self) -> u64 {
        self.data.iter().filter(|&&v| v).count() as u64
    }

    /// Iterate over the coordinates of every set pixel in row-major order
    pub fn set_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    /// Smallest box containing every set pixel, or `None` for an empty mask
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut any = false;

        for (x, y) in self.set_pixels() {
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        if !any {
            return None;
        }

        Some(BoundingBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Render the part of the mask under `bbox` as a 0/255 alpha channel
    ///
    /// Pixels of the box that fall outside the mask grid are 0.
    pub fn crop_to_alpha(&self, bbox: &BoundingBox) -> GrayImage {
        GrayImage::from_fn(bbox.width, bbox.height, |x, y| {
            let inside = match (bbox.left.checked_add(x), bbox.top.checked_add(y)) {
                (Some(mx), Some(my)) => self.get(mx, my),
                _ => false,
            };
            image::Luma([if inside { 255 } else { 0 }])
        })
    }
}
