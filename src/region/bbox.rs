//! Pixel bounding box of a region
//!
//! Coordinates follow the usual image convention where (0,0) is the
//! top-left corner. The right and bottom edges are exclusive.

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// X-coordinate of the top-left corner (pixels from left)
    pub left: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub top: u32,

    /// Width of the box in pixels
    pub width: u32,

    /// Height of the box in pixels
    pub height: u32,
}

impl BoundingBox {
    /// Create a new bounding box from its (left, top, width, height) form
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        BoundingBox { left, top, width, height }
    }

    /// Rightmost X coordinate (exclusive), or `None` on overflow
    pub fn right(&self) -> Option<u32> {
        self.left.checked_add(self.width)
    }

    /// Bottommost Y coordinate (exclusive), or `None` on overflow
    pub fn bottom(&self) -> Option<u32> {
        self.top.checked_add(self.height)
    }

    /// Check that the box is non-empty and lies within a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }

        match (self.right(), self.bottom()) {
            (Some(right), Some(bottom)) => right <= width && bottom <= height,
            _ => false,
        }
    }
}
