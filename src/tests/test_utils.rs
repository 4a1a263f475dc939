use std::io::{Cursor, Read};

use image::{DynamicImage, Rgba, RgbaImage};

use crate::region::{BinaryMask, RegionRecord};

/// Creates a mask with a filled rectangle
pub fn rect_mask(width: u32, height: u32, left: u32, top: u32, rect_width: u32, rect_height: u32) -> BinaryMask {
    BinaryMask::from_fn(width, height, |x, y| {
        x >= left && x < left + rect_width && y >= top && y < top + rect_height
    })
}

/// Creates a region whose bbox and area come from a rectangular mask
pub fn rect_region(width: u32, height: u32, left: u32, top: u32, rect_width: u32, rect_height: u32) -> RegionRecord {
    RegionRecord::from_mask(rect_mask(width, height, left, top, rect_width, rect_height))
        .expect("rectangle mask is not empty")
}

/// Creates an opaque image where every pixel has a distinct color
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 20) as u8, (y * 20) as u8, ((x + y) * 7) as u8, 255])
    }))
}

/// Reads every entry of a zip archive, decoding each as an image
pub fn read_archive(bytes: &[u8]) -> Vec<(String, RgbaImage)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("entry");
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("entry data");
        let image = image::load_from_memory(&data).expect("decodable PNG").to_rgba8();
        entries.push((name, image));
    }
    entries
}
