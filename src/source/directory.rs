//! Mask source backed by a directory of mask images
//!
//! External segmenters commonly dump one grayscale image per region
//! (white = region, black = background). This source reads such a dump
//! back in file-name order.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{debug, info, warn};

use crate::pipeline::errors::{SegmentError, SegmentResult};
use crate::region::{BinaryMask, RegionRecord};
use super::mask_source::MaskSource;

/// Default luma threshold for a pixel to count as part of a mask
pub const DEFAULT_MASK_THRESHOLD: u8 = 128;

const MASK_EXTENSIONS: [&str; 5] = ["png", "bmp", "tif", "tiff", "pgm"];

/// Loads one region per mask image found in a directory
#[derive(Debug, Clone)]
pub struct MaskDirectorySource {
    directory: PathBuf,
    threshold: u8,
}

impl MaskDirectorySource {
    /// Create a source reading masks from `directory`
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        MaskDirectorySource {
            directory: directory.as_ref().to_path_buf(),
            threshold: DEFAULT_MASK_THRESHOLD,
        }
    }

    /// Set the luma threshold used to binarize masks
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// List mask files in natural file-name order (`mask_2` before `mask_10`)
    fn mask_files(&self) -> SegmentResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.is_file() && is_mask_file(&path) {
                files.push(path);
            }
        }
        files.sort_by_cached_key(|path| (natural_key(path), path.clone()));
        Ok(files)
    }
}

/// Piece of a file name: a run of digits or a run of anything else
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NameChunk {
    /// Digits compared by value: significant digit count, then the digits
    Number(usize, String),
    Text(String),
}

/// Sort key that orders embedded numbers by value
fn natural_key(path: &Path) -> Vec<NameChunk> {
    let name = path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for c in name.chars() {
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != in_digits {
            chunks.push(make_chunk(std::mem::take(&mut current), in_digits));
        }
        in_digits = is_digit;
        current.push(c);
    }
    if !current.is_empty() {
        chunks.push(make_chunk(current, in_digits));
    }
    chunks
}

fn make_chunk(text: String, digits: bool) -> NameChunk {
    if digits {
        let significant = text.trim_start_matches('0').to_string();
        NameChunk::Number(significant.len(), significant)
    } else {
        NameChunk::Text(text)
    }
}

fn is_mask_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| MASK_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

impl MaskSource for MaskDirectorySource {
    fn generate(&self, image: &DynamicImage) -> SegmentResult<Vec<RegionRecord>> {
        let files = self.mask_files()?;
        info!("Found {} mask files in {}", files.len(), self.directory.display());

        let mut regions = Vec::with_capacity(files.len());
        for (index, path) in files.iter().enumerate() {
            let luma = image::open(path)?.to_luma8();
            if luma.width() != image.width() || luma.height() != image.height() {
                return Err(SegmentError::MaskDimensionMismatch {
                    index,
                    mask_width: luma.width(),
                    mask_height: luma.height(),
                    image_width: image.width(),
                    image_height: image.height(),
                });
            }

            let mask = BinaryMask::from_luma(&luma, self.threshold);
            match RegionRecord::from_mask(mask) {
                Some(region) => {
                    debug!("Loaded mask {} (area {})", path.display(), region.area());
                    regions.push(region);
                }
                None => warn!("Skipping empty mask {}", path.display()),
            }
        }

        Ok(regions)
    }

    fn name(&self) -> &str {
        "mask-directory"
    }
}
