//! Mask-to-archive pipeline
//!
//! Mask source -> ranker -> {label compositor, region extractor} -> packager.
//! Each run owns its region collection and buffers; nothing is shared
//! between runs.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use log::{debug, info, warn};

use crate::archive::{ArchivePackager, PackagedArchive};
use crate::compositor::{compose_labels, LabelImage};
use crate::extractor::extract_cutout;
use crate::region::{rank_regions, RegionRecord};
use crate::source::MaskSource;
use crate::utils::path_utils;
use crate::utils::progress::ProgressTracker;
use super::config::{BBoxPolicy, PipelineConfig};
use super::errors::{SegmentError, SegmentResult};

/// In-memory result of segmenting one image
#[derive(Debug)]
pub struct SegmentationOutput {
    /// Flattened label image
    pub label_image: LabelImage,
    /// Archive holding one cutout per extracted region
    pub archive: PackagedArchive,
    /// Ranks of regions left out under the skip policy
    pub skipped: Vec<usize>,
}

/// Summary of a pipeline run that reached disk
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub archive_path: PathBuf,
    pub label_image_path: Option<PathBuf>,
    pub region_count: usize,
    pub entry_count: usize,
    pub skipped: Vec<usize>,
}

/// Check that every mask shares the image's grid
fn check_mask_dimensions(collection: &[RegionRecord], width: u32, height: u32) -> SegmentResult<()> {
    for (index, region) in collection.iter().enumerate() {
        let mask = region.mask();
        if mask.width() != width || mask.height() != height {
            return Err(SegmentError::MaskDimensionMismatch {
                index,
                mask_width: mask.width(),
                mask_height: mask.height(),
                image_width: width,
                image_height: height,
            });
        }
    }
    Ok(())
}

/// Turn a region collection into a label image and an in-memory archive
///
/// Cutouts are extracted one at a time and written straight into the
/// archive, so at most one cutout is alive at any point.
///
/// # Arguments
/// * `image` - The decoded source image
/// * `collection` - Unordered regions from the mask source
/// * `config` - Pipeline settings
///
/// # Errors
/// `EmptyInput` for an empty collection, `InvalidBBox` under the abort
/// policy, and any encoding failure.
pub fn segment_regions(image: &DynamicImage,
                       collection: Vec<RegionRecord>,
                       config: &PipelineConfig) -> SegmentResult<SegmentationOutput> {
    let (width, height) = image.dimensions();
    check_mask_dimensions(&collection, width, height)?;

    let ranked = rank_regions(collection)?;
    info!("Ranked {} regions", ranked.len());

    let label_image = compose_labels(&ranked, width, height)?;

    let progress = if config.show_progress {
        ProgressTracker::new(ranked.len() as u64, "Extracting regions")
    } else {
        ProgressTracker::hidden(ranked.len() as u64)
    };

    let mut packager = ArchivePackager::new(config.compression, &config.entry_prefix);
    let mut skipped = Vec::new();

    for (rank, region) in ranked.iter() {
        match extract_cutout(region, rank, image) {
            Ok(cutout) => packager.add_cutout(rank, &cutout)?,
            Err(e @ SegmentError::InvalidBBox { .. }) if config.bbox_policy == BBoxPolicy::Skip => {
                warn!("Skipping region: {}", e);
                skipped.push(rank);
            }
            Err(e) => return Err(e),
        }
        progress.increment(1);
    }
    progress.finish();

    let archive = packager.finish()?;
    debug!("Archive holds {} entries, {} regions skipped", archive.entries().len(), skipped.len());

    Ok(SegmentationOutput {
        label_image,
        archive,
        skipped,
    })
}

/// Segmentation pipeline with an injected mask source
///
/// The mask source is built once by the caller and reused for every image
/// the pipeline processes.
pub struct SegmentPipeline<S: MaskSource> {
    source: S,
    config: PipelineConfig,
}

impl<S: MaskSource> SegmentPipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        SegmentPipeline { source, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Segment the image at `input_path` into `<input-without-extension>.zip`
    pub fn run(&self, input_path: &Path) -> SegmentResult<PipelineReport> {
        info!("Loading image {}", input_path.display());
        let image = image::open(input_path)?;
        info!("Image loaded: {}x{}", image.width(), image.height());

        let archive_path = path_utils::archive_path_for(input_path);
        let label_image_path = if self.config.save_label_image {
            Some(path_utils::label_image_path_for(input_path))
        } else {
            None
        };

        self.run_on_image(&image, &archive_path, label_image_path.as_deref())
    }

    /// Segment an already decoded image
    ///
    /// # Arguments
    /// * `image` - The source image
    /// * `archive_path` - Where the archive is committed
    /// * `label_image_path` - Where to save the label image, if anywhere
    pub fn run_on_image(&self,
                        image: &DynamicImage,
                        archive_path: &Path,
                        label_image_path: Option<&Path>) -> SegmentResult<PipelineReport> {
        info!("Generating masks with source '{}'", self.source.name());
        let collection = self.source.generate(image)?;
        let region_count = collection.len();
        info!("Mask source returned {} regions", region_count);

        let output = segment_regions(image, collection, &self.config)?;

        // The label image goes first and is removed again if the archive
        // cannot be committed.
        if let Some(path) = label_image_path {
            output.label_image.save(path)?;

            if let Err(e) = output.archive.commit(archive_path) {
                if let Err(remove_err) = fs::remove_file(path) {
                    warn!("Failed to remove label image {}: {}", path.display(), remove_err);
                }
                return Err(e);
            }
        } else {
            output.archive.commit(archive_path)?;
        }

        Ok(PipelineReport {
            archive_path: archive_path.to_path_buf(),
            label_image_path: label_image_path.map(Path::to_path_buf),
            region_count,
            entry_count: output.archive.entries().len(),
            skipped: output.skipped,
        })
    }
}
