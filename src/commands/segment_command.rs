//! Segmentation command
//!
//! Reads precomputed masks for an input image and packages every region
//! as a transparent cutout in `<input>.zip`.

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::archive::ArchiveCompression;
use crate::commands::command_traits::Command;
use crate::pipeline::config::validate_prefix;
use crate::pipeline::errors::{SegmentError, SegmentResult};
use crate::pipeline::{BBoxPolicy, PipelineConfig, SegmentPipeline};
use crate::source::MaskDirectorySource;
use crate::utils::path_utils;

/// Command for segmenting one image into a cutout archive
pub struct SegmentCommand {
    /// Path to the input image
    input_file: PathBuf,
    /// Directory holding one mask image per region
    mask_dir: PathBuf,
    /// Effective pipeline settings (config file plus CLI overrides)
    config: PipelineConfig,
}

impl SegmentCommand {
    /// Create a new segment command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new SegmentCommand instance or an error
    pub fn new(args: &ArgMatches) -> SegmentResult<Self> {
        let input_file = args.get_one::<String>("input")
            .map(PathBuf::from)
            .ok_or_else(|| SegmentError::Generic("Missing input file".to_string()))?;
        info!("Input file: {}", input_file.display());

        let mask_dir = args.get_one::<String>("masks")
            .map(PathBuf::from)
            .unwrap_or_else(|| path_utils::mask_dir_for(&input_file));
        info!("Mask directory: {}", mask_dir.display());

        let mut config = match args.get_one::<String>("config") {
            Some(path) => PipelineConfig::load(&PathBuf::from(path))?,
            None => PipelineConfig::default(),
        };

        if let Some(name) = args.get_one::<String>("compression") {
            config.compression = ArchiveCompression::from_name(name)?;
        }
        if let Some(prefix) = args.get_one::<String>("prefix") {
            config.entry_prefix = validate_prefix(prefix)?;
        }
        if args.get_flag("skip-invalid") {
            config.bbox_policy = BBoxPolicy::Skip;
        }
        if args.get_flag("label-image") {
            config.save_label_image = true;
        }
        if args.get_flag("progress") {
            config.show_progress = true;
        }

        info!("Compression: {}, bbox policy: {}, label image: {}",
              config.compression.name(), config.bbox_policy.name(), config.save_label_image);

        Ok(SegmentCommand {
            input_file,
            mask_dir,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

impl Command for SegmentCommand {
    fn execute(&self) -> SegmentResult<()> {
        let source = MaskDirectorySource::new(&self.mask_dir)
            .with_threshold(self.config.mask_threshold);
        let pipeline = SegmentPipeline::new(source, self.config.clone());

        let report = pipeline.run(&self.input_file)?;

        info!("Segmentation successful");
        println!("Wrote {} regions to {}", report.entry_count, report.archive_path.display());
        if !report.skipped.is_empty() {
            println!("Skipped {} regions with invalid bounding boxes: {:?}",
                     report.skipped.len(), report.skipped);
        }
        if let Some(path) = &report.label_image_path {
            println!("Wrote label image to {}", path.display());
        }

        Ok(())
    }
}
