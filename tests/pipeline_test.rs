//! End-to-end tests for the segmentation pipeline

extern crate std;

use std::io::{Cursor, Read};
use std::path::Path;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use segpack::pipeline::BBoxPolicy;
use segpack::{
    segment_regions, BinaryMask, BoundingBox, PipelineConfig, RegionRecord, SegmentError,
    SegmentPipeline, StaticMaskSource,
};

fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 20) as u8, (y * 20) as u8, 128, 255])
    }))
}

fn rect_region(width: u32, height: u32, left: u32, top: u32, rw: u32, rh: u32) -> RegionRecord {
    let mask = BinaryMask::from_fn(width, height, |x, y| {
        x >= left && x < left + rw && y >= top && y < top + rh
    });
    RegionRecord::from_mask(mask).unwrap()
}

fn read_entries(path: &Path) -> Vec<(String, RgbaImage)> {
    let bytes = std::fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            (name, image::load_from_memory(&data).unwrap().to_rgba8())
        })
        .collect()
}

#[test]
fn test_two_region_scenario() {
    let image = gradient_image(10, 10);
    let region_a = RegionRecord::new(
        BinaryMask::from_fn(10, 10, |_, _| true),
        BoundingBox::new(0, 0, 10, 10),
        100,
    );
    let region_b = RegionRecord::new(
        BinaryMask::from_fn(10, 10, |x, y| x < 2 && y < 2),
        BoundingBox::new(0, 0, 2, 2),
        4,
    );

    // Discovery order puts the small region first
    let output = segment_regions(&image, vec![region_b, region_a], &PipelineConfig::default()).unwrap();

    let labels = &output.label_image;
    for y in 0..10 {
        for x in 0..10 {
            let expected = if x < 2 && y < 2 { 2 } else { 1 };
            std::assert_eq!(labels.get(x, y), Some(expected), "label at ({}, {})", x, y);
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("scene.zip");
    output.archive.commit(&archive_path).unwrap();

    let entries = read_entries(&archive_path);
    std::assert_eq!(entries.len(), 2);
    std::assert_eq!(entries[0].0, "seg_0.png");
    std::assert_eq!(entries[1].0, "seg_1.png");

    let seg_0 = &entries[0].1;
    std::assert_eq!(seg_0.dimensions(), (10, 10));
    std::assert_eq!(seg_0.as_raw(), image.to_rgba8().as_raw());

    let seg_1 = &entries[1].1;
    std::assert_eq!(seg_1.dimensions(), (2, 2));
    for (x, y, pixel) in seg_1.enumerate_pixels() {
        std::assert_eq!(*pixel, image.get_pixel(x, y));
        std::assert_eq!(pixel[3], 255);
    }
}

#[test]
fn test_archive_round_trip_matches_ranked_regions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    gradient_image(12, 9).save(&input).unwrap();

    let regions = vec![
        rect_region(12, 9, 0, 0, 3, 3),
        rect_region(12, 9, 2, 1, 8, 6),
        rect_region(12, 9, 11, 8, 1, 1),
        rect_region(12, 9, 5, 0, 5, 2),
    ];
    let pipeline = SegmentPipeline::new(StaticMaskSource::new(regions), PipelineConfig::default());

    let report = pipeline.run(&input).unwrap();

    std::assert_eq!(report.archive_path, dir.path().join("photo.zip"));
    std::assert_eq!(report.region_count, 4);
    std::assert_eq!(report.entry_count, 4);
    std::assert!(report.label_image_path.is_none());

    let entries = read_entries(&report.archive_path);
    let expected_sizes = [(8, 6), (5, 2), (3, 3), (1, 1)];
    std::assert_eq!(entries.len(), expected_sizes.len());
    for (rank, ((name, cutout), size)) in entries.iter().zip(expected_sizes).enumerate() {
        std::assert_eq!(name, &format!("seg_{}.png", rank));
        std::assert_eq!(cutout.dimensions(), size);
        std::assert!(cutout.pixels().all(|p| p[3] == 255));
    }
}

#[test]
fn test_empty_collection_creates_no_archive() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.png");
    gradient_image(4, 4).save(&input).unwrap();

    let pipeline = SegmentPipeline::new(StaticMaskSource::new(Vec::new()), PipelineConfig::default());
    let result = pipeline.run(&input);

    std::assert!(matches!(result, Err(SegmentError::EmptyInput)));
    std::assert!(!dir.path().join("empty.zip").exists());
    std::assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_invalid_bbox_aborts_without_archive() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.png");
    gradient_image(6, 6).save(&input).unwrap();

    let bad = RegionRecord::new(
        BinaryMask::from_fn(6, 6, |x, y| x >= 4 && y >= 4),
        BoundingBox::new(4, 4, 5, 5),
        4,
    );
    let good = rect_region(6, 6, 0, 0, 3, 3);
    let pipeline = SegmentPipeline::new(StaticMaskSource::new(vec![good, bad]), PipelineConfig::default());

    let result = pipeline.run(&input);

    std::assert!(matches!(result, Err(SegmentError::InvalidBBox { rank: 1, .. })));
    std::assert!(!dir.path().join("bad.zip").exists());
}

#[test]
fn test_skip_policy_leaves_gap_in_entries() {
    let image = gradient_image(6, 6);
    let bad = RegionRecord::new(
        BinaryMask::from_fn(6, 6, |x, y| x >= 4 && y >= 4),
        BoundingBox::new(4, 4, 5, 5),
        4,
    );
    let regions = vec![rect_region(6, 6, 0, 0, 3, 3), bad, rect_region(6, 6, 0, 5, 1, 1)];
    let config = PipelineConfig {
        bbox_policy: BBoxPolicy::Skip,
        ..PipelineConfig::default()
    };

    let output = segment_regions(&image, regions, &config).unwrap();

    std::assert_eq!(output.skipped, vec![1]);
    std::assert_eq!(output.archive.entries(), &["seg_0.png", "seg_2.png"]);
    // The skipped region is still painted with its own label
    std::assert_eq!(output.label_image.get(5, 5), Some(2));
    std::assert_eq!(output.label_image.get(0, 5), Some(3));
}

#[test]
fn test_mismatched_mask_rejected() {
    let image = gradient_image(5, 5);
    let regions = vec![rect_region(5, 5, 0, 0, 2, 2), rect_region(4, 5, 0, 0, 1, 1)];

    let result = segment_regions(&image, regions, &PipelineConfig::default());

    std::assert!(matches!(result, Err(SegmentError::MaskDimensionMismatch { index: 1, .. })));
}

#[test]
fn test_label_image_saved_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("labels.jpg");
    DynamicImage::ImageRgb8(gradient_image(8, 8).to_rgb8()).save(&input).unwrap();

    let config = PipelineConfig {
        save_label_image: true,
        ..PipelineConfig::default()
    };
    let regions = vec![rect_region(8, 8, 0, 0, 8, 8), rect_region(8, 8, 2, 2, 2, 2)];
    let pipeline = SegmentPipeline::new(StaticMaskSource::new(regions), config);

    let report = pipeline.run(&input).unwrap();

    let label_path = dir.path().join("labels_labels.png");
    std::assert_eq!(report.label_image_path.as_deref(), Some(label_path.as_path()));
    let labels = image::open(&label_path).unwrap().to_luma8();
    std::assert_eq!(labels.dimensions(), (8, 8));
    std::assert_eq!(labels.get_pixel(0, 0)[0], 1);
    std::assert_eq!(labels.get_pixel(3, 3)[0], 2);
    std::assert!(dir.path().join("labels.zip").exists());
}

#[test]
fn test_unreadable_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = SegmentPipeline::new(StaticMaskSource::new(Vec::new()), PipelineConfig::default());

    let result = pipeline.run(&dir.path().join("missing.png"));

    std::assert!(matches!(result, Err(SegmentError::Io(_))));
}

#[test]
fn test_failed_label_save_leaves_no_archive() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("p.png");
    gradient_image(4, 4).save(&input).unwrap();
    // A directory where the label image should go makes the save fail
    std::fs::create_dir(dir.path().join("p_labels.png")).unwrap();

    let config = PipelineConfig {
        save_label_image: true,
        ..PipelineConfig::default()
    };
    let pipeline = SegmentPipeline::new(StaticMaskSource::new(vec![rect_region(4, 4, 0, 0, 2, 2)]), config);

    let result = pipeline.run(&input);

    std::assert!(result.is_err());
    std::assert!(!dir.path().join("p.zip").exists());
    std::assert!(dir.path().join("p_labels.png").is_dir());
}

#[test]
fn test_failed_archive_commit_removes_label_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("q.png");
    gradient_image(4, 4).save(&input).unwrap();
    // A non-empty directory where the archive should go makes the commit fail
    let blocker = dir.path().join("q.zip");
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), b"x").unwrap();

    let config = PipelineConfig {
        save_label_image: true,
        ..PipelineConfig::default()
    };
    let pipeline = SegmentPipeline::new(StaticMaskSource::new(vec![rect_region(4, 4, 0, 0, 2, 2)]), config);

    let result = pipeline.run(&input);

    std::assert!(matches!(result, Err(SegmentError::Io(_))));
    std::assert!(!dir.path().join("q_labels.png").exists());
    std::assert!(blocker.is_dir());
}
