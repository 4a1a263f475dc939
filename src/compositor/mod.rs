//! Label compositing
//!
//! Flattens a ranked set of overlapping masks into one label image.

mod label_image;

pub use label_image::{compose_labels, label_for_rank, LabelImage, BACKGROUND_LABEL, LABEL_CYCLE};
