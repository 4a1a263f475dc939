//! Output path helpers
//!
//! Every output of a run is placed next to the input image and named
//! after its stem.

use std::path::{Path, PathBuf};

/// Archive path for an input image: the input path with its extension replaced by `.zip`
pub fn archive_path_for(input: &Path) -> PathBuf {
    input.with_extension("zip")
}

/// Label image path for an input image: `<stem>_labels.png` beside the input
pub fn label_image_path_for(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "_labels.png")
}

/// Default mask directory for an input image: `<stem>_masks` beside the input
pub fn mask_dir_for(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "_masks")
}

fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{}{}", stem.to_string_lossy(), suffix))
}
