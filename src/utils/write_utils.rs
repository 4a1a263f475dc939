//! Atomic file writing
//!
//! Outputs are written to a temporary file in the destination directory
//! and renamed into place, so a reader never sees a partial file.

use std::io::Write;
use std::path::Path;

use crate::pipeline::errors::SegmentResult;

/// Write `bytes` to `path` through a temporary sibling file
///
/// On failure the temporary file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> SegmentResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".segpack-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    Ok(())
}
