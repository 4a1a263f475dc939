//! Archive packaging
//!
//! Cutouts are streamed into an in-memory zip one at a time; the finished
//! archive is then committed to disk through a temporary file and an atomic
//! rename, so an interrupted run never leaves a truncated archive behind.

use std::io::{Cursor, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::pipeline::errors::{SegmentError, SegmentResult};
use crate::utils::write_utils;
use super::compression::ArchiveCompression;

/// Default prefix of archive entry names
pub const DEFAULT_ENTRY_PREFIX: &str = "seg_";

/// Name of the archive entry holding the cutout of `rank`
pub fn entry_name(prefix: &str, rank: usize) -> String {
    format!("{}{}.png", prefix, rank)
}

/// Streaming zip builder for region cutouts
pub struct ArchivePackager {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    prefix: String,
    entries: Vec<String>,
    last_rank: Option<usize>,
}

impl ArchivePackager {
    /// Create an empty in-memory archive
    ///
    /// # Arguments
    /// * `compression` - Compression applied to every entry
    /// * `prefix` - Prefix of entry names (e.g. "seg_")
    pub fn new(compression: ArchiveCompression, prefix: &str) -> Self {
        let options = SimpleFileOptions::default().compression_method(compression.method());

        ArchivePackager {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            prefix: prefix.to_string(),
            entries: Vec::new(),
            last_rank: None,
        }
    }

    /// Encode a cutout as PNG and append it as the entry for `rank`
    ///
    /// Ranks must be added in strictly increasing order. Gaps are allowed
    /// (a skipped region simply has no entry).
    pub fn add_cutout(&mut self, rank: usize, cutout: &RgbaImage) -> SegmentResult<()> {
        if let Some(previous) = self.last_rank {
            if rank <= previous {
                return Err(SegmentError::EntryOutOfOrder { rank, previous });
            }
        }

        let mut png = Vec::new();
        cutout.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let name = entry_name(&self.prefix, rank);
        self.writer.start_file(name.as_str(), self.options)?;
        self.writer.write_all(&png)?;

        debug!("Added archive entry {} ({} bytes)", name, png.len());
        self.entries.push(name);
        self.last_rank = Some(rank);
        Ok(())
    }

    /// Number of entries written so far
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Close the archive and return its bytes
    pub fn finish(self) -> SegmentResult<PackagedArchive> {
        let cursor = self.writer.finish()?;
        let bytes = cursor.into_inner();
        info!("Archive finished: {} entries, {} bytes", self.entries.len(), bytes.len());

        Ok(PackagedArchive {
            bytes,
            entries: self.entries,
        })
    }
}

/// A complete archive held in memory
#[derive(Debug, Clone)]
pub struct PackagedArchive {
    bytes: Vec<u8>,
    entries: Vec<String>,
}

impl PackagedArchive {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Entry names in the order they were written
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Write the archive to `path` atomically
    ///
    /// The bytes go to a temporary file in the destination directory which
    /// is then renamed over `path`. On failure the temporary file is removed
    /// and `path` is left untouched.
    pub fn commit(&self, path: &Path) -> SegmentResult<()> {
        write_utils::write_atomic(path, &self.bytes)?;
        info!("Wrote archive {} ({} bytes)", path.display(), self.bytes.len());
        Ok(())
    }
}
