//! Archive packaging
//!
//! Serializes region cutouts into a single zip, one PNG entry per region.

mod compression;
mod packager;

pub use compression::ArchiveCompression;
pub use packager::{entry_name, ArchivePackager, PackagedArchive, DEFAULT_ENTRY_PREFIX};
