//! Utility modules for common functionality
//!
//! Logging, progress reporting, output paths and atomic writes.

pub mod logger;
pub mod progress;
pub mod path_utils;
pub mod write_utils;
