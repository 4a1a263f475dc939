//! CLI command implementations
//!
//! Commands implement the `Command` trait and are created from parsed
//! arguments by the factory.

pub mod command_traits;
pub mod segment_command;

pub use command_traits::{Command, CommandFactory};
pub use segment_command::SegmentCommand;

use clap::ArgMatches;
use crate::pipeline::errors::SegmentResult;

/// Factory for creating command instances based on CLI arguments
pub struct SegpackCommandFactory;

impl SegpackCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SegpackCommandFactory
    }
}

impl Default for SegpackCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for SegpackCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> SegmentResult<Box<dyn Command>> {
        Ok(Box::new(SegmentCommand::new(args)?))
    }
}
