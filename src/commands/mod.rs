//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod report;
pub mod inspect_command;
pub mod dump_command;

pub use command_traits::{Command, CommandFactory};
pub use inspect_command::InspectCommand;
pub use dump_command::DumpCommand;

use clap::ArgMatches;
use crate::meta::errors::{MetaError, MetaResult};
use crate::meta::options::ParseOptions;

/// Factory for creating command instances based on CLI arguments
pub struct PhotometaCommandFactory;

impl PhotometaCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        PhotometaCommandFactory
    }
}

impl Default for PhotometaCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for PhotometaCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> MetaResult<Box<dyn Command>> {
        if args.get_flag("tags") {
            Ok(Box::new(DumpCommand::new(args)?))
        } else {
            Ok(Box::new(InspectCommand::new(args)?))
        }
    }
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommonArgs {
    pub files: Vec<String>,
    pub options: ParseOptions,
    pub show_xmp: bool,
    pub trace_markers: bool,
}

impl CommonArgs {
    pub fn from_matches(args: &ArgMatches) -> MetaResult<Self> {
        let files: Vec<String> = args.get_many::<String>("files")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        if files.is_empty() {
            return Err(MetaError::GenericError("Missing input file".to_string()));
        }

        let mut options = ParseOptions::default();
        if let Some(max) = args.get_one::<usize>("max-directories") {
            options.max_directories = *max;
        }
        if args.get_flag("no-maker-notes") {
            options.follow_maker_notes = false;
        }

        Ok(CommonArgs {
            files,
            options,
            show_xmp: args.get_flag("xmp"),
            trace_markers: args.get_flag("trace-markers"),
        })
    }
}
