//! Metadata summary command
//!
//! Prints frame size, the common Exif fields and the XMP size of each
//! input file.

use clap::ArgMatches;

use crate::commands::command_traits::Command;
use crate::commands::report::{decode_file, for_each_file, report_summary, report_xmp};
use crate::commands::CommonArgs;
use crate::meta::errors::MetaResult;

/// Command for summarising JPEG metadata
pub struct InspectCommand {
    args: CommonArgs,
}

impl InspectCommand {
    /// Create a new inspect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    pub fn new(args: &ArgMatches) -> MetaResult<Self> {
        Ok(InspectCommand {
            args: CommonArgs::from_matches(args)?,
        })
    }
}

impl Command for InspectCommand {
    fn execute(&self) -> MetaResult<()> {
        for_each_file(&self.args.files, |path| {
            let metadata = decode_file(path, &self.args)?;
            report_summary(path, &metadata);
            if self.args.show_xmp {
                report_xmp(&metadata)?;
            }
            Ok(())
        })
    }
}
