//! Tag dump command
//!
//! Lists every resolved tag of each input file, ordered by directory
//! and tag id.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::report::{decode_file, for_each_file, report_summary, report_xmp};
use crate::commands::CommonArgs;
use crate::exif::ExifData;
use crate::meta::errors::MetaResult;

/// Command for dumping all tags
pub struct DumpCommand {
    args: CommonArgs,
}

impl DumpCommand {
    pub fn new(args: &ArgMatches) -> MetaResult<Self> {
        Ok(DumpCommand {
            args: CommonArgs::from_matches(args)?,
        })
    }

    fn dump_tags(&self, exif: &ExifData<Vec<u8>>) {
        info!("  Tags:");
        for tag in exif.tags() {
            let value = match exif.display_value(tag) {
                Ok(v) => v,
                Err(e) => format!("<{}>", e),
            };
            info!("    {}#{} {:#06x} {:<28} {:<9} = {}",
                  tag.ifd, tag.ifd_index, tag.id, tag.name(), tag.tag_type.name(), value);
        }
    }
}

impl Command for DumpCommand {
    fn execute(&self) -> MetaResult<()> {
        for_each_file(&self.args.files, |path| {
            let metadata = decode_file(path, &self.args)?;
            report_summary(path, &metadata);
            if let Some(exif) = &metadata.exif {
                self.dump_tags(exif);
            }
            if self.args.show_xmp {
                report_xmp(&metadata)?;
            }
            Ok(())
        })
    }
}
