//! Exif (TIFF block) parsing
//!
//! Directory structures, the worklist IFD resolver, tag value decoding and
//! the `ExifData` facade with its accessors.

pub mod accessors;
pub mod constants;
pub mod data;
pub mod ifd;
pub mod resolver;
pub mod tag_names;
pub mod values;
#[cfg(test)]
mod tests;

pub use accessors::{ExposureTime, Orientation, Thumbnail};
pub use data::{parse_exif, parse_exif_with_options, ExifData};
pub use ifd::{IfdKind, IfdRef, Tag, TagKey, TagMap, TagType};
pub use resolver::ExifReader;
pub use values::{Rational, SRational, TagValue};
