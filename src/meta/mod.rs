//! Shared metadata model
//!
//! Error taxonomy, the Exif header descriptor handed from container
//! scanners to the IFD resolver, and parse options.

pub mod errors;
pub mod header;
pub mod options;

pub use errors::{MetaError, MetaResult};
pub use header::{ExifHeader, ImageType, TIFF_HEADER_LENGTH};
pub use options::ParseOptions;
