pub mod io;
pub mod meta;
pub mod jpeg;
pub mod exif;
pub mod decode;
pub mod utils;
pub mod commands;

pub use crate::decode::{decode_jpeg, decode_jpeg_with_options, JpegMetadata};

pub use meta::{ExifHeader, ImageType, MetaError, MetaResult, ParseOptions};
pub use jpeg::{scan_jpeg, JpegScanner, SegmentEvent, SegmentObserver, SofHeader};
pub use exif::{parse_exif, parse_exif_with_options, ExifData, IfdKind, Tag, TagValue};
pub use io::seekable::{ReadAt, SeekReadAt};
