//! JPEG container scanning
//!
//! This module walks the marker structure of a JPEG stream, records the
//! frame dimensions and hands Exif and XMP segments to caller-supplied
//! readers without ever touching entropy-coded image data.

pub mod markers;
pub mod observer;
pub mod scanner;
#[cfg(test)]
mod tests;

pub use markers::{AppSignature, SofHeader};
pub use observer::{LogObserver, NoopObserver, SegmentEvent, SegmentObserver};
pub use scanner::{scan_jpeg, ExifReaderFn, JpegScanner, XmpReaderFn};
