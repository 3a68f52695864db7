//! Custom error types for metadata extraction

use std::fmt;
use std::io;

/// Metadata extraction error types
#[derive(Debug)]
pub enum MetaError {
    /// I/O error from the underlying stream
    IoError(io::Error),
    /// The start-of-image signature never appeared
    NoJpegMarker,
    /// End of image reached. This is a stop signal, not a failure
    EndOfImage,
    /// No Exif block was found
    NoExif,
    /// Exif header failed validity checks
    InvalidHeader,
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// A marker segment declared a length that cannot be right
    InvalidSegment { marker: u8, length: u16 },
    /// A directory overruns the Exif block or is otherwise unusable
    InvalidDirectory(String),
    /// Requested tag is not present
    EmptyTag,
    /// Tag type code that cannot be decoded
    UnsupportedTagType(u16),
    /// Tag is present but has a type the accessor cannot read
    TagTypeMismatch { tag: u16, found: u16 },
    /// Rational value with a zero denominator
    ZeroDenominator(u16),
    /// Out-of-line value lies outside the Exif block
    ValueOutOfBounds { tag: u16, offset: u32, size: u64 },
    /// Generic error with message
    GenericError(String),
}

impl MetaError {
    /// True for the end-of-image stop signal
    pub fn is_end_of_image(&self) -> bool {
        matches!(self, MetaError::EndOfImage)
    }

    /// True for a tag lookup miss
    pub fn is_empty_tag(&self) -> bool {
        matches!(self, MetaError::EmptyTag)
    }
}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaError::IoError(e) => write!(f, "I/O error: {}", e),
            MetaError::NoJpegMarker => write!(f, "No JPEG marker found"),
            MetaError::EndOfImage => write!(f, "End of image"),
            MetaError::NoExif => write!(f, "No Exif data found"),
            MetaError::InvalidHeader => write!(f, "Invalid Exif header"),
            MetaError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            MetaError::InvalidSegment { marker, length } => {
                write!(f, "Invalid segment length {} for marker {:#04x}", length, marker)
            }
            MetaError::InvalidDirectory(msg) => write!(f, "Invalid directory: {}", msg),
            MetaError::EmptyTag => write!(f, "Empty tag"),
            MetaError::UnsupportedTagType(t) => write!(f, "Unsupported tag type: {}", t),
            MetaError::TagTypeMismatch { tag, found } => {
                write!(f, "Tag {:#06x} has unexpected type {}", tag, found)
            }
            MetaError::ZeroDenominator(tag) => write!(f, "Tag {:#06x} has a zero denominator", tag),
            MetaError::ValueOutOfBounds { tag, offset, size } => write!(
                f,
                "Value of tag {:#06x} ({} bytes at offset {}) lies outside the Exif block",
                tag, size, offset
            ),
            MetaError::GenericError(msg) => write!(f, "Metadata error: {}", msg),
        }
    }
}

impl std::error::Error for MetaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetaError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MetaError {
    fn from(error: io::Error) -> Self {
        MetaError::IoError(error)
    }
}

impl From<String> for MetaError {
    fn from(msg: String) -> Self {
        MetaError::GenericError(msg)
    }
}

/// Result type for metadata operations
pub type MetaResult<T> = Result<T, MetaError>;
