//! Exif header descriptor
//!
//! A container scanner produces one `ExifHeader` per Exif block it finds.
//! The header records where the TIFF block starts in the outer stream,
//! how long it is and which byte order it uses, which is everything the
//! IFD resolver needs to walk the block with random access.

use std::fmt;

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::exif::ifd::IfdKind;
use crate::io::byte_order::ByteOrder;

/// Size of the TIFF header: byte order mark, magic and first IFD offset
pub const TIFF_HEADER_LENGTH: usize = 8;

/// TIFF magic number following the byte order mark
pub const TIFF_MAGIC: u16 = 0x002A;

/// Container format an Exif block originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageType {
    #[default]
    Unknown,
    Jpeg,
    Tiff,
    Cr2,
    Heif,
}

impl ImageType {
    /// MIME type of the container
    pub fn mime(&self) -> &'static str {
        match self {
            ImageType::Unknown => "application/octet-stream",
            ImageType::Jpeg => "image/jpeg",
            ImageType::Tiff => "image/tiff",
            ImageType::Cr2 => "image/x-canon-cr2",
            ImageType::Heif => "image/heif",
        }
    }
}

/// Location and byte order of a TIFF block inside a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifHeader {
    /// Byte order declared by the TIFF block, `None` when unrecognized
    pub byte_order: Option<ByteOrder>,
    /// Kind of the directory the walk starts at
    pub first_ifd: IfdKind,
    /// Offset of the first IFD, relative to the TIFF block origin
    pub first_ifd_offset: u32,
    /// Absolute offset of the TIFF block origin in the outer stream
    pub tiff_header_offset: u32,
    /// Declared length of the TIFF block
    pub exif_length: u32,
    /// Container the block came from
    pub image_type: ImageType,
}

impl ExifHeader {
    /// Creates a header whose walk starts at IFD0
    pub fn new(
        byte_order: Option<ByteOrder>,
        first_ifd_offset: u32,
        tiff_header_offset: u32,
        exif_length: u32,
        image_type: ImageType,
    ) -> Self {
        ExifHeader {
            byte_order,
            first_ifd: IfdKind::Ifd0,
            first_ifd_offset,
            tiff_header_offset,
            exif_length,
            image_type,
        }
    }

    /// Builds a header from the first bytes of a TIFF block
    ///
    /// An unrecognized byte order mark or magic number yields a header
    /// without a byte order, which `is_valid` rejects.
    pub fn from_tiff_header(
        buf: &[u8],
        tiff_header_offset: u32,
        exif_length: u32,
        image_type: ImageType,
    ) -> Self {
        let (byte_order, first_ifd_offset) = match parse_tiff_header(buf) {
            Some((order, offset)) => (Some(order), offset),
            None => (None, 0),
        };

        ExifHeader::new(byte_order, first_ifd_offset, tiff_header_offset, exif_length, image_type)
    }

    /// Returns a copy that starts the walk at another directory
    pub fn with_first_ifd(mut self, kind: IfdKind, offset: u32) -> Self {
        self.first_ifd = kind;
        self.first_ifd_offset = offset;
        self
    }

    /// A header is valid when its byte order is known and the first
    /// directory starts past the TIFF header and inside the block
    pub fn is_valid(&self) -> bool {
        self.byte_order.is_some()
            && self.first_ifd_offset as usize >= TIFF_HEADER_LENGTH
            && u64::from(self.first_ifd_offset) + 2 <= u64::from(self.exif_length)
    }
}

impl fmt::Display for ExifHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.byte_order.map(|o| o.name()).unwrap_or("Unknown");
        write!(
            f,
            "Exif header ({}): {}, first {:?} at {}, TIFF block at {} ({} bytes)",
            self.image_type.mime(),
            order,
            self.first_ifd,
            self.first_ifd_offset,
            self.tiff_header_offset,
            self.exif_length
        )
    }
}

/// Parses byte order, magic and first IFD offset from a TIFF header
pub fn parse_tiff_header(buf: &[u8]) -> Option<(ByteOrder, u32)> {
    let header = buf.get(..TIFF_HEADER_LENGTH)?;
    let order = ByteOrder::from_marker(header)?;

    let (magic, offset) = match order {
        ByteOrder::LittleEndian => (LittleEndian::read_u16(&header[2..4]), LittleEndian::read_u32(&header[4..8])),
        ByteOrder::BigEndian => (BigEndian::read_u16(&header[2..4]), BigEndian::read_u32(&header[4..8])),
    };

    if magic != TIFF_MAGIC {
        return None;
    }

    Some((order, offset))
}
