//! Byte order handling for the embedded TIFF block
//!
//! The JPEG container is always big-endian, but the TIFF block inside an
//! Exif segment declares its own byte order. This module implements the
//! Strategy pattern for reading values in either order.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::fmt;
use std::io::{Read, Result};

use crate::meta::errors::{MetaError, MetaResult};

/// "II" byte order marker for little-endian
pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

/// "MM" byte order marker for big-endian
pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];

/// Represents the byte order of a TIFF block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Classifies a byte order mark. Returns `None` when the first two
    /// bytes are neither "II" nor "MM" or the buffer is too short.
    pub fn from_marker(buf: &[u8]) -> Option<Self> {
        match buf.get(..2)? {
            m if m == LITTLE_ENDIAN_MARKER => Some(ByteOrder::LittleEndian),
            m if m == BIG_ENDIAN_MARKER => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Reads and classifies a byte order mark from a reader
    pub fn detect(reader: &mut dyn Read) -> MetaResult<Self> {
        let mut marker = [0u8; 2];
        reader.read_exact(&mut marker)?;
        ByteOrder::from_marker(&marker)
            .ok_or(MetaError::InvalidByteOrder(u16::from_be_bytes(marker)))
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for byte order handling strategies
pub trait ByteOrderHandler {
    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn Read) -> Result<u16>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn Read) -> Result<u32>;

    /// Read an i16 value
    fn read_i16(&self, reader: &mut dyn Read) -> Result<i16>;

    /// Read an i32 value
    fn read_i32(&self, reader: &mut dyn Read) -> Result<i32>;

    /// Read an IEEE 754 single precision value
    fn read_f32(&self, reader: &mut dyn Read) -> Result<f32>;

    /// Read an IEEE 754 double precision value
    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64>;

    /// Read a rational value (two u32 values as numerator/denominator)
    fn read_rational(&self, reader: &mut dyn Read) -> Result<(u32, u32)> {
        let numerator = self.read_u32(reader)?;
        let denominator = self.read_u32(reader)?;
        Ok((numerator, denominator))
    }

    /// Read a signed rational value (two i32 values as numerator/denominator)
    fn read_srational(&self, reader: &mut dyn Read) -> Result<(i32, i32)> {
        let numerator = self.read_i32(reader)?;
        let denominator = self.read_i32(reader)?;
        Ok((numerator, denominator))
    }
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, reader: &mut dyn Read) -> Result<u16> {
        reader.read_u16::<LittleEndian>()
    }

    fn read_u32(&self, reader: &mut dyn Read) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn read_i16(&self, reader: &mut dyn Read) -> Result<i16> {
        reader.read_i16::<LittleEndian>()
    }

    fn read_i32(&self, reader: &mut dyn Read) -> Result<i32> {
        reader.read_i32::<LittleEndian>()
    }

    fn read_f32(&self, reader: &mut dyn Read) -> Result<f32> {
        reader.read_f32::<LittleEndian>()
    }

    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64> {
        reader.read_f64::<LittleEndian>()
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, reader: &mut dyn Read) -> Result<u16> {
        reader.read_u16::<BigEndian>()
    }

    fn read_u32(&self, reader: &mut dyn Read) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn read_i16(&self, reader: &mut dyn Read) -> Result<i16> {
        reader.read_i16::<BigEndian>()
    }

    fn read_i32(&self, reader: &mut dyn Read) -> Result<i32> {
        reader.read_i32::<BigEndian>()
    }

    fn read_f32(&self, reader: &mut dyn Read) -> Result<f32> {
        reader.read_f32::<BigEndian>()
    }

    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64> {
        reader.read_f64::<BigEndian>()
    }
}
