//! Tag value decoding
//!
//! Turns the raw four value bytes or the out-of-line payload of a `Tag`
//! into typed values, in the byte order of the TIFF block the tag came
//! from. Reads are checked against the Exif block length so a corrupt
//! offset never reaches past the block.

use std::fmt;
use std::io::{self, Read};

use log::trace;

use crate::exif::ifd::{Tag, TagType};
use crate::exif::resolver::ExifReader;
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::ReadAt;
use crate::meta::errors::{MetaError, MetaResult};
use crate::utils::string_utils::trim_trailing_nulls;

/// Unsigned fraction as stored in a RATIONAL field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Rational { numerator, denominator }
    }

    /// Floating value of the fraction, `None` for a zero denominator
    pub fn to_f64(&self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(f64::from(self.numerator) / f64::from(self.denominator))
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Signed fraction as stored in an SRATIONAL field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub fn new(numerator: i32, denominator: i32) -> Self {
        SRational { numerator, denominator }
    }

    /// Floating value of the fraction, `None` for a zero denominator
    pub fn to_f64(&self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(f64::from(self.numerator) / f64::from(self.denominator))
        }
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A decoded tag value
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// BYTE, SBYTE and UNDEFINED
    Bytes(Vec<u8>),
    Ascii(String),
    Short(u16),
    Shorts(Vec<u16>),
    Long(u32),
    Longs(Vec<u32>),
    SShort(i16),
    SShorts(Vec<i16>),
    SLong(i32),
    SLongs(Vec<i32>),
    Rational(Rational),
    Rationals(Vec<Rational>),
    SRational(SRational),
    SRationals(Vec<SRational>),
    Float(f32),
    Floats(Vec<f32>),
    Double(f64),
    Doubles(Vec<f64>),
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Bytes(bytes) => {
                for (i, b) in bytes.iter().take(16).enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{:02x}", b)?;
                }
                if bytes.len() > 16 {
                    write!(f, " ... ({} bytes)", bytes.len())?;
                }
                Ok(())
            }
            TagValue::Ascii(s) => f.write_str(s),
            TagValue::Short(v) => write!(f, "{}", v),
            TagValue::Shorts(v) => join(f, v),
            TagValue::Long(v) => write!(f, "{}", v),
            TagValue::Longs(v) => join(f, v),
            TagValue::SShort(v) => write!(f, "{}", v),
            TagValue::SShorts(v) => join(f, v),
            TagValue::SLong(v) => write!(f, "{}", v),
            TagValue::SLongs(v) => join(f, v),
            TagValue::Rational(v) => write!(f, "{}", v),
            TagValue::Rationals(v) => join(f, v),
            TagValue::SRational(v) => write!(f, "{}", v),
            TagValue::SRationals(v) => join(f, v),
            TagValue::Float(v) => write!(f, "{}", v),
            TagValue::Floats(v) => join(f, v),
            TagValue::Double(v) => write!(f, "{}", v),
            TagValue::Doubles(v) => join(f, v),
        }
    }
}

fn mismatch(tag: &Tag) -> MetaError {
    MetaError::TagTypeMismatch {
        tag: tag.id,
        found: tag.tag_type.code(),
    }
}

fn no_values(tag: &Tag) -> MetaError {
    MetaError::GenericError(format!("Tag {:#06x} has no values", tag.id))
}

fn first<T: Copy>(values: Vec<T>, tag: &Tag) -> MetaResult<T> {
    values.first().copied().ok_or_else(|| no_values(tag))
}

type ReadFn<T> = fn(&dyn ByteOrderHandler, &mut dyn Read) -> io::Result<T>;

impl<R: ReadAt> ExifReader<R> {
    /// Reads `unit_count` values of a tag in the block's byte order
    fn read_all<T>(&self, tag: &Tag, read: ReadFn<T>) -> MetaResult<Vec<T>> {
        let bytes = self.value_bytes(tag)?;
        let mut cursor = bytes.as_slice();
        let mut values = Vec::with_capacity(tag.unit_count as usize);
        for _ in 0..tag.unit_count {
            values.push(read(self.handler(), &mut cursor)?);
        }
        Ok(values)
    }

    /// Raw value bytes of a tag, inline or out of line
    pub fn value_bytes(&self, tag: &Tag) -> MetaResult<Vec<u8>> {
        let size = tag.value_size();
        if tag.is_inline() {
            return Ok(tag.raw_value()[..size as usize].to_vec());
        }

        if !self.in_bounds(tag.value_offset, size) {
            return Err(MetaError::ValueOutOfBounds {
                tag: tag.id,
                offset: tag.value_offset,
                size,
            });
        }

        trace!("Reading {} bytes of tag {:#06x} at offset {}", size, tag.id, tag.value_offset);
        self.read_block(tag.value_offset, size)
    }

    /// Uninterpreted bytes of a BYTE, SBYTE, UNDEFINED or ASCII tag
    pub fn parse_bytes(&self, tag: &Tag) -> MetaResult<Vec<u8>> {
        match tag.tag_type {
            TagType::Byte | TagType::SByte | TagType::Undefined | TagType::Ascii => self.value_bytes(tag),
            _ => Err(mismatch(tag)),
        }
    }

    /// Text of an ASCII tag
    ///
    /// BYTE and UNDEFINED tags are accepted too since several writers
    /// store strings that way. Trailing NULs are dropped and invalid
    /// UTF-8 is replaced.
    pub fn parse_ascii(&self, tag: &Tag) -> MetaResult<String> {
        match tag.tag_type {
            TagType::Ascii | TagType::Byte | TagType::Undefined => {
                let mut bytes = self.value_bytes(tag)?;
                trim_trailing_nulls(&mut bytes);
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            _ => Err(mismatch(tag)),
        }
    }

    /// First value of a SHORT tag
    pub fn parse_u16(&self, tag: &Tag) -> MetaResult<u16> {
        self.parse_u16s(tag)?.first().copied().ok_or_else(|| no_values(tag))
    }

    /// All values of a SHORT tag
    pub fn parse_u16s(&self, tag: &Tag) -> MetaResult<Vec<u16>> {
        if tag.tag_type != TagType::Short {
            return Err(mismatch(tag));
        }
        self.read_all(tag, |h, r| h.read_u16(r))
    }

    /// First value of a SHORT, LONG or IFD tag, widened to `u32`
    pub fn parse_u32(&self, tag: &Tag) -> MetaResult<u32> {
        self.parse_u32s(tag)?.first().copied().ok_or_else(|| no_values(tag))
    }

    /// All values of a SHORT, LONG or IFD tag, widened to `u32`
    pub fn parse_u32s(&self, tag: &Tag) -> MetaResult<Vec<u32>> {
        match tag.tag_type {
            TagType::Short => Ok(self.parse_u16s(tag)?.into_iter().map(u32::from).collect()),
            TagType::Long | TagType::Ifd => self.read_all(tag, |h, r| h.read_u32(r)),
            _ => Err(mismatch(tag)),
        }
    }

    /// All values of an SSHORT tag
    pub fn parse_i16s(&self, tag: &Tag) -> MetaResult<Vec<i16>> {
        if tag.tag_type != TagType::SShort {
            return Err(mismatch(tag));
        }
        self.read_all(tag, |h, r| h.read_i16(r))
    }

    /// First value of an SSHORT or SLONG tag, widened to `i32`
    pub fn parse_i32(&self, tag: &Tag) -> MetaResult<i32> {
        self.parse_i32s(tag)?.first().copied().ok_or_else(|| no_values(tag))
    }

    /// All values of an SSHORT or SLONG tag, widened to `i32`
    pub fn parse_i32s(&self, tag: &Tag) -> MetaResult<Vec<i32>> {
        match tag.tag_type {
            TagType::SShort => Ok(self.parse_i16s(tag)?.into_iter().map(i32::from).collect()),
            TagType::SLong => self.read_all(tag, |h, r| h.read_i32(r)),
            _ => Err(mismatch(tag)),
        }
    }

    /// All values of a FLOAT tag
    pub fn parse_floats(&self, tag: &Tag) -> MetaResult<Vec<f32>> {
        if tag.tag_type != TagType::Float {
            return Err(mismatch(tag));
        }
        self.read_all(tag, |h, r| h.read_f32(r))
    }

    /// All values of a DOUBLE tag
    pub fn parse_doubles(&self, tag: &Tag) -> MetaResult<Vec<f64>> {
        if tag.tag_type != TagType::Double {
            return Err(mismatch(tag));
        }
        self.read_all(tag, |h, r| h.read_f64(r))
    }

    /// First value of a RATIONAL tag
    pub fn parse_rational(&self, tag: &Tag) -> MetaResult<Rational> {
        self.parse_rationals(tag)?.first().copied().ok_or_else(|| no_values(tag))
    }

    /// All values of a RATIONAL tag
    pub fn parse_rationals(&self, tag: &Tag) -> MetaResult<Vec<Rational>> {
        if tag.tag_type != TagType::Rational {
            return Err(mismatch(tag));
        }
        let pairs = self.read_all(tag, |h, r| h.read_rational(r))?;
        Ok(pairs.into_iter().map(|(n, d)| Rational::new(n, d)).collect())
    }

    /// First value of an SRATIONAL tag
    pub fn parse_srational(&self, tag: &Tag) -> MetaResult<SRational> {
        self.parse_srationals(tag)?.first().copied().ok_or_else(|| no_values(tag))
    }

    /// All values of an SRATIONAL tag
    pub fn parse_srationals(&self, tag: &Tag) -> MetaResult<Vec<SRational>> {
        if tag.tag_type != TagType::SRational {
            return Err(mismatch(tag));
        }
        let pairs = self.read_all(tag, |h, r| h.read_srational(r))?;
        Ok(pairs.into_iter().map(|(n, d)| SRational::new(n, d)).collect())
    }

    /// Floating value of the first RATIONAL of a tag
    pub fn parse_f64(&self, tag: &Tag) -> MetaResult<f64> {
        self.parse_rational(tag)?
            .to_f64()
            .ok_or(MetaError::ZeroDenominator(tag.id))
    }

    /// Floating value of the first SRATIONAL of a tag
    pub fn parse_signed_f64(&self, tag: &Tag) -> MetaResult<f64> {
        self.parse_srational(tag)?
            .to_f64()
            .ok_or(MetaError::ZeroDenominator(tag.id))
    }

    /// Decodes a tag according to its type and count
    pub fn tag_value(&self, tag: &Tag) -> MetaResult<TagValue> {
        let single = tag.unit_count == 1;
        let value = match tag.tag_type {
            TagType::Ascii => TagValue::Ascii(self.parse_ascii(tag)?),
            TagType::Short if single => TagValue::Short(self.parse_u16(tag)?),
            TagType::Short => TagValue::Shorts(self.parse_u16s(tag)?),
            TagType::Long | TagType::Ifd if single => TagValue::Long(self.parse_u32(tag)?),
            TagType::Long | TagType::Ifd => TagValue::Longs(self.parse_u32s(tag)?),
            TagType::Rational if single => TagValue::Rational(self.parse_rational(tag)?),
            TagType::Rational => TagValue::Rationals(self.parse_rationals(tag)?),
            TagType::SRational if single => TagValue::SRational(self.parse_srational(tag)?),
            TagType::SRational => TagValue::SRationals(self.parse_srationals(tag)?),
            TagType::SShort if single => TagValue::SShort(first(self.parse_i16s(tag)?, tag)?),
            TagType::SShort => TagValue::SShorts(self.parse_i16s(tag)?),
            TagType::SLong if single => TagValue::SLong(self.parse_i32(tag)?),
            TagType::SLong => TagValue::SLongs(self.parse_i32s(tag)?),
            TagType::Float if single => TagValue::Float(first(self.parse_floats(tag)?, tag)?),
            TagType::Float => TagValue::Floats(self.parse_floats(tag)?),
            TagType::Double if single => TagValue::Double(first(self.parse_doubles(tag)?, tag)?),
            TagType::Double => TagValue::Doubles(self.parse_doubles(tag)?),
            TagType::Byte | TagType::SByte | TagType::Undefined => TagValue::Bytes(self.value_bytes(tag)?),
        };
        Ok(value)
    }
}
