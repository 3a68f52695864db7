//! Builders for synthetic TIFF blocks

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::exif::constants::field_types;
use crate::io::byte_order::ByteOrder;
use crate::meta::header::{ExifHeader, ImageType};

/// Value of one test entry, encoded at build time in the block's order
pub enum TestValue {
    Bytes(Vec<u8>),
    Undefined(Vec<u8>),
    /// Written with a terminating NUL
    Ascii(&'static str),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    SShorts(Vec<i16>),
    SLongs(Vec<i32>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    /// LONG holding the offset of directory `i`
    Pointer(usize),
    /// LONG array holding the offsets of several directories
    Pointers(Vec<usize>),
    /// Entry written exactly as given
    Raw { type_code: u16, count: u32, value: u32 },
}

/// One directory of a test block
pub struct TestDir {
    pub entries: Vec<(u16, TestValue)>,
    pub next: Option<usize>,
}

impl TestDir {
    pub fn new(entries: Vec<(u16, TestValue)>) -> Self {
        TestDir { entries, next: None }
    }

    pub fn with_next(mut self, index: usize) -> Self {
        self.next = Some(index);
        self
    }

    fn size(&self) -> u32 {
        2 + 12 * self.entries.len() as u32 + 4
    }
}

fn put_u16(order: ByteOrder, out: &mut Vec<u8>, value: u16) {
    match order {
        ByteOrder::LittleEndian => out.write_u16::<LittleEndian>(value).unwrap(),
        ByteOrder::BigEndian => out.write_u16::<BigEndian>(value).unwrap(),
    }
}

fn put_u32(order: ByteOrder, out: &mut Vec<u8>, value: u32) {
    match order {
        ByteOrder::LittleEndian => out.write_u32::<LittleEndian>(value).unwrap(),
        ByteOrder::BigEndian => out.write_u32::<BigEndian>(value).unwrap(),
    }
}

fn put_i32(order: ByteOrder, out: &mut Vec<u8>, value: i32) {
    match order {
        ByteOrder::LittleEndian => out.write_i32::<LittleEndian>(value).unwrap(),
        ByteOrder::BigEndian => out.write_i32::<BigEndian>(value).unwrap(),
    }
}

fn put_u64(order: ByteOrder, out: &mut Vec<u8>, value: u64) {
    match order {
        ByteOrder::LittleEndian => out.write_u64::<LittleEndian>(value).unwrap(),
        ByteOrder::BigEndian => out.write_u64::<BigEndian>(value).unwrap(),
    }
}

/// Offsets the directories of `dirs` are laid out at
pub fn dir_offsets(dirs: &[TestDir]) -> Vec<u32> {
    let mut offsets = Vec::with_capacity(dirs.len());
    let mut pos = 8;
    for dir in dirs {
        offsets.push(pos);
        pos += dir.size();
    }
    offsets
}

/// Type code, count and encoded payload of a value
fn encode(order: ByteOrder, value: &TestValue, offsets: &[u32]) -> (u16, u32, Vec<u8>) {
    let mut payload = Vec::new();
    match value {
        TestValue::Bytes(bytes) => (field_types::BYTE, bytes.len() as u32, bytes.clone()),
        TestValue::Undefined(bytes) => (field_types::UNDEFINED, bytes.len() as u32, bytes.clone()),
        TestValue::Ascii(text) => {
            payload.extend_from_slice(text.as_bytes());
            payload.push(0);
            (field_types::ASCII, payload.len() as u32, payload)
        }
        TestValue::Shorts(values) => {
            values.iter().for_each(|v| put_u16(order, &mut payload, *v));
            (field_types::SHORT, values.len() as u32, payload)
        }
        TestValue::Longs(values) => {
            values.iter().for_each(|v| put_u32(order, &mut payload, *v));
            (field_types::LONG, values.len() as u32, payload)
        }
        TestValue::Rationals(values) => {
            for (n, d) in values {
                put_u32(order, &mut payload, *n);
                put_u32(order, &mut payload, *d);
            }
            (field_types::RATIONAL, values.len() as u32, payload)
        }
        TestValue::SRationals(values) => {
            for (n, d) in values {
                put_i32(order, &mut payload, *n);
                put_i32(order, &mut payload, *d);
            }
            (field_types::SRATIONAL, values.len() as u32, payload)
        }
        TestValue::SShorts(values) => {
            values.iter().for_each(|v| put_u16(order, &mut payload, *v as u16));
            (field_types::SSHORT, values.len() as u32, payload)
        }
        TestValue::SLongs(values) => {
            values.iter().for_each(|v| put_i32(order, &mut payload, *v));
            (field_types::SLONG, values.len() as u32, payload)
        }
        TestValue::Floats(values) => {
            values.iter().for_each(|v| put_u32(order, &mut payload, v.to_bits()));
            (field_types::FLOAT, values.len() as u32, payload)
        }
        TestValue::Doubles(values) => {
            values.iter().for_each(|v| put_u64(order, &mut payload, v.to_bits()));
            (field_types::DOUBLE, values.len() as u32, payload)
        }
        TestValue::Pointer(index) => {
            put_u32(order, &mut payload, offsets[*index]);
            (field_types::LONG, 1, payload)
        }
        TestValue::Pointers(indexes) => {
            indexes.iter().for_each(|i| put_u32(order, &mut payload, offsets[*i]));
            (field_types::LONG, indexes.len() as u32, payload)
        }
        TestValue::Raw { type_code, count, value } => {
            put_u32(order, &mut payload, *value);
            (*type_code, *count, payload)
        }
    }
}

/// Lays out a TIFF block: header, directories in order, then the
/// out-of-line value area. The first directory is IFD0.
pub fn build_tiff(order: ByteOrder, dirs: &[TestDir]) -> Vec<u8> {
    let offsets = dir_offsets(dirs);
    let data_start = 8 + dirs.iter().map(TestDir::size).sum::<u32>();

    let mut out = Vec::new();
    match order {
        ByteOrder::LittleEndian => out.extend_from_slice(b"II"),
        ByteOrder::BigEndian => out.extend_from_slice(b"MM"),
    }
    put_u16(order, &mut out, 42);
    put_u32(order, &mut out, offsets.first().copied().unwrap_or(0));

    let mut data_area: Vec<u8> = Vec::new();
    for dir in dirs {
        put_u16(order, &mut out, dir.entries.len() as u16);
        for (id, value) in &dir.entries {
            let (type_code, count, payload) = encode(order, value, &offsets);
            put_u16(order, &mut out, *id);
            put_u16(order, &mut out, type_code);
            put_u32(order, &mut out, count);

            if payload.len() <= 4 {
                let mut inline = payload.clone();
                inline.resize(4, 0);
                out.extend_from_slice(&inline);
            } else {
                put_u32(order, &mut out, data_start + data_area.len() as u32);
                data_area.extend_from_slice(&payload);
                if data_area.len() % 2 == 1 {
                    data_area.push(0);
                }
            }
        }
        put_u32(order, &mut out, dir.next.map(|i| offsets[i]).unwrap_or(0));
    }

    out.extend_from_slice(&data_area);
    out
}

/// Header for a block starting at offset 0 of its reader
pub fn header_for(block: &[u8]) -> ExifHeader {
    ExifHeader::from_tiff_header(block, 0, block.len() as u32, ImageType::Tiff)
}
