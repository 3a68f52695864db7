//! Image File Directory (IFD) structures
//!
//! An Exif TIFF block is a forest of directories. Each directory holds
//! fixed-size tag records; some records point at further directories.
//! Resolved records are stored in a flat `TagMap` keyed by the directory
//! they came from and their tag id.

use std::collections::HashMap;
use std::fmt;

use crate::exif::constants::{field_types, pointers, INLINE_VALUE_SIZE};
use crate::exif::tag_names;
use crate::meta::errors::MetaError;

/// Kind of directory a tag was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IfdKind {
    /// No directory; a header with this kind cannot be walked
    Null,
    /// Primary image directory. Index 1 is the thumbnail directory
    Ifd0,
    /// Directories listed by the SubIFDs tag
    SubIfd,
    /// Exif sub-IFD
    Exif,
    /// GPS sub-IFD
    Gps,
    /// Interoperability sub-IFD
    Interop,
    /// Maker-note directory, structurally traversed only
    MakerNote,
}

impl IfdKind {
    /// Returns a string representation of this directory kind
    pub fn name(&self) -> &'static str {
        match self {
            IfdKind::Null => "Null",
            IfdKind::Ifd0 => "IFD0",
            IfdKind::SubIfd => "SubIFD",
            IfdKind::Exif => "Exif",
            IfdKind::Gps => "GPS",
            IfdKind::Interop => "Interop",
            IfdKind::MakerNote => "MakerNote",
        }
    }

    /// Kind of directory a pointer tag found in this directory leads to
    pub fn child_for_pointer(&self, tag: u16) -> Option<IfdKind> {
        match (self, tag) {
            (IfdKind::Ifd0, pointers::EXIF_IFD) => Some(IfdKind::Exif),
            (IfdKind::Ifd0, pointers::GPS_IFD) => Some(IfdKind::Gps),
            (IfdKind::Ifd0, pointers::SUB_IFDS) => Some(IfdKind::SubIfd),
            (IfdKind::Exif, pointers::INTEROP_IFD) => Some(IfdKind::Interop),
            (IfdKind::Exif, pointers::MAKER_NOTE) => Some(IfdKind::MakerNote),
            _ => None,
        }
    }

    /// Whether the trailing next-IFD offset of this kind is followed.
    /// Maker-note offsets are vendor-relative and never chained
    pub fn follows_chain(&self) -> bool {
        !matches!(self, IfdKind::Null | IfdKind::MakerNote)
    }
}

impl fmt::Display for IfdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of one directory: kind, index among its kind and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IfdRef {
    pub kind: IfdKind,
    pub index: u8,
    /// Offset relative to the TIFF block origin
    pub offset: u32,
}

impl IfdRef {
    pub fn new(kind: IfdKind, index: u8, offset: u32) -> Self {
        IfdRef { kind, index, offset }
    }
}

impl fmt::Display for IfdRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} (offset: {})", self.kind, self.index, self.offset)
    }
}

/// Tag value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Ifd,
}

impl TagType {
    /// Maps a field type code to a tag type. Unknown codes yield `None`
    pub fn from_code(code: u16) -> Option<Self> {
        let tag_type = match code {
            field_types::BYTE => TagType::Byte,
            field_types::ASCII => TagType::Ascii,
            field_types::SHORT => TagType::Short,
            field_types::LONG => TagType::Long,
            field_types::RATIONAL => TagType::Rational,
            field_types::SBYTE => TagType::SByte,
            field_types::UNDEFINED => TagType::Undefined,
            field_types::SSHORT => TagType::SShort,
            field_types::SLONG => TagType::SLong,
            field_types::SRATIONAL => TagType::SRational,
            field_types::FLOAT => TagType::Float,
            field_types::DOUBLE => TagType::Double,
            field_types::IFD => TagType::Ifd,
            _ => return None,
        };
        Some(tag_type)
    }

    /// Field type code as written in the file
    pub fn code(&self) -> u16 {
        match self {
            TagType::Byte => field_types::BYTE,
            TagType::Ascii => field_types::ASCII,
            TagType::Short => field_types::SHORT,
            TagType::Long => field_types::LONG,
            TagType::Rational => field_types::RATIONAL,
            TagType::SByte => field_types::SBYTE,
            TagType::Undefined => field_types::UNDEFINED,
            TagType::SShort => field_types::SSHORT,
            TagType::SLong => field_types::SLONG,
            TagType::SRational => field_types::SRATIONAL,
            TagType::Float => field_types::FLOAT,
            TagType::Double => field_types::DOUBLE,
            TagType::Ifd => field_types::IFD,
        }
    }

    /// Size in bytes of a single value of this type
    pub fn size(&self) -> u64 {
        match self {
            TagType::Byte | TagType::Ascii | TagType::SByte | TagType::Undefined => 1,
            TagType::Short | TagType::SShort => 2,
            TagType::Long | TagType::SLong | TagType::Float | TagType::Ifd => 4,
            TagType::Rational | TagType::SRational | TagType::Double => 8,
        }
    }

    /// Returns a string representation of this type
    pub fn name(&self) -> &'static str {
        match self {
            TagType::Byte => "BYTE",
            TagType::Ascii => "ASCII",
            TagType::Short => "SHORT",
            TagType::Long => "LONG",
            TagType::Rational => "RATIONAL",
            TagType::SByte => "SBYTE",
            TagType::Undefined => "UNDEFINED",
            TagType::SShort => "SSHORT",
            TagType::SLong => "SLONG",
            TagType::SRational => "SRATIONAL",
            TagType::Float => "FLOAT",
            TagType::Double => "DOUBLE",
            TagType::Ifd => "IFD",
        }
    }
}

impl TryFrom<u16> for TagType {
    type Error = MetaError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        TagType::from_code(code).ok_or(MetaError::UnsupportedTagType(code))
    }
}

/// A resolved directory entry
///
/// Small values live in `raw`, the four value bytes exactly as they
/// appear in the file. Larger values are referenced by `value_offset`,
/// relative to the TIFF block origin, and read on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Tag identifier
    pub id: u16,
    /// Value type
    pub tag_type: TagType,
    /// Number of values
    pub unit_count: u32,
    /// Value bytes interpreted as an offset in the block's byte order
    pub value_offset: u32,
    /// Directory the tag was found in
    pub ifd: IfdKind,
    /// Index of that directory among its kind
    pub ifd_index: u8,
    raw: [u8; 4],
}

impl Tag {
    pub fn new(
        id: u16,
        tag_type: TagType,
        unit_count: u32,
        value_offset: u32,
        raw: [u8; 4],
        ifd: IfdKind,
        ifd_index: u8,
    ) -> Self {
        Tag {
            id,
            tag_type,
            unit_count,
            value_offset,
            ifd,
            ifd_index,
            raw,
        }
    }

    /// Total size of the value in bytes
    pub fn value_size(&self) -> u64 {
        self.tag_type.size() * u64::from(self.unit_count)
    }

    /// Whether the value is stored inline in the entry
    pub fn is_inline(&self) -> bool {
        self.value_size() <= INLINE_VALUE_SIZE
    }

    /// Raw inline value bytes
    pub fn raw_value(&self) -> [u8; 4] {
        self.raw
    }

    /// Key of this tag in a `TagMap`
    pub fn key(&self) -> TagKey {
        TagKey::new(self.ifd, self.ifd_index, self.id)
    }

    /// Human-readable name of this tag
    pub fn name(&self) -> &'static str {
        tag_names::tag_name(self.ifd, self.id)
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        format!("{}#{} Tag: {:#06x} ({}), Type: {}, Count: {}, Value/Offset: {}",
                self.ifd, self.ifd_index, self.id, self.name(),
                self.tag_type.name(), self.unit_count, self.value_offset)
    }
}

/// Composite key of a `TagMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagKey {
    pub ifd: IfdKind,
    pub index: u8,
    pub id: u16,
}

impl TagKey {
    pub fn new(ifd: IfdKind, index: u8, id: u16) -> Self {
        TagKey { ifd, index, id }
    }
}

/// Resolved tags of every directory walked
pub type TagMap = HashMap<TagKey, Tag>;
