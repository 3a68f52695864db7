//! Exif data facade
//!
//! `ExifData` owns the random-access reader of one TIFF block together
//! with the resolved tag map. Lookups are plain map reads; values are
//! decoded on demand through the reader.

use log::{debug, info};

use crate::exif::ifd::{IfdKind, IfdRef, Tag, TagKey, TagMap};
use crate::exif::resolver::ExifReader;
use crate::exif::values::TagValue;
use crate::io::byte_order::ByteOrder;
use crate::io::seekable::ReadAt;
use crate::meta::errors::{MetaError, MetaResult};
use crate::meta::header::{ExifHeader, ImageType};
use crate::meta::options::ParseOptions;
use crate::utils::string_utils::clamp_chars;

/// Resolved Exif metadata of one TIFF block
pub struct ExifData<R> {
    reader: ExifReader<R>,
    tag_map: TagMap,
    image_type: ImageType,
}

/// Resolves every directory reachable from the header's first IFD
///
/// A header whose first IFD kind is `Null` starts at IFD0.
pub fn parse_exif<R: ReadAt>(reader: R, header: ExifHeader) -> MetaResult<ExifData<R>> {
    parse_exif_with_options(reader, header, ParseOptions::default())
}

/// `parse_exif` with explicit options
pub fn parse_exif_with_options<R: ReadAt>(
    reader: R,
    header: ExifHeader,
    options: ParseOptions,
) -> MetaResult<ExifData<R>> {
    if !header.is_valid() {
        return Err(MetaError::InvalidHeader);
    }

    let header = if header.first_ifd == IfdKind::Null {
        header.with_first_ifd(IfdKind::Ifd0, header.first_ifd_offset)
    } else {
        header
    };

    let mut data = ExifData {
        reader: ExifReader::new(reader, &header, options)?,
        tag_map: TagMap::new(),
        image_type: header.image_type,
    };

    let start = IfdRef::new(header.first_ifd, 0, header.first_ifd_offset);
    data.reader.resolve(start, &mut data.tag_map)?;
    info!("Parsed Exif data: {} tags", data.tag_map.len());

    Ok(data)
}

impl<R: ReadAt> ExifData<R> {
    /// Resolves another directory into this tag map
    ///
    /// The header re-seeds byte order, origin and length; it must be
    /// valid and name a real directory kind.
    pub fn parse_ifd(&mut self, header: ExifHeader) -> MetaResult<()> {
        if !header.is_valid() || header.first_ifd == IfdKind::Null {
            return Err(MetaError::InvalidHeader);
        }

        self.reader.reseed(&header)?;
        self.image_type = header.image_type;

        let start = IfdRef::new(header.first_ifd, 0, header.first_ifd_offset);
        let directories = self.reader.resolve(start, &mut self.tag_map)?;
        debug!("Resolved {} more directories from {}", directories, start);
        Ok(())
    }

    /// Looks up a tag by directory kind, directory index and id
    pub fn get_tag(&self, ifd: IfdKind, index: u8, id: u16) -> Option<&Tag> {
        self.tag_map.get(&TagKey::new(ifd, index, id))
    }

    /// Like `get_tag`, failing with `MetaError::EmptyTag` on a miss
    pub fn tag(&self, ifd: IfdKind, index: u8, id: u16) -> MetaResult<&Tag> {
        self.get_tag(ifd, index, id).ok_or(MetaError::EmptyTag)
    }

    /// Every resolved tag, ordered by directory kind, index and id
    pub fn tags(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.tag_map.values().collect();
        tags.sort_by_key(|tag| tag.key());
        tags
    }

    pub fn tag_map(&self) -> &TagMap {
        &self.tag_map
    }

    pub fn len(&self) -> usize {
        self.tag_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_map.is_empty()
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.reader.byte_order()
    }

    /// Reader used to decode values
    pub fn reader(&self) -> &ExifReader<R> {
        &self.reader
    }

    /// Decodes a tag value
    ///
    /// Text is clamped to `ParseOptions::ascii_display_limit` characters;
    /// the typed accessors and `ExifReader::parse_ascii` return it whole.
    pub fn tag_value(&self, tag: &Tag) -> MetaResult<TagValue> {
        let limit = self.reader.options().ascii_display_limit;
        match self.reader.tag_value(tag)? {
            TagValue::Ascii(text) => Ok(TagValue::Ascii(clamp_chars(&text, limit))),
            other => Ok(other),
        }
    }

    /// Display form of a tag value
    pub fn display_value(&self, tag: &Tag) -> MetaResult<String> {
        Ok(self.tag_value(tag)?.to_string())
    }

    /// Text of a tag, trimmed of surrounding whitespace
    pub(crate) fn ascii(&self, ifd: IfdKind, id: u16) -> MetaResult<String> {
        let tag = self.tag(ifd, 0, id)?;
        Ok(self.reader.parse_ascii(tag)?.trim().to_string())
    }
}
