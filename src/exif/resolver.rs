//! IFD resolver
//!
//! Walks the directory graph of a TIFF block and fills a `TagMap`. The
//! walk is an explicit worklist: every directory to visit is queued with
//! its kind, index and offset, and an offset is never queued twice. A
//! cycle in the next-IFD chain or between sub-directory pointers
//! therefore ends the walk instead of looping, and the number of
//! directories visited is capped by `ParseOptions::max_directories`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io::Read;

use log::{debug, info, trace, warn};

use crate::exif::constants::IFD_ENTRY_SIZE;
use crate::exif::ifd::{IfdKind, IfdRef, Tag, TagMap, TagType};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::ReadAt;
use crate::meta::errors::{MetaError, MetaResult};
use crate::meta::header::{ExifHeader, TIFF_HEADER_LENGTH};
use crate::meta::options::ParseOptions;

/// Random-access reader over one TIFF block
///
/// Offsets handed to this reader are relative to the TIFF block origin
/// and checked against the block length before any read.
pub struct ExifReader<R> {
    reader: R,
    byte_order: ByteOrder,
    handler: Box<dyn ByteOrderHandler>,
    /// Absolute offset of the TIFF block origin
    tiff_offset: u32,
    /// Length of the TIFF block
    exif_length: u32,
    options: ParseOptions,
}

/// Bookkeeping of one resolve pass
struct Walk {
    queue: VecDeque<IfdRef>,
    seen: HashSet<u32>,
    counts: HashMap<IfdKind, u8>,
}

impl<R: ReadAt> ExifReader<R> {
    /// Creates a reader positioned by a header
    pub fn new(reader: R, header: &ExifHeader, options: ParseOptions) -> MetaResult<Self> {
        let byte_order = header.byte_order.ok_or(MetaError::InvalidHeader)?;

        Ok(ExifReader {
            reader,
            byte_order,
            handler: byte_order.create_handler(),
            tiff_offset: header.tiff_header_offset,
            exif_length: header.exif_length,
            options,
        })
    }

    /// Re-seeds byte order, origin and length from another header
    pub fn reseed(&mut self, header: &ExifHeader) -> MetaResult<()> {
        let byte_order = header.byte_order.ok_or(MetaError::InvalidHeader)?;
        self.byte_order = byte_order;
        self.handler = byte_order.create_handler();
        self.tiff_offset = header.tiff_header_offset;
        self.exif_length = header.exif_length;
        Ok(())
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn handler(&self) -> &dyn ByteOrderHandler {
        self.handler.as_ref()
    }

    pub fn tiff_offset(&self) -> u32 {
        self.tiff_offset
    }

    pub fn exif_length(&self) -> u32 {
        self.exif_length
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Whether `len` bytes at `offset` lie inside the TIFF block
    pub fn in_bounds(&self, offset: u32, len: u64) -> bool {
        u64::from(offset) + len <= u64::from(self.exif_length)
    }

    /// Reads `len` bytes at `offset` relative to the TIFF block origin
    pub fn read_block(&self, offset: u32, len: u64) -> MetaResult<Vec<u8>> {
        if !self.in_bounds(offset, len) {
            return Err(MetaError::InvalidDirectory(format!(
                "{} bytes at offset {} overrun the Exif block ({} bytes)",
                len, offset, self.exif_length
            )));
        }

        let mut buf = vec![0u8; len as usize];
        let absolute = u64::from(self.tiff_offset) + u64::from(offset);
        self.reader.read_exact_at(&mut buf, absolute)?;
        Ok(buf)
    }

    /// Walks the directory graph rooted at `start`
    ///
    /// A failure in the root directory is returned. Failures further down
    /// are logged and only end their own branch, so the map keeps every
    /// tag collected before. Returns the number of directories read.
    pub fn resolve(&self, start: IfdRef, tags: &mut TagMap) -> MetaResult<usize> {
        let mut walk = Walk {
            queue: VecDeque::new(),
            seen: HashSet::new(),
            counts: HashMap::new(),
        };
        walk.seen.insert(start.offset);
        walk.counts.insert(start.kind, start.index.saturating_add(1));

        let mut visited = self.read_directory(start, tags, &mut walk)
            .map(|_| 1usize)?;

        while let Some(ifd) = walk.queue.pop_front() {
            match self.read_directory(ifd, tags, &mut walk) {
                Ok(()) => visited += 1,
                Err(e) => warn!("Skipping {}: {}", ifd, e),
            }
        }

        info!("Resolved {} directories, {} tags", visited, tags.len());
        Ok(visited)
    }

    /// Reads one directory, inserting its tags and queueing its children
    fn read_directory(&self, ifd: IfdRef, tags: &mut TagMap, walk: &mut Walk) -> MetaResult<()> {
        debug!("Reading {}", ifd);

        let count_bytes = self.read_block(ifd.offset, 2)?;
        let entry_count = self.handler.read_u16(&mut count_bytes.as_slice())?;

        let entries_offset = ifd.offset
            .checked_add(2)
            .ok_or_else(|| MetaError::InvalidDirectory(format!("{} offset overflows", ifd)))?;
        let entries_len = u64::from(entry_count) * u64::from(IFD_ENTRY_SIZE);
        if !self.in_bounds(entries_offset, entries_len) {
            return Err(MetaError::InvalidDirectory(format!(
                "{} declares {} entries, more than the {} byte Exif block holds",
                ifd, entry_count, self.exif_length
            )));
        }

        // The next-IFD offset is optional at the very end of a block
        let has_next = self.in_bounds(entries_offset, entries_len + 4);
        let block = self.read_block(entries_offset, entries_len + if has_next { 4 } else { 0 })?;
        let mut cursor = block.as_slice();

        for _ in 0..entry_count {
            let id = self.handler.read_u16(&mut cursor)?;
            let type_code = self.handler.read_u16(&mut cursor)?;
            let unit_count = self.handler.read_u32(&mut cursor)?;
            let mut raw = [0u8; 4];
            cursor.read_exact(&mut raw)?;
            let value_offset = self.handler.read_u32(&mut raw.as_slice())?;

            let tag_type = match TagType::try_from(type_code) {
                Ok(t) => t,
                Err(e) => {
                    debug!("{}: tag {:#06x} skipped: {}", ifd, id, e);
                    continue;
                }
            };

            let tag = Tag::new(id, tag_type, unit_count, value_offset, raw, ifd.kind, ifd.index);
            if !tag.is_inline() && !self.in_bounds(value_offset, tag.value_size()) {
                warn!("{}: value of tag {:#06x} ({} bytes at {}) overruns the Exif block, skipped",
                      ifd, id, tag.value_size(), value_offset);
                continue;
            }

            trace!("{}, {} bytes {}", tag.description(), tag.value_size(),
                   if tag.is_inline() { "inline" } else { "out of line" });

            if let Some(child) = ifd.kind.child_for_pointer(id) {
                match self.child_offsets(&tag, child) {
                    Ok(offsets) => {
                        for offset in offsets {
                            self.schedule(child, offset, walk);
                        }
                    }
                    Err(e) => warn!("{}: pointer tag {:#06x} not followed: {}", ifd, id, e),
                }
            }

            tags.insert(tag.key(), tag);
        }

        if has_next && ifd.kind.follows_chain() {
            let next = self.handler.read_u32(&mut cursor)?;
            if next != 0 {
                debug!("{} chains to offset {}", ifd, next);
                self.schedule(ifd.kind, next, walk);
            }
        }

        Ok(())
    }

    /// Directory offsets a pointer tag refers to
    fn child_offsets(&self, tag: &Tag, child: IfdKind) -> MetaResult<Vec<u32>> {
        match child {
            IfdKind::MakerNote => {
                if self.options.follow_maker_notes && !tag.is_inline() && self.is_plain_ifd(tag.value_offset) {
                    Ok(vec![tag.value_offset])
                } else {
                    debug!("Maker note at {} is not a plain IFD, not traversed", tag.value_offset);
                    Ok(Vec::new())
                }
            }
            _ if !matches!(tag.tag_type, TagType::Long | TagType::Ifd) => {
                debug!("{} pointer {:#06x} has type {}, not followed", child, tag.id, tag.tag_type.name());
                Ok(Vec::new())
            }
            IfdKind::SubIfd if tag.unit_count > 1 => {
                let bytes = self.read_block(tag.value_offset, u64::from(tag.unit_count) * 4)?;
                let mut cursor = bytes.as_slice();
                let mut offsets = Vec::with_capacity(tag.unit_count as usize);
                for _ in 0..tag.unit_count {
                    offsets.push(self.handler.read_u32(&mut cursor)?);
                }
                Ok(offsets)
            }
            _ => Ok(vec![tag.value_offset]),
        }
    }

    /// Maker notes that open with a vendor signature use their own
    /// layout. Only notes that start straight with an entry count are
    /// walked.
    fn is_plain_ifd(&self, offset: u32) -> bool {
        let bytes = match self.read_block(offset, 2) {
            Ok(b) => b,
            Err(_) => return false,
        };
        if bytes[0].is_ascii_alphabetic() {
            return false;
        }
        matches!(self.handler.read_u16(&mut bytes.as_slice()), Ok(n) if n > 0)
    }

    /// Queues a directory unless its offset was seen or the cap is hit
    fn schedule(&self, kind: IfdKind, offset: u32, walk: &mut Walk) {
        if offset == 0 {
            return;
        }
        if (offset as usize) < TIFF_HEADER_LENGTH || !self.in_bounds(offset, 2) {
            warn!("{} offset {} lies outside the Exif block, ignored", kind, offset);
            return;
        }
        if walk.seen.contains(&offset) {
            warn!("{} offset {} was already visited, cycle ignored", kind, offset);
            return;
        }
        if walk.seen.len() >= self.options.max_directories {
            warn!("Directory limit of {} reached, {} at {} ignored", self.options.max_directories, kind, offset);
            return;
        }

        walk.seen.insert(offset);
        let count = walk.counts.entry(kind).or_insert(0);
        let index = *count;
        *count = count.saturating_add(1);

        walk.queue.push_back(IfdRef::new(kind, index, offset));
    }
}
