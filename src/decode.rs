//! One-call JPEG metadata decoding
//!
//! Scans a JPEG stream, buffers the first Exif TIFF block and XMP packet
//! it finds and resolves the Exif block from memory.

use std::io::Read;

use log::{debug, info, warn};

use crate::exif::accessors::Thumbnail;
use crate::exif::data::{parse_exif_with_options, ExifData};
use crate::jpeg::markers::SofHeader;
use crate::jpeg::observer::{NoopObserver, SegmentObserver};
use crate::jpeg::scanner::JpegScanner;
use crate::meta::errors::{MetaError, MetaResult};
use crate::meta::header::ExifHeader;
use crate::meta::options::ParseOptions;

/// Metadata collected from one JPEG stream
pub struct JpegMetadata {
    /// Resolved Exif data over the buffered TIFF block
    pub exif: Option<ExifData<Vec<u8>>>,
    /// Header of the Exif block as found in the stream
    pub exif_header: Option<ExifHeader>,
    /// Raw XMP packet
    pub xmp: Option<Vec<u8>>,
    /// Frame of the outermost image
    pub dimensions: Option<SofHeader>,
}

impl JpegMetadata {
    /// Thumbnail location as an absolute offset in the JPEG stream
    pub fn thumbnail(&self) -> MetaResult<Thumbnail> {
        let (exif, header) = match (&self.exif, &self.exif_header) {
            (Some(exif), Some(header)) => (exif, header),
            _ => return Err(MetaError::NoExif),
        };
        let thumbnail = exif.thumbnail()?;
        Ok(Thumbnail {
            offset: thumbnail.offset + u64::from(header.tiff_header_offset),
            length: thumbnail.length,
        })
    }
}

/// Decodes the metadata of a JPEG stream with default options
pub fn decode_jpeg<R: Read>(reader: R) -> MetaResult<JpegMetadata> {
    decode_jpeg_with_options(reader, ParseOptions::default(), NoopObserver)
}

/// Decodes the metadata of a JPEG stream
///
/// Reaching the end of the metadata-bearing markers is success. A TIFF
/// block that fails to resolve is logged and left out, so frame and XMP
/// data still come back.
pub fn decode_jpeg_with_options<R: Read, O: SegmentObserver>(
    reader: R,
    options: ParseOptions,
    observer: O,
) -> MetaResult<JpegMetadata> {
    let mut tiff_block: Option<(ExifHeader, Vec<u8>)> = None;
    let mut xmp: Option<Vec<u8>> = None;

    let (result, dimensions) = {
        let mut scanner = JpegScanner::new(reader)
            .with_options(options)
            .with_observer(observer)
            .with_exif_reader(|r, header| {
                if tiff_block.is_some() {
                    debug!("Ignoring additional Exif block at offset {}", header.tiff_header_offset);
                    return Ok(());
                }
                let mut block = Vec::with_capacity(header.exif_length as usize);
                r.read_to_end(&mut block)?;
                tiff_block = Some((header, block));
                Ok(())
            })
            .with_xmp_reader(|r| {
                let mut packet = Vec::new();
                r.read_to_end(&mut packet)?;
                if xmp.is_none() {
                    xmp = Some(packet);
                }
                Ok(())
            });

        let result = scanner.scan();
        (result, scanner.dimensions())
    };

    match result {
        Ok(()) | Err(MetaError::EndOfImage) => {}
        Err(e) => return Err(e),
    }

    let mut exif_header = None;
    let mut exif = None;
    if let Some((header, block)) = tiff_block {
        exif_header = Some(header);

        // The buffered block starts at the TIFF origin
        let local = ExifHeader {
            tiff_header_offset: 0,
            exif_length: block.len() as u32,
            ..header
        };
        match parse_exif_with_options(block, local, options) {
            Ok(data) => exif = Some(data),
            Err(e) => warn!("Failed to resolve Exif block: {}", e),
        }
    }

    info!(
        "Decoded JPEG: exif {}, xmp {}, frame {}",
        if exif.is_some() { "yes" } else { "no" },
        xmp.as_ref().map(|x| x.len()).unwrap_or(0),
        dimensions.map(|d| format!("{}x{}", d.width, d.height)).unwrap_or_else(|| "none".to_string())
    );

    Ok(JpegMetadata {
        exif,
        exif_header,
        xmp,
        dimensions,
    })
}
