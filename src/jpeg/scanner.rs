//! JPEG marker scanner
//!
//! The scanner walks a forward-only stream one marker at a time. It keeps
//! a small lookahead window to classify the next marker and read its
//! declared length, then either dispatches the segment to a reader or
//! discards exactly the declared number of bytes so the cursor stays on
//! the next marker.
//!
//! Scanning stops as soon as no further metadata can follow: at the
//! outermost end-of-image, or at the first Huffman table or start-of-scan
//! of the outermost image. Conforming encoders write Exif and XMP before
//! those markers, so the megabytes of compressed data behind them are
//! never read. A file that puts metadata after its first DHT loses that
//! metadata under this rule.

use std::io::{self, Read};

use log::{debug, info, warn};

use crate::io::peek_reader::PeekReader;
use crate::jpeg::markers::{self, AppSignature, SofHeader};
use crate::jpeg::observer::{NoopObserver, SegmentEvent, SegmentObserver};
use crate::meta::errors::{MetaError, MetaResult};
use crate::meta::header::{ExifHeader, ImageType, TIFF_HEADER_LENGTH};
use crate::meta::options::ParseOptions;

/// Reader invoked at the start of a TIFF block with its header
pub type ExifReaderFn<'a> = dyn FnMut(&mut dyn Read, ExifHeader) -> MetaResult<()> + 'a;

/// Reader invoked with a stream bounded to an XMP payload
pub type XmpReaderFn<'a> = dyn FnMut(&mut dyn Read) -> MetaResult<()> + 'a;

/// Bytes peeked per marker: marker, length and the longest signature
const PEEK_WINDOW: usize = markers::SEGMENT_HEADER_LENGTH + 29;

/// Scans a JPEG stream, invoking the readers at their segments
///
/// Returns `MetaError::EndOfImage` when the scan reaches the end of the
/// metadata-bearing markers and `MetaError::NoJpegMarker` when the
/// stream never starts an image.
pub fn scan_jpeg<'a, R: Read>(
    reader: R,
    exif_reader: Option<Box<ExifReaderFn<'a>>>,
    xmp_reader: Option<Box<XmpReaderFn<'a>>>,
) -> MetaResult<()> {
    let mut scanner = JpegScanner::new(reader);
    scanner.exif_reader = exif_reader;
    scanner.xmp_reader = xmp_reader;
    scanner.scan()
}

/// Marker scanner over a forward-only stream
pub struct JpegScanner<'a, R> {
    reader: PeekReader<R>,
    exif_reader: Option<Box<ExifReaderFn<'a>>>,
    xmp_reader: Option<Box<XmpReaderFn<'a>>>,
    observer: Box<dyn SegmentObserver + 'a>,
    options: ParseOptions,
    /// SOI nesting level
    nesting: u8,
    /// Frame of the outermost image, frozen once seen
    sof: Option<SofHeader>,
}

impl<'a, R: Read> JpegScanner<'a, R> {
    /// Creates a scanner with no readers attached
    pub fn new(reader: R) -> Self {
        JpegScanner {
            reader: PeekReader::new(reader),
            exif_reader: None,
            xmp_reader: None,
            observer: Box::new(NoopObserver),
            options: ParseOptions::default(),
            nesting: 0,
            sof: None,
        }
    }

    /// Attaches the Exif reader
    pub fn with_exif_reader<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut dyn Read, ExifHeader) -> MetaResult<()> + 'a,
    {
        self.exif_reader = Some(Box::new(f));
        self
    }

    /// Attaches the XMP reader
    pub fn with_xmp_reader<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut dyn Read) -> MetaResult<()> + 'a,
    {
        self.xmp_reader = Some(Box::new(f));
        self
    }

    /// Attaches a segment observer
    pub fn with_observer<O: SegmentObserver + 'a>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Replaces the parse options
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Frame dimensions of the outermost image, if a SOF was seen
    pub fn dimensions(&self) -> Option<SofHeader> {
        self.sof
    }

    /// Absolute stream position of the cursor
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Current SOI nesting level
    pub fn nesting(&self) -> u8 {
        self.nesting
    }

    /// Scans markers until no more metadata can follow
    ///
    /// `Ok(())` means the scan stopped at a marker it does not handle.
    /// `Err(MetaError::EndOfImage)` is the normal stop signal.
    pub fn scan(&mut self) -> MetaResult<()> {
        let mut skipped_prefix: u64 = 0;
        let mut window = [0u8; PEEK_WINDOW];

        loop {
            let len = {
                let peeked = self.reader.peek(PEEK_WINDOW)?;
                window[..peeked.len()].copy_from_slice(peeked);
                peeked.len()
            };
            let buf = &window[..len];

            if buf.len() < 2 {
                if self.nesting == 0 {
                    return Err(MetaError::NoJpegMarker);
                }
                return Err(truncated("stream ended before end of image"));
            }

            if self.nesting == 0 {
                if buf[0] == markers::MARKER_PREFIX && buf[1] == markers::SOI {
                    self.notify(markers::SOI, None);
                    self.nesting = 1;
                    self.discard_exact(2)?;
                    continue;
                }

                // Not yet inside an image: skip towards the SOI signature
                skipped_prefix += 1;
                if skipped_prefix > self.options.max_prefix_search {
                    return Err(MetaError::NoJpegMarker);
                }
                self.discard_exact(1)?;
                continue;
            }

            if buf[0] != markers::MARKER_PREFIX {
                self.discard_exact(1)?;
                continue;
            }

            if let Flow::Stop = self.dispatch(buf)? {
                return Ok(());
            }
        }
    }

    /// Handles one marker at nesting level one or deeper
    fn dispatch(&mut self, buf: &[u8]) -> MetaResult<Flow> {
        let marker = buf[1];

        match marker {
            // Fill byte or stuffed zero, step over the prefix only
            markers::MARKER_PREFIX | 0x00 => self.discard_exact(1)?,
            markers::SOI => {
                self.notify(marker, None);
                self.nesting = self.nesting.saturating_add(1);
                self.discard_exact(2)?;
            }
            markers::EOI => {
                self.notify(marker, None);
                self.nesting = self.nesting.saturating_sub(1);
                if self.nesting == 0 {
                    return Err(MetaError::EndOfImage);
                }
                self.discard_exact(2)?;
            }
            markers::DHT | markers::SOS if self.nesting == 1 => {
                self.notify(marker, None);
                debug!("{} in outermost image at offset {}, no metadata can follow",
                       markers::marker_name(marker), self.position());
                return Err(MetaError::EndOfImage);
            }
            m if markers::is_sof(m) => self.read_sof(buf)?,
            markers::APP1 => self.read_app1(buf)?,
            m if markers::is_app(m) => {
                let length = segment_length(buf)?;
                debug!("Skipping {} segment ({:?}), {} bytes",
                       markers::marker_name(m), AppSignature::classify(m, buf), length);
                self.ignore_segment(buf)?;
            }
            markers::DHT | markers::SOS | markers::DQT | markers::DRI | markers::COM => {
                self.ignore_segment(buf)?
            }
            m if markers::is_standalone(m) => {
                self.notify(marker, None);
                self.discard_exact(2)?;
            }
            _ if self.nesting == 1 => {
                debug!("Unhandled marker {:#04x} at offset {}, stopping scan", marker, self.position());
                return Ok(Flow::Stop);
            }
            _ => self.discard_exact(1)?,
        }

        Ok(Flow::Continue)
    }

    /// Records the outermost frame header and skips the segment
    fn read_sof(&mut self, buf: &[u8]) -> MetaResult<()> {
        let length = segment_length(buf)?;
        self.notify(buf[1], Some(length));

        let header = SofHeader::parse(buf)
            .ok_or_else(|| truncated("start of frame segment"))?;

        if self.nesting == 1 && self.sof.is_none() {
            debug!("Frame: {}x{}, {} components", header.width, header.height, header.components);
            self.sof = Some(header);
        }

        self.discard_exact(u64::from(length) + 2)
    }

    /// Dispatches an APP1 segment on its signature
    fn read_app1(&mut self, buf: &[u8]) -> MetaResult<()> {
        match AppSignature::classify(markers::APP1, buf) {
            AppSignature::Xmp => self.read_xmp(buf),
            AppSignature::Exif => self.read_exif(buf),
            _ => self.ignore_segment(buf),
        }
    }

    /// Builds the Exif header and hands the TIFF block to the Exif reader
    fn read_exif(&mut self, buf: &[u8]) -> MetaResult<()> {
        let length = segment_length(buf)?;
        self.notify(markers::APP1, Some(length));

        let prefix = 2 + markers::EXIF_SIGNATURE.len() as u64;
        if u64::from(length) < prefix {
            return Err(MetaError::InvalidSegment { marker: markers::APP1, length });
        }
        let mut remain = u64::from(length) - prefix;

        // Marker, length and "Exif\0\0"
        self.discard_exact(2 + prefix)?;

        let tiff_offset = u32::try_from(self.position())
            .map_err(|_| MetaError::GenericError("Exif block beyond 4 GiB".to_string()))?;
        let exif_length = remain as u32;
        let header = {
            let peeked = self.reader.peek(TIFF_HEADER_LENGTH)?;
            ExifHeader::from_tiff_header(peeked, tiff_offset, exif_length, ImageType::Jpeg)
        };
        debug!("{}", header);

        if let Some(exif_reader) = self.exif_reader.as_mut() {
            if header.is_valid() {
                let mut limited = (&mut self.reader).take(remain);
                exif_reader(&mut limited, header)?;
                remain = limited.limit();
            } else {
                warn!("Skipping Exif segment at offset {} with invalid TIFF header", tiff_offset);
            }
        }

        self.discard_exact(remain)
    }

    /// Hands the XMP payload to the XMP reader
    fn read_xmp(&mut self, buf: &[u8]) -> MetaResult<()> {
        let length = segment_length(buf)?;
        self.notify(markers::APP1, Some(length));

        let prefix = 2 + markers::XMP_SIGNATURE.len() as u64;
        if u64::from(length) < prefix {
            return Err(MetaError::InvalidSegment { marker: markers::APP1, length });
        }
        let mut remain = u64::from(length) - prefix;

        self.discard_exact(2 + prefix)?;
        info!("XMP payload of {} bytes at offset {}", remain, self.position());

        if let Some(xmp_reader) = self.xmp_reader.as_mut() {
            let mut limited = (&mut self.reader).take(remain);
            xmp_reader(&mut limited)?;
            remain = limited.limit();
        }

        self.discard_exact(remain)
    }

    /// Skips a segment by its declared length
    fn ignore_segment(&mut self, buf: &[u8]) -> MetaResult<()> {
        let length = segment_length(buf)?;
        self.notify(buf[1], Some(length));
        self.discard_exact(u64::from(length) + 2)
    }

    /// Discards exactly `n` bytes or fails on a short stream
    fn discard_exact(&mut self, n: u64) -> MetaResult<()> {
        let discarded = self.reader.discard(n)?;
        if discarded < n {
            return Err(truncated("stream ended inside a segment"));
        }
        Ok(())
    }

    fn notify(&mut self, marker: u8, length: Option<u16>) {
        let event = SegmentEvent {
            marker,
            offset: self.reader.position(),
            length,
            nesting: self.nesting,
        };
        self.observer.on_segment(&event);
    }
}

/// Whether the scan loop keeps going
enum Flow {
    Continue,
    Stop,
}

/// Reads the big-endian segment length following the marker
fn segment_length(buf: &[u8]) -> MetaResult<u16> {
    let bytes = buf.get(2..4).ok_or_else(|| truncated("segment length"))?;
    let length = u16::from_be_bytes([bytes[0], bytes[1]]);
    if length < 2 {
        return Err(MetaError::InvalidSegment { marker: buf[1], length });
    }
    Ok(length)
}

fn truncated(what: &str) -> MetaError {
    MetaError::IoError(io::Error::new(io::ErrorKind::UnexpectedEof, format!("truncated JPEG: {}", what)))
}
