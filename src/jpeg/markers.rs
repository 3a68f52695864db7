//! JPEG marker codes and segment signatures
//!
//! Markers are two bytes: 0xFF followed by the code below. Segment
//! lengths are big-endian and count the two length bytes but not the
//! marker itself.

/// First byte of every marker
pub const MARKER_PREFIX: u8 = 0xFF;

// Start of frame markers
pub const SOF0: u8 = 0xC0;
pub const SOF1: u8 = 0xC1;
pub const SOF2: u8 = 0xC2;
pub const SOF3: u8 = 0xC3;
pub const SOF5: u8 = 0xC5;
pub const SOF6: u8 = 0xC6;
pub const SOF7: u8 = 0xC7;
pub const SOF9: u8 = 0xC9;
pub const SOF10: u8 = 0xCA;
pub const SOF11: u8 = 0xCB;
pub const SOF13: u8 = 0xCD;
pub const SOF14: u8 = 0xCE;
pub const SOF15: u8 = 0xCF;

// Other markers
pub const TEM: u8 = 0x01;
pub const DHT: u8 = 0xC4;
pub const RST0: u8 = 0xD0;
pub const RST7: u8 = 0xD7;
pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOS: u8 = 0xDA;
pub const DQT: u8 = 0xDB;
pub const DRI: u8 = 0xDD;
pub const COM: u8 = 0xFE;

// Application markers
pub const APP0: u8 = 0xE0;
pub const APP1: u8 = 0xE1;
pub const APP2: u8 = 0xE2;
pub const APP13: u8 = 0xED;
pub const APP14: u8 = 0xEE;
pub const APP15: u8 = 0xEF;

/// "Exif\0\0" signature at the start of an APP1 Exif payload
pub const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";

/// XMP namespace signature at the start of an APP1 XMP payload
pub const XMP_SIGNATURE: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

pub const JFIF_SIGNATURE: &[u8] = b"JFIF\0";
pub const JFXX_SIGNATURE: &[u8] = b"JFXX\0";
pub const ICC_PROFILE_SIGNATURE: &[u8] = b"ICC_PROFILE\0";
pub const PHOTOSHOP_SIGNATURE: &[u8] = b"Photoshop 3.0\0";
pub const ADOBE_SIGNATURE: &[u8] = b"Adobe";

/// Offset of the payload inside a peeked segment (marker + length)
pub const SEGMENT_HEADER_LENGTH: usize = 4;

/// Returns true for every start-of-frame variant
pub fn is_sof(marker: u8) -> bool {
    matches!(
        marker,
        SOF0 | SOF1 | SOF2 | SOF3 | SOF5 | SOF6 | SOF7 | SOF9 | SOF10 | SOF11 | SOF13 | SOF14 | SOF15
    )
}

/// Returns true for APP0 through APP15
pub fn is_app(marker: u8) -> bool {
    (APP0..=APP15).contains(&marker)
}

/// Returns true for markers that stand alone without a length field
pub fn is_standalone(marker: u8) -> bool {
    marker == TEM || (RST0..=RST7).contains(&marker)
}

/// Get the name of a marker
pub fn marker_name(marker: u8) -> &'static str {
    match marker {
        SOF0 => "SOF0",
        SOF1 => "SOF1",
        SOF2 => "SOF2",
        SOF3 => "SOF3",
        SOF5 | SOF6 | SOF7 | SOF9 | SOF10 | SOF11 | SOF13 | SOF14 | SOF15 => "SOFn",
        DHT => "DHT",
        RST0..=RST7 => "RSTn",
        SOI => "SOI",
        EOI => "EOI",
        SOS => "SOS",
        DQT => "DQT",
        DRI => "DRI",
        COM => "COM",
        TEM => "TEM",
        APP0 => "APP0",
        APP1 => "APP1",
        APP2 => "APP2",
        APP13 => "APP13",
        APP14 => "APP14",
        0xE3..=0xEC | APP15 => "APPn",
        _ => "Unknown",
    }
}

/// Known application segment payloads, identified by their signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSignature {
    Jfif,
    Jfxx,
    Exif,
    Xmp,
    IccProfile,
    Photoshop,
    Adobe,
    Other,
}

impl AppSignature {
    /// Classifies an application segment from its peeked bytes
    ///
    /// `segment` starts at the marker. Missing bytes never match.
    pub fn classify(marker: u8, segment: &[u8]) -> Self {
        let payload = segment.get(SEGMENT_HEADER_LENGTH..).unwrap_or(&[]);
        let candidates: &[(&[u8], AppSignature)] = match marker {
            APP0 => &[(JFIF_SIGNATURE, AppSignature::Jfif), (JFXX_SIGNATURE, AppSignature::Jfxx)],
            APP1 => &[(XMP_SIGNATURE, AppSignature::Xmp), (EXIF_SIGNATURE, AppSignature::Exif)],
            APP2 => &[(ICC_PROFILE_SIGNATURE, AppSignature::IccProfile)],
            APP13 => &[(PHOTOSHOP_SIGNATURE, AppSignature::Photoshop)],
            APP14 => &[(ADOBE_SIGNATURE, AppSignature::Adobe)],
            _ => &[],
        };

        candidates
            .iter()
            .find(|(signature, _)| payload.starts_with(signature))
            .map(|(_, kind)| *kind)
            .unwrap_or(AppSignature::Other)
    }
}

/// Width, height and component count from a start-of-frame segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SofHeader {
    pub width: u16,
    pub height: u16,
    pub components: u8,
}

impl SofHeader {
    /// Parses a peeked SOF segment (marker, length, precision, height,
    /// width, components). Returns `None` if the window is too short.
    pub fn parse(segment: &[u8]) -> Option<Self> {
        let body = segment.get(5..10)?;
        Some(SofHeader {
            height: u16::from_be_bytes([body[0], body[1]]),
            width: u16::from_be_bytes([body[2], body[3]]),
            components: body[4],
        })
    }
}
