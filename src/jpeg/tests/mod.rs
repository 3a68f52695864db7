mod markers_tests;

use crate::jpeg::markers::{self, EXIF_SIGNATURE, XMP_SIGNATURE};

pub const SOI: [u8; 2] = [0xFF, markers::SOI];
pub const EOI: [u8; 2] = [0xFF, markers::EOI];

/// Marker, big-endian length and payload
pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let length = (payload.len() + 2) as u16;
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn exif_segment(tiff: &[u8]) -> Vec<u8> {
    let mut payload = EXIF_SIGNATURE.to_vec();
    payload.extend_from_slice(tiff);
    segment(markers::APP1, &payload)
}

pub fn xmp_segment(xml: &[u8]) -> Vec<u8> {
    let mut payload = XMP_SIGNATURE.to_vec();
    payload.extend_from_slice(xml);
    segment(markers::APP1, &payload)
}

pub fn jfif_segment() -> Vec<u8> {
    segment(markers::APP0, b"JFIF\0\x01\x01\x00\x00\x48\x00\x48\x00\x00")
}

/// Baseline frame header with three components
pub fn sof_segment(width: u16, height: u16) -> Vec<u8> {
    let mut payload = vec![8];
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&width.to_be_bytes());
    payload.push(3);
    payload.extend_from_slice(&[1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
    segment(markers::SOF0, &payload)
}

pub fn dht_segment() -> Vec<u8> {
    segment(markers::DHT, &[0x00; 17])
}

/// Minimal little-endian TIFF block: IFD0 with a Make tag
pub fn tiny_tiff() -> Vec<u8> {
    let mut tiff = vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
    tiff.extend_from_slice(&[0x01, 0x00]);
    // Make, ASCII, 4 bytes inline: "Ace\0"
    tiff.extend_from_slice(&[0x0F, 0x01, 0x02, 0x00, 0x04, 0x00, 0x00, 0x00, b'A', b'c', b'e', 0x00]);
    tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    tiff
}

pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}
