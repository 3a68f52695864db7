//! Tests for marker classification

extern crate std;

use crate::jpeg::markers::{self, AppSignature, SofHeader};
use crate::jpeg::tests::{exif_segment, jfif_segment, sof_segment, xmp_segment, segment};

#[test]
fn test_app_signatures() {
    std::assert_eq!(AppSignature::classify(markers::APP0, &jfif_segment()), AppSignature::Jfif);
    std::assert_eq!(AppSignature::classify(markers::APP1, &exif_segment(&[0; 8])), AppSignature::Exif);
    std::assert_eq!(AppSignature::classify(markers::APP1, &xmp_segment(b"<x/>")), AppSignature::Xmp);
    std::assert_eq!(
        AppSignature::classify(markers::APP2, &segment(markers::APP2, b"ICC_PROFILE\0\x01\x01")),
        AppSignature::IccProfile
    );
    std::assert_eq!(AppSignature::classify(markers::APP1, &segment(markers::APP1, b"Exi")), AppSignature::Other);
    std::assert_eq!(AppSignature::classify(markers::APP1, &[0xFF]), AppSignature::Other);
}

#[test]
fn test_sof_header_parse() {
    let sof = SofHeader::parse(&sof_segment(1920, 1080)).unwrap();
    std::assert_eq!(sof, SofHeader { width: 1920, height: 1080, components: 3 });
    std::assert_eq!(SofHeader::parse(&[0xFF, 0xC0, 0x00, 0x11, 8, 0x04]), None);
}

#[test]
fn test_marker_kinds() {
    std::assert!(markers::is_sof(markers::SOF2));
    std::assert!(!markers::is_sof(markers::DHT));
    std::assert!(markers::is_app(markers::APP15));
    std::assert!(markers::is_standalone(0xD3));
    std::assert_eq!(markers::marker_name(markers::SOS), "SOS");
}
