//! Integration tests for the JPEG metadata pipeline

extern crate std;

use std::fs::File;
use std::io::{BufReader, Read, Write};

use byteorder::{BigEndian, WriteBytesExt};

use photometa::exif::Orientation;
use photometa::utils::xmp_utils::summarize_xmp;
use photometa::{decode_jpeg, parse_exif, scan_jpeg, ExifHeader, IfdKind, MetaError, SeekReadAt, TagValue};

const XMP_SIGNATURE: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
const XMP_PACKET: &[u8] = br#"<x:xmpmeta xmlns:x="adobe:ns:meta/"><rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:Description rdf:about="" xmlns:xmp="http://ns.adobe.com/xap/1.0/" xmp:Rating="5"/></rdf:RDF></x:xmpmeta>"#;

fn entry(buf: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    buf.write_u16::<BigEndian>(tag).unwrap();
    buf.write_u16::<BigEndian>(field_type).unwrap();
    buf.write_u32::<BigEndian>(count).unwrap();
    buf.write_u32::<BigEndian>(value).unwrap();
}

fn entry_inline(buf: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: [u8; 4]) {
    buf.write_u16::<BigEndian>(tag).unwrap();
    buf.write_u16::<BigEndian>(field_type).unwrap();
    buf.write_u32::<BigEndian>(count).unwrap();
    buf.extend_from_slice(&value);
}

/// Big-endian TIFF block: IFD0 (8), IFD1 (50), GPS (80), values (134)
fn camera_tiff() -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.write_u16::<BigEndian>(42).unwrap();
    tiff.write_u32::<BigEndian>(8).unwrap();

    // IFD0
    tiff.write_u16::<BigEndian>(3).unwrap();
    entry(&mut tiff, 0x010F, 2, 6, 134);                  // Make -> "Pixel\0"
    entry_inline(&mut tiff, 0x0112, 3, 1, [0, 8, 0, 0]); // Orientation
    entry(&mut tiff, 0x8825, 4, 1, 80);                   // GPS IFD
    tiff.write_u32::<BigEndian>(50).unwrap();             // -> IFD1

    // IFD1
    tiff.write_u16::<BigEndian>(2).unwrap();
    entry(&mut tiff, 0x0201, 4, 1, 188);                  // Thumbnail offset
    entry(&mut tiff, 0x0202, 4, 1, 4);                    // Thumbnail length
    tiff.write_u32::<BigEndian>(0).unwrap();

    // GPS
    tiff.write_u16::<BigEndian>(4).unwrap();
    entry_inline(&mut tiff, 0x0001, 2, 2, [b'N', 0, 0, 0]);
    entry(&mut tiff, 0x0002, 5, 3, 140);
    entry_inline(&mut tiff, 0x0003, 2, 2, [b'E', 0, 0, 0]);
    entry(&mut tiff, 0x0004, 5, 3, 164);
    tiff.write_u32::<BigEndian>(0).unwrap();
    assert_eq!(tiff.len(), 134);

    tiff.extend_from_slice(b"Pixel\0");
    for (n, d) in [(37, 1), (25, 1), (1920, 100), (122, 1), (5, 1), (0, 1)] {
        tiff.write_u32::<BigEndian>(n).unwrap();
        tiff.write_u32::<BigEndian>(d).unwrap();
    }
    tiff.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xD9]);
    assert_eq!(tiff.len(), 192);
    tiff
}

fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.write_u16::<BigEndian>((payload.len() + 2) as u16).unwrap();
    out.extend_from_slice(payload);
    out
}

fn camera_jpeg() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8];

    let mut exif = b"Exif\0\0".to_vec();
    exif.extend_from_slice(&camera_tiff());
    jpeg.extend_from_slice(&segment(0xE1, &exif));

    let mut xmp = XMP_SIGNATURE.to_vec();
    xmp.extend_from_slice(XMP_PACKET);
    jpeg.extend_from_slice(&segment(0xE1, &xmp));

    jpeg.extend_from_slice(&segment(0xDB, &[0u8; 65]));
    jpeg.extend_from_slice(&segment(0xC0, &[8, 0x03, 0x00, 0x04, 0x00, 3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]));
    jpeg.extend_from_slice(&segment(0xC4, &[0u8; 17]));
    jpeg.extend_from_slice(&[0x77; 512]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

#[test]
fn test_decode_complete_jpeg() {
    let jpeg = camera_jpeg();
    let metadata = decode_jpeg(&jpeg[..]).unwrap();

    let sof = metadata.dimensions.unwrap();
    assert_eq!((sof.width, sof.height, sof.components), (1024, 768, 3));

    let header = metadata.exif_header.unwrap();
    assert_eq!(header.tiff_header_offset, 12);
    assert_eq!(header.exif_length, 192);

    let exif = metadata.exif.as_ref().unwrap();
    assert_eq!(exif.camera_make().unwrap(), "Pixel");
    assert_eq!(exif.orientation().unwrap(), Orientation::Rotate270);
    assert!(exif.camera_model().unwrap_err().is_empty_tag());

    let (lat, lon) = exif.gps_coords().unwrap();
    assert!((lat - (37.0 + 25.0 / 60.0 + 19.2 / 3600.0)).abs() < 1e-6);
    assert!((lon - (122.0 + 5.0 / 60.0)).abs() < 1e-6);

    let make = exif.get_tag(IfdKind::Ifd0, 0, 0x010F).unwrap();
    assert_eq!(exif.tag_value(make).unwrap(), TagValue::Ascii("Pixel".to_string()));

    let thumbnail = metadata.thumbnail().unwrap();
    assert_eq!(thumbnail.offset, 200);
    assert_eq!(&jpeg[200..204], &[0xFF, 0xD8, 0xFF, 0xD9]);

    let packet = metadata.xmp.as_ref().unwrap();
    assert_eq!(packet.as_slice(), XMP_PACKET);
    let properties = summarize_xmp(packet).unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].name, "xmp:Rating");
    assert_eq!(properties[0].value, "5");
}

#[test]
fn test_decode_jpeg_without_exif() {
    let jpeg = [0xFF, 0xD8, 0xFF, 0xD9];
    let metadata = decode_jpeg(&jpeg[..]).unwrap();

    assert!(metadata.exif.is_none());
    assert!(metadata.xmp.is_none());
    assert!(metadata.dimensions.is_none());
    assert!(matches!(metadata.thumbnail(), Err(MetaError::NoExif)));
}

#[test]
fn test_decode_rejects_non_jpeg() {
    let result = decode_jpeg(&b"GIF89a............"[..]);
    assert!(matches!(result, Err(MetaError::NoJpegMarker)));
}

#[test]
fn test_file_backed_random_access() {
    let path = std::env::temp_dir().join(format!("photometa-it-{}.jpg", std::process::id()));
    File::create(&path).unwrap().write_all(&camera_jpeg()).unwrap();

    let mut found: Option<ExifHeader> = None;
    let result = scan_jpeg(
        BufReader::new(File::open(&path).unwrap()),
        Some(Box::new(|_: &mut dyn Read, header: ExifHeader| {
            found = Some(header);
            Ok(())
        })),
        None,
    );
    assert!(matches!(result, Err(MetaError::EndOfImage)));

    let header = found.unwrap();
    let data = parse_exif(SeekReadAt::new(File::open(&path).unwrap()), header).unwrap();
    assert_eq!(data.camera_make().unwrap(), "Pixel");
    assert_eq!(data.thumbnail().unwrap().offset, 200);

    std::fs::remove_file(&path).unwrap();
}
