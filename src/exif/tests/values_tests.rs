//! Tests for tag value decoding

extern crate std;

use crate::exif::constants::{exif, gps, ifd0};
use crate::exif::data::{parse_exif, ExifData};
use crate::exif::ifd::{IfdKind, Tag};
use crate::exif::tag_names::tag_name;
use crate::exif::tests::test_utils::{build_tiff, header_for, TestDir, TestValue};
use crate::exif::values::{Rational, SRational, TagValue};
use crate::io::byte_order::ByteOrder;
use crate::meta::errors::MetaError;

const LONG_TEXT: &str = "This description is deliberately longer than sixty-four characters of text";

fn sample(order: ByteOrder) -> ExifData<Vec<u8>> {
    let dirs = vec![TestDir::new(vec![
        (ifd0::IMAGE_WIDTH, TestValue::Longs(vec![4000])),
        (ifd0::IMAGE_LENGTH, TestValue::Shorts(vec![3000])),
        (ifd0::IMAGE_DESCRIPTION, TestValue::Ascii(LONG_TEXT)),
        (ifd0::MAKE, TestValue::Ascii("Leica")),
        (ifd0::X_RESOLUTION, TestValue::Rationals(vec![(300, 1)])),
        (ifd0::SOFTWARE, TestValue::Ascii("  v2.1  ")),
        (0x0213, TestValue::Shorts(vec![1, 2, 3])),
        (exif::EXIF_VERSION, TestValue::Undefined(b"0232".to_vec())),
        (exif::LENS_SPECIFICATION, TestValue::Rationals(vec![(24, 1), (70, 1), (28, 10), (28, 10)])),
        (exif::EXPOSURE_BIAS_VALUE, TestValue::SRationals(vec![(-2, 3)])),
        (gps::VERSION_ID, TestValue::Bytes(vec![2, 3, 0, 0])),
    ])];
    let block = build_tiff(order, &dirs);
    parse_exif(block.clone(), header_for(&block)).unwrap()
}

fn tag(data: &ExifData<Vec<u8>>, id: u16) -> Tag {
    *data.get_tag(IfdKind::Ifd0, 0, id).unwrap()
}

#[test]
fn test_tag_value_variants() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let data = sample(order);

        std::assert_eq!(data.tag_value(&tag(&data, ifd0::IMAGE_WIDTH)).unwrap(), TagValue::Long(4000));
        std::assert_eq!(data.tag_value(&tag(&data, ifd0::IMAGE_LENGTH)).unwrap(), TagValue::Short(3000));
        std::assert_eq!(data.tag_value(&tag(&data, 0x0213)).unwrap(), TagValue::Shorts(vec![1, 2, 3]));
        std::assert_eq!(data.tag_value(&tag(&data, ifd0::MAKE)).unwrap(), TagValue::Ascii("Leica".to_string()));
        std::assert_eq!(
            data.tag_value(&tag(&data, ifd0::X_RESOLUTION)).unwrap(),
            TagValue::Rational(Rational::new(300, 1))
        );
        std::assert_eq!(
            data.tag_value(&tag(&data, exif::LENS_SPECIFICATION)).unwrap(),
            TagValue::Rationals(vec![
                Rational::new(24, 1),
                Rational::new(70, 1),
                Rational::new(28, 10),
                Rational::new(28, 10),
            ])
        );
        std::assert_eq!(
            data.tag_value(&tag(&data, exif::EXPOSURE_BIAS_VALUE)).unwrap(),
            TagValue::SRational(SRational::new(-2, 3))
        );
        std::assert_eq!(
            data.tag_value(&tag(&data, gps::VERSION_ID)).unwrap(),
            TagValue::Bytes(vec![2, 3, 0, 0])
        );
    }
}

#[test]
fn test_ascii_is_clamped_for_display_only() {
    let data = sample(ByteOrder::LittleEndian);
    let description = tag(&data, ifd0::IMAGE_DESCRIPTION);

    let full = data.reader().parse_ascii(&description).unwrap();
    std::assert_eq!(full, LONG_TEXT);
    std::assert_eq!(data.image_description().unwrap(), LONG_TEXT);

    match data.tag_value(&description).unwrap() {
        TagValue::Ascii(text) => {
            std::assert!(text.ends_with("..."));
            std::assert_eq!(text.chars().count(), 64 + 3);
        }
        other => std::panic!("unexpected value {:?}", other),
    }
}

#[test]
fn test_ascii_accessors_trim() {
    let data = sample(ByteOrder::BigEndian);
    std::assert_eq!(data.software().unwrap(), "v2.1");
}

#[test]
fn test_undefined_reads_as_text() {
    let data = sample(ByteOrder::LittleEndian);
    let version = tag(&data, exif::EXIF_VERSION);
    std::assert_eq!(data.reader().parse_ascii(&version).unwrap(), "0232");
    std::assert_eq!(data.display_value(&version).unwrap(), "30 32 33 32");
}

#[test]
fn test_type_mismatch() {
    let data = sample(ByteOrder::LittleEndian);
    let make = tag(&data, ifd0::MAKE);

    let result = data.reader().parse_u16(&make);
    std::assert!(matches!(
        result,
        Err(MetaError::TagTypeMismatch { tag: ifd0::MAKE, found: 2 })
    ));
    std::assert!(data.reader().parse_rational(&make).is_err());
}

#[test]
fn test_u32_accepts_short_and_long() {
    let data = sample(ByteOrder::BigEndian);
    std::assert_eq!(data.reader().parse_u32(&tag(&data, ifd0::IMAGE_LENGTH)).unwrap(), 3000);
    std::assert_eq!(data.reader().parse_u32(&tag(&data, ifd0::IMAGE_WIDTH)).unwrap(), 4000);
    std::assert_eq!(data.dimensions().unwrap(), (4000, 3000));
}

#[test]
fn test_rational_to_f64() {
    std::assert_eq!(Rational::new(1, 4).to_f64(), Some(0.25));
    std::assert_eq!(Rational::new(1, 0).to_f64(), None);
    std::assert_eq!(SRational::new(-1, 2).to_f64(), Some(-0.5));
    std::assert_eq!(SRational::new(0, 0).to_f64(), None);
}

#[test]
fn test_tag_names() {
    std::assert_eq!(tag_name(IfdKind::Ifd0, ifd0::MAKE), "Make");
    std::assert_eq!(tag_name(IfdKind::Exif, exif::F_NUMBER), "FNumber");
    std::assert_eq!(tag_name(IfdKind::Gps, gps::LATITUDE), "GPSLatitude");
    std::assert_eq!(tag_name(IfdKind::MakerNote, 0x0001), "Unknown");
}

fn signed_and_float(order: ByteOrder) -> ExifData<Vec<u8>> {
    let dirs = vec![TestDir::new(vec![
        (0xC001, TestValue::SLongs(vec![5])),
        (0xC002, TestValue::SLongs(vec![-1, 70_000])),
        (0xC003, TestValue::SShorts(vec![-300])),
        (0xC004, TestValue::SShorts(vec![-1, 2, -3])),
        (0xC005, TestValue::Floats(vec![1.5])),
        (0xC006, TestValue::Doubles(vec![-0.25, 1e10])),
    ])];
    let block = build_tiff(order, &dirs);
    parse_exif(block.clone(), header_for(&block)).unwrap()
}

#[test]
fn test_signed_and_float_values_ignore_byte_order() {
    let le = signed_and_float(ByteOrder::LittleEndian);
    let be = signed_and_float(ByteOrder::BigEndian);

    for id in 0xC001..=0xC006 {
        std::assert_eq!(le.tag_value(&tag(&le, id)).unwrap(), be.tag_value(&tag(&be, id)).unwrap());
    }

    std::assert_eq!(le.tag_value(&tag(&le, 0xC001)).unwrap(), TagValue::SLong(5));
    std::assert_eq!(be.tag_value(&tag(&be, 0xC002)).unwrap(), TagValue::SLongs(vec![-1, 70_000]));
    std::assert_eq!(be.tag_value(&tag(&be, 0xC003)).unwrap(), TagValue::SShort(-300));
    std::assert_eq!(le.tag_value(&tag(&le, 0xC004)).unwrap(), TagValue::SShorts(vec![-1, 2, -3]));
    std::assert_eq!(be.tag_value(&tag(&be, 0xC005)).unwrap(), TagValue::Float(1.5));
    std::assert_eq!(be.tag_value(&tag(&be, 0xC006)).unwrap(), TagValue::Doubles(vec![-0.25, 1e10]));
    std::assert_eq!(be.reader().parse_i32(&tag(&be, 0xC003)).unwrap(), -300);
    std::assert_eq!(be.display_value(&tag(&be, 0xC004)).unwrap(), "-1, 2, -3");
}
