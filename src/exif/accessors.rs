//! Convenience accessors over `ExifData`
//!
//! Each accessor names the directory and tag it reads. A missing tag
//! yields `MetaError::EmptyTag`, a rational with a zero denominator
//! yields `MetaError::ZeroDenominator`.

use std::fmt;

use crate::exif::constants::{exif, gps, ifd0, orientation};
use crate::exif::data::ExifData;
use crate::exif::ifd::IfdKind;
use crate::exif::values::Rational;
use crate::io::seekable::ReadAt;
use crate::meta::errors::{MetaError, MetaResult};

/// Image orientation as stored in the Orientation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    MirrorHorizontal,
    Rotate180,
    MirrorVertical,
    MirrorHorizontalRotate270,
    Rotate90,
    MirrorHorizontalRotate90,
    Rotate270,
}

impl Orientation {
    pub fn from_code(code: u16) -> Option<Self> {
        let value = match code {
            orientation::TOP_LEFT => Orientation::Horizontal,
            orientation::TOP_RIGHT => Orientation::MirrorHorizontal,
            orientation::BOTTOM_RIGHT => Orientation::Rotate180,
            orientation::BOTTOM_LEFT => Orientation::MirrorVertical,
            orientation::LEFT_TOP => Orientation::MirrorHorizontalRotate270,
            orientation::RIGHT_TOP => Orientation::Rotate90,
            orientation::RIGHT_BOTTOM => Orientation::MirrorHorizontalRotate90,
            orientation::LEFT_BOTTOM => Orientation::Rotate270,
            _ => return None,
        };
        Some(value)
    }

    /// Clockwise rotation in degrees needed to display the image upright
    pub fn rotation(&self) -> u16 {
        match self {
            Orientation::Horizontal | Orientation::MirrorHorizontal => 0,
            Orientation::Rotate180 | Orientation::MirrorVertical => 180,
            Orientation::Rotate90 | Orientation::MirrorHorizontalRotate90 => 90,
            Orientation::Rotate270 | Orientation::MirrorHorizontalRotate270 => 270,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Horizontal => "Horizontal (normal)",
            Orientation::MirrorHorizontal => "Mirror horizontal",
            Orientation::Rotate180 => "Rotate 180",
            Orientation::MirrorVertical => "Mirror vertical",
            Orientation::MirrorHorizontalRotate270 => "Mirror horizontal and rotate 270 CW",
            Orientation::Rotate90 => "Rotate 90 CW",
            Orientation::MirrorHorizontalRotate90 => "Mirror horizontal and rotate 90 CW",
            Orientation::Rotate270 => "Rotate 270 CW",
        };
        f.write_str(name)
    }
}

/// Exposure time kept as the stored fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposureTime(pub Rational);

impl ExposureTime {
    pub fn seconds(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

impl fmt::Display for ExposureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rational { numerator, denominator } = self.0;
        if numerator != 0 && denominator % numerator == 0 && numerator != denominator {
            write!(f, "1/{}s", denominator / numerator)
        } else {
            match self.0.to_f64() {
                Some(s) => write!(f, "{}s", s),
                None => write!(f, "{}", self.0),
            }
        }
    }
}

/// Location of the embedded thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumbnail {
    /// Absolute offset in the reader the data was parsed from
    pub offset: u64,
    pub length: u32,
}

impl<R: ReadAt> ExifData<R> {
    pub fn camera_make(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Ifd0, ifd0::MAKE)
    }

    pub fn camera_model(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Ifd0, ifd0::MODEL)
    }

    pub fn artist(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Ifd0, ifd0::ARTIST)
    }

    pub fn copyright(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Ifd0, ifd0::COPYRIGHT)
    }

    pub fn software(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Ifd0, ifd0::SOFTWARE)
    }

    pub fn image_description(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Ifd0, ifd0::IMAGE_DESCRIPTION)
    }

    /// Orientation of the primary image
    pub fn orientation(&self) -> MetaResult<Orientation> {
        let tag = self.tag(IfdKind::Ifd0, 0, ifd0::ORIENTATION)?;
        let code = self.reader().parse_u16(tag)?;
        Orientation::from_code(code)
            .ok_or_else(|| MetaError::GenericError(format!("Invalid orientation value {}", code)))
    }

    pub fn camera_serial(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Exif, exif::BODY_SERIAL_NUMBER)
    }

    pub fn lens_make(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Exif, exif::LENS_MAKE)
    }

    pub fn lens_model(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Exif, exif::LENS_MODEL)
    }

    pub fn lens_serial(&self) -> MetaResult<String> {
        self.ascii(IfdKind::Exif, exif::LENS_SERIAL_NUMBER)
    }

    pub fn iso_speed(&self) -> MetaResult<u32> {
        let tag = self.tag(IfdKind::Exif, 0, exif::ISO_SPEED_RATINGS)?;
        self.reader().parse_u32(tag)
    }

    /// Focal length in millimetres
    pub fn focal_length(&self) -> MetaResult<f64> {
        let tag = self.tag(IfdKind::Exif, 0, exif::FOCAL_LENGTH)?;
        self.reader().parse_f64(tag)
    }

    /// F-number
    pub fn aperture(&self) -> MetaResult<f64> {
        let tag = self.tag(IfdKind::Exif, 0, exif::F_NUMBER)?;
        self.reader().parse_f64(tag)
    }

    /// Exposure time
    pub fn shutter_speed(&self) -> MetaResult<ExposureTime> {
        let tag = self.tag(IfdKind::Exif, 0, exif::EXPOSURE_TIME)?;
        let value = self.reader().parse_rational(tag)?;
        if value.denominator == 0 {
            return Err(MetaError::ZeroDenominator(tag.id));
        }
        Ok(ExposureTime(value))
    }

    /// Exposure compensation in EV
    pub fn exposure_bias(&self) -> MetaResult<f64> {
        let tag = self.tag(IfdKind::Exif, 0, exif::EXPOSURE_BIAS_VALUE)?;
        self.reader().parse_signed_f64(tag)
    }

    pub fn exposure_program(&self) -> MetaResult<u16> {
        let tag = self.tag(IfdKind::Exif, 0, exif::EXPOSURE_PROGRAM)?;
        self.reader().parse_u16(tag)
    }

    pub fn metering_mode(&self) -> MetaResult<u16> {
        let tag = self.tag(IfdKind::Exif, 0, exif::METERING_MODE)?;
        self.reader().parse_u16(tag)
    }

    /// Raw flash bit field
    pub fn flash(&self) -> MetaResult<u16> {
        let tag = self.tag(IfdKind::Exif, 0, exif::FLASH)?;
        self.reader().parse_u16(tag)
    }

    /// Capture time, falling back to the IFD0 modification time
    pub fn date_time_original(&self) -> MetaResult<String> {
        match self.ascii(IfdKind::Exif, exif::DATE_TIME_ORIGINAL) {
            Err(MetaError::EmptyTag) => self.ascii(IfdKind::Ifd0, ifd0::DATE_TIME),
            other => other,
        }
    }

    /// Pixel dimensions, from the Exif sub-IFD or else from IFD0
    pub fn dimensions(&self) -> MetaResult<(u32, u32)> {
        let exif_dims = self.get_tag(IfdKind::Exif, 0, exif::PIXEL_X_DIMENSION)
            .zip(self.get_tag(IfdKind::Exif, 0, exif::PIXEL_Y_DIMENSION));
        let (width, height) = match exif_dims {
            Some(pair) => pair,
            None => (
                self.tag(IfdKind::Ifd0, 0, ifd0::IMAGE_WIDTH)?,
                self.tag(IfdKind::Ifd0, 0, ifd0::IMAGE_LENGTH)?,
            ),
        };
        Ok((self.reader().parse_u32(width)?, self.reader().parse_u32(height)?))
    }

    /// Latitude and longitude in signed decimal degrees
    pub fn gps_coords(&self) -> MetaResult<(f64, f64)> {
        let latitude = self.gps_degrees(gps::LATITUDE, gps::LATITUDE_REF, "S")?;
        let longitude = self.gps_degrees(gps::LONGITUDE, gps::LONGITUDE_REF, "W")?;
        Ok((latitude, longitude))
    }

    /// Altitude in metres, negative below sea level
    pub fn gps_altitude(&self) -> MetaResult<f64> {
        let tag = self.tag(IfdKind::Gps, 0, gps::ALTITUDE)?;
        let altitude = self.reader().parse_f64(tag)?;

        let below = match self.get_tag(IfdKind::Gps, 0, gps::ALTITUDE_REF) {
            Some(reference) => self.reader().parse_bytes(reference)?.first() == Some(&1),
            None => false,
        };
        Ok(if below { -altitude } else { altitude })
    }

    /// Location of the thumbnail described by IFD1
    pub fn thumbnail(&self) -> MetaResult<Thumbnail> {
        let offset_tag = self.tag(IfdKind::Ifd0, 1, ifd0::THUMBNAIL_OFFSET)?;
        let length_tag = self.tag(IfdKind::Ifd0, 1, ifd0::THUMBNAIL_LENGTH)?;
        let offset = self.reader().parse_u32(offset_tag)?;
        let length = self.reader().parse_u32(length_tag)?;

        if !self.reader().in_bounds(offset, u64::from(length)) {
            return Err(MetaError::ValueOutOfBounds {
                tag: ifd0::THUMBNAIL_OFFSET,
                offset,
                size: u64::from(length),
            });
        }

        Ok(Thumbnail {
            offset: u64::from(self.reader().tiff_offset()) + u64::from(offset),
            length,
        })
    }

    /// Degrees, minutes and seconds folded into signed degrees
    fn gps_degrees(&self, value_id: u16, ref_id: u16, negative: &str) -> MetaResult<f64> {
        let tag = self.tag(IfdKind::Gps, 0, value_id)?;
        let parts = self.reader().parse_rationals(tag)?;

        let mut degrees = 0.0;
        for (part, scale) in parts.iter().zip([1.0, 60.0, 3600.0]) {
            degrees += part.to_f64().ok_or(MetaError::ZeroDenominator(value_id))? / scale;
        }

        let reference = match self.get_tag(IfdKind::Gps, 0, ref_id) {
            Some(tag) => self.reader().parse_ascii(tag)?,
            None => String::new(),
        };
        Ok(if reference.trim() == negative { -degrees } else { degrees })
    }
}
