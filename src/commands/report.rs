//! Shared reporting for the metadata commands

use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;

use log::{error, info};

use crate::commands::CommonArgs;
use crate::decode::{decode_jpeg_with_options, JpegMetadata};
use crate::exif::ExifData;
use crate::jpeg::observer::{LogObserver, NoopObserver, SegmentObserver};
use crate::meta::errors::{MetaError, MetaResult};
use crate::utils::progress::ProgressTracker;
use crate::utils::xmp_utils::summarize_xmp;

/// Opens and decodes one file
pub fn decode_file(path: &str, args: &CommonArgs) -> MetaResult<JpegMetadata> {
    let file = File::open(path)?;
    let observer: Box<dyn SegmentObserver> = if args.trace_markers {
        Box::new(LogObserver)
    } else {
        Box::new(NoopObserver)
    };
    decode_jpeg_with_options(BufReader::new(file), args.options, observer)
}

/// Runs `f` on every file, with a progress bar for several files
///
/// A failing file is logged and the remaining files are still processed.
pub fn for_each_file<F>(files: &[String], mut f: F) -> MetaResult<()>
where
    F: FnMut(&str) -> MetaResult<()>,
{
    let progress = if files.len() > 1 {
        ProgressTracker::new(files.len() as u64, "Reading metadata")
    } else {
        ProgressTracker::hidden()
    };

    let mut failed = 0;
    for path in files {
        progress.set_message(path);
        if let Err(e) = f(path) {
            error!("{}: {}", path, e);
            failed += 1;
        }
        progress.increment(1);
    }
    progress.finish();

    if failed > 0 {
        return Err(MetaError::GenericError(format!("{} of {} files failed", failed, files.len())));
    }
    Ok(())
}

/// Logs one field, staying quiet for tags the file does not have
fn show<T: Display>(label: &str, value: MetaResult<T>) {
    match value {
        Ok(v) => info!("  {}: {}", label, v),
        Err(e) if e.is_empty_tag() => {}
        Err(e) => info!("  {}: <{}>", label, e),
    }
}

/// Logs frame, Exif highlights and XMP size
pub fn report_summary(path: &str, metadata: &JpegMetadata) {
    info!("File: {}", path);

    match metadata.dimensions {
        Some(sof) => info!("  Frame: {}x{}, {} components", sof.width, sof.height, sof.components),
        None => info!("  Frame: Not available"),
    }

    match (&metadata.exif, &metadata.exif_header) {
        (Some(exif), Some(header)) => {
            info!("  {}", header);
            report_exif(exif);
            show("Thumbnail", metadata.thumbnail()
                .map(|t| format!("{} bytes at offset {}", t.length, t.offset)));
        }
        _ => info!("  Exif: Not available"),
    }

    match &metadata.xmp {
        Some(packet) => info!("  XMP: {} bytes", packet.len()),
        None => info!("  XMP: Not available"),
    }
}

fn report_exif(exif: &ExifData<Vec<u8>>) {
    info!("  Exif: {} tags, {}", exif.len(), exif.byte_order());
    show("Make", exif.camera_make());
    show("Model", exif.camera_model());
    show("Serial", exif.camera_serial());
    show("Lens", exif.lens_model());
    show("Software", exif.software());
    show("Artist", exif.artist());
    show("Copyright", exif.copyright());
    show("Date/Time Original", exif.date_time_original());
    show("Orientation", exif.orientation());
    show("Dimensions", exif.dimensions().map(|(w, h)| format!("{}x{}", w, h)));
    show("Exposure", exif.shutter_speed());
    show("Aperture", exif.aperture().map(|f| format!("f/{:.1}", f)));
    show("ISO", exif.iso_speed());
    show("Focal Length", exif.focal_length().map(|f| format!("{:.1} mm", f)));
    show("Exposure Bias", exif.exposure_bias().map(|ev| format!("{:+.2} EV", ev)));
    show("GPS", exif.gps_coords().map(|(lat, lon)| format!("{:.6}, {:.6}", lat, lon)));
    show("Altitude", exif.gps_altitude().map(|m| format!("{:.1} m", m)));
}

/// Logs the simple properties of the XMP packet
pub fn report_xmp(metadata: &JpegMetadata) -> MetaResult<()> {
    let packet = match &metadata.xmp {
        Some(packet) => packet,
        None => return Ok(()),
    };

    info!("  XMP properties:");
    for property in summarize_xmp(packet)? {
        info!("    {} = {}", property.name, property.value);
    }
    Ok(())
}
