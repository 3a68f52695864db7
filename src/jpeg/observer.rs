//! Per-segment observer hook
//!
//! The scanner reports every marker it classifies to an observer. The
//! default observer does nothing; `LogObserver` traces markers through
//! the `log` facade.

use log::trace;

use crate::jpeg::markers::marker_name;

/// A classified marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentEvent {
    /// Marker code (second byte)
    pub marker: u8,
    /// Absolute stream offset of the marker
    pub offset: u64,
    /// Declared segment length, for markers that carry one
    pub length: Option<u16>,
    /// SOI nesting level when the marker was seen
    pub nesting: u8,
}

/// Receives segment events from the scanner
pub trait SegmentObserver {
    fn on_segment(&mut self, event: &SegmentEvent);
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SegmentObserver for NoopObserver {
    fn on_segment(&mut self, _event: &SegmentEvent) {}
}

/// Observer that traces events to the logger
#[derive(Debug, Default)]
pub struct LogObserver;

impl SegmentObserver for LogObserver {
    fn on_segment(&mut self, event: &SegmentEvent) {
        match event.length {
            Some(length) => trace!(
                "Marker {} ({:#04x}) at offset {}, length {}, nesting {}",
                marker_name(event.marker), event.marker, event.offset, length, event.nesting
            ),
            None => trace!(
                "Marker {} ({:#04x}) at offset {}, nesting {}",
                marker_name(event.marker), event.marker, event.offset, event.nesting
            ),
        }
    }
}

/// Collects events in order
impl SegmentObserver for Vec<SegmentEvent> {
    fn on_segment(&mut self, event: &SegmentEvent) {
        self.push(*event);
    }
}

impl<O: SegmentObserver + ?Sized> SegmentObserver for Box<O> {
    fn on_segment(&mut self, event: &SegmentEvent) {
        (**self).on_segment(event)
    }
}

impl<O: SegmentObserver + ?Sized> SegmentObserver for &mut O {
    fn on_segment(&mut self, event: &SegmentEvent) {
        (**self).on_segment(event)
    }
}
