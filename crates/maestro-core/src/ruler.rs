//! Ruler tick generation for the visible part of the timeline.

use serde::{Deserialize, Serialize};

use crate::time::Seconds;
use crate::viewport::Viewport;

/// Tolerance for deciding whether a minor tick lands on a major interval.
const MAJOR_TOLERANCE: f64 = 0.001;

/// Major/minor tick spacing in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickIntervals {
    pub major: Seconds,
    pub minor: Seconds,
}

impl TickIntervals {
    /// Tick spacing for a zoom level. A step function: denser ticks the
    /// further in the user zooms.
    pub fn for_zoom(zoom: f64) -> Self {
        let (major, minor) = if zoom >= 10.0 {
            (1.0, 0.2)
        } else if zoom >= 5.0 {
            (5.0, 1.0)
        } else if zoom >= 2.0 {
            (10.0, 2.0)
        } else if zoom >= 1.0 {
            (30.0, 5.0)
        } else {
            (60.0, 10.0)
        };
        Self { major, minor }
    }

    fn is_major(&self, time: Seconds) -> bool {
        let rem = time.rem_euclid(self.major);
        rem < MAJOR_TOLERANCE || self.major - rem < MAJOR_TOLERANCE
    }
}

/// One ruler tick in content-space pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerTick {
    pub time: Seconds,
    pub position_px: f64,
    pub is_major: bool,
    /// Timecode label, present on major ticks only.
    pub label: Option<String>,
}

/// Generate ticks covering the viewport's visible range.
///
/// Ticks start at the minor interval at or before the visible start and run
/// through the visible end inclusive; ticks before the timeline origin are
/// skipped. Regenerate whenever zoom or the visible range changes.
pub fn generate_ticks(viewport: &Viewport) -> Vec<RulerTick> {
    let range = viewport.visible_range();
    let intervals = TickIntervals::for_zoom(viewport.zoom());

    let first = (range.start / intervals.minor).floor() as i64;
    let last = (range.end / intervals.minor).floor() as i64;

    (first.max(0)..=last)
        .map(|index| {
            // multiply, never accumulate
            let time = index as f64 * intervals.minor;
            let is_major = intervals.is_major(time);
            RulerTick {
                time,
                position_px: viewport.time_to_pixel(time),
                is_major,
                label: is_major.then(|| viewport.format_time(time)),
            }
        })
        .collect()
}
