//! Time/pixel coordinate system and the fixed-playhead viewport.
//!
//! Everything on the timeline is positioned in time and converted to pixels
//! at `scale = base_scale × zoom` pixels per second. The playhead stays at a
//! fixed fraction of the viewport width; the content scrolls beneath it.

use serde::{Deserialize, Serialize};

use crate::config::CoordinateConfig;
use crate::time::{FrameRate, Seconds};
use crate::timecode::{format_timecode, Timecode};

/// Convert a time to a content-space pixel position.
#[inline]
pub fn time_to_pixel(time: Seconds, scale: f64) -> f64 {
    time * scale
}

/// Convert a content-space pixel position to a time.
#[inline]
pub fn pixel_to_time(px: f64, scale: f64) -> Seconds {
    px / scale
}

/// Time window currently visible in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub start: Seconds,
    pub end: Seconds,
}

impl VisibleRange {
    pub fn duration(&self) -> Seconds {
        self.end - self.start
    }

    pub fn contains(&self, time: Seconds) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Visible time window with the playhead pinned at `playhead_fraction`.
pub fn visible_range(
    current_time: Seconds,
    scale: f64,
    viewport_width: f64,
    playhead_fraction: f64,
) -> VisibleRange {
    let visible_duration = viewport_width / scale;
    let start = current_time - visible_duration * playhead_fraction;
    VisibleRange {
        start,
        end: start + visible_duration,
    }
}

/// Content scroll offset that keeps the fixed playhead over `current_time`.
///
/// Negative near the timeline origin: the renderer shows empty space to the
/// left of zero rather than moving the playhead.
pub fn scroll_offset(
    current_time: Seconds,
    scale: f64,
    viewport_width: f64,
    playhead_fraction: f64,
) -> f64 {
    current_time * scale - viewport_width * playhead_fraction
}

/// Horizontal geometry of a clip in content space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSpan {
    pub left_px: f64,
    pub width_px: f64,
}

impl PixelSpan {
    pub fn right_px(&self) -> f64 {
        self.left_px + self.width_px
    }
}

/// Pixel geometry of a `[start, start + duration)` interval.
pub fn span_geometry(start: Seconds, duration: Seconds, scale: f64) -> PixelSpan {
    PixelSpan {
        left_px: time_to_pixel(start, scale),
        width_px: time_to_pixel(duration, scale),
    }
}

/// Playhead and zoom state for one editing session.
///
/// View state only: it is never persisted with the timeline document.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    current_time: Seconds,
    zoom: f64,
    /// Width of the visible timeline area in pixels.
    pub viewport_width: f64,
    pub frame_rate: FrameRate,
    pub start_timecode: Timecode,
    coords: CoordinateConfig,
}

impl Viewport {
    /// Create a viewport at time zero and zoom 1.0.
    pub fn new(coords: CoordinateConfig) -> Self {
        let zoom = coords.clamp_zoom(1.0);
        Self {
            current_time: 0.0,
            zoom,
            viewport_width: 1920.0,
            frame_rate: FrameRate::default(),
            start_timecode: Timecode::ZERO,
            coords,
        }
    }

    pub fn with_width(mut self, viewport_width: f64) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_start_timecode(mut self, start_timecode: Timecode) -> Self {
        self.start_timecode = start_timecode;
        self
    }

    pub fn current_time(&self) -> Seconds {
        self.current_time
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn coordinates(&self) -> &CoordinateConfig {
        &self.coords
    }

    /// Pixels per second.
    pub fn scale(&self) -> f64 {
        self.coords.scale(self.zoom)
    }

    /// Move the playhead. Negative times clamp to zero.
    pub fn seek(&mut self, time: Seconds) {
        self.current_time = time.max(0.0);
    }

    /// Move the playhead by whole frames at the session frame rate.
    pub fn step_frames(&mut self, frames: i64) {
        self.seek(self.current_time + frames as f64 * self.frame_rate.frame_duration());
    }

    /// Set the zoom (clamped) and return the scroll offset that keeps the
    /// playhead in place.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = self.coords.clamp_zoom(zoom);
        self.scroll_offset()
    }

    pub fn time_to_pixel(&self, time: Seconds) -> f64 {
        time_to_pixel(time, self.scale())
    }

    pub fn pixel_to_time(&self, px: f64) -> Seconds {
        pixel_to_time(px, self.scale())
    }

    /// Time under a pixel measured from the viewport's left edge.
    pub fn viewport_pixel_to_time(&self, viewport_px: f64) -> Seconds {
        self.visible_range().start + self.pixel_to_time(viewport_px)
    }

    pub fn visible_range(&self) -> VisibleRange {
        visible_range(
            self.current_time,
            self.scale(),
            self.viewport_width,
            self.coords.playhead_fraction,
        )
    }

    pub fn scroll_offset(&self) -> f64 {
        scroll_offset(
            self.current_time,
            self.scale(),
            self.viewport_width,
            self.coords.playhead_fraction,
        )
    }

    /// Playhead position in viewport pixels. Constant for a given width.
    pub fn playhead_px(&self) -> f64 {
        self.viewport_width * self.coords.playhead_fraction
    }

    /// Total scrollable content width for a timeline whose last clip ends at
    /// `max_clip_end`.
    pub fn content_width(&self, max_clip_end: Seconds) -> f64 {
        let padding = self.coords.timeline_padding;
        let total = (max_clip_end + padding).max(self.current_time + padding);
        total * self.scale()
    }

    /// Pixel geometry for a clip placed at `start` lasting `duration`.
    pub fn clip_geometry(&self, start: Seconds, duration: Seconds) -> PixelSpan {
        span_geometry(start, duration, self.scale())
    }

    /// Format a timeline time as timecode using the session rate and offset.
    pub fn format_time(&self, seconds: Seconds) -> String {
        format_timecode(seconds, self.frame_rate, self.start_timecode)
    }

    /// Timecode at the playhead.
    pub fn current_timecode(&self) -> String {
        self.format_time(self.current_time)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(CoordinateConfig::default())
    }
}
