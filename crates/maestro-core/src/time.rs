//! Time representation for timeline editing
//!
//! Timeline positions are plain `f64` seconds: the editor works at pointer
//! resolution and compares positions with explicit tolerances (snap
//! thresholds, navigation epsilon). Frame rates stay rational so that NTSC
//! rates keep their exact definition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MaestroError;

/// A timeline position or length in seconds.
pub type Seconds = f64;

/// Frame rate as a rational number (e.g., 24000/1001 for 23.976 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 24000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Build a frame rate from a decimal value such as `23.976`.
    ///
    /// The value is kept to millisecond-of-a-frame precision, so `23.976`
    /// becomes `2997/125` rather than the NTSC `24000/1001`.
    pub fn from_fps_f64(fps: f64) -> Self {
        let numerator = (fps * 1000.0).round().max(1.0) as u32;
        let divisor = gcd(numerator, 1000);
        Self::new(numerator / divisor, 1000 / divisor)
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Duration of a single frame in seconds.
    #[inline]
    pub fn frame_duration(self) -> Seconds {
        self.denominator as f64 / self.numerator as f64
    }

    /// Whole frame index containing `seconds` (truncating).
    #[inline]
    pub fn frames_at(self, seconds: Seconds) -> i64 {
        (seconds * self.to_fps_f64()).floor() as i64
    }

    /// Common frame rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_50: Self = Self::new(50, 1);
    pub const FPS_59_94: Self = Self::new(60000, 1001);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_24
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}

/// Accepts `"24"`, `"23.976"` or `"30000/1001"`.
impl FromStr for FrameRate {
    type Err = MaestroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || MaestroError::InvalidParameter(format!("invalid frame rate '{s}'"));

        if let Some((num, den)) = s.split_once('/') {
            let numerator: u32 = num.trim().parse().map_err(|_| invalid())?;
            let denominator: u32 = den.trim().parse().map_err(|_| invalid())?;
            if numerator == 0 || denominator == 0 {
                return Err(invalid());
            }
            return Ok(Self::new(numerator, denominator));
        }

        let fps: f64 = s.parse().map_err(|_| invalid())?;
        if !fps.is_finite() || fps <= 0.0 {
            return Err(invalid());
        }
        Ok(Self::from_fps_f64(fps))
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}

/// A time range with inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time (inclusive)
    pub start: Seconds,
    /// Duration of the range
    pub duration: Seconds,
}

impl TimeRange {
    /// Create a new time range from start and duration.
    #[inline]
    pub fn new(start: Seconds, duration: Seconds) -> Self {
        Self { start, duration }
    }

    /// Create a time range from start and end times.
    #[inline]
    pub fn from_start_end(start: Seconds, end: Seconds) -> Self {
        Self {
            start,
            duration: end - start,
        }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> Seconds {
        self.start + self.duration
    }

    /// Check if a time is within this range.
    #[inline]
    pub fn contains(self, time: Seconds) -> bool {
        time >= self.start && time < self.end()
    }

    /// Check if two ranges overlap. Touching edges do not overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end() && self.end() > other.start
    }

    /// Compute the intersection of two ranges, if any.
    pub fn intersection(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        Some(Self::from_start_end(start, end))
    }

    /// Same range moved by `delta` seconds.
    #[inline]
    pub fn shifted(self, delta: Seconds) -> Self {
        Self::new(self.start + delta, self.duration)
    }

    /// Empty range starting at zero.
    pub const EMPTY: Self = Self {
        start: 0.0,
        duration: 0.0,
    };
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::EMPTY
    }
}
