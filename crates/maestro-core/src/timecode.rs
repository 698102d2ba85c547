//! SMPTE-style `HH:MM:SS:FF` timecode formatting and parsing.
//!
//! Non-drop-frame only. Frame counts are truncated at every step, which also
//! covers fractional rates such as 23.976: a formatted timecode parses back to
//! the start of the frame it names, not to the original seconds value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MaestroError, Result};
use crate::time::{FrameRate, Seconds};

/// A decomposed timecode. Serializes as its `HH:MM:SS:FF` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timecode {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl Timecode {
    /// `00:00:00:00`
    pub const ZERO: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
        frames: 0,
    };

    pub const fn new(hours: u32, minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// Absolute frame count of this timecode at `rate`.
    pub fn to_frames(self, rate: FrameRate) -> i64 {
        let fps = rate.to_fps_f64();
        let whole_seconds =
            self.hours as f64 * 3600.0 + self.minutes as f64 * 60.0 + self.seconds as f64;
        (whole_seconds * fps + self.frames as f64).floor() as i64
    }

    /// Decompose an absolute frame count. Negative counts clamp to zero.
    pub fn from_frames(total_frames: i64, rate: FrameRate) -> Self {
        let fps = rate.to_fps_f64();
        let total = total_frames.max(0) as f64;

        let hours = (total / (fps * 3600.0)).floor();
        let minutes = ((total % (fps * 3600.0)) / (fps * 60.0)).floor();
        let seconds = ((total % (fps * 60.0)) / fps).floor();
        let frames = (total % fps).floor();

        Self::new(hours as u32, minutes as u32, seconds as u32, frames as u32)
    }

    /// Seconds value of this timecode, measured from `00:00:00:00`.
    pub fn to_seconds(self, rate: FrameRate) -> Seconds {
        self.to_frames(rate) as f64 / rate.to_fps_f64()
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

impl FromStr for Timecode {
    type Err = MaestroError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| MaestroError::InvalidTimecode {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 4 {
            return Err(invalid("expected HH:MM:SS:FF"));
        }

        let mut fields = [0u32; 4];
        for (field, part) in fields.iter_mut().zip(&parts) {
            *field = part
                .parse()
                .map_err(|_| invalid("fields must be non-negative integers"))?;
        }

        let [hours, minutes, seconds, frames] = fields;
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid("minutes and seconds must be below 60"));
        }

        Ok(Self::new(hours, minutes, seconds, frames))
    }
}

impl TryFrom<String> for Timecode {
    type Error = MaestroError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Timecode> for String {
    fn from(tc: Timecode) -> Self {
        tc.to_string()
    }
}

/// Format `seconds` as a timecode offset by `start`.
///
/// ```
/// use maestro_core::{format_timecode, FrameRate, Timecode};
///
/// assert_eq!(format_timecode(1.5, FrameRate::FPS_24, Timecode::ZERO), "00:00:01:12");
/// ```
pub fn format_timecode(seconds: Seconds, rate: FrameRate, start: Timecode) -> String {
    let total = start.to_frames(rate) + rate.frames_at(seconds);
    Timecode::from_frames(total, rate).to_string()
}

/// Parse a timecode string to seconds, measured from `00:00:00:00`.
pub fn parse_timecode(timecode: &str, rate: FrameRate) -> Result<Seconds> {
    Ok(timecode.parse::<Timecode>()?.to_seconds(rate))
}

/// Parse a timecode string to timeline seconds, undoing a `start` offset.
///
/// Timecodes earlier than `start` map to negative seconds.
pub fn timeline_seconds(timecode: &str, rate: FrameRate, start: Timecode) -> Result<Seconds> {
    let frames = timecode.parse::<Timecode>()?.to_frames(rate) - start.to_frames(rate);
    Ok(frames as f64 / rate.to_fps_f64())
}
