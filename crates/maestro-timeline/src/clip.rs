//! Clip types for the timeline.

use maestro_core::{Seconds, TimeRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::track::TrackId;

/// Clip identifier.
///
/// A string rather than a bare UUID: razor cuts derive `<id>_a` / `<id>_b`
/// from the clip they split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh unique id.
    pub fn generate() -> Self {
        Self(format!("clip-{}", Uuid::new_v4()))
    }

    /// Derived id, e.g. `clip1` + `a` → `clip1_a`.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}_{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Media properties reported by the import pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Source duration in seconds
    pub duration: Seconds,
    pub width: u32,
    pub height: u32,
    pub codec: String,
    pub color_space: String,
}

/// Reference to a media source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Media identifier or path, as known to the import pipeline
    pub path: String,
    /// Probed metadata, when the pipeline has supplied it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MediaMetadata>,
}

impl MediaRef {
    /// Create a media reference without metadata.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            metadata: None,
        }
    }

    /// Attach probed metadata.
    pub fn with_metadata(mut self, metadata: MediaMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Source duration, if known.
    pub fn source_duration(&self) -> Option<Seconds> {
        self.metadata.as_ref().map(|m| m.duration)
    }
}

/// A clip on the timeline.
///
/// Clips are value records: editing operations return new clips rather than
/// mutating shared ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    /// Clip name (displayed in UI)
    pub name: String,
    /// Track holding this clip
    pub track: TrackId,
    /// Timeline position of the first frame
    pub start_time: Seconds,
    /// Duration on timeline
    pub duration: Seconds,
    /// Source in point
    pub in_point: Seconds,
    /// Source out point
    pub out_point: Seconds,
    /// Reference to source media
    pub media: MediaRef,
}

impl Clip {
    /// Create a clip showing the first `duration` seconds of its source.
    pub fn new(
        name: impl Into<String>,
        track: TrackId,
        media: MediaRef,
        start_time: Seconds,
        duration: Seconds,
    ) -> Self {
        Self {
            id: ClipId::generate(),
            name: name.into(),
            track,
            start_time,
            duration,
            in_point: 0.0,
            out_point: duration,
            media,
        }
    }

    /// Create a clip spanning the whole of its source, if the source
    /// duration is known.
    pub fn from_media(
        name: impl Into<String>,
        track: TrackId,
        media: MediaRef,
        start_time: Seconds,
    ) -> Option<Self> {
        let duration = media.source_duration()?;
        Some(Self::new(name, track, media, start_time, duration))
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<ClipId>) -> Self {
        self.id = id.into();
        self
    }

    /// Use a different source window; duration follows.
    pub fn with_source(mut self, in_point: Seconds, out_point: Seconds) -> Self {
        self.in_point = in_point;
        self.out_point = out_point;
        self.duration = out_point - in_point;
        self
    }

    /// Timeline end time (exclusive).
    #[inline]
    pub fn end_time(&self) -> Seconds {
        self.start_time + self.duration
    }

    /// Timeline interval `[start, end)`.
    #[inline]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.duration)
    }

    /// Source interval `[in, out)`.
    pub fn source_range(&self) -> TimeRange {
        TimeRange::from_start_end(self.in_point, self.out_point)
    }

    /// Whether `time` falls inside the clip on the timeline.
    #[inline]
    pub fn contains(&self, time: Seconds) -> bool {
        self.range().contains(time)
    }

    /// Whether `duration` agrees with `out_point - in_point` within `tolerance`.
    pub fn is_consistent(&self, tolerance: Seconds) -> bool {
        (self.duration - (self.out_point - self.in_point)).abs() <= tolerance
    }

    /// Copy of this clip placed on `track` at `start_time`.
    pub fn moved_to(&self, track: &TrackId, start_time: Seconds) -> Self {
        Self {
            track: track.clone(),
            start_time,
            ..self.clone()
        }
    }

    /// Copy of this clip moved by `delta` seconds on its own track.
    pub fn shifted(&self, delta: Seconds) -> Self {
        Self {
            start_time: self.start_time + delta,
            ..self.clone()
        }
    }

    /// Split the clip at a timeline time strictly inside it.
    ///
    /// The left half keeps the start and source in point, the right half
    /// keeps the source out point. Returns `None` at or outside the bounds.
    pub fn split_at(&self, time: Seconds) -> Option<(Clip, Clip)> {
        if time <= self.start_time || time >= self.end_time() {
            return None;
        }
        let offset = time - self.start_time;

        let left = Clip {
            id: self.id.with_suffix("a"),
            duration: offset,
            out_point: self.in_point + offset,
            ..self.clone()
        };
        let right = Clip {
            id: self.id.with_suffix("b"),
            start_time: time,
            duration: self.end_time() - time,
            in_point: self.in_point + offset,
            ..self.clone()
        };
        Some((left, right))
    }
}
