//! Track types for the timeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier (`v1`, `a2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Kind of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    /// Prefix used for generated ids and names.
    pub fn prefix(self) -> char {
        match self {
            TrackKind::Video => 'v',
            TrackKind::Audio => 'a',
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Video => f.write_str("video"),
            TrackKind::Audio => f.write_str("audio"),
        }
    }
}

/// A lane holding non-overlapping clips of one media kind.
///
/// Clips live in the timeline's clip set and point at their track by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Track kind
    pub kind: TrackKind,
    /// Display position, top to bottom
    pub order: usize,
    /// Is track locked (prevent edits)
    pub locked: bool,
    /// Is track muted
    pub muted: bool,
    /// Is track soloed
    pub solo: bool,
}

impl Track {
    /// Create a new track.
    pub fn new(id: impl Into<TrackId>, name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            order: 0,
            locked: false,
            muted: false,
            solo: false,
        }
    }

    /// Create a new video track.
    pub fn new_video(id: impl Into<TrackId>, name: impl Into<String>) -> Self {
        Self::new(id, name, TrackKind::Video)
    }

    /// Create a new audio track.
    pub fn new_audio(id: impl Into<TrackId>, name: impl Into<String>) -> Self {
        Self::new(id, name, TrackKind::Audio)
    }

    /// Same track with its lock flag set.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == TrackKind::Video
    }

    pub fn is_audio(&self) -> bool {
        self.kind == TrackKind::Audio
    }
}
