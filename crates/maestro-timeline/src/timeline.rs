//! The timeline document: ordered tracks plus the set of clips on them.

use maestro_core::Seconds;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clip::{Clip, ClipId};
use crate::collision;
use crate::track::{Track, TrackId, TrackKind};

/// Tracks and clips of one edit.
///
/// Track order is display order (video tracks above audio tracks). Clip order
/// carries no meaning except as the iteration order the snap and navigation
/// tie-breaks follow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timeline {
    /// Tracks, top to bottom
    pub tracks: Vec<Track>,
    /// All clips on all tracks
    pub clips: Vec<Clip>,
}

impl Timeline {
    /// Create an empty timeline without tracks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timeline with one video track (`v1`) above one audio track (`a1`).
    pub fn with_default_tracks() -> Self {
        let (timeline, _) = Self::new().add_track(TrackKind::Video);
        let (timeline, _) = timeline.add_track(TrackKind::Audio);
        timeline
    }

    /// Append a prepared track at the bottom. Builder-style helper for
    /// loading and fixtures; `add_track` applies the video/audio placement.
    pub fn push_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self.renumber_tracks();
        self
    }

    /// Add a clip without validation. Builder-style helper.
    pub fn push_clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Find a track by id.
    pub fn track_by_id(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Find a clip by id.
    pub fn clip_by_id(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| &c.id == id)
    }

    /// Clips on one track, sorted by start time.
    pub fn clips_on_track(&self, track: &TrackId) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self.clips.iter().filter(|c| &c.track == track).collect();
        clips.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        clips
    }

    /// The clip under `time`, on one track or on any track (first in clip order).
    pub fn clip_at_time(&self, track: Option<&TrackId>, time: Seconds) -> Option<&Clip> {
        self.clips
            .iter()
            .filter(|c| track.map_or(true, |t| &c.track == t))
            .find(|c| c.contains(time))
    }

    /// End of the last clip on any track, or zero for an empty timeline.
    pub fn max_clip_end(&self) -> Seconds {
        self.clips.iter().map(Clip::end_time).fold(0.0, f64::max)
    }

    /// Total duration of the edit.
    pub fn duration(&self) -> Seconds {
        self.max_clip_end()
    }

    /// Content length including trailing padding, for sizing the scroll area.
    pub fn content_duration(&self, padding: Seconds) -> Seconds {
        self.max_clip_end() + padding
    }

    /// Whether any two clips on the same track overlap.
    pub fn has_overlaps(&self) -> bool {
        !collision::find_overlaps(&self.clips).is_empty()
    }

    pub fn tracks_of_kind(&self, kind: TrackKind) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(move |t| t.kind == kind)
    }

    // ── Updates (return a new timeline) ─────────────────────────

    /// Same tracks with a different clip set.
    pub fn with_clips(&self, clips: Vec<Clip>) -> Self {
        Self {
            tracks: self.tracks.clone(),
            clips,
        }
    }

    /// Same timeline with one more clip. Callers validate placement first.
    pub fn insert_clip(&self, clip: Clip) -> Self {
        let mut clips = self.clips.clone();
        clips.push(clip);
        self.with_clips(clips)
    }

    /// Same timeline with the clip carrying `clip.id` replaced.
    pub fn replace_clip(&self, clip: Clip) -> Self {
        let clips = self
            .clips
            .iter()
            .map(|c| if c.id == clip.id { clip.clone() } else { c.clone() })
            .collect();
        self.with_clips(clips)
    }

    /// Same timeline without the clip `id`.
    pub fn remove_clip(&self, id: &ClipId) -> Self {
        self.with_clips(self.clips.iter().filter(|c| &c.id != id).cloned().collect())
    }

    /// Add a track of `kind`. Video tracks are placed on top, audio tracks at
    /// the bottom. Returns the new timeline and the generated track id.
    pub fn add_track(&self, kind: TrackKind) -> (Self, TrackId) {
        let id = self.next_track_id(kind);
        let name = id.as_str().to_uppercase();
        let track = Track::new(id.clone(), name, kind);

        let mut next = self.clone();
        match kind {
            TrackKind::Video => next.tracks.insert(0, track),
            TrackKind::Audio => next.tracks.push(track),
        }
        next.renumber_tracks();

        debug!(track = %id, %kind, "Added track");
        (next, id)
    }

    /// Remove a track and every clip on it.
    pub fn remove_track(&self, id: &TrackId) -> Self {
        let mut next = Self {
            tracks: self.tracks.iter().filter(|t| &t.id != id).cloned().collect(),
            clips: self.clips.iter().filter(|c| &c.track != id).cloned().collect(),
        };
        next.renumber_tracks();
        next
    }

    /// Same timeline with a track's lock flag changed.
    pub fn set_track_locked(&self, id: &TrackId, locked: bool) -> Self {
        let mut next = self.clone();
        if let Some(track) = next.tracks.iter_mut().find(|t| &t.id == id) {
            track.locked = locked;
        }
        next
    }

    /// `v<N>` / `a<N>` with `N` one past the count of tracks of that kind,
    /// bumped until unused.
    fn next_track_id(&self, kind: TrackKind) -> TrackId {
        let mut n = self.tracks_of_kind(kind).count() + 1;
        loop {
            let candidate = TrackId::new(format!("{}{}", kind.prefix(), n));
            if self.track_by_id(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    fn renumber_tracks(&mut self) {
        for (order, track) in self.tracks.iter_mut().enumerate() {
            track.order = order;
        }
    }
}
