//! Overlap detection and move validation.
//!
//! Validation is a pure decision: it inspects a hypothetical placement and
//! reports why it is illegal, but never applies it. Callers commit the move
//! themselves (see [`apply_move`]) once validation succeeds.

use maestro_core::Seconds;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::clip::{Clip, ClipId};
use crate::track::{Track, TrackId, TrackKind};

/// Clips affected by a placement. Usually zero or one.
pub type AffectedClips = SmallVec<[ClipId; 4]>;

/// Why a move was rejected. Checks run in declaration order and the first
/// failure wins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoveError {
    #[error("Track not found: {track}")]
    TrackNotFound { track: TrackId },

    #[error("Track {track} is locked")]
    LockedTrack { track: TrackId },

    #[error("Cannot move {from_kind} clip to {to_kind} track")]
    TrackTypeMismatch {
        from_kind: TrackKind,
        to_kind: TrackKind,
    },

    #[error("Cannot move before timeline start")]
    NegativeTime {
        requested: Seconds,
        /// Closest legal start time.
        suggested_time: Seconds,
    },

    #[error("Collision with {}", .colliding.id)]
    Collision {
        /// First colliding clip in clip order.
        colliding: Box<Clip>,
        /// Every clip the placement would overlap.
        affected: AffectedClips,
    },
}

impl MoveError {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::TrackNotFound { .. } => "TrackNotFound",
            MoveError::LockedTrack { .. } => "LockedTrack",
            MoveError::TrackTypeMismatch { .. } => "TrackTypeMismatch",
            MoveError::NegativeTime { .. } => "NegativeTime",
            MoveError::Collision { .. } => "Collision",
        }
    }
}

/// How a colliding placement is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveMode {
    /// Collisions are rejected.
    #[default]
    Insert,
    /// Collisions are accepted; the overlapped clips are replaced.
    Overwrite,
}

/// A legal placement.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub mode: MoveMode,
    /// Clips an overwrite will replace. Empty for a clean insert.
    pub affected: AffectedClips,
}

/// Whether two clips overlap on the same track.
///
/// Half-open intervals: clips that only touch do not collide. A clip never
/// collides with itself.
pub fn overlaps(a: &Clip, b: &Clip) -> bool {
    a.track == b.track && a.id != b.id && a.range().overlaps(b.range())
}

/// Clips in `clips` that `candidate` overlaps, in clip order.
pub fn collisions<'a>(candidate: &Clip, clips: &'a [Clip]) -> Vec<&'a Clip> {
    clips.iter().filter(|other| overlaps(candidate, other)).collect()
}

/// Every overlapping pair in a clip set. Empty when the no-overlap
/// invariant holds.
pub fn find_overlaps(clips: &[Clip]) -> Vec<(ClipId, ClipId)> {
    let mut pairs = Vec::new();
    for (i, a) in clips.iter().enumerate() {
        for b in &clips[i + 1..] {
            if overlaps(a, b) {
                pairs.push((a.id.clone(), b.id.clone()));
            }
        }
    }
    pairs
}

/// Reject a clip set that breaks the no-overlap invariant.
///
/// The first overlapping pair in clip order is reported: `colliding` is its
/// earlier clip and `affected` lists every clip caught in any overlap.
pub fn ensure_no_overlaps(clips: &[Clip]) -> Result<(), MoveError> {
    let pairs = find_overlaps(clips);
    let Some((first, _)) = pairs.first() else {
        return Ok(());
    };
    let Some(colliding) = clips.iter().find(|c| &c.id == first) else {
        return Ok(());
    };

    let mut affected = AffectedClips::new();
    for id in pairs.iter().flat_map(|(a, b)| [a, b]) {
        if !affected.contains(id) {
            affected.push(id.clone());
        }
    }
    Err(MoveError::Collision {
        colliding: Box::new(colliding.clone()),
        affected,
    })
}

/// Validate moving `clip` to `new_track` at `new_time`.
pub fn validate_move(
    clip: &Clip,
    new_time: Seconds,
    new_track: &TrackId,
    all_clips: &[Clip],
    tracks: &[Track],
) -> Result<(), MoveError> {
    validate_move_with_mode(clip, new_time, new_track, all_clips, tracks, MoveMode::Insert)
        .map(|_| ())
}

/// Validate a move, letting `MoveMode::Overwrite` accept collisions.
pub fn validate_move_with_mode(
    clip: &Clip,
    new_time: Seconds,
    new_track: &TrackId,
    all_clips: &[Clip],
    tracks: &[Track],
    mode: MoveMode,
) -> Result<MoveOutcome, MoveError> {
    let target = tracks
        .iter()
        .find(|t| &t.id == new_track)
        .ok_or_else(|| MoveError::TrackNotFound {
            track: new_track.clone(),
        })?;

    if target.locked {
        return Err(MoveError::LockedTrack {
            track: target.id.clone(),
        });
    }

    // a clip whose own track is unknown has no kind to compare
    if let Some(source) = tracks.iter().find(|t| t.id == clip.track) {
        if source.kind != target.kind {
            return Err(MoveError::TrackTypeMismatch {
                from_kind: source.kind,
                to_kind: target.kind,
            });
        }
    }

    if new_time < 0.0 {
        return Err(MoveError::NegativeTime {
            requested: new_time,
            suggested_time: 0.0,
        });
    }

    let moved = clip.moved_to(new_track, new_time);
    let hits = collisions(&moved, all_clips);

    let Some(first) = hits.first() else {
        return Ok(MoveOutcome {
            mode: MoveMode::Insert,
            affected: AffectedClips::new(),
        });
    };

    let affected: AffectedClips = hits.iter().map(|c| c.id.clone()).collect();
    match mode {
        MoveMode::Overwrite => {
            debug!(clip = %clip.id, count = affected.len(), "Move will overwrite clips");
            Ok(MoveOutcome {
                mode: MoveMode::Overwrite,
                affected,
            })
        }
        MoveMode::Insert => Err(MoveError::Collision {
            colliding: Box::new((*first).clone()),
            affected,
        }),
    }
}

/// Clip set with `clip_id` moved to `new_track` at `new_time`.
///
/// Only `track` and `start_time` change. Unknown ids leave the set as is.
pub fn apply_move(
    clip_id: &ClipId,
    new_time: Seconds,
    new_track: &TrackId,
    clips: &[Clip],
) -> Vec<Clip> {
    clips
        .iter()
        .map(|c| {
            if &c.id == clip_id {
                c.moved_to(new_track, new_time)
            } else {
                c.clone()
            }
        })
        .collect()
}

/// Apply a validated overwrite move: drop the affected clips, then move.
pub fn apply_overwrite_move(
    clip_id: &ClipId,
    new_time: Seconds,
    new_track: &TrackId,
    outcome: &MoveOutcome,
    clips: &[Clip],
) -> Vec<Clip> {
    let remaining: Vec<Clip> = clips
        .iter()
        .filter(|c| !outcome.affected.contains(&c.id))
        .cloned()
        .collect();
    apply_move(clip_id, new_time, new_track, &remaining)
}
