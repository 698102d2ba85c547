//! Edit operations.
//!
//! Every operation takes a clip set and returns a new one. Operations with
//! nothing to do return their input unchanged; they never fail. Structured
//! failures ([`EditError`]) are raised by the session layer, which knows
//! whether a gesture had a valid target.

use maestro_core::Seconds;
use thiserror::Error;
use tracing::debug;

use crate::clip::{Clip, ClipId};
use crate::collision::MoveError;
use crate::selection::SelectionBuffer;
use crate::track::TrackId;

/// Errors reported by editing gestures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("No IN/OUT points set")]
    NoSelection,

    #[error("Nothing to paste")]
    EmptyBuffer,

    #[error("No clip under {time:.2}s to cut")]
    InvalidRazorTarget { time: Seconds },

    #[error("Clip not found: {0}")]
    ClipNotFound(ClipId),

    #[error(transparent)]
    Move(#[from] MoveError),
}

// ── Trim ────────────────────────────────────────────────────────

/// Clip edge being dragged by a trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimEdge {
    /// Moves the source in point.
    Start,
    /// Moves the source out point.
    End,
}

/// Trim one edge of a clip by `delta` seconds.
///
/// The source in point never goes below zero and the clip never gets shorter
/// than `min_duration`. Collisions are not checked here.
pub fn trim(clip: &Clip, edge: TrimEdge, delta: Seconds, min_duration: Seconds) -> Clip {
    match edge {
        TrimEdge::Start => {
            let new_in = (clip.in_point + delta)
                .max(0.0)
                .min(clip.out_point - min_duration);
            Clip {
                in_point: new_in,
                duration: clip.out_point - new_in,
                start_time: clip.start_time - (new_in - clip.in_point),
                ..clip.clone()
            }
        }
        TrimEdge::End => {
            let new_out = (clip.in_point + min_duration).max(clip.out_point + delta);
            Clip {
                out_point: new_out,
                duration: new_out - clip.in_point,
                ..clip.clone()
            }
        }
    }
}

// ── Razor ───────────────────────────────────────────────────────

/// Cut every clip strictly containing `time` in two.
///
/// With `selected`, only the listed clips are cut. Halves take the ids
/// `<id>_a` and `<id>_b` and keep the position of the original in the set.
pub fn razor_cut(time: Seconds, clips: &[Clip], selected: Option<&[ClipId]>) -> Vec<Clip> {
    let mut out = Vec::with_capacity(clips.len() + 1);
    for clip in clips {
        let eligible = selected.map_or(true, |ids| ids.contains(&clip.id));
        match clip.split_at(time).filter(|_| eligible) {
            Some((left, right)) => {
                debug!(clip = %clip.id, time, "Razor cut");
                out.push(left);
                out.push(right);
            }
            None => out.push(clip.clone()),
        }
    }
    out
}

// ── Ripple delete ───────────────────────────────────────────────

/// Delete `[in_point, out_point)` and close the gap.
///
/// Clips touching the range at all are removed whole. Later clips move left
/// by the range length. With `track_filter`, clips on other tracks are left
/// untouched.
pub fn ripple_delete(
    in_point: Seconds,
    out_point: Seconds,
    clips: &[Clip],
    track_filter: Option<&[TrackId]>,
) -> Vec<Clip> {
    if out_point <= in_point {
        return clips.to_vec();
    }
    let gap = out_point - in_point;

    let result: Vec<Clip> = clips
        .iter()
        .filter_map(|clip| {
            if !track_filter.map_or(true, |tracks| tracks.contains(&clip.track)) {
                return Some(clip.clone());
            }
            if clip.end_time() <= in_point {
                Some(clip.clone())
            } else if clip.start_time >= out_point {
                Some(clip.shifted(-gap))
            } else {
                None
            }
        })
        .collect();

    debug!(
        in_point,
        out_point,
        removed = clips.len() - result.len(),
        "Ripple delete"
    );
    result
}

/// Remove one clip and pull later clips on its track left by its duration.
///
/// Unknown ids leave the set unchanged.
pub fn ripple_delete_clip(clip_id: &ClipId, clips: &[Clip]) -> Vec<Clip> {
    let Some(deleted) = clips.iter().find(|c| &c.id == clip_id) else {
        return clips.to_vec();
    };

    clips
        .iter()
        .filter(|c| &c.id != clip_id)
        .map(|c| {
            if c.track == deleted.track && c.start_time > deleted.start_time {
                c.shifted(-deleted.duration)
            } else {
                c.clone()
            }
        })
        .collect()
}

// ── Paste ───────────────────────────────────────────────────────

/// Buffer clips placed at `insert_time`, each with a fresh id.
fn placed_buffer_clips(buffer: &SelectionBuffer, insert_time: Seconds) -> impl Iterator<Item = Clip> + '_ {
    buffer.clips.iter().map(move |buffered| Clip {
        id: ClipId::generate(),
        start_time: insert_time + buffered.relative_start,
        ..buffered.clip.clone()
    })
}

/// Paste replacing whatever lies in `[insert_time, insert_time + duration)`
/// on any track.
pub fn paste_overwrite(buffer: &SelectionBuffer, insert_time: Seconds, clips: &[Clip]) -> Vec<Clip> {
    if buffer.is_empty() {
        return clips.to_vec();
    }
    let paste_end = insert_time + buffer.duration;

    let mut result: Vec<Clip> = clips
        .iter()
        .filter(|c| c.end_time() <= insert_time || c.start_time >= paste_end)
        .cloned()
        .collect();
    let replaced = clips.len() - result.len();
    result.extend(placed_buffer_clips(buffer, insert_time));

    debug!(insert_time, replaced, pasted = buffer.clips.len(), "Paste overwrite");
    result
}

/// Paste pushing every clip starting at or after `insert_time` right by the
/// buffer duration.
pub fn paste_insert(buffer: &SelectionBuffer, insert_time: Seconds, clips: &[Clip]) -> Vec<Clip> {
    if buffer.is_empty() {
        return clips.to_vec();
    }

    let mut result: Vec<Clip> = clips
        .iter()
        .map(|c| {
            if c.start_time >= insert_time {
                c.shifted(buffer.duration)
            } else {
                c.clone()
            }
        })
        .collect();
    result.extend(placed_buffer_clips(buffer, insert_time));

    debug!(insert_time, shift = buffer.duration, pasted = buffer.clips.len(), "Paste insert");
    result
}

// ── Insert point ────────────────────────────────────────────────

/// Where an incoming clip lands and which clips must make room.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan {
    pub insert_time: Seconds,
    /// Clips on the target track to push right, by start time.
    pub ripple_clips: Vec<ClipId>,
    pub ripple_amount: Seconds,
}

impl InsertPlan {
    fn at(insert_time: Seconds) -> Self {
        Self {
            insert_time,
            ripple_clips: Vec::new(),
            ripple_amount: 0.0,
        }
    }

    /// Whether realising the plan moves existing clips.
    pub fn ripples(&self) -> bool {
        !self.ripple_clips.is_empty() && self.ripple_amount > 0.0
    }
}

/// Resolve where `clip` goes when dropped on `track` at `insert_time`.
///
/// Dropping onto a clip inserts before it and pushes it and everything after
/// it right by the incoming duration. Dropping into a gap too small pushes
/// the following clips right by the shortfall.
pub fn find_insert_point(
    clip: &Clip,
    insert_time: Seconds,
    track: &TrackId,
    clips: &[Clip],
) -> InsertPlan {
    let mut on_track: Vec<&Clip> = clips
        .iter()
        .filter(|c| &c.track == track && c.id != clip.id)
        .collect();
    on_track.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let ripple_from = |from: Seconds| -> Vec<ClipId> {
        on_track
            .iter()
            .filter(|c| c.start_time >= from)
            .map(|c| c.id.clone())
            .collect()
    };

    if let Some(under) = on_track.iter().find(|c| c.contains(insert_time)) {
        return InsertPlan {
            insert_time: under.start_time,
            ripple_clips: ripple_from(under.start_time),
            ripple_amount: clip.duration,
        };
    }

    match on_track.iter().find(|c| c.start_time > insert_time) {
        Some(next) => {
            let gap = next.start_time - insert_time;
            if gap >= clip.duration {
                InsertPlan::at(insert_time)
            } else {
                InsertPlan {
                    insert_time,
                    ripple_clips: ripple_from(next.start_time),
                    ripple_amount: clip.duration - gap,
                }
            }
        }
        None => InsertPlan::at(insert_time),
    }
}

/// Realise an [`InsertPlan`]: push the ripple clips, then place `clip` on
/// `track` at the plan's insert time.
pub fn apply_insert_plan(clip: &Clip, track: &TrackId, plan: &InsertPlan, clips: &[Clip]) -> Vec<Clip> {
    let mut result: Vec<Clip> = clips
        .iter()
        .filter(|c| c.id != clip.id)
        .map(|c| {
            if plan.ripple_clips.contains(&c.id) {
                c.shifted(plan.ripple_amount)
            } else {
                c.clone()
            }
        })
        .collect();
    result.push(clip.moved_to(track, plan.insert_time));
    result
}
