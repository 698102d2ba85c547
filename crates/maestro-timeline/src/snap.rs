//! Snapping engine for clip drags.
//!
//! Candidate points are derived from the clip set every time a drag starts
//! (or the clip set changes) and never updated incrementally.

use maestro_core::{Seconds, SnapConfig};
use serde::{Deserialize, Serialize};

use crate::clip::{Clip, ClipId};

/// Kind of snap point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapKind {
    ClipStart,
    ClipEnd,
    TimelineStart,
}

/// A point on the timeline that can be snapped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub time: Seconds,
    pub kind: SnapKind,
    /// Clip the point belongs to; `None` for the timeline origin.
    pub clip_id: Option<ClipId>,
}

impl SnapPoint {
    fn origin() -> Self {
        Self {
            time: 0.0,
            kind: SnapKind::TimelineStart,
            clip_id: None,
        }
    }

    fn clip_edges(clip: &Clip) -> [Self; 2] {
        [
            Self {
                time: clip.start_time,
                kind: SnapKind::ClipStart,
                clip_id: Some(clip.id.clone()),
            },
            Self {
                time: clip.end_time(),
                kind: SnapKind::ClipEnd,
                clip_id: Some(clip.id.clone()),
            },
        ]
    }
}

/// Which edge of the dragged clip snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapEdge {
    Start,
    End,
}

/// A resolved snap for a dragged clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snap {
    /// Time of the snap target; render the guide here.
    pub time: Seconds,
    pub kind: SnapKind,
    pub clip_id: Option<ClipId>,
    pub snap_to: SnapEdge,
    /// Clip start time that realises the snap.
    pub new_time: Seconds,
    /// Distance from the dragged edge to the target, always below the threshold.
    pub distance: Seconds,
    /// `1 - distance / threshold`, in `(0, 1]`.
    pub strength: f64,
}

/// Candidate points for dragging `dragged`: both edges of every other clip on
/// the same track (clip order, start before end), then the timeline origin.
pub fn collect_snap_points(dragged: &Clip, clips: &[Clip]) -> Vec<SnapPoint> {
    clips
        .iter()
        .filter(|c| c.id != dragged.id && c.track == dragged.track)
        .flat_map(SnapPoint::clip_edges)
        .chain(std::iter::once(SnapPoint::origin()))
        .collect()
}

/// Find the closest snap for `dragged` placed at `current_time`.
///
/// For each candidate the dragged start edge is tested before the end edge.
/// A candidate replaces the current best only when strictly closer, so ties
/// go to the earlier candidate.
pub fn find_snap(
    dragged: &Clip,
    points: &[SnapPoint],
    current_time: Seconds,
    threshold: Seconds,
) -> Option<Snap> {
    let start = current_time;
    let end = current_time + dragged.duration;

    let mut best: Option<Snap> = None;
    let mut min_distance = threshold;

    for point in points {
        for (edge, edge_time) in [(SnapEdge::Start, start), (SnapEdge::End, end)] {
            let distance = (edge_time - point.time).abs();
            if distance < min_distance {
                min_distance = distance;
                let new_time = match edge {
                    SnapEdge::Start => point.time,
                    SnapEdge::End => point.time - dragged.duration,
                };
                best = Some(Snap {
                    time: point.time,
                    kind: point.kind,
                    clip_id: point.clip_id.clone(),
                    snap_to: edge,
                    new_time,
                    distance,
                    strength: 1.0 - distance / threshold,
                });
            }
        }
    }

    best
}

/// Collect candidates and resolve a drag snap using the configured drag
/// threshold. Returns `None` when snapping is disabled.
pub fn snap_drag(
    dragged: &Clip,
    clips: &[Clip],
    current_time: Seconds,
    config: &SnapConfig,
) -> Option<Snap> {
    if !config.enabled {
        return None;
    }
    let points = collect_snap_points(dragged, clips);
    find_snap(
        dragged,
        &points,
        current_time,
        config.effective_drag_threshold(),
    )
}

/// A point found by [`SnapEngine::find_snap`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnap {
    pub point: SnapPoint,
    pub distance: Seconds,
}

/// Snap engine holding a registered set of points across all tracks.
///
/// Used for single-time snapping (playhead scrubbing, marker placement)
/// rather than clip drags.
#[derive(Debug, Clone)]
pub struct SnapEngine {
    /// Snap distance in seconds.
    pub threshold: Seconds,
    points: Vec<SnapPoint>,
}

impl SnapEngine {
    pub fn new(threshold: Seconds) -> Self {
        Self {
            threshold,
            points: Vec::new(),
        }
    }

    pub fn from_config(config: &SnapConfig) -> Self {
        Self::new(config.engine_threshold)
    }

    /// Replace the registered points with the edges of `clips` plus the
    /// origin, sorted by time.
    pub fn register_clips(&mut self, clips: &[Clip]) {
        self.points = clips
            .iter()
            .flat_map(SnapPoint::clip_edges)
            .chain(std::iter::once(SnapPoint::origin()))
            .collect();
        self.points.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    pub fn points(&self) -> &[SnapPoint] {
        &self.points
    }

    /// Nearest registered point strictly within the threshold, ignoring the
    /// edges of `exclude_clip`.
    pub fn find_snap(&self, time: Seconds, exclude_clip: Option<&ClipId>) -> Option<EngineSnap> {
        let mut nearest: Option<&SnapPoint> = None;
        let mut min_distance = self.threshold;

        for point in &self.points {
            if exclude_clip.is_some() && point.clip_id.as_ref() == exclude_clip {
                continue;
            }
            let distance = (point.time - time).abs();
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(point);
            }
        }

        nearest.map(|point| EngineSnap {
            point: point.clone(),
            distance: min_distance,
        })
    }
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::from_config(&SnapConfig::default())
    }
}

/// Alignment proposed by [`magnetic_suggestion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    AlignStart,
    AlignEnd,
}

/// A soft alignment hint, wider than a snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticSuggestion {
    pub time: Seconds,
    /// `1 - distance / range`
    pub strength: f64,
    pub alignment: Alignment,
}

/// Strongest alignment of `current_time` to a same-track clip edge within
/// `range`. Ties keep the earlier edge in clip order.
pub fn magnetic_suggestion(
    clip: &Clip,
    current_time: Seconds,
    clips: &[Clip],
    range: Seconds,
) -> Option<MagneticSuggestion> {
    let mut best: Option<MagneticSuggestion> = None;

    let edges = clips
        .iter()
        .filter(|other| other.id != clip.id && other.track == clip.track)
        .flat_map(|other| {
            [
                (other.start_time, Alignment::AlignStart),
                (other.end_time(), Alignment::AlignEnd),
            ]
        });

    for (time, alignment) in edges {
        let distance = (current_time - time).abs();
        if distance >= range {
            continue;
        }
        let strength = 1.0 - distance / range;
        if best.map_or(true, |b| strength > b.strength) {
            best = Some(MagneticSuggestion {
                time,
                strength,
                alignment,
            });
        }
    }

    best
}
