//! Jumping the playhead between edit points.

use maestro_core::Seconds;
use serde::{Deserialize, Serialize};

use crate::clip::{Clip, ClipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Result of a jump.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpTarget {
    pub time: Seconds,
    /// Clip starting at `time`, if any. `None` clears the selection.
    pub selected: Option<ClipId>,
}

/// Every clip start and end on every track, plus the origin; sorted and
/// without exact duplicates.
pub fn edit_points(clips: &[Clip]) -> Vec<Seconds> {
    let mut points: Vec<Seconds> = clips
        .iter()
        .flat_map(|c| [c.start_time, c.end_time()])
        .chain(std::iter::once(0.0))
        .collect();
    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}

/// Next or previous edit point relative to `current_time`.
///
/// Points within `epsilon` of the playhead are skipped. `Next` past the
/// last point returns `None`; `Prev` before the first falls back to zero.
pub fn jump_to_clip(
    direction: Direction,
    current_time: Seconds,
    clips: &[Clip],
    epsilon: Seconds,
) -> Option<JumpTarget> {
    let points = edit_points(clips);

    let time = match direction {
        Direction::Next => points
            .iter()
            .copied()
            .find(|&p| p > current_time + epsilon)?,
        Direction::Prev => points
            .iter()
            .copied()
            .rev()
            .find(|&p| p < current_time - epsilon)
            .unwrap_or(0.0),
    };

    let selected = clips
        .iter()
        .find(|c| (c.start_time - time).abs() < epsilon)
        .map(|c| c.id.clone());

    Some(JumpTarget { time, selected })
}
