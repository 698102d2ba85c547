//! IN/OUT marks and the copy buffer.

use maestro_core::Seconds;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clip::Clip;
use crate::edit::EditError;

/// IN/OUT marks set from the playhead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Marks {
    pub in_point: Option<Seconds>,
    pub out_point: Option<Seconds>,
}

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_in(self, time: Seconds) -> Self {
        Self {
            in_point: Some(time),
            ..self
        }
    }

    pub fn set_out(self, time: Seconds) -> Self {
        Self {
            out_point: Some(time),
            ..self
        }
    }

    /// `(in, out)` when both marks are set and OUT is after IN.
    pub fn range(&self) -> Option<(Seconds, Seconds)> {
        let (in_point, out_point) = (self.in_point?, self.out_point?);
        (out_point > in_point).then_some((in_point, out_point))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A clip captured by [`copy_selection`], already cut to the marked range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferedClip {
    pub clip: Clip,
    /// Offset from the IN mark
    pub relative_start: Seconds,
    pub relative_duration: Seconds,
}

/// Contents of the copy buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionBuffer {
    pub in_point: Seconds,
    pub out_point: Seconds,
    /// `out_point - in_point`; the length a paste occupies.
    pub duration: Seconds,
    pub clips: Vec<BufferedClip>,
}

impl SelectionBuffer {
    /// A buffer without clips pastes nothing.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Copy the clips intersecting the marked range.
///
/// Clips hanging over either mark are cut to the range, with their source
/// window adjusted to match.
pub fn copy_selection(marks: &Marks, clips: &[Clip]) -> Result<SelectionBuffer, EditError> {
    let Some((in_point, out_point)) = marks.range() else {
        warn!(?marks, "Copy without a valid IN/OUT range");
        return Err(EditError::NoSelection);
    };

    let captured: Vec<BufferedClip> = clips
        .iter()
        .filter(|c| c.start_time < out_point && c.end_time() > in_point)
        .map(|c| {
            let start = c.start_time.max(in_point);
            let end = c.end_time().min(out_point);
            let head = start - c.start_time;
            let source_in = c.in_point + head;
            let trimmed = Clip {
                start_time: start,
                duration: end - start,
                in_point: source_in,
                out_point: source_in + (end - start),
                ..c.clone()
            };
            BufferedClip {
                relative_start: start - in_point,
                relative_duration: trimmed.duration,
                clip: trimmed,
            }
        })
        .collect();

    let buffer = SelectionBuffer {
        in_point,
        out_point,
        duration: out_point - in_point,
        clips: captured,
    };
    debug!(
        duration = buffer.duration,
        clips = buffer.clips.len(),
        "Copied selection"
    );
    Ok(buffer)
}
