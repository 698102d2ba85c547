//! Interactive editing session.
//!
//! `EditSession` is the caller side of the pure engine: it owns the committed
//! timeline and the session-only state (playhead, zoom, marks, clipboard,
//! selection), runs each gesture through the engine and commits only results
//! that passed validation. Clip sets that would overlap on a track are never
//! committed. Every commit records a snapshot for undo.

use maestro_core::{generate_ticks, EngineConfig, ProjectSettings, RulerTick, Seconds, Viewport};
use tracing::{debug, info, warn};

use crate::clip::{Clip, ClipId};
use crate::collision::{self, MoveError, MoveMode, MoveOutcome};
use crate::edit::{self, EditError, TrimEdge};
use crate::history::History;
use crate::navigation::{self, Direction};
use crate::selection::{copy_selection, Marks, SelectionBuffer};
use crate::serialization::TimelineFile;
use crate::snap::{self, MagneticSuggestion, Snap};
use crate::timeline::Timeline;
use crate::track::{TrackId, TrackKind};

/// Live feedback for a clip being dragged. Nothing is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFeedback {
    /// Snap applied to the drag, if any.
    pub snap: Option<Snap>,
    pub magnetic: Option<MagneticSuggestion>,
    /// Start time the clip would land at.
    pub time: Seconds,
    /// Whether dropping here is legal.
    pub validation: Result<(), MoveError>,
}

impl DragFeedback {
    pub fn is_valid(&self) -> bool {
        self.validation.is_ok()
    }
}

/// One user's editing session on one timeline.
#[derive(Debug, Clone)]
pub struct EditSession {
    timeline: Timeline,
    settings: ProjectSettings,
    viewport: Viewport,
    marks: Marks,
    clipboard: Option<SelectionBuffer>,
    selected: Option<ClipId>,
    history: History,
    config: EngineConfig,
}

impl EditSession {
    pub fn new(timeline: Timeline, settings: ProjectSettings, config: EngineConfig) -> Self {
        let mut viewport = Viewport::new(config.coordinates.clone());
        settings.apply_to(&mut viewport);

        Self {
            timeline,
            settings,
            viewport,
            marks: Marks::new(),
            clipboard: None,
            selected: None,
            history: History::new(config.edit.history_depth),
            config,
        }
    }

    /// Open a loaded file.
    pub fn from_file(file: TimelineFile, config: EngineConfig) -> Self {
        Self::new(file.timeline, file.settings, config)
    }

    /// Snapshot the committed timeline for saving.
    pub fn to_file(&self) -> TimelineFile {
        TimelineFile::new(self.timeline.clone(), self.settings.clone())
    }

    // ── State ───────────────────────────────────────────────────

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport, for resizing and other host-driven changes.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    pub fn clipboard(&self) -> Option<&SelectionBuffer> {
        self.clipboard.as_ref()
    }

    pub fn selected_clip(&self) -> Option<&ClipId> {
        self.selected.as_ref()
    }

    /// Select a clip; ids not on the timeline clear the selection.
    pub fn select_clip(&mut self, id: Option<ClipId>) {
        self.selected = id.filter(|id| self.timeline.clip_by_id(id).is_some());
    }

    pub fn current_time(&self) -> Seconds {
        self.viewport.current_time()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Transport and view ──────────────────────────────────────

    pub fn seek(&mut self, time: Seconds) {
        self.viewport.seek(time);
    }

    /// Set the zoom level; returns the scroll offset that keeps the playhead
    /// in place.
    pub fn zoom(&mut self, zoom: f64) -> f64 {
        self.viewport.set_zoom(zoom)
    }

    /// Width of the scrollable timeline area in pixels.
    pub fn content_width(&self) -> f64 {
        self.viewport.content_width(self.timeline.max_clip_end())
    }

    pub fn ruler_ticks(&self) -> Vec<RulerTick> {
        generate_ticks(&self.viewport)
    }

    pub fn current_timecode(&self) -> String {
        self.viewport.current_timecode()
    }

    // ── Marks and clipboard ─────────────────────────────────────

    pub fn mark_in(&mut self) {
        let time = self.current_time();
        self.marks = self.marks.set_in(time);
        debug!(time, "IN point set");
    }

    pub fn mark_out(&mut self) {
        let time = self.current_time();
        self.marks = self.marks.set_out(time);
        debug!(time, "OUT point set");
    }

    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Copy the marked range into the clipboard. Returns the number of clips
    /// captured.
    pub fn copy(&mut self) -> Result<usize, EditError> {
        let buffer = copy_selection(&self.marks, &self.timeline.clips)?;
        let count = buffer.clips.len();
        self.clipboard = Some(buffer);
        Ok(count)
    }

    fn clipboard_contents(&self) -> Result<&SelectionBuffer, EditError> {
        match &self.clipboard {
            Some(buffer) if !buffer.is_empty() => Ok(buffer),
            _ => {
                warn!("Paste with empty clipboard");
                Err(EditError::EmptyBuffer)
            }
        }
    }

    /// Paste at the playhead, replacing what is there.
    pub fn paste_overwrite(&mut self) -> Result<(), EditError> {
        let buffer = self.clipboard_contents()?;
        let clips = edit::paste_overwrite(buffer, self.current_time(), &self.timeline.clips);
        self.commit_clips(clips, "paste overwrite")
    }

    /// Paste at the playhead, pushing later clips right.
    ///
    /// Clips starting before the playhead stay put, so a paste into the
    /// middle of a clip is rejected as a collision. Cut at the playhead first.
    pub fn paste_insert(&mut self) -> Result<(), EditError> {
        let buffer = self.clipboard_contents()?;
        let clips = edit::paste_insert(buffer, self.current_time(), &self.timeline.clips);
        self.commit_clips(clips, "paste insert")
    }

    // ── Edits ───────────────────────────────────────────────────

    /// Ripple delete the marked range, optionally on some tracks only.
    pub fn ripple_delete(&mut self, track_filter: Option<&[TrackId]>) -> Result<(), EditError> {
        let Some((in_point, out_point)) = self.marks.range() else {
            warn!("Ripple delete without IN/OUT points");
            return Err(EditError::NoSelection);
        };
        let clips = edit::ripple_delete(in_point, out_point, &self.timeline.clips, track_filter);
        self.commit_clips(clips, "ripple delete")
    }

    /// Ripple delete the selected clip.
    pub fn ripple_delete_selected(&mut self) -> Result<(), EditError> {
        let id = self.selected.clone().ok_or(EditError::NoSelection)?;
        if self.timeline.clip_by_id(&id).is_none() {
            return Err(EditError::ClipNotFound(id));
        }
        let clips = edit::ripple_delete_clip(&id, &self.timeline.clips);
        self.commit_clips(clips, "ripple delete clip")
    }

    /// Cut clips under the playhead. With `selected_only`, only the selected
    /// clip is cut. Returns the number of clips cut.
    pub fn razor_at_playhead(&mut self, selected_only: bool) -> Result<usize, EditError> {
        let time = self.current_time();
        let selection: Option<Vec<ClipId>> = if selected_only {
            Some(self.selected.iter().cloned().collect())
        } else {
            None
        };

        let before = self.timeline.clips.len();
        let clips = edit::razor_cut(time, &self.timeline.clips, selection.as_deref());
        let cut = clips.len() - before;
        if cut == 0 {
            warn!(time, "Razor cut with no clip under playhead");
            return Err(EditError::InvalidRazorTarget { time });
        }

        self.commit_clips(clips, "razor cut")?;
        Ok(cut)
    }

    /// Move a clip, validating first.
    pub fn move_clip(
        &mut self,
        id: &ClipId,
        new_time: Seconds,
        new_track: &TrackId,
        mode: MoveMode,
    ) -> Result<MoveOutcome, EditError> {
        let clip = self.clip(id)?;
        let outcome = collision::validate_move_with_mode(
            clip,
            new_time,
            new_track,
            &self.timeline.clips,
            &self.timeline.tracks,
            mode,
        )
        .map_err(|e| {
            warn!(clip = %id, reason = e.code(), "Move rejected: {}", e);
            e
        })?;

        let clips = match outcome.mode {
            MoveMode::Insert => collision::apply_move(id, new_time, new_track, &self.timeline.clips),
            MoveMode::Overwrite => collision::apply_overwrite_move(
                id,
                new_time,
                new_track,
                &outcome,
                &self.timeline.clips,
            ),
        };
        self.commit_clips(clips, "move clip")?;
        Ok(outcome)
    }

    /// Drop a clip onto `track` at `insert_time`, rippling clips out of the
    /// way as needed.
    pub fn insert_clip(&mut self, clip: Clip, insert_time: Seconds, track: &TrackId) -> Result<(), EditError> {
        // overwrite mode: the plan ripples colliding clips out of the way
        collision::validate_move_with_mode(
            &clip,
            insert_time,
            track,
            &self.timeline.clips,
            &self.timeline.tracks,
            MoveMode::Overwrite,
        )
        .map_err(|e| {
            warn!(clip = %clip.id, reason = e.code(), "Insert rejected: {}", e);
            e
        })?;

        let plan = edit::find_insert_point(&clip, insert_time, track, &self.timeline.clips);
        let clips = edit::apply_insert_plan(&clip, track, &plan, &self.timeline.clips);
        self.commit_clips(clips, "insert clip")
    }

    /// Trim one edge of a clip. The trimmed clip must still be a legal
    /// placement.
    pub fn trim_clip(&mut self, id: &ClipId, edge: TrimEdge, delta: Seconds) -> Result<Clip, EditError> {
        let clip = self.clip(id)?;
        let trimmed = edit::trim(clip, edge, delta, self.config.edit.min_trim_duration);

        collision::validate_move(
            &trimmed,
            trimmed.start_time,
            &trimmed.track,
            &self.timeline.clips,
            &self.timeline.tracks,
        )
        .map_err(|e| {
            warn!(clip = %id, reason = e.code(), "Trim rejected: {}", e);
            e
        })?;

        let next = self.timeline.replace_clip(trimmed.clone());
        self.commit(next, "trim clip");
        Ok(trimmed)
    }

    /// Snap and validation feedback for dragging `id` to `current_time` on
    /// `track`. Nothing is committed.
    pub fn drag_preview(
        &self,
        id: &ClipId,
        current_time: Seconds,
        track: &TrackId,
    ) -> Result<DragFeedback, EditError> {
        let clip = self.clip(id)?;
        let clips = &self.timeline.clips;

        // snap against the track the clip is being dragged over
        let hovering = clip.moved_to(track, current_time);
        let snap = snap::snap_drag(&hovering, clips, current_time, &self.config.snap);
        let magnetic = if self.config.snap.enabled {
            snap::magnetic_suggestion(&hovering, current_time, clips, self.config.snap.magnetic_range)
        } else {
            None
        };
        let time = snap.as_ref().map_or(current_time, |s| s.new_time);

        let validation = collision::validate_move(clip, time, track, clips, &self.timeline.tracks);

        Ok(DragFeedback {
            snap,
            magnetic,
            time,
            validation,
        })
    }

    /// Move the playhead to the next or previous edit point. Returns the new
    /// time, or `None` when there is nowhere to go.
    pub fn jump(&mut self, direction: Direction) -> Option<Seconds> {
        let target = navigation::jump_to_clip(
            direction,
            self.current_time(),
            &self.timeline.clips,
            self.config.edit.navigation_epsilon,
        )?;
        self.viewport.seek(target.time);
        self.selected = target.selected;
        debug!(time = target.time, ?direction, "Jumped to edit point");
        Some(target.time)
    }

    // ── Tracks ──────────────────────────────────────────────────

    pub fn add_track(&mut self, kind: TrackKind) -> TrackId {
        let (next, id) = self.timeline.add_track(kind);
        self.commit(next, "add track");
        id
    }

    /// Remove a track and its clips. Returns `false` for unknown tracks.
    pub fn remove_track(&mut self, id: &TrackId) -> bool {
        if self.timeline.track_by_id(id).is_none() {
            return false;
        }
        let next = self.timeline.remove_track(id);
        self.commit(next, "remove track");
        true
    }

    pub fn set_track_locked(&mut self, id: &TrackId, locked: bool) {
        let next = self.timeline.set_track_locked(id, locked);
        self.commit(next, "lock track");
    }

    // ── History ─────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.timeline.clone()) {
            Some(previous) => {
                self.restore(previous);
                debug!("Undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.timeline.clone()) {
            Some(next) => {
                self.restore(next);
                debug!("Redo");
                true
            }
            None => false,
        }
    }

    // ── Internals ───────────────────────────────────────────────

    fn clip(&self, id: &ClipId) -> Result<&Clip, EditError> {
        self.timeline
            .clip_by_id(id)
            .ok_or_else(|| EditError::ClipNotFound(id.clone()))
    }

    /// Commit an edited clip set, refusing one with overlaps.
    fn commit_clips(&mut self, clips: Vec<Clip>, action: &str) -> Result<(), EditError> {
        collision::ensure_no_overlaps(&clips).map_err(|e| {
            warn!(action, reason = e.code(), "Edit rejected: {}", e);
            e
        })?;
        let next = self.timeline.with_clips(clips);
        self.commit(next, action);
        Ok(())
    }

    /// Replace the timeline, recording the old one for undo. Unchanged
    /// results are not recorded.
    fn commit(&mut self, next: Timeline, action: &str) {
        if next == self.timeline {
            debug!(action, "Edit had no effect");
            return;
        }
        let previous = std::mem::replace(&mut self.timeline, next);
        self.history.push(previous);
        self.drop_stale_selection();
        info!(action, clips = self.timeline.clips.len(), "Committed edit");
    }

    fn restore(&mut self, timeline: Timeline) {
        self.timeline = timeline;
        self.drop_stale_selection();
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.timeline.clip_by_id(id).is_none() {
                self.selected = None;
            }
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(
            Timeline::with_default_tracks(),
            ProjectSettings::default(),
            EngineConfig::default(),
        )
    }
}
