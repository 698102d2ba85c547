//! Maestro Timeline - timeline editing engine
//!
//! Implements the editing model of a multi-track timeline:
//! - Tracks and clips, with a no-overlap invariant per track
//! - Move validation and collision detection
//! - Snapping while dragging
//! - Trim, razor cut, ripple delete, copy/paste and insert edits
//! - Edit-point navigation, snapshot undo/redo and an editing session
//! - Versioned timeline files

pub mod clip;
pub mod collision;
pub mod edit;
pub mod history;
pub mod navigation;
pub mod selection;
pub mod serialization;
pub mod session;
pub mod snap;
pub mod timeline;
pub mod track;

pub use clip::{Clip, ClipId, MediaMetadata, MediaRef};
pub use collision::{
    apply_move, apply_overwrite_move, ensure_no_overlaps, find_overlaps, overlaps, validate_move,
    validate_move_with_mode, AffectedClips, MoveError, MoveMode, MoveOutcome,
};
pub use edit::{
    apply_insert_plan, find_insert_point, paste_insert, paste_overwrite, razor_cut,
    ripple_delete, ripple_delete_clip, trim, EditError, InsertPlan, TrimEdge,
};
pub use history::History;
pub use navigation::{edit_points, jump_to_clip, Direction, JumpTarget};
pub use selection::{copy_selection, BufferedClip, Marks, SelectionBuffer};
pub use serialization::{TimelineFile, CURRENT_VERSION};
pub use session::{DragFeedback, EditSession};
pub use snap::{
    collect_snap_points, find_snap, magnetic_suggestion, snap_drag, Alignment, EngineSnap,
    MagneticSuggestion, Snap, SnapEdge, SnapEngine, SnapKind, SnapPoint,
};
pub use timeline::Timeline;
pub use track::{Track, TrackId, TrackKind};
