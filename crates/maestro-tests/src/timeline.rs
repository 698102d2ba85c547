//! Integration tests for the timeline subsystem.
//!
//! Exercises cross-crate interactions between maestro-core and
//! maestro-timeline.

use maestro_core::{format_timecode, parse_timecode, EngineConfig, FrameRate, ProjectSettings, Timecode};
use maestro_timeline::{
    razor_cut, validate_move, Clip, ClipId, Direction, EditError, EditSession, MediaRef,
    MoveError, MoveMode, SnapEdge, Timeline, TimelineFile, TrackId, TrackKind, TrimEdge,
};

// ── Helpers ────────────────────────────────────────────────────

fn clip(id: &str, track: &str, start: f64, duration: f64) -> Clip {
    Clip::new(id, TrackId::from(track), MediaRef::new("media/test.mp4"), start, duration).with_id(id)
}

fn two_clip_timeline() -> Timeline {
    Timeline::with_default_tracks()
        .push_clip(clip("ClipA", "v1", 0.0, 5.0))
        .push_clip(clip("ClipB", "v1", 5.0, 3.0))
}

fn session(timeline: Timeline) -> EditSession {
    EditSession::new(timeline, ProjectSettings::default(), EngineConfig::default())
}

// ── Worked scenarios ───────────────────────────────────────────

#[test]
fn moving_onto_a_neighbour_collides() {
    let timeline = two_clip_timeline();
    let a = &timeline.clips[0];

    let err = validate_move(a, 4.0, &TrackId::from("v1"), &timeline.clips, &timeline.tracks)
        .unwrap_err();
    match err {
        MoveError::Collision { colliding, .. } => assert_eq!(colliding.id.as_str(), "ClipB"),
        other => panic!("expected collision, got {other:?}"),
    }
}

#[test]
fn dragging_end_near_neighbour_snaps_to_it() {
    let s = session(two_clip_timeline());
    let feedback = s
        .drag_preview(&ClipId::from("ClipA"), 0.3, &TrackId::from("v1"))
        .unwrap();

    let snap = feedback.snap.unwrap();
    assert_eq!(snap.time, 5.0);
    assert_eq!(snap.snap_to, SnapEdge::End);
    assert_eq!(snap.new_time, 0.0);
    assert_eq!(feedback.time, 0.0);
    assert!(feedback.validation.is_ok());
}

#[test]
fn razor_cut_splits_source_window() {
    let clips = vec![clip("clip1", "v1", 2.0, 6.0)];
    let cut = razor_cut(5.0, &clips, None);

    assert_eq!(cut.len(), 2);
    assert_eq!(cut[0].id.as_str(), "clip1_a");
    assert_eq!((cut[0].start_time, cut[0].duration), (2.0, 3.0));
    assert_eq!((cut[0].in_point, cut[0].out_point), (0.0, 3.0));
    assert_eq!(cut[1].id.as_str(), "clip1_b");
    assert_eq!((cut[1].start_time, cut[1].duration), (5.0, 3.0));
    assert_eq!((cut[1].in_point, cut[1].out_point), (3.0, 6.0));
}

#[test]
fn one_and_a_half_seconds_at_24fps() {
    assert_eq!(
        format_timecode(1.5, FrameRate::FPS_24, Timecode::ZERO),
        "00:00:01:12"
    );
    assert_eq!(parse_timecode("00:00:01:12", FrameRate::FPS_24).unwrap(), 1.5);
}

// ── Session workflows ──────────────────────────────────────────

#[test]
fn rough_cut_workflow() {
    let timeline = Timeline::with_default_tracks()
        .push_clip(clip("interview", "v1", 0.0, 20.0))
        .push_clip(clip("broll", "v1", 20.0, 10.0))
        .push_clip(clip("music", "a1", 0.0, 30.0));
    let mut s = session(timeline);

    // cut out 5..8 of the interview on video only
    s.seek(5.0);
    assert_eq!(s.razor_at_playhead(false), Ok(2));
    s.seek(8.0);
    s.select_clip(Some(ClipId::from("interview_b")));
    assert_eq!(s.razor_at_playhead(true), Ok(1));

    s.select_clip(Some(ClipId::from("interview_b_a")));
    s.ripple_delete_selected().unwrap();

    let t = s.timeline();
    assert!(!t.has_overlaps());
    assert_eq!(t.clip_by_id(&ClipId::from("interview_b_b")).unwrap().start_time, 5.0);
    assert_eq!(t.clip_by_id(&ClipId::from("broll")).unwrap().start_time, 17.0);
    assert_eq!(t.clip_by_id(&ClipId::from("music_b")).unwrap().start_time, 5.0);

    // undo everything back to the original cut
    while s.can_undo() {
        s.undo();
    }
    assert_eq!(s.timeline().clips.len(), 3);
    assert_eq!(s.timeline().clip_by_id(&ClipId::from("broll")).unwrap().start_time, 20.0);
}

#[test]
fn copy_range_and_paste_insert_at_end() {
    let mut s = session(two_clip_timeline());
    s.seek(1.0);
    s.mark_in();
    s.seek(6.0);
    s.mark_out();
    assert_eq!(s.copy(), Ok(2));

    s.seek(8.0);
    s.paste_insert().unwrap();

    let t = s.timeline();
    assert_eq!(t.clips.len(), 4);
    assert!(!t.has_overlaps());
    assert_eq!(t.max_clip_end(), 13.0);
}

#[test]
fn out_before_in_copies_nothing() {
    let mut s = session(two_clip_timeline());
    s.seek(7.0);
    s.mark_in();
    s.seek(3.0);
    s.mark_out();
    assert_eq!(s.copy(), Err(EditError::NoSelection));

    s.seek(20.0);
    assert_eq!(s.paste_overwrite(), Err(EditError::EmptyBuffer));
    assert!(s.timeline().clips.iter().all(|c| c.duration > 0.0));
    assert_eq!(s.timeline().clips.len(), 2);
}

#[test]
fn paste_insert_over_straddling_clip_needs_a_cut() {
    let timeline = Timeline::with_default_tracks().push_clip(clip("long", "v1", 0.0, 10.0));
    let mut s = session(timeline);
    s.mark_in();
    s.seek(2.0);
    s.mark_out();
    s.copy().unwrap();

    s.seek(5.0);
    assert!(matches!(
        s.paste_insert(),
        Err(EditError::Move(MoveError::Collision { .. }))
    ));
    assert!(!s.timeline().has_overlaps());
    assert_eq!(s.timeline().clips.len(), 1);
}

#[test]
fn ripple_delete_marked_range_on_one_track() {
    let timeline = two_clip_timeline().push_clip(clip("music", "a1", 6.0, 4.0));
    let mut s = session(timeline);
    s.seek(5.0);
    s.mark_in();
    s.seek(8.0);
    s.mark_out();

    s.ripple_delete(Some(&[TrackId::from("v1")])).unwrap();
    let t = s.timeline();
    assert!(t.clip_by_id(&ClipId::from("ClipB")).is_none());
    assert_eq!(t.clip_by_id(&ClipId::from("music")).unwrap().start_time, 6.0);
}

#[test]
fn trim_start_below_origin_is_rejected() {
    let timeline = Timeline::with_default_tracks()
        .push_clip(clip("c", "v1", 0.5, 4.0).with_source(2.0, 6.0));
    let mut s = session(timeline);

    // pulling the in point later slides the start earlier
    let err = s.trim_clip(&ClipId::from("c"), TrimEdge::Start, 1.0).unwrap_err();
    assert!(matches!(err, EditError::Move(MoveError::NegativeTime { .. })));

    let trimmed = s.trim_clip(&ClipId::from("c"), TrimEdge::Start, 0.25).unwrap();
    assert_eq!(trimmed.in_point, 2.25);
    assert_eq!(trimmed.start_time, 0.25);
}

#[test]
fn overwrite_move_replaces_target() {
    let mut s = session(two_clip_timeline());
    let outcome = s
        .move_clip(&ClipId::from("ClipB"), 1.0, &TrackId::from("v1"), MoveMode::Overwrite)
        .unwrap();
    assert_eq!(outcome.affected.len(), 1);
    assert_eq!(s.timeline().clips.len(), 1);
    assert!(!s.timeline().has_overlaps());
}

#[test]
fn navigation_walks_every_edit_point() {
    let timeline = two_clip_timeline().push_clip(clip("music", "a1", 2.0, 10.0));
    let mut s = session(timeline);

    let mut visited = Vec::new();
    while let Some(time) = s.jump(Direction::Next) {
        visited.push(time);
    }
    assert_eq!(visited, vec![2.0, 5.0, 8.0, 12.0]);

    assert_eq!(s.jump(Direction::Prev), Some(8.0));
    s.seek(1.0);
    assert_eq!(s.jump(Direction::Prev), Some(0.0));
    assert_eq!(s.selected_clip(), Some(&ClipId::from("ClipA")));
}

#[test]
fn added_tracks_accept_moves_of_matching_kind() {
    let mut s = session(two_clip_timeline());
    let v2 = s.add_track(TrackKind::Video);
    let a2 = s.add_track(TrackKind::Audio);

    let order: Vec<&str> = s.timeline().tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec!["v2", "v1", "a1", "a2"]);

    s.move_clip(&ClipId::from("ClipB"), 0.0, &v2, MoveMode::Insert).unwrap();
    let err = s
        .move_clip(&ClipId::from("ClipA"), 0.0, &a2, MoveMode::Insert)
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot move video clip to audio track");
}

// ── Persistence ────────────────────────────────────────────────

#[test]
fn edited_timeline_survives_file_roundtrip() {
    let settings = ProjectSettings {
        framerate: FrameRate::FPS_25,
        timecode_start: Timecode::new(1, 0, 0, 0),
        ..ProjectSettings::default()
    };
    let mut s = EditSession::new(two_clip_timeline(), settings, EngineConfig::default());
    s.seek(2.5);
    s.razor_at_playhead(false).unwrap();

    let data = s.to_file().to_json().unwrap();
    let reopened = EditSession::from_file(TimelineFile::from_json(&data).unwrap(), EngineConfig::default());

    assert_eq!(reopened.timeline(), s.timeline());
    assert_eq!(reopened.settings().framerate, FrameRate::FPS_25);
    assert_eq!(reopened.current_timecode(), "01:00:00:00");
}

#[test]
fn config_changes_snap_behaviour() {
    let config = EngineConfig::from_json(r#"{ "snap": { "enabled": false } }"#).unwrap();
    let s = EditSession::new(two_clip_timeline(), ProjectSettings::default(), config);
    let feedback = s
        .drag_preview(&ClipId::from("ClipA"), 0.3, &TrackId::from("v1"))
        .unwrap();
    assert!(feedback.snap.is_none());
    assert_eq!(feedback.time, 0.3);
}
