//! Property tests for the editing engine's invariants.

use maestro_core::{EngineConfig, ProjectSettings};
use maestro_timeline::{
    apply_insert_plan, collect_snap_points, copy_selection, find_insert_point, find_overlaps,
    find_snap, jump_to_clip, paste_insert, ripple_delete, ripple_delete_clip, trim, Clip, ClipId,
    Direction, EditSession, Marks, MediaRef, MoveMode, Timeline, TrackId, TrackKind, TrimEdge,
};
use proptest::prelude::*;

/// Clips laid out on `track` from `(gap, duration)` pairs.
fn lay_out(track: &str, spans: &[(f64, f64)]) -> Vec<Clip> {
    let mut cursor = 0.0;
    spans
        .iter()
        .enumerate()
        .map(|(i, &(gap, duration))| {
            let start = cursor + gap;
            cursor = start + duration;
            Clip::new(
                format!("{track}-{i}"),
                TrackId::from(track),
                MediaRef::new("prop.mov"),
                start,
                duration,
            )
            .with_id(format!("{track}-{i}").as_str())
        })
        .collect()
}

fn spans(max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0f64..4.0, 0.5f64..8.0), 1..max)
}

#[derive(Debug, Clone)]
enum Gesture {
    Move {
        clip: usize,
        time: f64,
        track: usize,
        overwrite: bool,
    },
    Trim {
        clip: usize,
        end: bool,
        delta: f64,
    },
    Razor {
        time: f64,
    },
    Copy {
        from: f64,
        to: f64,
    },
    Paste {
        time: f64,
        insert: bool,
    },
    Insert {
        time: f64,
        track: usize,
        duration: f64,
    },
    Undo,
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (0usize..16, -5.0f64..60.0, 0usize..3, any::<bool>()).prop_map(
            |(clip, time, track, overwrite)| Gesture::Move {
                clip,
                time,
                track,
                overwrite,
            }
        ),
        (0usize..16, any::<bool>(), -6.0f64..6.0)
            .prop_map(|(clip, end, delta)| Gesture::Trim { clip, end, delta }),
        (0.0f64..60.0).prop_map(|time| Gesture::Razor { time }),
        // marks may come out reversed
        (0.0f64..60.0, 0.0f64..60.0).prop_map(|(from, to)| Gesture::Copy { from, to }),
        (0.0f64..60.0, any::<bool>()).prop_map(|(time, insert)| Gesture::Paste { time, insert }),
        (-5.0f64..60.0, 0usize..3, 0.5f64..6.0)
            .prop_map(|(time, track, duration)| Gesture::Insert { time, track, duration }),
        Just(Gesture::Undo),
    ]
}

proptest! {
    /// No two clips on a track overlap after any sequence of committed edits.
    #[test]
    fn prop_no_overlap_after_edits(
        v1 in spans(6),
        v2 in spans(6),
        gestures in prop::collection::vec(gesture(), 1..40),
    ) {
        let (timeline, _) = Timeline::with_default_tracks().add_track(TrackKind::Video);
        let mut clips = lay_out("v1", &v1);
        clips.extend(lay_out("v2", &v2));
        let mut s = EditSession::new(
            timeline.with_clips(clips),
            ProjectSettings::default(),
            EngineConfig::default(),
        );
        prop_assert!(!s.timeline().has_overlaps());

        for g in gestures {
            let ids: Vec<ClipId> = s.timeline().clips.iter().map(|c| c.id.clone()).collect();
            let tracks: Vec<TrackId> = s.timeline().tracks.iter().map(|t| t.id.clone()).collect();
            match g {
                Gesture::Move { clip, time, track, overwrite } => {
                    if ids.is_empty() {
                        continue;
                    }
                    let mode = if overwrite { MoveMode::Overwrite } else { MoveMode::Insert };
                    let _ = s.move_clip(&ids[clip % ids.len()], time, &tracks[track % tracks.len()], mode);
                }
                Gesture::Trim { clip, end, delta } => {
                    if ids.is_empty() {
                        continue;
                    }
                    let edge = if end { TrimEdge::End } else { TrimEdge::Start };
                    let _ = s.trim_clip(&ids[clip % ids.len()], edge, delta);
                }
                Gesture::Razor { time } => {
                    s.seek(time);
                    let _ = s.razor_at_playhead(false);
                }
                Gesture::Copy { from, to } => {
                    s.seek(from);
                    s.mark_in();
                    s.seek(to);
                    s.mark_out();
                    let _ = s.copy();
                }
                Gesture::Paste { time, insert } => {
                    s.seek(time);
                    let _ = if insert { s.paste_insert() } else { s.paste_overwrite() };
                }
                Gesture::Insert { time, track, duration } => {
                    let target = &tracks[track % tracks.len()];
                    let incoming = Clip::new(
                        "dropped",
                        target.clone(),
                        MediaRef::new("drop.mov"),
                        0.0,
                        duration,
                    );
                    let _ = s.insert_clip(incoming, time, target);
                }
                Gesture::Undo => {
                    s.undo();
                }
            }
            prop_assert!(!s.timeline().has_overlaps());
            prop_assert!(s.timeline().clips.iter().all(|c| c.start_time >= 0.0 && c.duration > 0.0));
        }
    }

    /// A snap is only reported strictly inside the threshold.
    #[test]
    fn prop_snap_distance_below_threshold(
        layout in spans(10),
        pick in any::<prop::sample::Index>(),
        time in 0.0f64..100.0,
        threshold in 0.05f64..2.0,
    ) {
        let clips = lay_out("v1", &layout);
        let dragged = &clips[pick.index(clips.len())];
        let points = collect_snap_points(dragged, &clips);
        if let Some(snap) = find_snap(dragged, &points, time, threshold) {
            prop_assert!(snap.distance < threshold);
            prop_assert!(snap.strength > 0.0 && snap.strength <= 1.0);
        }
    }

    /// Trims never shrink a clip below the minimum duration.
    #[test]
    fn prop_trim_floor(
        in_point in 0.0f64..20.0,
        length in 0.1f64..30.0,
        delta in -50.0f64..50.0,
        end in any::<bool>(),
    ) {
        let clip = Clip::new("c", TrackId::from("v1"), MediaRef::new("p.mov"), 10.0, length)
            .with_source(in_point, in_point + length);
        let edge = if end { TrimEdge::End } else { TrimEdge::Start };
        let trimmed = trim(&clip, edge, delta, 0.1);
        prop_assert!(trimmed.duration >= 0.1 - 1e-9);
        prop_assert!(trimmed.in_point >= 0.0);
        prop_assert!(trimmed.is_consistent(1e-9));
    }

    /// Ripple deleting a clip and inserting it back restores the other
    /// clips' positions.
    #[test]
    fn prop_ripple_delete_then_reinsert(
        durations in prop::collection::vec(0.5f64..8.0, 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let layout: Vec<(f64, f64)> = durations.iter().map(|&d| (0.0, d)).collect();
        let clips = lay_out("v1", &layout);
        let removed = clips[pick.index(clips.len())].clone();
        let v1 = TrackId::from("v1");

        let after_delete = ripple_delete_clip(&removed.id, &clips);
        let plan = find_insert_point(&removed, removed.start_time, &v1, &after_delete);
        let restored = apply_insert_plan(&removed, &v1, &plan, &after_delete);

        for original in &clips {
            let back = restored.iter().find(|c| c.id == original.id);
            prop_assert!(back.is_some());
            if let Some(back) = back {
                prop_assert!((back.start_time - original.start_time).abs() < 1e-9);
            }
        }
    }

    /// Ripple deleting `[t, t + d)` and paste-inserting that range back at
    /// `t` restores every clip outside the range.
    #[test]
    fn prop_ripple_delete_range_then_paste_insert(
        layout in spans(10),
        pick in any::<prop::sample::Index>(),
        offset in 0.0f64..0.9,
        length in 0.1f64..10.0,
    ) {
        let clips = lay_out("v1", &layout);
        let anchor = &clips[pick.index(clips.len())];
        let t = anchor.start_time + offset * anchor.duration;
        let d = length;

        let marks = Marks::new().set_in(t).set_out(t + d);
        let buffer = copy_selection(&marks, &clips);
        prop_assert!(buffer.is_ok());
        let Ok(buffer) = buffer else { return Ok(()) };
        prop_assert!(!buffer.is_empty());

        let deleted = ripple_delete(t, t + d, &clips, None);
        let restored = paste_insert(&buffer, t, &deleted);
        prop_assert!(find_overlaps(&restored).is_empty());

        for original in clips.iter().filter(|c| c.end_time() <= t || c.start_time >= t + d) {
            let back = restored.iter().find(|c| c.id == original.id);
            prop_assert!(back.is_some());
            if let Some(back) = back {
                prop_assert!((back.start_time - original.start_time).abs() < 1e-9);
            }
        }
    }

    /// Navigation always moves forward for Next and backward for Prev.
    #[test]
    fn prop_navigation_direction(layout in spans(8), current in 0.0f64..80.0) {
        let clips = lay_out("v1", &layout);
        if let Some(next) = jump_to_clip(Direction::Next, current, &clips, 0.01) {
            prop_assert!(next.time > current + 0.01);
        }
        let prev = jump_to_clip(Direction::Prev, current, &clips, 0.01);
        prop_assert!(prev.is_some());
        if let Some(prev) = prev {
            prop_assert!(prev.time < current - 0.01 || prev.time == 0.0);
        }
    }
}
