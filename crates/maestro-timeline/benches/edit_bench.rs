//! Benchmarks for maestro-timeline editing operations.
//!
//! Run with: cargo bench -p maestro-timeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maestro_timeline::{
    collect_snap_points, find_snap, ripple_delete, validate_move, Clip, MediaRef, SnapEngine,
    Timeline, TrackId, TrackKind,
};

/// A timeline with `per_track` back-to-back clips on each of four tracks.
fn dense_timeline(per_track: usize) -> Timeline {
    let (mut timeline, _) = Timeline::with_default_tracks().add_track(TrackKind::Video);
    (timeline, _) = timeline.add_track(TrackKind::Audio);

    let track_ids: Vec<TrackId> = timeline.tracks.iter().map(|t| t.id.clone()).collect();
    for track in &track_ids {
        for i in 0..per_track {
            let clip = Clip::new(
                format!("{track}-{i}"),
                track.clone(),
                MediaRef::new("bench.mov"),
                i as f64 * 4.0,
                3.5,
            );
            timeline = timeline.push_clip(clip);
        }
    }
    timeline
}

fn bench_snap(c: &mut Criterion) {
    let timeline = dense_timeline(250);
    let dragged = timeline.clips[125].clone();

    c.bench_function("snap_collect_and_find_1000", |bencher| {
        bencher.iter(|| {
            let points = collect_snap_points(black_box(&dragged), black_box(&timeline.clips));
            find_snap(&dragged, &points, black_box(301.9), 0.5)
        });
    });

    let mut engine = SnapEngine::new(0.2);
    engine.register_clips(&timeline.clips);
    c.bench_function("snap_engine_find_1000", |bencher| {
        bencher.iter(|| engine.find_snap(black_box(501.45), Some(&dragged.id)));
    });
}

fn bench_validate_move(c: &mut Criterion) {
    let timeline = dense_timeline(250);
    let clip = timeline.clips[10].clone();
    let target = TrackId::from("v1");

    c.bench_function("validate_move_1000", |bencher| {
        bencher.iter(|| {
            validate_move(
                black_box(&clip),
                black_box(2000.0),
                &target,
                &timeline.clips,
                &timeline.tracks,
            )
        });
    });
}

fn bench_ripple_delete(c: &mut Criterion) {
    let timeline = dense_timeline(250);

    c.bench_function("ripple_delete_1000", |bencher| {
        bencher.iter(|| ripple_delete(black_box(100.0), black_box(180.0), &timeline.clips, None));
    });
}

criterion_group!(benches, bench_snap, bench_validate_move, bench_ripple_delete);
criterion_main!(benches);
