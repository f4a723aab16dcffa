// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
use criterion::{criterion_group, criterion_main, Criterion};
use gizmo_geom::{Shape, Vector2};
use gizmo_physics::collision::{detect, sat, solve_manifold};
use std::hint::black_box;

fn bench_narrow_phase(c: &mut Criterion) {
    let ball = Shape::circle(0.2).expect("circle").at(Vector2::new(0.3, 0.65));
    let square = Shape::rectangle(1.0, 1.0).expect("square");
    let wedge = Shape::quarter_circle(0.75).expect("wedge").rotated(0.4);
    let rotated = Shape::rectangle(2.0, 0.25).expect("flipper").rotated(0.5).at(Vector2::new(0.2, 0.3));

    let mut group = c.benchmark_group("narrow_phase");
    group.bench_function("sat_circle_polygon", |b| {
        b.iter(|| black_box(sat(black_box(&ball), black_box(&square))));
    });
    group.bench_function("sat_polygon_polygon", |b| {
        b.iter(|| black_box(sat(black_box(&rotated), black_box(&square))));
    });
    group.bench_function("detect_circle_quarter_circle", |b| {
        b.iter(|| black_box(detect(black_box(&ball), black_box(&wedge)).map(|d| d.penetration)));
    });
    group.bench_function("detect_and_manifold", |b| {
        b.iter(|| {
            let d = detect(black_box(&ball), black_box(&square)).expect("overlap");
            black_box(solve_manifold(&d.penetration, &d.proxy_a, &d.proxy_b))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_narrow_phase);
criterion_main!(benches);
