// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use gizmo_benches::board_with_balls;
use gizmo_physics::FlipperSide;
use std::{hint::black_box, time::Duration};

fn bench_world_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_tick");
    group.sample_size(30);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));
    for &n in &[1usize, 10, 50, 200] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut world = board_with_balls(n).expect("board");
                    world.flipper_up(FlipperSide::Left);
                    world
                },
                |mut world| {
                    // Ten ticks so balls reach the bumpers and contacts form.
                    for _ in 0..10 {
                        black_box(world.tick().expect("tick"));
                    }
                    black_box(world);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_world_tick);
criterion_main!(benches);
