// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the notice stack event loop.
//!
//! Measures the performance of:
//! - Showing a burst of notices past the visible cap
//! - Ticking a full stack at frame rate
//! - Closing notices from the middle of a full stack (reflow)

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use notice_stack::stack::{Coordinator, FixedWorkArea, NoticeKind, Rect, StackSettings};
use std::hint::black_box;
use std::time::{Duration, Instant};

const AREA: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);
const FRAME: Duration = Duration::from_millis(16);

fn coordinator() -> Coordinator<FixedWorkArea> {
    Coordinator::with_settings(FixedWorkArea(AREA), StackSettings::default())
}

/// Benchmark show requests, including the queued overflow.
fn bench_show_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("notice_churn");

    for count in [5_usize, 15, 40] {
        group.bench_with_input(BenchmarkId::new("show_burst", count), &count, |b, &count| {
            b.iter(|| {
                let start = Instant::now();
                let mut stack = coordinator();
                for i in 0..count {
                    stack.show(format!("notice {}", i), NoticeKind::Info, Duration::ZERO, start);
                }
                black_box(stack.len());
            });
        });
    }

    group.finish();
}

/// Benchmark one animation frame over a full stack mid-entry.
fn bench_tick_full_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("notice_churn");

    let start = Instant::now();
    let full_stack = || {
        let mut stack = coordinator();
        for i in 0..15 {
            stack.warning(format!("notice {}", i), start);
        }
        stack
    };

    group.bench_function("tick_entering", |b| {
        b.iter_batched(
            full_stack,
            |mut stack| {
                stack.tick(black_box(start + FRAME * 10));
                black_box(stack.is_animating(start + FRAME * 10));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark closing a middle notice and letting the survivors settle.
fn bench_close_and_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("notice_churn");

    group.bench_function("close_middle_and_settle", |b| {
        b.iter(|| {
            let start = Instant::now();
            let mut stack = coordinator();
            let ids: Vec<_> = (0..15).map(|i| stack.error(format!("{}", i), start)).collect();
            let mut now = start + Duration::from_secs(1);
            stack.tick(now);

            stack.close(ids[7], now);
            for _ in 0..40 {
                now += FRAME;
                stack.tick(now);
            }
            black_box(stack.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_show_burst,
    bench_tick_full_stack,
    bench_close_and_reflow
);
criterion_main!(benches);
