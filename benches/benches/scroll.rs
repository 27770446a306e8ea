// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hashbrown::HashMap;
use kurbo::Vec2;
use unveil_scroll::{
    Axis, ScrollBinding, ScrollBindings, ScrollCoalescer, ScrollConfig, ScrollRange,
    ScrollTracker,
};

fn build_bindings(n: u32) -> ScrollBindings<u32> {
    let mut bindings = ScrollBindings::new();
    for target in 0..n {
        let start = f64::from(target) * 10.0;
        let binding = ScrollBinding::new(ScrollRange::new(start, start + 1500.0), 500.0, Axis::Y);
        bindings.bind(target, binding);
    }
    bindings
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("unveil_scroll");

    group.bench_function("tracker_on_scroll(2000 events)", |b| {
        let mut tracker = ScrollTracker::new(ScrollConfig::default());
        b.iter(|| {
            for offset in 0..2_000_u32 {
                black_box(tracker.on_scroll(f64::from(offset), Some(1000.0)));
            }
        });
    });

    group.bench_function("coalesce(120 events/frame)", |b| {
        let mut coalescer = ScrollCoalescer::new();
        b.iter(|| {
            for offset in 0..120_u32 {
                coalescer.push(f64::from(offset), None);
            }
            black_box(coalescer.take())
        });
    });

    for &n in &[2_u32, 256_u32] {
        group.bench_function(format!("bindings_apply_changed(n={n})"), |b| {
            let mut bindings = build_bindings(n);
            let mut transforms: HashMap<u32, Vec2> = HashMap::new();
            let mut offset = 0.0;
            b.iter(|| {
                offset = (offset + 7.0) % 4000.0;
                black_box(bindings.apply(offset, &mut transforms))
            });
        });

        group.bench_function(format!("bindings_apply_unchanged(n={n})"), |b| {
            let mut bindings = build_bindings(n);
            let mut transforms: HashMap<u32, Vec2> = HashMap::new();
            bindings.apply(750.0, &mut transforms);
            b.iter(|| black_box(bindings.apply(black_box(750.0), &mut transforms)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scroll);
criterion_main!(benches);
