// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use unveil_trigger::{TriggerOptions, VisibilityTrigger, visible_fraction};

const ELEMENT_HEIGHT: f64 = 400.0;
const SPACING: f64 = 600.0;
const VIEWPORT_HEIGHT: f64 = 800.0;

fn element_bounds(index: u32) -> Rect {
    let top = f64::from(index) * SPACING;
    Rect::new(0.0, top, 1200.0, top + ELEMENT_HEIGHT)
}

fn build_trigger(n: u32, once: bool) -> VisibilityTrigger<u32> {
    let mut trigger = VisibilityTrigger::new();
    let options = TriggerOptions::once(0.1).with_once(once);
    for key in 0..n {
        trigger.observe(key, options);
    }
    trigger
}

/// Scrolls a column of `n` elements from top to bottom in `steps` frames.
fn scroll_through(trigger: &mut VisibilityTrigger<u32>, n: u32, steps: u32) -> usize {
    let page_height = f64::from(n) * SPACING;
    let mut events = 0;
    for step in 0..=steps {
        let offset = page_height * f64::from(step) / f64::from(steps);
        let viewport = Rect::new(0.0, offset, 1200.0, offset + VIEWPORT_HEIGHT);
        for key in 0..n {
            let fraction = visible_fraction(element_bounds(key), viewport);
            if trigger.update(&key, fraction).is_some() {
                events += 1;
            }
        }
    }
    events
}

fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("unveil_trigger");
    group.sample_size(50);

    for &n in &[64_u32, 1_024_u32] {
        for once in [true, false] {
            let mode = if once { "once" } else { "repeating" };
            group.bench_function(format!("scroll_through(n={n},{mode})"), |b| {
                b.iter_batched(
                    || build_trigger(n, once),
                    |mut trigger| black_box(scroll_through(&mut trigger, n, 200)),
                    BatchSize::LargeInput,
                );
            });
        }

        group.bench_function(format!("visible_fraction(n={n})"), |b| {
            let viewport = Rect::new(0.0, 1000.0, 1200.0, 1000.0 + VIEWPORT_HEIGHT);
            b.iter(|| {
                let sum: f64 = (0..n)
                    .map(|key| visible_fraction(element_bounds(key), black_box(viewport)))
                    .sum();
                black_box(sum);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_trigger);
criterion_main!(benches);
