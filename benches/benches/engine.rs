// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use hashbrown::HashMap;
use kurbo::Vec2;
use unveil::motion::{RevealConfig, StaggerIndex};
use unveil::{EngineConfig, HostEvent, Page, RevealEngine};

const LEFT: u32 = u32::MAX - 1;
const RIGHT: u32 = u32::MAX;

/// A home page with curtains and `n` fade-in sections.
fn build_home(n: u32) -> RevealEngine<u32> {
    let mut engine = RevealEngine::new(EngineConfig::default());
    let profile = Page::Home.profile();
    let setup = profile.install(&mut engine, 1440.0);
    if let Some(curtains) = profile.curtains {
        let _ = engine.bind_curtains(LEFT, RIGHT, curtains.range, curtains.max_translate);
    }
    for key in 0..n {
        let _ = engine.observe_element(key, setup.sections, StaggerIndex(0));
    }
    engine
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("unveil_engine");
    group.sample_size(50);

    for &n in &[64_u32, 1_024_u32] {
        group.bench_function(format!("scroll_frame(n={n})"), |b| {
            let mut engine = build_home(n);
            let mut transforms: HashMap<u32, Vec2> = HashMap::new();
            engine.flush(&mut transforms);
            let mut offset = 0.0;
            b.iter(|| {
                offset = (offset + 13.0) % 3000.0;
                engine.push(HostEvent::Scroll {
                    offset_y: offset,
                    reference_height: Some(1000.0),
                });
                black_box(engine.flush(&mut transforms))
            });
        });

        group.bench_function(format!("reveal_all(n={n})"), |b| {
            b.iter_batched(
                || {
                    let mut engine = build_home(n);
                    engine.flush(&mut HashMap::<u32, Vec2>::new());
                    engine
                },
                |mut engine| {
                    for key in 0..n {
                        engine.push(HostEvent::Intersection { key, fraction: 0.5 });
                    }
                    black_box(engine.flush(&mut HashMap::<u32, Vec2>::new()))
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("resize_recompute(n={n})"), |b| {
            let mut engine = RevealEngine::new(EngineConfig::default());
            engine.observe_viewport(768.0, 1440.0);
            let slide = engine.register_animator(RevealConfig::slide_in_x(-300.0));
            for key in 0..n {
                let _ = engine.observe_element(key, slide, StaggerIndex(0));
            }
            let mut transforms: HashMap<u32, Vec2> = HashMap::new();
            engine.flush(&mut transforms);
            let mut compact = false;
            b.iter(|| {
                compact = !compact;
                let width = if compact { 390.0 } else { 1440.0 };
                engine.push(HostEvent::Resize { width });
                black_box(engine.flush(&mut transforms))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
