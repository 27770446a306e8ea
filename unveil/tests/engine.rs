// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end frames through [`RevealEngine`] with a simulated document.

use hashbrown::HashMap;
use kurbo::{Rect, Vec2};
use unveil::media::{MediaError, MediaHandle, NormalizeOutcome};
use unveil::motion::{RevealConfig, RevealPhase, StaggerIndex, split_words};
use unveil::scroll::{ScrollConfig, ScrollRange, TransformSink};
use unveil::{
    Capabilities, EngineConfig, HostEvent, Page, RevealCause, RevealEngine, RevealHost,
    RevealRecorder,
};

#[derive(Debug)]
struct Video {
    attached: bool,
    rate: f64,
    time: f64,
    seeks: u32,
}

impl Video {
    fn new() -> Self {
        Self {
            attached: true,
            rate: 1.0,
            time: 0.0,
            seeks: 0,
        }
    }
}

impl MediaHandle for Video {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError> {
        self.rate = rate;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
        self.time = seconds;
        self.seeks += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Document {
    transforms: HashMap<u32, Vec2>,
    videos: HashMap<u32, Video>,
}

impl TransformSink<u32> for Document {
    fn set_translate(&mut self, target: &u32, translate: Vec2) -> bool {
        self.transforms.insert(*target, translate);
        true
    }
}

impl RevealHost<u32> for Document {
    type Media = Video;

    fn media(&mut self, key: &u32) -> Option<&mut Video> {
        self.videos.get_mut(key)
    }
}

fn engine() -> RevealEngine<u32> {
    RevealEngine::new(EngineConfig::default())
}

fn scroll(offset_y: f64, reference_height: Option<f64>) -> HostEvent<u32> {
    HostEvent::Scroll {
        offset_y,
        reference_height,
    }
}

fn visible(key: u32, fraction: f64) -> HostEvent<u32> {
    HostEvent::Intersection { key, fraction }
}

#[test]
fn viewport_class_matches_width_after_each_resize() {
    for breakpoint in [320.0, 768.0, 1024.0] {
        let mut engine = engine();
        engine.observe_viewport(breakpoint, 1920.0);
        for width in [0.0, 319.0, 320.0, 500.0, 767.9, 768.0, 1023.0, 1200.0, 4000.0] {
            engine.push(HostEvent::Resize { width });
            engine.flush(&mut Document::default());
            assert_eq!(engine.viewport().is_compact, width < breakpoint);
        }
    }
}

#[test]
fn viewport_changes_are_reported_once() {
    let mut engine = engine();
    engine.observe_viewport(768.0, 1200.0);
    assert!(!engine.viewport().is_compact);

    engine.push(HostEvent::Resize { width: 500.0 });
    let frame = engine.flush(&mut Document::default());
    assert_eq!(frame.viewport.map(|v| v.is_compact), Some(true));

    engine.push(HostEvent::Resize { width: 400.0 });
    assert_eq!(engine.flush(&mut Document::default()).viewport, None);

    // Settles back within the frame: nothing to report.
    engine.push(HostEvent::Resize { width: 1200.0 });
    engine.push(HostEvent::Resize { width: 600.0 });
    assert_eq!(engine.flush(&mut Document::default()).viewport, None);
}

#[test]
fn header_flag_flips_strictly_past_the_fraction() {
    let mut engine = engine();
    engine.observe_scroll(ScrollConfig::default());

    engine.push(scroll(700.0, Some(1000.0)));
    let frame = engine.flush(&mut Document::default());
    assert_eq!(frame.header_scrolled, None);
    assert!(!engine.header_scrolled());

    engine.push(scroll(701.0, Some(1000.0)));
    assert_eq!(engine.flush(&mut Document::default()).header_scrolled, Some(true));

    engine.push(scroll(800.0, Some(1000.0)));
    assert_eq!(engine.flush(&mut Document::default()).header_scrolled, None);

    engine.push(scroll(10.0, Some(1000.0)));
    assert_eq!(engine.flush(&mut Document::default()).header_scrolled, Some(false));
}

#[test]
fn header_flag_at_three_quarters() {
    let mut engine = engine();
    engine.observe_scroll(ScrollConfig::default().with_threshold_fraction(0.75));

    engine.push(scroll(750.0, Some(1000.0)));
    engine.flush(&mut Document::default());
    assert!(!engine.header_scrolled());

    engine.push(scroll(751.0, Some(1000.0)));
    engine.flush(&mut Document::default());
    assert!(engine.header_scrolled());
}

#[test]
fn header_height_is_measured_per_event() {
    let mut engine = engine();
    engine.observe_scroll(ScrollConfig::default());

    engine.push(scroll(701.0, Some(1000.0)));
    engine.flush(&mut Document::default());
    assert!(engine.header_scrolled());

    // The main section grew; the same offset is no longer past it.
    engine.push(scroll(701.0, Some(2000.0)));
    engine.flush(&mut Document::default());
    assert!(!engine.header_scrolled());

    // No reference element this time: the flag is kept.
    engine.push(scroll(5000.0, None));
    engine.flush(&mut Document::default());
    assert!(!engine.header_scrolled());
}

#[test]
fn scroll_events_are_coalesced_per_frame() {
    let mut engine = engine();
    engine.observe_scroll(ScrollConfig::default());
    let mut document = Document::default();
    engine.bind_curtains(1, 2, ScrollRange::new(0.0, 1500.0), 500.0).unwrap();

    engine.push(scroll(100.0, Some(1000.0)));
    engine.push(scroll(900.0, None));
    engine.push(scroll(750.0, None));
    let frame = engine.flush(&mut document);

    assert_eq!(frame.coalesced_scrolls, 2);
    let state = frame.scroll.unwrap();
    assert_eq!(state.offset_y, 750.0);
    assert_eq!(state.progress, 0.5);
    // The earlier height is used for the settled offset.
    assert_eq!(frame.header_scrolled, Some(true));
    assert_eq!(frame.transform_writes, 2);
}

#[test]
fn curtains_open_symmetrically() {
    let mut engine = engine();
    let profile = Page::Home.profile();
    profile.install(&mut engine, 1440.0);
    let curtains = profile.curtains.unwrap();
    engine
        .bind_curtains(1, 2, curtains.range, curtains.max_translate)
        .unwrap();
    let mut document = Document::default();

    // Bound panels are written on the next frame even without scrolling.
    assert_eq!(engine.flush(&mut document).transform_writes, 2);
    assert_eq!(document.transforms[&1], Vec2::ZERO);

    engine.push(scroll(750.0, None));
    engine.flush(&mut document);
    assert_eq!(document.transforms[&1], Vec2::new(-250.0, 0.0));
    assert_eq!(document.transforms[&2], Vec2::new(250.0, 0.0));

    engine.push(scroll(-40.0, None));
    assert_eq!(engine.flush(&mut document).scroll.unwrap().progress, 0.0);
    engine.push(scroll(1500.0, None));
    assert_eq!(engine.flush(&mut document).scroll.unwrap().progress, 1.0);
    engine.push(scroll(90_000.0, None));
    let frame = engine.flush(&mut document);
    assert_eq!(frame.scroll.unwrap().progress, 1.0);
    // Already fully open: nothing rewritten.
    assert_eq!(frame.transform_writes, 0);
    assert_eq!(document.transforms[&2], Vec2::new(500.0, 0.0));
}

#[test]
fn one_shot_element_never_rehides() {
    let mut engine = engine();
    let fade = engine.register_animator(RevealConfig::fade_slide_up());
    engine.observe_element(7, fade, StaggerIndex(0)).unwrap();
    let mut document = Document::default();
    engine.flush(&mut document);

    engine.push(visible(7, 0.05));
    assert!(engine.flush(&mut document).presentations.is_empty());

    engine.push(visible(7, 0.1));
    let frame = engine.flush(&mut document);
    assert_eq!(frame.presentation(&7).unwrap().phase, RevealPhase::Animate);

    for fraction in [0.0, 0.8, 0.0, 0.0] {
        engine.push(visible(7, fraction));
        assert!(engine.flush(&mut document).presentations.is_empty());
        assert!(engine.is_revealed(&7));
    }
}

#[test]
fn repeating_gallery_follows_the_viewport() {
    let mut engine = engine();
    engine.observe_viewport(768.0, 1440.0);
    let slide = engine.register_animator(RevealConfig::slide_in_x(-300.0));
    engine.observe_element(3, slide, StaggerIndex(0)).unwrap();
    let mut document = Document::default();

    let initial = engine.flush(&mut document);
    assert_eq!(
        initial.presentation(&3).unwrap().offset,
        Vec2::new(-300.0, 0.0)
    );

    for _ in 0..3 {
        engine.push(visible(3, 0.2));
        let shown = engine.flush(&mut document);
        assert_eq!(shown.presentation(&3).unwrap().phase, RevealPhase::Animate);

        engine.push(visible(3, 0.19));
        let hidden = engine.flush(&mut document);
        assert_eq!(hidden.presentation(&3).unwrap().phase, RevealPhase::Initial);
    }
}

#[test]
fn resize_is_applied_before_reveals_in_the_same_frame() {
    let mut engine = engine();
    engine.observe_viewport(768.0, 1440.0);
    let slide = engine.register_animator(RevealConfig::slide_in_x(-300.0));
    engine.observe_element(3, slide, StaggerIndex(0)).unwrap();
    let mut document = Document::default();
    engine.flush(&mut document);

    engine.push(visible(3, 0.5));
    engine.push(HostEvent::Resize { width: 390.0 });
    let frame = engine.flush(&mut document);

    assert_eq!(frame.presentations.len(), 1);
    let state = frame.presentation(&3).unwrap();
    assert_eq!(state.phase, RevealPhase::Animate);
    assert_eq!(state.scale, 1.2);
}

#[test]
fn viewport_change_updates_compact_overrides() {
    let mut engine = engine();
    engine.observe_viewport(768.0, 1440.0);
    let slide = engine.register_animator(RevealConfig::slide_in_x(200.0));
    let fade = engine.register_animator(RevealConfig::fade_slide_up());
    engine.observe_element(1, slide, StaggerIndex(0)).unwrap();
    engine.observe_element(2, fade, StaggerIndex(0)).unwrap();
    let mut document = Document::default();
    engine.flush(&mut document);

    engine.push(HostEvent::Resize { width: 600.0 });
    let frame = engine.flush(&mut document);
    assert_eq!(frame.presentation(&1).unwrap().scale, 1.2);
    // No compact override: recomputed but unchanged, so not reported.
    assert_eq!(frame.presentation(&2), None);
}

#[test]
fn words_are_staggered_by_position() {
    let mut engine = RevealEngine::<(u32, u32)>::new(EngineConfig::default());
    let words = engine.register_animator(RevealConfig::words_pull_up());
    let headline = "Graphic design  for print";
    let members: Vec<_> = split_words(headline).map(|word| (1, word.index.0 + 1)).collect();
    engine.observe_group((1, 0), words, members.clone()).unwrap();
    let mut transforms: HashMap<(u32, u32), Vec2> = HashMap::new();
    engine.flush(&mut transforms);

    engine.push(HostEvent::Intersection {
        key: (1, 0),
        fraction: 0.01,
    });
    let frame = engine.flush(&mut transforms);
    assert_eq!(frame.presentations.len(), 5);

    let delays: Vec<f64> = members
        .iter()
        .map(|member| frame.presentation(member).unwrap().delay)
        .collect();
    assert_eq!(delays, [0.0, 0.5, 1.0, 1.5, 2.0]);
    assert!(delays.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn bounds_events_are_measured() {
    let mut engine = engine();
    let fade = engine.register_animator(RevealConfig::fade_slide_up());
    engine.observe_element(4, fade, StaggerIndex(0)).unwrap();
    let viewport = Rect::new(0.0, 0.0, 1200.0, 800.0);

    engine.push(HostEvent::Bounds {
        key: 4,
        element: Rect::new(0.0, 780.0, 1200.0, 1180.0),
        viewport,
    });
    engine.flush(&mut Document::default());
    assert!(!engine.is_revealed(&4));

    engine.push(HostEvent::Bounds {
        key: 4,
        element: Rect::new(0.0, 700.0, 1200.0, 1100.0),
        viewport,
    });
    engine.flush(&mut Document::default());
    assert!(engine.is_revealed(&4));
}

#[test]
fn duplicate_media_ready_events_seek_once() {
    let mut engine = engine();
    engine.observe_media(9).unwrap();
    let mut document = Document::default();
    let mut video = Video::new();
    video.rate = 0.25;
    document.videos.insert(9, video);

    engine.push(HostEvent::MediaLoadStart(9));
    engine.push(HostEvent::MediaReady(9));
    engine.push(HostEvent::MediaReady(9));
    let frame = engine.flush(&mut document);

    let outcomes: Vec<_> = frame.media.iter().map(|update| update.outcome).collect();
    assert_eq!(
        outcomes,
        [NormalizeOutcome::Applied, NormalizeOutcome::AlreadyNormalized]
    );
    engine.push(HostEvent::MediaReady(9));
    engine.flush(&mut document);

    let video = &document.videos[&9];
    assert_eq!((video.rate, video.time, video.seeks), (1.0, 1.0, 1));
}

#[test]
fn missing_or_detached_media_is_skipped() {
    let mut engine = engine();
    engine.observe_media(1).unwrap();
    engine.observe_media(2).unwrap();
    let mut document = Document::default();
    let mut detached = Video::new();
    detached.attached = false;
    document.videos.insert(2, detached);
    document.videos.insert(3, Video::new());

    engine.push(HostEvent::MediaReady(1));
    engine.push(HostEvent::MediaReady(2));
    // Not registered: ignored.
    engine.push(HostEvent::MediaReady(3));
    let frame = engine.flush(&mut document);

    assert_eq!(frame.media.len(), 1);
    assert_eq!(
        frame.media[0].outcome,
        NormalizeOutcome::Skipped(MediaError::Detached)
    );
    assert_eq!(document.videos[&3].seeks, 0);
}

#[test]
fn unmount_before_media_ready_skips_it() {
    let mut engine = engine();
    engine.observe_media(9).unwrap();
    let mut document = Document::default();
    document.videos.insert(9, Video::new());

    engine.push(HostEvent::Unmount(9));
    engine.push(HostEvent::MediaReady(9));
    let frame = engine.flush(&mut document);

    assert!(frame.media.is_empty());
    assert_eq!(document.videos[&9].seeks, 0);
    assert_eq!(engine.live_observers().total(), 0);
}

#[test]
fn unsupported_host_reveals_everything() {
    let config = EngineConfig::default().with_capabilities(Capabilities::empty());
    let mut engine = RevealEngine::new(config);
    engine.observe_viewport(768.0, 320.0);
    assert!(!engine.viewport().is_compact);

    let fade = engine.register_animator(RevealConfig::fade_slide_up());
    engine.observe_element(1, fade, StaggerIndex(0)).unwrap();
    engine.observe_media(2).unwrap();
    let mut document = Document::default();
    document.videos.insert(2, Video::new());

    engine.push(HostEvent::Resize { width: 200.0 });
    engine.push(HostEvent::MediaReady(2));
    let mut recorder = RevealRecorder::new();
    let frame = engine.flush_with_trace(&mut document, &mut recorder);

    assert_eq!(frame.viewport, None);
    assert_eq!(frame.presentation(&1).unwrap().phase, RevealPhase::Animate);
    assert_eq!(recorder.cause(&1), Some(&RevealCause::Registered));
    assert!(frame.media.is_empty());
    assert_eq!(document.videos[&2].seeks, 0);
}

#[test]
fn trace_names_the_observed_container() {
    let mut engine = engine();
    let words = engine.register_animator(RevealConfig::words_pull_up());
    engine.observe_group(10, words, [11, 12]).unwrap();
    let mut recorder = RevealRecorder::new();
    engine.flush_with_trace(&mut Document::default(), &mut recorder);
    assert!(recorder.is_empty());

    engine.push(visible(10, 0.4));
    engine.flush_with_trace(&mut Document::default(), &mut recorder);
    assert_eq!(
        recorder.cause(&12),
        Some(&RevealCause::Intersected {
            source: 10,
            fraction: 0.4
        })
    );
    assert_eq!(recorder.len(), 2);
}

#[test]
fn disposing_everything_leaves_nothing_behind() {
    let mut engine = engine();
    let mut handles = Vec::new();
    handles.push(engine.observe_viewport(768.0, 1024.0));
    handles.push(engine.observe_scroll(ScrollConfig::default()));
    handles.push(engine.bind_curtains(1, 2, ScrollRange::default(), 500.0).unwrap());
    let fade = engine.register_animator(RevealConfig::fade_slide_up());
    handles.push(engine.observe_element(3, fade, StaggerIndex(0)).unwrap());
    handles.push(engine.observe_group(4, fade, [5, 6, 7]).unwrap());
    handles.push(engine.observe_media(8).unwrap());

    let mut document = Document::default();
    document.videos.insert(8, Video::new());
    engine.push(visible(3, 1.0));
    engine.push(HostEvent::MediaReady(8));
    engine.flush(&mut document);

    let live = engine.live_observers();
    assert_eq!(live.handles, 6);
    assert_eq!(live.bindings, 2);
    assert_eq!(live.observed, 2);
    assert_eq!(live.presented, 4);
    assert_eq!(live.media, 1);

    for handle in &handles {
        assert!(engine.dispose(*handle));
    }
    assert_eq!(engine.live_observers().total(), 0);

    for handle in handles {
        assert!(!engine.dispose(handle));
    }
}

#[test]
fn unmount_releases_every_registration_of_an_element() {
    let mut engine = engine();
    let fade = engine.register_animator(RevealConfig::fade_slide_up());
    engine.observe_element(1, fade, StaggerIndex(0)).unwrap();
    let group = engine.observe_group(2, fade, [3, 4]).unwrap();
    engine.bind_curtains(5, 6, ScrollRange::default(), 500.0).unwrap();

    // Unmounts before ever entering the viewport.
    engine.push(HostEvent::Unmount(1));
    engine.push(HostEvent::Unmount(3));
    engine.push(HostEvent::Unmount(5));
    engine.push(HostEvent::Unmount(6));
    // A late report for an unmounted element is harmless.
    engine.push(visible(1, 1.0));
    engine.flush(&mut Document::default());

    let live = engine.live_observers();
    assert_eq!(live.observed, 1);
    assert_eq!(live.presented, 1);
    assert_eq!(live.bindings, 0);
    assert_eq!(live.handles, 1);

    engine.push(visible(2, 1.0));
    let frame = engine.flush(&mut Document::default());
    assert_eq!(frame.presentations.len(), 1);
    assert!(frame.presentation(&4).is_some());

    assert!(engine.dispose(group));
    assert_eq!(engine.live_observers().total(), 0);
}

#[test]
fn case_study_profile_wires_header_and_media() {
    let mut engine = engine();
    let profile = Page::Seewees.profile();
    let setup = profile.install(&mut engine, 1280.0);
    assert!(setup.scroll.is_some());
    assert!(setup.gallery.is_none());
    engine.observe_media(1).unwrap();

    let mut document = Document::default();
    document.videos.insert(1, Video::new());
    engine.push(scroll(701.0, Some(1000.0)));
    engine.push(HostEvent::MediaReady(1));
    let frame = engine.flush(&mut document);

    assert_eq!(frame.header_scrolled, Some(true));
    assert_eq!(frame.media[0].outcome, NormalizeOutcome::Applied);
    assert_eq!(frame.transform_writes, 0);
}

#[test]
fn unmounting_a_nested_container_releases_both_roles() {
    let mut engine = engine();
    let words = engine.register_animator(RevealConfig::words_pull_up());
    let outer = engine.observe_group(10, words, [11, 12]).unwrap();
    engine.observe_group(11, words, [20]).unwrap();
    let mut document = Document::default();
    engine.flush(&mut document);
    assert_eq!(engine.live_observers().presented, 3);

    engine.push(HostEvent::Unmount(11));
    engine.flush(&mut document);
    let live = engine.live_observers();
    assert_eq!(live.presented, 1);
    assert_eq!(live.observed, 1);
    assert_eq!(engine.presentation(&11), None);
    assert_eq!(engine.presentation(&20), None);

    engine.push(visible(10, 1.0));
    let frame = engine.flush(&mut document);
    assert_eq!(frame.presentations.len(), 1);
    assert!(frame.presentation(&11).is_none());
    assert_eq!(frame.presentation(&12).unwrap().phase, RevealPhase::Animate);

    assert!(engine.dispose(outer));
    assert_eq!(engine.live_observers().total(), 0);
}

#[test]
fn home_profile_only_seeks_its_videos() {
    let mut engine = engine();
    Page::Home.profile().install(&mut engine, 1440.0);
    assert_eq!(engine.config().media.rate, None);
    engine.observe_media(5).unwrap();

    let mut document = Document::default();
    let mut video = Video::new();
    video.rate = 0.5;
    document.videos.insert(5, video);
    engine.push(HostEvent::MediaReady(5));
    let frame = engine.flush(&mut document);

    assert_eq!(frame.media[0].outcome, NormalizeOutcome::Applied);
    let video = &document.videos[&5];
    assert_eq!((video.rate, video.time, video.seeks), (0.5, 1.0, 1));
}

#[test]
fn gallery_items_slide_in_from_alternating_sides() {
    let mut engine = engine();
    let setup = Page::BleedFestival.profile().install(&mut engine, 1000.0);
    let gallery = setup.gallery.unwrap();
    for index in 0..3_u32 {
        engine
            .observe_element(30 + index, gallery.for_item(index), StaggerIndex(0))
            .unwrap();
    }
    let mut document = Document::default();

    let frame = engine.flush(&mut document);
    let offsets: Vec<f64> = (30..33)
        .map(|key| frame.presentation(&key).unwrap().offset.x)
        .collect();
    assert_eq!(offsets, [-400.0, 400.0, -400.0]);

    engine.push(visible(31, 0.2));
    let frame = engine.flush(&mut document);
    assert_eq!(frame.presentations.len(), 1);
    assert_eq!(frame.presentation(&31).unwrap().offset, Vec2::ZERO);

    engine.push(visible(31, 0.0));
    let frame = engine.flush(&mut document);
    assert_eq!(frame.presentation(&31).unwrap().offset, Vec2::new(400.0, 0.0));
}

#[test]
fn hero_is_revealed_on_registration() {
    let mut engine = engine();
    let setup = Page::Solis.profile().install(&mut engine, 1280.0);
    engine.observe_element(1, setup.hero, StaggerIndex(0)).unwrap();
    assert!(engine.is_revealed(&1));

    let mut recorder = RevealRecorder::new();
    let frame = engine.flush_with_trace(&mut Document::default(), &mut recorder);
    let state = frame.presentation(&1).unwrap();
    assert_eq!(state.phase, RevealPhase::Animate);
    assert_eq!(state.duration, unveil::HERO_DURATION);
    assert_eq!(recorder.cause(&1), Some(&RevealCause::Registered));

    // Leaving the viewport does not hide it.
    engine.push(visible(1, 0.0));
    assert!(engine.flush(&mut Document::default()).presentations.is_empty());
}
