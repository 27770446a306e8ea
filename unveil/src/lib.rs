// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unveil --heading-base-level=0

//! Unveil: a headless viewport reveal engine.
//!
//! Content-heavy pages tend to repeat the same few mechanisms: a layout that
//! switches at a width breakpoint, a header that turns opaque after some
//! scrolling, panels whose position follows the scroll offset, blocks that
//! fade in as they enter the viewport, and background videos that need a
//! nudge once they load. This crate runs all of them behind one
//! [`RevealEngine`], without touching a document itself:
//!
//! - the host registers what it wants observed and gets an
//!   [`ObserverHandle`] back for each registration;
//! - the host [`push`](RevealEngine::push)es [`HostEvent`]s as they arrive
//!   (resize, scroll, intersection, media, unmount);
//! - once per frame, [`flush`](RevealEngine::flush) processes them in a fixed
//!   order and returns a [`FrameOutput`]: changed presentations, the header
//!   flag, the viewport class. Scroll-bound transforms and media adjustments
//!   are written through the [`RevealHost`] passed to `flush`.
//!
//! The mechanisms live in their own crates, re-exported here:
//! [`viewport`], [`scroll`], [`trigger`], [`motion`] and [`media`].
//! [`Page`] and [`PageProfile`] describe which of them each page of the
//! portfolio uses.
//!
//! ## Minimal example
//!
//! ```rust
//! use hashbrown::HashMap;
//! use kurbo::Vec2;
//! use unveil::{EngineConfig, HostEvent, Page, RevealEngine};
//! use unveil::motion::{RevealPhase, StaggerIndex};
//!
//! let profile = Page::Home.profile();
//! let mut engine = RevealEngine::new(EngineConfig::default());
//! let setup = profile.install(&mut engine, 500.0);
//! assert!(engine.viewport().is_compact);
//!
//! let curtains = profile.curtains.unwrap();
//! engine
//!     .bind_curtains("left", "right", curtains.range, curtains.max_translate)
//!     .unwrap();
//! engine
//!     .observe_element("intro", setup.sections, StaggerIndex(0))
//!     .unwrap();
//!
//! engine.push(HostEvent::Scroll { offset_y: 750.0, reference_height: None });
//! engine.push(HostEvent::Intersection { key: "intro", fraction: 0.25 });
//!
//! let mut transforms: HashMap<&str, Vec2> = HashMap::new();
//! let frame = engine.flush(&mut transforms);
//!
//! assert_eq!(transforms["left"], Vec2::new(-250.0, 0.0));
//! assert_eq!(transforms["right"], Vec2::new(250.0, 0.0));
//! assert_eq!(frame.presentation(&"intro").unwrap().phase, RevealPhase::Animate);
//! ```
//!
//! ## Degradation
//!
//! Hosts that cannot observe something say so through [`Capabilities`]. The
//! engine then degrades instead of failing: the viewport stays regular,
//! elements are revealed as soon as they are observed, media is left alone.
//! [`RevealEngine::try_new`] refuses such hosts instead, for embedders that
//! prefer to know.
//!
//! ## Logging
//!
//! Registration, disposal and non-empty frames are logged at `debug` level
//! through the [`log`] facade, degraded capabilities at `warn`, individual
//! reveal transitions at `trace`. [`RevealEngine::flush_with_trace`] reports
//! the cause of each transition to a [`RevealTrace`] sink.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod capabilities;
mod engine;
mod page;
mod trace;

pub use unveil_media as media;
pub use unveil_motion as motion;
pub use unveil_scroll as scroll;
pub use unveil_trigger as trigger;
pub use unveil_viewport as viewport;

pub use capabilities::{Capabilities, SetupError};
pub use engine::{
    AnimatorId, EngineConfig, FrameOutput, HostEvent, LiveObservers, MediaUpdate, NoMedia,
    ObserverHandle, ObserverKind, PresentationUpdate, RevealEngine, RevealHost,
};
pub use page::{
    Curtains, GALLERY_OFFSET_FRACTION, Gallery, GalleryAnimators, HERO_DURATION, Page,
    PageProfile, PageReveals, PageSetup, SECTION_DELAY_STEP, section_delay,
};
pub use trace::{RevealCause, RevealRecorder, RevealTrace};
