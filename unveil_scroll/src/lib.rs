// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unveil_scroll --heading-base-level=0

//! Unveil Scroll: scroll-position tracking and scroll-coupled transforms.
//!
//! The crate turns a stream of vertical scroll offsets into two kinds of
//! signal:
//!
//! - **Discrete**: [`ScrollState::is_past_threshold`] flips once the offset
//!   passes a fraction of a reference element's height (for example, giving a
//!   fixed header an opaque background once 70% of the hero section has
//!   scrolled away). The reference height is passed in with every event
//!   because responsive layout may change it at any time.
//! - **Continuous**: [`ScrollState::progress`] is the clamped position of the
//!   offset inside a [`ScrollRange`]. [`ScrollBindings`] maps that progress to
//!   per-target translations, so effects such as two curtain panels sliding
//!   apart are declared once and applied by a single step instead of being
//!   scattered through scroll handlers.
//!
//! [`ScrollCoalescer`] optionally collapses many scroll events inside one
//! frame into the last one; the settled state is the same as if every event
//! had been processed.
//!
//! ## Minimal example
//!
//! ```rust
//! use hashbrown::HashMap;
//! use kurbo::Vec2;
//! use unveil_scroll::{ScrollBindings, ScrollConfig, ScrollRange, ScrollTracker};
//!
//! let mut tracker = ScrollTracker::new(ScrollConfig::default());
//! let update = tracker.on_scroll(751.0, Some(1000.0));
//! assert!(update.state.is_past_threshold);
//!
//! // Curtains open over the first 1500px of scroll, 500px each at most.
//! let mut bindings = ScrollBindings::new();
//! bindings.bind_curtains("left", "right", ScrollRange::new(0.0, 1500.0), 500.0);
//!
//! let mut transforms: HashMap<&str, Vec2> = HashMap::new();
//! bindings.apply(750.0, &mut transforms);
//! assert_eq!(transforms["left"], Vec2::new(-250.0, 0.0));
//! assert_eq!(transforms["right"], Vec2::new(250.0, 0.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binding;
mod coalesce;
mod tracker;

pub use binding::{Axis, ScrollBinding, ScrollBindings, TransformSink};
pub use coalesce::{PendingScroll, ScrollCoalescer};
pub use tracker::{
    DEFAULT_THRESHOLD_FRACTION, ScrollConfig, ScrollRange, ScrollState, ScrollTracker,
    ScrollUpdate,
};
