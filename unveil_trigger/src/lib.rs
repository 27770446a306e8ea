// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unveil_trigger --heading-base-level=0

//! Unveil Trigger: viewport-intersection triggers for reveal animations.
//!
//! A [`VisibilityTrigger`] tracks, per element key, whether the element has
//! entered the viewport. Hosts feed it the visible fraction of each observed
//! element (or the element and viewport rectangles, see
//! [`visible_fraction`]) whenever layout or scroll position changes, and it
//! reports [`TriggerEvent`]s when an element crosses its threshold.
//!
//! Two modes are supported, selected per element through [`TriggerOptions`]:
//!
//! - **One-shot** (`once = true`): the first time the element's visible
//!   fraction reaches the threshold, it is revealed and observation stops.
//!   Its [`RevealState`] stays revealed until the element is unobserved.
//! - **Repeating** (`once = false`): the element is revealed on every entry and
//!   hidden again on every exit.
//!
//! ## Minimal example
//!
//! ```rust
//! use unveil_trigger::{TriggerEvent, TriggerOptions, VisibilityTrigger};
//!
//! let mut trigger = VisibilityTrigger::new();
//! trigger.observe("intro", TriggerOptions::once(0.1));
//! trigger.observe("gallery", TriggerOptions::repeating(0.2));
//!
//! assert_eq!(trigger.update(&"intro", 0.5), Some(TriggerEvent::Revealed("intro")));
//! // Scrolling away does not hide a one-shot element.
//! assert_eq!(trigger.update(&"intro", 0.0), None);
//! assert!(trigger.is_revealed(&"intro"));
//!
//! assert_eq!(trigger.update(&"gallery", 0.3), Some(TriggerEvent::Revealed("gallery")));
//! assert_eq!(trigger.update(&"gallery", 0.0), Some(TriggerEvent::Hidden("gallery")));
//! ```
//!
//! ## Unmounting
//!
//! Call [`VisibilityTrigger::unobserve`] when an element goes away, whether or
//! not it was ever revealed. Updates for unknown keys are ignored, so a late
//! intersection report for an element that already unmounted is harmless.
//!
//! ## Unsupported environments
//!
//! When the host has no way to measure intersection, construct the trigger
//! with [`VisibilityTrigger::unsupported`]: every observed element is revealed
//! immediately so content is never left hidden.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

mod ratio;
mod trigger;

pub use ratio::{DEFAULT_THRESHOLD, crosses_threshold, visible_fraction};
pub use trigger::{RevealState, TriggerEvent, TriggerOptions, VisibilityTrigger};
