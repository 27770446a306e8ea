// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unveil_motion --heading-base-level=0

//! Unveil Motion: two-state reveal presentations.
//!
//! Every revealed element has exactly two presentations:
//!
//! - **initial**: displaced by an offset and transparent (or partially so).
//! - **animate**: in place and fully opaque.
//!
//! A [`RevealAnimator`] maps an element's [`RevealState`], the current
//! [`ViewportState`], and its [`StaggerIndex`] within a group of siblings to a
//! [`PresentationState`]. The mapping is pure, so applying it again with the
//! same inputs yields the same result and hosts can re-publish freely.
//!
//! The transition into `animate` starts after `base + index * unit` seconds
//! (see [`StaggerDelay`]), which makes siblings appear one after the other.
//! On compact viewports an optional [`CompactOverride`] adds a scale (and may
//! replace the initial offset) on top of the base reveal.
//!
//! [`RevealTransition`] samples the presentation over time for hosts that do
//! their own interpolation instead of delegating to an animation runtime, and
//! [`split_words`] prepares text for word-by-word reveals.
//!
//! ## Minimal example
//!
//! ```rust
//! use unveil_motion::{RevealAnimator, RevealConfig, RevealPhase, StaggerIndex};
//! use unveil_trigger::RevealState;
//! use unveil_viewport::ViewportState;
//!
//! let words = RevealAnimator::new(RevealConfig::words_pull_up());
//!
//! let hidden = words.apply(RevealState::HIDDEN, ViewportState::REGULAR, StaggerIndex(2));
//! assert_eq!(hidden.phase, RevealPhase::Initial);
//! assert_eq!(hidden.opacity, 0.0);
//!
//! let shown = words.apply(RevealState::REVEALED, ViewportState::REGULAR, StaggerIndex(2));
//! assert_eq!(shown.phase, RevealPhase::Animate);
//! assert_eq!(shown.delay, 1.0);
//! ```
//!
//! [`RevealState`]: unveil_trigger::RevealState
//! [`ViewportState`]: unveil_viewport::ViewportState
//!
//! This crate is `no_std`.

#![no_std]

mod animator;
mod presentation;
mod timeline;
mod words;

pub use animator::{CompactOverride, RevealAnimator, RevealConfig, StaggerDelay, StaggerIndex};
pub use presentation::{Frame, PresentationState, RevealPhase};
pub use timeline::{Easing, RevealTransition};
pub use words::{NBSP, Word, split_words};
