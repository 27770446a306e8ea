// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use unveil_trigger::{RevealState, TriggerOptions};
use unveil_viewport::ViewportState;

use crate::presentation::{PresentationState, RevealPhase};
use crate::timeline::Easing;

/// Position of an element within a group of siblings revealed together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaggerIndex(pub u32);

impl From<u32> for StaggerIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// Delay before an element's reveal transition: `base + index * unit` seconds.
///
/// A zero `unit` gives every element of a usage site the same fixed delay; a
/// positive `unit` staggers siblings so that element `i` never starts before
/// element `i - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaggerDelay {
    /// Delay shared by every element, in seconds.
    pub base: f64,
    /// Additional delay per stagger index, in seconds.
    pub unit: f64,
}

impl StaggerDelay {
    /// Staggers by `unit` seconds per index.
    #[must_use]
    pub const fn per_index(unit: f64) -> Self {
        Self { base: 0.0, unit }
    }

    /// Same delay for every element.
    #[must_use]
    pub const fn fixed(base: f64) -> Self {
        Self { base, unit: 0.0 }
    }

    /// Returns the delay for `index`, never negative.
    #[must_use]
    pub fn delay_for(&self, index: StaggerIndex) -> f64 {
        (self.base + f64::from(index.0) * self.unit).max(0.0)
    }
}

/// Extra presentation applied on compact viewports.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompactOverride {
    /// Scale applied in both states.
    pub scale: f64,
    /// Replaces the initial offset when set.
    pub initial_offset: Option<Vec2>,
}

impl CompactOverride {
    /// Scales the element up (or down) on compact viewports.
    #[must_use]
    pub const fn scale(scale: f64) -> Self {
        Self {
            scale,
            initial_offset: None,
        }
    }
}

/// Configuration of one reveal usage site.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealConfig {
    /// How the element is observed.
    pub trigger: TriggerOptions,
    /// Offset of the `initial` state.
    pub initial_offset: Vec2,
    /// Opacity of the `initial` state.
    pub initial_opacity: f64,
    /// Delay before the transition into `animate`.
    pub stagger: StaggerDelay,
    /// Transition duration, in seconds.
    pub duration: f64,
    /// Transition easing.
    pub easing: Easing,
    /// Presentation added on compact viewports.
    pub compact: Option<CompactOverride>,
}

impl RevealConfig {
    /// Fade in while sliding up 20px, once, at 10% visibility.
    #[must_use]
    pub fn fade_slide_up() -> Self {
        Self {
            trigger: TriggerOptions::once(0.1),
            initial_offset: Vec2::new(0.0, 20.0),
            initial_opacity: 0.0,
            stagger: StaggerDelay::default(),
            duration: 0.8,
            easing: Easing::EaseOut,
            compact: None,
        }
    }

    /// Word-by-word pull-up: each word rises 20px and fades in half a second
    /// after the previous one, once any part of the text is visible.
    #[must_use]
    pub fn words_pull_up() -> Self {
        Self {
            trigger: TriggerOptions::once(0.0),
            stagger: StaggerDelay::per_index(0.5),
            ..Self::fade_slide_up()
        }
    }

    /// Slide in horizontally from `initial_x` every time 20% of the element is
    /// visible, scaled up by 1.2 on compact viewports. Opacity is not animated.
    #[must_use]
    pub fn slide_in_x(initial_x: f64) -> Self {
        Self {
            trigger: TriggerOptions::repeating(0.2),
            initial_offset: Vec2::new(initial_x, 0.0),
            initial_opacity: 1.0,
            stagger: StaggerDelay::default(),
            duration: 1.8,
            easing: Easing::EaseOut,
            compact: Some(CompactOverride::scale(1.2)),
        }
    }

    /// Sets the trigger options.
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerOptions) -> Self {
        self.trigger = trigger;
        self
    }

    /// Sets the initial offset.
    #[must_use]
    pub fn with_initial_offset(mut self, offset: Vec2) -> Self {
        self.initial_offset = offset;
        self
    }

    /// Sets the stagger delay.
    #[must_use]
    pub fn with_stagger(mut self, stagger: StaggerDelay) -> Self {
        self.stagger = stagger;
        self
    }

    /// Sets the transition duration.
    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the compact-viewport override.
    #[must_use]
    pub fn with_compact(mut self, compact: Option<CompactOverride>) -> Self {
        self.compact = compact;
        self
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::fade_slide_up()
    }
}

/// Maps reveal inputs to a [`PresentationState`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RevealAnimator {
    config: RevealConfig,
}

impl RevealAnimator {
    /// Creates an animator for one usage site.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Returns the presentation for the given inputs.
    ///
    /// Only the `animate` state carries the stagger delay; returning to
    /// `initial` (for repeating triggers) starts immediately.
    #[must_use]
    pub fn apply(
        &self,
        base: RevealState,
        viewport: ViewportState,
        index: StaggerIndex,
    ) -> PresentationState {
        if base.has_entered_viewport {
            self.animate(viewport, index)
        } else {
            self.initial(viewport)
        }
    }

    /// The `initial` state.
    #[must_use]
    pub fn initial(&self, viewport: ViewportState) -> PresentationState {
        let compact = self.compact_override(viewport);
        PresentationState {
            phase: RevealPhase::Initial,
            offset: compact
                .and_then(|c| c.initial_offset)
                .unwrap_or(self.config.initial_offset),
            opacity: self.config.initial_opacity,
            scale: compact.map_or(1.0, |c| c.scale),
            delay: 0.0,
            duration: self.config.duration,
        }
    }

    /// The `animate` state.
    #[must_use]
    pub fn animate(&self, viewport: ViewportState, index: StaggerIndex) -> PresentationState {
        PresentationState {
            phase: RevealPhase::Animate,
            offset: Vec2::ZERO,
            opacity: 1.0,
            scale: self.compact_override(viewport).map_or(1.0, |c| c.scale),
            delay: self.config.stagger.delay_for(index),
            duration: self.config.duration,
        }
    }

    fn compact_override(&self, viewport: ViewportState) -> Option<CompactOverride> {
        if viewport.is_compact {
            self.config.compact
        } else {
            None
        }
    }
}
