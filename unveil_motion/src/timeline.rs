// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time sampling of reveal transitions.

use crate::presentation::{Frame, PresentationState};

/// Easing curve of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic deceleration.
    #[default]
    EaseOut,
    /// Quadratic acceleration then deceleration.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// A transition between two presentations, sampled by elapsed time.
///
/// Time is measured in seconds from the moment the target state was
/// published. The target's `delay` is waited out first, then the frame moves
/// from `from` to `to` over the target's `duration`.
///
/// ```rust
/// use unveil_motion::{Easing, RevealAnimator, RevealConfig, RevealTransition, StaggerIndex};
/// use unveil_viewport::ViewportState;
///
/// let animator = RevealAnimator::new(RevealConfig::default().with_easing(Easing::Linear));
/// let from = animator.initial(ViewportState::REGULAR);
/// let to = animator.animate(ViewportState::REGULAR, StaggerIndex(0));
///
/// let transition = RevealTransition::new(&from, &to, Easing::Linear);
/// assert_eq!(transition.sample(0.4).opacity, 0.5);
/// assert!(transition.is_complete(0.8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTransition {
    from: Frame,
    to: Frame,
    delay: f64,
    duration: f64,
    easing: Easing,
}

impl RevealTransition {
    /// Creates a transition from `from` towards `to`, using `to`'s timing.
    #[must_use]
    pub fn new(from: &PresentationState, to: &PresentationState, easing: Easing) -> Self {
        Self::from_frame(from.frame(), to, easing)
    }

    /// Creates a transition starting at an arbitrary frame.
    ///
    /// Use this to retarget a transition that is still running: sample the old
    /// transition and start the new one from that frame.
    #[must_use]
    pub fn from_frame(from: Frame, to: &PresentationState, easing: Easing) -> Self {
        Self {
            from,
            to: to.frame(),
            delay: to.delay.max(0.0),
            duration: to.duration.max(0.0),
            easing,
        }
    }

    /// Linear progress in `[0, 1]` at `elapsed` seconds.
    #[must_use]
    pub fn progress(&self, elapsed: f64) -> f64 {
        let running = elapsed - self.delay;
        if running <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (running / self.duration).min(1.0)
    }

    /// The frame at `elapsed` seconds.
    #[must_use]
    pub fn sample(&self, elapsed: f64) -> Frame {
        let t = self.easing.apply(self.progress(elapsed));
        self.from.lerp(self.to, t)
    }

    /// Returns `true` once the target frame has been reached.
    #[must_use]
    pub fn is_complete(&self, elapsed: f64) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Seconds from publication until the transition completes.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.delay + self.duration
    }
}
