// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative scroll-coupled transforms.

use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;
use kurbo::Vec2;

use crate::tracker::ScrollRange;

/// Axis a binding translates along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Horizontal translation.
    #[default]
    X,
    /// Vertical translation.
    Y,
}

/// Maps scroll progress in a range to a translation of one target.
///
/// The translation is `range.progress(offset) * magnitude` along `axis`; a
/// negative magnitude moves the target towards negative coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollBinding {
    /// Scroll range driving the binding.
    pub range: ScrollRange,
    /// Signed translation at full progress.
    pub magnitude: f64,
    /// Axis of the translation.
    pub axis: Axis,
}

impl ScrollBinding {
    /// Creates a binding.
    #[must_use]
    pub const fn new(range: ScrollRange, magnitude: f64, axis: Axis) -> Self {
        Self {
            range,
            magnitude,
            axis,
        }
    }

    /// Returns the translation for a scroll offset.
    #[must_use]
    pub fn translate_at(&self, offset: f64) -> Vec2 {
        // `+ 0.0` folds `-0.0` into `0.0` so callers never see a signed zero.
        let amount = self.range.translate(offset, self.magnitude) + 0.0;
        match self.axis {
            Axis::X => Vec2::new(amount, 0.0),
            Axis::Y => Vec2::new(0.0, amount),
        }
    }
}

/// Receives translations produced by [`ScrollBindings::apply`].
pub trait TransformSink<T> {
    /// Writes the translation of `target`.
    ///
    /// Returns `false` when the target does not exist (yet); the binding will
    /// then be written again on the next apply.
    fn set_translate(&mut self, target: &T, translate: Vec2) -> bool;
}

impl<T, S> TransformSink<T> for HashMap<T, Vec2, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    fn set_translate(&mut self, target: &T, translate: Vec2) -> bool {
        self.insert(target.clone(), translate);
        true
    }
}

#[derive(Clone, Debug)]
struct Entry {
    binding: ScrollBinding,
    applied: Option<Vec2>,
}

/// A mapping from targets to [`ScrollBinding`]s, applied in one step.
///
/// Each target has at most one binding. [`apply`](Self::apply) evaluates every
/// binding against a scroll offset and writes only the translations that
/// changed since they were last written successfully.
#[derive(Clone, Debug)]
pub struct ScrollBindings<T> {
    entries: HashMap<T, Entry>,
}

impl<T> Default for ScrollBindings<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> ScrollBindings<T>
where
    T: Clone + Eq + Hash,
{
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `target`, returning the binding it replaced.
    pub fn bind(&mut self, target: T, binding: ScrollBinding) -> Option<ScrollBinding> {
        self.entries
            .insert(
                target,
                Entry {
                    binding,
                    applied: None,
                },
            )
            .map(|old| old.binding)
    }

    /// Binds two panels that slide apart horizontally by equal and opposite
    /// amounts: `left` towards negative X, `right` towards positive X.
    pub fn bind_curtains(&mut self, left: T, right: T, range: ScrollRange, max_translate: f64) {
        let magnitude = max_translate.abs();
        self.bind(left, ScrollBinding::new(range, -magnitude, Axis::X));
        self.bind(right, ScrollBinding::new(range, magnitude, Axis::X));
    }

    /// Removes the binding of `target`.
    pub fn unbind(&mut self, target: &T) -> Option<ScrollBinding> {
        self.entries.remove(target).map(|entry| entry.binding)
    }

    /// Returns the binding of `target`.
    #[must_use]
    pub fn get(&self, target: &T) -> Option<&ScrollBinding> {
        self.entries.get(target).map(|entry| &entry.binding)
    }

    /// Returns the number of bound targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets what was last written to `target`, forcing a write on the next
    /// apply. Use this when the target element was recreated.
    pub fn invalidate(&mut self, target: &T) {
        if let Some(entry) = self.entries.get_mut(target) {
            entry.applied = None;
        }
    }

    /// Forgets every written translation.
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.applied = None;
        }
    }

    /// Evaluates every binding at `offset` and writes changed translations.
    ///
    /// Returns the number of successful writes.
    pub fn apply(&mut self, offset: f64, sink: &mut impl TransformSink<T>) -> usize {
        let mut written = 0;
        for (target, entry) in &mut self.entries {
            let translate = entry.binding.translate_at(offset);
            if entry.applied == Some(translate) {
                continue;
            }
            if sink.set_translate(target, translate) {
                entry.applied = Some(translate);
                written += 1;
            }
        }
        written
    }
}
