// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-fraction geometry.

use kurbo::Rect;

/// Default visible fraction needed to trigger.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Returns the fraction of `element` that lies inside `viewport`, in `[0, 1]`.
///
/// Both rectangles must be in the same coordinate space. An element with zero
/// area counts as fully visible when it lies inside the viewport (edges
/// included) and invisible otherwise.
///
/// ```rust
/// use kurbo::Rect;
/// use unveil_trigger::visible_fraction;
///
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let half_below_fold = Rect::new(0.0, 500.0, 800.0, 700.0);
/// assert_eq!(visible_fraction(half_below_fold, viewport), 0.5);
/// ```
#[must_use]
pub fn visible_fraction(element: Rect, viewport: Rect) -> f64 {
    let element = element.abs();
    let viewport = viewport.abs();
    let area = element.area();
    if area > 0.0 {
        let overlap = element.intersect(viewport).area();
        return (overlap / area).clamp(0.0, 1.0);
    }
    let inside = element.x0 >= viewport.x0
        && element.x1 <= viewport.x1
        && element.y0 >= viewport.y0
        && element.y1 <= viewport.y1;
    if inside { 1.0 } else { 0.0 }
}

/// Returns `true` when `fraction` counts as "in view" for `threshold`.
///
/// The element must be at least partly visible, and its visible fraction must
/// reach the threshold. A threshold of zero therefore means "any pixel".
/// Thresholds outside `[0, 1]` are clamped.
#[must_use]
pub fn crosses_threshold(fraction: f64, threshold: f64) -> bool {
    let threshold = if threshold.is_nan() {
        DEFAULT_THRESHOLD
    } else {
        threshold.clamp(0.0, 1.0)
    };
    fraction > 0.0 && fraction >= threshold
}
