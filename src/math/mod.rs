// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper geometry and mathematics.

#[cfg(test)]
mod tests;

// Make traditional trigonometry possible.
/// Sine.
#[inline]
pub(crate) fn sin(x: f64) -> f64 {
    x.sin()
}

/// Cosine.
#[inline]
pub(crate) fn cos(x: f64) -> f64 {
    x.cos()
}

/// Inverse tangent. y comes before x, like the C function.
#[inline]
pub(crate) fn atan2(y: f64, x: f64) -> f64 {
    y.atan2(x)
}

/// The half-extents `(dx, dy)` of the axis-aligned bounding box of an ellipse
/// with semi-axes `a` and `b`, rotated by `theta` radians.
///
/// Each extent comes from the ellipse's parametric form, evaluated at the
/// parametric angle where that coordinate's derivative vanishes.
pub fn ellipse_extent(a: f64, b: f64, theta: f64) -> (f64, f64) {
    let t = atan2(-b * theta.tan(), a);
    let dx = a * cos(t) * cos(theta) - b * sin(t) * sin(theta);

    let t = atan2(b, a * theta.tan());
    let dy = b * sin(t) * cos(theta) + a * cos(t) * sin(theta);

    (dx.abs(), dy.abs())
}

/// Round up to the nearest odd integer.
pub fn round_up_to_odd_integer(value: f64) -> usize {
    let i = value.ceil() as usize;
    if i % 2 == 0 {
        i + 1
    } else {
        i
    }
}
