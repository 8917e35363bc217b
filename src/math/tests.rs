// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;
use crate::constants::PI;

#[test]
fn ellipse_extent_axis_aligned() {
    let (dx, dy) = ellipse_extent(3.0, 1.0, 0.0);
    assert_abs_diff_eq!(dx, 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(dy, 1.0, epsilon = 1e-12);
}

#[test]
fn ellipse_extent_rotated_quarter_turn() {
    // A quarter turn swaps the two extents.
    let (dx, dy) = ellipse_extent(3.0, 1.0, PI / 2.0);
    assert_abs_diff_eq!(dx, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(dy, 3.0, epsilon = 1e-9);
}

#[test]
fn ellipse_extent_circle_is_rotation_invariant() {
    for theta in [0.0, 0.3, PI / 4.0, 1.2, 2.9] {
        let (dx, dy) = ellipse_extent(2.0, 2.0, theta);
        assert_abs_diff_eq!(dx, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dy, 2.0, epsilon = 1e-12);
    }
}

#[test]
fn ellipse_extent_eighth_turn() {
    // At 45° both half-extents are sqrt((a² + b²) / 2).
    let (a, b): (f64, f64) = (3.0, 1.0);
    let expected = ((a * a + b * b) / 2.0).sqrt();
    let (dx, dy) = ellipse_extent(a, b, PI / 4.0);
    assert_abs_diff_eq!(dx, expected, epsilon = 1e-12);
    assert_abs_diff_eq!(dy, expected, epsilon = 1e-12);
}

#[test]
fn round_up_to_odd() {
    assert_eq!(round_up_to_odd_integer(0.1), 1);
    assert_eq!(round_up_to_odd_integer(1.0), 1);
    assert_eq!(round_up_to_odd_integer(2.0), 3);
    assert_eq!(round_up_to_odd_integer(4.3), 5);
    assert_eq!(round_up_to_odd_integer(5.0), 5);
    assert_eq!(round_up_to_odd_integer(67.95), 69);
}
