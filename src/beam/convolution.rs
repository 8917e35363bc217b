// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Combining and decomposing Gaussian beams.
//!
//! Each beam is treated as the covariance ellipse of a 2D Gaussian;
//! convolving two independent Gaussians adds their covariances in a common
//! frame, deconvolving subtracts them. The formulas follow the MIRIAD gaupar
//! routines (R. Sault).

use super::{Beam, ConvolutionError};
use crate::math::{atan2, cos, sin};

/// Convolve one beam with another. This operation is commutative: the
/// covariance sums below are symmetric in the two beams.
pub fn convolve(beam1: &Beam, beam2: &Beam) -> Beam {
    let (maj1, min1, pa1) = (beam1.major, beam1.minor, beam1.pa.to_radians());
    let (maj2, min2, pa2) = (beam2.major, beam2.minor, beam2.pa.to_radians());

    let alpha = (maj1 * cos(pa1)).powi(2)
        + (min1 * sin(pa1)).powi(2)
        + (maj2 * cos(pa2)).powi(2)
        + (min2 * sin(pa2)).powi(2);

    let beta = (maj1 * sin(pa1)).powi(2)
        + (min1 * cos(pa1)).powi(2)
        + (maj2 * sin(pa2)).powi(2)
        + (min2 * cos(pa2)).powi(2);

    let gamma = 2.0
        * ((min1.powi(2) - maj1.powi(2)) * sin(pa1) * cos(pa1)
            + (min2.powi(2) - maj2.powi(2)) * sin(pa2) * cos(pa2));

    let s = alpha + beta;
    let t = ((alpha - beta).powi(2) + gamma.powi(2)).sqrt();

    let new_major = (0.5 * (s + t)).sqrt();
    let new_minor = (0.5 * (s - t)).sqrt();
    let new_pa = if gamma.abs() + (alpha - beta).abs() == 0.0 {
        // Circularly symmetric; the orientation is arbitrary.
        0.0
    } else {
        (0.5 * atan2(-gamma, alpha - beta)).to_degrees()
    };

    Beam::from_degrees(new_major, new_minor, new_pa)
}

/// Deconvolve `beam2` from `beam1`, i.e. "beam1 minus beam2". Not
/// commutative.
///
/// The subtraction is only meaningful while the covariance difference stays
/// positive semi-definite; when `beam2` is larger than `beam1` in some
/// direction it is not, and either a zero-size beam is returned
/// (`failure_returns_pointlike`) or an error is raised.
pub fn deconvolve(
    beam1: &Beam,
    beam2: &Beam,
    failure_returns_pointlike: bool,
) -> Result<Beam, ConvolutionError> {
    let (maj1, min1, pa1) = (beam1.major, beam1.minor, beam1.pa.to_radians());
    let (maj2, min2, pa2) = (beam2.major, beam2.minor, beam2.pa.to_radians());

    let alpha = (maj1 * cos(pa1)).powi(2) + (min1 * sin(pa1)).powi(2)
        - (maj2 * cos(pa2)).powi(2)
        - (min2 * sin(pa2)).powi(2);

    let beta = (maj1 * sin(pa1)).powi(2) + (min1 * cos(pa1)).powi(2)
        - (maj2 * sin(pa2)).powi(2)
        - (min2 * cos(pa2)).powi(2);

    let gamma = 2.0
        * ((min1.powi(2) - maj1.powi(2)) * sin(pa1) * cos(pa1)
            - (min2.powi(2) - maj2.powi(2)) * sin(pa2) * cos(pa2));

    let s = alpha + beta;
    let t = ((alpha - beta).powi(2) + gamma.powi(2)).sqrt();

    if alpha < 0.0 || beta < 0.0 || s < t {
        if failure_returns_pointlike {
            return Ok(Beam::pointlike());
        }
        return Err(ConvolutionError::Undeconvolvable {
            beam: *beam1,
            other: *beam2,
        });
    }

    let new_major = (0.5 * (s + t)).sqrt();
    let new_minor = (0.5 * (s - t)).sqrt();
    let new_pa = if gamma.abs() + (alpha - beta).abs() == 0.0 {
        0.0
    } else {
        (0.5 * atan2(-gamma, alpha - beta)).to_degrees()
    };

    Ok(Beam::from_degrees(new_major, new_minor, new_pa))
}
