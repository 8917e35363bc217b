// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `radio_psf` should do as many
calculations as possible in double precision before converting to a lower
precision, if it is ever required.
 */

pub use std::f64::consts::{LN_2, PI, TAU};

/// Conversion between the product of a 2D Gaussian's two FWHMs and its
/// effective area: 2π / (8 ln 2).
pub const FWHM_TO_AREA: f64 = TAU / (8.0 * LN_2);

/// Conversion between a Gaussian standard deviation and its FWHM:
/// sqrt(8 ln 2).
pub const SIGMA_TO_FWHM: f64 = 2.3548200450309493;

/// Speed of light \[metres/second\]
pub const VEL_C: f64 = 299792458.0;

/// Boltzmann constant \[J/K\]
pub const BOLTZMANN: f64 = 1.380649e-23;

/// One jansky \[W m^-2 Hz^-1\]
pub const JY: f64 = 1e-26;
