// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The restoring-beam model: an elliptical Gaussian described by its FWHM
//! major and minor axes and a position angle.
//!
//! [`Beam`]s are immutable values; convolution, deconvolution and header
//! parsing always return new beams.

mod convolution;
mod error;

pub use convolution::{convolve, deconvolve};
pub use error::{BeamError, ConvolutionError};

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{BOLTZMANN, FWHM_TO_AREA, JY, SIGMA_TO_FWHM, TAU, VEL_C};
use crate::units::{Angle, AngleUnit, Freq, FreqUnit};

/// A Gaussian restoring beam.
///
/// The major axis is not enforced to be at least the minor axis, and the
/// position angle is not wrapped into \[-90°, 90°); whatever was supplied is
/// preserved. Two beams are equal iff their major axes, minor axes and
/// position angles are equal; the display unit does not participate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Beam {
    /// FWHM along the major axis \[degrees\]
    pub major: f64,

    /// FWHM along the minor axis \[degrees\]
    pub minor: f64,

    /// Position angle of the major axis \[degrees\]
    pub pa: f64,

    /// The unit used when displaying the axes. The position angle is always
    /// displayed in degrees.
    #[serde(skip_serializing, default = "default_display_unit")]
    pub display_unit: AngleUnit,
}

fn default_display_unit() -> AngleUnit {
    AngleUnit::Arcsec
}

/// Convert an angle to degrees, assuming degrees if no unit was attached.
fn to_degrees_or_assume(angle: Angle, what: &str) -> f64 {
    if angle.unit == AngleUnit::NoUnit {
        warn!("Assuming the {what} has been specified in degrees");
    }
    angle.to_degrees()
}

impl Beam {
    /// Create a new beam from its major and minor FWHM and its position
    /// angle. Angles supplied without a unit are assumed to be in degrees
    /// (a warning is logged).
    pub fn new(major: Angle, minor: Angle, pa: Angle) -> Beam {
        Beam {
            major: to_degrees_or_assume(major, "major axis"),
            minor: to_degrees_or_assume(minor, "minor axis"),
            pa: to_degrees_or_assume(pa, "position angle"),
            display_unit: default_display_unit(),
        }
    }

    /// Create a beam, applying the usual defaults: the minor axis defaults
    /// to the major axis (a circular beam) and the position angle defaults
    /// to 0.
    pub fn from_fwhm(major: Angle, minor: Option<Angle>, pa: Option<Angle>) -> Beam {
        let major_deg = to_degrees_or_assume(major, "major axis");
        let minor_deg = match minor {
            Some(minor) => to_degrees_or_assume(minor, "minor axis"),
            None => major_deg,
        };
        let pa_deg = match pa {
            Some(pa) => to_degrees_or_assume(pa, "position angle"),
            None => 0.0,
        };
        Beam {
            major: major_deg,
            minor: minor_deg,
            pa: pa_deg,
            display_unit: default_display_unit(),
        }
    }

    /// A circular beam.
    pub fn circular(fwhm: Angle) -> Beam {
        Beam::from_fwhm(fwhm, None, None)
    }

    /// Given an effective area \[steradians\], make a circular beam assuming
    /// it is Gaussian: FWHM = sqrt(area / 2π) · sqrt(8 ln 2), in degrees.
    pub fn from_area(area_sr: f64) -> Beam {
        let fwhm_deg = (area_sr / TAU).sqrt() * SIGMA_TO_FWHM;
        Beam::from_degrees(fwhm_deg, fwhm_deg, 0.0)
    }

    /// Create a beam directly from degree values.
    pub fn from_degrees(major_deg: f64, minor_deg: f64, pa_deg: f64) -> Beam {
        Beam {
            major: major_deg,
            minor: minor_deg,
            pa: pa_deg,
            display_unit: default_display_unit(),
        }
    }

    /// Create a beam from arcsecond axes. The position angle is still in
    /// degrees.
    pub fn from_arcsec(major_asec: f64, minor_asec: f64, pa_deg: f64) -> Beam {
        Beam::from_degrees(major_asec / 3600.0, minor_asec / 3600.0, pa_deg)
    }

    /// The zero-size beam. This is what deconvolution returns when it fails
    /// and the caller asked for a point-like fallback.
    pub fn pointlike() -> Beam {
        Beam::from_degrees(0.0, 0.0, 0.0)
    }

    /// Return a copy of this beam that displays its axes in `unit`.
    pub fn with_display_unit(self, unit: AngleUnit) -> Beam {
        Beam {
            display_unit: unit,
            ..self
        }
    }

    /// The beam's solid angle \[steradians\].
    pub fn solid_angle(&self) -> f64 {
        self.major.to_radians() * self.minor.to_radians() * FWHM_TO_AREA
    }

    /// The physical area subtended by the beam at a distance. The result is
    /// in units of `distance` squared (e.g. parsecs in, pc² out).
    pub fn projected_area(&self, distance: f64) -> f64 {
        self.solid_angle() * distance * distance
    }

    /// The Rayleigh–Jeans conversion factor between a flux density
    /// \[Jy/beam\] and a brightness temperature \[K\] at the given
    /// frequency.
    ///
    /// The frequency must carry a real frequency unit; a unitless value is
    /// refused.
    pub fn jtok_factor(&self, freq: Freq) -> Result<f64, BeamError> {
        if freq.unit == FreqUnit::NoUnit {
            return Err(BeamError::NotAFrequency(freq.value));
        }
        let nu_hz = freq.to_hz();
        Ok(JY * VEL_C * VEL_C / (2.0 * BOLTZMANN * nu_hz * nu_hz * self.solid_angle()))
    }

    /// Convert a flux density \[Jy/beam\] to a brightness temperature \[K\]
    /// at the given frequency.
    pub fn jtok(&self, freq: Freq, flux_density_jy: f64) -> Result<f64, BeamError> {
        Ok(self.jtok_factor(freq)? * flux_density_jy)
    }

    /// Convolve this beam with another.
    pub fn convolve(&self, other: &Beam) -> Beam {
        convolution::convolve(self, other)
    }

    /// Deconvolve another beam from this one. When `other` cannot be
    /// removed from `self`, `failure_returns_pointlike` selects between
    /// returning a zero-size beam and an error.
    pub fn deconvolve(
        &self,
        other: &Beam,
        failure_returns_pointlike: bool,
    ) -> Result<Beam, ConvolutionError> {
        convolution::deconvolve(self, other, failure_returns_pointlike)
    }

    /// The canonical persisted form: the BMAJ, BMIN and BPA keywords, in
    /// degrees.
    pub fn to_header_keywords(&self) -> [(&'static str, f64); 3] {
        [("BMAJ", self.major), ("BMIN", self.minor), ("BPA", self.pa)]
    }

    /// A LaTeX rendering of the beam, axes in the display unit.
    pub fn to_latex(&self) -> String {
        let unit = self.display_unit.latex_symbol();
        format!(
            "Beam: BMAJ=${maj}^{{{unit}}}$ BMIN=${min}^{{{unit}}}$ BPA=${pa}^{{\\circ}}$",
            maj = Angle::degrees(self.major).to(self.display_unit).value,
            min = Angle::degrees(self.minor).to(self.display_unit).value,
            pa = self.pa,
        )
    }
}

impl fmt::Display for Beam {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Beam: BMAJ={} BMIN={} BPA={}",
            Angle::degrees(self.major).to(self.display_unit),
            Angle::degrees(self.minor).to(self.display_unit),
            Angle::degrees(self.pa),
        )
    }
}

impl PartialEq for Beam {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor && self.pa == other.pa
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for Beam {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.major, &other.major, epsilon)
            && f64::abs_diff_eq(&self.minor, &other.minor, epsilon)
            && f64::abs_diff_eq(&self.pa, &other.pa, epsilon)
    }
}
