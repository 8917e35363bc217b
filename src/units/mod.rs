// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Minimal unit bookkeeping: angles and frequencies carried as a value with a
//! unit tag, plus parsing of strings like "32 arcsec" or "1.4GHz".
//!
//! A quantity may be supplied without a unit (`NoUnit`); callers decide
//! whether that is acceptable. Beam construction assumes degrees and warns,
//! while brightness-temperature conversion refuses to guess a frequency.

mod error;

pub use error::UnitParseError;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::constants::PI;

/// Supported angular units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
pub enum AngleUnit {
    /// Degrees
    Deg,

    /// Arcminutes
    Arcmin,

    /// Arcseconds
    Arcsec,

    /// Radians
    Rad,

    /// No unit was attached. Assumed to be degrees wherever it matters.
    NoUnit,
}

impl AngleUnit {
    /// How many degrees one of this unit is.
    pub fn in_degrees(self) -> f64 {
        match self {
            AngleUnit::Deg | AngleUnit::NoUnit => 1.0,
            AngleUnit::Arcmin => 1.0 / 60.0,
            AngleUnit::Arcsec => 1.0 / 3600.0,
            AngleUnit::Rad => 180.0 / PI,
        }
    }

    /// The symbol used when displaying a quantity of this unit.
    pub fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Deg | AngleUnit::NoUnit => "deg",
            AngleUnit::Arcmin => "arcmin",
            AngleUnit::Arcsec => "arcsec",
            AngleUnit::Rad => "rad",
        }
    }

    /// The symbol used when rendering a quantity of this unit in LaTeX.
    pub fn latex_symbol(self) -> &'static str {
        match self {
            AngleUnit::Deg | AngleUnit::NoUnit => "\\circ",
            AngleUnit::Arcmin => "'",
            AngleUnit::Arcsec => "''",
            AngleUnit::Rad => "\\mathrm{rad}",
        }
    }
}

/// An angle: a value and the unit it was specified in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Angle {
        Angle { value, unit }
    }

    pub fn degrees(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Deg)
    }

    pub fn arcmin(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Arcmin)
    }

    pub fn arcsec(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Arcsec)
    }

    pub fn radians(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Rad)
    }

    /// An angle specified without any unit.
    pub fn unitless(value: f64) -> Angle {
        Angle::new(value, AngleUnit::NoUnit)
    }

    /// This angle in degrees. Unitless values are taken to be degrees.
    pub fn to_degrees(self) -> f64 {
        self.value * self.unit.in_degrees()
    }

    /// This angle in radians. Unitless values are taken to be degrees.
    pub fn to_radians(self) -> f64 {
        self.to_degrees() * PI / 180.0
    }

    /// Express this angle in another unit.
    pub fn to(self, unit: AngleUnit) -> Angle {
        Angle::new(self.to_degrees() / unit.in_degrees(), unit)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

impl FromStr for Angle {
    type Err = UnitParseError;

    /// Parse a string that may have an angular unit attached to it.
    fn from_str(s: &str) -> Result<Angle, UnitParseError> {
        // Try to parse a naked number.
        let maybe_number: Option<f64> = s.trim().parse().ok();
        if let Some(number) = maybe_number {
            return Ok(Angle::unitless(number));
        };

        // That didn't work; let's search over our supported units.
        for unit in AngleUnit::iter().filter(|&u| u != AngleUnit::NoUnit) {
            let unit_str: &'static str = unit.into();
            let suffix = s
                .trim()
                .trim_start_matches(|c| char::is_numeric(c) || c == '.')
                .trim();
            if suffix.to_uppercase() == unit_str.to_uppercase() {
                let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
                let number: f64 = match prefix.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        return Err(UnitParseError::GotAngleUnitButCantParse {
                            input: s.to_string(),
                            unit: unit_str,
                        })
                    }
                };
                return Ok(Angle::new(number, unit));
            }
        }

        // If we made it this far, we don't know how to parse the string.
        Err(UnitParseError::Unknown {
            input: s.to_string(),
            unit_type: "angle",
        })
    }
}

/// Supported frequency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[allow(non_camel_case_types)]
pub enum FreqUnit {
    /// Hertz
    Hz,

    /// kiloHertz
    kHz,

    /// megaHertz
    MHz,

    /// gigaHertz
    GHz,

    /// No unit was attached.
    NoUnit,
}

impl FreqUnit {
    /// How many hertz one of this unit is.
    pub fn in_hz(self) -> f64 {
        match self {
            FreqUnit::Hz | FreqUnit::NoUnit => 1.0,
            FreqUnit::kHz => 1e3,
            FreqUnit::MHz => 1e6,
            FreqUnit::GHz => 1e9,
        }
    }
}

/// A frequency: a value and the unit it was specified in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Freq {
    pub value: f64,
    pub unit: FreqUnit,
}

impl Freq {
    pub fn new(value: f64, unit: FreqUnit) -> Freq {
        Freq { value, unit }
    }

    pub fn hz(value: f64) -> Freq {
        Freq::new(value, FreqUnit::Hz)
    }

    pub fn khz(value: f64) -> Freq {
        Freq::new(value, FreqUnit::kHz)
    }

    pub fn mhz(value: f64) -> Freq {
        Freq::new(value, FreqUnit::MHz)
    }

    pub fn ghz(value: f64) -> Freq {
        Freq::new(value, FreqUnit::GHz)
    }

    /// A frequency specified without any unit.
    pub fn unitless(value: f64) -> Freq {
        Freq::new(value, FreqUnit::NoUnit)
    }

    /// This frequency in hertz. Unitless values are taken to be hertz.
    pub fn to_hz(self) -> f64 {
        self.value * self.unit.in_hz()
    }
}

impl fmt::Display for Freq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.unit {
            FreqUnit::NoUnit => write!(f, "{}", self.value),
            _ => {
                let unit_str: &'static str = self.unit.into();
                write!(f, "{} {}", self.value, unit_str)
            }
        }
    }
}

impl FromStr for Freq {
    type Err = UnitParseError;

    /// Parse a string that may have a frequency unit attached to it.
    fn from_str(s: &str) -> Result<Freq, UnitParseError> {
        // Try to parse a naked number.
        let maybe_number: Option<f64> = s.trim().parse().ok();
        if let Some(number) = maybe_number {
            return Ok(Freq::unitless(number));
        };

        // That didn't work; let's search over our supported units.
        for unit in FreqUnit::iter().filter(|&u| u != FreqUnit::NoUnit) {
            let unit_str: &'static str = unit.into();
            let suffix = s
                .trim()
                .trim_start_matches(|c| char::is_numeric(c) || c == '.')
                .trim();
            if suffix.to_uppercase() == unit_str.to_uppercase() {
                let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
                let number: f64 = match prefix.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        return Err(UnitParseError::GotFreqUnitButCantParse {
                            input: s.to_string(),
                            unit: unit_str,
                        })
                    }
                };
                return Ok(Freq::new(number, unit));
            }
        }

        // If we made it this far, we don't know how to parse the string.
        Err(UnitParseError::Unknown {
            input: s.to_string(),
            unit_type: "frequency",
        })
    }
}
