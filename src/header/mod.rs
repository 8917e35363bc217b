// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! FITS-style headers, and recovering a beam from them.
//!
//! Two conventions are supported: the standard BMAJ/BMIN/BPA keywords, and
//! the legacy AIPS convention where the CLEAN beam lives in free-text
//! HISTORY records.

mod error;
mod fits;
#[cfg(test)]
mod tests;

pub use error::HeaderError;
pub use fits::FitsError;

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::beam::Beam;
use crate::units::Angle;

/// Filename extensions recognised as FITS files.
pub(crate) const FITS_FILE_EXTENSIONS: [&str; 4] = [".fits", ".fits.gz", ".fit", ".fit.gz"];

/// The value of a single header card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardValue {
    Float(f64),
    Int(i64),
    Str(String),
    Bool(bool),
}

impl CardValue {
    /// The value as a float, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CardValue::Float(f) => Some(*f),
            CardValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<f64> for CardValue {
    fn from(value: f64) -> CardValue {
        CardValue::Float(value)
    }
}

impl From<i64> for CardValue {
    fn from(value: i64) -> CardValue {
        CardValue::Int(value)
    }
}

impl From<&str> for CardValue {
    fn from(value: &str) -> CardValue {
        CardValue::Str(value.to_string())
    }
}

impl From<String> for CardValue {
    fn from(value: String) -> CardValue {
        CardValue::Str(value)
    }
}

impl From<bool> for CardValue {
    fn from(value: bool) -> CardValue {
        CardValue::Bool(value)
    }
}

/// An ordered, case-insensitive mapping of FITS keywords to values, plus the
/// ordered HISTORY records.
///
/// Keywords are stored uppercase; lookups may use any case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitsHeader {
    cards: IndexMap<String, CardValue>,
    history: Vec<String>,
}

impl FitsHeader {
    pub fn new() -> FitsHeader {
        FitsHeader::default()
    }

    /// Insert or update a card.
    pub fn insert<V: Into<CardValue>>(&mut self, keyword: &str, value: V) {
        self.cards.insert(keyword.to_uppercase(), value.into());
    }

    pub fn get(&self, keyword: &str) -> Option<&CardValue> {
        self.cards.get(&keyword.to_uppercase())
    }

    /// Get a keyword's value as a float, if it is present and numeric.
    pub fn get_f64(&self, keyword: &str) -> Option<f64> {
        self.get(keyword).and_then(CardValue::as_f64)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.cards.contains_key(&keyword.to_uppercase())
    }

    /// Append a HISTORY record.
    pub fn push_history<S: Into<String>>(&mut self, record: S) {
        self.history.push(record.into());
    }

    /// The HISTORY records, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Iterate over the cards in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardValue)> {
        self.cards.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Beam {
    /// Extract a beam from a header. The standard keywords are attempted
    /// first; failing that, the HISTORY records are searched for an
    /// AIPS-style CLEAN entry.
    pub fn from_fits_header(hdr: &FitsHeader) -> Result<Beam, HeaderError> {
        // If we find a major-axis keyword then we are in keyword mode. Else
        // look to see if this is an AIPS header.
        if let Some(major) = hdr.get_f64("BMAJ") {
            debug!("Using the BMAJ/BMIN/BPA keywords");
            let minor = hdr.get_f64("BMIN").map(Angle::degrees);
            let pa = hdr.get_f64("BPA").map(Angle::degrees);
            return Ok(Beam::from_fwhm(Angle::degrees(major), minor, pa));
        }

        trace!("No BMAJ keyword; looking for an AIPS CLEAN record");
        match beam_from_aips_history(hdr.history())? {
            Some(beam) => Ok(beam),
            None => Err(HeaderError::NoBeamInfo),
        }
    }

    /// Extract a beam from the header of a FITS file on disk.
    pub fn from_fits_file<P: AsRef<Path>>(path: P) -> Result<Beam, HeaderError> {
        fn inner(path: &Path) -> Result<Beam, HeaderError> {
            let lower = path.to_string_lossy().to_lowercase();
            if !FITS_FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                return Err(HeaderError::UnrecognisedExtension(path.to_path_buf()));
            }
            let hdr = FitsHeader::from_file(path)?;
            Beam::from_fits_header(&hdr)
        }
        inner(path.as_ref())
    }

    /// Insert or update this beam's keywords on the supplied header.
    pub fn attach_to_header(&self, hdr: &mut FitsHeader) {
        for (keyword, value) in self.to_header_keywords() {
            hdr.insert(keyword, value);
        }
    }
}

/// Find the CLEAN beam in AIPS HISTORY records. AIPS holds the beam in lines
/// like
///
/// ```text
/// AIPS   CLEAN BMAJ=  1.7599E-03 BMIN=  1.5740E-03 BPA=   2.61
/// ```
///
/// with the values in degrees. The last such line is the one that applies.
fn beam_from_aips_history(history: &[String]) -> Result<Option<Beam>, HeaderError> {
    let line = match history.iter().rev().find(|line| line.contains("BMAJ")) {
        Some(line) => line,
        None => return Ok(None),
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let value = |i: usize| -> Result<f64, HeaderError> {
        tokens
            .get(i)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| HeaderError::UnparsableAipsLine(line.clone()))
    };
    let bmaj = value(3)?;
    let bmin = value(5)?;
    let bpa = value(7)?;
    Ok(Some(Beam::from_degrees(bmaj, bmin, bpa)))
}
