// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::Beam;

/// Errors associated with a beam's derived quantities.
#[derive(Error, Debug)]
pub enum BeamError {
    #[error("The frequency {0} was supplied without a frequency unit; try e.g. Freq::ghz or '1.4GHz'")]
    NotAFrequency(f64),
}

/// Errors associated with deconvolving one beam from another.
#[derive(Error, Debug, PartialEq)]
pub enum ConvolutionError {
    /// The covariance difference is not positive semi-definite; the second
    /// beam cannot be removed from the first.
    #[error("Could not deconvolve ({other}) from ({beam})")]
    Undeconvolvable { beam: Beam, other: Beam },
}
