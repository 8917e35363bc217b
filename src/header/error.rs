// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use super::fits::FitsError;

/// Errors associated with extracting a beam from a header.
#[derive(Error, Debug)]
pub enum HeaderError {
    /// Neither the standard keywords nor an AIPS HISTORY record are present.
    #[error("No BMAJ keyword found, and the header does not appear to hold an AIPS CLEAN record")]
    NoBeamInfo,

    #[error("'{0}' does not have a recognised FITS file extension (.fits, .fits.gz, .fit, .fit.gz)")]
    UnrecognisedExtension(PathBuf),

    #[error("Found an AIPS CLEAN record, but could not parse its values: '{0}'")]
    UnparsableAipsLine(String),

    #[error(transparent)]
    Fits(#[from] FitsError),
}
