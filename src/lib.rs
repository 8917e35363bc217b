// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Modelling of radio-telescope restoring beams as elliptical Gaussians.

A [`Beam`] holds the FWHM major and minor axes and the position angle of the
point-spread function of an observation. Beams can be convolved with and
deconvolved from one another, recovered from FITS headers (standard
BMAJ/BMIN/BPA keywords or legacy AIPS CLEAN HISTORY records), converted
between flux density and brightness temperature, and rasterized into Gaussian
or flat-top filter kernels for image processing.
 */

pub mod beam;
pub mod constants;
pub mod error;
pub mod header;
pub mod kernel;
pub mod math;
pub mod units;

// Re-exports.
pub use beam::{convolve, deconvolve, Beam, BeamError, ConvolutionError};
pub use error::PsfError;
pub use header::{CardValue, FitsError, FitsHeader, HeaderError};
pub use kernel::{
    gaussian_kernel, tophat_kernel, DiscretizationMode, Kernel, KernelError, KernelParams,
};
pub use math::ellipse_extent;
pub use units::{Angle, AngleUnit, Freq, FreqUnit, UnitParseError};

// External re-exports.
pub use ndarray::Array2;
