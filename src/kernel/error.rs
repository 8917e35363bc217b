// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors associated with rasterizing a beam.
#[derive(Error, Debug, PartialEq)]
pub enum KernelError {
    /// Kernel grids must be odd-sized so the beam centre lands on a pixel.
    #[error("Kernel dimensions must be odd, but {0} was requested")]
    EvenKernelSize(usize),

    #[error("The pixel scale must be finite and positive, but {0} degrees/pixel was supplied")]
    InvalidPixelScale(f64),
}
