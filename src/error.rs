// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all radio_psf-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PsfError {
    #[error("{0}")]
    Beam(#[from] crate::beam::BeamError),

    #[error("{0}")]
    Convolution(#[from] crate::beam::ConvolutionError),

    #[error("{0}")]
    Header(#[from] crate::header::HeaderError),

    #[error("{0}")]
    Kernel(#[from] crate::kernel::KernelError),

    #[error("{0}")]
    UnitParse(#[from] crate::units::UnitParseError),
}
