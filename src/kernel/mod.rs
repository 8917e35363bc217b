// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Discretized 2D kernels representing a beam in pixel space.
//!
//! The Gaussian and tophat variants share the same bounding-box sizing; they
//! differ in amplitude normalisation, effective axis scaling and truncation
//! semantics. Grids always have odd dimensions so the beam centre lands on a
//! pixel.

mod error;

pub use error::KernelError;

use itertools::Itertools;
use log::warn;
use ndarray::{Array2, Zip};

use crate::beam::Beam;
use crate::constants::{PI, SIGMA_TO_FWHM, TAU};
use crate::math::{ellipse_extent, round_up_to_odd_integer};

/// The default support scaling of a Gaussian kernel.
pub const DEFAULT_GAUSSIAN_SUPPORT_SCALING: f64 = 8.0;

/// The default support scaling of a tophat kernel.
pub const DEFAULT_TOPHAT_SUPPORT_SCALING: f64 = 1.0;

/// The default subgrid factor of [`DiscretizationMode::Oversample`].
pub const DEFAULT_OVERSAMPLE_FACTOR: usize = 10;

/// How model values are assigned to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscretizationMode {
    /// Take the model value at the centre of each pixel.
    #[default]
    Center,

    /// Average the model values at the four corners of each pixel.
    LinearInterp,

    /// Average the model over a factor-by-factor subgrid of each pixel.
    Oversample { factor: usize },

    /// Integrate the model over each pixel (composite 2D Simpson rule).
    Integrate,
}

impl DiscretizationMode {
    /// Oversampling with the default factor.
    pub fn oversample() -> DiscretizationMode {
        DiscretizationMode::Oversample {
            factor: DEFAULT_OVERSAMPLE_FACTOR,
        }
    }
}

/// Options controlling kernel rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KernelParams {
    /// Multiplier on the beam's bounding box that sets the grid size. When
    /// `None`, the variant's default applies
    /// ([`DEFAULT_GAUSSIAN_SUPPORT_SCALING`] or
    /// [`DEFAULT_TOPHAT_SUPPORT_SCALING`]).
    pub support_scaling: Option<f64>,

    /// Explicit grid width \[pixels\]; must be odd.
    pub x_size: Option<usize>,

    /// Explicit grid height \[pixels\]; must be odd.
    pub y_size: Option<usize>,

    pub mode: DiscretizationMode,
}

/// A 2D filter kernel with odd dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    array: Array2<f64>,
    truncation: f64,
}

impl Kernel {
    /// The rasterized kernel. Rows are y, columns are x.
    pub fn array(&self) -> &Array2<f64> {
        &self.array
    }

    /// (height, width) \[pixels\]
    pub fn shape(&self) -> (usize, usize) {
        self.array.dim()
    }

    /// Fractional deviation of the kernel's mass from the ideal continuous
    /// integral: 0 for exactly-bounded shapes, small and positive for
    /// infinite-support shapes clipped to a finite grid.
    pub fn truncation(&self) -> f64 {
        self.truncation
    }

    pub fn into_array(self) -> Array2<f64> {
        self.array
    }
}

/// The two kernel shapes, in pixel units, with an orientation in radians.
#[derive(Debug, Clone, Copy)]
enum KernelShape {
    /// An elliptical Gaussian with unit volume.
    Gaussian {
        sigma_maj: f64,
        sigma_min: f64,
        pa: f64,
    },

    /// A uniform ellipse with unit volume.
    Tophat { r_maj: f64, r_min: f64, pa: f64 },
}

impl KernelShape {
    fn default_support_scaling(self) -> f64 {
        match self {
            KernelShape::Gaussian { .. } => DEFAULT_GAUSSIAN_SUPPORT_SCALING,
            KernelShape::Tophat { .. } => DEFAULT_TOPHAT_SUPPORT_SCALING,
        }
    }

    /// Half-extents of the bounding box of the shape's defining ellipse.
    fn extent(self) -> (f64, f64) {
        match self {
            KernelShape::Gaussian {
                sigma_maj,
                sigma_min,
                pa,
            } => ellipse_extent(sigma_maj, sigma_min, pa),
            KernelShape::Tophat { r_maj, r_min, pa } => ellipse_extent(r_maj, r_min, pa),
        }
    }

    /// The model value at pixel offsets (x, y) from the kernel centre.
    fn evaluate(self, x: f64, y: f64) -> f64 {
        match self {
            KernelShape::Gaussian {
                sigma_maj,
                sigma_min,
                pa,
            } => {
                let (sin_pa, cos_pa) = pa.sin_cos();
                let u = x * cos_pa + y * sin_pa;
                let v = -x * sin_pa + y * cos_pa;
                let amplitude = 1.0 / (TAU * sigma_maj * sigma_min);
                amplitude * (-0.5 * ((u / sigma_maj).powi(2) + (v / sigma_min).powi(2))).exp()
            }

            KernelShape::Tophat { r_maj, r_min, pa } => {
                let (sin_pa, cos_pa) = pa.sin_cos();
                let u = x * cos_pa + y * sin_pa;
                let v = -x * sin_pa + y * cos_pa;
                if (u / r_maj).powi(2) + (v / r_min).powi(2) <= 1.0 {
                    1.0 / (PI * r_maj * r_min)
                } else {
                    0.0
                }
            }
        }
    }

    /// Truncation of a rasterized array of this shape.
    fn truncation(self, array: &Array2<f64>) -> f64 {
        match self {
            // Mass is lost to the finite grid.
            KernelShape::Gaussian { .. } => (1.0 - array.sum()).abs(),
            // Support is exactly bounded by the ellipse.
            KernelShape::Tophat { .. } => 0.0,
        }
    }
}

/// Rasterize `beam` as an elliptical Gaussian kernel.
///
/// `pixel_scale_deg` is the size of a pixel in degrees.
pub fn gaussian_kernel(
    beam: &Beam,
    pixel_scale_deg: f64,
    params: &KernelParams,
) -> Result<Kernel, KernelError> {
    check_pixel_scale(pixel_scale_deg)?;
    warn!("The kernel does not account for any misalignment between the pixel and world coordinate axes");

    let shape = KernelShape::Gaussian {
        sigma_maj: beam.major / (pixel_scale_deg * SIGMA_TO_FWHM),
        sigma_min: beam.minor / (pixel_scale_deg * SIGMA_TO_FWHM),
        pa: beam.pa.to_radians(),
    };
    build(shape, params)
}

/// Rasterize `beam` as a flat-top elliptical kernel whose area matches the
/// equivalent Gaussian's: π r² = 2π σ², i.e. r = √2 σ.
pub fn tophat_kernel(
    beam: &Beam,
    pixel_scale_deg: f64,
    params: &KernelParams,
) -> Result<Kernel, KernelError> {
    check_pixel_scale(pixel_scale_deg)?;
    warn!("The kernel does not account for any misalignment between the pixel and world coordinate axes");

    let gauss_to_top = 2.0_f64.sqrt();
    let shape = KernelShape::Tophat {
        r_maj: gauss_to_top * beam.major / (pixel_scale_deg * SIGMA_TO_FWHM),
        r_min: gauss_to_top * beam.minor / (pixel_scale_deg * SIGMA_TO_FWHM),
        pa: beam.pa.to_radians(),
    };
    build(shape, params)
}

impl Beam {
    /// Returns an elliptical Gaussian kernel of the beam.
    pub fn as_kernel(
        &self,
        pixel_scale_deg: f64,
        params: &KernelParams,
    ) -> Result<Kernel, KernelError> {
        gaussian_kernel(self, pixel_scale_deg, params)
    }

    /// Returns an elliptical tophat kernel of the beam.
    pub fn as_tophat_kernel(
        &self,
        pixel_scale_deg: f64,
        params: &KernelParams,
    ) -> Result<Kernel, KernelError> {
        tophat_kernel(self, pixel_scale_deg, params)
    }
}

fn check_pixel_scale(pixel_scale_deg: f64) -> Result<(), KernelError> {
    if pixel_scale_deg.is_finite() && pixel_scale_deg > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidPixelScale(pixel_scale_deg))
    }
}

/// Size the grid and rasterize the shape onto it.
fn build(shape: KernelShape, params: &KernelParams) -> Result<Kernel, KernelError> {
    let support_scaling = params
        .support_scaling
        .unwrap_or_else(|| shape.default_support_scaling());
    let (dx, dy) = shape.extent();
    let default_size = round_up_to_odd_integer(support_scaling * 2.0 * dx.max(dy));

    let x_size = params.x_size.unwrap_or(default_size);
    let y_size = params.y_size.unwrap_or(default_size);
    if x_size % 2 == 0 {
        return Err(KernelError::EvenKernelSize(x_size));
    }
    if y_size % 2 == 0 {
        return Err(KernelError::EvenKernelSize(y_size));
    }

    let x_centre = (x_size / 2) as f64;
    let y_centre = (y_size / 2) as f64;

    let mut array = Array2::zeros((y_size, x_size));
    match params.mode {
        DiscretizationMode::Center => {
            Zip::indexed(&mut array).for_each(|(row, col), v| {
                *v = shape.evaluate(col as f64 - x_centre, row as f64 - y_centre);
            });
        }

        DiscretizationMode::LinearInterp => {
            Zip::indexed(&mut array).for_each(|(row, col), v| {
                let x = col as f64 - x_centre;
                let y = row as f64 - y_centre;
                *v = 0.25
                    * (shape.evaluate(x - 0.5, y - 0.5)
                        + shape.evaluate(x + 0.5, y - 0.5)
                        + shape.evaluate(x - 0.5, y + 0.5)
                        + shape.evaluate(x + 0.5, y + 0.5));
            });
        }

        // The subgrid modes do real work per pixel; no cell depends on any
        // other, so spread them over threads.
        DiscretizationMode::Oversample { factor } => {
            let factor = factor.max(1);
            Zip::indexed(&mut array).par_for_each(|(row, col), v| {
                *v = oversample_pixel(shape, col as f64 - x_centre, row as f64 - y_centre, factor);
            });
        }

        DiscretizationMode::Integrate => {
            Zip::indexed(&mut array).par_for_each(|(row, col), v| {
                *v = integrate_pixel(shape, col as f64 - x_centre, row as f64 - y_centre);
            });
        }
    }

    let truncation = shape.truncation(&array);
    Ok(Kernel { array, truncation })
}

/// Mean of the model over a factor-by-factor subgrid of the pixel.
fn oversample_pixel(shape: KernelShape, x: f64, y: f64, factor: usize) -> f64 {
    let step = 1.0 / factor as f64;
    let offsets = (0..factor).map(|i| -0.5 + step * (i as f64 + 0.5));
    offsets
        .clone()
        .cartesian_product(offsets)
        .map(|(dy, dx)| shape.evaluate(x + dx, y + dy))
        .sum::<f64>()
        * step
        * step
}

/// Integrate the model over the pixel with a composite 2D Simpson rule.
fn integrate_pixel(shape: KernelShape, x: f64, y: f64) -> f64 {
    // Subdivisions per axis; must be even.
    const N: usize = 8;
    let h = 1.0 / N as f64;
    let weight = |i: usize| -> f64 {
        if i == 0 || i == N {
            1.0
        } else if i % 2 == 1 {
            4.0
        } else {
            2.0
        }
    };

    let mut sum = 0.0;
    for i in 0..=N {
        let wx = weight(i);
        let dx = -0.5 + h * i as f64;
        for j in 0..=N {
            sum += wx * weight(j) * shape.evaluate(x + dx, y + (-0.5 + h * j as f64));
        }
    }
    sum * (h / 3.0) * (h / 3.0)
}
