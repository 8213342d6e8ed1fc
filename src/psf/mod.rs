// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The point-spread function of the FOXSI optics.
//!
//! The PSF is a sum of three elliptical Gaussians centred on the source. Each
//! Gaussian's amplitude and widths are polynomials in the off-axis angle, and
//! the ellipses are rotated by the polar angle of the pointing offset.
//!
//! Pointing offsets (pitch and yaw) and the off-axis angle are in arcminutes.
//! PSF coordinates and widths are in arcseconds.

mod error;

pub use error::PsfError;

use std::path::Path;

use log::{debug, trace, warn};
use ndarray::prelude::*;

use crate::{
    data::{parse_number, ReferenceData, PSF_PARAMETERS_FILE},
    math::{arange, polyval},
};

/// The number of Gaussians in the PSF.
pub const NUM_GAUSSIANS: usize = 3;

/// The number of polynomial rows needed to describe the PSF: an amplitude, an
/// x width and a y width per Gaussian.
pub const NUM_PSF_ROWS: usize = 3 * NUM_GAUSSIANS;

/// The pixel scale of [`Psf::image`] used by the CLI by default \[arcsec\].
pub const DEFAULT_IMAGE_SCALE_ARCSEC: f64 = 0.1;

/// The half width of [`Psf::image`] used by the CLI by default \[arcsec\].
pub const DEFAULT_IMAGE_HALF_WIDTH_ARCSEC: f64 = 20.0;

/// The most pixels along one side of a PSF image.
pub const MAX_IMAGE_WIDTH_PIXELS: usize = 4096;

/// A two-dimensional elliptical Gaussian centred on (`xo`, `yo`), with widths
/// `sigma_x` and `sigma_y` along axes rotated by `theta` \[radians\].
#[allow(clippy::too_many_arguments)]
pub fn gauss2d(
    x: f64,
    y: f64,
    amplitude: f64,
    xo: f64,
    yo: f64,
    sigma_x: f64,
    sigma_y: f64,
    theta: f64,
) -> f64 {
    let sigma_x_2 = sigma_x * sigma_x;
    let sigma_y_2 = sigma_y * sigma_y;
    let (sin_theta, cos_theta) = theta.sin_cos();
    let sin_theta_2 = sin_theta * sin_theta;
    let cos_theta_2 = cos_theta * cos_theta;
    let sin_2theta = (2.0 * theta).sin();

    let a = cos_theta_2 / (2. * sigma_x_2) + sin_theta_2 / (2. * sigma_y_2);
    let b = -sin_2theta / (4. * sigma_x_2) + sin_2theta / (4. * sigma_y_2);
    let c = sin_theta_2 / (2. * sigma_x_2) + cos_theta_2 / (2. * sigma_y_2);

    let x_diff = x - xo;
    let y_diff = y - yo;
    amplitude * (-(a * x_diff * x_diff + 2. * b * x_diff * y_diff + c * y_diff * y_diff)).exp()
}

/// A sum of [`gauss2d`]s sharing a centre and a rotation. The number of
/// Gaussians is the length of the shortest of `amplitudes`, `sigmas_x` and
/// `sigmas_y`.
#[allow(clippy::too_many_arguments)]
pub fn multi_gauss2d(
    x: f64,
    y: f64,
    amplitudes: &[f64],
    xo: f64,
    yo: f64,
    sigmas_x: &[f64],
    sigmas_y: &[f64],
    theta: f64,
) -> f64 {
    amplitudes
        .iter()
        .zip(sigmas_x)
        .zip(sigmas_y)
        .map(|((&amp, &sx), &sy)| gauss2d(x, y, amp, xo, yo, sx, sy, theta))
        .sum()
}

/// Read the PSF polynomial coefficients; one polynomial per line, highest
/// power first. Blank lines and lines starting with `#` are ignored.
fn read_coefficients(data: &ReferenceData) -> Result<Vec<Vec<f64>>, PsfError> {
    let (file, contents) = data.read_to_string(PSF_PARAMETERS_FILE)?;
    parse_coefficients(&file, &contents)
}

fn parse_coefficients(file: &Path, contents: &str) -> Result<Vec<Vec<f64>>, PsfError> {
    let mut rows = vec![];
    for (i_line, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|v| parse_number(file, i_line + 1, v))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// A rendered PSF.
#[derive(Debug, Clone)]
pub struct PsfImage {
    /// Indexed by (y, x).
    pub data: Array2<f64>,

    /// The coordinates of the pixel centres along both axes \[arcsec\].
    pub axis_arcsec: Vec<f64>,

    /// The size of a pixel \[arcsec\].
    pub scale_arcsec: f64,

    /// The (row, column) of the brightest pixel.
    pub peak_pixel: (usize, usize),

    /// Where the image should be placed on the sky relative to the pointing,
    /// i.e. the pitch and yaw \[arcsec\].
    pub shift_arcsec: (f64, f64),
}

/// The PSF for a pointing offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Psf {
    pitch_arcmin: f64,
    yaw_arcmin: f64,
    offaxis_angle_arcmin: f64,
    polar_angle_rad: f64,
    amplitudes: [f64; NUM_GAUSSIANS],
    widths_x_arcsec: [f64; NUM_GAUSSIANS],
    widths_y_arcsec: [f64; NUM_GAUSSIANS],
}

impl Psf {
    /// The PSF at a pointing offset \[arcmin\], using the default reference
    /// data.
    pub fn new(pitch_arcmin: f64, yaw_arcmin: f64) -> Result<Psf, PsfError> {
        Psf::load(&ReferenceData::from_env(), pitch_arcmin, yaw_arcmin)
    }

    pub fn load(data: &ReferenceData, pitch_arcmin: f64, yaw_arcmin: f64) -> Result<Psf, PsfError> {
        let coefficients = read_coefficients(data)?;
        Psf::from_coefficients(&coefficients, pitch_arcmin, yaw_arcmin)
    }

    /// Build a PSF from polynomial coefficients (highest power first). Rows 0
    /// to 2 are the amplitudes, rows 3, 5 and 7 are the x widths and rows 4, 6
    /// and 8 are the y widths of the three Gaussians.
    pub fn from_coefficients<T: AsRef<[f64]>>(
        coefficients: &[T],
        pitch_arcmin: f64,
        yaw_arcmin: f64,
    ) -> Result<Psf, PsfError> {
        if coefficients.len() < NUM_PSF_ROWS {
            return Err(PsfError::WrongNumberOfRows {
                expected: NUM_PSF_ROWS,
                got: coefficients.len(),
            });
        }
        if coefficients.len() > NUM_PSF_ROWS {
            warn!(
                "Ignoring {} extra rows of PSF coefficients",
                coefficients.len() - NUM_PSF_ROWS
            );
        }
        if let Some(i) = coefficients[..NUM_PSF_ROWS]
            .iter()
            .position(|c| c.as_ref().is_empty())
        {
            return Err(PsfError::EmptyRow(i));
        }

        let offaxis_angle_arcmin = pitch_arcmin.hypot(yaw_arcmin);
        let polar_angle_rad = yaw_arcmin.atan2(pitch_arcmin);
        let p = |row: usize| polyval(coefficients[row].as_ref(), offaxis_angle_arcmin);

        let psf = Psf {
            pitch_arcmin,
            yaw_arcmin,
            offaxis_angle_arcmin,
            polar_angle_rad,
            amplitudes: [p(0), p(1), p(2)],
            widths_x_arcsec: [p(3), p(5), p(7)],
            widths_y_arcsec: [p(4), p(6), p(8)],
        };
        debug!(
            "PSF at pitch {pitch_arcmin}', yaw {yaw_arcmin}' (off-axis {offaxis_angle_arcmin:.3}', polar angle {:.2} deg)",
            polar_angle_rad.to_degrees()
        );
        trace!("PSF amplitudes: {:?}", psf.amplitudes);
        trace!("PSF x widths:   {:?}", psf.widths_x_arcsec);
        trace!("PSF y widths:   {:?}", psf.widths_y_arcsec);
        Ok(psf)
    }

    pub fn pitch_arcmin(&self) -> f64 {
        self.pitch_arcmin
    }

    pub fn yaw_arcmin(&self) -> f64 {
        self.yaw_arcmin
    }

    /// The angular distance of the source from the optical axis \[arcmin\].
    pub fn offaxis_angle_arcmin(&self) -> f64 {
        self.offaxis_angle_arcmin
    }

    /// The direction of the offset, measured from the pitch axis towards the
    /// yaw axis \[radians\].
    pub fn polar_angle_rad(&self) -> f64 {
        self.polar_angle_rad
    }

    pub fn amplitudes(&self) -> &[f64; NUM_GAUSSIANS] {
        &self.amplitudes
    }

    pub fn widths_x_arcsec(&self) -> &[f64; NUM_GAUSSIANS] {
        &self.widths_x_arcsec
    }

    pub fn widths_y_arcsec(&self) -> &[f64; NUM_GAUSSIANS] {
        &self.widths_y_arcsec
    }

    /// The PSF intensity at a position relative to the source \[arcsec\].
    pub fn evaluate(&self, x_arcsec: f64, y_arcsec: f64) -> f64 {
        multi_gauss2d(
            x_arcsec,
            y_arcsec,
            &self.amplitudes,
            0.0,
            0.0,
            &self.widths_x_arcsec,
            &self.widths_y_arcsec,
            self.polar_angle_rad,
        )
    }

    /// Evaluate the PSF on the grid spanned by `xs` and `ys` \[arcsec\]. The
    /// result is indexed by (y, x).
    pub fn evaluate_grid(&self, xs_arcsec: &[f64], ys_arcsec: &[f64]) -> Array2<f64> {
        Array2::from_shape_fn((ys_arcsec.len(), xs_arcsec.len()), |(iy, ix)| {
            self.evaluate(xs_arcsec[ix], ys_arcsec[iy])
        })
    }

    /// Render the PSF on a square grid of pixels `scale_arcsec` wide, covering
    /// `[-half_width_arcsec, half_width_arcsec)` on both axes.
    /// Grids wider than [`MAX_IMAGE_WIDTH_PIXELS`] are rejected.
    pub fn image(&self, scale_arcsec: f64, half_width_arcsec: f64) -> Result<PsfImage, PsfError> {
        let bad_grid = || PsfError::BadGrid {
            scale: scale_arcsec,
            half_width: half_width_arcsec,
        };
        // Check the width before allocating anything.
        let width = (2.0 * half_width_arcsec / scale_arcsec).ceil();
        if !(width >= 1.0 && width <= MAX_IMAGE_WIDTH_PIXELS as f64) {
            return Err(bad_grid());
        }
        let axis = arange(-half_width_arcsec, half_width_arcsec, scale_arcsec);
        if axis.is_empty() || axis.len() > MAX_IMAGE_WIDTH_PIXELS {
            return Err(bad_grid());
        }
        let data = self.evaluate_grid(&axis, &axis);

        let mut peak_pixel = (0, 0);
        let mut peak = f64::NEG_INFINITY;
        for ((iy, ix), &v) in data.indexed_iter() {
            if v > peak {
                peak = v;
                peak_pixel = (iy, ix);
            }
        }
        debug!(
            "Rendered a {}x{} PSF image; peak {peak} at pixel {peak_pixel:?}",
            axis.len(),
            axis.len()
        );

        Ok(PsfImage {
            data,
            axis_arcsec: axis,
            scale_arcsec,
            peak_pixel,
            shift_arcsec: (self.pitch_arcmin * 60.0, self.yaw_arcmin * 60.0),
        })
    }
}
