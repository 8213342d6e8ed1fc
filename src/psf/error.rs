// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with the point-spread function.

use thiserror::Error;

use crate::data::DataError;

#[derive(Error, Debug)]
pub enum PsfError {
    #[error("Expected at least {expected} rows of PSF polynomial coefficients, but got {got}")]
    WrongNumberOfRows { expected: usize, got: usize },

    #[error("Row {0} of the PSF polynomial coefficients is empty")]
    EmptyRow(usize),

    #[error("Can't make a PSF image with a pixel scale of {scale} arcsec and a half width of {half_width} arcsec")]
    BadGrid { scale: f64, half_width: f64 },

    #[error(transparent)]
    Data(#[from] DataError),
}
