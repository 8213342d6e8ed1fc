// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with materials and their attenuation curves.

use thiserror::Error;

use crate::data::DataError;

#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("Unknown material '{name}'. Available materials: {available}")]
    UnknownMaterial { name: String, available: String },

    #[error("Material thickness must be a non-negative number, but got {0} mm")]
    BadThickness(f64),

    #[error("Material density must be positive, but got {0} g/cm^3")]
    BadDensity(f64),

    #[error("The attenuation curve has {energies} energies but {coefficients} coefficients")]
    CurveLengthMismatch { energies: usize, coefficients: usize },

    #[error("An attenuation curve needs at least 2 points, but only {0} were given")]
    CurveTooShort(usize),

    #[error("Attenuation curve energies must be strictly ascending (offending index {0})")]
    CurveNotAscending(usize),

    #[error("Attenuation curve energies and coefficients must be positive (offending index {0})")]
    CurveNotPositive(usize),

    #[error(transparent)]
    Data(#[from] DataError),
}
