// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all foxsi-related errors. This should be the *only* error
//! enum that is publicly visible from the binary.

use thiserror::Error;

use crate::{
    data::{DataError, DATA_DIR_ENV_VAR},
    material::MaterialError,
    psf::PsfError,
    response::ResponseError,
    telescope::TelescopeError,
};

/// The *only* publicly visible error from the foxsi binary.
#[derive(Error, Debug)]
pub enum FoxsiError {
    /// An error related to materials and their attenuation curves.
    #[error("{0}")]
    Material(String),

    /// An error related to building an instrument response.
    #[error("{0}")]
    Response(String),

    /// An error related to the point-spread function.
    #[error("{0}")]
    Psf(String),

    /// An error related to the telescope optics.
    #[error("{0}")]
    Telescope(String),

    /// Missing or malformed reference data.
    #[error("{0}\n\nThe reference-data directory can be changed with --data-dir or the {DATA_DIR_ENV_VAR} environment variable.")]
    Data(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<DataError> for FoxsiError {
    fn from(e: DataError) -> Self {
        Self::Data(e.to_string())
    }
}

impl From<MaterialError> for FoxsiError {
    fn from(e: MaterialError) -> Self {
        let s = e.to_string();
        match e {
            MaterialError::UnknownMaterial { .. }
            | MaterialError::BadThickness(_)
            | MaterialError::BadDensity(_) => Self::Material(s),
            MaterialError::CurveLengthMismatch { .. }
            | MaterialError::CurveTooShort(_)
            | MaterialError::CurveNotAscending(_)
            | MaterialError::CurveNotPositive(_) => Self::Data(s),
            MaterialError::Data(e) => Self::from(e),
        }
    }
}

impl From<TelescopeError> for FoxsiError {
    fn from(e: TelescopeError) -> Self {
        let s = e.to_string();
        match e {
            TelescopeError::MissingShell(_) => Self::Telescope(s),
            TelescopeError::NoShells(_)
            | TelescopeError::BadShellColumn { .. }
            | TelescopeError::MissingUnits(_) => Self::Data(s),
            TelescopeError::Data(e) => Self::from(e),
        }
    }
}

impl From<ResponseError> for FoxsiError {
    fn from(e: ResponseError) -> Self {
        let s = e.to_string();
        match e {
            ResponseError::InvalidShutterState { .. }
            | ResponseError::InvalidStcKind(_)
            | ResponseError::ZeroTelescopes
            | ResponseError::LengthMismatch { .. }
            | ResponseError::BadEnergyGrid => Self::Response(s),
            ResponseError::Material(e) => Self::from(e),
            ResponseError::Telescope(e) => Self::from(e),
            ResponseError::Data(e) => Self::from(e),
        }
    }
}

impl From<PsfError> for FoxsiError {
    fn from(e: PsfError) -> Self {
        let s = e.to_string();
        match e {
            PsfError::BadGrid { .. } => Self::Psf(s),
            PsfError::WrongNumberOfRows { .. } | PsfError::EmptyRow(_) => Self::Data(s),
            PsfError::Data(e) => Self::from(e),
        }
    }
}

impl From<std::io::Error> for FoxsiError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
