// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with instrument responses.

use thiserror::Error;

use crate::{data::DataError, material::MaterialError, telescope::TelescopeError};

#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Shutter state {got} is invalid; valid states are 0 to {max}")]
    InvalidShutterState { got: usize, max: usize },

    #[error("STC kind '{0}' is invalid; valid kinds are Q and F")]
    InvalidStcKind(String),

    #[error("The number of telescopes must be at least 1")]
    ZeroTelescopes,

    #[error("The energy grid has {energies} points but the optic area has {areas}")]
    LengthMismatch { energies: usize, areas: usize },

    #[error("The energy grid must be non-empty and strictly ascending")]
    BadEnergyGrid,

    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Telescope(#[from] TelescopeError),

    #[error(transparent)]
    Data(#[from] DataError),
}
