// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with the telescope optics.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::DataError;

#[derive(Error, Debug)]
pub enum TelescopeError {
    #[error("Shell {0} is missing")]
    MissingShell(u32),

    #[error("None of the shells in '{0}' are installed")]
    NoShells(PathBuf),

    #[error("'{file}': column '{column}' isn't a shell number")]
    BadShellColumn { file: PathBuf, column: String },

    #[error("'{0}' has no units row after its header")]
    MissingUnits(PathBuf),

    #[error(transparent)]
    Data(#[from] DataError),
}
