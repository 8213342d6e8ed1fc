// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading reference data.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Couldn't read '{file}': {err}")]
    Io { file: PathBuf, err: std::io::Error },

    #[error("Couldn't parse the CSV file '{file}': {err}")]
    Csv { file: PathBuf, err: csv::Error },

    #[error("Couldn't decode toml structure from '{file}': {err}")]
    Toml {
        file: PathBuf,
        err: toml::de::Error,
    },

    #[error("'{file}' line {line}: couldn't parse '{value}' as a number")]
    BadNumber {
        file: PathBuf,
        line: usize,
        value: String,
    },

    #[error("'{file}' doesn't have a '{column}' column")]
    MissingColumn { file: PathBuf, column: String },

    #[error("'{file}' doesn't contain any data rows")]
    Empty { file: PathBuf },

    #[error("'{file}' line {line}: energies must be strictly ascending")]
    EnergiesNotAscending { file: PathBuf, line: usize },
}
