// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to locate and read the flat reference-data files.
//!
//! All of the reference data lives in a single directory. By default this is
//! the `data` directory shipped with this crate, but it can be changed with the
//! `FOXSI_DATA_DIR` environment variable (or explicitly with
//! [`ReferenceData::new`]).

mod error;

pub use error::DataError;

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, trace};
use ndarray::prelude::*;

/// The environment variable that overrides the reference-data directory.
pub const DATA_DIR_ENV_VAR: &str = "FOXSI_DATA_DIR";

/// The name of the energy column in every energy-indexed table.
pub const ENERGY_COLUMN: &str = "energy_kev";

pub const EFFECTIVE_AREA_PER_MODULE_FILE: &str = "effective_area_per_module.csv";
pub const EFFECTIVE_AREA_PER_SHELL_FILE: &str = "effective_area_per_shell.csv";
pub const STC_Q_EFFECTIVE_AREA_FILE: &str = "stc_q_effective_area.csv";
pub const STC_F_EFFECTIVE_AREA_FILE: &str = "stc_f_effective_area.csv";
pub const SHELL_PARAMETERS_FILE: &str = "shell_parameters.csv";
pub const MATERIALS_MANIFEST_FILE: &str = "materials.toml";
pub const MASS_ATTENUATION_DIR: &str = "mass_attenuation";
pub const PSF_PARAMETERS_FILE: &str = "psf_parameters.txt";

pub(crate) const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

/// A handle on a reference-data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    dir: PathBuf,
}

impl ReferenceData {
    pub fn new<P: Into<PathBuf>>(dir: P) -> ReferenceData {
        ReferenceData { dir: dir.into() }
    }

    /// Use the directory in `FOXSI_DATA_DIR` if it is set, otherwise the
    /// crate's own `data` directory.
    pub fn from_env() -> ReferenceData {
        match std::env::var_os(DATA_DIR_ENV_VAR) {
            Some(dir) => {
                debug!(
                    "Using reference data from {DATA_DIR_ENV_VAR}: {}",
                    Path::new(&dir).display()
                );
                ReferenceData::new(dir)
            }
            None => ReferenceData::new(DEFAULT_DATA_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The full path of a file relative to the data directory.
    pub fn path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.dir.join(relative)
    }

    /// Read an energy-indexed table from the data directory.
    pub fn read_table<P: AsRef<Path>>(&self, relative: P) -> Result<EnergyTable, DataError> {
        EnergyTable::read(&self.path(relative))
    }

    pub(crate) fn read_to_string<P: AsRef<Path>>(
        &self,
        relative: P,
    ) -> Result<(PathBuf, String), DataError> {
        let file = self.path(relative);
        trace!("Reading {}", file.display());
        match std::fs::read_to_string(&file) {
            Ok(s) => Ok((file, s)),
            Err(err) => Err(DataError::Io { file, err }),
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        ReferenceData::from_env()
    }
}

/// Open a CSV file. Lines starting with `#` are comments and fields are
/// trimmed.
pub(crate) fn csv_reader(file: &Path) -> Result<csv::Reader<File>, DataError> {
    csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(file)
        .map_err(|err| DataError::Csv {
            file: file.to_path_buf(),
            err,
        })
}

pub(crate) fn parse_number(file: &Path, line: usize, value: &str) -> Result<f64, DataError> {
    value.parse().map_err(|_| DataError::BadNumber {
        file: file.to_path_buf(),
        line,
        value: value.to_string(),
    })
}

/// A table of values tabulated against energy. The energies are strictly
/// ascending; every other column is kept in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTable {
    energies_kev: Array1<f64>,
    columns: IndexMap<String, Array1<f64>>,
}

impl EnergyTable {
    /// Read a CSV file with an `energy_kev` column and any number of other
    /// numeric columns.
    pub fn read(file: &Path) -> Result<EnergyTable, DataError> {
        debug!("Reading energy table {}", file.display());
        let mut reader = csv_reader(file)?;
        let headers = reader
            .headers()
            .map_err(|err| DataError::Csv {
                file: file.to_path_buf(),
                err,
            })?
            .clone();
        let energy_index = headers
            .iter()
            .position(|h| h == ENERGY_COLUMN)
            .ok_or_else(|| DataError::MissingColumn {
                file: file.to_path_buf(),
                column: ENERGY_COLUMN.to_string(),
            })?;

        let mut energies: Vec<f64> = vec![];
        let mut values: Vec<Vec<f64>> = vec![vec![]; headers.len() - 1];
        for record in reader.records() {
            let record = record.map_err(|err| DataError::Csv {
                file: file.to_path_buf(),
                err,
            })?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

            let mut i_value = 0;
            for (i_field, field) in record.iter().enumerate() {
                let number = parse_number(file, line, field)?;
                if i_field == energy_index {
                    if energies.last().map(|&last| number <= last).unwrap_or(false) {
                        return Err(DataError::EnergiesNotAscending {
                            file: file.to_path_buf(),
                            line,
                        });
                    }
                    energies.push(number);
                } else {
                    values[i_value].push(number);
                    i_value += 1;
                }
            }
        }
        if energies.is_empty() {
            return Err(DataError::Empty {
                file: file.to_path_buf(),
            });
        }

        let columns = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != energy_index)
            .map(|(_, name)| name.to_string())
            .zip(values.into_iter().map(Array1::from))
            .collect();
        trace!(
            "{} energies from {} keV to {} keV",
            energies.len(),
            energies[0],
            energies[energies.len() - 1]
        );

        Ok(EnergyTable {
            energies_kev: Array1::from(energies),
            columns,
        })
    }

    pub fn energies_kev(&self) -> ArrayView1<f64> {
        self.energies_kev.view()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|s| s.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, ArrayView1<f64>)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.view()))
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<ArrayView1<f64>> {
        self.columns.get(name).map(|c| c.view())
    }

    /// Remove a column, preserving the order of the others.
    pub fn drop_column(&mut self, name: &str) -> Option<Array1<f64>> {
        self.columns.shift_remove(name)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The element-wise sum of all columns (zeros if there are none).
    pub fn sum_columns(&self) -> Array1<f64> {
        self.columns
            .values()
            .fold(Array1::zeros(self.energies_kev.len()), |acc, c| acc + c)
    }
}
