// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The nested-shell X-ray optics of a telescope module.

mod error;

pub use error::TelescopeError;

use std::{collections::BTreeMap, ops::RangeInclusive};

use indexmap::IndexMap;
use log::{debug, trace};
use ndarray::prelude::*;
use serde::Deserialize;

use crate::{
    constants::SHELL_IDS,
    data::{
        csv_reader, DataError, EnergyTable, ReferenceData, EFFECTIVE_AREA_PER_SHELL_FILE,
        SHELL_PARAMETERS_FILE,
    },
};

/// The geometry of a single optic shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShellParameters {
    pub shell: u32,

    #[serde(rename = "inner_radius")]
    pub inner_radius_mm: f64,

    #[serde(rename = "outer_radius")]
    pub outer_radius_mm: f64,

    #[serde(rename = "length")]
    pub length_mm: f64,

    #[serde(rename = "thickness")]
    pub thickness_mm: f64,

    #[serde(rename = "mass")]
    pub mass_kg: f64,
}

/// A FOXSI optic: the installed shells and their geometry.
#[derive(Debug, Clone)]
pub struct Optic {
    shells: BTreeMap<u32, ShellParameters>,

    /// The unit of each column, as written in the table's units row.
    units: IndexMap<String, String>,
}

impl Optic {
    /// Load the shells in [`SHELL_IDS`] from the default reference data.
    pub fn new() -> Result<Optic, TelescopeError> {
        Optic::load(&ReferenceData::from_env(), &SHELL_IDS)
    }

    /// Load the shell geometry table. The first row after the header holds the
    /// unit of each column. Shells outside `shell_ids` are ignored.
    pub fn load(
        data: &ReferenceData,
        shell_ids: &RangeInclusive<u32>,
    ) -> Result<Optic, TelescopeError> {
        let file = data.path(SHELL_PARAMETERS_FILE);
        debug!("Reading shell parameters from {}", file.display());
        let csv_err = |err: csv::Error| DataError::Csv {
            file: file.clone(),
            err,
        };

        let mut reader = csv_reader(&file)?;
        let headers = reader.headers().map_err(csv_err)?.clone();
        let mut records = reader.records();
        let units_row = match records.next() {
            Some(r) => r.map_err(csv_err)?,
            None => return Err(TelescopeError::MissingUnits(file.clone())),
        };
        let units = headers
            .iter()
            .zip(units_row.iter())
            .skip(1)
            .map(|(h, u)| (h.to_string(), u.to_string()))
            .collect();

        let mut shells = BTreeMap::new();
        for record in records {
            let record = record.map_err(csv_err)?;
            let params: ShellParameters = record.deserialize(Some(&headers)).map_err(csv_err)?;
            if shell_ids.contains(&params.shell) {
                shells.insert(params.shell, params);
            } else {
                trace!("Ignoring shell {}", params.shell);
            }
        }
        if shells.is_empty() {
            return Err(TelescopeError::NoShells(file));
        }
        debug!("Using {} optic shells", shells.len());

        Ok(Optic { shells, units })
    }

    /// The total mass of the installed shells \[kg\].
    pub fn mass(&self) -> f64 {
        self.shells.values().map(|s| s.mass_kg).sum()
    }

    /// The parameters of one shell.
    pub fn shell(&self, shell_number: u32) -> Result<&ShellParameters, TelescopeError> {
        self.shells
            .get(&shell_number)
            .ok_or(TelescopeError::MissingShell(shell_number))
    }

    /// All installed shells, ordered by shell number.
    pub fn shells(&self) -> impl Iterator<Item = &ShellParameters> {
        self.shells.values()
    }

    pub fn num_shells(&self) -> usize {
        self.shells.len()
    }

    /// The unit of a column of the shell geometry table, e.g. "mm".
    pub fn unit(&self, column: &str) -> Option<&str> {
        self.units.get(column).map(|u| u.as_str())
    }
}

/// Effective area of each installed shell against energy.
#[derive(Debug, Clone)]
pub struct ShellEffectiveArea {
    table: EnergyTable,
    shell_ids: Vec<u32>,
}

impl ShellEffectiveArea {
    /// Load the per-shell effective areas of the shells in [`SHELL_IDS`] from
    /// the default reference data.
    pub fn new() -> Result<ShellEffectiveArea, TelescopeError> {
        ShellEffectiveArea::load(&ReferenceData::from_env(), &SHELL_IDS)
    }

    /// Load the per-shell effective-area table. Every non-energy column must be
    /// named by a shell number; shells outside `shell_ids` are dropped.
    pub fn load(
        data: &ReferenceData,
        shell_ids: &RangeInclusive<u32>,
    ) -> Result<ShellEffectiveArea, TelescopeError> {
        let file = data.path(EFFECTIVE_AREA_PER_SHELL_FILE);
        let mut table = EnergyTable::read(&file)?;

        let mut installed = vec![];
        let mut missing = vec![];
        for name in table.column_names() {
            let shell: u32 = name.parse().map_err(|_| TelescopeError::BadShellColumn {
                file: file.clone(),
                column: name.to_string(),
            })?;
            if shell_ids.contains(&shell) {
                installed.push(shell);
            } else {
                missing.push(name.to_string());
            }
        }
        for name in &missing {
            trace!("Dropping effective area of shell {name}");
            table.drop_column(name);
        }
        if installed.is_empty() {
            return Err(TelescopeError::NoShells(file));
        }

        Ok(ShellEffectiveArea {
            table,
            shell_ids: installed,
        })
    }

    pub fn energies_kev(&self) -> ArrayView1<f64> {
        self.table.energies_kev()
    }

    /// The installed shell numbers, in table order.
    pub fn shell_ids(&self) -> &[u32] {
        &self.shell_ids
    }

    /// The effective area of one shell \[cm^2\].
    pub fn shell(&self, shell_number: u32) -> Result<ArrayView1<f64>, TelescopeError> {
        self.table
            .column(&shell_number.to_string())
            .ok_or(TelescopeError::MissingShell(shell_number))
    }

    /// The effective area of the whole optic \[cm^2\], summed over shells.
    pub fn total(&self) -> Array1<f64> {
        self.table.sum_columns()
    }
}
