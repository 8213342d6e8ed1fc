// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. e.g. the `material` and
//! `effective-area` subcommands both take an energy grid.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use clap::Parser;
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::FoxsiError;
use crate::math::arange;

/// The lowest energy of the default energy grid \[keV\].
pub(super) const DEFAULT_MIN_ENERGY_KEV: f64 = 1.0;

/// The highest energy of the default energy grid \[keV\].
pub(super) const DEFAULT_MAX_ENERGY_KEV: f64 = 60.0;

/// The spacing of the default energy grid \[keV\].
pub(super) const DEFAULT_ENERGY_STEP_KEV: f64 = 1.0;

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref MIN_ENERGY_HELP: String =
        format!("The lowest energy of the energy grid [keV]. Default: {DEFAULT_MIN_ENERGY_KEV}");

    static ref MAX_ENERGY_HELP: String =
        format!("The highest energy of the energy grid (inclusive) [keV]. Default: {DEFAULT_MAX_ENERGY_KEV}");

    static ref ENERGY_STEP_HELP: String =
        format!("The spacing of the energy grid [keV]. Default: {DEFAULT_ENERGY_STEP_KEV}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FoxsiError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FoxsiError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(FoxsiError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// The energies at which to evaluate something. Either an explicit list, or a
/// regular grid.
#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct EnergyArgs {
    /// Explicit energies to use [keV]. If given, the grid arguments are
    /// ignored.
    #[clap(short, long, multiple_values(true), help_heading = "ENERGIES")]
    pub(super) energies: Option<Vec<f64>>,

    #[clap(long, help = MIN_ENERGY_HELP.as_str(), help_heading = "ENERGIES")]
    pub(super) min_energy: Option<f64>,

    #[clap(long, help = MAX_ENERGY_HELP.as_str(), help_heading = "ENERGIES")]
    pub(super) max_energy: Option<f64>,

    #[clap(long, help = ENERGY_STEP_HELP.as_str(), help_heading = "ENERGIES")]
    pub(super) energy_step: Option<f64>,
}

impl EnergyArgs {
    /// Merge with arguments from a file, preferring `self`.
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            energies: self.energies.or(other.energies),
            min_energy: self.min_energy.or(other.min_energy),
            max_energy: self.max_energy.or(other.max_energy),
            energy_step: self.energy_step.or(other.energy_step),
        }
    }

    pub(super) fn parse(self) -> Result<Vec<f64>, FoxsiError> {
        let Self {
            energies,
            min_energy,
            max_energy,
            energy_step,
        } = self;

        if let Some(energies) = energies {
            if energies.is_empty() {
                return Err(FoxsiError::Generic("No energies were given".to_string()));
            }
            if let Some(bad) = energies.iter().find(|e| !(**e > 0.0) || !e.is_finite()) {
                return Err(FoxsiError::Generic(format!(
                    "Energies must be positive, but got {bad} keV"
                )));
            }
            return Ok(energies);
        }

        let min = min_energy.unwrap_or(DEFAULT_MIN_ENERGY_KEV);
        let max = max_energy.unwrap_or(DEFAULT_MAX_ENERGY_KEV);
        let step = energy_step.unwrap_or(DEFAULT_ENERGY_STEP_KEV);
        if !(step > 0.0) {
            return Err(FoxsiError::Generic(format!(
                "The energy step must be positive, but got {step} keV"
            )));
        }
        if !(min > 0.0) || max < min {
            return Err(FoxsiError::Generic(format!(
                "Invalid energy range: {min} keV to {max} keV"
            )));
        }

        // Include the upper end of the range when it falls on the grid.
        let energies = arange(min, max + step / 2.0, step);
        trace!("Energy grid: {min} keV to {max} keV in {step} keV steps");
        Ok(energies)
    }
}

/// Create an output file, logging where it is.
pub(super) fn create_output(path: &Path) -> Result<BufWriter<File>, FoxsiError> {
    debug!("Writing to {}", path.display());
    let f = File::create(path).map_err(|e| {
        FoxsiError::Generic(format!("Couldn't create '{}': {e}", path.display()))
    })?;
    Ok(BufWriter::new(f))
}

/// Write a tab-separated header line, prefixed with a `#`.
pub(super) fn write_header<W: Write>(out: &mut W, columns: &[&str]) -> std::io::Result<()> {
    writeln!(out, "# {}", columns.join("\t"))
}
