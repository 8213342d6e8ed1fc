// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{io::Write, path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::common::{
    create_output, display_warnings, write_header, EnergyArgs, InfoPrinter, Warn, ARG_FILE_HELP,
};
use crate::{
    constants::SHUTTER_THICKNESSES_MM,
    data::ReferenceData,
    response::{Instrument, Response, StcKind},
    FoxsiError,
};

const DEFAULT_OUTPUT: &str = "effective_area.tsv";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
enum InstrumentArg {
    Module,
    Dsi,
    StcQ,
    StcF,
}

impl From<InstrumentArg> for Instrument {
    fn from(i: InstrumentArg) -> Self {
        match i {
            InstrumentArg::Module => Instrument::Module,
            InstrumentArg::Dsi => Instrument::Dsi,
            InstrumentArg::StcQ => Instrument::Stc(StcKind::Q),
            InstrumentArg::StcF => Instrument::Stc(StcKind::F),
        }
    }
}

lazy_static::lazy_static! {
    static ref INSTRUMENT_HELP: String =
        format!("The instrument to model. Valid instruments are: {}. Default: module", InstrumentArg::iter().join(", "));

    static ref SHUTTER_STATE_HELP: String =
        format!("The shutter state, 0 to {}; 0 is no shutter. Shutter thicknesses [mm]: {:?}. Ignored for STCs. Default: 0",
                SHUTTER_THICKNESSES_MM.len() - 1, SHUTTER_THICKNESSES_MM);
}

/// Tabulate the effective area of a FOXSI instrument.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct EffectiveAreaArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(short, long, help = INSTRUMENT_HELP.as_str())]
    pub(super) instrument: Option<String>,

    #[clap(short, long, help = SHUTTER_STATE_HELP.as_str())]
    pub(super) shutter_state: Option<usize>,

    /// Use this many telescope modules rather than the instrument's default.
    #[clap(short, long)]
    pub(super) number_of_telescopes: Option<u32>,

    /// The file to write the results to. Each line is tab separated: (1) the
    /// energy [keV], (2) the optics-only effective area [cm^2] and (3) the
    /// effective area through the optical path [cm^2]. Default:
    /// effective_area.tsv
    #[clap(short, long)]
    pub(super) output: Option<PathBuf>,

    // Tables must come last when serialising to toml.
    #[clap(flatten)]
    #[serde(rename = "energies")]
    #[serde(default)]
    pub(super) energy_args: EnergyArgs,
}

impl EffectiveAreaArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    pub(super) fn merge(self) -> Result<EffectiveAreaArgs, FoxsiError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let EffectiveAreaArgs {
                args_file: _,
                instrument,
                shutter_state,
                number_of_telescopes,
                output,
                energy_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(EffectiveAreaArgs {
                args_file: None,
                instrument: cli_args.instrument.or(instrument),
                shutter_state: cli_args.shutter_state.or(shutter_state),
                number_of_telescopes: cli_args.number_of_telescopes.or(number_of_telescopes),
                output: cli_args.output.or(output),
                energy_args: cli_args.energy_args.merge(energy_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, data: &ReferenceData) -> Result<(), FoxsiError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            instrument,
            shutter_state,
            number_of_telescopes,
            output,
            energy_args,
        } = self;

        let instrument: Instrument = match instrument {
            None => Instrument::Module,
            Some(s) => InstrumentArg::from_str(&s)
                .map_err(|_| {
                    FoxsiError::Response(format!(
                        "Unknown instrument '{s}'. Valid instruments are: {}",
                        InstrumentArg::iter().join(", ")
                    ))
                })?
                .into(),
        };
        let shutter_state = match (instrument, shutter_state) {
            (Instrument::Stc(_), Some(s)) => {
                if s != 0 {
                    format!("STCs have no shutter; ignoring shutter state {s}").warn();
                }
                0
            }
            (_, s) => s.unwrap_or(0),
        };
        let energies = energy_args.parse()?;
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let mut response = Response::load(data, instrument, shutter_state)?;
        if let Some(n) = number_of_telescopes {
            response.set_number_of_telescopes(n)?;
        }

        let mut printer = InfoPrinter::new(format!("{instrument} effective area").into());
        printer.push_block(vec![
            format!("Shutter state:        {}", response.shutter_state()).into(),
            format!("Number of telescopes: {}", response.number_of_telescopes()).into(),
        ]);
        printer.push_block(
            response
                .optical_path()
                .elements()
                .iter()
                .map(|e| e.to_string().into())
                .collect(),
        );
        printer.display();

        let grid = response.energies_kev();
        let (lo, hi) = (grid[0], grid[grid.len() - 1]);
        let num_outside = energies.iter().filter(|&&e| e < lo || e > hi).count();
        if num_outside > 0 {
            format!("{num_outside} energies are outside the tabulated range ({lo} to {hi} keV); their effective area is 0").warn();
        }
        display_warnings();

        let optics_only: Vec<f64> = energies
            .iter()
            .map(|&e| response.optics_effective_area_at(e))
            .collect();
        let effective_area = response.effective_area(&energies);

        let mut out = create_output(&output)?;
        write_header(
            &mut out,
            &["energy_kev", "optics_area_cm2", "effective_area_cm2"],
        )?;
        for ((e, o), a) in energies.iter().zip(optics_only.iter()).zip(effective_area.iter()) {
            writeln!(out, "{e}\t{o:e}\t{a:e}")?;
        }
        out.flush()?;
        info!(
            "Wrote {} energies to {}",
            energies.len(),
            output.display()
        );

        Ok(())
    }
}
