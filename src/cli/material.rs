// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{io::Write, path::PathBuf};

use clap::Parser;
use itertools::Itertools;
use log::info;

use super::common::{create_output, display_warnings, write_header, EnergyArgs, InfoPrinter, Warn};
use crate::{data::ReferenceData, material::Material, FoxsiError};

/// Tabulate the transmission and absorption of a slab of material.
#[derive(Parser, Debug)]
pub(super) struct MaterialArgs {
    /// The name of the material (case insensitive), e.g. "al" or "cdte".
    #[clap(name = "MATERIAL", required_unless_present = "list")]
    name: Option<String>,

    /// List the available materials and exit.
    #[clap(long)]
    list: bool,

    /// The thickness of the slab [mm].
    #[clap(short, long, default_value = "1.0")]
    thickness: f64,

    /// Override the tabulated density of the material [g/cm^3].
    #[clap(short, long)]
    density: Option<f64>,

    #[clap(flatten)]
    energy_args: EnergyArgs,

    /// The file to write the results to. Each line is tab separated: (1) the
    /// energy [keV], (2) the mass-attenuation coefficient [cm^2/g], (3) the
    /// transmission and (4) the absorption.
    #[clap(short, long, default_value = "material.tsv")]
    output: PathBuf,
}

impl MaterialArgs {
    pub(super) fn run(self, data: &ReferenceData) -> Result<(), FoxsiError> {
        let MaterialArgs {
            name,
            list,
            thickness,
            density,
            energy_args,
            output,
        } = self;

        if list {
            let available = Material::available(data)?;
            let mut printer = InfoPrinter::new("Available materials".into());
            printer.push_line(available.iter().join(", ").into());
            printer.display();
            return Ok(());
        }
        let name = name.ok_or_else(|| FoxsiError::Generic("No material was specified".to_string()))?;

        let material = Material::load(data, &name, thickness, density)?;
        let energies = energy_args.parse()?;

        let mut printer = InfoPrinter::new(format!("Material {}", material.name()).into());
        printer.push_block(vec![
            format!("Thickness: {} mm", material.thickness_mm()).into(),
            format!("Density:   {} g/cm^3", material.density_g_cm3()).into(),
        ]);
        let (lo, hi) = material.curve().energy_range_kev();
        printer.push_line(format!("Tabulated from {lo} keV to {hi} keV").into());
        printer.display();

        let num_outside = energies
            .iter()
            .filter(|&&e| !material.curve().contains(e))
            .count();
        if num_outside > 0 {
            format!(
                "{num_outside} energies are outside the tabulated range of {}; their attenuation coefficient is 1 cm^2/g",
                material.name()
            )
            .warn();
        }
        display_warnings();

        let mut out = create_output(&output)?;
        write_header(
            &mut out,
            &["energy_kev", "mu_rho_cm2_g", "transmission", "absorption"],
        )?;
        for &e in &energies {
            writeln!(
                out,
                "{e}\t{:e}\t{:e}\t{:e}",
                material.mass_attenuation_coefficient(e),
                material.transmission_at(e),
                material.absorption_at(e)
            )?;
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
