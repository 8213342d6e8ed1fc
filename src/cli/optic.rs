// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{io::Write, path::PathBuf};

use clap::Parser;
use log::info;

use super::common::{create_output, write_header, InfoPrinter};
use crate::{
    constants::SHELL_IDS,
    data::ReferenceData,
    telescope::{Optic, ShellParameters},
    FoxsiError,
};

/// Print the geometry of the installed optic shells.
#[derive(Parser, Debug)]
pub(super) struct OpticArgs {
    /// Only report this shell.
    #[clap(long)]
    shell: Option<u32>,

    /// The file to write the shell table to. Each line is tab separated: (1)
    /// the shell number, (2) the inner radius [mm], (3) the outer radius [mm],
    /// (4) the length [mm], (5) the thickness [mm] and (6) the mass [kg].
    #[clap(short, long, default_value = "optic.tsv")]
    output: PathBuf,
}

impl OpticArgs {
    pub(super) fn run(self, data: &ReferenceData) -> Result<(), FoxsiError> {
        let OpticArgs { shell, output } = self;

        let optic = Optic::load(data, &SHELL_IDS)?;
        let shells: Vec<&ShellParameters> = match shell {
            Some(n) => vec![optic.shell(n)?],
            None => optic.shells().collect(),
        };

        let mut printer = InfoPrinter::new("Optic".into());
        printer.push_block(vec![
            format!("Installed shells: {}", optic.num_shells()).into(),
            format!("Total mass:       {:.4} kg", optic.mass()).into(),
        ]);
        if let [s] = shells.as_slice() {
            let mm = optic.unit("inner_radius").unwrap_or("mm");
            printer.push_block(vec![
                format!("Shell {}", s.shell).into(),
                format!("Radii:     {} to {} {mm}", s.inner_radius_mm, s.outer_radius_mm).into(),
                format!("Length:    {} {mm}", s.length_mm).into(),
                format!("Thickness: {} {mm}", s.thickness_mm).into(),
                format!("Mass:      {} kg", s.mass_kg).into(),
            ]);
        }
        printer.display();

        let mut out = create_output(&output)?;
        write_header(
            &mut out,
            &[
                "shell",
                "inner_radius_mm",
                "outer_radius_mm",
                "length_mm",
                "thickness_mm",
                "mass_kg",
            ],
        )?;
        for s in &shells {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}",
                s.shell, s.inner_radius_mm, s.outer_radius_mm, s.length_mm, s.thickness_mm, s.mass_kg
            )?;
        }
        out.flush()?;
        info!("Wrote {} shells to {}", shells.len(), output.display());

        Ok(())
    }
}
