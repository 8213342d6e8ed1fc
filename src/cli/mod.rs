// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `foxsi`
//! subcommands are contained in modules.
//!
//! Arguments that can also come from an arguments file must be optional so
//! that either source can supply them.
//!
//! Only 3 things should be public in this module: `Foxsi`, `Foxsi::run`, and
//! `FoxsiError`.

#[macro_use]
mod common;
mod effective_area;
mod error;
mod material;
mod mission;
mod optic;
mod psf;

pub use error::FoxsiError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

use crate::data::ReferenceData;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    name = "foxsi",
    version,
    author,
    about = "Instrument-response modelling for the FOXSI SMEX hard X-ray telescope"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Foxsi {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// The directory containing the reference data. If not given, the
    /// FOXSI_DATA_DIR environment variable is used, then the data shipped
    /// with this crate.
    #[clap(long, parse(from_os_str))]
    #[clap(global = true)]
    data_dir: Option<PathBuf>,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run. Only used by effective-area.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "transmission")]
    Material(material::MaterialArgs),

    #[clap(alias = "response")]
    EffectiveArea(effective_area::EffectiveAreaArgs),

    Psf(psf::PsfArgs),

    Optic(optic::OpticArgs),

    Mission(mission::MissionArgs),
}

impl Foxsi {
    pub fn run(self) -> Result<(), FoxsiError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            data_dir,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity)
            .map_err(|e| FoxsiError::Generic(format!("Failed to initialise logging: {e}")))?;

        // Print the version of foxsi and its build-time information.
        let sub_command = match &self.command {
            Command::Material(_) => "material",
            Command::EffectiveArea(_) => "effective-area",
            Command::Psf(_) => "psf",
            Command::Optic(_) => "optic",
            Command::Mission(_) => "mission",
        };
        info!("foxsi {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        let data = match data_dir {
            Some(dir) => ReferenceData::new(dir),
            None => ReferenceData::from_env(),
        };
        info!("Using reference data in {}", data.dir().display());

        match self.command {
            Command::Material(args) => args.run(&data)?,

            Command::EffectiveArea(args) => {
                let args = args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(toml)?);
                    let toml_str = toml::to_string(&args).map_err(|e| {
                        FoxsiError::Generic(format!("Couldn't serialise the arguments: {e}"))
                    })?;
                    f.write_all(toml_str.as_bytes())?;
                }
                args.run(&data)?;
            }

            Command::Psf(args) => args.run(&data)?,
            Command::Optic(args) => args.run(&data)?,
            Command::Mission(args) => args.run(&data)?,
        }

        info!("foxsi {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write info-level log lines of how this executable was compiled.
fn display_build_info() {
    info!("Compiled for {} ({})", TARGET, PROFILE);
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
