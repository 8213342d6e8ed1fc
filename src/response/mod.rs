// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Effective area of the FOXSI telescopes.
//!
//! The effective area at an energy is the tabulated optic area of a single
//! module, times the number of modules, times the fraction of photons that
//! make it through the optical path and are stopped in the detector.

mod error;
mod optical_path;

pub use error::ResponseError;
pub use optical_path::{MaterialRole, OpticalElement, OpticalPath};

use std::fmt;

use log::{debug, trace};
use ndarray::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

use crate::{
    constants::*,
    data::{
        DataError, ReferenceData, EFFECTIVE_AREA_PER_MODULE_FILE, STC_F_EFFECTIVE_AREA_FILE,
        STC_Q_EFFECTIVE_AREA_FILE,
    },
    material::Material,
    math::interp,
    telescope::ShellEffectiveArea,
};

/// The column of the module effective-area table holding the optic area of a
/// single module.
const MODULE_AREA_COLUMN: &str = "area";

/// The column of the STC effective-area tables.
const STC_AREA_COLUMN: &str = "area";

/// The two kinds of STC detector.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum StcKind {
    Q,
    F,
}

/// Which instrument a [`Response`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    /// A generic FOXSI telescope module, with tabulated module areas.
    Module,

    /// The Direct Spectroscopic Imager; the optic area is summed from the
    /// installed shells.
    Dsi,

    Stc(StcKind),
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instrument::Module => write!(f, "FOXSI module"),
            Instrument::Dsi => write!(f, "DSI"),
            Instrument::Stc(kind) => write!(f, "STC {kind}"),
        }
    }
}

/// Get the shutter thickness for a shutter state.
fn shutter_thickness_mm(shutter_state: usize) -> Result<f64, ResponseError> {
    SHUTTER_THICKNESSES_MM
        .get(shutter_state)
        .copied()
        .ok_or(ResponseError::InvalidShutterState {
            got: shutter_state,
            max: SHUTTER_THICKNESSES_MM.len() - 1,
        })
}

/// The optical path of a DSI/generic module: the thermal blanket, the detector
/// and, if the shutter state is non-zero, an aluminium shutter.
pub fn module_optical_path(
    data: &ReferenceData,
    shutter_state: usize,
) -> Result<OpticalPath, ResponseError> {
    let shutter_thickness = shutter_thickness_mm(shutter_state)?;
    let mut path = OpticalPath::new()
        .with(OpticalElement::attenuator(Material::load(
            data,
            BLANKET_MATERIAL,
            BLANKET_THICKNESS_MM,
            None,
        )?))
        .with(OpticalElement::detector(Material::load(
            data,
            DETECTOR_MATERIAL,
            DETECTOR_THICKNESS_MM,
            None,
        )?));
    if shutter_state > 0 {
        path.push(OpticalElement::attenuator(Material::load(
            data,
            SHUTTER_MATERIAL,
            shutter_thickness,
            None,
        )?));
    }
    Ok(path)
}

/// The optical path of an STC: a beryllium window, (for Q only) an aluminium
/// attenuator, and a silicon detector.
pub fn stc_optical_path(data: &ReferenceData, kind: StcKind) -> Result<OpticalPath, ResponseError> {
    let mut path = OpticalPath::new().with(OpticalElement::attenuator(Material::load(
        data,
        STC_WINDOW_MATERIAL,
        STC_WINDOW_THICKNESS_MM,
        None,
    )?));
    if kind == StcKind::Q {
        path.push(OpticalElement::attenuator(Material::load(
            data,
            SHUTTER_MATERIAL,
            STC_Q_ATTENUATOR_THICKNESS_MM,
            None,
        )?));
    }
    path.push(OpticalElement::detector(Material::load(
        data,
        STC_DETECTOR_MATERIAL,
        STC_DETECTOR_THICKNESS_MM,
        None,
    )?));
    Ok(path)
}

/// The effective area of a set of identical telescope modules.
#[derive(Debug, Clone)]
pub struct Response {
    instrument: Instrument,

    /// Fixed at construction.
    shutter_state: usize,

    /// The grid on which the optic area is tabulated \[keV\].
    energies_kev: Vec1<f64>,

    /// The optic area of a single module on the energy grid \[cm^2\].
    optics_area_per_module: Vec<f64>,

    optical_path: OpticalPath,

    number_of_telescopes: u32,

    /// The total effective area on the energy grid \[cm^2\]. Recomputed
    /// whenever the path or the number of telescopes changes.
    effective_area: Vec<f64>,
}

impl Response {
    /// The response of the generic FOXSI modules with the default reference
    /// data.
    pub fn new(shutter_state: usize) -> Result<Response, ResponseError> {
        Response::load(&ReferenceData::from_env(), Instrument::Module, shutter_state)
    }

    /// The DSI response with the default reference data.
    pub fn dsi(shutter_state: usize) -> Result<Response, ResponseError> {
        Response::load(&ReferenceData::from_env(), Instrument::Dsi, shutter_state)
    }

    /// The STC response with the default reference data. STCs have no shutter.
    pub fn stc(kind: StcKind) -> Result<Response, ResponseError> {
        Response::load(&ReferenceData::from_env(), Instrument::Stc(kind), 0)
    }

    /// Like [`Response::stc`], but the kind is a case-insensitive string ("q"
    /// or "f").
    pub fn stc_from_str(kind: &str) -> Result<Response, ResponseError> {
        let kind: StcKind = kind
            .parse()
            .map_err(|_| ResponseError::InvalidStcKind(kind.to_string()))?;
        Response::stc(kind)
    }

    /// Assemble the response of an instrument from a reference-data directory.
    pub fn load(
        data: &ReferenceData,
        instrument: Instrument,
        shutter_state: usize,
    ) -> Result<Response, ResponseError> {
        // Validate the shutter state before touching any files.
        shutter_thickness_mm(shutter_state)?;

        let (energies, area_per_module, path, number_of_telescopes) = match instrument {
            Instrument::Module => {
                let table = data.read_table(EFFECTIVE_AREA_PER_MODULE_FILE)?;
                let area =
                    table
                        .column(MODULE_AREA_COLUMN)
                        .ok_or_else(|| DataError::MissingColumn {
                            file: data.path(EFFECTIVE_AREA_PER_MODULE_FILE),
                            column: MODULE_AREA_COLUMN.to_string(),
                        })?;
                (
                    table.energies_kev().to_vec(),
                    area.to_vec(),
                    module_optical_path(data, shutter_state)?,
                    NUMBER_OF_TELESCOPES,
                )
            }

            Instrument::Dsi => {
                let shells = ShellEffectiveArea::load(data, &SHELL_IDS)?;
                (
                    shells.energies_kev().to_vec(),
                    shells.total().to_vec(),
                    module_optical_path(data, shutter_state)?,
                    NUMBER_OF_TELESCOPES,
                )
            }

            Instrument::Stc(kind) => {
                let file = match kind {
                    StcKind::Q => STC_Q_EFFECTIVE_AREA_FILE,
                    StcKind::F => STC_F_EFFECTIVE_AREA_FILE,
                };
                let table = data.read_table(file)?;
                let area = table
                    .column(STC_AREA_COLUMN)
                    .ok_or_else(|| DataError::MissingColumn {
                        file: data.path(file),
                        column: STC_AREA_COLUMN.to_string(),
                    })?;
                (
                    table.energies_kev().to_vec(),
                    area.to_vec(),
                    stc_optical_path(data, kind)?,
                    STC_NUMBER_OF_TELESCOPES,
                )
            }
        };

        let mut response = Response::from_parts(
            instrument,
            energies,
            area_per_module,
            path,
            number_of_telescopes,
        )?;
        response.shutter_state = shutter_state;
        debug!(
            "{instrument} response (shutter state {shutter_state}, {number_of_telescopes} telescopes): {}",
            response.optical_path
        );
        Ok(response)
    }

    /// Assemble a response from an optic area tabulated against energy.
    /// `energies_kev` must be non-empty and strictly ascending.
    pub fn from_parts(
        instrument: Instrument,
        energies_kev: Vec<f64>,
        optics_area_per_module: Vec<f64>,
        optical_path: OpticalPath,
        number_of_telescopes: u32,
    ) -> Result<Response, ResponseError> {
        if energies_kev.len() != optics_area_per_module.len() {
            return Err(ResponseError::LengthMismatch {
                energies: energies_kev.len(),
                areas: optics_area_per_module.len(),
            });
        }
        if energies_kev.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ResponseError::BadEnergyGrid);
        }
        let energies_kev =
            Vec1::try_from_vec(energies_kev).map_err(|_| ResponseError::BadEnergyGrid)?;
        if number_of_telescopes == 0 {
            return Err(ResponseError::ZeroTelescopes);
        }

        let mut response = Response {
            instrument,
            shutter_state: 0,
            energies_kev,
            optics_area_per_module,
            optical_path,
            number_of_telescopes,
            effective_area: vec![],
        };
        response.recompute();
        Ok(response)
    }

    fn recompute(&mut self) {
        trace!("Recomputing the {} effective area", self.instrument);
        let n = f64::from(self.number_of_telescopes);
        self.effective_area = self
            .energies_kev
            .iter()
            .zip(self.optics_area_per_module.iter())
            .map(|(&e, &a)| a * n * self.optical_path.factor_at(e))
            .collect();
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// The shutter state this response was built with. It can't be changed;
    /// build a new response instead.
    pub fn shutter_state(&self) -> usize {
        self.shutter_state
    }

    pub fn number_of_telescopes(&self) -> u32 {
        self.number_of_telescopes
    }

    /// Change the number of telescope modules; the effective area scales
    /// linearly with it.
    pub fn set_number_of_telescopes(&mut self, n: u32) -> Result<(), ResponseError> {
        if n == 0 {
            return Err(ResponseError::ZeroTelescopes);
        }
        self.number_of_telescopes = n;
        self.recompute();
        Ok(())
    }

    pub fn optical_path(&self) -> &OpticalPath {
        &self.optical_path
    }

    /// Replace the optical path.
    pub fn set_optical_path(&mut self, optical_path: OpticalPath) {
        self.optical_path = optical_path;
        self.recompute();
    }

    /// The energies on which the optic area is tabulated \[keV\].
    pub fn energies_kev(&self) -> ArrayView1<f64> {
        ArrayView1::from(&self.energies_kev[..])
    }

    pub fn optics_effective_area_per_module(&self) -> ArrayView1<f64> {
        ArrayView1::from(self.optics_area_per_module.as_slice())
    }

    /// The effective area of the optics alone (i.e. with no materials in the
    /// way), summed over all modules \[cm^2\].
    pub fn optics_effective_area(&self) -> Array1<f64> {
        self.optics_effective_area_per_module()
            .mapv(|a| a * f64::from(self.number_of_telescopes))
    }

    /// The optics-only effective area \[cm^2\] summed over all modules at an
    /// energy \[keV\]. Energies outside the grid have no effective area.
    pub fn optics_effective_area_at(&self, energy_kev: f64) -> f64 {
        interp(
            energy_kev,
            &self.energies_kev,
            &self.optics_area_per_module,
            0.0,
        ) * f64::from(self.number_of_telescopes)
    }

    /// The effective area on the tabulated energy grid \[cm^2\].
    pub fn total_effective_area(&self) -> ArrayView1<f64> {
        ArrayView1::from(self.effective_area.as_slice())
    }

    /// The effective area \[cm^2\] at an energy \[keV\], linearly interpolated
    /// from the energy grid. Energies outside the grid have no effective area.
    pub fn effective_area_at(&self, energy_kev: f64) -> f64 {
        interp(energy_kev, &self.energies_kev, &self.effective_area, 0.0)
    }

    pub fn effective_area(&self, energies_kev: &[f64]) -> Array1<f64> {
        energies_kev
            .iter()
            .map(|&e| self.effective_area_at(e))
            .collect()
    }
}
