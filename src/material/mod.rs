// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! X-ray attenuation through a slab of material.
//!
//! Each material has a tabulated mass-attenuation coefficient curve
//! (mu/rho \[cm^2/g\] against energy \[keV\]). The curve is interpolated
//! linearly in log-log space, and the Beer-Lambert law gives the transmission
//! through a slab:
//!
//! T(E) = exp(-mu/rho(E) * rho * t)
//!
//! Outside of the tabulated energies, the log-space interpolant is 0, i.e. the
//! coefficient is 1 cm^2/g.

mod error;
#[cfg(test)]
mod tests;

pub use error::MaterialError;

use std::{fmt, path::PathBuf};

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, trace};
use ndarray::prelude::*;
use serde::Deserialize;
use vec1::Vec1;

use crate::{
    data::{csv_reader, DataError, ReferenceData, MASS_ATTENUATION_DIR, MATERIALS_MANIFEST_FILE},
    math::interp,
};

/// The value of log10(mu/rho) used outside of a curve's energy range.
pub const OUT_OF_RANGE_LOG_FILL: f64 = 0.0;

const MM_TO_CM: f64 = 0.1;

/// One entry of `materials.toml`.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    /// \[g/cm^3\]
    density: f64,
    /// Relative to the mass-attenuation directory.
    file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct AttenuationRow {
    energy_kev: f64,
    mu_rho: f64,
}

fn read_manifest(data: &ReferenceData) -> Result<IndexMap<String, ManifestEntry>, DataError> {
    let (file, contents) = data.read_to_string(MATERIALS_MANIFEST_FILE)?;
    toml::from_str(&contents).map_err(|err| DataError::Toml { file, err })
}

/// A mass-attenuation coefficient curve, stored in log10 space.
#[derive(Debug, Clone, PartialEq)]
pub struct AttenuationCurve {
    log_energies: Vec1<f64>,
    log_coefficients: Vec1<f64>,
}

impl AttenuationCurve {
    /// Create a curve from energies \[keV\] and mass-attenuation coefficients
    /// \[cm^2/g\]. The energies must be strictly ascending and everything must
    /// be positive.
    pub fn new(energies_kev: &[f64], coefficients: &[f64]) -> Result<Self, MaterialError> {
        if energies_kev.len() != coefficients.len() {
            return Err(MaterialError::CurveLengthMismatch {
                energies: energies_kev.len(),
                coefficients: coefficients.len(),
            });
        }
        if energies_kev.len() < 2 {
            return Err(MaterialError::CurveTooShort(energies_kev.len()));
        }
        for (i, (&e, &c)) in energies_kev.iter().zip(coefficients).enumerate() {
            // Written this way to also catch NaNs.
            if !(e > 0.0 && c > 0.0) || !e.is_finite() || !c.is_finite() {
                return Err(MaterialError::CurveNotPositive(i));
            }
            if i > 0 && e <= energies_kev[i - 1] {
                return Err(MaterialError::CurveNotAscending(i));
            }
        }

        let log_energies = energies_kev.iter().map(|e| e.log10()).collect::<Vec<_>>();
        let log_coefficients = coefficients.iter().map(|c| c.log10()).collect::<Vec<_>>();
        Ok(AttenuationCurve {
            log_energies: Vec1::try_from_vec(log_energies)
                .map_err(|_| MaterialError::CurveTooShort(0))?,
            log_coefficients: Vec1::try_from_vec(log_coefficients)
                .map_err(|_| MaterialError::CurveTooShort(0))?,
        })
    }

    /// Read a curve from a CSV file with `energy_kev` and `mu_rho` columns.
    pub(crate) fn read(file: PathBuf) -> Result<Self, MaterialError> {
        trace!("Reading attenuation curve {}", file.display());
        let mut reader = csv_reader(&file)?;
        let mut energies = vec![];
        let mut coefficients = vec![];
        for row in reader.deserialize::<AttenuationRow>() {
            let row = row.map_err(|err| DataError::Csv {
                file: file.clone(),
                err,
            })?;
            energies.push(row.energy_kev);
            coefficients.push(row.mu_rho);
        }
        Self::new(&energies, &coefficients)
    }

    /// The lowest and highest tabulated energies \[keV\].
    pub fn energy_range_kev(&self) -> (f64, f64) {
        (
            10_f64.powf(*self.log_energies.first()),
            10_f64.powf(*self.log_energies.last()),
        )
    }

    /// Is this energy \[keV\] within the tabulated range?
    pub fn contains(&self, energy_kev: f64) -> bool {
        (*self.log_energies.first()..=*self.log_energies.last()).contains(&energy_kev.log10())
    }

    /// The interpolated mass-attenuation coefficient \[cm^2/g\] at an energy
    /// \[keV\].
    pub fn at(&self, energy_kev: f64) -> f64 {
        // Non-positive energies have a NaN or -inf log, which falls outside the
        // curve.
        let log_mu = interp(
            energy_kev.log10(),
            &self.log_energies,
            &self.log_coefficients,
            OUT_OF_RANGE_LOG_FILL,
        );
        10_f64.powf(log_mu)
    }
}

/// A slab of material in the path of incoming X-rays.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    thickness_mm: f64,
    density_g_cm3: f64,
    curve: AttenuationCurve,
}

impl Material {
    /// Load a material from the default reference data. The name is
    /// case-insensitive.
    pub fn new(name: &str, thickness_mm: f64) -> Result<Material, MaterialError> {
        Material::load(&ReferenceData::from_env(), name, thickness_mm, None)
    }

    /// Like [`Material::new`], but override the tabulated density
    /// \[g/cm^3\].
    pub fn with_density(
        name: &str,
        thickness_mm: f64,
        density_g_cm3: f64,
    ) -> Result<Material, MaterialError> {
        Material::load(
            &ReferenceData::from_env(),
            name,
            thickness_mm,
            Some(density_g_cm3),
        )
    }

    /// Load a material from a specific reference-data directory.
    pub fn load(
        data: &ReferenceData,
        name: &str,
        thickness_mm: f64,
        density_g_cm3: Option<f64>,
    ) -> Result<Material, MaterialError> {
        let name = name.to_lowercase();
        let mut manifest = read_manifest(data)?;
        let entry = match manifest.swap_remove(&name) {
            Some(e) => e,
            None => {
                return Err(MaterialError::UnknownMaterial {
                    name,
                    available: manifest.keys().join(", "),
                })
            }
        };
        let curve = AttenuationCurve::read(data.path(MASS_ATTENUATION_DIR).join(&entry.file))?;
        let density = density_g_cm3.unwrap_or(entry.density);
        debug!("Loaded material '{name}': {thickness_mm} mm at {density} g/cm^3");

        Material::from_curve(&name, thickness_mm, density, curve)
    }

    /// Create a material from an explicit attenuation curve.
    pub fn from_curve(
        name: &str,
        thickness_mm: f64,
        density_g_cm3: f64,
        curve: AttenuationCurve,
    ) -> Result<Material, MaterialError> {
        if !(thickness_mm >= 0.0) || !thickness_mm.is_finite() {
            return Err(MaterialError::BadThickness(thickness_mm));
        }
        if !(density_g_cm3 > 0.0) || !density_g_cm3.is_finite() {
            return Err(MaterialError::BadDensity(density_g_cm3));
        }

        Ok(Material {
            name: name.to_lowercase(),
            thickness_mm,
            density_g_cm3,
            curve,
        })
    }

    /// The names of all materials in the reference data.
    pub fn available(data: &ReferenceData) -> Result<Vec<String>, MaterialError> {
        Ok(read_manifest(data)?.keys().cloned().collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thickness_mm(&self) -> f64 {
        self.thickness_mm
    }

    pub fn density_g_cm3(&self) -> f64 {
        self.density_g_cm3
    }

    pub fn curve(&self) -> &AttenuationCurve {
        &self.curve
    }

    /// mu/rho \[cm^2/g\] at an energy \[keV\].
    pub fn mass_attenuation_coefficient(&self, energy_kev: f64) -> f64 {
        self.curve.at(energy_kev)
    }

    /// The fraction of photons of this energy \[keV\] that pass through the
    /// slab.
    pub fn transmission_at(&self, energy_kev: f64) -> f64 {
        let mu = self.curve.at(energy_kev);
        (-mu * self.density_g_cm3 * self.thickness_mm * MM_TO_CM).exp()
    }

    /// The fraction of photons of this energy \[keV\] that are stopped by the
    /// slab.
    pub fn absorption_at(&self, energy_kev: f64) -> f64 {
        1.0 - self.transmission_at(energy_kev)
    }

    pub fn transmission(&self, energies_kev: &[f64]) -> Array1<f64> {
        energies_kev
            .iter()
            .map(|&e| self.transmission_at(e))
            .collect()
    }

    pub fn absorption(&self, energies_kev: &[f64]) -> Array1<f64> {
        energies_kev.iter().map(|&e| self.absorption_at(e)).collect()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} mm)", self.name, self.thickness_mm)
    }
}
