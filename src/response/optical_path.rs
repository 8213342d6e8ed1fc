// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ordered materials between the optics and the detector.

use std::fmt;

use ndarray::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};

use crate::material::Material;

/// How a material in the optical path affects the photons that reach it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MaterialRole {
    /// Only the transmitted photons carry on.
    Attenuator,

    /// Only the absorbed photons are detected.
    Detector,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpticalElement {
    material: Material,
    role: MaterialRole,
}

impl OpticalElement {
    pub fn new(material: Material, role: MaterialRole) -> OpticalElement {
        OpticalElement { material, role }
    }

    pub fn attenuator(material: Material) -> OpticalElement {
        OpticalElement::new(material, MaterialRole::Attenuator)
    }

    pub fn detector(material: Material) -> OpticalElement {
        OpticalElement::new(material, MaterialRole::Detector)
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn role(&self) -> MaterialRole {
        self.role
    }

    /// The fraction of photons at this energy \[keV\] that this element
    /// passes on (attenuators) or stops (detectors).
    pub fn factor_at(&self, energy_kev: f64) -> f64 {
        match self.role {
            MaterialRole::Attenuator => self.material.transmission_at(energy_kev),
            MaterialRole::Detector => self.material.absorption_at(energy_kev),
        }
    }
}

impl fmt::Display for OpticalElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.material, self.role)
    }
}

/// An ordered sequence of materials that incoming X-rays traverse before they
/// are detected. An empty path passes everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpticalPath {
    elements: Vec<OpticalElement>,
}

impl OpticalPath {
    pub fn new() -> OpticalPath {
        OpticalPath::default()
    }

    /// Append an element to the end of the path.
    pub fn push(&mut self, element: OpticalElement) {
        self.elements.push(element);
    }

    /// Builder-style [`OpticalPath::push`].
    pub fn with(mut self, element: OpticalElement) -> OpticalPath {
        self.push(element);
        self
    }

    pub fn elements(&self) -> &[OpticalElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The product of every element's factor at this energy \[keV\].
    pub fn factor_at(&self, energy_kev: f64) -> f64 {
        self.elements
            .iter()
            .map(|e| e.factor_at(energy_kev))
            .product()
    }

    pub fn factors(&self, energies_kev: &[f64]) -> Array1<f64> {
        energies_kev.iter().map(|&e| self.factor_at(e)).collect()
    }
}

impl FromIterator<OpticalElement> for OpticalPath {
    fn from_iter<I: IntoIterator<Item = OpticalElement>>(iter: I) -> Self {
        OpticalPath {
            elements: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for OpticalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "(empty)");
        }
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}
