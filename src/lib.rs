// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Instrument-response models for the FOXSI-SMEX X-ray telescopes: material
transmission/absorption, effective area through the optical path, and the
point-spread function.
 */

pub mod constants;
pub mod data;
pub(crate) mod math;
pub mod material;
pub mod psf;
pub mod response;
pub mod telescope;

mod cli;

// Re-exports.
pub use cli::{Foxsi, FoxsiError};
pub use data::{DataError, EnergyTable, ReferenceData};
pub use material::{AttenuationCurve, Material, MaterialError};
pub use psf::{gauss2d, multi_gauss2d, Psf, PsfError, PsfImage};
pub use response::{
    Instrument, MaterialRole, OpticalElement, OpticalPath, Response, ResponseError, StcKind,
};
pub use telescope::{Optic, ShellEffectiveArea, ShellParameters, TelescopeError};
