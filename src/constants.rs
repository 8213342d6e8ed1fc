// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Mission configuration.

All lengths are in millimetres unless the name says otherwise. These values
describe FOXSI-SMEX only; the reference data in `data/` is tabulated for the
same configuration.
 */

use std::ops::RangeInclusive;

use chrono::NaiveDate;

pub const MISSION_TITLE: &str = "FOXSI SMEX";

lazy_static::lazy_static! {
    /// The nominal launch date.
    pub static ref LAUNCH_DATE: NaiveDate =
        NaiveDate::from_ymd_opt(2020, 6, 1).expect("launch date is a valid date");
}

/// The number of DSI telescope modules.
pub const NUMBER_OF_TELESCOPES: u32 = 3;

/// The optic shells installed in each module. Shells in the reference tables
/// that aren't in this range are ignored.
pub const SHELL_IDS: RangeInclusive<u32> = 1..=39;

/// Focal length of the optics \[m\].
pub const FOCAL_LENGTH_M: f64 = 15.0;

/// Detector material of the DSI modules.
pub const DETECTOR_MATERIAL: &str = "cdte";

/// Thickness of the DSI detectors.
pub const DETECTOR_THICKNESS_MM: f64 = 1.0;

/// Thermal blanket material.
pub const BLANKET_MATERIAL: &str = "mylar";

/// Thermal blanket thickness.
pub const BLANKET_THICKNESS_MM: f64 = 0.5;

/// Attenuating shutter material.
pub const SHUTTER_MATERIAL: &str = "al";

/// Shutter thicknesses, indexed by shutter state. State 0 is "no shutter".
pub const SHUTTER_THICKNESSES_MM: [f64; 3] = [0.0, 1.0, 1.5];

/// The number of STC modules (per kind).
pub const STC_NUMBER_OF_TELESCOPES: u32 = 1;

pub const STC_DETECTOR_MATERIAL: &str = "si";
pub const STC_DETECTOR_THICKNESS_MM: f64 = 0.5;

/// Entrance window in front of both STC kinds.
pub const STC_WINDOW_MATERIAL: &str = "be";
pub const STC_WINDOW_THICKNESS_MM: f64 = 0.025;

/// Only the Q kind carries a fixed attenuator (same material as the DSI
/// shutters).
pub const STC_Q_ATTENUATOR_THICKNESS_MM: f64 = 0.1;
