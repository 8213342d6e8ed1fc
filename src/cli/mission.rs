// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use itertools::Itertools;

use super::common::InfoPrinter;
use crate::{constants::*, data::ReferenceData, material::Material, FoxsiError};

/// Print the mission configuration.
#[derive(Parser, Debug)]
pub(super) struct MissionArgs {}

impl MissionArgs {
    pub(super) fn run(self, data: &ReferenceData) -> Result<(), FoxsiError> {
        let mut printer = InfoPrinter::new(MISSION_TITLE.into());
        printer.push_block(vec![
            format!("Launch date:          {}", *LAUNCH_DATE).into(),
            format!("Focal length:         {FOCAL_LENGTH_M} m").into(),
            format!("Number of telescopes: {NUMBER_OF_TELESCOPES}").into(),
            format!(
                "Optic shells:         {} to {}",
                SHELL_IDS.start(),
                SHELL_IDS.end()
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!("Detector:        {DETECTOR_THICKNESS_MM} mm {DETECTOR_MATERIAL}").into(),
            format!("Thermal blanket: {BLANKET_THICKNESS_MM} mm {BLANKET_MATERIAL}").into(),
            format!(
                "Shutters:        {} mm {SHUTTER_MATERIAL}",
                SHUTTER_THICKNESSES_MM.iter().skip(1).join(" mm, ")
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!("STC detector:    {STC_DETECTOR_THICKNESS_MM} mm {STC_DETECTOR_MATERIAL}")
                .into(),
            format!("STC window:      {STC_WINDOW_THICKNESS_MM} mm {STC_WINDOW_MATERIAL}").into(),
            format!(
                "STC Q attenuator: {STC_Q_ATTENUATOR_THICKNESS_MM} mm {SHUTTER_MATERIAL}"
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!("Reference data:  {}", data.dir().display()).into(),
            format!("Materials:       {}", Material::available(data)?.join(", ")).into(),
        ]);
        printer.display();

        Ok(())
    }
}
