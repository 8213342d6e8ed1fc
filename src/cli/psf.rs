// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{io::Write, path::PathBuf};

use clap::Parser;
use log::info;

use super::common::{create_output, write_header, InfoPrinter};
use crate::{
    data::ReferenceData,
    psf::{Psf, DEFAULT_IMAGE_HALF_WIDTH_ARCSEC, DEFAULT_IMAGE_SCALE_ARCSEC},
    FoxsiError,
};

lazy_static::lazy_static! {
    static ref SCALE_HELP: String =
        format!("The size of an image pixel [arcsec]. Default: {DEFAULT_IMAGE_SCALE_ARCSEC}");

    static ref HALF_WIDTH_HELP: String =
        format!("Image the PSF out to this distance from the source [arcsec]. Default: {DEFAULT_IMAGE_HALF_WIDTH_ARCSEC}");
}

/// Render the point-spread function for a pointing offset.
#[derive(Parser, Debug)]
pub(super) struct PsfArgs {
    /// The pitch offset of the source from the optical axis [arcmin].
    #[clap(short, long, allow_hyphen_values = true, default_value = "0.0")]
    pitch: f64,

    /// The yaw offset of the source from the optical axis [arcmin].
    #[clap(short, long, allow_hyphen_values = true, default_value = "0.0")]
    yaw: f64,

    #[clap(short, long, help = SCALE_HELP.as_str())]
    scale: Option<f64>,

    #[clap(long, help = HALF_WIDTH_HELP.as_str())]
    half_width: Option<f64>,

    /// The file to write the image to. Each line is tab separated: (1) the x
    /// coordinate [arcsec], (2) the y coordinate [arcsec] and (3) the PSF
    /// intensity.
    #[clap(short, long, default_value = "psf.tsv")]
    output: PathBuf,
}

impl PsfArgs {
    pub(super) fn run(self, data: &ReferenceData) -> Result<(), FoxsiError> {
        let PsfArgs {
            pitch,
            yaw,
            scale,
            half_width,
            output,
        } = self;

        let psf = Psf::load(data, pitch, yaw)?;
        let image = psf.image(
            scale.unwrap_or(DEFAULT_IMAGE_SCALE_ARCSEC),
            half_width.unwrap_or(DEFAULT_IMAGE_HALF_WIDTH_ARCSEC),
        )?;

        let mut printer = InfoPrinter::new("PSF".into());
        printer.push_block(vec![
            format!("Pitch, yaw:     {pitch}', {yaw}'").into(),
            format!("Off-axis angle: {:.4}'", psf.offaxis_angle_arcmin()).into(),
            format!("Polar angle:    {:.4}°", psf.polar_angle_rad().to_degrees()).into(),
        ]);
        printer.push_block(vec![
            format!("Amplitudes:      {:?}", psf.amplitudes()).into(),
            format!("Widths x [\"]:    {:?}", psf.widths_x_arcsec()).into(),
            format!("Widths y [\"]:    {:?}", psf.widths_y_arcsec()).into(),
        ]);
        let (py, px) = image.peak_pixel;
        printer.push_line(
            format!(
                "Peak at pixel ({px}, {py}); image shifted by ({}\", {}\")",
                image.shift_arcsec.0, image.shift_arcsec.1
            )
            .into(),
        );
        printer.display();

        let mut out = create_output(&output)?;
        write_header(&mut out, &["x_arcsec", "y_arcsec", "intensity"])?;
        for ((iy, ix), v) in image.data.indexed_iter() {
            writeln!(
                out,
                "{}\t{}\t{v:e}",
                image.axis_arcsec[ix], image.axis_arcsec[iy]
            )?;
        }
        out.flush()?;
        info!(
            "Wrote a {}x{} PSF image to {}",
            image.axis_arcsec.len(),
            image.axis_arcsec.len(),
            output.display()
        );

        Ok(())
    }
}
