// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use tempfile::TempDir;

use crate::*;
use foxsi_response::{constants::SHELL_IDS, Optic, Psf};

#[test]
fn test_psf_image() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("psf.tsv");
    let cmd = foxsi()
        .args(["psf", "--pitch", "-2", "--yaw", "1.5", "-s", "1", "--half-width", "5"])
        .arg("--data-dir")
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Off-axis angle: 2.5000'"), "{stdout}");

    let psf = Psf::load(&reference_data(), -2.0, 1.5).unwrap();
    let rows = read_tsv(&output);
    // -5 to 4 arcsec in 1 arcsec steps, in both directions.
    assert_eq!(rows.len(), 100);
    for row in &rows {
        assert_relative_eq!(row[2], psf.evaluate(row[0], row[1]));
    }
    let peak = rows
        .iter()
        .max_by(|a, b| a[2].partial_cmp(&b[2]).unwrap())
        .unwrap();
    assert_relative_eq!(peak[0], 0.0);
    assert_relative_eq!(peak[1], 0.0);
}

#[test]
fn test_psf_bad_grid() {
    let tmp_dir = TempDir::new().unwrap();
    let cmd = foxsi()
        .args(["psf", "-s", "0", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(tmp_dir.path().join("psf.tsv"))
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("pixel scale of 0"), "{stderr}");
}

#[test]
fn test_optic_table() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("optic.tsv");
    let cmd = foxsi()
        .args(["optic", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let optic = Optic::load(&reference_data(), &SHELL_IDS).unwrap();
    let rows = read_tsv(&output);
    assert_eq!(rows.len(), 12);
    let mass: f64 = rows.iter().map(|r| r[5]).sum();
    assert_relative_eq!(mass, optic.mass(), epsilon = 1e-9);
}

#[test]
fn test_optic_single_shell() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("optic.tsv");
    let cmd = foxsi()
        .args(["optic", "--shell", "3", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let rows = read_tsv(&output);
    assert_eq!(rows.len(), 1);
    assert_relative_eq!(rows[0][0], 3.0);
}

#[test]
fn test_optic_missing_shell() {
    let tmp_dir = TempDir::new().unwrap();
    let cmd = foxsi()
        .args(["optic", "--shell", "42", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(tmp_dir.path().join("optic.tsv"))
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Shell 42 is missing"), "{stderr}");
}
