// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_relative_eq;
use tempfile::TempDir;

use crate::*;
use foxsi_response::{Instrument, Response, StcKind};

#[test]
fn test_module_effective_area_matches_library() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("ea.tsv");
    let cmd = foxsi()
        .args(["effective-area", "-s", "1", "-e", "4", "10", "30", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let response = Response::load(&reference_data(), Instrument::Module, 1).unwrap();
    let rows = read_tsv(&output);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_relative_eq!(row[1], response.optics_effective_area_at(row[0]));
        assert_relative_eq!(row[2], response.effective_area_at(row[0]));
        assert!(row[2] <= row[1]);
    }
}

#[test]
fn test_args_file_is_overridden_by_cli() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("dsi.tsv");
    let args_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&args_file).unwrap();
    writeln!(
        f,
        r#"instrument = "dsi"
shutter_state = 2
number_of_telescopes = 2

[energies]
energies = [5.0, 15.0]
"#
    )
    .unwrap();
    drop(f);

    let cmd = foxsi()
        .arg("effective-area")
        .arg(&args_file)
        .args(["-s", "0", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let mut response = Response::load(&reference_data(), Instrument::Dsi, 0).unwrap();
    response.set_number_of_telescopes(2).unwrap();
    let rows = read_tsv(&output);
    assert_eq!(rows.len(), 2);
    assert_relative_eq!(rows[0][0], 5.0);
    assert_relative_eq!(rows[1][0], 15.0);
    for row in &rows {
        assert_relative_eq!(row[2], response.effective_area_at(row[0]));
    }
}

#[test]
fn test_save_toml() {
    let tmp_dir = TempDir::new().unwrap();
    let toml = tmp_dir.path().join("saved.toml");
    let cmd = foxsi()
        .args(["effective-area", "-i", "stc-f", "-e", "8", "--data-dir"])
        .arg(data_dir())
        .arg("--save-toml")
        .arg(&toml)
        .arg("-o")
        .arg(tmp_dir.path().join("stc.tsv"))
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let saved = std::fs::read_to_string(&toml).unwrap();
    assert!(saved.contains("instrument = \"stc-f\""), "{saved}");
}

#[test]
fn test_stc_ignores_shutter() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("stc.tsv");
    let cmd = foxsi()
        .args(["effective-area", "-i", "STC-Q", "-s", "2", "-e", "6", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("ignoring shutter state 2"), "{stdout}");

    let response = Response::load(&reference_data(), Instrument::Stc(StcKind::Q), 0).unwrap();
    let rows = read_tsv(&output);
    assert_relative_eq!(rows[0][2], response.effective_area_at(6.0));
}

#[test]
fn test_energies_outside_grid_have_zero_area() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("ea.tsv");
    let cmd = foxsi()
        .args(["effective-area", "-e", "1000", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let rows = read_tsv(&output);
    assert_eq!(rows[0][1], 0.0);
    assert_eq!(rows[0][2], 0.0);
}

#[test]
fn test_invalid_shutter_state() {
    let tmp_dir = TempDir::new().unwrap();
    let cmd = foxsi()
        .args(["effective-area", "-s", "5", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(tmp_dir.path().join("ea.tsv"))
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Shutter state 5 is invalid"), "{stderr}");
}

#[test]
fn test_unknown_instrument() {
    let cmd = foxsi()
        .args(["effective-area", "-i", "hxr", "--data-dir"])
        .arg(data_dir())
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unknown instrument 'hxr'"), "{stderr}");
    assert!(stderr.contains("stc-q"), "{stderr}");
}

#[test]
fn test_bad_args_file_extension() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = tmp_dir.path().join("args.yaml");
    std::fs::write(&args_file, "instrument: dsi\n").unwrap();
    let cmd = foxsi()
        .arg("effective-area")
        .arg(&args_file)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("recognised file extension"), "{stderr}");
}
