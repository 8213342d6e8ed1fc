// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use tempfile::TempDir;

use crate::*;
use foxsi_response::Material;

#[test]
fn test_material_default_grid() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("al.tsv");
    let cmd = foxsi()
        .args(["material", "al", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let rows = read_tsv(&output);
    // 1 to 60 keV in 1 keV steps.
    assert_eq!(rows.len(), 60);
    assert_relative_eq!(rows[0][0], 1.0);
    assert_relative_eq!(rows[59][0], 60.0);
    for row in &rows {
        assert_eq!(row.len(), 4);
        assert_relative_eq!(row[2] + row[3], 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_material_matches_library() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("mylar.tsv");
    let cmd = foxsi()
        .args(["material", "Mylar", "-t", "0.25", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .args(["-e", "3", "7.5", "20"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let mylar = Material::load(&reference_data(), "mylar", 0.25, None).unwrap();
    let rows = read_tsv(&output);
    assert_eq!(rows.len(), 3);
    for (row, e) in rows.iter().zip([3.0, 7.5, 20.0]) {
        assert_relative_eq!(row[0], e);
        assert_relative_eq!(row[1], mylar.mass_attenuation_coefficient(e));
        assert_relative_eq!(row[2], mylar.transmission_at(e));
        assert_relative_eq!(row[3], mylar.absorption_at(e));
    }
}

#[test]
fn test_material_density_override_changes_transmission() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("be.tsv");
    let cmd = foxsi()
        .args(["material", "be", "-t", "0.1", "-d", "1.0", "-e", "5", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let be = Material::load(&reference_data(), "be", 0.1, Some(1.0)).unwrap();
    let rows = read_tsv(&output);
    assert_relative_eq!(rows[0][2], be.transmission_at(5.0));
}

#[test]
fn test_material_list() {
    let cmd = foxsi()
        .args(["material", "--list", "--data-dir"])
        .arg(data_dir())
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("al, be, cdte, mylar, si"), "{stdout}");
}

#[test]
fn test_unknown_material() {
    let tmp_dir = TempDir::new().unwrap();
    let cmd = foxsi()
        .args(["material", "unobtainium", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(tmp_dir.path().join("out.tsv"))
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unknown material 'unobtainium'"), "{stderr}");
}

#[test]
fn test_negative_energies_are_rejected() {
    let tmp_dir = TempDir::new().unwrap();
    let cmd = foxsi()
        .args(["material", "si", "--energies=-3", "--data-dir"])
        .arg(data_dir())
        .arg("-o")
        .arg(tmp_dir.path().join("out.tsv"))
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Energies must be positive"), "{stderr}");
}
