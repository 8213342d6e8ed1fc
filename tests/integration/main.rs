// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod effective_area;
mod material;
mod psf_and_optic;

use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::from_utf8;

use assert_cmd::{output::OutputError, Command};

use foxsi_response::ReferenceData;

fn foxsi() -> Command {
    Command::cargo_bin("foxsi").unwrap()
}

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn reference_data() -> ReferenceData {
    ReferenceData::new(data_dir())
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Read the rows of a tab-separated results file, skipping the header.
fn read_tsv(path: &Path) -> Vec<Vec<f64>> {
    let contents = std::fs::read_to_string(path).unwrap();
    contents
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split('\t').map(|v| v.parse().unwrap()).collect())
        .collect()
}

#[test]
fn test_no_args_prints_help() {
    let cmd = foxsi().ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("effective-area") || stderr.contains("effective-area"));
}

#[test]
fn test_mission() {
    let cmd = foxsi()
        .arg("mission")
        .arg("--data-dir")
        .arg(data_dir())
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("FOXSI SMEX"), "{stdout}");
    assert!(stdout.contains("cdte"), "{stdout}");
    assert!(stdout.contains("foxsi mission complete."), "{stdout}");
}

#[test]
fn test_bad_data_dir_mentions_how_to_fix() {
    let cmd = foxsi()
        .args(["optic", "--data-dir", "/does/not/exist"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("--data-dir"), "{stderr}");
    assert!(stderr.contains("FOXSI_DATA_DIR"), "{stderr}");
}
