// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use ndarray::array;
use serial_test::serial;

use super::*;
use crate::data::DEFAULT_DATA_DIR;

fn shipped() -> ReferenceData {
    ReferenceData::new(DEFAULT_DATA_DIR)
}

fn toy_curve() -> AttenuationCurve {
    AttenuationCurve::new(&[1.0, 10.0, 100.0], &[1000.0, 10.0, 0.1]).unwrap()
}

#[test]
fn test_curve_reproduces_tabulated_points() {
    let curve = toy_curve();
    assert_abs_diff_eq!(curve.at(1.0), 1000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.at(10.0), 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(curve.at(100.0), 0.1, epsilon = 1e-14);
}

#[test]
fn test_curve_is_linear_in_log_space() {
    let curve = toy_curve();
    // Half way between 1 and 10 keV in log space is sqrt(10) keV, and the
    // coefficient is half way between 10^3 and 10^1 in log space.
    assert_abs_diff_eq!(curve.at(10_f64.sqrt()), 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.at(1000_f64.sqrt()), 1.0, epsilon = 1e-12);
}

#[test]
fn test_curve_outside_range_uses_fill() {
    let curve = toy_curve();
    let fill = 10_f64.powf(OUT_OF_RANGE_LOG_FILL);
    assert_abs_diff_eq!(curve.at(0.5), fill);
    assert_abs_diff_eq!(curve.at(100.5), fill);
    assert_abs_diff_eq!(curve.at(0.0), fill);
    assert_abs_diff_eq!(curve.at(-3.0), fill);
    assert!(!curve.contains(0.5));
    assert!(curve.contains(1.0));
    assert!(curve.contains(100.0));

    let (lo, hi) = curve.energy_range_kev();
    assert_abs_diff_eq!(lo, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(hi, 100.0, epsilon = 1e-10);
}

#[test]
fn test_bad_curves() {
    assert!(matches!(
        AttenuationCurve::new(&[1.0, 2.0], &[1.0]),
        Err(MaterialError::CurveLengthMismatch {
            energies: 2,
            coefficients: 1
        })
    ));
    assert!(matches!(
        AttenuationCurve::new(&[1.0], &[1.0]),
        Err(MaterialError::CurveTooShort(1))
    ));
    assert!(matches!(
        AttenuationCurve::new(&[1.0, 2.0, 2.0], &[1.0, 1.0, 1.0]),
        Err(MaterialError::CurveNotAscending(2))
    ));
    assert!(matches!(
        AttenuationCurve::new(&[1.0, 2.0], &[1.0, 0.0]),
        Err(MaterialError::CurveNotPositive(1))
    ));
    assert!(matches!(
        AttenuationCurve::new(&[f64::NAN, 2.0], &[1.0, 1.0]),
        Err(MaterialError::CurveNotPositive(0))
    ));
}

#[test]
fn test_beer_lambert() {
    let m = Material::from_curve("toy", 2.0, 3.0, toy_curve()).unwrap();
    // mu = 10 cm^2/g, rho = 3 g/cm^3, t = 0.2 cm.
    assert_abs_diff_eq!(m.transmission_at(10.0), (-6.0_f64).exp(), epsilon = 1e-12);
    assert_abs_diff_eq!(
        m.absorption_at(10.0),
        1.0 - (-6.0_f64).exp(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(m.mass_attenuation_coefficient(10.0), 10.0, epsilon = 1e-12);
}

#[test]
fn test_transmission_over_many_energies() {
    let m = Material::from_curve("toy", 2.0, 3.0, toy_curve()).unwrap();
    let energies = [1.0, 10.0, 100.0];
    let expected = array![(-600.0_f64).exp(), (-6.0_f64).exp(), (-0.06_f64).exp()];
    assert_abs_diff_eq!(m.transmission(&energies), expected, epsilon = 1e-12);
    assert_abs_diff_eq!(
        m.absorption(&energies),
        expected.mapv(|t| 1.0 - t),
        epsilon = 1e-12
    );
}

#[test]
fn test_zero_thickness_is_transparent() {
    let m = Material::from_curve("toy", 0.0, 3.0, toy_curve()).unwrap();
    for e in [1.0, 5.0, 50.0] {
        assert_abs_diff_eq!(m.transmission_at(e), 1.0);
        assert_abs_diff_eq!(m.absorption_at(e), 0.0);
    }
}

#[test]
fn test_bad_thickness_and_density() {
    assert!(matches!(
        Material::from_curve("toy", -1.0, 3.0, toy_curve()),
        Err(MaterialError::BadThickness(_))
    ));
    assert!(matches!(
        Material::from_curve("toy", f64::NAN, 3.0, toy_curve()),
        Err(MaterialError::BadThickness(_))
    ));
    assert!(matches!(
        Material::from_curve("toy", 1.0, 0.0, toy_curve()),
        Err(MaterialError::BadDensity(_))
    ));
}

#[test]
fn test_load_shipped_material() {
    let al = Material::load(&shipped(), "Al", 1.0, None).unwrap();
    assert_eq!(al.name(), "al");
    assert_abs_diff_eq!(al.thickness_mm(), 1.0);
    assert_abs_diff_eq!(al.density_g_cm3(), 2.699);
    // 26.23 cm^2/g is tabulated at 10 keV.
    assert_abs_diff_eq!(al.mass_attenuation_coefficient(10.0), 26.23, epsilon = 1e-9);
    assert_abs_diff_eq!(
        al.transmission_at(10.0),
        (-26.23 * 2.699 * 0.1_f64).exp(),
        epsilon = 1e-12
    );
    assert_eq!(al.to_string(), "al (1 mm)");
}

#[test]
fn test_load_with_density_override() {
    let cdte = Material::load(&shipped(), "cdte", 0.5, Some(6.2)).unwrap();
    assert_abs_diff_eq!(cdte.density_g_cm3(), 6.2);
}

#[test]
fn test_unknown_material() {
    match Material::load(&shipped(), "unobtainium", 1.0, None) {
        Err(MaterialError::UnknownMaterial { name, available }) => {
            assert_eq!(name, "unobtainium");
            assert!(available.contains("cdte"));
        }
        other => panic!("Expected an unknown material error, got {other:?}"),
    }
}

#[test]
fn test_available_materials() {
    let available = Material::available(&shipped()).unwrap();
    for name in ["al", "be", "cdte", "mylar", "si"] {
        assert!(available.iter().any(|a| a == name), "{name} is missing");
    }
}

#[test]
fn test_transmission_is_a_fraction_within_calibration_range() {
    // These slabs are thin enough that exp() doesn't underflow anywhere on their
    // curves.
    let data = shipped();
    for (name, thickness_mm) in [("mylar", 0.5), ("be", 0.025), ("al", 0.1), ("si", 0.05)] {
        let m = Material::load(&data, name, thickness_mm, None).unwrap();
        let (lo, hi) = m.curve().energy_range_kev();
        let energies: Vec<f64> = (0..=200)
            .map(|i| lo + (hi - lo) * i as f64 / 200.0)
            .filter(|&e| m.curve().contains(e))
            .collect();
        let t = m.transmission(&energies);
        let a = m.absorption(&energies);
        for ((&e, &t), &a) in energies.iter().zip(t.iter()).zip(a.iter()) {
            assert!(t > 0.0 && t <= 1.0, "{name} at {e} keV: {t}");
            assert_abs_diff_eq!(a, 1.0 - t);
        }
    }
}

#[test]
fn test_absorption_complements_transmission() {
    let data = shipped();
    let energies: Vec<f64> = (1..=100).map(|e| e as f64).collect();
    for name in Material::available(&data).unwrap() {
        let m = Material::load(&data, &name, 1.0, None).unwrap();
        let sum = m.transmission(&energies) + m.absorption(&energies);
        for s in sum {
            assert_abs_diff_eq!(s, 1.0, epsilon = 1e-15);
        }
    }
}

#[test]
fn test_thicker_slab_transmits_less() {
    let data = shipped();
    let thin = Material::load(&data, "al", 1.0, None).unwrap();
    let thick = Material::load(&data, "al", 1.5, None).unwrap();
    for e in [5.0, 10.0, 20.0, 40.0] {
        assert!(thick.transmission_at(e) < thin.transmission_at(e));
    }
}

#[test]
#[serial]
fn test_new_uses_default_data() {
    let m = Material::new("mylar", 0.5).unwrap();
    assert_abs_diff_eq!(m.density_g_cm3(), 1.38);
    let m = Material::with_density("mylar", 0.5, 1.4).unwrap();
    assert_abs_diff_eq!(m.density_g_cm3(), 1.4);
}
