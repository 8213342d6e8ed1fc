// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.


/// Linearly interpolate `ys` (tabulated at the strictly ascending `xs`) at
/// `x`. Values of `x` outside `[xs[0], xs[n-1]]` (and NaN) give `fill`.
///
/// # Examples
///
/// `assert_abs_diff_eq!(interp(1.5, &[1.0, 2.0], &[10.0, 20.0], 0.0), 15.0);`
pub(crate) fn interp(x: f64, xs: &[f64], ys: &[f64], fill: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n == 0 || !(xs[0]..=xs[n - 1]).contains(&x) {
        return fill;
    }
    if n == 1 {
        return ys[0];
    }

    // The index of the first tabulated x that is > x, clamped so that there is
    // always a segment to the left.
    let i = xs.partition_point(|&xi| xi <= x).clamp(1, n - 1);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Evaluate a polynomial at `x`. The coefficients are ordered from the highest
/// power to the constant term.
///
/// # Examples
///
/// `assert_abs_diff_eq!(polyval(&[2.0, 0.0, 1.0], 3.0), 19.0);`
#[inline]
pub(crate) fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// `start, start + step, ...` up to but excluding `stop`. An empty vector is
/// returned if `step` isn't positive.
pub(crate) fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil();
    if step <= 0.0 || !n.is_finite() || n <= 0.0 {
        return vec![];
    }
    (0..n as usize).map(|i| start + step * i as f64).collect()
}
