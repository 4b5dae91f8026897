// ─────────────────────────────────────────────────────────────────────
// CalcFlow — Composite Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Composite Trapezoidal and Simpson 1/3 rules over tabulated samples.
//!
//! Both rules take `h = x[1] - x[0]` and assume every interval has that
//! width. Use [`SampleSet::uniform_spacing`] before calling if the data may
//! be irregular.
//!
//! [`SampleSet::uniform_spacing`]: calcflow_types::state::SampleSet::uniform_spacing

use calcflow_types::error::{CalcError, CalcResult};
use log::trace;

use crate::check;

/// h (y_0 + y_{n-1} + 2 Σ interior) / 2
pub fn integrate_trapezoid(x: &[f64], y: &[f64]) -> CalcResult<f64> {
    let n = check::samples(x, y)?;
    let h = x[1] - x[0];
    trace!("trapezoid: {} intervals, h = {h}", n - 1);

    let interior: f64 = y[1..n - 1].iter().sum();
    check::finite_result(h * (y[0] + y[n - 1] + 2.0 * interior) / 2.0, "trapezoid area")
}

/// h (y_0 + y_{n-1} + 4 Σ odd + 2 Σ even interior) / 3
///
/// Fails with [`CalcError::OddIntervalCount`] unless `n - 1` is even.
pub fn integrate_simpson(x: &[f64], y: &[f64]) -> CalcResult<f64> {
    let n = check::samples(x, y)?;
    let intervals = n - 1;
    if intervals % 2 != 0 {
        return Err(CalcError::OddIntervalCount { intervals });
    }
    let h = x[1] - x[0];
    trace!("simpson: {intervals} intervals, h = {h}");

    let odd: f64 = y[1..n - 1].iter().step_by(2).sum();
    let even: f64 = y[1..n - 1].iter().skip(1).step_by(2).sum();
    check::finite_result(
        h * (y[0] + y[n - 1] + 4.0 * odd + 2.0 * even) / 3.0,
        "Simpson area",
    )
}
