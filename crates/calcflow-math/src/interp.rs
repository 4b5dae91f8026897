// ─────────────────────────────────────────────────────────────────────
// CalcFlow — Polynomial Interpolation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lagrange and Newton (divided-difference) interpolation.
//!
//! Both forms evaluate the unique polynomial of degree <= n-1 through n
//! nodes, so they agree up to rounding. Nodes must be distinct but need
//! not be sorted.

use calcflow_types::error::CalcResult;
use calcflow_types::state::SampleSet;
use log::trace;
use ndarray::Array2;

use crate::check;

/// Lagrange form: Σ_i y_i Π_{j≠i} (x0 - x_j) / (x_i - x_j).
pub fn interpolate_lagrange(x: &[f64], y: &[f64], x0: f64) -> CalcResult<f64> {
    let n = check::samples(x, y)?;
    check::distinct_nodes(x)?;
    trace!("lagrange: {n} nodes, x0 = {x0}");

    let mut total = 0.0;
    for i in 0..n {
        let mut basis = 1.0;
        for j in 0..n {
            if i != j {
                basis *= (x0 - x[j]) / (x[i] - x[j]);
            }
        }
        total += basis * y[i];
    }
    check::finite_result(total, "Lagrange estimate")
}

/// Newton form with its divided-difference coefficients.
#[derive(Debug, Clone)]
pub struct NewtonInterpolation {
    /// P(x0).
    pub value: f64,
    coefficients: Vec<f64>,
    nodes: Vec<f64>,
}

impl NewtonInterpolation {
    /// `coefficients()[i] = f[x_0, ..., x_i]`; never empty.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluate the same polynomial at another point.
    pub fn eval_at(&self, t: f64) -> f64 {
        newton_sum(&self.coefficients, &self.nodes, t)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }
}

/// Newton form: f[x_0] + Σ_{i>=1} f[x_0..x_i] Π_{k<i} (x0 - x_k).
pub fn interpolate_newton(x: &[f64], y: &[f64], x0: f64) -> CalcResult<NewtonInterpolation> {
    let n = check::samples(x, y)?;
    check::distinct_nodes(x)?;
    trace!("newton: {n} nodes, x0 = {x0}");

    // In place: sweeping i downward keeps dd[i-1] at order j-1 until row i
    // has consumed it.
    let mut dd = y.to_vec();
    for j in 1..n {
        for i in (j..n).rev() {
            dd[i] = (dd[i] - dd[i - 1]) / (x[i] - x[i - j]);
        }
    }
    for (i, c) in dd.iter().enumerate() {
        check::finite_result(*c, &format!("divided difference f[x_0..x_{i}]"))?;
    }

    let value = check::finite_result(newton_sum(&dd, x, x0), "Newton estimate")?;
    Ok(NewtonInterpolation {
        value,
        coefficients: dd,
        nodes: x.to_vec(),
    })
}

/// Full divided-difference table.
///
/// `table[[i, j]] = f[x_i, ..., x_{i+j}]` for `i + j < n`; entries past the
/// anti-diagonal are zero. Row 0 holds the Newton coefficients.
pub fn divided_difference_table(x: &[f64], y: &[f64]) -> CalcResult<Array2<f64>> {
    let n = check::samples(x, y)?;
    check::distinct_nodes(x)?;

    let mut table = Array2::zeros((n, n));
    for i in 0..n {
        table[[i, 0]] = y[i];
    }
    for j in 1..n {
        for i in 0..n - j {
            table[[i, j]] = (table[[i + 1, j - 1]] - table[[i, j - 1]]) / (x[i + j] - x[i]);
        }
    }
    Ok(table)
}

/// Lagrange and Newton estimates for one interpolation degree.
#[derive(Debug, Clone)]
pub struct DegreeComparison {
    pub degree: usize,
    /// The `degree + 1` nodes used, sorted by x.
    pub nodes: SampleSet,
    pub lagrange: f64,
    pub newton: f64,
    /// |lagrange - newton|
    pub difference: f64,
}

/// Estimate P(x0) at several degrees, each from the `degree + 1` samples
/// nearest to `x0`.
///
/// Degrees that need more points than `samples` holds (or degree 0) are
/// skipped rather than reported as errors.
pub fn compare_degrees(
    samples: &SampleSet,
    x0: f64,
    degrees: &[usize],
) -> CalcResult<Vec<DegreeComparison>> {
    let mut out = Vec::with_capacity(degrees.len());
    for &degree in degrees {
        if degree == 0 || degree + 1 > samples.len() {
            trace!("skipping degree {degree}: {} samples", samples.len());
            continue;
        }
        let nodes = samples.nearest(x0, degree + 1)?;
        let lagrange = interpolate_lagrange(nodes.x(), nodes.y(), x0)?;
        let newton = interpolate_newton(nodes.x(), nodes.y(), x0)?.value;
        out.push(DegreeComparison {
            degree,
            nodes,
            lagrange,
            newton,
            difference: (lagrange - newton).abs(),
        });
    }
    Ok(out)
}

fn newton_sum(coefficients: &[f64], nodes: &[f64], t: f64) -> f64 {
    let mut result = coefficients[0];
    let mut product = 1.0;
    for i in 1..coefficients.len() {
        product *= t - nodes[i - 1];
        result += coefficients[i] * product;
    }
    result
}
