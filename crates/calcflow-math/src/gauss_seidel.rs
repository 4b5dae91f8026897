// ─────────────────────────────────────────────────────────────────────
// CalcFlow — Gauss-Seidel Iteration
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gauss-Seidel iterative solver for dense `A x = b`.
//!
//! Each sweep updates the components in index order, so row `i` already
//! sees the new values of `x[0..i]`:
//!   x_i = (b_i - Σ_{j<i} a_ij x_j^new - Σ_{j>i} a_ij x_j^old) / a_ii
//!
//! The stopping error is the L-infinity change between consecutive
//! iterates. Diagonal dominance is not checked; a non-dominant system may
//! drift to the iteration budget. Set
//! [`GaussSeidelConfig::divergence_threshold`] to abort early instead.

use calcflow_types::config::GaussSeidelConfig;
use calcflow_types::error::{CalcError, CalcResult};
use calcflow_types::state::IterationRecord;
use log::{debug, warn};
use ndarray::{Array1, Array2};

use crate::check;

#[derive(Debug, Clone)]
pub struct GaussSeidelResult {
    /// Last iterate.
    pub x: Array1<f64>,
    /// Sweeps performed; equals `max_iterations` when not converged.
    pub iterations: usize,
    /// Max component change of the final sweep.
    pub error: f64,
    pub converged: bool,
    /// One record per sweep when `record_history` is set, else empty.
    pub history: Vec<IterationRecord>,
}

/// Run Gauss-Seidel from the initial guess `x0`.
pub fn solve_iterative(
    a: &Array2<f64>,
    b: &Array1<f64>,
    x0: &Array1<f64>,
    config: &GaussSeidelConfig,
) -> CalcResult<GaussSeidelResult> {
    config.validate()?;
    let n = check::square_system(a, b)?;
    if x0.len() != n {
        return Err(CalcError::MalformedInput(format!(
            "initial guess has {} entries, system has {n} unknowns",
            x0.len()
        )));
    }
    if x0.iter().any(|v| !v.is_finite()) {
        return Err(CalcError::MalformedInput(
            "initial guess must be finite".to_string(),
        ));
    }
    nonzero_diagonal(a)?;

    let mut x = x0.to_owned();
    let mut history = Vec::new();
    let mut error = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let x_old = x.clone();
        sweep(a, b, &mut x, &x_old);

        error = x
            .iter()
            .zip(x_old.iter())
            .fold(0.0_f64, |acc, (new, old)| acc.max((new - old).abs()));
        if !error.is_finite() || x.iter().any(|v| !v.is_finite()) {
            return Err(CalcError::NumericalFault(format!(
                "non-finite iterate after sweep {iteration}"
            )));
        }

        if let Some(threshold) = config.divergence_threshold {
            let magnitude = x.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            if magnitude > threshold {
                warn!("gauss-seidel diverged at sweep {iteration}: max |x| = {magnitude:e}");
                return Err(CalcError::SolverDiverged {
                    iteration,
                    magnitude,
                });
            }
        }

        debug!("gauss-seidel sweep {iteration}: error = {error:.3e}");
        if config.record_history {
            history.push(IterationRecord {
                iteration,
                x: x.clone(),
                error,
            });
        }

        if error < config.tolerance {
            return Ok(GaussSeidelResult {
                x,
                iterations: iteration,
                error,
                converged: true,
                history,
            });
        }
    }

    warn!(
        "gauss-seidel did not reach tolerance {:e} in {} sweeps (error {error:e})",
        config.tolerance, config.max_iterations
    );
    Ok(GaussSeidelResult {
        x,
        iterations: config.max_iterations,
        error,
        converged: false,
        history,
    })
}

/// Starting vector `x0[i] = b[i] / a[i][i]`.
pub fn diagonal_guess(a: &Array2<f64>, b: &Array1<f64>) -> CalcResult<Array1<f64>> {
    let n = check::square_system(a, b)?;
    nonzero_diagonal(a)?;
    Ok(Array1::from_shape_fn(n, |i| b[i] / a[[i, i]]))
}

/// Strict row diagonal dominance: |a_ii| > Σ_{j≠i} |a_ij| for every row.
///
/// Sufficient for Gauss-Seidel convergence. Non-square input is never dominant.
pub fn is_diagonally_dominant(a: &Array2<f64>) -> bool {
    let (rows, cols) = a.dim();
    if rows == 0 || rows != cols {
        return false;
    }
    a.outer_iter().enumerate().all(|(i, row)| {
        let off: f64 = row
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, v)| v.abs())
            .sum();
        row[i].abs() > off
    })
}

fn nonzero_diagonal(a: &Array2<f64>) -> CalcResult<()> {
    match (0..a.nrows()).find(|&i| a[[i, i]] == 0.0) {
        Some(i) => Err(CalcError::NumericalFault(format!(
            "zero diagonal entry in row {}",
            i + 1
        ))),
        None => Ok(()),
    }
}

#[inline]
fn sweep(a: &Array2<f64>, b: &Array1<f64>, x: &mut Array1<f64>, x_old: &Array1<f64>) {
    let n = b.len();
    for i in 0..n {
        let mut s1 = 0.0;
        for j in 0..i {
            s1 += a[[i, j]] * x[j];
        }
        let mut s2 = 0.0;
        for j in (i + 1)..n {
            s2 += a[[i, j]] * x_old[j];
        }
        x[i] = (b[i] - s1 - s2) / a[[i, i]];
    }
}
