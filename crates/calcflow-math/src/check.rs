//! Input validation shared by the solvers, interpolators and quadrature rules.

use calcflow_types::error::{CalcError, CalcResult};
use ndarray::{Array1, Array2};

/// Validate `A x = b` shapes and finiteness. Returns `n`.
pub(crate) fn square_system(a: &Array2<f64>, b: &Array1<f64>) -> CalcResult<usize> {
    let (rows, cols) = a.dim();
    if rows == 0 {
        return Err(CalcError::MalformedInput("empty system".to_string()));
    }
    if rows != cols {
        return Err(CalcError::MalformedInput(format!(
            "matrix must be square, got {rows}x{cols}"
        )));
    }
    if b.len() != rows {
        return Err(CalcError::MalformedInput(format!(
            "right-hand side has {} entries, matrix has {rows} rows",
            b.len()
        )));
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(CalcError::MalformedInput(
            "system contains non-finite entries".to_string(),
        ));
    }
    Ok(rows)
}

/// Validate a parallel (x, y) sample pair with at least two points.
pub(crate) fn samples(x: &[f64], y: &[f64]) -> CalcResult<usize> {
    if x.len() != y.len() {
        return Err(CalcError::MalformedInput(format!(
            "x has {} samples but y has {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(CalcError::MalformedInput(format!(
            "need at least 2 samples, got {}",
            x.len()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(CalcError::MalformedInput(
            "samples must be finite".to_string(),
        ));
    }
    Ok(x.len())
}

/// Fails on the first pair of indices with identical abscissae.
pub(crate) fn distinct_nodes(x: &[f64]) -> CalcResult<()> {
    for i in 0..x.len() {
        for j in (i + 1)..x.len() {
            if x[i] == x[j] {
                return Err(CalcError::CoincidentNodes {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}

pub(crate) fn finite_result(value: f64, what: &str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NumericalFault(format!(
            "{what} is not finite ({value})"
        )))
    }
}
