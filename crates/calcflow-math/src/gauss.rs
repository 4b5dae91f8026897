// ─────────────────────────────────────────────────────────────────────
// CalcFlow — Gaussian Elimination
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gaussian elimination with partial pivoting and back-substitution.
//!
//! Works on a private copy of `(A, b)`. At each column `k` the row in
//! `[k, n)` with the largest |A[i][k]| becomes the pivot (first occurrence
//! wins ties). An exactly-zero pivot after selection is reported as a
//! singular system.
//!
//! With [`StepLogging::Enabled`] every swap, elimination phase, row
//! multiplier and back-substitution line is recorded in a [`StepLog`].
//! The same lines go to `log::debug!` whenever debug logging is active.

use calcflow_types::config::StepLogging;
use calcflow_types::error::{CalcError, CalcResult};
use calcflow_types::state::StepLog;
use log::{debug, log_enabled, warn, Level};
use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::check;

/// Successful direct solve.
#[derive(Debug, Clone)]
pub struct DirectSolution {
    pub x: Array1<f64>,
    /// Present only when step logging was requested.
    pub steps: Option<StepLog>,
}

/// Failed direct solve, with whatever steps were recorded before the failure.
#[derive(Error, Debug)]
#[error("Gaussian elimination failed")]
pub struct DirectFailure {
    #[source]
    pub error: CalcError,
    pub steps: Option<StepLog>,
}

impl From<DirectFailure> for CalcError {
    fn from(failure: DirectFailure) -> Self {
        failure.error
    }
}

/// Solve `A x = b`.
///
/// `a` and `b` are only borrowed; elimination runs on clones.
pub fn solve_direct(
    a: &Array2<f64>,
    b: &Array1<f64>,
    logging: StepLogging,
) -> Result<DirectSolution, DirectFailure> {
    let mut steps = logging.is_enabled().then(StepLog::new);
    let result = eliminate(a, b, &mut Recorder(steps.as_mut()));
    match result {
        Ok(x) => Ok(DirectSolution { x, steps }),
        Err(error) => {
            warn!("direct solve rejected: {error}");
            Err(DirectFailure { error, steps })
        }
    }
}

/// `A x - b`.
pub fn residual(a: &Array2<f64>, x: &Array1<f64>, b: &Array1<f64>) -> CalcResult<Array1<f64>> {
    let n = check::square_system(a, b)?;
    if x.len() != n {
        return Err(CalcError::MalformedInput(format!(
            "solution has {} entries, system has {n} unknowns",
            x.len()
        )));
    }
    Ok(a.dot(x) - b)
}

/// Residual summary shown next to a solution.
#[derive(Debug, Clone)]
pub struct ResidualReport {
    pub residual: Array1<f64>,
    pub max_abs: f64,
    pub l2_norm: f64,
}

impl ResidualReport {
    pub fn new(a: &Array2<f64>, x: &Array1<f64>, b: &Array1<f64>) -> CalcResult<Self> {
        let residual = residual(a, x, b)?;
        let max_abs = residual.iter().fold(0.0_f64, |acc, r| acc.max(r.abs()));
        let l2_norm = residual.dot(&residual).sqrt();
        Ok(ResidualReport {
            residual,
            max_abs,
            l2_norm,
        })
    }
}

struct Recorder<'a>(Option<&'a mut StepLog>);

impl Recorder<'_> {
    fn note(&mut self, line: impl FnOnce() -> String) {
        if self.0.is_none() && !log_enabled!(Level::Debug) {
            return;
        }
        let line = line();
        debug!("{line}");
        if let Some(log) = self.0.as_deref_mut() {
            log.push(line);
        }
    }
}

fn eliminate(a: &Array2<f64>, b: &Array1<f64>, rec: &mut Recorder<'_>) -> CalcResult<Array1<f64>> {
    let n = check::square_system(a, b)?;
    let mut m = a.to_owned();
    let mut rhs = b.to_owned();

    for k in 0..n {
        let p = pivot_row(&m, k);
        if p != k {
            for j in 0..n {
                m.swap([k, j], [p, j]);
            }
            rhs.swap(k, p);
            rec.note(|| {
                format!(
                    "Step {}: swap rows {} <-> {} (partial pivoting)",
                    k + 1,
                    k + 1,
                    p + 1
                )
            });
        }

        let pivot = m[[k, k]];
        if pivot == 0.0 {
            return Err(CalcError::SingularSystem { column: k });
        }

        rec.note(|| format!("Step {}: eliminate column {}", k + 1, k + 1));
        for i in (k + 1)..n {
            let factor = m[[i, k]] / pivot;
            rec.note(|| {
                format!(
                    "  -> Row {} = Row {} - ({factor:.4}) x Row {}",
                    i + 1,
                    i + 1,
                    k + 1
                )
            });
            for j in k..n {
                let upper = m[[k, j]];
                m[[i, j]] -= factor * upper;
            }
            let upper_rhs = rhs[k];
            rhs[i] -= factor * upper_rhs;
        }
    }

    rec.note(|| "Back substitution:".to_string());
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        // fold from +0.0: an empty f64 sum is -0.0 and would print as "-0.0000"
        let s = ((i + 1)..n).fold(0.0_f64, |acc, j| acc + m[[i, j]] * x[j]);
        x[i] = (rhs[i] - s) / m[[i, i]];
        rec.note(|| {
            format!(
                "  x{} = ({:.4} - {s:.4}) / {:.4} = {:.4}",
                i + 1,
                rhs[i],
                m[[i, i]],
                x[i]
            )
        });
    }

    for (i, &xi) in x.iter().enumerate() {
        check::finite_result(xi, &format!("x[{i}]"))?;
    }
    Ok(x)
}

/// Row in `[k, n)` with the largest |m[i][k]|; the first one wins ties.
fn pivot_row(m: &Array2<f64>, k: usize) -> usize {
    let n = m.nrows();
    let mut best = k;
    let mut best_abs = m[[k, k]].abs();
    for i in (k + 1)..n {
        let v = m[[i, k]].abs();
        if v > best_abs {
            best = i;
            best_abs = v;
        }
    }
    best
}
