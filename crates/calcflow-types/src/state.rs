// ─────────────────────────────────────────────────────────────────────
// CalcFlow — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;

use ndarray::Array1;

use crate::error::{CalcError, CalcResult};

/// Spacing tolerance the front-end applies before integrating.
pub const UNIFORM_SPACING_TOL: f64 = 1e-6;

/// Tabulated samples (x_i, y_i), at least two, all finite.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSet {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> CalcResult<Self> {
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
        Ok(SampleSet { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: construction rejects fewer than two samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of intervals between consecutive samples.
    pub fn intervals(&self) -> usize {
        self.x.len() - 1
    }

    /// Returns `h = x[1] - x[0]` when every interval matches it within `tol`.
    pub fn uniform_spacing(&self, tol: f64) -> Option<f64> {
        let h = self.x[1] - self.x[0];
        let uniform = self.x.windows(2).all(|w| (w[1] - w[0] - h).abs() < tol);
        uniform.then_some(h)
    }

    /// The `count` samples closest to `x0`, returned in increasing x.
    ///
    /// Distance ties keep input order, so the selection is deterministic.
    pub fn nearest(&self, x0: f64, count: usize) -> CalcResult<SampleSet> {
        if count < 2 || count > self.len() {
            return Err(CalcError::MalformedInput(format!(
                "cannot select {count} of {} samples",
                self.len()
            )));
        }
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&i, &j| (self.x[i] - x0).abs().total_cmp(&(self.x[j] - x0).abs()));
        order.truncate(count);
        order.sort_by(|&i, &j| self.x[i].total_cmp(&self.x[j]));

        Ok(SampleSet {
            x: order.iter().map(|&i| self.x[i]).collect(),
            y: order.iter().map(|&i| self.y[i]).collect(),
        })
    }
}

/// Human-readable trace of a direct solve. Diagnostic only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLog(Vec<String>);

impl StepLog {
    pub fn new() -> Self {
        StepLog(Vec::new())
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl fmt::Display for StepLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

impl IntoIterator for StepLog {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One Gauss-Seidel sweep: 1-based index, iterate after the sweep, and
/// max component change from the previous iterate.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    pub iteration: usize,
    pub x: Array1<f64>,
    pub error: f64,
}
