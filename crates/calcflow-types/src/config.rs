// ─────────────────────────────────────────────────────────────────────
// CalcFlow — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Whether the direct solver records a human-readable step log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepLogging {
    #[default]
    Disabled,
    Enabled,
}

impl StepLogging {
    pub fn is_enabled(self) -> bool {
        matches!(self, StepLogging::Enabled)
    }
}

impl From<bool> for StepLogging {
    fn from(enabled: bool) -> Self {
        if enabled {
            StepLogging::Enabled
        } else {
            StepLogging::Disabled
        }
    }
}

/// Gauss-Seidel iteration parameters.
///
/// Every field is optional in JSON; missing fields take the textbook
/// defaults (tolerance 1e-4, 1000 sweeps, no divergence cut-off).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussSeidelConfig {
    /// Stop once the max component change of a sweep drops below this.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Sweep budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Abort with `SolverDiverged` once any |x_i| exceeds this magnitude.
    /// `None` runs the plain textbook iteration to the budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divergence_threshold: Option<f64>,
    /// Keep one snapshot per sweep for convergence plots.
    #[serde(default)]
    pub record_history: bool,
}

fn default_tolerance() -> f64 {
    1e-4
}
fn default_max_iterations() -> usize {
    1000
}

impl Default for GaussSeidelConfig {
    fn default() -> Self {
        GaussSeidelConfig {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            divergence_threshold: None,
            record_history: false,
        }
    }
}

impl GaussSeidelConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_divergence_threshold(mut self, threshold: f64) -> Self {
        self.divergence_threshold = Some(threshold);
        self
    }

    pub fn with_history(mut self) -> Self {
        self.record_history = true;
        self
    }

    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> CalcResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CalcError::ConfigError(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::ConfigError(
                "max_iterations must be >= 1".to_string(),
            ));
        }
        if let Some(threshold) = self.divergence_threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(CalcError::ConfigError(format!(
                    "divergence_threshold must be finite and > 0, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}
