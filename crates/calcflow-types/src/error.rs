// ─────────────────────────────────────────────────────────────────────
// CalcFlow — Error Taxonomy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Singular system: zero pivot in column {column}")]
    SingularSystem { column: usize },

    #[error("Solver diverged at iteration {iteration}: max |x| = {magnitude:e}")]
    SolverDiverged { iteration: usize, magnitude: f64 },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Coincident interpolation nodes: x[{first}] == x[{second}]")]
    CoincidentNodes { first: usize, second: usize },

    #[error("Simpson's rule needs an even number of intervals, got {intervals}")]
    OddIntervalCount { intervals: usize },

    #[error("Numerical fault: {0}")]
    NumericalFault(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_context() {
        let err = CalcError::SingularSystem { column: 2 };
        assert_eq!(err.to_string(), "Singular system: zero pivot in column 2");

        let err = CalcError::OddIntervalCount { intervals: 7 };
        assert!(err.to_string().contains("got 7"));

        let err = CalcError::CoincidentNodes {
            first: 0,
            second: 3,
        };
        assert!(err.to_string().contains("x[0] == x[3]"));
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> CalcResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }
        assert!(matches!(open_missing(), Err(CalcError::Io(_))));
    }
}
