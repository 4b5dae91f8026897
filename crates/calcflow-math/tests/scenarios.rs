// ─────────────────────────────────────────────────────────────────────
// CalcFlow — Textbook Scenario Tests for calcflow-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! End-to-end runs on the classroom datasets: the materials allocation
//! system, the five-mesh circuit, the current/voltage table and the
//! ship-hull half-breadths.

use calcflow_math::gauss::{solve_direct, ResidualReport};
use calcflow_math::gauss_seidel::{diagonal_guess, is_diagonally_dominant, solve_iterative};
use calcflow_math::interp::{compare_degrees, interpolate_lagrange, interpolate_newton};
use calcflow_math::quadrature::{integrate_simpson, integrate_trapezoid};
use calcflow_types::config::{GaussSeidelConfig, StepLogging};
use calcflow_types::error::CalcError;
use calcflow_types::state::{SampleSet, UNIFORM_SPACING_TOL};
use ndarray::{array, Array1, Array2};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn materials_system() -> (Array2<f64>, Array1<f64>) {
    (
        array![[15.0, 17.0, 19.0], [0.30, 0.40, 0.55], [1.0, 1.2, 1.5]],
        array![3890.0, 95.0, 282.0],
    )
}

fn circuit_system() -> (Array2<f64>, Array1<f64>) {
    (
        array![
            [9.5, -2.5, 0.0, -2.0, 0.0],
            [-2.5, 10.5, 0.0, -3.0, -8.0],
            [0.0, 0.0, 15.5, 0.0, -4.0],
            [-2.0, -3.0, 0.0, 7.0, -3.0],
            [0.0, -8.0, -4.0, -3.0, 12.0]
        ],
        array![-12.0, -16.0, -14.0, -10.0, -30.0],
    )
}

const HULL_X: [f64; 8] = [0.0, 0.4, 0.8, 1.2, 1.6, 2.0, 2.4, 2.8];
const HULL_Y: [f64; 8] = [3.00, 2.92, 2.75, 2.52, 2.30, 1.84, 0.92, 0.00];

// ── Direct solver ────────────────────────────────────────────────────

#[test]
fn materials_system_reproduces_rhs() {
    init_logging();
    let (a, b) = materials_system();
    let sol = solve_direct(&a, &b, StepLogging::Enabled).unwrap();

    let report = ResidualReport::new(&a, &sol.x, &b).unwrap();
    assert!(report.max_abs < 1e-6, "max residual {}", report.max_abs);

    let expected = [90.0, 60.0, 80.0];
    for i in 0..3 {
        assert!(
            (sol.x[i] - expected[i]).abs() < 1e-6,
            "component {i}: {}",
            sol.x[i]
        );
    }

    let steps = sol.steps.unwrap();
    assert_eq!(steps.lines()[0], "Step 1: eliminate column 1");
    assert!(steps.iter().any(|l| l == "Back substitution:"));
    let back_lines = steps.iter().filter(|l| l.starts_with("  x")).count();
    assert_eq!(back_lines, 3);
}

#[test]
fn materials_system_in_kilograms() {
    let (a, b) = materials_system();
    let a_kg = a.mapv(|v| v / 1000.0);
    let b_kg = b.mapv(|v| v / 1000.0);
    let sol = solve_direct(&a_kg, &b_kg, StepLogging::Disabled).unwrap();
    assert!((sol.x[0] - 90.0).abs() < 1e-6);
    assert!((sol.x[1] - 60.0).abs() < 1e-6);
    assert!((sol.x[2] - 80.0).abs() < 1e-6);
}

#[test]
fn singular_pair_is_rejected() {
    let a = array![[1.0, 2.0], [2.0, 4.0]];
    let b = array![1.0, 1.0];
    let err: CalcError = solve_direct(&a, &b, StepLogging::Disabled)
        .unwrap_err()
        .into();
    assert!(matches!(err, CalcError::SingularSystem { .. }));
}

// ── Gauss-Seidel ─────────────────────────────────────────────────────

#[test]
fn circuit_system_is_not_dominant_and_drifts() {
    init_logging();
    let (a, b) = circuit_system();
    assert!(!is_diagonally_dominant(&a));

    let x0 = diagonal_guess(&a, &b).unwrap();
    let res = solve_iterative(&a, &b, &x0, &GaussSeidelConfig::default()).unwrap();
    assert!(!res.converged);
    assert_eq!(res.iterations, 1000);
    assert!(res.error >= 1e-4);
}

#[test]
fn circuit_system_divergence_cutoff() {
    let (a, b) = circuit_system();
    let x0 = diagonal_guess(&a, &b).unwrap();
    let cfg = GaussSeidelConfig::default().with_divergence_threshold(1e6);
    let err = solve_iterative(&a, &b, &x0, &cfg).unwrap_err();
    assert!(matches!(err, CalcError::SolverDiverged { .. }));
}

#[test]
fn circuit_system_direct_fallback() {
    // Caller-level fallback when iteration does not converge.
    let (a, b) = circuit_system();
    let sol = solve_direct(&a, &b, StepLogging::Disabled).unwrap();
    let report = ResidualReport::new(&a, &sol.x, &b).unwrap();
    assert!(report.max_abs < 1e-9);
    assert!((sol.x[0] - 16.445977160025233).abs() < 1e-9);
}

#[test]
fn dominant_system_matches_direct() {
    let a = array![
        [4.0, -1.0, 0.0, 0.0, 0.0],
        [-1.0, 4.0, -1.0, 0.0, 0.0],
        [0.0, -1.0, 4.0, -1.0, 0.0],
        [0.0, 0.0, -1.0, 4.0, -1.0],
        [0.0, 0.0, 0.0, -1.0, 4.0]
    ];
    let b = array![3.0, 2.0, 2.0, 2.0, 3.0];
    assert!(is_diagonally_dominant(&a));

    let x0 = diagonal_guess(&a, &b).unwrap();
    let cfg = GaussSeidelConfig::default().with_history();
    let iterative = solve_iterative(&a, &b, &x0, &cfg).unwrap();
    let direct = solve_direct(&a, &b, StepLogging::Disabled).unwrap();

    assert!(iterative.converged);
    assert!(iterative.iterations < cfg.max_iterations);
    for i in 0..5 {
        assert!((iterative.x[i] - 1.0).abs() < 1e-3);
        assert!((iterative.x[i] - direct.x[i]).abs() < 1e-3);
    }
    // Errors shrink monotonically on a dominant tridiagonal system.
    for w in iterative.history.windows(2) {
        assert!(w[1].error <= w[0].error);
    }
}

// ── Interpolation ────────────────────────────────────────────────────

#[test]
fn voltage_table_degrees_two_to_four() {
    init_logging();
    let samples = SampleSet::new(
        vec![0.25, 0.75, 1.25, 1.5, 2.0],
        vec![-0.45, -0.60, 0.70, 1.88, 6.0],
    )
    .unwrap();
    let rows = compare_degrees(&samples, 1.15, &[2, 3, 4]).unwrap();
    assert_eq!(rows.len(), 3);

    let expected = [0.3269333333333331, 0.3478399999999998, 0.3372863999999999];
    for (row, want) in rows.iter().zip(expected) {
        assert!(
            (row.lagrange - want).abs() < 1e-10,
            "degree {}: {}",
            row.degree,
            row.lagrange
        );
        assert!(row.difference < 1e-9);
    }
    assert_eq!(rows[2].nodes.x(), samples.x());
}

#[test]
fn repeated_calls_on_subsets_are_independent() {
    let x = [0.25, 0.75, 1.25, 1.5, 2.0];
    let y = [-0.45, -0.60, 0.70, 1.88, 6.0];
    let first = interpolate_newton(&x[1..4], &y[1..4], 1.15).unwrap();
    let _ = interpolate_newton(&x, &y, 1.15).unwrap();
    let again = interpolate_newton(&x[1..4], &y[1..4], 1.15).unwrap();
    assert_eq!(first.value, again.value);
    assert_eq!(first.coefficients(), again.coefficients());
    let lagrange = interpolate_lagrange(&x[1..4], &y[1..4], 1.15).unwrap();
    assert!((lagrange - first.value).abs() < 1e-9);
}

// ── Integration ──────────────────────────────────────────────────────

#[test]
fn hull_eight_points_trapezoid_only() {
    init_logging();
    let samples = SampleSet::new(HULL_X.to_vec(), HULL_Y.to_vec()).unwrap();
    assert!(samples.uniform_spacing(UNIFORM_SPACING_TOL).is_some());
    assert_eq!(samples.intervals(), 7);

    let trap = integrate_trapezoid(samples.x(), samples.y()).unwrap();
    assert!(trap.is_finite() && trap > 0.0);
    assert!((trap - 5.9).abs() < 1e-9, "trapezoid = {trap}");

    assert!(matches!(
        integrate_simpson(samples.x(), samples.y()),
        Err(CalcError::OddIntervalCount { intervals: 7 })
    ));
}

#[test]
fn hull_seven_points_rules_agree() {
    let x = &HULL_X[..7];
    let y = &HULL_Y[..7];
    let trap = integrate_trapezoid(x, y).unwrap();
    let simp = integrate_simpson(x, y).unwrap();
    assert!(trap > 0.0 && simp > 0.0);
    assert!((trap - 5.716).abs() < 1e-9);
    assert!((simp - 5.752).abs() < 1e-9);
    assert!((trap - simp).abs() / trap < 0.05);
}
