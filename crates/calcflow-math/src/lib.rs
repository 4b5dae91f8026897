//! Numerical kernel for CalcFlow.
//!
//! Gaussian elimination, Gauss-Seidel, Lagrange/Newton interpolation and
//! composite Trapezoidal/Simpson quadrature. Every routine borrows its
//! inputs, allocates its own working copies and returns `CalcResult`.

mod check;
pub mod gauss;
pub mod gauss_seidel;
pub mod interp;
pub mod quadrature;
