//! minimize::types — shared numeric aliases and solver-wide constants.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and tuning constants used by the
//! front end and the engines. Defining these in one place keeps the rest of
//! the code agnostic to `ndarray` specifics and gives the default-derivation
//! rules a single home.
//!
//! Conventions
//! -----------
//! - [`Point`] is conceptually a column vector of length `n` (the problem
//!   dimension); [`Matrix`] is row-major with one constraint per row.
//! - Sentinel semantics live with the types that carry them (`Options`,
//!   `Problem`); this module only defines the values the sentinels resolve to.

use ndarray::{Array1, Array2};

/// Parameter/solution vector for minimization.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical point type
/// throughout the crate.
pub type Point = Array1<f64>;

/// Dense constraint matrix, one linear constraint per row.
///
/// Alias for `ndarray::Array2<f64>`; `m × n` for `m` constraints over an
/// `n`-dimensional problem.
pub type Matrix = Array2<f64>;

/// Evaluation-budget factor: an unset `maxfun` resolves to `500 · n`.
pub const MAXFUN_PER_DIM: usize = 500;

/// Default initial trust-region radius when `rhobeg` is unset.
///
/// Engines cap this at half the smallest bound gap when bounds are present.
pub const DEFAULT_RHOBEG: f64 = 1.0;

/// Default final trust-region radius when `rhoend` is unset (clamped to
/// `rhobeg` when the initial radius is smaller).
pub const DEFAULT_RHOEND: f64 = 1e-6;

/// Moderated extreme barrier: non-finite objective values observed after the
/// initial evaluation are replaced by this ceiling so the poll loop can step
/// around singular regions without propagating NaN.
pub const BARRIER_FUN: f64 = 1e30;

/// Constraint-violation tolerance under which a point counts as feasible for
/// target-achievement purposes.
pub const FEASIBILITY_TOL: f64 = 1e-10;
