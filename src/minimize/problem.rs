//! minimize::problem — caller-owned problem description and its normalizer.
//!
//! A [`Problem`] borrows every caller buffer without copying: the starting
//! point, bound vectors, linear systems, and cached initial values all stay
//! owned by the caller and are never mutated by the core. The objective comes
//! in exactly one of two forms — a plain objective or a combined
//! objective/constraint evaluator — selected by which field is supplied.
//!
//! Invariant: a declared count of zero must go with an absent reference, and
//! a positive count with a present one. The validator checks presence against
//! the selected algorithm's capability set; shape consistency between counts
//! and buffers is the engine's `InvalidInput`.

use crate::minimize::types::{Matrix, Point};

/// Plain objective evaluator: `f(x)`.
///
/// Context travels by closure capture; there is no separate user-data
/// pointer. Returning NaN or `+inf` is permitted and classified by the
/// engine rather than panicking.
pub type ObjectiveFn<'a> = dyn FnMut(&Point) -> f64 + 'a;

/// Combined objective/constraint evaluator: fills the nonlinear-constraint
/// vector (`constr[i] <= 0` feasible) and returns the objective value.
pub type ObjConFn<'a> = dyn FnMut(&Point, &mut Point) -> f64 + 'a;

/// Caller-owned description of a minimization problem.
///
/// Produced in a documented zero/sentinel state by [`Problem::new`] and then
/// populated field by field. The core reads it; only the caller writes it.
pub struct Problem<'a> {
    /// Problem dimension, fixed for the problem's lifetime.
    pub n: usize,
    /// Starting point of length `n`. Required for solving; never mutated.
    pub x0: Option<&'a Point>,
    /// Plain objective, required for all algorithms except COBYLA.
    pub objective: Option<&'a mut ObjectiveFn<'a>>,
    /// Combined objective/constraint evaluator, required for COBYLA.
    pub objcon: Option<&'a mut ObjConFn<'a>>,
    /// Elementwise lower bounds (`-inf` = unbounded below).
    pub xl: Option<&'a Point>,
    /// Elementwise upper bounds (`+inf` = unbounded above).
    pub xu: Option<&'a Point>,
    /// Number of linear inequality constraints `A_ineq · x <= b_ineq`.
    pub m_ineq: usize,
    /// Inequality matrix, `m_ineq × n`.
    pub a_ineq: Option<&'a Matrix>,
    /// Inequality right-hand side, length `m_ineq`.
    pub b_ineq: Option<&'a Point>,
    /// Number of linear equality constraints `A_eq · x = b_eq`.
    pub m_eq: usize,
    /// Equality matrix, `m_eq × n`.
    pub a_eq: Option<&'a Matrix>,
    /// Equality right-hand side, length `m_eq`.
    pub b_eq: Option<&'a Point>,
    /// Nonlinear-constraint output dimension of `objcon`.
    pub m_nlcon: usize,
    /// Cached objective value at `x0`; NaN means "not cached".
    pub f0: f64,
    /// Cached nonlinear-constraint values at `x0`, length `m_nlcon`.
    pub nlconstr0: Option<&'a Point>,
}

impl<'a> Problem<'a> {
    /// Create a zero/sentinel-initialized problem of dimension `n`.
    ///
    /// All optional features are absent, all counts are zero, and `f0` is the
    /// NaN "not cached" sentinel. The caller then populates the fields that
    /// apply to its problem.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            x0: None,
            objective: None,
            objcon: None,
            xl: None,
            xu: None,
            m_ineq: 0,
            a_ineq: None,
            b_ineq: None,
            m_eq: 0,
            a_eq: None,
            b_eq: None,
            m_nlcon: 0,
            f0: f64::NAN,
            nlconstr0: None,
        }
    }

    /// Whether any linear-constraint feature (counts or buffers) is present.
    pub(crate) fn has_linear_features(&self) -> bool {
        self.m_ineq > 0
            || self.m_eq > 0
            || self.a_ineq.is_some()
            || self.b_ineq.is_some()
            || self.a_eq.is_some()
            || self.b_eq.is_some()
    }

    /// Whether any nonlinear-constraint feature is present: the combined
    /// evaluator, a positive constraint count, or cached constraint values.
    pub(crate) fn has_nonlinear_features(&self) -> bool {
        self.objcon.is_some() || self.m_nlcon > 0 || self.nlconstr0.is_some()
    }

    /// Whether either bound vector is present.
    pub(crate) fn has_bound_features(&self) -> bool {
        self.xl.is_some() || self.xu.is_some()
    }
}
