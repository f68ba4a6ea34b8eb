//! engines — the five solver back ends behind the dispatch layer.
//!
//! Purpose
//! -------
//! House the numerical side of the crate: one engine per algorithm, all
//! built on the shared trust-region driver in [`trust_region`]. The engines
//! receive problems that already passed capability validation and a result
//! that already owns its buffers; their own responsibility starts at shape
//! consistency and radius resolution and ends at a terminal [`StatusCode`].
//!
//! Key behaviors
//! -------------
//! - [`SolverEngine::solve`] is the single seam between dispatch and
//!   numerics; every engine is a stateless unit struct behind it.
//! - Shape checks ([`check_shapes`]) reject count/buffer inconsistencies as
//!   `InvalidInput` before any evaluation.
//! - Each engine composes a unified evaluator (objective value plus a
//!   constraint-violation measure) and hands it to the shared driver.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly one engine runs per `minimize` call; engines never call each
//!   other.
//! - Capability validation already happened: an engine may assume the
//!   features it sees are ones it declared support for.
//!
//! Conventions
//! -----------
//! - Violation measure: `max(0, g_i(x))` over inequalities and `|h_j(x)|`
//!   over equalities, aggregated by maximum; bounds are enforced by
//!   projection and therefore contribute no violation.
//!
//! Testing notes
//! -------------
//! - The driver has its own unit tests; engine-specific rejections are
//!   tested in each engine module, convergence end-to-end in `tests/`.

pub(crate) mod bobyqa;
pub(crate) mod cobyla;
pub(crate) mod lincoa;
pub(crate) mod newuoa;
pub(crate) mod trust_region;
pub(crate) mod uobyqa;

use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;
use crate::minimize::types::{Matrix, Point};

/// Seam between the dispatch layer and one numerical back end.
pub(crate) trait SolverEngine {
    /// Run this engine on a validated problem and a prepared result,
    /// returning the terminal status. The final iterate, objective value,
    /// violation measure, and evaluation count are written into `result`;
    /// the status itself is recorded by the caller.
    fn solve(
        &self, problem: &mut Problem<'_>, options: &mut Options<'_>, result: &mut MinimizeResult,
    ) -> StatusCode;
}

/// Check count/buffer shape consistency for every feature the problem
/// declares. Validation checked presence against capabilities; this is the
/// numerical layer's stricter pass over lengths and dimensions.
pub(crate) fn check_shapes(problem: &Problem<'_>) -> Result<(), StatusCode> {
    let n = problem.n;
    if n == 0 {
        return Err(StatusCode::InvalidInput);
    }
    if let Some(x0) = problem.x0 {
        if x0.len() != n {
            return Err(StatusCode::InvalidInput);
        }
    }
    for bound in [problem.xl, problem.xu].into_iter().flatten() {
        if bound.len() != n {
            return Err(StatusCode::InvalidInput);
        }
    }
    check_linear_system(n, problem.m_ineq, problem.a_ineq, problem.b_ineq)?;
    check_linear_system(n, problem.m_eq, problem.a_eq, problem.b_eq)?;
    if let Some(nlconstr0) = problem.nlconstr0 {
        if nlconstr0.len() != problem.m_nlcon {
            return Err(StatusCode::InvalidInput);
        }
    }
    Ok(())
}

fn check_linear_system(
    n: usize, m: usize, a: Option<&Matrix>, b: Option<&Point>,
) -> Result<(), StatusCode> {
    if m == 0 {
        return Ok(());
    }
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(StatusCode::InvalidInput),
    };
    if a.nrows() != m || a.ncols() != n || b.len() != m {
        return Err(StatusCode::InvalidInput);
    }
    Ok(())
}

/// Aggregate violation of a linear system at `x`: `max(0, a_i·x - b_i)`
/// over inequalities, `|a_j·x - b_j|` over equalities, combined by maximum.
/// Zero when no linear constraints are supplied.
///
/// Takes the buffers rather than the whole problem so engine evaluators can
/// capture them while the evaluator itself is borrowed mutably.
pub(crate) fn linear_violation(
    a_ineq: Option<&Matrix>, b_ineq: Option<&Point>, a_eq: Option<&Matrix>, b_eq: Option<&Point>,
    x: &Point,
) -> f64 {
    let mut violation = 0.0_f64;
    if let (Some(a), Some(b)) = (a_ineq, b_ineq) {
        for (row, rhs) in a.rows().into_iter().zip(b.iter()) {
            violation = violation.max(row.dot(x) - rhs);
        }
    }
    if let (Some(a), Some(b)) = (a_eq, b_eq) {
        for (row, rhs) in a.rows().into_iter().zip(b.iter()) {
            violation = violation.max((row.dot(x) - rhs).abs());
        }
    }
    violation.max(0.0)
}

/// Interpolation-set size must satisfy `n + 2 <= npt <= (n+1)(n+2)/2`.
pub(crate) fn check_npt(n: usize, npt: usize) -> Result<(), StatusCode> {
    if npt < n + 2 || npt > (n + 1) * (n + 2) / 2 {
        return Err(StatusCode::InvalidInput);
    }
    Ok(())
}
