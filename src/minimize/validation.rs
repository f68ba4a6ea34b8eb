//! minimize::validation — capability checks and default derivation.
//!
//! Purpose
//! -------
//! Decide, before any evaluator call, whether a problem description is
//! compatible with the selected algorithm, and resolve the two
//! dimension-derived option defaults in place. Validation inspects presence
//! and declared counts only — it never reads buffer contents and performs no
//! numerical evaluation.
//!
//! Check order (the contract; first violation wins)
//! ------------------------------------------------
//! 1. nonlinear-constraint features against nonlinear capability,
//! 2. linear-constraint features against linear capability,
//! 3. bound features against bound capability,
//! 4. (options absence — unrepresentable through the safe API; the order
//!    slot is retained here for contract fidelity),
//! 5. starting point presence,
//! 6. presence of the evaluator form the algorithm requires,
//! 7. on success: `maxfun = 500·n` if unset, `npt = 2n+1` if unset. These
//!    are the only two option fields validation mutates; the radius
//!    sentinels are left for the engine to interpret.

use crate::minimize::algorithm::Algorithm;
use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::status::StatusCode;
use crate::minimize::types::MAXFUN_PER_DIM;

/// Validate `problem` against `algorithm`'s capability set and fill the
/// derived option defaults.
///
/// `constrained` selects which evaluator form is required: the combined
/// objective/constraint evaluator when true, the plain objective otherwise.
///
/// # Errors
/// - [`StatusCode::NonlinearConstraintMismatch`] /
///   [`StatusCode::LinearConstraintMismatch`] / [`StatusCode::BoundMismatch`]
///   when the problem supplies a feature outside the algorithm's capability
///   set, reported in exactly that precedence.
/// - [`StatusCode::NullX0`] when the starting point is absent.
/// - [`StatusCode::NullFunction`] when the required evaluator is absent.
pub fn validate(
    problem: &Problem<'_>, options: &mut Options<'_>, constrained: bool, algorithm: Algorithm,
) -> Result<(), StatusCode> {
    let caps = algorithm.capabilities();

    if !caps.nonlinear && problem.has_nonlinear_features() {
        return Err(StatusCode::NonlinearConstraintMismatch);
    }
    if !caps.linear && problem.has_linear_features() {
        return Err(StatusCode::LinearConstraintMismatch);
    }
    if !caps.bounds && problem.has_bound_features() {
        return Err(StatusCode::BoundMismatch);
    }

    if problem.x0.is_none() {
        return Err(StatusCode::NullX0);
    }
    let evaluator_present =
        if constrained { problem.objcon.is_some() } else { problem.objective.is_some() };
    if !evaluator_present {
        return Err(StatusCode::NullFunction);
    }

    if options.maxfun == 0 {
        options.maxfun = MAXFUN_PER_DIM * problem.n;
    }
    if options.npt == 0 {
        options.npt = 2 * problem.n + 1;
    }
    Ok(())
}
