//! engines::lincoa — linearly constrained minimization.
//!
//! Bounds are enforced by projection as in the BOBYQA wrapper; the linear
//! system enters through the driver's penalty merit, with the violation
//! measure aggregated over inequality and equality residuals. A constraint
//! row of all zeros can never influence a step: when its right-hand side
//! also makes it unsatisfiable, the problem is rejected as
//! [`StatusCode::ZeroLinearConstraint`] before any evaluation.

use crate::engines::trust_region::{drive, resolve_radii, Bounds, Config, Evaluation};
use crate::engines::{check_npt, check_shapes, linear_violation, SolverEngine};
use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;
use crate::minimize::types::{Matrix, Point};

pub(crate) struct Lincoa;

impl SolverEngine for Lincoa {
    fn solve(
        &self, problem: &mut Problem<'_>, options: &mut Options<'_>, result: &mut MinimizeResult,
    ) -> StatusCode {
        if let Err(status) = check_shapes(problem) {
            return status;
        }
        if let Err(status) = check_npt(problem.n, options.npt) {
            return status;
        }
        if let Err(status) = check_zero_rows(problem) {
            return status;
        }
        let (rhobeg, rhoend) = match resolve_radii(options) {
            Ok(pair) => pair,
            Err(status) => return status,
        };
        let config = Config {
            name: "lincoa",
            rhobeg,
            rhoend,
            maxfun: options.maxfun,
            ftarget: options.ftarget,
            iprint: options.iprint,
            samples: options.npt - 1,
        };
        let bounds = Bounds { xl: problem.xl, xu: problem.xu };
        let (a_ineq, b_ineq) = (problem.a_ineq, problem.b_ineq);
        let (a_eq, b_eq) = (problem.a_eq, problem.b_eq);
        let cached = match (problem.f0.is_nan(), problem.x0) {
            (false, Some(x0)) => Some(Evaluation {
                f: problem.f0,
                cstrv: linear_violation(a_ineq, b_ineq, a_eq, b_eq, x0),
                nlconstr: None,
            }),
            _ => None,
        };
        let Some(objective) = problem.objective.as_mut() else {
            return StatusCode::NullFunction;
        };
        let mut evaluator = |x: &Point| Evaluation {
            f: (**objective)(x),
            cstrv: linear_violation(a_ineq, b_ineq, a_eq, b_eq, x),
            nlconstr: None,
        };
        drive(&config, &bounds, cached, &mut evaluator, options.monitor.as_deref_mut(), result)
    }
}

/// Reject unsatisfiable all-zero constraint rows: an inequality row of
/// zeros with a negative right-hand side, or an equality row of zeros with
/// a nonzero one.
fn check_zero_rows(problem: &Problem<'_>) -> Result<(), StatusCode> {
    if let (Some(a), Some(b)) = (problem.a_ineq, problem.b_ineq) {
        if has_unsatisfiable_zero_row(a, b, |rhs| rhs < 0.0) {
            return Err(StatusCode::ZeroLinearConstraint);
        }
    }
    if let (Some(a), Some(b)) = (problem.a_eq, problem.b_eq) {
        if has_unsatisfiable_zero_row(a, b, |rhs| rhs != 0.0) {
            return Err(StatusCode::ZeroLinearConstraint);
        }
    }
    Ok(())
}

fn has_unsatisfiable_zero_row(a: &Matrix, b: &Point, infeasible: impl Fn(f64) -> bool) -> bool {
    a.rows()
        .into_iter()
        .zip(b.iter())
        .any(|(row, &rhs)| row.iter().all(|&v| v == 0.0) && infeasible(rhs))
}
