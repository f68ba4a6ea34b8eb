//! engines::cobyla — nonlinearly constrained minimization through the
//! combined objective/constraint evaluator.
//!
//! Every evaluation produces the objective value and the full
//! nonlinear-constraint vector in one call; the violation measure combines
//! the nonlinear residuals with any declared linear system, and bounds are
//! enforced by projection. A NaN constraint value counts as a barrier-level
//! violation so it can never masquerade as feasible. The best point's
//! constraint vector travels into the result alongside the iterate.
//!
//! A caller-supplied `(f0, nlconstr0)` pair stands in for the evaluation at
//! the starting point; it is used only when the constraint cache matches
//! the declared dimension and the starting point needs no projection.

use crate::engines::trust_region::{drive, resolve_radii, Bounds, Config, Evaluation};
use crate::engines::{check_shapes, linear_violation, SolverEngine};
use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;
use crate::minimize::types::{Point, BARRIER_FUN};

pub(crate) struct Cobyla;

impl SolverEngine for Cobyla {
    fn solve(
        &self, problem: &mut Problem<'_>, options: &mut Options<'_>, result: &mut MinimizeResult,
    ) -> StatusCode {
        if let Err(status) = check_shapes(problem) {
            return status;
        }
        let (rhobeg, rhoend) = match resolve_radii(options) {
            Ok(pair) => pair,
            Err(status) => return status,
        };
        let config = Config {
            name: "cobyla",
            rhobeg,
            rhoend,
            maxfun: options.maxfun,
            ftarget: options.ftarget,
            iprint: options.iprint,
            samples: problem.n,
        };
        let bounds = Bounds { xl: problem.xl, xu: problem.xu };
        let m = problem.m_nlcon;
        let (a_ineq, b_ineq) = (problem.a_ineq, problem.b_ineq);
        let (a_eq, b_eq) = (problem.a_eq, problem.b_eq);

        let cached = match (problem.f0.is_nan(), problem.x0, problem.nlconstr0) {
            (false, Some(x0), Some(nlconstr0)) if m > 0 => Some(Evaluation {
                f: problem.f0,
                cstrv: linear_violation(a_ineq, b_ineq, a_eq, b_eq, x0)
                    .max(nonlinear_violation(nlconstr0)),
                nlconstr: Some(nlconstr0.clone()),
            }),
            (false, Some(x0), None) if m == 0 => Some(Evaluation {
                f: problem.f0,
                cstrv: linear_violation(a_ineq, b_ineq, a_eq, b_eq, x0),
                nlconstr: None,
            }),
            _ => None,
        };
        let Some(objcon) = problem.objcon.as_mut() else {
            return StatusCode::NullFunction;
        };
        let mut evaluator = |x: &Point| {
            let mut constr = Point::zeros(m);
            let f = (**objcon)(x, &mut constr);
            let cstrv = linear_violation(a_ineq, b_ineq, a_eq, b_eq, x)
                .max(nonlinear_violation(&constr));
            Evaluation { f, cstrv, nlconstr: (m > 0).then_some(constr) }
        };
        drive(&config, &bounds, cached, &mut evaluator, options.monitor.as_deref_mut(), result)
    }
}

/// Aggregate nonlinear violation: `max(0, c_i)` over the constraint vector,
/// with NaN entries counted at the barrier level.
fn nonlinear_violation(constr: &Point) -> f64 {
    let mut violation = 0.0_f64;
    for &c in constr.iter() {
        violation = if c.is_nan() { violation.max(BARRIER_FUN) } else { violation.max(c) };
    }
    violation
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - A solve pinned by an active nonlinear inequality, including the
    //   constraint vector landing in the result.
    // - NaN constraint values counting as violations.
    //
    // The (f0, nlconstr0) cache is covered end-to-end in `tests/`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // With the unconstrained minimizer cut off by x1² <= 9, the engine
    // settles on the constraint boundary and reports the evaluated
    // constraint vector at the best point.
    //
    // Given
    // -----
    // - f(x) = (x1 - 5)² + (x2 - 4)², c(x) = x1² - 9 <= 0, x0 = (0, 0),
    //   rhoend = 1e-3.
    //
    // Expect
    // ------
    // - SmallTrRadius near (3, 4), near-zero violation, and a constraint
    //   vector consistent with the best iterate.
    fn active_nonlinear_constraint_pins_the_solution() {
        // Arrange
        let x0 = array![0.0, 0.0];
        let mut objcon = |x: &Point, constr: &mut Point| {
            constr[0] = x[0] * x[0] - 9.0;
            (x[0] - 5.0).powi(2) + (x[1] - 4.0).powi(2)
        };
        let mut problem = Problem::new(2);
        problem.x0 = Some(&x0);
        problem.objcon = Some(&mut objcon);
        problem.m_nlcon = 1;
        let mut options = Options::new();
        options.maxfun = 4000;
        options.rhoend = 1e-3;
        let mut result = MinimizeResult::default();
        result.prepare(&problem).expect("prepare should succeed");

        // Act
        let status = Cobyla.solve(&mut problem, &mut options, &mut result);

        // Assert
        assert_eq!(status, StatusCode::SmallTrRadius);
        let best = result.x().expect("solution should be installed").clone();
        assert!((best[0] - 3.0).abs() < 5e-3, "x1 = {}", best[0]);
        assert!((best[1] - 4.0).abs() < 5e-3, "x2 = {}", best[1]);
        assert!(result.cstrv < 1e-6, "cstrv = {}", result.cstrv);
        let constr = result.nlconstr().expect("constraint vector should be installed");
        assert!((constr[0] - (best[0] * best[0] - 9.0)).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A NaN constraint value is treated as a barrier-level violation, so a
    // point producing one can never displace a feasible best point.
    //
    // Given
    // -----
    // - The aggregate over [NaN], [−1], and [−1, 0.5].
    //
    // Expect
    // ------
    // - Barrier level for the NaN, zero for the feasible vector, the
    //   positive residual otherwise.
    fn nan_constraints_count_as_barrier_violations() {
        assert_eq!(nonlinear_violation(&array![f64::NAN]), BARRIER_FUN);
        assert_eq!(nonlinear_violation(&array![-1.0]), 0.0);
        assert_eq!(nonlinear_violation(&array![-1.0, 0.5]), 0.5);
    }
}
