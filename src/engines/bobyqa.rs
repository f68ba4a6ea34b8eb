//! engines::bobyqa — bound-constrained minimization.
//!
//! Bounds are enforced by projection: the starting point is moved into the
//! box before the first evaluation and every poll step is clamped, so no
//! iterate ever leaves the feasible box. The box must leave room for the
//! radius schedule; a gap smaller than twice the final radius is reported
//! as [`StatusCode::NoSpaceBetweenBounds`]. A defaulted initial radius is
//! capped at half the smallest gap, while an explicit one that does not fit
//! is rejected rather than silently reduced.

use crate::engines::trust_region::{drive, resolve_radii, Bounds, Config, Evaluation};
use crate::engines::{check_npt, check_shapes, SolverEngine};
use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;
use crate::minimize::types::Point;

pub(crate) struct Bobyqa;

impl SolverEngine for Bobyqa {
    fn solve(
        &self, problem: &mut Problem<'_>, options: &mut Options<'_>, result: &mut MinimizeResult,
    ) -> StatusCode {
        if let Err(status) = check_shapes(problem) {
            return status;
        }
        if let Err(status) = check_npt(problem.n, options.npt) {
            return status;
        }
        let (rhobeg, rhoend) = match resolve_radii(options) {
            Ok(pair) => pair,
            Err(status) => return status,
        };
        let rhobeg = match fit_to_bounds(problem, options, rhobeg, rhoend) {
            Ok(radius) => radius,
            Err(status) => return status,
        };
        let config = Config {
            name: "bobyqa",
            rhobeg,
            rhoend,
            maxfun: options.maxfun,
            ftarget: options.ftarget,
            iprint: options.iprint,
            samples: options.npt - 1,
        };
        let bounds = Bounds { xl: problem.xl, xu: problem.xu };
        let cached = (!problem.f0.is_nan())
            .then(|| Evaluation { f: problem.f0, cstrv: 0.0, nlconstr: None });
        let Some(objective) = problem.objective.as_mut() else {
            return StatusCode::NullFunction;
        };
        let mut evaluator =
            |x: &Point| Evaluation { f: (**objective)(x), cstrv: 0.0, nlconstr: None };
        drive(&config, &bounds, cached, &mut evaluator, options.monitor.as_deref_mut(), result)
    }
}

/// Check the box against the radius schedule and return the initial radius
/// to use.
///
/// With both bound vectors present, the smallest gap `xu_i - xl_i` must be
/// at least `2·rhoend`; otherwise — crossed bounds included — there is no
/// space for the final poll. A sentinel-derived `rhobeg` is capped at half
/// that gap; an explicit `rhobeg` needing more space is
/// [`StatusCode::NoSpaceBetweenBounds`].
fn fit_to_bounds(
    problem: &Problem<'_>, options: &Options<'_>, rhobeg: f64, rhoend: f64,
) -> Result<f64, StatusCode> {
    let (Some(xl), Some(xu)) = (problem.xl, problem.xu) else {
        return Ok(rhobeg);
    };
    let mut min_gap = f64::INFINITY;
    for (lo, hi) in xl.iter().zip(xu.iter()) {
        min_gap = min_gap.min(hi - lo);
    }
    if min_gap < 2.0 * rhoend {
        return Err(StatusCode::NoSpaceBetweenBounds);
    }
    if rhobeg > 0.5 * min_gap {
        if options.rhobeg.is_nan() {
            return Ok(0.5 * min_gap);
        }
        return Err(StatusCode::NoSpaceBetweenBounds);
    }
    Ok(rhobeg)
}
