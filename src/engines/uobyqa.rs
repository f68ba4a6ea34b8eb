//! engines::uobyqa — unconstrained minimization with a quadratic-sized
//! initial sample.
//!
//! The simplest wrapper: no bounds, no constraints, plain objective. Its
//! initial sample set has `(n+1)(n+2)/2 - 1` points, matching the size of a
//! fully determined quadratic model.

use crate::engines::trust_region::{drive, resolve_radii, Bounds, Config, Evaluation};
use crate::engines::{check_shapes, SolverEngine};
use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;
use crate::minimize::types::Point;

pub(crate) struct Uobyqa;

impl SolverEngine for Uobyqa {
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
        let n = problem.n;
        let config = Config {
            name: "uobyqa",
            rhobeg,
            rhoend,
            maxfun: options.maxfun,
            ftarget: options.ftarget,
            iprint: options.iprint,
            samples: (n + 1) * (n + 2) / 2 - 1,
        };
        let cached = (!problem.f0.is_nan())
            .then(|| Evaluation { f: problem.f0, cstrv: 0.0, nlconstr: None });
        let Some(objective) = problem.objective.as_mut() else {
            return StatusCode::NullFunction;
        };
        let mut evaluator =
            |x: &Point| Evaluation { f: (**objective)(x), cstrv: 0.0, nlconstr: None };
        drive(
            &config,
            &Bounds::none(),
            cached,
            &mut evaluator,
            options.monitor.as_deref_mut(),
            result,
        )
    }
}
