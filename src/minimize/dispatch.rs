//! minimize::dispatch — routing from the algorithm choice to one engine.
//!
//! The match below is exhaustive over the closed [`Algorithm`] enumeration,
//! so adding a variant without wiring an engine is a compile error. Exactly
//! one engine runs per `minimize` call; engines never call each other.

use crate::engines::{self, SolverEngine};
use crate::minimize::algorithm::Algorithm;
use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;

/// Run the one engine matching `algorithm` on an already validated and
/// prepared problem/result pair.
pub(crate) fn run(
    algorithm: Algorithm, problem: &mut Problem<'_>, options: &mut Options<'_>,
    result: &mut MinimizeResult,
) -> StatusCode {
    match algorithm {
        Algorithm::Uobyqa => engines::uobyqa::Uobyqa.solve(problem, options, result),
        Algorithm::Newuoa => engines::newuoa::Newuoa.solve(problem, options, result),
        Algorithm::Bobyqa => engines::bobyqa::Bobyqa.solve(problem, options, result),
        Algorithm::Lincoa => engines::lincoa::Lincoa.solve(problem, options, result),
        Algorithm::Cobyla => engines::cobyla::Cobyla.solve(problem, options, result),
    }
}
