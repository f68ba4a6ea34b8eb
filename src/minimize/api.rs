//! minimize::api — the single solver entry point.
//!
//! [`minimize`] runs the full pipeline for one solve: capability validation
//! and default derivation, result-buffer setup, dispatch to exactly one
//! engine, and terminal status recording. Every outcome — validation
//! rejection, setup failure, numerical classification, convergence — travels
//! back through the same [`StatusCode`] return value, mirrored into the
//! result together with its static diagnostic string.

use crate::minimize::algorithm::Algorithm;
use crate::minimize::dispatch;
use crate::minimize::options::Options;
use crate::minimize::problem::Problem;
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;
use crate::minimize::validation;

/// Minimize `problem` with `algorithm` under `options`, writing the outcome
/// into `result`.
///
/// Pipeline:
/// 1. Validate the problem's features against the algorithm's capability set
///    and fill the derived defaults (`maxfun`, `npt`) in place. A rejected
///    combination returns here with the mismatch status and an untouched
///    evaluation count.
/// 2. Bind `result` to the problem: copy `x0` into an owned solution buffer
///    and, for nonlinearly constrained problems, attach a zero-filled
///    constraint buffer.
/// 3. Route to the one engine matching `algorithm` and run it to a terminal
///    status.
///
/// The returned status is also recorded in `result.status`, with
/// `result.message` set to the matching static diagnostic. No evaluator is
/// ever called before steps 1 and 2 succeed.
pub fn minimize(
    algorithm: Algorithm, problem: &mut Problem<'_>, options: &mut Options<'_>,
    result: &mut MinimizeResult,
) -> StatusCode {
    let status = run(algorithm, problem, options, result);
    result.finish(status);
    status
}

fn run(
    algorithm: Algorithm, problem: &mut Problem<'_>, options: &mut Options<'_>,
    result: &mut MinimizeResult,
) -> StatusCode {
    if let Err(status) = validation::validate(problem, options, algorithm.constrained(), algorithm)
    {
        return status;
    }
    if let Err(status) = result.prepare(problem) {
        return status;
    }
    dispatch::run(algorithm, problem, options, result)
}
