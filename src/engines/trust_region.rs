//! engines::trust_region — the shared trust-region driver.
//!
//! Purpose
//! -------
//! Run the derivative-free descent loop common to all five engines: resolve
//! the radius schedule, perform the initial evaluation (honoring a cached
//! value when the caller supplied one), sample an initial point set, then
//! poll coordinate steps of the current radius until the radius bottoms out,
//! the budget runs dry, the target is hit, or the monitor asks to stop.
//!
//! Key behaviors
//! -------------
//! - Radius schedule: on a failed iteration the radius drops to `0.1·rho`
//!   while `rho > 250·rhoend`, to `sqrt(rho·rhoend)` while `rho > 16·rhoend`,
//!   and to `rhoend` below that; a failed iteration at `rhoend` terminates
//!   with [`StatusCode::SmallTrRadius`].
//! - Moderated extreme barrier: after the initial evaluation, NaN or huge
//!   objective values are replaced by [`BARRIER_FUN`] so a single bad point
//!   cannot poison the comparison order. The initial evaluation itself is
//!   classified as [`StatusCode::NanInfF`] instead.
//! - Constraints enter through a penalty merit `f + penalty·cstrv`; the
//!   penalty escalates whenever the radius shrinks at an infeasible best
//!   point. Bounds are enforced by projection, never by penalty.
//! - Monitor checkpoints: after the initial evaluation (iteration 0) and at
//!   the end of every trust-region iteration. A set termination flag wins
//!   over every other classification at the next checkpoint.
//!
//! Invariants & assumptions
//! ------------------------
//! - `rhobeg >= rhoend > 0` holds after [`resolve_radii`]; engines reject
//!   anything else as `InvalidInput` before driving.
//! - The evaluation count in the result equals the number of evaluator
//!   calls; a cached initial value contributes zero.
//! - The best-so-far iterate is installed into the result on every exit
//!   path, including early classifications.
//!
//! Conventions
//! -----------
//! - `ftarget` counts as achieved only at a point whose violation measure is
//!   within [`FEASIBILITY_TOL`].
//!
//! Testing notes
//! -------------
//! - Unit tests drive small quadratics directly through [`drive`]; the
//!   engine wrappers and `tests/` cover everything above this layer.

use crate::minimize::monitor::{Monitor, Progress};
use crate::minimize::options::{Options, Verbosity};
use crate::minimize::result::MinimizeResult;
use crate::minimize::status::StatusCode;
use crate::minimize::types::{Point, BARRIER_FUN, DEFAULT_RHOBEG, DEFAULT_RHOEND, FEASIBILITY_TOL};

/// Immutable per-solve configuration assembled by an engine wrapper.
pub(crate) struct Config {
    /// Engine name used in verbose output.
    pub name: &'static str,
    pub rhobeg: f64,
    pub rhoend: f64,
    pub maxfun: usize,
    pub ftarget: f64,
    pub iprint: Verbosity,
    /// Number of initial sample evaluations around the starting point,
    /// excluding the starting point itself.
    pub samples: usize,
}

/// One evaluated point: objective value, aggregate violation measure, and
/// the raw nonlinear-constraint values when the engine produces them.
pub(crate) struct Evaluation {
    pub f: f64,
    pub cstrv: f64,
    pub nlconstr: Option<Point>,
}

/// Projection box; empty for engines without bound support.
pub(crate) struct Bounds<'p> {
    pub xl: Option<&'p Point>,
    pub xu: Option<&'p Point>,
}

impl<'p> Bounds<'p> {
    pub(crate) fn none() -> Self {
        Self { xl: None, xu: None }
    }

    /// Project `x` elementwise into the box.
    fn clamp(&self, x: &mut Point) {
        if let Some(xl) = self.xl {
            for (v, lo) in x.iter_mut().zip(xl.iter()) {
                if *v < *lo {
                    *v = *lo;
                }
            }
        }
        if let Some(xu) = self.xu {
            for (v, hi) in x.iter_mut().zip(xu.iter()) {
                if *v > *hi {
                    *v = *hi;
                }
            }
        }
    }
}

/// Resolve the radius pair from user values and sentinels.
///
/// NaN `rhobeg` becomes the crate default; NaN `rhoend` becomes
/// `min(default, rhobeg)`. Supplied values must be finite and positive with
/// `rhoend <= rhobeg`.
///
/// # Errors
/// [`StatusCode::InvalidInput`] when a supplied radius is non-finite,
/// non-positive, or the pair is out of order.
pub(crate) fn resolve_radii(options: &Options<'_>) -> Result<(f64, f64), StatusCode> {
    let rhobeg = if options.rhobeg.is_nan() {
        DEFAULT_RHOBEG
    } else if options.rhobeg.is_finite() && options.rhobeg > 0.0 {
        options.rhobeg
    } else {
        return Err(StatusCode::InvalidInput);
    };
    let rhoend = if options.rhoend.is_nan() {
        DEFAULT_RHOEND.min(rhobeg)
    } else if options.rhoend.is_finite() && options.rhoend > 0.0 && options.rhoend <= rhobeg {
        options.rhoend
    } else {
        return Err(StatusCode::InvalidInput);
    };
    Ok((rhobeg, rhoend))
}

/// Run the descent loop to a terminal status, writing the best iterate,
/// objective, violation, and evaluation count into `result`.
///
/// `cached` is an evaluation of the starting point the caller already has;
/// it is discarded when bound projection moves the starting point.
pub(crate) fn drive(
    config: &Config, bounds: &Bounds<'_>, cached: Option<Evaluation>,
    evaluator: &mut dyn FnMut(&Point) -> Evaluation, monitor: Option<&mut (dyn Monitor + '_)>,
    result: &mut MinimizeResult,
) -> StatusCode {
    let Some(mut x) = result.take_x() else {
        return StatusCode::NullResult;
    };
    if !x.iter().all(|v| v.is_finite()) {
        result.install(x, f64::NAN, 0.0, None, 0);
        return StatusCode::NanInfX;
    }
    let unprojected = x.clone();
    bounds.clamp(&mut x);
    let cached = if x == unprojected { cached } else { None };

    let mut driver = Driver {
        config,
        bounds,
        evaluator,
        monitor,
        nf: 0,
        best_x: x,
        best: Evaluation { f: f64::NAN, cstrv: 0.0, nlconstr: None },
        rho: config.rhobeg,
        penalty: 1e3,
    };
    let status = driver.run(cached);
    if config.iprint >= Verbosity::Exit {
        eprintln!(
            "{}: return code {} ({:?}), f = {:.6e}, cstrv = {:.2e}, nf = {}",
            config.name,
            status.code(),
            status,
            driver.best.f,
            driver.best.cstrv,
            driver.nf
        );
    }
    result.install(driver.best_x, driver.best.f, driver.best.cstrv, driver.best.nlconstr, driver.nf);
    status
}

// `&mut dyn` is invariant in its trait-object lifetime, so the monitor's
// object lifetime must stay independent of the borrow lifetime for the
// caller's reborrow to coerce.
struct Driver<'d, 'm> {
    config: &'d Config,
    bounds: &'d Bounds<'d>,
    evaluator: &'d mut dyn FnMut(&Point) -> Evaluation,
    monitor: Option<&'d mut (dyn Monitor + 'm)>,
    nf: usize,
    best_x: Point,
    best: Evaluation,
    rho: f64,
    penalty: f64,
}

impl<'d, 'm> Driver<'d, 'm> {
    fn run(&mut self, cached: Option<Evaluation>) -> StatusCode {
        match cached {
            Some(initial) => self.best = initial,
            None => {
                // Budget is at least 1 here (the validator derives a positive
                // default), but a pathological explicit 0 still exits cleanly.
                let Some(initial) = self.evaluate_raw(&self.best_x.clone()) else {
                    return StatusCode::MaxfunReached;
                };
                if initial.f.is_nan() || initial.f == f64::INFINITY {
                    self.best = initial;
                    return StatusCode::NanInfF;
                }
                self.best = initial;
            }
        }
        if self.target_reached(&self.best) {
            return StatusCode::FtargetAchieved;
        }
        if self.report(0) {
            return StatusCode::CallbackTerminate;
        }

        if let Some(status) = self.sample_initial_set() {
            return status;
        }

        let maxtr = self.config.maxfun.saturating_mul(2);
        for tr in 1..=maxtr {
            match self.poll_iteration() {
                PollOutcome::Improved => {}
                PollOutcome::Stalled => {
                    if self.rho <= self.config.rhoend {
                        return StatusCode::SmallTrRadius;
                    }
                    self.shrink();
                }
                PollOutcome::Terminal(status) => return status,
            }
            if self.report(tr) {
                return StatusCode::CallbackTerminate;
            }
        }
        StatusCode::MaxtrReached
    }

    /// Evaluate the starting sample set: coordinate offsets of the initial
    /// radius around the starting point, halving the offset on each full
    /// sweep. Returns a terminal status when the budget or target cuts the
    /// sampling short.
    fn sample_initial_set(&mut self) -> Option<StatusCode> {
        let n = self.best_x.len();
        let anchor = self.best_x.clone();
        for k in 0..self.config.samples {
            let coordinate = k % n;
            let sign = if (k / n) % 2 == 0 { 1.0 } else { -1.0 };
            let layer = (k / (2 * n)) as i32;
            let step = sign * self.config.rhobeg / f64::powi(2.0, layer);

            let mut candidate = anchor.clone();
            candidate[coordinate] += step;
            self.bounds.clamp(&mut candidate);
            if candidate == anchor {
                continue;
            }
            let Some(trial) = self.evaluate(&candidate) else {
                return Some(StatusCode::MaxfunReached);
            };
            if self.target_reached(&trial) {
                self.accept(candidate, trial);
                return Some(StatusCode::FtargetAchieved);
            }
            if self.merit(&trial) < self.merit(&self.best) {
                self.accept(candidate, trial);
            }
        }
        None
    }

    /// One trust-region iteration: poll every signed coordinate step of the
    /// current radius from the best point, accepting the first improvement
    /// sweep-wide.
    fn poll_iteration(&mut self) -> PollOutcome {
        let n = self.best_x.len();
        let mut improved = false;
        for coordinate in 0..n {
            for sign in [1.0, -1.0] {
                let mut candidate = self.best_x.clone();
                candidate[coordinate] += sign * self.rho;
                self.bounds.clamp(&mut candidate);
                if candidate == self.best_x {
                    continue;
                }
                let Some(trial) = self.evaluate(&candidate) else {
                    return PollOutcome::Terminal(StatusCode::MaxfunReached);
                };
                if self.target_reached(&trial) {
                    self.accept(candidate, trial);
                    return PollOutcome::Terminal(StatusCode::FtargetAchieved);
                }
                if self.merit(&trial) < self.merit(&self.best) {
                    self.accept(candidate, trial);
                    improved = true;
                }
            }
        }
        if improved {
            PollOutcome::Improved
        } else {
            PollOutcome::Stalled
        }
    }

    /// Budgeted, moderated evaluation: `None` once the budget is exhausted;
    /// NaN or huge values are replaced by the barrier so the comparison
    /// order stays total.
    fn evaluate(&mut self, x: &Point) -> Option<Evaluation> {
        let mut evaluation = self.evaluate_raw(x)?;
        if evaluation.f.is_nan() || evaluation.f > BARRIER_FUN {
            evaluation.f = BARRIER_FUN;
        }
        if evaluation.cstrv.is_nan() || evaluation.cstrv > BARRIER_FUN {
            evaluation.cstrv = BARRIER_FUN;
        }
        Some(evaluation)
    }

    fn evaluate_raw(&mut self, x: &Point) -> Option<Evaluation> {
        if self.nf >= self.config.maxfun {
            return None;
        }
        self.nf += 1;
        let evaluation = (self.evaluator)(x);
        if self.config.iprint >= Verbosity::Fevl {
            eprintln!(
                "{}: nf = {}, f = {:.6e}, cstrv = {:.2e}",
                self.config.name, self.nf, evaluation.f, evaluation.cstrv
            );
        }
        Some(evaluation)
    }

    fn merit(&self, evaluation: &Evaluation) -> f64 {
        evaluation.f + self.penalty * evaluation.cstrv
    }

    fn target_reached(&self, evaluation: &Evaluation) -> bool {
        evaluation.f <= self.config.ftarget && evaluation.cstrv <= FEASIBILITY_TOL
    }

    fn accept(&mut self, x: Point, evaluation: Evaluation) {
        self.best_x = x;
        self.best = evaluation;
    }

    fn shrink(&mut self) {
        let rhoend = self.config.rhoend;
        self.rho = if self.rho > 250.0 * rhoend {
            0.1 * self.rho
        } else if self.rho > 16.0 * rhoend {
            (self.rho * rhoend).sqrt()
        } else {
            rhoend
        };
        if self.best.cstrv > FEASIBILITY_TOL {
            self.penalty *= 2.0;
        }
        if self.config.iprint >= Verbosity::Rho {
            eprintln!(
                "{}: rho = {:.6e}, f = {:.6e}, cstrv = {:.2e}, nf = {}",
                self.config.name, self.rho, self.best.f, self.best.cstrv, self.nf
            );
        }
    }

    /// Report one checkpoint to the monitor; true means "stop now".
    fn report(&mut self, tr: usize) -> bool {
        let Some(monitor) = self.monitor.as_deref_mut() else {
            return false;
        };
        let progress = Progress {
            x: &self.best_x,
            f: self.best.f,
            nf: self.nf,
            tr,
            cstrv: self.best.cstrv,
            nlconstr: self.best.nlconstr.as_ref(),
        };
        let mut terminate = false;
        monitor.report(&progress, &mut terminate);
        terminate
    }
}

enum PollOutcome {
    Improved,
    Stalled,
    Terminal(StatusCode),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    use crate::minimize::problem::Problem;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Radius resolution from sentinels and explicit values.
    // - Driver termination: radius floor, budget, target, bad inputs.
    // - Evaluation accounting, including the cached initial value.
    //
    // They intentionally DO NOT cover:
    // - Engine-specific evaluator composition; see the engine modules.
    // -------------------------------------------------------------------------

    fn config(maxfun: usize) -> Config {
        Config {
            name: "driver",
            rhobeg: 0.5,
            rhoend: 1e-4,
            maxfun,
            ftarget: f64::NEG_INFINITY,
            iprint: Verbosity::None,
            samples: 0,
        }
    }

    fn prepared_result(x0: &Point) -> MinimizeResult {
        let mut problem = Problem::new(x0.len());
        problem.x0 = Some(x0);
        let mut result = MinimizeResult::default();
        result.prepare(&problem).expect("prepare should succeed");
        result
    }

    #[test]
    // Purpose
    // -------
    // NaN sentinels resolve to the crate defaults; explicit values are kept;
    // malformed values are rejected as invalid input.
    //
    // Given
    // -----
    // - Sentinel, explicit, and malformed radius pairs.
    //
    // Expect
    // ------
    // - (1.0, 1e-6) from the sentinels; explicit pairs unchanged; negative,
    //   non-finite, and out-of-order pairs rejected.
    fn radius_resolution_handles_sentinels_and_rejects_bad_values() {
        let defaults = resolve_radii(&Options::new());
        assert_eq!(defaults, Ok((DEFAULT_RHOBEG, DEFAULT_RHOEND)));

        let mut explicit = Options::new();
        explicit.rhobeg = 2.0;
        explicit.rhoend = 0.25;
        assert_eq!(resolve_radii(&explicit), Ok((2.0, 0.25)));

        // rhoend sentinel is capped by a small explicit rhobeg.
        let mut small_beg = Options::new();
        small_beg.rhobeg = 1e-8;
        assert_eq!(resolve_radii(&small_beg), Ok((1e-8, 1e-8)));

        for (rhobeg, rhoend) in
            [(-1.0, f64::NAN), (f64::INFINITY, f64::NAN), (1.0, 2.0), (1.0, 0.0)]
        {
            let mut bad = Options::new();
            bad.rhobeg = rhobeg;
            bad.rhoend = rhoend;
            assert_eq!(
                resolve_radii(&bad),
                Err(StatusCode::InvalidInput),
                "({rhobeg}, {rhoend}) should be rejected"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // The driver walks a 1-dimensional quadratic down to its minimizer and
    // stops with the small-radius status once polls at the final radius
    // stop improving.
    //
    // Given
    // -----
    // - f(x) = (x - 1)², x0 = 0, rhobeg = 0.5, rhoend = 1e-4.
    //
    // Expect
    // ------
    // - SmallTrRadius, best x within 2e-4 of 1, every evaluation counted.
    fn quadratic_descends_to_small_radius() {
        // Arrange
        let x0 = array![0.0];
        let mut result = prepared_result(&x0);
        let mut calls = 0_usize;
        let mut evaluator = |x: &Point| {
            calls += 1;
            Evaluation { f: (x[0] - 1.0).powi(2), cstrv: 0.0, nlconstr: None }
        };

        // Act
        let status =
            drive(&config(500), &Bounds::none(), None, &mut evaluator, None, &mut result);

        // Assert
        assert_eq!(status, StatusCode::SmallTrRadius);
        let best = result.x().expect("solution should be installed");
        assert!((best[0] - 1.0).abs() < 2e-4, "best x = {}", best[0]);
        assert!(result.f < 1e-7);
        assert_eq!(result.nf, calls);
        assert!(result.nf > 0);
    }

    #[test]
    // Purpose
    // -------
    // A tiny budget terminates with the budget status and exactly that many
    // evaluations, with the best-so-far iterate still installed.
    //
    // Given
    // -----
    // - The same quadratic with maxfun = 3.
    //
    // Expect
    // ------
    // - MaxfunReached and nf == 3.
    fn budget_exhaustion_reports_maxfun() {
        let x0 = array![0.0];
        let mut result = prepared_result(&x0);
        let mut evaluator =
            |x: &Point| Evaluation { f: (x[0] - 1.0).powi(2), cstrv: 0.0, nlconstr: None };

        let status = drive(&config(3), &Bounds::none(), None, &mut evaluator, None, &mut result);

        assert_eq!(status, StatusCode::MaxfunReached);
        assert_eq!(result.nf, 3);
        assert!(result.x().is_some());
    }

    #[test]
    // Purpose
    // -------
    // A feasible point at or below ftarget ends the solve immediately with
    // the target status, even mid-poll.
    //
    // Given
    // -----
    // - f(x) = x² with ftarget = 0.1 and x0 = 1.
    //
    // Expect
    // ------
    // - FtargetAchieved with the achieving point installed.
    fn feasible_target_ends_the_solve() {
        let x0 = array![1.0];
        let mut result = prepared_result(&x0);
        let mut cfg = config(500);
        cfg.ftarget = 0.1;
        let mut evaluator = |x: &Point| Evaluation { f: x[0] * x[0], cstrv: 0.0, nlconstr: None };

        let status = drive(&cfg, &Bounds::none(), None, &mut evaluator, None, &mut result);

        assert_eq!(status, StatusCode::FtargetAchieved);
        assert!(result.f <= 0.1);
    }

    #[test]
    // Purpose
    // -------
    // A non-finite starting point is classified before any evaluation, and
    // a NaN objective at the starting point is classified as NanInfF.
    //
    // Given
    // -----
    // - x0 containing NaN; then a clean x0 with an evaluator returning NaN.
    //
    // Expect
    // ------
    // - NanInfX with nf == 0; NanInfF with nf == 1.
    fn bad_inputs_are_classified_at_the_start() {
        let bad_x0 = array![f64::NAN];
        let mut problem = Problem::new(1);
        problem.x0 = Some(&bad_x0);
        let mut result = MinimizeResult::default();
        result.prepare(&problem).expect("prepare should succeed");
        let mut evaluator = |_: &Point| Evaluation { f: 0.0, cstrv: 0.0, nlconstr: None };
        let status =
            drive(&config(500), &Bounds::none(), None, &mut evaluator, None, &mut result);
        assert_eq!(status, StatusCode::NanInfX);
        assert_eq!(result.nf, 0);

        let x0 = array![0.0];
        let mut result = prepared_result(&x0);
        let mut evaluator = |_: &Point| Evaluation { f: f64::NAN, cstrv: 0.0, nlconstr: None };
        let status =
            drive(&config(500), &Bounds::none(), None, &mut evaluator, None, &mut result);
        assert_eq!(status, StatusCode::NanInfF);
        assert_eq!(result.nf, 1);
    }

    #[test]
    // Purpose
    // -------
    // A cached initial evaluation is used verbatim: no evaluator call for
    // the starting point, and the count reflects only later polls.
    //
    // Given
    // -----
    // - A cached f(x0) and an evaluator recording its first argument.
    //
    // Expect
    // ------
    // - The first evaluator call is already a poll step, not x0.
    fn cached_initial_value_skips_one_evaluation() {
        let x0 = array![0.0];
        let mut result = prepared_result(&x0);
        let cached = Evaluation { f: 1.0, cstrv: 0.0, nlconstr: None };
        let mut first_argument: Option<f64> = None;
        let mut evaluator = |x: &Point| {
            if first_argument.is_none() {
                first_argument = Some(x[0]);
            }
            Evaluation { f: (x[0] - 1.0).powi(2), cstrv: 0.0, nlconstr: None }
        };

        let status =
            drive(&config(500), &Bounds::none(), Some(cached), &mut evaluator, None, &mut result);

        assert_eq!(status, StatusCode::SmallTrRadius);
        let best = result.x().expect("solution should be installed");
        assert!((best[0] - 1.0).abs() < 2e-4);
        assert_ne!(first_argument, Some(0.0), "x0 must come from the cache, not a re-evaluation");
    }

    #[test]
    // Purpose
    // -------
    // The monitor sees the initial checkpoint and can stop the solve there;
    // the terminal status is CallbackTerminate regardless of convergence.
    //
    // Given
    // -----
    // - A monitor closure that sets the flag on its first report.
    //
    // Expect
    // ------
    // - CallbackTerminate after exactly the initial evaluation.
    fn monitor_termination_wins_at_the_first_checkpoint() {
        let x0 = array![0.0];
        let mut result = prepared_result(&x0);
        let mut reports = 0_usize;
        let mut monitor = |progress: &Progress<'_>, terminate: &mut bool| {
            reports += 1;
            assert_eq!(progress.tr, 0);
            *terminate = true;
        };
        let mut evaluator = |x: &Point| Evaluation { f: x[0] * x[0], cstrv: 0.0, nlconstr: None };

        let status = drive(
            &config(500),
            &Bounds::none(),
            None,
            &mut evaluator,
            Some(&mut monitor),
            &mut result,
        );

        assert_eq!(status, StatusCode::CallbackTerminate);
        assert_eq!(result.nf, 1);
        assert_eq!(reports, 1);
    }
}
