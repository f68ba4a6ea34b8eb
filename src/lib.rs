//! powell_dfo — unified front end for Powell-style derivative-free optimizers.
//!
//! Purpose
//! -------
//! Present one consistent problem/options/result contract across five
//! derivative-free, trust-region-based minimization algorithms — UOBYQA and
//! NEWUOA (unconstrained), BOBYQA (bound-constrained), LINCOA
//! (linearly-constrained), and COBYLA (nonlinearly-constrained). The crate
//! validates that a caller's problem description is compatible with the chosen
//! algorithm, fills algorithm-specific defaults, manages the lifecycle of
//! dynamically-sized result buffers, and provides a uniform mid-optimization
//! monitoring/early-termination protocol.
//!
//! Key behaviors
//! -------------
//! - Normalize caller problems and options into a documented zero/sentinel
//!   state (`minimize::Problem::new`, `minimize::Options::new`).
//! - Reject algorithm/feature mismatches before any evaluator call, with a
//!   deterministic check order and specific mismatch statuses.
//! - Route each validated call to exactly one solver engine, adapting the
//!   uniform contract to that engine's accepted feature subset.
//! - Surface every outcome — setup errors, capability mismatches, resource
//!   failures, and terminal numerical classifications — through a single
//!   closed status enumeration with a total code→string translation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Problem and Options are caller-owned and read-only to the core after
//!   validation; the two derived-default fields (`maxfun`, `npt`) are the only
//!   ones mutated, in place, during validation.
//! - A `MinimizeResult` owns its buffers; releasing it never touches
//!   Problem/Options memory, and vice versa.
//! - Everything is synchronous and single-threaded per call: evaluators and
//!   monitors run on the thread that invoked `minimize`, and cancellation is
//!   cooperative only (the monitor's termination flag).
//!
//! Conventions
//! -----------
//! - Vectors and matrices use the `ndarray`-based aliases
//!   [`minimize::Point`] and [`minimize::Matrix`].
//! - Statuses never panic through the public surface; fallible internal steps
//!   return `Result<_, StatusCode>` and `minimize` folds everything into one
//!   status code per call.
//! - Engine internals are private: nothing outside `engines` depends on how
//!   trust-region steps are chosen, only on the engine input/output contract.
//!
//! Downstream usage
//! ----------------
//! - Callers build a [`minimize::Problem`], a [`minimize::Options`], and a
//!   default [`minimize::MinimizeResult`], then call [`minimize::minimize`]
//!   and inspect the returned [`minimize::StatusCode`] plus the result fields.
//! - The curated surface is re-exported via `minimize::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover the validation matrix, result
//!   lifecycle, status translation totality, and the trust-region core.
//! - Integration tests under `tests/` exercise end-to-end convergence,
//!   capability mismatches, and monitor-driven termination.

mod engines;
pub mod minimize;

pub use minimize::prelude::*;
