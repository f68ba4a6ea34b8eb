//! minimize — dispatch-and-contract layer over the solver engines.
//!
//! Purpose
//! -------
//! Provide the single entry point [`minimize`] plus the caller-facing types it
//! operates on: [`Problem`], [`Options`], [`MinimizeResult`], the closed
//! [`Algorithm`] and [`StatusCode`] enumerations, and the [`Monitor`]
//! protocol. The numerical work — model maintenance, trust-region steps,
//! geometry repair — lives behind the private `engines` subsystem; this layer
//! only normalizes, validates, dispatches, and reports.
//!
//! Key behaviors
//! -------------
//! - [`Problem::new`] and [`Options::new`] produce documented zero/sentinel
//!   states that callers then populate.
//! - [`validation::validate`] checks problem features against the selected
//!   algorithm's capability set and fills the two derived defaults
//!   (`maxfun = 500·n`, `npt = 2n+1`) in place.
//! - [`api::minimize`] creates the result buffers bound to the problem
//!   dimension, routes to exactly one engine, and records the terminal status
//!   plus its static diagnostic string.
//! - [`status::status_to_string`] translates any 32-bit code to text, mapping
//!   unknown codes to a generic diagnostic instead of failing.
//!
//! Invariants & assumptions
//! ------------------------
//! - Capability validation runs before any evaluator call; a rejected
//!   combination never evaluates the objective (its evaluation count stays 0).
//! - The validation check order is part of the contract: nonlinear mismatch is
//!   reported before linear, linear before bounds, and feature mismatches
//!   before missing-input errors.
//! - A released [`MinimizeResult`] can be released again as a no-op.
//!
//! Conventions
//! -----------
//! - Sentinels encode "unset": NaN radii, zero budgets, `-inf` target. The
//!   validator and the engines interpret them; callers never need to.
//! - All statuses, including terminal numerical classifications, travel
//!   through the one [`StatusCode`] channel; nothing is thrown.
//!
//! Downstream usage
//! ----------------
//! - Import the curated surface via `powell_dfo::minimize::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Submodule unit tests pin the validation matrix, sentinel initialization,
//!   lifecycle idempotence, and translation totality; `tests/` holds the
//!   end-to-end scenarios.

pub mod algorithm;
pub mod api;
mod dispatch;
pub mod monitor;
pub mod options;
pub mod problem;
pub mod result;
pub mod status;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::algorithm::{Algorithm, Capability};
pub use self::api::minimize;
pub use self::monitor::{Monitor, Progress};
pub use self::options::{Options, Verbosity};
pub use self::problem::{ObjConFn, ObjectiveFn, Problem};
pub use self::result::MinimizeResult;
pub use self::status::{status_to_string, StatusCode};
pub use self::types::{Matrix, Point};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use powell_dfo::minimize::prelude::*;
//
// to import the main solver surface in a single line.

pub mod prelude {
    pub use super::algorithm::Algorithm;
    pub use super::api::minimize;
    pub use super::monitor::{Monitor, Progress};
    pub use super::options::{Options, Verbosity};
    pub use super::problem::Problem;
    pub use super::result::MinimizeResult;
    pub use super::status::{status_to_string, StatusCode};
    pub use super::types::{Matrix, Point};
}
