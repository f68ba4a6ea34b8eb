//! minimize::status — the closed status taxonomy and its total translation.
//!
//! Every `minimize` call reports exactly one [`StatusCode`]: setup errors,
//! capability mismatches, resource failures, and terminal numerical
//! classifications all travel through this single channel. The numeric values
//! are stable and part of the contract. [`status_to_string`] is total over all
//! 32-bit inputs; unknown codes translate to a generic diagnostic instead of
//! failing.

use std::fmt;

/// Closed status enumeration returned by [`minimize`](crate::minimize::minimize).
///
/// The discriminants are stable integer codes. Codes `0..=30` and negatives
/// classify the optimization attempt itself (they are not failures of the
/// front end); codes `>= 100` report setup, validation, or resource problems
/// detected before or instead of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    /// Trust-region radius reached its lower bound (normal convergence).
    SmallTrRadius = 0,
    /// The target objective value was reached at a feasible point.
    FtargetAchieved = 1,
    /// A trust-region step failed to reduce the model.
    TrSubproblemFailed = 2,
    /// The evaluation budget was exhausted.
    MaxfunReached = 3,
    /// The box between the bounds is too narrow for the radius schedule.
    NoSpaceBetweenBounds = 6,
    /// Rounding errors are becoming damaging.
    DamagingRounding = 7,
    /// A linear constraint row has a zero gradient.
    ZeroLinearConstraint = 8,
    /// The trust-region iteration budget was exhausted.
    MaxtrReached = 20,
    /// The monitor requested termination; reported instead of any
    /// convergence status.
    CallbackTerminate = 30,
    /// The starting point contains NaN or infinity.
    NanInfX = -1,
    /// The objective or constraint evaluation returned NaN or `+inf`.
    NanInfF = -2,
    /// NaN or infinity occurred in the internal model.
    NanInfModel = -3,
    /// An input value is outside its valid range (radii, `npt`, shapes).
    InvalidInput = 100,
    /// An internal assertion failed.
    AssertionFails = 101,
    /// Internal validation failed.
    ValidationFails = 102,
    /// A result buffer could not be allocated.
    MemoryAllocationFails = 103,
    /// Options were absent. Reserved for FFI-style bindings; unreachable
    /// through the safe Rust surface.
    NullOptions = 110,
    /// Problem was absent. Reserved for FFI-style bindings.
    NullProblem = 111,
    /// The starting point `x0` was not supplied.
    NullX0 = 112,
    /// Result target was absent. Reserved for FFI-style bindings.
    NullResult = 113,
    /// The evaluator required by the selected algorithm was not supplied.
    NullFunction = 114,
    /// Nonlinear constraints were supplied to an algorithm without
    /// nonlinear-constraint capability.
    NonlinearConstraintMismatch = 115,
    /// Linear constraints were supplied to an algorithm without
    /// linear-constraint capability.
    LinearConstraintMismatch = 116,
    /// Bounds were supplied to an algorithm without bound capability.
    BoundMismatch = 117,
}

impl StatusCode {
    /// The stable integer code of this status.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this status belongs to the success subset (normal convergence
    /// or target achievement).
    pub fn success(self) -> bool {
        matches!(self, StatusCode::SmallTrRadius | StatusCode::FtargetAchieved)
    }

    /// Static diagnostic string for this status.
    ///
    /// The returned reference points into a static table and must never be
    /// freed or mutated.
    pub fn message(self) -> &'static str {
        match self {
            StatusCode::SmallTrRadius => "Trust region radius reaches its lower bound",
            StatusCode::FtargetAchieved => "The target function value is reached",
            StatusCode::TrSubproblemFailed => "A trust region step failed to reduce the model",
            StatusCode::MaxfunReached => "Maximum number of function evaluations reached",
            StatusCode::MaxtrReached => "Maximum number of trust region iterations reached",
            StatusCode::NanInfX => "The input X contains NaN of Inf",
            StatusCode::NanInfF => "The objective or constraint functions return NaN or +Inf",
            StatusCode::NanInfModel => "NaN or Inf occurs in the model",
            StatusCode::NoSpaceBetweenBounds => "No space between bounds",
            StatusCode::DamagingRounding => "Rounding errors are becoming damaging",
            StatusCode::ZeroLinearConstraint => "One of the linear constraints has a zero gradient",
            StatusCode::CallbackTerminate => {
                "Callback function requested termination of optimization"
            }
            StatusCode::InvalidInput => "Invalid input",
            StatusCode::AssertionFails => "Assertion fails",
            StatusCode::ValidationFails => "Validation fails",
            StatusCode::MemoryAllocationFails => "Memory allocation fails",
            StatusCode::NullOptions => "NULL options",
            StatusCode::NullProblem => "NULL problem",
            StatusCode::NullX0 => "NULL x0",
            StatusCode::NullResult => "NULL result",
            StatusCode::NullFunction => "NULL function",
            StatusCode::NonlinearConstraintMismatch => {
                "Nonlinear constraints were provided for an algorithm that cannot handle them"
            }
            StatusCode::LinearConstraintMismatch => {
                "Linear constraints were provided for an algorithm that cannot handle them"
            }
            StatusCode::BoundMismatch => {
                "Bounds were provided for an algorithm that cannot handle them"
            }
        }
    }

    /// Recover a status from its integer code, if the code is known.
    pub fn from_code(code: i32) -> Option<StatusCode> {
        let known = [
            StatusCode::SmallTrRadius,
            StatusCode::FtargetAchieved,
            StatusCode::TrSubproblemFailed,
            StatusCode::MaxfunReached,
            StatusCode::NoSpaceBetweenBounds,
            StatusCode::DamagingRounding,
            StatusCode::ZeroLinearConstraint,
            StatusCode::MaxtrReached,
            StatusCode::CallbackTerminate,
            StatusCode::NanInfX,
            StatusCode::NanInfF,
            StatusCode::NanInfModel,
            StatusCode::InvalidInput,
            StatusCode::AssertionFails,
            StatusCode::ValidationFails,
            StatusCode::MemoryAllocationFails,
            StatusCode::NullOptions,
            StatusCode::NullProblem,
            StatusCode::NullX0,
            StatusCode::NullResult,
            StatusCode::NullFunction,
            StatusCode::NonlinearConstraintMismatch,
            StatusCode::LinearConstraintMismatch,
            StatusCode::BoundMismatch,
        ];
        known.into_iter().find(|status| status.code() == code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Translate any 32-bit status code into a static diagnostic string.
///
/// Total over all inputs: codes outside the closed enumeration yield
/// `"Invalid return code"` rather than an error. The returned string points
/// into a static table and must never be freed.
pub fn status_to_string(code: i32) -> &'static str {
    match StatusCode::from_code(code) {
        Some(status) => status.message(),
        None => "Invalid return code",
    }
}
