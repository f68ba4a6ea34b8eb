//! minimize::monitor — the synchronous progress/termination protocol.
//!
//! Engines call [`Monitor::report`] after the initial evaluation and at the
//! end of every trust-region iteration, on the same thread that invoked
//! `minimize`. The snapshot is strictly observational; the mutable
//! termination flag is the monitor's only output. A set flag makes the engine
//! stop at the next checkpoint, and the overall call then returns
//! [`CallbackTerminate`](crate::minimize::StatusCode::CallbackTerminate)
//! instead of any convergence status.

use crate::minimize::types::Point;

/// Immutable progress snapshot presented on every reporting event.
#[derive(Debug)]
pub struct Progress<'a> {
    /// Current best point.
    pub x: &'a Point,
    /// Current best objective value.
    pub f: f64,
    /// Cumulative evaluation count.
    pub nf: usize,
    /// Current trust-region iteration index (0 for the initial report).
    pub tr: usize,
    /// Current constraint-violation measure; 0 for unconstrained variants.
    pub cstrv: f64,
    /// Current nonlinear-constraint values, present only when the problem
    /// declares a positive nonlinear-constraint dimension.
    pub nlconstr: Option<&'a Point>,
}

/// Caller-implemented observer with a cooperative termination flag.
///
/// Implementations must not block indefinitely — they run synchronously on
/// the sole execution thread — and must treat the snapshot as read-only.
/// Absence of a monitor is equivalent to one that never sets the flag.
pub trait Monitor {
    /// Observe one progress snapshot. Set `*terminate = true` to request
    /// a stop at the engine's next safe checkpoint.
    fn report(&mut self, progress: &Progress<'_>, terminate: &mut bool);
}

/// Blanket implementation so plain closures can serve as monitors.
impl<F> Monitor for F
where
    F: FnMut(&Progress<'_>, &mut bool),
{
    fn report(&mut self, progress: &Progress<'_>, terminate: &mut bool) {
        self(progress, terminate);
    }
}
