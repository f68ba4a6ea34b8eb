//! minimize::result — result buffers and their lifecycle.
//!
//! A [`MinimizeResult`] owns its buffers, with a lifetime independent of the
//! problem it was created from: `prepare` copies the starting point into a
//! fresh allocation so the caller's `x0` is never aliased or mutated by the
//! solve, and `release` drops the buffers idempotently — releasing an
//! already-released result is a no-op, not an error. Buffer allocation is
//! fallible (reported as a status) rather than aborting, and a partially
//! prepared result is always safe to release.

use crate::minimize::problem::Problem;
use crate::minimize::status::{status_to_string, StatusCode};
use crate::minimize::types::Point;

/// Core-owned outcome of one `minimize` call.
///
/// Default-initialized by the caller, bound to a specific problem by
/// [`prepare`](MinimizeResult::prepare) (the problem's dimension fixes the
/// solution-buffer size), and released explicitly or on drop.
#[derive(Debug, Default)]
pub struct MinimizeResult {
    /// Solution buffer of length `n`; `None` before `prepare` and after
    /// `release`.
    x: Option<Point>,
    /// Achieved objective value.
    pub f: f64,
    /// Constraint-violation measure; 0 for unconstrained algorithms.
    pub cstrv: f64,
    /// Evaluated nonlinear-constraint vector, present only when the problem
    /// declared `m_nlcon > 0`.
    nlconstr: Option<Point>,
    /// Recorded nonlinear-constraint count; zeroed on release.
    m_nlcon: usize,
    /// Evaluation count.
    pub nf: usize,
    /// Terminal status of the last solve; meaningful once `minimize`
    /// returned.
    pub status: Option<StatusCode>,
    /// Static diagnostic string matching `status`; never individually freed.
    pub message: &'static str,
}

impl MinimizeResult {
    /// The solution vector, when the result holds one.
    pub fn x(&self) -> Option<&Point> {
        self.x.as_ref()
    }

    /// The evaluated nonlinear-constraint vector, when present.
    pub fn nlconstr(&self) -> Option<&Point> {
        self.nlconstr.as_ref()
    }

    /// Recorded nonlinear-constraint count.
    pub fn m_nlcon(&self) -> usize {
        self.m_nlcon
    }

    /// Bind this result to `problem`: allocate the solution buffer by
    /// copying `x0` and, when `m_nlcon > 0`, a zero-filled constraint
    /// buffer of that length.
    ///
    /// # Errors
    /// - [`StatusCode::NullX0`] when the problem has no starting point.
    /// - [`StatusCode::MemoryAllocationFails`] when a buffer reservation
    ///   fails; any buffer already attached stays attached so `release`
    ///   remains safe to call.
    pub fn prepare(&mut self, problem: &Problem<'_>) -> Result<(), StatusCode> {
        self.release();
        self.f = 0.0;
        self.cstrv = 0.0;
        self.nf = 0;
        self.status = None;
        self.message = "";

        let x0 = problem.x0.ok_or(StatusCode::NullX0)?;
        self.x = Some(Point::from_vec(try_copied(x0.as_slice().unwrap_or(&[]), x0)?));
        if problem.m_nlcon > 0 {
            let mut constr = Vec::new();
            constr
                .try_reserve_exact(problem.m_nlcon)
                .map_err(|_| StatusCode::MemoryAllocationFails)?;
            constr.resize(problem.m_nlcon, 0.0);
            self.nlconstr = Some(Point::from_vec(constr));
            self.m_nlcon = problem.m_nlcon;
        }
        Ok(())
    }

    /// Replace the owned buffers with the engine's final state.
    pub(crate) fn install(
        &mut self, x: Point, f: f64, cstrv: f64, nlconstr: Option<Point>, nf: usize,
    ) {
        self.x = Some(x);
        self.f = f;
        self.cstrv = cstrv;
        if let Some(values) = nlconstr {
            self.nlconstr = Some(values);
        }
        self.nf = nf;
    }

    /// Record the terminal status and its static diagnostic.
    pub(crate) fn finish(&mut self, status: StatusCode) {
        self.status = Some(status);
        self.message = status_to_string(status.code());
    }

    /// Detach the solution buffer for the engine to work on.
    pub(crate) fn take_x(&mut self) -> Option<Point> {
        self.x.take()
    }

    /// Release the owned buffers. Idempotent: calling this on an
    /// already-released result is a no-op.
    pub fn release(&mut self) {
        if self.nlconstr.take().is_some() {
            self.m_nlcon = 0;
        }
        self.x = None;
    }
}

/// Copy a borrowed starting point through a fallible reservation so
/// allocation failure surfaces as a status instead of an abort.
fn try_copied(contiguous: &[f64], x0: &Point) -> Result<Vec<f64>, StatusCode> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(x0.len()).map_err(|_| StatusCode::MemoryAllocationFails)?;
    if contiguous.len() == x0.len() {
        buffer.extend_from_slice(contiguous);
    } else {
        buffer.extend(x0.iter().copied());
    }
    Ok(buffer)
}
