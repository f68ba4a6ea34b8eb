//! minimize::options — solver configuration with sentinel-encoded defaults.
//!
//! Options start in a documented sentinel state ([`Options::new`]): NaN radii
//! meaning "derive from bounds/dimension", zero budgets meaning "derive from
//! the problem dimension", a `-inf` target meaning "never". The validator
//! resolves only `maxfun` and `npt` in place; the radius sentinels are left
//! for the engine to interpret.

use crate::minimize::monitor::Monitor;

/// Verbosity of engine progress reporting.
///
/// A closed enumeration that never affects correctness: every level runs the
/// identical numerical path and only changes what is printed to stderr.
/// Levels are cumulative, so the derived ordering is meaningful:
/// `Fevl > Rho > Exit > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// No output.
    #[default]
    None,
    /// One summary line when the solve returns.
    Exit,
    /// Additionally, a line on every trust-region radius reduction.
    Rho,
    /// Additionally, a line on every function evaluation.
    Fevl,
}

/// Caller-owned solver configuration.
///
/// Fields:
/// - `rhobeg` / `rhoend`: initial/final trust-region radius; NaN sentinel
///   means "use the algorithm default derived from bounds/dimension".
/// - `maxfun`: evaluation budget; 0 sentinel means "use `500 · n`".
/// - `npt`: interpolation-set size for model-based algorithms; 0 sentinel
///   means "use `2n + 1`".
/// - `ftarget`: objective value that triggers early success; defaults to
///   `-inf`, i.e. "never".
/// - `iprint`: progress verbosity (correctness-neutral).
/// - `monitor`: optional progress observer with a cooperative termination
///   flag; absence is equivalent to a monitor that never requests
///   termination.
pub struct Options<'a> {
    pub rhobeg: f64,
    pub rhoend: f64,
    pub maxfun: usize,
    pub npt: usize,
    pub ftarget: f64,
    pub iprint: Verbosity,
    pub monitor: Option<&'a mut dyn Monitor>,
}

impl<'a> Options<'a> {
    /// Create sentinel-initialized options whose sentinels mean
    /// "derive later".
    pub fn new() -> Self {
        Self {
            rhobeg: f64::NAN,
            rhoend: f64::NAN,
            maxfun: 0,
            npt: 0,
            ftarget: f64::NEG_INFINITY,
            iprint: Verbosity::None,
            monitor: None,
        }
    }
}

impl<'a> Default for Options<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the documented sentinel state of fresh options.
    // Default resolution is covered by the validation and engine tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Fresh options carry the sentinel state the validator and engines
    // expect: NaN radii, zero budgets, -inf target, silent, no monitor.
    //
    // Given
    // -----
    // - `Options::new()` and `Options::default()`.
    //
    // Expect
    // ------
    // - Both constructors produce the identical sentinel state.
    fn new_options_are_sentinel_initialized() {
        for options in [Options::new(), Options::default()] {
            assert!(options.rhobeg.is_nan(), "rhobeg should start unset");
            assert!(options.rhoend.is_nan(), "rhoend should start unset");
            assert_eq!(options.maxfun, 0);
            assert_eq!(options.npt, 0);
            assert_eq!(options.ftarget, f64::NEG_INFINITY);
            assert_eq!(options.iprint, Verbosity::None);
            assert!(options.monitor.is_none());
        }
    }
}
