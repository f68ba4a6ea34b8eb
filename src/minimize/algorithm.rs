//! minimize::algorithm — the closed algorithm enumeration and its
//! capability table.
//!
//! Each algorithm declares which problem features it accepts — bounds, linear
//! constraints, nonlinear constraints — as a [`Capability`] set. The validator
//! consults this table before any solver invocation; the dispatcher uses the
//! enumeration to select exactly one engine.

use std::str::FromStr;

use crate::minimize::status::StatusCode;

/// Closed 5-way enumeration of the supported derivative-free algorithms.
///
/// Capability ladder (each row accepts everything above it):
/// - [`Uobyqa`](Algorithm::Uobyqa), [`Newuoa`](Algorithm::Newuoa):
///   unconstrained only.
/// - [`Bobyqa`](Algorithm::Bobyqa): adds bound constraints.
/// - [`Lincoa`](Algorithm::Lincoa): adds linear constraints.
/// - [`Cobyla`](Algorithm::Cobyla): adds nonlinear constraints.
///
/// Parsing:
/// The enum implements `FromStr` and accepts the five algorithm names
/// case-insensitively. Unknown names return [`StatusCode::InvalidInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bobyqa,
    Cobyla,
    Lincoa,
    Newuoa,
    Uobyqa,
}

/// Declared capability set of one algorithm over
/// {bounds, linear constraints, nonlinear constraints}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub bounds: bool,
    pub linear: bool,
    pub nonlinear: bool,
}

impl Algorithm {
    /// The capability set declared for this algorithm.
    pub fn capabilities(self) -> Capability {
        match self {
            Algorithm::Uobyqa | Algorithm::Newuoa => {
                Capability { bounds: false, linear: false, nonlinear: false }
            }
            Algorithm::Bobyqa => Capability { bounds: true, linear: false, nonlinear: false },
            Algorithm::Lincoa => Capability { bounds: true, linear: true, nonlinear: false },
            Algorithm::Cobyla => Capability { bounds: true, linear: true, nonlinear: true },
        }
    }

    /// Whether this algorithm takes a combined objective/constraint evaluator
    /// rather than a plain objective.
    pub fn constrained(self) -> bool {
        matches!(self, Algorithm::Cobyla)
    }

    /// Canonical lowercase name of this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bobyqa => "bobyqa",
            Algorithm::Cobyla => "cobyla",
            Algorithm::Lincoa => "lincoa",
            Algorithm::Newuoa => "newuoa",
            Algorithm::Uobyqa => "uobyqa",
        }
    }
}

impl FromStr for Algorithm {
    type Err = StatusCode;

    /// Parse an algorithm choice from a string (case-insensitive).
    ///
    /// Accepts `"uobyqa"`, `"newuoa"`, `"bobyqa"`, `"lincoa"`, `"cobyla"` in
    /// any case variant. Any other value returns
    /// [`StatusCode::InvalidInput`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bobyqa" => Ok(Algorithm::Bobyqa),
            "cobyla" => Ok(Algorithm::Cobyla),
            "lincoa" => Ok(Algorithm::Lincoa),
            "newuoa" => Ok(Algorithm::Newuoa),
            "uobyqa" => Ok(Algorithm::Uobyqa),
            _ => Err(StatusCode::InvalidInput),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The declared capability table, row by row.
    // - Case-insensitive parsing and rejection of unknown names.
    //
    // They intentionally DO NOT cover:
    // - How the validator applies the table; see `validation`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the capability ladder: unconstrained algorithms accept nothing,
    // BOBYQA accepts bounds only, LINCOA adds linear constraints, COBYLA
    // accepts everything.
    //
    // Given
    // -----
    // - The five algorithm identifiers.
    //
    // Expect
    // ------
    // - Capability sets exactly as declared above.
    fn capability_table_matches_declaration() {
        for algorithm in [Algorithm::Uobyqa, Algorithm::Newuoa] {
            let caps = algorithm.capabilities();
            assert!(!caps.bounds && !caps.linear && !caps.nonlinear);
        }
        assert_eq!(
            Algorithm::Bobyqa.capabilities(),
            Capability { bounds: true, linear: false, nonlinear: false }
        );
        assert_eq!(
            Algorithm::Lincoa.capabilities(),
            Capability { bounds: true, linear: true, nonlinear: false }
        );
        assert_eq!(
            Algorithm::Cobyla.capabilities(),
            Capability { bounds: true, linear: true, nonlinear: true }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that only COBYLA expects the combined objective/constraint
    // evaluator.
    //
    // Given
    // -----
    // - The five algorithm identifiers.
    //
    // Expect
    // ------
    // - `constrained()` true only for COBYLA.
    fn only_cobyla_uses_the_combined_evaluator() {
        assert!(Algorithm::Cobyla.constrained());
        for algorithm in
            [Algorithm::Uobyqa, Algorithm::Newuoa, Algorithm::Bobyqa, Algorithm::Lincoa]
        {
            assert!(!algorithm.constrained(), "{algorithm:?} should use the plain objective");
        }
    }

    #[test]
    // Purpose
    // -------
    // Parsing accepts all five names regardless of case and round-trips
    // through `name()`.
    //
    // Given
    // -----
    // - Lowercase, uppercase, and mixed-case spellings.
    //
    // Expect
    // ------
    // - `from_str` succeeds and yields the matching identifier.
    fn parsing_accepts_case_insensitive_names() {
        // Arrange
        let cases = [
            ("bobyqa", Algorithm::Bobyqa),
            ("COBYLA", Algorithm::Cobyla),
            ("LinCoa", Algorithm::Lincoa),
            ("newuoa", Algorithm::Newuoa),
            ("UOBYQA", Algorithm::Uobyqa),
        ];

        for (text, expected) in cases {
            // Act
            let parsed: Algorithm = text.parse().expect("name should parse");

            // Assert
            assert_eq!(parsed, expected);
            assert_eq!(parsed.name(), expected.name());
        }
    }

    #[test]
    // Purpose
    // -------
    // Unknown names are rejected with the invalid-input status rather than a
    // panic or a generic failure.
    //
    // Given
    // -----
    // - Misspelled and empty names.
    //
    // Expect
    // ------
    // - `from_str` returns `Err(StatusCode::InvalidInput)`.
    fn parsing_rejects_unknown_names() {
        for text in ["bobyka", "powell", "", "newuoa "] {
            let parsed = Algorithm::from_str(text);
            assert_eq!(parsed, Err(StatusCode::InvalidInput), "{text:?} should be rejected");
        }
    }
}
