//! Expected outcomes, verdicts, and the classifier that connects them.
//!
//! ## Notes
//! - Exit code `0` is the only "accepted" signal from the subject. Every other code, and termination by a
//!   signal (no exit code at all), counts uniformly as "rejected".
//! - A verdict judges the *test case*, not the subject: a fail-expected fixture that the subject rejects is a
//!   succeeded case.

use std::fmt;

/// What the subject program is expected to do with a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedOutcome {
    /// The subject must reject the fixture (nonzero exit).
    ExpectFailure,
    /// The subject must accept the fixture (exit `0`).
    ExpectSuccess,
}

impl ExpectedOutcome {
    /// Return a short, stable label (`expect-fail` / `expect-pass`) for listings and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            ExpectedOutcome::ExpectFailure => "expect-fail",
            ExpectedOutcome::ExpectSuccess => "expect-pass",
        }
    }
}

impl fmt::Display for ExpectedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The harness's judgment of a single fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Observed exit status matched the expectation.
    CaseSucceeded,
    /// Observed exit status contradicted the expectation.
    CaseFailed,
    /// The subject did not finish within the per-invocation timeout.
    ///
    /// Never produced by [`classify`]; the caller assigns it when it had to kill the subject.
    TimedOut,
}

impl Verdict {
    /// Check whether this verdict counts toward a successful run.
    pub fn is_success(self) -> bool {
        matches!(self, Verdict::CaseSucceeded)
    }

    /// Return a short, stable label (`success` / `failed` / `timeout`).
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::CaseSucceeded => "success",
            Verdict::CaseFailed => "failed",
            Verdict::TimedOut => "timeout",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare an observed exit status against the expected outcome.
///
/// ## Parameters
/// - `expected`: the outcome derived from the fixture identifier.
/// - `exit_code`: the subject's exit code, or `None` if it was terminated by a signal.
///
/// ## Returns
/// - (`Verdict`): `CaseSucceeded` iff a fail-expected fixture was rejected or a pass-expected fixture was
///   accepted; `CaseFailed` otherwise. Never `TimedOut`.
///
/// ## Examples
/// ```rust
/// use harness_core::{classify, ExpectedOutcome, Verdict};
/// assert_eq!(classify(ExpectedOutcome::ExpectSuccess, Some(0)), Verdict::CaseSucceeded);
/// assert_eq!(classify(ExpectedOutcome::ExpectFailure, Some(0)), Verdict::CaseFailed);
/// assert_eq!(classify(ExpectedOutcome::ExpectFailure, None), Verdict::CaseSucceeded);
/// ```
pub fn classify(expected: ExpectedOutcome, exit_code: Option<i32>) -> Verdict {
    let accepted = exit_code == Some(0);
    let matched = match expected {
        ExpectedOutcome::ExpectFailure => !accepted,
        ExpectedOutcome::ExpectSuccess => accepted,
    };
    if matched { Verdict::CaseSucceeded } else { Verdict::CaseFailed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_success_zero() {
        assert_eq!(classify(ExpectedOutcome::ExpectSuccess, Some(0)), Verdict::CaseSucceeded);
    }

    #[test]
    fn test_expect_success_nonzero() {
        assert_eq!(classify(ExpectedOutcome::ExpectSuccess, Some(1)), Verdict::CaseFailed);
        assert_eq!(classify(ExpectedOutcome::ExpectSuccess, Some(2)), Verdict::CaseFailed);
        assert_eq!(classify(ExpectedOutcome::ExpectSuccess, Some(-1)), Verdict::CaseFailed);
    }

    #[test]
    fn test_expect_success_signal() {
        assert_eq!(classify(ExpectedOutcome::ExpectSuccess, None), Verdict::CaseFailed);
    }

    #[test]
    fn test_expect_failure_nonzero() {
        assert_eq!(classify(ExpectedOutcome::ExpectFailure, Some(1)), Verdict::CaseSucceeded);
        assert_eq!(classify(ExpectedOutcome::ExpectFailure, Some(255)), Verdict::CaseSucceeded);
    }

    #[test]
    fn test_expect_failure_zero() {
        // The subject wrongly accepted input it should have rejected
        assert_eq!(classify(ExpectedOutcome::ExpectFailure, Some(0)), Verdict::CaseFailed);
    }

    #[test]
    fn test_expect_failure_signal() {
        assert_eq!(classify(ExpectedOutcome::ExpectFailure, None), Verdict::CaseSucceeded);
    }

    #[test]
    fn test_only_case_succeeded_is_success() {
        assert!(Verdict::CaseSucceeded.is_success());
        assert!(!Verdict::CaseFailed.is_success());
        assert!(!Verdict::TimedOut.is_success());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ExpectedOutcome::ExpectFailure.to_string(), "expect-fail");
        assert_eq!(ExpectedOutcome::ExpectSuccess.to_string(), "expect-pass");
        assert_eq!(Verdict::CaseSucceeded.to_string(), "success");
        assert_eq!(Verdict::CaseFailed.to_string(), "failed");
        assert_eq!(Verdict::TimedOut.to_string(), "timeout");
    }
}
