//! Run-level aggregation of verdicts.

use crate::outcome::Verdict;

/// Aggregate judgment across the fixtures of one run.
///
/// `RunOutcome` is a plain value: the runner starts from [`RunOutcome::new`] and replaces it with
/// [`RunOutcome::record`] after each fixture. Once a non-success verdict is recorded the run can never become
/// successful again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOutcome {
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
}

impl RunOutcome {
    /// Start a run: vacuously successful, nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of verdicts into an outcome.
    pub fn from_verdicts(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        verdicts.into_iter().fold(Self::new(), Self::record)
    }

    /// Return the outcome after one more verdict.
    #[must_use]
    pub fn record(mut self, verdict: Verdict) -> Self {
        match verdict {
            Verdict::CaseSucceeded => self.passed += 1,
            Verdict::CaseFailed => self.failed += 1,
            Verdict::TimedOut => self.timed_out += 1,
        }
        self
    }

    /// Number of verdicts recorded so far.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.timed_out
    }

    /// Check whether every recorded verdict was a success (true for an empty run).
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.timed_out == 0
    }

    /// Process exit code for this outcome: `0` when all succeeded, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() { 0 } else { 1 }
    }
}
