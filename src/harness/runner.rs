//! Harness run loop
//!
//! Fixtures are processed strictly one after another, in discovery order: invoke, classify, report, then
//! move on. The run-level [`RunOutcome`] is a value owned by this loop and returned in the [`RunSummary`].

use std::time::{Duration, Instant};

use harness_core::{ExpectationConvention, ExpectedOutcome, FixtureId, RunOutcome, Verdict, classify};

use super::interfaces::{HarnessError, SubjectInvoker};
use super::invoker::InvocationResult;
use super::reporter::{FixtureReport, FixtureReporter};

/// Options that shape a run but not individual verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after the first non-success verdict instead of running every fixture.
    pub fail_fast: bool,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Fixtures handed to the run (including any skipped by fail-fast)
    pub fixture_count: usize,
    /// Fail-fast stopped the run before every fixture was attempted
    pub stopped_early: bool,
    pub duration: Duration,
}

impl RunSummary {
    /// Process exit code for the run: `0` iff every attempted fixture succeeded.
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

/// Judge one invocation.
///
/// A timed-out invocation is always `TimedOut`, whatever the expectation: a subject that hangs has neither
/// accepted nor rejected the fixture.
pub fn judge(expected: ExpectedOutcome, invocation: &InvocationResult) -> Verdict {
    if invocation.timed_out {
        Verdict::TimedOut
    } else {
        classify(expected, invocation.exit_code)
    }
}

/// Run every fixture through the subject and report each verdict.
///
/// Returns `Err` only for harness-level failures (subject missing, report write failure); failing cases are
/// reflected in the returned summary.
pub fn run_fixtures<I, C, R>(
    fixtures: &[FixtureId],
    invoker: &I,
    convention: &C,
    reporter: &mut R,
    options: RunOptions,
) -> Result<RunSummary, HarnessError>
where
    I: SubjectInvoker + ?Sized,
    C: ExpectationConvention + ?Sized,
    R: FixtureReporter + ?Sized,
{
    let start_time = Instant::now();
    reporter.on_run_start(fixtures.len())?;

    let mut outcome = RunOutcome::new();
    let mut stopped_early = false;

    for (index, fixture) in fixtures.iter().enumerate() {
        let expected = convention.expected_outcome(fixture);
        let invocation = invoker.invoke(fixture)?;
        let verdict = judge(expected, &invocation);
        outcome = outcome.record(verdict);

        tracing::debug!(fixture = %fixture, %expected, %verdict, "fixture judged");
        reporter.on_fixture_complete(&FixtureReport {
            fixture: fixture.clone(),
            expected,
            verdict,
            invocation,
        })?;

        if options.fail_fast && !verdict.is_success() {
            let remaining = fixtures.len() - index - 1;
            if remaining > 0 {
                tracing::info!(remaining, "stopping after first failure");
                stopped_early = true;
            }
            break;
        }
    }

    let summary = RunSummary {
        outcome,
        fixture_count: fixtures.len(),
        stopped_early,
        duration: start_time.elapsed(),
    };
    reporter.on_run_complete(&summary)?;
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use harness_core::SubstringConvention;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    /// Invoker that answers from a table and records the call order.
    struct FakeInvoker {
        exit_codes: HashMap<String, i32>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeInvoker {
        fn new(table: &[(&str, i32)]) -> Self {
            Self {
                exit_codes: table.iter().map(|(id, code)| (id.to_string(), *code)).collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl SubjectInvoker for FakeInvoker {
        fn invoke(&self, fixture: &FixtureId) -> Result<InvocationResult, HarnessError> {
            self.calls.borrow_mut().push(fixture.to_string());
            let code = self.exit_codes.get(fixture.as_str()).copied().unwrap_or(0);
            Ok(InvocationResult::exited(code).with_output(format!("ran {}", fixture), ""))
        }
    }

    /// Reporter that keeps every report in memory.
    #[derive(Default)]
    struct Recorder {
        started_with: Option<usize>,
        reports: Vec<FixtureReport>,
        summary: Option<RunSummary>,
    }

    impl FixtureReporter for Recorder {
        fn on_run_start(&mut self, fixture_count: usize) -> io::Result<()> {
            self.started_with = Some(fixture_count);
            Ok(())
        }

        fn on_fixture_complete(&mut self, report: &FixtureReport) -> io::Result<()> {
            self.reports.push(report.clone());
            Ok(())
        }

        fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
            self.summary = Some(*summary);
            Ok(())
        }
    }

    fn ids(names: &[&str]) -> Vec<FixtureId> {
        names.iter().map(|n| FixtureId::new(*n)).collect()
    }

    fn run(fixtures: &[FixtureId], invoker: &FakeInvoker, options: RunOptions) -> (RunSummary, Recorder) {
        let mut recorder = Recorder::default();
        let summary =
            run_fixtures(fixtures, invoker, &SubstringConvention::default(), &mut recorder, options).unwrap();
        (summary, recorder)
    }

    #[test]
    fn test_scenario_a_all_succeed() {
        let fixtures = ids(&["tests/ok_basic", "tests/parse_fail_case"]);
        let invoker = FakeInvoker::new(&[("tests/ok_basic", 0), ("tests/parse_fail_case", 1)]);
        let (summary, recorder) = run(&fixtures, &invoker, RunOptions::default());

        assert_eq!(summary.exit_code(), 0);
        assert_eq!(summary.outcome.passed, 2);
        assert!(recorder.reports.iter().all(|r| r.verdict == Verdict::CaseSucceeded));
    }

    #[test]
    fn test_scenario_b_unexpected_exit() {
        let fixtures = ids(&["tests/ok_basic"]);
        let invoker = FakeInvoker::new(&[("tests/ok_basic", 2)]);
        let (summary, recorder) = run(&fixtures, &invoker, RunOptions::default());

        assert_ne!(summary.exit_code(), 0);
        assert_eq!(recorder.reports[0].verdict, Verdict::CaseFailed);
        assert_eq!(recorder.reports[0].invocation.stdout_text(), "ran tests/ok_basic");
    }

    #[test]
    fn test_scenario_c_empty() {
        let invoker = FakeInvoker::new(&[]);
        let (summary, recorder) = run(&[], &invoker, RunOptions::default());

        assert_eq!(summary.exit_code(), 0);
        assert_eq!(recorder.started_with, Some(0));
        assert!(recorder.reports.is_empty());
        assert!(recorder.summary.is_some());
    }

    #[test]
    fn test_scenario_d_wrongly_accepted() {
        let fixtures = ids(&["tests/must_fail_x"]);
        let invoker = FakeInvoker::new(&[("tests/must_fail_x", 0)]);
        let (summary, recorder) = run(&fixtures, &invoker, RunOptions::default());

        assert_eq!(recorder.reports[0].expected, ExpectedOutcome::ExpectFailure);
        assert_eq!(recorder.reports[0].verdict, Verdict::CaseFailed);
        assert_ne!(summary.exit_code(), 0);
    }

    #[test]
    fn test_continues_after_failure_by_default() {
        let fixtures = ids(&["tests/a", "tests/b", "tests/c"]);
        let invoker = FakeInvoker::new(&[("tests/a", 1)]);
        let (summary, recorder) = run(&fixtures, &invoker, RunOptions::default());

        assert_eq!(*invoker.calls.borrow(), ["tests/a", "tests/b", "tests/c"]);
        assert_eq!(recorder.reports.len(), 3);
        assert_eq!(summary.outcome.failed, 1);
        assert!(!summary.stopped_early);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let fixtures = ids(&["tests/a", "tests/b", "tests/c"]);
        let invoker = FakeInvoker::new(&[("tests/b", 1)]);
        let (summary, recorder) = run(&fixtures, &invoker, RunOptions { fail_fast: true });

        assert_eq!(*invoker.calls.borrow(), ["tests/a", "tests/b"]);
        assert_eq!(recorder.reports.len(), 2);
        assert!(summary.stopped_early);
        assert_eq!(summary.fixture_count, 3);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_fail_fast_on_last_fixture_is_not_early() {
        let fixtures = ids(&["tests/a", "tests/b"]);
        let invoker = FakeInvoker::new(&[("tests/b", 1)]);
        let (summary, _) = run(&fixtures, &invoker, RunOptions { fail_fast: true });
        assert!(!summary.stopped_early);
    }

    #[test]
    fn test_visits_in_given_order() {
        let fixtures = ids(&["tests/a", "tests/b_fail", "tests/c"]);
        let invoker = FakeInvoker::new(&[("tests/b_fail", 7)]);
        let (_, recorder) = run(&fixtures, &invoker, RunOptions::default());

        let reported: Vec<&str> = recorder.reports.iter().map(|r| r.fixture.as_str()).collect();
        assert_eq!(reported, ["tests/a", "tests/b_fail", "tests/c"]);
    }

    #[test]
    fn test_injected_convention() {
        let fixtures = ids(&["tests/anything"]);
        let invoker = FakeInvoker::new(&[("tests/anything", 1)]);
        let everything_fails = |_: &FixtureId| ExpectedOutcome::ExpectFailure;
        let mut recorder = Recorder::default();

        let summary =
            run_fixtures(&fixtures, &invoker, &everything_fails, &mut recorder, RunOptions::default()).unwrap();
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_judge_timeout_overrides_expectation() {
        let mut invocation = InvocationResult::exited(0);
        invocation.exit_code = None;
        invocation.timed_out = true;
        assert_eq!(judge(ExpectedOutcome::ExpectFailure, &invocation), Verdict::TimedOut);
        assert_eq!(judge(ExpectedOutcome::ExpectSuccess, &invocation), Verdict::TimedOut);
    }

    #[test]
    fn test_invoker_error_aborts_run() {
        struct Missing;
        impl SubjectInvoker for Missing {
            fn invoke(&self, _fixture: &FixtureId) -> Result<InvocationResult, HarnessError> {
                Err(HarnessError::SubjectNotFound {
                    subject: "./missing".into(),
                })
            }
        }

        let mut recorder = Recorder::default();
        let result = run_fixtures(
            &ids(&["tests/ok_basic"]),
            &Missing,
            &SubstringConvention::default(),
            &mut recorder,
            RunOptions::default(),
        );
        assert!(matches!(result, Err(HarnessError::SubjectNotFound { .. })));
        assert!(recorder.reports.is_empty());
    }
}
