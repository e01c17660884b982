//! Reporting of fixture results.
//!
//! ## FixtureReporter Trait
//!
//! The runner hands every finished fixture to a `FixtureReporter` and never prints anything itself. Two
//! reporters ship with the harness:
//! - [`ConsoleReporter`]: one `Success:` / `Failed:` line per fixture, captured output beneath failures
//! - [`JsonReporter`]: one JSON object per line, for pipelines

use std::io::{self, Write};

use harness_core::{ExpectedOutcome, FixtureId, Verdict};
use serde_json::json;

use super::invoker::InvocationResult;
use super::runner::RunSummary;
use crate::version::HARNESS_VERSION;

const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// Everything known about one fixture once it has been judged.
#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub fixture: FixtureId,
    pub expected: ExpectedOutcome,
    pub verdict: Verdict,
    pub invocation: InvocationResult,
}

/// Trait for reporting harness results.
///
/// Every method may fail with an I/O error; the runner treats that as fatal.
pub trait FixtureReporter {
    /// Called once before the first fixture runs
    fn on_run_start(&mut self, _fixture_count: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called after each fixture has been invoked and classified
    fn on_fixture_complete(&mut self, report: &FixtureReport) -> io::Result<()>;

    /// Called once after the last fixture (or the first failure under fail-fast)
    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Human-readable reporter.
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
    verbose: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            verbose: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn write_indented(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            writeln!(self.out, "\t{}", line)?;
        }
        Ok(())
    }
}

impl<W: Write> FixtureReporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, fixture_count: usize) -> io::Result<()> {
        if fixture_count == 0 {
            writeln!(self.out, "No fixtures collected")?;
        }
        Ok(())
    }

    fn on_fixture_complete(&mut self, report: &FixtureReport) -> io::Result<()> {
        let status = match report.verdict {
            Verdict::CaseSucceeded => self.paint(GREEN, "Success:"),
            Verdict::CaseFailed => self.paint(RED, "Failed:"),
            Verdict::TimedOut => self.paint(YELLOW, "Timeout:"),
        };

        if self.verbose {
            writeln!(
                self.out,
                "{} {} ({}, {}, {}ms)",
                status,
                report.fixture,
                report.expected,
                report.invocation.status_label(),
                report.invocation.duration.as_millis()
            )?;
        } else {
            writeln!(self.out, "{} {}", status, report.fixture)?;
        }

        // Captured output only for cases that need diagnosing
        if !report.verdict.is_success() {
            let invocation = &report.invocation;
            if invocation.stdout.is_empty() && invocation.stderr.is_empty() {
                writeln!(self.out, "\t(no output)")?;
            } else {
                self.write_indented(&invocation.stdout_text())?;
                self.write_indented(&invocation.stderr_text())?;
            }
        }

        self.out.flush()
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let outcome = &summary.outcome;
        if outcome.total() == 0 {
            return self.out.flush();
        }

        let mut parts = vec![format!("{} passed", outcome.passed), format!("{} failed", outcome.failed)];
        if outcome.timed_out > 0 {
            parts.push(format!("{} timed out", outcome.timed_out));
        }
        let mut line = format!("{} in {:.2}s", parts.join(", "), summary.duration.as_secs_f64());
        if summary.stopped_early {
            line.push_str(" (stopped after first failure)");
        }

        let color = if outcome.all_succeeded() { GREEN } else { RED };
        let line = self.paint(color, &line);
        writeln!(self.out)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}

/// Machine-readable reporter emitting JSON lines.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FixtureReporter for JsonReporter<W> {
    fn on_run_start(&mut self, fixture_count: usize) -> io::Result<()> {
        let event = json!({
            "event": "start",
            "fixtures": fixture_count,
            "harness_version": HARNESS_VERSION,
        });
        writeln!(self.out, "{}", event)
    }

    fn on_fixture_complete(&mut self, report: &FixtureReport) -> io::Result<()> {
        let invocation = &report.invocation;
        let mut event = json!({
            "event": "fixture",
            "fixture": report.fixture.as_str(),
            "expected": report.expected.as_str(),
            "verdict": report.verdict.as_str(),
            "exit_code": invocation.exit_code,
            "signal": invocation.signal,
            "timed_out": invocation.timed_out,
            "duration_ms": invocation.duration.as_millis() as u64,
        });
        if !report.verdict.is_success() {
            event["stdout"] = json!(invocation.stdout_text());
            event["stderr"] = json!(invocation.stderr_text());
        }
        writeln!(self.out, "{}", event)?;
        self.out.flush()
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let outcome = &summary.outcome;
        let event = json!({
            "event": "summary",
            "total": outcome.total(),
            "passed": outcome.passed,
            "failed": outcome.failed,
            "timed_out": outcome.timed_out,
            "success": outcome.all_succeeded(),
            "stopped_early": summary.stopped_early,
            "duration_ms": summary.duration.as_millis() as u64,
        });
        writeln!(self.out, "{}", event)?;
        self.out.flush()
    }
}
