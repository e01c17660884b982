//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, IsTerminal, Write};

use harness_core::{ExpectationConvention, FixtureId, SubstringConvention};

use super::{CliResult, ExitCode};
use crate::config::{HarnessConfig, ReportFormat};
use crate::harness::{
    ConsoleReporter, DirectoryDiscovery, HarnessError, JsonReporter, ProcessInvoker, RunOptions, RunSummary,
    discover_with_policy, filter_fixtures, run_fixtures as run_pipeline,
};

/// Discover, filter, and order the fixtures a command operates on.
fn collect_fixtures(config: &HarnessConfig) -> Result<Vec<FixtureId>, HarnessError> {
    let fixtures = discover_with_policy(&DirectoryDiscovery, &config.fixture_dir, config.discovery_policy)?;
    Ok(filter_fixtures(fixtures, config.filter.as_deref()))
}

/// Run every fixture through the subject.
///
/// Exit code is `0` when every fixture succeeded, `1` when any failed or timed out. Harness errors (missing
/// subject, strict discovery failure, broken stdout) come back as `CliError` with exit code `2`.
pub fn run_fixtures(config: &HarnessConfig) -> CliResult<ExitCode> {
    let fixtures = collect_fixtures(config)?;
    tracing::info!(
        subject = %config.subject.display(),
        fixtures = fixtures.len(),
        "starting run"
    );

    let invoker = ProcessInvoker::from_config(config);
    let convention = SubstringConvention::new(config.fail_marker.clone());
    let options = RunOptions {
        fail_fast: config.fail_fast,
    };

    let stdout = io::stdout();
    let summary = match config.report_format {
        ReportFormat::Console => {
            let color = config.color.resolve(stdout.is_terminal());
            let mut reporter = ConsoleReporter::new(stdout.lock())
                .with_color(color)
                .with_verbose(config.verbose);
            run_pipeline(&fixtures, &invoker, &convention, &mut reporter, options)?
        }
        ReportFormat::Json => {
            let mut reporter = JsonReporter::new(stdout.lock());
            run_pipeline(&fixtures, &invoker, &convention, &mut reporter, options)?
        }
    };

    Ok(exit_code_for(&summary))
}

fn exit_code_for(summary: &RunSummary) -> ExitCode {
    if summary.outcome.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print each discovered fixture with its expected outcome, without invoking the subject.
pub fn list_fixtures(config: &HarnessConfig) -> CliResult<ExitCode> {
    let fixtures = collect_fixtures(config)?;
    let convention = SubstringConvention::new(config.fail_marker.clone());

    let mut out = io::stdout().lock();
    write_listing(&mut out, &fixtures, &convention).map_err(HarnessError::Report)?;
    Ok(ExitCode::SUCCESS)
}

fn write_listing<W, C>(out: &mut W, fixtures: &[FixtureId], convention: &C) -> io::Result<()>
where
    W: Write,
    C: ExpectationConvention + ?Sized,
{
    for fixture in fixtures {
        writeln!(out, "{:<11} {}", convention.expected_outcome(fixture).as_str(), fixture)?;
    }
    out.flush()
}
