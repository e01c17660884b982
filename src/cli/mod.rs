//! CLI module for the fixture harness
//!
//! This module provides the command-line interface for the harness.
//!
//! ## Commands
//!
//! - `run --subject <PATH>` - Invoke the subject on every fixture and report verdicts
//! - `list` - Show discovered fixtures and their expected outcome without invoking anything
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::{
    ColorChoice, DEFAULT_FIXTURE_DIR, DEFAULT_MODE_ARG, DiscoveryPolicy, HarnessConfig, ReportFormat,
};
use crate::harness::HarnessError;
use crate::version::HARNESS_VERSION;
use harness_core::DEFAULT_FAIL_MARKER;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// Every fixture succeeded (or there were none)
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one fixture failed or timed out
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The harness itself could not complete the run
    pub const HARNESS_ERROR: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a harness error (exit code 2).
    pub fn harness(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::HARNESS_ERROR)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        // Debug on a miette report renders the full diagnostic (code, causes, help)
        let report = miette::Report::new(err);
        CliError::harness(format!("{:?}", report))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Conformance harness for pass/fail fixture directories
#[derive(Parser, Debug)]
#[command(name = "fixture-harness")]
#[command(version = HARNESS_VERSION)]
#[command(
    about = "Run a subject program against a directory of fixtures and check its exit status",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags shared by every command that discovers fixtures.
#[derive(Args, Debug, Clone)]
pub struct FixtureArgs {
    /// Directory holding the fixtures
    #[arg(long = "fixtures", value_name = "DIR", default_value = DEFAULT_FIXTURE_DIR)]
    pub fixture_dir: PathBuf,

    /// Only use fixtures whose name contains EXPR
    #[arg(short = 'k', value_name = "EXPR")]
    pub filter: Option<String>,

    /// Substring marking a fixture name as expected to fail
    #[arg(long, value_name = "STR", default_value = DEFAULT_FAIL_MARKER)]
    pub marker: String,

    /// Treat a missing or unreadable fixture directory as an error
    #[arg(long)]
    pub strict_discovery: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Invoke the subject on every fixture and report verdicts
    Run {
        /// Subject program to test
        #[arg(long, value_name = "PATH")]
        subject: PathBuf,
        /// Argument placed before the mode argument (repeatable)
        #[arg(long = "subject-arg", value_name = "ARG", allow_hyphen_values = true)]
        subject_args: Vec<String>,
        /// Mode argument passed to the subject before each fixture
        #[arg(long, value_name = "ARG", default_value = DEFAULT_MODE_ARG)]
        mode: String,
        #[command(flatten)]
        fixtures: FixtureArgs,
        /// Stop on first failure
        #[arg(short = 'x', long = "exitfirst")]
        stop_on_fail: bool,
        /// Kill the subject after SECS seconds and report a timeout
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
        format: ReportFormat,
        /// When to colorize console output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List discovered fixtures with their expected outcome
    List {
        #[command(flatten)]
        fixtures: FixtureArgs,
    },
}

impl FixtureArgs {
    fn apply(self, config: HarnessConfig) -> HarnessConfig {
        let policy = if self.strict_discovery {
            DiscoveryPolicy::Strict
        } else {
            DiscoveryPolicy::Permissive
        };
        let config = config
            .with_fixture_dir(self.fixture_dir)
            .with_fail_marker(self.marker)
            .with_discovery_policy(policy);
        match self.filter {
            Some(filter) => config.with_filter(filter),
            None => config,
        }
    }
}

impl Command {
    /// Build the harness configuration described by this command's flags.
    pub fn config(self) -> HarnessConfig {
        match self {
            Command::Run {
                subject,
                subject_args,
                mode,
                fixtures,
                stop_on_fail,
                timeout,
                format,
                color,
                verbose,
            } => {
                let mut config = HarnessConfig::new(subject)
                    .with_mode_arg(mode)
                    .with_fail_fast(stop_on_fail)
                    .with_report_format(format)
                    .with_color(color)
                    .with_verbose(verbose);
                config.subject_args = subject_args;
                if let Some(secs) = timeout {
                    config = config.with_timeout(Duration::from_secs(secs));
                }
                fixtures.apply(config)
            }
            Command::List { fixtures } => fixtures.apply(HarnessConfig::default()),
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Some(command @ Command::Run { .. }) => commands::run_fixtures(&command.config()),
        Some(command @ Command::List { .. }) => commands::list_fixtures(&command.config()),
        None => {
            // No command - show help
            let help = Cli::command().render_help();
            Err(CliError::harness(help.to_string()))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
