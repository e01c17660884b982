//! Harness configuration
//!
//! One value describes a whole run: which subject to invoke and how, where fixtures live, how expectations
//! are derived, and how results are reported. The CLI fills it from flags; library users build it directly.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use harness_core::DEFAULT_FAIL_MARKER;

/// Default fixture directory, relative to the working directory.
pub const DEFAULT_FIXTURE_DIR: &str = "tests";

/// Default mode argument placed before the fixture identifier.
pub const DEFAULT_MODE_ARG: &str = "test";

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Subject program to invoke
    pub subject: PathBuf,
    /// Extra arguments placed between the subject and the mode argument
    pub subject_args: Vec<String>,
    /// Directory holding the fixtures
    pub fixture_dir: PathBuf,
    /// Mode argument passed to the subject (`<subject> <mode> <fixture>`)
    pub mode_arg: String,
    /// Substring that marks a fixture name as fail-expected
    pub fail_marker: String,
    /// Per-invocation timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Stop after the first non-success verdict
    pub fail_fast: bool,
    /// Only run fixtures whose name contains this keyword
    pub filter: Option<String>,
    /// What to do when the fixture directory cannot be listed
    pub discovery_policy: DiscoveryPolicy,
    /// Report output format
    pub report_format: ReportFormat,
    /// Whether console output is colorized
    pub color: ColorChoice,
    /// Show durations and exit codes for every fixture
    pub verbose: bool,
}

/// Treatment of a missing or unreadable fixture directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryPolicy {
    /// Log a warning and run zero fixtures.
    #[default]
    Permissive,
    /// Abort the run with a harness error.
    Strict,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

/// Console color choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Colorize only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve the choice against whether the output stream is a terminal.
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            subject: PathBuf::new(),
            subject_args: Vec::new(),
            fixture_dir: PathBuf::from(DEFAULT_FIXTURE_DIR),
            mode_arg: DEFAULT_MODE_ARG.to_string(),
            fail_marker: DEFAULT_FAIL_MARKER.to_string(),
            timeout: None,
            fail_fast: false,
            filter: None,
            discovery_policy: DiscoveryPolicy::default(),
            report_format: ReportFormat::default(),
            color: ColorChoice::default(),
            verbose: false,
        }
    }
}

impl HarnessConfig {
    /// Create a config for the given subject with default settings
    pub fn new(subject: impl Into<PathBuf>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Add an argument placed before the mode argument
    pub fn with_subject_arg(mut self, arg: impl Into<String>) -> Self {
        self.subject_args.push(arg.into());
        self
    }

    /// Set the fixture directory
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = dir.into();
        self
    }

    /// Set the mode argument
    pub fn with_mode_arg(mut self, mode: impl Into<String>) -> Self {
        self.mode_arg = mode.into();
        self
    }

    /// Set the fail-expected marker
    pub fn with_fail_marker(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = marker.into();
        self
    }

    /// Set the per-invocation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop at the first failing fixture
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Restrict the run to fixtures whose name contains `keyword`
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        self.filter = Some(keyword.into());
        self
    }

    /// Set the discovery policy
    pub fn with_discovery_policy(mut self, policy: DiscoveryPolicy) -> Self {
        self.discovery_policy = policy;
        self
    }

    /// Set the report format
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    /// Set the color choice
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Enable verbose console output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
