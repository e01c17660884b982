#![forbid(unsafe_code)]
//! Fixture Harness
//!
//! A conformance harness for an external subject program. Every entry of a fixture directory is handed to
//! the subject as `<subject> test <fixture>`; the fixture's name says whether the subject must accept it
//! (exit `0`) or reject it (nonzero exit, names containing `fail`). The harness reports one verdict per
//! fixture and exits `0` only when every verdict was a success.
//!
//! The pure vocabulary (fixture ids, expectations, verdicts, run aggregation) lives in the `harness_core`
//! crate; this crate adds the filesystem, process, and console boundaries.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod harness;
pub mod version;

pub use harness_core;
pub use harness_core::{ExpectationConvention, ExpectedOutcome, FixtureId, RunOutcome, SubstringConvention, Verdict};

pub use config::{ColorChoice, DiscoveryPolicy, HarnessConfig, ReportFormat};
pub use harness::{
    ConsoleReporter, DirectoryDiscovery, FixtureDiscovery, FixtureReporter, HarnessError, InvocationResult,
    JsonReporter, ProcessInvoker, RunOptions, RunSummary, SubjectInvoker, run_fixtures,
};
