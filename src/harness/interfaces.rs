//! Harness I/O boundary interfaces
//!
//! This module defines trait-based abstractions for the two operations that touch the outside world:
//! - Fixture discovery (filesystem listing)
//! - Subject invocation (child process + output capture)
//!
//! The runner only sees these traits, so a run can be driven by an in-memory fixture list or a fake
//! subject in tests. Reporting has its own trait in `reporter.rs`.

use std::io;
use std::path::{Path, PathBuf};

use harness_core::FixtureId;
use miette::Diagnostic;
use thiserror::Error;

use super::invoker::InvocationResult;

/// Errors raised while listing the fixture directory.
///
/// Whether these abort the run is decided by the caller (see `DiscoveryPolicy`).
#[derive(Debug, Error, Diagnostic)]
pub enum DiscoveryError {
    #[error("fixture directory '{}' does not exist", .path.display())]
    #[diagnostic(
        code(harness::discovery::missing),
        help("create the directory or point the harness at another one with --fixtures <DIR>")
    )]
    Missing { path: PathBuf },

    #[error("cannot list fixture directory '{}'", .path.display())]
    #[diagnostic(code(harness::discovery::unreadable))]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fixture directory '{}' is not valid UTF-8", .path.display())]
    #[diagnostic(
        code(harness::discovery::non_utf8),
        help("fixture paths are passed to the subject verbatim; rename the directory")
    )]
    NonUtf8 { path: PathBuf },
}

/// Errors that abort a harness run.
///
/// A subject that exits nonzero is *not* an error; it is data for the classifier. These variants cover the
/// cases where the harness could not observe the subject at all, or could not report what it observed.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("subject program '{}' was not found", .subject.display())]
    #[diagnostic(
        code(harness::invoke::subject_not_found),
        help("relative subject paths resolve against the working directory; check --subject")
    )]
    SubjectNotFound { subject: PathBuf },

    #[error("failed to start subject program '{}'", .subject.display())]
    #[diagnostic(code(harness::invoke::spawn))]
    Spawn {
        subject: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for subject on fixture '{fixture}'")]
    #[diagnostic(code(harness::invoke::wait))]
    Wait {
        fixture: FixtureId,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report")]
    #[diagnostic(code(harness::report))]
    Report(#[from] io::Error),
}

// ============================================================================
// Fixture Discovery Interface
// ============================================================================

/// Enumerate the fixtures of a run.
pub trait FixtureDiscovery {
    /// List the fixtures in `dir`, sorted lexicographically, without duplicates.
    fn discover(&self, dir: &Path) -> Result<Vec<FixtureId>, DiscoveryError>;
}

// ============================================================================
// Subject Invoker Interface
// ============================================================================

/// Run the subject program against one fixture and capture what it did.
pub trait SubjectInvoker {
    /// Invoke the subject on `fixture`, blocking until it finishes (or times out).
    ///
    /// Returns `Err` only when the subject could not be observed; a nonzero exit status is `Ok`.
    fn invoke(&self, fixture: &FixtureId) -> Result<InvocationResult, HarnessError>;
}
