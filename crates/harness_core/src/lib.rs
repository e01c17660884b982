//! Provide the shared, pure vocabulary of the fixture harness.
//!
//! This crate is intentionally small and dependency-free. It answers three questions without touching the
//! filesystem or spawning anything:
//! - what a fixture *is* ([`FixtureId`]),
//! - what the subject program is expected to do with it ([`ExpectedOutcome`], via an [`ExpectationConvention`]),
//! - whether the observed exit status matches that expectation ([`Verdict`], [`classify`]).
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, no process types.
//! - Run-level aggregation lives in [`RunOutcome`], a plain value that callers thread through their loop.

pub mod convention;
pub mod fixture;
pub mod outcome;
pub mod summary;

pub use convention::{DEFAULT_FAIL_MARKER, ExpectationConvention, SubstringConvention};
pub use fixture::FixtureId;
pub use outcome::{ExpectedOutcome, Verdict, classify};
pub use summary::RunOutcome;
