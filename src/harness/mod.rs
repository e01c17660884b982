//! Fixture harness pipeline
//!
//! Discovery -> (invoke -> classify -> report) per fixture -> exit code.
//!
//! ## Modules
//!
//! - `interfaces` - I/O boundary traits and harness errors
//! - `discovery` - Directory listing, discovery policy, keyword filter
//! - `invoker` - Child process execution with output capture and optional timeout
//! - `reporter` - Console and JSON reporters
//! - `runner` - The sequential run loop

pub mod discovery;
pub mod interfaces;
pub mod invoker;
pub mod reporter;
pub mod runner;

pub use discovery::{DirectoryDiscovery, discover_with_policy, filter_fixtures};
pub use interfaces::{DiscoveryError, FixtureDiscovery, HarnessError, SubjectInvoker};
pub use invoker::{InvocationResult, ProcessInvoker};
pub use reporter::{ConsoleReporter, FixtureReport, FixtureReporter, JsonReporter};
pub use runner::{RunOptions, RunSummary, judge, run_fixtures};
