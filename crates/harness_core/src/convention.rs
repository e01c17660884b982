//! Derive the expected outcome of a fixture from its identifier.
//!
//! The default convention is a naming one: a fixture whose name contains `"fail"` must be rejected by the
//! subject. It is exposed through [`ExpectationConvention`] so the pipeline never hard-codes it; a manifest
//! lookup or any closure can stand in for it.

use crate::fixture::FixtureId;
use crate::outcome::ExpectedOutcome;

/// Marker substring that flags a fixture as fail-expected under the default convention.
pub const DEFAULT_FAIL_MARKER: &str = "fail";

/// Map a fixture to the outcome the subject is expected to produce.
pub trait ExpectationConvention {
    fn expected_outcome(&self, fixture: &FixtureId) -> ExpectedOutcome;
}

impl<F> ExpectationConvention for F
where
    F: Fn(&FixtureId) -> ExpectedOutcome,
{
    fn expected_outcome(&self, fixture: &FixtureId) -> ExpectedOutcome {
        self(fixture)
    }
}

/// Substring-in-name convention.
///
/// ## Notes
/// - Matching is case-sensitive and applies to [`FixtureId::name`] only. The directory part of the
///   identifier never influences the expectation, so a fixture directory called `failures/` is harmless.
/// - An empty marker matches every name, making every fixture fail-expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringConvention {
    marker: String,
}

impl SubstringConvention {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for SubstringConvention {
    fn default() -> Self {
        Self::new(DEFAULT_FAIL_MARKER)
    }
}

impl ExpectationConvention for SubstringConvention {
    fn expected_outcome(&self, fixture: &FixtureId) -> ExpectedOutcome {
        if fixture.name().contains(self.marker.as_str()) {
            ExpectedOutcome::ExpectFailure
        } else {
            ExpectedOutcome::ExpectSuccess
        }
    }
}
