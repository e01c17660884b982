//! Fixture identifiers.

use std::fmt;

/// Path separators recognised when splitting off a fixture name.
#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];
#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// Identify one fixture for the duration of a run.
///
/// The identifier is the exact string handed to the subject program, usually the fixture directory joined
/// with the entry name (`tests/ok_basic`). Ordering is byte-wise lexicographic on that string, which is the
/// order fixtures are visited in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixtureId(String);

impl FixtureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the final component of the identifier (the entry name).
    ///
    /// ## Notes
    /// - `\` is a separator only on Windows; elsewhere it is an ordinary file name character.
    /// - An identifier without a separator is its own name.
    pub fn name(&self) -> &str {
        let trimmed = self.0.trim_end_matches(SEPARATORS);
        match trimmed.rfind(SEPARATORS) {
            Some(idx) => &trimmed[idx + 1..],
            None => trimmed,
        }
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FixtureId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FixtureId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for FixtureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
