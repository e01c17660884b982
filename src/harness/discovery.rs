//! Fixture discovery
//!
//! Fixtures are the direct entries of one directory, in the spirit of a shell glob `dir/*`: no recursion,
//! sub-directories count as fixtures themselves, hidden entries are ignored.

use std::fs;
use std::io;
use std::path::Path;

use harness_core::FixtureId;

use super::interfaces::{DiscoveryError, FixtureDiscovery, HarnessError};
use crate::config::DiscoveryPolicy;

/// Filesystem-based discovery over a single directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryDiscovery;

impl FixtureDiscovery for DirectoryDiscovery {
    #[tracing::instrument(skip(self), fields(dir = %dir.display()))]
    fn discover(&self, dir: &Path) -> Result<Vec<FixtureId>, DiscoveryError> {
        // Identifiers must name real paths, so the directory part cannot be converted lossily
        if dir.to_str().is_none() {
            return Err(DiscoveryError::NonUtf8 { path: dir.to_path_buf() });
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DiscoveryError::Missing { path: dir.to_path_buf() });
            }
            Err(source) => {
                return Err(DiscoveryError::Unreadable {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let mut fixtures = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::warn!("skipping non UTF-8 fixture name {:?}", file_name);
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            // Both parts are UTF-8, so this conversion is exact
            fixtures.push(FixtureId::new(dir.join(name).to_string_lossy().into_owned()));
        }

        fixtures.sort();
        fixtures.dedup();
        tracing::debug!(count = fixtures.len(), "discovered fixtures");
        Ok(fixtures)
    }
}

/// Discover fixtures and apply the discovery policy to any error.
///
/// Under [`DiscoveryPolicy::Permissive`] a missing or unreadable directory is logged and treated as an empty
/// fixture set; under [`DiscoveryPolicy::Strict`] it aborts the run.
pub fn discover_with_policy<D>(
    discovery: &D,
    dir: &Path,
    policy: DiscoveryPolicy,
) -> Result<Vec<FixtureId>, HarnessError>
where
    D: FixtureDiscovery + ?Sized,
{
    match discovery.discover(dir) {
        Ok(fixtures) => Ok(fixtures),
        Err(e) => match policy {
            DiscoveryPolicy::Permissive => {
                tracing::warn!("{}; running no fixtures", e);
                Ok(Vec::new())
            }
            DiscoveryPolicy::Strict => Err(e.into()),
        },
    }
}

/// Keep only fixtures whose name contains `keyword`, preserving order.
pub fn filter_fixtures(fixtures: Vec<FixtureId>, keyword: Option<&str>) -> Vec<FixtureId> {
    match keyword {
        Some(keyword) => fixtures.into_iter().filter(|f| f.name().contains(keyword)).collect(),
        None => fixtures,
    }
}
