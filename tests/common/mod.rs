//! Shared scaffolding for end-to-end tests: a scratch directory holding a shell subject and its fixtures.
//!
//! Each fixture file contains the exit code the subject should return, `hang` to make it sleep, or `linger`
//! to make it wait on a helper process that inherits its output pipes.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Subject script run through `/bin/sh`, so no file in the sandbox ever needs the executable bit.
const SUBJECT_SCRIPT: &str = r#"
if [ "$1" != "test" ]; then
    echo "unexpected mode: $1" >&2
    exit 64
fi
echo "checking $2"
action=$(cat "$2")
case "$action" in
    hang) exec sleep 30 ;;
    linger) echo "waiting on helper"; sleep 5 ;;
    *) echo "exiting with $action" >&2; exit "$action" ;;
esac
"#;

pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    pub fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("fixture_harness_e2e_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("fixtures")).unwrap();
        fs::write(root.join("subject.sh"), SUBJECT_SCRIPT).unwrap();
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fixture_dir(&self) -> PathBuf {
        self.root.join("fixtures")
    }

    pub fn script(&self) -> PathBuf {
        self.root.join("subject.sh")
    }

    /// Add a fixture whose subject run exits with `code`.
    pub fn fixture(&self, name: &str, code: i32) -> &Self {
        fs::write(self.fixture_dir().join(name), code.to_string()).unwrap();
        self
    }

    /// Add a fixture on which the subject never finishes.
    pub fn hanging_fixture(&self, name: &str) -> &Self {
        fs::write(self.fixture_dir().join(name), "hang").unwrap();
        self
    }

    /// Add a fixture on which the subject blocks on a forked helper instead of exec-ing it.
    pub fn lingering_fixture(&self, name: &str) -> &Self {
        fs::write(self.fixture_dir().join(name), "linger").unwrap();
        self
    }

    /// Identifier the harness will report for fixture `name`.
    pub fn fixture_id(&self, name: &str) -> String {
        self.fixture_dir().join(name).to_string_lossy().into_owned()
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
