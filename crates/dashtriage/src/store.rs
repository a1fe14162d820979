//! Record store - the categorized on-disk layout for diagnostic artifacts.
//!
//! Layout under the store root:
//!
//! ```text
//! diagnostics/
//!   pass/              one text artifact per all-passing test file
//!   fail/              one text artifact per test file with failures
//!   run-summary.txt    condensed whole-run summary
//! ```
//!
//! Artifacts are overwritten wholesale each run; the store carries no
//! backward-compatibility contract. The recorder is the only writer, the
//! analyzer the only reader.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed filename of the run-level summary artifact.
pub const RUN_SUMMARY_FILE: &str = "run-summary.txt";

/// Outcome bucket for a test-file artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

/// Handle to the diagnostics directory tree.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Create a handle rooted at `root`. No filesystem access happens here;
    /// call [`RecordStore::prepare`] before the first write of a run.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Subdirectory for the given outcome bucket.
    #[must_use]
    pub fn outcome_dir(&self, outcome: Outcome) -> PathBuf {
        self.root.join(outcome.dir_name())
    }

    /// Path of the run-summary artifact.
    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.root.join(RUN_SUMMARY_FILE)
    }

    /// Deterministic artifact path for a test file: the file's stem with a
    /// `.txt` extension, placed in the outcome bucket.
    #[must_use]
    pub fn artifact_path(&self, test_file: &Path, outcome: Outcome) -> PathBuf {
        let stem = test_file
            .file_stem()
            .map_or_else(|| "unnamed".to_string(), |s| s.to_string_lossy().to_string());
        self.outcome_dir(outcome).join(format!("{stem}.txt"))
    }

    /// Create the directory tree if absent, then clear all files inside the
    /// `pass/` and `fail/` buckets (the directories themselves survive) so
    /// the store reflects only the current run. Idempotent.
    pub fn prepare(&self) -> Result<()> {
        for outcome in [Outcome::Pass, Outcome::Fail] {
            let dir = self.outcome_dir(outcome);
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create record store dir {}", dir.display()))?;
            clear_files(&dir)?;
        }
        Ok(())
    }

    /// Write a test-file artifact into its outcome bucket.
    pub fn write_artifact(&self, test_file: &Path, outcome: Outcome, body: &str) -> Result<PathBuf> {
        let path = self.artifact_path(test_file, outcome);
        fs::write(&path, body)
            .with_context(|| format!("failed to write diagnostic artifact {}", path.display()))?;
        Ok(path)
    }

    /// Write the run-summary artifact at the store root.
    pub fn write_summary(&self, body: &str) -> Result<PathBuf> {
        let path = self.summary_path();
        fs::write(&path, body)
            .with_context(|| format!("failed to write run summary {}", path.display()))?;
        Ok(path)
    }

    /// All artifacts currently in the `fail/` bucket, sorted by filename for
    /// deterministic analyzer output. A missing bucket is an empty listing,
    /// not an error.
    #[must_use]
    pub fn fail_artifacts(&self) -> Vec<PathBuf> {
        let dir = self.outcome_dir(Outcome::Fail);
        let Ok(entries) = fs::read_dir(&dir) else {
            tracing::debug!(dir = %dir.display(), "fail bucket absent; no artifacts to scan");
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files
    }
}

/// Remove every regular file directly inside `dir`, leaving subdirectories
/// and the directory itself in place.
fn clear_files(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to list record store dir {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to clear stale artifact {}", path.display()))?;
        }
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prepare_creates_buckets() {
        let tmp = TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path().join("diagnostics"));
        store.prepare().unwrap();

        assert!(store.outcome_dir(Outcome::Pass).is_dir());
        assert!(store.outcome_dir(Outcome::Fail).is_dir());
    }

    #[test]
    fn prepare_is_idempotent_and_clears_stale_artifacts() {
        let tmp = TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path());
        store.prepare().unwrap();

        let stale = store.outcome_dir(Outcome::Fail).join("stale.txt");
        fs::write(&stale, "old run").unwrap();

        store.prepare().unwrap();
        assert!(!stale.exists());
        assert!(store.outcome_dir(Outcome::Fail).is_dir());
    }

    #[test]
    fn artifact_path_is_deterministic_from_stem() {
        let store = RecordStore::new("/tmp/diag");
        let path = store.artifact_path(Path::new("/suite/convert.test.ts"), Outcome::Fail);
        assert_eq!(path, PathBuf::from("/tmp/diag/fail/convert.test.txt"));
    }

    #[test]
    fn fail_artifacts_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path().join("never-created"));
        assert!(store.fail_artifacts().is_empty());
    }

    #[test]
    fn fail_artifacts_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path());
        store.prepare().unwrap();

        store
            .write_artifact(Path::new("b.test.ts"), Outcome::Fail, "b")
            .unwrap();
        store
            .write_artifact(Path::new("a.test.ts"), Outcome::Fail, "a")
            .unwrap();

        let names: Vec<String> = store
            .fail_artifacts()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.test.txt", "b.test.txt"]);
    }
}
