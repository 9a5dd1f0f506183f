//! # Report Module
//!
//! The [`RunReport`] collects the outcome of every file the walker handed to
//! the rewriter. It is the only state that lives across files and is returned
//! to the caller once the walk is done, then printed and optionally written
//! as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A file that was rewritten (or would be, in dry-run mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSuccess {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Whether an existing `/** ... */` block was replaced
  pub replaced_comment: bool,
  /// Whether the new content was written to disk
  pub written: bool,
}

/// A file whose rewrite failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Error message including its causes
  pub error: String,
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Outcome of one run over a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
  /// Files processed successfully, in walk order
  pub succeeded: Vec<FileSuccess>,
  /// Files that failed, in walk order
  pub failed: Vec<FileFailure>,
  /// Wall-clock duration of the run in seconds
  pub elapsed_secs: f64,
}

impl RunReport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_success(&mut self, success: FileSuccess) {
    self.succeeded.push(success);
  }

  /// Records a failure, keeping the full error chain as its message.
  pub fn record_failure(&mut self, path: &Path, error: &anyhow::Error) {
    self.failed.push(FileFailure {
      path: path.to_path_buf(),
      error: format!("{error:#}"),
    });
  }

  pub fn set_elapsed(&mut self, elapsed: Duration) {
    self.elapsed_secs = elapsed.as_secs_f64();
  }

  pub fn success_count(&self) -> usize {
    self.succeeded.len()
  }

  pub fn failure_count(&self) -> usize {
    self.failed.len()
  }

  /// Number of files that matched the allow-list and were attempted.
  pub fn total(&self) -> usize {
    self.success_count() + self.failure_count()
  }

  pub fn has_failures(&self) -> bool {
    !self.failed.is_empty()
  }

  /// Writes the report as pretty-printed JSON to `output_path`.
  pub fn write_json(&self, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(self).with_context(|| "Failed to serialize run report")?;
    fs::write(output_path, json)
      .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))
  }
}
