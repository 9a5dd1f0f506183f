//! # History Module
//!
//! This module answers one question per file: when was it added to version
//! control, and when was it last changed?
//!
//! The [`HistoryProvider`] trait is the seam between the header rewriter and
//! git. Two implementations ship with the crate:
//! - [`GitCliHistory`] runs `git log` as a subprocess (the default)
//! - [`LibGit2History`](crate::git::LibGit2History) walks the history in-process
//!   with libgit2
//!
//! Tests supply their own provider with canned timestamps.

mod git_cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
pub use git_cli::GitCliHistory;
use thiserror::Error;

use crate::git::LibGit2History;

/// Format used for every timestamp written into a banner.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors produced while looking up the history of a single file.
#[derive(Debug, Error)]
pub enum HistoryError {
  /// The `git` executable could not be started.
  #[error("failed to run git: {0}")]
  Spawn(#[source] std::io::Error),

  /// `git` ran but exited unsuccessfully (e.g. not inside a repository).
  #[error("git {args} exited with {status}: {stderr}")]
  CommandFailed { args: String, status: String, stderr: String },

  /// The file has no committed history (untracked or only staged).
  #[error("no commit history found for {}", .0.display())]
  NoHistory(PathBuf),

  /// A log line could not be parsed as a timestamp.
  #[error("malformed timestamp {value:?} in git output")]
  MalformedTimestamp {
    value: String,
    #[source]
    source: chrono::ParseError,
  },

  /// libgit2 reported an error while opening or walking the repository.
  #[error(transparent)]
  Repository(#[from] git2::Error),
}

/// Created and last-modified timestamps of one file, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHistory {
  /// `YYYY-MM-DD HH:MM:SS` of the commit that added the file, in its own offset
  pub created: String,
  /// `YYYY-MM-DD HH:MM:SS` of the latest commit touching the file, in its own offset
  pub last_modified: String,
  /// Four-digit year of `created`
  pub created_year: String,
}

impl FileHistory {
  /// Builds a record from two commit timestamps.
  ///
  /// Each time is formatted in the offset recorded with its commit, so the
  /// result does not depend on the time zone of the machine running the tool.
  pub fn from_times(created: &DateTime<FixedOffset>, last_modified: &DateTime<FixedOffset>) -> Self {
    Self {
      created: created.format(TIMESTAMP_FORMAT).to_string(),
      last_modified: last_modified.format(TIMESTAMP_FORMAT).to_string(),
      created_year: created.format("%Y").to_string(),
    }
  }
}

/// Source of creation and modification dates for files.
pub trait HistoryProvider {
  /// Looks up the history of `path`.
  ///
  /// # Errors
  ///
  /// Returns a [`HistoryError`] when the file has no history or the
  /// version-control backend fails.
  fn lookup(&self, path: &Path) -> Result<FileHistory, HistoryError>;
}

/// Parses one strict ISO 8601 (`%aI` / `%cI`) timestamp from `git log`.
pub fn parse_git_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, HistoryError> {
  let value = raw.trim();
  DateTime::parse_from_rfc3339(value).map_err(|source| HistoryError::MalformedTimestamp {
    value: value.to_string(),
    source,
  })
}

/// Backend used to read file history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum HistoryBackend {
  /// Run the `git` executable found on PATH
  #[default]
  Cli,
  /// Read the repository in-process with libgit2
  Libgit2,
}

/// Creates the provider for `backend`, rooted at `base_dir`.
pub fn create_provider(backend: HistoryBackend, base_dir: &Path) -> Result<Box<dyn HistoryProvider>> {
  let provider: Box<dyn HistoryProvider> = match backend {
    HistoryBackend::Cli => Box::new(GitCliHistory::new(base_dir)?),
    HistoryBackend::Libgit2 => Box::new(LibGit2History::new(base_dir)?),
  };
  Ok(provider)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_git_timestamp() {
    let parsed = parse_git_timestamp("2023-04-05T06:07:08+02:00\n").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2023-04-05T06:07:08+02:00");
  }

  #[test]
  fn test_parse_empty_timestamp_fails() {
    let err = parse_git_timestamp("").unwrap_err();
    assert!(matches!(err, HistoryError::MalformedTimestamp { .. }));
  }

  #[test]
  fn test_parse_garbage_timestamp_fails() {
    let err = parse_git_timestamp("Invalid Date").unwrap_err();
    assert!(err.to_string().contains("Invalid Date"));
  }

  #[test]
  fn test_from_times_keeps_commit_offset() {
    let created = DateTime::parse_from_rfc3339("2021-12-31T23:30:00+09:00").unwrap();
    let modified = DateTime::parse_from_rfc3339("2022-06-07T08:09:10-05:00").unwrap();

    let history = FileHistory::from_times(&created, &modified);

    assert_eq!(history.created, "2021-12-31 23:30:00");
    assert_eq!(history.last_modified, "2022-06-07 08:09:10");
    assert_eq!(history.created_year, "2021");
  }
}
