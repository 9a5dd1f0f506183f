//! # Git Module
//!
//! In-process access to git repositories through libgit2: repository
//! discovery and the [`LibGit2History`] history backend.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use git2::{Commit, Oid, Repository, Sort};
use tracing::{debug, trace};

use crate::history::{FileHistory, HistoryError, HistoryProvider};

/// Finds the root of the git repository containing `path`, if any.
pub fn discover_repo_root(path: &Path) -> Result<Option<PathBuf>> {
  match Repository::discover(path) {
    Ok(repo) => Ok(repo.workdir().map(Path::to_path_buf)),
    Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
    Err(e) => Err(e).with_context(|| format!("Failed to open git repository at {}", path.display())),
  }
}

/// History provider that walks commits with libgit2 instead of spawning git.
///
/// Walks every commit reachable from `HEAD`, newest first. A commit whose
/// tree entry for the path matches any of its parents did not touch the file
/// and is skipped, so merges that only carry a branch's change are ignored.
/// Of the remaining commits:
/// - the newest gives the last-modified date (committer time)
/// - the oldest one where the path exists but is absent from every parent
///   gives the created date (author time)
///
/// The repository is opened on every lookup, so a missing repository is a
/// per-file failure just like with the subprocess backend.
pub struct LibGit2History {
  base_dir: PathBuf,
}

impl LibGit2History {
  /// Creates a provider rooted at `base_dir`.
  pub fn new(base_dir: &Path) -> Result<Self> {
    let base_dir = std::path::absolute(base_dir)
      .with_context(|| format!("Failed to resolve base directory: {}", base_dir.display()))?;
    Ok(Self { base_dir })
  }

  /// Resolves `path` to a path relative to the repository work tree.
  fn repo_relative(&self, repo: &Repository, path: &Path) -> Result<PathBuf, HistoryError> {
    let absolute = if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.base_dir.join(path)
    };

    let Some(workdir) = repo.workdir() else {
      return Err(HistoryError::NoHistory(absolute));
    };

    // Canonicalize both sides so symlinked temp dirs line up with libgit2's view.
    let workdir = workdir.canonicalize().unwrap_or_else(|_| workdir.to_path_buf());
    let file = absolute.canonicalize().unwrap_or_else(|_| absolute.clone());

    file
      .strip_prefix(&workdir)
      .map(Path::to_path_buf)
      .map_err(|_| HistoryError::NoHistory(absolute))
  }
}

fn entry_id(commit: &Commit<'_>, path: &Path) -> Result<Option<Oid>, git2::Error> {
  let tree = commit.tree()?;
  match tree.get_path(path) {
    Ok(entry) => Ok(Some(entry.id())),
    Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
    Err(e) => Err(e),
  }
}

fn to_datetime(time: git2::Time) -> Option<DateTime<FixedOffset>> {
  let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
  DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}

impl HistoryProvider for LibGit2History {
  fn lookup(&self, path: &Path) -> Result<FileHistory, HistoryError> {
    let repo = Repository::discover(&self.base_dir)?;
    let relative = self.repo_relative(&repo, path)?;
    trace!("Walking history for {}", relative.display());

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    revwalk.push_head()?;

    let mut last_modified = None;
    let mut created = None;

    for oid in revwalk {
      let commit = repo.find_commit(oid?)?;
      let current = entry_id(&commit, &relative)?;
      let parents = commit
        .parents()
        .map(|parent| entry_id(&parent, &relative))
        .collect::<Result<Vec<_>, _>>()?;

      let touched = if parents.is_empty() {
        current.is_some()
      } else {
        !parents.contains(&current)
      };
      if !touched {
        continue;
      }

      if last_modified.is_none() {
        last_modified = to_datetime(commit.committer().when());
      }
      if current.is_some() && parents.iter().all(Option::is_none) {
        created = to_datetime(commit.author().when());
      }
    }

    match (created, last_modified) {
      (Some(created), Some(last_modified)) => {
        debug!("History for {}: added {}, modified {}", relative.display(), created, last_modified);
        Ok(FileHistory::from_times(&created, &last_modified))
      }
      _ => Err(HistoryError::NoHistory(relative)),
    }
  }
}
