//! `git log` subprocess backend.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, trace};

use super::{FileHistory, HistoryError, HistoryProvider, parse_git_timestamp};

/// History provider that shells out to `git log`.
///
/// Each lookup runs two blocking subprocesses with the base directory as the
/// working directory:
/// - `git log --diff-filter=A --format=%aI -- <path>`, whose last line (the
///   oldest commit that added the file) gives the creation date
/// - `git log -1 --format=%cI -- <path>`, the latest commit touching the file
pub struct GitCliHistory {
  base_dir: PathBuf,
  program: PathBuf,
}

impl GitCliHistory {
  /// Creates a provider that runs `git` from PATH inside `base_dir`.
  pub fn new(base_dir: &Path) -> Result<Self> {
    Self::with_program(base_dir, "git")
  }

  /// Creates a provider that runs a specific git executable.
  pub fn with_program(base_dir: &Path, program: impl Into<PathBuf>) -> Result<Self> {
    let base_dir = std::path::absolute(base_dir)
      .with_context(|| format!("Failed to resolve base directory: {}", base_dir.display()))?;
    Ok(Self {
      base_dir,
      program: program.into(),
    })
  }

  /// Path handed to git: relative to the base directory when possible.
  fn git_path(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      pathdiff::diff_paths(path, &self.base_dir).unwrap_or_else(|| path.to_path_buf())
    } else {
      path.to_path_buf()
    }
  }

  fn run_git(&self, args: &[&str], path: &Path) -> Result<String, HistoryError> {
    trace!("Running {} {:?} -- {}", self.program.display(), args, path.display());

    let output = Command::new(&self.program)
      .args(args)
      .arg("--")
      .arg(path)
      .current_dir(&self.base_dir)
      .stdin(Stdio::null())
      .output()
      .map_err(HistoryError::Spawn)?;

    if !output.status.success() {
      return Err(HistoryError::CommandFailed {
        args: args.join(" "),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}

impl HistoryProvider for GitCliHistory {
  fn lookup(&self, path: &Path) -> Result<FileHistory, HistoryError> {
    let git_path = self.git_path(path);

    let added = self.run_git(&["log", "--diff-filter=A", "--format=%aI"], &git_path)?;
    let Some(created_line) = added.lines().rev().find(|line| !line.trim().is_empty()) else {
      return Err(HistoryError::NoHistory(git_path));
    };

    let latest = self.run_git(&["log", "-1", "--format=%cI"], &git_path)?;
    let Some(modified_line) = latest.lines().find(|line| !line.trim().is_empty()) else {
      return Err(HistoryError::NoHistory(git_path));
    };

    let created = parse_git_timestamp(created_line)?;
    let last_modified = parse_git_timestamp(modified_line)?;
    debug!("History for {}: added {}, modified {}", git_path.display(), created, last_modified);

    Ok(FileHistory::from_times(&created, &last_modified))
  }
}
