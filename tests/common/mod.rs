#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use chrono::DateTime;

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr on
/// failure.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  run_git_with_env(dir, args, &[])
}

pub fn run_git_with_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .envs(env.iter().copied())
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
///
/// Configures:
/// - User name and email for commits
/// - Disables commit signing for test isolation
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init", "-q"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  Ok(())
}

/// Stages `file` and commits it with both author and committer date set to
/// `date` (RFC 3339).
pub fn git_add_and_commit_at(dir: &Path, file: &str, message: &str, date: &str) -> Result<()> {
  run_git(dir, &["add", file])?;
  run_git_with_env(
    dir,
    &["commit", "-q", "-m", message],
    &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
  )
}

/// Merges `branch` into the current branch with a merge commit dated `date`.
pub fn git_merge_at(dir: &Path, branch: &str, message: &str, date: &str) -> Result<()> {
  run_git_with_env(
    dir,
    &["merge", "--no-ff", "--no-edit", "-q", "-m", message, branch],
    &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
  )
}

/// Writes `content` to `dir/file`, creating parent directories.
pub fn write_file(dir: &Path, file: &str, content: &str) -> Result<()> {
  let path = dir.join(file);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Formats an RFC 3339 date the way banners show it (in the date's own offset).
pub fn banner_date(date: &str) -> String {
  DateTime::parse_from_rfc3339(date)
    .expect("valid RFC 3339 date in test")
    .format("%Y-%m-%d %H:%M:%S")
    .to_string()
}
