mod common;

use std::path::Path;

use anyhow::Result;
use common::{banner_date, git_add_and_commit_at, git_merge_at, init_git_repo, is_git_available, run_git, write_file};
use copyright_updater::git::{LibGit2History, discover_repo_root};
use copyright_updater::history::{GitCliHistory, HistoryBackend, HistoryError, HistoryProvider, create_provider};
use tempfile::tempdir;

const ADDED: &str = "2021-03-04T05:06:07+00:00";
const CHANGED: &str = "2022-08-09T10:11:12+02:00";

/// Repository with `src/app.ts` added at `ADDED` and changed at `CHANGED`,
/// plus `src/untracked.ts` that was never committed.
fn setup_repo() -> Result<tempfile::TempDir> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  init_git_repo(root)?;

  write_file(root, "src/app.ts", "export const a = 1;\n")?;
  git_add_and_commit_at(root, "src/app.ts", "Add app", ADDED)?;

  write_file(root, "src/app.ts", "export const a = 2;\n")?;
  git_add_and_commit_at(root, "src/app.ts", "Change app", CHANGED)?;

  write_file(root, "src/untracked.ts", "export const u = 1;\n")?;

  Ok(temp_dir)
}

fn providers(base: &Path) -> Result<Vec<(&'static str, Box<dyn HistoryProvider>)>> {
  Ok(vec![
    ("cli", Box::new(GitCliHistory::new(base)?) as Box<dyn HistoryProvider>),
    ("libgit2", Box::new(LibGit2History::new(base)?) as Box<dyn HistoryProvider>),
  ])
}

#[test]
fn test_created_and_modified_dates() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = setup_repo()?;
  let base = temp_dir.path().join("src");

  for (name, provider) in providers(&base)? {
    let history = provider.lookup(&base.join("app.ts"))?;
    assert_eq!(history.created, banner_date(ADDED), "{name}: created date");
    assert_eq!(history.last_modified, banner_date(CHANGED), "{name}: modified date");
    assert_eq!(history.created_year, &banner_date(ADDED)[..4], "{name}: year");
  }

  Ok(())
}

#[test]
fn test_dates_keep_the_commit_offset() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  init_git_repo(root)?;
  write_file(root, "a.ts", "export const a = 1;\n")?;
  git_add_and_commit_at(root, "a.ts", "Add a", "2021-12-31T23:30:00+09:00")?;

  for (name, provider) in providers(root)? {
    let history = provider.lookup(&root.join("a.ts"))?;
    assert_eq!(history.created, "2021-12-31 23:30:00", "{name}: created date");
    assert_eq!(history.last_modified, "2021-12-31 23:30:00", "{name}: modified date");
    assert_eq!(history.created_year, "2021", "{name}: year");
  }

  Ok(())
}

#[test]
fn test_file_added_on_merged_branch() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  init_git_repo(root)?;
  write_file(root, "base.ts", "base\n")?;
  git_add_and_commit_at(root, "base.ts", "Initial", "2020-01-01T00:00:00+00:00")?;

  run_git(root, &["checkout", "-q", "-b", "feature"])?;
  write_file(root, "f.ts", "feature\n")?;
  git_add_and_commit_at(root, "f.ts", "Add f", "2020-02-01T00:00:00+00:00")?;

  run_git(root, &["checkout", "-q", "-"])?;
  write_file(root, "main.ts", "main\n")?;
  git_add_and_commit_at(root, "main.ts", "Add main", "2020-03-01T00:00:00+00:00")?;
  git_merge_at(root, "feature", "Merge feature", "2020-04-01T00:00:00+00:00")?;

  for (name, provider) in providers(root)? {
    let history = provider.lookup(&root.join("f.ts"))?;
    assert_eq!(history.created, "2020-02-01 00:00:00", "{name}: created date");
    assert_eq!(history.last_modified, "2020-02-01 00:00:00", "{name}: modified date");

    let base = provider.lookup(&root.join("base.ts"))?;
    assert_eq!(base.created, "2020-01-01 00:00:00", "{name}: base created date");
    assert_eq!(base.last_modified, "2020-01-01 00:00:00", "{name}: base modified date");
  }

  Ok(())
}

#[test]
fn test_relative_path_is_resolved_against_base() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = setup_repo()?;
  let base = temp_dir.path().join("src");

  for (name, provider) in providers(&base)? {
    let history = provider.lookup(Path::new("app.ts"))?;
    assert_eq!(history.created, banner_date(ADDED), "{name}: created date");
  }

  Ok(())
}

#[test]
fn test_untracked_file_has_no_history() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = setup_repo()?;
  let base = temp_dir.path().join("src");

  for (name, provider) in providers(&base)? {
    let err = provider.lookup(&base.join("untracked.ts")).unwrap_err();
    assert!(matches!(err, HistoryError::NoHistory(_)), "{name}: unexpected error {err}");
  }

  Ok(())
}

#[test]
fn test_lookup_outside_repository_fails() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "lonely.ts", "x\n")?;

  // A temp dir nested inside some other checkout would have history.
  if discover_repo_root(temp_dir.path())?.is_some() {
    println!("Skipping because the temp dir is inside a git repository");
    return Ok(());
  }

  for backend in [HistoryBackend::Cli, HistoryBackend::Libgit2] {
    let provider = create_provider(backend, temp_dir.path())?;
    assert!(provider.lookup(&temp_dir.path().join("lonely.ts")).is_err());
  }

  Ok(())
}

#[test]
fn test_discover_repo_root() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = setup_repo()?;
  let root = discover_repo_root(&temp_dir.path().join("src"))?.expect("repository root");
  assert_eq!(root.canonicalize()?, temp_dir.path().canonicalize()?);

  Ok(())
}
