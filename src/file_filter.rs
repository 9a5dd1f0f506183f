//! # File Filter Module
//!
//! This module decides which walked entries are handed to the header
//! rewriter: files by extension allow-list, directories by name.

use std::collections::BTreeSet;
use std::path::Path;

/// Version-control metadata directories that are never descended into.
pub const VCS_DIRS: [&str; 3] = [".git", ".hg", ".svn"];

/// Result of a file filtering operation.
#[derive(Debug, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Allow-list of file extensions, each including its leading dot.
///
/// Matching is exact and case-sensitive: `.ts` matches `a.ts` and `a.d.ts`
/// but not `a.TS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
  allowed: BTreeSet<String>,
}

impl ExtensionFilter {
  /// Creates a filter from individual extensions such as `".ts"`.
  pub fn new<I, S>(extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let allowed = extensions
      .into_iter()
      .map(|ext| ext.as_ref().trim().to_string())
      .filter(|ext| !ext.is_empty())
      .collect();
    Self { allowed }
  }

  /// Parses a comma-separated list such as `".tsx,.ts,.js"`.
  pub fn parse(list: &str) -> Self {
    Self::new(list.split(','))
  }

  /// The configured extensions in sorted order.
  pub fn extensions(&self) -> impl Iterator<Item = &str> {
    self.allowed.iter().map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.allowed.is_empty()
  }

  /// Checks whether `path` has an allowed extension.
  pub fn should_process(&self, path: &Path) -> FilterResult {
    match extension_with_dot(path) {
      Some(ext) if self.allowed.contains(&ext) => FilterResult::process(),
      Some(ext) => FilterResult::skip(format!("Extension {ext} is not in the allow-list")),
      None => FilterResult::skip("No file extension"),
    }
  }
}

/// Returns the extension of `path` including the leading dot.
///
/// Dotfiles without a further extension (`.eslintrc`) have none.
pub fn extension_with_dot(path: &Path) -> Option<String> {
  path.extension().map(|ext| format!(".{}", ext.to_string_lossy()))
}

/// Checks whether a directory name is a version-control metadata directory.
pub fn is_vcs_dir(name: &str) -> bool {
  VCS_DIRS.contains(&name)
}
