//! # File Collector Module
//!
//! Recursive directory traversal that yields the files matching the
//! extension allow-list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::file_filter::{ExtensionFilter, is_vcs_dir};

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Walking the base directory to any depth
/// - Skipping version-control metadata directories and symlinks
/// - Keeping only files whose extension is in the allow-list
pub struct FileCollector {
  /// Directory the walk starts from
  root: PathBuf,
}

impl FileCollector {
  /// Creates a new FileCollector rooted at `root`.
  pub const fn new(root: PathBuf) -> Self {
    Self { root }
  }

  /// Traverses the root recursively and collects matching files.
  ///
  /// The root is made absolute first, so every returned path is absolute.
  /// Entries are sorted by file name within each directory, so the result
  /// is deterministic.
  ///
  /// # Errors
  ///
  /// Returns an error if the root or any directory below it cannot be read.
  pub fn traverse_directory(&self, filter: &ExtensionFilter) -> Result<Vec<PathBuf>> {
    let root = std::path::absolute(&self.root)
      .with_context(|| format!("Failed to resolve base path: {}", self.root.display()))?;
    debug!("Scanning directory: {}", root.display());
    let start_time = std::time::Instant::now();

    if !root.is_dir() {
      anyhow::bail!("Base path is not a directory: {}", root.display());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(&root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
      let entry = entry.with_context(|| format!("Failed to read directory tree under {}", root.display()))?;
      let file_type = entry.file_type();

      if file_type.is_symlink() {
        trace!("Skipping: {} (symlink)", entry.path().display());
        continue;
      }
      if !file_type.is_file() {
        continue;
      }

      let result = filter.should_process(entry.path());
      if result.should_process {
        files.push(entry.into_path());
      } else {
        let reason = result.reason.as_deref().unwrap_or("Unknown reason");
        trace!("Skipping: {} ({})", entry.path().display(), reason);
      }
    }

    debug!(
      "Found {} matching files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }
}

/// Version-control metadata directories below the root are pruned.
fn is_skipped_dir(entry: &DirEntry) -> bool {
  entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name().to_str().is_some_and(is_vcs_dir)
}
