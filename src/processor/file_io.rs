//! # File I/O Module
//!
//! Whole-file reads and in-place writes for the header rewriter.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Reads the complete file as UTF-8 text.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be opened or is not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Overwrites the file with `content`.
  ///
  /// There is no backup and no temporary file; an interrupted write can leave
  /// the file truncated.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
