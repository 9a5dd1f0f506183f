//! # Diff Module
//!
//! This module renders line diffs between a file's current content and the
//! content the rewriter would write. It backs `--dry-run --show-diff`.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for banner changes.
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,
}

impl DiffManager {
  /// Creates a new DiffManager.
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Renders a diff between `original` and `new` as plain text.
  ///
  /// The first line names the file; every following line is prefixed with
  /// `-`, `+` or a space.
  pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = format!("Diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      diff_content.push_str(sign);
      diff_content.push_str(change.value());
      if change.missing_newline() {
        diff_content.push('\n');
      }
    }

    diff_content
  }

  /// Prints the diff to stderr if `show_diff` is enabled.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    for line in Self::render_diff(path, original, new).lines() {
      if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
      } else if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
      } else {
        eprintln!("{}", line);
      }
    }
  }
}
