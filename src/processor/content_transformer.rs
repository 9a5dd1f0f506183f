//! # Content Transformer Module
//!
//! Pure text transformations behind the header rewrite: removing an existing
//! `/** ... */` block comment, dropping whitespace-only lines, and prepending
//! the rendered banner. Nothing here touches the filesystem.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// First `/**` up to the first following `*/`, across lines.
static BLOCK_COMMENT_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)/\*\*.*?\*/").expect("block comment regex must compile"));

/// A line holding only whitespace, together with its newline. Because `\s`
/// also matches newlines, runs of blank lines go in a single match.
static BLANK_LINE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^\s*\n").expect("blank line regex must compile"));

/// Removes the first `/** ... */` block comment from `content`.
///
/// The match is not anchored: the first such block anywhere in the file is
/// removed. Returns the remaining content and whether a comment was found.
pub fn strip_block_comment(content: &str) -> (Cow<'_, str>, bool) {
  match BLOCK_COMMENT_REGEX.find(content) {
    Some(found) => {
      let mut stripped = String::with_capacity(content.len() - found.len());
      stripped.push_str(&content[..found.start()]);
      stripped.push_str(&content[found.end()..]);
      (Cow::Owned(stripped), true)
    }
    None => (Cow::Borrowed(content), false),
  }
}

/// Removes every empty or whitespace-only line from `content`.
///
/// This applies to the whole body, not only leading lines. A final line
/// without a trailing newline is kept even if it is blank.
pub fn strip_blank_lines(content: &str) -> Cow<'_, str> {
  BLANK_LINE_REGEX.replace_all(content, "")
}

/// Output of [`rewrite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
  /// New file content: banner followed by the cleaned body
  pub content: String,
  /// Whether an existing block comment was removed
  pub replaced_comment: bool,
}

/// Builds the new file content from the old content and a rendered banner.
pub fn rewrite(content: &str, banner: &str) -> Rewritten {
  let (body, replaced_comment) = strip_block_comment(content);
  let body = strip_blank_lines(&body);

  let mut new_content = String::with_capacity(banner.len() + body.len());
  new_content.push_str(banner);
  new_content.push_str(&body);

  Rewritten {
    content: new_content,
    replaced_comment,
  }
}
