//! # Output Module
//!
//! This module centralizes all user-facing output for copyright-updater.
//!
//! - Progress lines and the summary go to stdout and are silenced by `-q`.
//! - Per-file errors go to stderr and are always printed.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::RunReport;
use crate::templates::BannerTemplate;

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the `Processing <path>` progress line for one file.
pub fn print_processing(path: &Path) {
  if is_quiet() {
    return;
  }

  println!("Processing {}", path.display());
}

/// Print one failed file to stderr with its full error chain.
pub fn print_failure(path: &Path, error: &anyhow::Error) {
  eprintln!(
    "{} Error processing {}: {:#}",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    path.display(),
    error
  );
}

/// Print the note shown before a dry run.
pub fn print_dry_run_notice() {
  if is_quiet() {
    return;
  }

  println!(
    "{}",
    "Dry run: no files will be modified.".if_supports_color(Stream::Stdout, |s| s.yellow())
  );
}

/// Print the final summary.
///
/// Format:
/// ```text
/// Processed 3 files.
/// Success: 2, Failure: 1
/// ```
/// In verbose mode, also shows timing.
pub fn print_summary(report: &RunReport) {
  if is_quiet() {
    return;
  }

  println!("Processed {} files.", report.total());

  let failure_count = report.failure_count();
  let failure_str = if failure_count > 0 {
    failure_count.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    failure_count.to_string()
  };
  let mut summary_line = format!(
    "Success: {}, Failure: {}",
    report.success_count().if_supports_color(Stream::Stdout, |s| s.green()),
    failure_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", report.elapsed_secs));
  }

  println!("{}", summary_line);
}

/// Print the built-in templates, marking the one currently selected.
pub fn print_templates(templates: &[BannerTemplate], selected: usize) {
  for (index, template) in templates.iter().enumerate() {
    let marker = if index == selected {
      symbols::SUCCESS
        .if_supports_color(Stream::Stdout, |s| s.green())
        .to_string()
    } else {
      " ".to_string()
    };
    println!("{} [{}] {}", marker, index, template.name.if_supports_color(Stream::Stdout, |s| s.bold()));
    print!("{}", template.text);
  }
}
