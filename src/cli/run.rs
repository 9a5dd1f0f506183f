//! # Run Command
//!
//! This module implements the banner rewrite run: argument handling, setup of
//! the processor and its collaborators, and the final summary.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Args;
use tracing::{debug, warn};

use crate::diff::DiffManager;
use crate::file_filter::ExtensionFilter;
use crate::git::discover_repo_root;
use crate::history::{HistoryBackend, create_provider};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_dry_run_notice, print_summary, print_templates};
use crate::processor::{Processor, ProcessorConfig};
use crate::templates::TemplateManager;
use crate::{info_log, verbose_log};

/// Arguments for a run.
///
/// The five positionals are the run parameters; everything else only changes
/// how the run is reported.
#[derive(Args, Debug)]
pub struct RunArgs {
  /// Directory to process recursively
  #[arg(default_value = "src")]
  pub base_path: PathBuf,

  /// Author name baked into the banner
  #[arg(default_value = "Leon")]
  pub author: String,

  /// Email address baked into the banner
  #[arg(default_value = "youremail@domain.com")]
  pub email: String,

  /// Comma-separated extensions to process, each with its leading dot
  #[arg(default_value = ".tsx,.ts,.js")]
  pub file_types: String,

  /// Built-in template to use; anything that is not a valid index selects
  /// template 0
  #[arg(default_value = "0", allow_hyphen_values = true)]
  pub template_index: String,

  /// Compute the new banners without writing any file
  #[arg(long)]
  pub dry_run: bool,

  /// Print a diff of every change to stderr (with --dry-run)
  #[arg(long, requires = "dry_run")]
  pub show_diff: bool,

  /// How file history is read
  #[arg(long, value_enum, default_value_t = HistoryBackend::Cli)]
  pub history_backend: HistoryBackend,

  /// Write a JSON report of the run to this path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Print the built-in templates and exit
  #[arg(long)]
  pub list_templates: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Parses the template index argument leniently.
///
/// Non-numeric input maps to 0; out-of-range values are left for
/// [`TemplateManager`] to fall back on.
pub fn parse_template_index(raw: &str) -> usize {
  raw.trim().parse().unwrap_or_else(|_| {
    warn!("Template index {raw:?} is not a number, using template 0");
    0
  })
}

/// Run a banner rewrite with the given arguments.
///
/// Exits the process with status 1 when any file failed.
pub fn run_update(args: RunArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let template_index = parse_template_index(&args.template_index);
  let template_manager = TemplateManager::new(&args.author, &args.email, template_index);

  if args.list_templates {
    print_templates(template_manager.templates(), template_manager.selected_index());
    return Ok(());
  }

  let extension_filter = ExtensionFilter::parse(&args.file_types);
  if extension_filter.is_empty() {
    warn!("No file extensions given, nothing will be processed");
  }
  verbose_log!(
    "Allowed extensions: {}",
    extension_filter.extensions().collect::<Vec<_>>().join(", ")
  );

  match discover_repo_root(&args.base_path) {
    Ok(Some(root)) => debug!("Using git repository at {}", root.display()),
    Ok(None) => warn!(
      "{} is not inside a git repository; every file will fail its history lookup",
      args.base_path.display()
    ),
    Err(e) => debug!("Could not probe for a git repository: {e:#}"),
  }

  let history = create_provider(args.history_backend, &args.base_path)?;

  if args.dry_run {
    print_dry_run_notice();
  }

  let processor = Processor::new(ProcessorConfig {
    dry_run: args.dry_run,
    diff_manager: Some(DiffManager::new(args.show_diff)),
    ..ProcessorConfig::new(args.base_path, extension_filter, template_manager, history)
  });

  let report = processor.run()?;

  print_summary(&report);

  if let Some(ref output_path) = args.report_json {
    if let Err(e) = report.write_json(output_path) {
      eprintln!("Error generating JSON report: {e:#}");
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if report.has_failures() {
    process::exit(1);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_template_index() {
    assert_eq!(parse_template_index("0"), 0);
    assert_eq!(parse_template_index(" 1 "), 1);
    assert_eq!(parse_template_index("99"), 99);
    assert_eq!(parse_template_index("abc"), 0);
    assert_eq!(parse_template_index("-1"), 0);
    assert_eq!(parse_template_index(""), 0);
  }
}
