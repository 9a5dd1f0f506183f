//! # Processor Module
//!
//! This module walks a directory tree and rewrites the banner of every file
//! whose extension is in the allow-list.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Block comment removal, blank line removal, banner prepending
//! - [`file_collector`] - Directory traversal and extension filtering
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules together with a [`HistoryProvider`] and the
//! [`TemplateManager`].

pub mod content_transformer;
mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
pub use content_transformer::{Rewritten, rewrite, strip_blank_lines, strip_block_comment};
pub use file_collector::FileCollector;
pub use file_io::FileIO;
use tracing::debug;

use crate::diff::DiffManager;
use crate::file_filter::ExtensionFilter;
use crate::history::HistoryProvider;
use crate::output::{print_failure, print_processing};
use crate::report::{FileSuccess, RunReport};
use crate::templates::{BannerData, TemplateManager};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub base_dir: PathBuf,
  pub extension_filter: ExtensionFilter,
  pub template_manager: TemplateManager,
  pub history: Box<dyn HistoryProvider>,

  /// Compute new content without writing it
  pub dry_run: bool,
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(base_dir, filter, template_manager, history)
  /// }
  /// ```
  pub fn new(
    base_dir: PathBuf,
    extension_filter: ExtensionFilter,
    template_manager: TemplateManager,
    history: Box<dyn HistoryProvider>,
  ) -> Self {
    Self {
      base_dir,
      extension_filter,
      template_manager,
      history,
      dry_run: false,
      diff_manager: None,
    }
  }
}

/// Processor for rewriting file banners.
///
/// The `Processor` is responsible for:
/// - Walking the base directory recursively
/// - Selecting files by extension
/// - Looking up each file's history and rendering its banner
/// - Replacing the existing block comment and writing the file back
/// - Recording every outcome in a [`RunReport`]
pub struct Processor {
  /// Extension allow-list
  extension_filter: ExtensionFilter,

  /// Template manager holding the selected banner
  template_manager: TemplateManager,

  /// Source of created/modified dates
  history: Box<dyn HistoryProvider>,

  /// Whether to skip writing files
  dry_run: bool,

  /// Diff renderer used in dry-run mode
  diff_manager: DiffManager,

  /// File collector for directory traversal
  file_collector: FileCollector,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      extension_filter: config.extension_filter,
      template_manager: config.template_manager,
      history: config.history,
      dry_run: config.dry_run,
      diff_manager: config.diff_manager.unwrap_or_else(|| DiffManager::new(false)),
      file_collector: FileCollector::new(config.base_dir),
    }
  }

  /// Collects the files a run would process, without touching them.
  ///
  /// # Errors
  ///
  /// Returns an error if the directory tree cannot be enumerated.
  pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
    self.file_collector.traverse_directory(&self.extension_filter)
  }

  /// Walks the base directory and rewrites every matching file.
  ///
  /// Files are processed one after another. A failing file is recorded,
  /// reported on stderr, and the walk continues with the next one.
  ///
  /// # Errors
  ///
  /// Returns an error only if the directory tree cannot be enumerated; no
  /// file has been modified in that case.
  pub fn run(&self) -> Result<RunReport> {
    let start_time = Instant::now();
    let files = self.collect_files()?;
    debug!("Processing {} files", files.len());

    let mut report = RunReport::new();
    for path in files {
      print_processing(&path);
      match self.process_file(&path) {
        Ok(success) => report.record_success(success),
        Err(e) => {
          print_failure(&path, &e);
          report.record_failure(&path, &e);
        }
      }
    }

    report.set_elapsed(start_time.elapsed());
    Ok(report)
  }

  /// Rewrites the banner of a single file.
  ///
  /// The history lookup runs before the file is read, so a file without
  /// history is never modified.
  ///
  /// # Errors
  ///
  /// Returns an error if the history lookup fails, the banner cannot be
  /// rendered, or the file cannot be read or written.
  pub fn process_file(&self, path: &Path) -> Result<FileSuccess> {
    let history = self
      .history
      .lookup(path)
      .with_context(|| format!("Failed to look up history for {}", path.display()))?;

    let data = BannerData {
      created_date: history.created,
      last_modified_date: history.last_modified,
      filename: path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default(),
      year: history.created_year,
    };
    let banner = self
      .template_manager
      .render(&data)
      .with_context(|| format!("Failed to render banner for {}", path.display()))?;

    let content = FileIO::read_full_content(path)?;
    let rewritten = rewrite(&content, &banner);

    if self.dry_run {
      self.diff_manager.display_diff(path, &content, &rewritten.content);
    } else {
      FileIO::write_file(path, &rewritten.content)?;
    }

    Ok(FileSuccess {
      path: path.to_path_buf(),
      replaced_comment: rewritten.replaced_comment,
      written: !self.dry_run,
    })
  }
}
