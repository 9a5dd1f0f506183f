//! # copyright-updater
//!
//! A tool that rewrites the leading `/** ... */` block comment of source files
//! with a generated copyright banner, taking the created and last-modified
//! dates of each file from its git history.
//!
//! `copyright-updater` modifies files in place. For every file under the base
//! directory whose extension is in the allow-list it:
//!
//! * looks up when the file was added and last changed
//! * removes the first existing `/** ... */` block and all blank lines
//! * prepends the rendered banner and writes the file back
//!
//! Running it twice leaves a single, refreshed banner at the top of each file.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use copyright_updater::file_filter::ExtensionFilter;
//! use copyright_updater::history::GitCliHistory;
//! use copyright_updater::processor::{Processor, ProcessorConfig};
//! use copyright_updater::templates::TemplateManager;
//!
//! fn main() -> anyhow::Result<()> {
//!     let base = PathBuf::from("src");
//!     let processor = Processor::new(ProcessorConfig::new(
//!         base.clone(),
//!         ExtensionFilter::parse(".ts,.tsx"),
//!         TemplateManager::new("Leon", "youremail@domain.com", 1),
//!         Box::new(GitCliHistory::new(Path::new("src"))?),
//!     ));
//!
//!     let report = processor.run()?;
//!     println!("Success: {}, Failure: {}", report.success_count(), report.failure_count());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Directory walk and per-file banner rewrite
//! * [`history`] - Created/modified dates from git
//! * [`templates`] - Built-in banner templates
//! * [`report`] - Outcome of a run
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod diff;
pub mod file_filter;
pub mod git;
pub mod history;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
