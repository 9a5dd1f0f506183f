//! # Logging Module
//!
//! This module provides logging utilities for copyright-updater, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Tracing subscriber setup driven by `-v`/`-q` and `RUST_LOG`
//!
//! Verbose logs go to stderr and info logs go to stdout, so the progress
//! lines and summary stay on stdout for piping.
//!
//! ## Example
//!
//! ```rust
//! use copyright_updater::logging::{ColorMode, set_verbose};
//! use copyright_updater::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! // Goes to stderr
//! verbose_log!("Looking up history for: {}", "src/app.ts");
//!
//! // Goes to stdout
//! info_log!("Banner written to: {}", "src/app.ts");
//! ```

mod modes;

pub use modes::{ColorMode, default_directive, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message in yellow when the terminal supports it.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
