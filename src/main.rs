//! # copyright-updater
//!
//! Rewrites the leading `/** */` banner of source files using dates from git
//! history.

use anyhow::Result;
use copyright_updater::cli::{Cli, run_update};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_update(cli.run_args)
}
