//! # need-build
//!
//! **need-build** prints `True` when any configured file or directory has
//! pending changes according to git, and `False` otherwise.
//!
//! - With no arguments it checks `src/` using `git diff HEAD -- <path>`
//! - `--config` points at a TOML file with other targets or another backend
//! - `--strict` turns probe failures into errors instead of "unchanged"
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::Parser;
use need_build::{Backend, CheckArgs, cmd_check};
use std::path::PathBuf;

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(
    name = "need-build",
    version,
    about = "need-build - print True if watched paths have pending changes"
)]
struct Cli {
    /// TOML file with `files`, `dirs` and a `[probe]` section
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Run probes in this directory instead of the current one
    #[arg(short = 'C', long, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Override the configured probe backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,
    /// Fail instead of treating a failed probe as unchanged
    #[arg(long)]
    strict: bool,
    /// Report every probe on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// CLI entry point.
///
/// Exits 0 whenever a verdict is printed, whatever its value.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let verdict = cmd_check(&CheckArgs {
        config: cli.config,
        dir: cli.dir,
        backend: cli.backend,
        strict: cli.strict,
        verbose: cli.verbose,
    })?;
    println!("{}", verdict);
    Ok(())
}
