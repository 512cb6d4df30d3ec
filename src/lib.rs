//! Crate entry point for **need-build**.
//!
//! This library answers one question for CI scripts: do any of the
//! configured files or directories have pending changes? Each submodule
//! encapsulates one responsibility (config parsing, path handling, change
//! probes, the detector fold, stderr reporting).
//!
//! This file is primarily intended for developers hacking on `need-build`.

mod config;
mod detect;
mod paths;
mod probe;
mod report;

use anyhow::Result;
use std::path::PathBuf;

pub use config::{Backend, Config, ProbeSettings, Targets, load_config, parse_config};
pub use detect::{DetectOptions, FailurePolicy, Verdict, detect};
pub use probe::{CommandProbe, Git2Probe, Probe, ProbeOutcome, Target, TargetKind, build_probe};

/// Inputs to [`cmd_check`], usually filled from the command line.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub config: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub backend: Option<Backend>,
    pub strict: bool,
    pub verbose: bool,
}

/// CLI command: decide whether anything needs a rebuild.
///
/// 1. Load `args.config` if given, otherwise use the built-in targets.
/// 2. Resolve the working directory (`args.dir` or the cwd).
/// 3. Build the selected probe backend and fold the targets into a [`Verdict`].
///
/// The caller prints the verdict; this function writes only diagnostics.
///
/// # Errors
/// - Returns an error if the config cannot be loaded or the directory is missing.
/// - Returns an error if a probe fails and strict mode is on.
pub fn cmd_check(args: &CheckArgs) -> Result<Verdict> {
    let mut cfg = match &args.config {
        Some(p) => load_config(p)?,
        None => Config::default(),
    };
    if let Some(b) = args.backend {
        cfg.probe.backend = b;
    }

    let work_dir = paths::work_dir(args.dir.as_deref())?;
    let probe = build_probe(&cfg.probe, &work_dir)?;

    let opts = DetectOptions {
        policy: FailurePolicy::from_strict(args.strict || cfg.probe.strict),
        verbose: args.verbose,
    };
    detect(&cfg.targets(), probe.as_ref(), opts)
}
