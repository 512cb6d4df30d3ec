use anyhow::{Result, bail};
use std::fmt;

use crate::config::Targets;
use crate::probe::{Probe, ProbeOutcome, Target};
use crate::report;

/// Final answer: does any target have pending changes?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict(pub bool);

/// Prints `True` / `False`, the format consumers of the tool match on.
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "True" } else { "False" })
    }
}

/// How a [`ProbeOutcome::Failed`] affects the scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Warn on stderr and count the target as unchanged.
    #[default]
    Lenient,
    /// Abort the scan with an error.
    Strict,
}

impl FailurePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Lenient
        }
    }
}

/// Options that only affect diagnostics, never the verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectOptions {
    pub policy: FailurePolicy,
    pub verbose: bool,
}

/// Probe files, then directories, stopping at the first change.
///
/// Empty target lists yield `Verdict(false)`.
///
/// # Errors
/// Only under [`FailurePolicy::Strict`], when a probe fails.
pub fn detect<P: Probe>(targets: &Targets, probe: P, opts: DetectOptions) -> Result<Verdict> {
    let files = targets.files.iter().map(Target::file);
    let dirs = targets.dirs.iter().map(Target::dir);

    for target in files.chain(dirs) {
        let outcome = probe.probe(&target);
        if opts.verbose {
            report::probe_line(&target, &outcome);
        }
        match outcome {
            ProbeOutcome::Changed(_) => return Ok(Verdict(true)),
            ProbeOutcome::Unchanged => {}
            ProbeOutcome::Failed(reason) => match opts.policy {
                FailurePolicy::Strict => bail!("probe failed for {}: {}", target, reason),
                FailurePolicy::Lenient => {
                    report::warn(&format!("treating {} as unchanged: {}", target, reason));
                }
            },
        }
    }
    Ok(Verdict(false))
}
