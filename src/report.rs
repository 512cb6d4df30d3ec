use colored::Colorize;

use crate::probe::{ProbeOutcome, Target, TargetKind};

/// Print a warning to stderr. stdout is reserved for the verdict.
pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// One verbose line per probe, e.g. `  changed  dir  src/`.
pub fn probe_line(target: &Target, outcome: &ProbeOutcome) {
    eprintln!("{}", format_probe_line(target, outcome));
}

fn format_probe_line(target: &Target, outcome: &ProbeOutcome) -> String {
    let kind = match target.kind {
        TargetKind::File => "file",
        TargetKind::Dir => "dir ",
    };
    let label = match outcome {
        ProbeOutcome::Changed(_) => "changed".green(),
        ProbeOutcome::Unchanged => "clean  ".dimmed(),
        ProbeOutcome::Failed(_) => "failed ".red(),
    };
    format!("  {}  {}  {}", label, kind, target)
}
