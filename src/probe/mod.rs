//! Change inspection backends.
//!
//! A [`Probe`] inspects one [`Target`] and reports a structured
//! [`ProbeOutcome`]. The detector only ever talks to this trait, so the
//! external-command backend and the `git2` backend are interchangeable and
//! tests can substitute their own.

mod command;
mod git2_backend;

use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::config::{Backend, ProbeSettings};

pub use command::CommandProbe;
pub use git2_backend::Git2Probe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    Dir,
}

/// One configured path, tagged with the list it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: String,
    pub kind: TargetKind,
}

impl Target {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: TargetKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: TargetKind::Dir,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Result of inspecting one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Nothing pending.
    Unchanged,
    /// Pending changes; carries whatever the backend reported.
    Changed(String),
    /// The inspection itself did not succeed.
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, ProbeOutcome::Changed(_))
    }
}

pub trait Probe {
    fn probe(&self, target: &Target) -> ProbeOutcome;
}

impl<P: Probe + ?Sized> Probe for &P {
    fn probe(&self, target: &Target) -> ProbeOutcome {
        (**self).probe(target)
    }
}

/// Build the backend selected in `settings`, rooted at `work_dir`.
///
/// # Errors
/// Returns an error if the command backend is configured without a program.
pub fn build_probe(settings: &ProbeSettings, work_dir: &Path) -> Result<Box<dyn Probe>> {
    Ok(match settings.backend {
        Backend::Command => Box::new(CommandProbe::new(&settings.command, work_dir)?),
        Backend::Git2 => Box::new(Git2Probe::new(work_dir)),
    })
}
