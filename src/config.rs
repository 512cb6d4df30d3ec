use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration loaded from a `need-build` TOML file.
///
/// Every key is optional. A missing file section falls back to the built-in
/// defaults, so an empty file behaves like no file at all.
///
/// Example TOML:
/// ```toml
/// files = ["Cargo.toml"]
/// dirs  = ["src/"]
///
/// [probe]
/// backend = "command"
/// command = ["git", "diff", "HEAD", "--"]
/// strict  = false
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default = "default_dirs")]
    pub dirs: Vec<String>,
    #[serde(default)]
    pub probe: ProbeSettings,
}

impl Config {
    pub fn targets(&self) -> Targets {
        Targets::new(self.files.iter().cloned(), self.dirs.iter().cloned())
    }
}

impl Default for Config {
    fn default() -> Self {
        let targets = Targets::default();
        Self {
            files: targets.files,
            dirs: targets.dirs,
            probe: ProbeSettings::default(),
        }
    }
}

/// The two ordered target lists. Files are probed before directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

impl Targets {
    pub fn new<F, D>(files: F, dirs: D) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            dirs: default_dirs(),
        }
    }
}

fn default_dirs() -> Vec<String> {
    vec!["src/".to_string()]
}

/// Which [`crate::probe::Probe`] implementation inspects the targets.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Run an external command and capture its stdout.
    #[default]
    Command,
    /// Diff HEAD against the index and worktree in-process.
    Git2,
}

/// `[probe]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProbeSettings {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_command")]
    pub command: Vec<String>,
    #[serde(default)]
    pub strict: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            command: default_command(),
            strict: false,
        }
    }
}

fn default_command() -> Vec<String> {
    ["git", "diff", "HEAD", "--"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Parse configuration text.
///
/// # Errors
/// Returns an error on malformed TOML, unknown keys, or an empty `command`.
pub fn parse_config(txt: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(txt).context("failed to parse config")?;
    if cfg.probe.command.is_empty() {
        bail!("probe.command must name a program");
    }
    Ok(cfg)
}

/// Load and parse a config file into a [`Config`].
///
/// # Errors
/// - Returns an error if the file cannot be read (the message includes the path).
/// - Returns an error if [`parse_config`] rejects the contents.
pub fn load_config(path: &Path) -> Result<Config> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("config not found: {}", path.display()))?;
    parse_config(&txt).with_context(|| format!("invalid config: {}", path.display()))
}
