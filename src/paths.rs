use anyhow::{Context, Result, anyhow};
use std::path::{Component, Path, PathBuf};
use std::{env, fs};

/// Resolve the directory probes run in: `dir` if given, otherwise the cwd.
///
/// The result is canonicalized so that later prefix checks against a
/// repository workdir compare like with like.
pub fn work_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let base = match dir {
        Some(d) => d.to_path_buf(),
        None => env::current_dir().context("cannot read current directory")?,
    };
    fs::canonicalize(&base).with_context(|| format!("no such directory: {}", base.display()))
}

/// Turn a target (relative to `work_dir`) into a pathspec relative to the
/// repository workdir `repo_root`.
///
/// The target need not exist. `.` and `..` are folded lexically, trailing
/// separators are dropped, and the repository root itself maps to `""`
/// (which matches everything).
///
/// # Errors
/// Returns an error if the target lies outside `repo_root`.
pub fn pathspec_for(work_dir: &Path, repo_root: &Path, target: &str) -> Result<String> {
    let joined = normalize(&work_dir.join(target));
    let root = normalize(repo_root);
    let rel = joined
        .strip_prefix(&root)
        .map_err(|_| anyhow!("{} is outside the repository at {}", target, root.display()))?;

    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Lexical normalization: drop `.` and resolve `..` against earlier parts.
fn normalize(p: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in p.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
