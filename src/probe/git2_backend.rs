use anyhow::{Context, Result};
use git2::{DiffOptions, Repository, Tree};
use std::path::{Path, PathBuf};

use super::{Probe, ProbeOutcome, Target};
use crate::paths::pathspec_for;

/// In-process backend: diff of HEAD against index + worktree, limited to
/// the target's path. Untracked files are not reported, matching
/// `git diff HEAD`.
///
/// Targets are literal paths: `a[1].txt` names that file only, unlike a
/// command-line pathspec where it would also match `a1.txt`. A directory
/// target covers everything below it.
#[derive(Debug, Clone)]
pub struct Git2Probe {
    work_dir: PathBuf,
}

impl Git2Probe {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
        }
    }

    fn changed_paths(&self, target: &Target) -> Result<Vec<String>> {
        let repo = Repository::discover(&self.work_dir)
            .with_context(|| format!("no git repository at {}", self.work_dir.display()))?;
        let root = repo_root(&repo)?;

        let spec = pathspec_for(&self.work_dir, &root, &target.path)?;

        let mut opts = DiffOptions::new();
        opts.include_untracked(false);
        opts.disable_pathspec_match(true);
        if !spec.is_empty() {
            opts.pathspec(&spec);
        }

        let head = head_tree(&repo)?;
        let diff = repo
            .diff_tree_to_workdir_with_index(head.as_ref(), Some(&mut opts))
            .with_context(|| format!("git diff HEAD -- {}", spec))?;

        Ok(diff
            .deltas()
            .filter_map(|d| {
                d.new_file()
                    .path()
                    .or_else(|| d.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect())
    }
}

/// Canonical worktree root, so it compares with the canonical work dir.
fn repo_root(repo: &Repository) -> Result<PathBuf> {
    let workdir = repo
        .workdir()
        .context("bare repositories have no worktree")?;
    workdir
        .canonicalize()
        .with_context(|| format!("cannot resolve repository workdir {}", workdir.display()))
}

/// HEAD's tree, or `None` on an unborn branch (everything is then new).
fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
        Err(e) => Err(e).context("cannot resolve HEAD"),
    }
}

impl Probe for Git2Probe {
    fn probe(&self, target: &Target) -> ProbeOutcome {
        match self.changed_paths(target) {
            Ok(paths) if paths.is_empty() => ProbeOutcome::Unchanged,
            Ok(paths) => ProbeOutcome::Changed(paths.join("\n")),
            Err(e) => ProbeOutcome::Failed(format!("{:#}", e)),
        }
    }
}
