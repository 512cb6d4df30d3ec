#![allow(dead_code)]

use assert_cmd::Command;
use git2::{Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch git repository with `src/lib.rs` and `README.md` committed.
pub struct TestRepo {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().canonicalize().expect("canonical temp dir");
        let repo = Repository::init(&root).expect("git init");

        fs::create_dir_all(root.join("src")).expect("create src");
        fs::write(root.join("src/lib.rs"), "pub fn a() {}\n").expect("write lib.rs");
        fs::write(root.join("README.md"), "readme\n").expect("write readme");

        let mut index = repo.index().expect("open index");
        index.add_path(Path::new("src/lib.rs")).expect("stage lib.rs");
        index.add_path(Path::new("README.md")).expect("stage readme");
        index.write().expect("write index");
        let tree = repo
            .find_tree(index.write_tree().expect("write tree"))
            .expect("find tree");
        let sig = Signature::now("tester", "tester@example.com").expect("signature");
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
            .expect("commit");

        Self { _tmp: tmp, root }
    }

    pub fn edit(&self, rel: &str, contents: &str) {
        fs::write(self.root.join(rel), contents).expect("edit file");
    }

    /// Write a config file under `.git/` so it never shows up as a change.
    pub fn config(&self, body: &str) -> PathBuf {
        let p = self.root.join(".git").join("need-build.toml");
        fs::write(&p, body).expect("write config");
        p
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("need-build").expect("binary built");
        cmd.arg("-C").arg(&self.root);
        cmd
    }

    /// The binary run from inside the repo with no arguments at all.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("need-build").expect("binary built");
        cmd.current_dir(&self.root);
        cmd
    }
}
