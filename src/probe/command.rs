use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{Probe, ProbeOutcome, Target};

/// Runs `<program> <args...> <target>` in the working directory and treats
/// any stdout from a successful run as a pending change.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
    work_dir: PathBuf,
}

impl CommandProbe {
    /// # Errors
    /// Returns an error if `argv` is empty.
    pub fn new(argv: &[String], work_dir: &Path) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow!("probe command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            work_dir: work_dir.to_path_buf(),
        })
    }

    fn display(&self, target: &Target) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(&target.path);
        parts.join(" ")
    }
}

impl Probe for CommandProbe {
    fn probe(&self, target: &Target) -> ProbeOutcome {
        let out = Command::new(&self.program)
            .args(&self.args)
            .arg(&target.path)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output();

        let out = match out {
            Ok(o) => o,
            Err(e) => {
                return ProbeOutcome::Failed(format!("failed to run {}: {}", self.program, e));
            }
        };

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let stderr = stderr.trim();
            let reason = if stderr.is_empty() {
                format!("`{}` exited with {}", self.display(target), out.status)
            } else {
                format!("`{}` exited with {}: {}", self.display(target), out.status, stderr)
            };
            return ProbeOutcome::Failed(reason);
        }

        if out.stdout.is_empty() {
            ProbeOutcome::Unchanged
        } else {
            ProbeOutcome::Changed(String::from_utf8_lossy(&out.stdout).into_owned())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_argv_is_rejected() {
        let td = tempdir().unwrap();
        assert!(CommandProbe::new(&[], td.path()).is_err());
    }

    #[test]
    fn silent_success_is_unchanged() {
        let td = tempdir().unwrap();
        let p = CommandProbe::new(&argv(&["true"]), td.path()).unwrap();
        assert_eq!(p.probe(&Target::file("a.txt")), ProbeOutcome::Unchanged);
    }

    #[test]
    fn any_stdout_is_changed() {
        let td = tempdir().unwrap();
        let p = CommandProbe::new(&argv(&["echo", "diff"]), td.path()).unwrap();
        assert_eq!(
            p.probe(&Target::dir("src/")),
            ProbeOutcome::Changed("diff src/\n".to_string())
        );
    }

    #[test]
    fn nonzero_exit_is_failed_with_stderr() {
        let td = tempdir().unwrap();
        let p = CommandProbe::new(&argv(&["cat"]), td.path()).unwrap();
        match p.probe(&Target::file("missing.txt")) {
            ProbeOutcome::Failed(reason) => {
                assert!(reason.contains("cat missing.txt"), "{reason}");
                assert!(reason.contains("missing.txt"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn unknown_program_is_failed() {
        let td = tempdir().unwrap();
        let p = CommandProbe::new(&argv(&["no-such-program-need-build"]), td.path()).unwrap();
        assert!(matches!(
            p.probe(&Target::file("a")),
            ProbeOutcome::Failed(r) if r.contains("no-such-program-need-build")
        ));
    }

    #[test]
    fn runs_in_work_dir() {
        let td = tempdir().unwrap();
        std::fs::write(td.path().join("note.txt"), "hello").unwrap();
        let p = CommandProbe::new(&argv(&["cat"]), td.path()).unwrap();
        assert_eq!(
            p.probe(&Target::file("note.txt")),
            ProbeOutcome::Changed("hello".to_string())
        );
    }
}
