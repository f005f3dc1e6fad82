//! Version-control backend boundary.
//!
//! The search core never talks to git directly; it goes through the
//! [`Backend`] trait so tests can substitute a recording fake with
//! scripted digests. [`GitCli`] is the production implementation: a thin
//! wrapper over the `git` binary with stdin piping for object bytes.
//!
//! Requires `git` on PATH; command failures surface with the failing
//! action and captured stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::errors::BackendError;

/// Narrow interface to the object store of a version-control backend.
pub trait Backend {
    /// Returns the raw serialized bytes of the current head commit, without
    /// loose-object framing (the `git cat-file commit HEAD` form).
    fn read_head_commit(&self) -> Result<Vec<u8>, BackendError>;

    /// Asks the backend to compute the object hash of `body` as a commit,
    /// returning the lowercase hex digest. Used only for the finalize-step
    /// cross-check, never on the hot path.
    fn hash_object(&self, body: &[u8]) -> Result<String, BackendError>;

    /// Replaces the head commit with `body`, atomically from the caller's
    /// perspective. On failure, history is untouched.
    fn rewrite_head(&self, body: &[u8]) -> Result<(), BackendError>;
}

/// Backend implementation that shells out to `git`.
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    /// Targets the repository at `repo` (the working directory for most
    /// callers).
    #[must_use]
    pub fn new(repo: impl AsRef<Path>) -> Self {
        Self {
            repo: repo.as_ref().to_path_buf(),
        }
    }

    /// Reads the configured default pattern (`git config vain.default`).
    ///
    /// Returns `Ok(None)` when the key is unset; git signals that with a
    /// bare exit status 1 and empty stderr.
    pub fn config_default_pattern(&self) -> Result<Option<String>, BackendError> {
        match self.run("config vain.default", &["config", "vain.default"], None) {
            Ok(stdout) => {
                let value = text(&stdout, "config vain.default")?;
                if value.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(value))
                }
            }
            Err(BackendError::CommandFailed {
                status: Some(1),
                stderr,
                ..
            }) if stderr.trim().is_empty() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Runs `git` in the repo, optionally piping `stdin` bytes, and returns
    /// raw stdout on success.
    fn run(
        &self,
        action: &'static str,
        args: &[&str],
        stdin: Option<&[u8]>,
    ) -> Result<Vec<u8>, BackendError> {
        let mut command = Command::new("git");
        command
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = command.spawn().map_err(|e| BackendError::io(action, e))?;
        if let Some(bytes) = stdin {
            // take() drops the handle after the write so the child sees EOF.
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(bytes)
                    .map_err(|e| BackendError::io(action, e))?;
            }
        }
        let output = child
            .wait_with_output()
            .map_err(|e| BackendError::io(action, e))?;
        if !output.status.success() {
            return Err(BackendError::CommandFailed {
                action,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output.stdout)
    }
}

impl Backend for GitCli {
    fn read_head_commit(&self) -> Result<Vec<u8>, BackendError> {
        self.run("cat-file commit HEAD", &["cat-file", "commit", "HEAD"], None)
    }

    fn hash_object(&self, body: &[u8]) -> Result<String, BackendError> {
        let stdout = self.run(
            "hash-object",
            &["hash-object", "-t", "commit", "--stdin"],
            Some(body),
        )?;
        text(&stdout, "hash-object")
    }

    fn rewrite_head(&self, body: &[u8]) -> Result<(), BackendError> {
        // Stage the object before touching any ref: hash-object -w only
        // adds to the object store, so a failure up to this point leaves
        // history untouched.
        let stdout = self.run(
            "hash-object -w",
            &["hash-object", "-t", "commit", "-w", "--stdin"],
            Some(body),
        )?;
        let oid = text(&stdout, "hash-object -w")?;
        // Single ref move, covered by git's own ref transaction.
        self.run("reset --soft <oid>", &["reset", "--soft", &oid], None)?;
        Ok(())
    }
}

/// Decodes trimmed UTF-8 stdout for commands that return text.
fn text(stdout: &[u8], action: &'static str) -> Result<String, BackendError> {
    std::str::from_utf8(stdout)
        .map(|s| s.trim().to_string())
        .map_err(|_| BackendError::InvalidUtf8 { action })
}
