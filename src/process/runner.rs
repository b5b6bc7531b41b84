//! process::runner
//!
//! The command runner capability and its system-backed implementation.
//!
//! # Design
//!
//! [`CommandRunner`] is a one-method trait so that higher layers can be
//! tested against a scripted fake without spawning processes. The
//! production implementation, [`SystemRunner`], wraps
//! `std::process::Command`.
//!
//! # Error Handling
//!
//! Failures are categorized into typed variants:
//! - [`RunnerError::Spawn`]: the program could not be started at all
//! - [`RunnerError::Failed`]: the program ran but exited non-zero
//! - [`RunnerError::NonUtf8Output`]: stdout was not valid UTF-8
//!
//! Callers that need to distinguish *why* a command failed (e.g. "unknown
//! revision" vs. "not a git repository") inspect the stderr carried by
//! [`RunnerError::Failed`].

use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, trace};

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The program could not be started (not installed, not executable,
    /// working directory missing).
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// The program that could not be started
        program: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited with a non-zero status.
    #[error("'{program}' exited with {}: {stderr}", code.map_or_else(|| "signal".to_string(), |c| format!("code {c}")))]
    Failed {
        /// The program that failed
        program: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The program produced stdout that is not valid UTF-8.
    #[error("'{program}' produced non-UTF-8 output")]
    NonUtf8Output {
        /// The program that produced the output
        program: String,
    },
}

impl RunnerError {
    /// The stderr of a failed command, if any was captured.
    ///
    /// Used by callers to classify failures by git's diagnostic text.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            RunnerError::Failed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// The command runner capability.
///
/// A single synchronous call: run `program` with `args` in `cwd`, return
/// trimmed stdout on success. Implementations must not truncate or reorder
/// output; line counts and single-line fields parsed from it are
/// load-bearing for callers.
pub trait CommandRunner {
    /// Run a program to completion and capture its output.
    ///
    /// # Errors
    ///
    /// - [`RunnerError::Spawn`] if the process cannot be started
    /// - [`RunnerError::Failed`] if it exits non-zero
    /// - [`RunnerError::NonUtf8Output`] if stdout is not UTF-8
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String, RunnerError>;
}

/// Command runner backed by `std::process::Command`.
///
/// Stateless; a single instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String, RunnerError> {
        debug!(program, ?args, cwd = %cwd.display(), "running external command");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| RunnerError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(program, code = ?output.status.code(), %stderr, "command failed");
            return Err(RunnerError::Failed {
                program: program.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| RunnerError::NonUtf8Output {
            program: program.to_string(),
        })?;

        trace!(program, bytes = stdout.len(), "command succeeded");
        Ok(stdout.trim_end().to_string())
    }
}
