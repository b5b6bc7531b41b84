//! git::interface
//!
//! Git interface implementation over the external `git` executable.
//!
//! # Architecture
//!
//! The [`Git`] struct is the only way to interact with a git repository.
//! It is generic over a [`CommandRunner`] so the entire surface can be
//! exercised against a scripted fake in tests, and defaults to
//! [`SystemRunner`] for production use.
//!
//! Every operation takes the repository path explicitly. The struct holds
//! no per-repository state, so one `Git` value can serve any number of
//! repositories from any number of threads.
//!
//! # Error Handling
//!
//! Git failures are categorized into typed variants by inspecting the
//! diagnostic text git prints to stderr:
//! - [`GitError::NotARepo`]: the path is not inside a working tree
//! - [`GitError::UnknownRevision`]: a reference did not resolve to a commit
//! - [`GitError::CommandFailed`]: any other process failure, unchanged
//!
//! Classification never swallows the failure: an error that matches no
//! known pattern is propagated as [`GitError::CommandFailed`] with the
//! full stderr intact.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Reference, TypeError};
use crate::process::{CommandRunner, RunnerError, SystemRunner};

/// Errors from git operations.
///
/// These cover the failure categories callers need to handle distinctly:
/// a missing repository, an unresolvable reference, and everything else.
#[derive(Debug, Error)]
pub enum GitError {
    /// The given path is not inside a git working tree.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was used
        path: PathBuf,
    },

    /// A reference did not resolve to a commit in the repository.
    #[error("unknown revision: {reference}")]
    UnknownRevision {
        /// The reference that failed to resolve
        reference: String,
    },

    /// The underlying git command failed for some other reason.
    #[error("git command failed: {0}")]
    CommandFailed(#[from] RunnerError),

    /// Git succeeded but printed output this crate could not parse.
    #[error("unexpected git output from {context}: {output:?}")]
    UnexpectedOutput {
        /// Which query produced the output
        context: &'static str,
        /// The output that failed to parse
        output: String,
    },

    /// A reference failed local validation before git was invoked.
    #[error(transparent)]
    InvalidReference(#[from] TypeError),
}

impl GitError {
    /// Categorize a runner failure using git's stderr diagnostics.
    ///
    /// `reference` is the revision argument in play, if any; it is only
    /// consulted for resolution-failure patterns.
    fn classify(err: RunnerError, path: &Path, reference: Option<&Reference>) -> Self {
        if let Some(stderr) = err.stderr() {
            if stderr.contains("not a git repository") {
                return GitError::NotARepo {
                    path: path.to_path_buf(),
                };
            }

            if let Some(reference) = reference {
                const RESOLUTION_PATTERNS: [&str; 4] = [
                    "unknown revision",
                    "bad revision",
                    "ambiguous argument",
                    "Needed a single revision",
                ];
                if RESOLUTION_PATTERNS.iter().any(|p| stderr.contains(p)) {
                    // git quotes the offending revision; prefer its answer
                    // since the failing argument may be the excluded side
                    // of a range
                    let named = stderr.split('\'').nth(1).map(str::to_string);
                    return GitError::UnknownRevision {
                        reference: named.unwrap_or_else(|| reference.as_str().to_string()),
                    };
                }
            }
        }

        GitError::CommandFailed(err)
    }
}

/// The git interface.
///
/// This is the **single point of interaction** with git. All repository
/// reads and writes flow through this interface as subprocess invocations
/// of the external `git` binary.
///
/// # Example
///
/// ```ignore
/// use gitshim::git::Git;
/// use std::path::Path;
///
/// let git = Git::new();
/// let repo = Path::new(".");
///
/// if git.is_repo(repo) {
///     for remote in git.remotes(repo)? {
///         println!("{remote}");
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Git<R: CommandRunner = SystemRunner> {
    runner: R,
}

impl Git<SystemRunner> {
    /// Create a git interface backed by the system `git` executable.
    pub fn new() -> Self {
        Self {
            runner: SystemRunner::new(),
        }
    }
}

impl<R: CommandRunner> Git<R> {
    /// Create a git interface with a custom command runner.
    ///
    /// Used in tests to substitute a scripted fake for the real binary.
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Run `git` with the given arguments in `dir`.
    pub(crate) fn run(&self, args: &[&str], dir: &Path) -> Result<String, RunnerError> {
        self.runner.run("git", args, dir)
    }

    // =========================================================================
    // Repository Setup
    // =========================================================================

    /// Clone the repository at `url` into `dir`.
    ///
    /// `dir` must already exist; the clone is placed directly inside it.
    ///
    /// # Errors
    ///
    /// - [`GitError::CommandFailed`] if the clone fails (bad URL,
    ///   network failure, non-empty target)
    pub fn clone_repo(&self, url: &str, dir: &Path) -> Result<(), GitError> {
        self.run(&["clone", url, "."], dir)
            .map_err(|e| GitError::classify(e, dir, None))?;
        Ok(())
    }

    /// Initialize a new repository in `dir`.
    pub fn init(&self, dir: &Path) -> Result<(), GitError> {
        self.run(&["init"], dir)
            .map_err(|e| GitError::classify(e, dir, None))?;
        Ok(())
    }

    /// Check whether `dir` is inside a git working tree.
    ///
    /// Never errors: a missing directory, a missing git binary, or a
    /// non-repository all answer `false`.
    pub fn is_repo(&self, dir: &Path) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"], dir)
            .map(|out| out == "true")
            .unwrap_or(false)
    }

    // =========================================================================
    // Staging and Committing
    // =========================================================================

    /// Stage the files matched by `pathspec`.
    ///
    /// The pathspec is passed after `--` so it is never parsed as an
    /// option.
    pub fn add(&self, pathspec: &str, dir: &Path) -> Result<(), GitError> {
        self.run(&["add", "--", pathspec], dir)
            .map_err(|e| GitError::classify(e, dir, None))?;
        Ok(())
    }

    /// Commit staged changes with the given message.
    ///
    /// # Errors
    ///
    /// - [`GitError::CommandFailed`] if there is nothing to commit or the
    ///   author identity is not configured
    pub fn commit(&self, dir: &Path, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message], dir)
            .map_err(|e| GitError::classify(e, dir, None))?;
        Ok(())
    }

    // =========================================================================
    // Remote Discovery
    // =========================================================================

    /// List the configured remote names.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `dir` is not a working tree
    pub fn remotes(&self, dir: &Path) -> Result<Vec<String>, GitError> {
        let output = self
            .run(&["remote"], dir)
            .map_err(|e| GitError::classify(e, dir, None))?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Get the default remote name.
    ///
    /// Prefers `origin` if it exists, otherwise the first configured
    /// remote. Returns `None` when the repository has no remotes.
    pub fn default_remote(&self, dir: &Path) -> Result<Option<String>, GitError> {
        let remotes = self.remotes(dir)?;

        if remotes.iter().any(|r| r == "origin") {
            return Ok(Some("origin".to_string()));
        }

        Ok(remotes.into_iter().next())
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// Check whether the working tree has uncommitted changes.
    ///
    /// Uses `git status --porcelain`; both staged and unstaged changes
    /// (and untracked files) count as modified.
    pub fn is_modified(&self, dir: &Path) -> Result<bool, GitError> {
        let output = self
            .run(&["status", "--porcelain"], dir)
            .map_err(|e| GitError::classify(e, dir, None))?;

        Ok(!output.trim().is_empty())
    }

    // =========================================================================
    // Reference Lookup
    // =========================================================================

    /// Get the current branch name.
    ///
    /// Returns `Ok(None)` when HEAD is detached.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `dir` is not a working tree
    pub fn branch_name(&self, dir: &Path) -> Result<Option<String>, GitError> {
        match self.run(&["symbolic-ref", "--short", "HEAD"], dir) {
            Ok(name) => Ok(Some(name)),
            Err(err) => {
                // Detached HEAD is a normal answer, not a failure
                if err
                    .stderr()
                    .is_some_and(|s| s.contains("not a symbolic ref"))
                {
                    return Ok(None);
                }
                Err(GitError::classify(err, dir, None))
            }
        }
    }

    /// Resolve a reference to its full commit hash.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnknownRevision`] if the reference does not name a
    ///   commit in the repository
    pub fn resolve(&self, reference: &Reference, dir: &Path) -> Result<String, GitError> {
        let spec = format!("{}^{{commit}}", reference.as_str());
        let output = self
            .run(&["rev-parse", "--verify", &spec], dir)
            .map_err(|e| GitError::classify(e, dir, Some(reference)))?;

        match output.lines().next() {
            Some(hash) if !hash.is_empty() => Ok(hash.to_string()),
            _ => Err(GitError::UnexpectedOutput {
                context: "rev-parse --verify",
                output,
            }),
        }
    }

    // =========================================================================
    // Ancestry Queries
    // =========================================================================

    /// Count commits reachable from `tip` but not from `other`.
    ///
    /// The ancestry-exclusive count behind [`Git::compare`].
    pub(crate) fn count_exclusive(
        &self,
        tip: &Reference,
        other: &Reference,
        dir: &Path,
    ) -> Result<u64, GitError> {
        let exclude = format!("^{}", other.as_str());
        let output = self
            .run(&["rev-list", "--count", tip.as_str(), &exclude], dir)
            .map_err(|e| GitError::classify(e, dir, Some(tip)))?;

        output
            .trim()
            .parse()
            .map_err(|_| GitError::UnexpectedOutput {
                context: "rev-list --count",
                output,
            })
    }
}
