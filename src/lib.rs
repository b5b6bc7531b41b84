//! Gitshim - typed bindings over the external `git` executable
//!
//! Gitshim drives the `git` binary as a subprocess to provide repository
//! introspection (clone, init, commit, remote discovery, modification
//! detection, branch-name lookup) and a commit-ordering comparator that
//! classifies the ancestry relationship between two references.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`core`] - Domain types (references, validation)
//! - [`process`] - Single capability for running external commands
//! - [`git`] - Single interface for all git operations, built on [`process`]
//!
//! # Correctness Invariants
//!
//! 1. All git interactions flow through [`git::Git`]; no other module
//!    spawns processes
//! 2. Working directories are explicit parameters, never global state
//! 3. Failures are never downgraded to default values (a failed ancestry
//!    count is an error, not zero)

pub mod core;
pub mod git;
pub mod process;
