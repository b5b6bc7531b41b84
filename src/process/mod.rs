//! process
//!
//! Single capability for running external commands.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to subprocess execution. All process
//! spawning flows through the [`CommandRunner`] trait; no other module
//! should touch `std::process` directly.
//!
//! # Responsibilities
//!
//! - Spawn a named program with an argument list in an explicit working
//!   directory
//! - Capture stdout and stderr without truncation or reordering
//! - Normalize failures into typed errors
//!
//! # Invariants
//!
//! - The working directory is always an explicit parameter, never inherited
//!   global state
//! - A non-zero exit is an error carrying the exit code and stderr, never
//!   an empty success
//! - Output is returned verbatim apart from trailing-whitespace trimming

mod runner;

pub use runner::{CommandRunner, RunnerError, SystemRunner};
