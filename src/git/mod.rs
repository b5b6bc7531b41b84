//! git
//!
//! Single interface for all git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to git. Every operation shells out
//! to the external `git` executable through the [`crate::process`]
//! capability; no version-control logic is reimplemented here. Direct
//! parsing of `.git` internal files outside this module is prohibited.
//!
//! # Responsibilities
//!
//! - Repository setup (clone, init) and detection
//! - Staging and committing
//! - Remote discovery
//! - Working-tree modification detection
//! - Branch-name lookup and reference resolution
//! - Commit-ordering comparison ([`compare`])
//!
//! # Invariants
//!
//! - The repository path is an explicit parameter on every call; the
//!   process-global working directory is never consulted or mutated
//! - Errors are normalized into typed [`GitError`] categories and never
//!   downgraded to default values
//!
//! # Example
//!
//! ```ignore
//! use gitshim::core::types::Reference;
//! use gitshim::git::{Comparison, Git};
//! use std::path::Path;
//!
//! let git = Git::new();
//! let repo = Path::new("/path/to/repo");
//!
//! let main = Reference::new("main")?;
//! let release = Reference::new("origin/release")?;
//!
//! match git.compare(&main, &release, repo)? {
//!     Comparison::Equal => println!("up to date"),
//!     Comparison::AncestorOf { ahead } => println!("behind by {ahead}"),
//!     Comparison::DescendantOf { behind } => println!("ahead by {behind}"),
//!     Comparison::Diverged { only_in_a, only_in_b } => {
//!         println!("diverged: {only_in_a} vs {only_in_b}")
//!     }
//! }
//! ```

mod compare;
mod interface;

pub use compare::Comparison;
pub use interface::{Git, GitError};
