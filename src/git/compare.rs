//! git::compare
//!
//! Commit-ordering comparison between two references.
//!
//! # Algorithm
//!
//! The ancestry relationship between references A and B is fully
//! determined by two ancestry-exclusive counts:
//!
//! - `only_in_a`: commits reachable from A but not from B
//!   (`git rev-list --count A ^B`)
//! - `only_in_b`: commits reachable from B but not from A
//!
//! | `only_in_a` | `only_in_b` | relationship                        |
//! |-------------|-------------|-------------------------------------|
//! | 0           | 0           | equal histories                     |
//! | 0           | > 0         | A is an ancestor of B (ff possible) |
//! | > 0         | 0           | B is an ancestor of A (ff possible) |
//! | > 0         | > 0         | diverged                            |
//!
//! Carrying the counts (rather than a bare is-ancestor boolean) lets a
//! caller reason about how far apart two references are without issuing a
//! second query.
//!
//! # Integer encoding
//!
//! [`Comparison::code`] projects the classification onto a single integer:
//! `0` for equal, `1` when A is an ancestor of B, `2` when B is an
//! ancestor of A, and `-(only_in_b)` when diverged. The enum is the
//! primary API; the code is a compact projection for callers that persist
//! or log the outcome. Antisymmetry holds at the enum level via
//! [`Comparison::reversed`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interface::{Git, GitError};
use crate::core::types::Reference;
use crate::process::CommandRunner;

/// The ancestry relationship between two references A and B.
///
/// Produced by [`Git::compare`]. Variants carry the ancestry-exclusive
/// commit counts that determined the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum Comparison {
    /// A and B denote the same commit or fully equivalent histories.
    Equal,

    /// A is an ancestor of B: fast-forwarding A to B is possible.
    AncestorOf {
        /// Commits reachable from B but not from A.
        ahead: u64,
    },

    /// B is an ancestor of A: fast-forwarding B to A is possible.
    DescendantOf {
        /// Commits reachable from A but not from B.
        behind: u64,
    },

    /// Neither reference is an ancestor of the other.
    Diverged {
        /// Commits reachable only from A.
        only_in_a: u64,
        /// Commits reachable only from B.
        only_in_b: u64,
    },
}

impl Comparison {
    /// Classify a pair of ancestry-exclusive counts.
    pub fn classify(only_in_a: u64, only_in_b: u64) -> Self {
        match (only_in_a, only_in_b) {
            (0, 0) => Comparison::Equal,
            (0, ahead) => Comparison::AncestorOf { ahead },
            (behind, 0) => Comparison::DescendantOf { behind },
            (only_in_a, only_in_b) => Comparison::Diverged {
                only_in_a,
                only_in_b,
            },
        }
    }

    /// The comparison as seen from the other side: `compare(a, b).reversed()`
    /// equals `compare(b, a)`.
    pub fn reversed(self) -> Self {
        match self {
            Comparison::Equal => Comparison::Equal,
            Comparison::AncestorOf { ahead } => Comparison::DescendantOf { behind: ahead },
            Comparison::DescendantOf { behind } => Comparison::AncestorOf { ahead: behind },
            Comparison::Diverged {
                only_in_a,
                only_in_b,
            } => Comparison::Diverged {
                only_in_a: only_in_b,
                only_in_b: only_in_a,
            },
        }
    }

    /// Whether a fast-forward is possible in either direction.
    ///
    /// True for [`Comparison::Equal`] as well: a no-op fast-forward.
    pub fn can_fast_forward(&self) -> bool {
        !matches!(self, Comparison::Diverged { .. })
    }

    /// Project the classification onto a single integer code.
    ///
    /// - `Equal` → `0`
    /// - `AncestorOf` → `1`
    /// - `DescendantOf` → `2`
    /// - `Diverged { only_in_b, .. }` → `-(only_in_b)`
    ///
    /// The diverged code is always negative (`only_in_b > 0` by
    /// construction), so the sign alone distinguishes diverged histories
    /// from the fast-forwardable cases.
    pub fn code(&self) -> i64 {
        match self {
            Comparison::Equal => 0,
            Comparison::AncestorOf { .. } => 1,
            Comparison::DescendantOf { .. } => 2,
            Comparison::Diverged { only_in_b, .. } => -(*only_in_b as i64),
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Equal => write!(f, "equal"),
            Comparison::AncestorOf { ahead } => write!(f, "ancestor (behind by {ahead})"),
            Comparison::DescendantOf { behind } => write!(f, "descendant (ahead by {behind})"),
            Comparison::Diverged {
                only_in_a,
                only_in_b,
            } => write!(f, "diverged ({only_in_a} vs {only_in_b})"),
        }
    }
}

impl<R: CommandRunner> Git<R> {
    /// Classify the ancestry relationship between references `a` and `b`.
    ///
    /// Issues two ancestry-exclusive count queries and combines them per
    /// the table in the module documentation. The queries are independent;
    /// if the repository changes between them the result reflects whatever
    /// git observed, the same race any two consecutive git commands have.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnknownRevision`] if either reference does not
    ///   resolve; a failed count is never treated as zero
    /// - [`GitError::NotARepo`] if `dir` is not a working tree
    ///
    /// # Example
    ///
    /// ```ignore
    /// let main = Reference::new("main")?;
    /// let release = Reference::new("origin/release")?;
    ///
    /// match git.compare(&main, &release, repo)? {
    ///     Comparison::AncestorOf { ahead } => println!("behind by {ahead}"),
    ///     other => println!("{other}"),
    /// }
    /// ```
    pub fn compare(
        &self,
        a: &Reference,
        b: &Reference,
        dir: &Path,
    ) -> Result<Comparison, GitError> {
        let only_in_a = self.count_exclusive(a, b, dir)?;
        let only_in_b = self.count_exclusive(b, a, dir)?;

        let comparison = Comparison::classify(only_in_a, only_in_b);
        debug!(a = %a, b = %b, only_in_a, only_in_b, %comparison, "compared references");

        Ok(comparison)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;
    use crate::process::RunnerError;

    /// A scripted command runner.
    ///
    /// Maps a joined argument string to a canned response, so tests can
    /// exercise the git layer without spawning processes.
    pub(crate) struct ScriptedRunner {
        responses: HashMap<String, Result<String, String>>,
    }

    impl ScriptedRunner {
        pub(crate) fn new() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }

        /// Script a successful invocation: `args` (joined by spaces)
        /// produces `stdout`.
        pub(crate) fn ok(mut self, args: &str, stdout: &str) -> Self {
            self.responses
                .insert(args.to_string(), Ok(stdout.to_string()));
            self
        }

        /// Script a failing invocation with the given stderr.
        pub(crate) fn fail(mut self, args: &str, stderr: &str) -> Self {
            self.responses
                .insert(args.to_string(), Err(stderr.to_string()));
            self
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<String, RunnerError> {
            assert_eq!(program, "git", "only git invocations are scripted");
            let key = args.join(" ");
            match self.responses.get(&key) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err(stderr)) => Err(RunnerError::Failed {
                    program: program.to_string(),
                    code: Some(128),
                    stderr: stderr.clone(),
                }),
                None => panic!("unscripted invocation: git {key}"),
            }
        }
    }

    fn repo() -> PathBuf {
        PathBuf::from("/repo")
    }

    fn reference(s: &str) -> Reference {
        Reference::new(s).unwrap()
    }

    mod classify {
        use super::*;

        #[test]
        fn zero_zero_is_equal() {
            assert_eq!(Comparison::classify(0, 0), Comparison::Equal);
        }

        #[test]
        fn zero_positive_is_ancestor() {
            assert_eq!(
                Comparison::classify(0, 3),
                Comparison::AncestorOf { ahead: 3 }
            );
        }

        #[test]
        fn positive_zero_is_descendant() {
            assert_eq!(
                Comparison::classify(5, 0),
                Comparison::DescendantOf { behind: 5 }
            );
        }

        #[test]
        fn positive_positive_is_diverged() {
            assert_eq!(
                Comparison::classify(2, 4),
                Comparison::Diverged {
                    only_in_a: 2,
                    only_in_b: 4
                }
            );
        }
    }

    mod code {
        use super::*;

        #[test]
        fn documented_encoding() {
            assert_eq!(Comparison::Equal.code(), 0);
            assert_eq!(Comparison::AncestorOf { ahead: 7 }.code(), 1);
            assert_eq!(Comparison::DescendantOf { behind: 7 }.code(), 2);
            assert_eq!(
                Comparison::Diverged {
                    only_in_a: 2,
                    only_in_b: 4
                }
                .code(),
                -4
            );
        }

        #[test]
        fn diverged_code_is_always_negative() {
            for only_in_b in 1..100 {
                let code = Comparison::Diverged {
                    only_in_a: 1,
                    only_in_b,
                }
                .code();
                assert!(code < 0);
            }
        }
    }

    mod reversed {
        use super::*;

        #[test]
        fn equal_is_self_inverse() {
            assert_eq!(Comparison::Equal.reversed(), Comparison::Equal);
        }

        #[test]
        fn ancestor_swaps_with_descendant() {
            assert_eq!(
                Comparison::AncestorOf { ahead: 3 }.reversed(),
                Comparison::DescendantOf { behind: 3 }
            );
        }

        #[test]
        fn diverged_swaps_counts() {
            assert_eq!(
                Comparison::Diverged {
                    only_in_a: 2,
                    only_in_b: 4
                }
                .reversed(),
                Comparison::Diverged {
                    only_in_a: 4,
                    only_in_b: 2
                }
            );
        }

        #[test]
        fn reversing_twice_is_identity() {
            let cases = [
                Comparison::Equal,
                Comparison::AncestorOf { ahead: 1 },
                Comparison::DescendantOf { behind: 9 },
                Comparison::Diverged {
                    only_in_a: 3,
                    only_in_b: 5,
                },
            ];
            for c in cases {
                assert_eq!(c.reversed().reversed(), c);
            }
        }
    }

    mod can_fast_forward {
        use super::*;

        #[test]
        fn only_diverged_cannot() {
            assert!(Comparison::Equal.can_fast_forward());
            assert!(Comparison::AncestorOf { ahead: 1 }.can_fast_forward());
            assert!(Comparison::DescendantOf { behind: 1 }.can_fast_forward());
            assert!(!Comparison::Diverged {
                only_in_a: 1,
                only_in_b: 1
            }
            .can_fast_forward());
        }
    }

    mod compare {
        use super::*;

        #[test]
        fn equal_histories() {
            let runner = ScriptedRunner::new()
                .ok("rev-list --count main ^main-copy", "0")
                .ok("rev-list --count main-copy ^main", "0");
            let git = Git::with_runner(runner);
            let result = git
                .compare(&reference("main"), &reference("main-copy"), &repo())
                .unwrap();
            assert_eq!(result, Comparison::Equal);
            assert_eq!(result.code(), 0);
        }

        #[test]
        fn fast_forward_from_a() {
            let runner = ScriptedRunner::new()
                .ok("rev-list --count c1 ^main", "0")
                .ok("rev-list --count main ^c1", "1");
            let git = Git::with_runner(runner);
            let result = git
                .compare(&reference("c1"), &reference("main"), &repo())
                .unwrap();
            assert_eq!(result, Comparison::AncestorOf { ahead: 1 });
            assert_eq!(result.code(), 1);
        }

        #[test]
        fn fast_forward_from_b() {
            let runner = ScriptedRunner::new()
                .ok("rev-list --count origin/noremove ^b589c3d", "6")
                .ok("rev-list --count b589c3d ^origin/noremove", "0");
            let git = Git::with_runner(runner);
            let result = git
                .compare(&reference("origin/noremove"), &reference("b589c3d"), &repo())
                .unwrap();
            assert_eq!(result, Comparison::DescendantOf { behind: 6 });
            assert_eq!(result.code(), 2);
        }

        #[test]
        fn diverged_code_is_negated_b_count() {
            let runner = ScriptedRunner::new()
                .ok("rev-list --count 50685d9342139e ^8925e720d508cca3", "12")
                .ok("rev-list --count 8925e720d508cca3 ^50685d9342139e", "4");
            let git = Git::with_runner(runner);
            let result = git
                .compare(
                    &reference("50685d9342139e"),
                    &reference("8925e720d508cca3"),
                    &repo(),
                )
                .unwrap();
            assert_eq!(
                result,
                Comparison::Diverged {
                    only_in_a: 12,
                    only_in_b: 4
                }
            );
            assert_eq!(result.code(), -4);
        }

        #[test]
        fn antisymmetry_via_reversed() {
            let runner = ScriptedRunner::new()
                .ok("rev-list --count a ^b", "3")
                .ok("rev-list --count b ^a", "5");
            let git = Git::with_runner(runner);

            let forward = git.compare(&reference("a"), &reference("b"), &repo()).unwrap();
            let backward = git.compare(&reference("b"), &reference("a"), &repo()).unwrap();
            assert_eq!(forward.reversed(), backward);
        }

        #[test]
        fn unresolvable_reference_aborts_comparison() {
            let runner = ScriptedRunner::new().fail(
                "rev-list --count nope ^main",
                "fatal: ambiguous argument 'nope': unknown revision or path not in the working tree.",
            );
            let git = Git::with_runner(runner);
            let err = git
                .compare(&reference("nope"), &reference("main"), &repo())
                .unwrap_err();
            assert!(matches!(err, GitError::UnknownRevision { reference } if reference == "nope"));
        }

        #[test]
        fn second_query_failure_is_not_zero() {
            // The first count succeeds; the second fails. The comparison
            // must fail rather than classify with a defaulted count.
            let runner = ScriptedRunner::new()
                .ok("rev-list --count main ^gone", "2")
                .fail(
                    "rev-list --count gone ^main",
                    "fatal: bad revision 'gone'",
                );
            let git = Git::with_runner(runner);
            let err = git
                .compare(&reference("main"), &reference("gone"), &repo())
                .unwrap_err();
            assert!(matches!(err, GitError::UnknownRevision { reference } if reference == "gone"));
        }

        #[test]
        fn serde_representation() {
            let c = Comparison::Diverged {
                only_in_a: 2,
                only_in_b: 4,
            };
            let json = serde_json::to_value(&c).unwrap();
            assert_eq!(json["relation"], "diverged");
            assert_eq!(json["only_in_a"], 2);
            let back: Comparison = serde_json::from_value(json).unwrap();
            assert_eq!(back, c);
        }
    }
}
