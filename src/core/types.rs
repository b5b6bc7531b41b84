//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Reference`] - A commit designator passed through to git
//! - [`TypeError`] - Validation failures
//!
//! # Validation
//!
//! A [`Reference`] is deliberately opaque: it may be a full hash, an
//! abbreviated hash, a branch name, or a `remote/branch` form. Resolution
//! is delegated entirely to git, so validation here only rejects strings
//! that cannot travel safely as a single argv element.
//!
//! # Examples
//!
//! ```
//! use gitshim::core::types::Reference;
//!
//! let branch = Reference::new("origin/main").unwrap();
//! assert_eq!(branch.as_str(), "origin/main");
//!
//! let hash = Reference::new("8925e720d508cca3").unwrap();
//! assert_eq!(hash.as_str(), "8925e720d508cca3");
//!
//! // Strings git would parse as options are rejected up front
//! assert!(Reference::new("--all").is_err());
//! assert!(Reference::new("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

/// An opaque commit designator.
///
/// References are not resolved locally; git decides whether the string
/// names a commit. Validation only guards the process boundary:
///
/// - Cannot be empty
/// - Cannot start with `-` (would be parsed as an option by git)
/// - Cannot contain NUL or other ASCII control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reference(String);

impl Reference {
    /// Create a new validated reference.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidReference` if the string cannot be passed
    /// to git as a single revision argument.
    pub fn new(reference: impl Into<String>) -> Result<Self, TypeError> {
        let reference = reference.into();
        Self::validate(&reference)?;
        Ok(Self(reference))
    }

    fn validate(reference: &str) -> Result<(), TypeError> {
        if reference.is_empty() {
            return Err(TypeError::InvalidReference(
                "reference cannot be empty".into(),
            ));
        }

        if reference.starts_with('-') {
            return Err(TypeError::InvalidReference(
                "reference cannot start with '-'".into(),
            ));
        }

        for c in reference.chars() {
            if c.is_ascii_control() {
                return Err(TypeError::InvalidReference(
                    "reference cannot contain control characters".into(),
                ));
            }
        }

        if reference.contains(char::is_whitespace) {
            return Err(TypeError::InvalidReference(
                "reference cannot contain whitespace".into(),
            ));
        }

        Ok(())
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Reference {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Reference> for String {
    fn from(reference: Reference) -> Self {
        reference.0
    }
}

impl std::str::FromStr for Reference {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
