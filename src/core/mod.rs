//! core
//!
//! Core domain types for gitshim.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Reference, TypeError
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Validation happens once, at construction

pub mod types;
