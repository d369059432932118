//! Domain model for shelves and notes.
//!
//! # Responsibility
//! - Define the closed shelf set and its alias configuration.
//! - Define parser output and the persisted note shape.
//!
//! # Invariants
//! - Every note resolves to exactly one shelf from the closed set.
//! - Identity/ownership is assigned outside the parser.

pub mod note;
pub mod shelf;
