//! Use-case helpers around the parser.
//!
//! # Responsibility
//! - Rebuild shorthand lines from structured input (reviewed URL flow).
//! - Decode URL classification replies.
//! - Import notes from the previous export format.

pub mod classify;
pub mod compose;
pub mod import;
