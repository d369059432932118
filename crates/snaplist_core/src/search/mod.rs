//! Search and autocomplete over stored notes.
//!
//! # Responsibility
//! - Filter loaded notes by shelf tab and free-text query.
//! - Build the autocomplete dictionary for the input line.
//!
//! Both operate on records already loaded by the host; no storage access.

pub mod filter;
pub mod suggest;
