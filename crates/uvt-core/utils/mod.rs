//! Utility functions and shared types for UVT core
//!
//! Contains the error types, map helpers and the small text helpers used by
//! the record parser.

pub mod errors;
pub mod hashers;

pub use errors::{CoreError, ErrorCategory};
pub use hashers::{create_hash_map, create_hash_map_with_capacity, KeyedMap};

/// Trim whitespace around a record field
///
/// Fields in playback logs are frequently padded after the comma
/// (`2, 00:45, 00:60.758`); the padding carries no meaning.
#[must_use]
pub fn normalize_field_value(value: &str) -> &str {
    value.trim()
}

/// Check that every byte of `text` is an ASCII digit and there is at least one
#[must_use]
pub fn is_ascii_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
