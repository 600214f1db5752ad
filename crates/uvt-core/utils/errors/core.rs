//! Core error type for UVT operations
//!
//! Provides the main `CoreError` enum shared by the time, interval, event and
//! engine modules. Every fallible operation in the crate returns it.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in the library)
//! - Carry the offending text or value so callers can report it verbatim
//! - Fail fast: a single malformed record rejects the whole batch

use thiserror::Error;

/// Main error type for UVT core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Millisecond value outside `[TimeOffset::MIN, TimeOffset::MAX]` or not integral
    #[error("Time offset out of range: {value} (must be an integer between {min} and {max})")]
    OutOfRange {
        /// Rendered offending value
        value: String,
        /// Lower bound in milliseconds
        min: u32,
        /// Upper bound in milliseconds
        max: u32,
    },

    /// Non-integral or non-finite time parts passed to a decomposition helper
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Record start or end text that does not parse as a time offset
    #[error("Invalid timestamp: '{text}'")]
    InvalidTimestamp {
        /// Raw text that failed to parse
        text: String,
    },

    /// Interval whose bounds are out of order
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// Input record without the expected `video,start,end[,user]` shape
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the input text
        line: usize,
        /// Description of the shape problem
        reason: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
