//! Error types for state decoding
//!
//! These only surface through the strict `parse_*` helpers; the lenient
//! [`decode`](super::decode) path downgrades them to warnings and falls back
//! to the safe default.

use thiserror::Error;

/// Errors raised while parsing URL or persisted state
#[derive(Debug, Error)]
pub enum StateError {
    /// A query parameter held something other than a JSON string array
    #[error("Malformed value for query parameter '{name}': {source}")]
    MalformedParam {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The persisted filter blob was not a valid group/value/filter map
    #[error("Malformed stored filter blob: {0}")]
    MalformedStored(#[source] serde_json::Error),
}
