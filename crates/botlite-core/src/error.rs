//! Unified error type exposed by **`botlite-core`**.
//!
//! Transport crates should convert their internal errors into one of these
//! variants before bubbling them up to stream consumers.  This keeps the
//! public API small while still conveying rich diagnostic information.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BotliteError>;

#[derive(Debug, Error)]
pub enum BotliteError {
    /// Caller-supplied request input was rejected before anything was sent,
    /// e.g. a missing or empty query.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The server terminated the stream with a non-success status.  The
    /// payload is the verbatim `msg` value from the terminal event.
    #[error("server terminated the stream: {0}")]
    Rejected(String),

    /// The transport closed before an `EOF` event was seen.  Partial results
    /// collected so far may be incomplete.
    #[error("stream ended before the EOF event")]
    UnexpectedEof,

    /// A completed line on the wire was not valid UTF-8.
    #[error("invalid utf-8 on the wire: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Generic forwarding of any transport-specific error that doesn't fit
    /// another category.
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync + 'static>),
}
