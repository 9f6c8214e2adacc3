//! Line classification for the event stream.
//!
//! The wire is line-delimited: a line starting with the literal [`DATA_PREFIX`]
//! carries a JSON-encoded [`QueryEvent`], every other line (SSE comments,
//! `event:` labels, blank separators, keepalives) is passed through for
//! diagnostics and never parsed.
//!
//! The prefix is removed with [`str::strip_prefix`], i.e. exactly once and
//! exactly the token.  A character-set trim would also eat payload bytes that
//! happen to come from the prefix alphabet.

use thiserror::Error;

use crate::event::QueryEvent;

/// Literal prefix marking a payload-carrying line.
pub const DATA_PREFIX: &str = "data:";

/// `msg` value signalling graceful end of stream.
pub const MSG_EOF: &str = "EOF";

/// `msg` value of an ordinary in-progress event.
pub const MSG_SUCCESS: &str = "success";

/// Classification of one raw line from the wire.
#[derive(Debug)]
pub enum StreamItem {
    /// A `data:` line whose payload decoded into an event.
    Event(QueryEvent),
    /// A line without the data prefix, surfaced verbatim.
    Passthrough(String),
    /// A `data:` line whose payload did not parse.  Recoverable: consumers
    /// report it and continue with the next line.
    Malformed(FrameError),
}

/// A payload line that failed to decode, with the raw text preserved.
#[derive(Debug, Error)]
#[error("malformed event payload {raw:?}: {source}")]
pub struct FrameError {
    pub raw: String,
    #[source]
    pub source: serde_json::Error,
}

/// Classify one line.  Total: every outcome, including a broken payload, is a
/// value, so a bad line can never tear down the stream by itself.
pub fn decode_line(line: &str) -> StreamItem {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return StreamItem::Passthrough(line.to_owned());
    };

    match serde_json::from_str::<QueryEvent>(payload) {
        Ok(event) => StreamItem::Event(event),
        Err(source) => StreamItem::Malformed(FrameError {
            raw: line.to_owned(),
            source,
        }),
    }
}
