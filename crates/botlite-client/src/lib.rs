//! HTTP transport for the Botlite streaming dialogue API.
//!
//! [`BotliteClient`] sends a [`botlite_core::request::QueryRequest`] and
//! exposes the held-open response body as an ordered stream of
//! [`botlite_core::frame::StreamItem`]s.  The byte-level consumption lives in
//! [`event_stream`], which works against any chunked byte source, not just
//! HTTP.

mod client;
mod reader;

pub mod error;

pub use client::BotliteClient;
pub use reader::event_stream;
