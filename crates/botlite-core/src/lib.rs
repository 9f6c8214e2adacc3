//! # `botlite-core` – protocol layer of the Botlite client SDK
//!
//! Everything in this crate is transport-free: it describes *what* travels
//! over the wire (requests, stream events), *how* a raw line of the event
//! stream is classified ([`frame`]), and which failures exist ([`error`]).
//! Actually moving bytes is the job of `botlite-client`, which layers an
//! HTTP/SSE transport on top of these types.
//!
//! The split keeps the protocol testable without a socket in sight and lets
//! alternative transports (a unix pipe, a replay file) reuse the same
//! decoding rules.

pub mod error;
pub mod event;
pub mod frame;
pub mod request;
