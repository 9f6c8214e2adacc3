//! # `botlite` – The umbrella crate
//!
//! This crate is a *one-stop import* that glues together the building-block
//! crates in the workspace
//!
//! | Crate                 | What it provides                                                              |
//! |-----------------------|-------------------------------------------------------------------------------|
//! | **`botlite-core`**    | Wire types (`QueryRequest`, `QueryEvent`), event framing, errors, builders    |
//! | **`botlite-client`**  | HTTP/SSE transport that opens and consumes a live query stream *(optional)*   |
//!
//! By default the crate re-exports both, so a single dependency line is
//! enough to talk to a server.  Disabling the `client` feature leaves only
//! the protocol layer, which is handy for server-side code or custom
//! transports that merely need the types and the frame decoder:
//!
//! ```toml
//! [dependencies]
//! botlite = { version = "0.2", default-features = false }
//! ```
//!
//! ## Design philosophy
//!
//! * **Transport at the edge** – All protocol rules (framing, sentinels,
//!   defaults) live in the core crate and work against any line-oriented
//!   byte stream; HTTP is just the reference transport.
//! * **Errors as values** – A broken payload line is an item you can inspect,
//!   not a stream-ending failure; terminal conditions are a small, explicit
//!   `BotliteError` taxonomy.
//! * **No magic** – Ordinary structs, one builder macro, no procedural
//!   macros.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use botlite::frame::StreamItem;
//! use botlite::request::QueryRequest;
//! use futures_util::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let request = QueryRequest::builder(103)
//!         .query("where is my order".to_string())
//!         .build()?;
//!
//!     let client = botlite::client::BotliteClient::new("http://localhost:8844/botlite");
//!     let events = client.query_stream(request);
//!     futures_util::pin_mut!(events);
//!
//!     let mut answers = Vec::new();
//!     while let Some(item) = events.next().await {
//!         if let StreamItem::Event(event) = item? {
//!             answers.extend(event.answer_list.into_iter().map(|answer| answer.text));
//!         }
//!     }
//!     println!("{answers:?}");
//!     Ok(())
//! }
//! ```
//!
//! The `pub use` statements below simply forward the public API of the
//! individual crates so users can write `botlite::request::QueryRequest`
//! instead of juggling two dependencies.

pub use botlite_core::*;

#[cfg(feature = "client")]
pub use botlite_client as client;
