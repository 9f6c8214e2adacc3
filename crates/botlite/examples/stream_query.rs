//! # Streaming Query – Real-time Example
//!
//! This example opens one query stream against a running server and renders
//! answers as they arrive, the way a chat surface would.
//!
//! ```bash
//! export BOTLITE_BASE_URL=http://localhost:8844/botlite   # optional
//! cargo run -p botlite --example stream_query
//! ```
//!
//! Passthrough lines (SSE labels, keepalives) go to stderr so you can watch
//! the raw framing without polluting the answer output.

use botlite::client::BotliteClient;
use botlite::error::BotliteError;
use botlite::frame::StreamItem;
use botlite::request::QueryRequest;
use futures_util::StreamExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base = std::env::var("BOTLITE_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8844/botlite".to_string());

    // 1. Build the session request; the session id is generated for us.
    let request = QueryRequest::builder(103)
        .query("the ten best known actors of Chinese cinema".to_string())
        .user_id("10001".to_string())
        .need_dump(false)
        .build()?;
    println!("session: {}", request.session_id);

    // 2. Open the stream.
    let client = BotliteClient::new(base);
    let events = client.query_stream(request);
    futures_util::pin_mut!(events);

    // 3. Accumulate answer texts caller-side while rendering live.
    let mut answers = Vec::new();
    while let Some(item) = events.next().await {
        match item {
            Ok(StreamItem::Event(event)) => {
                if let Some(answer) = event.answer_list.first() {
                    println!("[round {}] {}", event.round, answer.text);
                    answers.push(answer.text.clone());
                }
            }
            Ok(StreamItem::Passthrough(raw)) => eprintln!("| {raw}"),
            Ok(StreamItem::Malformed(err)) => eprintln!("! {err}"),
            Err(BotliteError::Rejected(msg)) => {
                eprintln!("stream rejected: {msg}");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("\ncollected {} answers: {answers:?}", answers.len());
    Ok(())
}
