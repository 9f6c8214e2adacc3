//! Incremental consumption of a live event stream.
//!
//! [`event_stream`] turns any chunked byte source into a lazy, ordered,
//! finite sequence of [`StreamItem`]s.  It is deliberately generic over the
//! source so the exact termination behavior can be tested against in-memory
//! streams; the HTTP client feeds it `reqwest`'s body stream.

use async_stream::try_stream;
use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

use botlite_core::error::{BotliteError, Result};
use botlite_core::frame::{self, StreamItem};

/// Consume `body` line by line and yield decoded items in arrival order.
///
/// The returned stream is pull-driven: one chunk is polled at a time and
/// nothing is polled past a terminal condition.  It finishes on the first of:
///
/// * an event whose `msg` is `EOF` – clean termination, the event itself is
///   not yielded;
/// * an event whose `msg` is neither `success` nor `EOF` –
///   [`BotliteError::Rejected`] carrying that exact string;
/// * end of input without a terminal event – [`BotliteError::UnexpectedEof`];
/// * a source error – converted and propagated verbatim.
///
/// Non-data lines and undecodable payload lines are yielded as
/// [`StreamItem::Passthrough`] and [`StreamItem::Malformed`]; neither ends
/// the stream.
pub fn event_stream<S, E>(body: S) -> impl Stream<Item = Result<StreamItem>>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<BotliteError>,
{
    try_stream! {
        futures_util::pin_mut!(body);
        let mut buf: Vec<u8> = Vec::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(Into::<BotliteError>::into)?;
            buf.extend_from_slice(&chunk);

            while let Some(pos) = buf.iter().position(|&byte| byte == b'\n') {
                let raw: Vec<u8> = buf.drain(..=pos).collect();
                let line = std::str::from_utf8(&raw)?;
                let line = line.strip_suffix('\n').unwrap_or(line);
                let line = line.strip_suffix('\r').unwrap_or(line);

                match frame::decode_line(line) {
                    StreamItem::Event(event) if event.is_eof() => return,
                    StreamItem::Event(event) if !event.is_success() => {
                        return Err(BotliteError::Rejected(event.msg))?;
                    }
                    StreamItem::Malformed(err) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(raw = %err.raw, error = %err.source, "skipping malformed event line");
                        yield StreamItem::Malformed(err);
                    }
                    item => yield item,
                }
            }
        }

        // The peer may close right after the last event without a final
        // newline; classify the residue as one more line.
        if !buf.is_empty() {
            let line = std::str::from_utf8(&buf)?;
            match frame::decode_line(line) {
                StreamItem::Event(event) if event.is_eof() => return,
                StreamItem::Event(event) if !event.is_success() => {
                    return Err(BotliteError::Rejected(event.msg))?;
                }
                item => yield item,
            }
        }

        return Err(BotliteError::UnexpectedEof)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use futures_util::stream;
    use reqwest::StatusCode;

    fn chunks(parts: Vec<String>) -> impl Stream<Item = std::result::Result<Bytes, ClientError>> {
        let owned: Vec<std::result::Result<Bytes, ClientError>> = parts
            .into_iter()
            .map(|part| Ok(Bytes::from(part.into_bytes())))
            .collect();
        stream::iter(owned)
    }

    fn event_line(round: i64) -> String {
        format!("data:{{\"msg\":\"success\",\"round\":{round}}}\n")
    }

    #[tokio::test]
    async fn yields_events_in_order_then_ends_on_eof() {
        let body = chunks(vec![
            "event:message\n".into(),
            event_line(1),
            "\n".into(),
            event_line(2),
            "data:{\"msg\":\"EOF\"}\n".into(),
        ]);

        let items: Vec<_> = event_stream(body).collect().await;
        assert_eq!(items.len(), 4);
        assert!(matches!(&items[0], Ok(StreamItem::Passthrough(raw)) if raw == "event:message"));
        assert!(matches!(&items[1], Ok(StreamItem::Event(event)) if event.round == 1));
        assert!(matches!(&items[2], Ok(StreamItem::Passthrough(raw)) if raw.is_empty()));
        assert!(matches!(&items[3], Ok(StreamItem::Event(event)) if event.round == 2));
    }

    #[tokio::test]
    async fn reassembles_lines_split_across_chunks() {
        let body = chunks(vec![
            "data:{\"msg\":\"succ".into(),
            "ess\",\"round\":7}\r\ndata:{\"msg\":".into(),
            "\"EOF\"}\n".into(),
        ]);

        let items: Vec<_> = event_stream(body).collect().await;
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], Ok(StreamItem::Event(event)) if event.round == 7));
    }

    #[tokio::test]
    async fn eof_without_trailing_newline_still_terminates_cleanly() {
        let body = chunks(vec![event_line(1), "data:{\"msg\":\"EOF\"}".into()]);

        let items: Vec<_> = event_stream(body).collect().await;
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], Ok(StreamItem::Event(_))));
    }

    #[tokio::test]
    async fn malformed_line_is_surfaced_and_stream_continues() {
        let body = chunks(vec![
            "data:{broken\n".into(),
            event_line(3),
            "data:{\"msg\":\"EOF\"}\n".into(),
        ]);

        let items: Vec<_> = event_stream(body).collect().await;
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], Ok(StreamItem::Malformed(err)) if err.raw == "data:{broken"));
        assert!(matches!(&items[1], Ok(StreamItem::Event(event)) if event.round == 3));
    }

    #[tokio::test]
    async fn rejection_carries_the_status_and_stops_reading() {
        // Two more decodable lines sit in the same chunk behind the terminal
        // event; none of them may surface.
        let body = chunks(vec![format!(
            "{}data:{{\"msg\":\"rejected: blocked term\"}}\n{}{}",
            event_line(1),
            event_line(2),
            "data:{\"msg\":\"EOF\"}\n",
        )]);

        let events = event_stream(body);
        futures_util::pin_mut!(events);

        assert!(matches!(
            events.next().await,
            Some(Ok(StreamItem::Event(event))) if event.round == 1
        ));
        match events.next().await {
            Some(Err(BotliteError::Rejected(msg))) => assert_eq!(msg, "rejected: blocked term"),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn transport_close_without_sentinel_is_not_success() {
        let body = chunks(vec![event_line(1), event_line(2)]);

        let events = event_stream(body);
        futures_util::pin_mut!(events);

        assert!(matches!(events.next().await, Some(Ok(StreamItem::Event(_)))));
        assert!(matches!(events.next().await, Some(Ok(StreamItem::Event(_)))));
        assert!(matches!(
            events.next().await,
            Some(Err(BotliteError::UnexpectedEof))
        ));
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn source_errors_propagate_as_terminal() {
        let failing = stream::iter(vec![
            Ok(Bytes::from_static(b"data:{\"msg\":\"success\",\"round\":1}\n")),
            Err(ClientError::Api {
                status: StatusCode::BAD_GATEWAY,
                body: "upstream gone".into(),
            }),
        ]);

        let events = event_stream(failing);
        futures_util::pin_mut!(events);

        assert!(matches!(events.next().await, Some(Ok(StreamItem::Event(_)))));
        assert!(matches!(
            events.next().await,
            Some(Err(BotliteError::Transport(_)))
        ));
        assert!(events.next().await.is_none());
    }
}
