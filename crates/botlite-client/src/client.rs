use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient,
    header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::time::Duration;

use botlite_core::{error::Result, frame::StreamItem, request::QueryRequest};

use crate::error::ClientError;
use crate::reader;

const STREAM_PATH: &str = "/api/v2/stream";

/// Minimal HTTP client for the streaming query endpoint.
///
/// * One call ▶ one held-open SSE response, consumed incrementally.
/// * Accepts the request / event structs defined in `botlite-core`.
/// * Shares a single `reqwest::Client`, so cloning `BotliteClient` is cheap.
#[derive(Clone)]
pub struct BotliteClient {
    http: HttpClient,
    base: String,
}

impl BotliteClient {
    /// Convenience constructor building a default `reqwest` client with a
    /// 10 s connect timeout.  No whole-request deadline is set: the response
    /// body stays open for as long as the server streams.  Callers who want
    /// a hard deadline on a silent peer should pass their own client via
    /// [`Self::with_http`].
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("building reqwest client");

        Self::with_http(http, base_url)
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, timeouts, etc.
    pub fn with_http(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base: base_url.into(),
        }
    }

    /// Open one query stream.
    ///
    /// The stream yields decoded events and passthrough lines in arrival
    /// order; termination semantics are those of [`reader::event_stream`].
    /// A non-success HTTP status surfaces as a terminal transport error
    /// before any item is yielded.
    pub fn query_stream(
        &self,
        request: QueryRequest,
    ) -> impl Stream<Item = Result<StreamItem>> + '_ {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let url = format!("{}{}", self.base, STREAM_PATH);

        try_stream! {
            #[cfg(feature = "tracing")]
            tracing::debug!(biz_id = request.biz_id, session_id = %request.session_id, "opening query stream");

            let resp = self
                .http
                .post(url)
                .headers(headers)
                .json(&request)
                .send()
                .await
                .map_err(ClientError::Http)?;

            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(ClientError::Api { status, body })?;
            }

            let body = resp.bytes_stream().map(|chunk| chunk.map_err(ClientError::Http));
            let events = reader::event_stream(body);
            futures_util::pin_mut!(events);

            while let Some(item) = events.next().await {
                yield item?;
            }
        }
    }
}
