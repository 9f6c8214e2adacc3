use botlite_core::error::BotliteError;
use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level failures the HTTP client can hit before or while the
/// event stream is being read.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },
}

impl From<ClientError> for BotliteError {
    fn from(value: ClientError) -> Self {
        BotliteError::Transport(Box::new(value))
    }
}
