//! Outbound session request for the `/api/v2/stream` endpoint.
//!
//! [`QueryRequest`] is built once per session-initiation call, is immutable
//! after [`QueryRequestBuilder::build`], and performs no I/O of its own; the
//! transport layer serializes and sends it.

use serde::{Deserialize, Serialize};

use crate::error::{BotliteError, Result};
use crate::event::Param;

/// Default for [`QueryRequest::need_dump`]: sessions are persisted unless the
/// caller opts out.
pub const DEFAULT_NEED_DUMP: bool = true;

/// Length of a generated session id.
pub const SESSION_ID_LEN: usize = 10;

/// Alphabet a generated session id draws from.
pub const SESSION_ID_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One round of dialogue, as the server expects it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub biz_id: u64,
    pub session_id: String,
    pub query: String,
    /// Whether the server persists this session.
    pub need_dump: bool,
    /// Whether sentiment recognition runs for this query.
    pub emotion_on: bool,
    pub user_id: String,
    /// Channel tag, e.g. which surface the query came from.
    pub client: String,
    /// Typed side-channel hints passed alongside the query.
    pub drive_params: Vec<DriveParam>,
    /// Grouped untyped hints, e.g. slots known without entity recognition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_params: Vec<TypedParam>,
}

impl QueryRequest {
    /// Start building a request for the given tenant.
    pub fn builder(biz_id: u64) -> QueryRequestBuilder {
        QueryRequestBuilder {
            biz_id,
            query: None,
            session_id: None,
            need_dump: None,
            emotion_on: None,
            user_id: None,
            client: None,
            drive_params: None,
            extra_params: None,
        }
    }
}

/// A typed key/value hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveParam {
    pub key: String,
    pub value: String,
    pub r#type: String,
}

/// A group of untyped hints sharing one type tag.  `slot` is the type the
/// server currently understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedParam {
    pub r#type: String,
    pub params: Vec<Param>,
}

#[macro_export]
macro_rules! impl_builder_methods {
    ($builder:ident, $($field:ident: $field_type:ty),*) => {
        impl $builder {
            $(
                pub fn $field(mut self, $field: $field_type) -> Self {
                    self.$field = Some($field);
                    self
                }
            )*
        }
    };
}

/// Builder for [`QueryRequest`].
///
/// Every field left unset resolves to its documented default in
/// [`Self::build`]; a missing session id is generated there.
#[derive(Debug)]
pub struct QueryRequestBuilder {
    biz_id: u64,
    query: Option<String>,
    session_id: Option<String>,
    need_dump: Option<bool>,
    emotion_on: Option<bool>,
    user_id: Option<String>,
    client: Option<String>,
    drive_params: Option<Vec<DriveParam>>,
    extra_params: Option<Vec<TypedParam>>,
}

impl_builder_methods!(
    QueryRequestBuilder,
    query: String,
    session_id: String,
    need_dump: bool,
    emotion_on: bool,
    user_id: String,
    client: String,
    drive_params: Vec<DriveParam>,
    extra_params: Vec<TypedParam>
);

impl QueryRequestBuilder {
    /// Finalise the builder.
    ///
    /// # Errors
    ///
    /// * [`BotliteError::InvalidRequest`] – if no non-empty query was set.
    pub fn build(self) -> Result<QueryRequest> {
        let query = self
            .query
            .filter(|query| !query.is_empty())
            .ok_or_else(|| BotliteError::InvalidRequest("query must not be empty".into()))?;

        Ok(QueryRequest {
            biz_id: self.biz_id,
            session_id: self
                .session_id
                .unwrap_or_else(|| generate_session_id(SESSION_ID_LEN)),
            query,
            need_dump: self.need_dump.unwrap_or(DEFAULT_NEED_DUMP),
            emotion_on: self.emotion_on.unwrap_or(false),
            user_id: self.user_id.unwrap_or_default(),
            client: self.client.unwrap_or_default(),
            drive_params: self.drive_params.unwrap_or_default(),
            extra_params: self.extra_params.unwrap_or_default(),
        })
    }
}

/// Draw `len` symbols from [`SESSION_ID_ALPHABET`] using the operating
/// system's CSPRNG.
pub fn generate_session_id(len: usize) -> String {
    // 248 is the largest multiple of 62 in byte range; bytes above it are
    // redrawn so every symbol stays equally likely.
    const LIMIT: u8 = (u8::MAX / 62) * 62;

    let mut id = String::with_capacity(len);
    let mut buf = [0u8; 32];
    while id.len() < len {
        getrandom::fill(&mut buf).expect("OS random source unavailable");
        for byte in buf {
            if byte < LIMIT && id.len() < len {
                id.push(SESSION_ID_ALPHABET[(byte % 62) as usize] as char);
            }
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_builder_fills_documented_defaults() {
        let request = QueryRequest::builder(103)
            .query("test".to_string())
            .build()
            .unwrap();

        assert_eq!(request.biz_id, 103);
        assert_eq!(request.query, "test");
        assert_eq!(request.session_id.len(), SESSION_ID_LEN);
        assert!(request
            .session_id
            .bytes()
            .all(|byte| SESSION_ID_ALPHABET.contains(&byte)));
        // The documented default: sessions persist unless the caller opts out.
        assert!(request.need_dump);
        assert_eq!(request.need_dump, DEFAULT_NEED_DUMP);
        assert!(!request.emotion_on);
        assert_eq!(request.user_id, "");
        assert_eq!(request.client, "");
        assert!(request.drive_params.is_empty());
        assert!(request.extra_params.is_empty());
    }

    #[test]
    fn missing_or_empty_query_is_rejected_before_any_io() {
        for builder in [
            QueryRequest::builder(103),
            QueryRequest::builder(103).query(String::new()),
        ] {
            match builder.build() {
                Err(BotliteError::InvalidRequest(_)) => {}
                other => panic!("expected InvalidRequest, got {other:?}"),
            }
        }
    }

    #[test]
    fn supplied_session_id_wins_over_generation() {
        let request = QueryRequest::builder(1)
            .query("hi".to_string())
            .session_id("fixed-id".to_string())
            .build()
            .unwrap();
        assert_eq!(request.session_id, "fixed-id");
    }

    #[test]
    fn generated_ids_are_independent_and_well_formed() {
        // Uniform rejection sampling: every character must come from the
        // alphabet and consecutive draws must not repeat.
        let a = generate_session_id(SESSION_ID_LEN);
        let b = generate_session_id(SESSION_ID_LEN);
        assert_eq!(a.len(), SESSION_ID_LEN);
        assert!(a.bytes().all(|byte| SESSION_ID_ALPHABET.contains(&byte)));
        assert_ne!(a, b);

        let long = generate_session_id(100);
        assert_eq!(long.len(), 100);
    }

    #[test]
    fn wire_shape_round_trips() {
        let request = QueryRequest::builder(103)
            .query("where is my order".to_string())
            .user_id("10001".to_string())
            .need_dump(false)
            .drive_params(vec![DriveParam {
                key: "city".into(),
                value: "Berlin".into(),
                r#type: "text".into(),
            }])
            .extra_params(vec![TypedParam {
                r#type: "slot".into(),
                params: vec![Param {
                    key: "product".into(),
                    value: "kettle".into(),
                }],
            }])
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["biz_id"], 103);
        assert_eq!(json["need_dump"], false);
        assert_eq!(json["drive_params"][0]["type"], "text");
        assert_eq!(json["extra_params"][0]["params"][0]["key"], "product");

        let restored: QueryRequest = serde_json::from_value(json).unwrap();
        assert_eq!(restored, request);
    }

    #[test]
    fn empty_extra_params_stay_off_the_wire() {
        let request = QueryRequest::builder(1).query("hi".to_string()).build().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("extra_params").is_none());
        // ...but the field still materializes on the way back in.
        let restored: QueryRequest = serde_json::from_value(json).unwrap();
        assert_eq!(restored, request);
    }
}
