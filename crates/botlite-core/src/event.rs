//! Decoded stream events for the `/api/v2/stream` endpoint.
//!
//! One [`QueryEvent`] corresponds to one `data:` line on the wire.  The
//! server omits fields it has nothing to say about, so every struct here
//! deserializes with `#[serde(default)]` and materializes zero values for
//! absent fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::frame::{MSG_EOF, MSG_SUCCESS};

/// A single decoded unit of the event stream.
///
/// Events are transient: the reader produces them in arrival order and the
/// caller consumes them immediately.  `msg` doubles as the stream control
/// channel, see [`QueryEvent::is_eof`] and [`QueryEvent::is_success`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryEvent {
    pub biz_id: u64,
    pub session_id: String,
    /// Server-assigned identifier of this request.
    pub search_id: String,
    pub query: String,
    /// Answer candidates; more than one entry means a multi-answer reply.
    pub answer_list: Vec<Answer>,
    pub intent_matches: Vec<Intent>,
    pub task_status: TaskStatus,
    pub is_rejected: bool,
    pub sentiment: Vec<Sentiment>,
    pub sensitivity: Sensitivity,
    pub slots: Vec<Slot>,
    /// Actions attached to events the query triggered.
    pub actions: Vec<EventAction>,
    /// Aggregate per-module timing, rendered by the server.
    pub time_cost: String,
    pub round: i64,
    /// `success` for an in-progress event, `EOF` at end of stream, anything
    /// else is an error description.
    pub msg: String,
}

impl QueryEvent {
    /// True when this event is the graceful end-of-stream marker.
    pub fn is_eof(&self) -> bool {
        self.msg == MSG_EOF
    }

    /// True for an ordinary in-progress event.
    pub fn is_success(&self) -> bool {
        self.msg == MSG_SUCCESS
    }
}

/// One answer candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answer {
    /// Which bot produced the answer, e.g. `faq`, `task`, `chat`, `dm`.
    /// Kept open: servers add new bot types without a protocol bump.
    pub r#type: String,
    pub biz_intent_id: u64,
    pub text: String,
    pub relate_questions: Vec<String>,
}

/// How a single intent matched the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intent {
    pub biz_intent_id: u64,
    /// Canonical question of the intent.
    pub name: String,
    pub r#type: String,
    pub exact_hit: bool,
    /// Position after re-ranking; may disagree with `score` ordering.
    pub rank: i64,
    /// Similarity score, at most 1.0.
    pub score: f32,
    /// Shared-library intent id, 0 for custom intents.
    pub intent_id: u64,
}

/// Progress of the task-oriented sub-bot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStatus {
    pub id: u64,
    /// Shared-library task id, 0 for custom tasks.
    pub task_id: u64,
    /// Which task engine answered, e.g. `dialflow`, `skill`, `slotfill`.
    pub r#type: String,
    pub name: String,
    pub node_id: String,
    pub node_name: String,
    pub not_finished: bool,
    /// While occupied, no other task may take over the session.
    pub is_occupied: bool,
    pub is_updated: bool,
    /// Slots collected during the current round.
    pub current_slots: Vec<SlotNameValue>,
    /// Every slot collected over the whole session.
    pub session_slots: Vec<SlotNameValue>,
    pub params: Vec<Param>,
    pub life_cycle: i64,
    pub latest_answer: String,
    /// Round counter of this sub-task, starts at 0.  Independent of the
    /// session-level `round` on [`QueryEvent`].
    pub turn: i64,
}

/// A collected slot as name/value, with an optional normalized rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotNameValue {
    pub name: String,
    pub value: String,
    pub norm: String,
}

/// Free-form key/value parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Sentiment classification of the query.
///
/// `label`: 0 negative, 1 neutral, 2 positive.  `r#type` is the second-level
/// category of negative emotions (-1 when not meaningful).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentiment {
    pub label: i64,
    /// Label confidence in `0.0..=1.0`.
    pub score: f32,
    pub r#type: i64,
}

/// Sensitive-content screening result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sensitivity {
    /// 0 no hit, 1 low, 2 medium, 3 high.
    pub label: i64,
    /// The matched term when `label > 0`, empty otherwise.
    pub sensitive_hit: String,
}

/// A recognized slot with its span in the query text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slot {
    pub query: String,
    pub value: String,
    pub norm: NormValue,
    pub r#type: String,
    pub start: i64,
    pub end: i64,
    pub is_entity: bool,
    pub is_number: bool,
    pub source: String,
}

/// Normalized slot value.
///
/// The wire encodes the variant explicitly (`{"type": "date", "value": ...}`)
/// so decoding, comparison and re-encoding are total.  `None` is what a slot
/// without a usable normalization carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NormValue {
    #[default]
    None,
    Text(String),
    Number(f64),
    Date(String),
}

impl fmt::Display for NormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormValue::None => Ok(()),
            NormValue::Text(text) => write!(f, "{text}"),
            NormValue::Number(number) => write!(f, "{number}"),
            NormValue::Date(date) => write!(f, "{date}"),
        }
    }
}

/// An action attached to a triggered event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventAction {
    pub event_id: u64,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub r#type: ActionKind,
    /// Opaque action configuration, interpreted by the channel.
    pub config: String,
}

/// The documented, closed set of action types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    #[default]
    Text,
    Template,
    Command,
}
