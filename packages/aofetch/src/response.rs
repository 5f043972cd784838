//! Response correlation and normalization.
//!
//! A network round trip returns a set of messages; at most one of them is
//! the response to this call, marked by an `Action` = `Aoxpress-Response`
//! tag. [`find_response`] locates it and [`normalize`] flattens its
//! heterogeneous tag/data shape into a [`FetchResponse`] with every field
//! defined.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::types::{Message, Tag, ACTION_RESPONSE, TAG_ACTION, TAG_ERROR, TAG_STATUS};

/// Sentinel status meaning "unknown/unset".
pub const STATUS_UNSET: i64 = -1;

/// The literal status value treated as success.
const STATUS_OK: &str = "200";

/// The normalized result of a fetch call.
///
/// Every field is always defined; absent inputs take the documented
/// defaults. A non-empty `error` signals failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// HTTP-like status code, [`STATUS_UNSET`] when the response carried no
    /// `Status` tag (or one that does not parse as an integer).
    #[serde(default = "default_status")]
    pub status: i64,

    /// Raw payload, verbatim. Empty when the response carried no data.
    #[serde(default)]
    pub text: String,

    /// Payload parsed as JSON, best-effort. Parse failure degrades to an
    /// empty object; any successfully parsed value (including a top-level
    /// array) is preserved as-is.
    #[serde(default = "empty_object")]
    pub json: Value,

    /// Error detail. Non-empty whenever the response's `Status` tag is
    /// present and not `"200"`.
    #[serde(default)]
    pub error: String,

    /// The mutation's own message identifier; empty for read-only calls.
    #[serde(default)]
    pub id: String,
}

fn default_status() -> i64 {
    STATUS_UNSET
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Default for FetchResponse {
    fn default() -> Self {
        Self {
            status: STATUS_UNSET,
            text: String::new(),
            json: empty_object(),
            error: String::new(),
            id: String::new(),
        }
    }
}

impl FetchResponse {
    /// Check if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Try to deserialize the parsed payload into a specific type.
    pub fn json_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.json.clone())
    }
}

/// Locates the one message that constitutes the response to this call: the
/// first message in sequence order carrying the response marker tag.
///
/// The remote process is assumed to emit at most one response message per
/// call; if several match, the first wins.
pub fn find_response(messages: &[Message]) -> Result<&Message, Error> {
    messages
        .iter()
        .find(|m| {
            m.tags
                .iter()
                .any(|t| t.name == TAG_ACTION && t.value == ACTION_RESPONSE)
        })
        .ok_or(Error::NoResponseFound)
}

/// Normalizes a response message into a [`FetchResponse`]. Total: any
/// well-formed message maps to a schema-valid response, never an error.
///
/// - Duplicate tag names resolve to the first occurrence in sequence order.
/// - A `Status` tag that does not parse as an integer leaves the
///   [`STATUS_UNSET`] sentinel in place.
/// - A payload that is not valid JSON leaves `json` as the empty object;
///   `text` keeps the raw string either way.
pub fn normalize(message: &Message) -> FetchResponse {
    let tags = tags_to_map(&message.tags);
    let mut response = FetchResponse::default();

    if let Some(id) = &message.id {
        response.id = id.clone();
    }

    let status = tags.get(TAG_STATUS).copied();
    if let Some(status) = status {
        response.status = status.parse().unwrap_or(STATUS_UNSET);
    }

    if let Some(data) = message.data.as_deref().filter(|d| !d.is_empty()) {
        response.text = data.to_string();
        if let Ok(parsed) = serde_json::from_str(data) {
            response.json = parsed;
        }
    }

    if status.is_some_and(|s| s != STATUS_OK) {
        response.error = tags
            .get(TAG_ERROR)
            .filter(|e| !e.is_empty())
            .map(|e| e.to_string())
            .or_else(|| message.data.clone())
            .unwrap_or_default();
    }

    response
}

/// Reduces a tag sequence to a name→value mapping, first occurrence wins.
fn tags_to_map(tags: &[Tag]) -> HashMap<&str, &str> {
    let mut map = HashMap::new();
    for tag in tags {
        map.entry(tag.name.as_str()).or_insert(tag.value.as_str());
    }
    map
}
