use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Tag name carrying the action marker on both request and response messages.
pub const TAG_ACTION: &str = "Action";
/// Tag name carrying the normalized route path.
pub const TAG_ROUTE: &str = "Route";
/// Tag name carrying the request verb.
pub const TAG_METHOD: &str = "Method";
/// Tag name carrying the numeric-as-string status code on responses.
pub const TAG_STATUS: &str = "Status";
/// Tag name carrying the optional error detail on responses.
pub const TAG_ERROR: &str = "Error";
/// Prefix for per-field body tags (`X-Body-<key>`).
pub const BODY_TAG_PREFIX: &str = "X-Body-";
/// `Action` value marking an outbound route-call request.
pub const ACTION_CALL_ROUTE: &str = "Call-Route";
/// `Action` value marking an inbound message as the response to a route call.
pub const ACTION_RESPONSE: &str = "Aoxpress-Response";

/// A name/value pair attached to a message.
///
/// Tags are the structured metadata channel of the network. Duplicate names
/// are allowed on the wire; consumers in this crate treat the first
/// occurrence as authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Request verb for a route call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl Method {
    /// The wire spelling of the verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    /// Parses the wire spelling. Anything other than `GET` or `POST` is
    /// rejected before any network interaction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            other => Err(Error::InvalidMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// A single body field value: a string, number, or boolean.
///
/// Rendered onto the wire with its canonical string form (`Display`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for BodyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyValue::String(s) => write!(f, "{}", s),
            BodyValue::Number(n) => write!(f, "{}", n),
            BodyValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for BodyValue {
    fn from(value: &str) -> Self {
        BodyValue::String(value.to_string())
    }
}

impl From<String> for BodyValue {
    fn from(value: String) -> Self {
        BodyValue::String(value)
    }
}

impl From<bool> for BodyValue {
    fn from(value: bool) -> Self {
        BodyValue::Bool(value)
    }
}

impl From<i64> for BodyValue {
    fn from(value: i64) -> Self {
        BodyValue::Number(serde_json::Number::from(value))
    }
}

impl From<u64> for BodyValue {
    fn from(value: u64) -> Self {
        BodyValue::Number(serde_json::Number::from(value))
    }
}

impl From<i32> for BodyValue {
    fn from(value: i32) -> Self {
        BodyValue::Number(serde_json::Number::from(value))
    }
}

/// Request body fields, keyed by field name.
///
/// A `BTreeMap` so body tags are emitted in a deterministic (sorted) order.
pub type Body = BTreeMap<String, BodyValue>;

/// A unit of communication returned by the network.
///
/// Field names are serde-renamed to the wire spelling (`Tags`, `Data`, `id`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "Tags", default)]
    pub tags: Vec<Tag>,

    /// Optional string payload.
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Correlation identifier. For mutating calls the orchestration stamps
    /// this with the send identifier before normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Message {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self {
            tags,
            ..Default::default()
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// The set of messages produced by one network round trip.
///
/// Unknown sibling fields in the wire object (spawns, gas accounting, ...)
/// are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageSet {
    #[serde(rename = "Messages", default)]
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_wire_spelling() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::GET);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::POST);
    }

    #[test]
    fn method_rejects_unsupported_verbs() {
        for verb in ["PUT", "DELETE", "get", ""] {
            let err = verb.parse::<Method>().unwrap_err();
            assert!(matches!(err, Error::InvalidMethod { .. }), "{}", verb);
        }
    }

    #[test]
    fn body_value_canonical_strings() {
        assert_eq!(BodyValue::from("bob").to_string(), "bob");
        assert_eq!(BodyValue::from(2i64).to_string(), "2");
        assert_eq!(BodyValue::from(true).to_string(), "true");
        let fractional = BodyValue::Number(serde_json::Number::from_f64(1.5).unwrap());
        assert_eq!(fractional.to_string(), "1.5");
    }

    #[test]
    fn message_uses_wire_field_names() {
        let json = r#"{"Tags":[{"name":"Action","value":"Aoxpress-Response"}],"Data":"hi","id":"m1"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.tags[0].name, "Action");
        assert_eq!(message.data.as_deref(), Some("hi"));
        assert_eq!(message.id.as_deref(), Some("m1"));
    }

    #[test]
    fn message_set_ignores_unknown_wire_fields() {
        let json = r#"{"Messages":[],"Spawns":[],"Output":{"data":"x"},"GasUsed":0}"#;
        let set: MessageSet = serde_json::from_str(json).unwrap();
        assert!(set.messages.is_empty());
    }

    #[test]
    fn message_without_data_deserializes() {
        let json = r#"{"Tags":[]}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert!(message.data.is_none());
        assert!(message.id.is_none());
    }
}
