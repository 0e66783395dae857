use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque negotiation data exchanged between two peers.
///
/// The relay never routes on the contents; [`NegotiationPayload::shape`] only
/// exists so logs can tell offers, answers and candidates apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NegotiationPayload(pub Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Offer,
    Answer,
    Candidate,
    Unrecognized,
}

impl NegotiationPayload {
    pub fn shape(&self) -> PayloadShape {
        let Some(object) = self.0.as_object() else {
            return PayloadShape::Unrecognized;
        };

        match object.get("type").and_then(Value::as_str) {
            Some("offer") => PayloadShape::Offer,
            Some("answer") => PayloadShape::Answer,
            _ if object.contains_key("candidate") => PayloadShape::Candidate,
            _ => PayloadShape::Unrecognized,
        }
    }
}

impl From<Value> for NegotiationPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::Candidate => "candidate",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}
