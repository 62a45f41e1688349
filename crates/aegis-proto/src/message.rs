//! Wire message types.
//!
//! Inbound events carry a `type` discriminator. Only [`Inbound::AuditResponse`]
//! is rendered by the client; the other recognized kinds are emitted by the
//! Auditor on connect and on server-side failures.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Values of the inbound `type` discriminator.
pub mod kind {
    /// Audit result for an operator message.
    pub const AUDIT_RESPONSE: &str = "audit_response";
    /// Greeting sent by the Auditor after accepting the connection.
    pub const CONNECTION_ESTABLISHED: &str = "connection_established";
    /// Server-side processing failure.
    pub const ERROR: &str = "error";
}

/// Audit result produced by the Auditor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditResponse {
    /// Audit text. May span several lines.
    #[serde(default)]
    pub message: String,

    /// Optional backend annotation. `None` when absent, `null` or empty.
    #[serde(default, deserialize_with = "lenient_signature")]
    pub thought_signature: Option<String>,
}

/// Accept any JSON value as a signature.
///
/// Strings are kept. Non-zero numbers and `true` are stringified. Falsy
/// values, arrays and objects carry no annotation.
fn lenient_signature<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let signature = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    };
    Ok(signature)
}

impl AuditResponse {
    /// Create an audit response.
    pub fn new(message: impl Into<String>, thought_signature: Option<String>) -> Self {
        Self { message: message.into(), thought_signature }.normalized()
    }

    /// Collapse an empty thought signature into `None`.
    pub(crate) fn normalized(mut self) -> Self {
        if self.thought_signature.as_deref().is_some_and(str::is_empty) {
            self.thought_signature = None;
        }
        self
    }
}

/// Decoded inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// `audit_response`: rendered into the feed.
    AuditResponse(AuditResponse),

    /// `connection_established`: greeting from the Auditor.
    ConnectionEstablished {
        /// Greeting text.
        message: String,
    },

    /// `error`: the Auditor failed to process a message.
    Error {
        /// Error description.
        message: String,
    },

    /// Missing, non-string or unknown `type`.
    Unrecognized {
        /// The `type` value, if it was a string.
        kind: Option<String>,
    },
}

impl Inbound {
    /// The wire discriminator for this event. `None` if absent.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Inbound::AuditResponse(_) => Some(kind::AUDIT_RESPONSE),
            Inbound::ConnectionEstablished { .. } => Some(kind::CONNECTION_ESTABLISHED),
            Inbound::Error { .. } => Some(kind::ERROR),
            Inbound::Unrecognized { kind } => kind.as_deref(),
        }
    }
}

/// Operator message sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    /// Operator text, transmitted verbatim.
    pub message: String,
}
