//! JSON encoding and decoding.
//!
//! Decoding is lenient about the discriminator: payloads that are well-formed
//! JSON but carry no recognizable `type` decode to [`Inbound::Unrecognized`]
//! rather than failing. Only syntactically broken payloads, or recognized
//! events with wrongly-typed fields, are errors.

use serde_json::{Value, json};

use crate::{AuditResponse, CodecError, Inbound, Outbound, kind};

/// Wrap operator text in an outbound envelope.
///
/// The text is transmitted verbatim, including surrounding whitespace.
pub fn encode_outbound(text: &str) -> Result<String, CodecError> {
    let outbound = Outbound { message: text.to_owned() };
    serde_json::to_string(&outbound).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parse an inbound payload.
pub fn decode_inbound(raw: &str) -> Result<Inbound, CodecError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CodecError::Malformed(e.to_string()))?;

    let Some(discriminator) = value.get("type").and_then(Value::as_str).map(str::to_owned) else {
        return Ok(Inbound::Unrecognized { kind: None });
    };

    match discriminator.as_str() {
        kind::AUDIT_RESPONSE => {
            let response: AuditResponse =
                serde_json::from_value(value).map_err(|e| CodecError::Malformed(e.to_string()))?;
            Ok(Inbound::AuditResponse(response.normalized()))
        },
        kind::CONNECTION_ESTABLISHED => {
            Ok(Inbound::ConnectionEstablished { message: text_field(&value, "message") })
        },
        kind::ERROR => Ok(Inbound::Error { message: text_field(&value, "message") }),
        _ => Ok(Inbound::Unrecognized { kind: Some(discriminator) }),
    }
}

/// Serialize an inbound event. Used by the Auditor side of the connection.
pub fn encode_inbound(event: &Inbound) -> Result<String, CodecError> {
    let value = match event {
        Inbound::AuditResponse(response) => json!({
            "type": kind::AUDIT_RESPONSE,
            "message": response.message,
            "thought_signature": response.thought_signature,
        }),
        Inbound::ConnectionEstablished { message } => json!({
            "type": kind::CONNECTION_ESTABLISHED,
            "message": message,
        }),
        Inbound::Error { message } => json!({ "type": kind::ERROR, "message": message }),
        Inbound::Unrecognized { kind: Some(other) } => json!({ "type": other }),
        Inbound::Unrecognized { kind: None } => json!({}),
    };
    serde_json::to_string(&value).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parse an outbound envelope. Used by the Auditor side of the connection.
pub fn decode_outbound(raw: &str) -> Result<Outbound, CodecError> {
    serde_json::from_str(raw).map_err(|e| CodecError::Malformed(e.to_string()))
}

fn text_field(value: &Value, field: &str) -> String {
    value.get(field).and_then(Value::as_str).unwrap_or_default().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_hello() {
        assert_eq!(encode_outbound("hello"), Ok(r#"{"message":"hello"}"#.to_string()));
    }

    #[test]
    fn encode_keeps_whitespace() {
        assert_eq!(encode_outbound("  hi "), Ok(r#"{"message":"  hi "}"#.to_string()));
    }

    #[test]
    fn encode_escapes_quotes() {
        assert_eq!(encode_outbound(r#"say "hi""#), Ok(r#"{"message":"say \"hi\""}"#.to_string()));
    }

    #[test]
    fn decode_audit_response() {
        let raw = r#"{"type":"audit_response","message":"policy violation detected","thought_signature":"sig-42"}"#;
        assert_eq!(
            decode_inbound(raw),
            Ok(Inbound::AuditResponse(AuditResponse {
                message: "policy violation detected".into(),
                thought_signature: Some("sig-42".into()),
            }))
        );
    }

    #[test]
    fn decode_null_signature() {
        let raw = r#"{"type":"audit_response","message":"ok","thought_signature":null}"#;
        let Ok(Inbound::AuditResponse(response)) = decode_inbound(raw) else {
            unreachable!("expected audit response");
        };
        assert_eq!(response.thought_signature, None);
    }

    #[test]
    fn decode_missing_signature() {
        let raw = r#"{"type":"audit_response","message":"ok"}"#;
        assert!(matches!(
            decode_inbound(raw),
            Ok(Inbound::AuditResponse(AuditResponse { thought_signature: None, .. }))
        ));
    }

    #[test]
    fn decode_empty_signature_is_absent() {
        let raw = r#"{"type":"audit_response","message":"ok","thought_signature":""}"#;
        assert!(matches!(
            decode_inbound(raw),
            Ok(Inbound::AuditResponse(AuditResponse { thought_signature: None, .. }))
        ));
    }

    #[test]
    fn decode_keeps_message_with_odd_signature() {
        let raw = r#"{"type":"audit_response","message":"policy violation","thought_signature":true}"#;
        assert_eq!(
            decode_inbound(raw),
            Ok(Inbound::AuditResponse(AuditResponse {
                message: "policy violation".into(),
                thought_signature: Some("true".into()),
            }))
        );
    }

    #[test]
    fn decode_missing_type_is_unrecognized() {
        assert_eq!(decode_inbound(r#"{"message":"x"}"#), Ok(Inbound::Unrecognized { kind: None }));
    }

    #[test]
    fn decode_misnamed_type_is_unrecognized() {
        assert_eq!(
            decode_inbound(r#"{"type":"audit","message":"x"}"#),
            Ok(Inbound::Unrecognized { kind: Some("audit".into()) })
        );
    }

    #[test]
    fn decode_non_object_is_unrecognized() {
        assert_eq!(decode_inbound("[1,2,3]"), Ok(Inbound::Unrecognized { kind: None }));
        assert_eq!(decode_inbound("42"), Ok(Inbound::Unrecognized { kind: None }));
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(matches!(decode_inbound("{not json"), Err(CodecError::Malformed(_))));
        assert!(matches!(decode_inbound(""), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn decode_wrong_field_type_fails() {
        let raw = r#"{"type":"audit_response","message":7}"#;
        assert!(matches!(decode_inbound(raw), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn decode_server_greeting() {
        let raw = r#"{"type":"connection_established","message":"Aegis Core Auditor Connected"}"#;
        assert_eq!(
            decode_inbound(raw),
            Ok(Inbound::ConnectionEstablished { message: "Aegis Core Auditor Connected".into() })
        );
    }

    #[test]
    fn inbound_encoding_decodes_back() {
        let event = Inbound::AuditResponse(AuditResponse::new("ok", Some("sim_1".into())));
        let raw = encode_inbound(&event);
        assert_eq!(raw.and_then(|r| decode_inbound(&r)), Ok(event));
    }

    #[test]
    fn decode_outbound_envelope() {
        assert_eq!(
            decode_outbound(r#"{"message":"hi"}"#),
            Ok(Outbound { message: "hi".into() })
        );
    }
}
