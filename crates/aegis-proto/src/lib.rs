//! Aegis Auditor wire protocol
//!
//! JSON messages exchanged with the Auditor over its streaming endpoint. The
//! protocol is asymmetric: the client sends [`Outbound`] messages and receives
//! [`Inbound`] events, discriminated by their `type` field.
//!
//! # Components
//!
//! - [`encode_outbound`]: Wrap operator text in an outbound envelope
//! - [`decode_inbound`]: Parse an inbound payload into a typed event
//! - [`CodecError`]: Encoding and decoding failures

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod error;
mod message;

pub use codec::{decode_inbound, decode_outbound, encode_inbound, encode_outbound};
pub use error::CodecError;
pub use message::{AuditResponse, Inbound, Outbound, kind};
