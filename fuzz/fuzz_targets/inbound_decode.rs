//! Fuzz target for decode_inbound
//!
//! This fuzzer feeds arbitrary text to the inbound decoder to find:
//! - Parser crashes or panics
//! - Empty signatures surviving normalization
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use aegis_proto::{Inbound, decode_inbound};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(Inbound::AuditResponse(response)) = decode_inbound(raw) {
        assert_ne!(response.thought_signature.as_deref(), Some(""));
    }
});
