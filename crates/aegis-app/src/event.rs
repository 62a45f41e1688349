//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - Operator interactions (keyboard, submit, resize) and system ticks.
//! - Transport notifications about the Auditor connection.

use chrono::{DateTime, Local};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Explicit submit of the input line. Equivalent to the Enter key.
    Submit,

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Handshake completed.
    Opened,

    /// Connection terminated (handshake failure, protocol error, or close).
    Closed {
        /// Human-readable cause. `None` if unknown.
        reason: Option<String>,
    },

    /// Raw inbound payload.
    Payload {
        /// Payload text as delivered by the transport.
        raw: String,
        /// Wall-clock time the payload was handed to the App.
        received_at: DateTime<Local>,
    },
}
