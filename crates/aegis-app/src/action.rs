//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use std::time::Duration;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Open the Auditor connection.
    Connect {
        /// Streaming endpoint URL.
        url: String,
    },

    /// Encode and transmit an operator message.
    Send {
        /// Operator text, untrimmed.
        message: String,
    },

    /// Retry the connection after a delay.
    ScheduleReconnect {
        /// 1-based attempt number.
        attempt: u32,
        /// Delay before the attempt.
        delay: Duration,
    },
}
