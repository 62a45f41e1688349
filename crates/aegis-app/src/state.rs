//! Observable application state types.
//!
//! [`ConnectionState`] is the lifecycle of the single Auditor connection;
//! [`Status`] is the operator-visible projection of it that the status bar
//! renders.

/// Status text while the connection is open.
pub const STATUS_ACTIVE: &str = "ACTIVE - MONITORING";

/// Status text once the connection has closed.
pub const STATUS_OFFLINE: &str = "OFFLINE";

/// Status text while the handshake is in progress.
pub const STATUS_CONNECTING: &str = "CONNECTING";

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress.
    Connecting,
    /// Handshake completed; events are dispatched.
    Open,
    /// Connection terminated. Terminal unless a retry is scheduled.
    Closed,
    /// Closed with a retry scheduled by the reconnect policy.
    Reconnecting {
        /// 1-based attempt number of the scheduled retry.
        attempt: u32,
    },
}

impl ConnectionState {
    /// Inbound events are accepted.
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    /// Operator-visible status for this state.
    pub fn status(&self) -> Status {
        match self {
            ConnectionState::Connecting => {
                Status { text: STATUS_CONNECTING.into(), indicator: Indicator::Pending, pulsing: true }
            },
            ConnectionState::Open => {
                Status { text: STATUS_ACTIVE.into(), indicator: Indicator::Positive, pulsing: true }
            },
            ConnectionState::Closed => {
                Status { text: STATUS_OFFLINE.into(), indicator: Indicator::Negative, pulsing: false }
            },
            ConnectionState::Reconnecting { attempt } => Status {
                text: format!("RECONNECTING (attempt {attempt})"),
                indicator: Indicator::Pending,
                pulsing: false,
            },
        }
    }
}

/// Affect of the liveness indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Connected and monitoring.
    Positive,
    /// Waiting on a handshake or retry.
    Pending,
    /// Offline.
    Negative,
}

/// Operator-visible connection status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Status text.
    pub text: String,
    /// Indicator affect.
    pub indicator: Indicator,
    /// Liveness animation is running.
    pub pulsing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_active() {
        let status = ConnectionState::Open.status();
        assert_eq!(status.text, "ACTIVE - MONITORING");
        assert_eq!(status.indicator, Indicator::Positive);
    }

    #[test]
    fn closed_is_offline_without_pulse() {
        let status = ConnectionState::Closed.status();
        assert_eq!(status.text, "OFFLINE");
        assert_eq!(status.indicator, Indicator::Negative);
        assert!(!status.pulsing);
    }

    #[test]
    fn reconnecting_shows_attempt() {
        let status = ConnectionState::Reconnecting { attempt: 3 }.status();
        assert_eq!(status.text, "RECONNECTING (attempt 3)");
        assert!(!ConnectionState::Reconnecting { attempt: 3 }.is_open());
    }
}
