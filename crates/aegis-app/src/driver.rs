//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use chrono::{DateTime, Local};

use crate::{App, AppEvent};

/// Notification from the Auditor connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed.
    Opened,
    /// Text payload received.
    Message(String),
    /// Connection terminated. Always the last event of a connection.
    Closed {
        /// Human-readable cause. `None` if unknown.
        reason: Option<String>,
    },
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal client and in tests.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, tokio-tungstenite for the
///   WebSocket transport
/// - **Tests**: Scripted events and recorded renders
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next operator event.
    ///
    /// Waits at most one tick. Returns `None` if no event is ready.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Transmit an encoded payload over the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no connection or it has closed.
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Next pending transport event, in delivery order.
    ///
    /// Does not wait. Returns `None` if nothing is pending.
    fn recv_transport(&mut self) -> impl Future<Output = Option<TransportEvent>> + Send;

    /// Start connecting to `url`, replacing any existing connection.
    ///
    /// The outcome is reported later as [`TransportEvent::Opened`] or
    /// [`TransportEvent::Closed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt cannot be started at all.
    fn connect(&mut self, url: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Current wall-clock time, used to stamp log entries.
    fn now(&self) -> DateTime<Local>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
