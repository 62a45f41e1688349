//! Application layer for the Aegis Auditor monitor
//!
//! Pure state machines and a generic runtime for the monitor client,
//! enabling deterministic testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: Connection lifecycle, feed and input state machine
//! - [`Feed`]: Newest-first rendered audit entries
//! - [`classify`]: Severity heuristic for audit text
//! - [`Endpoint`]: Streaming endpoint derived from an origin
//! - [`ReconnectPolicy`]: Backoff policy for the reconnect supervisor
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod endpoint;
mod event;
mod feed;
mod input;
mod reconnect;
mod runtime;
mod severity;
mod state;

pub use action::AppAction;
pub use app::App;
pub use driver::{Driver, TransportEvent};
pub use endpoint::{AUDITOR_PATH, Endpoint, EndpointError};
pub use event::AppEvent;
pub use feed::{Feed, LogEntry};
pub use input::{InputLine, KeyInput};
pub use reconnect::{DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, ReconnectPolicy};
pub use runtime::{MAX_TRANSPORT_EVENTS_PER_CYCLE, Runtime};
pub use severity::{HIGH_SEVERITY_MARKERS, Severity, classify};
pub use state::{
    ConnectionState, Indicator, STATUS_ACTIVE, STATUS_CONNECTING, STATUS_OFFLINE, Status,
};
