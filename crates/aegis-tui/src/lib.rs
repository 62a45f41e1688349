//! Terminal UI for the Aegis Auditor monitor
//!
//! A thin shell over [`aegis_app::Driver`] that provides terminal and
//! WebSocket I/O. All orchestration logic lives in the generic
//! [`aegis_app::Runtime`].
//!
//! The [`auditor`] module hosts a simulated Auditor for offline runs and
//! transport tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auditor;
pub mod terminal;
pub mod transport;
pub mod ui;

pub use aegis_app::{App, AppAction, AppEvent, Driver, KeyInput, ReconnectPolicy, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
pub use transport::{Connection, TransportError};
