//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the connection
//! lifecycle, the rendered feed and the operator input line, completely
//! decoupled from terminal and network I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks the connection state and derives the operator-visible status.
//! - Decodes inbound payloads and renders audit responses into the feed.
//! - Validates and submits operator input.
//! - Schedules reconnect attempts according to the [`ReconnectPolicy`].

use aegis_proto::Inbound;
use chrono::{DateTime, Local};

use crate::{
    AppAction, AppEvent, ConnectionState, Endpoint, Feed, InputLine, KeyInput, ReconnectPolicy,
    Status,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Auditor streaming endpoint.
    endpoint: Endpoint,
    /// Rendered entries, newest first.
    feed: Feed,
    /// Operator input line.
    input: InputLine,
    /// Backoff policy applied when the connection closes.
    reconnect: ReconnectPolicy,
    /// Consecutive reconnect attempts since the last successful open.
    attempts: u32,
    /// Entries hidden above the top of the feed view.
    scroll: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create a new App for the given endpoint.
    ///
    /// The connection starts in [`ConnectionState::Connecting`]; the runtime
    /// issues the first [`App::connect`].
    pub fn new(endpoint: Endpoint, reconnect: ReconnectPolicy) -> Self {
        Self {
            state: ConnectionState::Connecting,
            endpoint,
            feed: Feed::new(),
            input: InputLine::new(),
            reconnect,
            attempts: 0,
            scroll: 0,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Submit => self.submit(),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Opened => self.on_opened(),
            AppEvent::Closed { reason } => self.on_closed(reason),
            AppEvent::Payload { raw, received_at } => self.dispatch(&raw, received_at),
        }
    }

    /// Initiate the connection to the Auditor.
    pub fn connect(&mut self) -> Vec<AppAction> {
        self.state = ConnectionState::Connecting;
        vec![AppAction::Connect { url: self.endpoint.to_string() }, AppAction::Render]
    }

    /// Retry the connection after a scheduled delay.
    ///
    /// No-op unless a retry is pending.
    pub fn reconnect(&mut self) -> Vec<AppAction> {
        if let ConnectionState::Reconnecting { attempt } = self.state {
            tracing::info!(attempt, endpoint = %self.endpoint, "reconnecting to auditor");
            self.connect()
        } else {
            vec![]
        }
    }

    /// Send operator text upstream.
    ///
    /// No-op unless the connection is open. The text is not validated here.
    pub fn send(&self, message: String) -> Vec<AppAction> {
        if self.state.is_open() {
            vec![AppAction::Send { message }]
        } else {
            tracing::debug!(state = ?self.state, "dropping send while connection is not open");
            vec![]
        }
    }

    /// Submit the input line.
    ///
    /// Blank input (after trimming) is ignored and left in place. Otherwise
    /// the untrimmed text is sent and the line is cleared.
    pub fn submit(&mut self) -> Vec<AppAction> {
        if self.input.is_blank() {
            return vec![];
        }

        let message = self.input.take();
        self.scroll = 0;
        let mut actions = self.send(message);
        actions.push(AppAction::Render);
        actions
    }

    /// Handle an inbound payload.
    ///
    /// Payloads arriving while the connection is not open are ignored.
    /// Undecodable payloads are logged and dropped. Only audit responses
    /// produce a feed entry.
    pub fn dispatch(&mut self, raw: &str, received_at: DateTime<Local>) -> Vec<AppAction> {
        if !self.state.is_open() {
            tracing::debug!(state = ?self.state, "ignoring payload on inactive connection");
            return vec![];
        }

        tracing::debug!(payload = raw, "received payload");

        match aegis_proto::decode_inbound(raw) {
            Ok(Inbound::AuditResponse(response)) => {
                self.feed.render(response, received_at);
                if self.scroll > 0 {
                    // Keep the viewed entries in place while new ones arrive.
                    self.scroll = self.scroll.saturating_add(1);
                }
                vec![AppAction::Render]
            },
            Ok(other) => {
                tracing::debug!(kind = ?other.kind(), "ignoring unhandled event");
                vec![]
            },
            Err(e) => {
                tracing::warn!(error = %e, "dropping undecodable payload");
                vec![]
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => self.input.insert(c),
            KeyInput::Backspace => self.input.backspace(),
            KeyInput::Delete => self.input.delete(),
            KeyInput::Left => self.input.left(),
            KeyInput::Right => self.input.right(),
            KeyInput::Home => self.input.home(),
            KeyInput::End => self.input.end(),
            KeyInput::Up => {
                let oldest = self.feed.len().saturating_sub(1);
                self.scroll = self.scroll.saturating_add(1).min(oldest);
            },
            KeyInput::Down => self.scroll = self.scroll.saturating_sub(1),
            KeyInput::Enter => return self.submit(),
            KeyInput::Esc => return vec![AppAction::Quit],
            KeyInput::Tab => return vec![],
        }
        vec![AppAction::Render]
    }

    fn on_opened(&mut self) -> Vec<AppAction> {
        if self.state != ConnectionState::Connecting {
            tracing::debug!(state = ?self.state, "ignoring open on inactive connection");
            return vec![];
        }

        tracing::info!(endpoint = %self.endpoint, "auditor connected");
        self.state = ConnectionState::Open;
        self.attempts = 0;
        vec![AppAction::Render]
    }

    fn on_closed(&mut self, reason: Option<String>) -> Vec<AppAction> {
        if !matches!(self.state, ConnectionState::Connecting | ConnectionState::Open) {
            return vec![];
        }

        tracing::warn!(reason = reason.as_deref().unwrap_or("unknown"), "auditor connection closed");
        self.state = ConnectionState::Closed;

        let attempt = self.attempts.saturating_add(1);
        match self.reconnect.delay_for(attempt) {
            Some(delay) => {
                self.attempts = attempt;
                self.state = ConnectionState::Reconnecting { attempt };
                vec![AppAction::ScheduleReconnect { attempt, delay }, AppAction::Render]
            },
            None => vec![AppAction::Render],
        }
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Operator-visible status.
    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// Auditor streaming endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Rendered feed.
    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Operator input line.
    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// Mutable operator input line.
    pub fn input_mut(&mut self) -> &mut InputLine {
        &mut self.input
    }

    /// Entries hidden above the top of the feed view.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}
