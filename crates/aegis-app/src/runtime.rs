//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: connection, feed and input state machine
//! - [`Driver`]: Platform-specific I/O
//! - the wire codec, for outbound messages
//!
//! Everything runs on a single task. Handlers run to completion before the
//! next event is processed, so the App needs no locking.

use tokio::time::Instant;

use crate::{App, AppAction, AppEvent, Driver, TransportEvent};

/// Transport events dispatched per cycle before operator input is polled again.
pub const MAX_TRANSPORT_EVENTS_PER_CYCLE: usize = 16;

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
    /// Deadline of the pending reconnect attempt. `None` if none is scheduled.
    reconnect_at: Option<Instant>,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and app.
    pub fn new(driver: D, app: App) -> Self {
        Self { driver, app, reconnect_at: None }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Opens the Auditor connection
    /// 2. Polls for operator events from the driver
    /// 3. Dispatches transport events in delivery order, at most
    ///    [`MAX_TRANSPORT_EVENTS_PER_CYCLE`] per cycle
    /// 4. Fires scheduled reconnect attempts
    ///
    /// Returns when the App requests to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.connect();
        let mut should_quit = self.process_actions(actions).await?;

        while !should_quit {
            should_quit = self.process_cycle().await?;
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        for _ in 0..MAX_TRANSPORT_EVENTS_PER_CYCLE {
            let Some(event) = self.driver.recv_transport().await else {
                break;
            };
            let event = match event {
                TransportEvent::Opened => AppEvent::Opened,
                TransportEvent::Message(raw) => {
                    AppEvent::Payload { raw, received_at: self.driver.now() }
                },
                TransportEvent::Closed { reason } => AppEvent::Closed { reason },
            };

            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        if let Some(deadline) = self.reconnect_at
            && Instant::now() >= deadline
        {
            self.reconnect_at = None;
            let actions = self.app.reconnect();
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::Connect { url } => {
                    self.reconnect_at = None;
                    self.driver.connect(&url).await?;
                },
                AppAction::Send { message } => self.transmit(&message).await,
                AppAction::ScheduleReconnect { attempt, delay } => {
                    tracing::info!(attempt, delay_ms = delay.as_millis() as u64, "scheduling reconnect");
                    self.reconnect_at = Some(Instant::now() + delay);
                },
            }
        }
        Ok(false)
    }

    /// Encode and transmit an operator message.
    ///
    /// Failures are logged and the message is dropped. A send racing a close
    /// is expected to fail this way.
    async fn transmit(&mut self, message: &str) {
        let payload = match aegis_proto::encode_outbound(message) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode outbound message");
                return;
            },
        };

        if let Err(e) = self.driver.send_text(payload).await {
            tracing::warn!(error = %e, "failed to send message; dropping");
        }
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
