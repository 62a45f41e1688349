//! WebSocket transport for the Auditor stream.
//!
//! Provides [`Connection`], which handles WebSocket I/O for text payloads.
//! This is a thin layer that just moves text frames between the socket and
//! channels. Decoding and state remain in the Sans-IO [`aegis_app::App`].

use aegis_app::TransportEvent;
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Message, protocol::CloseFrame},
};

/// Channel capacity in each direction.
const CHANNEL_CAPACITY: usize = 32;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Opening handshake failed.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// Read or write on an established connection failed.
    #[error("stream error: {0}")]
    Stream(String),

    /// The connection task has exited.
    #[error("connection closed")]
    Closed,
}

/// Handle to a WebSocket connection.
///
/// Payloads are sent and received via channels, and an internal task handles
/// the socket I/O. The task reports [`TransportEvent::Opened`] once the
/// handshake completes and always finishes with a single
/// [`TransportEvent::Closed`].
pub struct Connection {
    /// Send text payloads to the Auditor.
    to_server: mpsc::Sender<String>,
    /// Lifecycle events and received payloads, in delivery order.
    events: mpsc::Receiver<TransportEvent>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl Connection {
    /// Start connecting to `url`.
    ///
    /// Returns immediately; the handshake runs on a spawned task.
    pub fn open(url: &str) -> Self {
        let (to_server_tx, to_server_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
        let (events_tx, events_rx) = mpsc::channel::<TransportEvent>(CHANNEL_CAPACITY);

        let handle = tokio::spawn(run_connection(url.to_owned(), to_server_rx, events_tx));

        Self { to_server: to_server_tx, events: events_rx, abort_handle: handle.abort_handle() }
    }

    /// Queue a text payload for transmission.
    pub async fn send(&self, text: String) -> Result<(), TransportError> {
        self.to_server.send(text).await.map_err(|_| TransportError::Closed)
    }

    /// Next pending event without waiting.
    pub fn try_recv(&mut self) -> Option<TransportEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event. `None` once the task has exited and all
    /// events were consumed.
    pub async fn recv(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    /// Stop the connection.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Run the connection, bridging between channels and the socket.
async fn run_connection(
    url: String,
    mut to_server: mpsc::Receiver<String>,
    events: mpsc::Sender<TransportEvent>,
) {
    let reason = match drive(&url, &mut to_server, &events).await {
        Ok(reason) => reason,
        Err(e) => Some(e.to_string()),
    };

    tracing::debug!(url, reason = reason.as_deref().unwrap_or("none"), "connection task exiting");
    let _ = events.send(TransportEvent::Closed { reason }).await;
}

/// Handshake, then pump frames until either side closes.
///
/// Returns the close reason on an orderly shutdown.
async fn drive(
    url: &str,
    to_server: &mut mpsc::Receiver<String>,
    events: &mpsc::Sender<TransportEvent>,
) -> Result<Option<String>, TransportError> {
    let (ws, _response) =
        connect_async(url).await.map_err(|e| TransportError::Handshake(e.to_string()))?;

    tracing::debug!(url, "websocket handshake complete");
    if events.send(TransportEvent::Opened).await.is_err() {
        return Ok(None);
    }

    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(text) = outgoing else {
                    // Handle dropped
                    let _ = sink.send(Message::Close(None)).await;
                    return Ok(None);
                };
                sink.send(Message::Text(text.into()))
                    .await
                    .map_err(|e| TransportError::Stream(e.to_string()))?;
            }

            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let payload = TransportEvent::Message(text.as_str().to_owned());
                        if events.send(payload).await.is_err() {
                            return Ok(None);
                        }
                    },
                    Some(Ok(Message::Close(frame))) => return Ok(Some(close_reason(frame))),
                    Some(Ok(Message::Binary(data))) => {
                        tracing::debug!(len = data.len(), "dropping binary frame");
                    },
                    Some(Ok(_)) => {},
                    Some(Err(e)) => return Err(TransportError::Stream(e.to_string())),
                    None => return Err(TransportError::Stream("stream ended without close".into())),
                }
            }
        }
    }
}

/// Describe a close frame, e.g. `1000 (done)`.
fn close_reason(frame: Option<CloseFrame>) -> String {
    match frame {
        Some(frame) if frame.reason.as_str().is_empty() => u16::from(frame.code).to_string(),
        Some(frame) => format!("{} ({})", u16::from(frame.code), frame.reason.as_str()),
        None => "closed by peer".to_owned(),
    }
}
