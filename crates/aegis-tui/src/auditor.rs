//! In-process simulated Auditor.
//!
//! Serves the Auditor streaming endpoint on a local WebSocket listener with
//! canned audit replies. Used by `--simulate` and by the transport tests, so
//! the client can be exercised without the real service.
//!
//! Every accepted connection gets a `connection_established` greeting, then
//! one `audit_response` per non-empty operator message.

use std::{io, net::SocketAddr};

use aegis_app::AUDITOR_PATH;
use aegis_proto::{AuditResponse, Inbound, Outbound};
use futures::{SinkExt, StreamExt};
use rand::Rng;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{
    WebSocketStream, accept_hdr_async,
    tungstenite::{
        Message,
        handshake::server::{ErrorResponse, Request, Response},
        http::StatusCode,
    },
};

use crate::transport::TransportError;

/// Greeting sent after the handshake.
pub const GREETING: &str = "Aegis Core Auditor Connected - Simulation Mode";

/// Characters of operator text echoed in an acknowledgement.
const ECHO_LIMIT: usize = 50;

const RISK_MARKERS: [&str; 2] = ["unsafe", "violation"];
const PROTOCOL_MARKER: &str = "protocol";

/// Handle to a running simulated Auditor.
pub struct AuditorHandle {
    addr: SocketAddr,
    /// Abort handle to stop the accept loop.
    abort_handle: tokio::task::AbortHandle,
}

impl AuditorHandle {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Page origin clients derive the endpoint from.
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections. Established sessions are not affected.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Bind a simulated Auditor on `addr` and serve it on a spawned task.
///
/// Use port 0 to pick a free port; [`AuditorHandle::origin`] reports the
/// result.
pub async fn spawn_auditor(addr: &str) -> io::Result<AuditorHandle> {
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    tokio::spawn(async move {
                        if let Err(e) = serve(stream).await {
                            tracing::debug!(%peer, error = %e, "auditor session ended");
                        }
                    });
                },
                Err(e) => {
                    tracing::warn!(error = %e, "auditor accept failed");
                    break;
                },
            }
        }
    });

    tracing::info!(%addr, "simulated auditor listening");
    Ok(AuditorHandle { addr, abort_handle: handle.abort_handle() })
}

/// Accept only the streaming endpoint path.
#[allow(clippy::result_large_err)]
fn route(request: &Request, response: Response) -> Result<Response, ErrorResponse> {
    if request.uri().path() == AUDITOR_PATH {
        Ok(response)
    } else {
        let mut rejection = ErrorResponse::new(Some(format!("no route for {}", request.uri().path())));
        *rejection.status_mut() = StatusCode::NOT_FOUND;
        Err(rejection)
    }
}

/// Run one Auditor session.
async fn serve(stream: TcpStream) -> Result<(), TransportError> {
    let mut ws =
        accept_hdr_async(stream, route).await.map_err(|e| TransportError::Handshake(e.to_string()))?;

    let greeting = Inbound::ConnectionEstablished { message: GREETING.to_owned() };
    send_event(&mut ws, &greeting).await?;

    while let Some(message) = ws.next().await {
        let message = message.map_err(|e| TransportError::Stream(e.to_string()))?;
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let Outbound { message } = match aegis_proto::decode_outbound(text.as_str()) {
            Ok(outbound) => outbound,
            Err(e) => {
                let error = Inbound::Error { message: e.to_string() };
                send_event(&mut ws, &error).await?;
                continue;
            },
        };

        if message.is_empty() {
            continue;
        }

        tracing::debug!(text = %message, "auditor received");
        send_event(&mut ws, &Inbound::AuditResponse(respond(&message))).await?;
    }

    Ok(())
}

async fn send_event(
    ws: &mut WebSocketStream<TcpStream>,
    event: &Inbound,
) -> Result<(), TransportError> {
    let payload =
        aegis_proto::encode_inbound(event).map_err(|e| TransportError::Stream(e.to_string()))?;
    ws.send(Message::Text(payload.into())).await.map_err(|e| TransportError::Stream(e.to_string()))
}

/// Canned audit of one operator message.
pub fn respond(input: &str) -> AuditResponse {
    let lowered = input.to_lowercase();
    let signature = format!("sim_{}", rand::rng().random_range(0..1_000_000u32));

    let message = if RISK_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        format!(
            "I have detected a critical safety risk and will log a deviation.\n\
             \n\
             SAFETY DEVIATION LOGGED\n\
             Severity: HIGH\n\
             Issue: Detected potential safety violation in: {input}\n\
             Action Required: Halt procedure immediately and inspect."
        )
    } else if lowered.contains(PROTOCOL_MARKER) {
        format!(
            "Consulting the Knowledge Vault for relevant protocols...\n\
             \n\
             KNOWLEDGE VAULT SEARCH\n\
             Query: {input}\n\
             Relevant Protocols:\n  \
             - Standard Operating Procedure 4.2.1: Always wear protective eyewear.\n  \
             - IEC 60601-1: Medical electrical equipment safety standards."
        )
    } else {
        let echo: String = input.chars().take(ECHO_LIMIT).collect();
        format!("Acknowledged. Monitoring stream: {echo}...")
    };

    AuditResponse::new(message, Some(signature))
}
