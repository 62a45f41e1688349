//! Auditor endpoint derivation.
//!
//! The streaming endpoint lives at a fixed path on the origin the monitor
//! was pointed at. The secure WebSocket scheme is selected iff the origin
//! itself is secure.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Well-known path of the Auditor stream.
pub const AUDITOR_PATH: &str = "/ws/auditor/";

/// Endpoint derivation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Origin is not a valid URL.
    #[error("invalid origin: {0}")]
    InvalidOrigin(#[from] url::ParseError),

    /// Origin scheme is neither `http` nor `https`.
    #[error("unsupported origin scheme: {0}")]
    UnsupportedScheme(String),

    /// Origin has no host.
    #[error("origin has no host")]
    MissingHost,
}

/// Streaming endpoint of the Auditor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Derive the endpoint from an origin such as `https://auditor.local:8443`.
    ///
    /// Any path, query or fragment on the origin is discarded.
    pub fn from_origin(origin: &str) -> Result<Self, EndpointError> {
        let origin = Url::parse(origin)?;

        let scheme = match origin.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
        };

        let host = origin.host_str().filter(|h| !h.is_empty()).ok_or(EndpointError::MissingHost)?;
        let authority = match origin.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let url = Url::parse(&format!("{scheme}://{authority}{AUDITOR_PATH}"))?;
        Ok(Self { url })
    }

    /// Endpoint URL as a string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Endpoint uses `wss`.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "wss"
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
