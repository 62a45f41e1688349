//! Aegis Auditor monitor entry point.
//!
//! # Usage
//!
//! ```bash
//! # Watch a deployed Auditor
//! aegis-tui --origin https://auditor.example.com
//!
//! # Retry dropped connections with backoff
//! aegis-tui --origin http://localhost:8000 --reconnect-attempts 5
//!
//! # Run against an in-process simulated Auditor
//! aegis-tui --simulate
//! ```

use std::{path::PathBuf, time::Duration};

use aegis_app::{App, Endpoint, ReconnectPolicy, Runtime};
use aegis_tui::{TerminalDriver, auditor};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Aegis Auditor terminal monitor
#[derive(Parser, Debug)]
#[command(name = "aegis-tui")]
#[command(about = "Real-time terminal monitor for the Aegis Auditor stream")]
#[command(version)]
struct Args {
    /// Origin of the Auditor deployment (http or https)
    #[arg(short, long, default_value = "http://localhost:8000")]
    origin: String,

    /// Run against an in-process simulated Auditor instead of --origin
    #[arg(long)]
    simulate: bool,

    /// Reconnect attempts after the connection closes (0 disables)
    #[arg(long, default_value = "0")]
    reconnect_attempts: u32,

    /// Delay before the first reconnect attempt, in milliseconds
    #[arg(long, default_value = "500")]
    reconnect_base_ms: u64,

    /// Upper bound on the reconnect delay, in milliseconds
    #[arg(long, default_value = "30000")]
    reconnect_max_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file; the terminal is owned by the UI
    #[arg(long, default_value = "aegis-tui.log")]
    log_file: PathBuf,

    /// Input poll timeout, in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,
}

impl Args {
    fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            max_attempts: self.reconnect_attempts,
            base_delay: Duration::from_millis(self.reconnect_base_ms),
            max_delay: Duration::from_millis(self.reconnect_max_ms),
        }
    }
}

/// Install the file logger. The guard must live until exit to flush.
fn init_logging(args: &Args) -> std::io::Result<WorkerGuard> {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&args.log_file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _guard = init_logging(&args)?;

    // wss handshakes use the ring provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing::info!("Aegis monitor starting");

    let simulated =
        if args.simulate { Some(auditor::spawn_auditor("127.0.0.1:0").await?) } else { None };
    let origin =
        simulated.as_ref().map_or_else(|| args.origin.clone(), auditor::AuditorHandle::origin);

    let endpoint = Endpoint::from_origin(&origin)?;
    tracing::info!(%endpoint, "resolved auditor endpoint");

    let policy = args.reconnect_policy();
    if policy.is_enabled() {
        tracing::info!(attempts = policy.max_attempts, "reconnect enabled");
    }

    let app = App::new(endpoint, policy);
    let driver = TerminalDriver::new(Duration::from_millis(args.tick_ms))?;

    let result = Runtime::new(driver, app).run().await;

    if let Some(handle) = simulated {
        handle.stop();
    }

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_reconnect() {
        let args = Args::try_parse_from(["aegis-tui"]).unwrap();

        assert_eq!(args.origin, "http://localhost:8000");
        assert!(!args.simulate);
        assert!(!args.reconnect_policy().is_enabled());
        assert_eq!(args.tick_ms, 100);
    }

    #[test]
    fn reconnect_flags_build_policy() {
        let args = Args::try_parse_from([
            "aegis-tui",
            "--reconnect-attempts",
            "3",
            "--reconnect-base-ms",
            "250",
            "--reconnect-max-ms",
            "1000",
        ])
        .unwrap();

        assert_eq!(args.reconnect_policy(), ReconnectPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(1),
        });
    }
}
