//! native-feedback server binary
//!
//! Serves the interactive-feedback tool catalog over stdio. Diagnostics go
//! to stderr only; stdout carries protocol messages. SIGINT/SIGTERM shut
//! the transport down cleanly with exit code 0.

use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use native_feedback::mcp::{serve_stdio, FeedbackServer};
use native_feedback::{FeedbackToolProvider, OsaScriptInteraction};

#[derive(Parser)]
#[command(name = "native-feedback")]
#[command(about = "Interactive feedback MCP server backed by native macOS dialogs")]
#[command(version)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        "native_feedback=debug"
    } else {
        "native_feedback=info"
    };

    // Logging must stay off stdout or it would corrupt protocol framing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting server. PID: {}", process::id());

    let interaction = Arc::new(OsaScriptInteraction::new());
    let server = FeedbackServer::new(FeedbackToolProvider::new(interaction).get_tools());

    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone());

    if let Err(err) = serve_stdio(server, shutdown).await {
        error!("Server failed: {}", err);
        process::exit(1);
    }

    info!("Server stopped");
}

fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("Received exit signal, cleaning up...");
        shutdown.cancel();
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(err) => {
            error!("Failed to install SIGTERM handler: {}", err);
            // Fall back to Ctrl-C only
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
