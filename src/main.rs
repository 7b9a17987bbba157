//! health-insight - questionnaire-driven health report service
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (0.0.0.0:5000), secrets from the environment or .env
//! OPENAI_API_KEY=sk-... SMTP_USERNAME=reports@example.com SMTP_PASSWORD=... ./health-insight
//!
//! # Explicit config file and bind address
//! ./health-insight --config /etc/health-insight/health_insight.toml --addr 127.0.0.1:8080
//!
//! # Validate configuration and exit
//! ./health-insight --check-config
//! ```
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: completion API key (placeholders are served without it)
//! - `OPENAI_BASE_URL`, `OPENAI_MODEL`: completion endpoint overrides
//! - `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_RECIPIENT`: report mailbox
//! - `HEALTH_INSIGHT_CONFIG`: path to the TOML config file
//! - `HEALTH_INSIGHT_ADDR` / `PORT`: bind address overrides
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use health_insight::{create_app, AppState, ServiceConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "health-insight")]
#[command(about = "Health questionnaire analysis and report service")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:5000")
    #[arg(short, long, value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Path to a TOML config file (default: search HEALTH_INSIGHT_CONFIG, then ./health_insight.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Load and validate the configuration, print it, then exit
    #[arg(long)]
    check_config: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "HEALTH_INSIGHT_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is the normal production case
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let mut config =
        ServiceConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    if args.check_config {
        let rendered = config.to_toml().context("Failed to render configuration")?;
        println!("{rendered}");
        info!("Configuration OK");
        return Ok(());
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  health-insight v{}", env!("CARGO_PKG_VERSION"));
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Arc::new(config);
    let state = AppState::from_config(Arc::clone(&config))?;
    let app = create_app(state);

    let server_addr = config.server.addr.as_str();
    let listener = tokio::net::TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;
    info!("✓ HTTP server listening on {}", server_addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await
        .context("HTTP server error")?;

    info!("✓ health-insight shutdown complete");
    Ok(())
}
