//! Frame server entry point.
//!
//! Accepts frame action POSTs, decodes the signed trusted data and, unless
//! disabled, verifies it against a hub before answering with the combined record.

use frame_message::FrameMessageParser;
use frame_server::{config::ServerConfig, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("frame_server=info,frame_message=info,hub=info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing();

    let config = ServerConfig::from_env()?;
    let parser = FrameMessageParser::from_source(
        config.hub_source(),
        config.frame_options.fetch_hub_context,
    )?;

    info!(
        service_name = "frame-server",
        service_version = env!("CARGO_PKG_VERSION"),
        hub_source = ?config.hub_mode,
        hub_http_url = %config.frame_options.hub_http_url,
        fetch_hub_context = parser.fetches_hub_context(),
        "Starting frame server"
    );

    let app = server::create_app(parser);

    if let Err(e) = server::run_server(app, config.addr).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}
