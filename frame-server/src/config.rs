// Server configuration from environment variables
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::http::Method;
use frame_message::{FrameMessageOptions, DEFAULT_HUB_HTTP_URL};
use hub::{HubRequestOptions, HubSource, MockHubData};
use tower_http::cors::{Any, CorsLayer};

pub const DEFAULT_SERVER_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Header the hub API key is sent in.
pub const HUB_API_KEY_HEADER: &str = "api_key";

/// Which hub the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HubMode {
    #[default]
    Live,
    /// In-process hub that accepts every signature and knows no social facts.
    /// For local runs without network access.
    Mock,
}

impl std::str::FromStr for HubMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "mock" => Ok(Self::Mock),
            other => anyhow::bail!(
                "Invalid HUB_SOURCE: {} (expected \"live\" or \"mock\")",
                other
            ),
        }
    }
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub hub_mode: HubMode,
    pub frame_options: FrameMessageOptions,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `HUB_SOURCE`: "live" or "mock" (default: live)
    /// - `HUB_HTTP_URL`: hub base URL (default: `DEFAULT_HUB_HTTP_URL`)
    /// - `HUB_API_KEY`: sent as the `api_key` header on hub requests (optional)
    /// - `FETCH_HUB_CONTEXT`: "true" or "false" (default: true)
    /// - `SERVER_HOST`: listen address (default: 127.0.0.1)
    /// - `SERVER_PORT`: listen port (default: 8080)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = match lookup("SERVER_HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid SERVER_HOST: {}", host))?,
            None => DEFAULT_SERVER_HOST,
        };
        let port = match lookup("SERVER_PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid SERVER_PORT: {}", port))?,
            None => DEFAULT_SERVER_PORT,
        };

        let hub_mode = match lookup("HUB_SOURCE") {
            Some(mode) => mode.parse::<HubMode>()?,
            None => HubMode::default(),
        };

        let hub_http_url =
            lookup("HUB_HTTP_URL").unwrap_or_else(|| DEFAULT_HUB_HTTP_URL.to_string());

        let mut hub_request_options = HubRequestOptions::default();
        if let Some(api_key) = lookup("HUB_API_KEY") {
            hub_request_options = hub_request_options.with_header(HUB_API_KEY_HEADER, api_key);
        }

        let fetch_hub_context = lookup("FETCH_HUB_CONTEXT")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Self {
            addr: SocketAddr::new(host, port),
            hub_mode,
            frame_options: FrameMessageOptions {
                hub_http_url,
                hub_request_options,
                fetch_hub_context,
            },
        })
    }
}

impl ServerConfig {
    /// The hub the parser should be built over.
    pub fn hub_source(&self) -> HubSource {
        match self.hub_mode {
            HubMode::Live => self.frame_options.hub_source(),
            HubMode::Mock => HubSource::mock(MockHubData::default().with_valid(true)),
        }
    }
}

/// Frame actions are POSTed by clients embedding the frame, from any origin.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
