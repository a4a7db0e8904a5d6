//! Hub client for social-graph and verification lookups.
//!
//! This crate provides:
//! - [`HubSource`] config enum for choosing between mock and live hub clients
//! - [`HubFetcher`] trait for abstracting hub access
//! - [`HubClient`] production client that talks to a hub HTTP API
//! - [`MockHubClient`] mock client for testing with pre-configured hub state
//!
//! ## Usage with HubSource (Recommended)
//!
//! ```ignore
//! use hub::{HubRequestOptions, HubSource, LinkType};
//!
//! // Production: use a live hub
//! let hub = HubSource::live("https://nemes.farcaster.xyz:2281", HubRequestOptions::default())
//!     .into_fetcher()?;
//!
//! let follows = hub.link_exists(2, 3, LinkType::Follow).await?;
//! ```

mod mock;
mod responses;
mod types;

pub use mock::{MockHubClient, MockHubData};
pub use types::{HubEndpoint, HubRequestOptions, LinkType, ReactionType, UserData};

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client as ReqwestClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use responses::{
    IdRegistryEventResponse, UserDataResponse, ValidateMessageResponse, VerificationsResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hub returned status {status} for {endpoint}")]
    Status { endpoint: HubEndpoint, status: u16 },
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("network error: {0}")]
    NetworkError(String),
}

pub type Result<T> = std::result::Result<T, HubError>;

/// Trait for querying a hub.
///
/// This trait abstracts the hub client to enable dependency injection
/// and mocking for testing. Production code uses [`HubClient`], while
/// tests can use [`MockHubClient`].
///
/// Existence checks (`link_exists`, `reaction_exists`) report a non-success
/// HTTP status as `false`. Transport failures are returned as errors.
#[async_trait]
pub trait HubFetcher: Send + Sync {
    /// Ask the hub whether the signed message bytes are valid.
    async fn validate_message(&self, message_bytes: &[u8]) -> Result<bool>;

    /// Whether `fid` has a link of `link_type` to `target_fid`.
    async fn link_exists(&self, fid: u64, target_fid: u64, link_type: LinkType) -> Result<bool>;

    /// Whether `fid` reacted with `reaction_type` to the cast `(target_fid, target_hash)`.
    ///
    /// `target_hash` is the `0x`-prefixed hex cast hash.
    async fn reaction_exists(
        &self,
        fid: u64,
        reaction_type: ReactionType,
        target_fid: u64,
        target_hash: &str,
    ) -> Result<bool>;

    /// First verified Ethereum address of `fid`, if any.
    async fn verified_address(&self, fid: u64) -> Result<Option<String>>;

    /// Custody address of `fid` from its id registry event, if any.
    async fn custody_address(&self, fid: u64) -> Result<Option<String>>;

    /// Profile data published by `fid`.
    async fn user_data(&self, fid: u64) -> Result<UserData>;
}

/// Production hub client over the hub HTTP API.
///
/// # Example
///
/// ```ignore
/// use hub::HubClient;
///
/// let client = HubClient::new("https://nemes.farcaster.xyz:2281");
/// let valid = client.validate_message(&bytes).await?;
/// ```
pub struct HubClient {
    url: String,
    client: ReqwestClient,
}

impl HubClient {
    pub fn new(url: &str) -> Self {
        HubClient {
            url: url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    /// Create a client that sends the configured headers with every request.
    pub fn with_options(url: &str, options: &HubRequestOptions) -> Result<Self> {
        let client = ReqwestClient::builder()
            .default_headers(options.header_map()?)
            .build()?;

        Ok(HubClient {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint_url(&self, endpoint: HubEndpoint) -> String {
        format!("{}{}", self.url, endpoint.path())
    }

    async fn get(&self, endpoint: HubEndpoint, query: &[(&str, String)]) -> Result<Response> {
        debug!(endpoint = %endpoint, ?query, "Hub request");
        let res = self
            .client
            .get(self.endpoint_url(endpoint))
            .query(query)
            .send()
            .await?;
        Ok(res)
    }

    async fn exists(&self, endpoint: HubEndpoint, query: &[(&str, String)]) -> Result<bool> {
        let status = self.get(endpoint, query).await?.status();
        if !status.is_success() {
            debug!(endpoint = %endpoint, status = status.as_u16(), "Hub lookup not found");
        }
        Ok(status.is_success())
    }

    /// GET a JSON body. A 404 is reported as `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: HubEndpoint,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let res = self.get(endpoint, query).await?;
        let status = res.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(HubError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let bytes = res.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[async_trait]
impl HubFetcher for HubClient {
    async fn validate_message(&self, message_bytes: &[u8]) -> Result<bool> {
        let endpoint = HubEndpoint::ValidateMessage;
        debug!(endpoint = %endpoint, bytes = message_bytes.len(), "Hub request");

        let res = self
            .client
            .post(self.endpoint_url(endpoint))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(message_bytes.to_vec())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(HubError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let bytes = res.bytes().await?;
        let body: ValidateMessageResponse = serde_json::from_slice(&bytes)?;
        Ok(body.valid)
    }

    async fn link_exists(&self, fid: u64, target_fid: u64, link_type: LinkType) -> Result<bool> {
        self.exists(
            HubEndpoint::LinkById,
            &[
                ("fid", fid.to_string()),
                ("target_fid", target_fid.to_string()),
                ("link_type", link_type.as_str().to_string()),
            ],
        )
        .await
    }

    async fn reaction_exists(
        &self,
        fid: u64,
        reaction_type: ReactionType,
        target_fid: u64,
        target_hash: &str,
    ) -> Result<bool> {
        self.exists(
            HubEndpoint::ReactionById,
            &[
                ("fid", fid.to_string()),
                ("reaction_type", reaction_type.as_u8().to_string()),
                ("target_fid", target_fid.to_string()),
                ("target_hash", target_hash.to_string()),
            ],
        )
        .await
    }

    async fn verified_address(&self, fid: u64) -> Result<Option<String>> {
        let response: Option<VerificationsResponse> = self
            .get_json(HubEndpoint::VerificationsByFid, &[("fid", fid.to_string())])
            .await?;

        Ok(response.and_then(|r| {
            r.messages
                .into_iter()
                .filter_map(|m| m.data.verification_add_address_body)
                .find(|body| body.is_ethereum())
                .map(|body| body.address)
        }))
    }

    async fn custody_address(&self, fid: u64) -> Result<Option<String>> {
        let response: Option<IdRegistryEventResponse> = self
            .get_json(
                HubEndpoint::OnChainIdRegistryEventByFid,
                &[("fid", fid.to_string())],
            )
            .await?;

        Ok(response
            .and_then(|r| r.id_register_event_body)
            .map(|body| body.to))
    }

    async fn user_data(&self, fid: u64) -> Result<UserData> {
        let response: Option<UserDataResponse> = self
            .get_json(HubEndpoint::UserDataByFid, &[("fid", fid.to_string())])
            .await?;

        let mut user_data = UserData::default();
        for message in response.map(|r| r.messages).unwrap_or_default() {
            if let Some(body) = message.data.user_data_body {
                user_data.apply(&body.kind, body.value);
            }
        }
        Ok(user_data)
    }
}

/// Configuration for the hub data source.
///
/// Use this to explicitly choose between mock and live hub clients.
///
/// # Example
///
/// ```ignore
/// use hub::{HubSource, MockHubData};
///
/// // Development/testing: use mock data
/// let fetcher = HubSource::mock(MockHubData::default().with_valid(true)).into_fetcher()?;
///
/// // Production: use a live hub
/// let fetcher = HubSource::live("https://nemes.farcaster.xyz:2281", options).into_fetcher()?;
/// ```
#[derive(Debug, Clone)]
pub enum HubSource {
    /// Use a mock hub answering from pre-configured state.
    Mock(MockHubData),

    /// Connect to a live hub HTTP API.
    Live {
        /// The hub base URL (e.g., "https://nemes.farcaster.xyz:2281")
        hub_http_url: String,
        /// Headers sent with every request.
        request_options: HubRequestOptions,
    },
}

impl HubSource {
    pub fn mock(data: MockHubData) -> Self {
        Self::Mock(data)
    }

    pub fn live(hub_http_url: impl Into<String>, request_options: HubRequestOptions) -> Self {
        Self::Live {
            hub_http_url: hub_http_url.into(),
            request_options,
        }
    }

    /// Create the appropriate HubFetcher implementation.
    ///
    /// Fails only when the live request options carry an invalid header.
    pub fn into_fetcher(self) -> Result<Arc<dyn HubFetcher>> {
        match self {
            Self::Mock(data) => Ok(Arc::new(MockHubClient::with_data(data))),
            Self::Live {
                hub_http_url,
                request_options,
            } => Ok(Arc::new(HubClient::with_options(
                &hub_http_url,
                &request_options,
            )?)),
        }
    }
}
