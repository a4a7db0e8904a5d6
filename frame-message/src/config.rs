//! Options for [`get_frame_message`](crate::get_frame_message).

use hub::{HubRequestOptions, HubSource};

/// Hub used when no `hub_http_url` is configured.
pub const DEFAULT_HUB_HTTP_URL: &str = "https://nemes.farcaster.xyz:2281";

/// How a frame action is decoded and which hub, if any, enriches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameMessageOptions {
    /// Base URL of the hub HTTP API.
    pub hub_http_url: String,
    /// Headers sent with every hub request.
    pub hub_request_options: HubRequestOptions,
    /// Query the hub for validity and requester context. Defaults to `true`.
    pub fetch_hub_context: bool,
}

impl Default for FrameMessageOptions {
    fn default() -> Self {
        Self {
            hub_http_url: DEFAULT_HUB_HTTP_URL.to_string(),
            hub_request_options: HubRequestOptions::default(),
            fetch_hub_context: true,
        }
    }
}

impl FrameMessageOptions {
    /// Decode only; no hub requests are made.
    pub fn without_hub_context() -> Self {
        Self {
            fetch_hub_context: false,
            ..Self::default()
        }
    }

    pub fn with_hub_http_url(mut self, hub_http_url: impl Into<String>) -> Self {
        self.hub_http_url = hub_http_url.into();
        self
    }

    pub fn with_hub_request_options(mut self, hub_request_options: HubRequestOptions) -> Self {
        self.hub_request_options = hub_request_options;
        self
    }

    /// The live hub these options point at.
    pub fn hub_source(&self) -> HubSource {
        HubSource::live(&self.hub_http_url, self.hub_request_options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fetch_from_default_hub() {
        let options = FrameMessageOptions::default();

        assert!(options.fetch_hub_context);
        assert_eq!(options.hub_http_url, DEFAULT_HUB_HTTP_URL);
        assert!(options.hub_request_options.headers.is_empty());
    }

    #[test]
    fn test_hub_source_carries_url_and_headers() {
        let options = FrameMessageOptions::default()
            .with_hub_http_url("http://localhost:2281")
            .with_hub_request_options(HubRequestOptions::default().with_header("api_key", "k"));

        match options.hub_source() {
            HubSource::Live {
                hub_http_url,
                request_options,
            } => {
                assert_eq!(hub_http_url, "http://localhost:2281");
                assert_eq!(request_options.headers.get("api_key").unwrap(), "k");
            }
            other => panic!("Expected live source, got {:?}", other),
        }
    }
}
