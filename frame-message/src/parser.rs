//! Decode-then-enrich pipeline over an injected hub.

use std::sync::Arc;

use hub::{HubFetcher, HubSource};
use tracing::{debug, warn};

use crate::config::FrameMessageOptions;
use crate::decoder::decode_message_bytes;
use crate::enrichment::fetch_hub_context;
use crate::errors::Result;
use crate::types::{ActionPayload, FrameMessage};

/// Parses frame action payloads, optionally enriching them from a hub.
///
/// Cheap to clone; share one per process and call [`parse`](Self::parse) per request.
#[derive(Clone)]
pub struct FrameMessageParser {
    hub: Arc<dyn HubFetcher>,
    fetch_hub_context: bool,
}

impl FrameMessageParser {
    pub fn new(hub: Arc<dyn HubFetcher>, fetch_hub_context: bool) -> Self {
        Self {
            hub,
            fetch_hub_context,
        }
    }

    /// Build a parser over the live hub described by `options`.
    pub fn from_options(options: &FrameMessageOptions) -> Result<Self> {
        Self::from_source(options.hub_source(), options.fetch_hub_context)
    }

    pub fn from_source(source: HubSource, fetch_hub_context: bool) -> Result<Self> {
        Ok(Self::new(source.into_fetcher()?, fetch_hub_context))
    }

    pub fn fetches_hub_context(&self) -> bool {
        self.fetch_hub_context
    }

    /// Decode `payload` and, if enabled, merge in the hub context.
    ///
    /// An invalid signature is not an error here; check
    /// [`FrameMessage::ensure_valid`] before trusting any field.
    pub async fn parse(&self, payload: &ActionPayload) -> Result<FrameMessage> {
        let message_bytes = payload.message_bytes()?;
        let data = decode_message_bytes(&message_bytes)?;

        debug!(
            requester_fid = data.requester_fid,
            button_index = data.button_index,
            "Decoded frame action"
        );

        if !self.fetch_hub_context {
            return Ok(FrameMessage::new(data));
        }

        let context = fetch_hub_context(self.hub.as_ref(), &message_bytes, &data).await?;
        if !context.is_valid {
            warn!(
                requester_fid = data.requester_fid,
                "Hub rejected frame message"
            );
        }

        Ok(FrameMessage::with_context(data, context))
    }
}
