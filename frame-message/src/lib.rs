//! Frame action decoding and hub enrichment.
//!
//! A frame action arrives as an [`ActionPayload`] whose trusted data is a
//! hex-encoded, signed protobuf message. This crate:
//!
//! 1. Decodes the message into [`ParsedActionData`] ([`decode_payload`])
//! 2. Optionally asks a hub, concurrently, whether the message is valid and
//!    how the requester relates to the cast the frame is embedded in
//!    ([`fetch_hub_context`])
//! 3. Merges both into a [`FrameMessage`]
//!
//! ## Usage
//!
//! ```ignore
//! use frame_message::{get_frame_message, FrameMessageOptions};
//!
//! let message = get_frame_message(&payload, &FrameMessageOptions::default())
//!     .await?
//!     .ensure_valid()?;
//!
//! println!("button {} pressed by {}", message.data.button_index, message.data.requester_fid);
//! ```
//!
//! For repeated use with a shared or mocked hub, build a [`FrameMessageParser`].

pub mod config;
pub mod decoder;
pub mod enrichment;
pub mod errors;
pub mod parser;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::{FrameMessageOptions, DEFAULT_HUB_HTTP_URL};
pub use decoder::{decode_message_bytes, decode_payload, parse_message};
pub use enrichment::fetch_hub_context;
pub use errors::{FrameMessageError, Result};
pub use parser::FrameMessageParser;
pub use types::{ActionPayload, CastId, FrameMessage, HubContext, ParsedActionData, TrustedData};

/// Decode `payload` and, when `options.fetch_hub_context` is set, enrich it
/// from the hub at `options.hub_http_url`.
///
/// Any decode or hub failure fails the whole call. An invalid signature does
/// not; check [`FrameMessage::ensure_valid`].
pub async fn get_frame_message(
    payload: &ActionPayload,
    options: &FrameMessageOptions,
) -> Result<FrameMessage> {
    FrameMessageParser::from_options(options)?
        .parse(payload)
        .await
}
