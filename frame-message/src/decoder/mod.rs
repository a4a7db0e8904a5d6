//! Extracts [`ParsedActionData`] from the signed trusted data of a frame action.

use wire::{
    deserialize::deserialize,
    pb::message::{message_data::Body, Message},
};

use crate::errors::{FrameMessageError, Result};
use crate::types::{ActionPayload, CastId, ParsedActionData};

/// Decode the trusted data of `payload`.
///
/// Malformed hex or protobuf bytes surface as [`FrameMessageError::Deserialize`].
pub fn decode_payload(payload: &ActionPayload) -> Result<ParsedActionData> {
    let bytes = payload.message_bytes()?;
    decode_message_bytes(&bytes)
}

/// Decode raw protobuf message bytes.
pub fn decode_message_bytes(bytes: &[u8]) -> Result<ParsedActionData> {
    let message = deserialize(bytes)?;
    parse_message(&message)
}

/// Extract the frame action fields from a decoded message.
pub fn parse_message(message: &Message) -> Result<ParsedActionData> {
    let data = message.data.as_ref().ok_or(FrameMessageError::MissingData)?;

    let Some(Body::FrameActionBody(body)) = &data.body else {
        return Err(FrameMessageError::MissingFrameActionBody);
    };

    Ok(ParsedActionData {
        button_index: body.button_index,
        input_text: optional_text(&body.input_text, "input_text")?,
        requester_fid: data.fid,
        cast_id: body.cast_id.as_ref().map(|cast_id| CastId {
            fid: cast_id.fid,
            hash: prefixed_hex(&cast_id.hash),
        }),
        url: optional_text(&body.url, "url")?,
        state: optional_text(&body.state, "state")?,
        transaction_id: optional_hex(&body.transaction_id),
        address: optional_hex(&body.address),
        timestamp: data.timestamp,
        network: data.network().as_str_name().to_string(),
    })
}

// Empty byte strings are how protobuf encodes an absent field.
fn optional_text(bytes: &[u8], field: &'static str) -> Result<Option<String>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    String::from_utf8(bytes.to_vec())
        .map(Some)
        .map_err(|_| FrameMessageError::InvalidUtf8 { field })
}

fn optional_hex(bytes: &[u8]) -> Option<String> {
    (!bytes.is_empty()).then(|| prefixed_hex(bytes))
}

fn prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
