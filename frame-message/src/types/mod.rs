//! Payload, parsed action and hub context types.

use hub::UserData;
use serde::{Deserialize, Serialize};

use crate::errors::{FrameMessageError, Result};

/// A frame action POST body.
///
/// Only `trustedData` is signed. `untrustedData` is kept for callers that want
/// to display it but is never used to build a [`FrameMessage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    pub trusted_data: TrustedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untrusted_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    /// Hex-encoded protobuf `Message`.
    pub message_bytes: String,
}

impl ActionPayload {
    pub fn new(message_bytes: impl Into<String>) -> Self {
        Self {
            trusted_data: TrustedData {
                message_bytes: message_bytes.into(),
            },
            untrusted_data: None,
        }
    }

    /// The signed message bytes, hex-decoded.
    pub fn message_bytes(&self) -> Result<Vec<u8>> {
        wire::deserialize::decode_hex(&self.trusted_data.message_bytes)
            .map_err(FrameMessageError::from)
    }
}

/// Identifies a cast by author fid and `0x`-prefixed hex hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastId {
    pub fid: u64,
    pub hash: String,
}

/// Fields extracted from the signed frame action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedActionData {
    pub button_index: u32,
    pub input_text: Option<String>,
    pub requester_fid: u64,
    pub cast_id: Option<CastId>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub transaction_id: Option<String>,
    pub address: Option<String>,
    /// Seconds since the protocol epoch.
    pub timestamp: u32,
    pub network: String,
}

/// Facts about the requester fetched from the hub.
///
/// Only meaningful when `is_valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubContext {
    pub is_valid: bool,
    pub requester_follows_caster: bool,
    pub caster_follows_requester: bool,
    pub liked_cast: bool,
    pub recasted_cast: bool,
    pub requester_verified_addresses: Vec<String>,
    pub requester_user_data: UserData,
}

/// A decoded frame action, with hub context when it was requested.
///
/// Serializes as one flat record: the action fields, plus the context fields
/// when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameMessage {
    #[serde(flatten)]
    pub data: ParsedActionData,
    #[serde(flatten)]
    pub context: Option<HubContext>,
}

impl FrameMessage {
    pub fn new(data: ParsedActionData) -> Self {
        Self {
            data,
            context: None,
        }
    }

    pub fn with_context(data: ParsedActionData, context: HubContext) -> Self {
        Self {
            data,
            context: Some(context),
        }
    }

    /// Hub verdict on the signature, or `None` if the hub was not asked.
    pub fn is_valid(&self) -> Option<bool> {
        self.context.as_ref().map(|c| c.is_valid)
    }

    /// Fail with [`FrameMessageError::InvalidSignature`] if the hub rejected the message.
    ///
    /// A message without hub context passes unchecked.
    pub fn ensure_valid(self) -> Result<Self> {
        match self.is_valid() {
            Some(false) => Err(FrameMessageError::InvalidSignature),
            _ => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed() -> ParsedActionData {
        ParsedActionData {
            button_index: 1,
            input_text: None,
            requester_fid: 2,
            cast_id: None,
            url: None,
            state: None,
            transaction_id: None,
            address: None,
            timestamp: 0,
            network: "FARCASTER_NETWORK_MAINNET".to_string(),
        }
    }

    fn context(is_valid: bool) -> HubContext {
        HubContext {
            is_valid,
            requester_follows_caster: false,
            caster_follows_requester: false,
            liked_cast: false,
            recasted_cast: false,
            requester_verified_addresses: vec![],
            requester_user_data: UserData::default(),
        }
    }

    #[test]
    fn test_payload_deserializes_from_camel_case() {
        let payload: ActionPayload = serde_json::from_str(
            r#"{"untrustedData":{"fid":2},"trustedData":{"messageBytes":"0a00"}}"#,
        )
        .unwrap();

        assert_eq!(payload.trusted_data.message_bytes, "0a00");
        assert_eq!(payload.message_bytes().unwrap(), vec![0x0a, 0x00]);
        assert!(payload.untrusted_data.is_some());
    }

    #[test]
    fn test_frame_message_without_context_has_only_action_fields() {
        let value = serde_json::to_value(FrameMessage::new(parsed())).unwrap();
        let expected = serde_json::to_value(parsed()).unwrap();

        assert_eq!(value, expected);
        assert!(value.get("isValid").is_none());
    }

    #[test]
    fn test_frame_message_with_context_is_flat() {
        let value = serde_json::to_value(FrameMessage::with_context(parsed(), context(true))).unwrap();

        assert_eq!(value["buttonIndex"], 1);
        assert_eq!(value["isValid"], true);
        assert_eq!(value["requesterVerifiedAddresses"], serde_json::json!([]));
    }

    #[test]
    fn test_ensure_valid() {
        assert!(FrameMessage::new(parsed()).ensure_valid().is_ok());
        assert!(FrameMessage::with_context(parsed(), context(true))
            .ensure_valid()
            .is_ok());
        assert!(matches!(
            FrameMessage::with_context(parsed(), context(false)).ensure_valid(),
            Err(FrameMessageError::InvalidSignature)
        ));
    }
}
