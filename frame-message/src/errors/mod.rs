//! Error types for frame message decoding and enrichment.

use hub::HubError;
use thiserror::Error;
use wire::deserialize::DeserializeError;

/// Errors that can occur while decoding or enriching a frame action.
#[derive(Error, Debug)]
pub enum FrameMessageError {
    /// The trusted data was not valid hex or not a valid protobuf message.
    #[error("Deserialize error: {0}")]
    Deserialize(#[from] DeserializeError),

    /// The decoded message carries no `data`.
    #[error("Message has no data")]
    MissingData,

    /// The decoded message is not a frame action.
    #[error("Message has no frame action body")]
    MissingFrameActionBody,

    /// A text field of the frame action body is not UTF-8.
    #[error("Invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    /// A hub lookup failed.
    #[error("Hub error: {0}")]
    Hub(#[from] HubError),

    /// The hub reported the message signature as invalid.
    #[error("Invalid frame message signature")]
    InvalidSignature,
}

impl FrameMessageError {
    /// Whether the error comes from malformed trusted data rather than the hub.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Deserialize(_)
                | Self::MissingData
                | Self::MissingFrameActionBody
                | Self::InvalidUtf8 { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameMessageError>;
