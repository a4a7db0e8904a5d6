use prost::Message as _;

use crate::pb::message::Message;

#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("prost error: {0}")]
    Prost(#[from] prost::DecodeError),
}

/// Decode a hex string into raw bytes. A leading `0x` is accepted.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, DeserializeError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    Ok(hex::decode(trimmed)?)
}

/// Decode protobuf bytes into a signed [`Message`].
pub fn deserialize(bytes: &[u8]) -> Result<Message, DeserializeError> {
    Ok(Message::decode(bytes)?)
}

/// Decode a hex-encoded protobuf [`Message`].
pub fn deserialize_hex(input: &str) -> Result<Message, DeserializeError> {
    let bytes = decode_hex(input)?;
    deserialize(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message as _;
    use crate::pb::message::{message_data::Body, FrameActionBody, MessageData, MessageType};

    fn frame_message(button_index: u32) -> Message {
        Message {
            data: Some(MessageData {
                r#type: MessageType::FrameAction as i32,
                fid: 42,
                timestamp: 100,
                network: 1,
                body: Some(Body::FrameActionBody(FrameActionBody {
                    button_index,
                    ..Default::default()
                })),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_hex_with_and_without_prefix() {
        let encoded = hex::encode(frame_message(3).encode_to_vec());

        let plain = deserialize_hex(&encoded).unwrap();
        let prefixed = deserialize_hex(&format!("0x{}", encoded)).unwrap();

        assert_eq!(plain, prefixed);
        assert_eq!(plain.data.unwrap().r#type(), MessageType::FrameAction);
    }

    #[test]
    fn test_deserialize_rejects_bad_hex() {
        let result = deserialize_hex("zz12");
        assert!(matches!(result, Err(DeserializeError::Hex(_))));
    }

    #[test]
    fn test_deserialize_rejects_odd_length_hex() {
        let result = deserialize_hex("abc");
        assert!(matches!(result, Err(DeserializeError::Hex(_))));
    }

    #[test]
    fn test_deserialize_rejects_truncated_protobuf() {
        let mut bytes = frame_message(1).encode_to_vec();
        bytes.truncate(bytes.len() - 1);

        let result = deserialize(&bytes);
        assert!(matches!(result, Err(DeserializeError::Prost(_))));
    }
}
