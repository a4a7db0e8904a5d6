// Message builders shared by the unit tests.
use prost::Message as _;
use wire::pb::message::{
    message_data::Body, CastId, FrameActionBody, HashScheme, Message, MessageData, MessageType,
    SignatureScheme,
};

use crate::types::ActionPayload;

pub(crate) fn frame_action(button_index: u32, cast: Option<(u64, Vec<u8>)>) -> FrameActionBody {
    FrameActionBody {
        url: b"https://example.com/frame".to_vec(),
        button_index,
        cast_id: cast.map(|(fid, hash)| CastId { fid, hash }),
        ..Default::default()
    }
}

pub(crate) fn frame_message(fid: u64, body: FrameActionBody) -> Message {
    Message {
        data: Some(MessageData {
            r#type: MessageType::FrameAction as i32,
            fid,
            timestamp: 97_000_000,
            network: 1,
            body: Some(Body::FrameActionBody(body)),
        }),
        hash: vec![0x11; 20],
        hash_scheme: HashScheme::Blake3 as i32,
        signature: vec![0x22; 64],
        signature_scheme: SignatureScheme::Ed25519 as i32,
        signer: vec![0x33; 32],
        data_bytes: None,
    }
}

pub(crate) fn encode_payload(message: &Message) -> ActionPayload {
    ActionPayload::new(hex::encode(message.encode_to_vec()))
}
