//! Wire types for signed protocol messages.
//!
//! - [`pb::message`] holds the protobuf definitions for the message envelope
//!   and the frame action body.
//! - [`deserialize`] turns raw or hex-encoded bytes into a [`pb::message::Message`].

pub mod deserialize;
pub mod pb;
