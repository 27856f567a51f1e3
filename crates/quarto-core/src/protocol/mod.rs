//! Protocol module containing message types and the binary codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_request, decode_response, encode_request, encode_response, ProtocolError};
pub use messages::*;
