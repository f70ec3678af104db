//! Envelope types exchanged between the gateway and the inference service.

mod codec;
mod types;

pub use codec::{DecodeError, decode_payload, encode_payload};
pub use types::*;
