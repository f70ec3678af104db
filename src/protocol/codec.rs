//! Base64 text encoding of binary payloads carried in `BYTES` tensors.

use base64::{Engine as _, engine::general_purpose::STANDARD};

pub use base64::DecodeError;

/// Encodes raw bytes with the standard padded alphabet.
pub fn encode_payload(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

/// Decodes padded standard base64, skipping ASCII whitespace such as MIME line breaks.
pub fn decode_payload(text: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact)
}
