//! Base64 with the URL- and filename-safe alphabet, RFC 4648 §5.
//!
//! Identical to Base64 except `+` becomes `-` and `/` becomes `_`, so
//! encoded output survives URLs and file names unescaped.

use crate::buffer::core::{BufferByte, ByteBuffer};
use crate::rfc4648::core::{self as engine, Spec};

pub use crate::rfc4648::core::{Error, ErrorKind};

const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const REVERSE: [u8; 128] = engine::reverse_table(SYMBOLS);

const SPEC: Spec = Spec {
    codec: "Base64Url",
    symbols: SYMBOLS,
    reverse: &REVERSE,
    bits: 6,
    group_bytes: 3,
    group_symbols: 4,
};

/// Encodes text.
pub fn encode_str(input: &str, with_padding: bool) -> Result<String, Error> {
    engine::encode_to_string(input.as_bytes(), &SPEC, with_padding)
}

/// Encodes the contents of a buffer.
pub fn encode_buffer<T: BufferByte>(
    buffer: &ByteBuffer<T>,
    with_padding: bool,
) -> Result<String, Error> {
    engine::encode_to_string(buffer.as_bytes(), &SPEC, with_padding)
}

/// Decodes into text; the decoded payload must be valid UTF-8.
pub fn decode_to_string(input: &str) -> Result<String, Error> {
    engine::decode_to_string(input, &SPEC)
}

/// Decodes into a buffer of raw bytes.
pub fn decode_to_buffer<T: BufferByte>(input: &str) -> Result<ByteBuffer<T>, Error> {
    engine::decode_to_buffer(input, &SPEC)
}
