//! Base64 encoding and decoding in accordance with RFC 4648 §4.

use crate::buffer::core::{BufferByte, ByteBuffer};
use crate::rfc4648::core::{self as engine, Spec};

pub use crate::rfc4648::core::{Error, ErrorKind};

const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const REVERSE: [u8; 128] = engine::reverse_table(SYMBOLS);

const SPEC: Spec = Spec {
    codec: "Base64",
    symbols: SYMBOLS,
    reverse: &REVERSE,
    bits: 6,
    group_bytes: 3,
    group_symbols: 4,
};

/// Encodes text. Groups of 3 input bytes become 4 symbols; a ragged
/// final group of 1 or 2 bytes becomes 2 or 3 symbols, completed with
/// `=` characters iff `with_padding`.
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

/// Decodes into text. Whitespace is not skipped, and the decoded payload
/// must be valid UTF-8. A final group of 3 symbols is read as if one `=`
/// followed, a final group of 2 as if two did; a lone symbol cannot
/// carry a whole byte and is rejected.
pub fn decode_to_string(input: &str) -> Result<String, Error> {
    engine::decode_to_string(input, &SPEC)
}

/// Decodes into a buffer of raw bytes.
pub fn decode_to_buffer<T: BufferByte>(input: &str) -> Result<ByteBuffer<T>, Error> {
    engine::decode_to_buffer(input, &SPEC)
}
