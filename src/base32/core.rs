//! Base32 encoding and decoding in accordance with RFC 4648 §6.

use crate::buffer::core::{BufferByte, ByteBuffer};
use crate::rfc4648::core::{self as engine, Spec};

pub use crate::rfc4648::core::{Error, ErrorKind};

const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const REVERSE: [u8; 128] = engine::reverse_table(SYMBOLS);

const SPEC: Spec = Spec {
    codec: "Base32",
    symbols: SYMBOLS,
    reverse: &REVERSE,
    bits: 5,
    group_bytes: 5,
    group_symbols: 8,
};

/// Encodes text. Groups of 5 input bytes become 8 symbols; a ragged
/// final group of 1, 2, 3 or 4 bytes becomes 2, 4, 5 or 7 symbols,
/// completed with `=` characters iff `with_padding`.
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
/// must be valid UTF-8. Padding must be canonical (a trailing `=` count
/// of 0, 1, 3, 4 or 6 once a short final group is completed).
pub fn decode_to_string(input: &str) -> Result<String, Error> {
    engine::decode_to_string(input, &SPEC)
}

/// Decodes into a buffer of raw bytes.
pub fn decode_to_buffer<T: BufferByte>(input: &str) -> Result<ByteBuffer<T>, Error> {
    engine::decode_to_buffer(input, &SPEC)
}
