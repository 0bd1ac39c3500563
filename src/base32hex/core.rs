//! Base32 with the extended-hex alphabet, RFC 4648 §7.
//!
//! Identical to Base32 except that the 32 symbols are `0-9` then `A-V`,
//! which preserves numeric sort order of the encoded form.

use crate::buffer::core::{BufferByte, ByteBuffer};
use crate::rfc4648::core::{self as engine, Spec};

pub use crate::rfc4648::core::{Error, ErrorKind};

const SYMBOLS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";
const REVERSE: [u8; 128] = engine::reverse_table(SYMBOLS);

const SPEC: Spec = Spec {
    codec: "Base32Hex",
    symbols: SYMBOLS,
    reverse: &REVERSE,
    bits: 5,
    group_bytes: 5,
    group_symbols: 8,
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
