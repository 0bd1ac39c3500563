//! Ascii85 encoding and decoding, in the btoa/Adobe lineage.
//!
//! Groups of 4 bytes are read as a big-endian 32-bit word and written as
//! five radix-85 digits offset from `!`. Two single-character shortcuts
//! exist for full groups: `z` for four zero bytes, and — only when
//! space-folding is on — `y` for four spaces. Adobe mode wraps the
//! payload in `<~` and `~>` delimiters. Decoding ignores spaces and
//! newlines everywhere.

use std::fmt;

use crate::buffer::core::{BufferByte, ByteBuffer};
use crate::common::SourceLocation;

/// First digit symbol `!`; carries the value 0.
const DIGIT_LOW: u8 = 0x21;
/// Last digit symbol `u`; carries the value 84.
const DIGIT_HIGH: u8 = 0x75;
/// Largest digit value, used to pad a short final group on decode.
const MAX_DIGIT: u64 = 84;
/// Shortcut character for a full group of zero bytes.
const ZERO_SHORTCUT: u8 = b'z';
/// Shortcut character for a full group of spaces.
const SPACE_SHORTCUT: u8 = b'y';
/// Four ASCII spaces as one big-endian word.
const SPACE_WORD: u32 = 0x2020_2020;

/// What went wrong in the Ascii85 codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Failed to reserve memory for the output container.
    Reserve,
    /// The input is not a well-formed encoded string.
    Parse,
}

/// Error raised by the Ascii85 codec, carrying the kind, a message and
/// the source position of the raise site.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    location: SourceLocation,
}

impl Error {
    #[track_caller]
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: SourceLocation::capture(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ascii85: {}", self.message)
    }
}

impl std::error::Error for Error {}

fn encode_bytes(input: &[u8], fold_spaces: bool, adobe_mode: bool) -> Result<String, Error> {
    let mut encoded = String::new();
    let mut capacity = input.len() + input.len().div_ceil(4);
    if adobe_mode {
        capacity += 4;
    }
    if encoded.try_reserve(capacity).is_err() {
        return Err(Error::new(
            ErrorKind::Reserve,
            "failed to reserve memory for the encoded output",
        ));
    }

    if adobe_mode {
        encoded.push_str("<~");
    }

    for group in input.chunks(4) {
        let mut word: u32 = 0;
        for &byte in group {
            word = (word << 8) | u32::from(byte);
        }
        // Zero-extend a ragged tail so the digits line up with the full
        // big-endian word.
        word <<= 8 * (4 - group.len());

        // The shortcuts stand for whole groups only; an all-zero ragged
        // tail still spells out its digits.
        if group.len() == 4 {
            if word == 0 {
                encoded.push(ZERO_SHORTCUT as char);
                continue;
            }
            if word == SPACE_WORD && fold_spaces {
                encoded.push(SPACE_SHORTCUT as char);
                continue;
            }
        }

        let mut digits = [0u8; 5];
        let mut value = word;
        for digit in digits.iter_mut().rev() {
            *digit = (value % 85) as u8;
            value /= 85;
        }
        for &digit in &digits[..group.len() + 1] {
            encoded.push((digit + DIGIT_LOW) as char);
        }
    }

    if adobe_mode {
        encoded.push_str("~>");
    }

    Ok(encoded)
}

/// Locates the `<~` ... `~>` payload. Only whitespace may precede the
/// opening delimiter or follow the closing one. An empty input is its
/// own (empty) payload.
fn strip_adobe_frame(bytes: &[u8]) -> Result<&[u8], Error> {
    if bytes.is_empty() {
        return Ok(bytes);
    }

    let mut start = None;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b' ' | b'\n' => index += 1,
            b'<' if index + 1 < bytes.len() && bytes[index + 1] == b'~' => {
                start = Some(index + 2);
                break;
            }
            _ => break,
        }
    }
    let Some(start) = start else {
        return Err(Error::new(ErrorKind::Parse, "expected the opening <~ delimiter"));
    };

    let mut end = None;
    let mut index = bytes.len();
    while index > 0 {
        match bytes[index - 1] {
            b' ' | b'\n' => index -= 1,
            b'>' if index >= 2 && bytes[index - 2] == b'~' => {
                end = Some(index - 2);
                break;
            }
            _ => break,
        }
    }
    let Some(end) = end else {
        return Err(Error::new(ErrorKind::Parse, "expected the closing ~> delimiter"));
    };

    if end < start {
        return Err(Error::new(ErrorKind::Parse, "the <~ and ~> delimiters overlap"));
    }

    Ok(&bytes[start..end])
}

fn decode_bytes(input: &str, fold_spaces: bool, adobe_mode: bool) -> Result<Vec<u8>, Error> {
    let bytes = input.as_bytes();
    let payload = if adobe_mode { strip_adobe_frame(bytes)? } else { bytes };

    let mut decoded = Vec::new();
    let capacity = payload.len().saturating_sub(payload.len().div_ceil(5));
    if decoded.try_reserve(capacity).is_err() {
        return Err(Error::new(
            ErrorKind::Reserve,
            "failed to reserve memory for the decoded output",
        ));
    }

    let mut index = 0;
    while index < payload.len() {
        match payload[index] {
            b' ' | b'\n' => index += 1,
            ZERO_SHORTCUT => {
                decoded.extend_from_slice(&[0, 0, 0, 0]);
                index += 1;
            }
            SPACE_SHORTCUT => {
                if !fold_spaces {
                    return Err(Error::new(
                        ErrorKind::Parse,
                        "the 'y' shortcut requires space folding",
                    ));
                }
                decoded.extend_from_slice(b"    ");
                index += 1;
            }
            _ => {
                // Consume up to five digits. A shortcut character ends
                // the group early and is handled as its own group.
                let mut value: u64 = 0;
                let mut count = 0;
                while index < payload.len() && count < 5 {
                    let ch = payload[index];
                    if ch == b' ' || ch == b'\n' {
                        index += 1;
                        continue;
                    }
                    if ch == ZERO_SHORTCUT || ch == SPACE_SHORTCUT {
                        break;
                    }
                    if ch < DIGIT_LOW || ch > DIGIT_HIGH {
                        return Err(Error::new(
                            ErrorKind::Parse,
                            format!("invalid character {:?} in encoded input", ch as char),
                        ));
                    }
                    value = value * 85 + u64::from(ch - DIGIT_LOW);
                    count += 1;
                    index += 1;
                }

                // A group of k < 5 digits is completed with the maximum
                // digit value and yields its first k - 1 bytes.
                for _ in count..5 {
                    value = value * 85 + MAX_DIGIT;
                }
                let word = value as u32;
                for position in 0..count - 1 {
                    decoded.push((word >> (24 - 8 * position)) as u8);
                }
            }
        }
    }

    Ok(decoded)
}

/// Encodes text.
pub fn encode_str(input: &str, fold_spaces: bool, adobe_mode: bool) -> Result<String, Error> {
    encode_bytes(input.as_bytes(), fold_spaces, adobe_mode)
}

/// Encodes the contents of a buffer.
pub fn encode_buffer<T: BufferByte>(
    buffer: &ByteBuffer<T>,
    fold_spaces: bool,
    adobe_mode: bool,
) -> Result<String, Error> {
    encode_bytes(buffer.as_bytes(), fold_spaces, adobe_mode)
}

/// Decodes into text; the decoded payload must be valid UTF-8.
pub fn decode_to_string(
    input: &str,
    fold_spaces: bool,
    adobe_mode: bool,
) -> Result<String, Error> {
    let decoded = decode_bytes(input, fold_spaces, adobe_mode)?;

    String::from_utf8(decoded)
        .map_err(|_| Error::new(ErrorKind::Parse, "decoded payload is not valid UTF-8 text"))
}

/// Decodes into a buffer of raw bytes.
pub fn decode_to_buffer<T: BufferByte>(
    input: &str,
    fold_spaces: bool,
    adobe_mode: bool,
) -> Result<ByteBuffer<T>, Error> {
    let decoded = decode_bytes(input, fold_spaces, adobe_mode)?;

    ByteBuffer::from_bytes(&decoded).map_err(|e| {
        Error::new(
            ErrorKind::Reserve,
            format!("failed to assemble the decoded buffer: {}", e),
        )
    })
}
