//! Base16 (hexadecimal) encoding and decoding in accordance with
//! RFC 4648 §8.
//!
//! Base16 is the one codec here with a case policy instead of a padding
//! flag: the alphabet exists in an uppercase and a lowercase edition, and
//! a decoder may accept either or both. It is also lenient about spaces
//! and newlines on decode, since hex dumps are habitually wrapped and
//! grouped for human eyes.

use std::fmt;

use crate::buffer::core::{BufferByte, ByteBuffer};
use crate::common::SourceLocation;

const UPPER_SYMBOLS: &[u8; 16] = b"0123456789ABCDEF";
const LOWER_SYMBOLS: &[u8; 16] = b"0123456789abcdef";

const INVALID: u8 = 0xFF;

/// Builds a 128-entry digit-value table accepting the selected letter
/// cases. Digits `0-9` are always accepted.
const fn digit_table(accept_upper: bool, accept_lower: bool) -> [u8; 128] {
    let mut table = [INVALID; 128];

    let mut digit = 0;
    while digit < 10 {
        table[b'0' as usize + digit] = digit as u8;
        digit += 1;
    }

    let mut letter = 0;
    while letter < 6 {
        if accept_upper {
            table[b'A' as usize + letter] = 10 + letter as u8;
        }
        if accept_lower {
            table[b'a' as usize + letter] = 10 + letter as u8;
        }
        letter += 1;
    }

    table
}

const UPPER_TABLE: [u8; 128] = digit_table(true, false);
const LOWER_TABLE: [u8; 128] = digit_table(false, true);
const MIXED_TABLE: [u8; 128] = digit_table(true, true);

/// Letter-case policy for the `A-F` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// `a-f` (example: 7a7a).
    Lowercase,
    /// Accept both `A-F` and `a-f`. Only meaningful for decoding.
    Mixed,
    /// `A-F` (example: 7A7A).
    Uppercase,
}

/// What went wrong in the Base16 codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Failed to reserve memory for the output container.
    Reserve,
    /// [`Case::Mixed`] was requested for an encode.
    InvalidCase,
    /// The input is not a well-formed encoded string.
    Parse,
}

/// Error raised by the Base16 codec, carrying the kind, a message and
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
        write!(f, "Base16: {}", self.message)
    }
}

impl std::error::Error for Error {}

fn encode_bytes(input: &[u8], case: Case) -> Result<String, Error> {
    let symbols = match case {
        Case::Uppercase => UPPER_SYMBOLS,
        Case::Lowercase => LOWER_SYMBOLS,
        Case::Mixed => {
            return Err(Error::new(
                ErrorKind::InvalidCase,
                "mixed case is only meaningful for decoding",
            ));
        }
    };

    let mut encoded = String::new();
    if encoded.try_reserve(input.len() * 2).is_err() {
        return Err(Error::new(
            ErrorKind::Reserve,
            "failed to reserve memory for the encoded output",
        ));
    }

    for &byte in input {
        encoded.push(symbols[(byte >> 4) as usize] as char);
        encoded.push(symbols[(byte & 0x0F) as usize] as char);
    }

    Ok(encoded)
}

#[track_caller]
fn digit_value(table: &[u8; 128], ch: u8) -> Result<u8, Error> {
    let value = if ch < 128 { table[ch as usize] } else { INVALID };

    if value == INVALID {
        return Err(Error::new(
            ErrorKind::Parse,
            format!("invalid character {:?} in encoded input", ch as char),
        ));
    }

    Ok(value)
}

fn decode_bytes(input: &str, case: Case) -> Result<Vec<u8>, Error> {
    let table = match case {
        Case::Uppercase => &UPPER_TABLE,
        Case::Lowercase => &LOWER_TABLE,
        Case::Mixed => &MIXED_TABLE,
    };
    let bytes = input.as_bytes();

    let mut decoded = Vec::new();
    if decoded.try_reserve(bytes.len() / 2 + 1).is_err() {
        return Err(Error::new(
            ErrorKind::Reserve,
            "failed to reserve memory for the decoded output",
        ));
    }

    // Fast path: no whitespace anywhere means the digits sit in adjacent
    // pairs and can be consumed two at a time.
    if memchr::memchr2(b' ', b'\n', bytes).is_none() {
        for pair in bytes.chunks(2) {
            let high = digit_value(table, pair[0])?;
            if pair.len() == 2 {
                let low = digit_value(table, pair[1])?;
                decoded.push(high << 4 | low);
            } else {
                // Trailing half-byte: read it as the high nibble.
                decoded.push(high << 4);
            }
        }
        return Ok(decoded);
    }

    // Whitespace present: single pass carrying the pending high nibble
    // across ignored characters.
    let mut high: Option<u8> = None;
    for &ch in bytes {
        if ch == b' ' || ch == b'\n' {
            continue;
        }
        let value = digit_value(table, ch)?;
        match high.take() {
            None => high = Some(value),
            Some(h) => decoded.push(h << 4 | value),
        }
    }
    if let Some(h) = high {
        decoded.push(h << 4);
    }

    Ok(decoded)
}

/// Encodes text, two hex digits per input byte, most-significant nibble
/// first. [`Case::Mixed`] is rejected with [`ErrorKind::InvalidCase`].
pub fn encode_str(input: &str, case: Case) -> Result<String, Error> {
    encode_bytes(input.as_bytes(), case)
}

/// Encodes the contents of a buffer.
pub fn encode_buffer<T: BufferByte>(buffer: &ByteBuffer<T>, case: Case) -> Result<String, Error> {
    encode_bytes(buffer.as_bytes(), case)
}

/// Decodes into text. Spaces and newlines between digits are ignored; a
/// final unpaired digit is read as the high nibble of a zero-padded
/// byte. The decoded payload must be valid UTF-8.
pub fn decode_to_string(input: &str, case: Case) -> Result<String, Error> {
    let decoded = decode_bytes(input, case)?;

    String::from_utf8(decoded)
        .map_err(|_| Error::new(ErrorKind::Parse, "decoded payload is not valid UTF-8 text"))
}

/// Decodes into a buffer of raw bytes.
pub fn decode_to_buffer<T: BufferByte>(input: &str, case: Case) -> Result<ByteBuffer<T>, Error> {
    let decoded = decode_bytes(input, case)?;

    ByteBuffer::from_bytes(&decoded).map_err(|e| {
        Error::new(
            ErrorKind::Reserve,
            format!("failed to assemble the decoded buffer: {}", e),
        )
    })
}
