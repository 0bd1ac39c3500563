//! Shared engine for the base-2^k codecs of RFC 4648.
//!
//! Base32, Base32Hex, Base64 and Base64Url differ only in their alphabet
//! and group geometry; everything else — the bit accumulator, the padding
//! rules, the ragged-tail handling — is identical. Each codec module
//! supplies a [`Spec`] and forwards its four entry points here.

use std::fmt;

use crate::buffer::core::{BufferByte, ByteBuffer};
use crate::common::SourceLocation;

/// Sentinel in a reverse table marking a byte outside the alphabet.
pub const INVALID: u8 = 0xFF;

/// The padding character shared by all four codecs.
pub const PAD: u8 = b'=';

/// Alphabet and group geometry of one base-2^k codec.
///
/// `group_bytes * 8 == group_symbols * bits` must hold — a group is one
/// exact radix conversion with no bits left over.
pub struct Spec {
    /// Codec name used in error messages ("Base32", "Base64Url", ...).
    pub codec: &'static str,
    /// Symbol table indexed by digit value.
    pub symbols: &'static [u8],
    /// Digit value indexed by ASCII code, [`INVALID`] elsewhere.
    pub reverse: &'static [u8; 128],
    /// Bits carried per symbol (5 or 6).
    pub bits: usize,
    /// Input bytes per full group (5 or 3).
    pub group_bytes: usize,
    /// Output symbols per full group (8 or 4).
    pub group_symbols: usize,
}

/// Builds the 128-entry ASCII-indexed reverse lookup for an alphabet.
pub const fn reverse_table(symbols: &[u8]) -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut index = 0;

    while index < symbols.len() {
        table[symbols[index] as usize] = index as u8;
        index += 1;
    }

    table
}

/// What went wrong in a base-2^k codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Failed to reserve memory for the output container.
    Reserve,
    /// The input is not a well-formed encoded string.
    Parse,
}

/// Error raised by a base-2^k codec, tagged with the codec's name and
/// carrying the source position of the raise site.
#[derive(Debug, Clone)]
pub struct Error {
    codec: &'static str,
    kind: ErrorKind,
    message: String,
    location: SourceLocation,
}

impl Error {
    #[track_caller]
    pub(crate) fn new(codec: &'static str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            codec,
            kind,
            message: message.into(),
            location: SourceLocation::capture(),
        }
    }

    /// Name of the codec that raised the error.
    pub fn codec(&self) -> &'static str {
        self.codec
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
        write!(f, "{}: {}", self.codec, self.message)
    }
}

impl std::error::Error for Error {}

/// Exact encoded length for `len` input bytes.
pub(crate) fn encoded_len(len: usize, spec: &Spec, with_padding: bool) -> usize {
    let full_groups = len / spec.group_bytes;
    let ragged = len % spec.group_bytes;
    let mut total = full_groups * spec.group_symbols;

    if ragged > 0 {
        if with_padding {
            total += spec.group_symbols;
        } else {
            total += (ragged * 8).div_ceil(spec.bits);
        }
    }

    total
}

/// Encodes `input`, emitting `group_symbols` symbols per `group_bytes`
/// bytes. A ragged final group emits just the symbols that carry data,
/// then pad characters up to the group width iff `with_padding`.
pub(crate) fn encode_to_string(
    input: &[u8],
    spec: &Spec,
    with_padding: bool,
) -> Result<String, Error> {
    let mut encoded = String::new();
    if encoded.try_reserve(encoded_len(input.len(), spec, with_padding)).is_err() {
        return Err(Error::new(
            spec.codec,
            ErrorKind::Reserve,
            "failed to reserve memory for the encoded output",
        ));
    }

    let total_bits = spec.group_symbols * spec.bits;
    let mask = (1u64 << spec.bits) - 1;

    for group in input.chunks(spec.group_bytes) {
        let mut accumulator: u64 = 0;
        for &byte in group {
            accumulator = (accumulator << 8) | u64::from(byte);
        }
        // Left-align so the unused low-order bits of a ragged group are zero.
        accumulator <<= 8 * (spec.group_bytes - group.len());

        let data_symbols = (group.len() * 8).div_ceil(spec.bits);

        for position in 0..data_symbols {
            let shift = total_bits - spec.bits * (position + 1);
            let index = ((accumulator >> shift) & mask) as usize;
            encoded.push(spec.symbols[index] as char);
        }

        if with_padding {
            for _ in data_symbols..spec.group_symbols {
                encoded.push(PAD as char);
            }
        }
    }

    Ok(encoded)
}

/// Decodes `input` into raw bytes.
///
/// Whitespace is not skipped. Padding must be canonical: once a `=` is
/// seen, only further `=` may follow within the group, and the combined
/// count of real and virtually-restored pad characters must leave a
/// whole number of bytes plus fewer leftover bits than one symbol
/// carries. A final group shorter than the group width is accepted with
/// the missing symbols treated as padding; decoding stops after the
/// first pad-bearing group.
pub(crate) fn decode_to_bytes(input: &str, spec: &Spec) -> Result<Vec<u8>, Error> {
    let bytes = input.as_bytes();

    let mut decoded = Vec::new();
    let capacity = bytes.len().div_ceil(spec.group_symbols) * spec.group_bytes;
    if decoded.try_reserve(capacity).is_err() {
        return Err(Error::new(
            spec.codec,
            ErrorKind::Reserve,
            "failed to reserve memory for the decoded output",
        ));
    }

    let total_bits = spec.group_symbols * spec.bits;
    let mut position = 0;

    while position < bytes.len() {
        let mut accumulator: u64 = 0;
        let mut symbols = 0;
        let mut taken = 0;
        let mut pads = 0;

        while position < bytes.len() && taken < spec.group_symbols {
            let ch = bytes[position];
            position += 1;
            taken += 1;

            if ch == PAD {
                pads += 1;
            } else if pads > 0 {
                return Err(Error::new(
                    spec.codec,
                    ErrorKind::Parse,
                    format!("character {:?} after padding", ch as char),
                ));
            } else {
                let value = if ch < 128 { spec.reverse[ch as usize] } else { INVALID };
                if value == INVALID {
                    return Err(Error::new(
                        spec.codec,
                        ErrorKind::Parse,
                        format!("invalid character {:?} in encoded input", ch as char),
                    ));
                }
                accumulator = (accumulator << spec.bits) | u64::from(value);
                symbols += 1;
            }
        }

        // A short final group stands for a group whose missing tail is
        // entirely padding.
        pads += spec.group_symbols - taken;

        let data_bits = symbols * spec.bits;
        if (symbols == 0 && pads > 0) || data_bits % 8 >= spec.bits {
            return Err(Error::new(
                spec.codec,
                ErrorKind::Parse,
                format!("invalid padding length of {} in final group", pads),
            ));
        }

        accumulator <<= spec.bits * pads;

        for index in 0..data_bits / 8 {
            decoded.push((accumulator >> (total_bits - 8 * (index + 1))) as u8);
        }

        // Padding can only close the message.
        if pads > 0 {
            break;
        }
    }

    Ok(decoded)
}

/// String-producing decode surface: the decoded payload must be text.
pub(crate) fn decode_to_string(input: &str, spec: &Spec) -> Result<String, Error> {
    let decoded = decode_to_bytes(input, spec)?;

    String::from_utf8(decoded).map_err(|_| {
        Error::new(
            spec.codec,
            ErrorKind::Parse,
            "decoded payload is not valid UTF-8 text",
        )
    })
}

/// Buffer-producing decode surface, assembled through staging chunks.
pub(crate) fn decode_to_buffer<T: BufferByte>(
    input: &str,
    spec: &Spec,
) -> Result<ByteBuffer<T>, Error> {
    let decoded = decode_to_bytes(input, spec)?;

    ByteBuffer::from_bytes(&decoded).map_err(|e| {
        Error::new(
            spec.codec,
            ErrorKind::Reserve,
            format!("failed to assemble the decoded buffer: {}", e),
        )
    })
}
