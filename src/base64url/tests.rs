#[cfg(test)]
mod tests {
    use crate::base64url::core::*;
    use crate::buffer::core::ByteBuffer;

    #[test]
    fn test_encode_high_bytes_use_url_alphabet() {
        let buffer = ByteBuffer::from_slice(&[0xFBu8, 0xFF]).unwrap();
        assert_eq!(encode_buffer(&buffer, true).unwrap(), "-_8=");
    }

    #[test]
    fn test_decode_high_bytes() {
        let decoded: ByteBuffer = decode_to_buffer("-_8=").unwrap();
        assert_eq!(decoded.as_slice(), &[0xFB, 0xFF]);
    }

    #[test]
    fn test_standard_alphabet_is_rejected() {
        assert_eq!(decode_to_buffer::<u8>("+/8=").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_encode_matches_base64_on_common_symbols() {
        // The two alphabets only differ in the last two symbols.
        assert_eq!(encode_str("foobar", true).unwrap(), "Zm9vYmFy");
        assert_eq!(decode_to_string("Zm9vYmFy").unwrap(), "foobar");
    }

    #[test]
    fn test_padding_symmetry() {
        for len in 0..24 {
            let input: Vec<u8> = (0..len).map(|i| (i * 83 + 240) as u8).collect();
            let buffer = ByteBuffer::from_vec(input.clone()).unwrap();
            let padded = encode_buffer(&buffer, true).unwrap();
            let unpadded = encode_buffer(&buffer, false).unwrap();
            assert_eq!(padded.trim_end_matches('='), unpadded);

            let from_padded: ByteBuffer = decode_to_buffer(&padded).unwrap();
            let from_unpadded: ByteBuffer = decode_to_buffer(&unpadded).unwrap();
            assert_eq!(from_padded.as_slice(), &input[..]);
            assert_eq!(from_unpadded.as_slice(), &input[..]);
        }
    }

    #[test]
    fn test_buffer_round_trip_all_byte_values() {
        let input: Vec<u8> = (0..=255).collect();
        let buffer = ByteBuffer::from_vec(input.clone()).unwrap();
        let encoded = encode_buffer(&buffer, true).unwrap();
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        let decoded: ByteBuffer = decode_to_buffer(&encoded).unwrap();
        assert_eq!(decoded.as_slice(), &input[..]);
    }

    #[test]
    fn test_decode_rejects_whitespace() {
        assert_eq!(decode_to_string("Zm9v Zm9v").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_surface_equivalence() {
        let text = "url-safe?query=value";
        let buffer = ByteBuffer::from_slice(text.as_bytes()).unwrap();
        assert_eq!(encode_str(text, true).unwrap(), encode_buffer(&buffer, true).unwrap());
    }
}
