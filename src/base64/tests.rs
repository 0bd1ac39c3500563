#[cfg(test)]
mod tests {
    use crate::base64::core::*;
    use crate::buffer::core::ByteBuffer;

    #[test]
    fn test_encode_rfc_vectors() {
        assert_eq!(encode_str("", true).unwrap(), "");
        assert_eq!(encode_str("f", true).unwrap(), "Zg==");
        assert_eq!(encode_str("fo", true).unwrap(), "Zm8=");
        assert_eq!(encode_str("foo", true).unwrap(), "Zm9v");
        assert_eq!(encode_str("foob", true).unwrap(), "Zm9vYg==");
        assert_eq!(encode_str("fooba", true).unwrap(), "Zm9vYmE=");
        assert_eq!(encode_str("foobar", true).unwrap(), "Zm9vYmFy");
    }

    #[test]
    fn test_encode_without_padding() {
        assert_eq!(encode_str("f", false).unwrap(), "Zg");
        assert_eq!(encode_str("fo", false).unwrap(), "Zm8");
        assert_eq!(encode_str("foobar", false).unwrap(), "Zm9vYmFy");
    }

    #[test]
    fn test_decode_rfc_vectors() {
        assert_eq!(decode_to_string("Zg==").unwrap(), "f");
        assert_eq!(decode_to_string("Zm8=").unwrap(), "fo");
        assert_eq!(decode_to_string("Zm9v").unwrap(), "foo");
        assert_eq!(decode_to_string("Zm9vYmFy").unwrap(), "foobar");
    }

    #[test]
    fn test_decode_accepts_unpadded_tail() {
        assert_eq!(decode_to_string("Zg").unwrap(), "f");
        assert_eq!(decode_to_string("Zm8").unwrap(), "fo");
    }

    #[test]
    fn test_decode_rejects_lone_final_symbol() {
        assert_eq!(decode_to_string("Zm9vY").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_decode_rejects_whitespace() {
        assert_eq!(decode_to_string("Zm 9v").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(decode_to_string("Zm9v\n").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_decode_rejects_invalid_character() {
        assert_eq!(decode_to_string("Zm9!").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_decode_rejects_symbol_after_padding() {
        assert_eq!(decode_to_string("Zg=x").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_decode_rejects_non_canonical_padding() {
        // Three '=' cannot close a 3-byte group.
        assert_eq!(decode_to_string("Z===").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(decode_to_string("====").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_padding_symmetry() {
        for len in 0..24 {
            let input: String = (0..len).map(|i| char::from(b'A' + (i % 26) as u8)).collect();
            let padded = encode_str(&input, true).unwrap();
            let unpadded = encode_str(&input, false).unwrap();
            assert_eq!(padded.trim_end_matches('='), unpadded);
            assert_eq!(decode_to_string(&padded).unwrap(), input);
            assert_eq!(decode_to_string(&unpadded).unwrap(), input);
        }
    }

    #[test]
    fn test_expansion_ratio() {
        for len in 0..32 {
            let buffer = ByteBuffer::from_vec(vec![0xA5u8; len]).unwrap();
            let encoded = encode_buffer(&buffer, true).unwrap();
            assert_eq!(encoded.len(), 4 * len.div_ceil(3));
        }
    }

    #[test]
    fn test_surface_equivalence() {
        let text = "any carnal pleasure";
        let buffer = ByteBuffer::from_slice(text.as_bytes()).unwrap();
        assert_eq!(encode_str(text, true).unwrap(), encode_buffer(&buffer, true).unwrap());
    }

    #[test]
    fn test_buffer_round_trip_all_byte_values() {
        let input: Vec<u8> = (0..=255).collect();
        let buffer = ByteBuffer::from_vec(input.clone()).unwrap();
        let encoded = encode_buffer(&buffer, true).unwrap();
        assert_eq!(encoded, "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8gISIjJCUmJygpKissLS4vMDEyMzQ1Njc4OTo7PD0+P0BBQkNERUZHSElKS0xNTk9QUVJTVFVWV1hZWltcXV5fYGFiY2RlZmdoaWprbG1ub3BxcnN0dXZ3eHl6e3x9fn+AgYKDhIWGh4iJiouMjY6PkJGSk5SVlpeYmZqbnJ2en6ChoqOkpaanqKmqq6ytrq+wsbKztLW2t7i5uru8vb6/wMHCw8TFxsfIycrLzM3Oz9DR0tPU1dbX2Nna29zd3t/g4eLj5OXm5+jp6uvs7e7v8PHy8/T19vf4+fr7/P3+/w==");
        let decoded: ByteBuffer = decode_to_buffer(&encoded).unwrap();
        assert_eq!(decoded.as_slice(), &input[..]);
    }

    #[test]
    fn test_signed_buffer_round_trip() {
        let buffer = ByteBuffer::<i8>::from_slice(&[-128, -1, 0, 1, 127]).unwrap();
        let encoded = encode_buffer(&buffer, true).unwrap();
        let decoded: ByteBuffer<i8> = decode_to_buffer(&encoded).unwrap();
        assert_eq!(decoded, buffer);
    }
}
