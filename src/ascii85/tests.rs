#[cfg(test)]
mod tests {
    use crate::ascii85::core::*;
    use crate::buffer::core::ByteBuffer;

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_str("", false, false).unwrap(), "");
    }

    #[test]
    fn test_encode_empty_adobe() {
        assert_eq!(encode_str("", false, true).unwrap(), "<~~>");
    }

    #[test]
    fn test_encode_full_group() {
        assert_eq!(encode_str("Man ", false, false).unwrap(), "9jqo^");
    }

    #[test]
    fn test_encode_ragged_tails() {
        // r bytes emit r + 1 digits.
        assert_eq!(encode_str("sure.", false, false).unwrap(), "F*2M7/c");
        assert_eq!(encode_str("Man is d", false, false).unwrap(), "9jqo^BlbD-");
    }

    #[test]
    fn test_encode_zero_group_shortcut() {
        let buffer = ByteBuffer::from_slice(&[0u8, 0, 0, 0]).unwrap();
        assert_eq!(encode_buffer(&buffer, false, false).unwrap(), "z");
        assert_eq!(encode_buffer(&buffer, false, true).unwrap(), "<~z~>");
    }

    #[test]
    fn test_encode_ragged_zero_tail_spells_digits() {
        // The shortcut stands for a whole group; shorter runs of zeros
        // spell out their digits.
        let buffer = ByteBuffer::from_slice(&[0u8]).unwrap();
        assert_eq!(encode_buffer(&buffer, false, false).unwrap(), "!!");
        let buffer = ByteBuffer::from_slice(&[0u8, 0]).unwrap();
        assert_eq!(encode_buffer(&buffer, false, false).unwrap(), "!!!");
    }

    #[test]
    fn test_encode_space_folding() {
        assert_eq!(encode_str("    ", true, false).unwrap(), "y");
        assert_eq!(encode_str("    ", false, false).unwrap(), "+<VdL");
    }

    #[test]
    fn test_decode_full_group() {
        assert_eq!(decode_to_string("9jqo^", false, false).unwrap(), "Man ");
    }

    #[test]
    fn test_decode_ragged_tails() {
        assert_eq!(decode_to_string("F*2M7/c", false, false).unwrap(), "sure.");
        assert_eq!(decode_to_string("9jqo^BlbD-", false, false).unwrap(), "Man is d");
    }

    #[test]
    fn test_decode_zero_shortcut() {
        let decoded: ByteBuffer = decode_to_buffer("z", false, false).unwrap();
        assert_eq!(decoded.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_space_shortcut() {
        assert_eq!(decode_to_string("y", true, false).unwrap(), "    ");
    }

    #[test]
    fn test_decode_space_shortcut_without_folding_fails() {
        assert_eq!(decode_to_string("y", false, false).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_decode_whitespace_is_ignored() {
        assert_eq!(decode_to_string(" 9 jq\no^ ", false, false).unwrap(), "Man ");
    }

    #[test]
    fn test_decode_invalid_character() {
        // 'v' through '~' sit just past the digit range.
        assert_eq!(decode_to_string("9jqo~", false, false).unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(decode_to_string("\x07", false, false).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_decode_shortcut_mid_group_flushes_partial() {
        // "9j" flushes as a one-byte ragged tail ('M'), then 'z' stands
        // alone as a zero group.
        let decoded: ByteBuffer = decode_to_buffer("9jz", false, false).unwrap();
        assert_eq!(decoded.as_slice(), &[0x4D, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_lone_digit_yields_nothing() {
        let decoded: ByteBuffer = decode_to_buffer("9", false, false).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_adobe_round_trip() {
        let encoded = encode_str("Man is d", false, true).unwrap();
        assert_eq!(encoded, "<~9jqo^BlbD-~>");
        assert_eq!(decode_to_string(&encoded, false, true).unwrap(), "Man is d");
    }

    #[test]
    fn test_adobe_accepts_surrounding_whitespace() {
        assert_eq!(decode_to_string(" \n <~9jqo^~> \n", false, true).unwrap(), "Man ");
    }

    #[test]
    fn test_adobe_empty_frame() {
        assert_eq!(decode_to_string("<~~>", false, true).unwrap(), "");
    }

    #[test]
    fn test_adobe_missing_opening_fails() {
        assert_eq!(
            decode_to_string("9jqo^~>", false, true).unwrap_err().kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_adobe_missing_closing_fails() {
        assert_eq!(
            decode_to_string("<~9jqo^", false, true).unwrap_err().kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_adobe_garbage_before_frame_fails() {
        assert_eq!(
            decode_to_string("x <~9jqo^~>", false, true).unwrap_err().kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_expansion_ratio() {
        for len in 0..16 {
            // 0x2D groups never hit a shortcut.
            let buffer = ByteBuffer::from_vec(vec![0x2Du8; len]).unwrap();
            let encoded = encode_buffer(&buffer, false, false).unwrap();
            let expected = 5 * (len / 4) + if len % 4 > 0 { len % 4 + 1 } else { 0 };
            assert_eq!(encoded.len(), expected);

            let adobe = encode_buffer(&buffer, false, true).unwrap();
            assert_eq!(adobe.len(), expected + 4);
        }
    }

    #[test]
    fn test_surface_equivalence() {
        let text = "surface equivalence";
        let buffer = ByteBuffer::from_slice(text.as_bytes()).unwrap();
        assert_eq!(
            encode_str(text, true, true).unwrap(),
            encode_buffer(&buffer, true, true).unwrap()
        );
    }

    #[test]
    fn test_buffer_round_trip_all_byte_values() {
        let input: Vec<u8> = (0..=255).collect();
        let buffer = ByteBuffer::from_vec(input.clone()).unwrap();

        for (fold_spaces, adobe_mode) in [(false, false), (true, false), (false, true), (true, true)] {
            let encoded = encode_buffer(&buffer, fold_spaces, adobe_mode).unwrap();
            let decoded: ByteBuffer = decode_to_buffer(&encoded, fold_spaces, adobe_mode).unwrap();
            assert_eq!(decoded.as_slice(), &input[..], "fold={} adobe={}", fold_spaces, adobe_mode);
        }
    }

    #[test]
    fn test_round_trip_with_interior_zero_and_space_groups() {
        let input = b"abcd\0\0\0\0    xy";
        let buffer = ByteBuffer::from_slice(input).unwrap();
        let encoded = encode_buffer(&buffer, true, false).unwrap();
        let decoded: ByteBuffer = decode_to_buffer(&encoded, true, false).unwrap();
        assert_eq!(decoded.as_slice(), input);
    }
}
