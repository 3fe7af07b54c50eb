// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

use charconv::*;

#[test]
fn test_utf8_to_utf16() {
    let mut decoder = UTF_8.new_decoder();
    let mut dst = [0u16; 8];
    let (result, read, written, replaced) = decoder.decode_to_utf16(b"caf\xC3\xA9", &mut dst[..], true);
    assert_eq!(result, CoderResult::InputEmpty);
    assert_eq!(read, 5);
    assert_eq!(written, 4);
    assert!(!replaced);
    assert_eq!(&dst[..written], &[0x0063u16, 0x0061, 0x0066, 0x00E9][..]);
}

#[test]
fn test_same_bytes_two_encodings() {
    let mut decoder = WINDOWS_1252.new_decoder_without_bom_handling();
    let mut dst = [0u8; 16];
    let (result, read, written) = decoder.decode_to_utf8_without_replacement(b"caf\xE9", &mut dst[..], true);
    assert_eq!(result, DecoderResult::InputEmpty);
    assert_eq!(read, 4);
    assert_eq!(&dst[..written], "caf\u{E9}".as_bytes());

    let mut decoder = UTF_8.new_decoder_without_bom_handling();
    let (result, read, written) = decoder.decode_to_utf8_without_replacement(b"caf\xE9", &mut dst[..], true);
    assert_eq!(result, DecoderResult::Malformed(1, 0));
    assert_eq!(read, 4);
    assert_eq!(written, 3);
    assert_eq!(result.malformed_start(read), Some(3));
}

#[test]
fn test_lone_ff_is_replaced() {
    let mut decoder = UTF_8.new_decoder();
    let mut dst = [0u8; 8];
    let (result, read, written, replaced) = decoder.decode_to_utf8(b"\xFF", &mut dst[..], true);
    assert_eq!(result, CoderResult::InputEmpty);
    assert_eq!(read, 1);
    assert!(replaced);
    assert_eq!(&dst[..written], "\u{FFFD}".as_bytes());
}

#[test]
fn test_split_three_byte_sequence() {
    let mut whole = [0u16; 4];
    let mut decoder = UTF_8.new_decoder();
    let (_, _, whole_written, _) = decoder.decode_to_utf16(b"\xE4\xBD\xA0", &mut whole[..], true);

    let mut decoder = UTF_8.new_decoder();
    let mut dst = [0u16; 4];
    let (result, read, first_written, _) = decoder.decode_to_utf16(b"\xE4", &mut dst[..], false);
    assert_eq!((result, read, first_written), (CoderResult::InputEmpty, 1, 0));
    let (result, read, second_written, _) = decoder.decode_to_utf16(b"\xBD\xA0", &mut dst[..], true);
    assert_eq!((result, read), (CoderResult::InputEmpty, 2));
    assert_eq!(&dst[..second_written], &whole[..whole_written]);
    assert_eq!(&dst[..second_written], &[0x4F60u16][..]);
}

#[test]
fn test_label_with_trailing_space() {
    assert_eq!(Encoding::for_label(b"UTF-8 "), Some(UTF_8));
}

#[test]
fn test_surrogate_pair_split_across_calls() {
    let mut encoder = UTF_8.new_encoder();
    let mut dst = [0u8; 8];
    let (result, read, written, _) = encoder.encode_from_utf16(&[0xD83Du16], &mut dst[..], false);
    assert_eq!((result, read, written), (CoderResult::InputEmpty, 1, 0));
    let (result, read, written, replaced) = encoder.encode_from_utf16(&[0xDE00u16], &mut dst[..], true);
    assert_eq!((result, read), (CoderResult::InputEmpty, 1));
    assert!(!replaced);
    assert_eq!(&dst[..written], b"\xF0\x9F\x98\x80");
}
