// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

use charconv::*;

static ALL: [&'static Encoding; 40] = [&BIG5_INIT, &EUC_JP_INIT, &EUC_KR_INIT, &GB18030_INIT, &GBK_INIT, &IBM866_INIT, &ISO_2022_JP_INIT,
                                       &ISO_8859_10_INIT, &ISO_8859_13_INIT, &ISO_8859_14_INIT, &ISO_8859_15_INIT,
                                       &ISO_8859_16_INIT, &ISO_8859_2_INIT, &ISO_8859_3_INIT, &ISO_8859_4_INIT, &ISO_8859_5_INIT,
                                       &ISO_8859_6_INIT, &ISO_8859_7_INIT, &ISO_8859_8_INIT, &ISO_8859_8_I_INIT, &KOI8_R_INIT,
                                       &KOI8_U_INIT, &MACINTOSH_INIT, &REPLACEMENT_INIT, &SHIFT_JIS_INIT, &UTF_16BE_INIT,
                                       &UTF_16LE_INIT, &UTF_8_INIT, &WINDOWS_1250_INIT, &WINDOWS_1251_INIT, &WINDOWS_1252_INIT,
                                       &WINDOWS_1253_INIT, &WINDOWS_1254_INIT, &WINDOWS_1255_INIT, &WINDOWS_1256_INIT,
                                       &WINDOWS_1257_INIT, &WINDOWS_1258_INIT, &WINDOWS_874_INIT, &X_MAC_CYRILLIC_INIT,
                                       &X_USER_DEFINED_INIT];

/// Deterministic xorshift so that failures reproduce.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.next() as u8).collect()
    }
}

fn byte_inputs() -> Vec<Vec<u8>> {
    let mut inputs: Vec<Vec<u8>> = vec![b"".to_vec(),
                                        b"plain ascii".to_vec(),
                                        b"\xEF\xBB\xBFbom".to_vec(),
                                        b"\xFF\xFEa\x00".to_vec(),
                                        b"\xFE\xFF\x00a".to_vec(),
                                        b"\xEF\xBB".to_vec(),
                                        b"caf\xC3\xA9 \xF0\x9F\x92\xA9 \xE4\xBD".to_vec(),
                                        b"\x82\xA0\x81\x40\xA1\xDF\xF0\x40\xFA\x40".to_vec(),
                                        b"\x81\x30\x81\x30\x84\x31\xA4\x39\x81\x30\xFF".to_vec(),
                                        b"\x88\x62\x88\x64\xA4\x40\xFE\xFE".to_vec(),
                                        b"\x8F\xA2\xAF\x8E\xA1\xA4\xA2\x8F\xA2".to_vec(),
                                        b"a\x1B$B$\"\x1B(J\x5C\x1B(I!\x1B(B\x1B(\x1B".to_vec(),
                                        b"\x00\xD8\x00\xDC\x3D\xD8\xA9\xDC\x00\xDC".to_vec()];
    let mut rng = Rng(0x2545_F491_4F6C_DD1D);
    for len in [1usize, 2, 3, 7, 64, 257].iter() {
        inputs.push(rng.bytes(*len));
    }
    inputs
}

fn string_inputs() -> Vec<String> {
    vec![String::new(),
         "plain ascii".to_string(),
         "caf\u{E9} \u{20AC}".to_string(),
         "\u{3042}\u{3044}\u{FF61}\u{00A5}\u{203E}a".to_string(),
         "\u{4F60}\u{597D}\u{E5E5}\u{1E3F}\u{10000}\u{10FFFF}".to_string(),
         "\u{AC00}\u{0416}\u{05D0}\u{0E01}".to_string(),
         "\u{1F4A9}\u{1F600}\u{FFFD}\u{0080}\u{F780}".to_string(),
         "\u{001B}\u{000E}x\u{3000}\u{FF0D}".to_string()]
}

fn decode_whole(encoding: &'static Encoding, bytes: &[u8]) -> Vec<u16> {
    decode_chunked(encoding, bytes, bytes.len().max(1))
}

fn decode_chunked(encoding: &'static Encoding, bytes: &[u8], chunk: usize) -> Vec<u16> {
    let mut decoder = encoding.new_decoder();
    let mut output = Vec::new();
    let mut chunks: Vec<&[u8]> = bytes.chunks(chunk).collect();
    if chunks.is_empty() {
        chunks.push(b"");
    }
    let count = chunks.len();
    for (i, mut src) in chunks.into_iter().enumerate() {
        let last = i + 1 == count;
        loop {
            let mut dst = vec![0u16; decoder.max_utf16_buffer_length(src.len()).unwrap()];
            let (result, read, written, _) = decoder.decode_to_utf16(src, &mut dst[..], last);
            output.extend_from_slice(&dst[..written]);
            src = &src[read..];
            if result == CoderResult::InputEmpty {
                break;
            }
        }
    }
    output
}

fn encode_chunked(encoding: &'static Encoding, utf16: &[u16], chunk: usize) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut output = Vec::new();
    let mut chunks: Vec<&[u16]> = utf16.chunks(chunk.max(1)).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }
    let count = chunks.len();
    for (i, mut src) in chunks.into_iter().enumerate() {
        let last = i + 1 == count;
        loop {
            let mut dst = vec![0u8; encoder.max_buffer_length_from_utf16_with_replacement(src.len()).unwrap()];
            let (result, read, written, _) = encoder.encode_from_utf16(src, &mut dst[..], last);
            output.extend_from_slice(&dst[..written]);
            src = &src[read..];
            if result == CoderResult::InputEmpty {
                break;
            }
        }
    }
    output
}

#[test]
fn test_decode_chunk_invariance() {
    for &encoding in ALL.iter() {
        for input in byte_inputs().iter() {
            let whole = decode_whole(encoding, &input[..]);
            for chunk in 1..5 {
                assert_eq!(decode_chunked(encoding, &input[..], chunk),
                           whole,
                           "{} {:?} in chunks of {}",
                           encoding.name(),
                           input,
                           chunk);
            }
        }
    }
}

#[test]
fn test_encode_chunk_invariance() {
    for &encoding in ALL.iter() {
        for input in string_inputs().iter() {
            let utf16: Vec<u16> = input.encode_utf16().collect();
            let whole = encode_chunked(encoding, &utf16[..], utf16.len());
            for chunk in 1..4 {
                assert_eq!(encode_chunked(encoding, &utf16[..], chunk),
                           whole,
                           "{} {:?} in chunks of {}",
                           encoding.name(),
                           input,
                           chunk);
            }
            // The UTF-8 entry point agrees with the UTF-16 one.
            let (bytes, _, _) = encoding.encode(&input[..]);
            assert_eq!(&bytes[..], &whole[..], "{} {:?}", encoding.name(), input);
        }
    }
}

#[test]
fn test_decoder_bounds_are_sufficient() {
    for &encoding in ALL.iter() {
        for input in byte_inputs().iter() {
            // Split once so that the second call starts with pending state.
            let split = input.len() / 2;
            let (head, tail) = input.split_at(split);

            let mut decoder = encoding.new_decoder();
            let mut dst = vec![0u16; decoder.max_utf16_buffer_length(head.len()).unwrap()];
            let (result, read, _, _) = decoder.decode_to_utf16(head, &mut dst[..], false);
            assert_eq!((result, read), (CoderResult::InputEmpty, head.len()));
            let mut dst = vec![0u16; decoder.max_utf16_buffer_length(tail.len()).unwrap()];
            let (result, read, _, _) = decoder.decode_to_utf16(tail, &mut dst[..], true);
            assert_eq!((result, read), (CoderResult::InputEmpty, tail.len()), "{}", encoding.name());

            let mut decoder = encoding.new_decoder();
            let mut dst = vec![0u8; decoder.max_utf8_buffer_length(head.len()).unwrap()];
            let (result, read, _, _) = decoder.decode_to_utf8(head, &mut dst[..], false);
            assert_eq!((result, read), (CoderResult::InputEmpty, head.len()));
            let mut dst = vec![0u8; decoder.max_utf8_buffer_length(tail.len()).unwrap()];
            let (result, read, _, _) = decoder.decode_to_utf8(tail, &mut dst[..], true);
            assert_eq!((result, read), (CoderResult::InputEmpty, tail.len()), "{}", encoding.name());

            // Without replacement, malformed sequences stop the call early
            // but the output buffer never runs out.
            let mut decoder = encoding.new_decoder();
            let mut dst = vec![0u8; decoder.max_utf8_buffer_length_without_replacement(input.len()).unwrap()];
            let mut src = &input[..];
            let mut total_written = 0usize;
            loop {
                let (result, read, written) =
                    decoder.decode_to_utf8_without_replacement(src, &mut dst[total_written..], true);
                src = &src[read..];
                total_written += written;
                match result {
                    DecoderResult::InputEmpty => break,
                    DecoderResult::Malformed(_, _) => {}
                    DecoderResult::OutputFull => panic!("{} ran out of room", encoding.name()),
                }
            }
        }
    }
}

#[test]
fn test_encoder_bounds_are_sufficient() {
    for &encoding in ALL.iter() {
        for input in string_inputs().iter() {
            let utf16: Vec<u16> = input.encode_utf16().collect();

            let mut encoder = encoding.new_encoder();
            let mut dst = vec![0u8; encoder.max_buffer_length_from_utf8_with_replacement(input.len()).unwrap()];
            let (result, read, _, _) = encoder.encode_from_utf8(&input[..], &mut dst[..], true);
            assert_eq!((result, read), (CoderResult::InputEmpty, input.len()), "{}", encoding.name());

            let mut encoder = encoding.new_encoder();
            let mut dst = vec![0u8; encoder.max_buffer_length_from_utf16_with_replacement(utf16.len()).unwrap()];
            let (result, read, _, _) = encoder.encode_from_utf16(&utf16[..], &mut dst[..], true);
            assert_eq!((result, read), (CoderResult::InputEmpty, utf16.len()), "{}", encoding.name());

            let mut encoder = encoding.new_encoder();
            let mut dst = vec![0u8; encoder.max_buffer_length_from_utf8_without_replacement(input.len()).unwrap()];
            let mut src = &input[..];
            let mut total_written = 0usize;
            loop {
                let (result, read, written) =
                    encoder.encode_from_utf8_without_replacement(src, &mut dst[total_written..], true);
                src = &src[read..];
                total_written += written;
                match result {
                    EncoderResult::InputEmpty => break,
                    EncoderResult::Unmappable(_) => {}
                    EncoderResult::OutputFull => panic!("{} ran out of room", encoding.name()),
                }
            }
        }
    }
}

#[test]
fn test_ascii_round_trip() {
    let ascii: Vec<u8> = (0u8..0x80).collect();
    for &encoding in ALL.iter() {
        if !encoding.is_ascii_compatible() {
            continue;
        }
        let (string, had_errors) = encoding.decode_without_bom_handling(&ascii[..]);
        assert!(!had_errors);
        assert_eq!(string.as_bytes(), &ascii[..], "{}", encoding.name());
        let (bytes, output, had_errors) = encoding.encode(&string[..]);
        assert!(!had_errors);
        assert_eq!(output, encoding);
        assert_eq!(&bytes[..], &ascii[..], "{}", encoding.name());
    }
    // ISO-2022-JP is ASCII-compatible apart from its control bytes.
    let text = "The quick brown fox\n";
    let (bytes, _, had_errors) = ISO_2022_JP.encode(text);
    assert!(!had_errors);
    assert_eq!(&bytes[..], text.as_bytes());
}

#[test]
fn test_replacement_flag_matches_errors() {
    for &encoding in ALL.iter() {
        for input in byte_inputs().iter() {
            let (_, had_errors) = encoding.decode_without_bom_handling(&input[..]);
            let strict = encoding.decode_without_bom_handling_and_without_replacement(&input[..]);
            assert_eq!(had_errors, strict.is_none(), "{} {:?}", encoding.name(), input);
        }
        for input in string_inputs().iter() {
            let (_, output, had_errors) = encoding.encode(&input[..]);
            let mut encoder = output.new_encoder();
            let mut dst = vec![0u8; encoder.max_buffer_length_from_utf8_without_replacement(input.len()).unwrap()];
            let (result, _, _) = encoder.encode_from_utf8_without_replacement(&input[..], &mut dst[..], true);
            let unmappable = match result {
                EncoderResult::Unmappable(_) => true,
                _ => false,
            };
            assert_eq!(had_errors, unmappable, "{} {:?}", encoding.name(), input);
        }
    }
}

#[test]
fn test_bom_removal_is_idempotent() {
    let text = "caf\u{E9} \u{FEFF}\u{1F4A9}";
    let mut with_bom = b"\xEF\xBB\xBF".to_vec();
    with_bom.extend_from_slice(text.as_bytes());

    let (removed, had_errors) = UTF_8.decode_with_bom_removal(&with_bom[..]);
    assert!(!had_errors);
    let (plain, _) = UTF_8.decode_without_bom_handling(text.as_bytes());
    assert_eq!(removed, plain);
    assert!(!removed.starts_with('\u{FEFF}'));

    // Removing twice only removes the first.
    let mut twice = b"\xEF\xBB\xBF".to_vec();
    twice.extend_from_slice(&with_bom[..]);
    let (once, _) = UTF_8.decode_with_bom_removal(&twice[..]);
    assert_eq!(&once[..], &format!("\u{FEFF}{}", text)[..]);

    // Sniffing from a legacy encoding morphs to UTF-8.
    let (sniffed, used, _) = WINDOWS_1252.decode(&with_bom[..]);
    assert_eq!(used, UTF_8);
    assert_eq!(sniffed, plain);

    // A BOM for a different encoding is not removed.
    let (kept, _) = UTF_8.decode_with_bom_removal(b"\xFF\xFEa");
    assert_eq!(&kept[..], "\u{FFFD}\u{FFFD}a");

    let (utf16, used, _) = UTF_8.decode(b"\xFF\xFEa\x00");
    assert_eq!(used, UTF_16LE);
    assert_eq!(&utf16[..], "a");
}

#[test]
fn test_bom_split_across_calls() {
    let mut decoder = WINDOWS_1252.new_decoder();
    let mut dst = [0u8; 16];
    let (result, read, written, _) = decoder.decode_to_utf8(b"\xEF", &mut dst[..], false);
    assert_eq!((result, read, written), (CoderResult::InputEmpty, 1, 0));
    let (result, read, written, _) = decoder.decode_to_utf8(b"\xBB", &mut dst[..], false);
    assert_eq!((result, read, written), (CoderResult::InputEmpty, 1, 0));
    let (result, read, written, _) = decoder.decode_to_utf8(b"\xBFa", &mut dst[..], true);
    assert_eq!((result, read, written), (CoderResult::InputEmpty, 2, 1));
    assert_eq!(decoder.encoding(), UTF_8);

    // A non-BOM prefix is replayed through the original encoding.
    let mut decoder = WINDOWS_1252.new_decoder();
    let (_, _, written, _) = decoder.decode_to_utf8(b"\xEF\xBB", &mut dst[..], false);
    assert_eq!(written, 0);
    let (result, _, written, _) = decoder.decode_to_utf8(b"a", &mut dst[..], true);
    assert_eq!(result, CoderResult::InputEmpty);
    assert_eq!(&dst[..written], "\u{EF}\u{BB}a".as_bytes());
    assert_eq!(decoder.encoding(), WINDOWS_1252);
}

#[test]
#[should_panic]
fn test_finished_decoder_panics() {
    let mut decoder = UTF_8.new_decoder();
    let mut dst = [0u16; 4];
    let _ = decoder.decode_to_utf16(b"a", &mut dst[..], true);
    let _ = decoder.decode_to_utf16(b"a", &mut dst[..], true);
}
