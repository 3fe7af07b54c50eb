// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The first byte picks the encoding, the second the chunk size and the
//! rest is input. Chunked conversion must agree with whole-buffer
//! conversion, stay within the buffer bounds and produce valid Unicode.

#![no_main]
use charconv::*;
use libfuzzer_sys::fuzz_target;

static ENCODINGS: [&'static Encoding; 40] = [&UTF_8_INIT, &REPLACEMENT_INIT, &GBK_INIT, &BIG5_INIT, &EUC_JP_INIT, &GB18030_INIT,
                                             &UTF_16BE_INIT, &UTF_16LE_INIT, &SHIFT_JIS_INIT, &EUC_KR_INIT, &ISO_2022_JP_INIT,
                                             &X_USER_DEFINED_INIT, &WINDOWS_1250_INIT, &WINDOWS_1251_INIT,
                                             &WINDOWS_1252_INIT, &WINDOWS_1253_INIT, &WINDOWS_1254_INIT,
                                             &WINDOWS_1255_INIT, &WINDOWS_1256_INIT, &WINDOWS_1257_INIT,
                                             &WINDOWS_1258_INIT, &KOI8_U_INIT, &MACINTOSH_INIT, &IBM866_INIT, &KOI8_R_INIT,
                                             &ISO_8859_2_INIT, &ISO_8859_3_INIT, &ISO_8859_4_INIT, &ISO_8859_5_INIT,
                                             &ISO_8859_6_INIT, &ISO_8859_7_INIT, &ISO_8859_8_INIT, &ISO_8859_8_I_INIT,
                                             &ISO_8859_10_INIT, &ISO_8859_13_INIT, &ISO_8859_14_INIT, &WINDOWS_874_INIT,
                                             &ISO_8859_15_INIT, &ISO_8859_16_INIT, &X_MAC_CYRILLIC_INIT];

fn check_utf16(data: &[u16]) {
    assert!(::std::char::decode_utf16(data.iter().copied()).all(|r| r.is_ok()));
}

fn decode_in_chunks(encoding: &'static Encoding, data: &[u8], chunk: usize) -> String {
    let mut decoder = encoding.new_decoder();
    let mut out = String::new();
    let mut chunks = data.chunks(chunk).peekable();
    if chunks.peek().is_none() {
        let mut dst = [0u8; 8];
        let (result, _, written, _) = decoder.decode_to_utf8(b"", &mut dst[..], true);
        assert_eq!(result, CoderResult::InputEmpty);
        out.push_str(::std::str::from_utf8(&dst[..written]).unwrap());
        return out;
    }
    while let Some(src) = chunks.next() {
        let last = chunks.peek().is_none();
        let mut dst = vec![0u16; decoder.max_utf16_buffer_length(src.len()).unwrap()];
        let (result, read, written, _) = decoder.decode_to_utf16(src, &mut dst[..], last);
        assert_eq!(result, CoderResult::InputEmpty);
        assert_eq!(read, src.len());
        check_utf16(&dst[..written]);
        out.push_str(&String::from_utf16(&dst[..written]).unwrap());
    }
    out
}

fn encode_in_chunks(encoding: &'static Encoding, s: &str, chunk: usize) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let units: Vec<u16> = s.encode_utf16().collect();
    let mut out = Vec::new();
    let mut chunks = units.chunks(chunk).peekable();
    if chunks.peek().is_none() {
        let mut dst = [0u8; 8];
        let (result, _, written, _) = encoder.encode_from_utf16(&[], &mut dst[..], true);
        assert_eq!(result, CoderResult::InputEmpty);
        out.extend_from_slice(&dst[..written]);
        return out;
    }
    while let Some(src) = chunks.next() {
        let last = chunks.peek().is_none();
        let mut dst = vec![0u8; encoder.max_buffer_length_from_utf16_with_replacement(src.len()).unwrap()];
        let (result, read, written, _) = encoder.encode_from_utf16(src, &mut dst[..], last);
        assert_eq!(result, CoderResult::InputEmpty);
        assert_eq!(read, src.len());
        out.extend_from_slice(&dst[..written]);
    }
    out
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let encoding = ENCODINGS[data[0] as usize % ENCODINGS.len()];
    let chunk = (data[1] as usize % 16) + 1;
    let input = &data[2..];

    let (whole, _, _) = encoding.decode(input);
    assert_eq!(decode_in_chunks(encoding, input, chunk), whole);

    let (lossy, had_errors) = encoding.decode_without_bom_handling(input);
    match encoding.decode_without_bom_handling_and_without_replacement(input) {
        Some(strict) => {
            assert!(!had_errors);
            assert_eq!(strict, lossy);
        }
        None => assert!(had_errors),
    }

    if let Ok(s) = ::std::str::from_utf8(input) {
        let (bytes, _, _) = encoding.encode(s);
        assert_eq!(encode_in_chunks(encoding, s, chunk), &bytes[..]);
    }
});
