// Copyright 2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

use crate::*;

/// Checks decoding into both UTF-8 and UTF-16, in one call and one byte at
/// a time, with malformed sequences replaced.
pub fn decode(encoding: &'static Encoding, bytes: &[u8], expect: &str) {
    decode_to_utf8(encoding, bytes, expect);
    decode_to_utf16(encoding, bytes, expect);
    decode_byte_by_byte(encoding, bytes, expect);
}

/// Checks encoding from both UTF-8 and UTF-16, in one call and one code
/// unit at a time, with unmappables replaced.
pub fn encode(encoding: &'static Encoding, string: &str, expect: &[u8]) {
    encode_from_utf8(encoding, string, expect);
    let utf16: Vec<u16> = string.encode_utf16().collect();
    encode_from_utf16(encoding, &utf16[..], expect);
    encode_unit_by_unit(encoding, &utf16[..], expect);
}

pub fn decode_to_utf16(encoding: &'static Encoding, bytes: &[u8], expect: &str) {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut dest: Vec<u16> = vec![0u16; decoder.max_utf16_buffer_length(bytes.len()).unwrap()];
    let (complete, read, written, _) = decoder.decode_to_utf16(bytes, &mut dest[..], true);
    match complete {
        CoderResult::InputEmpty => {}
        CoderResult::OutputFull => {
            unreachable!();
        }
    }
    assert_eq!(read, bytes.len());
    let expect: Vec<u16> = expect.encode_utf16().collect();
    assert_eq!(written, expect.len());
    assert_eq!(&dest[..written], &expect[..]);
}

pub fn decode_to_utf8(encoding: &'static Encoding, bytes: &[u8], expect: &str) {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut dest: Vec<u8> = vec![0u8; decoder.max_utf8_buffer_length(bytes.len()).unwrap()];
    let (complete, read, written, _) = decoder.decode_to_utf8(bytes, &mut dest[..], true);
    match complete {
        CoderResult::InputEmpty => {}
        CoderResult::OutputFull => {
            unreachable!();
        }
    }
    assert_eq!(read, bytes.len());
    assert_eq!(written, expect.len());
    assert_eq!(&dest[..written], expect.as_bytes());
}

pub fn decode_byte_by_byte(encoding: &'static Encoding, bytes: &[u8], expect: &str) {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut output = String::new();
    for byte in bytes.iter() {
        let mut dest = vec![0u8; decoder.max_utf8_buffer_length(1).unwrap()];
        let (complete, read, written, _) =
            decoder.decode_to_utf8(::std::slice::from_ref(byte), &mut dest[..], false);
        assert_eq!(complete, CoderResult::InputEmpty);
        assert_eq!(read, 1);
        output.push_str(::std::str::from_utf8(&dest[..written]).unwrap());
    }
    let mut dest = vec![0u8; decoder.max_utf8_buffer_length(0).unwrap()];
    let (complete, read, written, _) = decoder.decode_to_utf8(b"", &mut dest[..], true);
    assert_eq!(complete, CoderResult::InputEmpty);
    assert_eq!(read, 0);
    output.push_str(::std::str::from_utf8(&dest[..written]).unwrap());
    assert_eq!(output, expect);
}

pub fn encode_from_utf8(encoding: &'static Encoding, string: &str, expect: &[u8]) {
    let mut encoder = encoding.new_encoder();
    let mut dest: Vec<u8> =
        vec![0u8; encoder.max_buffer_length_from_utf8_with_replacement(string.len()).unwrap()];
    let (complete, read, written, _) = encoder.encode_from_utf8(string, &mut dest[..], true);
    match complete {
        CoderResult::InputEmpty => {}
        CoderResult::OutputFull => {
            unreachable!();
        }
    }
    assert_eq!(read, string.len());
    assert_eq!(written, expect.len());
    assert_eq!(&dest[..written], expect);
}

pub fn encode_from_utf16(encoding: &'static Encoding, string: &[u16], expect: &[u8]) {
    let mut encoder = encoding.new_encoder();
    let mut dest: Vec<u8> =
        vec![0u8; encoder.max_buffer_length_from_utf16_with_replacement(string.len()).unwrap()];
    let (complete, read, written, _) = encoder.encode_from_utf16(string, &mut dest[..], true);
    match complete {
        CoderResult::InputEmpty => {}
        CoderResult::OutputFull => {
            unreachable!();
        }
    }
    assert_eq!(read, string.len());
    assert_eq!(written, expect.len());
    assert_eq!(&dest[..written], expect);
}

/// Feeds one UTF-16 code unit per call, which splits surrogate pairs.
pub fn encode_unit_by_unit(encoding: &'static Encoding, string: &[u16], expect: &[u8]) {
    let mut encoder = encoding.new_encoder();
    let mut output: Vec<u8> = Vec::new();
    for unit in string.iter() {
        let mut dest = vec![0u8; encoder.max_buffer_length_from_utf16_with_replacement(1).unwrap()];
        let (complete, read, written, _) =
            encoder.encode_from_utf16(::std::slice::from_ref(unit), &mut dest[..], false);
        assert_eq!(complete, CoderResult::InputEmpty);
        assert_eq!(read, 1);
        output.extend_from_slice(&dest[..written]);
    }
    let mut dest = vec![0u8; encoder.max_buffer_length_from_utf16_with_replacement(0).unwrap()];
    let (complete, _, written, _) = encoder.encode_from_utf16(&[], &mut dest[..], true);
    assert_eq!(complete, CoderResult::InputEmpty);
    output.extend_from_slice(&dest[..written]);
    assert_eq!(&output[..], expect);
}
