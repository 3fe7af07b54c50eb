// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The first byte picks the function, the rest is input. Results are
//! compared against the standard library's view of the same data.

#![no_main]
use charconv::mem;
use libfuzzer_sys::fuzz_target;

fn as_units(data: &[u8]) -> Vec<u16> {
    data.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect()
}

fn check_utf16(data: &[u16]) {
    assert!(::std::char::decode_utf16(data.iter().copied()).all(|r| r.is_ok()));
}

fn fuzz_utf8_to_utf16(data: &[u8]) {
    let mut dst = vec![0u16; data.len() + 1];
    let written = mem::convert_utf8_to_utf16(data, &mut dst[..]);
    let expected: Vec<u16> = String::from_utf8_lossy(data).encode_utf16().collect();
    assert_eq!(&dst[..written], &expected[..]);
    if let Ok(s) = ::std::str::from_utf8(data) {
        let mut dst = vec![0u16; s.len()];
        let written = mem::convert_str_to_utf16(s, &mut dst[..]);
        assert_eq!(&dst[..written], &expected[..]);
    }
}

fn fuzz_utf16_to_utf8(units: &[u16]) {
    let mut dst = vec![0u8; units.len() * 3 + 1];
    let written = mem::convert_utf16_to_utf8(units, &mut dst[..]);
    assert_eq!(&dst[..written], String::from_utf16_lossy(units).as_bytes());
    let mut s = "\u{2603}".repeat(units.len() + 1);
    let written = mem::convert_utf16_to_str(units, &mut s[..]);
    assert_eq!(&s[..written], String::from_utf16_lossy(units));
}

fn fuzz_latin1(data: &[u8]) {
    let latin1: String = data.iter().map(|&b| b as char).collect();
    let mut utf8 = vec![0u8; data.len() * 2];
    let written = mem::convert_latin1_to_utf8(data, &mut utf8[..]);
    assert_eq!(&utf8[..written], latin1.as_bytes());
    assert!(mem::is_utf8_latin1(&utf8[..written]));
    let mut back = vec![0u8; written];
    let read_back = mem::convert_utf8_to_latin1_lossy(&utf8[..written], &mut back[..]);
    assert_eq!(&back[..read_back], data);
    let mut utf16 = vec![0u16; data.len()];
    mem::convert_latin1_to_utf16(data, &mut utf16[..]);
    assert!(mem::is_utf16_latin1(&utf16[..]));
}

fn fuzz_utf16_validity(units: &[u16]) {
    let up_to = mem::utf16_valid_up_to(units);
    check_utf16(&units[..up_to]);
    let mut fixed = units.to_vec();
    mem::ensure_utf16_validity(&mut fixed[..]);
    check_utf16(&fixed[..]);
    assert_eq!(String::from_utf16_lossy(&fixed[..]), String::from_utf16_lossy(units));
}

fn fuzz_ascii(data: &[u8]) {
    let prefix = data.iter().position(|&b| b > 0x7F).unwrap_or(data.len());
    assert_eq!(mem::is_ascii(data), prefix == data.len());
    let mut dst = vec![0u8; data.len()];
    assert_eq!(mem::copy_ascii_to_ascii(data, &mut dst[..]), prefix);
    let mut units = vec![0u16; data.len()];
    assert_eq!(mem::copy_ascii_to_basic_latin(data, &mut units[..]), prefix);
    assert!(mem::is_basic_latin(&units[..prefix]));
    assert_eq!(mem::copy_basic_latin_to_ascii(&units[..prefix], &mut dst[..]), prefix);
    assert_eq!(&dst[..prefix], &data[..prefix]);
}

fuzz_target!(|data: &[u8]| {
    if let Some((&first, rest)) = data.split_first() {
        match first {
            0 => fuzz_utf8_to_utf16(rest),
            1 => fuzz_utf16_to_utf8(&as_units(rest)[..]),
            2 => fuzz_latin1(rest),
            3 => fuzz_utf16_validity(&as_units(rest)[..]),
            4 => fuzz_ascii(rest),
            _ => {}
        }
    }
});
