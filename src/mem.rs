// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversions and checks between in-memory UTF-8, UTF-16 and Latin1 that
//! do not need the streaming machinery of `Decoder` and `Encoder`.
//!
//! "Latin1" here means bytes whose unsigned value is the code point, that
//! is U+0000 to U+00FF. It is not windows-1252.
//!
//! Functions that write into a caller-provided buffer panic if the buffer
//! is shorter than documented.

use crate::ascii::*;
use crate::handles::*;
use crate::utf_8::{Utf8Decoder, Utf8Encoder};
use crate::zero_trailing_continuations;
use crate::{DecoderResult, EncoderResult};

/// Checks whether the buffer is all-ASCII.
pub fn is_ascii(buffer: &[u8]) -> bool {
    ascii_valid_up_to(buffer) == buffer.len()
}

/// Checks whether the buffer is all-Basic Latin, i.e. UTF-16 representing
/// only ASCII characters.
pub fn is_basic_latin(buffer: &[u16]) -> bool {
    buffer.iter().all(|&unit| unit < 0x80)
}

/// Checks whether the buffer is valid UTF-8 representing only code points
/// less than or equal to U+00FF.
pub fn is_utf8_latin1(buffer: &[u8]) -> bool {
    match ::std::str::from_utf8(buffer) {
        Ok(s) => is_str_latin1(s),
        Err(_) => false,
    }
}

/// Checks whether the buffer represents only code points less than or equal
/// to U+00FF.
pub fn is_str_latin1(buffer: &str) -> bool {
    // In valid UTF-8 every code point above U+00FF starts with 0xC4 or more.
    buffer.as_bytes().iter().all(|&b| b < 0xC4)
}

/// Checks whether the buffer represents only code points less than or equal
/// to U+00FF. Surrogates are above U+00FF.
pub fn is_utf16_latin1(buffer: &[u16]) -> bool {
    buffer.iter().all(|&unit| unit <= 0xFF)
}

/// Converts potentially-invalid UTF-8 to valid UTF-16 with errors replaced
/// with the REPLACEMENT CHARACTER.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer _plus one_.
///
/// Returns the number of `u16`s written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_utf8_to_utf16(src: &[u8], dst: &mut [u16]) -> usize {
    assert!(dst.len() > src.len(), "Destination must not be shorter than the source plus one.");
    let mut decoder = Utf8Decoder::new();
    let mut source = ByteSource::new(src);
    let mut dest = Utf16Destination::new(dst);
    loop {
        match decoder.decode(&mut source, &mut dest, true) {
            DecoderResult::InputEmpty => {
                return dest.written();
            }
            DecoderResult::Malformed(_, _) => {
                // Every malformed sequence is at least one byte long.
                let fits = dest.write_bmp(0xFFFD);
                debug_assert!(fits);
            }
            DecoderResult::OutputFull => {
                unreachable!("Each input byte produces at most one code unit.");
            }
        }
    }
}

/// Converts valid UTF-8 to valid UTF-16.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer.
///
/// Returns the number of `u16`s written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_str_to_utf16(src: &str, dst: &mut [u16]) -> usize {
    assert!(dst.len() >= src.len(), "Destination must not be shorter than the source.");
    let bytes = src.as_bytes();
    let copied = ascii_to_basic_latin(bytes, dst);
    let mut written = copied;
    for unit in src[copied..].encode_utf16() {
        dst[written] = unit;
        written += 1;
    }
    written
}

/// Converts potentially-invalid UTF-16 to valid UTF-8 with unpaired
/// surrogates replaced with the REPLACEMENT CHARACTER.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer times three _plus one_.
///
/// Returns the number of bytes written. The bytes after that may have been
/// overwritten, so a `&mut str` viewed as bytes is not a safe destination;
/// use `convert_utf16_to_str()` for that.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_utf16_to_utf8(src: &[u16], dst: &mut [u8]) -> usize {
    let needed = src.len().checked_mul(3).and_then(|len| len.checked_add(1));
    assert!(needed.map_or(false, |needed| dst.len() >= needed),
            "Destination must not be shorter than the source times three plus one.");
    let mut encoder = Utf8Encoder::new();
    let mut source = Utf16Source::new(src);
    let mut dest = ByteDestination::new(dst);
    match encoder.encode(&mut source, &mut dest, true) {
        EncoderResult::InputEmpty => dest.written(),
        EncoderResult::OutputFull | EncoderResult::Unmappable(_) => {
            unreachable!("UTF-8 fits every code point in three bytes per code unit.");
        }
    }
}

/// Converts potentially-invalid UTF-16 to valid UTF-8 with unpaired
/// surrogates replaced with the REPLACEMENT CHARACTER, keeping `dst` valid
/// UTF-8 past the written part.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer times three _plus one_.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_utf16_to_str(src: &[u16], dst: &mut str) -> usize {
    // Only complete characters get written and the trailing continuation
    // bytes of a partially overwritten character are zeroed below.
    let bytes: &mut [u8] = unsafe { dst.as_bytes_mut() };
    let written = convert_utf16_to_utf8(src, bytes);
    zero_trailing_continuations(bytes, written);
    written
}

/// Converts Latin1 bytes to UTF-16.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer. Exactly `src.len()` `u16`s are written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_latin1_to_utf16(src: &[u8], dst: &mut [u16]) {
    assert!(dst.len() >= src.len(), "Destination must not be shorter than the source.");
    for (unit, &b) in dst.iter_mut().zip(src) {
        *unit = b as u16;
    }
}

/// Converts Latin1 bytes to UTF-8.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer times two.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_latin1_to_utf8(src: &[u8], dst: &mut [u8]) -> usize {
    let needed = src.len().checked_mul(2);
    assert!(needed.map_or(false, |needed| dst.len() >= needed),
            "Destination must not be shorter than the source times two.");
    let mut read = 0usize;
    let mut written = 0usize;
    loop {
        let copied = ascii_to_ascii(&src[read..], &mut dst[written..]);
        read += copied;
        written += copied;
        if read == src.len() {
            return written;
        }
        let b = src[read];
        dst[written] = 0xC0 | (b >> 6);
        dst[written + 1] = 0x80 | (b & 0x3F);
        read += 1;
        written += 2;
    }
}

/// Converts Latin1 bytes to UTF-8, keeping `dst` valid UTF-8 past the
/// written part.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer times two.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_latin1_to_str(src: &[u8], dst: &mut str) -> usize {
    // Every write is a complete character; see `convert_utf16_to_str()`.
    let bytes: &mut [u8] = unsafe { dst.as_bytes_mut() };
    let written = convert_latin1_to_utf8(src, bytes);
    zero_trailing_continuations(bytes, written);
    written
}

/// If the input is valid UTF-8 representing only U+0000 to U+00FF, writes
/// the value of each code point as one byte.
///
/// Other input produces some output of no more than `src.len()` bytes.
/// Which output is not specified, and non-ASCII input may produce ASCII.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_utf8_to_latin1_lossy(src: &[u8], dst: &mut [u8]) -> usize {
    assert!(dst.len() >= src.len(), "Destination must not be shorter than the source.");
    let mut read = 0usize;
    let mut written = 0usize;
    loop {
        let copied = ascii_to_ascii(&src[read..], &mut dst[written..]);
        read += copied;
        written += copied;
        if read == src.len() {
            return written;
        }
        let lead = src[read];
        match src.get(read + 1) {
            Some(&trail) if (lead == 0xC2 || lead == 0xC3) && (trail & 0xC0) == 0x80 => {
                dst[written] = (lead << 6) | (trail & 0x3F);
                read += 2;
            }
            _ => {
                dst[written] = lead;
                read += 1;
            }
        }
        written += 1;
    }
}

/// If the input is valid UTF-16 representing only U+0000 to U+00FF, writes
/// the value of each code point as one byte.
///
/// Other code units are truncated to their low byte.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer. Exactly `src.len()` bytes are written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn convert_utf16_to_latin1_lossy(src: &[u16], dst: &mut [u8]) {
    assert!(dst.len() >= src.len(), "Destination must not be shorter than the source.");
    for (b, &unit) in dst.iter_mut().zip(src) {
        *b = unit as u8;
    }
}

/// Returns the index of the first unpaired surrogate or, if the input is
/// valid UTF-16 in its entirety, the length of the input.
pub fn utf16_valid_up_to(buffer: &[u16]) -> usize {
    let mut offset = 0usize;
    for decoded in ::std::char::decode_utf16(buffer.iter().copied()) {
        match decoded {
            Ok(c) => offset += c.len_utf16(),
            Err(_) => return offset,
        }
    }
    offset
}

/// Replaces unpaired surrogates in the input with the REPLACEMENT
/// CHARACTER.
pub fn ensure_utf16_validity(buffer: &mut [u16]) {
    let mut offset = 0usize;
    loop {
        offset += utf16_valid_up_to(&buffer[offset..]);
        if offset == buffer.len() {
            return;
        }
        buffer[offset] = 0xFFFD;
        offset += 1;
    }
}

/// Copies ASCII from source to destination up to the first non-ASCII byte
/// or the end of the input.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn copy_ascii_to_ascii(src: &[u8], dst: &mut [u8]) -> usize {
    assert!(dst.len() >= src.len(), "Destination must not be shorter than the source.");
    ascii_to_ascii(src, dst)
}

/// Copies ASCII from source to destination, zero-extending it to UTF-16, up
/// to the first non-ASCII byte or the end of the input.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer.
///
/// Returns the number of `u16`s written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn copy_ascii_to_basic_latin(src: &[u8], dst: &mut [u16]) -> usize {
    assert!(dst.len() >= src.len(), "Destination must not be shorter than the source.");
    ascii_to_basic_latin(src, dst)
}

/// Copies Basic Latin from source to destination, narrowing it to ASCII, up
/// to the first non-Basic Latin code unit or the end of the input.
///
/// The length of the destination buffer must be at least the length of the
/// source buffer.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if the destination buffer is shorter than stated above.
pub fn copy_basic_latin_to_ascii(src: &[u16], dst: &mut [u8]) -> usize {
    assert!(dst.len() >= src.len(), "Destination must not be shorter than the source.");
    basic_latin_to_ascii(src, dst)
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8_to_utf16(src: &[u8]) -> Vec<u16> {
        let mut dst = vec![0u16; src.len() + 1];
        let written = convert_utf8_to_utf16(src, &mut dst[..]);
        dst.truncate(written);
        dst
    }

    fn utf16_to_utf8(src: &[u16]) -> Vec<u8> {
        let mut dst = vec![0u8; src.len() * 3 + 1];
        let written = convert_utf16_to_utf8(src, &mut dst[..]);
        dst.truncate(written);
        dst
    }

    #[test]
    fn test_is_ascii() {
        assert!(is_ascii(b""));
        assert!(is_ascii(b"abcdefghijklmnopqrstuvwxyz\x7F"));
        assert!(!is_ascii(b"abcdefghijklmnopqrstuvwxyz\x80"));
        assert!(!is_ascii(b"\xFFabcdefghijklmnop"));
        assert!(is_basic_latin(&[0x61, 0x7F]));
        assert!(!is_basic_latin(&[0x61, 0x80]));
    }

    #[test]
    fn test_is_latin1() {
        assert!(is_utf8_latin1(b"a\xC3\xA4\xC3\xBF"));
        assert!(!is_utf8_latin1(b"a\xC4\x80"));
        assert!(!is_utf8_latin1(b"a\xC3"));
        assert!(!is_utf8_latin1(b"\xE2\x82\xAC"));
        assert!(is_str_latin1("\u{0}\u{7F}\u{80}\u{FF}"));
        assert!(!is_str_latin1("\u{100}"));
        assert!(!is_str_latin1("a\u{1F4A9}"));
        assert!(is_utf16_latin1(&[0x00, 0xFF]));
        assert!(!is_utf16_latin1(&[0x100]));
        assert!(!is_utf16_latin1(&[0xD83D, 0xDCA9]));
    }

    #[test]
    fn test_convert_utf8_to_utf16() {
        assert_eq!(utf8_to_utf16(b""), Vec::<u16>::new());
        assert_eq!(utf8_to_utf16(b"a\xC3\xA4\xE2\x98\x83\xF0\x9F\x92\xA9"),
                   vec![0x61, 0xE4, 0x2603, 0xD83D, 0xDCA9]);
        // Maximal subparts each become one REPLACEMENT CHARACTER.
        assert_eq!(utf8_to_utf16(b"\xE0\x80a\xF0\x9F\x92"), vec![0xFFFD, 0xFFFD, 0x61, 0xFFFD]);
        assert_eq!(utf8_to_utf16(b"\xED\xA0\x80"), vec![0xFFFD, 0xFFFD, 0xFFFD]);
        assert_eq!(utf8_to_utf16(b"\xFF\xFE"), vec![0xFFFD, 0xFFFD]);
    }

    #[test]
    #[should_panic]
    fn test_convert_utf8_to_utf16_short_destination() {
        let mut dst = [0u16; 3];
        convert_utf8_to_utf16(b"abc", &mut dst[..]);
    }

    #[test]
    fn test_convert_str_to_utf16() {
        let mut dst = [0u16; 12];
        let written = convert_str_to_utf16("ab\u{E4}\u{1F4A9}", &mut dst[..]);
        assert_eq!(&dst[..written], &[0x61, 0x62, 0xE4, 0xD83D, 0xDCA9]);
    }

    #[test]
    fn test_convert_utf16_to_utf8() {
        assert_eq!(utf16_to_utf8(&[0x61, 0xE4, 0x2603, 0xD83D, 0xDCA9]),
                   "a\u{E4}\u{2603}\u{1F4A9}".as_bytes());
        assert_eq!(utf16_to_utf8(&[0xDCA9, 0x61, 0xD83D]), "\u{FFFD}a\u{FFFD}".as_bytes());
        assert_eq!(utf16_to_utf8(&[0xD83D, 0xD83D, 0xDCA9]), "\u{FFFD}\u{1F4A9}".as_bytes());
    }

    #[test]
    fn test_convert_utf16_to_str() {
        let mut dst = "\u{2603}".repeat(5);
        let written = convert_utf16_to_str(&[0x61, 0x62, 0x63, 0x64], &mut dst[..]);
        assert_eq!(written, 4);
        // The second snowman lost its lead byte and was zeroed.
        assert_eq!(dst, "abcd\u{0}\u{0}\u{2603}\u{2603}\u{2603}");
    }

    #[test]
    fn test_convert_latin1() {
        let mut utf16 = [0u16; 4];
        convert_latin1_to_utf16(b"a\x80\xFF", &mut utf16[..]);
        assert_eq!(&utf16[..3], &[0x61, 0x80, 0xFF]);

        let mut utf8 = [0u8; 6];
        let written = convert_latin1_to_utf8(b"a\xE4\xFF", &mut utf8[..]);
        assert_eq!(&utf8[..written], "a\u{E4}\u{FF}".as_bytes());

        let mut s = String::from("\u{2603}\u{2603}\u{2603}");
        let written = convert_latin1_to_str(b"\xE4\xE4", &mut s[..]);
        assert_eq!(written, 4);
        assert_eq!(s, "\u{E4}\u{E4}\u{0}\u{0}\u{2603}");
    }

    #[test]
    fn test_convert_latin1_lossy() {
        let mut dst = [0u8; 8];
        let written = convert_utf8_to_latin1_lossy("a\u{80}\u{E4}\u{FF}z".as_bytes(), &mut dst[..]);
        assert_eq!(&dst[..written], b"a\x80\xE4\xFFz");

        let mut dst = [0u8; 3];
        convert_utf16_to_latin1_lossy(&[0x61, 0xE4, 0xFF], &mut dst[..]);
        assert_eq!(&dst, b"a\xE4\xFF");
    }

    #[test]
    fn test_utf16_validity() {
        assert_eq!(utf16_valid_up_to(&[]), 0);
        assert_eq!(utf16_valid_up_to(&[0x61, 0xD83D, 0xDCA9]), 3);
        assert_eq!(utf16_valid_up_to(&[0x61, 0xD83D, 0xDCA9, 0xDCA9]), 3);
        assert_eq!(utf16_valid_up_to(&[0x61, 0xD83D, 0x62]), 1);
        assert_eq!(utf16_valid_up_to(&[0x61, 0xD83D]), 1);

        let mut buffer = [0xDCA9, 0x61, 0xD83D, 0xDCA9, 0xD83D, 0xD83D, 0xDCA9, 0xD83D];
        ensure_utf16_validity(&mut buffer[..]);
        assert_eq!(buffer, [0xFFFD, 0x61, 0xD83D, 0xDCA9, 0xFFFD, 0xD83D, 0xDCA9, 0xFFFD]);
    }

    #[test]
    fn test_copy_ascii() {
        let mut bytes = [0u8; 32];
        let mut units = [0u16; 32];
        let src = b"abcdefghijklmnopqrstuvw\xC3\xA4xyz";
        assert_eq!(copy_ascii_to_ascii(&src[..], &mut bytes[..]), 23);
        assert_eq!(&bytes[..23], &src[..23]);
        assert_eq!(copy_ascii_to_basic_latin(&src[..], &mut units[..]), 23);
        assert_eq!(units[22], 0x77);
        let wide = [0x61u16, 0x62, 0x100, 0x63];
        assert_eq!(copy_basic_latin_to_ascii(&wide[..], &mut bytes[..]), 2);
        assert_eq!(&bytes[..2], b"ab");
    }
}
