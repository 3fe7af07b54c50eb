// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::handles::*;
use crate::variant::*;
use crate::{DecoderResult, EncoderResult};

pub struct Utf8Decoder {
    code_point: u32,
    bytes_seen: usize, // 0, 1 or 2: counts continuations only
    bytes_needed: usize, // 1, 2 or 3: counts continuations only
    lower_boundary: u8,
    upper_boundary: u8,
}

impl Utf8Decoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::Utf8(Utf8Decoder {
            code_point: 0,
            bytes_seen: 0,
            bytes_needed: 0,
            lower_boundary: 0x80u8,
            upper_boundary: 0xBFu8,
        })
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_add(1)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_add(3)
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_mul(3)?.checked_add(3)
    }

    fn reset_sequence(&mut self) {
        self.code_point = 0;
        self.bytes_needed = 0;
        self.bytes_seen = 0;
        self.lower_boundary = 0x80u8;
        self.upper_boundary = 0xBFu8;
    }

    pub fn decode<D: UnicodeDestination>(&mut self,
                                         src: &mut ByteSource,
                                         dst: &mut D,
                                         last: bool)
                                         -> DecoderResult {
        decoder_loop!(src,
                      last,
                      b,
                      unread_handle,
                      {
                          if self.bytes_needed == 0 {
                              let valid_up_to = match ::std::str::from_utf8(src.remaining()) {
                                  Ok(s) => s.len(),
                                  Err(e) => e.valid_up_to(),
                              };
                              dst.copy_utf8_from(src, valid_up_to);
                          }
                      },
                      {
                          if self.bytes_needed != 0 {
                              let bad_bytes = (self.bytes_seen + 1) as u8;
                              self.reset_sequence();
                              return DecoderResult::Malformed(bad_bytes, 0);
                          }
                      },
                      {
                          if self.bytes_needed == 0 {
                              match b {
                                  0x00..=0x7F => {
                                      write_bmp_or_unread!(dst, b as u16, unread_handle);
                                  }
                                  0xC2..=0xDF => {
                                      self.bytes_needed = 1;
                                      self.code_point = b as u32 & 0x1F;
                                  }
                                  0xE0..=0xEF => {
                                      if b == 0xE0u8 {
                                          self.lower_boundary = 0xA0u8;
                                      } else if b == 0xEDu8 {
                                          self.upper_boundary = 0x9Fu8;
                                      }
                                      self.bytes_needed = 2;
                                      self.code_point = b as u32 & 0xF;
                                  }
                                  0xF0..=0xF4 => {
                                      if b == 0xF0u8 {
                                          self.lower_boundary = 0x90u8;
                                      } else if b == 0xF4u8 {
                                          self.upper_boundary = 0x8Fu8;
                                      }
                                      self.bytes_needed = 3;
                                      self.code_point = b as u32 & 0x7;
                                  }
                                  _ => {
                                      return DecoderResult::Malformed(1, 0);
                                  }
                              }
                              continue;
                          }
                          // self.bytes_needed != 0
                          if b < self.lower_boundary || b > self.upper_boundary {
                              let bad_bytes = (self.bytes_seen + 1) as u8;
                              self.reset_sequence();
                              unread_handle.unread();
                              return DecoderResult::Malformed(bad_bytes, 0);
                          }
                          let code_point = (self.code_point << 6) | (b as u32 & 0x3F);
                          if self.bytes_seen + 1 != self.bytes_needed {
                              self.code_point = code_point;
                              self.bytes_seen += 1;
                              self.lower_boundary = 0x80u8;
                              self.upper_boundary = 0xBFu8;
                              continue;
                          }
                          let c = ::std::char::from_u32(code_point).unwrap_or('\u{FFFD}');
                          write_char_or_unread!(dst, c, unread_handle);
                          self.reset_sequence();
                          continue;
                      })
    }
}

pub struct Utf8Encoder;

impl Utf8Encoder {
    pub fn new() -> VariantEncoder {
        VariantEncoder::Utf8(Utf8Encoder)
    }

    pub fn max_buffer_length_from_utf16_without_replacement(&self, u16_length: usize) -> Option<usize> {
        u16_length.checked_mul(3)
    }

    pub fn max_buffer_length_from_utf8_without_replacement(&self, byte_length: usize) -> Option<usize> {
        Some(byte_length)
    }

    pub fn encode<S: UnicodeSource>(&mut self,
                                    src: &mut S,
                                    dst: &mut ByteDestination,
                                    last: bool)
                                    -> EncoderResult {
        encoder_loop!(src,
                      last,
                      c,
                      {
                          src.copy_ascii_to(dst);
                      },
                      {},
                      {
                          let mut buffer = [0u8; 4];
                          if !dst.write_all(c.encode_utf8(&mut buffer).as_bytes()) {
                              src.unread();
                              return EncoderResult::OutputFull;
                          }
                          continue;
                      })
    }
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use crate::testing::*;
    use crate::*;

    fn decode_utf8_to_utf8(bytes: &[u8], expect: &str) {
        decode(UTF_8, bytes, expect);
    }

    fn decode_valid_utf8(string: &str) {
        decode_utf8_to_utf8(string.as_bytes(), string);
    }

    fn encode_utf8_from_utf16(string: &[u16], expect: &[u8]) {
        encode_from_utf16(UTF_8, string, expect);
        encode_unit_by_unit(UTF_8, string, expect);
    }

    fn encode_utf8_from_utf8(string: &str, expect: &[u8]) {
        encode_from_utf8(UTF_8, string, expect);
    }

    #[test]
    fn test_utf8_decode() {
        for valid in ["", "ab", "a\u{E4}Z", "a\u{2603}Z", "a\u{1F4A9}Z", "Z\x00", "a\x7F", "\u{80}",
                      "\u{7FF}", "\u{800}", "\u{D7FF}", "\u{E000}", "\u{FFFF}", "\u{10000}",
                      "\u{10FFFF}"]
            .iter() {
            decode_valid_utf8(valid);
        }
    }

    #[test]
    fn test_utf8_decode_malformed() {
        // Each case also runs with a trailing ASCII byte, which must not be
        // swallowed by the error.
        let cases: [(&[u8], &str); 22] = [(b"\xC3", "\u{FFFD}"),
                                          (b"\xE2\x98", "\u{FFFD}"),
                                          (b"\xF0\x9F\x92", "\u{FFFD}"),
                                          (b"\xBF\xBF", "\u{FFFD}\u{FFFD}"),
                                          (b"\xC3\xA4\x80", "\u{E4}\u{FFFD}"),
                                          (b"\xF0\x9F\x92\xA9\xBF", "\u{1F4A9}\u{FFFD}"),
                                          (b"\xFF", "\u{FFFD}"),
                                          (b"\xFE\xFE\xFF", "\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xC0\x80", "\u{FFFD}\u{FFFD}"),
                                          (b"\xC1\xBF", "\u{FFFD}\u{FFFD}"),
                                          (b"\xE0\x80\x80", "\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xE0\x9F\xBF", "\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xF0\x8F\xBF\xBF", "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xED\xA0\x80", "\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xED\xBF\xBF", "\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xF4\x90\x80\x80", "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xF5\x80\x80\x80", "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xF4\x8F\xBF\xFF", "\u{FFFD}\u{FFFD}"),
                                          (b"\xC2\x7F", "\u{FFFD}\u{7F}"),
                                          (b"\xE1\x80\xC2\x80", "\u{FFFD}\u{80}"),
                                          (b"\x80\x80\x80\x80", "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}"),
                                          (b"\xEF\xBF", "\u{FFFD}")];
        for &(bytes, expect) in cases.iter() {
            decode_utf8_to_utf8(bytes, expect);
            let mut with_tail = bytes.to_vec();
            with_tail.push(b'Z');
            decode_utf8_to_utf8(&with_tail[..], &format!("{}Z", expect));
        }
    }

    #[test]
    fn test_utf8_encode() {
        // Empty
        encode_utf8_from_utf16(&[], b"");
        encode_utf8_from_utf8("", b"");

        encode_utf8_from_utf16(&[0x0000], "\u{0000}".as_bytes());
        encode_utf8_from_utf16(&[0x007F], "\u{007F}".as_bytes());
        encode_utf8_from_utf16(&[0x0080], "\u{0080}".as_bytes());
        encode_utf8_from_utf16(&[0x07FF], "\u{07FF}".as_bytes());
        encode_utf8_from_utf16(&[0x0800], "\u{0800}".as_bytes());
        encode_utf8_from_utf16(&[0xD7FF], "\u{D7FF}".as_bytes());
        encode_utf8_from_utf16(&[0xD800], "\u{FFFD}".as_bytes());
        encode_utf8_from_utf16(&[0xD800, 0x0062], "\u{FFFD}\u{0062}".as_bytes());
        encode_utf8_from_utf16(&[0xDFFF], "\u{FFFD}".as_bytes());
        encode_utf8_from_utf16(&[0xDFFF, 0x0062], "\u{FFFD}\u{0062}".as_bytes());
        encode_utf8_from_utf16(&[0xE000], "\u{E000}".as_bytes());
        encode_utf8_from_utf16(&[0xFFFF], "\u{FFFF}".as_bytes());
        encode_utf8_from_utf16(&[0xD800, 0xDC00], "\u{10000}".as_bytes());
        encode_utf8_from_utf16(&[0xDBFF, 0xDFFF], "\u{10FFFF}".as_bytes());
    }

    #[test]
    fn test_utf8_malformed_lengths() {
        let mut decoder = UTF_8.new_decoder_without_bom_handling();
        let mut dst = [0u8; 16];
        let (result, read, written) =
            decoder.decode_to_utf8_without_replacement(b"a\xE2\x98Z", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(2, 0));
        assert_eq!(read, 3);
        assert_eq!(written, 1);
        let (result, read, written) =
            decoder.decode_to_utf8_without_replacement(b"Z\xF0\x9F", &mut dst[..], true);
        assert_eq!(result, DecoderResult::Malformed(2, 0));
        assert_eq!(read, 3);
        assert_eq!(&dst[..written], b"Z");
    }

    #[test]
    fn test_utf8_split_sequence() {
        let mut decoder = UTF_8.new_decoder_without_bom_handling();
        let mut dst = [0u16; 4];
        let (result, read, written, _) = decoder.decode_to_utf16(b"\xF0\x9F", &mut dst[..], false);
        assert_eq!(result, CoderResult::InputEmpty);
        assert_eq!(read, 2);
        assert_eq!(written, 0);
        let (result, read, written, _) = decoder.decode_to_utf16(b"\x92\xA9", &mut dst[..], true);
        assert_eq!(result, CoderResult::InputEmpty);
        assert_eq!(read, 2);
        assert_eq!(&dst[..written], &[0xD83Du16, 0xDCA9u16][..]);
    }

    #[test]
    fn test_utf8_output_full_keeps_state() {
        let mut decoder = UTF_8.new_decoder_without_bom_handling();
        let mut dst = [0u8; 3];
        let (result, read, written) =
            decoder.decode_to_utf8_without_replacement("a\u{1F4A9}".as_bytes(), &mut dst[..], false);
        assert_eq!(result, DecoderResult::OutputFull);
        assert_eq!(written, 1);
        let mut rest = [0u8; 8];
        let (result, _, written) =
            decoder.decode_to_utf8_without_replacement(&"a\u{1F4A9}".as_bytes()[read..], &mut rest[..], true);
        assert_eq!(result, DecoderResult::InputEmpty);
        assert_eq!(&rest[..written], "\u{1F4A9}".as_bytes());
    }
}
