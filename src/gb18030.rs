// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::handles::*;
use crate::index::*;
use crate::variant::*;
use crate::{DecoderResult, EncoderResult};

pub struct Gb18030Decoder {
    first: u8,
    second: u8,
    third: u8,
    pending_ascii: u8,
}

impl Gb18030Decoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::Gb18030(Gb18030Decoder {
            first: 0,
            second: 0,
            third: 0,
            pending_ascii: 0,
        })
    }

    fn extra_from_state(&self, byte_length: usize) -> Option<usize> {
        let pending = [self.first, self.second, self.third, self.pending_ascii]
            .iter()
            .filter(|&&b| b != 0)
            .count();
        byte_length.checked_add(pending)
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        // ASCII: 1 to 1 (worst case)
        // gbk: 2 to 1
        // ranges: 4 to 1 or 4 to 2
        self.extra_from_state(byte_length)?.checked_add(1)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // ASCII: 1 to 1
        // gbk: 2 to 2 or 2 to 3
        // ranges: 4 to 2, 4 to 3 or 4 to 4
        // 0x80: 1 to 3 (worst case)
        self.extra_from_state(byte_length)?.checked_mul(3)?.checked_add(1)
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.extra_from_state(byte_length)?.checked_mul(3)?.checked_add(1)
    }

    fn clear(&mut self) {
        self.first = 0;
        self.second = 0;
        self.third = 0;
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
                          if self.pending_ascii != 0 {
                              if !dst.write_bmp(self.pending_ascii as u16) {
                                  return DecoderResult::OutputFull;
                              }
                              self.pending_ascii = 0;
                          }
                          if self.first == 0 {
                              dst.copy_ascii_from(src);
                          }
                      },
                      {
                          let bad_bytes = if self.third != 0 {
                              3
                          } else if self.second != 0 {
                              2
                          } else if self.first != 0 {
                              1
                          } else {
                              0
                          };
                          if bad_bytes != 0 {
                              self.clear();
                              return DecoderResult::Malformed(bad_bytes, 0);
                          }
                      },
                      {
                          if self.first == 0 {
                              debug_assert_eq!(self.second, 0);
                              debug_assert_eq!(self.third, 0);
                              if b <= 0x7F {
                                  write_bmp_or_unread!(dst, b as u16, unread_handle);
                                  continue;
                              }
                              if b == 0x80 {
                                  write_bmp_or_unread!(dst, 0x20ACu16, unread_handle);
                                  continue;
                              }
                              if b >= 0x81 && b <= 0xFE {
                                  self.first = b;
                                  continue;
                              }
                              return DecoderResult::Malformed(1, 0);
                          }
                          if self.third != 0 {
                              let first = self.first;
                              let second = self.second;
                              let third = self.third;
                              if b >= 0x30 && b <= 0x39 {
                                  let pointer = ((first as u32 - 0x81) * (10 * 126 * 10)) +
                                                ((second as u32 - 0x30) * (10 * 126)) +
                                                ((third as u32 - 0x81) * 10) +
                                                (b as u32 - 0x30);
                                  if let Some(c) = gb18030_range_decode(pointer) {
                                      write_char_or_unread!(dst, c, unread_handle);
                                      self.clear();
                                      continue;
                                  }
                              }
                              // Only `first` is in error. `second` is ASCII
                              // and comes out next; `third` becomes a new
                              // lead and `b` is read again.
                              debug_assert!(second >= 0x30 && second <= 0x39);
                              debug_assert!(third >= 0x81 && third <= 0xFE);
                              self.clear();
                              self.pending_ascii = second;
                              self.first = third;
                              unread_handle.unread();
                              return DecoderResult::Malformed(1, 2);
                          }
                          if self.second != 0 {
                              if b >= 0x81 && b <= 0xFE {
                                  self.third = b;
                                  continue;
                              }
                              let second = self.second;
                              debug_assert!(second >= 0x30 && second <= 0x39);
                              self.clear();
                              self.pending_ascii = second;
                              unread_handle.unread();
                              return DecoderResult::Malformed(1, 1);
                          }
                          if b >= 0x30 && b <= 0x39 {
                              self.second = b;
                              continue;
                          }
                          let lead = self.first as usize;
                          let offset = if b < 0x7F {
                              0x40usize
                          } else {
                              0x41usize
                          };
                          if (b >= 0x40 && b <= 0x7E) || (b >= 0x80 && b <= 0xFE) {
                              let pointer = (lead - 0x81) * 190usize + (b as usize - offset);
                              let bmp = gb18030_decode(pointer);
                              if bmp != 0 {
                                  write_bmp_or_unread!(dst, bmp, unread_handle);
                                  self.first = 0;
                                  continue;
                              }
                          }
                          self.first = 0;
                          if b <= 0x7F {
                              unread_handle.unread();
                              return DecoderResult::Malformed(1, 0);
                          }
                          return DecoderResult::Malformed(2, 0);
                      })
    }
}

/// Serves both gb18030 and GBK. The latter has no four-byte sequences and
/// writes the euro sign as a single byte.
pub struct Gb18030Encoder {
    extended: bool,
}

impl Gb18030Encoder {
    pub fn new(extended: bool) -> VariantEncoder {
        VariantEncoder::Gb18030(Gb18030Encoder { extended: extended })
    }

    pub fn max_buffer_length_from_utf16_without_replacement(&self, u16_length: usize) -> Option<usize> {
        if self.extended {
            u16_length.checked_mul(4)
        } else {
            u16_length.checked_mul(2)
        }
    }

    pub fn max_buffer_length_from_utf8_without_replacement(&self, byte_length: usize) -> Option<usize> {
        if self.extended {
            // 1 to 1
            // 2 to 2
            // 3 to 2
            // 2 to 4 (worst)
            // 3 to 4
            // 4 to 4
            byte_length.checked_mul(2)
        } else {
            // 1 to 1
            // 2 to 2
            // 3 to 2
            Some(byte_length)
        }
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
                          if c <= '\u{7F}' {
                              write_one_or_unread!(src, dst, c as u8);
                              continue;
                          }
                          if c == '\u{E5E5}' {
                              return EncoderResult::Unmappable(c);
                          }
                          if !self.extended && c == '\u{20AC}' {
                              write_one_or_unread!(src, dst, 0x80u8);
                              continue;
                          }
                          if let Some(pointer) = gb18030_encode(c) {
                              let lead = (pointer / 190) + 0x81;
                              let trail = pointer % 190;
                              let offset = if trail < 0x3F {
                                  0x40
                              } else {
                                  0x41
                              };
                              write_two_or_unread!(src, dst, lead as u8, (trail + offset) as u8);
                              continue;
                          }
                          if !self.extended {
                              return EncoderResult::Unmappable(c);
                          }
                          let range_pointer = gb18030_range_encode(c);
                          let first = range_pointer / (10 * 126 * 10);
                          let rem_first = range_pointer % (10 * 126 * 10);
                          let second = rem_first / (10 * 126);
                          let rem_second = rem_first % (10 * 126);
                          let third = rem_second / 10;
                          let fourth = rem_second % 10;
                          match dst.check_space_four() {
                              Space::Full => {
                                  src.unread();
                                  return EncoderResult::OutputFull;
                              }
                              Space::Available(destination_handle) => {
                                  destination_handle.write_four((first + 0x81) as u8,
                                                                (second + 0x30) as u8,
                                                                (third + 0x81) as u8,
                                                                (fourth + 0x30) as u8);
                              }
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

    fn decode_gb18030(bytes: &[u8], expect: &str) {
        decode(GB18030, bytes, expect);
    }

    fn encode_gb18030(string: &str, expect: &[u8]) {
        encode(GB18030, string, expect);
    }

    fn encode_gbk(string: &str, expect: &[u8]) {
        encode(GBK, string, expect);
    }

    #[test]
    fn test_gb18030_decode() {
        // ASCII
        decode_gb18030(b"\x61\x62", "\u{0061}\u{0062}");

        // euro
        decode_gb18030(b"\x80", "\u{20AC}");
        decode_gb18030(b"\xA2\xE3", "\u{20AC}");

        // two bytes
        decode_gb18030(b"\x81\x40", "\u{4E02}");
        decode_gb18030(b"\x81\x7E", "\u{4E8A}");
        decode_gb18030(b"\x81\x7F", "\u{FFFD}\u{007F}");
        decode_gb18030(b"\x81\x80", "\u{4E90}");
        decode_gb18030(b"\x81\xFE", "\u{4FA2}");
        decode_gb18030(b"\xFE\x40", "\u{FA0C}");
        decode_gb18030(b"\xFE\x7F", "\u{FFFD}\u{007F}");
        decode_gb18030(b"\xFE\x80", "\u{4723}");
        decode_gb18030(b"\xFE\xFE", "\u{E4C5}");

        // Deviations from GB18030-2000
        decode_gb18030(b"\xA3\xA0", "\u{3000}");
        decode_gb18030(b"\xA1\xA1", "\u{3000}");
        decode_gb18030(b"\xA8\xBC", "\u{1E3F}");

        // 0xFF
        decode_gb18030(b"\xFF\x40", "\u{FFFD}\u{0040}");

        // Four bytes
        decode_gb18030(b"\x81\x30\x81\x30", "\u{0080}");
        decode_gb18030(b"\x81\x35\xF4\x37", "\u{E7C7}");
        decode_gb18030(b"\x81\x37\xA3\x30", "\u{2603}");
        decode_gb18030(b"\x94\x39\xDA\x33", "\u{1F4A9}");
        decode_gb18030(b"\xE3\x32\x9A\x35", "\u{10FFFF}");
        decode_gb18030(b"\xE3\x32\x9A\x36\x81\x30", "\u{FFFD}\u{0032}\u{309B8}");
        decode_gb18030(b"\xE3\x32\x9A\x36\x81\x40",
                       "\u{FFFD}\u{0032}\u{FFFD}\u{0036}\u{4E02}");
        decode_gb18030(b"\xE3\x32\x9A", "\u{FFFD}"); // not \u{FFFD}\u{0032}\u{FFFD} !
        decode_gb18030(b"\x81\x30\x40", "\u{FFFD}\u{0030}\u{0040}");
    }

    #[test]
    fn test_gb18030_malformed_lengths() {
        let mut decoder = GB18030.new_decoder_without_bom_handling();
        let mut dst = [0u16; 8];
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\xE3\x32\x9A\x36", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(1, 2));
        assert_eq!(read, 3);
        assert_eq!(written, 0);
        assert_eq!(result.malformed_start(read), Some(0));
        // The held-back ASCII byte comes out before anything else.
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x36\x81\x30", &mut dst[..], true);
        assert_eq!(result, DecoderResult::InputEmpty);
        assert_eq!(read, 3);
        assert_eq!(&dst[..written], &[0x0032u16, 0xD882u16, 0xDDB8u16][..]);
    }

    #[test]
    fn test_gb18030_pending_ascii_needs_room() {
        let mut decoder = GB18030.new_decoder_without_bom_handling();
        let mut dst = [0u16; 1];
        let (result, read, _) =
            decoder.decode_to_utf16_without_replacement(b"\x81\x30\x40", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(1, 1));
        assert_eq!(read, 2);
        let mut empty = [0u16; 0];
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x40", &mut empty[..], false);
        assert_eq!(result, DecoderResult::OutputFull);
        assert_eq!(read, 0);
        assert_eq!(written, 0);
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x40", &mut dst[..], false);
        assert_eq!(result, DecoderResult::OutputFull);
        assert_eq!(read, 0);
        assert_eq!(&dst[..written], &[0x0030u16][..]);
    }

    #[test]
    fn test_gb18030_encode() {
        // ASCII
        encode_gb18030("\u{0061}\u{0062}", b"\x61\x62");

        // euro
        encode_gb18030("\u{20AC}", b"\xA2\xE3");

        // two bytes
        encode_gb18030("\u{4E02}", b"\x81\x40");
        encode_gb18030("\u{4E8A}", b"\x81\x7E");
        encode_gb18030("\u{4E90}", b"\x81\x80");
        encode_gb18030("\u{4FA2}", b"\x81\xFE");
        encode_gb18030("\u{FA0C}", b"\xFE\x40");
        encode_gb18030("\u{4723}", b"\xFE\x80");
        encode_gb18030("\u{E4C5}", b"\xFE\xFE");

        // Deviations from GB18030-2000
        encode_gb18030("\u{E5E5}", b"?");
        encode_gb18030("\u{3000}", b"\xA1\xA1");
        encode_gb18030("\u{1E3F}", b"\xA8\xBC");

        // Four bytes
        encode_gb18030("\u{0080}", b"\x81\x30\x81\x30");
        encode_gb18030("\u{E7C7}", b"\x81\x35\xF4\x37");
        encode_gb18030("\u{2603}", b"\x81\x37\xA3\x30");
        encode_gb18030("\u{1F4A9}", b"\x94\x39\xDA\x33");
        encode_gb18030("\u{10FFFF}", b"\xE3\x32\x9A\x35");
    }

    #[test]
    fn test_gb18030_four_bytes_need_room() {
        let mut encoder = GB18030.new_encoder();
        let mut dst = [0u8; 3];
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement("\u{2603}", &mut dst[..], true);
        assert_eq!(result, EncoderResult::OutputFull);
        assert_eq!(read, 0);
        assert_eq!(written, 0);
    }

    #[test]
    fn test_gbk_encode() {
        // ASCII
        encode_gbk("\u{0061}\u{0062}", b"\x61\x62");

        // euro
        encode_gbk("\u{20AC}", b"\x80");

        // two bytes
        encode_gbk("\u{4E02}", b"\x81\x40");
        encode_gbk("\u{4E8A}", b"\x81\x7E");
        encode_gbk("\u{4E90}", b"\x81\x80");
        encode_gbk("\u{4FA2}", b"\x81\xFE");
        encode_gbk("\u{FA0C}", b"\xFE\x40");
        encode_gbk("\u{4723}", b"\xFE\x80");
        encode_gbk("\u{E4C5}", b"\xFE\xFE");

        // Deviations from GB18030-2000
        encode_gbk("\u{E5E5}", b"?");
        encode_gbk("\u{3000}", b"\xA1\xA1");

        // Four bytes
        encode_gbk("\u{0080}", b"?");
        encode_gbk("\u{E7C7}", b"?");
        encode_gbk("\u{2603}", b"?");
        encode_gbk("\u{1F4A9}", b"?");
        encode_gbk("\u{10FFFF}", b"?");
    }

    #[test]
    fn test_gbk_decodes_as_gb18030() {
        decode(GBK, b"\x80\x81\x30\x81\x30", "\u{20AC}\u{0080}");
    }
}
