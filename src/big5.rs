// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::handles::*;
use crate::index::*;
use crate::variant::*;
use crate::{DecoderResult, EncoderResult};

pub struct Big5Decoder {
    lead: u8,
}

impl Big5Decoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::Big5(Big5Decoder { lead: 0 })
    }

    fn plus_one_if_lead(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_add(if self.lead == 0 {
            0
        } else {
            1
        })
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        // Astral and the combining pairs: 2 to 2
        self.plus_one_if_lead(byte_length)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // Astral and the combining pairs: 2 to 4
        self.plus_one_if_lead(byte_length)?.checked_mul(2)
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.plus_one_if_lead(byte_length)?.checked_mul(3)
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
                          if self.lead == 0 {
                              dst.copy_ascii_from(src);
                          }
                      },
                      {
                          if self.lead != 0 {
                              self.lead = 0;
                              return DecoderResult::Malformed(1, 0);
                          }
                      },
                      {
                          if self.lead == 0 {
                              if b <= 0x7F {
                                  write_bmp_or_unread!(dst, b as u16, unread_handle);
                                  continue;
                              }
                              if b >= 0x81 && b <= 0xFE {
                                  self.lead = b;
                                  continue;
                              }
                              return DecoderResult::Malformed(1, 0);
                          }
                          let lead = self.lead as usize;
                          let offset = if b < 0x7F {
                              0x40usize
                          } else {
                              0x62usize
                          };
                          if (b >= 0x40 && b <= 0x7E) || (b >= 0xA1 && b <= 0xFE) {
                              let pointer = (lead - 0x81usize) * 157usize + (b as usize - offset);
                              let pair = match pointer {
                                  1133 => Some((0x00CAu16, 0x0304u16)),
                                  1135 => Some((0x00CAu16, 0x030Cu16)),
                                  1164 => Some((0x00EAu16, 0x0304u16)),
                                  1166 => Some((0x00EAu16, 0x030Cu16)),
                                  _ => None,
                              };
                              if let Some((first, second)) = pair {
                                  if !dst.write_pair(first, second) {
                                      unread_handle.unread();
                                      return DecoderResult::OutputFull;
                                  }
                                  self.lead = 0;
                                  continue;
                              }
                              if let Some(c) = big5_decode(pointer) {
                                  write_char_or_unread!(dst, c, unread_handle);
                                  self.lead = 0;
                                  continue;
                              }
                          }
                          // pointer is null
                          self.lead = 0;
                          if b <= 0x7F {
                              unread_handle.unread();
                              return DecoderResult::Malformed(1, 0);
                          }
                          return DecoderResult::Malformed(2, 0);
                      })
    }
}

pub struct Big5Encoder;

impl Big5Encoder {
    pub fn new() -> VariantEncoder {
        VariantEncoder::Big5(Big5Encoder)
    }

    pub fn max_buffer_length_from_utf16_without_replacement(&self, u16_length: usize) -> Option<usize> {
        // Astral: 2 to 2
        u16_length.checked_mul(2)
    }

    pub fn max_buffer_length_from_utf8_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // Two-byte UTF-8 is the worst case: 2 to 2
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
                          if c <= '\u{7F}' {
                              write_one_or_unread!(src, dst, c as u8);
                              continue;
                          }
                          let pointer = match big5_encode(c) {
                              Some(pointer) => pointer,
                              None => {
                                  return EncoderResult::Unmappable(c);
                              }
                          };
                          let lead = pointer / 157 + 0x81;
                          let trail = pointer % 157;
                          let offset = if trail < 0x3F {
                              0x40
                          } else {
                              0x62
                          };
                          write_two_or_unread!(src, dst, lead as u8, (trail + offset) as u8);
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

    #[test]
    fn test_big5_decode() {
        // Empty
        decode(BIG5, b"", "");
        // ASCII
        decode(BIG5, b"\x61\x62", "\u{0061}\u{0062}");
        // Edge cases
        decode(BIG5, b"\x87\x40", "\u{43F0}");
        decode(BIG5, b"\xFE\xFE", "\u{79D4}");
        decode(BIG5, b"\xFE\xFD", "\u{2910D}");
        decode(BIG5, b"\x88\x62", "\u{00CA}\u{0304}");
        decode(BIG5, b"\x88\x64", "\u{00CA}\u{030C}");
        decode(BIG5, b"\x88\xA3", "\u{00EA}\u{0304}");
        decode(BIG5, b"\x88\xA5", "\u{00EA}\u{030C}");
        decode(BIG5, b"\x99\xD4", "\u{8991}");
        decode(BIG5, b"\x99\xD5", "\u{27967}");
        decode(BIG5, b"\x99\xD6", "\u{8A29}");
        // Edge cases surrounded with ASCII
        decode(BIG5, b"\x61\x87\x40\x62", "\u{0061}\u{43F0}\u{0062}");
        decode(BIG5, b"\x61\xFE\xFE\x62", "\u{0061}\u{79D4}\u{0062}");
        decode(BIG5, b"\x61\xFE\xFD\x62", "\u{0061}\u{2910D}\u{0062}");
        decode(BIG5, b"\x61\x88\x62\x62", "\u{0061}\u{00CA}\u{0304}\u{0062}");
        // Bad sequences
        decode(BIG5, b"\x80\x61", "\u{FFFD}\u{0061}");
        decode(BIG5, b"\xFF\x61", "\u{FFFD}\u{0061}");
        decode(BIG5, b"\xFE\x39", "\u{FFFD}\u{0039}");
        decode(BIG5, b"\x87\x66", "\u{FFFD}\u{0066}");
        decode(BIG5, b"\x81\x40", "\u{FFFD}\u{0040}");
        decode(BIG5, b"\x61\x81", "\u{0061}\u{FFFD}");
        decode(BIG5, b"\x81\x80", "\u{FFFD}");
    }

    #[test]
    fn test_big5_encode() {
        // Empty
        encode(BIG5, "", b"");
        // ASCII
        encode(BIG5, "\u{0061}\u{0062}", b"\x61\x62");
        // Edge cases
        encode(BIG5, "\u{9EA6}\u{0061}", b"?\x61");
        encode(BIG5, "\u{2626B}\u{0061}", b"?\x61");
        encode(BIG5, "\u{3000}", b"\xA1\x40");
        encode(BIG5, "\u{20AC}", b"\xA3\xE1");
        encode(BIG5, "\u{4E00}", b"\xA4\x40");
        encode(BIG5, "\u{27607}", b"\xC8\xA4");
        encode(BIG5, "\u{FFE2}", b"\xC8\xCD");
        encode(BIG5, "\u{79D4}", b"\xFE\xFE");
        // Not in index
        encode(BIG5, "\u{2603}\u{0061}", b"?\x61");
        // duplicate low bits
        encode(BIG5, "\u{203B5}", b"\xFD\x6A");
        encode(BIG5, "\u{25605}", b"\xFE\x46");
        // prefer last
        encode(BIG5, "\u{2550}", b"\xF9\xF9");
    }

    #[test]
    fn test_big5_combining_pair_needs_room_for_both() {
        let mut decoder = BIG5.new_decoder_without_bom_handling();
        let mut dst = [0u16; 1];
        let (result, read, written) = decoder.decode_to_utf16_without_replacement(b"\x88\x62", &mut dst[..], true);
        assert_eq!(result, DecoderResult::OutputFull);
        assert_eq!(read, 1);
        assert_eq!(written, 0);
        let mut dst = [0u16; 2];
        let (result, read, written) = decoder.decode_to_utf16_without_replacement(b"\x62", &mut dst[..], true);
        assert_eq!(result, DecoderResult::InputEmpty);
        assert_eq!(read, 1);
        assert_eq!(&dst[..written], &[0x00CAu16, 0x0304u16][..]);
    }
}
