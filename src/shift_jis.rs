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

pub struct ShiftJisDecoder {
    lead: u8,
}

impl ShiftJisDecoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::ShiftJis(ShiftJisDecoder { lead: 0 })
    }

    fn plus_one_if_lead(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_add(if self.lead == 0 {
            0
        } else {
            1
        })
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.plus_one_if_lead(byte_length)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // Half-width katakana: 1 to 3
        self.plus_one_if_lead(byte_length)?.checked_mul(3)
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
                              if b <= 0x80 {
                                  write_bmp_or_unread!(dst, b as u16, unread_handle);
                                  continue;
                              }
                              if b >= 0xA1 && b <= 0xDF {
                                  write_bmp_or_unread!(dst, 0xFF61u16 - 0xA1u16 + b as u16, unread_handle);
                                  continue;
                              }
                              if (b >= 0x81 && b <= 0x9F) || (b >= 0xE0 && b <= 0xFC) {
                                  self.lead = b;
                                  continue;
                              }
                              return DecoderResult::Malformed(1, 0);
                          }
                          let lead = self.lead as usize;
                          let offset = if b < 0x7F {
                              0x40usize
                          } else {
                              0x41usize
                          };
                          let lead_offset = if lead < 0xA0 {
                              0x81usize
                          } else {
                              0xC1usize
                          };
                          if (b >= 0x40 && b <= 0x7E) || (b >= 0x80 && b <= 0xFC) {
                              let pointer = (lead - lead_offset) * 188usize + b as usize - offset;
                              let bmp = if pointer >= 8836 && pointer <= 10715 {
                                  // End-user-defined characters map to the
                                  // Private Use Area.
                                  (0xE000usize - 8836 + pointer) as u16
                              } else {
                                  jis0208_decode(pointer)
                              };
                              if bmp != 0 {
                                  write_bmp_or_unread!(dst, bmp, unread_handle);
                                  self.lead = 0;
                                  continue;
                              }
                          }
                          self.lead = 0;
                          if b <= 0x7F {
                              unread_handle.unread();
                              return DecoderResult::Malformed(1, 0);
                          }
                          return DecoderResult::Malformed(2, 0);
                      })
    }
}

pub struct ShiftJisEncoder;

impl ShiftJisEncoder {
    pub fn new() -> VariantEncoder {
        VariantEncoder::ShiftJis(ShiftJisEncoder)
    }

    pub fn max_buffer_length_from_utf16_without_replacement(&self, u16_length: usize) -> Option<usize> {
        u16_length.checked_mul(2)
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
                          if c <= '\u{80}' {
                              write_one_or_unread!(src, dst, c as u8);
                              continue;
                          }
                          if c == '\u{A5}' {
                              write_one_or_unread!(src, dst, 0x5Cu8);
                              continue;
                          }
                          if c == '\u{203E}' {
                              write_one_or_unread!(src, dst, 0x7Eu8);
                              continue;
                          }
                          if c >= '\u{FF61}' && c <= '\u{FF9F}' {
                              write_one_or_unread!(src, dst, (c as u32 - 0xFF61 + 0xA1) as u8);
                              continue;
                          }
                          let mapped = if c == '\u{2212}' {
                              '\u{FF0D}'
                          } else {
                              c
                          };
                          let pointer = match shift_jis_encode(mapped) {
                              Some(pointer) => pointer,
                              None => {
                                  return EncoderResult::Unmappable(c);
                              }
                          };
                          let lead = pointer / 188;
                          let lead_offset = if lead < 0x1F {
                              0x81usize
                          } else {
                              0xC1usize
                          };
                          let trail = pointer % 188;
                          let offset = if trail < 0x3F {
                              0x40usize
                          } else {
                              0x41usize
                          };
                          write_two_or_unread!(src, dst, (lead + lead_offset) as u8, (trail + offset) as u8);
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
    fn test_shift_jis_decode() {
        // Empty
        decode(SHIFT_JIS, b"", "");
        // ASCII
        decode(SHIFT_JIS, b"\x61\x62", "\u{0061}\u{0062}");
        // Half-width
        decode(SHIFT_JIS, b"\xA1", "\u{FF61}");
        decode(SHIFT_JIS, b"\xDF", "\u{FF9F}");
        decode(SHIFT_JIS, b"\xA0", "\u{FFFD}");
        decode(SHIFT_JIS, b"\xE0", "\u{FFFD}");
        decode(SHIFT_JIS, b"\xA0+", "\u{FFFD}+");
        decode(SHIFT_JIS, b"\xE0+", "\u{FFFD}+");
        // EUDC
        decode(SHIFT_JIS, b"\xF0\x40", "\u{E000}");
        decode(SHIFT_JIS, b"\xF9\xFC", "\u{E757}");
        decode(SHIFT_JIS, b"\xEF\xFC", "\u{FFFD}");
        decode(SHIFT_JIS, b"\xFA\x40", "\u{2170}");
        // JIS 0208
        decode(SHIFT_JIS, b"\x81\x40", "\u{3000}");
        decode(SHIFT_JIS, b"\x81\x3F", "\u{FFFD}?");
        decode(SHIFT_JIS, b"\xEE\xFC", "\u{FF02}");
        decode(SHIFT_JIS, b"\xEE\xFD", "\u{FFFD}");
        decode(SHIFT_JIS, b"\xFA\x3F", "\u{FFFD}?");
        decode(SHIFT_JIS, b"\xFC\x4B", "\u{9ED1}");
        decode(SHIFT_JIS, b"\xFC\x4C", "\u{FFFD}L");
        // The lone 0x80 passes through
        decode(SHIFT_JIS, b"\x80", "\u{80}");
        decode(SHIFT_JIS, b"\x82\xA0", "\u{3042}");
    }

    #[test]
    fn test_shift_jis_encode() {
        // Empty
        encode(SHIFT_JIS, "", b"");
        // ASCII
        encode(SHIFT_JIS, "\u{0061}\u{0062}", b"\x61\x62");
        // Exceptions
        encode(SHIFT_JIS, "\u{0080}", b"\x80");
        encode(SHIFT_JIS, "\u{00A5}", b"\x5C");
        encode(SHIFT_JIS, "\u{203E}", b"\x7E");
        encode(SHIFT_JIS, "\u{2212}", b"\x81\x7C");
        // Half-width
        encode(SHIFT_JIS, "\u{FF61}", b"\xA1");
        encode(SHIFT_JIS, "\u{FF9F}", b"\xDF");
        // EUDC
        encode(SHIFT_JIS, "\u{E000}", b"?");
        encode(SHIFT_JIS, "\u{E757}", b"?");
        // JIS 0212
        encode(SHIFT_JIS, "\u{02D8}", b"?");
        // JIS 0208
        encode(SHIFT_JIS, "\u{3000}", b"\x81\x40");
        encode(SHIFT_JIS, "\u{3042}", b"\x82\xA0");
        encode(SHIFT_JIS, "\u{FF02}", b"\xFA\x57");
        encode(SHIFT_JIS, "\u{2170}", b"\xFA\x40");
        encode(SHIFT_JIS, "\u{9ED1}", b"\xFC\x4B");
    }
}
