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

pub struct EucJpDecoder {
    lead: u8,
    jis0212: bool,
}

impl EucJpDecoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::EucJp(EucJpDecoder {
            lead: 0,
            jis0212: false,
        })
    }

    fn plus_state(&self, byte_length: usize) -> Option<usize> {
        let lead = if self.lead == 0 { 0 } else { 1 };
        let jis0212 = if self.jis0212 { 1 } else { 0 };
        byte_length.checked_add(lead + jis0212)
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.plus_state(byte_length)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // worst case: 2 to 3
        let len = self.plus_state(byte_length)?;
        len.checked_add(len.checked_add(1)? / 2)
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.plus_state(byte_length)?.checked_mul(3)
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
                              let bad_bytes = if self.jis0212 { 2 } else { 1 };
                              self.lead = 0;
                              self.jis0212 = false;
                              return DecoderResult::Malformed(bad_bytes, 0);
                          }
                      },
                      {
                          if self.lead == 0 {
                              if b <= 0x7F {
                                  write_bmp_or_unread!(dst, b as u16, unread_handle);
                                  continue;
                              }
                              if b == 0x8E || b == 0x8F || (b >= 0xA1 && b <= 0xFE) {
                                  self.lead = b;
                                  continue;
                              }
                              return DecoderResult::Malformed(1, 0);
                          }
                          let lead = self.lead;
                          if lead == 0x8E && b >= 0xA1 && b <= 0xDF {
                              write_bmp_or_unread!(dst, 0xFF61u16 - 0xA1u16 + b as u16, unread_handle);
                              self.lead = 0;
                              continue;
                          }
                          if lead == 0x8F && b >= 0xA1 && b <= 0xFE {
                              self.jis0212 = true;
                              self.lead = b;
                              continue;
                          }
                          if lead >= 0xA1 && b >= 0xA1 && b <= 0xFE {
                              let pointer = (lead as usize - 0xA1) * 94usize + (b as usize - 0xA1);
                              let bmp = if self.jis0212 {
                                  jis0212_decode(pointer)
                              } else {
                                  jis0208_decode(pointer)
                              };
                              if bmp != 0 {
                                  write_bmp_or_unread!(dst, bmp, unread_handle);
                                  self.lead = 0;
                                  self.jis0212 = false;
                                  continue;
                              }
                          }
                          let mut bad_bytes = if self.jis0212 { 2 } else { 1 };
                          self.lead = 0;
                          self.jis0212 = false;
                          if b <= 0x7F {
                              unread_handle.unread();
                          } else {
                              bad_bytes += 1;
                          }
                          return DecoderResult::Malformed(bad_bytes, 0);
                      })
    }
}

pub struct EucJpEncoder;

impl EucJpEncoder {
    pub fn new() -> VariantEncoder {
        VariantEncoder::EucJp(EucJpEncoder)
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
                          if c <= '\u{7F}' {
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
                              write_two_or_unread!(src, dst, 0x8Eu8, (c as u32 - 0xFF61 + 0xA1) as u8);
                              continue;
                          }
                          let mapped = if c == '\u{2212}' {
                              '\u{FF0D}'
                          } else {
                              c
                          };
                          match jis0208_encode(mapped) {
                              Some(pointer) => {
                                  let lead = pointer / 94 + 0xA1;
                                  let trail = pointer % 94 + 0xA1;
                                  write_two_or_unread!(src, dst, lead as u8, trail as u8);
                                  continue;
                              }
                              None => {
                                  return EncoderResult::Unmappable(c);
                              }
                          }
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
    fn test_euc_jp_decode() {
        // Empty
        decode(EUC_JP, b"", "");
        // ASCII
        decode(EUC_JP, b"\x61\x62", "\u{0061}\u{0062}");
        // Half-width
        decode(EUC_JP, b"\x8E\xA1", "\u{FF61}");
        decode(EUC_JP, b"\x8E\xDF", "\u{FF9F}");
        decode(EUC_JP, b"\x8E\xA0", "\u{FFFD}");
        decode(EUC_JP, b"\x8E\xE0", "\u{FFFD}");
        decode(EUC_JP, b"\x8E\xFF", "\u{FFFD}");
        decode(EUC_JP, b"\x8E", "\u{FFFD}");
        // JIS 0212
        decode(EUC_JP, b"\x8F\xA1\xA1", "\u{FFFD}");
        decode(EUC_JP, b"\x8F\xA2\xAF", "\u{02D8}");
        decode(EUC_JP, b"\x8F\xFE\xF6", "\u{FFFD}");
        decode(EUC_JP, b"\x8F", "\u{FFFD}");
        decode(EUC_JP, b"\x8F\xA2", "\u{FFFD}");
        decode(EUC_JP, b"\x8F\xA2\x61", "\u{FFFD}\u{0061}");
        // JIS 0208
        decode(EUC_JP, b"\xA1\xA1", "\u{3000}");
        decode(EUC_JP, b"\xA1\xA0", "\u{FFFD}");
        decode(EUC_JP, b"\xFC\xFE", "\u{FF02}");
        decode(EUC_JP, b"\xA1\xC1", "\u{FF5E}");
        decode(EUC_JP, b"\xA4\xA2", "\u{3042}");
        decode(EUC_JP, b"\xA1\x61", "\u{FFFD}\u{0061}");
        decode(EUC_JP, b"\x80\x61", "\u{FFFD}\u{0061}");
    }

    #[test]
    fn test_euc_jp_malformed_lengths() {
        let mut decoder = EUC_JP.new_decoder_without_bom_handling();
        let mut dst = [0u16; 8];
        let (result, read, _) = decoder.decode_to_utf16_without_replacement(b"\x8F\xA2\x61", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(2, 0));
        assert_eq!(read, 2);
        let (result, read, _) = decoder.decode_to_utf16_without_replacement(b"\xA1\xA0", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(2, 0));
        assert_eq!(read, 2);
    }

    #[test]
    fn test_euc_jp_encode() {
        // Empty
        encode(EUC_JP, "", b"");
        // ASCII
        encode(EUC_JP, "\u{0061}\u{0062}", b"\x61\x62");
        // Exceptions
        encode(EUC_JP, "\u{00A5}", b"\x5C");
        encode(EUC_JP, "\u{203E}", b"\x7E");
        encode(EUC_JP, "\u{2212}", b"\xA1\xDD");
        // Half-width
        encode(EUC_JP, "\u{FF61}", b"\x8E\xA1");
        encode(EUC_JP, "\u{FF9F}", b"\x8E\xDF");
        // JIS 0212
        encode(EUC_JP, "\u{02D8}", b"?");
        // JIS 0208
        encode(EUC_JP, "\u{3000}", b"\xA1\xA1");
        encode(EUC_JP, "\u{3042}", b"\xA4\xA2");
        encode(EUC_JP, "\u{1F4A9}", b"?");
    }
}
