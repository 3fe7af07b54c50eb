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

pub struct EucKrDecoder {
    lead: u8,
}

impl EucKrDecoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::EucKr(EucKrDecoder { lead: 0 })
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
        // worst case: 2 to 3
        let len = self.plus_one_if_lead(byte_length)?;
        len.checked_add(len.checked_add(1)? / 2)
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
                          if b >= 0x41 && b <= 0xFE {
                              let pointer = (lead - 0x81) * 190usize + (b as usize - 0x41);
                              let bmp = euc_kr_decode(pointer);
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

pub struct EucKrEncoder;

impl EucKrEncoder {
    pub fn new() -> VariantEncoder {
        VariantEncoder::EucKr(EucKrEncoder)
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
                          match euc_kr_encode(c) {
                              Some(pointer) => {
                                  let lead = pointer / 190 + 0x81;
                                  let trail = pointer % 190 + 0x41;
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
    fn test_euc_kr_decode() {
        // Empty
        decode(EUC_KR, b"", "");
        // ASCII
        decode(EUC_KR, b"\x61\x62", "\u{0061}\u{0062}");
        // Hangul
        decode(EUC_KR, b"\xB0\xA1", "\u{AC00}");
        decode(EUC_KR, b"\x81\x41", "\u{AC02}");
        decode(EUC_KR, b"\xC8\xFE", "\u{D79D}");
        decode(EUC_KR, b"\xFD\xFE", "\u{8A70}");
        decode(EUC_KR, b"\xFE\xFE", "\u{FFFD}");
        // Bad sequences
        decode(EUC_KR, b"\x80\x61", "\u{FFFD}\u{0061}");
        decode(EUC_KR, b"\xFF\x61", "\u{FFFD}\u{0061}");
        decode(EUC_KR, b"\x81\x40", "\u{FFFD}\u{0040}");
        decode(EUC_KR, b"\xC9\xA1", "\u{FFFD}");
        decode(EUC_KR, b"\x61\x81", "\u{0061}\u{FFFD}");
    }

    #[test]
    fn test_euc_kr_encode() {
        encode(EUC_KR, "", b"");
        encode(EUC_KR, "\u{0061}\u{0062}", b"\x61\x62");
        encode(EUC_KR, "\u{AC00}", b"\xB0\xA1");
        encode(EUC_KR, "\u{AC02}", b"\x81\x41");
        encode(EUC_KR, "\u{D79D}", b"\xC8\xFE");
        encode(EUC_KR, "\u{2603}\u{1F600}", b"??");
    }
}
