// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::handles::*;
use crate::variant::*;
use crate::{DecoderResult, EncoderResult};

/// Decodes bytes 0x80...0xFF through a 128-entry table where zero marks a
/// byte without a mapping.
pub struct SingleByteDecoder {
    table: &'static [u16; 128],
}

impl SingleByteDecoder {
    pub fn new(data: &'static [u16; 128]) -> VariantDecoder {
        VariantDecoder::SingleByte(SingleByteDecoder { table: data })
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        Some(byte_length)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_mul(3)
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_mul(3)
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
                          dst.copy_ascii_from(src);
                      },
                      {},
                      {
                          if b < 0x80 {
                              write_bmp_or_unread!(dst, b as u16, unread_handle);
                              continue;
                          }
                          let mapped = self.table[b as usize - 0x80usize];
                          if mapped == 0u16 {
                              return DecoderResult::Malformed(1, 0);
                          }
                          write_bmp_or_unread!(dst, mapped, unread_handle);
                          continue;
                      })
    }
}

pub struct SingleByteEncoder {
    table: &'static [u16; 128],
}

impl SingleByteEncoder {
    pub fn new(data: &'static [u16; 128]) -> VariantEncoder {
        VariantEncoder::SingleByte(SingleByteEncoder { table: data })
    }

    pub fn max_buffer_length_from_utf16_without_replacement(&self, u16_length: usize) -> Option<usize> {
        Some(u16_length)
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
                          if c > '\u{FFFF}' {
                              return EncoderResult::Unmappable(c);
                          }
                          let bmp = c as u16;
                          // Search backwards, because the lowest quarter
                          // is the least probable.
                          match self.table.iter().rposition(|&mapped| mapped == bmp) {
                              Some(i) => {
                                  write_one_or_unread!(src, dst, (i + 0x80) as u8);
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
    fn test_windows_1252() {
        decode(WINDOWS_1252, b"caf\xE9 \x80\x81", "caf\u{E9} \u{20AC}\u{81}");
        encode(WINDOWS_1252, "caf\u{E9} \u{20AC}", b"caf\xE9 \x80");
        encode(WINDOWS_1252, "\u{3042}\u{1F600}x", b"??x");
    }

    #[test]
    fn test_unmapped_byte() {
        // 0xAA has no mapping in windows-1253.
        decode(WINDOWS_1253, b"a\xAAb", "a\u{FFFD}b");
        decode(ISO_8859_8, b"\xA1", "\u{FFFD}");
    }

    #[test]
    fn test_koi8_u_round_trip() {
        decode(KOI8_U, b"\xC1\xC2\xD7", "\u{0430}\u{0431}\u{0432}");
        encode(KOI8_U, "\u{0430}\u{0431}\u{0432}", b"\xC1\xC2\xD7");
    }

    #[test]
    fn test_every_single_byte_encoding_round_trips() {
        for encoding in [IBM866, ISO_8859_2, ISO_8859_5, ISO_8859_15, KOI8_R, MACINTOSH, WINDOWS_874,
                         WINDOWS_1250, WINDOWS_1251, WINDOWS_1252, WINDOWS_1256, WINDOWS_1258,
                         X_MAC_CYRILLIC]
            .iter() {
            let mut bytes: Vec<u8> = (0u8..=0xFFu8).collect();
            let (decoded, _) = encoding.decode_without_bom_handling(&bytes[..]);
            let (encoded, _, had_errors) = encoding.encode(&decoded);
            if !had_errors {
                assert_eq!(&encoded[..], &bytes[..]);
            }
            bytes.retain(|b| *b < 0x80);
            assert_eq!(&encoding.encode(::std::str::from_utf8(&bytes[..]).unwrap()).0[..],
                       &bytes[..]);
        }
    }
}
