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

pub struct UserDefinedDecoder;

impl UserDefinedDecoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::UserDefined(UserDefinedDecoder)
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
                          write_bmp_or_unread!(dst, (b as usize + 0xF700usize) as u16, unread_handle);
                          continue;
                      })
    }
}

pub struct UserDefinedEncoder;

impl UserDefinedEncoder {
    pub fn new() -> VariantEncoder {
        VariantEncoder::UserDefined(UserDefinedEncoder)
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
                          if c < '\u{F780}' || c > '\u{F7FF}' {
                              return EncoderResult::Unmappable(c);
                          }
                          write_one_or_unread!(src, dst, (c as usize - 0xF700usize) as u8);
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
    fn test_x_user_defined_decode() {
        decode(X_USER_DEFINED, b"", "");
        decode(X_USER_DEFINED, b"a\x7F", "a\u{7F}");
        decode(X_USER_DEFINED, b"\x80\xFF", "\u{F780}\u{F7FF}");
    }

    #[test]
    fn test_x_user_defined_encode() {
        encode(X_USER_DEFINED, "a\u{F780}\u{F7FF}", b"a\x80\xFF");
        encode(X_USER_DEFINED, "\u{F77F}\u{F800}\u{80}", b"???");
    }

    #[test]
    fn test_x_user_defined_never_malformed() {
        let bytes: Vec<u8> = (0u8..=0xFFu8).collect();
        let (string, had_errors) = X_USER_DEFINED.decode_without_bom_handling(&bytes[..]);
        assert!(!had_errors);
        let (encoded, _, had_errors) = X_USER_DEFINED.encode(&string);
        assert!(!had_errors);
        assert_eq!(&encoded[..], &bytes[..]);
    }
}
