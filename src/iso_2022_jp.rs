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

#[derive(Copy, Clone, PartialEq, Debug)]
enum Iso2022JpDecoderState {
    Ascii,
    Roman,
    Katakana,
    LeadByte,
    TrailByte,
    EscapeStart,
    Escape,
}

pub struct Iso2022JpDecoder {
    decoder_state: Iso2022JpDecoderState,
    output_state: Iso2022JpDecoderState, // only takes 1 of first 4 values
    lead: u8,
    output_flag: bool,
    pending_prepended: bool,
}

impl Iso2022JpDecoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::Iso2022Jp(Iso2022JpDecoder {
            decoder_state: Iso2022JpDecoderState::Ascii,
            output_state: Iso2022JpDecoderState::Ascii,
            lead: 0u8,
            output_flag: false,
            pending_prepended: false,
        })
    }

    /// Bytes already consumed that may still turn into output.
    fn pending_bytes(&self) -> usize {
        let held = match self.decoder_state {
            Iso2022JpDecoderState::TrailByte | Iso2022JpDecoderState::EscapeStart => 1,
            Iso2022JpDecoderState::Escape => 2,
            _ => 0,
        };
        held + if self.pending_prepended { 1 } else { 0 }
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_add(self.pending_bytes())
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // Katakana: 1 to 3
        byte_length.checked_add(self.pending_bytes())?.checked_mul(3)
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        byte_length.checked_add(self.pending_bytes())?.checked_mul(3)
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
                          if self.pending_prepended {
                              // `lead` was seen in EscapeStart and turned out
                              // not to start an escape sequence.
                              debug_assert!(self.lead == 0x24u8 || self.lead == 0x28u8);
                              match self.decoder_state {
                                  Iso2022JpDecoderState::Ascii |
                                  Iso2022JpDecoderState::Roman => {
                                      if !dst.write_bmp(self.lead as u16) {
                                          return DecoderResult::OutputFull;
                                      }
                                      self.lead = 0;
                                  }
                                  Iso2022JpDecoderState::Katakana => {
                                      if !dst.write_bmp(self.lead as u16 - 0x21u16 + 0xFF61u16) {
                                          return DecoderResult::OutputFull;
                                      }
                                      self.lead = 0;
                                  }
                                  Iso2022JpDecoderState::LeadByte => {
                                      self.decoder_state = Iso2022JpDecoderState::TrailByte;
                                  }
                                  _ => unreachable!(),
                              }
                              self.pending_prepended = false;
                              self.output_flag = false;
                          }
                      },
                      {
                          match self.decoder_state {
                              Iso2022JpDecoderState::TrailByte |
                              Iso2022JpDecoderState::EscapeStart => {
                                  self.decoder_state = self.output_state;
                                  self.lead = 0;
                                  return DecoderResult::Malformed(1, 0);
                              }
                              Iso2022JpDecoderState::Escape => {
                                  // The lone ESC is in error; `lead` goes
                                  // out on the next call.
                                  self.pending_prepended = true;
                                  self.decoder_state = self.output_state;
                                  return DecoderResult::Malformed(1, 1);
                              }
                              _ => {}
                          }
                      },
                      {
                          match self.decoder_state {
                              Iso2022JpDecoderState::Ascii => {
                                  if b == 0x1Bu8 {
                                      self.decoder_state = Iso2022JpDecoderState::EscapeStart;
                                      continue;
                                  }
                                  if b > 0x7Fu8 || b == 0x0Eu8 || b == 0x0Fu8 {
                                      self.output_flag = false;
                                      return DecoderResult::Malformed(1, 0);
                                  }
                                  write_bmp_or_unread!(dst, b as u16, unread_handle);
                                  self.output_flag = false;
                                  continue;
                              }
                              Iso2022JpDecoderState::Roman => {
                                  if b == 0x1Bu8 {
                                      self.decoder_state = Iso2022JpDecoderState::EscapeStart;
                                      continue;
                                  }
                                  if b > 0x7Fu8 || b == 0x0Eu8 || b == 0x0Fu8 {
                                      self.output_flag = false;
                                      return DecoderResult::Malformed(1, 0);
                                  }
                                  let bmp = match b {
                                      0x5C => 0x00A5u16,
                                      0x7E => 0x203Eu16,
                                      _ => b as u16,
                                  };
                                  write_bmp_or_unread!(dst, bmp, unread_handle);
                                  self.output_flag = false;
                                  continue;
                              }
                              Iso2022JpDecoderState::Katakana => {
                                  if b == 0x1Bu8 {
                                      self.decoder_state = Iso2022JpDecoderState::EscapeStart;
                                      continue;
                                  }
                                  if b >= 0x21u8 && b <= 0x5Fu8 {
                                      write_bmp_or_unread!(dst, b as u16 - 0x21u16 + 0xFF61u16, unread_handle);
                                      self.output_flag = false;
                                      continue;
                                  }
                                  self.output_flag = false;
                                  return DecoderResult::Malformed(1, 0);
                              }
                              Iso2022JpDecoderState::LeadByte => {
                                  if b == 0x1Bu8 {
                                      self.decoder_state = Iso2022JpDecoderState::EscapeStart;
                                      continue;
                                  }
                                  self.output_flag = false;
                                  if b >= 0x21u8 && b <= 0x7Eu8 {
                                      self.lead = b;
                                      self.decoder_state = Iso2022JpDecoderState::TrailByte;
                                      continue;
                                  }
                                  return DecoderResult::Malformed(1, 0);
                              }
                              Iso2022JpDecoderState::TrailByte => {
                                  if b == 0x1Bu8 {
                                      // The byte in error is the previous
                                      // lead byte.
                                      self.lead = 0;
                                      self.decoder_state = Iso2022JpDecoderState::EscapeStart;
                                      return DecoderResult::Malformed(1, 1);
                                  }
                                  if b >= 0x21u8 && b <= 0x7Eu8 {
                                      let pointer = (self.lead as usize - 0x21usize) * 94usize +
                                                    b as usize - 0x21usize;
                                      let bmp = jis0208_decode(pointer);
                                      if bmp != 0 {
                                          write_bmp_or_unread!(dst, bmp, unread_handle);
                                          self.lead = 0;
                                          self.decoder_state = Iso2022JpDecoderState::LeadByte;
                                          continue;
                                      }
                                  }
                                  self.lead = 0;
                                  self.decoder_state = Iso2022JpDecoderState::LeadByte;
                                  return DecoderResult::Malformed(2, 0);
                              }
                              Iso2022JpDecoderState::EscapeStart => {
                                  if b == 0x24u8 || b == 0x28u8 {
                                      self.lead = b;
                                      self.decoder_state = Iso2022JpDecoderState::Escape;
                                      continue;
                                  }
                                  self.output_flag = false;
                                  self.decoder_state = self.output_state;
                                  unread_handle.unread();
                                  return DecoderResult::Malformed(1, 0);
                              }
                              Iso2022JpDecoderState::Escape => {
                                  let state = match (self.lead, b) {
                                      (0x28, 0x42) => Some(Iso2022JpDecoderState::Ascii),
                                      (0x28, 0x4A) => Some(Iso2022JpDecoderState::Roman),
                                      (0x28, 0x49) => Some(Iso2022JpDecoderState::Katakana),
                                      (0x24, 0x40) |
                                      (0x24, 0x42) => Some(Iso2022JpDecoderState::LeadByte),
                                      _ => None,
                                  };
                                  match state {
                                      Some(s) => {
                                          self.lead = 0;
                                          self.decoder_state = s;
                                          self.output_state = s;
                                          let flag = self.output_flag;
                                          self.output_flag = true;
                                          if flag {
                                              // Two escape sequences in a row
                                              // make the first one useless.
                                              return DecoderResult::Malformed(3, 3);
                                          }
                                          continue;
                                      }
                                      None => {
                                          // `lead` stays and goes out from
                                          // the preamble before `b` is read
                                          // again. The byte in error is the
                                          // ESC before both.
                                          self.pending_prepended = true;
                                          self.output_flag = false;
                                          self.decoder_state = self.output_state;
                                          unread_handle.unread();
                                          return DecoderResult::Malformed(1, 1);
                                      }
                                  }
                              }
                          }
                      })
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum Iso2022JpEncoderState {
    Ascii,
    Roman,
    Jis0208,
}

const ESCAPE_ASCII: [u8; 3] = [0x1B, 0x28, 0x42];
const ESCAPE_ROMAN: [u8; 3] = [0x1B, 0x28, 0x4A];
const ESCAPE_JIS0208: [u8; 3] = [0x1B, 0x24, 0x42];

pub struct Iso2022JpEncoder {
    state: Iso2022JpEncoderState,
}

impl Iso2022JpEncoder {
    pub fn new() -> VariantEncoder {
        VariantEncoder::Iso2022Jp(Iso2022JpEncoder { state: Iso2022JpEncoderState::Ascii })
    }

    pub fn max_buffer_length_from_utf16_without_replacement(&self, u16_length: usize) -> Option<usize> {
        // Alternating kanji and ASCII: 1 to 5 then 1 to 4.
        // Plus the final escape to ASCII.
        u16_length.checked_mul(4)?
            .checked_add(u16_length.checked_add(1)? / 2)?
            .checked_add(3)
    }

    pub fn max_buffer_length_from_utf8_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // Yen sign then backslash: 3 to 8.
        // Plus the final escape to ASCII.
        byte_length.checked_mul(3)?.checked_add(3)
    }

    pub fn encode<S: UnicodeSource>(&mut self,
                                    src: &mut S,
                                    dst: &mut ByteDestination,
                                    last: bool)
                                    -> EncoderResult {
        encoder_loop!(src,
                      last,
                      c,
                      {},
                      {
                          if self.state != Iso2022JpEncoderState::Ascii {
                              if !dst.write_all(&ESCAPE_ASCII[..]) {
                                  return EncoderResult::OutputFull;
                              }
                              self.state = Iso2022JpEncoderState::Ascii;
                          }
                      },
                      {
                          if self.state != Iso2022JpEncoderState::Jis0208 &&
                             (c == '\u{0E}' || c == '\u{0F}' || c == '\u{1B}') {
                              return EncoderResult::Unmappable(c);
                          }
                          if c <= '\u{7F}' {
                              let fits_state = match self.state {
                                  Iso2022JpEncoderState::Ascii => true,
                                  Iso2022JpEncoderState::Roman => c != '\u{5C}' && c != '\u{7E}',
                                  Iso2022JpEncoderState::Jis0208 => false,
                              };
                              if !fits_state {
                                  if !dst.write_all(&ESCAPE_ASCII[..]) {
                                      src.unread();
                                      return EncoderResult::OutputFull;
                                  }
                                  self.state = Iso2022JpEncoderState::Ascii;
                                  if c == '\u{0E}' || c == '\u{0F}' || c == '\u{1B}' {
                                      return EncoderResult::Unmappable(c);
                                  }
                              }
                              write_one_or_unread!(src, dst, c as u8);
                              continue;
                          }
                          if c == '\u{A5}' || c == '\u{203E}' {
                              if self.state != Iso2022JpEncoderState::Roman {
                                  if !dst.write_all(&ESCAPE_ROMAN[..]) {
                                      src.unread();
                                      return EncoderResult::OutputFull;
                                  }
                                  self.state = Iso2022JpEncoderState::Roman;
                              }
                              let byte = if c == '\u{A5}' {
                                  0x5Cu8
                              } else {
                                  0x7Eu8
                              };
                              write_one_or_unread!(src, dst, byte);
                              continue;
                          }
                          let mapped = if c == '\u{2212}' {
                              '\u{FF0D}'
                          } else if let Some(bmp) = iso_2022_jp_katakana(c) {
                              ::std::char::from_u32(bmp as u32).unwrap_or(c)
                          } else {
                              c
                          };
                          let pointer = match jis0208_encode(mapped) {
                              Some(pointer) => pointer,
                              None => {
                                  if self.state == Iso2022JpEncoderState::Jis0208 {
                                      // The replacement is written in ASCII.
                                      if !dst.write_all(&ESCAPE_ASCII[..]) {
                                          src.unread();
                                          return EncoderResult::OutputFull;
                                      }
                                      self.state = Iso2022JpEncoderState::Ascii;
                                  }
                                  return EncoderResult::Unmappable(c);
                              }
                          };
                          if self.state != Iso2022JpEncoderState::Jis0208 {
                              if !dst.write_all(&ESCAPE_JIS0208[..]) {
                                  src.unread();
                                  return EncoderResult::OutputFull;
                              }
                              self.state = Iso2022JpEncoderState::Jis0208;
                          }
                          let lead = (pointer / 94) + 0x21;
                          let trail = (pointer % 94) + 0x21;
                          write_two_or_unread!(src, dst, lead as u8, trail as u8);
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

    fn decode_iso_2022_jp(bytes: &[u8], expect: &str) {
        decode(ISO_2022_JP, bytes, expect);
    }

    fn encode_iso_2022_jp(string: &str, expect: &[u8]) {
        encode(ISO_2022_JP, string, expect);
    }

    #[test]
    fn test_iso_2022_jp_decode() {
        // Empty
        decode_iso_2022_jp(b"", &"");

        // ASCII
        decode_iso_2022_jp(b"\x61\x62", "\u{0061}\u{0062}");
        decode_iso_2022_jp(b"\x7F\x0E\x0F", "\u{007F}\u{FFFD}\u{FFFD}");

        // Partial escapes
        decode_iso_2022_jp(b"\x1B", "\u{FFFD}");
        decode_iso_2022_jp(b"\x1B$", "\u{FFFD}$");
        decode_iso_2022_jp(b"\x1B(", "\u{FFFD}(");
        decode_iso_2022_jp(b"\x1B.", "\u{FFFD}.");

        // ISO escapes
        decode_iso_2022_jp(b"\x1B(B", ""); // ASCII
        decode_iso_2022_jp(b"\x1B(J", ""); // Roman
        decode_iso_2022_jp(b"\x1B$@", ""); // 0208
        decode_iso_2022_jp(b"\x1B$B", ""); // 0208
        decode_iso_2022_jp(b"\x1B$(D", "\u{FFFD}$(D"); // 2012
        decode_iso_2022_jp(b"\x1B$A", "\u{FFFD}$A"); // GB2312
        decode_iso_2022_jp(b"\x1B$(C", "\u{FFFD}$(C"); // KSC5601
        decode_iso_2022_jp(b"\x1B.A", "\u{FFFD}.A"); // 8859-1
        decode_iso_2022_jp(b"\x1B.F", "\u{FFFD}.F"); // 8859-7
        decode_iso_2022_jp(b"\x1B(I", ""); // Katakana
        decode_iso_2022_jp(b"\x1B(B\x1B(J", "\u{FFFD}");

        // Roman
        decode_iso_2022_jp(b"\x1B(J\x61\x5C\x7E\x7F", "\u{0061}\u{00A5}\u{203E}\u{007F}");
        decode_iso_2022_jp(b"\x1B(J\x0E\x0F\x80", "\u{FFFD}\u{FFFD}\u{FFFD}");

        // Katakana
        decode_iso_2022_jp(b"\x1B(I\x21\x5F", "\u{FF61}\u{FF9F}");
        decode_iso_2022_jp(b"\x1B(I\x20\x60", "\u{FFFD}\u{FFFD}");
        decode_iso_2022_jp(b"\x1B(I\x1B(", "\u{FFFD}\u{FF68}");

        // Jis0208
        decode_iso_2022_jp(b"\x1B$B\x21\x21", "\u{3000}");
        decode_iso_2022_jp(b"\x1B$@\x21\x21", "\u{3000}");
        decode_iso_2022_jp(b"\x1B$B\x24\x22", "\u{3042}");
        decode_iso_2022_jp(b"\x1B$B\x7E\x7E", "\u{FFFD}");
        decode_iso_2022_jp(b"\x1B$B\x21\x21\x1B(B\x61", "\u{3000}\u{0061}");
        decode_iso_2022_jp(b"\x1B$B\x21\x80", "\u{FFFD}");
        decode_iso_2022_jp(b"\x1B$B\x21", "\u{FFFD}");
        decode_iso_2022_jp(b"\x1B$B\x21\x1B(Ba", "\u{FFFD}a");
        decode_iso_2022_jp(b"\x1B$B\x0A", "\u{FFFD}");
        decode_iso_2022_jp(b"\x1B$B\x1B$", "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_iso_2022_jp_decode_malformed_lengths() {
        let mut decoder = ISO_2022_JP.new_decoder_without_bom_handling();
        let mut dst = [0u16; 8];
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x1B(B\x1B(J", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(3, 3));
        assert_eq!(read, 6);
        assert_eq!(written, 0);
        assert_eq!(result.malformed_start(read), Some(0));
        let (result, read, _) = decoder.decode_to_utf16_without_replacement(b"\x1B(X", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(1, 1));
        assert_eq!(read, 2);
        // The prepended '(' is in Roman, then 'X' is read again.
        let (result, read, written) = decoder.decode_to_utf16_without_replacement(b"X", &mut dst[..], false);
        assert_eq!(result, DecoderResult::InputEmpty);
        assert_eq!(read, 1);
        assert_eq!(&dst[..written], &[0x0028u16, 0x0058u16][..]);
    }

    #[test]
    fn test_iso_2022_jp_encode() {
        // Empty
        encode_iso_2022_jp("", b"");

        // ASCII
        encode_iso_2022_jp("ab", b"ab");
        encode_iso_2022_jp("\u{1F4A9}", b"?");
        encode_iso_2022_jp("\x1B", b"?");
        encode_iso_2022_jp("\x0E", b"?");
        encode_iso_2022_jp("\x0F", b"?");

        // Roman
        encode_iso_2022_jp("a\u{00A5}b", b"a\x1B(J\x5Cb\x1B(B");
        encode_iso_2022_jp("a\u{203E}b", b"a\x1B(J\x7Eb\x1B(B");
        encode_iso_2022_jp("a\u{00A5}b\x5C", b"a\x1B(J\x5Cb\x1B(B\x5C");
        encode_iso_2022_jp("a\u{00A5}b\x7E", b"a\x1B(J\x5Cb\x1B(B\x7E");
        encode_iso_2022_jp("\u{00A5}\u{1F4A9}", b"\x1B(J\x5C?\x1B(B");
        encode_iso_2022_jp("\u{00A5}\x1B", b"\x1B(J\x5C?\x1B(B");
        encode_iso_2022_jp("\u{00A5}\x0E", b"\x1B(J\x5C?\x1B(B");
        encode_iso_2022_jp("\u{00A5}\x0F", b"\x1B(J\x5C?\x1B(B");

        // Half-width Katakana
        encode_iso_2022_jp("\u{FF61}", b"\x1B$B\x21\x23\x1B(B");
        encode_iso_2022_jp("\u{FF65}", b"\x1B$B\x21\x26\x1B(B");
        encode_iso_2022_jp("\u{FF66}", b"\x1B$B\x25\x72\x1B(B");
        encode_iso_2022_jp("\u{FF70}", b"\x1B$B\x21\x3C\x1B(B");
        encode_iso_2022_jp("\u{FF9D}", b"\x1B$B\x25\x73\x1B(B");
        encode_iso_2022_jp("\u{FF9E}", b"\x1B$B\x21\x2B\x1B(B");
        encode_iso_2022_jp("\u{FF9F}", b"\x1B$B\x21\x2C\x1B(B");

        // 0208
        encode_iso_2022_jp("\u{58CA}", b"\x1B$B\x32\x75\x1B(B");
        encode_iso_2022_jp("\u{58CA}\u{FF61}", b"\x1B$B\x32\x75\x21\x23\x1B(B");
        encode_iso_2022_jp("\u{58CA}\u{1F4A9}", b"\x1B$B\x32\x75\x1B(B?");
        encode_iso_2022_jp("\u{58CA}\x1B", b"\x1B$B\x32\x75\x1B(B?");
        encode_iso_2022_jp("\u{58CA}\x0E", b"\x1B$B\x32\x75\x1B(B?");
        encode_iso_2022_jp("\u{58CA}\x0F", b"\x1B$B\x32\x75\x1B(B?");
        encode_iso_2022_jp("\u{58CA}\u{00A5}", b"\x1B$B\x32\x75\x1B(J\x5C\x1B(B");
        encode_iso_2022_jp("\u{58CA}a", b"\x1B$B\x32\x75\x1B(Ba");
        encode_iso_2022_jp("\u{2212}", b"\x1B$B\x21\x5D\x1B(B");
    }

    #[test]
    fn test_iso_2022_jp_unmappable_control() {
        let mut encoder = ISO_2022_JP.new_encoder();
        let mut dst = [0u8; 8];
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement("a\x1Bb", &mut dst[..], true);
        assert_eq!(result, EncoderResult::Unmappable('\u{1B}'));
        assert_eq!(read, 2);
        assert_eq!(written, 1);
        assert_eq!(result.unmappable_start_utf8(read), Some(1));
    }

    #[test]
    fn test_iso_2022_jp_escape_and_char_need_room_separately() {
        let mut encoder = ISO_2022_JP.new_encoder();
        let mut dst = [0u8; 4];
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement("\u{3042}", &mut dst[..], false);
        assert_eq!(result, EncoderResult::OutputFull);
        assert_eq!(read, 0);
        assert_eq!(&dst[..written], b"\x1B$B");
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement("\u{3042}", &mut dst[..], false);
        assert_eq!(result, EncoderResult::InputEmpty);
        assert_eq!(read, 3);
        assert_eq!(&dst[..written], b"\x24\x22");
        let mut short = [0u8; 2];
        let (result, _, written) = encoder.encode_from_utf8_without_replacement("", &mut short[..], true);
        assert_eq!(result, EncoderResult::OutputFull);
        assert_eq!(written, 0);
        let (result, _, written) = encoder.encode_from_utf8_without_replacement("", &mut dst[..], true);
        assert_eq!(result, EncoderResult::InputEmpty);
        assert_eq!(&dst[..written], b"\x1B(B");
    }
}
