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
use crate::DecoderResult;

pub struct Utf16Decoder {
    lead_byte: Option<u8>,
    lead_surrogate: u16, // zero when none
    // A unit that followed an unpaired high surrogate. It is written out
    // before anything else on the next turn of the loop.
    pending_unit: Option<u16>,
    big_endian: bool,
}

impl Utf16Decoder {
    pub fn new(big_endian: bool) -> VariantDecoder {
        VariantDecoder::Utf16(Utf16Decoder {
            lead_byte: None,
            lead_surrogate: 0,
            pending_unit: None,
            big_endian: big_endian,
        })
    }

    fn max_units(&self, byte_length: usize) -> Option<usize> {
        let bytes = byte_length.checked_add(if self.lead_byte.is_some() { 1 } else { 0 })?;
        let units = (bytes / 2) + (bytes % 2);
        let held = if self.lead_surrogate != 0 || self.pending_unit.is_some() {
            1
        } else {
            0
        };
        units.checked_add(held)
    }

    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.max_units(byte_length)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        self.max_units(byte_length)?.checked_mul(3)
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.max_units(byte_length)?.checked_mul(3)
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
                          if let Some(unit) = self.pending_unit {
                              if !dst.write_bmp(unit) {
                                  return DecoderResult::OutputFull;
                              }
                              self.pending_unit = None;
                          }
                      },
                      {
                          debug_assert!(self.pending_unit.is_none());
                          if self.lead_byte.is_some() || self.lead_surrogate != 0 {
                              let surrogate_bytes: u8 = if self.lead_surrogate != 0 { 2 } else { 0 };
                              let lead_bytes: u8 = if self.lead_byte.is_some() { 1 } else { 0 };
                              let bad_bytes = surrogate_bytes + lead_bytes;
                              self.lead_byte = None;
                              self.lead_surrogate = 0;
                              return DecoderResult::Malformed(bad_bytes, 0);
                          }
                      },
                      {
                          let lead = match self.lead_byte {
                              None => {
                                  self.lead_byte = Some(b);
                                  continue;
                              }
                              Some(lead) => lead,
                          };
                          self.lead_byte = None;
                          let unit = if self.big_endian {
                              ((lead as u16) << 8) | b as u16
                          } else {
                              ((b as u16) << 8) | lead as u16
                          };
                          match unit & 0xFC00 {
                              0xD800 => {
                                  if self.lead_surrogate != 0 {
                                      // The earlier high surrogate is in
                                      // error and this one waits for its
                                      // low half.
                                      self.lead_surrogate = unit;
                                      return DecoderResult::Malformed(2, 2);
                                  }
                                  self.lead_surrogate = unit;
                                  continue;
                              }
                              0xDC00 => {
                                  if self.lead_surrogate == 0 {
                                      return DecoderResult::Malformed(2, 0);
                                  }
                                  let high = self.lead_surrogate;
                                  let astral = 0x10000u32 + (((high as u32) & 0x3FF) << 10) +
                                               ((unit as u32) & 0x3FF);
                                  let c = ::std::char::from_u32(astral).unwrap_or('\u{FFFD}');
                                  if !dst.write_char(c) {
                                      // Both bytes of the unit are read again.
                                      self.lead_byte = Some(lead);
                                      unread_handle.unread();
                                      return DecoderResult::OutputFull;
                                  }
                                  self.lead_surrogate = 0;
                                  continue;
                              }
                              _ => {
                                  if self.lead_surrogate != 0 {
                                      self.lead_surrogate = 0;
                                      self.pending_unit = Some(unit);
                                      return DecoderResult::Malformed(2, 2);
                                  }
                                  if !dst.write_bmp(unit) {
                                      self.lead_byte = Some(lead);
                                      unread_handle.unread();
                                      return DecoderResult::OutputFull;
                                  }
                                  continue;
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
    fn test_utf_16le_decode() {
        decode(UTF_16LE, b"", "");
        decode(UTF_16LE, b"a\x00b\x00", "ab");
        decode(UTF_16LE, b"\x3D\xD8\xA9\xDC", "\u{1F4A9}");
        // Odd trailing byte
        decode(UTF_16LE, b"a\x00b", "a\u{FFFD}");
        // Unpaired high surrogate followed by BMP
        decode(UTF_16LE, b"\x3D\xD8a\x00", "\u{FFFD}a");
        // Unpaired high surrogate followed by another high surrogate
        decode(UTF_16LE, b"\x3D\xD8\x3D\xD8\xA9\xDC", "\u{FFFD}\u{1F4A9}");
        // Unpaired low surrogate
        decode(UTF_16LE, b"\xA9\xDCa\x00", "\u{FFFD}a");
        // High surrogate then odd byte at the end is one error
        decode(UTF_16LE, b"\x3D\xD8\xA9", "\u{FFFD}");
        decode(UTF_16LE, b"\x3D\xD8\x03\x26", "\u{FFFD}\u{2603}");
        decode(UTF_16LE, b"\x00\xD8\x00\x00", "\u{FFFD}\u{0000}");
    }

    #[test]
    fn test_utf_16be_decode() {
        decode(UTF_16BE, b"\x00a\x00b", "ab");
        decode(UTF_16BE, b"\xD8\x3D\xDC\xA9", "\u{1F4A9}");
        decode(UTF_16BE, b"\xD8\x3D", "\u{FFFD}");
        decode(UTF_16BE, b"\x30\x42", "\u{3042}");
    }

    #[test]
    fn test_utf_16_malformed_offsets() {
        let mut decoder = UTF_16LE.new_decoder_without_bom_handling();
        let mut dst = [0u16; 8];
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"z\x00\x3D\xD8a\x00", &mut dst[..], true);
        assert_eq!(result, DecoderResult::Malformed(2, 2));
        assert_eq!(read, 6);
        assert_eq!(written, 1);
        assert_eq!(result.malformed_start(read), Some(2));
        // The unit after the bad surrogate is held, not read again.
        let (result, read, written) = decoder.decode_to_utf16_without_replacement(b"", &mut dst[..], true);
        assert_eq!(result, DecoderResult::InputEmpty);
        assert_eq!(read, 0);
        assert_eq!(&dst[..written], &[0x0061u16][..]);
    }

    #[test]
    fn test_utf_16_unpaired_high_surrogate_across_calls() {
        let mut decoder = UTF_16LE.new_decoder_without_bom_handling();
        let mut dst = [0u16; 8];
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x00\xD8", &mut dst[..], false);
        assert_eq!((result, read, written), (DecoderResult::InputEmpty, 2, 0));
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x41\x00", &mut dst[..], false);
        assert_eq!((result, read, written), (DecoderResult::Malformed(2, 2), 2, 0));
        // The sequence began in the previous buffer.
        assert_eq!(result.malformed_start(read), Some(0));
        let mut empty = [0u16; 0];
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x42\x00", &mut empty[..], true);
        assert_eq!((result, read, written), (DecoderResult::OutputFull, 0, 0));
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\x42\x00", &mut dst[..], true);
        assert_eq!((result, read), (DecoderResult::InputEmpty, 2));
        assert_eq!(&dst[..written], &[0x0041u16, 0x0042u16][..]);
    }

    #[test]
    fn test_utf_16_high_surrogate_after_high_surrogate() {
        let mut decoder = UTF_16BE.new_decoder_without_bom_handling();
        let mut dst = [0u16; 8];
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\xD8\x3D\xD8\x3D\xDC\xA9", &mut dst[..], true);
        assert_eq!((result, read, written), (DecoderResult::Malformed(2, 2), 4, 0));
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(b"\xDC\xA9", &mut dst[..], true);
        assert_eq!((result, read), (DecoderResult::InputEmpty, 2));
        assert_eq!(&dst[..written], &[0xD83Du16, 0xDCA9u16][..]);
    }

    #[test]
    fn test_utf_16_encodes_as_utf_8() {
        encode(UTF_16LE, "\u{1F4A9}", "\u{1F4A9}".as_bytes());
        encode(UTF_16BE, "a", b"a");
    }
}
