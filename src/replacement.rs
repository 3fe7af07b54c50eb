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

pub struct ReplacementDecoder {
    emitted: bool,
}

impl ReplacementDecoder {
    pub fn new() -> VariantDecoder {
        VariantDecoder::Replacement(ReplacementDecoder { emitted: false })
    }

    pub fn max_utf16_buffer_length(&self, _byte_length: usize) -> Option<usize> {
        Some(1)
    }

    pub fn max_utf8_buffer_length_without_replacement(&self, _byte_length: usize) -> Option<usize> {
        Some(0)
    }

    pub fn max_utf8_buffer_length(&self, _byte_length: usize) -> Option<usize> {
        Some(3)
    }

    pub fn decode<D: UnicodeDestination>(&mut self,
                                         src: &mut ByteSource,
                                         _dst: &mut D,
                                         _last: bool)
                                         -> DecoderResult {
        let remaining = src.remaining().len();
        // Don't err if the input stream is empty. See
        // https://github.com/whatwg/encoding/issues/33
        if self.emitted || remaining == 0 {
            src.skip(remaining);
            return DecoderResult::InputEmpty;
        }
        self.emitted = true;
        src.skip(1);
        DecoderResult::Malformed(1, 0)
    }
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use crate::testing::*;
    use crate::*;

    #[test]
    fn test_replacement_decode() {
        decode(REPLACEMENT, b"", "");
        decode(REPLACEMENT, b"A", "\u{FFFD}");
        decode(REPLACEMENT, b"AB", "\u{FFFD}");
        decode(REPLACEMENT, b"\xFF\xFE\x00", "\u{FFFD}");
    }

    #[test]
    fn test_replacement_without_replacement() {
        let mut decoder = REPLACEMENT.new_decoder_without_bom_handling();
        let mut dst = [0u8; 4];
        let (result, read, written) = decoder.decode_to_utf8_without_replacement(b"abc", &mut dst[..], false);
        assert_eq!(result, DecoderResult::Malformed(1, 0));
        assert_eq!(read, 1);
        assert_eq!(written, 0);
        let (result, read, written) = decoder.decode_to_utf8_without_replacement(b"bc", &mut dst[..], true);
        assert_eq!(result, DecoderResult::InputEmpty);
        assert_eq!(read, 2);
        assert_eq!(written, 0);
    }

    #[test]
    fn test_replacement_encode() {
        assert_eq!(REPLACEMENT.new_encoder().encoding(), UTF_8);
        encode(REPLACEMENT, "\u{E4}", "\u{E4}".as_bytes());
    }
}
