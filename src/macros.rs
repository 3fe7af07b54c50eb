// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// The byte loop shared by the decoders. `$preamble` runs before each byte
/// (typically an ASCII fast path), `$eof` runs once the input is exhausted
/// when `last` is set and may return a malformed result, and `$body` sees
/// each byte together with a handle for unreading it.
macro_rules! decoder_loop {
    ($src:ident,
     $last:ident,
     $b:ident,
     $unread_handle:ident,
     $preamble:block,
     $eof:block,
     $body:block) => ({
        loop {
            {
                // Start non-boilerplate
                $preamble
                // End non-boilerplate
            }
            match $src.check_available() {
                Space::Full => {
                    if $last {
                        // Start non-boilerplate
                        $eof
                        // End non-boilerplate
                    }
                    return DecoderResult::InputEmpty;
                }
                Space::Available(source_handle) => {
                    #[allow(unused_variables)]
                    let ($b, $unread_handle) = source_handle.read();
                    // Start non-boilerplate
                    $body
                    // End non-boilerplate
                }
            }
        }
    });
}

/// The character loop shared by the encoders, shaped like `decoder_loop!`.
/// The source's `unread()` puts back the character that was just read.
macro_rules! encoder_loop {
    ($src:ident,
     $last:ident,
     $c:ident,
     $preamble:block,
     $eof:block,
     $body:block) => ({
        loop {
            {
                // Start non-boilerplate
                $preamble
                // End non-boilerplate
            }
            match $src.read() {
                None => {
                    if $last {
                        // Start non-boilerplate
                        $eof
                        // End non-boilerplate
                    }
                    return EncoderResult::InputEmpty;
                }
                Some($c) => {
                    // Start non-boilerplate
                    $body
                    // End non-boilerplate
                }
            }
        }
    });
}

/// Writes a decoded BMP code point, or unreads the byte that completed it
/// and reports `OutputFull`. Any state change must come after this.
macro_rules! write_bmp_or_unread {
    ($dst:ident, $bmp:expr, $unread_handle:ident) => (
        if !$dst.write_bmp($bmp) {
            $unread_handle.unread();
            return DecoderResult::OutputFull;
        }
    );
}

/// Like `write_bmp_or_unread!` for a whole `char`.
macro_rules! write_char_or_unread {
    ($dst:ident, $c:expr, $unread_handle:ident) => (
        if !$dst.write_char($c) {
            $unread_handle.unread();
            return DecoderResult::OutputFull;
        }
    );
}

/// Writes one byte for an encoded character or unreads the character.
macro_rules! write_one_or_unread {
    ($src:ident, $dst:ident, $byte:expr) => (
        match $dst.check_space_one() {
            Space::Full => {
                $src.unread();
                return EncoderResult::OutputFull;
            }
            Space::Available(destination_handle) => {
                destination_handle.write_one($byte);
            }
        }
    );
}

/// Writes two bytes for an encoded character or unreads the character.
macro_rules! write_two_or_unread {
    ($src:ident, $dst:ident, $first:expr, $second:expr) => (
        match $dst.check_space_two() {
            Space::Full => {
                $src.unread();
                return EncoderResult::OutputFull;
            }
            Space::Available(destination_handle) => {
                destination_handle.write_two($first, $second);
            }
        }
    );
}

macro_rules! variant_decoder_dispatch {
    ($slf:expr, $d:ident => $body:expr) => (
        match $slf {
            VariantDecoder::SingleByte($d) => $body,
            VariantDecoder::Utf8($d) => $body,
            VariantDecoder::Gb18030($d) => $body,
            VariantDecoder::Big5($d) => $body,
            VariantDecoder::EucJp($d) => $body,
            VariantDecoder::Iso2022Jp($d) => $body,
            VariantDecoder::ShiftJis($d) => $body,
            VariantDecoder::EucKr($d) => $body,
            VariantDecoder::Replacement($d) => $body,
            VariantDecoder::UserDefined($d) => $body,
            VariantDecoder::Utf16($d) => $body,
        }
    );
}

macro_rules! variant_encoder_dispatch {
    ($slf:expr, $e:ident => $body:expr) => (
        match $slf {
            VariantEncoder::SingleByte($e) => $body,
            VariantEncoder::Utf8($e) => $body,
            VariantEncoder::Gb18030($e) => $body,
            VariantEncoder::Big5($e) => $body,
            VariantEncoder::EucJp($e) => $body,
            VariantEncoder::Iso2022Jp($e) => $body,
            VariantEncoder::ShiftJis($e) => $body,
            VariantEncoder::EucKr($e) => $body,
            VariantEncoder::UserDefined($e) => $body,
        }
    );
}
