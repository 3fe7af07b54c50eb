// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides enums that wrap the various decoders and encoders.
//! The purpose is to make `Decoder` and `Encoder` `Sized` by writing the
//! dispatch explicitly for a finite set of specialized decoders and encoders.
//! The match arms are generated by `variant_decoder_dispatch!` and
//! `variant_encoder_dispatch!` so that adding a family touches one place.
//!
//! The purpose of making `Decoder` and `Encoder` `Sized` is to allow stack
//! allocation in Rust code, including the convenience methods on `Encoding`.

use crate::big5::*;
use crate::euc_jp::*;
use crate::euc_kr::*;
use crate::gb18030::*;
use crate::handles::*;
use crate::iso_2022_jp::*;
use crate::replacement::*;
use crate::shift_jis::*;
use crate::single_byte::*;
use crate::utf_16::*;
use crate::utf_8::*;
use crate::x_user_defined::*;
use crate::{DecoderResult, EncoderResult};

pub enum VariantDecoder {
    SingleByte(SingleByteDecoder),
    Utf8(Utf8Decoder),
    Gb18030(Gb18030Decoder),
    Big5(Big5Decoder),
    EucJp(EucJpDecoder),
    Iso2022Jp(Iso2022JpDecoder),
    ShiftJis(ShiftJisDecoder),
    EucKr(EucKrDecoder),
    Replacement(ReplacementDecoder),
    UserDefined(UserDefinedDecoder),
    Utf16(Utf16Decoder),
}

impl VariantDecoder {
    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        variant_decoder_dispatch!(self, d => d.max_utf16_buffer_length(byte_length))
    }

    pub fn max_utf8_buffer_length_without_replacement(&self,
                                                      byte_length: usize)
                                                      -> Option<usize> {
        variant_decoder_dispatch!(self,
                                  d => d.max_utf8_buffer_length_without_replacement(byte_length))
    }

    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        variant_decoder_dispatch!(self, d => d.max_utf8_buffer_length(byte_length))
    }

    pub fn decode<D: UnicodeDestination>(&mut self,
                                         src: &mut ByteSource,
                                         dst: &mut D,
                                         last: bool)
                                         -> DecoderResult {
        variant_decoder_dispatch!(self, d => d.decode(src, dst, last))
    }
}

pub enum VariantEncoder {
    SingleByte(SingleByteEncoder),
    Utf8(Utf8Encoder),
    Gb18030(Gb18030Encoder),
    Big5(Big5Encoder),
    EucJp(EucJpEncoder),
    Iso2022Jp(Iso2022JpEncoder),
    ShiftJis(ShiftJisEncoder),
    EucKr(EucKrEncoder),
    UserDefined(UserDefinedEncoder),
}

impl VariantEncoder {
    pub fn max_buffer_length_from_utf16_without_replacement(&self,
                                                            u16_length: usize)
                                                            -> Option<usize> {
        variant_encoder_dispatch!(self,
                                  e => e.max_buffer_length_from_utf16_without_replacement(u16_length))
    }

    pub fn max_buffer_length_from_utf8_without_replacement(&self,
                                                           byte_length: usize)
                                                           -> Option<usize> {
        variant_encoder_dispatch!(self,
                                  e => e.max_buffer_length_from_utf8_without_replacement(byte_length))
    }

    pub fn encode<S: UnicodeSource>(&mut self,
                                    src: &mut S,
                                    dst: &mut ByteDestination,
                                    last: bool)
                                    -> EncoderResult {
        variant_encoder_dispatch!(self, e => e.encode(src, dst, last))
    }
}

/// What an `Encoding` is, as far as instantiating codecs goes.
pub enum VariantEncoding {
    SingleByte(&'static [u16; 128]),
    Utf8,
    Gbk,
    Gb18030,
    Big5,
    EucJp,
    Iso2022Jp,
    ShiftJis,
    EucKr,
    Replacement,
    Utf16Be,
    Utf16Le,
    UserDefined,
}

impl VariantEncoding {
    pub fn new_variant_decoder(&self) -> VariantDecoder {
        match *self {
            VariantEncoding::SingleByte(table) => SingleByteDecoder::new(table),
            VariantEncoding::Utf8 => Utf8Decoder::new(),
            VariantEncoding::Gbk | VariantEncoding::Gb18030 => Gb18030Decoder::new(),
            VariantEncoding::Big5 => Big5Decoder::new(),
            VariantEncoding::EucJp => EucJpDecoder::new(),
            VariantEncoding::Iso2022Jp => Iso2022JpDecoder::new(),
            VariantEncoding::ShiftJis => ShiftJisDecoder::new(),
            VariantEncoding::EucKr => EucKrDecoder::new(),
            VariantEncoding::Replacement => ReplacementDecoder::new(),
            VariantEncoding::UserDefined => UserDefinedDecoder::new(),
            VariantEncoding::Utf16Be => Utf16Decoder::new(true),
            VariantEncoding::Utf16Le => Utf16Decoder::new(false),
        }
    }

    /// Encodings that only decode get the UTF-8 encoder, matching their
    /// output encoding.
    pub fn new_variant_encoder(&self) -> VariantEncoder {
        match *self {
            VariantEncoding::SingleByte(table) => SingleByteEncoder::new(table),
            VariantEncoding::Utf8 |
            VariantEncoding::Replacement |
            VariantEncoding::Utf16Be |
            VariantEncoding::Utf16Le => Utf8Encoder::new(),
            VariantEncoding::Gbk => Gb18030Encoder::new(false),
            VariantEncoding::Gb18030 => Gb18030Encoder::new(true),
            VariantEncoding::Big5 => Big5Encoder::new(),
            VariantEncoding::EucJp => EucJpEncoder::new(),
            VariantEncoding::Iso2022Jp => Iso2022JpEncoder::new(),
            VariantEncoding::ShiftJis => ShiftJisEncoder::new(),
            VariantEncoding::EucKr => EucKrEncoder::new(),
            VariantEncoding::UserDefined => UserDefinedEncoder::new(),
        }
    }
}
