// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! charconv converts between the character encodings of the Web and
//! Unicode (UTF-8 or UTF-16), incrementally.
//!
//! Start from an `Encoding`, which you obtain from a label (`for_label()`),
//! a canonical name (`for_name()`), a byte order mark (`for_bom()`) or one
//! of the statics such as `UTF_8` and `SHIFT_JIS`. An `Encoding` hands out
//! `Decoder`s and `Encoder`s. Those are fed caller-allocated input and
//! output buffers one chunk at a time, with `last` set on the final chunk,
//! and report how much they read and wrote.
//!
//! ```
//! use charconv::*;
//!
//! let mut decoder = SHIFT_JIS.new_decoder();
//! let bytes = b"\x83n\x83\x8D\x81[\x81E\x83\x8F\x81[\x83\x8B\x83h";
//! let mut string = String::with_capacity(decoder.max_utf8_buffer_length(bytes.len()).unwrap());
//! let (result, read, had_errors) = decoder.decode_to_string(bytes, &mut string, true);
//! assert_eq!(result, CoderResult::InputEmpty);
//! assert_eq!(read, bytes.len());
//! assert!(!had_errors);
//! assert_eq!(string, "\u{30CF}\u{30ED}\u{30FC}\u{30FB}\u{30EF}\u{30FC}\u{30EB}\u{30C9}");
//! ```
//!
//! For whole buffers there are the convenience methods `Encoding::decode()`
//! and `Encoding::encode()`, and for `std::io` streams the adapters in the
//! `io` module.

#[macro_use]
mod macros;

mod ascii;
mod big5;
mod data;
mod euc_jp;
mod euc_kr;
mod gb18030;
mod handles;
mod index;
mod iso_2022_jp;
mod replacement;
mod shift_jis;
mod single_byte;
mod utf_16;
mod utf_8;
mod variant;
mod x_user_defined;

pub mod io;
pub mod mem;

#[cfg(test)]
mod testing;

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ascii::ascii_valid_up_to;
use crate::handles::*;
use crate::variant::*;

// BEGIN GENERATED CODE. PLEASE DO NOT EDIT.
// Instead, please regenerate using generate-encoding-data.py

const LONGEST_LABEL_LENGTH: usize = 19; // cseucpkdfmtjapanese

/// The initializer for the Big5 encoding.
///
/// Use `BIG5` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static BIG5_INIT: Encoding = Encoding {
    name: "Big5",
    variant: VariantEncoding::Big5,
};

/// The Big5 encoding.
pub static BIG5: &'static Encoding = &BIG5_INIT;

/// The initializer for the EUC-JP encoding.
///
/// Use `EUC_JP` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static EUC_JP_INIT: Encoding = Encoding {
    name: "EUC-JP",
    variant: VariantEncoding::EucJp,
};

/// The EUC-JP encoding.
pub static EUC_JP: &'static Encoding = &EUC_JP_INIT;

/// The initializer for the EUC-KR encoding.
///
/// Use `EUC_KR` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static EUC_KR_INIT: Encoding = Encoding {
    name: "EUC-KR",
    variant: VariantEncoding::EucKr,
};

/// The EUC-KR encoding.
pub static EUC_KR: &'static Encoding = &EUC_KR_INIT;

/// The initializer for the gb18030 encoding.
///
/// Use `GB18030` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static GB18030_INIT: Encoding = Encoding {
    name: "gb18030",
    variant: VariantEncoding::Gb18030,
};

/// The gb18030 encoding.
pub static GB18030: &'static Encoding = &GB18030_INIT;

/// The initializer for the GBK encoding.
///
/// Use `GBK` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static GBK_INIT: Encoding = Encoding {
    name: "GBK",
    variant: VariantEncoding::Gbk,
};

/// The GBK encoding.
pub static GBK: &'static Encoding = &GBK_INIT;

/// The initializer for the IBM866 encoding.
///
/// Use `IBM866` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static IBM866_INIT: Encoding = Encoding {
    name: "IBM866",
    variant: VariantEncoding::SingleByte(&data::IBM866_DATA),
};

/// The IBM866 encoding.
pub static IBM866: &'static Encoding = &IBM866_INIT;

/// The initializer for the ISO-2022-JP encoding.
///
/// Use `ISO_2022_JP` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_2022_JP_INIT: Encoding = Encoding {
    name: "ISO-2022-JP",
    variant: VariantEncoding::Iso2022Jp,
};

/// The ISO-2022-JP encoding.
pub static ISO_2022_JP: &'static Encoding = &ISO_2022_JP_INIT;

/// The initializer for the ISO-8859-10 encoding.
///
/// Use `ISO_8859_10` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_10_INIT: Encoding = Encoding {
    name: "ISO-8859-10",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_10_DATA),
};

/// The ISO-8859-10 encoding.
pub static ISO_8859_10: &'static Encoding = &ISO_8859_10_INIT;

/// The initializer for the ISO-8859-13 encoding.
///
/// Use `ISO_8859_13` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_13_INIT: Encoding = Encoding {
    name: "ISO-8859-13",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_13_DATA),
};

/// The ISO-8859-13 encoding.
pub static ISO_8859_13: &'static Encoding = &ISO_8859_13_INIT;

/// The initializer for the ISO-8859-14 encoding.
///
/// Use `ISO_8859_14` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_14_INIT: Encoding = Encoding {
    name: "ISO-8859-14",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_14_DATA),
};

/// The ISO-8859-14 encoding.
pub static ISO_8859_14: &'static Encoding = &ISO_8859_14_INIT;

/// The initializer for the ISO-8859-15 encoding.
///
/// Use `ISO_8859_15` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_15_INIT: Encoding = Encoding {
    name: "ISO-8859-15",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_15_DATA),
};

/// The ISO-8859-15 encoding.
pub static ISO_8859_15: &'static Encoding = &ISO_8859_15_INIT;

/// The initializer for the ISO-8859-16 encoding.
///
/// Use `ISO_8859_16` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_16_INIT: Encoding = Encoding {
    name: "ISO-8859-16",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_16_DATA),
};

/// The ISO-8859-16 encoding.
pub static ISO_8859_16: &'static Encoding = &ISO_8859_16_INIT;

/// The initializer for the ISO-8859-2 encoding.
///
/// Use `ISO_8859_2` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_2_INIT: Encoding = Encoding {
    name: "ISO-8859-2",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_2_DATA),
};

/// The ISO-8859-2 encoding.
pub static ISO_8859_2: &'static Encoding = &ISO_8859_2_INIT;

/// The initializer for the ISO-8859-3 encoding.
///
/// Use `ISO_8859_3` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_3_INIT: Encoding = Encoding {
    name: "ISO-8859-3",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_3_DATA),
};

/// The ISO-8859-3 encoding.
pub static ISO_8859_3: &'static Encoding = &ISO_8859_3_INIT;

/// The initializer for the ISO-8859-4 encoding.
///
/// Use `ISO_8859_4` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_4_INIT: Encoding = Encoding {
    name: "ISO-8859-4",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_4_DATA),
};

/// The ISO-8859-4 encoding.
pub static ISO_8859_4: &'static Encoding = &ISO_8859_4_INIT;

/// The initializer for the ISO-8859-5 encoding.
///
/// Use `ISO_8859_5` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_5_INIT: Encoding = Encoding {
    name: "ISO-8859-5",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_5_DATA),
};

/// The ISO-8859-5 encoding.
pub static ISO_8859_5: &'static Encoding = &ISO_8859_5_INIT;

/// The initializer for the ISO-8859-6 encoding.
///
/// Use `ISO_8859_6` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_6_INIT: Encoding = Encoding {
    name: "ISO-8859-6",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_6_DATA),
};

/// The ISO-8859-6 encoding.
pub static ISO_8859_6: &'static Encoding = &ISO_8859_6_INIT;

/// The initializer for the ISO-8859-7 encoding.
///
/// Use `ISO_8859_7` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_7_INIT: Encoding = Encoding {
    name: "ISO-8859-7",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_7_DATA),
};

/// The ISO-8859-7 encoding.
pub static ISO_8859_7: &'static Encoding = &ISO_8859_7_INIT;

/// The initializer for the ISO-8859-8 encoding.
///
/// Use `ISO_8859_8` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_8_INIT: Encoding = Encoding {
    name: "ISO-8859-8",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_8_DATA),
};

/// The ISO-8859-8 encoding.
pub static ISO_8859_8: &'static Encoding = &ISO_8859_8_INIT;

/// The initializer for the ISO-8859-8-I encoding.
///
/// Use `ISO_8859_8_I` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static ISO_8859_8_I_INIT: Encoding = Encoding {
    name: "ISO-8859-8-I",
    variant: VariantEncoding::SingleByte(&data::ISO_8859_8_DATA),
};

/// The ISO-8859-8-I encoding.
pub static ISO_8859_8_I: &'static Encoding = &ISO_8859_8_I_INIT;

/// The initializer for the KOI8-R encoding.
///
/// Use `KOI8_R` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static KOI8_R_INIT: Encoding = Encoding {
    name: "KOI8-R",
    variant: VariantEncoding::SingleByte(&data::KOI8_R_DATA),
};

/// The KOI8-R encoding.
pub static KOI8_R: &'static Encoding = &KOI8_R_INIT;

/// The initializer for the KOI8-U encoding.
///
/// Use `KOI8_U` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static KOI8_U_INIT: Encoding = Encoding {
    name: "KOI8-U",
    variant: VariantEncoding::SingleByte(&data::KOI8_U_DATA),
};

/// The KOI8-U encoding.
pub static KOI8_U: &'static Encoding = &KOI8_U_INIT;

/// The initializer for the macintosh encoding.
///
/// Use `MACINTOSH` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static MACINTOSH_INIT: Encoding = Encoding {
    name: "macintosh",
    variant: VariantEncoding::SingleByte(&data::MACINTOSH_DATA),
};

/// The macintosh encoding.
pub static MACINTOSH: &'static Encoding = &MACINTOSH_INIT;

/// The initializer for the replacement encoding.
///
/// Use `REPLACEMENT` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static REPLACEMENT_INIT: Encoding = Encoding {
    name: "replacement",
    variant: VariantEncoding::Replacement,
};

/// The replacement encoding.
pub static REPLACEMENT: &'static Encoding = &REPLACEMENT_INIT;

/// The initializer for the Shift_JIS encoding.
///
/// Use `SHIFT_JIS` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static SHIFT_JIS_INIT: Encoding = Encoding {
    name: "Shift_JIS",
    variant: VariantEncoding::ShiftJis,
};

/// The Shift_JIS encoding.
pub static SHIFT_JIS: &'static Encoding = &SHIFT_JIS_INIT;

/// The initializer for the UTF-16BE encoding.
///
/// Use `UTF_16BE` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static UTF_16BE_INIT: Encoding = Encoding {
    name: "UTF-16BE",
    variant: VariantEncoding::Utf16Be,
};

/// The UTF-16BE encoding.
pub static UTF_16BE: &'static Encoding = &UTF_16BE_INIT;

/// The initializer for the UTF-16LE encoding.
///
/// Use `UTF_16LE` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static UTF_16LE_INIT: Encoding = Encoding {
    name: "UTF-16LE",
    variant: VariantEncoding::Utf16Le,
};

/// The UTF-16LE encoding.
pub static UTF_16LE: &'static Encoding = &UTF_16LE_INIT;

/// The initializer for the UTF-8 encoding.
///
/// Use `UTF_8` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static UTF_8_INIT: Encoding = Encoding {
    name: "UTF-8",
    variant: VariantEncoding::Utf8,
};

/// The UTF-8 encoding.
pub static UTF_8: &'static Encoding = &UTF_8_INIT;

/// The initializer for the windows-1250 encoding.
///
/// Use `WINDOWS_1250` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1250_INIT: Encoding = Encoding {
    name: "windows-1250",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1250_DATA),
};

/// The windows-1250 encoding.
pub static WINDOWS_1250: &'static Encoding = &WINDOWS_1250_INIT;

/// The initializer for the windows-1251 encoding.
///
/// Use `WINDOWS_1251` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1251_INIT: Encoding = Encoding {
    name: "windows-1251",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1251_DATA),
};

/// The windows-1251 encoding.
pub static WINDOWS_1251: &'static Encoding = &WINDOWS_1251_INIT;

/// The initializer for the windows-1252 encoding.
///
/// Use `WINDOWS_1252` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1252_INIT: Encoding = Encoding {
    name: "windows-1252",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1252_DATA),
};

/// The windows-1252 encoding.
pub static WINDOWS_1252: &'static Encoding = &WINDOWS_1252_INIT;

/// The initializer for the windows-1253 encoding.
///
/// Use `WINDOWS_1253` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1253_INIT: Encoding = Encoding {
    name: "windows-1253",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1253_DATA),
};

/// The windows-1253 encoding.
pub static WINDOWS_1253: &'static Encoding = &WINDOWS_1253_INIT;

/// The initializer for the windows-1254 encoding.
///
/// Use `WINDOWS_1254` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1254_INIT: Encoding = Encoding {
    name: "windows-1254",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1254_DATA),
};

/// The windows-1254 encoding.
pub static WINDOWS_1254: &'static Encoding = &WINDOWS_1254_INIT;

/// The initializer for the windows-1255 encoding.
///
/// Use `WINDOWS_1255` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1255_INIT: Encoding = Encoding {
    name: "windows-1255",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1255_DATA),
};

/// The windows-1255 encoding.
pub static WINDOWS_1255: &'static Encoding = &WINDOWS_1255_INIT;

/// The initializer for the windows-1256 encoding.
///
/// Use `WINDOWS_1256` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1256_INIT: Encoding = Encoding {
    name: "windows-1256",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1256_DATA),
};

/// The windows-1256 encoding.
pub static WINDOWS_1256: &'static Encoding = &WINDOWS_1256_INIT;

/// The initializer for the windows-1257 encoding.
///
/// Use `WINDOWS_1257` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1257_INIT: Encoding = Encoding {
    name: "windows-1257",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1257_DATA),
};

/// The windows-1257 encoding.
pub static WINDOWS_1257: &'static Encoding = &WINDOWS_1257_INIT;

/// The initializer for the windows-1258 encoding.
///
/// Use `WINDOWS_1258` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_1258_INIT: Encoding = Encoding {
    name: "windows-1258",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_1258_DATA),
};

/// The windows-1258 encoding.
pub static WINDOWS_1258: &'static Encoding = &WINDOWS_1258_INIT;

/// The initializer for the windows-874 encoding.
///
/// Use `WINDOWS_874` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static WINDOWS_874_INIT: Encoding = Encoding {
    name: "windows-874",
    variant: VariantEncoding::SingleByte(&data::WINDOWS_874_DATA),
};

/// The windows-874 encoding.
pub static WINDOWS_874: &'static Encoding = &WINDOWS_874_INIT;

/// The initializer for the x-mac-cyrillic encoding.
///
/// Use `X_MAC_CYRILLIC` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static X_MAC_CYRILLIC_INIT: Encoding = Encoding {
    name: "x-mac-cyrillic",
    variant: VariantEncoding::SingleByte(&data::X_MAC_CYRILLIC_DATA),
};

/// The x-mac-cyrillic encoding.
pub static X_MAC_CYRILLIC: &'static Encoding = &X_MAC_CYRILLIC_INIT;

/// The initializer for the x-user-defined encoding.
///
/// Use `X_USER_DEFINED` in code; this `static` exists so that other statics can
/// refer to the encoding.
pub static X_USER_DEFINED_INIT: Encoding = Encoding {
    name: "x-user-defined",
    variant: VariantEncoding::UserDefined,
};

/// The x-user-defined encoding.
pub static X_USER_DEFINED: &'static Encoding = &X_USER_DEFINED_INIT;

static LABELS_SORTED: [&'static str; 228] = [
    "866",
    "ansi_x3.4-1968",
    "arabic",
    "ascii",
    "asmo-708",
    "big5",
    "big5-hkscs",
    "chinese",
    "cn-big5",
    "cp1250",
    "cp1251",
    "cp1252",
    "cp1253",
    "cp1254",
    "cp1255",
    "cp1256",
    "cp1257",
    "cp1258",
    "cp819",
    "cp866",
    "csbig5",
    "cseuckr",
    "cseucpkdfmtjapanese",
    "csgb2312",
    "csibm866",
    "csiso2022jp",
    "csiso2022kr",
    "csiso58gb231280",
    "csiso88596e",
    "csiso88596i",
    "csiso88598e",
    "csiso88598i",
    "csisolatin1",
    "csisolatin2",
    "csisolatin3",
    "csisolatin4",
    "csisolatin5",
    "csisolatin6",
    "csisolatin9",
    "csisolatinarabic",
    "csisolatincyrillic",
    "csisolatingreek",
    "csisolatinhebrew",
    "cskoi8r",
    "csksc56011987",
    "csmacintosh",
    "csshiftjis",
    "csunicode",
    "cyrillic",
    "dos-874",
    "ecma-114",
    "ecma-118",
    "elot_928",
    "euc-jp",
    "euc-kr",
    "gb18030",
    "gb2312",
    "gb_2312",
    "gb_2312-80",
    "gbk",
    "greek",
    "greek8",
    "hebrew",
    "hz-gb-2312",
    "ibm819",
    "ibm866",
    "iso-10646-ucs-2",
    "iso-2022-cn",
    "iso-2022-cn-ext",
    "iso-2022-jp",
    "iso-2022-kr",
    "iso-8859-1",
    "iso-8859-10",
    "iso-8859-11",
    "iso-8859-13",
    "iso-8859-14",
    "iso-8859-15",
    "iso-8859-16",
    "iso-8859-2",
    "iso-8859-3",
    "iso-8859-4",
    "iso-8859-5",
    "iso-8859-6",
    "iso-8859-6-e",
    "iso-8859-6-i",
    "iso-8859-7",
    "iso-8859-8",
    "iso-8859-8-e",
    "iso-8859-8-i",
    "iso-8859-9",
    "iso-ir-100",
    "iso-ir-101",
    "iso-ir-109",
    "iso-ir-110",
    "iso-ir-126",
    "iso-ir-127",
    "iso-ir-138",
    "iso-ir-144",
    "iso-ir-148",
    "iso-ir-149",
    "iso-ir-157",
    "iso-ir-58",
    "iso8859-1",
    "iso8859-10",
    "iso8859-11",
    "iso8859-13",
    "iso8859-14",
    "iso8859-15",
    "iso8859-2",
    "iso8859-3",
    "iso8859-4",
    "iso8859-5",
    "iso8859-6",
    "iso8859-7",
    "iso8859-8",
    "iso8859-9",
    "iso88591",
    "iso885910",
    "iso885911",
    "iso885913",
    "iso885914",
    "iso885915",
    "iso88592",
    "iso88593",
    "iso88594",
    "iso88595",
    "iso88596",
    "iso88597",
    "iso88598",
    "iso88599",
    "iso_8859-1",
    "iso_8859-15",
    "iso_8859-1:1987",
    "iso_8859-2",
    "iso_8859-2:1987",
    "iso_8859-3",
    "iso_8859-3:1988",
    "iso_8859-4",
    "iso_8859-4:1988",
    "iso_8859-5",
    "iso_8859-5:1988",
    "iso_8859-6",
    "iso_8859-6:1987",
    "iso_8859-7",
    "iso_8859-7:1987",
    "iso_8859-8",
    "iso_8859-8:1988",
    "iso_8859-9",
    "iso_8859-9:1989",
    "koi",
    "koi8",
    "koi8-r",
    "koi8-ru",
    "koi8-u",
    "koi8_r",
    "korean",
    "ks_c_5601-1987",
    "ks_c_5601-1989",
    "ksc5601",
    "ksc_5601",
    "l1",
    "l2",
    "l3",
    "l4",
    "l5",
    "l6",
    "l9",
    "latin1",
    "latin2",
    "latin3",
    "latin4",
    "latin5",
    "latin6",
    "logical",
    "mac",
    "macintosh",
    "ms932",
    "ms_kanji",
    "replacement",
    "shift-jis",
    "shift_jis",
    "sjis",
    "sun_eu_greek",
    "tis-620",
    "ucs-2",
    "unicode",
    "unicode-1-1-utf-8",
    "unicode11utf8",
    "unicode20utf8",
    "unicodefeff",
    "unicodefffe",
    "us-ascii",
    "utf-16",
    "utf-16be",
    "utf-16le",
    "utf-8",
    "utf8",
    "visual",
    "windows-1250",
    "windows-1251",
    "windows-1252",
    "windows-1253",
    "windows-1254",
    "windows-1255",
    "windows-1256",
    "windows-1257",
    "windows-1258",
    "windows-31j",
    "windows-874",
    "windows-949",
    "x-cp1250",
    "x-cp1251",
    "x-cp1252",
    "x-cp1253",
    "x-cp1254",
    "x-cp1255",
    "x-cp1256",
    "x-cp1257",
    "x-cp1258",
    "x-euc-jp",
    "x-gbk",
    "x-mac-cyrillic",
    "x-mac-roman",
    "x-mac-ukrainian",
    "x-sjis",
    "x-unicode20utf8",
    "x-user-defined",
    "x-x-big5",
];

static ENCODINGS_IN_LABEL_SORT: [&'static Encoding; 228] = [
    &IBM866_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_6_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_6_INIT,
    &BIG5_INIT,
    &BIG5_INIT,
    &GBK_INIT,
    &BIG5_INIT,
    &WINDOWS_1250_INIT,
    &WINDOWS_1251_INIT,
    &WINDOWS_1252_INIT,
    &WINDOWS_1253_INIT,
    &WINDOWS_1254_INIT,
    &WINDOWS_1255_INIT,
    &WINDOWS_1256_INIT,
    &WINDOWS_1257_INIT,
    &WINDOWS_1258_INIT,
    &WINDOWS_1252_INIT,
    &IBM866_INIT,
    &BIG5_INIT,
    &EUC_KR_INIT,
    &EUC_JP_INIT,
    &GBK_INIT,
    &IBM866_INIT,
    &ISO_2022_JP_INIT,
    &REPLACEMENT_INIT,
    &GBK_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_8_INIT,
    &ISO_8859_8_I_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &WINDOWS_1254_INIT,
    &ISO_8859_10_INIT,
    &ISO_8859_15_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_5_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_8_INIT,
    &KOI8_R_INIT,
    &EUC_KR_INIT,
    &MACINTOSH_INIT,
    &SHIFT_JIS_INIT,
    &UTF_16LE_INIT,
    &ISO_8859_5_INIT,
    &WINDOWS_874_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_7_INIT,
    &EUC_JP_INIT,
    &EUC_KR_INIT,
    &GB18030_INIT,
    &GBK_INIT,
    &GBK_INIT,
    &GBK_INIT,
    &GBK_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_8_INIT,
    &REPLACEMENT_INIT,
    &WINDOWS_1252_INIT,
    &IBM866_INIT,
    &UTF_16LE_INIT,
    &REPLACEMENT_INIT,
    &REPLACEMENT_INIT,
    &ISO_2022_JP_INIT,
    &REPLACEMENT_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_10_INIT,
    &WINDOWS_874_INIT,
    &ISO_8859_13_INIT,
    &ISO_8859_14_INIT,
    &ISO_8859_15_INIT,
    &ISO_8859_16_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &ISO_8859_5_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_8_INIT,
    &ISO_8859_8_INIT,
    &ISO_8859_8_I_INIT,
    &WINDOWS_1254_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_8_INIT,
    &ISO_8859_5_INIT,
    &WINDOWS_1254_INIT,
    &EUC_KR_INIT,
    &ISO_8859_10_INIT,
    &GBK_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_10_INIT,
    &WINDOWS_874_INIT,
    &ISO_8859_13_INIT,
    &ISO_8859_14_INIT,
    &ISO_8859_15_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &ISO_8859_5_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_8_INIT,
    &WINDOWS_1254_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_10_INIT,
    &WINDOWS_874_INIT,
    &ISO_8859_13_INIT,
    &ISO_8859_14_INIT,
    &ISO_8859_15_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &ISO_8859_5_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_8_INIT,
    &WINDOWS_1254_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_15_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &ISO_8859_4_INIT,
    &ISO_8859_5_INIT,
    &ISO_8859_5_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_6_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_7_INIT,
    &ISO_8859_8_INIT,
    &ISO_8859_8_INIT,
    &WINDOWS_1254_INIT,
    &WINDOWS_1254_INIT,
    &KOI8_R_INIT,
    &KOI8_R_INIT,
    &KOI8_R_INIT,
    &KOI8_U_INIT,
    &KOI8_U_INIT,
    &KOI8_R_INIT,
    &EUC_KR_INIT,
    &EUC_KR_INIT,
    &EUC_KR_INIT,
    &EUC_KR_INIT,
    &EUC_KR_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &WINDOWS_1254_INIT,
    &ISO_8859_10_INIT,
    &ISO_8859_15_INIT,
    &WINDOWS_1252_INIT,
    &ISO_8859_2_INIT,
    &ISO_8859_3_INIT,
    &ISO_8859_4_INIT,
    &WINDOWS_1254_INIT,
    &ISO_8859_10_INIT,
    &ISO_8859_8_I_INIT,
    &MACINTOSH_INIT,
    &MACINTOSH_INIT,
    &SHIFT_JIS_INIT,
    &SHIFT_JIS_INIT,
    &REPLACEMENT_INIT,
    &SHIFT_JIS_INIT,
    &SHIFT_JIS_INIT,
    &SHIFT_JIS_INIT,
    &ISO_8859_7_INIT,
    &WINDOWS_874_INIT,
    &UTF_16LE_INIT,
    &UTF_16LE_INIT,
    &UTF_8_INIT,
    &UTF_8_INIT,
    &UTF_8_INIT,
    &UTF_16LE_INIT,
    &UTF_16BE_INIT,
    &WINDOWS_1252_INIT,
    &UTF_16LE_INIT,
    &UTF_16BE_INIT,
    &UTF_16LE_INIT,
    &UTF_8_INIT,
    &UTF_8_INIT,
    &ISO_8859_8_INIT,
    &WINDOWS_1250_INIT,
    &WINDOWS_1251_INIT,
    &WINDOWS_1252_INIT,
    &WINDOWS_1253_INIT,
    &WINDOWS_1254_INIT,
    &WINDOWS_1255_INIT,
    &WINDOWS_1256_INIT,
    &WINDOWS_1257_INIT,
    &WINDOWS_1258_INIT,
    &SHIFT_JIS_INIT,
    &WINDOWS_874_INIT,
    &EUC_KR_INIT,
    &WINDOWS_1250_INIT,
    &WINDOWS_1251_INIT,
    &WINDOWS_1252_INIT,
    &WINDOWS_1253_INIT,
    &WINDOWS_1254_INIT,
    &WINDOWS_1255_INIT,
    &WINDOWS_1256_INIT,
    &WINDOWS_1257_INIT,
    &WINDOWS_1258_INIT,
    &EUC_JP_INIT,
    &GBK_INIT,
    &X_MAC_CYRILLIC_INIT,
    &MACINTOSH_INIT,
    &X_MAC_CYRILLIC_INIT,
    &SHIFT_JIS_INIT,
    &UTF_8_INIT,
    &X_USER_DEFINED_INIT,
    &BIG5_INIT,
];

// END GENERATED CODE

/// An encoding as defined in the Encoding Standard.
///
/// An _encoding_ defines a mapping from a `u8` sequence to a `char` sequence
/// and, in most cases, vice versa. Each encoding has a name, an output
/// encoding, and one or more labels.
///
/// _Labels_ are ASCII-case-insensitive strings that are used to identify an
/// encoding in formats and protocols. The _name_ of the encoding is the
/// preferred label in the case appropriate for returning from the
/// `characterSet` property of the `Document` DOM interface.
///
/// The _output encoding_ is the encoding used for form submission and URL
/// parsing on Web pages in the encoding. This is UTF-8 for the replacement,
/// UTF-16LE and UTF-16BE encodings and the encoding itself for other
/// encodings.
///
/// Instances exist only as statics; compare them with `==`, which tests
/// identity.
pub struct Encoding {
    name: &'static str,
    variant: VariantEncoding,
}

impl Encoding {
    /// Implements the
    /// [_get an encoding_](https://encoding.spec.whatwg.org/#concept-encoding-get)
    /// algorithm.
    ///
    /// If, after ASCII-lowercasing and removing leading and trailing
    /// whitespace, the argument matches a label defined in the Encoding
    /// Standard, `Some(&'static Encoding)` representing the corresponding
    /// encoding is returned. If there is no match, `None` is returned.
    ///
    /// The argument is of type `&[u8]` instead of `&str` to save callers
    /// that are extracting the label from a non-UTF-8 protocol the trouble
    /// of conversion to UTF-8. (If you have a `&str`, just call `.as_bytes()`
    /// on it.)
    pub fn for_label(label: &[u8]) -> Option<&'static Encoding> {
        let mut trimmed = [0u8; LONGEST_LABEL_LENGTH];
        let mut trimmed_pos = 0usize;
        let mut iter = label.iter();
        // before
        loop {
            match iter.next() {
                None => {
                    return None;
                }
                Some(byte) => {
                    match *byte {
                        0x09u8 | 0x0Au8 | 0x0Cu8 | 0x0Du8 | 0x20u8 => {
                            continue;
                        }
                        b'A'..=b'Z' => {
                            trimmed[trimmed_pos] = *byte + 0x20u8;
                            trimmed_pos = 1usize;
                            break;
                        }
                        _ => {
                            trimmed[trimmed_pos] = *byte;
                            trimmed_pos = 1usize;
                            break;
                        }
                    }
                }
            }
        }
        // inside
        loop {
            match iter.next() {
                None => {
                    break;
                }
                Some(byte) => {
                    match *byte {
                        0x09u8 | 0x0Au8 | 0x0Cu8 | 0x0Du8 | 0x20u8 => {
                            break;
                        }
                        _ => {
                            if trimmed_pos == LONGEST_LABEL_LENGTH {
                                // There's no encoding with a label this long
                                return None;
                            }
                            trimmed[trimmed_pos] = byte.to_ascii_lowercase();
                            trimmed_pos += 1;
                        }
                    }
                }
            }
        }
        // after
        for byte in iter {
            match *byte {
                0x09u8 | 0x0Au8 | 0x0Cu8 | 0x0Du8 | 0x20u8 => {
                    continue;
                }
                _ => {
                    // There's no label with space in the middle
                    return None;
                }
            }
        }
        let candidate = &trimmed[..trimmed_pos];
        match LABELS_SORTED.binary_search_by(|known| known.as_bytes().cmp(candidate)) {
            Ok(i) => Some(ENCODINGS_IN_LABEL_SORT[i]),
            Err(_) => None,
        }
    }

    /// This method behaves the same as `for_label()`, except when `for_label()`
    /// would return `Some(REPLACEMENT)`, this method returns `None` instead.
    ///
    /// This method is useful in scenarios where a fatal error is required
    /// upon invalid label, because in those cases the caller typically wishes
    /// to treat the labels that map to the replacement encoding as fatal
    /// errors, too.
    pub fn for_label_no_replacement(label: &[u8]) -> Option<&'static Encoding> {
        match Encoding::for_label(label) {
            Some(encoding) if encoding == REPLACEMENT => None,
            other => other,
        }
    }

    /// Looks up an encoding by its canonical name, ignoring ASCII case.
    ///
    /// Unlike `for_label()`, there is no whitespace trimming and aliases
    /// do not match: `for_name(b"shift_jis")` finds `SHIFT_JIS` but
    /// `for_name(b"sjis")` does not.
    pub fn for_name(name: &[u8]) -> Option<&'static Encoding> {
        ENCODINGS_IN_LABEL_SORT.iter()
            .find(|encoding| encoding.name.as_bytes().eq_ignore_ascii_case(name))
            .copied()
    }

    /// Performs non-incremental BOM sniffing.
    ///
    /// The argument must either be a buffer representing the entire input
    /// stream (non-streaming case) or a buffer representing at least the first
    /// three bytes of the input stream (streaming case).
    ///
    /// Returns `Some((UTF_8, 3))`, `Some((UTF_16LE, 2))` or
    /// `Some((UTF_16BE, 2))` if the argument starts with the UTF-8, UTF-16LE
    /// or UTF-16BE BOM or `None` otherwise.
    pub fn for_bom(buffer: &[u8]) -> Option<(&'static Encoding, usize)> {
        if buffer.starts_with(b"\xEF\xBB\xBF") {
            Some((UTF_8, 3))
        } else if buffer.starts_with(b"\xFF\xFE") {
            Some((UTF_16LE, 2))
        } else if buffer.starts_with(b"\xFE\xFF") {
            Some((UTF_16BE, 2))
        } else {
            None
        }
    }

    /// Returns the name of this encoding.
    ///
    /// This name is appropriate to return as-is from the DOM
    /// `document.characterSet` property.
    pub fn name(&'static self) -> &'static str {
        self.name
    }

    /// Checks whether the _output encoding_ of this encoding can encode every
    /// `char`. (Only true if the output encoding is UTF-8.)
    pub fn can_encode_everything(&'static self) -> bool {
        self.output_encoding() == UTF_8
    }

    /// Checks whether the bytes 0x00...0x7F map exclusively to the characters
    /// U+0000...U+007F and vice versa.
    pub fn is_ascii_compatible(&'static self) -> bool {
        !(self == REPLACEMENT || self == UTF_16BE || self == UTF_16LE || self == ISO_2022_JP)
    }

    /// Checks whether this encoding maps one byte to one Basic Multilingual
    /// Plane code point (i.e. byte length equals decoded UTF-16 length) and
    /// vice versa (for mappable characters).
    ///
    /// `true` iff this encoding is on the list of the Legacy single-byte
    /// encodings in the Encoding Standard or x-user-defined.
    pub fn is_single_byte(&'static self) -> bool {
        match self.variant {
            VariantEncoding::SingleByte(_) | VariantEncoding::UserDefined => true,
            _ => false,
        }
    }

    /// Returns the _output encoding_ of this encoding. This is UTF-8 for
    /// UTF-16BE, UTF-16LE and replacement and the encoding itself otherwise.
    pub fn output_encoding(&'static self) -> &'static Encoding {
        if self == REPLACEMENT || self == UTF_16BE || self == UTF_16LE {
            UTF_8
        } else {
            self
        }
    }

    /// Instantiates a new decoder for this encoding with BOM sniffing enabled.
    ///
    /// BOM sniffing may cause the returned decoder to morph into a decoder
    /// for UTF-8, UTF-16LE or UTF-16BE instead of this encoding. The BOM
    /// does not appear in the output.
    pub fn new_decoder(&'static self) -> Decoder {
        Decoder::new(self, BomHandling::Sniff)
    }

    /// Instantiates a new decoder for this encoding with BOM removal.
    ///
    /// If the input starts with bytes that are the BOM for this encoding,
    /// those bytes are removed. However, the decoder never morphs into a
    /// decoder for another encoding: A BOM for another encoding is treated as
    /// (potentially malformed) input to the decoding algorithm for this
    /// encoding.
    pub fn new_decoder_with_bom_removal(&'static self) -> Decoder {
        Decoder::new(self, BomHandling::Remove)
    }

    /// Instantiates a new decoder for this encoding with BOM handling disabled.
    ///
    /// If the input starts with bytes that look like a BOM, those bytes are
    /// not treated as a BOM. (Hence, the decoder never morphs into a decoder
    /// for another encoding.)
    ///
    /// _Note:_ If the caller has performed BOM sniffing on its own but has not
    /// removed the BOM, the caller should use `new_decoder_with_bom_removal()`
    /// instead of this method to cause the BOM to be removed.
    pub fn new_decoder_without_bom_handling(&'static self) -> Decoder {
        Decoder::new(self, BomHandling::Off)
    }

    /// Instantiates a new encoder for the output encoding of this encoding.
    pub fn new_encoder(&'static self) -> Encoder {
        let output = self.output_encoding();
        if output != self {
            tracing::trace!(label = self.name, output = output.name, "encoding via output encoding");
        }
        Encoder::new(output)
    }

    /// Decode complete input to `Cow<'a, str>` _with BOM sniffing_ and with
    /// malformed sequences replaced with the REPLACEMENT CHARACTER when the
    /// entire input is available as a single buffer (i.e. the end of the
    /// buffer marks the end of the stream).
    ///
    /// This method implements the (non-streaming version of) the
    /// [_decode_](https://encoding.spec.whatwg.org/#decode) algorithm.
    ///
    /// The second item in the returned tuple is the encoding that was actually
    /// used (which may differ from this encoding thanks to BOM sniffing).
    ///
    /// The third item in the returned tuple indicates whether there were
    /// malformed sequences (that were replaced with the REPLACEMENT CHARACTER).
    ///
    /// _Note:_ It is wrong to use this when the input buffer represents only
    /// a segment of the input instead of the whole input. Use `new_decoder()`
    /// when decoding segmented input.
    pub fn decode<'a>(&'static self, bytes: &'a [u8]) -> (Cow<'a, str>, &'static Encoding, bool) {
        let (encoding, without_bom) = match Encoding::for_bom(bytes) {
            Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
            None => (self, bytes),
        };
        let (cow, had_errors) = encoding.decode_without_bom_handling(without_bom);
        (cow, encoding, had_errors)
    }

    /// Decode complete input to `Cow<'a, str>` _with BOM removal_ and with
    /// malformed sequences replaced with the REPLACEMENT CHARACTER when the
    /// entire input is available as a single buffer (i.e. the end of the
    /// buffer marks the end of the stream).
    ///
    /// When invoked on `UTF_8`, this method implements the (non-streaming
    /// version of) the
    /// [_UTF-8 decode_](https://encoding.spec.whatwg.org/#utf-8-decode)
    /// concept.
    ///
    /// The second item in the returned pair indicates whether there were
    /// malformed sequences (that were replaced with the REPLACEMENT CHARACTER).
    pub fn decode_with_bom_removal<'a>(&'static self, bytes: &'a [u8]) -> (Cow<'a, str>, bool) {
        let without_bom = match Encoding::for_bom(bytes) {
            Some((encoding, bom_length)) if encoding == self => &bytes[bom_length..],
            _ => bytes,
        };
        self.decode_without_bom_handling(without_bom)
    }

    /// Decode complete input to `Cow<'a, str>` _without BOM handling_ and
    /// with malformed sequences replaced with the REPLACEMENT CHARACTER when
    /// the entire input is available as a single buffer (i.e. the end of the
    /// buffer marks the end of the stream).
    ///
    /// When invoked on `UTF_8`, this method implements the (non-streaming
    /// version of) the
    /// [_UTF-8 decode without BOM_](https://encoding.spec.whatwg.org/#utf-8-decode-without-bom)
    /// algorithm.
    ///
    /// The second item in the returned pair indicates whether there were
    /// malformed sequences (that were replaced with the REPLACEMENT CHARACTER).
    pub fn decode_without_bom_handling<'a>(&'static self, bytes: &'a [u8]) -> (Cow<'a, str>, bool) {
        if let Some(borrowed) = self.decode_borrowed(bytes) {
            return (Cow::Borrowed(borrowed), false);
        }
        let mut decoder = self.new_decoder_without_bom_handling();
        let mut string = String::with_capacity(initial_capacity(decoder.max_utf8_buffer_length(bytes.len()),
                                                                bytes.len()));
        let mut total_read = 0usize;
        let mut had_errors = false;
        loop {
            let (result, read, replaced) = decoder.decode_to_string(&bytes[total_read..], &mut string, true);
            total_read += read;
            had_errors |= replaced;
            match result {
                CoderResult::InputEmpty => {
                    return (Cow::Owned(string), had_errors);
                }
                CoderResult::OutputFull => {
                    let needed = decoder.max_utf8_buffer_length(bytes.len() - total_read);
                    string.reserve(initial_capacity(needed, bytes.len() - total_read));
                }
            }
        }
    }

    /// Decode complete input to `Cow<'a, str>` _without BOM handling_ and
    /// _with malformed sequences treated as fatal_ when the entire input is
    /// available as a single buffer (i.e. the end of the buffer marks the end
    /// of the stream).
    ///
    /// When invoked on `UTF_8`, this method implements the (non-streaming
    /// version of) the
    /// [_UTF-8 decode without BOM or fail_](https://encoding.spec.whatwg.org/#utf-8-decode-without-bom-or-fail)
    /// algorithm.
    ///
    /// Returns `None` if a malformed sequence was encountered and the result
    /// of the decode as `Some(String)` otherwise.
    pub fn decode_without_bom_handling_and_without_replacement<'a>(&'static self,
                                                                   bytes: &'a [u8])
                                                                   -> Option<Cow<'a, str>> {
        if let Some(borrowed) = self.decode_borrowed(bytes) {
            return Some(Cow::Borrowed(borrowed));
        }
        let mut decoder = self.new_decoder_without_bom_handling();
        let mut string = String::with_capacity(initial_capacity(decoder.max_utf8_buffer_length_without_replacement(bytes.len()),
                                                                bytes.len()));
        let mut total_read = 0usize;
        loop {
            let (result, read) = decoder.decode_to_string_without_replacement(&bytes[total_read..],
                                                                              &mut string,
                                                                              true);
            total_read += read;
            match result {
                DecoderResult::InputEmpty => {
                    return Some(Cow::Owned(string));
                }
                DecoderResult::Malformed(_, _) => {
                    return None;
                }
                DecoderResult::OutputFull => {
                    let needed = decoder.max_utf8_buffer_length_without_replacement(bytes.len() - total_read);
                    string.reserve(initial_capacity(needed, bytes.len() - total_read));
                }
            }
        }
    }

    /// The input as `&str` when decoding cannot change it.
    fn decode_borrowed<'a>(&'static self, bytes: &'a [u8]) -> Option<&'a str> {
        if self == UTF_8 {
            return ::std::str::from_utf8(bytes).ok();
        }
        if self.is_ascii_compatible() && ascii_valid_up_to(bytes) == bytes.len() {
            return ::std::str::from_utf8(bytes).ok();
        }
        None
    }

    /// Encode complete input to `Cow<'a, [u8]>` with unmappable characters
    /// replaced with `?` when the entire input is available as a single
    /// buffer (i.e. the end of the buffer marks the end of the stream).
    ///
    /// This method implements the (non-streaming version of) the
    /// [_encode_](https://encoding.spec.whatwg.org/#encode) algorithm,
    /// except that unmappables turn into a question mark instead of a
    /// numeric character reference.
    ///
    /// The second item in the returned tuple is the encoding that was actually
    /// used (which may differ from this encoding thanks to some encodings
    /// having UTF-8 as their output encoding).
    ///
    /// The third item in the returned tuple indicates whether there were
    /// unmappable characters (that were replaced with `?`).
    pub fn encode<'a>(&'static self, string: &'a str) -> (Cow<'a, [u8]>, &'static Encoding, bool) {
        let output = self.output_encoding();
        if output == UTF_8 {
            return (Cow::Borrowed(string.as_bytes()), output, false);
        }
        if output.is_ascii_compatible() && string.is_ascii() {
            return (Cow::Borrowed(string.as_bytes()), output, false);
        }
        let mut encoder = output.new_encoder();
        let mut vec: Vec<u8> =
            Vec::with_capacity(initial_capacity(encoder.max_buffer_length_from_utf8_with_replacement(string.len()),
                                                string.len()));
        let mut total_read = 0usize;
        let mut had_errors = false;
        loop {
            let (result, read, replaced) = encoder.encode_from_utf8_to_vec(&string[total_read..], &mut vec, true);
            total_read += read;
            had_errors |= replaced;
            match result {
                CoderResult::InputEmpty => {
                    return (Cow::Owned(vec), output, had_errors);
                }
                CoderResult::OutputFull => {
                    let needed = encoder.max_buffer_length_from_utf8_with_replacement(string.len() - total_read);
                    vec.reserve(initial_capacity(needed, string.len() - total_read));
                }
            }
        }
    }
}

/// A buffer size from a bound that may have overflowed.
fn initial_capacity(bound: Option<usize>, input_length: usize) -> usize {
    match bound {
        Some(length) => length,
        None => input_length.saturating_add(16),
    }
}

impl PartialEq for Encoding {
    fn eq(&self, other: &Encoding) -> bool {
        ::std::ptr::eq(self, other)
    }
}

impl Eq for Encoding {}

impl Hash for Encoding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self as *const Encoding).hash(state);
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Encoding {{ {} }}", self.name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Encoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        serializer.serialize_str(self.name)
    }
}

#[cfg(feature = "serde")]
struct EncodingVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for EncodingVisitor {
    type Value = &'static Encoding;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a valid encoding label")
    }

    fn visit_str<E>(self, value: &str) -> Result<&'static Encoding, E>
        where E: serde::de::Error
    {
        match Encoding::for_label(value.as_bytes()) {
            Some(encoding) => Ok(encoding),
            None => Err(E::custom(format!("invalid encoding label: {}", value))),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for &'static Encoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: serde::Deserializer<'de>
    {
        deserializer.deserialize_str(EncodingVisitor)
    }
}

/// Result of a (potentially partial) decode or encode operation with
/// replacement.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CoderResult {
    /// The input was exhausted.
    ///
    /// If this result was returned from a call where `last` was `true`, the
    /// conversion process has completed. Otherwise, the caller should call a
    /// decode or encode method again with more input.
    InputEmpty,

    /// The converter cannot produce another unit of output, because the output
    /// buffer does not have enough space left.
    ///
    /// The caller must provide more output space upon the next call and re-push
    /// the remaining input to the converter.
    OutputFull,
}

/// Result of a (potentially partial) decode operation without replacement.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DecoderResult {
    /// The input was exhausted.
    ///
    /// If this result was returned from a call where `last` was `true`, the
    /// decoding process has completed. Otherwise, the caller should call a
    /// decode method again with more input.
    InputEmpty,

    /// The decoder cannot produce another unit of output, because the output
    /// buffer does not have enough space left.
    ///
    /// The caller must provide more output space upon the next call and re-push
    /// the remaining input to the decoder.
    OutputFull,

    /// The decoder encountered a malformed byte sequence.
    ///
    /// The caller must either treat this as a fatal error or must append one
    /// REPLACEMENT CHARACTER (U+FFFD) to the output and then re-push the
    /// the remaining input to the decoder.
    ///
    /// The first wrapped integer indicates the length of the malformed byte
    /// sequence. The second wrapped integer indicates the number of bytes
    /// that were consumed after the malformed sequence. If the second
    /// integer is zero, the last byte that was consumed is the last byte of
    /// the malformed sequence. Note that the malformed bytes may have been part
    /// of an earlier input buffer.
    Malformed(u8, u8), // u8 instead of usize to avoid uselessly bloating the enum
}

impl DecoderResult {
    /// For a `Malformed` result from a call that read `read` bytes, the
    /// offset in that call's input where the malformed sequence starts
    /// (zero when it started in an earlier buffer). `None` otherwise.
    pub fn malformed_start(&self, read: usize) -> Option<usize> {
        match *self {
            DecoderResult::Malformed(length, after) => {
                Some(read.saturating_sub(after as usize + length as usize))
            }
            _ => None,
        }
    }
}

/// Result of a (potentially partial) encode operation without replacement.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EncoderResult {
    /// The input was exhausted.
    ///
    /// If this result was returned from a call where `last` was `true`, the
    /// encoding process has completed. Otherwise, the caller should call an
    /// encode method again with more input.
    InputEmpty,

    /// The encoder cannot produce another unit of output, because the output
    /// buffer does not have enough space left.
    ///
    /// The caller must provide more output space upon the next call and re-push
    /// the remaining input to the encoder.
    OutputFull,

    /// The encoder encountered an unmappable character.
    ///
    /// The caller must either treat this as a fatal error or must append
    /// a placeholder to the output and then re-push the the remaining input to
    /// the encoder.
    Unmappable(char),
}

impl EncoderResult {
    /// For an `Unmappable` result from a call that read `read` bytes of
    /// UTF-8, the offset where the unmappable character starts.
    pub fn unmappable_start_utf8(&self, read: usize) -> Option<usize> {
        match *self {
            EncoderResult::Unmappable(c) => Some(read.saturating_sub(c.len_utf8())),
            _ => None,
        }
    }

    /// For an `Unmappable` result from a call that read `read` UTF-16 code
    /// units, the offset where the unmappable character starts (zero when
    /// its high surrogate came in an earlier buffer).
    pub fn unmappable_start_utf16(&self, read: usize) -> Option<usize> {
        match *self {
            EncoderResult::Unmappable(c) => Some(read.saturating_sub(c.len_utf16())),
            _ => None,
        }
    }
}

#[derive(PartialEq, Debug, Copy, Clone)]
enum BomHandling {
    Off,
    Sniff,
    Remove,
}

#[derive(PartialEq, Debug, Copy, Clone)]
enum DecoderLifeCycle {
    AtStart,
    AtUtf8Start,
    AtUtf16BeStart,
    AtUtf16LeStart,
    SeenUtf8First,
    SeenUtf8Second,
    SeenUtf16BeFirst,
    SeenUtf16LeFirst,
    Converting,
    Finished,
}

impl DecoderLifeCycle {
    fn initial(encoding: &'static Encoding, bom_handling: BomHandling) -> DecoderLifeCycle {
        match bom_handling {
            BomHandling::Off => DecoderLifeCycle::Converting,
            BomHandling::Sniff => DecoderLifeCycle::AtStart,
            BomHandling::Remove => {
                if encoding == UTF_8 {
                    DecoderLifeCycle::AtUtf8Start
                } else if encoding == UTF_16BE {
                    DecoderLifeCycle::AtUtf16BeStart
                } else if encoding == UTF_16LE {
                    DecoderLifeCycle::AtUtf16LeStart
                } else {
                    DecoderLifeCycle::Converting
                }
            }
        }
    }

    /// Number of bytes of a potential BOM that have been consumed but not
    /// yet decoded.
    fn bytes_seen(&self) -> usize {
        match *self {
            DecoderLifeCycle::SeenUtf8First |
            DecoderLifeCycle::SeenUtf16BeFirst |
            DecoderLifeCycle::SeenUtf16LeFirst => 1,
            DecoderLifeCycle::SeenUtf8Second => 2,
            _ => 0,
        }
    }
}

/// A converter that decodes a byte stream into Unicode according to a
/// character encoding in a streaming (incremental) manner.
///
/// The various `decode_*` methods take an input buffer (`src`) and an output
/// buffer `dst` both of which are caller-allocated. There are variants for
/// both UTF-8 and UTF-16 output buffers.
///
/// A `decode_*` method decodes bytes from `src` into Unicode characters stored
/// into `dst` until one of the following three things happens:
///
/// 1. A malformed byte sequence is encountered (`*_without_replacement`
///    variants only).
///
/// 2. The output buffer does not have room for the next complete character.
///
/// 3. All the input bytes have been processed.
///
/// The `decode_*` method then returns tuple of a status indicating which one
/// of the three reasons to return happened, how many input bytes were read,
/// how many output code units (`u8` when decoding into UTF-8 and `u16`
/// when decoding to UTF-16) were written (except when decoding into `String`,
/// whose length change indicates this), and in the case of the
/// variants performing replacement, a boolean indicating whether an error was
/// replaced with the REPLACEMENT CHARACTER during the call.
///
/// The number of bytes "written" is what's logically written. Garbage may be
/// written in the output buffer beyond the point logically written to.
/// Therefore, if you wish to decode into an `&mut str`, you should use the
/// methods that take an `&mut str` argument instead of the ones that take an
/// `&mut [u8]` argument. The former take care of overwriting the trailing
/// garbage to ensure the UTF-8 validity of the `&mut str` as a whole, but the
/// latter don't.
///
/// In the case of the `*_without_replacement` variants, the status is a
/// `DecoderResult` enumeration (possibilities `Malformed`, `OutputFull` and
/// `InputEmpty` corresponding to the three cases listed above).
///
/// In the case of methods whose name does not end with
/// `*_without_replacement`, malformed sequences are automatically replaced
/// with the REPLACEMENT CHARACTER and errors do not cause the methods to
/// return early.
///
/// When decoding to UTF-8, the output buffer must be at least as long as the
/// value returned by `max_utf8_buffer_length()` (or
/// `max_utf8_buffer_length_without_replacement()` without replacement) for
/// the decoder to be guaranteed not to return `OutputFull`. When decoding
/// to UTF-16, the corresponding method is `max_utf16_buffer_length()`.
///
/// The output written into `dst` is guaranteed to be valid UTF-8 or UTF-16,
/// and the output after each `decode_*` call is guaranteed to consist of
/// complete characters. (I.e. the code unit sequence for the last character is
/// guaranteed not to be split across output buffers.)
///
/// The boolean argument `last` indicates that the end of the stream is reached
/// when all the bytes in `src` have been consumed.
///
/// A `Decoder` object can be used to incrementally decode a byte stream.
///
/// During the processing of a single stream, the caller must call `decode_*`
/// zero or more times with `last` set to `false` and then call `decode_*` at
/// least once with `last` set to `true`. If `decode_*` returns `InputEmpty`,
/// the processing of the stream has ended. Otherwise, the caller must call
/// `decode_*` again with `last` set to `true` (or treat a `Malformed` result
/// as a fatal error).
///
/// Once the stream has ended, the `Decoder` object must not be used anymore
/// unless `reset()` is called first. Calling a `decode_*` method on a
/// finished decoder panics.
///
/// When the decoder returns `OutputFull` or the decoder returns `Malformed`
/// and the caller does not wish to treat it as a fatal error, the input
/// buffer `src` may not have been completely consumed. In that case, the
/// caller must pass the unconsumed contents of `src` to `decode_*` again
/// upon the next call.
pub struct Decoder {
    encoding: &'static Encoding,
    original_encoding: &'static Encoding,
    variant: VariantDecoder,
    bom_handling: BomHandling,
    life_cycle: DecoderLifeCycle,
    /// Bytes of an aborted BOM that still need to go through `variant`.
    replay: [u8; 2],
    replay_len: u8,
    pending_replacement: bool,
}

impl Decoder {
    fn new(encoding: &'static Encoding, bom_handling: BomHandling) -> Decoder {
        Decoder {
            encoding: encoding,
            original_encoding: encoding,
            variant: encoding.variant.new_variant_decoder(),
            bom_handling: bom_handling,
            life_cycle: DecoderLifeCycle::initial(encoding, bom_handling),
            replay: [0u8; 2],
            replay_len: 0,
            pending_replacement: false,
        }
    }

    /// The `Encoding` this `Decoder` is for.
    ///
    /// BOM sniffing can change the return value of this method during the
    /// life of the decoder.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Make the decoder ready to process a new stream.
    ///
    /// BOM handling is re-armed the way it was when the decoder was created,
    /// and a decoder that morphed due to BOM sniffing goes back to its
    /// original encoding.
    pub fn reset(&mut self) {
        self.encoding = self.original_encoding;
        self.variant = self.encoding.variant.new_variant_decoder();
        self.life_cycle = DecoderLifeCycle::initial(self.encoding, self.bom_handling);
        self.replay_len = 0;
        self.pending_replacement = false;
    }

    fn is_sniffing(&self) -> bool {
        match self.life_cycle {
            DecoderLifeCycle::AtStart |
            DecoderLifeCycle::SeenUtf8First |
            DecoderLifeCycle::SeenUtf8Second |
            DecoderLifeCycle::SeenUtf16BeFirst |
            DecoderLifeCycle::SeenUtf16LeFirst => self.bom_handling == BomHandling::Sniff,
            _ => false,
        }
    }

    fn max_length<F>(&self, byte_length: usize, replacement_length: usize, bound: F) -> Option<usize>
        where F: Fn(&VariantDecoder, usize) -> Option<usize>
    {
        let extra = self.replay_len as usize + self.life_cycle.bytes_seen();
        let byte_length = byte_length.checked_add(extra)?;
        let mut length = bound(&self.variant, byte_length)?;
        if self.is_sniffing() {
            for candidate in [UTF_8, UTF_16LE, UTF_16BE].iter() {
                let other = bound(&candidate.variant.new_variant_decoder(), byte_length)?;
                length = ::std::cmp::max(length, other);
            }
        }
        if self.pending_replacement {
            length = length.checked_add(replacement_length)?;
        }
        Some(length)
    }

    /// Query the worst-case UTF-16 output size (with or without replacement).
    ///
    /// Returns the size of the output buffer in UTF-16 code units (`u16`)
    /// that will not overflow given the current state of the decoder and
    /// `byte_length` number of additional input bytes or `None` if `usize`
    /// would overflow.
    ///
    /// Since the REPLACEMENT CHARACTER fits into one UTF-16 code unit, the
    /// return value of this method applies also in the replacement case.
    pub fn max_utf16_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.max_length(byte_length, 1, |variant, length| variant.max_utf16_buffer_length(length))
    }

    /// Query the worst-case UTF-8 output size _without replacement_.
    ///
    /// Returns the size of the output buffer in UTF-8 code units (`u8`)
    /// that will not overflow given the current state of the decoder and
    /// `byte_length` number of additional input bytes when decoding without
    /// replacement error handling or `None` if `usize` would overflow.
    ///
    /// Note that this value may be too small for the replacement case.
    /// Use `max_utf8_buffer_length()` for that case.
    pub fn max_utf8_buffer_length_without_replacement(&self, byte_length: usize) -> Option<usize> {
        self.max_length(byte_length, 3, |variant, length| {
            variant.max_utf8_buffer_length_without_replacement(length)
        })
    }

    /// Query the worst-case UTF-8 output size _with replacement_.
    ///
    /// Returns the size of the output buffer in UTF-8 code units (`u8`)
    /// that will not overflow given the current state of the decoder and
    /// `byte_length` number of additional input bytes when decoding with
    /// errors handled by outputting a REPLACEMENT CHARACTER for each malformed
    /// sequence or `None` if `usize` would overflow.
    pub fn max_utf8_buffer_length(&self, byte_length: usize) -> Option<usize> {
        self.max_length(byte_length, 3, |variant, length| variant.max_utf8_buffer_length(length))
    }

    fn switch_encoding(&mut self, encoding: &'static Encoding) {
        if self.bom_handling == BomHandling::Sniff && encoding != self.encoding {
            tracing::trace!(from = self.encoding.name, to = encoding.name, "BOM overrides encoding");
            self.encoding = encoding;
            self.variant = encoding.variant.new_variant_decoder();
        }
        self.life_cycle = DecoderLifeCycle::Converting;
    }

    fn abort_bom_sniffing(&mut self) {
        let seen: &[u8] = match self.life_cycle {
            DecoderLifeCycle::SeenUtf8First => b"\xEF",
            DecoderLifeCycle::SeenUtf8Second => b"\xEF\xBB",
            DecoderLifeCycle::SeenUtf16BeFirst => b"\xFE",
            DecoderLifeCycle::SeenUtf16LeFirst => b"\xFF",
            _ => b"",
        };
        if !seen.is_empty() {
            tracing::trace!(bytes = seen.len(), "not a BOM after all; replaying");
        }
        self.replay[..seen.len()].copy_from_slice(seen);
        self.replay_len = seen.len() as u8;
        self.life_cycle = DecoderLifeCycle::Converting;
    }

    /// Advances BOM sniffing by one byte. Returns whether the byte was
    /// consumed.
    fn sniff(&mut self, b: u8) -> bool {
        let sniffing = self.bom_handling == BomHandling::Sniff;
        let next = match (self.life_cycle, b) {
            (DecoderLifeCycle::AtStart, 0xEF) |
            (DecoderLifeCycle::AtUtf8Start, 0xEF) => DecoderLifeCycle::SeenUtf8First,
            (DecoderLifeCycle::AtStart, 0xFE) |
            (DecoderLifeCycle::AtUtf16BeStart, 0xFE) => DecoderLifeCycle::SeenUtf16BeFirst,
            (DecoderLifeCycle::AtStart, 0xFF) |
            (DecoderLifeCycle::AtUtf16LeStart, 0xFF) => DecoderLifeCycle::SeenUtf16LeFirst,
            (DecoderLifeCycle::SeenUtf8First, 0xBB) => DecoderLifeCycle::SeenUtf8Second,
            (DecoderLifeCycle::SeenUtf8Second, 0xBF) => {
                self.switch_encoding(UTF_8);
                return true;
            }
            (DecoderLifeCycle::SeenUtf16BeFirst, 0xFF) => {
                self.switch_encoding(UTF_16BE);
                return true;
            }
            (DecoderLifeCycle::SeenUtf16LeFirst, 0xFE) => {
                self.switch_encoding(UTF_16LE);
                return true;
            }
            _ => {
                self.abort_bom_sniffing();
                return false;
            }
        };
        debug_assert!(sniffing || self.bom_handling == BomHandling::Remove);
        self.life_cycle = next;
        true
    }

    /// Runs BOM handling, replays aborted BOM bytes and then decodes `src`
    /// into `dst`. Returns the result and the number of bytes read.
    fn decode_impl<D: UnicodeDestination>(&mut self,
                                          src: &[u8],
                                          dst: &mut D,
                                          last: bool)
                                          -> (DecoderResult, usize) {
        let mut offset = 0usize;
        loop {
            match self.life_cycle {
                DecoderLifeCycle::Converting => {
                    break;
                }
                DecoderLifeCycle::Finished => {
                    panic!("Must not use a decoder that has finished.");
                }
                _ => {
                    match src.get(offset) {
                        None => {
                            if !last {
                                return (DecoderResult::InputEmpty, offset);
                            }
                            self.abort_bom_sniffing();
                        }
                        Some(&b) => {
                            if self.sniff(b) {
                                offset += 1;
                            }
                        }
                    }
                }
            }
        }
        if self.replay_len != 0 {
            let replay = self.replay;
            let replay_len = self.replay_len as usize;
            let mut source = ByteSource::new(&replay[..replay_len]);
            let result = self.variant.decode(&mut source, dst, false);
            let consumed = source.consumed();
            self.replay.copy_within(consumed..replay_len, 0);
            self.replay_len = (replay_len - consumed) as u8;
            if result != DecoderResult::InputEmpty {
                return (result, offset);
            }
        }
        let mut source = ByteSource::new(&src[offset..]);
        let result = self.variant.decode(&mut source, dst, last);
        if last && result == DecoderResult::InputEmpty {
            self.life_cycle = DecoderLifeCycle::Finished;
        }
        (result, offset + source.consumed())
    }

    fn decode_with_replacement<D: UnicodeDestination>(&mut self,
                                                      src: &[u8],
                                                      dst: &mut D,
                                                      last: bool)
                                                      -> (CoderResult, usize, bool) {
        let mut had_replacements = false;
        if self.pending_replacement {
            if !dst.write_char('\u{FFFD}') {
                return (CoderResult::OutputFull, 0, false);
            }
            self.pending_replacement = false;
            had_replacements = true;
        }
        let mut total_read = 0usize;
        loop {
            let (result, read) = self.decode_impl(&src[total_read..], dst, last);
            total_read += read;
            match result {
                DecoderResult::InputEmpty => {
                    return (CoderResult::InputEmpty, total_read, had_replacements);
                }
                DecoderResult::OutputFull => {
                    return (CoderResult::OutputFull, total_read, had_replacements);
                }
                DecoderResult::Malformed(_, _) => {
                    had_replacements = true;
                    if !dst.write_char('\u{FFFD}') {
                        self.pending_replacement = true;
                        return (CoderResult::OutputFull, total_read, had_replacements);
                    }
                }
            }
        }
    }

    fn decode_without_replacement<D: UnicodeDestination>(&mut self,
                                                         src: &[u8],
                                                         dst: &mut D,
                                                         last: bool)
                                                         -> (DecoderResult, usize) {
        if self.pending_replacement {
            // Owed from an earlier call that did replace.
            if !dst.write_char('\u{FFFD}') {
                return (DecoderResult::OutputFull, 0);
            }
            self.pending_replacement = false;
        }
        self.decode_impl(src, dst, last)
    }

    /// Incrementally decode a byte stream into UTF-16 _without replacement_.
    ///
    /// See the documentation of the struct for documentation for `decode_*`
    /// methods collectively.
    pub fn decode_to_utf16_without_replacement(&mut self,
                                               src: &[u8],
                                               dst: &mut [u16],
                                               last: bool)
                                               -> (DecoderResult, usize, usize) {
        let mut dest = Utf16Destination::new(dst);
        let (result, read) = self.decode_without_replacement(src, &mut dest, last);
        (result, read, dest.written())
    }

    /// Incrementally decode a byte stream into UTF-8 _without replacement_.
    ///
    /// See the documentation of the struct for documentation for `decode_*`
    /// methods collectively.
    pub fn decode_to_utf8_without_replacement(&mut self,
                                              src: &[u8],
                                              dst: &mut [u8],
                                              last: bool)
                                              -> (DecoderResult, usize, usize) {
        let mut dest = Utf8Destination::new(dst);
        let (result, read) = self.decode_without_replacement(src, &mut dest, last);
        (result, read, dest.written())
    }

    /// Incrementally decode a byte stream into UTF-16 with malformed sequences
    /// replaced with the REPLACEMENT CHARACTER.
    ///
    /// See the documentation of the struct for documentation for `decode_*`
    /// methods collectively.
    pub fn decode_to_utf16(&mut self,
                           src: &[u8],
                           dst: &mut [u16],
                           last: bool)
                           -> (CoderResult, usize, usize, bool) {
        let mut dest = Utf16Destination::new(dst);
        let (result, read, replaced) = self.decode_with_replacement(src, &mut dest, last);
        (result, read, dest.written(), replaced)
    }

    /// Incrementally decode a byte stream into UTF-8 with malformed sequences
    /// replaced with the REPLACEMENT CHARACTER.
    ///
    /// See the documentation of the struct for documentation for `decode_*`
    /// methods collectively.
    pub fn decode_to_utf8(&mut self,
                          src: &[u8],
                          dst: &mut [u8],
                          last: bool)
                          -> (CoderResult, usize, usize, bool) {
        let mut dest = Utf8Destination::new(dst);
        let (result, read, replaced) = self.decode_with_replacement(src, &mut dest, last);
        (result, read, dest.written(), replaced)
    }

    /// Incrementally decode a byte stream into UTF-8 _without replacement_
    /// with type system signaling of UTF-8 validity.
    ///
    /// This methods calls `decode_to_utf8_without_replacement` and then zeroes
    /// out up to three bytes that aren't logically part of the write in order
    /// to retain the UTF-8 validity even for the unwritten part of the buffer.
    pub fn decode_to_str_without_replacement(&mut self,
                                             src: &[u8],
                                             dst: &mut str,
                                             last: bool)
                                             -> (DecoderResult, usize, usize) {
        // Only complete characters get written and the trailing continuation
        // bytes of a partially overwritten character are zeroed below, so
        // `dst` stays UTF-8.
        let bytes: &mut [u8] = unsafe { dst.as_bytes_mut() };
        let (result, read, written) = self.decode_to_utf8_without_replacement(src, bytes, last);
        zero_trailing_continuations(bytes, written);
        (result, read, written)
    }

    /// Incrementally decode a byte stream into UTF-8 with malformed sequences
    /// replaced with the REPLACEMENT CHARACTER with type system signaling
    /// of UTF-8 validity.
    ///
    /// This methods calls `decode_to_utf8` and then zeroes out up to three
    /// bytes that aren't logically part of the write in order to retain the
    /// UTF-8 validity even for the unwritten part of the buffer.
    pub fn decode_to_str(&mut self,
                         src: &[u8],
                         dst: &mut str,
                         last: bool)
                         -> (CoderResult, usize, usize, bool) {
        let bytes: &mut [u8] = unsafe { dst.as_bytes_mut() };
        let (result, read, written, replaced) = self.decode_to_utf8(src, bytes, last);
        zero_trailing_continuations(bytes, written);
        (result, read, written, replaced)
    }

    /// Incrementally decode a byte stream into UTF-8 _without replacement_
    /// using a `String` receiver.
    ///
    /// Like the others, this method follows the logic that the output buffer is
    /// caller-allocated. This method treats the capacity of the `String` as
    /// the output limit. That is, this method guarantees not to cause a
    /// reallocation of the backing buffer of `String`.
    ///
    /// The return value is a pair that contains the `DecoderResult` and the
    /// number of bytes read. The number of bytes written is signaled via
    /// the length of the `String` changing.
    pub fn decode_to_string_without_replacement(&mut self,
                                                src: &[u8],
                                                dst: &mut String,
                                                last: bool)
                                                -> (DecoderResult, usize) {
        // The spare capacity is zero-filled before decoding and truncated
        // to what was written afterwards.
        unsafe {
            let vec = dst.as_mut_vec();
            let old_len = vec.len();
            let capacity = vec.capacity();
            vec.resize(capacity, 0u8);
            let (result, read, written) =
                self.decode_to_utf8_without_replacement(src, &mut vec[old_len..], last);
            vec.truncate(old_len + written);
            (result, read)
        }
    }

    /// Incrementally decode a byte stream into UTF-8 with malformed sequences
    /// replaced with the REPLACEMENT CHARACTER using a `String` receiver.
    ///
    /// Like the others, this method follows the logic that the output buffer is
    /// caller-allocated. This method treats the capacity of the `String` as
    /// the output limit. That is, this method guarantees not to cause a
    /// reallocation of the backing buffer of `String`.
    ///
    /// The return value is a tuple that contains the `CoderResult`, the
    /// number of bytes read and a boolean indicating whether replacements
    /// were done. The number of bytes written is signaled via the length of
    /// the `String` changing.
    pub fn decode_to_string(&mut self,
                            src: &[u8],
                            dst: &mut String,
                            last: bool)
                            -> (CoderResult, usize, bool) {
        unsafe {
            let vec = dst.as_mut_vec();
            let old_len = vec.len();
            let capacity = vec.capacity();
            vec.resize(capacity, 0u8);
            let (result, read, written, replaced) = self.decode_to_utf8(src, &mut vec[old_len..], last);
            vec.truncate(old_len + written);
            (result, read, replaced)
        }
    }
}

pub(crate) fn zero_trailing_continuations(bytes: &mut [u8], written: usize) {
    let mut trail = written;
    while trail < bytes.len() && ((bytes[trail] & 0xC0) == 0x80) {
        bytes[trail] = 0;
        trail += 1;
    }
}

/// A converter that encodes a Unicode stream into bytes according to a
/// character encoding in a streaming (incremental) manner.
///
/// The various `encode_*` methods take an input buffer (`src`) and an output
/// buffer `dst` both of which are caller-allocated. There are variants for
/// both UTF-8 and UTF-16 input buffers.
///
/// An `encode_*` method encodes characters from `src` into bytes characters
/// stored into `dst` until one of the following three things happens:
///
/// 1. An unmappable character is encountered (`*_without_replacement`
///    variants only).
///
/// 2. The output buffer does not have room for the bytes of the next
///    character.
///
/// 3. All the input characters have been processed.
///
/// The `encode_*` method then returns tuple of a status indicating which one
/// of the three reasons to return happened, how many input code units (`u8`
/// when encoding from UTF-8 and `u16` when encoding from UTF-16) were read,
/// how many output bytes were written (except when encoding into `Vec<u8>`,
/// whose length change indicates this), and in the case of the variants that
/// perform replacement, a boolean indicating whether an unmappable
/// character was replaced with `?` during the call.
///
/// In the case of the `*_without_replacement` methods, the status is an
/// `EncoderResult` enumeration (possibilities `Unmappable`, `OutputFull` and
/// `InputEmpty` corresponding to the three cases listed above).
///
/// In the case of methods whose name does not end with
/// `*_without_replacement`, unmappable characters are automatically replaced
/// with `?` and unmappable characters do not cause the methods to return
/// early. When encoding to ISO-2022-JP, the `?` is written in the ASCII or
/// Roman state, so an escape back from the JIS X 0208 state may precede it.
///
/// When encoding from UTF-16, unpaired surrogates in the input are treated
/// as U+FFFD REPLACEMENT CHARACTERS. A high surrogate at the end of a buffer
/// passed with `last` set to `false` is held until the next call, so surrogate
/// pairs may be split across buffers.
///
/// The boolean argument `last` indicates that the end of the stream is reached
/// when all the characters in `src` have been consumed. An ISO-2022-JP
/// encoder returns to the ASCII state at that point.
///
/// During the processing of a single stream, the caller must call `encode_*`
/// zero or more times with `last` set to `false` and then call `encode_*` at
/// least once with `last` set to `true`. If `encode_*` returns `InputEmpty`,
/// the processing of the stream has ended. Otherwise, the caller must call
/// `encode_*` again with `last` set to `true` (or treat an `Unmappable` result
/// as a fatal error).
///
/// When the encoder returns `OutputFull` or the encoder returns `Unmappable`
/// and the caller does not wish to treat it as a fatal error, the input
/// buffer `src` may not have been completely consumed. In that case, the
/// caller must pass the unconsumed contents of `src` to `encode_*` again upon
/// the next call.
pub struct Encoder {
    encoding: &'static Encoding,
    variant: VariantEncoder,
    pending_high_surrogate: Option<u16>,
    pending_replacement: bool,
}

impl Encoder {
    fn new(encoding: &'static Encoding) -> Encoder {
        Encoder {
            encoding: encoding,
            variant: encoding.variant.new_variant_encoder(),
            pending_high_surrogate: None,
            pending_replacement: false,
        }
    }

    /// The `Encoding` this `Encoder` is for.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Make the encoder ready to process a new stream.
    pub fn reset(&mut self) {
        self.variant = self.encoding.variant.new_variant_encoder();
        self.pending_high_surrogate = None;
        self.pending_replacement = false;
    }

    fn pending_length(&self) -> usize {
        if self.pending_replacement {
            1
        } else {
            0
        }
    }

    /// Query the worst-case output size when encoding from UTF-16 without
    /// replacement.
    ///
    /// Returns the size of the output buffer in bytes that will not overflow
    /// given the current state of the encoder and `u16_length` number of
    /// additional input code units or `None` if `usize` would overflow.
    pub fn max_buffer_length_from_utf16_without_replacement(&self, u16_length: usize) -> Option<usize> {
        let held = if self.pending_high_surrogate.is_some() {
            1
        } else {
            0
        };
        let length = u16_length.checked_add(held)?;
        self.variant
            .max_buffer_length_from_utf16_without_replacement(length)?
            .checked_add(self.pending_length())
    }

    /// Query the worst-case output size when encoding from UTF-8 without
    /// replacement.
    ///
    /// Returns the size of the output buffer in bytes that will not overflow
    /// given the current state of the encoder and `byte_length` number of
    /// additional input code units or `None` if `usize` would overflow.
    pub fn max_buffer_length_from_utf8_without_replacement(&self, byte_length: usize) -> Option<usize> {
        // A held high surrogate turns into U+FFFD, three bytes of UTF-8.
        let held = if self.pending_high_surrogate.is_some() {
            3
        } else {
            0
        };
        let length = byte_length.checked_add(held)?;
        self.variant
            .max_buffer_length_from_utf8_without_replacement(length)?
            .checked_add(self.pending_length())
    }

    /// Query the worst-case output size when encoding from UTF-16 with
    /// replacement, assuming there are no unmappable characters.
    ///
    /// If the input does contain unmappables, the buffer may turn out too
    /// short and the encode call may return `OutputFull`.
    pub fn max_buffer_length_from_utf16_if_no_unmappables(&self, u16_length: usize) -> Option<usize> {
        self.max_buffer_length_from_utf16_without_replacement(u16_length)
    }

    /// Query the worst-case output size when encoding from UTF-8 with
    /// replacement, assuming there are no unmappable characters.
    pub fn max_buffer_length_from_utf8_if_no_unmappables(&self, byte_length: usize) -> Option<usize> {
        self.max_buffer_length_from_utf8_without_replacement(byte_length)
    }

    /// Query the worst-case output size when encoding from UTF-16 with
    /// replacement.
    ///
    /// The `?` written for an unmappable character (with its escape back to
    /// ASCII in ISO-2022-JP) never takes more room than the worst case for a
    /// mappable character of the same input length, so this is the same as
    /// the bound without replacement.
    pub fn max_buffer_length_from_utf16_with_replacement(&self, u16_length: usize) -> Option<usize> {
        self.max_buffer_length_from_utf16_without_replacement(u16_length)
    }

    /// Query the worst-case output size when encoding from UTF-8 with
    /// replacement.
    pub fn max_buffer_length_from_utf8_with_replacement(&self, byte_length: usize) -> Option<usize> {
        self.max_buffer_length_from_utf8_without_replacement(byte_length)
    }

    /// Encodes the held high surrogate, paired with `next` if that is a low
    /// surrogate. Returns the result and how many units of `next` were used.
    fn encode_held_surrogate(&mut self,
                             high: u16,
                             next: Option<u16>,
                             dst: &mut ByteDestination)
                             -> (EncoderResult, usize) {
        let (c, consumed) = match next {
            Some(low) if (low & 0xFC00) == 0xDC00 => {
                let astral = 0x10000u32 + (((high as u32) & 0x3FF) << 10) + ((low as u32) & 0x3FF);
                (::std::char::from_u32(astral).unwrap_or('\u{FFFD}'), 1usize)
            }
            _ => ('\u{FFFD}', 0usize),
        };
        let mut buffer = [0u8; 4];
        let mut source = Utf8Source::new(c.encode_utf8(&mut buffer));
        match self.variant.encode(&mut source, dst, false) {
            EncoderResult::OutputFull => (EncoderResult::OutputFull, 0),
            other => {
                self.pending_high_surrogate = None;
                (other, consumed)
            }
        }
    }

    fn encode_from_utf16_impl(&mut self,
                              src: &[u16],
                              dst: &mut ByteDestination,
                              last: bool)
                              -> (EncoderResult, usize) {
        let mut read = 0usize;
        if let Some(high) = self.pending_high_surrogate {
            if src.is_empty() && !last {
                return (EncoderResult::InputEmpty, 0);
            }
            let (result, consumed) = self.encode_held_surrogate(high, src.first().copied(), dst);
            if result != EncoderResult::InputEmpty {
                return (result, consumed);
            }
            read = consumed;
        }
        let rest = &src[read..];
        let (body, held) = match rest.last() {
            Some(&unit) if !last && (unit & 0xFC00) == 0xD800 => (&rest[..rest.len() - 1], Some(unit)),
            _ => (rest, None),
        };
        let mut source = Utf16Source::new(body);
        let result = self.variant.encode(&mut source, dst, last);
        read += source.consumed();
        if result == EncoderResult::InputEmpty {
            if let Some(unit) = held {
                self.pending_high_surrogate = Some(unit);
                read += 1;
            }
        }
        (result, read)
    }

    fn encode_from_utf8_impl(&mut self,
                             src: &str,
                             dst: &mut ByteDestination,
                             last: bool)
                             -> (EncoderResult, usize) {
        if let Some(high) = self.pending_high_surrogate {
            let (result, _) = self.encode_held_surrogate(high, None, dst);
            if result != EncoderResult::InputEmpty {
                return (result, 0);
            }
        }
        let mut source = Utf8Source::new(src);
        let result = self.variant.encode(&mut source, dst, last);
        (result, source.consumed())
    }

    fn write_replacement(dst: &mut ByteDestination) -> bool {
        // Every encoder is in a state where ASCII is allowed when it reports
        // an unmappable character.
        dst.write_all(b"?")
    }

    fn flush_pending_replacement(&mut self, dst: &mut ByteDestination) -> bool {
        if self.pending_replacement {
            if !Encoder::write_replacement(dst) {
                return false;
            }
            self.pending_replacement = false;
        }
        true
    }

    /// Incrementally encode into byte stream from UTF-16 _without replacement_.
    ///
    /// See the documentation of the struct for documentation for `encode_*`
    /// methods collectively.
    pub fn encode_from_utf16_without_replacement(&mut self,
                                                 src: &[u16],
                                                 dst: &mut [u8],
                                                 last: bool)
                                                 -> (EncoderResult, usize, usize) {
        let mut dest = ByteDestination::new(dst);
        if !self.flush_pending_replacement(&mut dest) {
            return (EncoderResult::OutputFull, 0, 0);
        }
        let (result, read) = self.encode_from_utf16_impl(src, &mut dest, last);
        (result, read, dest.written())
    }

    /// Incrementally encode into byte stream from UTF-8 _without replacement_.
    ///
    /// See the documentation of the struct for documentation for `encode_*`
    /// methods collectively.
    pub fn encode_from_utf8_without_replacement(&mut self,
                                                src: &str,
                                                dst: &mut [u8],
                                                last: bool)
                                                -> (EncoderResult, usize, usize) {
        let mut dest = ByteDestination::new(dst);
        if !self.flush_pending_replacement(&mut dest) {
            return (EncoderResult::OutputFull, 0, 0);
        }
        let (result, read) = self.encode_from_utf8_impl(src, &mut dest, last);
        (result, read, dest.written())
    }

    /// Incrementally encode into byte stream from UTF-16 with unmappable
    /// characters replaced with `?`.
    ///
    /// See the documentation of the struct for documentation for `encode_*`
    /// methods collectively.
    pub fn encode_from_utf16(&mut self,
                             src: &[u16],
                             dst: &mut [u8],
                             last: bool)
                             -> (CoderResult, usize, usize, bool) {
        let mut dest = ByteDestination::new(dst);
        let mut had_replacements = false;
        if self.pending_replacement {
            if !self.flush_pending_replacement(&mut dest) {
                return (CoderResult::OutputFull, 0, 0, false);
            }
            had_replacements = true;
        }
        let mut total_read = 0usize;
        loop {
            let (result, read) = self.encode_from_utf16_impl(&src[total_read..], &mut dest, last);
            total_read += read;
            match result {
                EncoderResult::InputEmpty => {
                    return (CoderResult::InputEmpty, total_read, dest.written(), had_replacements);
                }
                EncoderResult::OutputFull => {
                    return (CoderResult::OutputFull, total_read, dest.written(), had_replacements);
                }
                EncoderResult::Unmappable(_) => {
                    had_replacements = true;
                    if !Encoder::write_replacement(&mut dest) {
                        self.pending_replacement = true;
                        return (CoderResult::OutputFull, total_read, dest.written(), had_replacements);
                    }
                }
            }
        }
    }

    /// Incrementally encode into byte stream from UTF-8 with unmappable
    /// characters replaced with `?`.
    ///
    /// See the documentation of the struct for documentation for `encode_*`
    /// methods collectively.
    pub fn encode_from_utf8(&mut self,
                            src: &str,
                            dst: &mut [u8],
                            last: bool)
                            -> (CoderResult, usize, usize, bool) {
        let mut dest = ByteDestination::new(dst);
        let mut had_replacements = false;
        if self.pending_replacement {
            if !self.flush_pending_replacement(&mut dest) {
                return (CoderResult::OutputFull, 0, 0, false);
            }
            had_replacements = true;
        }
        let mut total_read = 0usize;
        loop {
            let (result, read) = self.encode_from_utf8_impl(&src[total_read..], &mut dest, last);
            total_read += read;
            match result {
                EncoderResult::InputEmpty => {
                    return (CoderResult::InputEmpty, total_read, dest.written(), had_replacements);
                }
                EncoderResult::OutputFull => {
                    return (CoderResult::OutputFull, total_read, dest.written(), had_replacements);
                }
                EncoderResult::Unmappable(_) => {
                    had_replacements = true;
                    if !Encoder::write_replacement(&mut dest) {
                        self.pending_replacement = true;
                        return (CoderResult::OutputFull, total_read, dest.written(), had_replacements);
                    }
                }
            }
        }
    }

    /// Incrementally encode into byte stream from UTF-8 _without replacement_
    /// into the spare capacity of a `Vec<u8>`.
    ///
    /// This method never reallocates the `Vec`. The number of bytes written
    /// is signaled via the length of the `Vec` changing.
    pub fn encode_from_utf8_to_vec_without_replacement(&mut self,
                                                       src: &str,
                                                       dst: &mut Vec<u8>,
                                                       last: bool)
                                                       -> (EncoderResult, usize) {
        let old_len = dst.len();
        let capacity = dst.capacity();
        dst.resize(capacity, 0u8);
        let (result, read, written) =
            self.encode_from_utf8_without_replacement(src, &mut dst[old_len..], last);
        dst.truncate(old_len + written);
        (result, read)
    }

    /// Incrementally encode into byte stream from UTF-8 with unmappable
    /// characters replaced with `?` into the spare capacity of a `Vec<u8>`.
    ///
    /// This method never reallocates the `Vec`. The number of bytes written
    /// is signaled via the length of the `Vec` changing.
    pub fn encode_from_utf8_to_vec(&mut self,
                                   src: &str,
                                   dst: &mut Vec<u8>,
                                   last: bool)
                                   -> (CoderResult, usize, bool) {
        let old_len = dst.len();
        let capacity = dst.capacity();
        dst.resize(capacity, 0u8);
        let (result, read, written, replaced) = self.encode_from_utf8(src, &mut dst[old_len..], last);
        dst.truncate(old_len + written);
        (result, read, replaced)
    }
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_label() {
        assert_eq!(Encoding::for_label(b"utf-8"), Some(UTF_8));
        assert_eq!(Encoding::for_label(b"UTF-8 "), Some(UTF_8));
        assert_eq!(Encoding::for_label(b" \t\n\x0C\rLaTiN1\r\n"), Some(WINDOWS_1252));
        assert_eq!(Encoding::for_label(b"utf 8"), None);
        assert_eq!(Encoding::for_label(b""), None);
        assert_eq!(Encoding::for_label(b"   "), None);
        assert_eq!(Encoding::for_label(b"cseucpkdfmtjapanesee"), None);
        assert_eq!(Encoding::for_label(b"iso-2022-kr"), Some(REPLACEMENT));
        assert_eq!(Encoding::for_label(b"utf-16"), Some(UTF_16LE));
    }

    #[test]
    fn test_for_label_no_replacement() {
        assert_eq!(Encoding::for_label_no_replacement(b"iso-2022-kr"), None);
        assert_eq!(Encoding::for_label_no_replacement(b"hz-gb-2312"), None);
        assert_eq!(Encoding::for_label_no_replacement(b"gbk"), Some(GBK));
    }

    #[test]
    fn test_for_name() {
        assert_eq!(Encoding::for_name(b"shift_jis"), Some(SHIFT_JIS));
        assert_eq!(Encoding::for_name(b"Shift_JIS"), Some(SHIFT_JIS));
        assert_eq!(Encoding::for_name(b"sjis"), None);
        assert_eq!(Encoding::for_name(b"utf-8 "), None);
        assert_eq!(Encoding::for_name(b"replacement"), Some(REPLACEMENT));
    }

    #[test]
    fn test_for_bom() {
        assert_eq!(Encoding::for_bom(b"\xEF\xBB\xBFa"), Some((UTF_8, 3)));
        assert_eq!(Encoding::for_bom(b"\xFF\xFEa"), Some((UTF_16LE, 2)));
        assert_eq!(Encoding::for_bom(b"\xFE\xFF"), Some((UTF_16BE, 2)));
        assert_eq!(Encoding::for_bom(b"\xEF\xBB"), None);
        assert_eq!(Encoding::for_bom(b""), None);
    }

    #[test]
    fn test_attributes() {
        assert_eq!(UTF_8.name(), "UTF-8");
        assert!(UTF_8.can_encode_everything());
        assert!(UTF_16BE.can_encode_everything());
        assert!(!GB18030.can_encode_everything());
        assert!(!ISO_2022_JP.is_ascii_compatible());
        assert!(SHIFT_JIS.is_ascii_compatible());
        assert_eq!(REPLACEMENT.output_encoding(), UTF_8);
        assert_eq!(UTF_16LE.output_encoding(), UTF_8);
        assert_eq!(EUC_KR.output_encoding(), EUC_KR);
        assert!(X_USER_DEFINED.is_single_byte());
        assert!(!UTF_8.is_single_byte());
        assert_eq!(format!("{:?}", BIG5), "Encoding { Big5 }");
    }

    #[test]
    fn test_new_encoder_uses_output_encoding() {
        assert_eq!(UTF_16BE.new_encoder().encoding(), UTF_8);
        assert_eq!(WINDOWS_1252.new_encoder().encoding(), WINDOWS_1252);
    }

    #[test]
    fn test_decode_convenience() {
        let (cow, encoding, had_errors) = WINDOWS_1252.decode(b"\xEF\xBB\xBFcaf\xC3\xA9");
        assert_eq!(&cow[..], "caf\u{E9}");
        assert_eq!(encoding, UTF_8);
        assert!(!had_errors);
        match cow {
            Cow::Borrowed(_) => {}
            Cow::Owned(_) => unreachable!(),
        }
        let (cow, encoding, had_errors) = WINDOWS_1252.decode(b"caf\xE9");
        assert_eq!(&cow[..], "caf\u{E9}");
        assert_eq!(encoding, WINDOWS_1252);
        assert!(!had_errors);
        let (cow, had_errors) = UTF_8.decode_with_bom_removal(b"\xEF\xBB\xBF\xFF");
        assert_eq!(&cow[..], "\u{FFFD}");
        assert!(had_errors);
        let (cow, had_errors) = UTF_8.decode_without_bom_handling(b"\xEF\xBB\xBFa");
        assert_eq!(&cow[..], "\u{FEFF}a");
        assert!(!had_errors);
        assert!(UTF_8.decode_without_bom_handling_and_without_replacement(b"a\xFF").is_none());
        assert_eq!(&SHIFT_JIS.decode_without_bom_handling_and_without_replacement(b"\x82\xA0")
                       .unwrap()[..],
                   "\u{3042}");
    }

    #[test]
    fn test_encode_convenience() {
        let (cow, encoding, had_errors) = UTF_16LE.encode("\u{1F600}");
        assert_eq!(&cow[..], "\u{1F600}".as_bytes());
        assert_eq!(encoding, UTF_8);
        assert!(!had_errors);
        let (cow, encoding, had_errors) = WINDOWS_1252.encode("caf\u{E9}\u{3042}");
        assert_eq!(&cow[..], b"caf\xE9?");
        assert_eq!(encoding, WINDOWS_1252);
        assert!(had_errors);
        let (cow, _, had_errors) = ISO_2022_JP.encode("\u{3042}\u{1F600}");
        assert_eq!(&cow[..], b"\x1B$B$\"\x1B(B?");
        assert!(had_errors);
    }

    #[test]
    fn test_malformed_start() {
        let mut decoder = UTF_8.new_decoder_without_bom_handling();
        let mut dst = [0u8; 16];
        let (result, read, written) = decoder.decode_to_utf8_without_replacement(b"caf\xE9", &mut dst[..], true);
        assert_eq!(result, DecoderResult::Malformed(1, 0));
        assert_eq!(result.malformed_start(read), Some(3));
        assert_eq!(written, 3);
        assert_eq!(DecoderResult::InputEmpty.malformed_start(4), None);
    }

    #[test]
    fn test_unmappable_start() {
        let mut encoder = WINDOWS_1252.new_encoder();
        let mut dst = [0u8; 16];
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement("ab\u{3042}c", &mut dst[..], true);
        assert_eq!(result, EncoderResult::Unmappable('\u{3042}'));
        assert_eq!(read, 5);
        assert_eq!(written, 2);
        assert_eq!(result.unmappable_start_utf8(read), Some(2));
    }

    #[test]
    #[should_panic]
    fn test_finished_decoder_panics() {
        let mut decoder = UTF_8.new_decoder();
        let mut dst = [0u16; 4];
        let _ = decoder.decode_to_utf16(b"a", &mut dst[..], true);
        let _ = decoder.decode_to_utf16(b"a", &mut dst[..], true);
    }

    #[test]
    fn test_reset_rearms_sniffing() {
        let mut decoder = WINDOWS_1252.new_decoder();
        let mut dst = [0u16; 4];
        let (result, read, written, _) = decoder.decode_to_utf16(b"\xFF\xFEa\x00", &mut dst[..], true);
        assert_eq!(result, CoderResult::InputEmpty);
        assert_eq!(read, 4);
        assert_eq!(written, 1);
        assert_eq!(decoder.encoding(), UTF_16LE);
        decoder.reset();
        assert_eq!(decoder.encoding(), WINDOWS_1252);
        let (_, _, written, _) = decoder.decode_to_utf16(b"\xE9", &mut dst[..], true);
        assert_eq!(written, 1);
        assert_eq!(dst[0], 0xE9);
    }

    #[test]
    fn test_pending_replacement_across_calls() {
        let mut decoder = UTF_8.new_decoder_without_bom_handling();
        let mut dst = [0u8; 2];
        let (result, read, written, replaced) = decoder.decode_to_utf8(b"\xFFa", &mut dst[..], true);
        assert_eq!(result, CoderResult::OutputFull);
        assert_eq!(read, 1);
        assert_eq!(written, 0);
        assert!(replaced);
        let mut dst = [0u8; 8];
        let (result, read, written, _) = decoder.decode_to_utf8(b"a", &mut dst[..], true);
        assert_eq!(result, CoderResult::InputEmpty);
        assert_eq!(read, 1);
        assert_eq!(&dst[..written], b"\xEF\xBF\xBDa");
    }
}
