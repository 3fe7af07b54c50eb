// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pointer lookups over the tables in `data`.
//!
//! Decoding is a direct array access. Encoding needs the inverse mapping,
//! which is built on first use and then shared by all encoders.

use std::sync::OnceLock;

use crate::data::*;

/// Sorted by code point, one pointer per code point.
type ReverseIndex = Vec<(u32, u16)>;

#[inline(always)]
fn lookup_u16(table: &[u16], pointer: usize) -> u16 {
    match table.get(pointer) {
        Some(&bmp) => bmp,
        None => 0,
    }
}

#[inline(always)]
pub fn jis0208_decode(pointer: usize) -> u16 {
    lookup_u16(&JIS0208_INDEX[..], pointer)
}

#[inline(always)]
pub fn jis0212_decode(pointer: usize) -> u16 {
    lookup_u16(&JIS0212_INDEX[..], pointer)
}

#[inline(always)]
pub fn euc_kr_decode(pointer: usize) -> u16 {
    lookup_u16(&EUC_KR_INDEX[..], pointer)
}

#[inline(always)]
pub fn gb18030_decode(pointer: usize) -> u16 {
    lookup_u16(&GB18030_INDEX[..], pointer)
}

pub fn big5_decode(pointer: usize) -> Option<char> {
    let low_bits = big5_low_bits(pointer);
    if low_bits == 0 {
        return None;
    }
    if big5_is_astral(pointer) {
        ::std::char::from_u32(0x20000 | low_bits as u32)
    } else {
        ::std::char::from_u32(low_bits as u32)
    }
}

/// Half-width katakana U+FF61..=U+FF9F as the full-width forms that
/// ISO-2022-JP can carry.
#[inline(always)]
pub fn iso_2022_jp_katakana(c: char) -> Option<u16> {
    let i = (c as usize).wrapping_sub(0xFF61);
    ISO_2022_JP_KATAKANA.get(i).copied()
}

pub fn gb18030_range_decode(pointer: u32) -> Option<char> {
    if (pointer > 39419 && pointer < 189000) || pointer > 1237575 {
        return None;
    }
    if pointer >= 189000 {
        return ::std::char::from_u32(0x10000 + pointer - 189000);
    }
    if pointer == 7457 {
        return Some('\u{E7C7}');
    }
    let i = GB18030_RANGES.partition_point(|&(start, _)| start <= pointer);
    let (start, code_point) = GB18030_RANGES[i - 1];
    ::std::char::from_u32(code_point + pointer - start)
}

pub fn gb18030_range_encode(c: char) -> u32 {
    let code_point = c as u32;
    if code_point == 0xE7C7 {
        return 7457;
    }
    if code_point >= 0x10000 {
        return 189000 + code_point - 0x10000;
    }
    let i = GB18030_RANGES.partition_point(|&(_, start)| start <= code_point);
    debug_assert!(i > 0);
    let (pointer, start) = GB18030_RANGES[i - 1];
    pointer + code_point - start
}

fn build_reverse<F>(name: &'static str, entries: F, last_for: &[u32]) -> ReverseIndex
    where F: Iterator<Item = (u32, u16)>
{
    let mut all: ReverseIndex = entries.filter(|&(code_point, _)| code_point != 0).collect();
    // Stable, so the pointers of each code point stay in ascending order.
    all.sort_by_key(|&(code_point, _)| code_point);
    let mut reverse: ReverseIndex = Vec::with_capacity(all.len());
    for (code_point, pointer) in all {
        match reverse.last_mut() {
            Some(last) if last.0 == code_point => {
                if last_for.contains(&code_point) {
                    last.1 = pointer;
                }
            }
            _ => reverse.push((code_point, pointer)),
        }
    }
    tracing::debug!(index = name, entries = reverse.len(), "built reverse index");
    reverse
}

fn reverse_lookup(reverse: &ReverseIndex, c: char) -> Option<usize> {
    let code_point = c as u32;
    reverse.binary_search_by_key(&code_point, |&(cp, _)| cp)
        .ok()
        .map(|i| reverse[i].1 as usize)
}

fn from_table(table: &'static [u16]) -> impl Iterator<Item = (u32, u16)> {
    table.iter().enumerate().map(|(pointer, &bmp)| (bmp as u32, pointer as u16))
}

/// The first pointer for `c` in the jis0208 index, as long as it is one
/// that EUC-JP and ISO-2022-JP can express.
pub fn jis0208_encode(c: char) -> Option<usize> {
    static REVERSE: OnceLock<ReverseIndex> = OnceLock::new();
    let reverse = REVERSE.get_or_init(|| build_reverse("jis0208", from_table(&JIS0208_INDEX[..]), &[]));
    reverse_lookup(reverse, c).filter(|&pointer| pointer < 94 * 94)
}

/// The first pointer for `c` in the jis0208 index outside the range
/// 8272..=8835, which Shift_JIS never produces.
pub fn shift_jis_encode(c: char) -> Option<usize> {
    static REVERSE: OnceLock<ReverseIndex> = OnceLock::new();
    let reverse = REVERSE.get_or_init(|| {
        let entries = from_table(&JIS0208_INDEX[..])
            .filter(|&(_, pointer)| pointer < 8272 || pointer > 8835);
        build_reverse("shift_jis", entries, &[])
    });
    reverse_lookup(reverse, c)
}

pub fn euc_kr_encode(c: char) -> Option<usize> {
    static REVERSE: OnceLock<ReverseIndex> = OnceLock::new();
    let reverse = REVERSE.get_or_init(|| build_reverse("euc_kr", from_table(&EUC_KR_INDEX[..]), &[]));
    reverse_lookup(reverse, c)
}

/// Private use code points that GB18030-2022 moved out of the two-byte
/// index. They still encode to their old two-byte pointers.
static GB18030_PUA_POINTERS: [(u16, u16); 18] = [(0xE78D, 7182), (0xE78E, 7183), (0xE78F, 7184),
                                                 (0xE790, 7185), (0xE791, 7186), (0xE792, 7187),
                                                 (0xE793, 7188), (0xE794, 7201), (0xE795, 7202),
                                                 (0xE796, 7208), (0xE81E, 23775), (0xE826, 23783),
                                                 (0xE82B, 23788), (0xE82C, 23789), (0xE832, 23795),
                                                 (0xE843, 23812), (0xE854, 23829), (0xE864, 23845)];

pub fn gb18030_encode(c: char) -> Option<usize> {
    let code_point = c as u32;
    if code_point >= 0xE78D && code_point <= 0xE864 {
        if let Some(&(_, pointer)) = GB18030_PUA_POINTERS.iter().find(|&&(pua, _)| pua as u32 == code_point) {
            return Some(pointer as usize);
        }
    }
    static REVERSE: OnceLock<ReverseIndex> = OnceLock::new();
    let reverse = REVERSE.get_or_init(|| build_reverse("gb18030", from_table(&GB18030_INDEX[..]), &[]));
    reverse_lookup(reverse, c)
}

/// Pointers below the HKSCS-only rows are never produced; for six code
/// points that appear twice, the last pointer wins.
pub fn big5_encode(c: char) -> Option<usize> {
    static REVERSE: OnceLock<ReverseIndex> = OnceLock::new();
    let reverse = REVERSE.get_or_init(|| {
        let entries = ((0xA1 - 0x81) * 157..BIG5_POINTER_COUNT).filter_map(|pointer| {
            big5_decode(pointer).map(|c| (c as u32, pointer as u16))
        });
        build_reverse("big5",
                      entries,
                      &[0x2550, 0x255E, 0x2561, 0x256A, 0x5341, 0x5345])
    });
    reverse_lookup(reverse, c)
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gb18030_ranges() {
        assert_eq!(gb18030_range_decode(0), Some('\u{80}'));
        assert_eq!(gb18030_range_decode(7457), Some('\u{E7C7}'));
        assert_eq!(gb18030_range_decode(39419), Some('\u{FFFF}'));
        assert_eq!(gb18030_range_decode(39420), None);
        assert_eq!(gb18030_range_decode(188999), None);
        assert_eq!(gb18030_range_decode(189000), Some('\u{10000}'));
        assert_eq!(gb18030_range_decode(1237575), Some('\u{10FFFF}'));
        assert_eq!(gb18030_range_decode(1237576), None);
        assert_eq!(gb18030_range_encode('\u{80}'), 0);
        assert_eq!(gb18030_range_encode('\u{E7C7}'), 7457);
        assert_eq!(gb18030_range_encode('\u{FFFF}'), 39419);
        assert_eq!(gb18030_range_encode('\u{10FFFF}'), 1237575);
    }

    #[test]
    fn test_big5_last_pointer() {
        for &bmp in [0x2550u32, 0x5341u32].iter() {
            let c = ::std::char::from_u32(bmp).unwrap();
            let last = ((0xA1 - 0x81) * 157..BIG5_POINTER_COUNT)
                .filter(|&p| big5_decode(p) == Some(c))
                .max();
            assert_eq!(big5_encode(c), last);
        }
        // Pointers in the HKSCS-only rows below 0xA1 never come back.
        let first = ((0xA1 - 0x81) * 157..BIG5_POINTER_COUNT)
            .filter_map(|p| big5_decode(p).map(|c| (p, c)))
            .find(|&(p, c)| big5_encode(c) == Some(p));
        assert!(first.is_some());
    }

    #[test]
    fn test_shift_jis_skips_nec_selected() {
        // U+2170 SMALL ROMAN NUMERAL ONE is both NEC-selected and IBM.
        let pointer = shift_jis_encode('\u{2170}').unwrap();
        assert!(pointer >= 10716);
        let pointer = jis0208_encode('\u{2170}').unwrap();
        assert!(pointer >= 8272 && pointer <= 8835);
    }

    #[test]
    fn test_katakana() {
        assert_eq!(iso_2022_jp_katakana('\u{FF61}'), Some(0x3002));
        assert_eq!(iso_2022_jp_katakana('\u{FF9F}'), Some(0x309C));
        assert_eq!(iso_2022_jp_katakana('\u{FFA0}'), None);
        assert_eq!(iso_2022_jp_katakana('a'), None);
    }
}
