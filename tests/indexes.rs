// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

//! Sweeps over every byte pair of the double-byte encodings and every
//! four-byte gb18030 sequence.

use charconv::*;

/// Decodes every lead/trail pair and checks that each character that
/// comes out alone encodes to bytes that decode back to it.
fn sweep_pairs(encoding: &'static Encoding, leads: std::ops::RangeInclusive<u8>) -> usize {
    let mut mapped = 0usize;
    for lead in leads {
        for trail in 0x40u8..=0xFE {
            let bytes = [lead, trail];
            let (string, had_errors) = encoding.decode_without_bom_handling(&bytes[..]);
            if had_errors {
                continue;
            }
            let mut chars = string.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => continue,
            };
            mapped += 1;
            let mut buf = [0u8; 4];
            let (encoded, _, had_errors) = encoding.encode(c.encode_utf8(&mut buf));
            if had_errors {
                // Decode-only pointers such as HKSCS in Big5 or the IBM
                // extensions duplicated in Shift_JIS's NEC row.
                continue;
            }
            let (back, _) = encoding.decode_without_bom_handling(&encoded[..]);
            assert_eq!(back.chars().next(),
                       Some(c),
                       "{} {:02X} {:02X} -> U+{:04X} -> {:?}",
                       encoding.name(),
                       lead,
                       trail,
                       c as u32,
                       encoded);
        }
    }
    mapped
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow
fn test_shift_jis_sweep() {
    assert!(sweep_pairs(SHIFT_JIS, 0x81..=0xFC) > 7000);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow
fn test_euc_jp_sweep() {
    assert!(sweep_pairs(EUC_JP, 0xA1..=0xFE) > 6800);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow
fn test_euc_kr_sweep() {
    assert!(sweep_pairs(EUC_KR, 0x81..=0xFE) > 17000);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow
fn test_big5_sweep() {
    assert!(sweep_pairs(BIG5, 0x81..=0xFE) > 13000);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow
fn test_gbk_sweep() {
    assert!(sweep_pairs(GBK, 0x81..=0xFE) > 21000);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow
fn test_jis0212_decodes_but_does_not_encode() {
    let mut decoded = 0usize;
    for lead in 0xA1u8..=0xFE {
        for trail in 0xA1u8..=0xFE {
            let bytes = [0x8F, lead, trail];
            let (string, had_errors) = EUC_JP.decode_without_bom_handling(&bytes[..]);
            if had_errors {
                continue;
            }
            decoded += 1;
            let (encoded, _, _) = EUC_JP.encode(&string[..]);
            assert_ne!(&encoded[..], &bytes[..]);
        }
    }
    assert!(decoded > 5800);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow
fn test_gb18030_four_byte_round_trip() {
    let mut count = 0usize;
    let mut two_byte = 0usize;
    for b1 in 0x81u8..=0x84 {
        for b2 in 0x30u8..=0x39 {
            for b3 in 0x81u8..=0xFE {
                for b4 in 0x30u8..=0x39 {
                    let bytes = [b1, b2, b3, b4];
                    let (string, had_errors) = GB18030.decode_without_bom_handling(&bytes[..]);
                    if had_errors {
                        continue;
                    }
                    count += 1;
                    let (encoded, _, had_errors) = GB18030.encode(&string[..]);
                    assert!(!had_errors);
                    if encoded.len() == 2 {
                        // GB18030-2022 gave these a two-byte form, which the
                        // encoder prefers.
                        let (back, _) = GB18030.decode_without_bom_handling(&encoded[..]);
                        assert_eq!(back, string);
                        two_byte += 1;
                        continue;
                    }
                    assert_eq!(&encoded[..], &bytes[..], "U+{:04X}", string.chars().next().map_or(0, |c| c as u32));
                }
            }
        }
    }
    // Everything in the BMP that the two-byte index leaves out.
    assert!(count > 39000);
    // U+FE10..=U+FE19 and U+9FB4..=U+9FBB
    assert_eq!(two_byte, 18);

    // Astral planes use the linear range from 0x90 0x30 0x81 0x30.
    let (string, _) = GB18030.decode_without_bom_handling(b"\x90\x30\x81\x30\xE3\x32\x9A\x35");
    assert_eq!(&string[..], "\u{10000}\u{10FFFF}");
    let (encoded, _, _) = GB18030.encode(&string[..]);
    assert_eq!(&encoded[..], b"\x90\x30\x81\x30\xE3\x32\x9A\x35");
}

fn decodes_to(encoding: &'static Encoding, bytes: &[u8], expect: &str) {
    let (string, had_errors) = encoding.decode_without_bom_handling(bytes);
    assert!(!had_errors, "{} {:?}", encoding.name(), bytes);
    assert_eq!(&string[..], expect, "{} {:?}", encoding.name(), bytes);
}

fn encodes_to(encoding: &'static Encoding, string: &str, expect: &[u8]) {
    let (bytes, _, had_errors) = encoding.encode(string);
    assert!(!had_errors, "{} {:?}", encoding.name(), string);
    assert_eq!(&bytes[..], expect, "{} {:?}", encoding.name(), string);
}

#[test]
fn test_jis0208_index_values() {
    // Pointers 32 and 33 are the Windows forms, not U+301C and U+2016.
    decodes_to(EUC_JP, b"\xA1\xC1\xA1\xC2", "\u{FF5E}\u{2225}");
    decodes_to(SHIFT_JIS, b"\x81\x60\x81\x61", "\u{FF5E}\u{2225}");
    decodes_to(ISO_2022_JP, b"\x1B$B!A!B\x1B(B", "\u{FF5E}\u{2225}");
    encodes_to(EUC_JP, "\u{FF5E}\u{2225}", b"\xA1\xC1\xA1\xC2");
    encodes_to(SHIFT_JIS, "\u{FF5E}\u{2225}", b"\x81\x60\x81\x61");
    encodes_to(ISO_2022_JP, "\u{FF5E}", b"\x1B$B!A\x1B(B");
    // Pointer 8647 is in the NEC-selected IBM rows.
    decodes_to(EUC_JP, b"\xFC\xFE", "\u{FF02}");
    decodes_to(SHIFT_JIS, b"\xEE\xFC", "\u{FF02}");
    // Pointer 10716 starts the IBM extensions.
    decodes_to(SHIFT_JIS, b"\xFA\x40", "\u{2170}");
    decodes_to(SHIFT_JIS, b"\x81\x40", "\u{3000}");
    // JIS X 0212 has its own tilde.
    decodes_to(EUC_JP, b"\x8F\xA2\xB7", "\u{FF5E}");
    decodes_to(EUC_JP, b"\x8F\xB0\xA1", "\u{4E02}");
}

#[test]
fn test_big5_index_values() {
    // The first HKSCS pointer and the rows Python's codecs leave out.
    decodes_to(BIG5, b"\x87\x40", "\u{43F0}");
    decodes_to(BIG5, b"\x87\x7A", "\u{3875}");
    decodes_to(BIG5, b"\xC6\xA1", "\u{2460}");
    decodes_to(BIG5, b"\xFA\x40", "\u{20547}");
    decodes_to(BIG5, b"\xA3\xC0", "\u{2400}");
    decodes_to(BIG5, b"\xA3\xE1", "\u{20AC}");
    decodes_to(BIG5, b"\xFE\xFE", "\u{79D4}");
    encodes_to(BIG5, "\u{2400}\u{2421}", b"\xA3\xC0\xA3\xE0");
    encodes_to(BIG5, "\u{5341}", b"\xA4\x51");
    // HKSCS-only pointers decode but never encode.
    let (_, _, had_errors) = BIG5.encode("\u{3875}");
    assert!(had_errors);
}

#[test]
fn test_gb18030_index_values() {
    decodes_to(GB18030, b"\xA8\xBC", "\u{1E3F}");
    decodes_to(GB18030, b"\xA8\xBF", "\u{01F9}");
    decodes_to(GB18030, b"\xA3\xA0", "\u{3000}");
    // GB18030-2022 replaced these private use mappings.
    decodes_to(GB18030, b"\xA6\xD9\xFE\x59", "\u{FE10}\u{9FB4}");
    encodes_to(GB18030, "\u{FE10}\u{9FB4}", b"\xA6\xD9\xFE\x59");
    // The old private use code points still encode to the same bytes.
    encodes_to(GB18030, "\u{E78D}\u{E81E}\u{E864}", b"\xA6\xD9\xFE\x59\xFE\xA0");
    encodes_to(GBK, "\u{E78D}\u{FE10}", b"\xA6\xD9\xA6\xD9");
    // The four-byte forms are still accepted.
    decodes_to(GB18030, b"\x82\x35\x90\x37\x82\x35\x91\x32", "\u{9FB4}\u{9FB9}");
    encodes_to(GB18030, "\u{3000}", b"\xA1\xA1");
}

#[test]
fn test_euc_kr_index_values() {
    decodes_to(EUC_KR, b"\x81\x41", "\u{AC02}");
    decodes_to(EUC_KR, b"\xB0\xA1", "\u{AC00}");
    decodes_to(EUC_KR, b"\xC8\xFE", "\u{D79D}");
    decodes_to(EUC_KR, b"\xFD\xFE", "\u{8A70}");
    decodes_to(EUC_KR, b"\xA2\xE6", "\u{20AC}");
    encodes_to(EUC_KR, "\u{AC02}\u{8A70}", b"\x81\x41\xFD\xFE");
    // Unassigned pointers at both ends of the user-defined area.
    let (_, had_errors) = EUC_KR.decode_without_bom_handling(b"\xC9\xA1");
    assert!(had_errors);
    let (_, had_errors) = EUC_KR.decode_without_bom_handling(b"\xFE\xFE");
    assert!(had_errors);
}
