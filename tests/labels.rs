// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

use charconv::*;

static LABELS: [(&'static str, &'static Encoding); 44] =
    [("unicode-1-1-utf-8", &UTF_8_INIT),
     ("unicode11utf8", &UTF_8_INIT),
     ("x-unicode20utf8", &UTF_8_INIT),
     ("utf8", &UTF_8_INIT),
     ("x-sjis", &SHIFT_JIS_INIT),
     ("ms932", &SHIFT_JIS_INIT),
     ("windows-31j", &SHIFT_JIS_INIT),
     ("csshiftjis", &SHIFT_JIS_INIT),
     ("x-euc-jp", &EUC_JP_INIT),
     ("cseucpkdfmtjapanese", &EUC_JP_INIT),
     ("csiso2022jp", &ISO_2022_JP_INIT),
     ("ks_c_5601-1987", &EUC_KR_INIT),
     ("windows-949", &EUC_KR_INIT),
     ("gb2312", &GBK_INIT),
     ("x-gbk", &GBK_INIT),
     ("chinese", &GBK_INIT),
     ("iso-ir-58", &GBK_INIT),
     ("gb18030", &GB18030_INIT),
     ("big5-hkscs", &BIG5_INIT),
     ("x-x-big5", &BIG5_INIT),
     ("cn-big5", &BIG5_INIT),
     ("csiso2022kr", &REPLACEMENT_INIT),
     ("hz-gb-2312", &REPLACEMENT_INIT),
     ("iso-2022-cn", &REPLACEMENT_INIT),
     ("utf-16", &UTF_16LE_INIT),
     ("unicode", &UTF_16LE_INIT),
     ("unicodefffe", &UTF_16BE_INIT),
     ("utf-16be", &UTF_16BE_INIT),
     ("latin1", &WINDOWS_1252_INIT),
     ("ascii", &WINDOWS_1252_INIT),
     ("us-ascii", &WINDOWS_1252_INIT),
     ("iso-8859-1", &WINDOWS_1252_INIT),
     ("iso-8859-9", &WINDOWS_1254_INIT),
     ("tis-620", &WINDOWS_874_INIT),
     ("x-cp1250", &WINDOWS_1250_INIT),
     ("koi", &KOI8_R_INIT),
     ("koi8-ru", &KOI8_U_INIT),
     ("mac", &MACINTOSH_INIT),
     ("x-mac-ukrainian", &X_MAC_CYRILLIC_INIT),
     ("csisolatinhebrew", &ISO_8859_8_INIT),
     ("visual", &ISO_8859_8_INIT),
     ("logical", &ISO_8859_8_I_INIT),
     ("l9", &ISO_8859_15_INIT),
     ("x-user-defined", &X_USER_DEFINED_INIT)];

#[test]
fn test_known_labels() {
    for &(label, encoding) in LABELS.iter() {
        assert_eq!(Encoding::for_label(label.as_bytes()), Some(encoding), "{}", label);
        let shouted = label.to_ascii_uppercase();
        assert_eq!(Encoding::for_label(shouted.as_bytes()), Some(encoding), "{}", shouted);
        let padded = format!("\t\n {} \x0C\r", label);
        assert_eq!(Encoding::for_label(padded.as_bytes()), Some(encoding), "{:?}", padded);
    }
}

#[test]
fn test_label_near_misses() {
    assert_eq!(Encoding::for_label(b"utf-88"), None);
    assert_eq!(Encoding::for_label(b"utf-"), None);
    assert_eq!(Encoding::for_label(b"u"), None);
    assert_eq!(Encoding::for_label(b"\xC3\xA9"), None);
    assert_eq!(Encoding::for_label(b"shift_jis\x00"), None);
    assert_eq!(Encoding::for_label(b"shift jis"), None);
    // Vertical tab is not whitespace here.
    assert_eq!(Encoding::for_label(b"\x0Butf-8"), None);
    assert_eq!(Encoding::for_label(b"cseucpkdfmtjapanese1"), None);
}

#[test]
fn test_label_no_replacement() {
    assert_eq!(Encoding::for_label_no_replacement(b"iso-2022-kr"), None);
    assert_eq!(Encoding::for_label_no_replacement(b"replacement"), None);
    assert_eq!(Encoding::for_label_no_replacement(b"latin2"), Some(ISO_8859_2));
}

#[test]
fn test_names() {
    for &(_, encoding) in LABELS.iter() {
        assert_eq!(Encoding::for_name(encoding.name().as_bytes()), Some(encoding));
        let lower = encoding.name().to_ascii_lowercase();
        assert_eq!(Encoding::for_name(lower.as_bytes()), Some(encoding));
    }
    assert_eq!(Encoding::for_name(b"sjis"), None);
    assert_eq!(Encoding::for_name(b" UTF-8"), None);
    assert_eq!(UTF_16BE.name(), "UTF-16BE");
    assert_eq!(ISO_8859_8_I.name(), "ISO-8859-8-I");
    assert_eq!(X_MAC_CYRILLIC.name(), "x-mac-cyrillic");
    assert_eq!(format!("{:?}", GBK), "Encoding { GBK }");
}

#[test]
fn test_properties() {
    assert_eq!(UTF_16LE.output_encoding(), UTF_8);
    assert_eq!(REPLACEMENT.output_encoding(), UTF_8);
    assert_eq!(GBK.output_encoding(), GBK);
    assert!(UTF_16BE.can_encode_everything());
    assert!(!GB18030.can_encode_everything());
    assert!(WINDOWS_1252.is_single_byte());
    assert!(X_USER_DEFINED.is_single_byte());
    assert!(!SHIFT_JIS.is_single_byte());
    assert!(!ISO_2022_JP.is_ascii_compatible());
    assert!(EUC_KR.is_ascii_compatible());
}

#[test]
fn test_for_bom() {
    assert_eq!(Encoding::for_bom(b"\xEF\xBB\xBFa"), Some((UTF_8, 3)));
    assert_eq!(Encoding::for_bom(b"\xFF\xFE"), Some((UTF_16LE, 2)));
    assert_eq!(Encoding::for_bom(b"\xFE\xFF\x00a"), Some((UTF_16BE, 2)));
    assert_eq!(Encoding::for_bom(b"\xEF\xBB"), None);
    assert_eq!(Encoding::for_bom(b""), None);
}

#[test]
fn test_encoder_uses_output_encoding() {
    assert_eq!(UTF_16LE.new_encoder().encoding(), UTF_8);
    assert_eq!(REPLACEMENT.new_encoder().encoding(), UTF_8);
    assert_eq!(BIG5.new_encoder().encoding(), BIG5);
    let (bytes, output, _) = UTF_16BE.encode("\u{E9}");
    assert_eq!(output, UTF_8);
    assert_eq!(&bytes[..], b"\xC3\xA9");
}
