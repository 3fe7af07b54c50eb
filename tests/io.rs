// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

use std::io::{self, BufReader, Read, Write};

use charconv::io::{DecodingReader, EncodingWriter, Error};
use charconv::*;

static SAMPLES: [(&'static Encoding, &'static str); 12] =
    [(&UTF_8_INIT, "na\u{EF}ve \u{1F600} \u{4F60}\u{597D}"),
     (&UTF_16LE_INIT, "\u{1F600}\u{0000}x"),
     (&UTF_16BE_INIT, "\u{FFFD}\u{E9}"),
     (&WINDOWS_1252_INIT, "\u{201C}caf\u{E9}\u{201D} \u{20AC}5"),
     (&KOI8_R_INIT, "\u{041F}\u{0440}\u{0438}\u{0432}\u{0435}\u{0442}"),
     (&SHIFT_JIS_INIT, "\u{3053}\u{3093}\u{306B}\u{3061}\u{306F}\u{FF71}"),
     (&EUC_JP_INIT, "\u{65E5}\u{672C}\u{8A9E}\u{FF71}"),
     (&ISO_2022_JP_INIT, "a\u{65E5}\u{00A5}\u{FF71}b"),
     (&EUC_KR_INIT, "\u{D55C}\u{AD6D}\u{C5B4}"),
     (&BIG5_INIT, "\u{7E41}\u{9AD4}\u{4E2D}\u{6587}"),
     (&GBK_INIT, "\u{7B80}\u{4F53}\u{20AC}"),
     (&GB18030_INIT, "\u{7B80}\u{4F53}\u{1F600}\u{00E9}")];

fn write_all_bytes_one_at_a_time<W: Write>(writer: &mut W, bytes: &[u8]) {
    for byte in bytes.iter() {
        writer.write_all(::std::slice::from_ref(byte)).unwrap();
    }
}

#[test]
fn test_round_trip_through_adapters() {
    for &(encoding, text) in SAMPLES.iter() {
        let (expected, _, had_errors) = encoding.encode(text);
        assert!(!had_errors, "{}", encoding.name());

        let mut writer = EncodingWriter::strict(Vec::new(), encoding.new_encoder());
        write_all_bytes_one_at_a_time(&mut writer, text.as_bytes());
        let bytes = writer.finish().unwrap();
        assert_eq!(&bytes[..], &expected[..], "{}", encoding.name());

        let reader = DecodingReader::strict(&bytes[..], encoding.output_encoding().new_decoder_without_bom_handling());
        let mut decoded = String::new();
        BufReader::with_capacity(3, reader).read_to_string(&mut decoded).unwrap();
        let (reference, _) = encoding.output_encoding().decode_without_bom_handling(&bytes[..]);
        assert_eq!(decoded, reference, "{}", encoding.name());
    }
}

#[test]
fn test_reader_sniffs_bom() {
    let mut reader = DecodingReader::new(&b"\xFE\xFF\x00a\x00b"[..], WINDOWS_1252.new_decoder());
    let mut decoded = String::new();
    reader.read_to_string(&mut decoded).unwrap();
    assert_eq!(decoded, "ab");
    assert_eq!(reader.encoding(), UTF_16BE);
}

#[test]
fn test_strict_reader_stops_at_each_error() {
    let mut reader = DecodingReader::strict(&b"\xA4\x40\x80\xA4\x40\xFF"[..], BIG5.new_decoder());
    let mut decoded = String::new();
    let mut errors = 0usize;
    loop {
        let mut buf = [0u8; 64];
        match reader.read(&mut buf[..]) {
            Ok(0) => break,
            Ok(n) => decoded.push_str(::std::str::from_utf8(&buf[..n]).unwrap()),
            Err(e) => {
                assert_eq!(e.kind(), io::ErrorKind::InvalidData);
                assert!(matches!(Error::from_io(&e), Some(&Error::Malformed { encoding, .. }) if encoding == BIG5));
                errors += 1;
            }
        }
    }
    assert_eq!(errors, 2);
    assert_eq!(decoded, "\u{4E00}\u{4E00}");
}

#[test]
fn test_lossy_writer_replaces() {
    let mut writer = EncodingWriter::new(Vec::new(), WINDOWS_1252.new_encoder());
    writer.write_all("\u{4E00}a\u{E9}".as_bytes()).unwrap();
    assert_eq!(&writer.finish().unwrap()[..], b"?a\xE9");
}

#[derive(Debug)]
struct Broken;

impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writer_passes_io_errors_through() {
    let mut writer = EncodingWriter::new(Broken, UTF_8.new_encoder());
    writer.write_all(b"abc").unwrap();
    let error = writer.finish().unwrap_err();
    assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    assert!(Error::from_io(&error).is_none());
}
