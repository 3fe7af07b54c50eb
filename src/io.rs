// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `std::io` adapters.
//!
//! `DecodingReader` turns a `Read` of encoded bytes into a `Read` of UTF-8
//! and `EncodingWriter` turns a `Write` of encoded bytes into a `Write` that
//! accepts UTF-8. Both come in a lossy flavor, which replaces errors the
//! same way `decode_to_utf8()` and `encode_from_utf8()` do, and a strict
//! flavor, which reports them as `std::io::Error`s of kind `InvalidData`
//! wrapping an `Error`.
//!
//! ```
//! use std::io::{Read, Write};
//! use charconv::io::{DecodingReader, EncodingWriter};
//! use charconv::*;
//!
//! let mut writer = EncodingWriter::new(Vec::new(), ISO_2022_JP.new_encoder());
//! writer.write_all("\u{3042}a".as_bytes()).unwrap();
//! let bytes = writer.finish().unwrap();
//! assert_eq!(&bytes[..], b"\x1B$B$\"\x1B(Ba");
//!
//! let mut reader = DecodingReader::new(&bytes[..], ISO_2022_JP.new_decoder());
//! let mut string = String::new();
//! reader.read_to_string(&mut string).unwrap();
//! assert_eq!(string, "\u{3042}a");
//! ```

use std::io::{self, Read, Write};
use std::str;

use tracing::warn;

use crate::{CoderResult, Decoder, DecoderResult, Encoder, EncoderResult, Encoding};

const INPUT_CAPACITY: usize = 8 * 1024;

/// Errors from the strict adapters.
///
/// The adapters return these inside `std::io::Error` of kind `InvalidData`.
/// Use `Error::from_io()` to get them back out. Apart from `Io`, they are
/// not fatal: the adapter keeps going past the offending input on the next
/// call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input held a malformed byte sequence.
    #[error("malformed {bytes}-byte sequence in {}", .encoding.name())]
    Malformed {
        bytes: u8,
        encoding: &'static Encoding,
    },

    /// A character has no representation in the output encoding.
    #[error("U+{:04X} cannot be encoded in {}", *.code_point as u32, .encoding.name())]
    Unmappable {
        code_point: char,
        encoding: &'static Encoding,
    },

    /// Bytes written to an `EncodingWriter` were not UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    /// The wrapped reader or writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// The `Error` inside `error`, if `error` came from a strict adapter.
    pub fn from_io(error: &io::Error) -> Option<&Error> {
        error.get_ref()?.downcast_ref::<Error>()
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> io::Error {
        match error {
            Error::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// A `Read` that decodes the bytes of `R` and yields UTF-8.
///
/// The UTF-8 is delivered through an internal buffer, so `read()` may cut
/// a character in two, but everything read up to the end of the stream is
/// valid UTF-8, and `read_to_string()` works as expected.
///
/// A strict reader that hits a malformed sequence first returns what it
/// decoded before the sequence and then the error. Reading again continues
/// after the malformed bytes.
pub struct DecodingReader<R> {
    inner: R,
    decoder: Decoder,
    strict: bool,
    input: Box<[u8]>,
    input_start: usize,
    input_end: usize,
    eof: bool,
    finished: bool,
    output: String,
    output_start: usize,
    deferred: Option<Error>,
}

impl<R: Read> DecodingReader<R> {
    /// A reader that replaces malformed sequences with U+FFFD.
    pub fn new(inner: R, decoder: Decoder) -> DecodingReader<R> {
        DecodingReader::with_mode(inner, decoder, false)
    }

    /// A reader that reports malformed sequences as errors.
    pub fn strict(inner: R, decoder: Decoder) -> DecodingReader<R> {
        DecodingReader::with_mode(inner, decoder, true)
    }

    fn with_mode(inner: R, decoder: Decoder, strict: bool) -> DecodingReader<R> {
        DecodingReader {
            inner: inner,
            decoder: decoder,
            strict: strict,
            input: vec![0u8; INPUT_CAPACITY].into_boxed_slice(),
            input_start: 0,
            input_end: 0,
            eof: false,
            finished: false,
            output: String::new(),
            output_start: 0,
            deferred: None,
        }
    }

    /// The encoding being decoded. After BOM sniffing this may differ from
    /// the one the decoder was created for.
    pub fn encoding(&self) -> &'static Encoding {
        self.decoder.encoding()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns the wrapped reader. Input that was read from it but not yet
    /// decoded is lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn drain_output(&mut self, buf: &mut [u8]) -> usize {
        let pending = &self.output.as_bytes()[self.output_start..];
        let n = ::std::cmp::min(pending.len(), buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.output_start += n;
        if self.output_start == self.output.len() {
            self.output.clear();
            self.output_start = 0;
        }
        n
    }

    fn fill_input(&mut self) -> io::Result<()> {
        if self.input_start == self.input_end && !self.eof {
            self.input_start = 0;
            self.input_end = 0;
            let n = self.inner.read(&mut self.input[..])?;
            if n == 0 {
                self.eof = true;
            }
            self.input_end = n;
        }
        Ok(())
    }

    /// Decodes the buffered input into `self.output`. Returns whether the
    /// decoder is done.
    fn decode_input(&mut self) -> io::Result<bool> {
        let src = &self.input[self.input_start..self.input_end];
        let last = self.eof;
        let bound = if self.strict {
            self.decoder.max_utf8_buffer_length_without_replacement(src.len())
        } else {
            self.decoder.max_utf8_buffer_length(src.len())
        };
        let bound = bound.ok_or_else(|| io::Error::new(io::ErrorKind::Other, "buffer size overflow"))?;
        self.output.reserve(bound);
        if self.strict {
            let (result, read) = self.decoder.decode_to_string_without_replacement(src, &mut self.output, last);
            self.input_start += read;
            match result {
                DecoderResult::InputEmpty => Ok(last),
                DecoderResult::OutputFull => Ok(false),
                DecoderResult::Malformed(bytes, _) => {
                    let encoding = self.decoder.encoding();
                    warn!(encoding = encoding.name(), bytes = bytes, "malformed byte sequence");
                    self.deferred = Some(Error::Malformed {
                        bytes: bytes,
                        encoding: encoding,
                    });
                    Ok(false)
                }
            }
        } else {
            let (result, read, _) = self.decoder.decode_to_string(src, &mut self.output, last);
            self.input_start += read;
            Ok(last && result == CoderResult::InputEmpty)
        }
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.output_start < self.output.len() {
                return Ok(self.drain_output(buf));
            }
            if let Some(error) = self.deferred.take() {
                return Err(error.into());
            }
            if self.finished {
                return Ok(0);
            }
            self.fill_input()?;
            self.finished = self.decode_input()?;
        }
    }
}

/// A `Write` that takes UTF-8 and writes it to `W` in an encoding.
///
/// The encoded bytes are buffered. Call `finish()` at the end of the stream
/// so that a stateful encoder such as ISO-2022-JP can return to ASCII and the
/// buffer gets written out. Dropping the writer discards the buffer.
///
/// UTF-8 sequences may be split across `write()` calls. A strict writer
/// accepts the input up to and including an unmappable character or an
/// invalid UTF-8 sequence and reports it on the next call.
pub struct EncodingWriter<W: Write> {
    inner: W,
    encoder: Encoder,
    strict: bool,
    partial: [u8; 4],
    partial_len: usize,
    output: Vec<u8>,
    deferred: Option<Error>,
}

impl<W: Write> EncodingWriter<W> {
    /// A writer that replaces unmappable characters with `?` and invalid
    /// UTF-8 with whatever U+FFFD encodes to.
    pub fn new(inner: W, encoder: Encoder) -> EncodingWriter<W> {
        EncodingWriter::with_mode(inner, encoder, false)
    }

    /// A writer that reports unmappable characters and invalid UTF-8 as
    /// errors.
    pub fn strict(inner: W, encoder: Encoder) -> EncodingWriter<W> {
        EncodingWriter::with_mode(inner, encoder, true)
    }

    fn with_mode(inner: W, encoder: Encoder, strict: bool) -> EncodingWriter<W> {
        EncodingWriter {
            inner: inner,
            encoder: encoder,
            strict: strict,
            partial: [0u8; 4],
            partial_len: 0,
            output: Vec::with_capacity(INPUT_CAPACITY),
            deferred: None,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoder.encoding()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Ends the stream, writes out everything and returns the wrapped
    /// writer.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.deferred.take() {
            return Err(error.into());
        }
        if self.partial_len != 0 {
            self.partial_len = 0;
            self.invalid_utf8()?;
        }
        let _ = self.encode_str("", true)?;
        if let Some(error) = self.deferred.take() {
            return Err(error.into());
        }
        self.write_output()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_output(&mut self) -> io::Result<()> {
        if !self.output.is_empty() {
            self.inner.write_all(&self.output[..])?;
            self.output.clear();
        }
        Ok(())
    }

    fn invalid_utf8(&mut self) -> io::Result<()> {
        if self.strict {
            warn!(encoding = self.encoder.encoding().name(), "invalid UTF-8 input");
            self.deferred = Some(Error::InvalidUtf8);
            Ok(())
        } else {
            self.encode_str("\u{FFFD}", false).map(|_| ())
        }
    }

    /// Encodes `s` into the buffer. Returns how much of `s` was consumed,
    /// which is short of all of it only when a strict writer stopped after
    /// an unmappable character.
    fn encode_str(&mut self, s: &str, last: bool) -> io::Result<usize> {
        let bound = self.encoder
            .max_buffer_length_from_utf8_with_replacement(s.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "buffer size overflow"))?;
        self.output.reserve(bound);
        if self.strict {
            let (result, read) = self.encoder
                .encode_from_utf8_to_vec_without_replacement(s, &mut self.output, last);
            match result {
                EncoderResult::InputEmpty => Ok(read),
                EncoderResult::OutputFull => {
                    Err(io::Error::new(io::ErrorKind::Other, "encoder output bound too small"))
                }
                EncoderResult::Unmappable(c) => {
                    let encoding = self.encoder.encoding();
                    warn!(encoding = encoding.name(), code_point = c as u32, "unmappable character");
                    self.deferred = Some(Error::Unmappable {
                        code_point: c,
                        encoding: encoding,
                    });
                    Ok(read)
                }
            }
        } else {
            let (result, read, _) = self.encoder.encode_from_utf8_to_vec(s, &mut self.output, last);
            match result {
                CoderResult::InputEmpty => Ok(read),
                CoderResult::OutputFull => {
                    Err(io::Error::new(io::ErrorKind::Other, "encoder output bound too small"))
                }
            }
        }
    }

    /// Completes a UTF-8 sequence left over from the previous call. Returns
    /// how many bytes of `buf` it took. A byte that cannot continue the
    /// sequence is left in `buf`, and the bytes held so far count as one
    /// error.
    fn complete_partial(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (i, &b) in buf.iter().enumerate() {
            let mut partial = self.partial;
            partial[self.partial_len] = b;
            match str::from_utf8(&partial[..self.partial_len + 1]) {
                Ok(s) => {
                    self.partial_len = 0;
                    self.encode_str(s, false)?;
                    return Ok(i + 1);
                }
                Err(e) if e.error_len().is_none() => {
                    self.partial = partial;
                    self.partial_len += 1;
                }
                Err(_) => {
                    self.partial_len = 0;
                    self.invalid_utf8()?;
                    return Ok(i);
                }
            }
        }
        Ok(buf.len())
    }
}

impl<W: Write> Write for EncodingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(error) = self.deferred.take() {
            return Err(error.into());
        }
        if self.output.len() >= INPUT_CAPACITY {
            self.write_output()?;
        }
        if buf.is_empty() {
            return Ok(0);
        }
        let mut consumed = 0usize;
        if self.partial_len != 0 {
            consumed = self.complete_partial(buf)?;
            if consumed == 0 {
                // The bad bytes were taken by an earlier call.
                if let Some(error) = self.deferred.take() {
                    return Err(error.into());
                }
            }
            if self.deferred.is_some() || consumed == buf.len() {
                return Ok(consumed);
            }
        }
        let rest = &buf[consumed..];
        let (valid, invalid) = match str::from_utf8(rest) {
            Ok(s) => (s, None),
            Err(e) => {
                let valid_up_to = e.valid_up_to();
                // Validated just above.
                let s = str::from_utf8(&rest[..valid_up_to]).unwrap_or("");
                (s, Some((valid_up_to, e.error_len())))
            }
        };
        let read = self.encode_str(valid, false)?;
        consumed += read;
        if read < valid.len() || self.deferred.is_some() {
            return Ok(consumed);
        }
        match invalid {
            None => {}
            Some((start, None)) => {
                // A sequence that the next call may complete.
                let tail = &rest[start..];
                self.partial[..tail.len()].copy_from_slice(tail);
                self.partial_len = tail.len();
                consumed += tail.len();
            }
            Some((_, Some(len))) => {
                self.invalid_utf8()?;
                consumed += len;
            }
        }
        Ok(consumed)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_output()?;
        self.inner.flush()
    }
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    /// Hands out one byte per `read()`.
    struct Trickle<'a>(&'a [u8]);

    impl<'a> Read for Trickle<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_reader_lossy() {
        let mut reader = DecodingReader::new(&b"a\x82\xA0\xFFb"[..], SHIFT_JIS.new_decoder());
        let mut string = String::new();
        reader.read_to_string(&mut string).unwrap();
        assert_eq!(string, "a\u{3042}\u{FFFD}b");
    }

    #[test]
    fn test_reader_one_byte_at_a_time() {
        let bytes = b"\xEF\xBB\xBFcaf\xC3\xA9 \xF0\x9F\x92\xA9";
        let mut reader = DecodingReader::new(Trickle(&bytes[..]), WINDOWS_1252.new_decoder());
        let mut string = String::new();
        reader.read_to_string(&mut string).unwrap();
        assert_eq!(string, "caf\u{E9} \u{1F4A9}");
        assert_eq!(reader.encoding(), UTF_8);
    }

    #[test]
    fn test_reader_tiny_buffer() {
        let mut reader = DecodingReader::new(&b"\x82\xA0\x82\xA2"[..], SHIFT_JIS.new_decoder());
        let mut collected = Vec::new();
        let mut one = [0u8; 1];
        loop {
            let n = reader.read(&mut one[..]).unwrap();
            if n == 0 {
                break;
            }
            collected.push(one[0]);
        }
        assert_eq!(&collected[..], "\u{3042}\u{3044}".as_bytes());
    }

    #[test]
    fn test_reader_strict_reports_and_continues() {
        let mut reader = DecodingReader::strict(&b"ab\xFFcd"[..], UTF_8.new_decoder());
        let mut buf = [0u8; 16];
        assert_eq!(reader.read(&mut buf[..]).unwrap(), 2);
        assert_eq!(&buf[..2], b"ab");
        let error = reader.read(&mut buf[..]).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        match Error::from_io(&error) {
            Some(&Error::Malformed { bytes, encoding }) => {
                assert_eq!(bytes, 1);
                assert_eq!(encoding, UTF_8);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(reader.read(&mut buf[..]).unwrap(), 2);
        assert_eq!(&buf[..2], b"cd");
        assert_eq!(reader.read(&mut buf[..]).unwrap(), 0);
    }

    #[test]
    fn test_reader_strict_truncated_at_end() {
        let mut reader = DecodingReader::strict(&b"a\x82"[..], SHIFT_JIS.new_decoder());
        let mut string = String::new();
        let error = reader.read_to_string(&mut string).unwrap_err();
        assert!(Error::from_io(&error).is_some());
    }

    #[test]
    fn test_writer_lossy() {
        let mut writer = EncodingWriter::new(Vec::new(), SHIFT_JIS.new_encoder());
        writer.write_all("a\u{3042}\u{1F4A9}".as_bytes()).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(&bytes[..], b"a\x82\xA0?");
    }

    #[test]
    fn test_writer_split_utf8() {
        let mut writer = EncodingWriter::new(Vec::new(), EUC_KR.new_encoder());
        let utf8 = "\u{AC00}\u{AC00}".as_bytes();
        for byte in utf8.iter() {
            assert_eq!(writer.write(::std::slice::from_ref(byte)).unwrap(), 1);
        }
        let bytes = writer.finish().unwrap();
        assert_eq!(&bytes[..], b"\xB0\xA1\xB0\xA1");
    }

    #[test]
    fn test_writer_invalid_utf8() {
        let mut writer = EncodingWriter::new(Vec::new(), UTF_8.new_encoder());
        writer.write_all(b"a\xFFb\xE3\x81").unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(&bytes[..], "a\u{FFFD}b\u{FFFD}".as_bytes());

        let mut writer = EncodingWriter::strict(Vec::new(), UTF_8.new_encoder());
        assert_eq!(writer.write(b"a\xFFb").unwrap(), 2);
        let error = writer.write(b"b").unwrap_err();
        assert!(matches!(Error::from_io(&error), Some(&Error::InvalidUtf8)));
        assert_eq!(writer.write(b"b").unwrap(), 1);
        assert_eq!(&writer.finish().unwrap()[..], b"ab");
    }

    #[test]
    fn test_writer_split_ill_formed_utf8() {
        // E0 80 is two maximal subparts, F0 90 followed by ASCII is one.
        let mut writer = EncodingWriter::new(Vec::new(), UTF_8.new_encoder());
        assert_eq!(writer.write(b"\xE0").unwrap(), 1);
        writer.write_all(b"\x80a\xF0").unwrap();
        assert_eq!(writer.write(b"\x90").unwrap(), 1);
        writer.write_all(b"A").unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(&bytes[..], "\u{FFFD}\u{FFFD}a\u{FFFD}A".as_bytes());

        let mut writer = EncodingWriter::strict(Vec::new(), UTF_8.new_encoder());
        assert_eq!(writer.write(b"\xE0").unwrap(), 1);
        let error = writer.write(b"\x80").unwrap_err();
        assert!(matches!(Error::from_io(&error), Some(&Error::InvalidUtf8)));
        assert_eq!(writer.write(b"\x80").unwrap(), 1);
        let error = writer.write(b"b").unwrap_err();
        assert!(matches!(Error::from_io(&error), Some(&Error::InvalidUtf8)));
        writer.write_all(b"b").unwrap();
        assert_eq!(&writer.finish().unwrap()[..], b"b");
    }

    #[test]
    fn test_writer_strict_unmappable() {
        let mut writer = EncodingWriter::strict(Vec::new(), EUC_JP.new_encoder());
        let input = "\u{77DB}\u{1F4A5}\u{76FE}";
        let consumed = writer.write(input.as_bytes()).unwrap();
        assert_eq!(consumed, 7);
        let error = writer.write(input[consumed..].as_bytes()).unwrap_err();
        match Error::from_io(&error) {
            Some(&Error::Unmappable { code_point, encoding }) => {
                assert_eq!(code_point, '\u{1F4A5}');
                assert_eq!(encoding, EUC_JP);
            }
            other => panic!("unexpected {:?}", other),
        }
        writer.write_all(input[consumed..].as_bytes()).unwrap();
        assert_eq!(&writer.finish().unwrap()[..], b"\xCC\xB7\xBD\xE2");
    }

    #[test]
    fn test_writer_finish_returns_to_ascii() {
        let mut writer = EncodingWriter::new(Vec::new(), ISO_2022_JP.new_encoder());
        write!(writer, "{}", "\u{00A5}").unwrap();
        writer.flush().unwrap();
        assert_eq!(&writer.get_ref()[..], b"\x1B(J\x5C");
        assert_eq!(&writer.finish().unwrap()[..], b"\x1B(J\x5C\x1B(B");
    }

    #[test]
    fn test_error_display() {
        let error = Error::Unmappable {
            code_point: '\u{1F4A9}',
            encoding: SHIFT_JIS,
        };
        assert_eq!(error.to_string(), "U+1F4A9 cannot be encoded in Shift_JIS");
        let error = Error::Malformed {
            bytes: 2,
            encoding: EUC_KR,
        };
        assert_eq!(error.to_string(), "malformed 2-byte sequence in EUC-KR");
        let io_error: io::Error = Error::InvalidUtf8.into();
        assert_eq!(io_error.kind(), io::ErrorKind::InvalidData);
        assert!(Error::from_io(&io::Error::new(io::ErrorKind::Other, "x")).is_none());
    }
}
