// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides structs that use lifetimes to couple bounds checking
//! and space availability checking and detaching those from actual slice
//! reading/writing.
//!
//! Every write is all-or-nothing: a character either fits in its entirety
//! and is written or the destination is left untouched and the caller gets
//! `false` back. Codecs rely on this to report `OutputFull` without having
//! mutated their own state.

use crate::ascii::*;

pub enum Space<T> {
    Available(T),
    Full,
}

// Byte source

pub struct ByteSource<'a> {
    slice: &'a [u8],
    pos: usize,
}

impl<'a> ByteSource<'a> {
    #[inline(always)]
    pub fn new(src: &[u8]) -> ByteSource {
        ByteSource {
            slice: src,
            pos: 0,
        }
    }
    #[inline(always)]
    pub fn check_available<'b>(&'b mut self) -> Space<ByteReadHandle<'b, 'a>> {
        if self.pos < self.slice.len() {
            Space::Available(ByteReadHandle::new(self))
        } else {
            Space::Full
        }
    }
    #[inline(always)]
    fn read(&mut self) -> u8 {
        let ret = self.slice[self.pos];
        self.pos += 1;
        ret
    }
    #[inline(always)]
    fn unread(&mut self) -> usize {
        self.pos -= 1;
        self.pos
    }
    #[inline(always)]
    pub fn consumed(&self) -> usize {
        self.pos
    }
    /// The not-yet-consumed tail of the input.
    #[inline(always)]
    pub fn remaining(&self) -> &'a [u8] {
        &self.slice[self.pos..]
    }
    #[inline(always)]
    pub fn skip(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.slice.len());
        self.pos += n;
    }
}

pub struct ByteReadHandle<'a, 'b>
    where 'b: 'a
{
    source: &'a mut ByteSource<'b>,
}

impl<'a, 'b> ByteReadHandle<'a, 'b>
    where 'b: 'a
{
    #[inline(always)]
    fn new(src: &'a mut ByteSource<'b>) -> ByteReadHandle<'a, 'b> {
        ByteReadHandle { source: src }
    }
    #[inline(always)]
    pub fn read(self) -> (u8, ByteUnreadHandle<'a, 'b>) {
        let byte = self.source.read();
        let handle = ByteUnreadHandle::new(self.source);
        (byte, handle)
    }
}

pub struct ByteUnreadHandle<'a, 'b>
    where 'b: 'a
{
    source: &'a mut ByteSource<'b>,
}

impl<'a, 'b> ByteUnreadHandle<'a, 'b>
    where 'b: 'a
{
    #[inline(always)]
    fn new(src: &'a mut ByteSource<'b>) -> ByteUnreadHandle<'a, 'b> {
        ByteUnreadHandle { source: src }
    }
    /// Puts the byte that was just read back into the source.
    #[inline(always)]
    pub fn unread(self) -> usize {
        self.source.unread()
    }
}

/// Where decoders put their output: either UTF-8 bytes or UTF-16 code units.
pub trait UnicodeDestination {
    fn written(&self) -> usize;

    fn write_char(&mut self, c: char) -> bool;

    /// Writes a BMP code point that is not a surrogate.
    fn write_bmp(&mut self, bmp: u16) -> bool;

    /// Writes two BMP code points or neither (Big5 uses this for the four
    /// pointers that decode to a base character and a combining mark).
    fn write_pair(&mut self, first: u16, second: u16) -> bool;

    /// Copies the longest run of ASCII at the head of `src` that fits.
    fn copy_ascii_from(&mut self, src: &mut ByteSource);

    /// Copies as many complete characters as fit from the first
    /// `valid_up_to` bytes of `src`, which must be valid UTF-8.
    fn copy_utf8_from(&mut self, src: &mut ByteSource, valid_up_to: usize);
}

// UTF-16 destination

pub struct Utf16Destination<'a> {
    slice: &'a mut [u16],
    pos: usize,
}

impl<'a> Utf16Destination<'a> {
    #[inline(always)]
    pub fn new(dst: &mut [u16]) -> Utf16Destination {
        Utf16Destination {
            slice: dst,
            pos: 0,
        }
    }
    #[inline(always)]
    fn space(&self) -> usize {
        self.slice.len() - self.pos
    }
    #[inline(always)]
    fn write_code_unit(&mut self, u: u16) {
        self.slice[self.pos] = u;
        self.pos += 1;
    }
    #[inline(always)]
    fn write_astral(&mut self, astral: u32) {
        debug_assert!(astral > 0xFFFF);
        debug_assert!(astral <= 0x10FFFF);
        self.write_code_unit((0xD7C0 + (astral >> 10)) as u16);
        self.write_code_unit((0xDC00 + (astral & 0x3FF)) as u16);
    }
}

impl<'a> UnicodeDestination for Utf16Destination<'a> {
    #[inline(always)]
    fn written(&self) -> usize {
        self.pos
    }
    #[inline(always)]
    fn write_char(&mut self, c: char) -> bool {
        if c <= '\u{FFFF}' {
            if self.space() < 1 {
                return false;
            }
            self.write_code_unit(c as u16);
        } else {
            if self.space() < 2 {
                return false;
            }
            self.write_astral(c as u32);
        }
        true
    }
    #[inline(always)]
    fn write_bmp(&mut self, bmp: u16) -> bool {
        debug_assert!(bmp & 0xF800 != 0xD800);
        if self.space() < 1 {
            return false;
        }
        self.write_code_unit(bmp);
        true
    }
    #[inline(always)]
    fn write_pair(&mut self, first: u16, second: u16) -> bool {
        if self.space() < 2 {
            return false;
        }
        self.write_code_unit(first);
        self.write_code_unit(second);
        true
    }
    #[inline(always)]
    fn copy_ascii_from(&mut self, src: &mut ByteSource) {
        let bytes = src.remaining();
        let len = ::std::cmp::min(bytes.len(), self.space());
        let copied = ascii_to_basic_latin(&bytes[..len], &mut self.slice[self.pos..]);
        self.pos += copied;
        src.skip(copied);
    }
    fn copy_utf8_from(&mut self, src: &mut ByteSource, valid_up_to: usize) {
        let bytes = &src.remaining()[..valid_up_to];
        // The caller has validated the prefix.
        let s = match ::std::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(_) => return,
        };
        let mut consumed = 0usize;
        for c in s.chars() {
            if !self.write_char(c) {
                break;
            }
            consumed += c.len_utf8();
        }
        src.skip(consumed);
    }
}

// UTF-8 destination

pub struct Utf8Destination<'a> {
    slice: &'a mut [u8],
    pos: usize,
}

impl<'a> Utf8Destination<'a> {
    #[inline(always)]
    pub fn new(dst: &mut [u8]) -> Utf8Destination {
        Utf8Destination {
            slice: dst,
            pos: 0,
        }
    }
    #[inline(always)]
    fn space(&self) -> usize {
        self.slice.len() - self.pos
    }
    #[inline(always)]
    fn write_code_unit(&mut self, u: u8) {
        self.slice[self.pos] = u;
        self.pos += 1;
    }
    #[inline(always)]
    fn write_mid_bmp(&mut self, mid_bmp: u16) {
        debug_assert!(mid_bmp >= 0x80);
        debug_assert!(mid_bmp < 0x800);
        self.write_code_unit(((mid_bmp as u32 >> 6) | 0xC0u32) as u8);
        self.write_code_unit(((mid_bmp as u32 & 0x3Fu32) | 0x80u32) as u8);
    }
    #[inline(always)]
    fn write_upper_bmp(&mut self, upper_bmp: u16) {
        debug_assert!(upper_bmp >= 0x800);
        self.write_code_unit(((upper_bmp as u32 >> 12) | 0xE0u32) as u8);
        self.write_code_unit((((upper_bmp as u32 & 0xFC0u32) >> 6) | 0x80u32) as u8);
        self.write_code_unit(((upper_bmp as u32 & 0x3Fu32) | 0x80u32) as u8);
    }
    #[inline(always)]
    fn write_astral(&mut self, astral: u32) {
        debug_assert!(astral > 0xFFFF);
        debug_assert!(astral <= 0x10FFFF);
        self.write_code_unit(((astral >> 18) | 0xF0u32) as u8);
        self.write_code_unit((((astral & 0x3F000u32) >> 12) | 0x80u32) as u8);
        self.write_code_unit((((astral & 0xFC0u32) >> 6) | 0x80u32) as u8);
        self.write_code_unit(((astral & 0x3Fu32) | 0x80u32) as u8);
    }
    #[inline(always)]
    fn write_bmp_unchecked(&mut self, bmp: u16) {
        if bmp < 0x80 {
            self.write_code_unit(bmp as u8);
        } else if bmp < 0x800 {
            self.write_mid_bmp(bmp);
        } else {
            self.write_upper_bmp(bmp);
        }
    }
}

#[inline(always)]
fn utf8_len_of_bmp(bmp: u16) -> usize {
    if bmp < 0x80 {
        1
    } else if bmp < 0x800 {
        2
    } else {
        3
    }
}

impl<'a> UnicodeDestination for Utf8Destination<'a> {
    #[inline(always)]
    fn written(&self) -> usize {
        self.pos
    }
    #[inline(always)]
    fn write_char(&mut self, c: char) -> bool {
        if c <= '\u{FFFF}' {
            return self.write_bmp(c as u16);
        }
        if self.space() < 4 {
            return false;
        }
        self.write_astral(c as u32);
        true
    }
    #[inline(always)]
    fn write_bmp(&mut self, bmp: u16) -> bool {
        debug_assert!(bmp & 0xF800 != 0xD800);
        if self.space() < utf8_len_of_bmp(bmp) {
            return false;
        }
        self.write_bmp_unchecked(bmp);
        true
    }
    #[inline(always)]
    fn write_pair(&mut self, first: u16, second: u16) -> bool {
        if self.space() < utf8_len_of_bmp(first) + utf8_len_of_bmp(second) {
            return false;
        }
        self.write_bmp_unchecked(first);
        self.write_bmp_unchecked(second);
        true
    }
    #[inline(always)]
    fn copy_ascii_from(&mut self, src: &mut ByteSource) {
        let bytes = src.remaining();
        let len = ::std::cmp::min(bytes.len(), self.space());
        let copied = ascii_to_ascii(&bytes[..len], &mut self.slice[self.pos..]);
        self.pos += copied;
        src.skip(copied);
    }
    fn copy_utf8_from(&mut self, src: &mut ByteSource, valid_up_to: usize) {
        let bytes = src.remaining();
        let mut len = ::std::cmp::min(valid_up_to, self.space());
        if len < valid_up_to {
            // Back off to a character boundary.
            while len > 0 && (bytes[len] & 0xC0) == 0x80 {
                len -= 1;
            }
        }
        self.slice[self.pos..self.pos + len].copy_from_slice(&bytes[..len]);
        self.pos += len;
        src.skip(len);
    }
}

/// Where encoders get their input from: a `&str` or a `&[u16]`.
pub trait UnicodeSource {
    fn consumed(&self) -> usize;

    /// Reads the next scalar value. Unpaired surrogates read as U+FFFD.
    fn read(&mut self) -> Option<char>;

    /// Moves back to where the most recent `read()` started.
    fn unread(&mut self) -> usize;

    /// Copies the longest run of ASCII at the head of the input that fits.
    fn copy_ascii_to(&mut self, dst: &mut ByteDestination);
}

// UTF-16 source

pub struct Utf16Source<'a> {
    slice: &'a [u16],
    pos: usize,
    old_pos: usize,
}

impl<'a> Utf16Source<'a> {
    #[inline(always)]
    pub fn new(src: &[u16]) -> Utf16Source {
        Utf16Source {
            slice: src,
            pos: 0,
            old_pos: 0,
        }
    }
}

impl<'a> UnicodeSource for Utf16Source<'a> {
    #[inline(always)]
    fn consumed(&self) -> usize {
        self.pos
    }
    #[inline(always)]
    fn read(&mut self) -> Option<char> {
        if self.pos == self.slice.len() {
            return None;
        }
        self.old_pos = self.pos;
        let unit = self.slice[self.pos] as u32;
        self.pos += 1;
        let high_bits = unit & 0xFC00u32;
        if high_bits == 0xD800u32 {
            // high surrogate
            if self.pos < self.slice.len() {
                let second = self.slice[self.pos] as u32;
                if second & 0xFC00u32 != 0xDC00u32 {
                    // The next code unit is not a low surrogate. Don't advance
                    // position and treat the high surrogate as unpaired.
                    return Some('\u{FFFD}');
                }
                // The next code unit is a low surrogate. Advance position.
                self.pos += 1;
                let astral = (unit << 10) + second -
                             (((0xD800u32 << 10) - 0x10000u32) + 0xDC00u32);
                return Some(::std::char::from_u32(astral).unwrap_or('\u{FFFD}'));
            }
            // End of buffer. This surrogate is unpaired.
            return Some('\u{FFFD}');
        }
        if high_bits == 0xDC00u32 {
            // Unpaired low surrogate
            return Some('\u{FFFD}');
        }
        Some(::std::char::from_u32(unit).unwrap_or('\u{FFFD}'))
    }
    #[inline(always)]
    fn unread(&mut self) -> usize {
        self.pos = self.old_pos;
        self.pos
    }
    #[inline(always)]
    fn copy_ascii_to(&mut self, dst: &mut ByteDestination) {
        let units = &self.slice[self.pos..];
        let space = dst.space();
        let len = ::std::cmp::min(units.len(), space.len());
        let copied = basic_latin_to_ascii(&units[..len], space);
        dst.advance(copied);
        self.pos += copied;
    }
}

// UTF-8 source

pub struct Utf8Source<'a> {
    slice: &'a str,
    pos: usize,
    old_pos: usize,
}

impl<'a> Utf8Source<'a> {
    #[inline(always)]
    pub fn new(src: &str) -> Utf8Source {
        Utf8Source {
            slice: src,
            pos: 0,
            old_pos: 0,
        }
    }
}

impl<'a> UnicodeSource for Utf8Source<'a> {
    #[inline(always)]
    fn consumed(&self) -> usize {
        self.pos
    }
    #[inline(always)]
    fn read(&mut self) -> Option<char> {
        let c = self.slice[self.pos..].chars().next()?;
        self.old_pos = self.pos;
        self.pos += c.len_utf8();
        Some(c)
    }
    #[inline(always)]
    fn unread(&mut self) -> usize {
        self.pos = self.old_pos;
        self.pos
    }
    #[inline(always)]
    fn copy_ascii_to(&mut self, dst: &mut ByteDestination) {
        let bytes = &self.slice.as_bytes()[self.pos..];
        let space = dst.space();
        let len = ::std::cmp::min(bytes.len(), space.len());
        let copied = ascii_to_ascii(&bytes[..len], space);
        dst.advance(copied);
        self.pos += copied;
    }
}

// Byte destination

pub struct ByteOneHandle<'a, 'b>
    where 'b: 'a
{
    dest: &'a mut ByteDestination<'b>,
}

impl<'a, 'b> ByteOneHandle<'a, 'b>
    where 'b: 'a
{
    #[inline(always)]
    fn new(dst: &'a mut ByteDestination<'b>) -> ByteOneHandle<'a, 'b> {
        ByteOneHandle { dest: dst }
    }
    #[inline(always)]
    pub fn write_one(self, first: u8) {
        self.dest.write_one(first);
    }
}

pub struct ByteTwoHandle<'a, 'b>
    where 'b: 'a
{
    dest: &'a mut ByteDestination<'b>,
}

impl<'a, 'b> ByteTwoHandle<'a, 'b>
    where 'b: 'a
{
    #[inline(always)]
    fn new(dst: &'a mut ByteDestination<'b>) -> ByteTwoHandle<'a, 'b> {
        ByteTwoHandle { dest: dst }
    }
    #[inline(always)]
    pub fn write_two(self, first: u8, second: u8) {
        self.dest.write_one(first);
        self.dest.write_one(second);
    }
}

pub struct ByteFourHandle<'a, 'b>
    where 'b: 'a
{
    dest: &'a mut ByteDestination<'b>,
}

impl<'a, 'b> ByteFourHandle<'a, 'b>
    where 'b: 'a
{
    #[inline(always)]
    fn new(dst: &'a mut ByteDestination<'b>) -> ByteFourHandle<'a, 'b> {
        ByteFourHandle { dest: dst }
    }
    #[inline(always)]
    pub fn write_four(self, first: u8, second: u8, third: u8, fourth: u8) {
        self.dest.write_one(first);
        self.dest.write_one(second);
        self.dest.write_one(third);
        self.dest.write_one(fourth);
    }
}

pub struct ByteDestination<'a> {
    slice: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteDestination<'a> {
    #[inline(always)]
    pub fn new(dst: &mut [u8]) -> ByteDestination {
        ByteDestination {
            slice: dst,
            pos: 0,
        }
    }
    #[inline(always)]
    pub fn check_space_one<'b>(&'b mut self) -> Space<ByteOneHandle<'b, 'a>> {
        if self.pos < self.slice.len() {
            Space::Available(ByteOneHandle::new(self))
        } else {
            Space::Full
        }
    }
    #[inline(always)]
    pub fn check_space_two<'b>(&'b mut self) -> Space<ByteTwoHandle<'b, 'a>> {
        if self.pos + 1 < self.slice.len() {
            Space::Available(ByteTwoHandle::new(self))
        } else {
            Space::Full
        }
    }
    #[inline(always)]
    pub fn check_space_four<'b>(&'b mut self) -> Space<ByteFourHandle<'b, 'a>> {
        if self.pos + 3 < self.slice.len() {
            Space::Available(ByteFourHandle::new(self))
        } else {
            Space::Full
        }
    }
    #[inline(always)]
    pub fn written(&self) -> usize {
        self.pos
    }
    /// Writes all of `bytes` or nothing.
    #[inline(always)]
    pub fn write_all(&mut self, bytes: &[u8]) -> bool {
        if self.slice.len() - self.pos < bytes.len() {
            return false;
        }
        self.slice[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        true
    }
    #[inline(always)]
    fn space(&mut self) -> &mut [u8] {
        &mut self.slice[self.pos..]
    }
    #[inline(always)]
    fn advance(&mut self, n: usize) {
        self.pos += n;
    }
    #[inline(always)]
    fn write_one(&mut self, first: u8) {
        self.slice[self.pos] = first;
        self.pos += 1;
    }
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_destination_is_all_or_nothing() {
        let mut buf = [0u8; 3];
        let mut dst = Utf8Destination::new(&mut buf[..]);
        assert!(dst.write_char('a'));
        assert!(!dst.write_char('\u{20AC}'));
        assert!(dst.write_char('\u{E9}'));
        assert!(!dst.write_char('b'));
        assert_eq!(dst.written(), 3);
        assert_eq!(&buf[..], b"a\xC3\xA9");
    }

    #[test]
    fn test_utf16_destination_astral_needs_two() {
        let mut buf = [0u16; 1];
        let mut dst = Utf16Destination::new(&mut buf[..]);
        assert!(!dst.write_char('\u{1F600}'));
        assert_eq!(dst.written(), 0);
        assert!(dst.write_char('\u{E9}'));
    }

    #[test]
    fn test_utf8_copy_cuts_at_boundary() {
        let mut buf = [0u8; 4];
        let src_bytes = "ab\u{20AC}".as_bytes();
        let mut src = ByteSource::new(src_bytes);
        let mut dst = Utf8Destination::new(&mut buf[..]);
        dst.copy_utf8_from(&mut src, src_bytes.len());
        assert_eq!(src.consumed(), 2);
        assert_eq!(dst.written(), 2);
    }

    #[test]
    fn test_utf16_source_unpaired() {
        let units = [0xD83Du16, 0x0061u16, 0xDE00u16, 0xD83Du16, 0xDE00u16];
        let mut src = Utf16Source::new(&units[..]);
        assert_eq!(src.read(), Some('\u{FFFD}'));
        assert_eq!(src.read(), Some('a'));
        assert_eq!(src.read(), Some('\u{FFFD}'));
        assert_eq!(src.read(), Some('\u{1F600}'));
        assert_eq!(src.unread(), 3);
        assert_eq!(src.read(), Some('\u{1F600}'));
        assert_eq!(src.read(), None);
    }

    #[test]
    fn test_byte_destination_write_all() {
        let mut buf = [0u8; 4];
        let mut dst = ByteDestination::new(&mut buf[..]);
        assert!(dst.write_all(b"\x1B(B"));
        assert!(!dst.write_all(b"ab"));
        assert!(dst.write_all(b"?"));
        assert_eq!(&buf[..], b"\x1B(B?");
    }
}
