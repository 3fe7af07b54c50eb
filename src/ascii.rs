// Copyright 2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ASCII run copying. Each function copies from the start of `src` into
//! `dst` until it meets a non-ASCII code unit or either slice ends, and
//! returns the number of code units copied.

use cfg_if::cfg_if;

macro_rules! ascii_naive {
    ($name:ident,
     $src_unit:ty,
     $dst_unit:ty) => (
    #[inline(always)]
    pub fn $name(src: &[$src_unit], dst: &mut [$dst_unit]) -> usize {
        let len = ::std::cmp::min(src.len(), dst.len());
        for i in 0..len {
            let code_unit = src[i];
            if code_unit > 127 {
                return i;
            }
            dst[i] = code_unit as $dst_unit;
        }
        len
    });
}

macro_rules! ascii_alu {
    ($name:ident,
     $dst_unit:ty) => (
    #[inline(always)]
    pub fn $name(src: &[u8], dst: &mut [$dst_unit]) -> usize {
        let len = ::std::cmp::min(src.len(), dst.len());
        let mut offset = 0usize;
        while offset + STRIDE_SIZE <= len {
            let stride = &src[offset..offset + STRIDE_SIZE];
            if !stride_is_ascii(stride) {
                break;
            }
            for (d, s) in dst[offset..offset + STRIDE_SIZE].iter_mut().zip(stride) {
                *d = *s as $dst_unit;
            }
            offset += STRIDE_SIZE;
        }
        while offset < len {
            let code_unit = src[offset];
            if code_unit > 127 {
                return offset;
            }
            dst[offset] = code_unit as $dst_unit;
            offset += 1;
        }
        len
    });
}

cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        // One ALU word at a time.

        const STRIDE_SIZE: usize = 8;

        #[inline(always)]
        fn stride_is_ascii(stride: &[u8]) -> bool {
            let mut word = [0u8; STRIDE_SIZE];
            word.copy_from_slice(stride);
            (u64::from_ne_bytes(word) & 0x80808080_80808080u64) == 0
        }

        /// Returns the length of the ASCII prefix of `bytes`.
        pub fn ascii_valid_up_to(bytes: &[u8]) -> usize {
            let mut offset = 0usize;
            while offset + STRIDE_SIZE <= bytes.len() {
                if !stride_is_ascii(&bytes[offset..offset + STRIDE_SIZE]) {
                    break;
                }
                offset += STRIDE_SIZE;
            }
            while offset < bytes.len() {
                if bytes[offset] > 127 {
                    return offset;
                }
                offset += 1;
            }
            offset
        }

        ascii_alu!(ascii_to_ascii, u8);
        ascii_alu!(ascii_to_basic_latin, u16);
        ascii_naive!(basic_latin_to_ascii, u16, u8);
    } else {
        /// Returns the length of the ASCII prefix of `bytes`.
        pub fn ascii_valid_up_to(bytes: &[u8]) -> usize {
            bytes.iter().position(|b| *b > 127).unwrap_or(bytes.len())
        }

        ascii_naive!(ascii_to_ascii, u8, u8);
        ascii_naive!(ascii_to_basic_latin, u8, u16);
        ascii_naive!(basic_latin_to_ascii, u16, u8);
    }
}

// Any copyright to the test code below this comment is dedicated to the
// Public Domain. http://creativecommons.org/publicdomain/zero/1.0/

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_ascii {
        ($test_name:ident,
         $fn_tested:ident,
         $src_unit:ty,
         $dst_unit:ty) => (
        #[test]
        fn $test_name() {
            let mut src: Vec<$src_unit> = Vec::with_capacity(32);
            let mut dst: Vec<$dst_unit> = Vec::with_capacity(32);
            for i in 0..32 {
                src.clear();
                dst.clear();
                dst.resize(32, 0);
                for j in 0..32 {
                    let c = if i == j {
                        0xAA
                    } else {
                        j + 0x40
                    };
                    src.push(c as $src_unit);
                }
                let num_ascii = $fn_tested(&src[..], &mut dst[..]);
                assert_eq!(num_ascii, i);
                assert_eq!(src[num_ascii], 0xAA);
                for j in 0..i {
                    assert_eq!(dst[j], (j + 0x40) as $dst_unit);
                }
            }
        });
    }

    test_ascii!(test_ascii_to_ascii, ascii_to_ascii, u8, u8);
    test_ascii!(test_ascii_to_basic_latin, ascii_to_basic_latin, u8, u16);
    test_ascii!(test_basic_latin_to_ascii, basic_latin_to_ascii, u16, u8);

    #[test]
    fn test_short_destination() {
        let src = b"abcdefghijklmnop";
        let mut dst = [0u16; 11];
        assert_eq!(ascii_to_basic_latin(&src[..], &mut dst[..]), 11);
        assert_eq!(dst[10], 'k' as u16);
    }

    #[test]
    fn test_ascii_valid_up_to() {
        assert_eq!(ascii_valid_up_to(b""), 0);
        assert_eq!(ascii_valid_up_to(b"0123456789abcdef"), 16);
        assert_eq!(ascii_valid_up_to(b"0123456789\xC3\xA9"), 10);
        assert_eq!(ascii_valid_up_to(b"\x80"), 0);
    }
}
