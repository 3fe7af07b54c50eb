// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![no_main]
use charconv::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some(encoding) = Encoding::for_label(data) {
        assert_eq!(Encoding::for_name(encoding.name().as_bytes()), Some(encoding));
        assert_eq!(Encoding::for_label_no_replacement(data) == Some(encoding),
                   encoding != REPLACEMENT);
    } else {
        assert_eq!(Encoding::for_label_no_replacement(data), None);
    }
});
