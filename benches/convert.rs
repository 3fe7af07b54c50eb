// Copyright 2015-2016 Mozilla Foundation. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decode and encode throughput per encoding family, plus the `mem`
//! conversions.

use charconv::*;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const TEXT: &str = "\u{65E5}\u{672C}\u{8A9E}\u{306E}\u{30C6}\u{30AD}\u{30B9}\u{30C8} mixed with ASCII \
                    punctuation, digits 0123456789 and \u{4E2D}\u{6587} \u{D55C}\u{AD6D}\u{C5B4}. ";

static ENCODINGS: [&'static Encoding; 9] = [&UTF_8_INIT, &UTF_16LE_INIT, &WINDOWS_1252_INIT, &SHIFT_JIS_INIT, &EUC_JP_INIT,
                                            &ISO_2022_JP_INIT, &EUC_KR_INIT, &BIG5_INIT, &GB18030_INIT];

fn corpus(size: usize) -> String {
    let mut text = String::with_capacity(size + TEXT.len());
    while text.len() < size {
        text.push_str(TEXT);
    }
    text
}

fn bench_decode(c: &mut Criterion) {
    let text = corpus(64 * 1024);
    let mut group = c.benchmark_group("decode_to_utf8");
    for &encoding in ENCODINGS.iter() {
        let (bytes, _, _) = encoding.encode(&text[..]);
        let bytes = if encoding == UTF_16LE {
            text.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect::<Vec<u8>>()
        } else {
            bytes.into_owned()
        };
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(encoding.name()), &bytes, |b, bytes| {
            let mut decoder = encoding.new_decoder_without_bom_handling();
            let mut dst = vec![0u8; decoder.max_utf8_buffer_length(bytes.len()).unwrap_or(0)];
            b.iter(|| {
                let (result, _, written, _) = decoder.decode_to_utf8(black_box(&bytes[..]), &mut dst[..], false);
                black_box((result, written));
            });
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let text = corpus(64 * 1024);
    let mut group = c.benchmark_group("encode_from_utf8");
    group.throughput(Throughput::Bytes(text.len() as u64));
    for &encoding in ENCODINGS.iter() {
        if encoding == UTF_16LE {
            continue;
        }
        group.bench_with_input(BenchmarkId::from_parameter(encoding.name()), &text, |b, text| {
            let mut encoder = encoding.new_encoder();
            let mut dst = vec![0u8; encoder.max_buffer_length_from_utf8_with_replacement(text.len()).unwrap_or(0)];
            b.iter(|| {
                let (result, _, written, _) = encoder.encode_from_utf8(black_box(&text[..]), &mut dst[..], false);
                black_box((result, written));
            });
        });
    }
    group.finish();
}

fn bench_labels(c: &mut Criterion) {
    c.bench_function("for_label", |b| {
        b.iter(|| {
            for label in ["utf-8", " Shift_JIS ", "cseucpkdfmtjapanese", "latin1", "bogus"].iter() {
                black_box(Encoding::for_label(black_box(label.as_bytes())));
            }
        });
    });
}

fn bench_mem(c: &mut Criterion) {
    let text = corpus(64 * 1024);
    let utf16: Vec<u16> = text.encode_utf16().collect();
    let mut group = c.benchmark_group("mem");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("convert_utf8_to_utf16", |b| {
        let mut dst = vec![0u16; text.len() + 1];
        b.iter(|| black_box(mem::convert_utf8_to_utf16(black_box(text.as_bytes()), &mut dst[..])));
    });
    group.bench_function("convert_utf16_to_utf8", |b| {
        let mut dst = vec![0u8; utf16.len() * 3 + 1];
        b.iter(|| black_box(mem::convert_utf16_to_utf8(black_box(&utf16[..]), &mut dst[..])));
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_labels, bench_mem);
criterion_main!(benches);
