// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

#![cfg(feature = "serde")]

use charconv::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Document {
    title: String,
    charset: &'static Encoding,
}

#[test]
fn test_serializes_as_name() {
    let document = Document {
        title: "t".to_string(),
        charset: SHIFT_JIS,
    };
    let json = serde_json::to_string(&document).unwrap();
    assert_eq!(json, r#"{"title":"t","charset":"Shift_JIS"}"#);
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, document);
}

#[test]
fn test_deserializes_labels() {
    let document: Document = serde_json::from_str(r#"{"title":"t","charset":" latin1 "}"#).unwrap();
    assert_eq!(document.charset, WINDOWS_1252);
    let error = serde_json::from_str::<Document>(r#"{"title":"t","charset":"klingon"}"#).unwrap_err();
    assert!(error.to_string().contains("invalid encoding label: klingon"));
}
