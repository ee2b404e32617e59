use fieldscan::{Cursor, DecodeSettings, ErrorKind};
use serde::de::IgnoredAny;

/// Whether the complete `json` is consumed by skipping a single value
fn skip_complete(json: &str) -> bool {
    let mut cursor = Cursor::new(json.as_bytes());
    if cursor.skip_value().is_err() {
        return false;
    }
    cursor.skip_whitespace();
    cursor.is_at_end()
}

fn assert_agrees_with_serde_json(json: &str) {
    let serde_result = serde_json::from_str::<IgnoredAny>(json);
    assert_eq!(
        serde_result.is_ok(),
        skip_complete(json),
        "Different result for '{json}'; Serde JSON: {serde_result:?}"
    );
}

#[test]
fn valid_values() {
    for json in [
        "0",
        "-0",
        "123",
        "-1.5e-7",
        "1E+2",
        "true",
        "false",
        "null",
        r#""""#,
        r#""text""#,
        r#""\"\\\/\b\f\n\r\tA😀""#,
        "\"\u{10FFFF}\"",
        "[]",
        "{}",
        " [ 1 , 2 ] ",
        r#"[{"a": [{}], "b": {"c": "]}"}}, null]"#,
        r#"{"": "", "a": {"a": {"a": [true, false]}}}"#,
        "\n\t\r [\n\t\r ]\n\t\r ",
    ] {
        assert!(skip_complete(json), "Should be skipped: {json}");
        assert_agrees_with_serde_json(json);
    }
}

#[test]
fn invalid_values() {
    for json in [
        "",
        " ",
        "-",
        "+1",
        "01",
        "1.",
        ".1",
        "1e",
        "0x10",
        "NaN",
        "Infinity",
        "nul",
        "nulll",
        "True",
        "'a'",
        r#"""#,
        r#""\a""#,
        r#""\u00G0""#,
        "\"a\u{1}b\"",
        "[",
        "]",
        "[1,]",
        "[,]",
        "[1 2]",
        "[1:2]",
        "{",
        "}",
        "{1: 2}",
        r#"{"a"}"#,
        r#"{"a": }"#,
        r#"{"a": 1,}"#,
        r#"{"a": 1 "b": 2}"#,
        r#"{"a", 1}"#,
        "[}",
        "{]",
        "[[]",
        "[bare words]",
        "[true false]",
        "1 2",
        "[] []",
    ] {
        assert!(!skip_complete(json), "Should not be skipped: {json}");
        assert_agrees_with_serde_json(json);
    }
}

#[test]
fn stops_at_delimiter() {
    for (json, remaining) in [
        ("1,2", ",2"),
        ("[1]]", "]"),
        (r#"{"a":"}"}}"#, "}"),
        (r#""a\"," ,"#, " ,"),
        ("true \n }", " \n }"),
    ] {
        let mut cursor = Cursor::new(json.as_bytes());
        if let Err(e) = cursor.skip_value() {
            panic!("Failed skipping '{json}': {e}");
        }
        assert_eq!(remaining.as_bytes(), cursor.remaining(), "For input: {json}");
    }
}

#[test]
fn nesting_depth() {
    let json = |depth: usize| format!("{}{}", r#"{"a":["#.repeat(depth), "]}".repeat(depth));

    // Each repetition nests two levels
    assert!(skip_complete(&json(50)));
    let deep = json(51);
    let mut cursor = Cursor::new(deep.as_bytes());
    match cursor.skip_value() {
        Err(e) => {
            assert_eq!(ErrorKind::NestingTooDeep, e.kind);
            // Opening bracket of the 101st level
            assert_eq!(50 * 6, e.offset);
        }
        Ok(()) => panic!("should have failed"),
    }

    let settings = DecodeSettings {
        max_nesting_depth: 128,
        ..Default::default()
    };
    let mut cursor = Cursor::new_custom(deep.as_bytes(), settings);
    assert_eq!(Ok(()), cursor.skip_value());
    assert!(cursor.is_at_end());
}
