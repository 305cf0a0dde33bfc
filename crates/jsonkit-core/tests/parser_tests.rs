/// Parser contract tests: accepted documents, the shape of the resulting
/// tree, and the message/line/column of every rejection class.
use jsonkit_core::{array, object, parse, ParseError, Parser, Type, Value, NULL};

fn assert_parse_error(input: &str, message: &str, line: usize, column: usize) {
    let err = parse(input).expect_err("input should be rejected");
    assert!(
        err.message.contains(message),
        "message mismatch for {input:?}:\n  got:      {}\n  expected: {message}",
        err.message
    );
    assert_eq!(
        (err.line, err.column),
        (line, column),
        "position mismatch for {input:?}: {err}"
    );
}

// ============================================================================
// Primitive Values (Root-Level)
// ============================================================================

#[test]
fn parse_null() {
    assert!(parse("null").unwrap().is(Type::Null));
}

#[test]
fn parse_bools() {
    assert_eq!(parse("true").unwrap(), true);
    assert_eq!(parse("false").unwrap(), false);
}

#[test]
fn parse_integer() {
    assert_eq!(parse("42").unwrap(), 42);
}

#[test]
fn parse_negative_integer() {
    assert_eq!(parse("-7").unwrap(), -7);
}

#[test]
fn parse_float() {
    assert_eq!(parse("3.14").unwrap(), 3.14);
}

#[test]
fn parse_exponents() {
    assert_eq!(parse("1e3").unwrap(), 1000);
    assert_eq!(parse("1E+3").unwrap(), 1000);
    assert_eq!(parse("25e-1").unwrap(), 2.5);
    assert_eq!(parse("-0.5E1").unwrap(), -5);
}

#[test]
fn parse_zero_forms() {
    assert_eq!(parse("0").unwrap(), 0);
    assert_eq!(parse("-0").unwrap(), 0);
    assert_eq!(parse("0.0").unwrap(), 0);
}

#[test]
fn integral_and_float_literals_are_stored_alike() {
    assert_eq!(parse("2").unwrap(), parse("2.0").unwrap());
    assert_eq!(parse("2").unwrap(), parse("0.2e1").unwrap());
}

#[test]
fn parse_string() {
    assert_eq!(parse(r#""hello world""#).unwrap(), "hello world");
}

#[test]
fn parse_empty_string() {
    assert_eq!(parse(r#""""#).unwrap(), "");
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn parse_empty_containers() {
    assert_eq!(parse("[]").unwrap(), array![]);
    assert_eq!(parse("{}").unwrap(), object! {});
    assert_eq!(parse("[ ]").unwrap(), array![]);
    assert_eq!(parse("{\n}").unwrap(), object! {});
}

#[test]
fn parse_mixed_array() {
    let v = parse(r#"[1, 2, 3, "4", false, null]"#).unwrap();
    assert_eq!(v, array![1, 2, 3, "4", false, NULL]);
}

#[test]
fn parse_nested_arrays() {
    let v = parse("[1,[2,[3,4]]]").unwrap();
    assert_eq!(v[1][1][0].convert::<i32>().unwrap(), 3);
}

#[test]
fn parse_nested_object() {
    let v = parse(
        r#"{
            "name": "json",
            "properties": {
                "size": 42,
                "integers": [1, 2, "3"]
            }
        }"#,
    )
    .unwrap();
    assert_eq!(
        v,
        object! {
            "name" => "json",
            "properties" => object! {
                "size" => 42,
                "integers" => array![1, 2, "3"],
            },
        }
    );
}

#[test]
fn object_keys_keep_insertion_order() {
    let v = parse(r#"{"b":1,"a":2}"#).unwrap();
    let keys: Vec<&str> = v.entries().unwrap().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["b", "a"]);
}

#[test]
fn duplicate_key_last_value_wins() {
    let v = parse(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(v.len(), Some(1));
    assert_eq!(v["a"], 2);
}

#[test]
fn keys_are_unescaped() {
    let v = parse(r#"{"ab":1,"a\nb":2}"#).unwrap();
    assert_eq!(v["ab"], 1);
    assert_eq!(v["a\nb"], 2);
}

// ============================================================================
// Unicode
// ============================================================================

#[test]
fn unicode_escape_decodes_to_utf8() {
    let v = parse(r#"[22, 23, "\u03bb"]"#).unwrap();
    assert_eq!(v[2], "λ");
    assert_eq!(v[2].as_str().unwrap().as_bytes(), [0xCE, 0xBB]);
}

#[test]
fn surrogate_pair_decodes_to_one_code_point() {
    let v = parse(r#""\ud834\udd1e""#).unwrap();
    assert_eq!(v, "\u{1D11E}");
    assert_eq!(v.as_str().unwrap().chars().count(), 1);
}

#[test]
fn raw_non_ascii_passes_through() {
    assert_eq!(parse("\"日本語 ✓\"").unwrap(), "日本語 ✓");
}

#[test]
fn lone_low_surrogate_is_rejected() {
    assert_parse_error(r#"["\uDE00"]"#, "unpaired surrogate", 1, 3);
}

#[test]
fn high_surrogate_without_low_is_rejected() {
    assert_parse_error(r#""ab\uD83D""#, "unpaired surrogate", 1, 4);
    assert_parse_error(r#""\uD83D\n""#, "unpaired surrogate", 1, 2);
}

// ============================================================================
// Errors and positions
// ============================================================================

#[test]
fn empty_input() {
    assert_parse_error("", "unexpected end of input", 1, 1);
}

#[test]
fn missing_closing_bracket() {
    assert_parse_error("[1,2,3", "unexpected end of input", 1, 7);
}

#[test]
fn missing_closing_brace() {
    assert_parse_error("{\"a\":1", "unexpected end of input", 1, 7);
}

#[test]
fn unterminated_string() {
    assert_parse_error("\"abc", "unexpected end of input", 1, 5);
}

#[test]
fn truncated_literals() {
    assert_parse_error("tr", "unexpected end of input", 1, 3);
    assert_parse_error("[nul", "unexpected end of input", 1, 5);
}

#[test]
fn misspelled_literal() {
    assert_parse_error("[nope]", "expected `null`", 1, 3);
}

#[test]
fn error_on_second_line() {
    assert_parse_error("[1,\n 2,\n x]", "unexpected character 'x'", 3, 2);
}

#[test]
fn trailing_comma() {
    assert_parse_error("[1,2,]", "unexpected character ']'", 1, 6);
    assert_parse_error(r#"{"a":1,}"#, "expected a string key", 1, 8);
}

#[test]
fn missing_colon() {
    assert_parse_error(r#"{"a" 1}"#, "expected ':'", 1, 6);
}

#[test]
fn missing_comma() {
    assert_parse_error("[1 2]", "expected ',' or ']'", 1, 4);
    assert_parse_error(r#"{"a":1 "b":2}"#, "expected ',' or '}'", 1, 8);
}

#[test]
fn concatenated_values_are_rejected() {
    assert_parse_error("1 2", "trailing characters", 1, 3);
    assert_parse_error("{}\n[]", "trailing characters", 2, 1);
}

#[test]
fn leading_zero() {
    assert_parse_error("012", "leading zeros", 1, 2);
}

#[test]
fn fraction_and_exponent_need_digits() {
    assert_parse_error("[1.]", "expected a digit", 1, 4);
    assert_parse_error("1e+", "unexpected end of input", 1, 4);
}

#[test]
fn control_character_in_string() {
    assert_parse_error("\"tab\there\"", "control character", 1, 5);
}

#[test]
fn error_display_includes_position() {
    let err = parse("[1,2,3").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected end of input at line 1, column 7"
    );
}

#[test]
fn parse_error_is_comparable() {
    assert_eq!(
        parse("").unwrap_err(),
        ParseError {
            message: "unexpected end of input".to_string(),
            line: 1,
            column: 1
        }
    );
}

// ============================================================================
// Parser reuse
// ============================================================================

#[test]
fn one_parser_many_documents() {
    let mut parser = Parser::new();
    let mut v = Value::Null;

    parser.parse(&mut v, "[1,2,3]").unwrap();
    assert_eq!(v[1], 2);

    // An error on the second line must not leak its line count into the next parse.
    assert!(parser.parse(&mut v, "[\n\n").is_err());

    let err = parser.parse(&mut v, "[1,2,3").unwrap_err();
    assert_eq!((err.line, err.column), (1, 7));

    parser.parse(&mut v, r#"{"k":"v"}"#).unwrap();
    assert_eq!(v["k"], "v");
}

#[test]
fn failed_parse_keeps_previous_output() {
    let mut parser = Parser::new();
    let mut v = array![1];
    assert!(parser.parse(&mut v, "[2,").is_err());
    assert_eq!(v, array![1]);
}

#[test]
fn default_depth_limit_is_generous_but_finite() {
    let ok = format!("{}{}", "[".repeat(100), "]".repeat(100));
    assert!(parse(&ok).is_ok());

    let deep = format!("{}{}", "[".repeat(1000), "]".repeat(1000));
    let err = parse(&deep).unwrap_err();
    assert!(err.message.starts_with("nesting too deep"));
}
