use sdtree_core::{
    parse_document, parse_value, to_compact, Cursor, Element, ErrorCode, Parser, PrimitiveKind,
    MAX_DEPTH,
};

fn code_of(input: &str) -> ErrorCode {
    match parse_document(input) {
        Ok(doc) => panic!("expected {input:?} to fail, parsed {doc:?}"),
        Err(err) => err.code,
    }
}

fn kind_and_text(input: &str) -> (PrimitiveKind, String) {
    let doc = parse_document(input).unwrap_or_else(|e| panic!("{input:?}: {e}"));
    let p = doc.primitive();
    (p.kind(), p.text().to_string())
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn literals() {
    assert!(parse_document("true").unwrap().primitive().as_bool());
    assert!(!parse_document("false").unwrap().primitive().as_bool());
    assert!(parse_document("null").unwrap().is_null());
}

#[test]
fn literal_followed_by_word_character_is_invalid() {
    assert_eq!(code_of("nullx"), ErrorCode::InvalidLiteral);
    assert_eq!(code_of("[truest]"), ErrorCode::InvalidLiteral);
}

#[test]
fn numerals_keep_source_text() {
    let table = [
        ("0", PrimitiveKind::Integer),
        ("-0", PrimitiveKind::Integer),
        ("-12", PrimitiveKind::Integer),
        ("1e5", PrimitiveKind::Integer),
        ("2E-3", PrimitiveKind::Integer),
        ("1.0", PrimitiveKind::Real),
        ("-0.0e-10", PrimitiveKind::Real),
        ("0.1234e+10", PrimitiveKind::Real),
    ];
    for (input, kind) in table {
        assert_eq!(kind_and_text(input), (kind, input.to_string()), "{input}");
    }
}

#[test]
fn malformed_numerals_report_distinct_codes() {
    let table = [
        ("01", ErrorCode::NumberLeadingZero),
        ("1.", ErrorCode::NumberTrailingNonDigit),
        ("-", ErrorCode::NumberTrailingNonDigit),
        ("+1", ErrorCode::NumberMisplacedPlus),
        ("1-1", ErrorCode::NumberMisplacedMinus),
        (".5", ErrorCode::NumberDotWithoutDigit),
        ("1.2.3", ErrorCode::NumberMultipleDots),
        ("1e2.0", ErrorCode::NumberDotInExponent),
        ("e5", ErrorCode::NumberExponentWithoutDigit),
        ("1e2e3", ErrorCode::NumberMultipleExponents),
    ];
    for (input, code) in table {
        assert_eq!(code_of(input), code, "{input}");
        assert!(code.is_number_error());
    }
}

#[test]
fn string_escapes() {
    let doc = parse_document(r#""tab\tquote\"slash\/back\\""#).unwrap();
    assert_eq!(doc.primitive().as_str(), "tab\tquote\"slash/back\\");
}

#[test]
fn unicode_escape_is_kept_verbatim() {
    let doc = parse_document(r#""\u00e9""#).unwrap();
    assert_eq!(doc.primitive().as_str(), "\\u00e9");
}

#[test]
fn raw_utf8_passes_through() {
    let doc = parse_document("\"héllo ✓\"").unwrap();
    assert_eq!(doc.primitive().as_str(), "héllo ✓");
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn nested_document() {
    let doc = parse_document(
        r#"
        {
            "name": "tree",
            "tags": ["a", "b"],
            "meta": {"depth": 2, "ratio": 0.5, "none": null}
        }
        "#,
    )
    .unwrap();
    assert_eq!(doc.len(), 3);
    assert_eq!(doc.get("tags").unwrap().len(), 2);
    let meta = doc.get("meta").unwrap();
    assert_eq!(meta.get("depth").unwrap().primitive().i64_or(0), 2);
    assert_eq!(meta.get("ratio").unwrap().primitive().kind(), PrimitiveKind::Real);
    assert!(meta.get("none").unwrap().is_null());
}

#[test]
fn members_keep_source_order() {
    let doc = parse_document(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    let keys: Vec<_> = doc.iter().filter_map(Element::name).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn duplicate_key_keeps_last_value() {
    let doc = parse_document(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get("a").unwrap().primitive().text(), "3");
}

#[test]
fn empty_containers() {
    assert!(parse_document("{}").unwrap().is_empty());
    assert!(parse_document("[ ]").unwrap().is_empty());
}

#[test]
fn single_trailing_comma_is_accepted() {
    assert_eq!(parse_document("[1,2,]").unwrap().len(), 2);
    assert_eq!(parse_document(r#"{"a":1,}"#).unwrap().len(), 1);
}

#[test]
fn repeated_commas_are_rejected() {
    assert_eq!(code_of(r#"["a","b",,]"#), ErrorCode::ArrayDoubleComma);
    assert_eq!(code_of(r#"["a",,"b"]"#), ErrorCode::ArrayDoubleComma);
}

#[test]
fn numerals_inside_arrays() {
    for input in ["[0]", "[-0.0e-10]", "[1.0]", "[0.1234e+10]"] {
        assert_eq!(parse_document(input).unwrap().len(), 1, "{input}");
    }
    for input in ["[01]", "[1.]", "[+2]", "[1e]", "[e10]"] {
        assert!(code_of(input).is_number_error(), "{input}");
    }
}

#[test]
fn bare_word_keys() {
    let doc = parse_document("{name: 1, snake_case : 2, kebab-case:3, 9lives: 4}").unwrap();
    let keys: Vec<_> = doc.iter().filter_map(Element::name).collect();
    assert_eq!(keys, ["name", "snake_case", "kebab-case", "9lives"]);
}

#[test]
fn structural_error_codes() {
    let table = [
        ("", ErrorCode::EmptyInput),
        ("   \n", ErrorCode::EmptyInput),
        ("1 2", ErrorCode::TrailingCharacters),
        ("?", ErrorCode::UnexpectedCharacter),
        ("{\"a\":1", ErrorCode::ObjectUnterminated),
        ("{,}", ErrorCode::ObjectLeadingComma),
        ("{\"a\":1,,}", ErrorCode::ObjectDoubleComma),
        ("{\"a\" 1}", ErrorCode::ObjectMissingColon),
        ("{\"a\",}", ErrorCode::ObjectMissingColon),
        ("{\"a\"::1}", ErrorCode::ObjectDoubleColon),
        ("{:1}", ErrorCode::ObjectStrayColon),
        ("{\"a\":1 \"b\":2}", ErrorCode::ObjectMissingComma),
        ("{\"a\":}", ErrorCode::ObjectMissingValue),
        ("{\"a\"}", ErrorCode::ObjectMissingValue),
        ("{-x: 1}", ErrorCode::ObjectExpectedKey),
        ("{word 1}", ErrorCode::ObjectExpectedKey),
        ("[1", ErrorCode::ArrayUnterminated),
        ("[,1]", ErrorCode::ArrayLeadingComma),
        ("[1,,]", ErrorCode::ArrayDoubleComma),
        ("[1 2]", ErrorCode::ArrayMissingComma),
        ("[1:2]", ErrorCode::ArrayStrayColon),
        ("\"open", ErrorCode::StringUnterminated),
        ("nope", ErrorCode::InvalidLiteral),
    ];
    for (input, code) in table {
        assert_eq!(code_of(input), code, "{input:?}");
    }
}

#[test]
fn error_position_points_at_offending_byte() {
    let err = parse_document("{\n  \"a\": 1\n  \"b\": 2\n}").unwrap_err();
    assert_eq!(err.code, ErrorCode::ObjectMissingComma);
    assert_eq!((err.line, err.column), (3, 3));
    assert_eq!(err.offset, 13);
}

#[test]
fn unterminated_container_points_at_opening_bracket() {
    let err = parse_document("  [1, 2").unwrap_err();
    assert_eq!(err.code, ErrorCode::ArrayUnterminated);
    assert_eq!(err.offset, 2);
}

#[test]
fn nesting_up_to_the_limit_is_accepted() {
    let input = "[".repeat(MAX_DEPTH) + &"]".repeat(MAX_DEPTH);
    let mut doc = parse_document(&input).unwrap();
    assert_eq!(to_compact(&mut doc), input);

    let objects = "{a:".repeat(MAX_DEPTH - 1) + "{}" + &"}".repeat(MAX_DEPTH - 1);
    assert!(parse_document(&objects).is_ok());
}

#[test]
fn nesting_past_the_limit_is_an_error() {
    let err = parse_document(&"[".repeat(100_000)).unwrap_err();
    assert_eq!(err.code, ErrorCode::NestingTooDeep);
    assert_eq!(err.offset, MAX_DEPTH);

    let balanced = "[".repeat(50_000) + &"]".repeat(50_000);
    assert_eq!(code_of(&balanced), ErrorCode::NestingTooDeep);

    let objects = "{\"k\":".repeat(MAX_DEPTH + 1) + "1" + &"}".repeat(MAX_DEPTH + 1);
    assert_eq!(code_of(&objects), ErrorCode::NestingTooDeep);
    assert_eq!(
        parse_value(&"[{".repeat(MAX_DEPTH)).unwrap_err().code,
        ErrorCode::NestingTooDeep
    );
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn parse_value_ignores_trailing_text() {
    let doc = parse_value("[1] trailing garbage").unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(code_of("[1] trailing garbage"), ErrorCode::TrailingCharacters);
}

#[test]
fn parse_at_leaves_cursor_after_value() {
    let mut cursor = Cursor::new(" 1 2");
    let mut parser = Parser::new();
    let first = parser.parse_at(&mut cursor).unwrap();
    let second = parser.parse_at(&mut cursor).unwrap();
    assert_eq!(first.primitive().text(), "1");
    assert_eq!(second.primitive().text(), "2");
    assert!(cursor.is_at_end());
}

// ============================================================================
// Extension hook
// ============================================================================

#[test]
fn hook_resolves_unknown_value() {
    let mut hook = |cursor: &mut Cursor<'_>| -> Option<Element> {
        let word: String = cursor
            .remaining()
            .chars()
            .take_while(|c| c.is_ascii_uppercase())
            .collect();
        if word.is_empty() {
            return None;
        }
        cursor.advance(word.len());
        Some(Element::string(format!("env:{word}")))
    };
    let doc = Parser::new()
        .with_hook(&mut hook)
        .parse_document("[PATH, 1, USER]")
        .unwrap();
    let values: Vec<_> = doc.iter().map(|c| c.primitive().text().to_string()).collect();
    assert_eq!(values, ["env:PATH", "1", "env:USER"]);
}

#[test]
fn hook_declining_restores_cursor_and_reports_error() {
    let mut calls = 0;
    let mut hook = |cursor: &mut Cursor<'_>| -> Option<Element> {
        calls += 1;
        cursor.advance(3);
        None
    };
    let err = Parser::new()
        .with_hook(&mut hook)
        .parse_document("[maybe]")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidLiteral);
    assert_eq!(err.offset, 1);
    assert_eq!(calls, 1);
}

#[test]
fn hook_moving_the_cursor_backwards_counts_as_declining() {
    let mut hook = |cursor: &mut Cursor<'_>| -> Option<Element> {
        let text = cursor.text();
        *cursor = Cursor::new(text);
        Some(Element::null())
    };
    let err = Parser::new()
        .with_hook(&mut hook)
        .parse_document("[maybe]")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidLiteral);
    assert_eq!(err.offset, 1);
}

#[test]
fn hook_swapping_in_another_input_is_ignored() {
    let mut hook = |cursor: &mut Cursor<'_>| -> Option<Element> {
        *cursor = Cursor::new("");
        None
    };
    let mut parser = Parser::new().with_hook(&mut hook);
    let mut cursor = Cursor::new("[1, maybe]");
    let err = parser.parse_at(&mut cursor).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidLiteral);
    assert_eq!(err.offset, 4);
}

#[test]
fn hook_is_not_consulted_for_grammar_values() {
    let mut hook = |_: &mut Cursor<'_>| -> Option<Element> {
        panic!("hook should not run");
    };
    let doc = Parser::new()
        .with_hook(&mut hook)
        .parse_document(r#"{"a": [true, 1.5, "s", null]}"#)
        .unwrap();
    assert_eq!(doc.get("a").unwrap().len(), 4);
}
