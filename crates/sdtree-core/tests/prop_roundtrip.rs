/// Property-based round-trip tests for the writers and parser.
///
/// Random trees are generated through `serde_json::Value`, converted to `Element`, and
/// pushed through the compact and pretty writers. Properties checked:
/// - writing then re-parsing yields a tree equal to the (now sorted) original
/// - writing is idempotent once a tree has been sorted
/// - pretty and compact output describe the same tree
/// - deep copies compare equal and serialize identically
///
/// Floats are generated with a limited number of decimals so the stored text is stable.
use proptest::prelude::*;
use sdtree_core::{
    escape_bytes, merge, parse_document, to_compact, to_pretty, Element,
};
use serde_json::{Map, Number, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_-]{0,10}").unwrap(),
        // keys that need quoting
        prop::string::string_regex("[ a-z:,\"\\\\{}]{0,8}").unwrap(),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        prop::string::string_regex("[\"\\\\/\t\n\r{}\\[\\],:]{0,10}").unwrap(),
        Just(String::new()),
        Just("true".to_string()),
        Just("null".to_string()),
        Just("42".to_string()),
        Just("caf\u{00e9} \u{4f60}\u{597d}".to_string()),
    ]
}

fn arb_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|n| Value::Number(Number::from(n))),
        (-100_000i64..100_000, 1u32..4).prop_map(|(mantissa, decimals)| {
            let f = mantissa as f64 / 10f64.powi(decimals as i32);
            Number::from_f64(f).map_or(Value::Null, Value::Number)
        }),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_number(),
        arb_string().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_element() -> impl Strategy<Value = Element> {
    arb_value().prop_map(Element::from)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Compact output parses back to an equal tree.
    #[test]
    fn compact_roundtrip(mut element in arb_element()) {
        let text = to_compact(&mut element);
        let reparsed = parse_document(&text);
        prop_assert!(reparsed.is_ok(), "failed to reparse {:?}: {:?}", text, reparsed);
        let reparsed = reparsed.unwrap();
        prop_assert_eq!(&reparsed, &element, "text: {}", text);
    }

    /// Pretty output parses back to the same tree as compact output.
    #[test]
    fn pretty_matches_compact(mut element in arb_element()) {
        let compact = to_compact(&mut element);
        let pretty = to_pretty(&mut element);
        let mut from_pretty = parse_document(&pretty).unwrap();
        prop_assert_eq!(to_compact(&mut from_pretty), compact);
    }

    /// Writing a sorted tree again changes nothing.
    #[test]
    fn writing_is_idempotent(mut element in arb_element()) {
        let first = to_pretty(&mut element);
        let second = to_pretty(&mut element);
        prop_assert_eq!(first, second);
    }

    /// Pretty output never ends with a newline.
    #[test]
    fn no_trailing_newline(mut element in arb_element()) {
        let pretty = to_pretty(&mut element);
        prop_assert!(!pretty.ends_with('\n'));
    }

    /// A deep copy is equal and independent of the original's later sorting.
    #[test]
    fn deep_copy_equal(element in arb_element()) {
        let mut copy = element.deep_copy();
        prop_assert_eq!(&copy, &element);
        let mut original = element;
        prop_assert_eq!(to_compact(&mut copy), to_compact(&mut original));
    }

    /// Merging with an empty container of the same kind keeps the content.
    #[test]
    fn merge_with_empty_keeps_content(element in arb_element()) {
        let empty = if element.is_array() { Element::array(0) } else { Element::object(0) };
        match merge(&element, &empty) {
            Some(merged) if element.is_container() => prop_assert_eq!(merged, element),
            Some(_) => prop_assert!(false, "merge of a primitive returned a tree"),
            None => prop_assert!(element.is_primitive()),
        }
    }

    /// The byte escaper only emits printable ASCII.
    #[test]
    fn escape_bytes_is_printable(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let escaped = escape_bytes(&bytes);
        prop_assert!(escaped.bytes().all(|b| (0x20..=0x7e).contains(&b)));
    }
}
