use sdtree_core::{ContainerKind, Element, ElementKind, NumeralError, PrimitiveKind};

fn sample_object() -> Element {
    let mut obj = Element::object(3);
    obj.insert("a", Element::integer(1));
    obj.insert("b", Element::string("x"));
    obj.insert("c", Element::boolean(true));
    obj
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn object_children_carry_their_key() {
    let obj = sample_object();
    assert_eq!(obj.len(), 3);
    let names: Vec<_> = obj.children().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec![Some("a"), Some("b"), Some("c")]);
}

#[test]
fn array_children_have_no_key() {
    let mut arr = Element::array(2);
    arr.push(Element::integer(1));
    arr.push(Element::null());
    assert!(arr.children().iter().all(|c| c.name().is_none()));
    assert_eq!(arr.get_index(1).unwrap().kind(), ElementKind::Primitive(PrimitiveKind::Null));
}

#[test]
fn insert_replaces_existing_key_and_moves_it_last() {
    let mut obj = sample_object();
    obj.insert("a", Element::string("replaced"));
    assert_eq!(obj.len(), 3, "duplicate insert must not grow the object");
    assert_eq!(obj.get("a").unwrap().primitive().as_str(), "replaced");
    assert_eq!(obj.get_index(2).unwrap().name(), Some("a"));
}

#[test]
fn missing_key_returns_none() {
    let obj = sample_object();
    assert!(obj.get("zzz").is_none());
    assert!(obj.get_index(10).is_none());
}

#[test]
fn remove_drops_member() {
    let mut obj = sample_object();
    assert!(obj.remove("b"));
    assert!(!obj.remove("b"));
    assert_eq!(obj.len(), 2);
    assert!(obj.get("b").is_none());
}

#[test]
fn detach_transfers_ownership() {
    let mut obj = Element::object(1);
    let mut inner = Element::array(1);
    inner.push(Element::integer(7));
    obj.insert("list", inner);

    let detached = obj.detach("list").expect("member exists");
    assert!(obj.is_empty());
    assert_eq!(detached.name(), None, "a detached element is a root");
    assert_eq!(detached.get_index(0).unwrap().primitive().text(), "7");
}

#[test]
fn reverse_and_sort_arrays() {
    let mut arr = Element::array(3);
    for n in [3, 1, 2] {
        arr.push(Element::integer(n));
    }
    arr.reverse();
    let texts: Vec<_> = arr.iter().map(|c| c.primitive().text().to_string()).collect();
    assert_eq!(texts, ["2", "1", "3"]);

    let descending = true;
    arr.sort_by(|a, b| {
        let ord = a.primitive().i64_or(0).cmp(&b.primitive().i64_or(0));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    let texts: Vec<_> = arr.iter().map(|c| c.primitive().text().to_string()).collect();
    assert_eq!(texts, ["3", "2", "1"]);
}

#[test]
fn container_kinds() {
    assert_eq!(Element::object(0).kind(), ElementKind::Container(ContainerKind::Object));
    assert_eq!(Element::array(0).kind(), ElementKind::Container(ContainerKind::Array));
    assert!(Element::object(0).is_container());
    assert!(Element::null().is_primitive());
}

#[test]
#[should_panic(expected = "requires Object")]
fn object_operation_on_array_panics() {
    let mut arr = Element::array(0);
    arr.insert("k", Element::null());
}

#[test]
#[should_panic(expected = "requires Array")]
fn array_operation_on_object_panics() {
    let mut obj = Element::object(0);
    obj.push(Element::null());
}

#[test]
#[should_panic(expected = "requires a container")]
fn children_of_primitive_panics() {
    let _ = Element::integer(1).children();
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn primitive_length_is_text_length() {
    assert_eq!(Element::integer(12345).len(), 5);
    assert_eq!(Element::string("héllo").len(), 6);
    assert_eq!(Element::boolean(false).len(), 5);
}

#[test]
fn numbers_are_stored_as_text() {
    assert_eq!(Element::integer(-42).primitive().text(), "-42");
    assert_eq!(Element::integer64(i64::MAX).primitive().text(), "9223372036854775807");
    assert_eq!(Element::real(2.5).primitive().text(), "2.5");
    assert_eq!(Element::real(3.0).primitive().text(), "3.0");
}

#[test]
fn real_normalizes_nan_and_infinity() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let real = Element::real(value);
        assert_eq!(real.primitive().text(), "0.0");
        assert_eq!(real.primitive().try_f64().unwrap(), 0.0);
    }
}

#[test]
fn integer_accessor_policies() {
    let ok = Element::numeral("123").unwrap();
    let huge = Element::numeral("99999999999999999999").unwrap();
    let exp = Element::numeral("1e5").unwrap();

    assert_eq!(ok.primitive().try_i64(), Ok(123));
    assert_eq!(ok.primitive().i64_or_abort(), 123);
    assert_eq!(
        huge.primitive().try_i64(),
        Err(NumeralError::OutOfRange("99999999999999999999".into()))
    );
    assert_eq!(huge.primitive().i64_or(-1), -1);
    assert_eq!(
        exp.primitive().try_i64(),
        Err(NumeralError::NotANumber("1e5".into()))
    );
    assert_eq!(exp.primitive().try_f64(), Ok(100000.0));
}

#[test]
fn i32_accessors_check_width() {
    let wide = Element::integer64(i64::from(i32::MAX) + 1);
    assert!(matches!(wide.primitive().try_i32(), Err(NumeralError::OutOfRange(_))));
    assert_eq!(wide.primitive().i32_or(9), 9);
    assert_eq!(Element::integer(-5).primitive().i32_or_abort(), -5);
}

#[test]
#[should_panic(expected = "integer accessor failed")]
fn abort_policy_panics_on_bad_numeral() {
    Element::numeral("1e5").unwrap().primitive().i64_or_abort();
}

#[test]
#[should_panic(expected = "requires a Real or Integer")]
fn real_accessor_on_string_panics() {
    let _ = Element::string("1.5").primitive().try_f64();
}

#[test]
#[should_panic(expected = "requires a Bool")]
fn bool_accessor_on_null_panics() {
    Element::null().primitive().as_bool();
}

#[test]
fn numeral_constructor_validates_text() {
    assert!(Element::numeral("0.5").unwrap().primitive().kind() == PrimitiveKind::Real);
    assert!(Element::numeral("-3").unwrap().primitive().kind() == PrimitiveKind::Integer);
    assert!(Element::numeral("01").is_none());
    assert!(Element::numeral("abc").is_none());
}
