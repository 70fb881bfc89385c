//! Merging trees.
//!
//! [`merge`] builds a new tree from deep copies and leaves both inputs untouched.
//! [`deep_merge`] folds the right object into the left one in place.

use crate::element::Element;

/// Merge two containers into a new tree.
///
/// | left   | right  | result |
/// |--------|--------|--------|
/// | Array  | Array  | Array: left elements, then right elements |
/// | Object | Object | Object: union of keys, right wins on conflict |
/// | Object | Array  | Object: left members, then right elements keyed `"0"`, `"1"`, ... |
/// | Array  | Object | Object: left elements keyed `"0"`, `"1"`, ..., then right members |
///
/// Returns `None` when either side is a primitive.
///
/// ```
/// use sdtree_core::{merge, parse_document, to_compact};
///
/// let a = parse_document(r#"{"x":1,"y":2}"#).unwrap();
/// let b = parse_document(r#"{"y":3,"z":4}"#).unwrap();
/// let mut merged = merge(&a, &b).unwrap();
/// assert_eq!(to_compact(&mut merged), r#"{"x":1,"y":3,"z":4}"#);
/// ```
pub fn merge(left: &Element, right: &Element) -> Option<Element> {
    if !left.is_container() || !right.is_container() {
        return None;
    }
    let capacity = left.len() + right.len();
    let merged = if left.is_array() && right.is_array() {
        let mut out = Element::array(capacity);
        for child in left.children().iter().chain(right.children()) {
            out.push(child.deep_copy());
        }
        out
    } else {
        let mut out = Element::object(capacity);
        append_members(&mut out, left);
        append_members(&mut out, right);
        out
    };
    Some(merged)
}

/// Copy `source`'s children into `target` as members. Object members keep their keys;
/// Array elements are keyed by their index.
fn append_members(target: &mut Element, source: &Element) {
    let keyed = source.is_object();
    for (index, child) in source.children().iter().enumerate() {
        let key = match child.name() {
            Some(name) if keyed => name.to_string(),
            _ => index.to_string(),
        };
        target.insert(key, child.deep_copy());
    }
}

/// Merge `right` into `left` in place.
///
/// For each member of `right`: if both sides hold an Object under the key, recurse; if
/// both hold an Array, append copies of the right elements; otherwise a copy of the right
/// value replaces the left one.
///
/// # Panics
///
/// Panics unless both operands are Objects.
pub fn deep_merge(left: &mut Element, right: &Element) {
    if !left.is_object() || !right.is_object() {
        panic!(
            "deep_merge requires two Objects, found {} and {}",
            left.kind(),
            right.kind()
        );
    }
    for member in right.children() {
        let Some(key) = member.name() else {
            continue;
        };
        let same_container = member.is_container()
            && left.get(key).is_some_and(|existing| existing.kind() == member.kind());
        if !same_container {
            left.insert(key, member.deep_copy());
            continue;
        }
        if let Some(existing) = left.get_mut(key) {
            if member.is_object() {
                deep_merge(existing, member);
            } else {
                for child in member.children() {
                    existing.push(child.deep_copy());
                }
            }
        }
    }
}
