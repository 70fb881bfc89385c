//! Best-effort path lookup.
//!
//! A path is an ordered list of segments. On an Object a segment is a key; on an Array it
//! must be a non-negative decimal index in range. Any mismatch yields `None`.

use crate::element::Element;

/// Descend from `root` along `path`. An empty path returns `root` itself.
///
/// ```
/// use sdtree_core::{parse_document, select};
///
/// let doc = parse_document(r#"{"a":{"b":[10,20]}}"#).unwrap();
/// let hit = select(&doc, &["a", "b", "1"]).unwrap();
/// assert_eq!(hit.primitive().text(), "20");
/// assert!(select(&doc, &["a", "x"]).is_none());
/// ```
pub fn select<'a, S: AsRef<str>>(root: &'a Element, path: &[S]) -> Option<&'a Element> {
    let Some((segment, rest)) = path.split_first() else {
        return Some(root);
    };
    let child = step(root, segment.as_ref())?;
    select(child, rest)
}

/// Mutable counterpart of [`select`].
pub fn select_mut<'a, S: AsRef<str>>(
    root: &'a mut Element,
    path: &[S],
) -> Option<&'a mut Element> {
    let Some((segment, rest)) = path.split_first() else {
        return Some(root);
    };
    let segment = segment.as_ref();
    let child = if root.is_object() {
        root.get_mut(segment)?
    } else if root.is_array() {
        root.get_index_mut(parse_index(segment)?)?
    } else {
        return None;
    };
    select_mut(child, rest)
}

fn step<'a>(element: &'a Element, segment: &str) -> Option<&'a Element> {
    if element.is_object() {
        element.get(segment)
    } else if element.is_array() {
        element.get_index(parse_index(segment)?)
    } else {
        None
    }
}

/// Decimal digits only; no sign, no whitespace.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
