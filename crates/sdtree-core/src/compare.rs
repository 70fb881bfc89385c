//! Structural total order over elements.
//!
//! - Different top-level kinds order by tag: containers before primitives, Objects before
//!   Arrays.
//! - Arrays compare by length, then element by element.
//! - Objects compare by length, then member by member **in current iteration order**
//!   (key first, then value). Objects are not sorted first, so two objects with the same
//!   members inserted in a different order compare unequal. Serialize both (which sorts
//!   them) to compare by content.
//! - Primitives compare by canonical text, byte-wise. Numbers compare textually: `"10"`
//!   orders before `"9"`. The primitive sub-kind is not compared, so the String `"1"`
//!   equals the Integer `1`.
//!
//! The root's own property-name does not take part.

use crate::element::{Element, Node};
use std::cmp::Ordering;

/// Compare two trees under the structural order.
pub fn compare(a: &Element, b: &Element) -> Ordering {
    match (a.node(), b.node()) {
        (Node::Container(ca), Node::Container(cb)) => ca
            .kind()
            .cmp(&cb.kind())
            .then_with(|| ca.children().len().cmp(&cb.children().len()))
            .then_with(|| compare_children(ca.children(), cb.children())),
        (Node::Primitive(pa), Node::Primitive(pb)) => pa.text().cmp(pb.text()),
        _ => a.kind().cmp(&b.kind()),
    }
}

fn compare_children(a: &[Element], b: &[Element]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.name().cmp(&y.name()).then_with(|| compare(x, y)))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for Element {}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}
