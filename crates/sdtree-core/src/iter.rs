//! Positional cursor over one container's children.

use crate::element::Element;

/// A 0-based position into a container's children.
///
/// [`Iterator::next`] advances and yields the next child, or `None` at the end.
/// [`ElementIter::current`] re-reads the child most recently returned without advancing.
#[derive(Debug, Clone)]
pub struct ElementIter<'a> {
    children: &'a [Element],
    is_object: bool,
    pos: usize,
}

impl<'a> ElementIter<'a> {
    /// # Panics
    ///
    /// Panics if `container` is a primitive.
    pub fn new(container: &'a Element) -> Self {
        Self {
            children: container.children(),
            is_object: container.is_object(),
            pos: 0,
        }
    }

    /// Number of children already returned.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether a call to `next` would return a child.
    pub fn has_next(&self) -> bool {
        self.pos < self.children.len()
    }

    /// Advance and return the next member's key.
    ///
    /// # Panics
    ///
    /// Panics when iterating an Array.
    pub fn next_key(&mut self) -> Option<&'a str> {
        self.expect_object("next_key");
        self.next().and_then(Element::name)
    }

    /// The child most recently returned, if any.
    pub fn current(&self) -> Option<&'a Element> {
        self.pos.checked_sub(1).and_then(|i| self.children.get(i))
    }

    /// The key of the member most recently returned.
    ///
    /// # Panics
    ///
    /// Panics when iterating an Array.
    pub fn current_key(&self) -> Option<&'a str> {
        self.expect_object("current_key");
        self.current().and_then(Element::name)
    }

    fn expect_object(&self, op: &str) {
        if !self.is_object {
            panic!("{op} requires an Object iterator");
        }
    }
}

impl<'a> Iterator for ElementIter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.get(self.pos)?;
        self.pos += 1;
        Some(child)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.children.len() - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ElementIter<'_> {}

impl<'a> IntoIterator for &'a Element {
    type Item = &'a Element;
    type IntoIter = ElementIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
