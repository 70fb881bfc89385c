//! Abortable pre-order traversal.

use crate::element::{ContainerKind, Element, ElementKind};

/// Returned by a visitor to continue or abort the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    Stop,
}

/// Callbacks invoked by [`walk`]. Each one defaults to a no-op that continues.
pub trait Visitor {
    fn visit_object(&mut self, _object: &Element) -> WalkControl {
        WalkControl::Continue
    }

    fn visit_array(&mut self, _array: &Element) -> WalkControl {
        WalkControl::Continue
    }

    fn visit_primitive(&mut self, _primitive: &Element) -> WalkControl {
        WalkControl::Continue
    }
}

/// Visit `root` and every descendant in pre-order.
///
/// Each node is handed to the visitor before its children. The first
/// [`WalkControl::Stop`] ends the whole traversal. Returns `true` only if every node was
/// visited.
pub fn walk<V: Visitor + ?Sized>(root: &Element, visitor: &mut V) -> bool {
    let control = match root.kind() {
        ElementKind::Container(ContainerKind::Object) => visitor.visit_object(root),
        ElementKind::Container(ContainerKind::Array) => visitor.visit_array(root),
        ElementKind::Primitive(_) => visitor.visit_primitive(root),
    };
    if control == WalkControl::Stop {
        return false;
    }
    if root.is_container() {
        for child in root.children() {
            if !walk(child, visitor) {
                return false;
            }
        }
    }
    true
}
