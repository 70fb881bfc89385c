//! The tree node and its container operations.
//!
//! An [`Element`] is either a container (Object or Array) holding owned children, or a
//! [`Primitive`] leaf. Object children carry their key as a property-name on the child
//! itself; Array children and roots carry none. Children are kept in one flat ordered
//! list, so key lookup is a linear scan.
//!
//! Calling an Object-only operation on an Array (or the reverse, or any container
//! operation on a primitive) is caller misuse and panics. Key lookups that miss return
//! `None`.

use crate::iter::ElementIter;
use crate::primitive::{Primitive, PrimitiveKind};
use std::cmp::Ordering;
use std::fmt;

/// The sub-tag of a container element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerKind {
    Object,
    Array,
}

/// Full tag of an element. Orders containers before primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    Container(ContainerKind),
    Primitive(PrimitiveKind),
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Container(ContainerKind::Object) => f.write_str("Object"),
            ElementKind::Container(ContainerKind::Array) => f.write_str("Array"),
            ElementKind::Primitive(kind) => kind.fmt(f),
        }
    }
}

/// An Object or Array with its owned children.
#[derive(Debug)]
pub struct Container {
    kind: ContainerKind,
    children: Vec<Element>,
}

impl Container {
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// Payload of an element.
#[derive(Debug)]
pub enum Node {
    Container(Container),
    Primitive(Primitive),
}

/// A node in the tree.
#[derive(Debug)]
pub struct Element {
    name: Option<String>,
    node: Node,
}

impl Element {
    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    /// An empty Object with room for `capacity` members.
    pub fn object(capacity: usize) -> Self {
        Self::container(ContainerKind::Object, capacity)
    }

    /// An empty Array with room for `capacity` elements.
    pub fn array(capacity: usize) -> Self {
        Self::container(ContainerKind::Array, capacity)
    }

    fn container(kind: ContainerKind, capacity: usize) -> Self {
        Self {
            name: None,
            node: Node::Container(Container {
                kind,
                children: Vec::with_capacity(capacity),
            }),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Primitive::string(value).into()
    }

    pub fn integer(value: i32) -> Self {
        Primitive::integer(value).into()
    }

    pub fn integer64(value: i64) -> Self {
        Primitive::integer64(value).into()
    }

    /// A Real. NaN and the infinities are stored as `0.0`.
    pub fn real(value: f64) -> Self {
        Primitive::real(value).into()
    }

    pub fn boolean(value: bool) -> Self {
        Primitive::boolean(value).into()
    }

    pub fn null() -> Self {
        Primitive::null().into()
    }

    /// An Integer or Real holding `text` verbatim, if it is a well-formed numeral.
    pub fn numeral(text: &str) -> Option<Self> {
        Primitive::numeral(text).map(Self::from)
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// The property-name, present only on direct children of an Object.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn kind(&self) -> ElementKind {
        match &self.node {
            Node::Container(c) => ElementKind::Container(c.kind),
            Node::Primitive(p) => ElementKind::Primitive(p.kind()),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.node, Node::Container(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.node, Node::Primitive(_))
    }

    pub fn is_object(&self) -> bool {
        self.kind() == ElementKind::Container(ContainerKind::Object)
    }

    pub fn is_array(&self) -> bool {
        self.kind() == ElementKind::Container(ContainerKind::Array)
    }

    pub fn is_null(&self) -> bool {
        self.kind() == ElementKind::Primitive(PrimitiveKind::Null)
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.node {
            Node::Container(c) => Some(c),
            Node::Primitive(_) => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match &self.node {
            Node::Primitive(p) => Some(p),
            Node::Container(_) => None,
        }
    }

    /// The primitive payload.
    ///
    /// # Panics
    ///
    /// Panics if this element is a container.
    pub fn primitive(&self) -> &Primitive {
        match &self.node {
            Node::Primitive(p) => p,
            Node::Container(_) => panic!("expected a primitive, found {}", self.kind()),
        }
    }

    /// Child count for containers, canonical text length for primitives.
    pub fn len(&self) -> usize {
        match &self.node {
            Node::Container(c) => c.children.len(),
            Node::Primitive(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children of a container, in iteration order.
    ///
    /// # Panics
    ///
    /// Panics if this element is a primitive.
    pub fn children(&self) -> &[Element] {
        match &self.node {
            Node::Container(c) => &c.children,
            Node::Primitive(_) => panic!("children requires a container, found {}", self.kind()),
        }
    }

    /// A positional cursor over this container's children.
    pub fn iter(&self) -> ElementIter<'_> {
        ElementIter::new(self)
    }

    // ------------------------------------------------------------------
    // Object operations
    // ------------------------------------------------------------------

    /// Append `child` under `key`. An existing member with the same key is dropped first,
    /// so the new member always lands at the end.
    pub fn insert(&mut self, key: impl Into<String>, mut child: Element) {
        let key = key.into();
        let children = self.container_mut(ContainerKind::Object, "insert");
        if let Some(pos) = position_of(children, &key) {
            children.remove(pos);
        }
        child.name = Some(key);
        children.push(child);
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        let children = self.container_ref(ContainerKind::Object, "get");
        children.iter().find(|c| c.name.as_deref() == Some(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        let children = self.container_mut(ContainerKind::Object, "get_mut");
        children.iter_mut().find(|c| c.name.as_deref() == Some(key))
    }

    /// Drop the member under `key`. Returns whether one existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.detach(key).is_some()
    }

    /// Take the member under `key` out of this Object without dropping it.
    ///
    /// The returned element is a root and no longer carries a property-name.
    pub fn detach(&mut self, key: &str) -> Option<Element> {
        let children = self.container_mut(ContainerKind::Object, "detach");
        let pos = position_of(children, key)?;
        let mut child = children.remove(pos);
        child.name = None;
        Some(child)
    }

    // ------------------------------------------------------------------
    // Array operations
    // ------------------------------------------------------------------

    /// Append `child` to an Array.
    pub fn push(&mut self, mut child: Element) {
        child.name = None;
        self.container_mut(ContainerKind::Array, "push").push(child);
    }

    pub fn reverse(&mut self) {
        self.container_mut(ContainerKind::Array, "reverse").reverse();
    }

    // ------------------------------------------------------------------
    // Any container
    // ------------------------------------------------------------------

    /// The child at `index`, in iteration order.
    pub fn get_index(&self, index: usize) -> Option<&Element> {
        self.children().get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children_mut("get_index_mut").get_mut(index)
    }

    /// Stable sort of the children with a caller comparator. Any user data the
    /// comparator needs travels in its closure.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Element, &Element) -> Ordering,
    {
        self.children_mut("sort_by").sort_by(compare);
    }

    /// Sort Object members by key, byte-wise.
    pub(crate) fn sort_by_key_name(&mut self) {
        self.container_mut(ContainerKind::Object, "sort_by_key_name")
            .sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Deep copy. Primitives are rebuilt through their typed constructors from the decoded
    /// value; property-names are kept.
    pub fn deep_copy(&self) -> Element {
        let node = match &self.node {
            Node::Container(c) => Node::Container(Container {
                kind: c.kind,
                children: c.children.iter().map(Element::deep_copy).collect(),
            }),
            Node::Primitive(p) => Node::Primitive(copy_primitive(p)),
        };
        Element {
            name: self.name.clone(),
            node,
        }
    }

    pub(crate) fn children_mut(&mut self, op: &str) -> &mut Vec<Element> {
        let found = self.kind();
        match &mut self.node {
            Node::Container(c) => &mut c.children,
            Node::Primitive(_) => panic!("{op} requires a container, found {found}"),
        }
    }

    fn container_ref(&self, expected: ContainerKind, op: &str) -> &Vec<Element> {
        match &self.node {
            Node::Container(c) if c.kind == expected => &c.children,
            _ => panic!(
                "{op} requires {}, found {}",
                ElementKind::Container(expected),
                self.kind()
            ),
        }
    }

    fn container_mut(&mut self, expected: ContainerKind, op: &str) -> &mut Vec<Element> {
        let found = self.kind();
        match &mut self.node {
            Node::Container(c) if c.kind == expected => &mut c.children,
            _ => panic!(
                "{op} requires {}, found {found}",
                ElementKind::Container(expected)
            ),
        }
    }
}

impl From<Primitive> for Element {
    fn from(primitive: Primitive) -> Self {
        Self {
            name: None,
            node: Node::Primitive(primitive),
        }
    }
}

/// Cloning is a [`Element::deep_copy`].
impl Clone for Element {
    fn clone(&self) -> Self {
        self.deep_copy()
    }
}

fn position_of(children: &[Element], key: &str) -> Option<usize> {
    children.iter().position(|c| c.name.as_deref() == Some(key))
}

fn copy_primitive(p: &Primitive) -> Primitive {
    match p.kind() {
        PrimitiveKind::String => Primitive::string(p.text()),
        PrimitiveKind::Bool => Primitive::boolean(p.as_bool()),
        PrimitiveKind::Null => Primitive::null(),
        PrimitiveKind::Integer => match p.try_i64() {
            Ok(value) => Primitive::integer64(value),
            Err(err) => {
                tracing::debug!(%err, "integer numeral kept as text during copy");
                p.clone()
            }
        },
        PrimitiveKind::Real => match p.try_f64() {
            Ok(value) => Primitive::real(value),
            Err(err) => {
                tracing::debug!(%err, "real numeral kept as text during copy");
                p.clone()
            }
        },
    }
}
