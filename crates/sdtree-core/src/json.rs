//! Interop with `serde` and `serde_json::Value`.
//!
//! Unlike the crate's own writers, these conversions never reorder Object members.

use crate::element::{ContainerKind, Element, Node};
use crate::primitive::{Primitive, PrimitiveKind};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::{Map, Number, Value};

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.node() {
            Node::Container(c) if c.kind() == ContainerKind::Object => {
                let mut map = serializer.serialize_map(Some(c.children().len()))?;
                for child in c.children() {
                    map.serialize_entry(child.name().unwrap_or_default(), child)?;
                }
                map.end()
            }
            Node::Container(c) => {
                let mut seq = serializer.serialize_seq(Some(c.children().len()))?;
                for child in c.children() {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
            Node::Primitive(p) => serialize_primitive(p, serializer),
        }
    }
}

fn serialize_primitive<S: Serializer>(p: &Primitive, serializer: S) -> Result<S::Ok, S::Error> {
    match p.kind() {
        PrimitiveKind::String => serializer.serialize_str(p.text()),
        PrimitiveKind::Bool => serializer.serialize_bool(p.as_bool()),
        PrimitiveKind::Null => serializer.serialize_unit(),
        PrimitiveKind::Integer => match p.try_i64() {
            Ok(value) => serializer.serialize_i64(value),
            Err(_) => match p.try_f64() {
                Ok(value) => serializer.serialize_f64(value),
                Err(_) => serializer.serialize_str(p.text()),
            },
        },
        PrimitiveKind::Real => match p.try_f64() {
            Ok(value) => serializer.serialize_f64(value),
            Err(_) => serializer.serialize_str(p.text()),
        },
    }
}

impl From<&Element> for Value {
    fn from(element: &Element) -> Self {
        match element.node() {
            Node::Container(c) if c.kind() == ContainerKind::Object => {
                let mut map = Map::with_capacity(c.children().len());
                for child in c.children() {
                    map.insert(child.name().unwrap_or_default().to_string(), child.into());
                }
                Value::Object(map)
            }
            Node::Container(c) => Value::Array(c.children().iter().map(Value::from).collect()),
            Node::Primitive(p) => match p.kind() {
                PrimitiveKind::String => Value::String(p.text().to_string()),
                PrimitiveKind::Bool => Value::Bool(p.as_bool()),
                PrimitiveKind::Null => Value::Null,
                PrimitiveKind::Integer | PrimitiveKind::Real => p
                    .text()
                    .parse::<Number>()
                    .map(Value::Number)
                    .unwrap_or_else(|_| Value::String(p.text().to_string())),
            },
        }
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Element::null(),
            Value::Bool(flag) => Element::boolean(flag),
            Value::Number(n) => from_number(&n),
            Value::String(s) => Element::string(s),
            Value::Array(items) => {
                let mut array = Element::array(items.len());
                for item in items {
                    array.push(item.into());
                }
                array
            }
            Value::Object(map) => {
                let mut object = Element::object(map.len());
                for (key, item) in map {
                    object.insert(key, item.into());
                }
                object
            }
        }
    }
}

fn from_number(n: &Number) -> Element {
    if n.is_f64() {
        return Element::real(n.as_f64().unwrap_or_default());
    }
    let text = n.to_string();
    Element::numeral(&text).unwrap_or_else(|| Element::string(text))
}
