//! Pretty and compact writers, plus a binary-safe escaper.
//!
//! Both writers sort every Object's members by key **in place** before writing it. Writing
//! a tree therefore changes its future iteration order to sorted order; this is kept for
//! output compatibility and is why the writers take `&mut Element`.

use crate::element::{Element, Node};
use crate::primitive::PrimitiveKind;

/// Two-space indented text, one child per line, LF line endings, no trailing newline.
///
/// ```
/// use sdtree_core::{parse_document, to_pretty};
///
/// let mut doc = parse_document(r#"{"b":[1,2],"a":true}"#).unwrap();
/// assert_eq!(to_pretty(&mut doc), "{\n  \"a\": true,\n  \"b\": [\n    1,\n    2\n  ]\n}");
/// ```
pub fn to_pretty(element: &mut Element) -> String {
    let mut out = String::new();
    write_element(element, Some(0), &mut out);
    out
}

/// Same structure as [`to_pretty`] with no inserted whitespace.
pub fn to_compact(element: &mut Element) -> String {
    let mut out = String::new();
    write_element(element, None, &mut out);
    out
}

/// `depth` is `None` for compact output.
fn write_element(element: &mut Element, depth: Option<usize>, out: &mut String) {
    if element.is_object() {
        element.sort_by_key_name();
    }
    let (open, close) = match element.node() {
        Node::Primitive(p) => {
            match p.kind() {
                PrimitiveKind::String => write_quoted(p.text(), out),
                _ => out.push_str(p.text()),
            }
            return;
        }
        Node::Container(_) if element.is_object() => ('{', '}'),
        Node::Container(_) => ('[', ']'),
    };
    let is_object = element.is_object();

    out.push(open);
    let children = element.children_mut("write");
    if children.is_empty() {
        out.push(close);
        return;
    }
    let inner = depth.map(|d| d + 1);
    for (i, child) in children.iter_mut().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if let Some(d) = inner {
            out.push('\n');
            push_indent(d, out);
        }
        if is_object {
            write_quoted(child.name().unwrap_or_default(), out);
            out.push(':');
            if inner.is_some() {
                out.push(' ');
            }
        }
        write_element(child, inner, out);
    }
    if let Some(d) = depth {
        out.push('\n');
        push_indent(d, out);
    }
    out.push(close);
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_quoted(text: &str, out: &mut String) {
    out.push('"');
    escape_into(text, out);
    out.push('"');
}

/// Escape text for a quoted literal: quote, backslash and the five standard control
/// characters. Everything else passes through unchanged.
pub fn escape_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
}

/// Escape an arbitrary byte slice into printable ASCII.
///
/// NUL becomes `\0`, the standard control characters use their short escapes, quote and
/// backslash are escaped, and any other byte outside `0x20..=0x7e` becomes `\xHH`. The
/// result is meant to be placed inside a quoted literal by the caller.
///
/// ```
/// use sdtree_core::escape_bytes;
///
/// assert_eq!(escape_bytes(b"a\0b\n\xff"), "a\\0b\\n\\xff");
/// ```
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            0 => out.push_str("\\0"),
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x08 => out.push_str("\\b"),
            0x0c => out.push_str("\\f"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(char::from(b)),
            _ => {
                const HEX: &[u8; 16] = b"0123456789abcdef";
                out.push_str("\\x");
                out.push(char::from(HEX[usize::from(b >> 4)]));
                out.push(char::from(HEX[usize::from(b & 0x0f)]));
            }
        }
    }
    out
}
