//! YAML bridge: builds an [`Element`] tree from the `yaml-rust2` event stream.
//!
//! Containers are opened on sequence/mapping start events and attached to their parent
//! when the matching end event arrives. Inside a mapping the first scalar is latched as the
//! pending key, and the next complete value is inserted under it.
//!
//! Plain scalars are resolved with core-schema heuristics:
//!
//! | scalar | element |
//! |---|---|
//! | empty, `~`, `null`, `Null`, `NULL` | Null |
//! | `yes` `no` `true` `false` `on` `off`, any case | Bool |
//! | a numeral accepted by the native grammar | Integer or Real, text kept |
//! | anything else | String |
//!
//! Quoted scalars are always Strings. Explicit `!!str`, `!!bool`, `!!int`, `!!float`,
//! `!!null` tags override the heuristics; `!!timestamp` stays a String, as does a
//! `!!bool`, `!!int` or `!!float` scalar whose text does not fit the tag.
//!
//! Collections nested deeper than [`MAX_DEPTH`] are rejected as unsupported.

use crate::element::Element;
use crate::error::{Result, TreeError};
use crate::parser::MAX_DEPTH;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse the first YAML document in `text`.
///
/// ```
/// use sdtree_core::parse_yaml;
///
/// let doc = parse_yaml("flag: yes\nn: ~\n").unwrap();
/// assert!(doc.get("flag").unwrap().primitive().as_bool());
/// assert!(doc.get("n").unwrap().is_null());
/// ```
pub fn parse_yaml(text: &str) -> Result<Element> {
    let mut parser = Parser::new_from_str(text);
    let mut builder = TreeBuilder::default();
    parser
        .load(&mut builder, false)
        .map_err(|err| TreeError::Yaml(err.to_string()))?;
    builder.finish()
}

struct Frame {
    element: Element,
    pending_key: Option<String>,
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<Element>,
    error: Option<TreeError>,
    /// Collections opened past the depth limit and not built.
    skipped: usize,
}

impl TreeBuilder {
    fn finish(self) -> Result<Element> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.root.ok_or(TreeError::NoData)
    }

    fn fail(&mut self, message: &str) {
        tracing::debug!(construct = message, "unsupported YAML construct");
        if self.error.is_none() {
            self.error = Some(TreeError::UnsupportedYaml(message.to_string()));
        }
    }

    /// Whether the next scalar is a mapping key rather than a value.
    fn expecting_key(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|frame| frame.element.is_object() && frame.pending_key.is_none())
    }

    fn open(&mut self, element: Element) {
        if self.skipped > 0 || self.stack.len() >= MAX_DEPTH {
            self.fail("collections nested too deeply");
            self.skipped += 1;
            return;
        }
        if self.expecting_key() {
            self.fail("non-scalar mapping key");
        }
        self.stack.push(Frame {
            element,
            pending_key: None,
        });
    }

    fn close(&mut self) {
        if self.skipped > 0 {
            self.skipped -= 1;
            return;
        }
        if let Some(frame) = self.stack.pop() {
            self.attach(frame.element);
        }
    }

    fn attach(&mut self, element: Element) {
        if self.skipped > 0 {
            return;
        }
        let Some(frame) = self.stack.last_mut() else {
            if self.root.is_none() {
                self.root = Some(element);
            }
            return;
        };
        if frame.element.is_array() {
            frame.element.push(element);
        } else if let Some(key) = frame.pending_key.take() {
            frame.element.insert(key, element);
        }
    }

    fn scalar(&mut self, value: String, style: TScalarStyle, tag: Option<Tag>) {
        if self.expecting_key() {
            if let Some(frame) = self.stack.last_mut() {
                frame.pending_key = Some(value);
            }
            return;
        }
        let plain = matches!(style, TScalarStyle::Plain);
        let element = resolve_scalar(&value, plain, tag.as_ref().map(|t| t.suffix.as_str()));
        self.attach(element);
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, _marker: Marker) {
        match ev {
            Event::Scalar(value, style, _anchor_id, tag) => self.scalar(value, style, tag),
            Event::SequenceStart(_anchor_id, _tag) => self.open(Element::array(0)),
            Event::MappingStart(_anchor_id, _tag) => self.open(Element::object(0)),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            Event::Alias(anchor_id) => {
                tracing::warn!(anchor_id, "YAML alias replaced by null");
                if self.expecting_key() {
                    self.fail("alias used as mapping key");
                } else {
                    self.attach(Element::null());
                }
            }
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}
        }
    }
}

/// Resolve one scalar to an element. `tag` is the tag suffix (`"bool"` for `!!bool`).
pub fn resolve_scalar(value: &str, plain: bool, tag: Option<&str>) -> Element {
    match tag {
        Some("str") | Some("timestamp") => return Element::string(value),
        Some("null") => return Element::null(),
        Some("bool") => {
            return bool_word(value)
                .map(Element::boolean)
                .unwrap_or_else(|| Element::string(value));
        }
        Some("int") | Some("float") => {
            return Element::numeral(value).unwrap_or_else(|| Element::string(value));
        }
        _ => {}
    }
    if !plain {
        return Element::string(value);
    }
    if is_null_word(value) {
        return Element::null();
    }
    if let Some(flag) = bool_word(value) {
        return Element::boolean(flag);
    }
    Element::numeral(value).unwrap_or_else(|| Element::string(value))
}

fn is_null_word(value: &str) -> bool {
    matches!(value, "" | "~" | "null" | "Null" | "NULL")
}

fn bool_word(value: &str) -> Option<bool> {
    const TRUE_WORDS: [&str; 3] = ["yes", "true", "on"];
    const FALSE_WORDS: [&str; 3] = ["no", "false", "off"];
    if TRUE_WORDS.iter().any(|w| value.eq_ignore_ascii_case(w)) {
        Some(true)
    } else if FALSE_WORDS.iter().any(|w| value.eq_ignore_ascii_case(w)) {
        Some(false)
    } else {
        None
    }
}
