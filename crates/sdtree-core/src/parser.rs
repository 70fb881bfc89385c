//! Recursive-descent parser for the native text grammar.
//!
//! The grammar is JSON with three relaxations:
//!
//! - one trailing comma is tolerated before `}` or `]` (two or more are rejected)
//! - object keys may be bare words matching `[A-Za-z0-9_][-A-Za-z0-9_]*` when a colon
//!   follows after optional whitespace
//! - unknown string escapes (including `\u`) are kept verbatim with a warning instead of
//!   failing; there is no Unicode escape decoding
//!
//! Parsing is fail-fast: the first violation is returned as a [`ParseError`] and the
//! partially built tree is dropped. Containers nested deeper than [`MAX_DEPTH`] fail with
//! [`ErrorCode::NestingTooDeep`].
//!
//! # Extension hook
//!
//! When no grammar rule matches at a value position, an optional [`ValueHook`] is handed
//! the [`Cursor`]. If it returns an element, that element is spliced into the tree and the
//! hook must have advanced the cursor past whatever it consumed. This lets a superset
//! grammar embed externally resolved values without the parser knowing their syntax.
//!
//! ```
//! use sdtree_core::{Cursor, Element, Parser};
//!
//! let mut env = |cursor: &mut Cursor<'_>| {
//!     cursor.eat("$HOME").then(|| Element::string("/home/me"))
//! };
//! let doc = Parser::new()
//!     .with_hook(&mut env)
//!     .parse_document(r#"{"dir": $HOME}"#)
//!     .unwrap();
//! assert_eq!(doc.get("dir").unwrap().primitive().as_str(), "/home/me");
//! ```

use crate::element::Element;
use crate::error::{ErrorCode, ParseError};
use crate::number::{scan_numeral, starts_numeral};
use crate::primitive::Primitive;

/// Deepest container nesting the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// A byte position into the text being parsed.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// The whole input.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unparsed rest of the input.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The next byte, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Move forward `n` bytes, stopping at the end of input and never inside a character.
    pub fn advance(&mut self, n: usize) {
        let mut pos = (self.pos + n).min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        self.pos = pos;
    }

    /// Consume `expected` if the input continues with it.
    pub fn eat(&mut self, expected: &str) -> bool {
        if self.remaining().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .remaining()
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            .count();
        self.pos += skipped;
    }

    fn error(&self, code: ErrorCode) -> ParseError {
        self.error_at(code, self.pos)
    }

    fn error_at(&self, code: ErrorCode, offset: usize) -> ParseError {
        ParseError::at(code, self.text, offset)
    }
}

/// Resolves values the built-in grammar does not recognise.
pub trait ValueHook {
    /// Try to produce an element at `cursor`. On success the hook must leave the cursor
    /// after the consumed text. Returning `None` restores the cursor.
    fn resolve(&mut self, cursor: &mut Cursor<'_>) -> Option<Element>;
}

impl<F> ValueHook for F
where
    F: FnMut(&mut Cursor<'_>) -> Option<Element>,
{
    fn resolve(&mut self, cursor: &mut Cursor<'_>) -> Option<Element> {
        self(cursor)
    }
}

/// Last significant token inside an object.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ObjectPrev {
    Open,
    Key,
    Colon,
    Value,
    Comma,
}

/// Last significant token inside an array.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ArrayPrev {
    Open,
    Value,
    Comma,
}

/// Parser with an optional extension hook.
#[derive(Default)]
pub struct Parser<'h> {
    hook: Option<&'h mut dyn ValueHook>,
}

impl<'h> Parser<'h> {
    pub fn new() -> Self {
        Self { hook: None }
    }

    pub fn with_hook(mut self, hook: &'h mut dyn ValueHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Parse the first value in `text`, leaving anything after it unexamined.
    pub fn parse_value(&mut self, text: &str) -> Result<Element, ParseError> {
        let mut cursor = Cursor::new(text);
        self.parse_at(&mut cursor)
    }

    /// Parse exactly one value; only whitespace may follow it.
    pub fn parse_document(&mut self, text: &str) -> Result<Element, ParseError> {
        let mut cursor = Cursor::new(text);
        let element = self.parse_at(&mut cursor)?;
        cursor.skip_whitespace();
        if !cursor.is_at_end() {
            return Err(cursor.error(ErrorCode::TrailingCharacters));
        }
        Ok(element)
    }

    /// Parse one value starting at `cursor` and leave the cursor just after it.
    pub fn parse_at(&mut self, cursor: &mut Cursor<'_>) -> Result<Element, ParseError> {
        cursor.skip_whitespace();
        if cursor.is_at_end() {
            return Err(cursor.error(ErrorCode::EmptyInput));
        }
        self.parse_element(cursor, 0).inspect_err(|err| {
            tracing::debug!(code = err.code.code(), offset = err.offset, "parse failed");
        })
    }

    /// `depth` counts the containers already open around this value.
    fn parse_element(
        &mut self,
        cursor: &mut Cursor<'_>,
        depth: usize,
    ) -> Result<Element, ParseError> {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => Err(cursor.error(ErrorCode::UnexpectedEnd)),
            Some(b'{' | b'[') if depth >= MAX_DEPTH => {
                Err(cursor.error(ErrorCode::NestingTooDeep))
            }
            Some(b'{') => self.parse_object(cursor, depth + 1),
            Some(b'[') => self.parse_array(cursor, depth + 1),
            Some(_) => self.parse_primitive(cursor),
        }
    }

    fn parse_object(
        &mut self,
        cursor: &mut Cursor<'_>,
        depth: usize,
    ) -> Result<Element, ParseError> {
        let open = cursor.position();
        cursor.advance(1);
        let mut object = Element::object(0);
        let mut prev = ObjectPrev::Open;
        let mut pending_key: Option<String> = None;

        loop {
            cursor.skip_whitespace();
            let Some(byte) = cursor.peek() else {
                return Err(cursor.error_at(ErrorCode::ObjectUnterminated, open));
            };
            match byte {
                b'}' => match prev {
                    ObjectPrev::Open | ObjectPrev::Value | ObjectPrev::Comma => {
                        cursor.advance(1);
                        return Ok(object);
                    }
                    ObjectPrev::Key | ObjectPrev::Colon => {
                        return Err(cursor.error(ErrorCode::ObjectMissingValue));
                    }
                },
                b',' => {
                    let code = match prev {
                        ObjectPrev::Value => None,
                        ObjectPrev::Open => Some(ErrorCode::ObjectLeadingComma),
                        ObjectPrev::Comma => Some(ErrorCode::ObjectDoubleComma),
                        ObjectPrev::Key => Some(ErrorCode::ObjectMissingColon),
                        ObjectPrev::Colon => Some(ErrorCode::ObjectMissingValue),
                    };
                    if let Some(code) = code {
                        return Err(cursor.error(code));
                    }
                    cursor.advance(1);
                    prev = ObjectPrev::Comma;
                }
                b':' => {
                    let code = match prev {
                        ObjectPrev::Key => None,
                        ObjectPrev::Colon => Some(ErrorCode::ObjectDoubleColon),
                        _ => Some(ErrorCode::ObjectStrayColon),
                    };
                    if let Some(code) = code {
                        return Err(cursor.error(code));
                    }
                    cursor.advance(1);
                    prev = ObjectPrev::Colon;
                }
                _ => match prev {
                    ObjectPrev::Open | ObjectPrev::Comma => {
                        let key = if byte == b'"' {
                            parse_string(cursor)?
                        } else {
                            parse_bare_key(cursor)
                                .ok_or_else(|| cursor.error(ErrorCode::ObjectExpectedKey))?
                        };
                        pending_key = Some(key);
                        prev = ObjectPrev::Key;
                    }
                    ObjectPrev::Colon => {
                        let Some(key) = pending_key.take() else {
                            return Err(cursor.error(ErrorCode::ObjectExpectedKey));
                        };
                        let value = self.parse_element(cursor, depth)?;
                        object.insert(key, value);
                        prev = ObjectPrev::Value;
                    }
                    ObjectPrev::Key => return Err(cursor.error(ErrorCode::ObjectMissingColon)),
                    ObjectPrev::Value => return Err(cursor.error(ErrorCode::ObjectMissingComma)),
                },
            }
        }
    }

    fn parse_array(
        &mut self,
        cursor: &mut Cursor<'_>,
        depth: usize,
    ) -> Result<Element, ParseError> {
        let open = cursor.position();
        cursor.advance(1);
        let mut array = Element::array(0);
        let mut prev = ArrayPrev::Open;

        loop {
            cursor.skip_whitespace();
            let Some(byte) = cursor.peek() else {
                return Err(cursor.error_at(ErrorCode::ArrayUnterminated, open));
            };
            match byte {
                b']' => {
                    cursor.advance(1);
                    return Ok(array);
                }
                b',' => {
                    match prev {
                        ArrayPrev::Value => {}
                        ArrayPrev::Open => return Err(cursor.error(ErrorCode::ArrayLeadingComma)),
                        ArrayPrev::Comma => return Err(cursor.error(ErrorCode::ArrayDoubleComma)),
                    }
                    cursor.advance(1);
                    prev = ArrayPrev::Comma;
                }
                b':' => return Err(cursor.error(ErrorCode::ArrayStrayColon)),
                _ => {
                    if prev == ArrayPrev::Value {
                        return Err(cursor.error(ErrorCode::ArrayMissingComma));
                    }
                    let value = self.parse_element(cursor, depth)?;
                    array.push(value);
                    prev = ArrayPrev::Value;
                }
            }
        }
    }

    fn parse_primitive(&mut self, cursor: &mut Cursor<'_>) -> Result<Element, ParseError> {
        let rest = cursor.remaining();

        if rest.starts_with('"') {
            return parse_string(cursor).map(Element::string);
        }

        if starts_numeral(rest.as_bytes()) {
            let numeral = scan_numeral(rest).map_err(|code| cursor.error(code))?;
            let text = rest[..numeral.len].to_string();
            cursor.advance(numeral.len);
            return Ok(Primitive::from_numeral_text(text, numeral.is_real).into());
        }

        if let Some((len, element)) = match_literal(rest) {
            cursor.advance(len);
            return Ok(element);
        }

        if let Some(hook) = self.hook.as_mut() {
            let saved = cursor.clone();
            let start = saved.position();
            match hook.resolve(cursor) {
                Some(element) if cursor.position() >= start => {
                    tracing::debug!(
                        offset = start,
                        consumed = cursor.position() - start,
                        "value resolved by extension hook"
                    );
                    return Ok(element);
                }
                Some(_) => {
                    tracing::debug!(offset = start, "extension hook moved the cursor backwards");
                }
                None => {}
            }
            *cursor = saved;
        }

        if rest.as_bytes()[0].is_ascii_alphabetic() {
            Err(cursor.error(ErrorCode::InvalidLiteral))
        } else {
            Err(cursor.error(ErrorCode::UnexpectedCharacter))
        }
    }
}

/// `true`, `false` or `null`, not followed by another word character.
fn match_literal(rest: &str) -> Option<(usize, Element)> {
    let (len, element) = if rest.starts_with("true") {
        (4, Element::boolean(true))
    } else if rest.starts_with("false") {
        (5, Element::boolean(false))
    } else if rest.starts_with("null") {
        (4, Element::null())
    } else {
        return None;
    };
    if rest.as_bytes().get(len).is_some_and(|b| is_word_byte(*b)) {
        return None;
    }
    Some((len, element))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Parse a quoted string at the cursor, which must sit on the opening quote.
fn parse_string(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
    let text = cursor.text;
    let bytes = text.as_bytes();
    let open = cursor.pos;
    let mut out = String::new();
    let mut i = open + 1;
    let mut run = i;

    loop {
        match bytes.get(i) {
            None => return Err(cursor.error_at(ErrorCode::StringUnterminated, open)),
            Some(b'"') => {
                out.push_str(&text[run..i]);
                cursor.pos = i + 1;
                return Ok(out);
            }
            Some(b'\\') => {
                out.push_str(&text[run..i]);
                let Some(&escape) = bytes.get(i + 1) else {
                    return Err(cursor.error_at(ErrorCode::StringUnterminated, open));
                };
                let decoded = match escape {
                    b'\\' => Some('\\'),
                    b'"' => Some('"'),
                    b'/' => Some('/'),
                    b'b' => Some('\u{8}'),
                    b'f' => Some('\u{c}'),
                    b'n' => Some('\n'),
                    b'r' => Some('\r'),
                    b't' => Some('\t'),
                    _ => None,
                };
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        i += 2;
                    }
                    None => {
                        let width = text[i + 1..].chars().next().map_or(1, char::len_utf8);
                        let sequence = &text[i..i + 1 + width];
                        tracing::warn!(offset = i, sequence, "unrecognized escape kept verbatim");
                        out.push_str(sequence);
                        i += 1 + width;
                    }
                }
                run = i;
            }
            Some(_) => i += 1,
        }
    }
}

/// Recognise a bare-word key followed, after optional whitespace, by a colon. The colon is
/// left for the object rule.
fn parse_bare_key(cursor: &mut Cursor<'_>) -> Option<String> {
    let bytes = cursor.remaining().as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphanumeric() || *b == b'_' => {}
        _ => return None,
    }
    let len = bytes.iter().take_while(|b| is_word_byte(**b)).count();
    let after = bytes[len..]
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))?;
    if bytes[len + after] != b':' {
        return None;
    }
    let key = cursor.remaining()[..len].to_string();
    cursor.advance(len);
    Some(key)
}

/// Parse the first value in `text`; trailing text is not examined.
pub fn parse_value(text: &str) -> Result<Element, ParseError> {
    Parser::new().parse_value(text)
}

/// Parse exactly one value; only whitespace may follow it.
///
/// ```
/// use sdtree_core::parse_document;
///
/// let doc = parse_document(r#"{"a":1,"b":"x","c":[1,2]}"#).unwrap();
/// assert_eq!(doc.len(), 3);
/// assert_eq!(doc.get("b").unwrap().primitive().as_str(), "x");
/// ```
pub fn parse_document(text: &str) -> Result<Element, ParseError> {
    Parser::new().parse_document(text)
}
