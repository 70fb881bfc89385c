//! Primitive leaves: String, Integer, Real, Bool and Null.
//!
//! Every primitive stores its value only as canonical text. Numbers are never held as
//! binary `i64`/`f64`; typed accessors re-parse the text on each call. The "length" of a
//! primitive is therefore the length of that text.

use crate::error::NumeralError;
use crate::number::parse_numeral;
use std::fmt;
use std::num::IntErrorKind;

/// The sub-tag of a primitive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    String,
    Integer,
    Real,
    Bool,
    Null,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::String => "String",
            PrimitiveKind::Integer => "Integer",
            PrimitiveKind::Real => "Real",
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Null => "Null",
        };
        f.write_str(name)
    }
}

/// An immutable leaf value held as canonical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    kind: PrimitiveKind,
    text: String,
}

impl Primitive {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            kind: PrimitiveKind::String,
            text: value.into(),
        }
    }

    pub fn integer(value: i32) -> Self {
        Self::integer64(i64::from(value))
    }

    pub fn integer64(value: i64) -> Self {
        Self {
            kind: PrimitiveKind::Integer,
            text: value.to_string(),
        }
    }

    /// Build a Real. NaN and the infinities are stored as `0.0`.
    pub fn real(value: f64) -> Self {
        Self {
            kind: PrimitiveKind::Real,
            text: format_real(value),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            kind: PrimitiveKind::Bool,
            text: if value { "true" } else { "false" }.to_string(),
        }
    }

    pub fn null() -> Self {
        Self {
            kind: PrimitiveKind::Null,
            text: "null".to_string(),
        }
    }

    /// Build an Integer or Real from numeral text, keeping the text exactly.
    ///
    /// Returns `None` unless `text` is one well-formed numeral.
    pub fn numeral(text: &str) -> Option<Self> {
        let numeral = parse_numeral(text)?;
        Some(Self::from_numeral_text(text.to_string(), numeral.is_real))
    }

    pub(crate) fn from_numeral_text(text: String, is_real: bool) -> Self {
        let kind = if is_real {
            PrimitiveKind::Real
        } else {
            PrimitiveKind::Integer
        };
        Self { kind, text }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// The canonical text of the value.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the canonical text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The value of a String primitive.
    ///
    /// # Panics
    ///
    /// Panics if this is not a String.
    pub fn as_str(&self) -> &str {
        self.expect_kind(PrimitiveKind::String, "as_str");
        &self.text
    }

    /// The value of a Bool primitive.
    ///
    /// # Panics
    ///
    /// Panics if this is not a Bool.
    pub fn as_bool(&self) -> bool {
        self.expect_kind(PrimitiveKind::Bool, "as_bool");
        self.text == "true"
    }

    /// Decode a Real or Integer as `f64`.
    ///
    /// # Panics
    ///
    /// Panics if this is neither a Real nor an Integer.
    pub fn try_f64(&self) -> Result<f64, NumeralError> {
        if !matches!(self.kind, PrimitiveKind::Real | PrimitiveKind::Integer) {
            panic!("try_f64 requires a Real or Integer primitive, found {}", self.kind);
        }
        self.text
            .parse::<f64>()
            .map_err(|_| NumeralError::NotANumber(self.text.clone()))
    }

    /// Decode an Integer as `i64`, reporting malformed or out-of-range text.
    ///
    /// # Panics
    ///
    /// Panics if this is not an Integer.
    pub fn try_i64(&self) -> Result<i64, NumeralError> {
        self.expect_kind(PrimitiveKind::Integer, "try_i64");
        self.text.parse::<i64>().map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                NumeralError::OutOfRange(self.text.clone())
            }
            _ => NumeralError::NotANumber(self.text.clone()),
        })
    }

    /// Decode an Integer as `i64`, substituting `default` on failure.
    pub fn i64_or(&self, default: i64) -> i64 {
        self.try_i64().unwrap_or(default)
    }

    /// Decode an Integer as `i64`, aborting on failure.
    ///
    /// # Panics
    ///
    /// Panics if this is not an Integer or its text does not fit an `i64`.
    pub fn i64_or_abort(&self) -> i64 {
        match self.try_i64() {
            Ok(value) => value,
            Err(err) => panic!("integer accessor failed: {err}"),
        }
    }

    /// Decode an Integer as `i32`, reporting malformed or out-of-range text.
    ///
    /// # Panics
    ///
    /// Panics if this is not an Integer.
    pub fn try_i32(&self) -> Result<i32, NumeralError> {
        let wide = self.try_i64()?;
        i32::try_from(wide).map_err(|_| NumeralError::OutOfRange(self.text.clone()))
    }

    pub fn i32_or(&self, default: i32) -> i32 {
        self.try_i32().unwrap_or(default)
    }

    /// # Panics
    ///
    /// Panics if this is not an Integer or its text does not fit an `i32`.
    pub fn i32_or_abort(&self) -> i32 {
        match self.try_i32() {
            Ok(value) => value,
            Err(err) => panic!("integer accessor failed: {err}"),
        }
    }

    fn expect_kind(&self, expected: PrimitiveKind, op: &str) {
        if self.kind != expected {
            panic!("{op} requires a {expected} primitive, found {}", self.kind);
        }
    }
}

/// Canonical text of a Real. Always contains a `.` so it reads back as a Real.
fn format_real(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let text = format!("{value:?}");
    if text.contains('.') {
        text
    } else if let Some(pos) = text.find('e') {
        format!("{}.0{}", &text[..pos], &text[pos..])
    } else {
        format!("{text}.0")
    }
}
