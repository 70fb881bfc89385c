//! Error types for parsing, file loading and typed numeric access.

use std::path::PathBuf;
use thiserror::Error;

/// Stable parser error codes.
///
/// Each code maps to exactly one fixed diagnostic string (see [`ErrorCode::message`]).
/// The numeric value returned by [`ErrorCode::code`] never changes between releases, so
/// callers may branch on it or persist it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{}", self.message())]
#[repr(u16)]
pub enum ErrorCode {
    // General
    UnexpectedEnd = 100,
    EmptyInput = 101,
    UnexpectedCharacter = 102,
    TrailingCharacters = 103,
    NestingTooDeep = 104,

    // Objects
    ObjectUnterminated = 200,
    ObjectExpectedKey = 201,
    ObjectMissingColon = 202,
    ObjectDoubleColon = 203,
    ObjectStrayColon = 204,
    ObjectLeadingComma = 205,
    ObjectDoubleComma = 206,
    ObjectMissingComma = 207,
    ObjectMissingValue = 208,

    // Arrays
    ArrayUnterminated = 300,
    ArrayLeadingComma = 301,
    ArrayDoubleComma = 302,
    ArrayMissingComma = 303,
    ArrayStrayColon = 304,

    // Strings and literals
    StringUnterminated = 400,
    InvalidLiteral = 401,

    // Numerals
    NumberMisplacedMinus = 500,
    NumberMisplacedPlus = 501,
    NumberLeadingZero = 502,
    NumberDotWithoutDigit = 503,
    NumberMultipleDots = 504,
    NumberDotInExponent = 505,
    NumberExponentWithoutDigit = 506,
    NumberMultipleExponents = 507,
    NumberTrailingNonDigit = 508,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: [ErrorCode; 30] = [
        ErrorCode::UnexpectedEnd,
        ErrorCode::EmptyInput,
        ErrorCode::UnexpectedCharacter,
        ErrorCode::TrailingCharacters,
        ErrorCode::NestingTooDeep,
        ErrorCode::ObjectUnterminated,
        ErrorCode::ObjectExpectedKey,
        ErrorCode::ObjectMissingColon,
        ErrorCode::ObjectDoubleColon,
        ErrorCode::ObjectStrayColon,
        ErrorCode::ObjectLeadingComma,
        ErrorCode::ObjectDoubleComma,
        ErrorCode::ObjectMissingComma,
        ErrorCode::ObjectMissingValue,
        ErrorCode::ArrayUnterminated,
        ErrorCode::ArrayLeadingComma,
        ErrorCode::ArrayDoubleComma,
        ErrorCode::ArrayMissingComma,
        ErrorCode::ArrayStrayColon,
        ErrorCode::StringUnterminated,
        ErrorCode::InvalidLiteral,
        ErrorCode::NumberMisplacedMinus,
        ErrorCode::NumberMisplacedPlus,
        ErrorCode::NumberLeadingZero,
        ErrorCode::NumberDotWithoutDigit,
        ErrorCode::NumberMultipleDots,
        ErrorCode::NumberDotInExponent,
        ErrorCode::NumberExponentWithoutDigit,
        ErrorCode::NumberMultipleExponents,
        ErrorCode::NumberTrailingNonDigit,
    ];

    /// The stable numeric value of this code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// The fixed diagnostic string for this code.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::UnexpectedEnd => "unexpected end of input",
            ErrorCode::EmptyInput => "no value found in input",
            ErrorCode::UnexpectedCharacter => "unexpected character",
            ErrorCode::TrailingCharacters => "trailing characters after document",
            ErrorCode::NestingTooDeep => "containers nested too deeply",
            ErrorCode::ObjectUnterminated => "unterminated object",
            ErrorCode::ObjectExpectedKey => "expected a quoted or bare-word object key",
            ErrorCode::ObjectMissingColon => "missing ':' after object key",
            ErrorCode::ObjectDoubleColon => "repeated ':' in object member",
            ErrorCode::ObjectStrayColon => "':' without a preceding object key",
            ErrorCode::ObjectLeadingComma => "',' before the first object member",
            ErrorCode::ObjectDoubleComma => "repeated ',' in object",
            ErrorCode::ObjectMissingComma => "missing ',' between object members",
            ErrorCode::ObjectMissingValue => "object key without a value",
            ErrorCode::ArrayUnterminated => "unterminated array",
            ErrorCode::ArrayLeadingComma => "',' before the first array element",
            ErrorCode::ArrayDoubleComma => "repeated ',' in array",
            ErrorCode::ArrayMissingComma => "missing ',' between array elements",
            ErrorCode::ArrayStrayColon => "':' inside array",
            ErrorCode::StringUnterminated => "unterminated string",
            ErrorCode::InvalidLiteral => "invalid literal, expected true, false or null",
            ErrorCode::NumberMisplacedMinus => {
                "'-' allowed only at the start of a number or after an exponent marker"
            }
            ErrorCode::NumberMisplacedPlus => "'+' allowed only after an exponent marker",
            ErrorCode::NumberLeadingZero => "digits may not follow a leading zero",
            ErrorCode::NumberDotWithoutDigit => "'.' must be preceded by a digit",
            ErrorCode::NumberMultipleDots => "more than one '.' in number",
            ErrorCode::NumberDotInExponent => "'.' not allowed in exponent",
            ErrorCode::NumberExponentWithoutDigit => "exponent marker must be preceded by a digit",
            ErrorCode::NumberMultipleExponents => "more than one exponent marker in number",
            ErrorCode::NumberTrailingNonDigit => "number must end with a digit",
        }
    }

    /// Whether this code was raised by the numeral state machine.
    pub fn is_number_error(self) -> bool {
        (500..600).contains(&self.code())
    }
}

/// The first structural violation found while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code} (E{}) at line {line}, column {column}", .code.code())]
pub struct ParseError {
    pub code: ErrorCode,
    /// Byte offset into the input.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl ParseError {
    /// Build an error for `code` at byte `offset` of `text`.
    pub fn at(code: ErrorCode, text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let mut line = 1;
        let mut column = 1;
        for ch in text[..floor_char_boundary(text, offset)].chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self {
            code,
            offset,
            line,
            column,
        }
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Failure of a typed numeric accessor on a primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumeralError {
    /// The stored text is not a plain decimal integer.
    #[error("'{0}' is not an integer numeral")]
    NotANumber(String),

    /// The stored numeral does not fit the requested width.
    #[error("'{0}' is out of range for the requested integer width")]
    OutOfRange(String),
}

/// Errors returned by the fallible entry points of sdtree-core.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The native text did not parse.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The file passed to a file entry point does not exist.
    #[error("file not found: {}", .0.display())]
    FileMissing(PathBuf),

    /// The input was empty.
    #[error("no data")]
    NoData,

    /// The input exceeded the caller's byte limit.
    #[error("input truncated at {limit} bytes")]
    Truncated { limit: u64 },

    /// The YAML event source rejected the input.
    #[error("YAML scan error: {0}")]
    Yaml(String),

    /// The YAML input uses a construct the tree model cannot hold.
    #[error("unsupported YAML: {0}")]
    UnsupportedYaml(String),

    /// A typed numeric accessor failed.
    #[error(transparent)]
    Numeral(#[from] NumeralError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TreeError {
    /// The parser error code, when this error came from the native parser.
    pub fn parse_code(&self) -> Option<ErrorCode> {
        match self {
            TreeError::Parse(err) => Some(err.code),
            _ => None,
        }
    }
}

/// Convenience alias used throughout sdtree-core.
pub type Result<T> = std::result::Result<T, TreeError>;
