//! Numeral state machine shared by the text parser and the YAML bridge.
//!
//! A numeral is scanned as the longest run of characters from `[0-9+\-.eE]` and then
//! checked one character at a time. The machine tracks whether the mantissa started with
//! a lone zero, whether a dot or exponent marker has been seen, and the previous
//! character. Each grammar violation maps to its own [`ErrorCode`]. Numerals are never
//! converted to binary here; the caller keeps the captured text.

use crate::error::ErrorCode;

/// A successfully scanned numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numeral {
    /// Byte length of the numeral text.
    pub len: usize,
    /// A dot was seen, so the numeral is a Real. Otherwise it is an Integer,
    /// even when it carries an exponent.
    pub is_real: bool,
}

/// Whether `b` can appear inside a numeral run.
pub(crate) fn is_numeral_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E')
}

/// Whether the numeral rule claims the input starting at `bytes`.
///
/// Digits, signs and dots always start a numeral. An exponent marker starts one only when
/// a digit or sign follows it, so bare words such as `env` stay available to the
/// extension hook while `e10` is reported as a malformed number.
pub(crate) fn starts_numeral(bytes: &[u8]) -> bool {
    match bytes.first() {
        Some(b'0'..=b'9' | b'+' | b'-' | b'.') => true,
        Some(b'e' | b'E') => matches!(bytes.get(1), Some(b'0'..=b'9' | b'+' | b'-')),
        _ => false,
    }
}

/// Scan the numeral at the start of `text`.
///
/// Only the leading run of numeral characters is examined; anything after it is left for
/// the caller. Use [`parse_numeral`] to require that the whole string is a numeral.
pub fn scan_numeral(text: &str) -> Result<Numeral, ErrorCode> {
    let bytes = text.as_bytes();
    let run = bytes.iter().take_while(|b| is_numeral_byte(**b)).count();
    if run == 0 {
        return Err(ErrorCode::UnexpectedCharacter);
    }

    let mut leading_zero = false;
    let mut int_digits = 0usize;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut prev: Option<u8> = None;

    for &b in &bytes[..run] {
        match b {
            b'-' => {
                if !(prev.is_none() || matches!(prev, Some(b'e' | b'E'))) {
                    return Err(ErrorCode::NumberMisplacedMinus);
                }
            }
            b'+' => {
                if !matches!(prev, Some(b'e' | b'E')) {
                    return Err(ErrorCode::NumberMisplacedPlus);
                }
            }
            b'0'..=b'9' => {
                if !seen_dot && !seen_exp {
                    if leading_zero {
                        return Err(ErrorCode::NumberLeadingZero);
                    }
                    if int_digits == 0 && b == b'0' {
                        leading_zero = true;
                    }
                    int_digits += 1;
                }
            }
            b'.' => {
                if seen_exp {
                    return Err(ErrorCode::NumberDotInExponent);
                }
                if seen_dot {
                    return Err(ErrorCode::NumberMultipleDots);
                }
                if !matches!(prev, Some(b'0'..=b'9')) {
                    return Err(ErrorCode::NumberDotWithoutDigit);
                }
                seen_dot = true;
            }
            _ => {
                // exponent marker
                if seen_exp {
                    return Err(ErrorCode::NumberMultipleExponents);
                }
                if !matches!(prev, Some(b'0'..=b'9')) {
                    return Err(ErrorCode::NumberExponentWithoutDigit);
                }
                seen_exp = true;
            }
        }
        prev = Some(b);
    }

    if !matches!(prev, Some(b'0'..=b'9')) {
        return Err(ErrorCode::NumberTrailingNonDigit);
    }

    Ok(Numeral {
        len: run,
        is_real: seen_dot,
    })
}

/// Scan `text` and require that the numeral spans all of it.
///
/// Returns `None` for anything that is not exactly one well-formed numeral.
pub fn parse_numeral(text: &str) -> Option<Numeral> {
    match scan_numeral(text) {
        Ok(numeral) if numeral.len == text.len() => Some(numeral),
        _ => None,
    }
}
