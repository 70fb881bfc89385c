//! File entry points and the bounded reader behind them.

use crate::element::Element;
use crate::error::{Result, TreeError};
use crate::parser::parse_document;
use crate::yaml::parse_yaml;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Text format of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// The native JSON-superset grammar.
    #[default]
    Native,
    Yaml,
}

/// Text read by [`read_bounded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText {
    pub text: String,
    /// The file held more than the byte limit; `text` holds only the first bytes.
    pub truncated: bool,
}

/// Read at most `max_bytes` bytes of UTF-8 text from `path`.
///
/// A truncated read may end inside a multi-byte character; the partial character is
/// dropped.
pub fn read_bounded(path: &Path, max_bytes: u64) -> io::Result<BoundedText> {
    let file = File::open(path)?;
    let mut bytes = Vec::new();
    file.take(max_bytes.saturating_add(1)).read_to_end(&mut bytes)?;

    let truncated = bytes.len() as u64 > max_bytes;
    if truncated {
        bytes.truncate(max_bytes as usize);
    }
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) if truncated => {
            let valid = err.utf8_error().valid_up_to();
            let mut bytes = err.into_bytes();
            bytes.truncate(valid);
            String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        Err(err) => return Err(io::Error::new(io::ErrorKind::InvalidData, err)),
    };

    tracing::debug!(
        path = %path.display(),
        bytes = text.len(),
        truncated,
        "read input"
    );
    Ok(BoundedText { text, truncated })
}

/// Read the whole of `path` as text for parsing.
///
/// Fails with [`TreeError::FileMissing`] if the file does not exist,
/// [`TreeError::Truncated`] if it is longer than `max_bytes` and [`TreeError::NoData`] if
/// it is empty.
pub fn load_text(path: &Path, max_bytes: u64) -> Result<String> {
    let BoundedText { text, truncated } = read_bounded(path, max_bytes).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            TreeError::FileMissing(path.to_path_buf())
        } else {
            TreeError::Io(err)
        }
    })?;
    if truncated {
        return Err(TreeError::Truncated { limit: max_bytes });
    }
    if text.is_empty() {
        return Err(TreeError::NoData);
    }
    Ok(text)
}

/// Load and parse one document from `path`.
///
/// Fails like [`load_text`], and otherwise with the parser's error.
pub fn parse_file(path: impl AsRef<Path>, max_bytes: u64, format: Format) -> Result<Element> {
    let text = load_text(path.as_ref(), max_bytes)?;
    match format {
        Format::Native => Ok(parse_document(&text)?),
        Format::Yaml => parse_yaml(&text),
    }
}
