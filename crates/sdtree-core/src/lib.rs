//! # sdtree-core
//!
//! An in-memory tree model for semi-structured data (objects, arrays, strings, numbers,
//! booleans, null) with a lenient JSON parser, pretty and compact writers, tree
//! algorithms, and a bridge from YAML.
//!
//! Scalars are stored as canonical text, never as binary numbers. Object members carry
//! their key and keep insertion order; inserting an existing key replaces the old member.
//!
//! ## Quick start
//!
//! ```rust
//! use sdtree_core::{parse_document, select, to_compact};
//!
//! let mut doc = parse_document(r#"{c: [1, 2], "b": "x", "a": 1,}"#).unwrap();
//! assert_eq!(select(&doc, &["c", "1"]).unwrap().primitive().text(), "2");
//!
//! // Writing sorts object members in place.
//! assert_eq!(to_compact(&mut doc), r#"{"a":1,"b":"x","c":[1,2]}"#);
//! assert_eq!(doc.get_index(0).unwrap().name(), Some("a"));
//! ```
//!
//! ## Modules
//!
//! - [`element`]: the tree node and container operations
//! - [`primitive`]: leaf values and typed accessors
//! - [`number`]: numeral state machine
//! - [`parser`]: text parser with an extension hook
//! - [`serialize`]: pretty/compact writers and escapers
//! - [`compare`], [`merge`]: structural order, merge and deep merge
//! - [`iter`], [`select`], [`walk`]: iteration, path lookup, visitor traversal
//! - [`yaml`]: YAML event-stream bridge
//! - [`file`]: bounded file reading and file entry points
//! - [`json`]: `serde` and `serde_json` interop
//! - [`error`]: error codes and error types

pub mod compare;
pub mod element;
pub mod error;
pub mod file;
pub mod iter;
pub mod json;
pub mod merge;
pub mod number;
pub mod parser;
pub mod primitive;
pub mod select;
pub mod serialize;
pub mod walk;
pub mod yaml;

pub use compare::compare;
pub use element::{Container, ContainerKind, Element, ElementKind, Node};
pub use error::{ErrorCode, NumeralError, ParseError, Result, TreeError};
pub use file::{load_text, parse_file, read_bounded, BoundedText, Format};
pub use iter::ElementIter;
pub use merge::{deep_merge, merge};
pub use number::{parse_numeral, scan_numeral, Numeral};
pub use parser::{parse_document, parse_value, Cursor, Parser, ValueHook, MAX_DEPTH};
pub use primitive::{Primitive, PrimitiveKind};
pub use select::{select, select_mut};
pub use serialize::{escape_bytes, escape_str, to_compact, to_pretty};
pub use walk::{walk, Visitor, WalkControl};
pub use yaml::parse_yaml;
