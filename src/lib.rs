//! # minitoml
//!
//! A strictly-typed parser for a small TOML subset: integer, string, boolean
//! and UTC-datetime scalars, flat arrays, and nested tables opened by dotted
//! `[a.b.c]` headers.
//!
//! ## Key Features
//!
//! - **One entry point**: [`from_str`] turns source text into a document tree
//!   ([`Table`] of [`Value`]s) or a structured [`Error`] — no partial results
//! - **Whole-input duplicate reporting**: duplicate keys don't stop the
//!   parse; every occurrence is collected and reported together, with
//!   1-based line numbers
//! - **Strict typing**: an integer in the source is an integer in the tree,
//!   never a string; there is no implicit coercion anywhere
//! - **Round-trippable**: [`to_string`] renders a document back to source
//!   text that parses to an equal document
//!
//! ## Quick Start
//!
//! ```rust
//! use minitoml::from_str;
//!
//! let doc = from_str(r#"
//! title = "example"
//!
//! [owner]
//! name = "tom"
//! dob = 1979-05-27T07:32:00Z
//!
//! [owner.prefs]
//! sizes = [1, 2, 3]
//! "#).unwrap();
//!
//! assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("example"));
//! let owner = doc.get("owner").and_then(|v| v.as_table()).unwrap();
//! assert_eq!(owner.get("name").and_then(|v| v.as_str()), Some("tom"));
//! ```
//!
//! ## The Format
//!
//! Statements are one per line: either an assignment `key = value` or a
//! table header `[a.b.c]`. A header makes the named table the target for the
//! assignments that follow and creates any missing ancestors implicitly —
//! `[group.subgroup]` alone yields `{"group": {"subgroup": {}}}`. Values are
//! non-negative 64-bit integers, `"quoted"` strings (only `\"` is an escape),
//! `true`/`false`, UTC datetimes like `1979-05-27T07:32:00Z`, and bracketed
//! arrays which may span lines. `#` starts a comment.
//!
//! Deliberately *not* part of the format: negative numbers, floats,
//! timezone offsets, and the rest of TOML's string escapes.
//!
//! ## Error Handling
//!
//! Illegal characters, unterminated strings, and grammar violations fail
//! immediately. Duplicate keys are different: the parse keeps going and
//! fails at the end with an aggregate listing every duplicate, so one run
//! reports them all.
//!
//! ```rust
//! use minitoml::{from_str, Error};
//!
//! let err = from_str("a=1\na=2\nb=3\nb=4").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "2 errors:\nLine 2: duplicate key 'a'\nLine 4: duplicate key 'b'"
//! );
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API for any input
//! - Proper error propagation with `Result` types

pub mod error;
mod lexer;
pub mod macros;
pub mod map;
pub mod parser;
pub mod ser;
pub mod value;

pub use error::{DuplicateKey, Error, Result};
pub use map::Table;
pub use parser::Parser;
pub use ser::{to_string, to_writer};
pub use value::Value;

use std::io;

/// Parses document source text into its table tree.
///
/// This is the single core entry point: it returns either the complete,
/// error-free document or an [`Error`]; there is no partial-success mode.
///
/// # Examples
///
/// ```rust
/// use minitoml::from_str;
///
/// let doc = from_str("abc = 123").unwrap();
/// assert_eq!(doc.get("abc").and_then(|v| v.as_integer()), Some(123));
/// ```
///
/// # Errors
///
/// Returns a lexical or syntax error as soon as one is found, or a
/// duplicate-key aggregate after the whole input has been scanned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Table> {
    Parser::new(s).parse()
}

/// Parses a document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use minitoml::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"abc = 123")).unwrap();
/// assert_eq!(doc.get("abc").and_then(|v| v.as_integer()), Some(123));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Table>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Parses a document from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or do not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Table> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
