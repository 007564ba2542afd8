//! Rendering a document back to source text.
//!
//! The renderer writes the obvious textual form: `key = value` lines for
//! scalar and array entries, and a `[dotted.path]` header for every nested
//! table (parents before children, each header followed by that table's own
//! entries). Rendering a parsed document and parsing the result yields an
//! equal document.
//!
//! ## Examples
//!
//! ```rust
//! use minitoml::{from_str, to_string};
//!
//! let doc = from_str("[server]\nport = 8080\nhosts = [\"a\", \"b\"]").unwrap();
//! let text = to_string(&doc);
//! assert_eq!(text, "[server]\nport = 8080\nhosts = [\"a\", \"b\"]\n");
//! assert_eq!(from_str(&text).unwrap(), doc);
//! ```

use crate::error::{Error, Result};
use crate::{Table, Value};
use std::io;

/// Renders a document to source text.
///
/// Entries appear in insertion order, which for a parsed document is source
/// order.
#[must_use]
pub fn to_string(document: &Table) -> String {
    let mut out = String::with_capacity(256);
    let mut path = Vec::new();
    write_table(&mut out, document, &mut path);
    out
}

/// Renders a document to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, document: &Table) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(to_string(document).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

fn write_table(out: &mut String, table: &Table, path: &mut Vec<String>) {
    // Scalars and arrays belong to the table opened by the last header, so
    // they must come before any child header.
    for (key, value) in table.iter() {
        if !value.is_table() {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(&value.to_string());
            out.push('\n');
        }
    }
    for (key, value) in table.iter() {
        if let Value::Table(child) = value {
            path.push(key.clone());
            out.push('[');
            out.push_str(&path.join("."));
            out.push_str("]\n");
            write_table(out, child, path);
            path.pop();
        }
    }
}
