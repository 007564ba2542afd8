//! Error types for document parsing.
//!
//! Errors fall into three classes with different propagation rules:
//!
//! - **Lexical errors**: illegal characters, unterminated strings, out-of-range
//!   literals. Fatal; parsing stops at the point of detection.
//! - **Syntax errors**: a token sequence matching no grammar rule, or end of
//!   input in the middle of a construct. Fatal.
//! - **Duplicate-key errors**: a key or table path that already has a value.
//!   These are *collected* while the rest of the input is still scanned, then
//!   surfaced together as a single [`Error::Duplicates`] aggregate.
//!
//! All line numbers are 1-based and refer to the line on which the offending
//! token starts.
//!
//! ## Examples
//!
//! ```rust
//! use minitoml::{from_str, Error};
//!
//! match from_str("abc=1\nabc=2\nabc=3") {
//!     Err(Error::Duplicates(dups)) => assert_eq!(dups.len(), 2),
//!     other => panic!("expected duplicate aggregate, got {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// A single duplicate-key occurrence recorded during parsing.
///
/// `line` is the 1-based line of the statement that attempted the second
/// definition; the first definition is the one that survives in the tree
/// (though the overall parse still fails).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    pub line: usize,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: duplicate key '{}'", self.line, self.key)
    }
}

/// All errors produced while parsing or rendering documents.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A character matched no lexer rule.
    #[error("illegal character {ch:?} at line {line}")]
    IllegalCharacter { ch: char, line: usize },

    /// A string literal ran into a newline or end of input before its
    /// closing quote.
    #[error("unterminated string at line {line}")]
    UnterminatedString { line: usize },

    /// A literal had datetime shape but named an impossible timestamp.
    #[error("invalid datetime {text:?} at line {line}")]
    InvalidDateTime { text: String, line: usize },

    /// An integer literal does not fit in `i64`.
    #[error("integer literal out of range at line {line}")]
    IntegerOverflow { line: usize },

    /// A token appeared where the grammar allows no rule to proceed.
    #[error("syntax error at {found}, line {line}")]
    UnexpectedToken { found: String, line: usize },

    /// End of input in the middle of a construct.
    #[error("syntax error at end of input")]
    UnexpectedEof,

    /// One or more duplicate keys were found; the full input was still
    /// scanned so every occurrence is listed.
    #[error("{}", render_duplicates(.0))]
    Duplicates(Vec<DuplicateKey>),

    /// IO error from the reader/writer entry points.
    #[error("IO error: {0}")]
    Io(String),

    /// Generic message, used by value conversions.
    #[error("{0}")]
    Message(String),
}

fn render_duplicates(duplicates: &[DuplicateKey]) -> String {
    let mut out = format!("{} errors:", duplicates.len());
    for duplicate in duplicates {
        out.push('\n');
        out.push_str(&duplicate.to_string());
    }
    out
}

impl Error {
    /// Creates an illegal-character lexical error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minitoml::Error;
    ///
    /// let err = Error::illegal_character('%', 3);
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn illegal_character(ch: char, line: usize) -> Self {
        Error::IllegalCharacter { ch, line }
    }

    /// Creates an unterminated-string lexical error.
    pub fn unterminated_string(line: usize) -> Self {
        Error::UnterminatedString { line }
    }

    /// Creates an invalid-datetime lexical error.
    pub fn invalid_datetime(text: &str, line: usize) -> Self {
        Error::InvalidDateTime {
            text: text.to_string(),
            line,
        }
    }

    /// Creates a syntax error naming the unexpected token's text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minitoml::Error;
    ///
    /// let err = Error::unexpected_token("'='", 2);
    /// assert!(err.to_string().contains("syntax error at '='"));
    /// ```
    pub fn unexpected_token(found: &str, line: usize) -> Self {
        Error::UnexpectedToken {
            found: found.to_string(),
            line,
        }
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a generic error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_shape() {
        let duplicate = DuplicateKey {
            key: "abc".to_string(),
            line: 2,
        };
        assert_eq!(duplicate.to_string(), "Line 2: duplicate key 'abc'");
    }

    #[test]
    fn aggregate_lists_every_occurrence_in_order() {
        let err = Error::Duplicates(vec![
            DuplicateKey {
                key: "a".to_string(),
                line: 1,
            },
            DuplicateKey {
                key: "b".to_string(),
                line: 4,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "2 errors:\nLine 1: duplicate key 'a'\nLine 4: duplicate key 'b'"
        );
    }

    #[test]
    fn eof_error_carries_no_line() {
        assert_eq!(
            Error::UnexpectedEof.to_string(),
            "syntax error at end of input"
        );
    }

    #[test]
    fn illegal_character_names_the_character() {
        let err = Error::illegal_character('%', 7);
        assert_eq!(err.to_string(), "illegal character '%' at line 7");
    }
}
