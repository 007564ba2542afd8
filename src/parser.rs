//! The document grammar and its semantic actions.
//!
//! The grammar is small enough for recursive descent with one token of
//! lookahead:
//!
//! ```text
//! document   := NEWLINE* (statement (NEWLINE+ statement)* NEWLINE*)?
//! statement  := assignment | table_header
//! assignment := KEY "=" value
//! value      := INTEGER | STRING | BOOLEAN | DATETIME | array
//! array      := "[" (value ("," value)*)? "]"     // newlines inside are ignored
//! ```
//!
//! There is no AST: each rule's semantic action mutates the document tree as
//! the rule completes. A header statement moves the current table path; an
//! assignment lands in whatever table that path addresses, creating implicit
//! ancestor tables on the way down.
//!
//! Duplicate keys do not stop the parse. They are recorded and the rest of
//! the input is still scanned, so a single run reports every duplicate; the
//! parse then fails with one [`Error::Duplicates`] aggregate. Lexical and
//! syntax errors abort immediately.
//!
//! Each [`Parser`] owns its document, current path, and error list, so
//! concurrent parses of independent inputs never interfere.

use crate::error::{DuplicateKey, Error, Result};
use crate::lexer::{Lexer, Spanned, Token};
use crate::{Table, Value};

/// A single-use document parser.
///
/// # Examples
///
/// ```rust
/// use minitoml::Parser;
///
/// let doc = Parser::new("[server]\nport = 8080").parse().unwrap();
/// let server = doc.get("server").and_then(|v| v.as_table()).unwrap();
/// assert_eq!(server.get("port").and_then(|v| v.as_integer()), Some(8080));
/// ```
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Option<Spanned>>,
    document: Table,
    /// Segments of the most recently opened `[a.b.c]` header; empty means
    /// assignments land at the document root.
    current_path: Vec<String>,
    duplicates: Vec<DuplicateKey>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            peeked: None,
            document: Table::new(),
            current_path: Vec::new(),
            duplicates: Vec::new(),
        }
    }

    /// Runs the parse to completion.
    ///
    /// Returns the finished document, or the first fatal error, or the
    /// duplicate-key aggregate if any were recorded.
    pub fn parse(mut self) -> Result<Table> {
        self.skip_newlines()?;
        while self.peek()?.is_some() {
            self.statement()?;
            // A statement must be followed by a line break or end of input;
            // anything else is a second statement on the same line.
            match self.advance()? {
                None => break,
                Some(token) if token.kind == Token::Newline => {}
                Some(token) => return Err(unexpected(token)),
            }
            self.skip_newlines()?;
        }
        if self.duplicates.is_empty() {
            Ok(self.document)
        } else {
            Err(Error::Duplicates(self.duplicates))
        }
    }

    fn advance(&mut self) -> Result<Option<Spanned>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<Option<&Spanned>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        Ok(self.peeked.as_ref().and_then(|t| t.as_ref()))
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while matches!(self.peek()?, Some(token) if token.kind == Token::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        let token = self.advance()?.ok_or(Error::UnexpectedEof)?;
        match token.kind {
            Token::TableHeader(segments) => {
                self.table_header(segments, token.line);
                Ok(())
            }
            Token::Key(key) => self.assignment(key, token.line),
            _ => Err(unexpected(token)),
        }
    }

    /// `[a.b.c]`: creates every ancestor implicitly, defines the leaf as an
    /// empty table, and makes the full path the target for assignments that
    /// follow. Redeclaring the leaf (or crossing a non-table value on the
    /// way) is a duplicate.
    fn table_header(&mut self, segments: Vec<String>, line: usize) {
        if let Some((leaf, parents)) = segments.split_last() {
            if let Some(table) = resolve(&mut self.document, parents, line, &mut self.duplicates) {
                define(
                    table,
                    leaf.clone(),
                    Value::Table(Table::new()),
                    line,
                    &mut self.duplicates,
                );
            }
        }
        self.current_path = segments;
    }

    /// `key = value`, inserted into the table the current path addresses.
    fn assignment(&mut self, key: String, line: usize) -> Result<()> {
        match self.advance()? {
            Some(token) if token.kind == Token::Equals => {}
            Some(token) => return Err(unexpected(token)),
            None => return Err(Error::UnexpectedEof),
        }
        let value = self.value()?;
        if let Some(table) = resolve(
            &mut self.document,
            &self.current_path,
            line,
            &mut self.duplicates,
        ) {
            define(table, key, value, line, &mut self.duplicates);
        }
        Ok(())
    }

    fn value(&mut self) -> Result<Value> {
        let token = self.advance()?.ok_or(Error::UnexpectedEof)?;
        match token.kind {
            Token::Integer(i) => Ok(Value::Integer(i)),
            Token::Str(s) => Ok(Value::String(s)),
            Token::Bool(b) => Ok(Value::Boolean(b)),
            Token::DateTime(dt) => Ok(Value::DateTime(dt)),
            Token::LeftBracket => self.array(),
            _ => Err(unexpected(token)),
        }
    }

    /// The opening `[` has already been consumed. Newlines inside the
    /// brackets are not statement separators; a comma directly before `]`
    /// (trailing comma) is rejected.
    fn array(&mut self) -> Result<Value> {
        let mut elements = Vec::new();
        self.skip_newlines()?;
        if matches!(self.peek()?, Some(token) if token.kind == Token::RightBracket) {
            self.advance()?;
            return Ok(Value::Array(elements));
        }
        loop {
            elements.push(self.value()?);
            self.skip_newlines()?;
            let token = self.advance()?.ok_or(Error::UnexpectedEof)?;
            match token.kind {
                Token::RightBracket => return Ok(Value::Array(elements)),
                Token::Comma => self.skip_newlines()?,
                _ => return Err(unexpected(token)),
            }
        }
    }
}

fn unexpected(token: Spanned) -> Error {
    Error::unexpected_token(&token.kind.to_string(), token.line)
}

/// Walks `path` down from the root, creating empty tables for absent
/// segments. Meeting a non-table value on the way records a duplicate for
/// that segment and gives up on the statement.
fn resolve<'t>(
    root: &'t mut Table,
    path: &[String],
    line: usize,
    duplicates: &mut Vec<DuplicateKey>,
) -> Option<&'t mut Table> {
    let mut current = root;
    for segment in path {
        if !current.contains_key(segment) {
            current.insert(segment.clone(), Value::Table(Table::new()));
        }
        match current.get_mut(segment) {
            Some(Value::Table(next)) => current = next,
            _ => {
                duplicates.push(DuplicateKey {
                    key: segment.clone(),
                    line,
                });
                return None;
            }
        }
    }
    Some(current)
}

/// Inserts `key -> value` unless the key already exists; a duplicate keeps
/// the first value and records the collision.
fn define(
    table: &mut Table,
    key: String,
    value: Value,
    line: usize,
    duplicates: &mut Vec<DuplicateKey>,
) {
    if table.contains_key(&key) {
        duplicates.push(DuplicateKey { key, line });
    } else {
        table.insert(key, value);
    }
}
