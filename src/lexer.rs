//! Lexical analysis of document source text.
//!
//! The lexer scans raw source into a flat sequence of typed tokens, skipping
//! horizontal whitespace and `#` comments and counting lines as it goes. It
//! is on-demand: the parser pulls one token at a time and lexing stops at the
//! first error.
//!
//! Where rules overlap, the longest match wins:
//!
//! - a digit run that forms the exact `dddd-dd-ddTdd:dd:ddZ` shape is a
//!   datetime, otherwise an integer;
//! - an identifier whose full text is `true` or `false` is a boolean,
//!   otherwise a key;
//! - `[` immediately followed by a dotted identifier chain and `]` is a
//!   single table-header token, otherwise the structural `[`. The header rule
//!   is context-free, so `[true]` in value position still lexes as a header
//!   (and the grammar then rejects it).
//!
//! Runs of `\n` collapse into one newline token; the line counter advances by
//! the number of newlines consumed.

use crate::error::{Error, Result};
use crate::value::DATETIME_FORMAT;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

/// A lexed token kind.
///
/// Scalar kinds carry their already-coerced value; the parser never re-parses
/// text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Integer(i64),
    Str(String),
    Bool(bool),
    DateTime(DateTime<Utc>),
    Key(String),
    /// A `[a.b.c]` header, split into its dotted segments.
    TableHeader(Vec<String>),
    Newline,
    Equals,
    LeftBracket,
    RightBracket,
    Comma,
}

impl fmt::Display for Token {
    /// Source-ish text of the token, used in syntax error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(i) => write!(f, "{}", i),
            Token::Str(s) => write!(f, "'{}'", s),
            Token::Bool(b) => write!(f, "{}", b),
            Token::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Token::Key(k) => write!(f, "'{}'", k),
            Token::TableHeader(parts) => write!(f, "'[{}]'", parts.join(".")),
            Token::Newline => write!(f, "'\\n'"),
            Token::Equals => write!(f, "'='"),
            Token::LeftBracket => write!(f, "'['"),
            Token::RightBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
        }
    }
}

/// A token together with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub kind: Token,
    pub line: usize,
}

/// The on-demand lexer.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
}

fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'#' || b == b'?'
}

fn is_header_byte(b: u8) -> bool {
    is_identifier_byte(b) || b == b'.'
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        // Up to but not including the newline, so line counting stays with
        // the newline rule.
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.next_char();
        }
    }

    /// Produces the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Spanned>> {
        loop {
            self.skip_whitespace();
            let line = self.line;
            let Some(ch) = self.peek_char() else {
                return Ok(None);
            };
            let kind = match ch {
                '#' => {
                    self.skip_comment();
                    continue;
                }
                '\n' => {
                    while self.peek_char() == Some('\n') {
                        self.next_char();
                    }
                    Token::Newline
                }
                '"' => self.scan_string(line)?,
                '=' => {
                    self.next_char();
                    Token::Equals
                }
                ']' => {
                    self.next_char();
                    Token::RightBracket
                }
                ',' => {
                    self.next_char();
                    Token::Comma
                }
                '[' => self.scan_bracket(),
                c if c.is_ascii_digit() => self.scan_number(line)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),
                c => return Err(Error::illegal_character(c, line)),
            };
            return Ok(Some(Spanned { kind, line }));
        }
    }

    /// String literal: `"` then any run of non-quote, non-newline characters,
    /// up to the closing `"`. Only `\"` unescapes; every other backslash is
    /// kept literally.
    fn scan_string(&mut self, line: usize) -> Result<Token> {
        self.next_char(); // opening quote
        let mut text = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') => return Err(Error::unterminated_string(line)),
                Some('"') => {
                    self.next_char();
                    return Ok(Token::Str(text));
                }
                Some('\\') => {
                    self.next_char();
                    if self.peek_char() == Some('"') {
                        self.next_char();
                        text.push('"');
                    } else {
                        text.push('\\');
                    }
                }
                Some(c) => {
                    self.next_char();
                    text.push(c);
                }
            }
        }
    }

    /// If the input at the cursor has the exact `dddd-dd-ddTdd:dd:ddZ` shape,
    /// returns that slice without consuming it.
    fn peek_datetime(&self) -> Option<&'a str> {
        let rest = self.input[self.position..].as_bytes();
        if rest.len() < 20 {
            return None;
        }
        let shape_ok = rest[..20].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b'T',
            13 | 16 => *b == b':',
            19 => *b == b'Z',
            _ => b.is_ascii_digit(),
        });
        if shape_ok {
            Some(&self.input[self.position..self.position + 20])
        } else {
            None
        }
    }

    fn scan_number(&mut self, line: usize) -> Result<Token> {
        if let Some(text) = self.peek_datetime() {
            return match NaiveDateTime::parse_from_str(text, DATETIME_FORMAT) {
                Ok(naive) => {
                    self.position += text.len();
                    Ok(Token::DateTime(naive.and_utc()))
                }
                Err(_) => Err(Error::invalid_datetime(text, line)),
            };
        }
        let start = self.position;
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            self.next_char();
        }
        self.input[start..self.position]
            .parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| Error::IntegerOverflow { line })
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.position;
        while matches!(self.peek_char(), Some(c) if c.is_ascii() && is_identifier_byte(c as u8)) {
            self.next_char();
        }
        match &self.input[start..self.position] {
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            text => Token::Key(text.to_string()),
        }
    }

    /// `[` starts a table header only when a full dotted identifier chain and
    /// the closing `]` follow immediately; anything else is the structural
    /// bracket.
    fn scan_bracket(&mut self) -> Token {
        let rest = self.input[self.position + 1..].as_bytes();
        if rest.first().copied().is_some_and(is_identifier_start) {
            let mut end = 1;
            while end < rest.len() && is_header_byte(rest[end]) {
                end += 1;
            }
            if rest.get(end) == Some(&b']') {
                let inner = &self.input[self.position + 1..self.position + 1 + end];
                self.position += end + 2;
                return Token::TableHeader(inner.split('.').map(str::to_string).collect());
            }
        }
        self.next_char();
        Token::LeftBracket
    }
}
