//! Recursive-descent parser over the raw input.
//!
//! One production per grammar rule, one shared [`Cursor`], and a strict
//! first-failure discipline: every production returns the error of its first
//! violating byte to its caller unchanged, so the error a caller sees is
//! always the leftmost one in the document.

use tracing::trace;

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::span::Span;
use crate::value::Value;

/// Knobs for a single parse call.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// How deep arrays/objects may nest before the parse is rejected with
    /// [`ParseErrorKind::NestingTooDeep`]. Parsing recurses once per nesting
    /// level, so this bounds native stack use on adversarial input.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_nesting_depth: 128,
        }
    }
}

/// Parse a complete JSON document with default options.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    parse_with_options(text, ParseOptions::default())
}

/// Parse a complete JSON document.
///
/// The input must hold exactly one JSON value surrounded by optional
/// whitespace; anything else is rejected with the first grammar violation
/// encountered in a left-to-right scan.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value, ParseError> {
    trace!(len = text.len(), "parsing JSON document");
    Parser::new(text, options).parse_document()
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(text),
            options,
            depth: 0,
        }
    }

    /// Top-level driver: optional whitespace, one value, optional whitespace,
    /// end of input.
    fn parse_document(&mut self) -> Result<Value, ParseError> {
        self.cursor.skip_whitespace();
        let value = self.parse_value()?;
        self.cursor.skip_whitespace();
        if !self.cursor.is_eof() {
            let lo = self.cursor.pos();
            return Err(ParseError::new(
                ParseErrorKind::RootNotSingular,
                Span::new(lo, self.cursor.len()),
            ));
        }
        Ok(value)
    }

    /// Dispatch on the first byte of a value.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.cursor.peek() {
            None => Err(self.error_here(ParseErrorKind::ExpectValue)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b't') => self.parse_literal("true", Value::True),
            Some(b'f') => self.parse_literal("false", Value::False),
            Some(b'"') => self.parse_string_literal().map(Value::String),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.error_here(ParseErrorKind::InvalidValue)),
        }
    }

    /// `null`, `true`, or `false`, matched byte-for-byte. A partial match is
    /// an invalid value.
    fn parse_literal(&mut self, literal: &'static str, value: Value) -> Result<Value, ParseError> {
        let start = self.cursor.pos();
        if self.cursor.rest().starts_with(literal.as_bytes()) {
            self.cursor.advance_by(literal.len());
            return Ok(value);
        }
        let matched = literal
            .bytes()
            .zip(self.cursor.rest().iter().copied())
            .take_while(|(expected, got)| expected == got)
            .count();
        self.cursor.advance_by(matched);
        Err(self.error_from(ParseErrorKind::InvalidValue, start))
    }

    /// A number literal: grammar first, conversion second.
    ///
    /// A bare leading `0` is a complete integer part; further digits are left
    /// unconsumed and surface as trailing content in the driver. Overflow to
    /// infinity is rejected, underflow to `0.0` is a successful parse.
    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.cursor.pos();
        if self.cursor.peek() == Some(b'-') {
            self.cursor.bump();
        }
        match self.cursor.peek() {
            Some(b'0') => {
                self.cursor.bump();
            }
            Some(b'1'..=b'9') => {
                self.cursor.bump();
                self.eat_digits();
            }
            _ => return Err(self.error_from(ParseErrorKind::InvalidValue, start)),
        }
        if self.cursor.peek() == Some(b'.') {
            self.cursor.bump();
            if !matches!(self.cursor.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_from(ParseErrorKind::InvalidValue, start));
            }
            self.eat_digits();
        }
        if let Some(b'e' | b'E') = self.cursor.peek() {
            self.cursor.bump();
            if let Some(b'+' | b'-') = self.cursor.peek() {
                self.cursor.bump();
            }
            if !matches!(self.cursor.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_from(ParseErrorKind::InvalidValue, start));
            }
            self.eat_digits();
        }

        let span = Span::new(start, self.cursor.pos());
        let lexeme = self.cursor.slice(start, self.cursor.pos());
        let number = lexeme
            .parse::<f64>()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidValue, span))?;
        if number.is_infinite() {
            return Err(ParseError::new(ParseErrorKind::NumberTooBig, span));
        }
        Ok(Value::Number(number))
    }

    fn eat_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.cursor.peek() {
            self.cursor.bump();
        }
    }

    /// A quoted string literal, shared between values and object keys.
    ///
    /// Plain byte runs are copied through in bulk; escapes and control bytes
    /// are handled at the byte where they occur.
    fn parse_string_literal(&mut self) -> Result<String, ParseError> {
        let open = self.cursor.pos();
        self.cursor.bump();
        let mut decoded = String::new();
        let mut run_start = self.cursor.pos();
        loop {
            match self.cursor.peek() {
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::MissQuotationMark,
                        Span::new(open, self.cursor.pos()),
                    ));
                }
                Some(b'"') => {
                    decoded.push_str(self.cursor.slice(run_start, self.cursor.pos()));
                    self.cursor.bump();
                    return Ok(decoded);
                }
                Some(b'\\') => {
                    decoded.push_str(self.cursor.slice(run_start, self.cursor.pos()));
                    decoded.push(self.parse_escape()?);
                    run_start = self.cursor.pos();
                }
                Some(byte) if byte < 0x20 => {
                    return Err(self.error_here(ParseErrorKind::InvalidStringChar));
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
        }
    }

    /// One escape sequence, cursor on the backslash.
    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let start = self.cursor.pos();
        self.cursor.bump();
        match self.cursor.bump() {
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\u{0008}'),
            Some(b'f') => Ok('\u{000C}'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.parse_unicode_escape(start),
            _ => Err(self.error_from(ParseErrorKind::InvalidStringEscape, start)),
        }
    }

    /// A `\uXXXX` code unit, cursor past the `u`. A high surrogate must be
    /// followed immediately by a `\u`-escaped low surrogate; the pair combines
    /// into one code point above U+FFFF.
    fn parse_unicode_escape(&mut self, start: usize) -> Result<char, ParseError> {
        let unit = self.parse_hex4(start)?;
        let code_point = match unit {
            0xD800..=0xDBFF => {
                if self.cursor.bump() != Some(b'\\') || self.cursor.bump() != Some(b'u') {
                    return Err(self.error_from(ParseErrorKind::InvalidUnicodeSurrogate, start));
                }
                let low = self.parse_hex4(start)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error_from(ParseErrorKind::InvalidUnicodeSurrogate, start));
                }
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_from(ParseErrorKind::InvalidUnicodeSurrogate, start));
            }
            _ => u32::from(unit),
        };
        // Surrogates were handled above and a combined pair is at most
        // U+10FFFF, so the conversion cannot fail; keep it checked anyway.
        char::from_u32(code_point)
            .ok_or_else(|| self.error_from(ParseErrorKind::InvalidUnicodeSurrogate, start))
    }

    /// Exactly four hex digits.
    fn parse_hex4(&mut self, start: usize) -> Result<u16, ParseError> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let digit = match self.cursor.bump() {
                Some(byte @ b'0'..=b'9') => byte - b'0',
                Some(byte @ b'a'..=b'f') => byte - b'a' + 10,
                Some(byte @ b'A'..=b'F') => byte - b'A' + 10,
                _ => return Err(self.error_from(ParseErrorKind::InvalidUnicodeHex, start)),
            };
            unit = (unit << 4) | u16::from(digit);
        }
        Ok(unit)
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter_nested()?;
        self.cursor.bump();
        self.cursor.skip_whitespace();
        let mut elements = Vec::new();
        if self.cursor.peek() == Some(b']') {
            self.cursor.bump();
            self.depth -= 1;
            return Ok(Value::Array(elements));
        }
        loop {
            elements.push(self.parse_value()?);
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(b',') => {
                    self.cursor.bump();
                    self.cursor.skip_whitespace();
                }
                Some(b']') => {
                    self.cursor.bump();
                    break;
                }
                _ => return Err(self.error_here(ParseErrorKind::MissCommaOrSquareBracket)),
            }
        }
        self.depth -= 1;
        Ok(Value::Array(elements))
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter_nested()?;
        self.cursor.bump();
        self.cursor.skip_whitespace();
        let mut members: Vec<(String, Value)> = Vec::new();
        if self.cursor.peek() == Some(b'}') {
            self.cursor.bump();
            self.depth -= 1;
            return Ok(Value::Object(members));
        }
        loop {
            if self.cursor.peek() != Some(b'"') {
                return Err(self.error_here(ParseErrorKind::MissKey));
            }
            let key = self.parse_string_literal()?;
            self.cursor.skip_whitespace();
            if self.cursor.peek() != Some(b':') {
                return Err(self.error_here(ParseErrorKind::MissColon));
            }
            self.cursor.bump();
            self.cursor.skip_whitespace();
            let value = self.parse_value()?;
            members.push((key, value));
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(b',') => {
                    self.cursor.bump();
                    self.cursor.skip_whitespace();
                }
                Some(b'}') => {
                    self.cursor.bump();
                    break;
                }
                _ => return Err(self.error_here(ParseErrorKind::MissCommaOrCurlyBracket)),
            }
        }
        self.depth -= 1;
        Ok(Value::Object(members))
    }

    fn enter_nested(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_nesting_depth {
            return Err(self.error_here(ParseErrorKind::NestingTooDeep));
        }
        Ok(())
    }

    /// A span from `lo` up to the cursor, widened to at least one byte while
    /// input remains.
    fn span_from(&self, lo: usize) -> Span {
        let pos = self.cursor.pos();
        let hi = if pos > lo {
            pos
        } else {
            (lo + 1).min(self.cursor.len()).max(lo)
        };
        Span::new(lo, hi)
    }

    fn error_from(&self, kind: ParseErrorKind, lo: usize) -> ParseError {
        ParseError::new(kind, self.span_from(lo))
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        self.error_from(kind, self.cursor.pos())
    }
}
