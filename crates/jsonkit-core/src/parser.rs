//! Recursive-descent JSON parser (RFC 8259).
//!
//! Reads UTF-8 text into a [`Value`] tree. The grammar is strict: no comments,
//! no trailing commas, no single quotes, no `NaN`/`Infinity`, no leading zeros,
//! and nothing but whitespace after the top-level value.
//!
//! # Key design decisions
//!
//! - **Position tracking**: every byte consumed goes through `bump`, which keeps
//!   a 1-based line and column. Columns count characters, not bytes, so UTF-8
//!   continuation bytes do not advance them.
//! - **Reset per call**: [`Parser::parse`] clears its scratch buffer and starts a
//!   fresh cursor at line 1, column 1 before reading anything, so one parser
//!   can be reused for any number of sequential parses.
//! - **Surrogates**: a `\uD800`–`\uDBFF` escape must be followed immediately by
//!   a `\uDC00`–`\uDFFF` escape. Lone surrogates are rejected.
//! - **Output untouched on failure**: the tree is built separately and only
//!   moved into the caller's value once the whole input has been accepted.

use std::str::FromStr;

use crate::error::ParseError;
use crate::value::{Array, Object, Value};

/// Default limit on nested arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Reusable JSON parser.
///
/// Holds scratch state and is therefore used through `&mut self`; a single
/// instance cannot be shared between concurrent parses.
///
/// ```
/// use jsonkit_core::{Parser, Value};
///
/// let mut parser = Parser::new();
/// let mut v = Value::Null;
/// parser.parse(&mut v, "[1,2,3]").unwrap();
/// assert_eq!(v[1], 2);
///
/// let err = parser.parse(&mut v, "[1,2,3").unwrap_err();
/// assert_eq!((err.line, err.column), (1, 7));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    max_depth: usize,
    scratch: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// A parser that rejects documents nesting more than `max_depth` arrays
    /// and objects.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            scratch: String::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse `input` into `output`, replacing its previous contents.
    ///
    /// On failure `output` is left as it was and the first error encountered
    /// is returned.
    pub fn parse(&mut self, output: &mut Value, input: &str) -> Result<(), ParseError> {
        self.scratch.clear();
        let mut reader = Reader::new(input, &mut self.scratch, self.max_depth);
        *output = reader.parse_document()?;
        Ok(())
    }

    /// Like [`Parser::parse`], for raw bytes that still need UTF-8 validation.
    pub fn parse_bytes(&mut self, output: &mut Value, input: &[u8]) -> Result<(), ParseError> {
        let text = validate_utf8(input)?;
        self.parse(output, text)
    }
}

/// Parse a complete JSON document.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    let mut value = Value::Null;
    Parser::new().parse(&mut value, input)?;
    Ok(value)
}

/// Parse a complete JSON document from bytes.
pub fn parse_bytes(input: &[u8]) -> Result<Value, ParseError> {
    let mut value = Value::Null;
    Parser::new().parse_bytes(&mut value, input)?;
    Ok(value)
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// The number denoted by `text` if the whole of `text` is a JSON number
/// literal.
pub(crate) fn parse_number_literal(text: &str) -> Option<f64> {
    let mut scratch = String::new();
    let mut reader = Reader::new(text, &mut scratch, 0);
    let n = reader.parse_number().ok()?;
    reader.at_end().then_some(n)
}

/// Check UTF-8 and report the first invalid byte by line and column.
fn validate_utf8(input: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(input).map_err(|err| {
        let valid = std::str::from_utf8(&input[..err.valid_up_to()]).unwrap_or_default();
        let (mut line, mut column) = (1, 1);
        for ch in valid.chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        ParseError::new("invalid UTF-8", line, column)
    })
}

/// Cursor over one input for the duration of a single parse.
struct Reader<'a, 's> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    depth: usize,
    max_depth: usize,
    scratch: &'s mut String,
}

impl<'a, 's> Reader<'a, 's> {
    fn new(text: &'a str, scratch: &'s mut String, max_depth: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            depth: 0,
            max_depth,
            scratch,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Consume one byte, keeping line and column current.
    fn bump(&mut self) {
        if let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if b & 0xC0 != 0x80 {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.line, self.column)
    }

    fn eof(&self) -> ParseError {
        self.error("unexpected end of input")
    }

    /// Error for the character under the cursor, or end of input.
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.text[self.pos..].chars().next() {
            None => self.eof(),
            Some(ch) => self.error(format!("unexpected character {ch:?}, expected {expected}")),
        }
    }

    fn parse_document(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_value()?;
        self.skip_whitespace();
        if !self.at_end() {
            return Err(self.error("trailing characters after JSON value"));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.eof()),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b'-' | b'0'..=b'9') => Ok(Value::Number(self.parse_number()?)),
            Some(b't') => self.parse_literal("true", Value::Boolean(true)),
            Some(b'f') => self.parse_literal("false", Value::Boolean(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(_) => Err(self.unexpected("a JSON value")),
        }
    }

    fn parse_literal(&mut self, word: &'static str, value: Value) -> Result<Value, ParseError> {
        for expected in word.bytes() {
            match self.peek() {
                None => return Err(self.eof()),
                Some(b) if b == expected => self.bump(),
                Some(_) => return Err(self.unexpected(&format!("`{word}`"))),
            }
        }
        Ok(value)
    }

    fn enter_container(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!(
                "nesting too deep (limit is {})",
                self.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter_container()?;
        self.bump();
        let mut items = Array::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.bump(),
                Some(b']') => {
                    self.bump();
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter_container()?;
        self.bump();
        let mut object = Object::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Object(object));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected("a string key"));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.unexpected("':'"));
            }
            self.bump();

            let value = self.parse_value()?;
            // Duplicate keys: the last value wins, in the first key's position.
            object.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.bump(),
                Some(b'}') => {
                    self.bump();
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(object))
    }

    /// Parse a string literal with the cursor on its opening quote.
    ///
    /// Strings without escapes are sliced straight out of the input. Escaped
    /// strings are decoded into the shared scratch buffer and copied out at
    /// their final length.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.bump();
        let start = self.pos;
        self.skip_unescaped();
        if self.peek() == Some(b'"') {
            let plain = self.text[start..self.pos].to_owned();
            self.bump();
            return Ok(plain);
        }

        self.scratch.clear();
        self.scratch.push_str(&self.text[start..self.pos]);
        loop {
            match self.peek() {
                None => return Err(self.eof()),
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(b'\\') => self.parse_escape()?,
                Some(_) => return Err(self.error("control character in string")),
            }
            let run = self.pos;
            self.skip_unescaped();
            self.scratch.push_str(&self.text[run..self.pos]);
        }

        Ok(self.scratch.as_str().to_owned())
    }

    /// Advance over characters that need no decoding. Stops on an ASCII
    /// byte, so both ends of the run are char boundaries.
    fn skip_unescaped(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'"' || b == b'\\' || b < 0x20 {
                break;
            }
            self.bump();
        }
    }

    /// Decode one escape sequence with the cursor on its backslash.
    fn parse_escape(&mut self) -> Result<(), ParseError> {
        let (line, column) = (self.line, self.column);
        self.bump();
        let decoded = match self.peek() {
            None => return Err(self.eof()),
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.bump();
                let unit = self.parse_hex4()?;
                let ch = self.decode_unicode_escape(unit, line, column)?;
                self.scratch.push(ch);
                return Ok(());
            }
            Some(_) => return Err(self.unexpected("a valid escape character")),
        };
        self.bump();
        self.scratch.push(decoded);
        Ok(())
    }

    /// Resolve a `\uXXXX` unit into a character, consuming the low half of a
    /// surrogate pair when `unit` is a high surrogate.
    fn decode_unicode_escape(
        &mut self,
        unit: u16,
        line: usize,
        column: usize,
    ) -> Result<char, ParseError> {
        let unpaired = || ParseError::new("unpaired surrogate in unicode escape", line, column);

        let code_point = match unit {
            0xD800..=0xDBFF => {
                if self.peek() != Some(b'\\') || self.bytes.get(self.pos + 1) != Some(&b'u') {
                    return Err(unpaired());
                }
                self.bump();
                self.bump();
                let low = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(unpaired());
                }
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(unpaired()),
            _ => u32::from(unit),
        };

        char::from_u32(code_point).ok_or_else(unpaired)
    }

    fn parse_hex4(&mut self) -> Result<u16, ParseError> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                None => return Err(self.eof()),
                Some(b) => match (b as char).to_digit(16) {
                    Some(d) => d as u16,
                    None => return Err(self.unexpected("a hex digit")),
                },
            };
            unit = unit * 16 + digit;
            self.bump();
        }
        Ok(unit)
    }

    /// Parse a number literal: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
    fn parse_number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        let (line, column) = (self.line, self.column);

        if self.peek() == Some(b'-') {
            self.bump();
        }

        match self.peek() {
            Some(b'0') => {
                self.bump();
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(self.error("leading zeros are not allowed"));
                }
            }
            Some(b'1'..=b'9') => self.eat_digits(),
            _ => return Err(self.unexpected("a digit")),
        }

        if self.peek() == Some(b'.') {
            self.bump();
            self.expect_digits()?;
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.bump();
            if let Some(b'+' | b'-') = self.peek() {
                self.bump();
            }
            self.expect_digits()?;
        }

        let literal = &self.text[start..self.pos];
        match literal.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(ParseError::new("number out of range", line, column)),
        }
    }

    fn eat_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.bump();
        }
    }

    fn expect_digits(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(b'0'..=b'9') => {
                self.eat_digits();
                Ok(())
            }
            _ => Err(self.unexpected("a digit")),
        }
    }
}
