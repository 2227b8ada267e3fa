//! Pull reader over the token stream.
//!
//! The caller drives the reader one member or element at a time, so each
//! entity decides for itself how to read every property it encounters.

use std::borrow::Cow;

use trellis_core::{Id, ParseError, RootId, Value};

use crate::lexer::{Lexer, Span, Token};

/// Maximum depth of nested objects and arrays.
pub const MAX_DEPTH: usize = 128;

type Result<T> = std::result::Result<T, ParseError>;

pub struct JsonReader<'a> {
    lexer: Lexer<'a>,
    peeked: Option<(Token<'a>, Span)>,
    last_end: usize,
    /// One entry per open container: whether no member has been read yet.
    first: Vec<bool>,
}

impl<'a> JsonReader<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(src),
            peeked: None,
            last_end: 0,
            first: Vec::new(),
        }
    }

    fn peek_token(&mut self) -> Result<&(Token<'a>, Span)> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next_token()?;
        }
        self.peeked.as_ref().ok_or(ParseError::UnexpectedEof)
    }

    fn bump(&mut self) -> Result<(Token<'a>, Span)> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?.ok_or(ParseError::UnexpectedEof)?,
        };
        self.last_end = next.1.end;
        Ok(next)
    }

    fn unexpected(&self, found: &Token<'_>, span: Span, expected: &str) -> ParseError {
        let (line, column) = self.lexer.location(span.start);
        ParseError::UnexpectedToken {
            found: found.describe(),
            expected: expected.to_string(),
            line,
            column,
        }
    }

    fn expect(&mut self, want: Token<'static>, expected: &str) -> Result<Span> {
        let (token, span) = self.bump()?;
        if token == want {
            Ok(span)
        } else {
            Err(self.unexpected(&token, span, expected))
        }
    }

    fn open(&mut self, span: Span) -> Result<()> {
        if self.first.len() >= MAX_DEPTH {
            let (line, column) = self.lexer.location(span.start);
            return Err(ParseError::NestingTooDeep { line, column });
        }
        self.first.push(true);
        Ok(())
    }

    fn take_first(&mut self) -> bool {
        match self.first.last_mut() {
            Some(first) => std::mem::replace(first, false),
            None => false,
        }
    }

    pub fn begin_object(&mut self) -> Result<()> {
        let span = self.expect(Token::BeginObject, "'{'")?;
        self.open(span)
    }

    /// Advance to the next member of the current object and return its key,
    /// leaving the reader positioned at the value. `None` once the object
    /// is closed.
    pub fn next_key(&mut self) -> Result<Option<Cow<'a, str>>> {
        let (token, span) = self.bump()?;
        let first = self.first.last().copied().unwrap_or(false);
        let (token, span) = match token {
            Token::EndObject => {
                self.first.pop();
                return Ok(None);
            }
            Token::Comma if !first => self.bump()?,
            other if first => (other, span),
            other => return Err(self.unexpected(&other, span, "',' or '}'")),
        };
        match token {
            Token::String(key) => {
                self.take_first();
                self.expect(Token::Colon, "':'")?;
                Ok(Some(key))
            }
            other => Err(self.unexpected(&other, span, "property name")),
        }
    }

    pub fn begin_array(&mut self) -> Result<()> {
        let span = self.expect(Token::BeginArray, "'['")?;
        self.open(span)
    }

    /// Advance to the next element of the current array. Returns `false`
    /// once the array is closed.
    pub fn next_element(&mut self) -> Result<bool> {
        if matches!(self.peek_token()?.0, Token::EndArray) {
            self.bump()?;
            self.first.pop();
            return Ok(false);
        }
        if !self.take_first() {
            self.expect(Token::Comma, "',' or ']'")?;
            let (token, span) = self.peek_token()?.clone();
            if token == Token::EndArray {
                return Err(self.unexpected(&token, span, "value"));
            }
        }
        Ok(true)
    }

    pub fn read_string(&mut self) -> Result<String> {
        match self.bump()? {
            (Token::String(s), _) => Ok(s.into_owned()),
            (other, span) => Err(self.unexpected(&other, span, "string")),
        }
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.bump()? {
            (Token::Bool(b), _) => Ok(b),
            (other, span) => Err(self.unexpected(&other, span, "boolean")),
        }
    }

    /// Read a finite number. Literals beyond `f64` range are range errors.
    pub fn read_f64(&mut self) -> Result<f64> {
        let (raw, value) = self.read_number()?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseError::OutOfRange {
                value: raw.to_string(),
                max: f64::MAX.to_string(),
            })
        }
    }

    /// Read a number that must fit in an `f32`.
    pub fn read_f32(&mut self) -> Result<f32> {
        let (raw, value) = self.read_number()?;
        let narrowed = value as f32;
        if narrowed.is_finite() {
            Ok(narrowed)
        } else {
            Err(ParseError::OutOfRange {
                value: raw.to_string(),
                max: f32::MAX.to_string(),
            })
        }
    }

    fn read_number(&mut self) -> Result<(&'a str, f64)> {
        match self.bump()? {
            (Token::Number(raw), span) => raw
                .parse::<f64>()
                .map(|value| (raw, value))
                .map_err(|_| self.unexpected(&Token::Number(raw), span, "number")),
            (other, span) => Err(self.unexpected(&other, span, "number")),
        }
    }

    /// Read a non-negative integer no larger than `max`.
    ///
    /// Integral values written with a fraction or exponent (`2.0`, `1e3`) are
    /// accepted; negative values and values above `max` are range errors.
    fn read_unsigned(&mut self, max: u64) -> Result<u64> {
        let (token, span) = self.bump()?;
        let raw = match token {
            Token::Number(raw) => raw,
            other => return Err(self.unexpected(&other, span, "non-negative integer")),
        };
        let out_of_range = || ParseError::OutOfRange {
            value: raw.to_string(),
            max: max.to_string(),
        };

        if raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw
                .parse::<u64>()
                .ok()
                .filter(|v| *v <= max)
                .ok_or_else(out_of_range);
        }

        let value: f64 = raw
            .parse()
            .map_err(|_| self.unexpected(&Token::Number(raw), span, "non-negative integer"))?;
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(self.unexpected(&Token::Number(raw), span, "non-negative integer"));
        }
        if value < 0.0 || value > max as f64 {
            return Err(out_of_range());
        }
        Ok(value as u64)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_unsigned(u32::MAX as u64).map(|v| v as u32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_unsigned(u64::MAX)
    }

    /// Read an index into one of the root's arrays. Range is checked only
    /// when the reference is resolved.
    pub fn read_index<T>(&mut self, root: RootId) -> Result<Id<T>> {
        Ok(Id::new(self.read_u32()?, root))
    }

    pub fn read_array<T, F>(&mut self, mut element: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        self.begin_array()?;
        let mut out = Vec::new();
        while self.next_element()? {
            out.push(element(self)?);
        }
        Ok(out)
    }

    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        let values = self.read_array(|r| r.read_f32())?;
        <[f32; N]>::try_from(values).map_err(|values: Vec<f32>| ParseError::WrongLength {
            expected: N,
            found: values.len(),
        })
    }

    pub fn read_f64_array(&mut self) -> Result<Vec<f64>> {
        self.read_array(|r| r.read_f64())
    }

    pub fn read_index_array<T>(&mut self, root: RootId) -> Result<Vec<Id<T>>> {
        self.read_array(|r| r.read_index(root))
    }

    pub fn read_string_array(&mut self) -> Result<Vec<String>> {
        self.read_array(|r| r.read_string())
    }

    /// Skip one complete value, checking that it is well formed.
    pub fn skip_value(&mut self) -> Result<()> {
        let opens_object = matches!(self.peek_token()?.0, Token::BeginObject);
        let opens_array = matches!(self.peek_token()?.0, Token::BeginArray);
        if opens_object {
            self.begin_object()?;
            while self.next_key()?.is_some() {
                self.skip_value()?;
            }
            return Ok(());
        }
        if opens_array {
            self.begin_array()?;
            while self.next_element()? {
                self.skip_value()?;
            }
            return Ok(());
        }
        match self.bump()? {
            (Token::String(_) | Token::Number(_) | Token::Bool(_) | Token::Null, _) => Ok(()),
            (other, span) => Err(self.unexpected(&other, span, "value")),
        }
    }

    /// Capture one complete value as an opaque JSON tree.
    pub fn read_value(&mut self) -> Result<Value> {
        let start = self.peek_token()?.1.start;
        self.skip_value()?;
        let raw = &self.lexer.source()[start..self.last_end];
        Ok(serde_json::from_str(raw)?)
    }

    /// Require that nothing but whitespace follows the document.
    pub fn finish(&mut self) -> Result<()> {
        let span = match self.peek_token() {
            Err(ParseError::UnexpectedEof) => return Ok(()),
            Err(err) => return Err(err),
            Ok(&(_, span)) => span,
        };
        let (line, column) = self.lexer.location(span.start);
        Err(ParseError::TrailingCharacters { line, column })
    }
}
