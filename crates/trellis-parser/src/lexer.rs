//! JSON tokenizer.
//!
//! Punctuation, literals and numbers are recognized with nom; strings are
//! scanned by hand so that escape-free strings can be borrowed from the
//! input.

use std::borrow::Cow;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{opt, recognize, value},
    sequence::{pair, tuple},
    IResult,
};
use trellis_core::ParseError;

/// A JSON token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    String(Cow<'a, str>),
    /// The number exactly as written; conversion is up to the reader.
    Number(&'a str),
    Bool(bool),
    Null,
}

impl Token<'_> {
    pub fn describe(&self) -> String {
        match self {
            Token::BeginObject => "'{'".to_string(),
            Token::EndObject => "'}'".to_string(),
            Token::BeginArray => "'['".to_string(),
            Token::EndArray => "']'".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Comma => "','".to_string(),
            Token::String(s) => format!("string {:?}", s),
            Token::Number(n) => format!("number {}", n),
            Token::Bool(b) => b.to_string(),
            Token::Null => "null".to_string(),
        }
    }
}

/// Byte range of a token in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Skip JSON whitespace.
fn whitespace(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

/// Structural characters and the three literal names.
fn symbol(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        value(Token::BeginObject, char('{')),
        value(Token::EndObject, char('}')),
        value(Token::BeginArray, char('[')),
        value(Token::EndArray, char(']')),
        value(Token::Colon, char(':')),
        value(Token::Comma, char(',')),
        value(Token::Bool(true), tag("true")),
        value(Token::Bool(false), tag("false")),
        value(Token::Null, tag("null")),
    ))(input)
}

/// A JSON number: optional minus, integer part, optional fraction and exponent.
fn number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(char('-')),
        alt((tag("0"), digit1)),
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

/// A run of word characters, used only to describe unexpected input.
fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Forward-only tokenizer over a complete source string.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn source(&self) -> &'a str {
        self.src
    }

    /// 1-based line and column of a byte offset.
    pub fn location(&self, offset: usize) -> (u32, u32) {
        let before = &self.src[..offset.min(self.src.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        (line as u32, column as u32)
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<(Token<'a>, Span)>, ParseError> {
        let src = self.src;
        let start = match whitespace(&src[self.pos..]) {
            Ok((remaining, _)) => src.len() - remaining.len(),
            Err(_) => self.pos,
        };
        self.pos = start;
        let input = &src[start..];
        if input.is_empty() {
            return Ok(None);
        }

        if input.starts_with('"') {
            let token = self.string(start)?;
            return Ok(Some((token, Span { start, end: self.pos })));
        }

        if let Ok((remaining, token)) = symbol(input) {
            self.pos = src.len() - remaining.len();
            return Ok(Some((token, Span { start, end: self.pos })));
        }

        if let Ok((remaining, digits)) = number(input) {
            self.pos = src.len() - remaining.len();
            return Ok(Some((Token::Number(digits), Span { start, end: self.pos })));
        }

        let found = match word(input) {
            Ok((_, w)) => w.to_string(),
            Err(_) => input.chars().next().map(String::from).unwrap_or_default(),
        };
        let (line, column) = self.location(start);
        Err(ParseError::UnexpectedToken {
            found: format!("{:?}", found),
            expected: "JSON value".to_string(),
            line,
            column,
        })
    }

    /// Scan a string starting at the opening quote at `start`.
    fn string(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        let src = self.src;
        let body = start + 1;
        let bytes = src.as_bytes();
        let mut i = body;

        // Borrow when there is nothing to unescape.
        while i < bytes.len() {
            match bytes[i] {
                b'"' => {
                    self.pos = i + 1;
                    return Ok(Token::String(Cow::Borrowed(&src[body..i])));
                }
                b'\\' => break,
                b if b < 0x20 => return Err(self.control_character(i)),
                _ => i += 1,
            }
        }

        let mut out = String::from(&src[body..i]);
        let mut chars = src[i..].char_indices().map(|(off, c)| (i + off, c));
        while let Some((at, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos = at + 1;
                    return Ok(Token::String(Cow::Owned(out)));
                }
                '\\' => {
                    let (_, escape) = chars.next().ok_or_else(|| self.unterminated(start))?;
                    match escape {
                        '"' => out.push('"'),
                        '\\' => out.push('\\'),
                        '/' => out.push('/'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        'u' => {
                            let high = self.hex4(&mut chars, at)?;
                            let code = if (0xD800..0xDC00).contains(&high) {
                                match (chars.next(), chars.next()) {
                                    (Some((_, '\\')), Some((_, 'u'))) => {}
                                    _ => return Err(self.invalid_escape(at)),
                                }
                                let low = self.hex4(&mut chars, at)?;
                                if !(0xDC00..0xE000).contains(&low) {
                                    return Err(self.invalid_escape(at));
                                }
                                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                            } else {
                                high
                            };
                            let decoded =
                                char::from_u32(code).ok_or_else(|| self.invalid_escape(at))?;
                            out.push(decoded);
                        }
                        _ => return Err(self.invalid_escape(at)),
                    }
                }
                c if (c as u32) < 0x20 => return Err(self.control_character(at)),
                c => out.push(c),
            }
        }

        Err(self.unterminated(start))
    }

    fn hex4(
        &self,
        chars: &mut impl Iterator<Item = (usize, char)>,
        at: usize,
    ) -> Result<u32, ParseError> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = chars
                .next()
                .and_then(|(_, c)| c.to_digit(16))
                .ok_or_else(|| self.invalid_escape(at))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn unterminated(&self, start: usize) -> ParseError {
        let (line, column) = self.location(start);
        ParseError::UnterminatedString { line, column }
    }

    fn invalid_escape(&self, at: usize) -> ParseError {
        let (line, column) = self.location(at);
        ParseError::InvalidEscape { line, column }
    }

    fn control_character(&self, at: usize) -> ParseError {
        let (line, column) = self.location(at);
        ParseError::UnexpectedToken {
            found: "control character".to_string(),
            expected: "string character".to_string(),
            line,
            column,
        }
    }
}
