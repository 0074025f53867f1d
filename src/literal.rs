use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};
use thiserror::Error;

use crate::constants::{DWORD32_SZ, QWORD32_SZ, WORD32_SZ};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("invalid integer literal: {0}")]
    InvalidInteger(String),
    #[error("unknown byte order marker: {0}")]
    UnknownByteOrder(String),
    #[error("unsupported literal kind: {0}")]
    UnsupportedKind(&'static str),
    #[error("malformed escape sequence in {0:?}")]
    BadEscape(String),
    #[error("bytes literal may only contain ASCII characters")]
    NonAsciiBytes,
    #[error("integer {0} does not fit in 64 bits")]
    IntegerTooWide(i128),
    #[error("empty search pattern")]
    EmptyPattern,
}

/// Parse an integer the way a command line would accept it: optional sign,
/// `0x`/`0o`/`0b` prefixes (case insensitive) and `_` digit separators.
pub fn str_to_int(text: &str) -> Result<i128, LiteralError> {
    let invalid = || LiteralError::InvalidInteger(text.to_string());

    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest.strip_prefix('_').unwrap_or(rest))
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest.strip_prefix('_').unwrap_or(rest))
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest.strip_prefix('_').unwrap_or(rest))
    } else {
        (10, lower.as_str())
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return Err(invalid());
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    // Decimal literals cannot carry leading zeros unless the value is zero
    if radix == 10 && cleaned.starts_with('0') && !cleaned.trim_start_matches('0').is_empty() {
        return Err(invalid());
    }

    let magnitude = i128::from_str_radix(&cleaned, radix).map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Byte order used when packing an integer literal into a search pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
    Network,
}

impl ByteOrder {
    pub fn marker(self) -> char {
        match self {
            ByteOrder::Native => '@',
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
            ByteOrder::Network => '!',
        }
    }

    fn is_little_endian(self) -> bool {
        match self {
            ByteOrder::Native => cfg!(target_endian = "little"),
            ByteOrder::Little => true,
            ByteOrder::Big | ByteOrder::Network => false,
        }
    }

    /// Pack `value` using the narrowest of 1, 2, 4 or 8 bytes that holds it.
    /// Non-negative values are packed unsigned, negative ones as two's complement.
    pub fn pack(self, value: i128) -> Result<Vec<u8>, LiteralError> {
        let width = packed_width(value)?;
        let mut bytes = value.to_le_bytes()[..width].to_vec();
        if !self.is_little_endian() {
            bytes.reverse();
        }
        Ok(bytes)
    }
}

fn packed_width(value: i128) -> Result<usize, LiteralError> {
    let width = if value >= 0 {
        if value <= i128::from(u8::MAX) {
            1
        } else if value <= i128::from(u16::MAX) {
            WORD32_SZ
        } else if value <= i128::from(u32::MAX) {
            DWORD32_SZ
        } else if value <= i128::from(u64::MAX) {
            QWORD32_SZ
        } else {
            return Err(LiteralError::IntegerTooWide(value));
        }
    } else if value >= i128::from(i8::MIN) {
        1
    } else if value >= i128::from(i16::MIN) {
        WORD32_SZ
    } else if value >= i128::from(i32::MIN) {
        DWORD32_SZ
    } else if value >= i128::from(i64::MIN) {
        QWORD32_SZ
    } else {
        return Err(LiteralError::IntegerTooWide(value));
    };
    Ok(width)
}

impl FromStr for ByteOrder {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "@" | "native" => Ok(ByteOrder::Native),
            "<" | "little" => Ok(ByteOrder::Little),
            ">" | "big" => Ok(ByteOrder::Big),
            "!" | "network" => Ok(ByteOrder::Network),
            _ => Err(LiteralError::UnknownByteOrder(s.to_string())),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// A search literal as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Bytes(Vec<u8>),
    Text(String),
    Integer(i128),
}

impl Literal {
    /// Turn the literal into the raw bytes to search for.
    pub fn into_pattern(self, order: ByteOrder) -> Result<Vec<u8>, LiteralError> {
        let pattern = match self {
            Literal::Bytes(bytes) => bytes,
            Literal::Text(text) => text.into_bytes(),
            Literal::Integer(value) => order.pack(value)?,
        };
        if pattern.is_empty() {
            return Err(LiteralError::EmptyPattern);
        }
        Ok(pattern)
    }
}

/// `None` means the text is not this kind of literal and the next parser
/// should be tried.
type LiteralParser = fn(&str) -> Option<Result<Literal, LiteralError>>;

const NATIVE_LITERAL_PARSERS: &[LiteralParser] = &[
    parse_bytes_literal,
    parse_text_literal,
    parse_integer_literal,
    reject_unsupported_literal,
];

/// Parse a search literal. Native literal forms are tried in order; text that
/// is none of them is taken verbatim as a string literal.
pub fn parse_literal(raw: &str) -> Result<Literal, LiteralError> {
    for parser in NATIVE_LITERAL_PARSERS {
        if let Some(result) = parser(raw) {
            return result;
        }
    }
    Ok(Literal::Text(raw.to_string()))
}

/// Render a pattern for messages, e.g. `b'AB\x00'`.
pub fn display_bytes(bytes: &[u8]) -> String {
    format!("b'{}'", bytes.escape_ascii())
}

fn parse_bytes_literal(raw: &str) -> Option<Result<Literal, LiteralError>> {
    let (prefix, body) = split_quoted(raw)?;
    let raw_mode = match prefix.as_str() {
        "b" => false,
        "br" | "rb" => true,
        _ => return None,
    };
    Some(decode_bytes(body, raw_mode).map(Literal::Bytes))
}

fn decode_bytes(body: &str, raw_mode: bool) -> Result<Vec<u8>, LiteralError> {
    if !body.is_ascii() {
        return Err(LiteralError::NonAsciiBytes);
    }
    if raw_mode {
        return Ok(body.as_bytes().to_vec());
    }
    unescape(body, true)?
        .into_iter()
        .map(|unit| u8::try_from(unit).map_err(|_| LiteralError::BadEscape(body.to_string())))
        .collect()
}

fn parse_text_literal(raw: &str) -> Option<Result<Literal, LiteralError>> {
    let (prefix, body) = split_quoted(raw)?;
    let raw_mode = match prefix.as_str() {
        "" | "u" => false,
        "r" => true,
        _ => return None,
    };
    if raw_mode {
        return Some(Ok(Literal::Text(body.to_string())));
    }
    Some(decode_text(body).map(Literal::Text))
}

fn decode_text(body: &str) -> Result<String, LiteralError> {
    unescape(body, false)?
        .into_iter()
        .map(|unit| char::from_u32(unit).ok_or_else(|| LiteralError::BadEscape(body.to_string())))
        .collect()
}

fn parse_integer_literal(raw: &str) -> Option<Result<Literal, LiteralError>> {
    str_to_int(raw).ok().map(|value| Ok(Literal::Integer(value)))
}

fn reject_unsupported_literal(raw: &str) -> Option<Result<Literal, LiteralError>> {
    let kind = match raw {
        "True" | "False" => "bool",
        "None" => "None",
        _ if looks_numeric(raw) => "float",
        _ if raw.strip_suffix(['j', 'J']).is_some_and(looks_numeric) => "complex",
        _ => return None,
    };
    Some(Err(LiteralError::UnsupportedKind(kind)))
}

fn looks_numeric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit()) && text.replace('_', "").parse::<f64>().is_ok()
}

/// Split `prefix'body'` into its lowercase prefix and body. Returns `None`
/// unless the text is one complete quoted literal.
fn split_quoted(raw: &str) -> Option<(String, &str)> {
    let quote_at = raw.find(['\'', '"'])?;
    let (prefix, quoted) = raw.split_at(quote_at);
    if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let quote = quoted.chars().next()?;
    if quoted.len() < 2 || !quoted.ends_with(quote) {
        return None;
    }
    let body = &quoted[1..quoted.len() - 1];

    let mut escaped = false;
    for c in body.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return None;
        }
    }
    // A trailing backslash escapes the closing quote
    if escaped {
        return None;
    }

    Some((prefix.to_ascii_lowercase(), body))
}

/// Resolve backslash escapes into code units. In bytes mode `\u`/`\U` are
/// kept verbatim.
fn unescape(body: &str, bytes_mode: bool) -> Result<Vec<u32>, LiteralError> {
    let bad = || LiteralError::BadEscape(body.to_string());
    let mut units = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            units.push(u32::from(c));
            continue;
        }
        let escape = chars.next().ok_or_else(bad)?;
        let unit = match escape {
            '\\' => 0x5C,
            '\'' => 0x27,
            '"' => 0x22,
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0C,
            'n' => 0x0A,
            'r' => 0x0D,
            't' => 0x09,
            'v' => 0x0B,
            'x' => hex_escape(&mut chars, 2).ok_or_else(bad)?,
            'u' if !bytes_mode => hex_escape(&mut chars, 4).ok_or_else(bad)?,
            'U' if !bytes_mode => hex_escape(&mut chars, 8).ok_or_else(bad)?,
            '0'..='7' => octal_escape(escape, &mut chars),
            other => {
                units.push(u32::from('\\'));
                u32::from(other)
            }
        };
        units.push(unit);
    }

    Ok(units)
}

fn hex_escape(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

fn octal_escape(first: char, chars: &mut Peekable<Chars<'_>>) -> u32 {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match chars.peek().and_then(|d| d.to_digit(8)) {
            Some(digit) => {
                value = value * 8 + digit;
                chars.next();
            }
            None => break,
        }
    }
    value
}
