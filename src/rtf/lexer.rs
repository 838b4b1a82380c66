//! RTF lexer/tokenizer.
//!
//! This module turns the byte stream into primitive tokens. It never looks
//! more than one byte ahead, so it works directly on a [`ByteSource`].

use super::error::{DecodeError, DecodeResult};
use super::source::ByteSource;
use smallvec::SmallVec;
use std::fmt;
use std::io::Read;

/// Token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Opening brace
    GroupOpen,
    /// Closing brace
    GroupClose,
    /// Control word with its optional numeric parameter
    ControlWord { name: &'a [u8], arg: Option<i32> },
    /// Backslash followed by a single non-letter
    ControlSymbol(u8),
    /// A text byte, either raw or from a `\'hh` escape
    Literal(u8),
    /// No more input
    EndOfStream,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::GroupOpen => f.write_str("{"),
            Token::GroupClose => f.write_str("}"),
            Token::ControlWord { name, arg } => {
                write!(f, "\\{}", String::from_utf8_lossy(name))?;
                match arg {
                    Some(arg) => write!(f, "{arg}"),
                    None => Ok(()),
                }
            },
            Token::ControlSymbol(c) => write!(f, "\\{}", *c as char),
            Token::Literal(b) if b.is_ascii_graphic() || *b == b' ' => write!(f, "{}", *b as char),
            Token::Literal(b) => write!(f, "\\'{b:02x}"),
            Token::EndOfStream => f.write_str("<eof>"),
        }
    }
}

/// RTF Lexer.
pub struct Lexer<R> {
    source: ByteSource<R>,
    /// Letters of the control word being scanned
    keyword: SmallVec<[u8; 32]>,
    /// Sign and digits of the parameter being scanned
    digits: SmallVec<[u8; 16]>,
}

impl<R: Read> Lexer<R> {
    /// Create a new lexer.
    #[inline]
    pub fn new(source: ByteSource<R>) -> Self {
        Self {
            source,
            keyword: SmallVec::new(),
            digits: SmallVec::new(),
        }
    }

    /// Access the byte source, e.g. to read a `\bin` payload.
    #[inline]
    pub fn source_mut(&mut self) -> &mut ByteSource<R> {
        &mut self.source
    }

    /// Current byte offset in the input.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.source.offset()
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> DecodeResult<Token<'_>> {
        let byte = loop {
            match self.source.next_byte()? {
                None => return Ok(Token::EndOfStream),
                Some(b'\r' | b'\n') => continue,
                Some(byte) => break byte,
            }
        };
        match byte {
            b'{' => Ok(Token::GroupOpen),
            b'}' => Ok(Token::GroupClose),
            b'\\' => self.parse_control(),
            _ => Ok(Token::Literal(byte)),
        }
    }

    /// Parse a control word or control symbol after the backslash.
    fn parse_control(&mut self) -> DecodeResult<Token<'_>> {
        // A lone trailing backslash carries nothing.
        let Some(first) = self.source.next_byte()? else {
            return Ok(Token::EndOfStream);
        };

        if !first.is_ascii_alphabetic() {
            if first == b'\'' {
                return self.parse_hex_char();
            }
            return Ok(Token::ControlSymbol(first));
        }

        self.keyword.clear();
        self.keyword.push(first);
        let mut next = self.source.next_byte()?;
        while let Some(b) = next
            && b.is_ascii_alphabetic()
        {
            self.keyword.push(b);
            next = self.source.next_byte()?;
        }

        let mut arg = None;
        if let Some(b) = next
            && (b == b'-' || b.is_ascii_digit())
        {
            self.digits.clear();
            if b == b'-' {
                self.digits.push(b);
                next = self.source.next_byte()?;
            }
            while let Some(d) = next
                && d.is_ascii_digit()
            {
                self.digits.push(d);
                next = self.source.next_byte()?;
            }
            arg = parse_parameter(&self.digits);
        }

        // A single space is the delimiter and belongs to the control word.
        match next {
            Some(b' ') | None => {},
            Some(b) => self.source.push_back(b)?,
        }

        Ok(Token::ControlWord {
            name: &self.keyword,
            arg,
        })
    }

    /// Parse hexadecimal character escape (`\'hh`).
    fn parse_hex_char(&mut self) -> DecodeResult<Token<'_>> {
        let high = self.hex_digit()?;
        let low = self.hex_digit()?;
        Ok(Token::Literal((high << 4) | low))
    }

    fn hex_digit(&mut self) -> DecodeResult<u8> {
        let Some(byte) = self.source.next_byte()? else {
            return Err(DecodeError::EndOfFile {
                offset: self.source.offset(),
            });
        };
        hex_value(byte).ok_or(DecodeError::InvalidHex {
            offset: self.source.offset() - 1,
            byte,
        })
    }
}

/// Value of an ASCII hex digit.
#[inline]
pub fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Convert the scanned sign and digits into a parameter.
///
/// A bare `-` yields no parameter; values outside `i32` saturate.
fn parse_parameter(digits: &[u8]) -> Option<i32> {
    let negative = digits.first() == Some(&b'-');
    if digits.len() == usize::from(negative) {
        return None;
    }
    match atoi_simd::parse::<i32, false, false>(digits) {
        Ok(value) => Some(value),
        Err(_) if negative => Some(i32::MIN),
        Err(_) => Some(i32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<String> {
        let mut lexer = Lexer::new(ByteSource::with_capacity(input.as_bytes(), 16));
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token == Token::EndOfStream {
                return out;
            }
            out.push(token.to_string());
        }
    }

    #[test]
    fn test_simple_tokenization() {
        let tokens = lex(r"{\rtf1\ansi Hi}");
        assert_eq!(tokens, ["{", r"\rtf1", r"\ansi", "H", "i", "}"]);
    }

    #[test]
    fn test_parameters() {
        assert_eq!(lex(r"\li-720\fs24 x"), [r"\li-720", r"\fs24", "x"]);
        assert_eq!(lex(r"\li- x"), [r"\li", "x"]);
        assert_eq!(lex(r"\paperw99999999999"), [r"\paperw2147483647"]);
    }

    #[test]
    fn test_space_delimiter_consumed_once() {
        assert_eq!(lex(r"\b  x"), [r"\b", " ", "x"]);
        assert_eq!(lex(r"\b0  x"), [r"\b0", " ", "x"]);
        assert_eq!(lex(r"\b\i"), [r"\b", r"\i"]);
    }

    #[test]
    fn test_control_symbols_and_hex() {
        assert_eq!(lex(r"\{\}\\\~\'41\'e9"), [r"\{", r"\}", r"\\", r"\~", "A", r"\'e9"]);
    }

    #[test]
    fn test_line_breaks_are_ignored() {
        assert_eq!(lex("a\r\nb\nc"), ["a", "b", "c"]);
        assert_eq!(lex("\\\n"), ["\\\n"]);
    }

    #[test]
    fn test_invalid_hex() {
        let mut lexer = Lexer::new(ByteSource::with_capacity(&br"\'4z"[..], 16));
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, DecodeError::InvalidHex { offset: 3, byte: b'z' }));

        let mut lexer = Lexer::new(ByteSource::with_capacity(&br"\'4"[..], 16));
        assert!(matches!(lexer.next_token(), Err(DecodeError::EndOfFile { .. })));
    }

    #[test]
    fn test_trailing_backslash() {
        let mut lexer = Lexer::new(ByteSource::with_capacity(&b"a\\"[..], 16));
        assert_eq!(lexer.next_token().unwrap(), Token::Literal(b'a'));
        assert_eq!(lexer.next_token().unwrap(), Token::EndOfStream);
    }

    #[test]
    fn test_keyword_at_end_of_input() {
        let mut lexer = Lexer::new(ByteSource::with_capacity(&br"{\b"[..], 16));
        assert_eq!(lexer.next_token().unwrap(), Token::GroupOpen);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::ControlWord { name: b"b", arg: None }
        );
        assert_eq!(lexer.next_token().unwrap(), Token::EndOfStream);
    }
}
