//! Hand-written tokenizer: pull one [`Token`] at a time from source text.
//!
//! There is no separate pre-pass; the parser drives this directly, one
//! token ahead, the same way the token stream is consumed throughout the
//! front end.

use mshade::constants::MAX_NAME_LEN;
use mshade::LoadError;

use crate::token::Token;

pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    pub line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source: source.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> u8 {
        *self.source.get(self.pos).unwrap_or(&0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        *self.source.get(self.pos + offset).unwrap_or(&0)
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.pos < self.source.len() && self.peek().is_ascii_whitespace() {
                if self.peek() == b'\n' {
                    self.line += 1;
                }
                self.pos += 1;
            }
            if self.peek() == b'/' && self.peek_at(1) == b'/' {
                while self.pos < self.source.len() && self.peek() != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    /// Reads and returns the next token, advancing past it.
    pub fn next_token(&mut self) -> Result<Token, LoadError> {
        self.skip_trivia();

        if self.pos >= self.source.len() {
            return Ok(Token::Eof);
        }

        let c = self.peek();

        if c.is_ascii_alphabetic() {
            return self.lex_name();
        }

        // A leading `-` directly against a digit lexes as a negative
        // numeric literal rather than a unary-minus punctuation token;
        // `- 1` (with a space) does not. This mirrors the original
        // tokenizer and is preserved deliberately, quirk and all.
        if c.is_ascii_digit() || (c == b'-' && self.peek_at(1).is_ascii_digit()) {
            return Ok(self.lex_number());
        }

        self.pos += 1;
        Ok(Token::Punct(c))
    }

    fn lex_name(&mut self) -> Result<Token, LoadError> {
        let start = self.pos;
        while self.pos < self.source.len() && self.peek().is_ascii_alphanumeric() {
            self.pos += 1;
        }
        if self.pos - start > MAX_NAME_LEN {
            return Err(LoadError::NameTooLong {
                line: self.line,
                limit: MAX_NAME_LEN,
            });
        }
        let text = std::str::from_utf8(&self.source[start..self.pos])
            .expect("identifiers are restricted to ASCII bytes");
        Ok(Token::Name(text.to_string()))
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        if self.peek() == b'-' {
            self.pos += 1;
        }
        while self.peek().is_ascii_digit() {
            self.pos += 1;
        }
        if self.peek() == b'.' {
            self.pos += 1;
            while self.peek().is_ascii_digit() {
                self.pos += 1;
            }
        }
        if self.peek() == b'e' || self.peek() == b'E' {
            let mark = self.pos;
            self.pos += 1;
            if self.peek() == b'+' || self.peek() == b'-' {
                self.pos += 1;
            }
            if self.peek().is_ascii_digit() {
                while self.peek().is_ascii_digit() {
                    self.pos += 1;
                }
            } else {
                self.pos = mark;
            }
        }
        let text = std::str::from_utf8(&self.source[start..self.pos])
            .expect("numeric literals are restricted to ASCII bytes");
        Token::Number(text.parse().unwrap_or(f32::NAN))
    }
}
