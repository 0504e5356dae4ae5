use super::source_location::SourceLocation;
use super::token::{Token, TokenKind};
use crate::error::{Error, Result};
use crate::isa::{Register, Word};

/// Pull-based lexer for assembly source
///
/// Produces one token per call. Line breaks are significant and come out as
/// [`TokenKind::Newline`]; `;` starts a comment running to the end of the
/// line. After the synthetic [`TokenKind::EndOfInput`] token every further
/// call fails with [`Error::InputExhausted`].
pub struct Lexer<'a> {
    /// Name reported in source locations
    filename: &'a str,
    /// Source text
    source: &'a str,
    /// Byte offset of the current character
    index: usize,
    /// Current line number (1-indexed)
    row: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Whether `EndOfInput` has been handed out
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`
    pub fn new(filename: &'a str, source: &'a str) -> Self {
        Lexer {
            filename,
            source,
            index: 0,
            row: 1,
            column: 1,
            exhausted: false,
        }
    }

    /// Scans all tokens through `EndOfInput` and returns them as a vector
    pub fn tokenize(mut self) -> Result<'a, Vec<Token<'a>>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Produces the next token
    pub fn next_token(&mut self) -> Result<'a, Token<'a>> {
        let token = self.scan_token()?;
        tracing::trace!(kind = %token.kind, lexeme = token.lexeme(), "token");
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<'a, Token<'a>> {
        if self.exhausted {
            return Err(Error::InputExhausted);
        }

        loop {
            while self.peek().is_some_and(is_inline_whitespace) {
                self.advance();
            }

            match self.peek() {
                // Comments run to the end of the line; the newline itself is kept
                Some(';') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }

        let Some(c) = self.peek() else {
            self.exhausted = true;
            return Ok(Token::new(
                TokenKind::EndOfInput,
                self.current_source_location(0),
            ));
        };

        match c {
            '\n' => Ok(self.single_char_token(TokenKind::Newline)),
            ',' => Ok(self.single_char_token(TokenKind::Comma)),
            '*' => Ok(self.single_char_token(TokenKind::Asterisk)),
            c if c.is_ascii_digit() => self.scan_integer(),
            c if is_identifier_start(c) => Ok(self.scan_identifier()),
            c => Err(Error::InvalidChar {
                location: self.current_source_location(c.len_utf8()),
            }),
        }
    }

    fn single_char_token(&mut self, kind: TokenKind) -> Token<'a> {
        let token = Token::new(kind, self.current_source_location(1));
        self.advance();
        token
    }

    /// Longest match of `0x[0-9A-Fa-f]+` or `[0-9]+`
    fn scan_integer(&mut self) -> Result<'a, Token<'a>> {
        let (start, row, column) = (self.index, self.row, self.column);

        let is_hex = self.source[self.index..].starts_with("0x");
        let radix = if is_hex {
            self.advance();
            self.advance();
            16
        } else {
            10
        };

        let digits_start = self.index;
        while self.peek().is_some_and(|c| c.is_digit(radix)) {
            self.advance();
        }

        let location = self.source_location_from(start, row, column);
        let digits = &self.source[digits_start..self.index];
        match Word::from_str_radix(digits, radix) {
            Ok(value) => Ok(Token::new(TokenKind::Integer(value), location)),
            Err(_) => Err(Error::InvalidInteger { location }),
        }
    }

    fn scan_identifier(&mut self) -> Token<'a> {
        let (start, row, column) = (self.index, self.row, self.column);

        self.advance();
        while self.peek().is_some_and(is_identifier_continuation) {
            self.advance();
        }

        let location = self.source_location_from(start, row, column);
        let kind = match Register::from_name(location.lexeme()) {
            Some(register) => TokenKind::Register(register),
            None => TokenKind::Identifier,
        };
        Token::new(kind, location)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.index..].chars().next()
    }

    fn advance(&mut self) {
        let Some(c) = self.peek() else {
            return;
        };
        if c == '\n' {
            self.row += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.index += c.len_utf8();
    }

    fn current_source_location(&self, length: usize) -> SourceLocation<'a> {
        SourceLocation::new(
            self.filename,
            self.source,
            self.index,
            length,
            self.row,
            self.column,
        )
    }

    fn source_location_from(&self, start: usize, row: usize, column: usize) -> SourceLocation<'a> {
        SourceLocation::new(
            self.filename,
            self.source,
            start,
            self.index - start,
            row,
            column,
        )
    }
}

/// Whitespace inside a line; vertical tab counts, the line break does not
fn is_inline_whitespace(c: char) -> bool {
    c != '\n' && (c.is_ascii_whitespace() || c == '\x0B')
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_identifier_continuation(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
