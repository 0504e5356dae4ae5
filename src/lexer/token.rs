use serde::Serialize;
use std::fmt;

use super::SourceLocation;
use crate::isa::{Register, Word};

/// A single token from the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The type of token
    pub kind: TokenKind,
    /// Where the token appears
    pub location: SourceLocation<'a>,
}

impl<'a> Token<'a> {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, location: SourceLocation<'a>) -> Self {
        Token { kind, location }
    }

    /// Original text of the token
    pub fn lexeme(&self) -> &'a str {
        self.location.lexeme()
    }
}

/// All possible token types
///
/// Integers and registers carry their value, recovered once by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// `*`
    Asterisk,
    /// Decimal or `0x`-prefixed hexadecimal integer literal
    Integer(Word),
    /// Identifier that does not name a register
    Identifier,
    /// `,`
    Comma,
    /// Line break, which separates statements
    Newline,
    /// Register name
    Register(Register),
    /// End of input marker
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Asterisk => write!(f, "`*`"),
            TokenKind::Integer(value) => write!(f, "integer {}", value),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Register(register) => write!(f, "register {}", register),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}
