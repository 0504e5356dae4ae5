//! Lexical analysis for Backseat assembly
//!
//! Converts source text into a stream of line-oriented tokens.

mod scanner;
mod source_location;
mod token;

pub use scanner::Lexer;
pub use source_location::SourceLocation;
pub use token::{Token, TokenKind};
