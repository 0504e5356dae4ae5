//! Human-readable rendering of assembly errors
//!
//! ```text
//! hello.asm:2:9: Invalid character: '$'
//! copy 5, $A
//!         ^
//! ```

use std::fmt;

use crate::error::Error;
use crate::lexer::SourceLocation;

/// An error message paired with the source span it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic<'a> {
    message: String,
    location: Option<SourceLocation<'a>>,
}

impl<'a> Diagnostic<'a> {
    /// Captures the message and location of `error`
    pub fn from_error(error: &Error<'a>) -> Self {
        Diagnostic {
            message: error.to_string(),
            location: error.source_location(),
        }
    }

    /// The bare error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the error points, if anywhere
    pub fn location(&self) -> Option<SourceLocation<'a>> {
        self.location
    }

    /// Renders `file:row:column: message`, the offending line and a caret
    /// line underneath the lexeme
    ///
    /// Errors without a location render as the message alone.
    pub fn render(&self) -> String {
        let Some(location) = self.location else {
            return self.message.clone();
        };

        let line = location.surrounding_line();
        let highlight = {
            // Tabs are kept so the caret lines up under tab-indented source
            let mut buf: String = line
                .chars()
                .take(location.column().saturating_sub(1))
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            buf.push('^');
            let squiggle_len = location.lexeme().chars().count().saturating_sub(1);
            buf.extend(std::iter::repeat('~').take(squiggle_len));
            buf
        };

        format!("{location}: {}\n{line}\n{highlight}", self.message)
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<'a> From<&Error<'a>> for Diagnostic<'a> {
    fn from(error: &Error<'a>) -> Self {
        Diagnostic::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;

    fn render(source: &str) -> String {
        let err = assemble("test.asm", source).unwrap_err();
        Diagnostic::from_error(&err).render()
    }

    #[test]
    fn test_caret_under_invalid_char() {
        assert_eq!(
            render("halt\ncopy 5, $A"),
            "test.asm:2:9: Invalid character: '$'\ncopy 5, $A\n        ^"
        );
    }

    #[test]
    fn test_squiggle_spans_lexeme() {
        assert_eq!(
            render("copy 5, A\n  frobnicate A"),
            "test.asm:2:3: Unknown mnemonic: 'frobnicate'\n  frobnicate A\n  ^~~~~~~~~~"
        );
    }

    #[test]
    fn test_tab_indentation_preserved() {
        let rendered = render("\thalt 1");
        assert!(rendered.ends_with("\n\thalt 1\n\t^~~~"), "{rendered}");
    }

    #[test]
    fn test_crlf_source_renders_clean_line() {
        assert_eq!(
            render("copy 5, $A\r\nhalt\r\n"),
            "test.asm:1:9: Invalid character: '$'\ncopy 5, $A\n        ^"
        );
        assert_eq!(
            render("halt\r\ncopy 5, *label\r\n"),
            "test.asm:2:1: Invalid operands for mnemonic 'copy'.\ncopy 5, *label\n^~~~"
        );
    }

    #[test]
    fn test_message_only_without_location() {
        let diagnostic = Diagnostic::from_error(&Error::InputExhausted);
        assert_eq!(diagnostic.location(), None);
        assert_eq!(diagnostic.render(), "Input exhausted.");
        assert_eq!(diagnostic.to_string(), diagnostic.render());
    }
}
