//! Error types for the Backseat toolchain
//!
//! Three families live here:
//!
//! - [`Error`]: the closed set of assembly errors (lexing, parsing, lowering).
//!   All of them are reportable; [`Error::InputExhausted`] is the normal
//!   end-of-program signal for callers pulling one instruction at a time.
//! - [`DecodeError`]: a malformed binary image. Not part of the assembly
//!   taxonomy; it means the image is corrupt.
//! - [`Fault`]: misuse of the emulator or a fatal machine condition.

use thiserror::Error;

use crate::isa::Opcode;
use crate::lexer::{SourceLocation, Token};

/// Assembly errors
///
/// Payloads borrow the source buffer so a diagnostic can point back into it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<'a> {
    /// Clean end of input reached while pulling the next unit
    #[error("Input exhausted.")]
    InputExhausted,

    /// Character outside the grammar
    ///
    /// **Example:** `copy 5, $A`
    #[error("Invalid character: '{}'", .location.lexeme())]
    InvalidChar {
        /// Location of the offending character
        location: SourceLocation<'a>,
    },

    /// Integer literal that does not fit a word or has no digits
    ///
    /// **Example:** `copy 0x100000000, A`, `copy 0x, A`
    #[error("Invalid integer: '{}'", .location.lexeme())]
    InvalidInteger {
        /// Location of the literal
        location: SourceLocation<'a>,
    },

    /// A token where a different kind was required
    ///
    /// **Example:** `, halt` (statement must start with a mnemonic)
    #[error("Unexpected token: '{}'. {message}", .token.lexeme())]
    UnexpectedToken {
        /// The offending token
        token: Token<'a>,
        /// What was expected instead
        message: String,
    },

    /// Wrong number of operands for a mnemonic
    ///
    /// **Example:** `halt A`
    #[error(
        "Arity mismatch for mnemonic '{}'. Expected {expected}, but got {actual}.",
        .mnemonic.lexeme()
    )]
    ArityMismatch {
        /// The mnemonic token
        mnemonic: Token<'a>,
        /// Operand count the mnemonic takes
        expected: usize,
        /// Operand count supplied
        actual: usize,
    },

    /// Operands of the wrong kind or shape
    ///
    /// **Example:** `copy A, B`, `copy 5, **A`
    #[error("Invalid operands for mnemonic '{}'.", .mnemonic.lexeme())]
    InvalidOperands {
        /// The mnemonic token
        mnemonic: Token<'a>,
    },

    /// Mnemonic outside the instruction set
    ///
    /// **Example:** `jmp A`
    #[error("Unknown mnemonic: '{}'", .mnemonic.lexeme())]
    UnknownMnemonic {
        /// The mnemonic token
        mnemonic: Token<'a>,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Corrupt image or emulator misuse; abort
    Fatal,
    /// User-facing error in the source program; report and stop assembling
    Recoverable,
    /// Normal termination signal, not a failure
    Expected,
}

impl<'a> Error<'a> {
    /// Location the error points at, if it carries one
    pub fn source_location(&self) -> Option<SourceLocation<'a>> {
        match self {
            Error::InputExhausted => None,
            Error::InvalidChar { location } | Error::InvalidInteger { location } => {
                Some(*location)
            }
            Error::UnexpectedToken { token, .. } => Some(token.location),
            Error::ArityMismatch { mnemonic, .. }
            | Error::InvalidOperands { mnemonic }
            | Error::UnknownMnemonic { mnemonic } => Some(mnemonic.location),
        }
    }

    /// Whether this is the clean end-of-input signal
    pub fn is_input_exhausted(&self) -> bool {
        matches!(self, Error::InputExhausted)
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::InputExhausted => ErrorSeverity::Expected,
            _ => ErrorSeverity::Recoverable,
        }
    }
}

/// Result type for assembly operations
pub type Result<'a, T> = std::result::Result<T, Error<'a>>;

/// Malformed binary image
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// No bytes left where an opcode was expected
    #[error("Unexpected end of instruction stream")]
    UnexpectedEnd,

    /// Opcode byte outside the opcode table
    #[error("Invalid opcode: 0x{opcode:02x}")]
    UnknownOpcode {
        /// The raw byte
        opcode: u8,
    },

    /// Fewer bytes left than the opcode's layout needs
    #[error("Truncated {opcode} instruction: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Opcode of the partial instruction
        opcode: Opcode,
        /// Full encoded length
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// Register ordinal outside the register file
    #[error("Invalid register ordinal: {ordinal}")]
    UnknownRegister {
        /// The raw byte
        ordinal: u8,
    },
}

impl DecodeError {
    /// Malformed images are always fatal
    pub fn classify(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}

/// Fatal emulator condition
///
/// A fault leaves the machine state exactly as it was before the failing
/// step.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `step` called after the machine halted
    #[error("Emulator is halted")]
    Halted,

    /// The bytes at the instruction pointer do not decode
    #[error("Failed to decode instruction at address {address}: {source}")]
    Decode {
        /// Instruction pointer at the time of the fetch
        address: usize,
        /// Underlying decode failure
        source: DecodeError,
    },

    /// Memory write outside the machine's memory
    #[error("Access violation: {length} bytes at address {address} (memory size {memory_size})")]
    AccessViolation {
        /// Target address
        address: usize,
        /// Bytes written
        length: usize,
        /// Total memory size
        memory_size: usize,
    },

    /// `run` did not halt within its step budget
    #[error("Execution limit exceeded (max: {limit} steps)")]
    StepLimitExceeded {
        /// Maximum allowed steps
        limit: usize,
    },
}

impl Fault {
    /// Faults are always fatal
    pub fn classify(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn token(source: &str, offset: usize, length: usize, kind: TokenKind) -> Token<'_> {
        Token::new(
            kind,
            SourceLocation::new("test.asm", source, offset, length, 1, offset + 1),
        )
    }

    #[test]
    fn test_messages() {
        let source = "halt A";
        let mnemonic = token(source, 0, 4, TokenKind::Identifier);

        let err = Error::ArityMismatch {
            mnemonic,
            expected: 0,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Arity mismatch for mnemonic 'halt'. Expected 0, but got 1."
        );
        assert_eq!(
            Error::UnknownMnemonic { mnemonic }.to_string(),
            "Unknown mnemonic: 'halt'"
        );
        assert_eq!(Error::InputExhausted.to_string(), "Input exhausted.");
    }

    #[test]
    fn test_source_location_resolution() {
        let source = "copy $";
        let mnemonic = token(source, 0, 4, TokenKind::Identifier);
        let location = SourceLocation::new("test.asm", source, 5, 1, 1, 6);

        let err = Error::InvalidChar { location };
        assert_eq!(err.source_location(), Some(location));
        assert_eq!(err.to_string(), "Invalid character: '$'");

        let err = Error::InvalidOperands { mnemonic };
        assert_eq!(err.source_location().map(|l| l.column()), Some(1));

        assert_eq!(Error::InputExhausted.source_location(), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Error::InputExhausted.classify(), ErrorSeverity::Expected);
        assert!(Error::InputExhausted.is_input_exhausted());
        assert_eq!(Fault::Halted.classify(), ErrorSeverity::Fatal);
        assert_eq!(DecodeError::UnexpectedEnd.classify(), ErrorSeverity::Fatal);
    }

    #[test]
    fn test_fault_messages() {
        let fault = Fault::Decode {
            address: 1920,
            source: DecodeError::UnknownOpcode { opcode: 0x2a },
        };
        assert_eq!(
            fault.to_string(),
            "Failed to decode instruction at address 1920: Invalid opcode: 0x2a"
        );
    }
}
