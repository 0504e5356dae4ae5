//! Lowering of parsed statements into typed instructions
//!
//! Dispatch is on the exact mnemonic text. Every operand shape the grammar
//! can produce ends in either a typed instruction or one of
//! [`Error::ArityMismatch`], [`Error::InvalidOperands`] and
//! [`Error::UnknownMnemonic`].

use super::ast::{Instruction, Operand};
use crate::error::{Error, Result};
use crate::isa::{
    self, HaltAndCatchFire, MoveImmediateIntoMemory, MoveImmediateIntoRegister, Pointer,
};

impl<'a> Instruction<'a> {
    /// Converts the statement into its typed instruction
    pub fn lower(&self) -> Result<'a, isa::Instruction> {
        match self.mnemonic_name() {
            "halt" if self.operands.is_empty() => Ok(HaltAndCatchFire.into()),
            "halt" => Err(self.arity_mismatch(0)),
            "copy" => self.lower_copy(),
            _ => Err(Error::UnknownMnemonic {
                mnemonic: self.mnemonic,
            }),
        }
    }

    /// `copy <immediate>, <register>` or `copy <immediate>, *<register>`
    fn lower_copy(&self) -> Result<'a, isa::Instruction> {
        let [source, destination] = self.operands.as_slice() else {
            return Err(self.arity_mismatch(2));
        };

        match (source, destination) {
            (Operand::Immediate { value, .. }, Operand::Register { register, .. }) => {
                Ok(MoveImmediateIntoRegister::new(*value, *register).into())
            }
            (Operand::Immediate { value, .. }, Operand::Pointer { pointee, .. }) => {
                match pointee.as_ref() {
                    Operand::Register { register, .. } => {
                        Ok(MoveImmediateIntoMemory::new(*value, Pointer::new(*register)).into())
                    }
                    _ => Err(self.invalid_operands()),
                }
            }
            _ => Err(self.invalid_operands()),
        }
    }

    fn arity_mismatch(&self, expected: usize) -> Error<'a> {
        Error::ArityMismatch {
            mnemonic: self.mnemonic,
            expected,
            actual: self.operands.len(),
        }
    }

    fn invalid_operands(&self) -> Error<'a> {
        Error::InvalidOperands {
            mnemonic: self.mnemonic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Register;
    use crate::parser::Parser;

    fn lower(source: &str) -> Result<'_, isa::Instruction> {
        let mut parser = Parser::new("test.asm", source);
        parser.next_instruction()?.lower()
    }

    #[test]
    fn test_lower_halt() {
        assert_eq!(lower("halt").unwrap(), isa::Instruction::from(HaltAndCatchFire));
    }

    #[test]
    fn test_halt_arity() {
        let err = lower("halt A").unwrap_err();
        assert!(matches!(
            err,
            Error::ArityMismatch {
                expected: 0,
                actual: 1,
                ..
            }
        ));

        let err = lower("halt 1, 2, 3").unwrap_err();
        assert!(matches!(
            err,
            Error::ArityMismatch {
                expected: 0,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_lower_copy_into_register() {
        assert_eq!(
            lower("copy 5, A").unwrap(),
            isa::Instruction::from(MoveImmediateIntoRegister::new(5, Register::A))
        );
    }

    #[test]
    fn test_lower_copy_into_memory() {
        assert_eq!(
            lower("copy 0x6C6C6548, *A").unwrap(),
            isa::Instruction::from(MoveImmediateIntoMemory::new(
                0x6C6C6548,
                Pointer::new(Register::A)
            ))
        );
    }

    #[test]
    fn test_copy_arity() {
        for source in ["copy", "copy 5", "copy 5, A, B"] {
            let err = lower(source).unwrap_err();
            assert!(
                matches!(err, Error::ArityMismatch { expected: 2, .. }),
                "{source}: {err:?}"
            );
        }
    }

    #[test]
    fn test_copy_invalid_shapes() {
        for source in [
            "copy A, B",
            "copy 5, 6",
            "copy 5, label",
            "copy label, A",
            "copy *A, 5",
            "copy *A, B",
            "copy 5, *label",
            "copy 5, *5",
            "copy 5, **A",
        ] {
            let err = lower(source).unwrap_err();
            match err {
                Error::InvalidOperands { mnemonic } => assert_eq!(mnemonic.lexeme(), "copy"),
                other => panic!("{source}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_deep_pointer_nesting_is_rejected() {
        let source = format!("copy 1, {}A", "*".repeat(100_000));
        match lower(&source).unwrap_err() {
            Error::InvalidOperands { mnemonic } => assert_eq!(mnemonic.lexeme(), "copy"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_mnemonic() {
        let err = lower("jmp A").unwrap_err();
        assert!(matches!(err, Error::UnknownMnemonic { mnemonic } if mnemonic.lexeme() == "jmp"));

        // No case folding
        assert!(matches!(
            lower("HALT").unwrap_err(),
            Error::UnknownMnemonic { .. }
        ));
    }
}
