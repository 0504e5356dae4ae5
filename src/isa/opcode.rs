use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Pointer, Register, Word};

/// One-byte tag identifying an encoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    /// Stops the machine
    HaltAndCatchFire = 0,
    /// Loads an immediate into a register
    MoveImmediateIntoRegister = 1,
    /// Stores an immediate at the address held by a register
    MoveImmediateIntoMemory = 2,
}

impl Opcode {
    /// Every opcode in encoding order
    pub const ALL: [Opcode; 3] = [
        Opcode::HaltAndCatchFire,
        Opcode::MoveImmediateIntoRegister,
        Opcode::MoveImmediateIntoMemory,
    ];

    /// Looks up the opcode for a raw byte
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|opcode| opcode.byte() == byte)
    }

    /// Raw byte written at the start of an encoded instruction
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Total encoded length of an instruction with this opcode, opcode byte included
    pub const fn byte_length(self) -> usize {
        match self {
            Opcode::HaltAndCatchFire => 1,
            Opcode::MoveImmediateIntoRegister => {
                1 + std::mem::size_of::<Word>() + Register::BYTE_LENGTH
            }
            Opcode::MoveImmediateIntoMemory => {
                1 + std::mem::size_of::<Word>() + Pointer::BYTE_LENGTH
            }
        }
    }

    /// Variant name used by instruction listings
    pub fn name(self) -> &'static str {
        match self {
            Opcode::HaltAndCatchFire => "HaltAndCatchFire",
            Opcode::MoveImmediateIntoRegister => "MoveImmediateIntoRegister",
            Opcode::MoveImmediateIntoMemory => "MoveImmediateIntoMemory",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
