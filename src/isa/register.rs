use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

/// General purpose registers of the machine
///
/// Each register holds one [`Word`](super::Word). In the binary encoding a
/// register is written as its one-byte ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    /// Register `A` (ordinal 0)
    A = 0,
    /// Register `B` (ordinal 1)
    B = 1,
    /// Register `C` (ordinal 2)
    C = 2,
    /// Register `D` (ordinal 3)
    D = 3,
}

impl Register {
    /// All registers in ordinal order
    pub const ALL: [Register; 4] = [Register::A, Register::B, Register::C, Register::D];

    /// Number of registers in the register file
    pub const COUNT: usize = Self::ALL.len();

    /// Size of an encoded register operand in bytes
    pub const BYTE_LENGTH: usize = 1;

    /// One-byte ordinal used by the binary encoding
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Index into a register file array
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up a register by its exact, case-sensitive name
    pub fn from_name(name: &str) -> Option<Register> {
        Register::ALL
            .into_iter()
            .find(|register| register.name() == name)
    }

    /// Symbolic name as written in assembly source
    pub fn name(self) -> &'static str {
        match self {
            Register::A => "A",
            Register::B => "B",
            Register::C => "C",
            Register::D => "D",
        }
    }
}

impl TryFrom<u8> for Register {
    type Error = DecodeError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Register::A),
            1 => Ok(Register::B),
            2 => Ok(Register::C),
            3 => Ok(Register::D),
            _ => Err(DecodeError::UnknownRegister { ordinal }),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One level of indirection through a register
///
/// The address is not stored; it is read from the register when the
/// instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pointer(Register);

impl Pointer {
    /// Size of an encoded pointer operand in bytes
    pub const BYTE_LENGTH: usize = Register::BYTE_LENGTH;

    /// Creates a pointer through `register`
    pub fn new(register: Register) -> Self {
        Pointer(register)
    }

    /// The register holding the target address
    pub fn register(self) -> Register {
        self.0
    }
}

impl From<Register> for Pointer {
    fn from(register: Register) -> Self {
        Pointer(register)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "*{}", self.0)
    }
}
