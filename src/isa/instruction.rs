use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Opcode, Pointer, Register, Word};

/// Stops the machine. Encoded as the bare opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HaltAndCatchFire;

/// `copy <immediate>, <register>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveImmediateIntoRegister {
    /// Value loaded into the register
    pub immediate: Word,
    /// Destination register
    pub register: Register,
}

/// `copy <immediate>, *<register>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveImmediateIntoMemory {
    /// Value stored little-endian at the target address
    pub immediate: Word,
    /// Register holding the target address
    pub pointer: Pointer,
}

impl MoveImmediateIntoRegister {
    /// Creates a register load
    pub fn new(immediate: Word, register: Register) -> Self {
        MoveImmediateIntoRegister {
            immediate,
            register,
        }
    }
}

impl MoveImmediateIntoMemory {
    /// Creates a memory store through `pointer`
    pub fn new(immediate: Word, pointer: Pointer) -> Self {
        MoveImmediateIntoMemory { immediate, pointer }
    }
}

/// A lowered, fixed-layout machine instruction
///
/// The set is closed: every variant has a fixed [`Opcode`] and byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// See [`HaltAndCatchFire`]
    HaltAndCatchFire(HaltAndCatchFire),
    /// See [`MoveImmediateIntoRegister`]
    MoveImmediateIntoRegister(MoveImmediateIntoRegister),
    /// See [`MoveImmediateIntoMemory`]
    MoveImmediateIntoMemory(MoveImmediateIntoMemory),
}

impl Instruction {
    /// Opcode tagging this instruction's encoding
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::HaltAndCatchFire(_) => Opcode::HaltAndCatchFire,
            Instruction::MoveImmediateIntoRegister(_) => Opcode::MoveImmediateIntoRegister,
            Instruction::MoveImmediateIntoMemory(_) => Opcode::MoveImmediateIntoMemory,
        }
    }

    /// Encoded length in bytes
    pub fn byte_length(&self) -> usize {
        self.opcode().byte_length()
    }

    /// Listing line in the form `0x01 - MoveImmediateIntoRegister - 5 (0x00000005) into A`
    pub fn describe(&self) -> String {
        let opcode = self.opcode();
        let head = format!("0x{:02x} - {}", opcode.byte(), opcode);
        match self {
            Instruction::HaltAndCatchFire(_) => head,
            Instruction::MoveImmediateIntoRegister(inst) => format!(
                "{} - {} (0x{:08x}) into {}",
                head, inst.immediate, inst.immediate, inst.register
            ),
            Instruction::MoveImmediateIntoMemory(inst) => format!(
                "{} - {} (0x{:08x}) into {}",
                head, inst.immediate, inst.immediate, inst.pointer
            ),
        }
    }
}

impl From<HaltAndCatchFire> for Instruction {
    fn from(inst: HaltAndCatchFire) -> Self {
        Instruction::HaltAndCatchFire(inst)
    }
}

impl From<MoveImmediateIntoRegister> for Instruction {
    fn from(inst: MoveImmediateIntoRegister) -> Self {
        Instruction::MoveImmediateIntoRegister(inst)
    }
}

impl From<MoveImmediateIntoMemory> for Instruction {
    fn from(inst: MoveImmediateIntoMemory) -> Self {
        Instruction::MoveImmediateIntoMemory(inst)
    }
}

/// Renders the instruction as assembly source that assembles back to itself
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::HaltAndCatchFire(_) => write!(f, "halt"),
            Instruction::MoveImmediateIntoRegister(inst) => {
                write!(f, "copy {}, {}", inst.immediate, inst.register)
            }
            Instruction::MoveImmediateIntoMemory(inst) => {
                write!(f, "copy 0x{:08X}, {}", inst.immediate, inst.pointer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_rendering() {
        let halt = Instruction::from(HaltAndCatchFire);
        assert_eq!(halt.to_string(), "halt");

        let load = Instruction::from(MoveImmediateIntoRegister::new(5, Register::A));
        assert_eq!(load.to_string(), "copy 5, A");

        let store = Instruction::from(MoveImmediateIntoMemory::new(
            0x6C6C6548,
            Pointer::new(Register::A),
        ));
        assert_eq!(store.to_string(), "copy 0x6C6C6548, *A");
    }

    #[test]
    fn test_describe() {
        let load = Instruction::from(MoveImmediateIntoRegister::new(5, Register::A));
        assert_eq!(
            load.describe(),
            "0x01 - MoveImmediateIntoRegister - 5 (0x00000005) into A"
        );

        let store = Instruction::from(MoveImmediateIntoMemory::new(33, Pointer::new(Register::B)));
        assert_eq!(
            store.describe(),
            "0x02 - MoveImmediateIntoMemory - 33 (0x00000021) into *B"
        );

        assert_eq!(
            Instruction::from(HaltAndCatchFire).describe(),
            "0x00 - HaltAndCatchFire"
        );
    }
}
