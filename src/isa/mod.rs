//! Instruction set of the machine
//!
//! Typed instructions, their fixed binary layout, and a disassembler for
//! flat instruction images.

pub mod codec;
pub mod disassembler;
mod instruction;
mod opcode;
mod register;

pub use codec::{decode_all, encode_all, Encoding};
pub use disassembler::{disassemble, DisassembledInstr};
pub use instruction::{
    HaltAndCatchFire, Instruction, MoveImmediateIntoMemory, MoveImmediateIntoRegister,
};
pub use opcode::Opcode;
pub use register::{Pointer, Register};

/// Machine word: the width of registers and immediates
pub type Word = u32;
