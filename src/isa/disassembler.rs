//! # Image Disassembler
//!
//! Walks a flat instruction image and recovers one listing entry per
//! instruction, keeping the byte offset of each.

use serde::Serialize;

use super::{Instruction, Opcode};
use crate::error::DecodeError;

/// Disassembled instruction with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisassembledInstr {
    /// Instruction offset in bytes from the start of the image
    pub offset: usize,
    /// Raw opcode
    pub opcode: Opcode,
    /// Decoded instruction
    pub instruction: Instruction,
}

impl DisassembledInstr {
    /// Format as assembly source
    pub fn to_asm(&self) -> String {
        self.instruction.to_string()
    }

    /// Check if this instruction stops the machine
    pub fn is_halt(&self) -> bool {
        self.opcode == Opcode::HaltAndCatchFire
    }

    /// Check if this instruction writes through a pointer
    pub fn writes_memory(&self) -> bool {
        self.opcode == Opcode::MoveImmediateIntoMemory
    }

    /// Offset of the instruction that follows this one
    pub fn next_offset(&self) -> usize {
        self.offset + self.instruction.byte_length()
    }
}

/// Disassemble an image into a listing
pub fn disassemble(bytes: &[u8]) -> Result<Vec<DisassembledInstr>, DecodeError> {
    let mut listing = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let instruction = Instruction::decode(&bytes[offset..])?;
        let entry = DisassembledInstr {
            offset,
            opcode: instruction.opcode(),
            instruction,
        };
        offset = entry.next_offset();
        listing.push(entry);
    }

    Ok(listing)
}

/// Render a listing back into assembly source, one instruction per line
pub fn to_source(listing: &[DisassembledInstr]) -> String {
    listing
        .iter()
        .map(DisassembledInstr::to_asm)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_offsets() {
        let image = [
            0x01, 0x0C, 0x00, 0x00, 0x00, 0x00, // copy 12, A
            0x02, 0x21, 0x00, 0x00, 0x00, 0x00, // copy 0x21, *A
            0x00, // halt
        ];
        let listing = disassemble(&image).unwrap();

        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].offset, 0);
        assert_eq!(listing[1].offset, 6);
        assert_eq!(listing[2].offset, 12);
        assert!(listing[1].writes_memory());
        assert!(listing[2].is_halt());
        assert_eq!(
            to_source(&listing),
            "copy 12, A\ncopy 0x00000021, *A\nhalt"
        );
    }

    #[test]
    fn test_disassemble_truncated_tail() {
        let image = [0x00, 0x02, 0x21];
        assert!(matches!(
            disassemble(&image),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_listing_serializes() {
        let listing = disassemble(&[0x00]).unwrap();
        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.contains("\"offset\":0"));
        assert!(json.contains("HaltAndCatchFire"));
    }
}
