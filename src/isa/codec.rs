//! Fixed-layout little-endian binary encoding
//!
//! Every instruction is written opcode first, then its fields in declaration
//! order. Multi-byte integers are little-endian; registers and pointers take
//! one byte each. An image is a flat concatenation of encoded instructions.

use super::instruction::{
    HaltAndCatchFire, Instruction, MoveImmediateIntoMemory, MoveImmediateIntoRegister,
};
use super::{Opcode, Pointer, Register, Word};
use crate::error::DecodeError;

/// Binary layout of a single instruction variant
pub trait Encoding: Sized {
    /// Opcode written in the first byte
    const OPCODE: Opcode;

    /// Total encoded length, opcode included
    const BYTE_LENGTH: usize = Self::OPCODE.byte_length();

    /// Writes exactly `BYTE_LENGTH` bytes into the front of `buffer`
    ///
    /// `buffer` must hold at least `BYTE_LENGTH` bytes.
    fn encode_into(&self, buffer: &mut [u8]);

    /// Reads the variant from the front of `buffer`
    ///
    /// The caller has already matched the opcode byte and supplies at least
    /// `BYTE_LENGTH` bytes.
    fn decode(buffer: &[u8]) -> Result<Self, DecodeError>;
}

fn write_word(value: Word, buffer: &mut [u8]) {
    buffer[..4].copy_from_slice(&value.to_le_bytes());
}

fn read_word(buffer: &[u8]) -> Word {
    Word::from_le_bytes([buffer[0], buffer[1], buffer[2], buffer[3]])
}

const IMMEDIATE_OFFSET: usize = 1;
const OPERAND_OFFSET: usize = IMMEDIATE_OFFSET + std::mem::size_of::<Word>();

impl Encoding for HaltAndCatchFire {
    const OPCODE: Opcode = Opcode::HaltAndCatchFire;

    fn encode_into(&self, buffer: &mut [u8]) {
        buffer[0] = Self::OPCODE.byte();
    }

    fn decode(buffer: &[u8]) -> Result<Self, DecodeError> {
        debug_assert_eq!(buffer[0], Self::OPCODE.byte());
        Ok(HaltAndCatchFire)
    }
}

impl Encoding for MoveImmediateIntoRegister {
    const OPCODE: Opcode = Opcode::MoveImmediateIntoRegister;

    fn encode_into(&self, buffer: &mut [u8]) {
        buffer[0] = Self::OPCODE.byte();
        write_word(self.immediate, &mut buffer[IMMEDIATE_OFFSET..]);
        buffer[OPERAND_OFFSET] = self.register.ordinal();
    }

    fn decode(buffer: &[u8]) -> Result<Self, DecodeError> {
        debug_assert_eq!(buffer[0], Self::OPCODE.byte());
        let immediate = read_word(&buffer[IMMEDIATE_OFFSET..]);
        let register = Register::try_from(buffer[OPERAND_OFFSET])?;
        Ok(MoveImmediateIntoRegister::new(immediate, register))
    }
}

impl Encoding for MoveImmediateIntoMemory {
    const OPCODE: Opcode = Opcode::MoveImmediateIntoMemory;

    fn encode_into(&self, buffer: &mut [u8]) {
        buffer[0] = Self::OPCODE.byte();
        write_word(self.immediate, &mut buffer[IMMEDIATE_OFFSET..]);
        buffer[OPERAND_OFFSET] = self.pointer.register().ordinal();
    }

    fn decode(buffer: &[u8]) -> Result<Self, DecodeError> {
        debug_assert_eq!(buffer[0], Self::OPCODE.byte());
        let immediate = read_word(&buffer[IMMEDIATE_OFFSET..]);
        let register = Register::try_from(buffer[OPERAND_OFFSET])?;
        Ok(MoveImmediateIntoMemory::new(immediate, Pointer::new(register)))
    }
}

impl Instruction {
    /// Writes the encoding into the front of `buffer`, which must hold at
    /// least [`Instruction::byte_length`] bytes
    pub fn encode_into(&self, buffer: &mut [u8]) {
        match self {
            Instruction::HaltAndCatchFire(inst) => inst.encode_into(buffer),
            Instruction::MoveImmediateIntoRegister(inst) => inst.encode_into(buffer),
            Instruction::MoveImmediateIntoMemory(inst) => inst.encode_into(buffer),
        }
    }

    /// Appends the encoding to `output`
    pub fn encode(&self, output: &mut Vec<u8>) {
        let start = output.len();
        output.resize(start + self.byte_length(), 0);
        self.encode_into(&mut output[start..]);
    }

    /// Encodes into a freshly allocated buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_length());
        self.encode(&mut bytes);
        bytes
    }

    /// Decodes the instruction at the front of `buffer`
    ///
    /// Fails on an empty buffer, an unrecognized opcode, fewer bytes than
    /// the opcode's layout needs, or an invalid register ordinal.
    pub fn decode(buffer: &[u8]) -> Result<Instruction, DecodeError> {
        let &first = buffer.first().ok_or(DecodeError::UnexpectedEnd)?;
        let opcode =
            Opcode::from_byte(first).ok_or(DecodeError::UnknownOpcode { opcode: first })?;

        match opcode {
            Opcode::HaltAndCatchFire => decode_variant::<HaltAndCatchFire>(buffer),
            Opcode::MoveImmediateIntoRegister => {
                decode_variant::<MoveImmediateIntoRegister>(buffer)
            }
            Opcode::MoveImmediateIntoMemory => decode_variant::<MoveImmediateIntoMemory>(buffer),
        }
    }
}

/// Checks `buffer` against the layout of `E` and decodes exactly
/// `E::BYTE_LENGTH` bytes of it
fn decode_variant<E>(buffer: &[u8]) -> Result<Instruction, DecodeError>
where
    E: Encoding + Into<Instruction>,
{
    let Some(encoded) = buffer.get(..E::BYTE_LENGTH) else {
        return Err(DecodeError::Truncated {
            opcode: E::OPCODE,
            expected: E::BYTE_LENGTH,
            actual: buffer.len(),
        });
    };
    Ok(E::decode(encoded)?.into())
}

/// Encodes a program into a flat image
pub fn encode_all<'i>(instructions: impl IntoIterator<Item = &'i Instruction>) -> Vec<u8> {
    let mut image = Vec::new();
    for instruction in instructions {
        instruction.encode(&mut image);
    }
    image
}

/// Decodes a flat image into its instructions
///
/// Stops cleanly only when the remaining span is empty; a trailing partial
/// instruction or an unknown opcode fails the whole decode.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Instruction>, DecodeError> {
    let mut instructions = Vec::new();
    let mut remaining = bytes;
    while !remaining.is_empty() {
        let instruction = Instruction::decode(remaining)?;
        remaining = &remaining[instruction.byte_length()..];
        instructions.push(instruction);
    }
    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_register_load() {
        let inst = Instruction::from(MoveImmediateIntoRegister::new(5, Register::A));
        assert_eq!(inst.to_bytes(), vec![0x01, 0x05, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_memory_store() {
        let inst = Instruction::from(MoveImmediateIntoMemory::new(
            0x6C6C6548,
            Pointer::new(Register::A),
        ));
        assert_eq!(inst.to_bytes(), vec![0x02, 0x48, 0x65, 0x6C, 0x6C, 0x00]);
    }

    #[test]
    fn test_encode_halt() {
        assert_eq!(Instruction::from(HaltAndCatchFire).to_bytes(), vec![0x00]);
    }

    #[test]
    fn test_encode_into_leaves_tail_untouched() {
        let mut buffer = [0xAA; 8];
        Instruction::from(MoveImmediateIntoRegister::new(0x01020304, Register::D))
            .encode_into(&mut buffer);
        assert_eq!(buffer, [0x01, 0x04, 0x03, 0x02, 0x01, 0x03, 0xAA, 0xAA]);
    }

    #[test]
    fn test_layout_lengths_match_opcodes() {
        assert_eq!(HaltAndCatchFire::BYTE_LENGTH, 1);
        assert_eq!(MoveImmediateIntoRegister::BYTE_LENGTH, 6);
        assert_eq!(MoveImmediateIntoMemory::BYTE_LENGTH, 6);
        assert_eq!(
            MoveImmediateIntoMemory::BYTE_LENGTH,
            Instruction::from(MoveImmediateIntoMemory::new(0, Pointer::new(Register::B)))
                .byte_length()
        );
    }

    #[test]
    fn test_decode_all_program() {
        let program = vec![
            Instruction::from(MoveImmediateIntoRegister::new(0, Register::A)),
            Instruction::from(MoveImmediateIntoMemory::new(0x41, Pointer::new(Register::A))),
            Instruction::from(HaltAndCatchFire),
        ];
        let image = encode_all(&program);
        assert_eq!(image.len(), 13);
        assert_eq!(decode_all(&image).unwrap(), program);
    }

    #[test]
    fn test_decode_empty_image() {
        assert!(decode_all(&[]).unwrap().is_empty());
        assert!(matches!(
            Instruction::decode(&[]),
            Err(DecodeError::UnexpectedEnd)
        ));
    }

    #[test]
    fn test_decode_truncated() {
        let err = decode_all(&[0x01]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                opcode: Opcode::MoveImmediateIntoRegister,
                expected: 6,
                actual: 1,
            }
        ));

        // Valid halt followed by a partial store
        let err = decode_all(&[0x00, 0x02, 0x41, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { actual: 3, .. }));
    }

    #[test]
    fn test_decode_unknown_opcode() {
        let err = decode_all(&[0x00, 0x07]).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownOpcode { opcode: 0x07 }));
    }

    #[test]
    fn test_decode_unknown_register() {
        let err = Instruction::decode(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x09]).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownRegister { ordinal: 9 }));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let inst = Instruction::decode(&[0x00, 0xFF, 0xFF]).unwrap();
        assert_eq!(inst, Instruction::from(HaltAndCatchFire));
    }
}
