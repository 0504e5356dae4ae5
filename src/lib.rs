//! # Backseat - Assembler and Emulator for a Tiny Register Machine
//!
//! A complete toolchain for a minimal instruction set: line-oriented assembly
//! source is lexed, parsed and lowered into typed instructions, encoded into
//! a compact little-endian binary image, and executed by a register-machine
//! emulator whose first 1920 bytes of memory are a 24x80 text screen.
//!
//! ## Quick Start
//!
//! ```rust
//! use backseat::{assemble_to_bytes, Emulator, Register};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = "
//!     copy 0, A
//!     copy 0x6C6C6548, *A ; \"Hell\"
//!     copy 4, A
//!     copy 0x0000006F, *A ; \"o\"
//!     halt
//! ";
//!
//! let image = assemble_to_bytes("hello.asm", source)?;
//! let mut emulator = Emulator::new(&image);
//! emulator.run()?;
//!
//! assert!(emulator.is_halted());
//! assert_eq!(emulator.read_register(Register::A), 4);
//! assert!(emulator.text_device().printable_text().starts_with("Hello "));
//! # Ok(())
//! # }
//! ```
//!
//! ## Assembly Language
//!
//! One statement per line; `;` starts a comment running to the end of line.
//!
//! | Statement | Effect | Encoding |
//! |---|---|---|
//! | `halt` | stop the machine | `00` |
//! | `copy <imm>, <reg>` | load an immediate into a register | `01 imm:u32le reg:u8` |
//! | `copy <imm>, *<reg>` | store an immediate at the address held in a register | `02 imm:u32le reg:u8` |
//!
//! Registers are `A`, `B`, `C` and `D`. Immediates are decimal or
//! `0x`-prefixed hexadecimal and must fit 32 bits.
//!
//! ## Architecture
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Statements → lower() → Instructions
//!                                                               │
//!          Screen ← TextDevice ← Memory ← Emulator ← Image ← encode
//! ```
//!
//! ### Main Components
//!
//! - [`Lexer`] - Tokenizes source text, one token per call
//! - [`Parser`] - Pull parser producing one statement per call
//! - [`Assembler`] - Parses and lowers into typed [`Instruction`]s
//! - [`isa::codec`] - Fixed binary layout of each instruction
//! - [`Emulator`] - Fetch, decode and execute loop over flat memory
//! - [`TextDevice`] - Character grid view over the start of memory
//! - [`Diagnostic`] - Renders an [`Error`] with its source line and a caret
//!
//! ## Error Handling
//!
//! Assembly errors borrow the source text, so a diagnostic can point into it:
//!
//! ```rust
//! use backseat::{assemble, Diagnostic, Error};
//!
//! let err = assemble("bad.asm", "copy 5, $A").unwrap_err();
//! assert!(matches!(err, Error::InvalidChar { .. }));
//!
//! let rendered = Diagnostic::from_error(&err).render();
//! assert_eq!(rendered, "bad.asm:1:9: Invalid character: '$'\ncopy 5, $A\n        ^");
//! ```
//!
//! A corrupt image or emulator misuse is reported as a [`Fault`] instead:
//!
//! ```rust
//! use backseat::{Emulator, Fault};
//!
//! let mut emulator = Emulator::new(&[0x00]);
//! emulator.step().unwrap();
//! assert_eq!(emulator.step(), Err(Fault::Halted));
//! ```
//!
//! ## License
//!
//! Licensed under the [MIT License](https://opensource.org/licenses/MIT).

/// Version of the toolchain
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assembler;
pub mod diagnostic;
pub mod error;
pub mod isa;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use assembler::{assemble, assemble_to_bytes, Assembler};
pub use diagnostic::Diagnostic;
pub use error::{DecodeError, Error, ErrorSeverity, Fault, Result};
pub use isa::{
    decode_all, disassemble, encode_all, DisassembledInstr, Instruction, Opcode, Pointer,
    Register, Word,
};
pub use lexer::{Lexer, SourceLocation, Token, TokenKind};
pub use parser::Parser;
pub use runtime::{
    Emulator, EmulatorOptions, MachineSnapshot, MachineState, MemoryMappedDevice, TextDevice,
};
