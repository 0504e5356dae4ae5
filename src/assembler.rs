//! Source text to typed instructions
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Statements → lower() → Instructions → Image
//! ```

use crate::error::{Error, Result};
use crate::isa::{self, Instruction};
use crate::parser::Parser;

/// Pull-based assembler: one typed instruction per call
pub struct Assembler<'a> {
    parser: Parser<'a>,
    finished: bool,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler over `source`; `filename` only appears in diagnostics
    pub fn new(filename: &'a str, source: &'a str) -> Self {
        Assembler {
            parser: Parser::new(filename, source),
            finished: false,
        }
    }

    /// Assembles the next statement
    ///
    /// Returns [`Error::InputExhausted`] once the source is fully consumed.
    pub fn next_instruction(&mut self) -> Result<'a, Instruction> {
        let statement = self.parser.next_instruction()?;
        let instruction = statement.lower()?;
        tracing::debug!(
            row = statement.mnemonic.location.row(),
            %instruction,
            "lowered instruction"
        );
        Ok(instruction)
    }
}

/// Lazily yields instructions until the end of input or the first error
impl<'a> Iterator for Assembler<'a> {
    type Item = Result<'a, Instruction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_instruction() {
            Err(Error::InputExhausted) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
            Ok(instruction) => Some(Ok(instruction)),
        }
    }
}

/// Assembles a whole program; the first error aborts
pub fn assemble<'a>(filename: &'a str, source: &'a str) -> Result<'a, Vec<Instruction>> {
    Assembler::new(filename, source).collect()
}

/// Assembles a whole program into a flat binary image
pub fn assemble_to_bytes<'a>(filename: &'a str, source: &'a str) -> Result<'a, Vec<u8>> {
    let instructions = assemble(filename, source)?;
    let image = isa::encode_all(&instructions);
    tracing::debug!(
        instructions = instructions.len(),
        bytes = image.len(),
        "assembled image"
    );
    Ok(image)
}
