//! Backseat Parser Module
//!
//! Parses line-oriented assembly into statements and lowers them into typed
//! instructions.

mod ast;
mod line_parser;
mod lower;

pub use ast::{Instruction, Operand};
pub use line_parser::Parser;
