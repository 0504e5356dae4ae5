//! Example: Assemble and run a program, then print the screen
//!
//! Usage: cargo run --example hello_world [program.asm]
//!
//! Without an argument the bundled "Hello, world!" program is used.

use anyhow::{anyhow, Context};
use backseat::{assemble_to_bytes, disassemble, Diagnostic, Emulator};
use std::env;
use std::fs;

const HELLO_WORLD: &str = include_str!("hello_world.asm");

fn main() -> anyhow::Result<()> {
    let (filename, source) = match env::args().nth(1) {
        Some(path) => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Error reading file '{}'", path))?;
            (path, source)
        }
        None => ("hello_world.asm".to_string(), HELLO_WORLD.to_string()),
    };

    let image = assemble_to_bytes(&filename, &source)
        .map_err(|err| anyhow!("{}", Diagnostic::from_error(&err)))?;

    println!("Decoded memory:");
    for entry in disassemble(&image)? {
        println!("{}", entry.instruction.describe());
    }

    let mut emulator = Emulator::new(&image);
    let steps = emulator.run()?;

    println!("\nHalted after {} steps. Screen:", steps);
    println!("{}", "=".repeat(80));
    println!("{}", emulator.text_device().printable_text());
    println!("{}", "=".repeat(80));

    Ok(())
}
