//! Execution engine and memory-mapped devices

mod emulator;
mod text_device;

pub use emulator::{Emulator, EmulatorOptions, MachineSnapshot, MachineState};
pub use text_device::{MemoryMappedDevice, TextDevice};
