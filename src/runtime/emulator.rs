use serde::Serialize;

use super::text_device::{MemoryMappedDevice, TextDevice};
use crate::error::{DecodeError, Fault};
use crate::isa::{Instruction, Pointer, Register, Word};

/// Emulator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorOptions {
    /// Maximum number of steps [`Emulator::run`] executes before giving up
    pub step_limit: usize,
}

impl Default for EmulatorOptions {
    fn default() -> Self {
        Self {
            step_limit: 1_000_000,
        }
    }
}

/// Execution state of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MachineState {
    /// Fetching and executing instructions
    Running,
    /// Stopped by a halt instruction; terminal
    Halted,
}

/// Serializable copy of the observable machine state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineSnapshot {
    /// Register file in ordinal order
    pub registers: [Word; Register::COUNT],
    /// Address of the next instruction
    pub instruction_pointer: usize,
    /// Whether the machine has halted
    pub halted: bool,
    /// Screen contents with null cells shown as spaces
    pub screen: String,
}

impl MachineSnapshot {
    /// Renders the snapshot as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Register machine with a memory-mapped text screen
///
/// Memory layout:
///
/// ```text
/// 0                      1920                        1920 + image
/// +----------------------+---------------------------+
/// | text device window   | instruction image         |
/// +----------------------+---------------------------+
///                        ^ instruction pointer starts here
/// ```
///
/// Memory is owned by the emulator and mutated only by [`Emulator::step`].
/// Every step is atomic: a step that faults leaves memory, registers and the
/// instruction pointer untouched.
#[derive(Debug, Clone)]
pub struct Emulator {
    memory: Vec<u8>,
    instruction_pointer: usize,
    halted: bool,
    registers: [Word; Register::COUNT],
    options: EmulatorOptions,
}

impl Emulator {
    /// Address at which the loaded image starts executing
    pub const ENTRY_POINT: usize = TextDevice::NUM_MAPPED_BYTES;

    /// Creates an emulator with default options
    pub fn new(image: &[u8]) -> Self {
        Self::with_options(image, EmulatorOptions::default())
    }

    /// Creates an emulator that loads `image` right after the device window
    pub fn with_options(image: &[u8], options: EmulatorOptions) -> Self {
        let mut memory = vec![0; Self::ENTRY_POINT + image.len()];
        memory[Self::ENTRY_POINT..].copy_from_slice(image);
        tracing::debug!(
            image_bytes = image.len(),
            memory_bytes = memory.len(),
            "emulator created"
        );

        Emulator {
            memory,
            instruction_pointer: Self::ENTRY_POINT,
            halted: false,
            registers: [0; Register::COUNT],
            options,
        }
    }

    /// Executes one instruction
    pub fn step(&mut self) -> Result<(), Fault> {
        if self.halted {
            tracing::warn!("step called on a halted emulator");
            return Err(Fault::Halted);
        }

        let address = self.instruction_pointer;
        let instruction = self.fetch(address).map_err(|source| {
            tracing::warn!(address, %source, "decode fault");
            Fault::Decode { address, source }
        })?;
        tracing::trace!(address, %instruction, "step");

        match instruction {
            Instruction::HaltAndCatchFire(_) => {
                self.halted = true;
                tracing::debug!(address, "halted");
                return Ok(());
            }
            Instruction::MoveImmediateIntoRegister(inst) => {
                self.write_register(inst.register, inst.immediate);
            }
            Instruction::MoveImmediateIntoMemory(inst) => {
                self.write_into_memory(inst.pointer, inst.immediate)?;
            }
        }

        self.instruction_pointer += instruction.byte_length();
        Ok(())
    }

    /// Steps until the machine halts, returning the number of steps taken
    ///
    /// Gives up with [`Fault::StepLimitExceeded`] once the configured step
    /// limit is reached without halting. Calling `run` on a halted machine
    /// executes nothing and returns zero.
    pub fn run(&mut self) -> Result<usize, Fault> {
        let limit = self.options.step_limit;
        let mut steps = 0;
        while !self.halted {
            if steps >= limit {
                tracing::warn!(limit, "step limit exceeded");
                return Err(Fault::StepLimitExceeded { limit });
            }
            self.step()?;
            steps += 1;
        }
        Ok(steps)
    }

    fn fetch(&self, address: usize) -> Result<Instruction, DecodeError> {
        Instruction::decode(self.memory.get(address..).unwrap_or_default())
    }

    fn write_register(&mut self, register: Register, value: Word) {
        self.registers[register.index()] = value;
    }

    fn write_into_memory(&mut self, pointer: Pointer, value: Word) -> Result<(), Fault> {
        let address = self.read_register(pointer.register()) as usize;
        let bytes = value.to_le_bytes();
        let memory_size = self.memory.len();

        let target = address
            .checked_add(bytes.len())
            .and_then(|end| self.memory.get_mut(address..end))
            .ok_or_else(|| {
                tracing::warn!(address, memory_size, "access violation");
                Fault::AccessViolation {
                    address,
                    length: bytes.len(),
                    memory_size,
                }
            })?;
        target.copy_from_slice(&bytes);
        Ok(())
    }

    /// Whether a halt instruction has executed
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Current execution state
    pub fn state(&self) -> MachineState {
        if self.halted {
            MachineState::Halted
        } else {
            MachineState::Running
        }
    }

    /// Current value of `register`
    pub fn read_register(&self, register: Register) -> Word {
        self.registers[register.index()]
    }

    /// Address of the next instruction
    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    /// The whole memory, device window included
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// View of the text screen
    pub fn text_device(&self) -> TextDevice<'_> {
        TextDevice::from_memory(&self.memory)
    }

    /// Options the emulator was created with
    pub fn options(&self) -> EmulatorOptions {
        self.options
    }

    /// Copies the observable state
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            registers: self.registers,
            instruction_pointer: self.instruction_pointer,
            halted: self.halted,
            screen: self.text_device().printable_text(),
        }
    }
}
