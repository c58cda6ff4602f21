//! Machine state for SCPU

use scpu_spec::{Register, Word, NUM_REGISTERS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Carry and zero flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub carry: bool,
    pub zero: bool,
}

/// Why a run stopped without a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// PC left the program
    Completed,
    /// Step budget exhausted
    StepLimit,
    /// Cancel token raised
    Cancelled,
    /// Observer asked to stop
    ObserverStop,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HaltReason::Completed => "completed",
            HaltReason::StepLimit => "step limit reached",
            HaltReason::Cancelled => "cancelled",
            HaltReason::ObserverStop => "stopped by observer",
        };
        f.write_str(text)
    }
}

/// Register file, flags and program counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineState {
    /// A, B, C, D, RES
    registers: [Word; NUM_REGISTERS],

    /// Program counter (instruction index)
    pub pc: usize,

    pub flags: Flags,
}

impl MachineState {
    /// All registers zero, flags clear, PC at 0
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> Word {
        self.registers[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: Word) {
        self.registers[reg.index()] = value;
    }

    pub fn registers(&self) -> &[Word; NUM_REGISTERS] {
        &self.registers
    }
}
