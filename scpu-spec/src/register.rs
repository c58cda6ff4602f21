//! Register definitions for SCPU

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of registers (A-D plus RES)
pub const NUM_REGISTERS: usize = 5;

/// Register file slot
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    /// Result register - the only destination of ALU operations
    Res = 4,
}

impl Register {
    /// All registers in file order
    pub const ALL: [Register; NUM_REGISTERS] = [
        Register::A,
        Register::B,
        Register::C,
        Register::D,
        Register::Res,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a register by its assembly name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|reg| reg.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::Res => "RES",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
