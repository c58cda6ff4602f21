//! # SCPU Instruction Set
//!
//! Textual, register-based instruction set for a small 8-bit CPU.
//!
//! ## Key Features
//! - 8-bit data width, all arithmetic wraps modulo 256
//! - Four general-purpose registers (A-D) and a result register (RES)
//! - Carry and zero flags, written only by arithmetic
//! - Jumps to labels or literal instruction indices
//!
//! ## Example
//!
//! ```rust
//! use scpu_spec::{decode, Instruction, AluOp, Register};
//! use std::collections::HashMap;
//!
//! let instr = decode("ADD A B", &HashMap::new()).unwrap();
//! assert_eq!(instr, Instruction::Alu { op: AluOp::Add, lhs: Register::A, rhs: Register::B });
//! ```

pub mod register;
pub mod opcode;
pub mod instruction;
pub mod token;
pub mod decode;
pub mod error;
pub mod program;

pub use register::{Register, NUM_REGISTERS};
pub use opcode::Opcode;
pub use instruction::{AluOp, Condition, Instruction, Operand};
pub use decode::{decode, parse_register, resolve_target};
pub use error::{DecodeError, ProgramError};
pub use program::Program;

/// Mask applied to every value stored in a register
pub const WORD_MASK: i64 = 0xFF;

/// Register value
pub type Word = u8;

/// Wrap an arbitrary integer into register range (two's complement for
/// negatives)
#[inline]
pub fn to_word(value: i64) -> Word {
    (value & WORD_MASK) as Word
}
