//! # Error Types for SCPU

use thiserror::Error;

/// Failure to turn an instruction line into an [`Instruction`](crate::Instruction)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(String),

    #[error("Unknown register: {0}")]
    UnknownRegister(String),

    #[error("Malformed instruction `{opcode}`: {reason}")]
    MalformedInstruction { opcode: String, reason: String },

    #[error("Invalid jump target: {0}")]
    InvalidJumpTarget(String),
}

impl DecodeError {
    pub(crate) fn malformed(opcode: impl Into<String>, reason: impl Into<String>) -> Self {
        DecodeError::MalformedInstruction {
            opcode: opcode.into(),
            reason: reason.into(),
        }
    }
}

/// Invalid program store contents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("Label `{label}` points at index {index}, past program end ({len})")]
    LabelOutOfRange {
        label: String,
        index: usize,
        len: usize,
    },
}
