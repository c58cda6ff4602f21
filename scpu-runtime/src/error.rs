//! Runtime error types for SCPU

use scpu_spec::{DecodeError, Register, Word};
use thiserror::Error;

/// Fault that ends a `step` or `run`.
///
/// `pc` is the index of the faulting instruction. The machine's own PC has
/// already moved past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("{source} at PC {pc} (`{line}`)")]
    Decode {
        pc: usize,
        line: String,
        #[source]
        source: DecodeError,
    },

    #[error("Division by zero ({lhs}={dividend} / {rhs}=0) at PC {pc} (`{line}`)")]
    DivisionByZero {
        pc: usize,
        lhs: Register,
        rhs: Register,
        /// Value of `lhs` when the fault hit
        dividend: Word,
        line: String,
    },

    #[error("PC {pc} is outside the program (length {len})")]
    ProgramCounterOutOfRange { pc: usize, len: usize },
}

impl RuntimeError {
    /// Index of the instruction that raised the fault
    pub fn pc(&self) -> usize {
        match self {
            RuntimeError::Decode { pc, .. }
            | RuntimeError::DivisionByZero { pc, .. }
            | RuntimeError::ProgramCounterOutOfRange { pc, .. } => *pc,
        }
    }

    /// Source text of the faulting instruction, when there is one
    pub fn line(&self) -> Option<&str> {
        match self {
            RuntimeError::Decode { line, .. } | RuntimeError::DivisionByZero { line, .. } => {
                Some(line)
            }
            RuntimeError::ProgramCounterOutOfRange { .. } => None,
        }
    }

    /// Decode failure, if this is one
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            RuntimeError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
