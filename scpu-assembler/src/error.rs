//! Assembler errors

use scpu_spec::ProgramError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Duplicate label `{label}` at line {line} (first defined at line {first})")]
    DuplicateLabel {
        label: String,
        line: usize,
        first: usize,
    },

    #[error("Empty label name at line {line}")]
    EmptyLabel { line: usize },

    #[error("Invalid program: {0}")]
    Program(#[from] ProgramError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
