//! # Program Store for SCPU
//!
//! An ordered list of instruction lines plus the label table produced by the
//! assembler. Lines are kept as text; decoding happens when the program is
//! loaded into a VM.

use crate::decode::decode;
use crate::error::{DecodeError, ProgramError};
use crate::instruction::Instruction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Instruction lines and label table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    lines: Vec<String>,
    labels: HashMap<String, usize>,
}

impl Program {
    /// Create a program without labels
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            labels: HashMap::new(),
        }
    }

    /// Create a program with a label table.
    ///
    /// Label indices may equal the line count (a label after the last
    /// instruction); anything past that is rejected.
    pub fn with_labels<I, S>(lines: I, labels: HashMap<String, usize>) -> Result<Self, ProgramError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = Self {
            lines: lines.into_iter().map(Into::into).collect(),
            labels,
        };

        let len = program.lines.len();
        if let Some((label, &index)) = program.labels.iter().find(|&(_, &index)| index > len) {
            return Err(ProgramError::LabelOutOfRange {
                label: label.clone(),
                index,
                len,
            });
        }

        Ok(program)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Resolve a label to its instruction index
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    pub fn labels(&self) -> &HashMap<String, usize> {
        &self.labels
    }

    /// Decode the line at `index` against this program's labels
    pub fn decode(&self, index: usize) -> Option<Result<Instruction, DecodeError>> {
        self.line(index).map(|line| decode(line, &self.labels))
    }

    /// Decode every line, keeping failures in place
    pub fn decode_all(&self) -> Vec<Result<Instruction, DecodeError>> {
        self.lines
            .iter()
            .map(|line| decode(line, &self.labels))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Program {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Program::new(iter)
    }
}
