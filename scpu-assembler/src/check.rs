//! Static program checking
//!
//! Decodes every line up front so faults the VM would only hit at fetch
//! time can be reported before a run.

use crate::assembler::Listing;
use scpu_spec::DecodeError;
use std::fmt;

/// A line that will fault when fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Instruction index
    pub index: usize,
    /// 1-based source line, when known
    pub source_line: Option<usize>,
    pub text: String,
    pub error: DecodeError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source_line {
            Some(line) => write!(
                f,
                "line {} (instruction {}): {}: `{}`",
                line, self.index, self.error, self.text
            ),
            None => write!(f, "instruction {}: {}: `{}`", self.index, self.error, self.text),
        }
    }
}

/// Decode every instruction and collect the failures
pub fn check(listing: &Listing) -> Vec<Diagnostic> {
    let program = &listing.program;

    program
        .decode_all()
        .into_iter()
        .enumerate()
        .filter_map(|(index, decoded)| {
            decoded.err().map(|error| Diagnostic {
                index,
                source_line: listing.source_line(index),
                text: program.line(index).unwrap_or_default().to_string(),
                error,
            })
        })
        .collect()
}
