//! Main assembler logic
//!
//! Source format, one item per line:
//!
//! ```text
//! ; full-line comment
//! start:            ; label, bound to the next instruction
//!     LOAD 5 A      ; instruction, inline comment stripped
//!     JMP start
//! ```

use crate::error::{AssemblerError, Result};
use scpu_spec::Program;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const COMMENT_CHAR: char = ';';
const LABEL_SUFFIX: char = ':';

/// Assembled program plus the 1-based source line of every instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub program: Program,
    pub source_lines: Vec<usize>,
}

impl Listing {
    /// Source line number of the instruction at `index`
    pub fn source_line(&self, index: usize) -> Option<usize> {
        self.source_lines.get(index).copied()
    }
}

/// Assemble source code into a program
pub fn assemble(source: &str) -> Result<Program> {
    Ok(assemble_listing(source)?.program)
}

/// Assemble source code, keeping source line numbers
pub fn assemble_listing(source: &str) -> Result<Listing> {
    let mut lines = Vec::new();
    let mut source_lines = Vec::new();
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut label_lines: HashMap<String, usize> = HashMap::new();

    for (line_num, raw) in source.lines().enumerate() {
        let line_no = line_num + 1;
        let code = strip_comment(raw);

        // Skip empty lines and comments
        if code.is_empty() {
            continue;
        }

        if let Some(name) = code.strip_suffix(LABEL_SUFFIX) {
            let name = name.trim();
            if name.is_empty() {
                return Err(AssemblerError::EmptyLabel { line: line_no });
            }
            if let Some(&first) = label_lines.get(name) {
                return Err(AssemblerError::DuplicateLabel {
                    label: name.to_string(),
                    line: line_no,
                    first,
                });
            }

            tracing::debug!(label = name, index = lines.len(), line = line_no, "label");
            labels.insert(name.to_string(), lines.len());
            label_lines.insert(name.to_string(), line_no);
        } else {
            lines.push(code.to_string());
            source_lines.push(line_no);
        }
    }

    let program = Program::with_labels(lines, labels)?;
    Ok(Listing {
        program,
        source_lines,
    })
}

/// Read and assemble a source file
pub fn assemble_file(path: impl AsRef<Path>) -> Result<Listing> {
    let source = fs::read_to_string(path.as_ref())?;
    assemble_listing(&source)
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_CHAR) {
        Some(pos) => &line[..pos],
        None => line,
    }
    .trim()
}
